//! One client session against a Plugmin backend.
//!
//! A [`Session`] owns the HTTP client and the query cache for as long as the
//! user stays logged in. Mutations are validated locally before anything is
//! sent, and a successful mutation invalidates the reads it made stale.

use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::{Mutation, QueryCache, QueryKey};
use crate::client::{ApiClient, UnauthorizedPolicy, paths, unwrap_envelope};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::types::{Project, ProjectDetails, ProjectList, ProjectMember, User, UserPreferences};
use crate::validation::{
    validate_login, validate_new_project, validate_new_project_member, validate_new_user,
};

/// `POST /api/projects/register` answers either `{project: {...}}` or the
/// bare record.
#[derive(Deserialize)]
#[serde(untagged)]
enum RegisteredProject {
    Wrapped { project: Project },
    Bare(Project),
}

impl From<RegisteredProject> for Project {
    fn from(registered: RegisteredProject) -> Self {
        match registered {
            RegisteredProject::Wrapped { project } | RegisteredProject::Bare(project) => project,
        }
    }
}

pub struct Session {
    client: ApiClient,
    cache: QueryCache,
}

impl Session {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            cache: QueryCache::new(),
        }
    }

    /// Opens a session, resuming from exported credentials when given.
    pub fn connect(config: &ClientConfig, session_cookie: Option<&str>) -> Result<Self> {
        Ok(Self::new(ApiClient::with_session(config, session_cookie)?))
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Session cookie to persist so the session can be resumed later.
    #[must_use]
    pub fn credentials(&self) -> Option<String> {
        self.client.session_cookie()
    }

    async fn fetch(&self, key: &QueryKey) -> Result<Value> {
        let path = key.request_path();
        self.cache
            .fetch_with(key, || async {
                let body = self.client.request(Method::GET, &path, None::<&()>).await?;
                Ok(unwrap_envelope(body))
            })
            .await
    }

    /// Cached read under the tolerant 401 policy. Unauthenticated results are
    /// not cached, so a later login is seen without an explicit invalidation.
    async fn read_tolerant<T: DeserializeOwned>(&self, key: &QueryKey) -> Result<Option<T>> {
        let result = self.fetch(key).await;
        let Some(value) = UnauthorizedPolicy::ReturnNull.resolve(result)? else {
            tracing::debug!("GET {key} unauthenticated, returning null");
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(value)?))
    }

    fn finish(&self, mutation: &Mutation) {
        tracing::debug!("{} succeeded", mutation.name());
        self.cache.apply(mutation);
    }

    pub async fn register_user(&self, input: &Value) -> Result<User> {
        let payload = validate_new_user(input)?;
        let user = self.client.post(paths::REGISTER, &payload).await?;
        self.finish(&Mutation::RegisterUser);
        Ok(user)
    }

    pub async fn login(&self, input: &Value) -> Result<User> {
        let payload = validate_login(input)?;
        let user = self.client.post(paths::LOGIN, &payload).await?;
        self.finish(&Mutation::Login);
        Ok(user)
    }

    /// Ends the session on the backend and drops every cached read.
    pub async fn logout(&self) -> Result<()> {
        self.client
            .request(Method::POST, paths::LOGOUT, None::<&()>)
            .await?;
        self.finish(&Mutation::Logout);
        Ok(())
    }

    /// The logged-in user, or `None` without a session.
    pub async fn current_user(&self) -> Result<Option<User>> {
        self.read_tolerant(&QueryKey::current_user()).await
    }

    /// The user's projects, or `None` without a session.
    pub async fn list_projects(&self) -> Result<Option<ProjectList>> {
        self.read_tolerant(&QueryKey::project_list()).await
    }

    pub async fn get_project(&self, id: &str) -> Result<ProjectDetails> {
        let value = self.fetch(&QueryKey::project(id)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn register_project(&self, input: &Value) -> Result<Project> {
        let payload = validate_new_project(input)?;
        let registered: RegisteredProject =
            self.client.post(paths::REGISTER_PROJECT, &payload).await?;
        self.finish(&Mutation::RegisterProject);

        let project = Project::from(registered);
        tracing::info!(
            "registered project {} ({}), schema generation {}",
            project.project_name,
            project.id,
            project.schema_gen_status
        );
        Ok(project)
    }

    /// Deletes a project and returns the backend's acknowledgement.
    pub async fn delete_project(&self, id: &str) -> Result<Value> {
        let ack = self.client.delete(&paths::project(id)).await?;
        self.finish(&Mutation::DeleteProject(id.to_string()));
        Ok(ack)
    }

    pub async fn list_members(&self, project_id: &str) -> Result<Vec<ProjectMember>> {
        let value = self.fetch(&QueryKey::project_members(project_id)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn add_member(&self, input: &Value) -> Result<ProjectMember> {
        let payload = validate_new_project_member(input)?;
        let member = self
            .client
            .post(&paths::project_members(&payload.project_id), &payload)
            .await?;
        self.finish(&Mutation::AddProjectMember(payload.project_id));
        Ok(member)
    }

    /// Records the preference for the first time (onboarding).
    pub async fn set_preferences(&self, preferences: UserPreferences) -> Result<Value> {
        let ack = self
            .client
            .request(Method::POST, paths::USER_PREFERENCES, Some(&preferences))
            .await?;
        self.finish(&Mutation::UpdatePreferences);
        Ok(unwrap_envelope(ack))
    }

    pub async fn update_preferences(&self, preferences: UserPreferences) -> Result<Value> {
        let ack = self
            .client
            .request(Method::PATCH, paths::USER_PREFERENCES, Some(&preferences))
            .await?;
        self.finish(&Mutation::UpdatePreferences);
        Ok(unwrap_envelope(ack))
    }
}
