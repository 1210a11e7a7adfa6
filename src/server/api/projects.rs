use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::auth::RequireUser;
use crate::server::AppState;
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use crate::store::Store;
use crate::types::{
    FeatureFlags, LayoutConfig, MemberRole, PermissionConfig, Project, ProjectDetails,
    ProjectList, ProjectMember, ProjectTheme, SchemaGenStatus, User,
};
use crate::validation::{validate_new_project, validate_new_project_member};

/// Connection passwords are accepted on registration but never sent back.
fn redacted(mut project: Project) -> Project {
    project.password = None;
    project
}

fn is_owner(project: &Project, user: &User) -> bool {
    project.user_id.as_deref() == Some(user.id.as_str())
}

/// Loads a project the user owns or is a member of. Anything else is
/// reported as missing so ids of other users' projects do not leak.
fn visible_project(store: &dyn Store, id: &str, user: &User) -> Result<Project, ApiError> {
    let project = store
        .get_project(id)
        .api_err("Failed to get project")?
        .or_not_found("Project not found")?;

    if is_owner(&project, user)
        || store
            .get_member(id, &user.id)
            .api_err("Failed to check membership")?
            .is_some()
    {
        Ok(project)
    } else {
        Err(ApiError::not_found("Project not found"))
    }
}

fn owned_project(
    store: &dyn Store,
    id: &str,
    user: &User,
    action: &str,
) -> Result<Project, ApiError> {
    let project = visible_project(store, id, user)?;
    if !is_owner(&project, user) {
        return Err(ApiError::forbidden(format!(
            "Only the project owner can {action}"
        )));
    }
    Ok(project)
}

pub async fn list_projects(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let records: Vec<Project> = state
        .store
        .list_user_projects(&auth.user.id)
        .api_err("Failed to list projects")?
        .into_iter()
        .map(redacted)
        .collect();
    let total = records.len() as u64;

    Ok::<_, ApiError>(ApiResponse::success(ProjectList { records, total }))
}

pub async fn register_project(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Json(input): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.as_ref();
    let new_project = validate_new_project(&input)?;
    let now = Utc::now();

    let project = Project {
        id: Uuid::new_v4().to_string(),
        project_name: new_project.project_name,
        description: new_project.description,
        user_id: Some(auth.user.id.clone()),
        db_name: new_project.db_name,
        driver: new_project.driver.to_string(),
        user_name: new_project.user_name,
        password: Some(new_project.password),
        host: new_project.host,
        port: new_project.port,
        schema: Some(new_project.schema),
        ssl_mode: new_project.ssl_mode.to_string(),
        schema_gen_status: SchemaGenStatus::Pending,
        theme_config: ProjectTheme::default(),
        features: FeatureFlags::default(),
        layout_config: LayoutConfig::default(),
        permissions: PermissionConfig::default(),
        created_at: Some(now),
    };

    store
        .create_project(&project)
        .api_err("Failed to create project")?;

    let owner = ProjectMember {
        id: Uuid::new_v4().to_string(),
        project_id: project.id.clone(),
        user_id: auth.user.id.clone(),
        role: MemberRole::Admin,
        permissions: Map::new(),
        created_at: Some(now),
    };
    store
        .add_member(&owner)
        .api_err("Failed to record project owner")?;

    tracing::info!(
        "registered project {} for user {}, schema generation pending",
        project.id,
        auth.user.id
    );

    Ok((
        StatusCode::CREATED,
        ApiResponse::success(json!({ "project": redacted(project) }))
            .with_message("Project registered; schema generation started"),
    ))
}

pub async fn get_project(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let project = visible_project(store, &id, &auth.user)?;
    let tables = store
        .list_table_schemas(&id)
        .api_err("Failed to list tables")?;

    Ok::<_, ApiError>(ApiResponse::success(ProjectDetails {
        project: redacted(project),
        tables,
    }))
}

pub async fn delete_project(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.as_ref();
    owned_project(store, &id, &auth.user, "delete it")?;

    if !store.delete_project(&id).api_err("Failed to delete project")? {
        return Err(ApiError::not_found("Project not found"));
    }

    tracing::info!("deleted project {id}");

    Ok(ApiResponse::success(json!({ "id": id })).with_message("Project deleted"))
}

pub async fn list_members(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    visible_project(store, &id, &auth.user)?;
    let members = store.list_members(&id).api_err("Failed to list members")?;

    Ok::<_, ApiError>(ApiResponse::success(members))
}

pub async fn add_member(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.as_ref();
    owned_project(store, &id, &auth.user, "add members")?;

    let new_member = validate_new_project_member(&input)?;
    if new_member.project_id != id {
        return Err(ApiError::bad_request("projectId does not match the URL"));
    }

    store
        .get_user(&new_member.user_id)
        .api_err("Failed to get user")?
        .or_not_found("User not found")?;

    let member = ProjectMember {
        id: Uuid::new_v4().to_string(),
        project_id: new_member.project_id,
        user_id: new_member.user_id,
        role: new_member.role,
        permissions: Map::new(),
        created_at: Some(Utc::now()),
    };
    store
        .add_member(&member)
        .api_err("User is already a member of this project")?;

    Ok((StatusCode::CREATED, ApiResponse::success(member)))
}
