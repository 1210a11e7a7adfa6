use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::Store;
use crate::error::{Error, Result};
use crate::types::{Project, ProjectMember, SchemaGenStatus, TableSchema, User, UserPreferences};

struct UserRecord {
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct Tables {
    users: HashMap<String, UserRecord>,
    sessions: HashMap<String, String>,
    /// Kept in creation order.
    projects: Vec<Project>,
    table_schemas: HashMap<String, Vec<TableSchema>>,
    members: Vec<ProjectMember>,
}

impl Tables {
    fn project_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    fn is_member(&self, project_id: &str, user_id: &str) -> bool {
        self.members
            .iter()
            .any(|m| m.project_id == project_id && m.user_id == user_id)
    }
}

/// Process-local store. Everything is lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Store for MemoryStore {
    // User operations

    fn create_user(&self, user: &User, password_hash: &str) -> Result<()> {
        let mut tables = self.tables();
        if tables
            .users
            .values()
            .any(|r| r.user.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(Error::AlreadyExists);
        }
        tables.users.insert(
            user.id.clone(),
            UserRecord {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(())
    }

    fn get_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.tables().users.get(id).map(|r| r.user.clone()))
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .tables()
            .users
            .values()
            .find(|r| r.user.email.eq_ignore_ascii_case(email))
            .map(|r| r.user.clone()))
    }

    fn get_password_hash(&self, user_id: &str) -> Result<Option<String>> {
        Ok(self
            .tables()
            .users
            .get(user_id)
            .map(|r| r.password_hash.clone()))
    }

    fn update_user_preferences(
        &self,
        user_id: &str,
        prefs: UserPreferences,
    ) -> Result<Option<User>> {
        let mut tables = self.tables();
        Ok(tables.users.get_mut(user_id).map(|r| {
            r.user.prefers_single_project = prefs.prefers_single_project;
            r.user.clone()
        }))
    }

    // Session operations

    fn create_session(&self, session_id: &str, user_id: &str) -> Result<()> {
        let mut tables = self.tables();
        if !tables.users.contains_key(user_id) {
            return Err(Error::NotFound);
        }
        tables
            .sessions
            .insert(session_id.to_string(), user_id.to_string());
        Ok(())
    }

    fn get_session_user(&self, session_id: &str) -> Result<Option<User>> {
        let tables = self.tables();
        Ok(tables
            .sessions
            .get(session_id)
            .and_then(|user_id| tables.users.get(user_id))
            .map(|r| r.user.clone()))
    }

    fn delete_session(&self, session_id: &str) -> Result<bool> {
        Ok(self.tables().sessions.remove(session_id).is_some())
    }

    // Project operations

    fn create_project(&self, project: &Project) -> Result<()> {
        let mut tables = self.tables();
        let owner_exists = project
            .user_id
            .as_ref()
            .is_some_and(|id| tables.users.contains_key(id));
        if !owner_exists {
            return Err(Error::NotFound);
        }
        if tables.projects.iter().any(|p| p.id == project.id) {
            return Err(Error::AlreadyExists);
        }
        tables.projects.push(project.clone());
        Ok(())
    }

    fn get_project(&self, id: &str) -> Result<Option<Project>> {
        Ok(self.tables().projects.iter().find(|p| p.id == id).cloned())
    }

    fn list_user_projects(&self, user_id: &str) -> Result<Vec<Project>> {
        let tables = self.tables();
        Ok(tables
            .projects
            .iter()
            .filter(|p| p.user_id.as_deref() == Some(user_id) || tables.is_member(&p.id, user_id))
            .cloned()
            .collect())
    }

    fn update_schema_status(&self, id: &str, status: SchemaGenStatus) -> Result<bool> {
        let mut tables = self.tables();
        let Some(project) = tables.project_mut(id) else {
            return Ok(false);
        };
        let current = project.schema_gen_status;
        if !current.can_transition_to(status) {
            return Err(Error::Conflict(format!(
                "schema generation cannot move from {current} to {status}"
            )));
        }
        project.schema_gen_status = status;
        Ok(true)
    }

    fn delete_project(&self, id: &str) -> Result<bool> {
        let mut tables = self.tables();
        let before = tables.projects.len();
        tables.projects.retain(|p| p.id != id);
        if tables.projects.len() == before {
            return Ok(false);
        }
        tables.table_schemas.remove(id);
        tables.members.retain(|m| m.project_id != id);
        Ok(true)
    }

    // Table schema operations

    fn create_table_schema(&self, table: &TableSchema) -> Result<()> {
        let mut tables = self.tables();
        if tables.project_mut(&table.project_id).is_none() {
            return Err(Error::NotFound);
        }
        tables
            .table_schemas
            .entry(table.project_id.clone())
            .or_default()
            .push(table.clone());
        Ok(())
    }

    fn list_table_schemas(&self, project_id: &str) -> Result<Vec<TableSchema>> {
        Ok(self
            .tables()
            .table_schemas
            .get(project_id)
            .cloned()
            .unwrap_or_default())
    }

    // Member operations

    fn add_member(&self, member: &ProjectMember) -> Result<()> {
        let mut tables = self.tables();
        if tables.project_mut(&member.project_id).is_none()
            || !tables.users.contains_key(&member.user_id)
        {
            return Err(Error::NotFound);
        }
        if tables.is_member(&member.project_id, &member.user_id) {
            return Err(Error::AlreadyExists);
        }
        tables.members.push(member.clone());
        Ok(())
    }

    fn get_member(&self, project_id: &str, user_id: &str) -> Result<Option<ProjectMember>> {
        Ok(self
            .tables()
            .members
            .iter()
            .find(|m| m.project_id == project_id && m.user_id == user_id)
            .cloned())
    }

    fn list_members(&self, project_id: &str) -> Result<Vec<ProjectMember>> {
        Ok(self
            .tables()
            .members
            .iter()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect())
    }
}
