mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::types::{Project, ProjectMember, SchemaGenStatus, TableSchema, User, UserPreferences};

/// Store defines the persistence interface of the development backend.
pub trait Store: Send + Sync {
    // User operations
    /// Fails with `AlreadyExists` when the email is taken.
    fn create_user(&self, user: &User, password_hash: &str) -> Result<()>;
    fn get_user(&self, id: &str) -> Result<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn get_password_hash(&self, user_id: &str) -> Result<Option<String>>;
    fn update_user_preferences(
        &self,
        user_id: &str,
        prefs: UserPreferences,
    ) -> Result<Option<User>>;

    // Session operations
    fn create_session(&self, session_id: &str, user_id: &str) -> Result<()>;
    fn get_session_user(&self, session_id: &str) -> Result<Option<User>>;
    fn delete_session(&self, session_id: &str) -> Result<bool>;

    // Project operations
    /// Fails with `NotFound` when the owner does not exist.
    fn create_project(&self, project: &Project) -> Result<()>;
    fn get_project(&self, id: &str) -> Result<Option<Project>>;
    /// Projects the user owns or is a member of, oldest first.
    fn list_user_projects(&self, user_id: &str) -> Result<Vec<Project>>;
    /// Fails with `Conflict` when the status may not move to `status`.
    fn update_schema_status(&self, id: &str, status: SchemaGenStatus) -> Result<bool>;
    /// Removes the project with its tables and members.
    fn delete_project(&self, id: &str) -> Result<bool>;

    // Table schema operations
    fn create_table_schema(&self, table: &TableSchema) -> Result<()>;
    fn list_table_schemas(&self, project_id: &str) -> Result<Vec<TableSchema>>;

    // Member operations
    /// Fails with `NotFound` when the project or user does not exist, and
    /// with `AlreadyExists` when the user is already a member.
    fn add_member(&self, member: &ProjectMember) -> Result<()>;
    fn get_member(&self, project_id: &str, user_id: &str) -> Result<Option<ProjectMember>>;
    fn list_members(&self, project_id: &str) -> Result<Vec<ProjectMember>>;
}
