mod auth;
mod commands;
pub mod credentials;
mod preferences;
mod project;
mod prompts;
pub mod render;

pub use auth::{RegisterArgs, run_auth_login, run_auth_logout, run_auth_register, run_auth_whoami};
pub use commands::{AuthCommands, PreferencesCommands, ProjectCommands};
pub use preferences::run_preferences_set;
pub use project::{
    CreateArgs, run_project_add_member, run_project_create, run_project_delete,
    run_project_list, run_project_members, run_project_show,
};
