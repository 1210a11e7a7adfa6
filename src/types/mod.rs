mod enums;
mod models;

pub(crate) use enums::joined;
pub use enums::{Driver, MemberRole, SchemaGenStatus, SslMode, ViewType};
pub use models::{
    DEFAULT_SCHEMA, FeatureFlags, FormConfig, LayoutConfig, PermissionConfig, Project,
    ProjectDetails, ProjectList, ProjectMember, ProjectTheme, TableSchema, ThemeSettings,
    UiConfig, User, UserPreferences,
};
