use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{Driver, MemberRole, SchemaGenStatus, SslMode, ViewType};

pub const DEFAULT_SCHEMA: &str = "public";

fn default_true() -> bool {
    true
}

fn default_layout() -> String {
    "default".to_string()
}

/// Per-user UI theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub mode: String,
    pub primary: String,
    pub radius: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            mode: "light".to_string(),
            primary: "blue".to_string(),
            radius: "0.5rem".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub purpose: String,
    pub organization: String,
    #[serde(default)]
    pub prefers_single_project: bool,
    #[serde(default)]
    pub theme: ThemeSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Theme of a generated admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectTheme {
    pub mode: String,
    pub primary: String,
    pub radius: String,
    pub layout: String,
}

impl Default for ProjectTheme {
    fn default() -> Self {
        let theme = ThemeSettings::default();
        Self {
            mode: theme.mode,
            primary: theme.primary,
            radius: theme.radius,
            layout: default_layout(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    #[serde(default = "default_true")]
    pub rest_api: bool,
    #[serde(default = "default_true")]
    pub form_builder: bool,
    #[serde(default = "default_true")]
    pub file_upload: bool,
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub audit: bool,
    #[serde(default = "default_true")]
    pub analytics: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            rest_api: true,
            form_builder: true,
            file_upload: true,
            notifications: true,
            audit: true,
            analytics: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(default = "default_true")]
    pub sidebar: bool,
    #[serde(default)]
    pub menu_items: Vec<Value>,
    #[serde(default)]
    pub dashboard_layout: Vec<Value>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sidebar: true,
            menu_items: Vec::new(),
            dashboard_layout: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionConfig {
    pub roles: Vec<Value>,
    pub policies: Map<String, Value>,
}

/// A registered database connection and its generated dashboard settings.
///
/// List endpoints may return abbreviated records, so everything except the
/// identity fields falls back to its default when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub db_name: String,
    /// Free text on the wire; only registration is checked against [`Driver`].
    #[serde(default = "default_driver")]
    pub driver: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
    #[serde(default)]
    pub schema_gen_status: SchemaGenStatus,
    #[serde(default)]
    pub theme_config: ProjectTheme,
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub layout_config: LayoutConfig,
    #[serde(default)]
    pub permissions: PermissionConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_driver() -> String {
    Driver::Postgres.to_string()
}

fn default_port() -> u16 {
    Driver::Postgres.default_port()
}

fn default_ssl_mode() -> String {
    SslMode::default().to_string()
}

impl Project {
    /// `host:port`, as shown in project listings.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub role: MemberRole,
    #[serde(default)]
    pub permissions: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiConfig {
    pub view_type: ViewType,
    pub columns: Vec<Value>,
    pub filters: Vec<Value>,
    pub sorting: Vec<Value>,
    pub actions: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub layout: String,
    pub sections: Vec<Value>,
    pub validations: Vec<Value>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            layout: default_layout(),
            sections: Vec::new(),
            validations: Vec::new(),
        }
    }
}

/// One introspected table. Only the backend creates these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub id: String,
    pub project_id: String,
    pub table_name: String,
    /// Introspected structure; its shape is defined by the backend.
    #[serde(default)]
    pub schema: Value,
    #[serde(default)]
    pub ui_config: UiConfig,
    #[serde(default)]
    pub relationships: Vec<Value>,
    #[serde(default)]
    pub display_fields: Vec<Value>,
    #[serde(default)]
    pub searchable_fields: Vec<Value>,
    #[serde(default)]
    pub filterable_fields: Vec<Value>,
    #[serde(default)]
    pub sortable_fields: Vec<Value>,
    #[serde(default)]
    pub form_config: FormConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `GET /api/user/projects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectList {
    pub records: Vec<Project>,
    pub total: u64,
}

impl ProjectList {
    #[must_use]
    pub fn contains(&self, project_id: &str) -> bool {
        self.records.iter().any(|p| p.id == project_id)
    }
}

/// Body of `GET /api/projects/:id`: the project with its tables.
///
/// On the wire the `schema` key holds the table array rather than the
/// schema name.
#[derive(Debug, Clone)]
pub struct ProjectDetails {
    pub project: Project,
    pub tables: Vec<TableSchema>,
}

impl Serialize for ProjectDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::Error as _;

        let mut value = serde_json::to_value(&self.project).map_err(S::Error::custom)?;
        let tables = serde_json::to_value(&self.tables).map_err(S::Error::custom)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("schema".to_string(), tables);
        }
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProjectDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = Value::deserialize(deserializer)?;
        let obj = value
            .as_object_mut()
            .ok_or_else(|| D::Error::custom("project details must be an object"))?;

        let tables = match obj.remove("schema") {
            Some(Value::Array(items)) => Value::Array(items),
            Some(other) => {
                obj.insert("schema".to_string(), other);
                obj.remove("tables").unwrap_or(Value::Array(Vec::new()))
            }
            None => obj.remove("tables").unwrap_or(Value::Array(Vec::new())),
        };

        let tables = serde_json::from_value(tables).map_err(D::Error::custom)?;
        let project = serde_json::from_value(value).map_err(D::Error::custom)?;
        Ok(Self { project, tables })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub prefers_single_project: bool,
}
