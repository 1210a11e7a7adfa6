use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of backend schema introspection for a project.
///
/// Transitions are `Pending -> Completed` or `Pending -> Failed` and are only
/// ever driven by the backend; the client observes the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaGenStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl SchemaGenStatus {
    pub const ALL: [SchemaGenStatus; 3] = [Self::Pending, Self::Completed, Self::Failed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<SchemaGenStatus> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    /// Whether the introspection job has finished, successfully or not.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether the backend may move a project from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: SchemaGenStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Completed) | (Self::Pending, Self::Failed)
        )
    }
}

/// Database drivers a project may connect with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    #[default]
    Postgres,
    Mysql,
}

impl Driver {
    pub const ALL: [Driver; 2] = [Self::Postgres, Self::Mysql];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
        }
    }

    pub fn parse(s: &str) -> Option<Driver> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Postgres => 5432,
            Self::Mysql => 3306,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    #[default]
    Disable,
    Allow,
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

impl SslMode {
    pub const ALL: [SslMode; 6] = [
        Self::Disable,
        Self::Allow,
        Self::Prefer,
        Self::Require,
        Self::VerifyCa,
        Self::VerifyFull,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disable => "disable",
            Self::Allow => "allow",
            Self::Prefer => "prefer",
            Self::Require => "require",
            Self::VerifyCa => "verify-ca",
            Self::VerifyFull => "verify-full",
        }
    }

    pub fn parse(s: &str) -> Option<SslMode> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// Role of a user within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Editor,
    Viewer,
}

impl MemberRole {
    pub const ALL: [MemberRole; 3] = [Self::Admin, Self::Editor, Self::Viewer];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    pub fn parse(s: &str) -> Option<MemberRole> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// How a generated table view is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Table,
    Card,
    Custom,
}

impl ViewType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Card => "card",
            Self::Custom => "custom",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(SchemaGenStatus, Driver, SslMode, MemberRole, ViewType);

/// Comma-separated list of accepted values, for error messages.
pub(crate) fn joined<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert!(SchemaGenStatus::Pending.can_transition_to(SchemaGenStatus::Completed));
        assert!(SchemaGenStatus::Pending.can_transition_to(SchemaGenStatus::Failed));
        assert!(!SchemaGenStatus::Completed.can_transition_to(SchemaGenStatus::Pending));
        assert!(!SchemaGenStatus::Failed.can_transition_to(SchemaGenStatus::Completed));
        assert!(!SchemaGenStatus::Pending.can_transition_to(SchemaGenStatus::Pending));
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_value(SchemaGenStatus::Pending).unwrap(),
            "pending"
        );
        let parsed: SchemaGenStatus = serde_json::from_value("failed".into()).unwrap();
        assert_eq!(parsed, SchemaGenStatus::Failed);
        assert!(serde_json::from_value::<SchemaGenStatus>("running".into()).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Driver::parse("mysql"), Some(Driver::Mysql));
        assert_eq!(Driver::parse("sqlite"), None);
        assert_eq!(SslMode::parse("verify-ca"), Some(SslMode::VerifyCa));
        assert_eq!(MemberRole::parse("viewer"), Some(MemberRole::Viewer));
        assert_eq!(MemberRole::parse("owner"), None);
    }

    #[test]
    fn test_joined() {
        assert_eq!(joined(&Driver::ALL), "postgres, mysql");
    }
}
