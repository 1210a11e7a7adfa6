use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ValidationErrors;
use super::form::FormReader;
use crate::types::{DEFAULT_SCHEMA, Driver, SslMode, joined};

const MAX_PROJECT_NAME_LEN: usize = 100;
const MAX_DB_NAME_LEN: usize = 100;
const MAX_DRIVER_LEN: usize = 50;
const MAX_USER_NAME_LEN: usize = 100;
const MAX_HOST_LEN: usize = 255;
const MAX_SCHEMA_LEN: usize = 100;
const MAX_SSL_MODE_LEN: usize = 50;
const MAX_DESCRIPTION_LEN: usize = 10_000;
const MAX_PASSWORD_LEN: usize = 1024;

/// Fields the backend assigns on project creation.
pub const PROJECT_SERVER_MANAGED: &[&str] = &[
    "id",
    "userId",
    "createdAt",
    "schemaGenStatus",
    "themeConfig",
    "features",
    "layoutConfig",
    "permissions",
];

/// Registration payload for `POST /api/projects/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub db_name: String,
    pub driver: Driver,
    pub user_name: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub schema: String,
    pub ssl_mode: SslMode,
}

/// Validates a project registration form.
///
/// `driver` is required and must be a supported driver. `port`, `schema` and
/// `sslMode` fall back to 5432, `public` and `disable` when omitted.
pub fn validate_new_project(input: &Value) -> Result<NewProject, ValidationErrors> {
    let mut form = FormReader::new(input)?;
    form.reject_server_managed(PROJECT_SERVER_MANAGED);

    let project_name = form.required_str("projectName", MAX_PROJECT_NAME_LEN);
    let description = form.optional_str("description", MAX_DESCRIPTION_LEN);
    let db_name = form.required_str("dbName", MAX_DB_NAME_LEN);

    let driver = form.optional_choice(
        "driver",
        MAX_DRIVER_LEN,
        Driver::parse,
        &joined(&Driver::ALL),
    );
    let driver = match driver {
        Ok(Some(driver)) => Some(driver),
        Ok(None) => {
            form.errors.add("driver", super::MSG_REQUIRED);
            None
        }
        Err(()) => None,
    };

    let user_name = form.required_str("userName", MAX_USER_NAME_LEN);
    let password = form.required_str("password", MAX_PASSWORD_LEN);
    let host = form.required_str("host", MAX_HOST_LEN);
    let port = form.optional_int("port", 1, i64::from(u16::MAX));
    let schema = form.optional_str("schema", MAX_SCHEMA_LEN);
    let ssl_mode = form.optional_choice(
        "sslMode",
        MAX_SSL_MODE_LEN,
        SslMode::parse,
        &joined(&SslMode::ALL),
    );

    match (
        project_name,
        description,
        db_name,
        driver,
        user_name,
        password,
        host,
        port,
        schema,
        ssl_mode,
    ) {
        (
            Some(project_name),
            Ok(description),
            Some(db_name),
            Some(driver),
            Some(user_name),
            Some(password),
            Some(host),
            Ok(port),
            Ok(schema),
            Ok(ssl_mode),
        ) => form.errors.into_result(NewProject {
            project_name,
            description,
            db_name,
            driver,
            user_name,
            password,
            host,
            port: port
                .and_then(|p| u16::try_from(p).ok())
                .unwrap_or(Driver::Postgres.default_port()),
            schema: schema.unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
            ssl_mode: ssl_mode.unwrap_or_default(),
        }),
        _ => Err(form.errors),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validation::{MSG_REQUIRED, MSG_SERVER_MANAGED};

    fn shop() -> Value {
        json!({
            "projectName": "Shop",
            "driver": "postgres",
            "dbName": "shop_db",
            "userName": "admin",
            "password": "x",
            "host": "localhost",
            "port": 5432,
            "schema": "public"
        })
    }

    #[test]
    fn test_valid_project_applies_defaults() {
        let project = validate_new_project(&shop()).unwrap();
        assert_eq!(project.project_name, "Shop");
        assert_eq!(project.driver, Driver::Postgres);
        assert_eq!(project.port, 5432);
        assert_eq!(project.ssl_mode, SslMode::Disable);
        assert!(project.description.is_none());

        let wire = serde_json::to_value(&project).unwrap();
        assert_eq!(wire["sslMode"], "disable");
        assert_eq!(wire["dbName"], "shop_db");
        assert!(wire.get("description").is_none());
    }

    #[test]
    fn test_omitted_port_and_schema_default() {
        let mut input = shop();
        let obj = input.as_object_mut().unwrap();
        obj.remove("port");
        obj.remove("schema");
        obj.insert("description".into(), json!(""));

        let project = validate_new_project(&input).unwrap();
        assert_eq!(project.port, 5432);
        assert_eq!(project.schema, "public");
        assert!(project.description.is_none());
    }

    #[test]
    fn test_empty_project_name_fails() {
        let mut input = shop();
        input["projectName"] = json!("");

        let errors = validate_new_project(&input).unwrap_err();
        assert_eq!(errors.get("projectName"), [MSG_REQUIRED]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_driver_must_be_supported() {
        let mut input = shop();
        input["driver"] = json!("sqlite");
        let errors = validate_new_project(&input).unwrap_err();
        assert_eq!(errors.get("driver"), ["Must be one of: postgres, mysql"]);

        input.as_object_mut().unwrap().remove("driver");
        let errors = validate_new_project(&input).unwrap_err();
        assert_eq!(errors.get("driver"), [MSG_REQUIRED]);
    }

    #[test]
    fn test_port_must_be_integer_in_range() {
        let mut input = shop();
        input["port"] = json!("5432");
        assert_eq!(
            validate_new_project(&input).unwrap_err().get("port"),
            ["Expected an integer"]
        );

        input["port"] = json!(0);
        assert_eq!(
            validate_new_project(&input).unwrap_err().get("port"),
            ["Must be between 1 and 65535"]
        );
    }

    #[test]
    fn test_ssl_mode_choices() {
        let mut input = shop();
        input["sslMode"] = json!("verify-full");
        assert_eq!(
            validate_new_project(&input).unwrap().ssl_mode,
            SslMode::VerifyFull
        );

        input["sslMode"] = json!("sometimes");
        assert!(validate_new_project(&input).unwrap_err().contains("sslMode"));
    }

    #[test]
    fn test_server_managed_fields_rejected() {
        let mut input = shop();
        input["schemaGenStatus"] = json!("completed");
        input["userId"] = json!("someone-else");

        let errors = validate_new_project(&input).unwrap_err();
        assert_eq!(errors.get("schemaGenStatus"), [MSG_SERVER_MANAGED]);
        assert_eq!(errors.get("userId"), [MSG_SERVER_MANAGED]);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let mut input = shop();
        input["favouriteColour"] = json!("teal");
        assert!(validate_new_project(&input).is_ok());
    }
}
