use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::form::FormReader;
use super::{ValidationErrors, is_valid_email};

const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 255;
const MAX_PURPOSE_LEN: usize = 50;
const MAX_ORGANIZATION_LEN: usize = 100;
const MAX_PASSWORD_LEN: usize = 1024;

/// Fields the backend assigns on user creation.
pub const USER_SERVER_MANAGED: &[&str] = &["id", "createdAt", "prefersSingleProject", "theme"];

/// Registration payload for `POST /api/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub purpose: String,
    pub organization: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn email_field(form: &mut FormReader<'_>) -> Option<String> {
    let email = form.required_str("email", MAX_EMAIL_LEN)?;
    if is_valid_email(&email) {
        Some(email)
    } else {
        form.errors.add("email", "Invalid email address");
        None
    }
}

/// Validates a registration form.
///
/// A password/confirmation mismatch is reported on `confirm_password`.
pub fn validate_new_user(input: &Value) -> Result<NewUser, ValidationErrors> {
    let mut form = FormReader::new(input)?;
    form.reject_server_managed(USER_SERVER_MANAGED);

    let name = form.required_str("name", MAX_NAME_LEN);
    let email = email_field(&mut form);
    let password = form.required_str("password", MAX_PASSWORD_LEN);
    let confirm_password = form.required_str("confirm_password", MAX_PASSWORD_LEN);
    let purpose = form.required_str("purpose", MAX_PURPOSE_LEN);
    let organization = form.required_str("organization", MAX_ORGANIZATION_LEN);

    if let (Some(password), Some(confirm)) = (&password, &confirm_password) {
        if password != confirm {
            form.errors.add("confirm_password", "Passwords don't match");
        }
    }

    match (name, email, password, confirm_password, purpose, organization) {
        (
            Some(name),
            Some(email),
            Some(password),
            Some(confirm_password),
            Some(purpose),
            Some(organization),
        ) => form.errors.into_result(NewUser {
            name,
            email,
            password,
            confirm_password,
            purpose,
            organization,
        }),
        _ => Err(form.errors),
    }
}

pub fn validate_login(input: &Value) -> Result<LoginRequest, ValidationErrors> {
    let mut form = FormReader::new(input)?;

    let email = email_field(&mut form);
    let password = form.required_str("password", MAX_PASSWORD_LEN);

    match (email, password) {
        (Some(email), Some(password)) => form.errors.into_result(LoginRequest { email, password }),
        _ => Err(form.errors),
    }
}
