use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::form::FormReader;
use super::{MSG_REQUIRED, ValidationErrors};
use crate::types::{MemberRole, joined};

const MAX_ID_LEN: usize = 64;
const MAX_ROLE_LEN: usize = 50;

pub const MEMBER_SERVER_MANAGED: &[&str] = &["id", "createdAt", "permissions"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectMember {
    pub project_id: String,
    pub user_id: String,
    pub role: MemberRole,
}

pub fn validate_new_project_member(input: &Value) -> Result<NewProjectMember, ValidationErrors> {
    let mut form = FormReader::new(input)?;
    form.reject_server_managed(MEMBER_SERVER_MANAGED);

    let project_id = form.required_str("projectId", MAX_ID_LEN);
    let user_id = form.required_str("userId", MAX_ID_LEN);
    let role = match form.optional_choice(
        "role",
        MAX_ROLE_LEN,
        MemberRole::parse,
        &joined(&MemberRole::ALL),
    ) {
        Ok(Some(role)) => Some(role),
        Ok(None) => {
            form.errors.add("role", MSG_REQUIRED);
            None
        }
        Err(()) => None,
    };

    match (project_id, user_id, role) {
        (Some(project_id), Some(user_id), Some(role)) => form.errors.into_result(NewProjectMember {
            project_id,
            user_id,
            role,
        }),
        _ => Err(form.errors),
    }
}
