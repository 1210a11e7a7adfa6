//! Backend endpoint paths.

pub const REGISTER: &str = "/api/register";
pub const LOGIN: &str = "/api/login";
pub const LOGOUT: &str = "/api/logout";
pub const CURRENT_USER: &str = "/api/user";
pub const USER_PROJECTS: &str = "/api/user/projects";
pub const USER_PREFERENCES: &str = "/api/user/preferences";
pub const REGISTER_PROJECT: &str = "/api/projects/register";

/// `/api/projects/:id`, with the id percent-encoded.
#[must_use]
pub fn project(id: &str) -> String {
    format!("/api/projects/{}", urlencoding::encode(id))
}

/// `/api/projects/:id/members`.
#[must_use]
pub fn project_members(id: &str) -> String {
    format!("{}/members", project(id))
}
