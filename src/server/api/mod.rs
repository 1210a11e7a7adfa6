mod account;
mod projects;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::server::AppState;

pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Accounts and sessions
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/logout", post(account::logout))
        .route("/user", get(account::current_user))
        .route(
            "/user/preferences",
            post(account::update_preferences).patch(account::update_preferences),
        )
        // Projects
        .route("/user/projects", get(projects::list_projects))
        .route("/projects/register", post(projects::register_project))
        .route(
            "/projects/{id}",
            get(projects::get_project).delete(projects::delete_project),
        )
        .route(
            "/projects/{id}/members",
            get(projects::list_members).post(projects::add_member),
        )
}
