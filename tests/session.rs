//! End-to-end tests of the client session against the in-memory backend.

mod common;

use plugmin::cache::QueryKey;
use plugmin::session::Session;
use plugmin::store::Store;
use plugmin::types::{MemberRole, SchemaGenStatus, UserPreferences};
use reqwest::StatusCode;
use serde_json::{Value, json};

use common::TestServer;

fn registration(email: &str) -> Value {
    json!({
        "name": "Ada",
        "email": email,
        "password": "hunter22",
        "confirm_password": "hunter22",
        "purpose": "business",
        "organization": "Analytical Engines"
    })
}

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

async fn registered(server: &TestServer, email: &str) -> Session {
    let session = server.session();
    session
        .register_user(&registration(email))
        .await
        .expect("register user");
    session
}

#[tokio::test(flavor = "multi_thread")]
async fn project_round_trip_starts_pending() {
    let server = TestServer::start();
    let session = registered(&server, "ada@example.com").await;

    let project = session.register_project(&shop()).await.unwrap();
    assert_eq!(project.project_name, "Shop");
    assert_eq!(project.schema_gen_status, SchemaGenStatus::Pending);
    assert!(project.password.is_none());

    let details = session.get_project(&project.id).await.unwrap();
    assert_eq!(details.project.id, project.id);
    assert_eq!(details.project.schema_gen_status, SchemaGenStatus::Pending);
    assert!(details.tables.is_empty());

    server.complete_schema(&project.id, &["customers", "orders"]);

    // Cached until invalidated.
    let cached = session.get_project(&project.id).await.unwrap();
    assert_eq!(cached.project.schema_gen_status, SchemaGenStatus::Pending);

    assert!(session.cache().invalidate(&QueryKey::project(&project.id)));
    let refreshed = session.get_project(&project.id).await.unwrap();
    assert_eq!(refreshed.project.schema_gen_status, SchemaGenStatus::Completed);
    let names: Vec<_> = refreshed.tables.iter().map(|t| t.table_name.as_str()).collect();
    assert_eq!(names, ["customers", "orders"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleted_project_disappears_from_cached_list() {
    let server = TestServer::start();
    let session = registered(&server, "ada@example.com").await;

    let keep = session.register_project(&shop()).await.unwrap();
    let mut other = shop();
    other["projectName"] = json!("Warehouse");
    let gone = session.register_project(&other).await.unwrap();

    let list = session.list_projects().await.unwrap().unwrap();
    assert_eq!(list.total, 2);
    assert!(session.cache().contains(&QueryKey::project_list()));

    session.delete_project(&gone.id).await.unwrap();
    assert!(!session.cache().contains(&QueryKey::project_list()));

    let list = session.list_projects().await.unwrap().unwrap();
    assert_eq!(list.total, 1);
    assert!(list.contains(&keep.id));
    assert!(!list.contains(&gone.id));
}

#[tokio::test(flavor = "multi_thread")]
async fn unauthenticated_reads_are_null_but_mutations_fail() {
    let server = TestServer::start();
    let session = server.session();

    assert!(session.list_projects().await.unwrap().is_none());
    assert!(session.current_user().await.unwrap().is_none());

    let err = session.register_project(&shop()).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(err.to_string().starts_with("401: "));

    // The null result was not cached, so logging in is seen right away.
    session.register_user(&registration("ada@example.com")).await.unwrap();
    let list = session.list_projects().await.unwrap().unwrap();
    assert_eq!(list.total, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_missing_project_reports_status() {
    let server = TestServer::start();
    let session = registered(&server, "ada@example.com").await;

    let err = session.delete_project("does-not-exist").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(err.to_string().starts_with("404: "));
    assert!(err.backend_message().is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_forms_are_rejected_locally() {
    let server = TestServer::start();
    let session = server.session();

    let mut mismatch = registration("ada@example.com");
    mismatch["confirm_password"] = json!("other");
    let err = session.register_user(&mismatch).await.unwrap_err();
    assert!(err.validation_errors().unwrap().contains("confirm_password"));

    // Nothing reached the backend.
    assert!(server.store.get_user_by_email("ada@example.com").unwrap().is_none());

    let mut unnamed = shop();
    unnamed["projectName"] = json!("");
    let err = session.register_project(&unnamed).await.unwrap_err();
    assert!(err.validation_errors().unwrap().contains("projectName"));
}

#[tokio::test(flavor = "multi_thread")]
async fn session_resumes_from_exported_credentials() {
    let server = TestServer::start();
    let session = registered(&server, "ada@example.com").await;
    assert!(session.current_user().await.unwrap().is_some());
    let cookie = session.credentials().expect("session cookie");

    let resumed = Session::connect(&server.config(), Some(&cookie)).unwrap();
    let user = resumed.current_user().await.unwrap().unwrap();
    assert_eq!(user.email, "ada@example.com");

    resumed.logout().await.unwrap();
    assert!(resumed.cache().is_empty());
    assert!(session.current_user().await.unwrap().is_some(), "served from cache");
    session.cache().clear();
    assert!(session.current_user().await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn preferences_refresh_current_user() {
    let server = TestServer::start();
    let session = registered(&server, "ada@example.com").await;

    let user = session.current_user().await.unwrap().unwrap();
    assert!(!user.prefers_single_project);

    session
        .set_preferences(UserPreferences {
            prefers_single_project: true,
        })
        .await
        .unwrap();
    let user = session.current_user().await.unwrap().unwrap();
    assert!(user.prefers_single_project);

    session
        .update_preferences(UserPreferences {
            prefers_single_project: false,
        })
        .await
        .unwrap();
    let user = session.current_user().await.unwrap().unwrap();
    assert!(!user.prefers_single_project);
}

#[tokio::test(flavor = "multi_thread")]
async fn members_share_projects_but_only_owner_deletes() {
    let server = TestServer::start();
    let owner = registered(&server, "owner@example.com").await;
    let guest = registered(&server, "guest@example.com").await;
    let guest_id = guest.current_user().await.unwrap().unwrap().id;

    let project = owner.register_project(&shop()).await.unwrap();

    let err = guest.get_project(&project.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    let members = owner.list_members(&project.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].role, MemberRole::Admin);

    let member = owner
        .add_member(&json!({ "projectId": project.id, "userId": guest_id, "role": "viewer" }))
        .await
        .unwrap();
    assert_eq!(member.role, MemberRole::Viewer);
    assert_eq!(owner.list_members(&project.id).await.unwrap().len(), 2);

    let err = owner
        .add_member(&json!({ "projectId": project.id, "userId": guest_id, "role": "editor" }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::CONFLICT));

    let list = guest.list_projects().await.unwrap().unwrap();
    assert!(list.contains(&project.id));
    assert!(guest.get_project(&project.id).await.is_ok());

    let err = guest.delete_project(&project.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));

    owner.delete_project(&project.id).await.unwrap();
    assert!(server.store.list_members(&project.id).unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_and_bad_login_fail() {
    let server = TestServer::start();
    registered(&server, "ada@example.com").await;

    let err = server
        .session()
        .register_user(&registration("ADA@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::CONFLICT));

    let err = server
        .session()
        .login(&json!({ "email": "ada@example.com", "password": "wrong-password" }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

    let user = server
        .session()
        .login(&json!({ "email": "ada@example.com", "password": "hunter22" }))
        .await
        .unwrap();
    assert_eq!(user.name, "Ada");
}
