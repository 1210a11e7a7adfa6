use std::sync::Arc;

use plugmin::config::ClientConfig;
use plugmin::server::{AppState, create_router};
use plugmin::session::Session;
use plugmin::store::{MemoryStore, Store};
use plugmin::types::{SchemaGenStatus, TableSchema};
use serde_json::json;

/// The development backend served on an ephemeral port from its own thread,
/// so both async tests and blocking CLI tests can reach it.
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
}

impl TestServer {
    pub fn start() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = Arc::new(AppState::new(store.clone()));

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.set_nonblocking(true).expect("set nonblocking");
        let addr = listener.local_addr().expect("local addr");

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("build runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("listener");
                axum::serve(listener, create_router(state))
                    .await
                    .expect("serve");
            });
        });

        Self {
            base_url: format!("http://{addr}"),
            store,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::default().with_base_url(&self.base_url)
    }

    /// A fresh, logged-out session.
    pub fn session(&self) -> Session {
        Session::connect(&self.config(), None).expect("connect")
    }

    /// Stands in for the backend's introspection job: stores the given tables
    /// and marks schema generation completed.
    pub fn complete_schema(&self, project_id: &str, tables: &[&str]) {
        for (i, name) in tables.iter().enumerate() {
            let table: TableSchema = serde_json::from_value(json!({
                "id": format!("{project_id}-t{i}"),
                "projectId": project_id,
                "tableName": name,
            }))
            .expect("table schema");
            self.store.create_table_schema(&table).expect("create table");
        }
        assert!(
            self.store
                .update_schema_status(project_id, SchemaGenStatus::Completed)
                .expect("update status")
        );
    }
}
