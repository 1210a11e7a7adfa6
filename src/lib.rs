//! # Plugmin
//!
//! Client library and CLI for Plugmin: register a database connection, let
//! the backend introspect its schema, and manage the generated admin
//! dashboard's projects, members and preferences.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! plugmin = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use plugmin::config::ClientConfig;
//! use plugmin::session::Session;
//!
//! let config = ClientConfig::default().with_base_url("http://localhost:5000");
//! let session = Session::connect(&config, None)?;
//! session.login(&serde_json::json!({ "email": "a@x.io", "password": "pw" })).await?;
//! if let Some(list) = session.list_projects().await? {
//!     println!("{} project(s)", list.total);
//! }
//! ```
//!
//! The [`server`] module holds an in-memory backend implementing the same
//! HTTP contract, used by `plugmin serve` and the integration tests.
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes CLI module. Disable with `default-features = false`.

pub mod auth;
pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod session;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
