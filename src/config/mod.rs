mod client;
mod server;

pub use client::{
    ClientConfig, ConfigFile, DEFAULT_SERVER_URL, SERVER_ENV_VAR, normalize_server_url,
};
pub use server::ServerConfig;
