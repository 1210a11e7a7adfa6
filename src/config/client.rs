use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const SERVER_ENV_VAR: &str = "PLUGMIN_SERVER";

/// Settings for talking to a Plugmin backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Per-request timeout. `None` leaves it to the transport.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            timeout: None,
            user_agent: concat!("plugmin/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// On-disk form of the client configuration (`config.toml`).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    #[must_use]
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = normalize_server_url(url);
        self
    }

    /// Applies a config file on top of `self`. A missing file is not an error.
    pub fn merge_file(mut self, path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(self),
            Err(e) => return Err(e.into()),
        };
        let file: ConfigFile = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

        if let Some(server) = file.server {
            self = self.with_base_url(&server);
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
        Ok(self)
    }

    /// Applies `PLUGMIN_SERVER` when set.
    #[must_use]
    pub fn merge_env(self) -> Self {
        match std::env::var(SERVER_ENV_VAR) {
            Ok(url) if !url.trim().is_empty() => self.with_base_url(&url),
            _ => self,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "server URL must use http or https: {}",
                self.base_url
            )));
        }
        reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid server URL {}: {e}", self.base_url)))?;
        Ok(())
    }
}

/// Canonical form of a user-supplied server URL: scheme added when missing,
/// trailing slashes and a trailing `/api` removed.
#[must_use]
pub fn normalize_server_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');

    // Request paths already start with /api
    let url = url.trim_end_matches("/api").trim_end_matches('/');

    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }

    // Default to http:// for localhost/127.0.0.1, https:// for others
    if url.starts_with("localhost") || url.starts_with("127.0.0.1") {
        format!("http://{url}")
    } else {
        format!("https://{url}")
    }
}
