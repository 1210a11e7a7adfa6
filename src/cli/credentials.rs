use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::config::{ClientConfig, normalize_server_url};
use crate::session::Session;

/// Overrides the directory holding `credentials.toml` and `config.toml`.
pub const CONFIG_DIR_ENV: &str = "PLUGMIN_CONFIG_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub server_url: String,
    /// `Cookie` header value of the logged-in session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CredentialsFile {
    pub default: Option<Credentials>,
}

pub fn config_dir() -> anyhow::Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let dirs = ProjectDirs::from("", "", "plugmin")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory. Is $HOME set?"))?;
    Ok(dirs.config_dir().to_path_buf())
}

pub fn credentials_path() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("credentials.toml"))
}

pub fn config_path() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Saved credentials, or `None` when nobody has logged in.
pub fn load_credentials() -> anyhow::Result<Option<Credentials>> {
    let path = credentials_path()?;
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let file: CredentialsFile = toml::from_str(&content).map_err(|_| {
        anyhow::anyhow!("Credentials file is corrupted. Run 'plugmin auth login' to fix.")
    })?;
    Ok(file.default)
}

pub fn save_credentials(creds: &Credentials) -> anyhow::Result<()> {
    let path = credentials_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = CredentialsFile {
        default: Some(creds.clone()),
    };
    let content = toml::to_string_pretty(&file)?;
    fs::write(&path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

/// Removes saved credentials. Returns whether there were any.
pub fn delete_credentials() -> anyhow::Result<bool> {
    let path = credentials_path()?;
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Resolves the client configuration.
///
/// Later sources win: built-in defaults, `config.toml`, the server of the
/// saved session, `PLUGMIN_SERVER`, then `--server`.
pub fn resolve_config(
    server: Option<&str>,
    creds: Option<&Credentials>,
) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::default().merge_file(&config_path()?)?;
    if let Some(creds) = creds {
        config = config.with_base_url(&creds.server_url);
    }
    config = config.merge_env();
    if let Some(server) = server {
        if server.trim().is_empty() {
            anyhow::bail!("Server URL cannot be empty");
        }
        config = config.with_base_url(server);
    }
    Ok(config)
}

/// Opens a session against the resolved server, resuming the saved login
/// when it belongs to that server.
pub fn open_session(server: Option<&str>) -> anyhow::Result<Session> {
    let creds = load_credentials()?;
    let config = resolve_config(server, creds.as_ref())?;

    let cookie = creds
        .as_ref()
        .filter(|c| normalize_server_url(&c.server_url) == config.base_url)
        .and_then(|c| c.session_cookie.as_deref());

    Ok(Session::connect(&config, cookie)?)
}

/// Persists the session's cookie for its server.
pub fn remember_session(session: &Session) -> anyhow::Result<()> {
    save_credentials(&Credentials {
        server_url: session.client().base_url().to_string(),
        session_cookie: session.credentials(),
    })
}
