use std::net::SocketAddr;

/// Bind settings for the development backend.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Base URL a client on this machine would use to reach the server.
    #[must_use]
    pub fn local_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().port(), 5000);
        assert_eq!(config.local_url(), "http://127.0.0.1:5000");

        let bad = ServerConfig {
            host: "not a host".into(),
            port: 1,
        };
        assert!(bad.socket_addr().is_err());
    }
}
