// Configuration module entry point
// Loads and validates application configuration

mod types;

use std::net::SocketAddr;

// Re-export public types
pub use types::{
    Config, HashConfig, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig, RoutesConfig,
    ServerConfig,
};

impl Config {
    /// Load configuration from "config.toml" in the working directory
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; defaults cover every key. Environment variables
    /// prefixed with `SERVER_` override file values.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "Tokio-Hyper/1.0")?
            .set_default("http.max_body_size", 16_384)? // 16 KiB
            .set_default("http.reject_missing_content_length", false)?
            .set_default("hash.algorithm", "sha256")?
            .set_default("routes.hash_path", "/hash")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Algorithm;

    #[test]
    fn test_defaults_without_config_file() {
        let cfg = Config::load_from("does-not-exist").expect("defaults should load");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.http.max_body_size, 16_384);
        assert!(!cfg.http.reject_missing_content_length);
        assert_eq!(cfg.hash.algorithm, Algorithm::Sha256);
        assert_eq!(cfg.routes.hash_path, "/hash");
        assert!(cfg.routes.health.enabled);
        assert_eq!(cfg.routes.health.liveness_path, "/healthz");
        assert_eq!(cfg.routes.health.readiness_path, "/readyz");
    }

    #[test]
    fn test_socket_addr_from_defaults() {
        let cfg = Config::load_from("does-not-exist").expect("defaults should load");
        let addr = cfg.get_socket_addr().expect("valid address");
        assert_eq!(addr.port(), 8080);
        assert!(addr.is_ipv4());
    }
}
