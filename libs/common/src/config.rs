//! Server configuration shared by the services

use ::config::{Config, Environment};
use serde::Deserialize;

use crate::error::ConfigError;

/// Default cap on a request body carrying an upload (100 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory that receives exported files
    pub export_dir: String,
    /// Largest accepted upload body, in bytes
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load the server configuration from `<PREFIX>_*` environment variables
    ///
    /// # Environment Variables
    /// - `<PREFIX>_HOST`: Interface to bind (default: "0.0.0.0")
    /// - `<PREFIX>_PORT`: Port to listen on (default: 8080)
    /// - `<PREFIX>_EXPORT_DIR`: Export directory (default: "./exports")
    /// - `<PREFIX>_MAX_UPLOAD_BYTES`: Upload body limit (default: 100 MiB)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("export_dir", "./exports")?
            .set_default("max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES as u64)?
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Socket address in `host:port` form
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_server_config_defaults() {
        let config = ServerConfig::from_env("COMMON_TEST").unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.export_dir, "./exports");
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    #[serial]
    fn test_server_config_from_env() {
        unsafe {
            std::env::set_var("COMMON_TEST_PORT", "9090");
            std::env::set_var("COMMON_TEST_EXPORT_DIR", "/tmp/exports");
            std::env::set_var("COMMON_TEST_MAX_UPLOAD_BYTES", "1048576");
        }

        let config = ServerConfig::from_env("COMMON_TEST").unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.export_dir, "/tmp/exports");
        assert_eq!(config.max_upload_bytes, 1024 * 1024);

        unsafe {
            std::env::remove_var("COMMON_TEST_PORT");
            std::env::remove_var("COMMON_TEST_EXPORT_DIR");
            std::env::remove_var("COMMON_TEST_MAX_UPLOAD_BYTES");
        }
    }
}
