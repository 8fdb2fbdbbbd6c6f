// Configuration module entry point
// Loads application configuration and holds the shared runtime state

mod state;
mod types;

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

/// Config file looked up in the working directory (extension optional)
pub const DEFAULT_CONFIG_FILE: &str = "isoserve";

/// Prefix of environment overrides, e.g. `ISOSERVE_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "ISOSERVE";

impl Config {
    /// Load configuration from the default file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// A missing file is not an error: every field has a default, so an
    /// empty source yields the fixed port-8000 / working-directory setup.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("http.index_files")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Reject values the runtime cannot start with
    pub fn validate(&self) -> Result<(), String> {
        if self.server.workers == Some(0) {
            return Err("server.workers must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// URL printed at startup
    pub fn display_url(&self) -> String {
        format!("http://localhost:{}", self.server.port)
    }

    /// Resolve `server.root` to an absolute, canonical directory path
    ///
    /// Fails when the directory is missing, is not a directory, or cannot be read.
    pub fn resolve_root(&self) -> io::Result<PathBuf> {
        let root = PathBuf::from(&self.server.root).canonicalize().map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Cannot resolve root directory '{}': {e}", self.server.root),
            )
        })?;

        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Root '{}' is not a directory", root.display()),
            ));
        }

        std::fs::read_dir(&root).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Root directory '{}' is not readable: {e}", root.display()),
            )
        })?;

        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_setup() {
        let cfg = Config::default();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.root, ".");
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "common");
        assert_eq!(cfg.http.index_files, vec!["index.html", "index.htm"]);
        assert!(cfg.http.follow_symlinks);
        assert!(cfg.http.server_name.starts_with("isoserve/"));
    }

    #[test]
    fn test_socket_addr_and_url() {
        let cfg = Config::default();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "0.0.0.0:8000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(cfg.display_url(), "http://localhost:8000");
    }

    #[test]
    fn test_invalid_host_rejected() {
        let mut cfg = Config::default();
        cfg.server.host = "not an ip".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_validate_workers() {
        let mut cfg = Config::default();
        assert!(cfg.validate().is_ok());

        cfg.server.workers = Some(4);
        assert!(cfg.validate().is_ok());

        cfg.server.workers = Some(0);
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("server.workers"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9123\nroot = \"/srv/www\"\n\n[logging]\naccess_log = false\n",
        )
        .unwrap();

        let stem = dir.path().join("custom");
        let cfg = Config::load_from(stem.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9123);
        assert_eq!(cfg.server.root, "/srv/www");
        assert!(!cfg.logging.access_log);
        // Untouched sections keep their defaults
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.http.index_files.len(), 2);
    }

    #[test]
    fn test_resolve_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.server.root = dir.path().to_string_lossy().into_owned();
        let root = cfg.resolve_root().unwrap();
        assert!(root.is_absolute());
        assert_eq!(root, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_root_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.server.root = dir.path().join("missing").to_string_lossy().into_owned();
        let err = cfg.resolve_root().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_resolve_root_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();
        let mut cfg = Config::default();
        cfg.server.root = file.to_string_lossy().into_owned();
        let err = cfg.resolve_root().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
