// Application state module
// Shared, read-only view of the configuration and the resolved root

use std::path::{Path, PathBuf};

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Absolute, canonical root directory
    pub root: PathBuf,
}

impl AppState {
    /// Create state for an already resolved root directory
    pub const fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_log_follows_config() {
        let state = AppState::new(Config::default(), PathBuf::from("/srv"));
        assert!(state.access_log_enabled());
        assert_eq!(state.root(), Path::new("/srv"));

        let mut config = Config::default();
        config.logging.access_log = false;
        let state = AppState::new(config, PathBuf::from("/srv"));
        assert!(!state.access_log_enabled());
    }
}
