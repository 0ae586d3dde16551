pub mod check;
pub mod init_config;
pub mod run;
pub mod simulate;

use std::path::{Path, PathBuf};

use pinchpoint_common::config::{config_file_path, AppConfig};

/// Configuration as read at startup.
pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: PathBuf,
    /// Why the file at `path` was ignored, if it was.
    pub problem: Option<String>,
}

/// Explicit `--config` paths must load. The standard location falls back
/// to defaults and keeps the reason in [`LoadedConfig::problem`].
pub fn load_config(path: Option<&Path>) -> anyhow::Result<LoadedConfig> {
    match path {
        Some(path) => {
            let config = AppConfig::load_from(path)
                .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?;
            Ok(LoadedConfig {
                config,
                path: path.to_path_buf(),
                problem: None,
            })
        }
        None => {
            let (config, error) = AppConfig::load();
            Ok(LoadedConfig {
                config,
                path: config_file_path(),
                problem: error.map(|e| e.to_string()),
            })
        }
    }
}
