//! Path utilities

use std::path::PathBuf;

/// Data directory (~/.agentcore-poc), or `.agentcore-poc` under the working
/// directory when no home directory is known
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".agentcore-poc"))
        .unwrap_or_else(|| PathBuf::from(".agentcore-poc"))
}

/// Configuration file location
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}
