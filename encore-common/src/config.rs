//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Name of the SQLite database file inside the root folder
pub const DATABASE_FILE: &str = "encore.db";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable `ENCORE_ROOT`
/// 3. TOML config file (`root_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("ENCORE_ROOT") {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = find_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Get default configuration file path for the platform
fn find_config_file() -> Result<PathBuf> {
    let config_path = dirs::config_dir()
        .map(|d| d.join("encore").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if config_path.exists() {
        Ok(config_path)
    } else {
        Err(Error::Config(format!(
            "Config file not found: {}",
            config_path.display()
        )))
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("encore"))
        .unwrap_or_else(|| PathBuf::from("./encore_data"))
}

/// Media host (Cloudinary) configuration
///
/// Uploads use the unsigned-preset flow, so only the cloud name and preset
/// are required. Both come from the environment.
#[derive(Debug, Clone)]
pub struct MediaHostConfig {
    /// Cloud name, forms part of the upload URL
    pub cloud_name: String,
    /// Unsigned upload preset name
    pub upload_preset: String,
}

impl MediaHostConfig {
    /// Load media host configuration from the environment.
    ///
    /// Returns None when `CLOUDINARY_CLOUD_NAME` is unset; the API still
    /// serves everything except the upload endpoints in that case.
    pub fn from_env() -> Option<Self> {
        let cloud_name = std::env::var("CLOUDINARY_CLOUD_NAME").ok()?;
        let upload_preset =
            std::env::var("CLOUDINARY_UPLOAD_PRESET").unwrap_or_else(|_| "uploads".to_string());
        Some(Self {
            cloud_name,
            upload_preset,
        })
    }
}
