//! Configuration management for megastart.
//!
//! Values come from the process environment, optionally pre-populated from a
//! `.env` file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:7878";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Loads environment variables from `megastart/.env` in the local data directory.
///
/// Creates the directory if needed. A missing `.env` file is not an error;
/// variables already set in the environment are never overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/megastart/.env`
/// - macOS: `~/Library/Application Support/megastart/.env`
/// - Windows: `%LOCALAPPDATA%/megastart/.env`
pub async fn load_env() -> Result<(), String> {
    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Root directory of everything megastart writes to disk.
pub fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("megastart");
    path
}

/// Directory holding the durable key/value storage.
///
/// `MEGASTART_DATA_DIR` replaces the default `<app_dir>/storage`.
pub fn storage_dir() -> PathBuf {
    match non_empty_var("MEGASTART_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => app_dir().join("storage"),
    }
}

/// Address the local bridge binds to.
pub fn server_addr() -> String {
    non_empty_var("MEGASTART_SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

/// `tracing` filter directive for diagnostics.
pub fn log_filter() -> String {
    non_empty_var("MEGASTART_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Default host URL used when no configuration has been stored yet.
pub fn megaapi_host_url() -> Option<String> {
    non_empty_var("MEGAAPI_HOST_URL")
}

/// Default instance key used when no configuration has been stored yet.
pub fn megaapi_instance_key() -> Option<String> {
    non_empty_var("MEGAAPI_INSTANCE_KEY")
}

/// Default bearer token used when no configuration has been stored yet.
pub fn megaapi_token() -> Option<String> {
    non_empty_var("MEGAAPI_TOKEN")
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
