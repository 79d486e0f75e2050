//! megastart library
//!
//! Credential validation and status service for the MegaAPI integration of
//! the MegaStart campaign dashboard, plus the command-line and local HTTP
//! surfaces built on top of it.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the local bridge used by the dashboard UI
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `errors` - Normalized error taxonomy
//! - `management` - Durable key/value storage backends
//! - `megaapi` - MegaAPI webhook client and the configuration service
//! - `server` - Router and listener of the local bridge
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use megastart::{management::FileStorage, megaapi::MegaapiService};
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = MegaapiService::load(FileStorage::from_env()).await;
//!     if let Ok(status) = service.check_instance_status().await {
//!         println!("{}", status.message);
//!     }
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod management;
pub mod megaapi;
pub mod server;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the edges (CLI, server startup) where errors are only reported.
/// The service itself returns [`errors::ApiError`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Checking instance {}...", key);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for the binary's top level: the process exits with code 1 right
/// after printing.
///
/// # Example
///
/// ```
/// error!("Failed to validate configuration: {}", err.message);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
