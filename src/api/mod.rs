//! # API Module
//!
//! HTTP endpoints of the local bridge that lets the dashboard UI reach the
//! [`MegaapiService`]. Every handler locks the shared service, so calls from
//! the UI are served one at a time.
//!
//! ## Endpoints
//!
//! - `GET /health` - [`health`], liveness plus whether a configuration exists
//! - `GET /config` - [`get_config`], the stored configuration or `null`
//! - `POST /config` - [`save_config`], validate and save a new configuration
//! - `GET /status` - [`status`], remote webhook state of the stored configuration
//! - `DELETE /config` - [`clear_config`], forget the configuration
//!
//! Failures are returned as the serialized [`crate::errors::ApiError`] with its
//! `status` as the HTTP status code.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use megastart::{management::FileStorage, megaapi::MegaapiService, server};
//!
//! let service = MegaapiService::load(FileStorage::from_env()).await;
//! let app = server::router(Arc::new(Mutex::new(service)));
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::megaapi::MegaapiService;

mod config;
mod health;

pub use config::clear_config;
pub use config::get_config;
pub use config::save_config;
pub use config::status;
pub use health::health;

/// Service handle shared by all handlers.
pub type SharedService<S> = Arc<Mutex<MegaapiService<S>>>;
