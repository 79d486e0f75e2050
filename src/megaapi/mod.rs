//! # MegaAPI Integration Module
//!
//! Client side of the MegaAPI webhook endpoint and the service that owns the
//! credentials used to reach it.
//!
//! ```text
//! CLI / local bridge
//!          ↓
//! MegaapiService (config lifecycle, storage)
//!          ↓
//! WebhookClient (base URL, headers, failure classification)
//!          ↓
//! GET {host}/rest/webhook/{instanceKey}
//! ```
//!
//! Validation is strict: a remote `error: true` blocks persistence. Status
//! checks of an already stored configuration are lenient and report the same
//! condition as status text.

pub mod client;
pub mod service;

pub use client::{WebhookClient, normalize_base_url};
pub use service::{CONFIG_STORAGE_KEY, MegaapiService};
