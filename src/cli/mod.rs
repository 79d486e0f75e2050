//! # CLI Module
//!
//! Command implementations of the `megastart` binary. Each command constructs
//! the [`MegaapiService`] once from the file storage, runs one operation and
//! reports the outcome with the crate's output macros.
//!
//! ## Commands
//!
//! ### Validation (`megastart validate`)
//! Validates the credentials against the remote webhook endpoint, stores them
//! on success and follows up with a status check, the same sequence the
//! dashboard runs when the user presses "validate".
//!
//! ### Status (`megastart status`)
//! Reports the webhook state of the stored credentials. A webhook the remote
//! flags as erroneous is shown as status text, not as a failure.
//!
//! ### Inspection (`megastart show`, `megastart clear`)
//! Prints the stored configuration with the token masked, or forgets it.
//!
//! ### Bridge (`megastart serve`)
//! Exposes the service over HTTP for the dashboard UI.
//!
//! ## Usage Patterns
//!
//! ```bash
//! megastart validate --host-url apistart01.megaapi.com.br --instance-key megastart-test --token XYZ
//! megastart status
//! megastart validate --token NEW_TOKEN        # edit one field, revalidate
//! megastart serve --addr 127.0.0.1:7878
//! ```

use chrono::Local;

use crate::{
    info,
    management::{FileStorage, Storage},
    megaapi::MegaapiService,
    utils, warning,
};

mod serve;
mod status;
mod stored;
mod validate;

pub use serve::serve;
pub use status::status;
pub use stored::clear;
pub use stored::show;
pub use validate::validate;

pub(crate) async fn load_service() -> MegaapiService<FileStorage> {
    MegaapiService::load(FileStorage::from_env()).await
}

/// Runs a status check and prints the outcome. Returns whether it succeeded.
pub(crate) async fn print_status<S: Storage>(service: &MegaapiService<S>) -> bool {
    let pb = utils::spinner("Checking webhook status...");
    let result = service.check_instance_status().await;
    pb.finish_and_clear();

    match result {
        Ok(res) => {
            let name = res
                .instance
                .as_ref()
                .map(|i| i.name.as_str())
                .unwrap_or("-");
            info!(
                "{}: {} (last check {})",
                name,
                res.message,
                Local::now().format("%H:%M:%S")
            );
            true
        }
        Err(e) => {
            warning!("{} [{} / {}]", e.message, e.code, e.status);
            false
        }
    }
}
