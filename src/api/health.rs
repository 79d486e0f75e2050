use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::{api::SharedService, management::Storage};

/// Liveness check. Never waits on the service lock: while a validation or
/// status check holds it, `configured` is `null` and `busy` is `true`.
pub async fn health<S: Storage + 'static>(
    Extension(service): Extension<SharedService<S>>,
) -> Json<Value> {
    let configured = service
        .try_lock()
        .ok()
        .map(|service| service.get_config().is_some());
    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "configured": configured,
        "busy": configured.is_none()
    }))
}
