use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr};
use tracing::info;

use crate::{
    Res,
    api::{self, SharedService},
    management::Storage,
};

pub fn router<S: Storage + 'static>(service: SharedService<S>) -> Router {
    Router::new()
        .route("/health", get(api::health::<S>))
        .route(
            "/config",
            get(api::get_config::<S>)
                .post(api::save_config::<S>)
                .delete(api::clear_config::<S>),
        )
        .route("/status", get(api::status::<S>))
        .layer(Extension(service))
}

pub async fn start_api_server<S: Storage + 'static>(service: SharedService<S>, addr: &str) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address {addr}: {e}"))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "bridge listening");
    axum::serve(listener, router(service)).await?;
    Ok(())
}
