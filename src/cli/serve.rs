use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{cli::load_service, config, error, info, server};

pub async fn serve(addr: Option<String>) {
    let addr = addr.unwrap_or_else(config::server_addr);
    let service = Arc::new(Mutex::new(load_service().await));

    info!("Serving MegaAPI bridge on http://{}", addr);
    if let Err(e) = server::start_api_server(service, &addr).await {
        error!("Bridge stopped. Err: {}", e);
    }
}
