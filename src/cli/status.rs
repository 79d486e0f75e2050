use crate::{
    cli::{load_service, print_status},
    error,
};

pub async fn status() {
    let service = load_service().await;
    if service.get_config().is_none() {
        error!("No configuration stored yet. Run megastart validate first.");
    }

    if !print_status(&service).await {
        std::process::exit(1);
    }
}
