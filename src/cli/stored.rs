use tabled::Table;

use crate::{cli::load_service, info, success, utils, warning};

pub async fn show() {
    let service = load_service().await;

    match service.get_config() {
        Some(config) => {
            let table = Table::new(utils::config_table_rows(config));
            println!("{}", table);
            if !config.is_valid() {
                warning!("Configuration is not validated. Run megastart validate.");
            }
        }
        None => info!("No configuration stored."),
    }
}

pub async fn clear() {
    let mut service = load_service().await;
    service.clear_config().await;
    success!("Configuration cleared.");
}
