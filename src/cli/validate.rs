use crate::{
    cli::{load_service, print_status},
    config, error, success,
    utils::{self, ConfigEdits},
};

/// Validates and stores the MegaAPI credentials, then reports the webhook state.
///
/// Starts from the stored configuration when there is one; every flag given
/// replaces the matching field and marks the configuration as unvalidated
/// until the remote accepts it. Without a stored configuration the
/// `MEGAAPI_*` environment variables fill in missing flags.
///
/// # Error Handling
///
/// - Missing host URL or instance key terminates with a hint
/// - A rejected validation terminates with the normalized message and code;
///   the previously stored configuration is kept
/// - A failing follow-up status check only prints a warning
pub async fn validate(host_url: Option<String>, instance_key: Option<String>, token: Option<String>) {
    let mut service = load_service().await;

    let edits = ConfigEdits {
        host_url,
        instance_key,
        token,
    };
    let defaults = ConfigEdits {
        host_url: config::megaapi_host_url(),
        instance_key: config::megaapi_instance_key(),
        token: config::megaapi_token(),
    };

    let candidate = match utils::build_candidate(service.get_config().cloned(), edits, defaults) {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };

    let pb = utils::spinner("Validating configuration...");
    let result = service.validate_and_save_config(candidate).await;
    pb.finish_and_clear();

    match result {
        Ok(res) => {
            let name = res
                .instance
                .as_ref()
                .map(|i| i.name.clone())
                .unwrap_or_default();
            success!("Instância \"{}\" conectada com sucesso!", name);
        }
        Err(e) => error!("{} [{} / {}]", e.message, e.code, e.status),
    }

    print_status(&service).await;
}
