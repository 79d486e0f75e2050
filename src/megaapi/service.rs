use reqwest::{Client, ClientBuilder};
use tracing::{info, warn};

use crate::{
    errors::{ApiError, Failure, Operation},
    management::{Storage, StorageError},
    megaapi::client::WebhookClient,
    types::{InstanceDescriptor, InstanceResponse, MegaapiConfig, StoredConfig, ValidationResult},
};

/// Storage key of the validated configuration.
pub const CONFIG_STORAGE_KEY: &str = "megaapi_config";

pub const MSG_CONNECTED: &str = "Conexão estabelecida com sucesso";
pub const MSG_OPERATIONAL: &str = "Webhook configurado e operacional";
pub const WEBHOOK_ENABLED: &str = "Webhook Ativado";
pub const WEBHOOK_DISABLED: &str = "Webhook Desativado";

/// Owner of the MegaAPI configuration.
///
/// Constructed once at startup with [`MegaapiService::load`] and passed to
/// whatever needs it. It is the only writer of the stored configuration.
pub struct MegaapiService<S> {
    storage: S,
    config: Option<MegaapiConfig>,
    no_proxy: bool,
}

impl<S: Storage> MegaapiService<S> {
    /// Hydrates the service from `storage`.
    ///
    /// A stored value that cannot be read or parsed is logged and ignored;
    /// it stays in storage until the next successful validation or clear.
    pub async fn load(storage: S) -> Self {
        let config = match hydrate(&storage).await {
            Ok(config) => config,
            Err(e) => {
                warn!(key = CONFIG_STORAGE_KEY, error = %e, "ignoring unreadable stored configuration");
                None
            }
        };

        Self {
            storage,
            config,
            no_proxy: false,
        }
    }

    /// Bypasses system proxies for every request made by this service.
    pub fn without_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    pub fn get_config(&self) -> Option<&MegaapiConfig> {
        self.config.as_ref()
    }

    /// Validates `candidate` against the remote webhook endpoint and stores it
    /// as valid on success.
    ///
    /// A remote `error: true` is a hard failure (`WEBHOOK_ERROR`). On any
    /// failure the stored and in-memory configuration are left untouched.
    pub async fn validate_and_save_config(
        &mut self,
        candidate: MegaapiConfig,
    ) -> Result<ValidationResult, ApiError> {
        let instance_key = candidate.instance_key().to_string();
        self.try_validate_and_save(candidate).await.map_err(|failure| {
            let err = failure.normalize(Operation::Validate);
            warn!(instance = %instance_key, code = %err.code, status = err.status, "validation failed: {}", err.message);
            err
        })
    }

    /// Reports the remote state of the stored configuration.
    ///
    /// Unlike validation, a remote `error: true` is returned as a status 200
    /// result carrying the remote message.
    pub async fn check_instance_status(&self) -> Result<ValidationResult, ApiError> {
        let Some(config) = self.config.as_ref() else {
            return Err(ApiError::not_configured());
        };

        self.try_check_instance_status(config)
            .await
            .map_err(|failure| {
                let err = failure.normalize(Operation::StatusCheck);
                warn!(instance = %config.instance_key(), code = %err.code, status = err.status, "status check failed: {}", err.message);
                err
            })
    }

    /// Forgets the configuration. Idempotent.
    pub async fn clear_config(&mut self) {
        self.config = None;
        if let Err(e) = self.storage.remove(CONFIG_STORAGE_KEY).await {
            warn!(key = CONFIG_STORAGE_KEY, error = %e, "failed to remove stored configuration");
        }
    }

    async fn try_validate_and_save(
        &mut self,
        candidate: MegaapiConfig,
    ) -> Result<ValidationResult, Failure> {
        let client = self.client_for(&candidate)?;
        let response = client.fetch_webhook(candidate.instance_key()).await?;
        ensure_webhook_ok(&response)?;

        let validated = candidate.into_validated();
        let json = serde_json::to_string(&validated).map_err(|e| Failure::Unknown(e.to_string()))?;
        self.storage
            .write(CONFIG_STORAGE_KEY, &json)
            .await
            .map_err(|e| Failure::Unknown(e.to_string()))?;

        let instance = describe_instance(validated.instance_key(), &response);
        info!(base_url = %client.base_url(), instance = %validated.instance_key(), "configuration validated and saved");
        self.config = Some(validated);

        Ok(ValidationResult {
            status: 200,
            message: non_empty(response.message).unwrap_or_else(|| MSG_CONNECTED.to_string()),
            instance: Some(instance),
        })
    }

    async fn try_check_instance_status(
        &self,
        config: &MegaapiConfig,
    ) -> Result<ValidationResult, Failure> {
        let client = self.client_for(config)?;
        let response = client.fetch_webhook(config.instance_key()).await?;
        let instance = describe_instance(config.instance_key(), &response);

        let message = match ensure_webhook_ok(&response) {
            Ok(()) => non_empty(response.message).unwrap_or_else(|| MSG_OPERATIONAL.to_string()),
            Err(remote) => remote.message,
        };

        Ok(ValidationResult {
            status: 200,
            message,
            instance: Some(instance),
        })
    }

    fn client_for(&self, config: &MegaapiConfig) -> Result<WebhookClient, Failure> {
        WebhookClient::new(config.host_url(), config.token(), self.client_builder())
    }

    fn client_builder(&self) -> ClientBuilder {
        let builder = Client::builder();
        if self.no_proxy {
            builder.no_proxy()
        } else {
            builder
        }
    }
}

async fn hydrate<S: Storage>(storage: &S) -> Result<Option<MegaapiConfig>, StorageError> {
    match storage.read(CONFIG_STORAGE_KEY).await? {
        Some(raw) => {
            let stored: StoredConfig = serde_json::from_str(&raw)?;
            Ok(Some(stored.into()))
        }
        None => Ok(None),
    }
}

fn ensure_webhook_ok(response: &InstanceResponse) -> Result<(), ApiError> {
    if response.error {
        return Err(ApiError::webhook(non_empty(response.message.clone())));
    }
    Ok(())
}

fn describe_instance(instance_key: &str, response: &InstanceResponse) -> InstanceDescriptor {
    let name = if response.webhook_enabled.unwrap_or(false) {
        WEBHOOK_ENABLED
    } else {
        WEBHOOK_DISABLED
    };
    InstanceDescriptor {
        id: instance_key.to_string(),
        name: name.to_string(),
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.is_empty())
}
