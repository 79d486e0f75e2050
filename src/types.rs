use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Credentials of the remote MegaAPI instance.
///
/// `is_valid` is only set by a successful validation inside the service or
/// when the service hydrates what it stored itself; every setter clears it
/// again. Outside the crate it can be serialized but not deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MegaapiConfig {
    host_url: String,
    instance_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    is_valid: bool,
}

impl MegaapiConfig {
    pub fn new(
        host_url: impl Into<String>,
        instance_key: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            host_url: host_url.into(),
            instance_key: instance_key.into(),
            token: normalize_token(token),
            is_valid: false,
        }
    }

    pub fn host_url(&self) -> &str {
        &self.host_url
    }

    pub fn instance_key(&self) -> &str {
        &self.instance_key
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn set_host_url(&mut self, host_url: impl Into<String>) -> &mut Self {
        self.host_url = host_url.into();
        self.is_valid = false;
        self
    }

    pub fn set_instance_key(&mut self, instance_key: impl Into<String>) -> &mut Self {
        self.instance_key = instance_key.into();
        self.is_valid = false;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) -> &mut Self {
        self.token = normalize_token(token);
        self.is_valid = false;
        self
    }

    pub(crate) fn into_validated(mut self) -> Self {
        self.is_valid = true;
        self
    }
}

// an empty token sends no Authorization header
fn normalize_token(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}

/// Persisted shape of [`MegaapiConfig`], read back only by the service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredConfig {
    host_url: String,
    instance_key: String,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    is_valid: bool,
}

impl From<StoredConfig> for MegaapiConfig {
    fn from(stored: StoredConfig) -> Self {
        Self {
            host_url: stored.host_url,
            instance_key: stored.instance_key,
            token: normalize_token(stored.token),
            is_valid: stored.is_valid,
        }
    }
}

/// Body accepted by the bridge when a new configuration is submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigCandidate {
    pub host_url: String,
    pub instance_key: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl From<ConfigCandidate> for MegaapiConfig {
    fn from(candidate: ConfigCandidate) -> Self {
        MegaapiConfig::new(candidate.host_url, candidate.instance_key, candidate.token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<InstanceDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceDescriptor {
    pub id: String,
    pub name: String,
}

/// Payload of `GET /webhook/{instanceKey}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub webhook_enabled: Option<bool>,
}

#[derive(Tabled)]
pub struct ConfigTableRow {
    pub field: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_clear_validation() {
        let config = MegaapiConfig::new("host", "key", None).into_validated();
        assert!(config.is_valid());

        let mut edited = config.clone();
        edited.set_host_url("other-host");
        assert!(!edited.is_valid());

        let mut edited = config.clone();
        edited.set_instance_key("other-key");
        assert!(!edited.is_valid());

        let mut edited = config;
        edited.set_token(Some("secret".to_string()));
        assert!(!edited.is_valid());
        assert_eq!(edited.token(), Some("secret"));
    }

    #[test]
    fn test_empty_token_is_absent() {
        let config = MegaapiConfig::new("host", "key", Some(String::new()));
        assert_eq!(config.token(), None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let config = MegaapiConfig::new("host", "key", Some("tok".to_string())).into_validated();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "hostUrl": "host",
                "instanceKey": "key",
                "token": "tok",
                "isValid": true
            })
        );

        let without_token = MegaapiConfig::new("host", "key", None);
        let json = serde_json::to_value(&without_token).unwrap();
        assert!(json.get("token").is_none());
    }

    #[test]
    fn test_stored_config_round_trip() {
        let config = MegaapiConfig::new("host", "key", Some("tok".to_string())).into_validated();
        let json = serde_json::to_string(&config).unwrap();
        let stored: StoredConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(MegaapiConfig::from(stored), config);
    }

    #[test]
    fn test_stored_empty_token_is_absent() {
        let stored: StoredConfig = serde_json::from_str(
            r#"{"hostUrl":"host","instanceKey":"key","token":"","isValid":true}"#,
        )
        .unwrap();
        let config = MegaapiConfig::from(stored);
        assert_eq!(config.token(), None);
        assert!(config.is_valid());
    }

    #[test]
    fn test_candidate_is_never_valid() {
        let candidate: ConfigCandidate = serde_json::from_str(
            r#"{"hostUrl":"host","instanceKey":"key","isValid":true}"#,
        )
        .unwrap();
        let config: MegaapiConfig = candidate.into();
        assert!(!config.is_valid());
    }

    #[test]
    fn test_instance_response_defaults() {
        let response: InstanceResponse = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert!(!response.error);
        assert_eq!(response.webhook_enabled, None);
    }
}
