use std::{error::Error, io};

use reqwest::{
    Client, ClientBuilder, Url,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;
use tracing::debug;

use crate::{
    errors::{Failure, MSG_INVALID_RESPONSE, MSG_INVALID_TOKEN},
    types::InstanceResponse,
};

pub const REST_SUFFIX: &str = "/rest";

/// Turns a user supplied host into the REST base address.
///
/// Adds `https://` when no scheme is present, drops trailing slashes and
/// appends `/rest` unless the address already ends with it.
///
/// # Example
///
/// ```
/// assert_eq!(
///     normalize_base_url("apistart01.megaapi.com.br/"),
///     "https://apistart01.megaapi.com.br/rest"
/// );
/// ```
pub fn normalize_base_url(host_url: &str) -> String {
    let host = host_url.trim();
    let lower = host.to_ascii_lowercase();
    let with_scheme = if lower.starts_with("http://") || lower.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };

    let trimmed = with_scheme.trim_end_matches('/');
    if trimmed.ends_with(REST_SUFFIX) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{REST_SUFFIX}")
    }
}

/// HTTP client bound to one MegaAPI base address and credential.
pub struct WebhookClient {
    base_url: String,
    http: Client,
}

impl WebhookClient {
    pub fn new(host_url: &str, token: Option<&str>, builder: ClientBuilder) -> Result<Self, Failure> {
        let base_url = normalize_base_url(host_url);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| Failure::Unknown(MSG_INVALID_TOKEN.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        debug!(base_url = %base_url, authorized = token.is_some(), "building megaapi client");

        let http = builder
            .default_headers(headers)
            .build()
            .map_err(|e| Failure::Unknown(e.to_string()))?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/webhook/{instance_key}`.
    ///
    /// Non-2xx responses and requests that never got a response become
    /// [`Failure::TransportFailure`]; a 2xx body that is not a JSON object
    /// becomes [`Failure::MalformedResponse`].
    pub async fn fetch_webhook(&self, instance_key: &str) -> Result<InstanceResponse, Failure> {
        let url = self.webhook_url(instance_key)?;
        debug!(url = %url, "fetching webhook state");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| no_response(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body = %body, "webhook request rejected");
            return Err(Failure::TransportFailure {
                status: Some(status.as_u16()),
                code: None,
                message: body_message(&body),
            });
        }

        let body = response.text().await.map_err(|e| no_response(&e))?;
        debug!(body = %body, "webhook response");
        parse_instance_response(&body)
    }

    fn webhook_url(&self, instance_key: &str) -> Result<Url, Failure> {
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid_url())?;
        url.path_segments_mut()
            .map_err(|_| invalid_url())?
            .pop_if_empty()
            .push("webhook")
            .push(instance_key);
        Ok(url)
    }
}

pub fn parse_instance_response(body: &str) -> Result<InstanceResponse, Failure> {
    let malformed = || Failure::MalformedResponse(MSG_INVALID_RESPONSE.to_string());

    let value: Value = serde_json::from_str(body).map_err(|_| malformed())?;
    if !value.is_object() {
        return Err(malformed());
    }
    serde_json::from_value(value).map_err(|_| malformed())
}

fn body_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn invalid_url() -> Failure {
    Failure::TransportFailure {
        status: None,
        code: Some("ERR_INVALID_URL".to_string()),
        message: None,
    }
}

fn no_response(err: &reqwest::Error) -> Failure {
    Failure::TransportFailure {
        status: None,
        code: Some(transport_code(err).to_string()),
        message: None,
    }
}

/// Symbolic code for a request that never produced a response.
pub fn transport_code(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        return "ETIMEDOUT";
    }

    if let Some(code) = err.source().and_then(source_chain_code) {
        return code;
    }

    if err.is_builder() {
        "ERR_INVALID_URL"
    } else {
        "ERR_NETWORK"
    }
}

/// Walks an error chain looking for a socket or resolver failure.
fn source_chain_code(first: &(dyn Error + 'static)) -> Option<&'static str> {
    let mut source = Some(first);
    while let Some(inner) = source {
        if let Some(io_err) = inner.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::ConnectionRefused => return Some("ECONNREFUSED"),
                io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
                    return Some("ECONNRESET");
                }
                io::ErrorKind::TimedOut => return Some("ETIMEDOUT"),
                _ => {}
            }
        }
        // hyper-util reports resolver failures as "dns error: ..."
        if inner.to_string().starts_with("dns error") {
            return Some("ENOTFOUND");
        }
        source = inner.source();
    }
    None
}
