use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    megaapi::normalize_base_url,
    types::{ConfigTableRow, MegaapiConfig},
};

/// Field values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigEdits {
    pub host_url: Option<String>,
    pub instance_key: Option<String>,
    pub token: Option<String>,
}

/// Builds the configuration to validate.
///
/// Starts from `stored` and applies `edits` through the invalidating setters.
/// Without a stored configuration, `edits` fall back to `defaults` and both
/// host URL and instance key must end up present.
pub fn build_candidate(
    stored: Option<MegaapiConfig>,
    edits: ConfigEdits,
    defaults: ConfigEdits,
) -> Result<MegaapiConfig, String> {
    let Some(mut config) = stored else {
        let host_url = present(edits.host_url.or(defaults.host_url))
            .ok_or("Missing host URL. Pass --host-url or set MEGAAPI_HOST_URL.")?;
        let instance_key = present(edits.instance_key.or(defaults.instance_key))
            .ok_or("Missing instance key. Pass --instance-key or set MEGAAPI_INSTANCE_KEY.")?;
        return Ok(MegaapiConfig::new(
            host_url,
            instance_key,
            edits.token.or(defaults.token),
        ));
    };

    if let Some(host_url) = edits.host_url {
        config.set_host_url(host_url);
    }
    if let Some(instance_key) = edits.instance_key {
        config.set_instance_key(instance_key);
    }
    if let Some(token) = edits.token {
        config.set_token(Some(token));
    }

    if config.host_url().trim().is_empty() {
        return Err("Host URL must not be empty.".to_string());
    }
    if config.instance_key().trim().is_empty() {
        return Err("Instance key must not be empty.".to_string());
    }
    Ok(config)
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Keeps only the last four characters of a token visible.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("****{visible}")
}

pub fn config_table_rows(config: &MegaapiConfig) -> Vec<ConfigTableRow> {
    let row = |field: &str, value: String| ConfigTableRow {
        field: field.to_string(),
        value,
    };

    vec![
        row("Host URL", config.host_url().to_string()),
        row("Base URL", normalize_base_url(config.host_url())),
        row("Instance key", config.instance_key().to_string()),
        row(
            "Token",
            config.token().map(mask_token).unwrap_or_else(|| "-".to_string()),
        ),
        row(
            "Valid",
            if config.is_valid() { "yes" } else { "no" }.to_string(),
        ),
    ]
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
