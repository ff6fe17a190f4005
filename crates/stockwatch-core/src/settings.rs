use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

pub const DEFAULT_PRODUCT_URL: &str =
    "https://www.chainreactioncycles.com/us/en/lifeline-pro-mechanic-wheel-truing-stand/rp-prod122322";
pub const DEFAULT_PRODUCT_NAME: &str = "Truing Stand";
pub const DEFAULT_VARIABLE_NAME: &str = "window.universal_variable";

/// Operator settings loaded once from the JSON settings file.
///
/// Notification keys are optional: a missing key only fails the notification
/// step that needs it, never the stock check itself.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub product_url: String,
    pub product_name: String,
    pub variable_name: String,
    pub from_address: Option<String>,
    pub to_address: Option<String>,
    pub email_api_key: Option<String>,
    pub email_api_url: Option<String>,
    pub twilio_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub from_number: Option<String>,
    pub to_number: Option<String>,
    pub twilio_api_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            product_url: DEFAULT_PRODUCT_URL.to_string(),
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            variable_name: DEFAULT_VARIABLE_NAME.to_string(),
            from_address: None,
            to_address: None,
            email_api_key: None,
            email_api_url: None,
            twilio_sid: None,
            twilio_auth_token: None,
            from_number: None,
            to_number: None,
            twilio_api_url: None,
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("product_url", &self.product_url)
            .field("product_name", &self.product_name)
            .field("variable_name", &self.variable_name)
            .field("from_address", &self.from_address)
            .field("to_address", &self.to_address)
            .field(
                "email_api_key",
                &self.email_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("email_api_url", &self.email_api_url)
            .field("twilio_sid", &self.twilio_sid.as_ref().map(|_| "[redacted]"))
            .field(
                "twilio_auth_token",
                &self.twilio_auth_token.as_ref().map(|_| "[redacted]"),
            )
            .field("from_number", &self.from_number)
            .field("to_number", &self.to_number)
            .field("twilio_api_url", &self.twilio_api_url)
            .finish()
    }
}

/// Load operator settings from a JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or is not valid JSON.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SettingsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_settings(&content).map_err(|e| ConfigError::SettingsFileParse {
        path: path.display().to_string(),
        source: e,
    })
}

fn parse_settings(content: &str) -> Result<Settings, serde_json::Error> {
    serde_json::from_str(content)
}
