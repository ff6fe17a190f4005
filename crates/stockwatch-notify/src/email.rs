//! Email delivery over an HTTP JSON email API.
//!
//! Posts `{from, to, subject, text}` with a bearer key. The default endpoint
//! is Resend's; `email_api_url` in the settings points elsewhere (or at a
//! mock server in tests).

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;
use stockwatch_core::Settings;

use crate::error::NotificationFailure;

const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com/emails";
const SENDER_NAME: &str = "Web Page Checker";
const SERVICE: &str = "email API";

#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

pub struct EmailClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    from: String,
}

impl EmailClient {
    /// Builds a client from the `from_address`, `email_api_key`, and optional
    /// `email_api_url` settings.
    ///
    /// # Errors
    ///
    /// - [`NotificationFailure::MissingSetting`] if a required setting is absent.
    /// - [`NotificationFailure::InvalidUrl`] if `email_api_url` does not parse.
    /// - [`NotificationFailure::Http`] if the `reqwest::Client` cannot be built.
    pub fn from_settings(
        settings: &Settings,
        timeout_secs: u64,
    ) -> Result<Self, NotificationFailure> {
        let from_address = settings
            .from_address
            .as_deref()
            .ok_or(NotificationFailure::MissingSetting("from_address"))?;
        let api_key = settings
            .email_api_key
            .as_deref()
            .ok_or(NotificationFailure::MissingSetting("email_api_key"))?;
        let endpoint = settings
            .email_api_url
            .as_deref()
            .unwrap_or(DEFAULT_EMAIL_API_URL);

        Self::new(endpoint, api_key, from_address, timeout_secs)
    }

    /// # Errors
    ///
    /// - [`NotificationFailure::InvalidUrl`] if `endpoint` does not parse.
    /// - [`NotificationFailure::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        endpoint: &str,
        api_key: &str,
        from_address: &str,
        timeout_secs: u64,
    ) -> Result<Self, NotificationFailure> {
        let endpoint = Url::parse(endpoint).map_err(|e| NotificationFailure::InvalidUrl {
            service: SERVICE,
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_owned(),
            from: format!("{SENDER_NAME} <{from_address}>"),
        })
    }

    /// Sends one plain-text email.
    ///
    /// # Errors
    ///
    /// - [`NotificationFailure::Http`] on network failure.
    /// - [`NotificationFailure::Rejected`] on a non-2xx response.
    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationFailure> {
        let payload = EmailPayload {
            from: &self.from,
            to: [to],
            subject,
            text: body,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationFailure::Rejected {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(to, subject, "report email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_single_recipient() {
        let payload = EmailPayload {
            from: "Web Page Checker <checker@example.com>",
            to: ["ops@example.com"],
            subject: "Truing Stand Is In Stock!",
            text: "Order it now",
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["to"], serde_json::json!(["ops@example.com"]));
        assert_eq!(json["from"], "Web Page Checker <checker@example.com>");
        assert_eq!(json["text"], "Order it now");
    }

    #[test]
    fn from_settings_requires_from_address() {
        let settings = Settings {
            email_api_key: Some("re_123".to_string()),
            ..Settings::default()
        };
        let result = EmailClient::from_settings(&settings, 5);
        assert!(matches!(
            result,
            Err(NotificationFailure::MissingSetting("from_address"))
        ));
    }

    #[test]
    fn from_settings_requires_api_key() {
        let settings = Settings {
            from_address: Some("checker@example.com".to_string()),
            ..Settings::default()
        };
        let result = EmailClient::from_settings(&settings, 5);
        assert!(matches!(
            result,
            Err(NotificationFailure::MissingSetting("email_api_key"))
        ));
    }

    #[test]
    fn new_rejects_invalid_endpoint() {
        let result = EmailClient::new("not a url", "re_123", "checker@example.com", 5);
        assert!(matches!(result, Err(NotificationFailure::InvalidUrl { .. })));
    }

    #[test]
    fn from_address_carries_sender_name() {
        let client =
            EmailClient::new(DEFAULT_EMAIL_API_URL, "re_123", "checker@example.com", 5).unwrap();
        assert_eq!(client.from, "Web Page Checker <checker@example.com>");
    }
}
