//! Text message delivery through the Twilio REST Messages resource.

use std::time::Duration;

use reqwest::{Client, Url};
use stockwatch_core::Settings;

use crate::error::NotificationFailure;

const DEFAULT_TWILIO_API_URL: &str = "https://api.twilio.com";
const SERVICE: &str = "Twilio";

pub struct SmsClient {
    client: Client,
    messages_url: Url,
    account_sid: String,
    auth_token: String,
}

impl SmsClient {
    /// Builds a client from the `twilio_sid`, `twilio_auth_token`, and
    /// optional `twilio_api_url` settings.
    ///
    /// # Errors
    ///
    /// - [`NotificationFailure::MissingSetting`] if a credential is absent.
    /// - [`NotificationFailure::InvalidUrl`] if the API base URL does not parse.
    /// - [`NotificationFailure::Http`] if the `reqwest::Client` cannot be built.
    pub fn from_settings(
        settings: &Settings,
        timeout_secs: u64,
    ) -> Result<Self, NotificationFailure> {
        let account_sid = settings
            .twilio_sid
            .as_deref()
            .ok_or(NotificationFailure::MissingSetting("twilio_sid"))?;
        let auth_token = settings
            .twilio_auth_token
            .as_deref()
            .ok_or(NotificationFailure::MissingSetting("twilio_auth_token"))?;
        let base_url = settings
            .twilio_api_url
            .as_deref()
            .unwrap_or(DEFAULT_TWILIO_API_URL);

        Self::with_base_url(account_sid, auth_token, base_url, timeout_secs)
    }

    /// # Errors
    ///
    /// - [`NotificationFailure::InvalidUrl`] if `base_url` does not parse.
    /// - [`NotificationFailure::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        account_sid: &str,
        auth_token: &str,
        base_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, NotificationFailure> {
        let invalid = |reason: String| NotificationFailure::InvalidUrl {
            service: SERVICE,
            url: base_url.to_owned(),
            reason,
        };
        let mut messages_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        // Segments are percent-encoded, so the sid cannot escape its path slot.
        messages_url
            .path_segments_mut()
            .map_err(|()| invalid("URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["2010-04-01", "Accounts", account_sid, "Messages.json"]);
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            messages_url,
            account_sid: account_sid.to_owned(),
            auth_token: auth_token.to_owned(),
        })
    }

    /// Sends one text message.
    ///
    /// # Errors
    ///
    /// - [`NotificationFailure::Http`] on network failure.
    /// - [`NotificationFailure::Rejected`] on a non-2xx response.
    pub async fn send(&self, to: &str, from: &str, body: &str) -> Result<(), NotificationFailure> {
        let response = self
            .client
            .post(self.messages_url.clone())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", from), ("Body", body)])
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

        tracing::info!(to, "report text sent");
        Ok(())
    }
}
