//! End-of-run report: one text (when warranted), one email, one log append.
//!
//! Transport failures are recorded in the run log and never propagated, so
//! a broken notification channel cannot hide the outcome on the others.

use stockwatch_core::{AppConfig, CheckOutcome, Settings, StockResult};

use crate::email::EmailClient;
use crate::error::NotificationFailure;
use crate::logfile::append_run_log;
use crate::sms::SmsClient;

const FAILURE_TEXT: &str = "Failures checking product stock. Log file was sent via email";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailReport {
    pub subject: String,
    pub body: String,
}

/// What `send_report` managed to deliver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportDelivery {
    pub text_sent: bool,
    pub email_sent: bool,
    pub log_written: bool,
}

/// Builds the report email for `outcome`, embedding the run log as it stands.
#[must_use]
pub fn compose_email(outcome: &CheckOutcome, settings: &Settings) -> EmailReport {
    let product = &settings.product_name;
    let log = outcome.render();
    match outcome.result() {
        StockResult::InStock => EmailReport {
            subject: format!("{product} Is In Stock!"),
            body: format!(
                "The {product} is in stock! Order it now!\n{}\n\nLog:\n{log}",
                settings.product_url
            ),
        },
        StockResult::OutOfStock => EmailReport {
            subject: format!("{product} Is Still Not In Stock"),
            body: format!("We will keep checking.\n\nLog:\n{log}"),
        },
        StockResult::Undetermined => EmailReport {
            subject: "Failures Checking Product Stock".to_string(),
            body: format!("Failed to check product stock for {product}\n\nLog:\n{log}"),
        },
    }
}

/// Builds the text message for `outcome`, or `None` when the check succeeded
/// and the product is out of stock.
#[must_use]
pub fn compose_text(outcome: &CheckOutcome, settings: &Settings) -> Option<String> {
    match outcome.result() {
        StockResult::InStock => Some(format!(
            "The {} is in stock! Order it now! {}",
            settings.product_name, settings.product_url
        )),
        StockResult::OutOfStock => None,
        StockResult::Undetermined => Some(FAILURE_TEXT.to_string()),
    }
}

/// Texts, emails, and appends the run log, in that order. Details recorded
/// while texting are part of the emailed log.
pub async fn send_report(
    outcome: &mut CheckOutcome,
    settings: &Settings,
    config: &AppConfig,
) -> ReportDelivery {
    outcome.detail("Sending report");

    let text_sent = text_report(outcome, settings, config).await;
    let email_sent = email_report(outcome, settings, config).await;

    let log_written = match append_run_log(&config.log_path, outcome).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                path = %config.log_path.display(),
                error = %e,
                "failed to append run log"
            );
            false
        }
    };

    ReportDelivery {
        text_sent,
        email_sent,
        log_written,
    }
}

async fn text_report(
    outcome: &mut CheckOutcome,
    settings: &Settings,
    config: &AppConfig,
) -> bool {
    outcome.detail("Texting report");

    let Some(message) = compose_text(outcome, settings) else {
        outcome.detail("Not sending text: check was successful, but the product is not in stock");
        return false;
    };

    outcome.detail("Sending text");
    match send_text(settings, config, &message).await {
        Ok(()) => true,
        Err(e) => {
            outcome.detail(format!("Error \"{e}\" sending report text"));
            outcome.error("Failed to send report text");
            false
        }
    }
}

async fn send_text(
    settings: &Settings,
    config: &AppConfig,
    message: &str,
) -> Result<(), NotificationFailure> {
    let to = settings
        .to_number
        .as_deref()
        .ok_or(NotificationFailure::MissingSetting("to_number"))?;
    let from = settings
        .from_number
        .as_deref()
        .ok_or(NotificationFailure::MissingSetting("from_number"))?;
    let client = SmsClient::from_settings(settings, config.request_timeout_secs)?;
    client.send(to, from, message).await
}

async fn email_report(
    outcome: &mut CheckOutcome,
    settings: &Settings,
    config: &AppConfig,
) -> bool {
    outcome.detail("Emailing report");

    let report = compose_email(outcome, settings);
    match send_email(settings, config, &report).await {
        Ok(()) => true,
        Err(e) => {
            outcome.detail(format!("Error \"{e}\" sending report email"));
            outcome.error("Failed to send report email");
            false
        }
    }
}

async fn send_email(
    settings: &Settings,
    config: &AppConfig,
    report: &EmailReport,
) -> Result<(), NotificationFailure> {
    let to = settings
        .to_address
        .as_deref()
        .ok_or(NotificationFailure::MissingSetting("to_address"))?;
    let client = EmailClient::from_settings(settings, config.request_timeout_secs)?;
    client.send(to, &report.subject, &report.body).await
}

#[cfg(test)]
mod tests {
    use stockwatch_core::CheckRecorder;

    use super::*;

    fn settings() -> Settings {
        Settings {
            product_url: "https://shop.example.com/stand".to_string(),
            product_name: "Truing Stand".to_string(),
            ..Settings::default()
        }
    }

    fn in_stock() -> CheckOutcome {
        let mut recorder = CheckRecorder::new();
        recorder.step("Checking stock...");
        recorder.finish(true)
    }

    #[test]
    fn in_stock_email_links_product() {
        let report = compose_email(&in_stock(), &settings());
        assert_eq!(report.subject, "Truing Stand Is In Stock!");
        assert!(report.body.starts_with(
            "The Truing Stand is in stock! Order it now!\nhttps://shop.example.com/stand\n\nLog:\n"
        ));
        assert!(report.body.ends_with("Checking stock...\nProduct is in stock\n"));
    }

    #[test]
    fn out_of_stock_email_says_keep_checking() {
        let outcome = CheckRecorder::new().finish(false);
        let report = compose_email(&outcome, &settings());
        assert_eq!(report.subject, "Truing Stand Is Still Not In Stock");
        assert!(report.body.starts_with("We will keep checking.\n\nLog:\n"));
    }

    #[test]
    fn failed_email_reports_failure() {
        let mut recorder = CheckRecorder::new();
        recorder.error("Failed to download web page");
        let report = compose_email(&recorder.fail(), &settings());
        assert_eq!(report.subject, "Failures Checking Product Stock");
        assert!(report
            .body
            .starts_with("Failed to check product stock for Truing Stand\n\nLog:\n"));
        assert!(report.body.contains("Failed to download web page"));
    }

    #[test]
    fn in_stock_always_texts() {
        let text = compose_text(&in_stock(), &settings()).unwrap();
        assert_eq!(
            text,
            "The Truing Stand is in stock! Order it now! https://shop.example.com/stand"
        );
    }

    #[test]
    fn out_of_stock_after_success_never_texts() {
        let outcome = CheckRecorder::new().finish(false);
        assert!(compose_text(&outcome, &settings()).is_none());
    }

    #[test]
    fn failed_check_texts_generic_notice() {
        let outcome = CheckRecorder::new().fail();
        assert_eq!(
            compose_text(&outcome, &settings()).as_deref(),
            Some(FAILURE_TEXT)
        );
    }
}
