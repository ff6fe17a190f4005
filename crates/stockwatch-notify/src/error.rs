use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationFailure {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("setting \"{0}\" is not configured")]
    MissingSetting(&'static str),

    #[error("invalid {service} URL \"{url}\": {reason}")]
    InvalidUrl {
        service: &'static str,
        url: String,
        reason: String,
    },

    #[error("{service} rejected the message with HTTP {status}: {body}")]
    Rejected {
        service: &'static str,
        status: u16,
        body: String,
    },
}
