use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid page URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ExtractionFailure {
    #[error("variable {variable} not found in page content")]
    NotFound { variable: String },

    #[error("object literal for {variable} never closes ({depth} brace(s) still open at end of page)")]
    Unterminated { variable: String, depth: usize },

    #[error("object literal for {variable} is not valid JSON after quote repair: {source}")]
    Malformed {
        variable: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluationFailure {
    #[error("Key \"{key}\" not found in dictionary")]
    MissingKey { key: &'static str },

    #[error("unrecognized stock flag {value}")]
    UnrecognizedValue { value: String },
}
