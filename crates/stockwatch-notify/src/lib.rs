pub mod email;
pub mod error;
pub mod logfile;
pub mod report;
pub mod sms;

pub use email::EmailClient;
pub use error::NotificationFailure;
pub use logfile::append_run_log;
pub use report::{compose_email, compose_text, send_report, EmailReport, ReportDelivery};
pub use sms::SmsClient;
