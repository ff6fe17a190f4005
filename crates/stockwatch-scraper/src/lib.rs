pub mod client;
pub mod error;
pub mod evaluate;
pub mod extract;
mod scan;

pub use client::{FetchedPage, PageFetcher};
pub use error::{EvaluationFailure, ExtractionFailure, FetchFailure};
pub use evaluate::{evaluate, parse_stock_flag, try_evaluate};
pub use extract::{extract, extract_with_details, find_variable_literal, repair_quotes};
