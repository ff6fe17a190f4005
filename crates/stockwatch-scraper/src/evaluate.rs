//! Reads the stock flag out of an extracted page variable.

use serde_json::Value;
use stockwatch_core::StockResult;

use crate::error::EvaluationFailure;

const PRODUCT_KEY: &str = "product";
const IN_STOCK_KEY: &str = "in_stock";

/// Interprets `tree["product"]["in_stock"]` as a tri-state result.
///
/// Every failure to reach a definite answer is `Undetermined`; the reason is
/// emitted as a `tracing` debug event.
#[must_use]
pub fn evaluate(tree: &Value) -> StockResult {
    match try_evaluate(tree) {
        Ok(in_stock) => StockResult::from_flag(in_stock),
        Err(e) => {
            tracing::debug!(error = %e, "stock flag undetermined");
            StockResult::Undetermined
        }
    }
}

/// Reads `tree["product"]["in_stock"]` as a boolean.
///
/// # Errors
///
/// - [`EvaluationFailure::MissingKey`] if either key is absent (or its parent is not a mapping).
/// - [`EvaluationFailure::UnrecognizedValue`] if the flag is not a `"TRUE"`/`"FALSE"` string.
pub fn try_evaluate(tree: &Value) -> Result<bool, EvaluationFailure> {
    let product = tree
        .get(PRODUCT_KEY)
        .ok_or(EvaluationFailure::MissingKey { key: PRODUCT_KEY })?;
    let flag = product
        .get(IN_STOCK_KEY)
        .ok_or(EvaluationFailure::MissingKey { key: IN_STOCK_KEY })?;

    flag.as_str()
        .and_then(parse_stock_flag)
        .ok_or_else(|| EvaluationFailure::UnrecognizedValue {
            value: flag.to_string(),
        })
}

/// Case-insensitive `"TRUE"` / `"FALSE"`. Anything else is `None`.
#[must_use]
pub fn parse_stock_flag(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
