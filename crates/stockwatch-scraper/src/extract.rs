//! Extraction of a named script variable's object literal from page HTML.
//!
//! Pages embed data as JavaScript like
//! `window.universal_variable = {'product': {'in_stock': 'TRUE'}};`. The
//! literal is located line by line, its boundary found with a string-aware
//! brace scanner, its single quotes rewritten to double quotes, and the result
//! parsed as JSON.
//!
//! Quote repair is a global substitution. An apostrophe inside a
//! double-quoted string breaks the JSON and surfaces as
//! [`ExtractionFailure::Malformed`]; an escaped apostrophe inside a
//! single-quoted string comes out as a double quote.

use serde_json::Value;

use crate::error::ExtractionFailure;
use crate::scan::LiteralScanner;

/// Longest slice of a rejected candidate line echoed into the run log.
const MAX_LOGGED_LINE_CHARS: usize = 200;

/// Extracts and parses the object literal assigned to `variable`.
///
/// Rejected candidate lines and failures are reported as `tracing` debug
/// events. Use [`extract_with_details`] to capture them instead.
///
/// # Errors
///
/// See [`extract_with_details`].
pub fn extract(page: &str, variable: &str) -> Result<Value, ExtractionFailure> {
    extract_with_details(page, variable, |detail| tracing::debug!("{detail}"))
}

/// Extracts and parses the object literal assigned to `variable`, passing
/// each human-readable detail (rejected candidate lines, failure reasons) to
/// `on_detail`.
///
/// # Errors
///
/// - [`ExtractionFailure::NotFound`] if no line assigns an object literal to `variable`.
/// - [`ExtractionFailure::Unterminated`] if the page ends before the literal closes.
/// - [`ExtractionFailure::Malformed`] if the repaired literal is not valid JSON.
pub fn extract_with_details<F>(
    page: &str,
    variable: &str,
    mut on_detail: F,
) -> Result<Value, ExtractionFailure>
where
    F: FnMut(String),
{
    let literal = match find_variable_literal(page, variable, &mut on_detail) {
        Ok(literal) => literal,
        Err(e) => {
            on_detail(format!("Error \"{e}\" locating variable {variable}"));
            return Err(e);
        }
    };

    let repaired = repair_quotes(literal);
    let json = repaired.find('{').map_or(repaired.as_str(), |i| &repaired[i..]);

    serde_json::from_str(json).map_err(|source| {
        on_detail(format!(
            "Error \"{source}\" parsing variable {variable} from page content"
        ));
        ExtractionFailure::Malformed {
            variable: variable.to_owned(),
            source,
        }
    })
}

/// Returns the `{ ... }` span assigned to `variable`, borrowed from `page`.
///
/// A line starts the literal only if it contains `variable` followed by `=`
/// and then `{`. Lines naming the variable without both markers are reported
/// through `on_detail` and skipped. The span ends at the brace that closes
/// the opening one, ignoring braces inside quoted strings.
///
/// # Errors
///
/// - [`ExtractionFailure::NotFound`] if no line starts the literal.
/// - [`ExtractionFailure::Unterminated`] if the page ends first.
pub fn find_variable_literal<'p, F>(
    page: &'p str,
    variable: &str,
    on_detail: &mut F,
) -> Result<&'p str, ExtractionFailure>
where
    F: FnMut(String),
{
    let mut scanner = LiteralScanner::new();
    let mut start: Option<usize> = None;
    let mut offset = 0;

    for line in page.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if let Some(literal_start) = start {
            if let Some(end) = scanner.feed(line) {
                return Ok(&page[literal_start..line_start + end]);
            }
            continue;
        }

        let Some(brace) = assignment_brace(line, variable) else {
            if line.contains(variable) {
                on_detail(format!(
                    "Line has variable name, but no = or open brace: {}",
                    truncate_line(line.trim())
                ));
            }
            continue;
        };

        let literal_start = line_start + brace;
        start = Some(literal_start);
        if let Some(end) = scanner.feed(&line[brace..]) {
            return Ok(&page[literal_start..literal_start + end]);
        }
    }

    match start {
        None => Err(ExtractionFailure::NotFound {
            variable: variable.to_owned(),
        }),
        Some(_) => Err(ExtractionFailure::Unterminated {
            variable: variable.to_owned(),
            depth: scanner.depth(),
        }),
    }
}

/// Byte offset of the `{` that opens `variable`'s literal on `line`, if the
/// line assigns one.
fn assignment_brace(line: &str, variable: &str) -> Option<usize> {
    let name_end = line.find(variable)? + variable.len();
    let rest = &line[name_end..];
    let eq = rest.find('=')?;
    let brace = rest[eq..].find('{')?;
    Some(name_end + eq + brace)
}

/// Rewrites every single quote as a double quote, leaving existing double
/// quotes in place, so a JS-style literal reads as JSON.
#[must_use]
pub fn repair_quotes(literal: &str) -> String {
    literal.trim().replace('\'', "\"")
}

fn truncate_line(line: &str) -> String {
    match line.char_indices().nth(MAX_LOGGED_LINE_CHARS) {
        Some((cut, _)) => format!("{}...", &line[..cut]),
        None => line.to_owned(),
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
