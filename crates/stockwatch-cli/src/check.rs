//! One stock check: fetch, extract, evaluate.
//!
//! Each stage either advances the recorder or closes it with
//! [`CheckRecorder::fail`]; nothing is retried.

use stockwatch_core::{AppConfig, CheckOutcome, CheckRecorder, CheckStage, Settings};
use stockwatch_scraper::{extract_with_details, try_evaluate, PageFetcher};

pub(crate) async fn run_check(
    settings: &Settings,
    config: &AppConfig,
    mut recorder: CheckRecorder,
) -> CheckOutcome {
    recorder.step("Downloading web page content...");
    let Some(page) = download_page(settings, config, &mut recorder).await else {
        recorder.error("Failed to download web page");
        return recorder.fail();
    };
    recorder.advance(CheckStage::Fetched);

    recorder.step("Parsing web page...");
    let variable = settings.variable_name.as_str();
    let tree = match extract_with_details(&page, variable, |d| recorder.detail(d)) {
        Ok(tree) => tree,
        Err(_) => {
            recorder.error(format!(
                "Failed to parse \"{}\" from page data",
                short_name(variable)
            ));
            return recorder.fail();
        }
    };
    recorder.advance(CheckStage::Parsed);

    recorder.step("Checking stock...");
    match try_evaluate(&tree) {
        Ok(in_stock) => {
            recorder.advance(CheckStage::Evaluated);
            recorder.finish(in_stock)
        }
        Err(e) => {
            recorder.detail(e.to_string());
            recorder.error("Failed to check stock variable");
            recorder.fail()
        }
    }
}

/// Returns the page body, or `None` if nothing could be downloaded. A
/// non-200 status is only noted.
async fn download_page(
    settings: &Settings,
    config: &AppConfig,
    recorder: &mut CheckRecorder,
) -> Option<String> {
    let fetcher = match PageFetcher::new(config.request_timeout_secs, &config.user_agent) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            recorder.detail(format!("Error \"{e}\" building HTTP client"));
            return None;
        }
    };

    match fetcher.fetch(&settings.product_url).await {
        Ok(page) => {
            if !page.is_ok() {
                recorder.detail(format!("Got response {} from HTTP request", page.status));
            }
            Some(page.body)
        }
        Err(e) => {
            recorder.detail(format!("Error \"{e}\" downloading web page"));
            None
        }
    }
}

/// `window.universal_variable` -> `universal_variable`
fn short_name(variable: &str) -> &str {
    variable.rsplit('.').next().unwrap_or(variable)
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
