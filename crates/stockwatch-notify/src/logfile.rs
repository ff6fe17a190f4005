use std::path::Path;

use stockwatch_core::CheckOutcome;
use tokio::io::AsyncWriteExt;

/// Appends a timestamped copy of the run log to `path`, creating the file if
/// needed.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened or written.
pub async fn append_run_log(path: &Path, outcome: &CheckOutcome) -> std::io::Result<()> {
    let entry = format!(
        "{}\n{}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
        outcome.render()
    );

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(entry.as_bytes()).await?;
    file.flush().await
}

#[cfg(test)]
mod tests {
    use stockwatch_core::CheckRecorder;

    use super::*;

    #[tokio::test]
    async fn appends_one_entry_per_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("check.log");

        let mut recorder = CheckRecorder::new();
        recorder.step("Checking stock...");
        let first = recorder.finish(false);
        append_run_log(&path, &first).await.unwrap();

        let second = CheckRecorder::new().fail();
        append_run_log(&path, &second).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Checking stock...\nProduct is not in stock\n"));
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4, "two timestamps plus two entries: {content:?}");
        assert!(lines[0].starts_with(char::is_numeric));
        assert!(lines[3].starts_with(char::is_numeric));
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("check.log");
        let outcome = CheckRecorder::new().fail();
        assert!(append_run_log(&path, &outcome).await.is_err());
    }
}
