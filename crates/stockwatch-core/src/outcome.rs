//! Run records for a single stock check.
//!
//! A check accumulates step, detail, and error entries in a [`CheckRecorder`].
//! The recorder is consumed by [`CheckRecorder::finish`] or
//! [`CheckRecorder::fail`], which are the only ways to obtain a
//! [`CheckOutcome`]. Only `finish` writes the terminal message, so an outcome
//! carries at most one.

/// Tri-state result of a stock check.
///
/// `Undetermined` means the check could not reach a definitive answer and is
/// reported differently from `OutOfStock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockResult {
    InStock,
    OutOfStock,
    Undetermined,
}

impl StockResult {
    #[must_use]
    pub fn from_flag(in_stock: bool) -> Self {
        if in_stock {
            StockResult::InStock
        } else {
            StockResult::OutOfStock
        }
    }

    #[must_use]
    pub fn is_determined(self) -> bool {
        !matches!(self, StockResult::Undetermined)
    }
}

impl std::fmt::Display for StockResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockResult::InStock => write!(f, "in stock"),
            StockResult::OutOfStock => write!(f, "not in stock"),
            StockResult::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// Pipeline position of a check. `Failed` is reachable from every stage
/// before `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStage {
    Init,
    Fetched,
    Parsed,
    Evaluated,
    Done,
    Failed,
}

impl std::fmt::Display for CheckStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStage::Init => write!(f, "init"),
            CheckStage::Fetched => write!(f, "fetched"),
            CheckStage::Parsed => write!(f, "parsed"),
            CheckStage::Evaluated => write!(f, "evaluated"),
            CheckStage::Done => write!(f, "done"),
            CheckStage::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Step,
    Detail,
    Error,
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: EntryKind,
    pub message: String,
}

fn push_entry(entries: &mut Vec<LogEntry>, kind: EntryKind, message: String) {
    match kind {
        EntryKind::Step | EntryKind::Final => tracing::info!("{message}"),
        EntryKind::Detail => tracing::debug!("{message}"),
        EntryKind::Error => tracing::warn!("{message}"),
    }
    entries.push(LogEntry { kind, message });
}

/// Accumulates the log of one check while it is running.
#[derive(Debug)]
pub struct CheckRecorder {
    stage: CheckStage,
    entries: Vec<LogEntry>,
}

impl Default for CheckRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: CheckStage::Init,
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn stage(&self) -> CheckStage {
        self.stage
    }

    pub fn advance(&mut self, stage: CheckStage) {
        tracing::debug!(from = %self.stage, to = %stage, "check stage");
        self.stage = stage;
    }

    pub fn step(&mut self, message: impl Into<String>) {
        push_entry(&mut self.entries, EntryKind::Step, message.into());
    }

    pub fn detail(&mut self, message: impl Into<String>) {
        push_entry(&mut self.entries, EntryKind::Detail, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        push_entry(&mut self.entries, EntryKind::Error, message.into());
    }

    /// Closes a successful check, recording the terminal message.
    #[must_use]
    pub fn finish(mut self, in_stock: bool) -> CheckOutcome {
        let result = StockResult::from_flag(in_stock);
        push_entry(
            &mut self.entries,
            EntryKind::Final,
            format!("Product is {result}"),
        );
        self.advance(CheckStage::Done);
        CheckOutcome {
            stage: CheckStage::Done,
            failed_at: None,
            result,
            entries: self.entries,
        }
    }

    /// Closes a check that broke at the current stage. No terminal message.
    #[must_use]
    pub fn fail(mut self) -> CheckOutcome {
        let failed_at = self.stage;
        self.advance(CheckStage::Failed);
        CheckOutcome {
            stage: CheckStage::Failed,
            failed_at: Some(failed_at),
            result: StockResult::Undetermined,
            entries: self.entries,
        }
    }
}

/// The closed record of one check. Further details and errors may be
/// appended while reporting, but the result and terminal message are fixed.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    stage: CheckStage,
    failed_at: Option<CheckStage>,
    result: StockResult,
    entries: Vec<LogEntry>,
}

impl CheckOutcome {
    #[must_use]
    pub fn stage(&self) -> CheckStage {
        self.stage
    }

    /// The stage the check had reached when it failed, if it failed.
    #[must_use]
    pub fn failed_at(&self) -> Option<CheckStage> {
        self.failed_at
    }

    #[must_use]
    pub fn result(&self) -> StockResult {
        self.result
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.stage == CheckStage::Done
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn terminal_message(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.kind == EntryKind::Final)
            .map(|e| e.message.as_str())
    }

    pub fn detail(&mut self, message: impl Into<String>) {
        push_entry(&mut self.entries, EntryKind::Detail, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        push_entry(&mut self.entries, EntryKind::Error, message.into());
    }

    /// The run log as operator-facing text, one entry per line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.message);
            out.push('\n');
        }
        out
    }
}
