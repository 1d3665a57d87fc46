// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The question store only needs "something that yields rows".
// The CSV loader is the production implementation; tests plug
// in in-memory sources.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::qa_entry::QaEntry;

// ─── QaSource ────────────────────────────────────────────────────────────────
/// Any component that can produce the full question/answer table.
///
/// Implementations:
///   - CsvQaLoader → reads a CSV file with question/answer columns
///   - StaticSource → fixed rows, used for fallbacks and tests
pub trait QaSource: Send + Sync {
    /// Load every row of the source, in source order.
    fn load_all(&self) -> Result<Vec<QaEntry>>;

    /// Short human-readable name used in log lines
    fn describe(&self) -> String;
}

/// A source backed by rows already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    entries: Vec<QaEntry>,
}

impl StaticSource {
    pub fn new(entries: Vec<QaEntry>) -> Self {
        Self { entries }
    }
}

impl QaSource for StaticSource {
    fn load_all(&self) -> Result<Vec<QaEntry>> {
        Ok(self.entries.clone())
    }

    fn describe(&self) -> String {
        format!("static source ({} rows)", self.entries.len())
    }
}
