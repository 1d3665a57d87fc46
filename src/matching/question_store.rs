// ============================================================
// Layer 5 — Question Store
// ============================================================
// Holds the curated Q/A table in memory and answers
// "which stored question is closest to this text?".
//
// Lookup:
//   - every stored question is scored with token_sort_ratio
//   - the highest score wins; ties go to the earliest row
//   - the winner is accepted only at CONFIDENCE_THRESHOLD or above
//
// Loading:
//   - rows come from any QaSource (CSV in production)
//   - a failed load leaves an EMPTY table and a warning in the
//     log; it never stops the assistant
//
// Reloading:
//   The table sits behind RwLock<Arc<QaTable>>. A reload builds
//   the new table completely, then swaps the Arc under the write
//   lock. Readers clone the Arc and keep using their snapshot,
//   so nobody sees a half-built table.
//
// Reference: Rust Book §16 (Shared-State Concurrency)

use anyhow::{anyhow, Result};
use std::sync::{Arc, RwLock};

use crate::domain::qa_entry::QaEntry;
use crate::domain::topic::TopicCode;
use crate::domain::traits::QaSource;
use crate::matching::similarity::{ratio, sort_tokens};

/// Minimum similarity (0..=100) for a fuzzy match to count.
pub const CONFIDENCE_THRESHOLD: f64 = 60.0;

/// The outcome of a successful fuzzy lookup
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// Row index in the table (insertion order)
    pub index:    usize,
    pub question: String,
    pub answer:   String,
    pub topic:    Option<TopicCode>,
    /// Similarity score, 0..=100
    pub score:    f64,
}

/// What happened on the last (re)load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The source was read; `rows` entries are now live
    Loaded { rows: usize },
    /// The source could not be used; the table is empty
    Unavailable { reason: String },
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded { .. })
    }
}

/// An immutable snapshot of the Q/A table.
#[derive(Debug, Default)]
pub struct QaTable {
    entries: Vec<QaEntry>,
    /// Pre-sorted token strings, one per entry, same order
    keys: Vec<String>,
}

impl QaTable {
    /// Build a table, dropping rows whose question has no tokens.
    pub fn from_entries(entries: Vec<QaEntry>) -> Self {
        let mut kept = Vec::with_capacity(entries.len());
        let mut keys = Vec::with_capacity(entries.len());

        for entry in entries {
            let key = sort_tokens(&entry.question);
            if key.is_empty() {
                tracing::debug!("Dropping Q/A row with an empty question");
                continue;
            }
            kept.push(entry);
            keys.push(key);
        }

        Self { entries: kept, keys }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[QaEntry] {
        &self.entries
    }

    /// Highest-scoring entry for `text`, if it reaches `threshold`.
    pub fn best_match(&self, text: &str, threshold: f64) -> Option<FuzzyMatch> {
        let query = sort_tokens(text);

        let mut best: Option<(usize, f64)> = None;
        for (index, key) in self.keys.iter().enumerate() {
            let score = ratio(&query, key);
            // Strictly greater: on a tie the earlier row is kept
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((index, score));
            }
        }

        let (index, score) = best?;
        tracing::debug!(
            "Best fuzzy candidate #{} '{}' scored {:.1}",
            index,
            self.entries[index].question,
            score
        );

        if score < threshold {
            return None;
        }

        let entry = &self.entries[index];
        Some(FuzzyMatch {
            index,
            question: entry.question.clone(),
            answer:   entry.answer.clone(),
            topic:    entry.topic.clone(),
            score,
        })
    }
}

/// The shared, reloadable question store.
pub struct QuestionStore {
    source: Box<dyn QaSource>,
    table:  RwLock<Arc<QaTable>>,
}

impl QuestionStore {
    /// Create a store over `source` with an empty table.
    /// Call `reload` (or use `open`) to read the rows.
    pub fn new(source: Box<dyn QaSource>) -> Self {
        Self {
            source,
            table: RwLock::new(Arc::new(QaTable::default())),
        }
    }

    /// Create a store and load it once. A failed load is logged and
    /// leaves the store empty.
    pub fn open(source: Box<dyn QaSource>) -> (Self, LoadStatus) {
        let store  = Self::new(source);
        let status = store.reload();
        (store, status)
    }

    /// Re-read the source and swap in the new table as a whole.
    pub fn reload(&self) -> LoadStatus {
        let (table, status) = match self.source.load_all() {
            Ok(entries) => {
                let table = QaTable::from_entries(entries);
                let rows  = table.len();
                tracing::info!("Loaded {} Q/A entries from {}", rows, self.source.describe());
                (table, LoadStatus::Loaded { rows })
            }
            Err(e) => {
                tracing::warn!(
                    "Q/A source {} unavailable, continuing with an empty store: {:#}",
                    self.source.describe(),
                    e
                );
                (QaTable::default(), LoadStatus::Unavailable { reason: format!("{e:#}") })
            }
        };

        self.swap(Arc::new(table));
        status
    }

    /// Current table snapshot. Fails only if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Arc<QaTable>> {
        self.table
            .read()
            .map(|guard| Arc::clone(&*guard))
            .map_err(|_| anyhow!("question store lock is poisoned"))
    }

    /// Best stored answer for already-normalized text.
    ///
    /// `Ok(None)` means "no confident match" (including an empty
    /// store); `Err` means the store itself is unusable.
    pub fn best_match(&self, normalized: &str) -> Result<Option<FuzzyMatch>> {
        Ok(self.snapshot()?.best_match(normalized, CONFIDENCE_THRESHOLD))
    }

    pub fn len(&self) -> usize {
        self.snapshot().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Leave the table lock poisoned, as after a panicking writer.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|s| {
            let writer = s.spawn(|| {
                let _guard = self.table.write();
                panic!("writer panicked while holding the table lock");
            });
            assert!(writer.join().is_err());
        });
    }

    fn swap(&self, table: Arc<QaTable>) {
        match self.table.write() {
            Ok(mut guard) => *guard = table,
            Err(poisoned) => {
                // The whole table is replaced, so a panic in some earlier
                // writer leaves nothing half-updated behind.
                *poisoned.into_inner() = table;
                self.table.clear_poison();
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::CsvQaLoader;
    use crate::domain::traits::StaticSource;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_entries() -> Vec<QaEntry> {
        vec![
            QaEntry::new("how do i apply for admission", "Apply online.").with_topic("admission_process"),
            QaEntry::new("what is the admission process", "Fill the form, upload documents.")
                .with_topic("admission_process"),
            QaEntry::new("Tell me about hostel facilities", "AC and non-AC rooms.").with_topic("hostel"),
            QaEntry::new("What about placements?", "85%+ placement rate.").with_topic("placement"),
        ]
    }

    fn sample_store() -> QuestionStore {
        let (store, status) = QuestionStore::open(Box::new(StaticSource::new(sample_entries())));
        assert_eq!(status, LoadStatus::Loaded { rows: 4 });
        store
    }

    #[test]
    fn test_exact_question_scores_100() {
        let m = sample_store().best_match("what is the admission process").unwrap().unwrap();
        assert_eq!(m.index, 1);
        assert_eq!(m.answer, "Fill the form, upload documents.");
        assert_eq!(m.score, 100.0);
    }

    #[test]
    fn test_below_threshold_is_none() {
        assert!(sample_store().best_match("hstel fees plz").unwrap().is_none());
    }

    #[test]
    fn test_case_of_stored_question_is_ignored() {
        let m = sample_store().best_match("tell me about hostel facilities").unwrap().unwrap();
        assert_eq!(m.topic.unwrap().as_str(), "hostel");
    }

    #[test]
    fn test_tie_goes_to_earliest_row() {
        let source = StaticSource::new(vec![
            QaEntry::new("hostel rules", "first"),
            QaEntry::new("rules hostel", "second"),
        ]);
        let (store, _) = QuestionStore::open(Box::new(source));
        for _ in 0..3 {
            let m = store.best_match("hostel rules").unwrap().unwrap();
            assert_eq!(m.answer, "first");
        }
    }

    #[test]
    fn test_blank_questions_are_dropped() {
        let source = StaticSource::new(vec![
            QaEntry::new("", "ghost answer"),
            QaEntry::new("   ", "another ghost"),
            QaEntry::new("what about placements", "85%+ placement rate."),
        ]);
        let (store, status) = QuestionStore::open(Box::new(source));
        assert_eq!(status, LoadStatus::Loaded { rows: 1 });
        assert_eq!(store.len(), 1);
        assert!(store.best_match("").unwrap().is_none());
        assert!(store.best_match("   ").unwrap().is_none());
    }

    #[test]
    fn test_reload_recovers_a_poisoned_lock() {
        let store = sample_store();
        store.poison();
        assert!(store.best_match("what is the admission process").is_err());
        assert!(store.is_empty());

        assert_eq!(store.reload(), LoadStatus::Loaded { rows: 4 });
        let m = store.best_match("what is the admission process").unwrap().unwrap();
        assert_eq!(m.index, 1);
    }

    #[test]
    fn test_empty_store_returns_none() {
        let store = QuestionStore::new(Box::new(StaticSource::default()));
        assert!(store.is_empty());
        assert!(store.best_match("anything").unwrap().is_none());
        assert!(store.best_match("").unwrap().is_none());
    }

    #[test]
    fn test_missing_source_leaves_store_empty() {
        let (store, status) = QuestionStore::open(Box::new(CsvQaLoader::new("no/such/file.csv")));
        assert!(!status.is_loaded());
        match status {
            LoadStatus::Unavailable { reason } => assert!(reason.contains("no/such/file.csv")),
            other => panic!("unexpected status {other:?}"),
        }
        assert!(store.best_match("what is the admission process").unwrap().is_none());
    }

    #[test]
    fn test_reload_same_source_is_deterministic() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "question,answer").unwrap();
        writeln!(f, "what is the admission process,A").unwrap();
        writeln!(f, "process admission the is what,B").unwrap();
        f.flush().unwrap();

        let (store, _) = QuestionStore::open(Box::new(CsvQaLoader::new(f.path())));
        let first = store.best_match("admission process").unwrap();
        store.reload();
        let second = store.best_match("admission process").unwrap();
        assert_eq!(first, second);
        assert_eq!(second.unwrap().answer, "A");
    }

    /// Alternates between two complete tables on every load.
    struct FlipSource {
        loads: AtomicUsize,
    }

    impl QaSource for FlipSource {
        fn load_all(&self) -> Result<Vec<QaEntry>> {
            let n = self.loads.fetch_add(1, Ordering::SeqCst);
            let tag = if n % 2 == 0 { "even" } else { "odd" };
            Ok((0..50).map(|i| QaEntry::new(format!("question {i}"), tag)).collect())
        }

        fn describe(&self) -> String {
            "flip source".to_string()
        }
    }

    #[test]
    fn test_readers_never_see_a_mixed_table() {
        let (store, _) = QuestionStore::open(Box::new(FlipSource { loads: AtomicUsize::new(0) }));

        std::thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..100 {
                    store.reload();
                }
            });
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..100 {
                        let table = store.snapshot().unwrap();
                        let first = &table.entries()[0].answer;
                        assert_eq!(table.len(), 50);
                        assert!(table.entries().iter().all(|e| &e.answer == first));
                    }
                });
            }
        });
    }
}
