// ============================================================
// Layer 4 — Question/Answer Loader
// ============================================================
// Reads the curated FAQ table from a CSV file using the csv
// crate. Expected layout:
//
//   question,answer,intent
//   "What is the admission process","You can apply ...",admission_process
//   "Tell me about hostel facilities","PDEU provides ...",hostel
//
// `question` and `answer` are required; `intent` (or `topic`)
// is optional. A missing file, a missing column or a malformed
// row is reported as an error; the question store turns that
// into an empty table.
//
// Reference: csv crate documentation (Reader, serde support)
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{
    fs::File,
    io::BufReader,
    path::PathBuf,
};

use crate::domain::qa_entry::QaEntry;
use crate::domain::topic::TopicCode;
use crate::domain::traits::QaSource;

const REQUIRED_COLUMNS: [&str; 2] = ["question", "answer"];

/// One raw CSV row before it becomes a QaEntry
#[derive(Debug, Deserialize)]
struct QaRecord {
    question: String,
    answer:   String,
    #[serde(default, alias = "topic")]
    intent:   Option<String>,
}

/// Loads question/answer rows from a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvQaLoader {
    path: PathBuf,
}

impl CsvQaLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QaSource for CsvQaLoader {
    fn load_all(&self) -> Result<Vec<QaEntry>> {
        // The file handle lives only inside this call and is closed on
        // every return path, including parse errors.
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open Q/A source '{}'", self.path.display()))?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .with_context(|| format!("Cannot read header row of '{}'", self.path.display()))?
            .clone();

        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                bail!(
                    "Q/A source '{}' has no '{}' column (found: {})",
                    self.path.display(),
                    column,
                    headers.iter().collect::<Vec<_>>().join(", ")
                );
            }
        }

        let mut entries = Vec::new();

        for (i, record) in reader.deserialize::<QaRecord>().enumerate() {
            // +2: one for the header row, one for 1-based line numbers
            let record = record.with_context(|| {
                format!("Malformed row {} in '{}'", i + 2, self.path.display())
            })?;

            if record.question.is_empty() {
                tracing::debug!("Skipping row {}: empty question", i + 2);
                continue;
            }

            let topic = record
                .intent
                .filter(|t| !t.is_empty())
                .map(TopicCode::new);

            entries.push(QaEntry {
                question: record.question,
                answer:   record.answer,
                topic,
            });
        }

        tracing::debug!("Read {} rows from '{}'", entries.len(), self.path.display());
        Ok(entries)
    }

    fn describe(&self) -> String {
        format!("csv '{}'", self.path.display())
    }
}
