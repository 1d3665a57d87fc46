// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw input (a CSV file, a user message)
// and the matching layer:
//
//   questions_db.csv
//       │
//       ▼
//   CsvQaLoader   → reads rows, checks required columns
//
//   user text
//       │
//       ▼
//   Normalizer    → lowercases, fixes known misspellings
//
//   question
//       │
//       ▼
//   variations    → typo/shortened examples for a classifier
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads the question/answer table from a CSV file
pub mod loader;

/// Lowercases and spell-corrects user input
pub mod normalizer;

/// Builds misspelled and shortened variants of a question
pub mod variations;
