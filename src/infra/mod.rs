// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting file handling that no business layer owns:
//
//   config.rs         — EngineConfig, read from an optional
//                       JSON file; carries the Q/A source path
//                       and rule overrides
//
//   artifact_store.rs — Writes generated JSON artifacts
//                       (classifier training examples) to disk
//                       atomically via a temp file + rename
//
// Reference: Rust Book §9 (Error Handling with anyhow)

/// Engine configuration file
pub mod config;

/// Atomic JSON artifact writer
pub mod artifact_store;
