// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits that name the concepts of the
// FAQ assistant: question/answer entries, topic codes, topic
// suggestions and the per-session conversation state.
//
// Rules for this layer:
//   - NO file I/O
//   - NO matching or scoring logic
//   - Only data types and the traits other layers implement
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A question/answer row and the keyword rule shape
pub mod qa_entry;

// Topic codes and the suggestion buttons built from them
pub mod topic;

// The only mutable entity: last resolved topic per session
pub mod state;

// Core abstractions (traits) that other layers implement
pub mod traits;
