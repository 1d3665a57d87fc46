// ============================================================
// Layer 5 — Matching Layer
// ============================================================
// All the decision logic of a turn lives here. Nothing in this
// layer touches the filesystem directly; the question store
// pulls its rows through the QaSource trait.
//
//   similarity.rs       — token-sort ratio, 0..=100
//   question_store.rs   — fuzzy lookup over the Q/A table,
//                         confidence threshold, atomic reload
//   keyword_fallback.rs — ordered keyword → answer rules
//   topic_menu.rs       — the default "pick a topic" reply
//   followup.rs         — related topics, state recording,
//                         contextual hints

/// Word-order-insensitive string similarity
pub mod similarity;

/// In-memory Q/A table with fuzzy best-match lookup
pub mod question_store;

/// First-match-wins keyword heuristics
pub mod keyword_fallback;

/// Static greeting and topic buttons
pub mod topic_menu;

/// Follow-up suggestions and conversation state updates
pub mod followup;
