// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only. The matching decisions live in
// Layer 5; printing lives in Layer 1.
//
//   resolve_use_case.rs  — ResolutionEngine: one user turn from
//                          raw text to reply + updated state
//   generate_use_case.rs — classifier training examples built
//                          from the same Q/A source
//
// Reference: Clean Architecture pattern

// The per-turn answer pipeline
pub mod resolve_use_case;

// The training-example generation workflow
pub mod generate_use_case;
