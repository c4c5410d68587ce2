// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Files the pipeline writes next to the feature caches in
// <data_dir>/model/:
//
//   config_store.rs    — config.json, the five-field
//                        configuration record, so later runs
//                        reuse the same shapes
//
//   tokenizer_store.rs — tokenizer.json, the fitted vocabulary
//                        in HuggingFace `tokenizers` format so
//                        inference code can map ids back to
//                        words
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Configuration record persistence
pub mod config_store;

/// Vocabulary persistence
pub mod tokenizer_store;
