// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the data, domain and infra layers for each CLI
// command. No parsing or tensor code lives here, only the
// order in which things happen.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Scan captions and save the configuration record
pub mod config_use_case;

// Build the generator and pull a few batches
pub mod preview_use_case;
