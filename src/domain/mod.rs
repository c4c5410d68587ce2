// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing the caption
// data the pipeline works on.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - NO tokenisation or batching logic
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Image id → captions mapping, in file order
pub mod corpus;

// The flat configuration record shared by scanner and generator
pub mod config;

// Dataset partitions (train / dev / test)
pub mod split;

// Core abstractions (traits) that other layers implement
pub mod traits;
