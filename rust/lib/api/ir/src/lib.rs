//! goa Intermediate Representation (IR)
//!
//! Plain data structures shared between:
//! - parser (Go source → declarations → export declarations)
//! - codegen library (export records → schema text)
//! - `goa` binary (pipeline + JSON inspection output)
//!
//! Three layers:
//! 1. Types  — Go type expressions and field lists
//! 2. Decl   — top-level function declarations with their doc comments
//! 3. Export — marker-selected functions and their mapped schema fields

pub mod types;
pub mod decl;
pub mod export;

pub use types::*;
pub use decl::*;
pub use export::*;
