//! goa Go source parser
//!
//! Parses Go source text into IR data structures and selects the functions
//! carrying a `goa-export` marker.
//! Used by:
//! - `goa generate` (schema pipeline)
//! - `goa exports` (JSON inspection)

pub mod error;
pub mod lexer;
pub mod decl_parser;
pub mod scanner;

pub use decl_parser::parse_source;
pub use error::{ParseError, ScanError};
pub use scanner::scan_exports;
