//! Export IR — functions selected by a `goa-export` marker and the schema
//! fields derived from their signatures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::FieldList;

/// Comment token that flags a function for schema generation.
pub const EXPORT_MARKER: &str = "goa-export";

/// Field number reserved for the call id in every message.
pub const CALL_ID_FIELD: u32 = 1;

/// First field number available to mapped parameters/results.
pub const FIRST_FIELD_ID: u32 = 2;

/// A marker-selected function, before its signature is mapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDecl {
    /// Go function name.
    pub source_name: String,

    /// Name from the marker comment (e.g. `Ping` in `// goa-export Ping`).
    pub exported_name: String,

    pub params: FieldList,

    pub results: FieldList,

    /// 1-based line of the originating `func`.
    pub line: usize,
}

/// An export with its signature resolved into schema fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub source_name: String,
    pub exported_name: String,
    pub params: Vec<FieldSpec>,
    pub results: Vec<FieldSpec>,
}

impl ExportRecord {
    /// Name of the request message (`<Name>_call`).
    pub fn call_message(&self) -> String {
        format!("{}_call", self.exported_name)
    }

    /// Name of the response message (`<Name>_result`).
    pub fn result_message(&self) -> String {
        format!("{}_result", self.exported_name)
    }
}

/// A normalized schema field derived from one parameter or result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: u32,
    pub cardinality: Cardinality,
    pub schema_type: SchemaType,
    pub name: String,
}

/// Field rule in the generated schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    Required,
    Repeated,
}

impl Cardinality {
    pub fn keyword(&self) -> &'static str {
        match self {
            Cardinality::Required => "required",
            Cardinality::Repeated => "repeated",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Schema type of a mapped field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaType {
    /// A type name emitted as-is (e.g. `int64`, `string`).
    Named(String),
    /// A Go type shape with no schema counterpart. Rendered as a sentinel.
    Unsupported,
    /// An array whose element is not a simple identifier. Cannot be rendered.
    Malformed(String),
}

impl SchemaType {
    pub const UNSUPPORTED: &'static str = "<unsupported>";

    pub fn named(name: impl Into<String>) -> Self {
        SchemaType::Named(name.into())
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, SchemaType::Unsupported)
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaType::Named(name) => f.write_str(name),
            SchemaType::Unsupported => f.write_str(Self::UNSUPPORTED),
            SchemaType::Malformed(go_type) => write!(f, "<malformed {}>", go_type),
        }
    }
}
