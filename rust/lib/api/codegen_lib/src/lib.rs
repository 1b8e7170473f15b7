/// Codegen Library - shared schema generation logic
///
/// Maps export declarations to schema fields and renders them for a target
/// schema language. Used by the `goa` binary.

pub mod error;
pub mod types;
pub mod proto;

use std::io::Write;

pub use error::{MapError, RenderError};
pub use proto::ProtoGenerator;
pub use types::{map_export, map_fields, MapOptions};

use goa_ir::ExportRecord;

/// Schema generator trait - implement this for each target schema language
pub trait SchemaGenerator {
    /// Render all exports, in order, into `out`.
    fn generate(&self, exports: &[ExportRecord], out: &mut dyn Write) -> Result<(), RenderError>;
    fn language(&self) -> &str;
}

/// Render into an in-memory string.
pub fn render_to_string(
    generator: &dyn SchemaGenerator,
    exports: &[ExportRecord],
) -> Result<String, RenderError> {
    let mut buf: Vec<u8> = Vec::new();
    generator.generate(exports, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
