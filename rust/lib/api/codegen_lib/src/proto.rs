/// Protocol Buffers (proto2) schema generator

use std::io::Write;

use goa_ir::*;
use tracing::debug;

use crate::error::RenderError;

/// Name of the reserved call-correlation field present in every message.
pub const CALL_ID_NAME: &str = "callid";

#[derive(Debug, Clone, Default)]
pub struct ProtoGenerator {
    /// Emit a `package` statement when set.
    pub package: Option<String>,
}

impl ProtoGenerator {
    pub fn new(package: Option<String>) -> Self {
        Self { package }
    }
}

impl crate::SchemaGenerator for ProtoGenerator {
    fn generate(&self, exports: &[ExportRecord], out: &mut dyn Write) -> Result<(), RenderError> {
        writeln!(out, "syntax = \"proto2\";")?;
        if let Some(package) = &self.package {
            writeln!(out)?;
            writeln!(out, "package {};", package)?;
        }

        for export in exports {
            debug!(export = %export.exported_name, "rendering messages");
            write_message(out, &export.call_message(), &export.params)?;
            write_message(out, &export.result_message(), &export.results)?;
        }

        Ok(())
    }

    fn language(&self) -> &str {
        "proto2"
    }
}

/// Write one message block. Lines are written as they are produced, so a
/// malformed field leaves everything before it in `out`.
fn write_message(out: &mut dyn Write, name: &str, fields: &[FieldSpec]) -> Result<(), RenderError> {
    writeln!(out)?;
    writeln!(out, "message {} {{", name)?;
    writeln!(
        out,
        "    {} int64 {} = {};",
        Cardinality::Required,
        CALL_ID_NAME,
        CALL_ID_FIELD
    )?;
    for field in fields {
        if let SchemaType::Malformed(go_type) = &field.schema_type {
            return Err(RenderError::Malformed {
                message: name.to_string(),
                field: field.name.clone(),
                go_type: go_type.clone(),
            });
        }
        writeln!(
            out,
            "    {} {} {} = {};",
            field.cardinality, field.schema_type, field.name, field.id
        )?;
    }
    writeln!(out, "}}")?;
    Ok(())
}
