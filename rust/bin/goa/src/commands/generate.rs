//! `goa generate` — write the schema file and compile it.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::pipeline::{self, GenerateOptions};
use crate::protoc::SchemaCompiler;

/// Generate the schema for `go_file`, then hand it to `compiler` unless
/// `compiler` is `None`.
pub fn run(go_file: &Path, options: &GenerateOptions, compiler: Option<&dyn SchemaCompiler>) -> Result<()> {
    info!("Reading {}", go_file.display());
    let mut input = File::open(go_file)
        .with_context(|| format!("could not open '{}'", go_file.display()))?;

    let report = pipeline::generate(&mut input, options).context("generating protobuf file failed")?;
    for export in &report.exports {
        info!(
            "  {} → {} / {}",
            export.source_name,
            export.call_message(),
            export.result_message()
        );
    }

    if let Some(compiler) = compiler {
        compiler
            .compile(&report.output)
            .context("generating message stubs failed")?;
    }
    Ok(())
}

/// Render the schema for `go_file` to stdout without touching the output file.
pub fn dry_run(go_file: &Path, options: &GenerateOptions) -> Result<()> {
    let mut input = File::open(go_file)
        .with_context(|| format!("could not open '{}'", go_file.display()))?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    pipeline::render(&mut input, options, &mut out).context("generating protobuf file failed")?;
    Ok(())
}
