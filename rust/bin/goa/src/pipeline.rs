//! One generation run: Go source in, schema file out.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use goa_codegen_lib::{map_export, MapOptions, ProtoGenerator, SchemaGenerator};
use goa_ir::ExportRecord;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub output: PathBuf,
    pub map: MapOptions,
    pub package: Option<String>,
}

#[derive(Debug)]
pub struct GenerateReport {
    pub exports: Vec<ExportRecord>,
    pub output: PathBuf,
}

/// Parse, scan and map `input` into export records.
pub fn collect_exports(input: &mut dyn Read, map: &MapOptions) -> Result<Vec<ExportRecord>> {
    let mut source = String::new();
    input
        .read_to_string(&mut source)
        .context("could not read input")?;

    let file = goa_parser::parse_source(&source).context("could not parse file")?;
    let decls = goa_parser::scan_exports(&file).context("invalid export marker")?;
    info!("Found {} exported function(s)", decls.len());

    decls
        .iter()
        .map(|decl| map_export(decl, map))
        .collect::<Result<Vec<_>, _>>()
        .context("type mapping failed")
}

/// Generate the schema for `input` into `out`.
pub fn render(input: &mut dyn Read, options: &GenerateOptions, out: &mut dyn Write) -> Result<Vec<ExportRecord>> {
    let exports = collect_exports(input, &options.map)?;
    ProtoGenerator::new(options.package.clone())
        .generate(&exports, out)
        .context("protobuf rendering failed")?;
    Ok(exports)
}

/// Generate the schema for `input` into `options.output`.
///
/// The output file is created (truncated) before the input is parsed. It is
/// flushed and closed on every path, so after an error it may hold partial
/// content; that content is not valid output.
pub fn generate(input: &mut dyn Read, options: &GenerateOptions) -> Result<GenerateReport> {
    let file = File::create(&options.output).with_context(|| {
        format!("could not create output file '{}'", options.output.display())
    })?;
    let mut out = BufWriter::new(file);

    let rendered = render(input, options, &mut out);
    let flushed = out
        .flush()
        .with_context(|| format!("could not write '{}'", options.output.display()));
    drop(out);

    let exports = settle(rendered, flushed)?;
    info!("Wrote {}", options.output.display());

    Ok(GenerateReport {
        exports,
        output: options.output.clone(),
    })
}

/// The render error wins over a flush error on the same run; the flush
/// error is still logged.
fn settle<T>(rendered: Result<T>, flushed: Result<()>) -> Result<T> {
    match (rendered, flushed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(flush_err)) => Err(flush_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(flush_err)) => {
            warn!("{:#}", flush_err);
            Err(err)
        }
    }
}
