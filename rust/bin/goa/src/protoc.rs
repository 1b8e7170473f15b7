//! External schema compiler invocation.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::info;

use crate::config::ProtocConfig;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("could not run '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' failed: {status}")]
    Status { program: String, status: ExitStatus },
}

/// Turns a written schema file into per-language stubs.
pub trait SchemaCompiler {
    fn compile(&self, schema: &Path) -> Result<(), CompileError>;
}

/// Runs `protoc` with the configured output targets. Its stdio is inherited,
/// so diagnostics reach the user unmodified.
pub struct Protoc {
    config: ProtocConfig,
}

impl Protoc {
    pub fn new(config: ProtocConfig) -> Self {
        Self { config }
    }

    /// Arguments passed to the compiler for `schema`.
    pub fn args(&self, schema: &Path) -> Vec<String> {
        let mut args = Vec::new();
        if !self.config.java_out.is_empty() {
            args.push(format!("--java_out={}", self.config.java_out));
        }
        if !self.config.go_out.is_empty() {
            args.push(format!("--go_out={}", self.config.go_out));
        }
        args.extend(self.config.extra_args.iter().cloned());
        args.push(schema.display().to_string());
        args
    }
}

impl SchemaCompiler for Protoc {
    fn compile(&self, schema: &Path) -> Result<(), CompileError> {
        let program = &self.config.program;
        let args = self.args(schema);
        info!("Running {} {}", program, args.join(" "));
        let status = Command::new(program)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| CompileError::Spawn {
                program: program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(CompileError::Status {
                program: program.clone(),
                status,
            });
        }
        Ok(())
    }
}
