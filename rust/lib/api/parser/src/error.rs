use thiserror::Error;

/// Lexical or syntax error in the Go source, with a 1-based position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Export marker placed where it cannot be honoured.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("line {line}: methods cannot be exported: func {receiver} {function}")]
    MethodExport {
        function: String,
        receiver: String,
        line: usize,
    },

    #[error("line {line}: export marker on {function} has no exported name")]
    EmptyExportName { function: String, line: usize },
}
