use thiserror::Error;

/// Strict-mode rejection of a field the schema cannot express.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("export {export}: field {field} has unsupported type {go_type}")]
pub struct MapError {
    pub export: String,
    pub field: String,
    pub go_type: String,
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("message {message}: field {field} has malformed type {go_type}: array element must be a plain identifier")]
    Malformed {
        message: String,
        field: String,
        go_type: String,
    },

    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}
