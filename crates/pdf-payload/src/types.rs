use pdf_recompose::RecomposeError;
use std::path::PathBuf;
use thiserror::Error;

/// Information dictionary key holding the embedded payload (`/INVOICE-DATA`)
pub const PAYLOAD_KEY: &str = "INVOICE-DATA";

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("No payload under /{key} in document")]
    MissingPayload { key: String },
    #[error(
        "Embedded payload does not match the original ({expected_len} bytes expected, {actual_len} bytes recovered)"
    )]
    IntegrityVerification {
        expected_len: usize,
        actual_len: usize,
    },
    #[error("Payload token could not be decoded: {0}")]
    Decoding(String),
    #[error("Payload source could not be decoded: {0}")]
    SourceEncoding(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Recompose(#[from] RecomposeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PayloadError>;

/// Summary of a successful embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReport {
    /// Document that now carries the payload
    pub document: PathBuf,
    /// Pages in the rewritten document
    pub pages: usize,
    /// Payload size as UTF-8
    pub payload_bytes: usize,
    /// Length of the base64 token stored in the document
    pub token_len: usize,
}
