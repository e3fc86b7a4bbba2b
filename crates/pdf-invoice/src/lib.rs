//! Invoice rendering
//!
//! Turns an [`Invoice`] record into a paginated A4 PDF using the builtin
//! Helvetica fonts.

pub mod constants;
mod example;
mod format;
mod options;
mod pdf;
mod types;

pub use format::{NumberFormat, SymbolPosition};
pub use options::RenderOptions;
pub use pdf::{generate_pdf, render_invoice};
pub use types::*;

use std::path::Path;

/// Read an invoice record from a JSON file
pub fn load_invoice(path: impl AsRef<Path>) -> Result<Invoice> {
    let json = std::fs::read_to_string(path)?;
    Invoice::from_json(&json)
}
