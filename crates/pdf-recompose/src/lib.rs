//! Page-document recomposition
//!
//! Reads an existing PDF, rebuilds it with the same pages (optionally merged
//! with background artwork) and an updated information dictionary, and swaps
//! the result in for the original file.

mod copy;
mod info;
mod io;
pub mod overlay;
mod persist;
mod recompose;
mod text;
mod types;

pub use info::info_dictionary;
#[cfg(feature = "async")]
pub use io::{load_pdf_async, save_pdf_async};
pub use io::{load_pdf, page_count, pdf_to_bytes, save_pdf};
pub use overlay::{OverlayOptions, OverlayOutcome, overlay};
pub use persist::{
    StagedReplace, backup_path, persist_atomically, replace_file, stage_replace, write_temporary,
};
pub use recompose::recompose;
pub use text::{object_text, text_object};
pub use types::*;

pub use tempfile::TempPath;
