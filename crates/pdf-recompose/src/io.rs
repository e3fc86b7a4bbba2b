//! Document I/O

use crate::types::*;
use log::debug;
use lopdf::Document;
use std::path::Path;

/// Load a single PDF document
pub fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let doc = Document::load_mem(&bytes)?;
    debug!(
        "Loaded {} ({} pages, {} bytes)",
        path.display(),
        doc.get_pages().len(),
        bytes.len()
    );
    Ok(doc)
}

/// Serialize a document to bytes
pub fn pdf_to_bytes(doc: &mut Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

/// Save a document directly to `path`, overwriting whatever is there
pub fn save_pdf(doc: &mut Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = pdf_to_bytes(doc)?;
    std::fs::write(path, &bytes)?;
    debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Number of pages in the document's page tree
pub fn page_count(doc: &Document) -> usize {
    doc.get_pages().len()
}

/// Load a PDF document without blocking the async runtime
#[cfg(feature = "async")]
pub async fn load_pdf_async(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Save a document without blocking the async runtime
#[cfg(feature = "async")]
pub async fn save_pdf_async(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || pdf_to_bytes(&mut doc)).await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
