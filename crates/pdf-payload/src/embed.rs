//! Embedding a payload into a document and recovering it
//!
//! Embedding never replaces the document before the freshly written copy has
//! been read back and its payload compared with the original text.

use crate::codec::{decode_token, encode, read_payload_source};
use crate::options::PayloadOptions;
use crate::types::*;
use log::{debug, info};
use lopdf::Document;
use pdf_recompose::{
    InfoDictionary, info_dictionary, load_pdf, page_count, recompose, stage_replace,
    write_temporary,
};
use std::fs;
use std::path::Path;

/// Embed the contents of `payload_path` into the document at `doc_path`.
///
/// On success the document is replaced in place and the payload source file
/// is deleted. On any failure the document and the payload source are left
/// as they were.
pub fn embed(
    doc_path: impl AsRef<Path>,
    payload_path: impl AsRef<Path>,
    options: &PayloadOptions,
) -> Result<EmbedReport> {
    options.validate()?;
    let payload_path = payload_path.as_ref();

    let text = read_payload_source(payload_path, &options.source_encoding)?;
    let token = encode(&text);
    commit(doc_path.as_ref(), &text, &token, Some(payload_path), options)
}

/// Embed in-memory payload text into the document at `doc_path`
pub fn embed_text(
    doc_path: impl AsRef<Path>,
    text: &str,
    options: &PayloadOptions,
) -> Result<EmbedReport> {
    options.validate()?;
    let token = encode(text);
    commit(doc_path.as_ref(), text, &token, None, options)
}

/// Recover the payload stored under `key` in a loaded document
pub fn extract(doc: &Document, key: &str) -> Result<String> {
    let key = InfoDictionary::normalize_key(key);
    let info = info_dictionary(doc)?;
    let token = info.get(key).ok_or_else(|| PayloadError::MissingPayload {
        key: key.to_string(),
    })?;
    decode_token(token)
}

/// Recover the payload from the document at `path` using the default key
pub fn decode(path: impl AsRef<Path>) -> Result<String> {
    decode_with(path, &PayloadOptions::default())
}

/// Recover the payload from the document at `path`
pub fn decode_with(path: impl AsRef<Path>, options: &PayloadOptions) -> Result<String> {
    let doc = load_pdf(path)?;
    extract(&doc, &options.key)
}

fn commit(
    doc_path: &Path,
    text: &str,
    token: &str,
    payload_source: Option<&Path>,
    options: &PayloadOptions,
) -> Result<EmbedReport> {
    debug!("Payload token is {} characters", token.len());

    let source = load_pdf(doc_path)?;
    let mut updates = InfoDictionary::new();
    updates.set(options.normalized_key(), token);

    let mut doc = recompose(&source, &updates, None)?;
    let pages = page_count(&doc);
    let temp = write_temporary(&mut doc, doc_path)?;

    info!("Validating temporary file {}", temp.display());
    let recovered = decode_with(&temp, options)?;
    if recovered != text {
        return Err(PayloadError::IntegrityVerification {
            expected_len: text.len(),
            actual_len: recovered.len(),
        });
    }

    let staged = stage_replace(doc_path, options.replace_strategy)?;
    if let Some(payload) = payload_source {
        if let Err(err) = fs::remove_file(payload) {
            staged.rollback()?;
            return Err(err.into());
        }
        debug!("Removed payload source {}", payload.display());
    }
    staged.install(temp)?;

    info!("Embedded {} payload bytes into {}", text.len(), doc_path.display());
    Ok(EmbedReport {
        document: doc_path.to_path_buf(),
        pages,
        payload_bytes: text.len(),
        token_len: token.len(),
    })
}
