//! Letterhead overlay
//!
//! Merges a one page letterhead beneath the first page of a document and an
//! optional second background beneath every following page, then sets the
//! document title and author.

use crate::io::{load_pdf, save_pdf};
use crate::persist::persist_atomically;
use crate::recompose::recompose;
use crate::types::*;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayOptions {
    /// Letterhead placed under the first page. `None` turns the overlay into
    /// a no-op.
    pub letterhead: Option<PathBuf>,
    /// Background placed under pages 2..N (defaults to the letterhead)
    pub background: Option<PathBuf>,
    /// Write here instead of replacing the source in place
    pub output: Option<PathBuf>,
    pub title: String,
    pub author: String,
    pub replace_strategy: ReplaceStrategy,
}

impl OverlayOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| RecomposeError::Config(format!("Failed to parse overlay options: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RecomposeError::Config(format!("Failed to serialize overlay options: {}", e)))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(output) = &self.output {
            let clobbers_input = [&self.letterhead, &self.background]
                .into_iter()
                .flatten()
                .any(|artwork| artwork == output);
            if clobbers_input {
                return Err(RecomposeError::Config(format!(
                    "Output {} would overwrite the background artwork",
                    output.display()
                )));
            }
        }

        Ok(())
    }
}

/// What `overlay` did with the source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayOutcome {
    /// No letterhead was configured; nothing was read or written
    Unchanged,
    /// The merged document was written to an explicit output path
    Written(PathBuf),
    /// The source document was replaced in place
    Replaced(PathBuf),
}

/// Merge a letterhead beneath every page of `source_path`.
///
/// Without a letterhead this intentionally does nothing and reports
/// [`OverlayOutcome::Unchanged`].
pub fn overlay(source_path: impl AsRef<Path>, options: &OverlayOptions) -> Result<OverlayOutcome> {
    let source_path = source_path.as_ref();

    let Some(letterhead_path) = options.letterhead.as_deref() else {
        if options.background.is_some() {
            warn!("Background given without a letterhead, ignoring it");
        }
        debug!("No letterhead given, leaving {} unchanged", source_path.display());
        return Ok(OverlayOutcome::Unchanged);
    };
    options.validate()?;

    let source = load_pdf(source_path)?;
    let letterhead = load_pdf(letterhead_path)?;
    let background = match options.background.as_deref() {
        Some(path) if path != letterhead_path => Some(load_pdf(path)?),
        _ => None,
    };
    let backgrounds = Backgrounds::new(letterhead, background);

    let mut updates = InfoDictionary::new();
    updates.set("Title", options.title.as_str());
    updates.set("Author", options.author.as_str());

    let mut merged = recompose(&source, &updates, Some(&backgrounds))?;

    match &options.output {
        Some(output) => {
            save_pdf(&mut merged, output)?;
            info!("Letterhead applied: {} -> {}", source_path.display(), output.display());
            Ok(OverlayOutcome::Written(output.clone()))
        }
        None => {
            persist_atomically(&mut merged, source_path, options.replace_strategy)?;
            info!("Letterhead applied in place: {}", source_path.display());
            Ok(OverlayOutcome::Replaced(source_path.to_path_buf()))
        }
    }
}
