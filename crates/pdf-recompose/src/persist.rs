//! Persisting documents and swapping them in for existing files
//!
//! Every write goes to a uniquely named temporary file in the target's
//! directory, so the final rename never crosses filesystems. Concurrent
//! calls against the same target path are not supported; callers must
//! serialize access per target.

use crate::types::*;
use log::{info, warn};
use lopdf::Document;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// Backup location used while replacing `target`
pub fn backup_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

/// Write `doc` to a fresh temporary file next to `near`.
///
/// The file is removed again when the returned handle is dropped, unless it
/// has been installed somewhere with [`replace_file`] or
/// [`StagedReplace::install`].
pub fn write_temporary(doc: &mut Document, near: &Path) -> Result<TempPath> {
    let dir = match near.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let persist_err = |source| RecomposeError::Persist {
        path: near.to_path_buf(),
        source,
    };

    let mut file = tempfile::Builder::new()
        .prefix(".recompose-")
        .suffix(".pdf")
        .tempfile_in(&dir)
        .map_err(persist_err)?;
    doc.save_to(&mut file)?;
    file.as_file().sync_all().map_err(persist_err)?;

    info!("Using temporary file {}", file.path().display());
    Ok(file.into_temp_path())
}

/// Write `doc` to a temporary file and swap it in for `target`
pub fn persist_atomically(doc: &mut Document, target: &Path, strategy: ReplaceStrategy) -> Result<()> {
    let temp = write_temporary(doc, target)?;
    replace_file(temp, target, strategy)
}

/// Swap `replacement` in for `target`
pub fn replace_file(replacement: TempPath, target: &Path, strategy: ReplaceStrategy) -> Result<()> {
    stage_replace(target, strategy)?.install(replacement)
}

/// Move `target` out of the way, ready for a replacement.
///
/// With [`ReplaceStrategy::BackupThenRemove`] an existing target is renamed
/// to its backup path; if that rename fails nothing has been touched. With
/// [`ReplaceStrategy::RenameOverwrite`] this does nothing.
pub fn stage_replace(target: &Path, strategy: ReplaceStrategy) -> Result<StagedReplace> {
    let backup = match strategy {
        ReplaceStrategy::BackupThenRemove if target.exists() => {
            let backup = backup_path(target);
            fs::rename(target, &backup).map_err(|source| RecomposeError::Backup {
                path: target.to_path_buf(),
                source,
            })?;
            Some(backup)
        }
        _ => None,
    };

    Ok(StagedReplace {
        target: target.to_path_buf(),
        backup,
    })
}

/// A target whose original content has been moved to a backup
#[must_use = "a staged replace must be installed or rolled back"]
#[derive(Debug)]
pub struct StagedReplace {
    target: PathBuf,
    backup: Option<PathBuf>,
}

impl StagedReplace {
    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn backup(&self) -> Option<&Path> {
        self.backup.as_deref()
    }

    /// Rename `replacement` onto the target and delete the backup.
    ///
    /// If the rename fails the backup is moved back. A backup that cannot be
    /// deleted afterwards is left behind with a warning.
    pub fn install(self, replacement: TempPath) -> Result<()> {
        if let Err(err) = replacement.persist(&self.target) {
            let path = self.target.clone();
            if let Err(restore_err) = self.rollback() {
                warn!("Could not restore backup of {}: {}", path.display(), restore_err);
            }
            return Err(RecomposeError::Install {
                path,
                source: err.error,
            });
        }

        if let Some(backup) = &self.backup {
            if let Err(err) = fs::remove_file(backup) {
                warn!("Leaving orphaned backup {}: {}", backup.display(), err);
            }
        }

        info!("Replaced {}", self.target.display());
        Ok(())
    }

    /// Move the backup back onto the target
    pub fn rollback(self) -> Result<()> {
        if let Some(backup) = &self.backup {
            fs::rename(backup, &self.target)?;
        }
        Ok(())
    }
}
