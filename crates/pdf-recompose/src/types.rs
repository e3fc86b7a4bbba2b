use lopdf::Document;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecomposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[cfg(feature = "async")]
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to recompose")]
    NoPages,
    #[error("Background document has no pages")]
    EmptyBackground,
    #[error("Failed to write temporary file for {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to move {path} to its backup: {source}")]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to install replacement at {path}: {source}")]
    Install {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RecomposeError>;

/// Keys defined for the document information dictionary by the PDF standard
pub const STANDARD_INFO_KEYS: [&str; 9] = [
    "Title",
    "Author",
    "Subject",
    "Keywords",
    "Creator",
    "Producer",
    "CreationDate",
    "ModDate",
    "Trapped",
];

/// Ordered text view of a document information dictionary.
///
/// Keys are stored without the leading `/` of the PDF name, so `"/Title"` and
/// `"Title"` address the same entry. Setting an existing key replaces the
/// value in place and keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoDictionary {
    entries: Vec<(String, String)>,
}

impl InfoDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strip the leading `/` of a PDF name
    pub fn normalize_key(key: &str) -> &str {
        key.strip_prefix('/').unwrap_or(key)
    }

    /// Insert or replace an entry, returning the previous value
    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        let key = Self::normalize_key(key.as_ref());
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key.to_string(), value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let key = Self::normalize_key(key);
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let key = Self::normalize_key(key);
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for InfoDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut info = Self::new();
        info.extend(iter);
        info
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for InfoDictionary {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

/// Background artwork merged beneath content pages.
///
/// Page 0 of `first` goes under the first content page; page 0 of `rest`
/// (or of `first` when `rest` is `None`) goes under every following page.
#[derive(Debug, Clone)]
pub struct Backgrounds {
    pub first: Document,
    pub rest: Option<Document>,
}

impl Backgrounds {
    pub fn new(first: Document, rest: Option<Document>) -> Self {
        Self { first, rest }
    }

    /// Use one background for every page
    pub fn single(background: Document) -> Self {
        Self::new(background, None)
    }

    /// Background document applied to the content page at `index`
    pub fn for_page(&self, index: usize) -> &Document {
        match (&self.rest, index) {
            (Some(rest), i) if i > 0 => rest,
            _ => &self.first,
        }
    }
}

/// How a finished file is swapped in for an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplaceStrategy {
    /// Rename the target to `<target>.bak`, rename the replacement onto the
    /// target, then delete the backup.
    ///
    /// Not crash-atomic: a crash between the steps can leave only the `.bak`
    /// file, or both files.
    #[default]
    BackupThenRemove,
    /// Single rename over the target. Atomic where the platform guarantees
    /// rename-overwrite (POSIX filesystems).
    RenameOverwrite,
}
