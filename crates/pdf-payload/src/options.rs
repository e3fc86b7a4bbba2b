use crate::codec::lookup_encoding;
use crate::types::*;
use pdf_recompose::{InfoDictionary, ReplaceStrategy, STANDARD_INFO_KEYS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Characters that would end a PDF name
const NAME_DELIMITERS: &[char] = &['(', ')', '<', '>', '[', ']', '{', '}', '/', '%'];

/// Payload embedding configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PayloadOptions {
    /// Information dictionary key holding the payload
    pub key: String,
    /// Encoding label of the payload source file (`utf-8`, `windows-1252`, `cp850`, ...)
    pub source_encoding: String,
    pub replace_strategy: ReplaceStrategy,
}

impl Default for PayloadOptions {
    fn default() -> Self {
        Self {
            key: PAYLOAD_KEY.to_string(),
            source_encoding: "utf-8".to_string(),
            replace_strategy: ReplaceStrategy::BackupThenRemove,
        }
    }
}

impl PayloadOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| PayloadError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PayloadError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Key without its leading `/`
    pub fn normalized_key(&self) -> &str {
        InfoDictionary::normalize_key(&self.key)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let key = self.normalized_key();
        if key.is_empty() {
            return Err(PayloadError::Config("Payload key is empty".to_string()));
        }

        if key
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || NAME_DELIMITERS.contains(&c))
        {
            return Err(PayloadError::Config(format!(
                "Payload key {:?} is not a valid PDF name",
                self.key
            )));
        }

        if STANDARD_INFO_KEYS.contains(&key) {
            return Err(PayloadError::Config(format!(
                "Payload key /{} collides with a standard document information key",
                key
            )));
        }

        lookup_encoding(&self.source_encoding)?;

        Ok(())
    }
}
