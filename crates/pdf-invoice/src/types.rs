use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InvoiceError>;

/// Canonical invoice record.
///
/// Multi-line fields use `\n` as line separator. Amounts are in cents and
/// are formatted by the renderer's [`NumberFormat`](crate::NumberFormat).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Suggested output file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<PathBuf>,
    /// Sender block, top right
    pub sender: String,
    /// One-line sender address above the recipient window
    pub sender_line: String,
    /// Recipient address block
    pub recipient: String,
    /// Place and date line
    pub place_date: String,
    /// Invoice number / heading
    pub number: String,
    pub cover_letter: String,
    /// Column titles: date, description, amount
    pub header: [String; 3],
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<SummaryLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<SummaryLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<SummaryLine>,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub date: String,
    pub description: String,
    pub amount_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub label: String,
    pub amount_cents: i64,
}

impl Invoice {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
