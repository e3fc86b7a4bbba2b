//! Payload text <-> transport-safe token

use crate::types::*;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use encoding_rs::Encoding;
use log::debug;
use oem_cp::code_table::{DECODING_TABLE_CP437, DECODING_TABLE_CP850};
use oem_cp::decode_string_complete_table;
use std::path::Path;

/// Character set of a payload source file
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayloadEncoding {
    /// Any encoding with a WHATWG label
    Whatwg(&'static Encoding),
    /// DOS/OEM code page; the table maps bytes 0x80..=0xFF
    Oem {
        name: &'static str,
        table: &'static [char; 128],
    },
}

impl PayloadEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Whatwg(encoding) => encoding.name(),
            Self::Oem { name, .. } => *name,
        }
    }

    /// Decode `bytes` strictly; `None` if any byte sequence is invalid
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Whatwg(encoding) => {
                let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
                (!had_errors).then(|| text.into_owned())
            }
            // Both supported code pages define every byte
            Self::Oem { table, .. } => Some(decode_string_complete_table(bytes, table)),
        }
    }
}

/// Encode payload text as base64 of its UTF-8 bytes
pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode a base64 token back into payload text.
///
/// ASCII whitespace inside the token is ignored. Anything that is not
/// base64 of valid UTF-8 is a [`PayloadError::Decoding`].
pub fn decode_token(token: &str) -> Result<String> {
    let compact: String = token.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| PayloadError::Decoding(format!("invalid base64: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| PayloadError::Decoding(format!("invalid UTF-8: {}", e)))
}

/// Resolve an encoding label such as `utf-8`, `windows-1252`, `iso-8859-15`
/// or the DOS code pages `cp850` / `cp437`
pub fn lookup_encoding(label: &str) -> Result<PayloadEncoding> {
    let label = label.trim();
    match label.to_ascii_lowercase().as_str() {
        "cp850" | "ibm850" | "850" => {
            return Ok(PayloadEncoding::Oem {
                name: "cp850",
                table: &DECODING_TABLE_CP850,
            });
        }
        "cp437" | "ibm437" | "437" => {
            return Ok(PayloadEncoding::Oem {
                name: "cp437",
                table: &DECODING_TABLE_CP437,
            });
        }
        _ => {}
    }

    Encoding::for_label(label.as_bytes())
        .map(PayloadEncoding::Whatwg)
        .ok_or_else(|| PayloadError::Config(format!("Unknown source encoding: {}", label)))
}

/// Read a payload source file in the given encoding.
///
/// The text is taken verbatim: no newline translation and no BOM stripping.
pub fn read_payload_source(path: impl AsRef<Path>, encoding_label: &str) -> Result<String> {
    let path = path.as_ref();
    let encoding = lookup_encoding(encoding_label)?;
    let bytes = std::fs::read(path)?;

    let text = encoding.decode(&bytes).ok_or_else(|| {
        PayloadError::SourceEncoding(format!("{} is not valid {}", path.display(), encoding.name()))
    })?;

    debug!(
        "Read payload {} as {} ({} bytes)",
        path.display(),
        encoding.name(),
        bytes.len()
    );
    Ok(text)
}
