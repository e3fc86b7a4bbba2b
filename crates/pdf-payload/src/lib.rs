//! Hidden payload embedding
//!
//! Stores a text payload as base64 under a reserved key of a PDF's
//! information dictionary and recovers it byte for byte.

mod codec;
mod embed;
mod options;
mod types;

pub use codec::{PayloadEncoding, decode_token, encode, lookup_encoding, read_payload_source};
pub use embed::{decode, decode_with, embed, embed_text, extract};
pub use options::PayloadOptions;
pub use types::*;
