use crate::text::object_text;
use crate::types::*;
use lopdf::{Dictionary, Document, Object};

/// Raw information dictionary of a document, empty if it has none
pub(crate) fn raw_info(doc: &Document) -> Result<Dictionary> {
    match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => Ok(doc.get_dictionary(*id)?.clone()),
        Ok(Object::Dictionary(dict)) => Ok(dict.clone()),
        _ => Ok(Dictionary::new()),
    }
}

/// Read a document's information dictionary as text.
///
/// Entries whose value is not a scalar (arrays, dictionaries) are skipped.
pub fn info_dictionary(doc: &Document) -> Result<InfoDictionary> {
    let raw = raw_info(doc)?;
    let mut info = InfoDictionary::new();
    for (key, value) in raw.iter() {
        let value = match value {
            Object::Reference(id) => match doc.get_object(*id) {
                Ok(obj) => obj,
                Err(_) => continue,
            },
            other => other,
        };
        if let Some(text) = object_text(value) {
            info.set(String::from_utf8_lossy(key), text);
        }
    }
    Ok(info)
}
