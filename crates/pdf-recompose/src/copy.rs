//! Copying pages and background forms between documents
//!
//! Source objects are deep copied into the output document, following
//! references. Object ids are reserved before an object's body is copied so
//! that reference cycles (annotations pointing back at their page, pages
//! linking to each other) terminate.

use crate::types::{RecomposeError, Result};
use log::{debug, warn};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Page tree depth after which inheritance lookup gives up
const MAX_TREE_DEPTH: usize = 64;

/// Default MediaBox (A4 portrait, in points) for pages that carry none
const DEFAULT_MEDIA_BOX: [i64; 4] = [0, 0, 595, 842];

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copies objects from one source document into an output document.
///
/// Remembers every source id it has mapped, so shared objects (fonts, images)
/// are copied once per output document.
pub(crate) struct ObjectCopier<'a> {
    source: &'a Document,
    mapped: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    pub(crate) fn new(source: &'a Document) -> Self {
        Self {
            source,
            mapped: HashMap::new(),
        }
    }

    /// Reserve the output id for a source object without copying it yet
    pub(crate) fn reserve(&mut self, output: &mut Document, id: ObjectId) -> ObjectId {
        *self
            .mapped
            .entry(id)
            .or_insert_with(|| output.new_object_id())
    }

    pub(crate) fn copy(&mut self, output: &mut Document, obj: &Object) -> Result<Object> {
        match obj {
            Object::Reference(id) => {
                if let Some(&new_id) = self.mapped.get(id) {
                    return Ok(Object::Reference(new_id));
                }

                let new_id = self.reserve(output, *id);
                let source = self.source;
                let copied = match source.get_object(*id) {
                    Ok(referenced) => self.copy(output, referenced)?,
                    Err(_) => {
                        debug!("Dangling reference {:?} copied as null", id);
                        Object::Null
                    }
                };
                output.objects.insert(new_id, copied);

                Ok(Object::Reference(new_id))
            }
            Object::Dictionary(dict) => Ok(Object::Dictionary(self.copy_dictionary(output, dict)?)),
            Object::Array(arr) => {
                let new_arr: Result<Vec<_>> = arr.iter().map(|item| self.copy(output, item)).collect();
                Ok(Object::Array(new_arr?))
            }
            Object::Stream(stream) => Ok(Object::Stream(Stream {
                dict: self.copy_dictionary(output, &stream.dict)?,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            })),
            _ => Ok(obj.clone()),
        }
    }

    fn copy_dictionary(&mut self, output: &mut Document, dict: &Dictionary) -> Result<Dictionary> {
        let mut new_dict = Dictionary::new();
        for (key, value) in dict.iter() {
            new_dict.set(key.clone(), self.copy(output, value)?);
        }
        Ok(new_dict)
    }

    /// Copy a page under a new parent node.
    ///
    /// `Parent` is not followed; inherited attributes are resolved from the
    /// source page tree and set on the copy directly.
    pub(crate) fn copy_page(
        &mut self,
        output: &mut Document,
        page_id: ObjectId,
        parent_id: ObjectId,
    ) -> Result<ObjectId> {
        let new_id = self.reserve(output, page_id);
        let source = self.source;
        let page = source.get_dictionary(page_id)?;

        let mut new_page = Dictionary::new();
        for (key, value) in page.iter() {
            if key.as_slice() == b"Parent" {
                continue;
            }
            new_page.set(key.clone(), self.copy(output, value)?);
        }

        for key in INHERITABLE_ATTRIBUTES {
            if new_page.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(source, page, key) {
                new_page.set(key.to_vec(), self.copy(output, value)?);
            }
        }

        new_page.set("Parent", Object::Reference(parent_id));
        output.objects.insert(new_id, Object::Dictionary(new_page));
        Ok(new_id)
    }
}

/// Look up a page attribute on the page itself or its nearest ancestor
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    page: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node = page;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent_id).ok()?;
    }
    None
}

// =============================================================================
// Background Forms
// =============================================================================

/// Turn page 0 of `background` into a Form XObject inside `output`.
///
/// The form can then be drawn beneath any number of output pages.
pub(crate) fn create_background_form(output: &mut Document, background: &Document) -> Result<ObjectId> {
    let page_id = *background
        .get_pages()
        .values()
        .next()
        .ok_or(RecomposeError::EmptyBackground)?;
    let page = background.get_dictionary(page_id)?;
    let mut copier = ObjectCopier::new(background);

    let bbox = match inherited_attribute(background, page, b"MediaBox") {
        Some(media_box) => copier.copy(output, media_box)?,
        None => Object::Array(DEFAULT_MEDIA_BOX.iter().map(|&v| Object::Integer(v)).collect()),
    };

    let content = page_content(background, page)?;

    let mut form = Dictionary::new();
    form.set("Type", Object::Name(b"XObject".to_vec()));
    form.set("Subtype", Object::Name(b"Form".to_vec()));
    form.set("BBox", bbox);
    form.set("FormType", Object::Integer(1));

    if let Some(resources) = inherited_attribute(background, page, b"Resources") {
        form.set("Resources", copier.copy(output, resources)?);
    }

    Ok(output.add_object(Stream::new(form, content)))
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the decoded content stream data of a page
fn page_content(doc: &Document, page: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(id) => match doc.get_object(*id)? {
            Object::Array(arr) => concatenated_streams(doc, arr),
            Object::Stream(stream) => Ok(stream_data(stream)),
            _ => Ok(Vec::new()),
        },
        Object::Array(arr) => concatenated_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

fn concatenated_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        if let Object::Reference(id) = obj {
            if let Ok(stream) = doc.get_object(*id)?.as_stream() {
                result.extend_from_slice(&stream_data(stream));
                result.push(b'\n');
            }
        }
    }

    Ok(result)
}

fn stream_data(stream: &Stream) -> Vec<u8> {
    if !stream.dict.has(b"Filter") {
        return stream.content.clone();
    }
    match stream.decompressed_content() {
        Ok(data) => data,
        Err(err) => {
            warn!("Skipping background content stream with unsupported filter: {}", err);
            Vec::new()
        }
    }
}

// =============================================================================
// Underlay
// =============================================================================

/// Draw `form_id` beneath the existing content of an output page.
///
/// The page's resources become a private inline dictionary so pages that
/// shared a resource dictionary can carry different backgrounds.
pub(crate) fn underlay_form(output: &mut Document, page_id: ObjectId, form_id: ObjectId) -> Result<()> {
    let (mut resources, contents) = {
        let page = output.get_dictionary(page_id)?;
        let resources = match page.get(b"Resources") {
            Ok(obj) => resolve_dictionary(output, obj)?,
            Err(_) => Dictionary::new(),
        };
        (resources, page.get(b"Contents").ok().cloned())
    };

    let mut xobjects = match resources.get(b"XObject") {
        Ok(obj) => resolve_dictionary(output, obj)?,
        Err(_) => Dictionary::new(),
    };
    let name = unused_name(&xobjects);
    xobjects.set(name.as_bytes().to_vec(), Object::Reference(form_id));
    resources.set("XObject", Object::Dictionary(xobjects));

    let draw = format!("q /{} Do Q\n", name);
    let draw_id = output.add_object(Stream::new(Dictionary::new(), draw.into_bytes()));

    let mut streams = vec![Object::Reference(draw_id)];
    match contents {
        Some(Object::Array(arr)) => streams.extend(arr),
        Some(Object::Reference(id)) => match output.get_object(id)? {
            Object::Array(arr) => streams.extend(arr.iter().cloned()),
            _ => streams.push(Object::Reference(id)),
        },
        _ => {}
    }

    let page = output.get_object_mut(page_id)?.as_dict_mut()?;
    page.set("Resources", Object::Dictionary(resources));
    page.set("Contents", Object::Array(streams));
    Ok(())
}

fn resolve_dictionary(doc: &Document, obj: &Object) -> Result<Dictionary> {
    match obj {
        Object::Reference(id) => Ok(doc.get_dictionary(*id)?.clone()),
        Object::Dictionary(dict) => Ok(dict.clone()),
        _ => Ok(Dictionary::new()),
    }
}

/// First `BgN` name not already used in an XObject dictionary
fn unused_name(xobjects: &Dictionary) -> String {
    (0..)
        .map(|n| format!("Bg{}", n))
        .find(|name| !xobjects.has(name.as_bytes()))
        .unwrap_or_else(|| "Bg".to_string())
}
