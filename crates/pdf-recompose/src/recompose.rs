//! Rebuilding a document around its existing pages
//!
//! `recompose` produces a fresh document holding:
//! 1. every source page, in order, deep copied
//! 2. optionally a background form drawn beneath each page
//! 3. the source information dictionary with caller entries applied on top

use crate::copy::{ObjectCopier, create_background_form, underlay_form};
use crate::info::raw_info;
use crate::text::text_object;
use crate::types::*;
use log::debug;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Build a new document from `source`'s pages and information dictionary.
///
/// Existing information entries are preserved; entries in `updates` replace
/// entries with the same key or are appended. Nothing is written to disk.
pub fn recompose(
    source: &Document,
    updates: &InfoDictionary,
    backgrounds: Option<&Backgrounds>,
) -> Result<Document> {
    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
    if page_ids.is_empty() {
        return Err(RecomposeError::NoPages);
    }

    if let Some(backgrounds) = backgrounds {
        check_background(&backgrounds.first)?;
        if let Some(rest) = &backgrounds.rest {
            check_background(rest)?;
        }
    }

    let mut output = Document::with_version(source.version.clone());
    let pages_id = output.new_object_id();
    let mut copier = ObjectCopier::new(source);

    // Reserve page ids up front so links between pages map onto the copies
    for &page_id in &page_ids {
        copier.reserve(&mut output, page_id);
    }

    let mut first_form = None;
    let mut rest_form = None;
    let mut kids = Vec::with_capacity(page_ids.len());

    for (index, &page_id) in page_ids.iter().enumerate() {
        let new_page_id = copier.copy_page(&mut output, page_id, pages_id)?;

        if let Some(backgrounds) = backgrounds {
            let form_id = if index == 0 || backgrounds.rest.is_none() {
                cached_form(&mut output, &mut first_form, &backgrounds.first)?
            } else {
                cached_form(&mut output, &mut rest_form, backgrounds.for_page(index))?
            };
            underlay_form(&mut output, new_page_id, form_id)?;
        }

        kids.push(Object::Reference(new_page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(kids.len() as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    output.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    let info = merged_info(&mut output, &mut copier, source, updates)?;
    let info_id = output.add_object(info);
    output.trailer.set("Info", info_id);

    debug!(
        "Recomposed {} pages with {} information entries updated",
        page_ids.len(),
        updates.len()
    );

    Ok(output)
}

fn check_background(doc: &Document) -> Result<()> {
    if doc.get_pages().is_empty() {
        return Err(RecomposeError::EmptyBackground);
    }
    Ok(())
}

fn cached_form(
    output: &mut Document,
    slot: &mut Option<ObjectId>,
    background: &Document,
) -> Result<ObjectId> {
    if let Some(id) = *slot {
        return Ok(id);
    }
    let id = create_background_form(output, background)?;
    *slot = Some(id);
    Ok(id)
}

fn merged_info(
    output: &mut Document,
    copier: &mut ObjectCopier,
    source: &Document,
    updates: &InfoDictionary,
) -> Result<Dictionary> {
    let mut info = Dictionary::new();
    for (key, value) in raw_info(source)?.iter() {
        info.set(key.clone(), copier.copy(output, value)?);
    }
    for (key, value) in updates.iter() {
        info.set(key.as_bytes().to_vec(), text_object(value));
    }
    Ok(info)
}
