mod common;

use common::*;
use lopdf::{Dictionary, Document, Object};
use pdf_recompose::*;

#[test]
fn test_recompose_preserves_page_count() {
    for pages in [1, 2, 5] {
        let source = create_test_pdf(pages);
        let output = recompose(&source, &InfoDictionary::new(), None).unwrap();
        assert_eq!(output.get_pages().len(), pages);
    }
}

#[test]
fn test_recompose_preserves_page_order_and_content() {
    let source = create_test_pdf(3);
    let output = recompose(&source, &InfoDictionary::new(), None).unwrap();

    for (i, page_id) in page_ids(&output).into_iter().enumerate() {
        let streams = page_streams(&output, page_id);
        assert_eq!(streams.len(), 1);
        let text = String::from_utf8(streams[0].clone()).unwrap();
        assert!(text.contains(&format!("(Page {})", i + 1)), "page {} got {}", i, text);
    }
}

#[test]
fn test_recompose_no_pages() {
    let source = create_test_pdf(0);
    let result = recompose(&source, &InfoDictionary::new(), None);
    match result {
        Err(RecomposeError::NoPages) => {}
        _ => panic!("Expected NoPages error"),
    }
}

#[test]
fn test_recompose_resolves_inherited_attributes() {
    let source = create_test_pdf(2);
    let output = recompose(&source, &InfoDictionary::new(), None).unwrap();

    for page_id in page_ids(&output) {
        let page = output.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box.len(), 4);
        assert!(page.has(b"Resources"));
    }
}

#[test]
fn test_recompose_keeps_existing_info_entries() {
    let source = create_test_pdf(1);
    let mut updates = InfoDictionary::new();
    updates.set("/INVOICE-DATA", "dG9rZW4=");

    let output = recompose(&source, &updates, None).unwrap();
    let info = info_dictionary(&output).unwrap();

    assert_eq!(info.get("Title"), Some("Original title"));
    assert_eq!(info.get("Producer"), Some("fixture"));
    assert_eq!(info.get("Trapped"), Some("False"));
    assert_eq!(info.get("INVOICE-DATA"), Some("dG9rZW4="));
}

#[test]
fn test_recompose_updates_win_over_existing_entries() {
    let source = create_test_pdf(1);
    let mut updates = InfoDictionary::new();
    updates.set("Title", "Rechnung für Köln");

    let mut output = recompose(&source, &updates, None).unwrap();
    let bytes = pdf_to_bytes(&mut output).unwrap();
    let reloaded = Document::load_mem(&bytes).unwrap();
    let info = info_dictionary(&reloaded).unwrap();

    assert_eq!(info.get("Title"), Some("Rechnung für Köln"));
    assert_eq!(info.get("Producer"), Some("fixture"));
    // Existing key keeps its position
    assert_eq!(info.keys().next(), Some("Title"));
}

#[test]
fn test_recompose_without_source_info() {
    let mut source = create_test_pdf(1);
    source.trailer.remove(b"Info");

    let mut updates = InfoDictionary::new();
    updates.set("Author", "someone");
    let output = recompose(&source, &updates, None).unwrap();
    let info = info_dictionary(&output).unwrap();

    assert_eq!(info.len(), 1);
    assert_eq!(info.get("/Author"), Some("someone"));
}

#[test]
fn test_recompose_remaps_links_between_pages() {
    let mut source = create_test_pdf(2);
    let ids = page_ids(&source);

    let annot_id = source.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Annot".to_vec())),
        ("Subtype", Object::Name(b"Link".to_vec())),
        (
            "Dest",
            Object::Array(vec![
                Object::Reference(ids[1]),
                Object::Name(b"Fit".to_vec()),
            ]),
        ),
        ("P", Object::Reference(ids[0])),
    ]));
    source
        .get_object_mut(ids[0])
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("Annots", Object::Array(vec![Object::Reference(annot_id)]));

    let output = recompose(&source, &InfoDictionary::new(), None).unwrap();
    let new_ids = page_ids(&output);
    assert_eq!(new_ids.len(), 2);

    let first = output.get_dictionary(new_ids[0]).unwrap();
    let annots = first.get(b"Annots").unwrap().as_array().unwrap();
    let annot = output
        .get_dictionary(annots[0].as_reference().unwrap())
        .unwrap();
    let dest = annot.get(b"Dest").unwrap().as_array().unwrap();

    assert_eq!(dest[0].as_reference().unwrap(), new_ids[1]);
    assert_eq!(annot.get(b"P").unwrap().as_reference().unwrap(), new_ids[0]);
}

#[test]
fn test_recompose_with_single_background() {
    let source = create_test_pdf(3);
    let backgrounds = Backgrounds::single(create_background_pdf("letterhead"));

    let output = recompose(&source, &InfoDictionary::new(), Some(&backgrounds)).unwrap();
    let ids = page_ids(&output);
    assert_eq!(ids.len(), 3);

    for (i, &page_id) in ids.iter().enumerate() {
        let streams = page_streams(&output, page_id);
        assert_eq!(streams.len(), 2, "background plus original content");
        let content = String::from_utf8(streams[1].clone()).unwrap();
        assert!(content.contains(&format!("(Page {})", i + 1)));
        assert!(background_marker(&output, page_id).contains("letterhead"));
    }
}

#[test]
fn test_recompose_with_first_and_rest_backgrounds() {
    let source = create_test_pdf(3);
    let backgrounds = Backgrounds::new(
        create_background_pdf("letterhead"),
        Some(create_background_pdf("continuation")),
    );

    let output = recompose(&source, &InfoDictionary::new(), Some(&backgrounds)).unwrap();
    let ids = page_ids(&output);

    assert!(background_marker(&output, ids[0]).contains("letterhead"));
    assert!(background_marker(&output, ids[1]).contains("continuation"));
    assert!(background_marker(&output, ids[2]).contains("continuation"));
}

#[test]
fn test_recompose_background_keeps_existing_resources() {
    let source = create_test_pdf(2);
    let backgrounds = Backgrounds::single(create_background_pdf("bg"));

    let output = recompose(&source, &InfoDictionary::new(), Some(&backgrounds)).unwrap();
    for page_id in page_ids(&output) {
        let page = output.get_dictionary(page_id).unwrap();
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
        assert!(fonts.has(b"F1"));
    }
}

#[test]
fn test_recompose_reuses_background_form() {
    let source = create_test_pdf(3);
    let backgrounds = Backgrounds::single(create_background_pdf("bg"));
    let output = recompose(&source, &InfoDictionary::new(), Some(&backgrounds)).unwrap();

    let forms: Vec<_> = page_ids(&output)
        .into_iter()
        .map(|page_id| {
            let page = output.get_dictionary(page_id).unwrap();
            let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
            let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
            xobjects.get(b"Bg0").unwrap().as_reference().unwrap()
        })
        .collect();

    assert!(forms.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_recompose_empty_background() {
    let source = create_test_pdf(2);
    let backgrounds = Backgrounds::single(create_test_pdf(0));

    let result = recompose(&source, &InfoDictionary::new(), Some(&backgrounds));
    match result {
        Err(RecomposeError::EmptyBackground) => {}
        _ => panic!("Expected EmptyBackground error"),
    }
}

#[test]
fn test_recomposed_document_survives_save_and_load() {
    let source = create_test_pdf(2);
    let backgrounds = Backgrounds::single(create_background_pdf("bg"));
    let mut output = recompose(&source, &InfoDictionary::new(), Some(&backgrounds)).unwrap();

    let bytes = pdf_to_bytes(&mut output).unwrap();
    let reloaded = Document::load_mem(&bytes).unwrap();
    assert_eq!(page_count(&reloaded), 2);
    let ids = page_ids(&reloaded);
    assert!(background_marker(&reloaded, ids[1]).contains("bg"));
}

#[test]
fn test_info_dictionary_reads_utf16_values() {
    let mut source = create_test_pdf(1);
    let mut bytes = vec![0xFE, 0xFF];
    for unit in "Straße".encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    let info_id = source.trailer.get(b"Info").unwrap().as_reference().unwrap();
    source
        .get_object_mut(info_id)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("Subject", hex_string(bytes));

    let info = info_dictionary(&source).unwrap();
    assert_eq!(info.get("Subject"), Some("Straße"));
}

#[test]
fn test_info_dictionary_set_and_remove() {
    let mut info: InfoDictionary = vec![("/Title", "a"), ("Author", "b")].into_iter().collect();
    assert_eq!(info.set("Title", "c"), Some("a".to_string()));
    assert_eq!(info.len(), 2);
    assert_eq!(info.keys().collect::<Vec<_>>(), vec!["Title", "Author"]);
    assert_eq!(info.remove("/Author"), Some("b".to_string()));
    assert!(!info.contains_key("Author"));
}

#[test]
fn test_backgrounds_for_page() {
    let backgrounds = Backgrounds::new(create_background_pdf("a"), Some(create_background_pdf("b")));
    assert_eq!(backgrounds.for_page(0).version, "1.5");
    assert!(std::ptr::eq(backgrounds.for_page(0), &backgrounds.first));
    assert!(std::ptr::eq(
        backgrounds.for_page(4),
        backgrounds.rest.as_ref().unwrap()
    ));

    let single = Backgrounds::single(create_background_pdf("a"));
    assert!(std::ptr::eq(single.for_page(3), &single.first));
}
