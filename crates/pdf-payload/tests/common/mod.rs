#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream};
use std::path::Path;

pub fn create_test_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for i in 0..num_pages {
        let content = format!("BT /F1 12 Tf 72 720 Td (Seite {}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(595),
                    Object::Integer(842),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(Dictionary::from_iter(vec![
        ("Title", Object::string_literal("Rechnung")),
        ("Author", Object::string_literal("Buchhaltung")),
        ("Creator", Object::string_literal("fixture")),
    ]));
    doc.trailer.set("Info", info_id);

    doc
}

pub fn write_pdf(doc: &mut Document, path: &Path) {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(path, writer).unwrap();
}

/// Write a test document carrying `value` under `key` in its information dictionary
pub fn write_pdf_with_info(path: &Path, key: &str, value: &str) {
    let mut doc = create_test_pdf(1);
    let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
    doc.get_object_mut(info_id)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set(key, Object::string_literal(value));
    write_pdf(&mut doc, path);
}
