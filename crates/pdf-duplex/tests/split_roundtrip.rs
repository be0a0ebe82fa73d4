//! End-to-end splits over in-memory documents: ingest, plan, partition,
//! serialize, reload, and verify page counts and content.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};
use pdf_duplex::{DuplexError, SourceDocument, SplitPlan, partition, pdf_bytes, plan_split, save_pdf};

/// Serialized N-page PDF with a distinct text marker per page
fn test_pdf_bytes(num_pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    for i in 0..num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                ),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Marker {}", i + 1).into_bytes(),
                        StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn page_marker(doc: &Document, page_number: u32) -> String {
    let pages = doc.get_pages();
    let page_id = pages[&page_number];
    let page_dict = doc.get_dictionary(page_id).unwrap();
    let content_id = page_dict
        .get(b"Contents")
        .and_then(|obj| obj.as_reference())
        .unwrap();
    let stream = doc
        .get_object(content_id)
        .and_then(|obj| obj.as_stream())
        .unwrap();
    String::from_utf8_lossy(&stream.content).into_owned()
}

#[tokio::test]
async fn split_five_page_document() {
    let bytes = test_pdf_bytes(5);
    let source = SourceDocument::from_bytes(&bytes).unwrap();
    assert_eq!(source.page_count(), 5);

    let plan = plan_split(source.page_count());
    let pair = partition(&source, &plan).await.unwrap();

    let odd_bytes = pdf_bytes(pair.odd).await.unwrap();
    let even_bytes = pdf_bytes(pair.even).await.unwrap();
    assert!(odd_bytes.starts_with(b"%PDF"));
    assert!(even_bytes.starts_with(b"%PDF"));

    let odd = Document::load_mem(&odd_bytes).unwrap();
    let even = Document::load_mem(&even_bytes).unwrap();
    assert_eq!(odd.get_pages().len(), plan.odd.len());
    assert_eq!(even.get_pages().len(), plan.even.len());

    // Odd pass forward, even pass reversed
    assert!(page_marker(&odd, 1).contains("Marker 1"));
    assert!(page_marker(&odd, 2).contains("Marker 3"));
    assert!(page_marker(&odd, 3).contains("Marker 5"));
    assert!(page_marker(&even, 1).contains("Marker 4"));
    assert!(page_marker(&even, 2).contains("Marker 2"));
}

#[tokio::test]
async fn garbage_bytes_are_rejected_before_parsing() {
    let err = SourceDocument::from_bytes(b"<html>not a pdf</html>").unwrap_err();
    assert!(matches!(err, DuplexError::InvalidInput(_)));
}

#[tokio::test]
async fn out_of_range_plan_is_rejected() {
    let bytes = test_pdf_bytes(3);
    let source = SourceDocument::from_bytes(&bytes).unwrap();

    let bad_plan = SplitPlan {
        odd: vec![0, 2],
        even: vec![5],
    };
    let err = partition(&source, &bad_plan).await.unwrap_err();
    assert!(matches!(err, DuplexError::InvalidIndex { index: 5, .. }));
}

#[tokio::test]
async fn save_and_reload_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.pdf");
    tokio::fs::write(&input_path, test_pdf_bytes(4)).await.unwrap();

    let source = SourceDocument::load(&input_path).await.unwrap();
    let plan = plan_split(source.page_count());
    let pair = partition(&source, &plan).await.unwrap();

    let odd_path = dir.path().join("input-odd.pdf");
    save_pdf(pair.odd, &odd_path).await.unwrap();

    let reloaded = SourceDocument::load(&odd_path).await.unwrap();
    assert_eq!(reloaded.page_count(), 2);
}

#[tokio::test]
async fn missing_file_surfaces_io_error() {
    let err = SourceDocument::load("/nonexistent/input.pdf").await.unwrap_err();
    assert!(matches!(err, DuplexError::Io(_)));
}
