use crate::ingest::SourceDocument;
use crate::plan::SplitPlan;
use crate::types::*;
use lopdf::{Dictionary, Document, Object};
use std::collections::HashMap;
use std::path::Path;

/// Page attributes a page may inherit from its ancestors in the page tree.
/// These must be materialized onto copied pages, which lose their ancestry.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// The two output documents of a split.
///
/// Both are fully independent of the source document and of each other;
/// their page order matches the plan they were built from.
#[derive(Debug)]
pub struct DocumentPair {
    /// First pass (odd pages, forward order)
    pub odd: Document,
    /// Second pass (even pages, reversed); zero pages for single-page sources
    pub even: Document,
}

/// Build the two pass documents from a source document and a split plan.
///
/// Every index in the plan is validated against the source page count before
/// any copying starts. The odd document is built first; if it fails, the
/// even document is never attempted and no partial output is returned.
pub async fn partition(source: &SourceDocument, plan: &SplitPlan) -> Result<DocumentPair> {
    let document = source.document().clone();
    let page_count = source.page_count();
    let plan = plan.clone();

    tokio::task::spawn_blocking(move || partition_sync(&document, page_count, &plan)).await?
}

fn partition_sync(source: &Document, page_count: usize, plan: &SplitPlan) -> Result<DocumentPair> {
    for &index in plan.odd.iter().chain(plan.even.iter()) {
        if index >= page_count {
            return Err(DuplexError::InvalidIndex { index, page_count });
        }
    }

    let page_ids: Vec<_> = source.get_pages().values().copied().collect();

    let odd = build_part(source, &page_ids, &plan.odd)?;
    let even = build_part(source, &page_ids, &plan.even)?;

    Ok(DocumentPair { odd, even })
}

/// Build one output document containing the given source pages in order
fn build_part(
    source: &Document,
    page_ids: &[lopdf::ObjectId],
    indices: &[usize],
) -> Result<Document> {
    let mut output = Document::with_version("1.7");
    let pages_id = output.new_object_id();

    // One cache per output document so shared resources (fonts, images)
    // are copied once even when several pages reference them
    let mut cache = HashMap::new();

    let mut page_refs = Vec::with_capacity(indices.len());
    for &index in indices {
        let page_id = copy_page(&mut output, source, page_ids[index], pages_id, &mut cache)?;
        page_refs.push(Object::Reference(page_id));
    }

    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    Ok(output)
}

/// Structurally copy a single page into the output document.
///
/// The page dictionary is deep-copied with all its referenced objects;
/// `Parent` is excluded (it would drag the entire source page tree along)
/// and re-pointed at the output page tree. Attributes the page inherited
/// from its ancestors are materialized onto the copy.
fn copy_page(
    output: &mut Document,
    source: &Document,
    page_id: lopdf::ObjectId,
    parent_id: lopdf::ObjectId,
    cache: &mut HashMap<lopdf::ObjectId, lopdf::ObjectId>,
) -> Result<lopdf::ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;

    let mut new_dict = Dictionary::new();
    for (key, value) in page_dict.iter() {
        if key.as_slice() == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }

    for key in INHERITABLE_KEYS {
        if page_dict.get(key).is_err() {
            if let Some(value) = resolve_inherited(source, page_dict, key) {
                let copied = copy_object_deep(output, source, &value, cache)?;
                new_dict.set(key, copied);
            }
        }
    }

    new_dict.set("Parent", Object::Reference(parent_id));

    Ok(output.add_object(Object::Dictionary(new_dict)))
}

/// Look up an inheritable page attribute by walking up the Parent chain
fn resolve_inherited(source: &Document, page_dict: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut current = page_dict.clone();
    // Parent chains are shallow; the bound guards against malformed cycles
    for _ in 0..32 {
        if let Ok(value) = current.get(key) {
            return Some(value.clone());
        }
        let parent_id = current.get(b"Parent").and_then(|obj| obj.as_reference()).ok()?;
        current = source.get_dictionary(parent_id).ok()?.clone();
    }
    None
}

/// Deep copy an object from source to output document, following references.
/// Uses a cache to avoid copying the same object multiple times.
fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<lopdf::ObjectId, lopdf::ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let referenced = source.get_object(*id)?;

            // Reserve the target id before descending so reference cycles
            // (e.g. annotation back-links) terminate
            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Dictionary(new_dict))
        }
        Object::Array(arr) => {
            let mut new_arr = Vec::with_capacity(arr.len());
            for item in arr {
                new_arr.push(copy_object_deep(output, source, item, cache)?);
            }
            Ok(Object::Array(new_arr))
        }
        Object::Stream(stream) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Stream(lopdf::Stream {
                dict: new_dict,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            }))
        }
        _ => Ok(obj.clone()),
    }
}

/// Serialize a document into a byte buffer
pub async fn pdf_bytes(doc: Document) -> Result<Vec<u8>> {
    let mut doc = doc;
    tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)
            .map_err(|e| DuplexError::Serialization(e.to_string()))?;
        Ok::<_, DuplexError>(writer)
    })
    .await?
}

/// Serialize a document to a file
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = pdf_bytes(doc).await?;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
