use crate::DocumentId;
use pdf_duplex::SourceDocument;
use std::collections::HashMap;

static NEXT_DOC_ID: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Loaded source documents, keyed by handle.
///
/// Owned by the worker task; documents stay resident until the caller closes
/// them, so a failed split can be retried without re-uploading.
pub struct DocumentStore {
    documents: HashMap<u64, SourceDocument>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    pub fn insert(&mut self, doc: SourceDocument) -> DocumentId {
        let id = NEXT_DOC_ID.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.documents.insert(id, doc);
        DocumentId(id)
    }

    pub fn get(&self, id: DocumentId) -> Option<&SourceDocument> {
        self.documents.get(&id.0)
    }

    pub fn remove(&mut self, id: DocumentId) -> Option<SourceDocument> {
        self.documents.remove(&id.0)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
