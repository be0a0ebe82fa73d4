use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// First bytes of every valid PDF file
pub const PDF_MAGIC: &[u8] = b"%PDF";

/// A parsed, page-addressable source document.
///
/// The partitioner only ever reads pages from it; the wrapped document is
/// never mutated after construction.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    document: Document,
    page_count: usize,
}

impl SourceDocument {
    /// Parse a byte buffer into a source document.
    ///
    /// The signature check runs before the full parse and short-circuits on
    /// garbage input, so the parser only ever sees plausible PDF bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(DuplexError::InvalidInput("empty input".to_string()));
        }
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(DuplexError::InvalidInput(
                "missing %PDF signature".to_string(),
            ));
        }

        let document = Document::load_mem(bytes).map_err(DuplexError::Parse)?;
        let page_count = document.get_pages().len();

        Ok(Self {
            document,
            page_count,
        })
    }

    /// Load a source document from a file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let bytes = tokio::fs::read(&path).await?;
        tokio::task::spawn_blocking(move || Self::from_bytes(&bytes)).await?
    }

    /// Authoritative page count from the parsed structure
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}
