use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuplexError {
    #[error("not a PDF: {0}")]
    InvalidInput(String),
    #[error("failed to parse PDF: {0}")]
    Parse(#[source] lopdf::Error),
    #[error("page index {index} out of range for document with {page_count} pages")]
    InvalidIndex { index: usize, page_count: usize },
    #[error("failed to serialize output document: {0}")]
    Serialization(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, DuplexError>;

/// How the printer ejects a printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputMode {
    /// Printed side visible on the output stack
    FaceUp,
    /// Printed side hidden on the output stack (most laser printers)
    #[default]
    FaceDown,
}

/// How the stack goes back into the input tray before the second pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReinsertOrientation {
    /// Same orientation it came out in
    Normal,
    /// Rotated 180 degrees as a block
    #[default]
    Rotated180,
}

/// Which edge the page content flips around on the back side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlipEdge {
    #[default]
    ShortEdge,
    LongEdge,
}

/// Statistics about a planned split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Pages printed in the first pass
    pub odd_pages: usize,
    /// Pages printed in the second pass
    pub even_pages: usize,
    /// Physical sheets of paper consumed
    pub sheets: usize,
    /// Whether a second pass exists at all
    pub needs_even_pass: bool,
    /// Whether the last sheet keeps a blank back side
    pub last_sheet_blank_back: bool,
}
