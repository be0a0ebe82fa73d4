mod session;
mod store;
mod tip;
mod worker;

pub use session::{Session, SessionError, WizardStep};
pub use store::DocumentStore;
pub use tip::{FALLBACK_TIP, TipClient, TipConfig};
pub use worker::worker_task;

use std::path::PathBuf;

// Re-export types from the core crate
pub use pdf_duplex::{DuplexOptions, OutputMode, SplitPlan, SplitStatistics};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum DuplexCommand {
    LoadDocument {
        path: PathBuf,
    },
    Split {
        doc_id: DocumentId,
    },
    FetchTip {
        page_count: usize,
    },
    CloseDocument {
        doc_id: DocumentId,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum DuplexUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    DocumentLoaded {
        doc_id: DocumentId,
        page_count: usize,
    },
    StatsCalculated {
        stats: SplitStatistics,
    },
    /// Both passes, serialized; the even buffer holds zero pages for
    /// single-page sources
    PartsReady {
        doc_id: DocumentId,
        plan: SplitPlan,
        odd: Vec<u8>,
        even: Vec<u8>,
    },
    TipReady {
        text: String,
    },
    DocumentClosed {
        doc_id: DocumentId,
    },
    Error {
        message: String,
    },
}

/// Handle to a loaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);
