//! Wizard state machine for the manual duplex workflow
//!
//! The steps mirror what the user physically does: load a file, pick how
//! the printer ejects sheets, print the odd pass, flip the stack, print the
//! even pass. The split itself runs on the Configure → ReviewOdd transition;
//! everything after that is paper handling.

use crate::DocumentId;
use pdf_duplex::{DuplexOptions, SplitPlan};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Waiting for a document
    Ingest,
    /// Document loaded, choosing printer output mode
    Configure,
    /// Odd pass ready to print
    ReviewOdd,
    /// Stack handling instructions between passes
    FlipGuide,
    /// Even pass ready to print
    ReviewEven,
    Done,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("step {step:?} does not accept {action}")]
    InvalidTransition {
        step: WizardStep,
        action: &'static str,
    },
}

/// One active duplex job: current step plus everything accumulated so far.
///
/// A session holds at most one document, and the worker it drives processes
/// one command at a time, so at most one split is ever in flight per source.
pub struct Session {
    step: WizardStep,
    document: Option<(DocumentId, usize)>,
    options: DuplexOptions,
    plan: Option<SplitPlan>,
    tip: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Ingest,
            document: None,
            options: DuplexOptions::default(),
            plan: None,
            tip: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn document(&self) -> Option<(DocumentId, usize)> {
        self.document
    }

    pub fn options(&self) -> &DuplexOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut DuplexOptions {
        &mut self.options
    }

    pub fn plan(&self) -> Option<&SplitPlan> {
        self.plan.as_ref()
    }

    /// Advisory text is cosmetic and may arrive at any step
    pub fn set_tip(&mut self, text: String) {
        self.tip = Some(text);
    }

    pub fn tip(&self) -> Option<&str> {
        self.tip.as_deref()
    }

    /// Ingest → Configure
    pub fn document_loaded(
        &mut self,
        doc_id: DocumentId,
        page_count: usize,
    ) -> Result<(), SessionError> {
        if self.step != WizardStep::Ingest {
            return Err(SessionError::InvalidTransition {
                step: self.step,
                action: "document_loaded",
            });
        }
        self.document = Some((doc_id, page_count));
        self.step = WizardStep::Configure;
        Ok(())
    }

    /// Configure → ReviewOdd, once the split results exist
    pub fn parts_ready(&mut self, plan: SplitPlan) -> Result<(), SessionError> {
        if self.step != WizardStep::Configure {
            return Err(SessionError::InvalidTransition {
                step: self.step,
                action: "parts_ready",
            });
        }
        self.plan = Some(plan);
        self.step = WizardStep::ReviewOdd;
        Ok(())
    }

    /// Move forward through the paper-handling steps.
    ///
    /// A document with no even pass skips the flip guide and the even review
    /// entirely; there is nothing to re-feed.
    pub fn advance(&mut self) -> Result<WizardStep, SessionError> {
        self.step = match self.step {
            WizardStep::ReviewOdd if !self.has_even_pass() => WizardStep::Done,
            WizardStep::ReviewOdd => WizardStep::FlipGuide,
            WizardStep::FlipGuide => WizardStep::ReviewEven,
            WizardStep::ReviewEven => WizardStep::Done,
            step => {
                return Err(SessionError::InvalidTransition {
                    step,
                    action: "advance",
                });
            }
        };
        Ok(self.step)
    }

    /// Step back to re-read an earlier instruction
    pub fn back(&mut self) -> Result<WizardStep, SessionError> {
        self.step = match self.step {
            WizardStep::Configure => WizardStep::Ingest,
            WizardStep::ReviewOdd => WizardStep::Configure,
            WizardStep::FlipGuide => WizardStep::ReviewOdd,
            WizardStep::ReviewEven => WizardStep::FlipGuide,
            step => {
                return Err(SessionError::InvalidTransition {
                    step,
                    action: "back",
                });
            }
        };
        Ok(self.step)
    }

    /// Discard the job and return to Ingest. Printer options survive; they
    /// describe the hardware, not the document.
    pub fn reset(&mut self) {
        self.step = WizardStep::Ingest;
        self.document = None;
        self.plan = None;
        self.tip = None;
    }

    fn has_even_pass(&self) -> bool {
        self.plan.as_ref().is_some_and(|p| !p.even.is_empty())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
