//! Re-insertion instructions between the two print passes
//!
//! The index math is identical for every printer; what differs is how the
//! user must handle the stack before feeding it back in, and that depends on
//! whether the printer ejects sheets printed-side up or down.

use crate::types::OutputMode;

/// Step-by-step handling instructions for the printed stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReinsertGuide {
    pub output_mode: OutputMode,
    /// Ordered handling steps, tray to tray
    pub steps: Vec<&'static str>,
    /// The one instruction that must not be gotten wrong
    pub summary: &'static str,
    /// Why the second document looks backwards in a viewer
    pub note: &'static str,
}

/// Build the handling instructions for a printer output mode
pub fn reinsert_guide(mode: OutputMode) -> ReinsertGuide {
    let (flip_step, summary) = match mode {
        OutputMode::FaceDown => (
            "Rotate the stack 180 degrees flat on the table, without turning it over",
            "Your printer ejects sheets printed-side down. Take the stack exactly as it \
             came out, rotate it 180 degrees so the top edge now feeds first, and put it \
             back in the input tray. Do NOT flip it over.",
        ),
        OutputMode::FaceUp => (
            "Turn the stack over (printed side down), then rotate it 180 degrees",
            "Your printer ejects sheets printed-side up. Turn the whole stack over so the \
             printed side faces down, rotate it 180 degrees so the bottom edge feeds \
             first, and put it back in the input tray.",
        ),
    };

    ReinsertGuide {
        output_mode: mode,
        steps: vec![
            "Take the printed stack out of the output tray without shuffling it",
            flip_step,
            "Re-insert the stack into the input tray and print the second document",
        ],
        summary,
        note: "The even pages are emitted in reverse order on purpose, so they line up \
               with the re-inserted stack.",
    }
}
