//! Error types for presentation edits

use thiserror::Error;

use super::presentation::{BlockKind, SlideId};

/// Errors surfaced by the presentation model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresentationError {
    /// Slide not found in the presentation
    #[error("slide not found: {0}")]
    SlideNotFound(SlideId),

    /// Replacement content does not fit the block's kind
    #[error("content of kind {got} cannot replace a {expected} block")]
    KindMismatch { expected: BlockKind, got: BlockKind },
}
