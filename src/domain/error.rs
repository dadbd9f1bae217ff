//! Error taxonomy for the image resolution pipeline
//!
//! None of these variants ever reach a caller of `resolve_image_set`; they
//! classify internal recovery paths for logging and tests.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageServiceError {
    /// A candidate URL was unreachable or not HTTPS; recovered by
    /// substituting the placeholder for that slot.
    #[error("validation failed for candidate url: {url}")]
    ValidationFailed { url: String },

    /// The slot-generation sub-operation failed; recovered by treating the
    /// slot as invalid.
    #[error("slot {slot} generation failed: {reason}")]
    GenerationFailed { slot: usize, reason: String },

    /// The overall rebuild failed unexpectedly; recovered by returning the
    /// all-placeholder fallback set.
    #[error("image set regeneration failed: {0}")]
    RegenerationFailed(String),
}
