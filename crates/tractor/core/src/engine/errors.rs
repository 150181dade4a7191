//! Error types for the dispatch loop.

use crate::attachment::AttachmentError;
use crate::error::{ErrorSeverity, TractorError};
use crate::state::TilePos;

/// Errors surfaced by a dispatch, after actor state has been restored.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("attachment '{attachment}' failed at tile {tile}: {source}")]
    Attachment {
        attachment: &'static str,
        tile: TilePos,
        #[source]
        source: AttachmentError,
    },
}

impl DispatchError {
    /// Name of the attachment that faulted.
    pub fn attachment(&self) -> &'static str {
        match self {
            Self::Attachment { attachment, .. } => attachment,
        }
    }
}

impl TractorError for DispatchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Attachment { source, .. } => source.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Attachment { source, .. } => source.error_code(),
        }
    }
}
