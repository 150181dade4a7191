//! Tool invocation errors.

use crate::error::{ErrorSeverity, TractorError};
use crate::state::{EntityId, TilePos};

/// Errors raised by the host while performing a tool effect.
///
/// These are faults, not declines: a host that simply has nothing to do on a
/// tile reports `Ok(false)` (or the attachment declines before calling it).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvocationError {
    /// The actor has nothing in the selected slot that the effect needs.
    #[error("actor has no usable tool or item selected")]
    NothingSelected,

    /// The targeted entity disappeared between query and invocation.
    #[error("target {0} no longer exists")]
    TargetMissing(EntityId),

    /// The host refused the effect on this tile.
    #[error("host rejected effect at {tile}: {reason}")]
    Rejected { tile: TilePos, reason: String },

    /// The host adapter failed in a way it cannot recover from.
    #[error("host adapter failure: {0}")]
    Host(String),
}

impl TractorError for InvocationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NothingSelected => ErrorSeverity::Validation,
            Self::TargetMissing(_) | Self::Rejected { .. } => ErrorSeverity::Recoverable,
            Self::Host(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NothingSelected => "INVOCATION_NOTHING_SELECTED",
            Self::TargetMissing(_) => "INVOCATION_TARGET_MISSING",
            Self::Rejected { .. } => "INVOCATION_REJECTED",
            Self::Host(_) => "INVOCATION_HOST_FAILURE",
        }
    }
}
