//! Error classification shared by every tractor-core error.
//!
//! Each error enum lives next to the component that raises it and reports a
//! [`ErrorSeverity`] and a stable code through [`TractorError`]. Hosts use the
//! severity to decide whether to keep driving after a failed dispatch.

/// How a host should react to a failed dispatch.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ErrorSeverity {
    /// One tile failed; the next dispatch may well succeed.
    Recoverable,
    /// The rider or configuration is unsuitable until something changes.
    Validation,
    /// An attachment or host adapter broke its own invariants.
    Internal,
    /// The host adapter is unusable.
    Fatal,
}

impl ErrorSeverity {
    /// Transient failures that need no attention beyond a log line.
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Failures after which the host should stop driving the tractor.
    pub const fn halts_host(self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common interface of tractor-core errors.
pub trait TractorError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
