//! Error taxonomy for the sky-chart pipeline.
//!
//! Missing entities are never errors: lookups that fail produce empty
//! results. Numeric edge cases (poles, zenith) are clamped in place. What
//! remains are caller mistakes (bad observer, bad config) and failures of
//! the external collaborators that feed the core.

use thiserror::Error;

pub type SkyResult<T> = Result<T, SkyError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SkyError {
    /// Latitude or longitude outside the valid range, or not finite.
    #[error("Invalid observer: {message}")]
    InvalidObserver { message: String },

    /// A view configuration tunable that would make the pipeline meaningless
    /// (e.g. a zero trajectory step).
    #[error("Invalid view configuration: {message}")]
    InvalidConfig { message: String },

    /// The ephemeris adapter or the catalog store could not supply data.
    /// The core does not retry; the next configuration change recomputes.
    #[error("Upstream data unavailable: {message}")]
    UpstreamUnavailable { message: String },
}

impl SkyError {
    pub fn invalid_observer(message: impl Into<String>) -> Self {
        Self::InvalidObserver {
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
        }
    }

    /// Map a catalog-loading failure into the core taxonomy.
    pub fn from_catalog(error: &anyhow::Error) -> Self {
        Self::upstream(format!("catalog: {error:#}"))
    }
}
