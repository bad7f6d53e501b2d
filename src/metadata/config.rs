//! Configuration for building a document model
//!
//! The builder aborts on the first failing entity by default. A lenient configuration
//! skips failing entities instead and records every failure in the model.

/// What to do when a single resource, module or project cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Return the first failure in document order
    #[default]
    Abort,
    /// Leave the entity out of the model and record the failure
    Skip,
}

/// Configuration for [`crate::build_model_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildConfig {
    /// Handling of entities that fail to decode
    pub error_policy: ErrorPolicy,

    /// Decode the items of each collection on the rayon thread pool.
    /// The resulting model is identical to a sequential build.
    pub parallel: bool,
}

impl BuildConfig {
    /// Aborts on the first failure, decodes sequentially (same as `default()`)
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Skips failing entities and records them in [`crate::DocumentModel::failures`]
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            error_policy: ErrorPolicy::Skip,
            parallel: false,
        }
    }

    /// Aborts on the first failure, decodes in parallel
    #[must_use]
    pub fn parallel() -> Self {
        Self {
            error_policy: ErrorPolicy::Abort,
            parallel: true,
        }
    }

    /// Returns a copy with the given error policy
    #[must_use]
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    /// Returns a copy with parallel decoding switched on or off
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
