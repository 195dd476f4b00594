//! Error taxonomy for the engine: configuration errors abort before the
//! first generation; invariant violations are programming bugs that abort
//! via assertion (see the `debug_assert!`/`assert!` call sites in
//! `sade.rs` and `selector`), not via this enum.

/// Recognized misconfiguration of a [`crate::SadeConfig`] or its ranges.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required option `{0}`")]
    MissingRequiredField(&'static str),

    #[error("range {dim} has lb >= ub")]
    InvalidRange { dim: usize },

    #[error("invalid parameter for selector `{selector}`: {reason}")]
    InvalidSelectorParams {
        selector: &'static str,
        reason: &'static str,
    },

    #[error("population size {np} is smaller than the minimum required {min}")]
    PopulationTooSmall { np: usize, min: usize },

    #[error("theta must be in [0, 1], got {0}")]
    InvalidTheta(f64),
}

/// Top-level failure returned by [`crate::DifferentialEvolutionDriver::solve`]
/// and [`crate::SadeDriver::solve`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invariant violated: {0}")]
    Aborted(String),
}
