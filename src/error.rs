use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Error type returned by problem construction and by the ADMM solver.
///
/// Reaching the iteration limit is not an error, see
/// [`SolverStatus`](crate::admm::SolverStatus).
#[derive(Error, Debug)]
pub enum AdmmError {
    /// Inputs with incompatible shapes or values, detected before iterating
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A matrix that must be factorized is not positive definite
    #[error("Numerical singularity while factorizing {what}")]
    NumericalSingularity {
        what: &'static str,
        #[source]
        source: LinalgError,
    },
    /// Solver settings rejected by the settings builder
    #[error("Invalid settings: {0}")]
    Settings(String),
}

impl AdmmError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AdmmError::InvalidArgument(msg.into())
    }

    pub(crate) fn singular(what: &'static str) -> impl FnOnce(LinalgError) -> Self {
        move |source| AdmmError::NumericalSingularity { what, source }
    }
}
