//! Cached factorization of the ADMM primal update
//!
//! The $`w`$-update solves
//! ```math
//! \left(Q + \rho (I + ee^T)\right) w = c - \alpha - \beta e + \rho (v + e)
//! ```
//! whose matrix stays fixed while $`\rho`$ does, so it is Cholesky
//! factorized once per run and every iteration costs two triangular solves.

use crate::error::AdmmError;
use crate::float::AdmmScalar;
use ndarray::prelude::*;
use ndarray::OwnedRepr;
use ndarray_linalg::cholesky::{CholeskyFactorized, FactorizeC, SolveC};
use ndarray_linalg::svd::SVD;
use ndarray_linalg::UPLO;
use num_traits::Float;

/// Cholesky factor of $`M = Q + \rho (I + ee^T)`$ for a fixed $`\rho`$.
///
/// A change of $`\rho`$ requires a new cache.
pub struct LinearSystemCache<S: AdmmScalar> {
    factor: CholeskyFactorized<OwnedRepr<S>>,
    rho: S,
}

impl<S: AdmmScalar> LinearSystemCache<S> {
    /// Forms and factorizes $`M`$, fails with
    /// [`NumericalSingularity`](../enum.AdmmError.html) if it is not positive definite.
    pub fn new(q: ArrayView2<S>, rho: S) -> Result<Self, AdmmError> {
        if !q.is_square() {
            return Err(AdmmError::invalid(format!(
                "Q must be square, got {}x{}",
                q.nrows(),
                q.ncols()
            )));
        }
        // rho * ee^T on every entry, plus rho * I on the diagonal
        let mut m = q.mapv(|qij| qij + rho);
        m.diag_mut().mapv_inplace(|mii| mii + rho);
        let factor = m
            .factorizec(UPLO::Lower)
            .map_err(AdmmError::singular("M = Q + rho (I + ee')"))?;
        Ok(LinearSystemCache { factor, rho })
    }

    pub fn rho(&self) -> S {
        self.rho
    }

    /// $`x = M^{-1} b`$
    pub fn solve(&self, rhs: &Array1<S>) -> Result<Array1<S>, AdmmError> {
        self.factor
            .solvec(rhs)
            .map_err(AdmmError::singular("M = Q + rho (I + ee')"))
    }
}

/// Largest singular value $`\|A\|_2`$
pub fn spectral_norm<S: AdmmScalar>(a: ArrayView2<S>) -> Result<S, AdmmError> {
    let (_, sigma, _) = a
        .svd(false, false)
        .map_err(AdmmError::singular("spectral norm (SVD)"))?;
    Ok(sigma.fold(S::zero(), |acc, &s| Float::max(acc, s)))
}
