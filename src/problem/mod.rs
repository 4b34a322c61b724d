//! Quadratic objectives solved under $`e^T w = 1`$
//!
//! Every problem here has the form
//! ```math
//! \min_w \; \frac12 w^T Q w - c^T w + \mathrm{const} + \mathrm{pen}(w) \quad \text{s.t.} \quad e^T w = 1
//! ```
//! and only differs in how $`Q`$, $`c`$ and the constant are built from
//! user data. The solver sees them through [`QuadraticProgram`](trait.QuadraticProgram.html).

mod portfolio;
pub use portfolio::*;

mod regression;
pub use regression::*;

use crate::error::AdmmError;
use crate::float::AdmmScalar;
use ndarray::prelude::*;
use num_traits::Float;

/// Problem data the ADMM solver needs, independent of where it came from
pub trait QuadraticProgram<S: AdmmScalar> {
    /// Number of weights $`K`$
    fn dim(&self) -> usize {
        self.linear().len()
    }

    /// $`Q`$, symmetric positive (semi)definite $`K \times K`$
    fn quadratic(&self) -> ArrayView2<'_, S>;

    /// $`c`$
    fn linear(&self) -> ArrayView1<'_, S>;

    /// Smooth part of the primal objective at `w`
    fn quadratic_term(&self, w: ArrayView1<S>) -> S;

    /// Constant of the smooth part, only shifts reported objective values
    fn dual_offset(&self) -> S;

    /// Dual objective for multipliers $`\alpha`$ of $`w = v`$ and
    /// $`\beta`$ of $`e^T w = 1`$
    fn dual_objective(&self, alpha: ArrayView1<S>, beta: S) -> Result<S, AdmmError>;

    /// Step parameter $`\rho`$ used when none is configured
    fn default_rho(&self) -> Result<S, AdmmError>;
}

/// User data of one of the supported problems
#[derive(Debug, Clone)]
pub enum ProblemData<'a, S> {
    /// $`\min \frac12 \|Y - Xw\|_2^2`$
    Regression {
        x: ArrayView2<'a, S>,
        y: ArrayView1<'a, S>,
    },
    /// $`\min \frac{\phi}2 w^T \Sigma w - \mu^T w`$
    Portfolio {
        sigma: ArrayView2<'a, S>,
        mu: ArrayView1<'a, S>,
        phi: S,
    },
}

/// $`c - \alpha - \beta e`$
pub(crate) fn dual_residual<S: AdmmScalar>(c: ArrayView1<S>, alpha: ArrayView1<S>, beta: S) -> Array1<S> {
    let mut tmp = &c - &alpha;
    tmp -= beta;
    tmp
}

/// A spectral estimate of $`\rho`$, falling back to one when the data is all zeros
pub(crate) fn rho_or_one<S: AdmmScalar>(estimate: S) -> S {
    if estimate > S::zero() && Float::is_finite(estimate) {
        estimate
    } else {
        S::one()
    }
}

pub(crate) fn check_symmetric<S: AdmmScalar>(name: &str, a: ArrayView2<S>) -> Result<(), AdmmError> {
    if !a.is_square() {
        return Err(AdmmError::invalid(format!(
            "{} must be square, got {}x{}",
            name,
            a.nrows(),
            a.ncols()
        )));
    }
    let tol = Float::sqrt(<S as Float>::epsilon());
    for ((i, j), &aij) in a.indexed_iter() {
        let aji = a[[j, i]];
        let scale = Float::max(S::one(), Float::max(Float::abs(aij), Float::abs(aji)));
        if Float::abs(aij - aji) > tol * scale {
            return Err(AdmmError::invalid(format!("{} is not symmetric", name)));
        }
    }
    Ok(())
}
