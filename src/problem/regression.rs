#![allow(non_snake_case)]

use super::{dual_residual, rho_or_one, QuadraticProgram};
use crate::error::AdmmError;
use crate::float::{cast, AdmmScalar};
use crate::linsys::spectral_norm;
use ndarray::prelude::*;
use ndarray::OwnedRepr;
use ndarray_linalg::cholesky::{CholeskyFactorized, FactorizeC, SolveC};
use ndarray_linalg::UPLO;

/// Penalized least squares on the affine simplex
///
/// ```math
/// \min_w \frac12 \|Y - Xw\|_2^2 + \mathrm{pen}(w) \quad \text{s.t.} \quad e^T w = 1
/// ```
/// so $`Q = X^TX`$ and $`c = X^TY`$. The dual objective is
/// ```math
/// -\frac12 t^T Q^{-1} t + \frac12 Y^TY - \beta, \quad t = c - \alpha - \beta e
/// ```
/// which needs $`Q`$ invertible, i.e. $`X`$ of full column rank.
pub struct Regression<S: AdmmScalar> {
    X: Array2<S>,
    Y: Array1<S>,
    Q: Array2<S>,
    c: Array1<S>,
    Q_factor: CholeskyFactorized<OwnedRepr<S>>,
}

impl<S: AdmmScalar> Regression<S> {
    /// Design matrix `X` is $`N \times K`$, response `Y` has length $`N`$
    pub fn new(X: ArrayView2<S>, Y: ArrayView1<S>) -> Result<Self, AdmmError> {
        if X.nrows() != Y.len() {
            return Err(AdmmError::invalid(format!(
                "X has {} rows but Y has length {}",
                X.nrows(),
                Y.len()
            )));
        }
        if X.nrows() == 0 || X.ncols() == 0 {
            return Err(AdmmError::invalid("X is empty"));
        }
        let Q = X.t().dot(&X);
        let c = X.t().dot(&Y);
        let Q_factor = Q
            .factorizec(UPLO::Lower)
            .map_err(AdmmError::singular("Q = X'X"))?;
        Ok(Regression {
            X: X.to_owned(),
            Y: Y.to_owned(),
            Q,
            c,
            Q_factor,
        })
    }
}

impl<S: AdmmScalar> QuadraticProgram<S> for Regression<S> {
    fn quadratic(&self) -> ArrayView2<'_, S> {
        self.Q.view()
    }

    fn linear(&self) -> ArrayView1<'_, S> {
        self.c.view()
    }

    fn quadratic_term(&self, w: ArrayView1<S>) -> S {
        let resid = &self.Y - &self.X.dot(&w);
        cast::<S>(0.5) * resid.dot(&resid)
    }

    fn dual_offset(&self) -> S {
        cast::<S>(0.5) * self.Y.dot(&self.Y)
    }

    fn dual_objective(&self, alpha: ArrayView1<S>, beta: S) -> Result<S, AdmmError> {
        let tmp = dual_residual(self.c.view(), alpha, beta);
        let Qinv_tmp = self
            .Q_factor
            .solvec(&tmp)
            .map_err(AdmmError::singular("Q = X'X"))?;
        Ok(-cast::<S>(0.5) * tmp.dot(&Qinv_tmp) + self.dual_offset() - beta)
    }

    /// $`\|X\|_2 = \sqrt{\|Q\|_2}`$
    fn default_rho(&self) -> Result<S, AdmmError> {
        spectral_norm(self.X.view()).map(rho_or_one)
    }
}
