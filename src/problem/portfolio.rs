use super::{check_symmetric, dual_residual, rho_or_one, QuadraticProgram};
use crate::error::AdmmError;
use crate::float::{cast, AdmmScalar};
use crate::linsys::spectral_norm;
use ndarray::prelude::*;
use ndarray::OwnedRepr;
use ndarray_linalg::cholesky::{CholeskyFactorized, FactorizeC, SolveC};
use ndarray_linalg::UPLO;
use num_traits::Float;

/// Penalized mean-variance portfolio with fully invested weights
///
/// ```math
/// \min_w \frac{\phi}2 w^T \Sigma w - \mu^T w + \mathrm{pen}(w) \quad \text{s.t.} \quad e^T w = 1
/// ```
/// with risk aversion $`\phi > 0`$, so $`Q = \phi \Sigma`$ and $`c = \mu`$.
/// The dual objective is
/// ```math
/// -\frac{1}{2\phi} t^T \Sigma^{-1} t - \beta, \quad t = \mu - \alpha - \beta e
/// ```
pub struct Portfolio<S: AdmmScalar> {
    sigma: Array2<S>,
    mu: Array1<S>,
    phi: S,
    q: Array2<S>,
    sigma_factor: CholeskyFactorized<OwnedRepr<S>>,
}

impl<S: AdmmScalar> Portfolio<S> {
    /// `sigma` is a symmetric positive definite covariance, `mu` the expected returns
    pub fn new(sigma: ArrayView2<S>, mu: ArrayView1<S>, phi: S) -> Result<Self, AdmmError> {
        check_symmetric("Sigma", sigma)?;
        if sigma.nrows() != mu.len() {
            return Err(AdmmError::invalid(format!(
                "Sigma is {}x{} but mu has length {}",
                sigma.nrows(),
                sigma.ncols(),
                mu.len()
            )));
        }
        if mu.is_empty() {
            return Err(AdmmError::invalid("mu is empty"));
        }
        if !(phi > S::zero()) || !Float::is_finite(phi) {
            return Err(AdmmError::invalid(format!(
                "phi must be positive and finite, got {}",
                phi
            )));
        }
        let sigma_factor = sigma
            .factorizec(UPLO::Lower)
            .map_err(AdmmError::singular("Sigma"))?;
        Ok(Portfolio {
            sigma: sigma.to_owned(),
            mu: mu.to_owned(),
            phi,
            q: sigma.mapv(|s| s * phi),
            sigma_factor,
        })
    }

    pub fn phi(&self) -> S {
        self.phi
    }
}

impl<S: AdmmScalar> QuadraticProgram<S> for Portfolio<S> {
    fn quadratic(&self) -> ArrayView2<'_, S> {
        self.q.view()
    }

    fn linear(&self) -> ArrayView1<'_, S> {
        self.mu.view()
    }

    fn quadratic_term(&self, w: ArrayView1<S>) -> S {
        let risk = w.dot(&self.sigma.dot(&w));
        cast::<S>(0.5) * self.phi * risk - self.mu.dot(&w)
    }

    fn dual_offset(&self) -> S {
        S::zero()
    }

    fn dual_objective(&self, alpha: ArrayView1<S>, beta: S) -> Result<S, AdmmError> {
        let tmp = dual_residual(self.mu.view(), alpha, beta);
        let sigma_inv_tmp = self
            .sigma_factor
            .solvec(&tmp)
            .map_err(AdmmError::singular("Sigma"))?;
        Ok(-(cast::<S>(0.5) / self.phi) * tmp.dot(&sigma_inv_tmp) - beta)
    }

    /// $`\|\sqrt{\phi} \Sigma\|_2 = \sqrt{\phi} \|\Sigma\|_2`$
    fn default_rho(&self) -> Result<S, AdmmError> {
        let norm = spectral_norm(self.sigma.view())?;
        Ok(rho_or_one(Float::sqrt(self.phi) * norm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn diag_problem() -> Portfolio<f64> {
        let sigma = array![[2., 0.], [0., 4.]];
        let mu = array![1., 1.];
        Portfolio::new(sigma.view(), mu.view(), 0.5).unwrap()
    }

    #[test]
    fn scales_covariance() {
        let prob = diag_problem();
        assert_abs_diff_eq!(prob.quadratic(), array![[1., 0.], [0., 2.]]);
        assert_abs_diff_eq!(prob.linear(), array![1., 1.]);
        assert_abs_diff_eq!(prob.quadratic_term(array![1., 1.].view()), -0.5);
        assert_eq!(prob.dual_offset(), 0.);
        assert_eq!(prob.phi(), 0.5);
        // sqrt(0.5) * 4
        assert_abs_diff_eq!(prob.default_rho().unwrap(), 2. * 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn weak_duality() {
        let prob = diag_problem();
        let w = array![0.5, 0.5];
        let alpha = Array1::zeros(2);
        let dual = prob.dual_objective(alpha.view(), 0.3).unwrap();
        assert_abs_diff_eq!(dual, -0.6675, epsilon = 1e-12);
        assert!(dual <= prob.quadratic_term(w.view()));
    }

    #[test]
    fn rejects_bad_inputs() {
        let sigma = Array2::<f64>::eye(3);
        let mu = Array1::zeros(2);
        assert!(matches!(
            Portfolio::new(sigma.view(), mu.view(), 1.),
            Err(AdmmError::InvalidArgument(_))
        ));
        let mu = Array1::zeros(3);
        assert!(Portfolio::new(sigma.view(), mu.view(), 0.).is_err());
        assert!(Portfolio::new(sigma.view(), mu.view(), -1.).is_err());

        let skew = array![[1., 0.5], [0., 1.]];
        assert!(matches!(
            Portfolio::new(skew.view(), array![0., 0.].view(), 1.),
            Err(AdmmError::InvalidArgument(_))
        ));
    }

    #[test]
    fn singular_covariance() {
        let sigma = array![[1., 1.], [1., 1.]];
        let mu = array![0.1, 0.2];
        assert!(matches!(
            Portfolio::new(sigma.view(), mu.view(), 1.),
            Err(AdmmError::NumericalSingularity { .. })
        ));
    }
}
