use crate::admm::{Admm, AdmmSettings, AdmmSolution, IterationInfo};
use crate::error::AdmmError;
use crate::float::AdmmScalar;
use crate::problem::{Portfolio, ProblemData, Regression};
use crate::prox::{Penalty, PenaltyKind};
use ndarray::prelude::*;

/// Penalized problem on the affine simplex, solved by ADMM
///
/// ```math
/// \min_w q(w) + \mathrm{pen}(w) \quad \text{s.t.} \quad \sum_i w_i = 1
/// ```
///
/// Parameters
/// ----------
/// - __data:__      regression $`(X, Y)`$ or portfolio $`(\Sigma, \mu, \phi)`$
/// - __kind:__      penalty type, L1 takes a single `lambda`
/// - __lambda:__    penalty weights, non-increasing and of length $`K`$ for Sorted-L1
/// - __settings:__  solver options
/// - __init_w:__    starting weights, uniform if `None`
/// - __callback:__  called once per iteration, returning true stops the solver
///
/// All argument checks happen before the first iteration. Hitting the
/// iteration limit is reported through `status`, not as an error.
///
/// ```ignore
/// let res = solve(
///     ProblemData::Regression { x: X.view(), y: Y.view() },
///     PenaltyKind::L1,
///     array![0.01].view(),
///     &AdmmSettings::default(),
///     None,
///     nop,
/// )?;
/// ```
pub fn solve<S: AdmmScalar>(
    data: ProblemData<S>,
    kind: PenaltyKind,
    lambda: ArrayView1<S>,
    settings: &AdmmSettings<S>,
    init_w: Option<ArrayView1<S>>,
    callback: impl FnMut(&IterationInfo<S>) -> bool,
) -> Result<AdmmSolution<S>, AdmmError> {
    let penalty = Penalty::new(kind, lambda)?;
    match data {
        ProblemData::Regression { x, y } => {
            solve_regression(x, y, penalty, settings, init_w, callback)
        }
        ProblemData::Portfolio { sigma, mu, phi } => {
            solve_portfolio(sigma, mu, phi, penalty, settings, init_w, callback)
        }
    }
}

/// Penalized least squares $`\frac12 \|Y - Xw\|_2^2 + \mathrm{pen}(w)`$ with $`e^T w = 1`$
#[allow(non_snake_case)]
pub fn solve_regression<S: AdmmScalar>(
    X: ArrayView2<S>,
    Y: ArrayView1<S>,
    penalty: Penalty<S>,
    settings: &AdmmSettings<S>,
    init_w: Option<ArrayView1<S>>,
    callback: impl FnMut(&IterationInfo<S>) -> bool,
) -> Result<AdmmSolution<S>, AdmmError> {
    let prob = Regression::new(X, Y)?;
    Admm::new(prob, penalty, settings.clone())?.run(init_w, callback)
}

/// Penalized mean-variance portfolio $`\frac{\phi}2 w^T \Sigma w - \mu^T w + \mathrm{pen}(w)`$ with $`e^T w = 1`$
pub fn solve_portfolio<S: AdmmScalar>(
    sigma: ArrayView2<S>,
    mu: ArrayView1<S>,
    phi: S,
    penalty: Penalty<S>,
    settings: &AdmmSettings<S>,
    init_w: Option<ArrayView1<S>>,
    callback: impl FnMut(&IterationInfo<S>) -> bool,
) -> Result<AdmmSolution<S>, AdmmError> {
    let prob = Portfolio::new(sigma, mu, phi)?;
    Admm::new(prob, penalty, settings.clone())?.run(init_w, callback)
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::admm::{nop, AdmmSettingsBuilder, SolverStatus};
    use approx::assert_abs_diff_eq;

    #[test]
    fn regression_entry_point() {
        let X = Array2::eye(2);
        let Y = array![1., 0.];
        let res = solve(
            ProblemData::Regression {
                x: X.view(),
                y: Y.view(),
            },
            PenaltyKind::L1,
            array![0.01].view(),
            &AdmmSettings::default(),
            None,
            nop,
        )
        .unwrap();
        assert_eq!(res.status.to_string(), "Optimal");
        assert_abs_diff_eq!(res.w, array![1., 0.], epsilon = 1e-2);
    }

    #[test]
    fn portfolio_entry_point() {
        let sigma = Array2::eye(3);
        let mu = Array1::zeros(3);
        let data = ProblemData::Portfolio {
            sigma: sigma.view(),
            mu: mu.view(),
            phi: 1.,
        };
        let lambda = array![0.3, 0.2, 0.1];

        let res = solve(
            data.clone(),
            PenaltyKind::SortedL1,
            lambda.view(),
            &AdmmSettings::default(),
            None,
            nop,
        )
        .unwrap();
        assert_eq!(res.status, SolverStatus::Optimal);
        assert_abs_diff_eq!(res.w, Array1::from_elem(3, 1. / 3.), epsilon = 1e-4);

        let settings = AdmmSettingsBuilder::default()
            .max_iter(1)
            .rho(1.)
            .build()
            .unwrap();
        let res = solve(data, PenaltyKind::SortedL1, lambda.view(), &settings, None, nop).unwrap();
        assert_eq!(res.status.to_string(), "Iteration limit reached");
        assert_abs_diff_eq!(res.w, Array1::from_elem(3, 1. / 15.), epsilon = 1e-12);
    }

    #[test]
    fn mismatched_lambda_fails_before_iterating() {
        let sigma = Array2::eye(3);
        let mu = Array1::zeros(3);
        let mut calls = 0;
        let res = solve(
            ProblemData::Portfolio {
                sigma: sigma.view(),
                mu: mu.view(),
                phi: 1.,
            },
            PenaltyKind::SortedL1,
            array![0.3, 0.2].view(),
            &AdmmSettings::default(),
            None,
            |_| {
                calls += 1;
                false
            },
        );
        assert!(matches!(res, Err(AdmmError::InvalidArgument(_))));
        assert_eq!(calls, 0);

        let res = solve(
            ProblemData::Portfolio {
                sigma: sigma.view(),
                mu: mu.view(),
                phi: 1.,
            },
            PenaltyKind::L1,
            array![0.3, 0.2, 0.1].view(),
            &AdmmSettings::default(),
            None,
            nop,
        );
        assert!(matches!(res, Err(AdmmError::InvalidArgument(_))));
    }

    #[test]
    fn unsorted_lambda_is_not_resorted() {
        let X = Array2::eye(2);
        let Y = array![0.5, 0.5];
        let res = solve(
            ProblemData::Regression {
                x: X.view(),
                y: Y.view(),
            },
            PenaltyKind::SortedL1,
            array![0.1, 0.2].view(),
            &AdmmSettings::default(),
            None,
            nop,
        );
        assert!(matches!(res, Err(AdmmError::InvalidArgument(_))));
    }

    #[test]
    fn singular_design_is_reported() {
        let X = array![[1., 1.], [0., 0.]];
        let Y = array![1., 0.];
        let res = solve_regression(
            X.view(),
            Y.view(),
            Penalty::l1(0.1).unwrap(),
            &AdmmSettings::default(),
            None,
            nop,
        );
        assert!(matches!(res, Err(AdmmError::NumericalSingularity { .. })));
    }
}
