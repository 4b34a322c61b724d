//! Sparsity-inducing penalties and their proximal operators
//!
//! A [`Penalty`](enum.Penalty.html) is either a plain L1 norm with a single
//! weight, or a Sorted-L1 norm with one non-increasing weight per
//! coordinate. Each variant provides
//! - its value $`\mathrm{pen}(w)`$,
//! - its proximal operator
//!   ```math
//!   \mathrm{prox}_{\tau \mathrm{pen}}(y) = \mathrm{arg}\!\min_v \frac12 \|y - v\|_2^2 + \tau \mathrm{pen}(v)
//!   ```
//! - and how far a multiplier lies outside the penalty's dual norm ball.

mod l1;
pub use l1::*;

mod sorted_l1;
pub use sorted_l1::*;

use crate::error::AdmmError;
use ndarray::prelude::*;
use ndarray::NdFloat;
use std::fmt;

/// Tag selecting a penalty without its weights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyKind {
    L1,
    SortedL1,
}

impl fmt::Display for PenaltyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PenaltyKind::L1 => write!(f, "L1"),
            PenaltyKind::SortedL1 => write!(f, "SL1"),
        }
    }
}

/// A validated penalty
#[derive(Debug, Clone, PartialEq)]
pub enum Penalty<S> {
    /// $`\lambda \|w\|_1`$
    L1 { lambda: S },
    /// $`\sum_i \lambda_i |w|_{(i)}`$ with $`\lambda_1 \geq \dots \geq \lambda_K \geq 0`$
    SortedL1 { lambda: Array1<S> },
}

impl<S: NdFloat> Penalty<S> {
    /// L1 penalty, `lambda` must be non-negative
    pub fn l1(lambda: S) -> Result<Self, AdmmError> {
        if !(lambda >= S::zero()) || !lambda.is_finite() {
            return Err(AdmmError::invalid(format!(
                "L1 lambda must be finite and non-negative, got {}",
                lambda
            )));
        }
        Ok(Penalty::L1 { lambda })
    }

    /// Sorted-L1 penalty, `lambda` must be non-empty, non-negative and non-increasing.
    ///
    /// The weights are never re-sorted here.
    pub fn sorted_l1(lambda: Array1<S>) -> Result<Self, AdmmError> {
        if lambda.is_empty() {
            return Err(AdmmError::invalid("SL1 lambda is empty"));
        }
        if lambda.iter().any(|&l| !(l >= S::zero()) || !l.is_finite()) {
            return Err(AdmmError::invalid(
                "SL1 lambda must be finite and non-negative",
            ));
        }
        if lambda.windows(2).into_iter().any(|pair| pair[0] < pair[1]) {
            return Err(AdmmError::invalid("SL1 lambda must be non-increasing"));
        }
        Ok(Penalty::SortedL1 { lambda })
    }

    /// Builds the penalty named by `kind` from a weight sequence,
    /// the L1 penalty takes exactly one weight.
    pub fn new(kind: PenaltyKind, lambda: ArrayView1<S>) -> Result<Self, AdmmError> {
        match kind {
            PenaltyKind::L1 if lambda.len() == 1 => Self::l1(lambda[0]),
            PenaltyKind::L1 => Err(AdmmError::invalid(format!(
                "L1 takes a single lambda, got {} values",
                lambda.len()
            ))),
            PenaltyKind::SortedL1 => Self::sorted_l1(lambda.to_owned()),
        }
    }

    pub fn kind(&self) -> PenaltyKind {
        match self {
            Penalty::L1 { .. } => PenaltyKind::L1,
            Penalty::SortedL1 { .. } => PenaltyKind::SortedL1,
        }
    }

    /// Checks the penalty can act on vectors of length `k`
    pub fn check_dim(&self, k: usize) -> Result<(), AdmmError> {
        match self {
            Penalty::SortedL1 { lambda } if lambda.len() != k => Err(AdmmError::invalid(format!(
                "SL1 lambda has length {} but the problem has dimension {}",
                lambda.len(),
                k
            ))),
            _ => Ok(()),
        }
    }

    /// $`\mathrm{pen}(w)`$
    pub fn value(&self, w: ArrayView1<S>) -> S {
        match self {
            Penalty::L1 { lambda } => l1_norm(w, *lambda),
            Penalty::SortedL1 { lambda } => sorted_l1_norm(w, lambda.view()),
        }
    }

    /// $`\mathrm{prox}_{\tau \mathrm{pen}}(y)`$
    pub fn prox(&self, y: ArrayView1<S>, tau: S) -> Array1<S> {
        match self {
            Penalty::L1 { lambda } => soft_threshold(y, tau * *lambda),
            Penalty::SortedL1 { lambda } => prox_sorted_l1(y, lambda.view(), tau),
        }
    }

    /// Non-negative margin by which `alpha` violates the dual norm ball
    pub fn dual_infeasibility(&self, alpha: ArrayView1<S>) -> S {
        match self {
            Penalty::L1 { lambda } => l1_dual_infeasibility(alpha, *lambda),
            Penalty::SortedL1 { lambda } => sorted_l1_dual_infeasibility(alpha, lambda.view()),
        }
    }
}
