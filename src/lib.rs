//! The `ndarray-admm` crate solves penalized quadratic problems whose
//! weights must sum to one,
//! ```math
//! \min_w q(w) + \mathrm{pen}(w) \quad \text{s.t.} \quad \sum_i w_i = 1,
//! ```
//! with the Alternating Direction Method of Multipliers.
//!
//! Supported problems:
//! - penalized least squares, $`q(w) = \frac12 \|Y - Xw\|_2^2`$
//! - penalized mean-variance portfolios, $`q(w) = \frac{\phi}2 w^T \Sigma w - \mu^T w`$
//!
//! Supported penalties:
//! - L1, $`\lambda \|w\|_1`$
//! - Sorted-L1 (SLOPE), $`\sum_i \lambda_i |w|_{(i)}`$
//!
//! Each run certifies optimality through the primal-dual gap and the
//! primal and dual infeasibilities, or reports which limit stopped it.
//! Per-iteration diagnostics go to the `log` facade and to an optional
//! callback.

#![cfg_attr(all(rustc_nightly, test), feature(test))]
#[cfg(all(rustc_nightly, test))]
extern crate test;

#[cfg(test)]
extern crate intel_mkl_src;

pub mod admm;
mod error;
mod float;
pub mod linsys;
pub mod problem;
pub mod prox;
mod solve;

pub use admm::{
    nop, Admm, AdmmSettings, AdmmSettingsBuilder, AdmmSolution, IterationInfo, SolverStatus,
};
pub use error::AdmmError;
pub use float::AdmmScalar;
pub use problem::{Portfolio, ProblemData, QuadraticProgram, Regression};
pub use prox::{Penalty, PenaltyKind};
pub use solve::{solve, solve_portfolio, solve_regression};
