//! Alternating Direction Method of Multipliers
//!
//! Splits the penalized problem as
//! ```math
//! \min_{w, v} \; q(w) + \mathrm{pen}(v) \quad \text{s.t.} \quad w = v, \; e^T w = 1
//! ```
//! with multipliers $`\alpha`$ for $`w = v`$ and $`\beta`$ for $`e^T w = 1`$.
//!
//! Algorithm
//! ---------
//! ```math
//! \begin{aligned}
//! w_{k+1} &= \left(Q + \rho(I + ee^T)\right)^{-1} \left(c - \alpha_k - \beta_k e + \rho(v_k + e)\right) \\
//! v_{k+1} &= \mathrm{prox}_{\mathrm{pen}/\rho}\left(w_{k+1} + \alpha_k / \rho\right) \\
//! \alpha_{k+1} &= \alpha_k + \rho (w_{k+1} - v_{k+1}) \\
//! \beta_{k+1} &= \beta_k + \rho (e^T w_{k+1} - 1)
//! \end{aligned}
//! ```
//! The run is optimal once the relative primal-dual gap is below
//! `tol_rel_gap` and both infeasibilities are below `tol_infeas`.
//! $`\rho`$ is fixed for the whole run, which lets the $`w`$-update reuse a
//! single [Cholesky factor](../linsys/struct.LinearSystemCache.html).

mod info;
pub use info::*;

mod settings;
pub use settings::*;

use crate::error::AdmmError;
use crate::float::{cast_usize, AdmmScalar};
use crate::linsys::LinearSystemCache;
use crate::problem::{dual_residual, QuadraticProgram};
use crate::prox::Penalty;
use ndarray::prelude::*;
use num_traits::Float;
use std::time::{Duration, Instant};

/// Result of an ADMM run
#[derive(Debug, Clone)]
pub struct AdmmSolution<S> {
    /// weights, the consensus iterate $`v`$
    pub w: Array1<S>,
    /// penalty value at `w`
    pub pen: S,
    /// multiplier of $`w = v`$
    pub alpha: Array1<S>,
    /// multiplier of $`e^T w = 1`$
    pub beta: S,
    /// primal objective at the last primal iterate
    pub obj: S,
    pub status: SolverStatus,
    pub iterations: u32,
    pub solve_time: Duration,
}

/// ADMM solver for one problem and penalty
pub struct Admm<P, S: AdmmScalar> {
    program: P,
    penalty: Penalty<S>,
    settings: AdmmSettings<S>,
}

impl<P, S> Admm<P, S>
where
    P: QuadraticProgram<S>,
    S: AdmmScalar,
{
    /// Checks the penalty against the problem dimension
    pub fn new(program: P, penalty: Penalty<S>, settings: AdmmSettings<S>) -> Result<Self, AdmmError> {
        penalty.check_dim(program.dim())?;
        Ok(Admm {
            program,
            penalty,
            settings,
        })
    }

    pub fn program(&self) -> &P {
        &self.program
    }

    pub fn penalty(&self) -> &Penalty<S> {
        &self.penalty
    }

    pub fn settings(&self) -> &AdmmSettings<S> {
        &self.settings
    }

    /// Runs ADMM from `init_w` (uniform $`1/K`$ if `None`)
    ///
    /// Parameters
    /// ----------
    /// - __init_w:__    initial weights, also the initial $`v`$
    /// - __callback:__  called with the diagnostics of every iteration.
    ///                   If it returns true, the solver stops with status `Stopped`.
    pub fn run(
        &self,
        init_w: Option<ArrayView1<S>>,
        mut callback: impl FnMut(&IterationInfo<S>) -> bool,
    ) -> Result<AdmmSolution<S>, AdmmError> {
        let timer = Instant::now();
        let k = self.program.dim();
        let one = S::one();

        let mut v = match init_w {
            Some(w0) if w0.len() != k => {
                return Err(AdmmError::invalid(format!(
                    "initial weights have length {} but the problem has dimension {}",
                    w0.len(),
                    k
                )))
            }
            Some(w0) => w0.to_owned(),
            None => Array1::from_elem(k, one / cast_usize(k)),
        };
        let rho = match self.settings.rho {
            Some(rho) => rho,
            None => self.program.default_rho()?,
        };
        let cache = LinearSystemCache::new(self.program.quadratic(), rho)?;
        let c = self.program.linear();
        let step = one / rho;

        let mut alpha = Array1::zeros(k);
        let mut beta = S::zero();

        log::debug!(
            "ADMM: K = {}, {} penalty, rho = {:.4e}, max_iter = {}",
            k,
            self.penalty.kind(),
            rho,
            self.settings.max_iter
        );
        if self.settings.verbose {
            log_header();
        }

        let mut iter = 0;
        loop {
            iter += 1;

            let mut rhs = dual_residual(c, alpha.view(), beta);
            rhs.scaled_add(rho, &v);
            rhs += rho;
            let w = cache.solve(&rhs)?;

            v = self.penalty.prox((&w + &(&alpha * step)).view(), step);

            let diff = &w - &v;
            alpha.scaled_add(rho, &diff);
            let sum_err = w.sum() - one;
            beta += rho * sum_err;

            let obj_p = self.program.quadratic_term(w.view()) + self.penalty.value(w.view());
            let obj_d = self.program.dual_objective(alpha.view(), beta)?;
            let infeas_p = Float::max(max_abs(&diff), Float::abs(sum_err));
            let infeas_d = self.penalty.dual_infeasibility(alpha.view());
            let pdgap = Float::abs(obj_p - obj_d) / Float::max(one, obj_p);

            let info = IterationInfo {
                iter,
                obj_p,
                obj_d,
                pdgap,
                infeas_p,
                infeas_d,
                rho,
            };
            log::debug!("{:?}", info);
            if self.settings.verbose {
                log_row(&info);
            }
            let stop = callback(&info);

            let status = if pdgap < self.settings.tol_rel_gap
                && Float::max(infeas_p, infeas_d) < self.settings.tol_infeas
            {
                SolverStatus::Optimal
            } else if iter >= self.settings.max_iter {
                SolverStatus::IterationLimit
            } else if stop {
                SolverStatus::Stopped
            } else if timer.elapsed().as_secs_f64() > self.settings.time_limit {
                SolverStatus::TimeLimit
            } else {
                continue;
            };

            let solve_time = timer.elapsed();
            if status.is_optimal() {
                log::info!(
                    "ADMM: {} after {} iterations, objective {:.6e}",
                    status,
                    iter,
                    obj_p
                );
            } else {
                log::warn!(
                    "ADMM: {} after {} iterations (pdgap {:.2e}, infeas {:.2e})",
                    status,
                    iter,
                    pdgap,
                    Float::max(infeas_p, infeas_d)
                );
            }
            return Ok(AdmmSolution {
                pen: self.penalty.value(v.view()),
                w: v,
                alpha,
                beta,
                obj: obj_p,
                status,
                iterations: iter,
                solve_time,
            });
        }
    }
}

fn max_abs<S: AdmmScalar>(x: &Array1<S>) -> S {
    x.fold(S::zero(), |acc, &xi| Float::max(acc, Float::abs(xi)))
}
