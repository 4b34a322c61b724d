use std::fmt;

/// Terminal state of an ADMM run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Gap and infeasibilities are below tolerance
    Optimal,
    /// `max_iter` iterations ran without certifying optimality.
    /// The solution holds the last iterate.
    IterationLimit,
    /// `time_limit` elapsed before optimality was certified
    TimeLimit,
    /// The iteration callback asked to stop
    Stopped,
}

impl SolverStatus {
    pub fn is_optimal(&self) -> bool {
        *self == SolverStatus::Optimal
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            SolverStatus::Optimal => "Optimal",
            SolverStatus::IterationLimit => "Iteration limit reached",
            SolverStatus::TimeLimit => "Time limit reached",
            SolverStatus::Stopped => "Stopped by callback",
        };
        write!(f, "{}", msg)
    }
}

/// Per-iteration diagnostics handed to the iteration callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationInfo<S> {
    pub iter: u32,
    /// primal objective at the current $`w`$
    pub obj_p: S,
    /// dual objective at the current $`(\alpha, \beta)`$
    pub obj_d: S,
    /// $`|obj_p - obj_d| / \max(1, obj_p)`$
    pub pdgap: S,
    /// $`\max(\|w - v\|_\infty, |e^Tw - 1|)`$
    pub infeas_p: S,
    /// violation of the penalty's dual ball by $`\alpha`$
    pub infeas_d: S,
    pub rho: S,
}

/// Do nothing iteration callback (never stops the solver)
pub fn nop<S>(_info: &IterationInfo<S>) -> bool {
    false
}

pub(crate) fn log_header() {
    log::info!(
        "{:>6}  {:>13}  {:>13}  {:>10}  {:>10}  {:>10}  {:>10}",
        "iter",
        "obj_p",
        "obj_d",
        "pdgap",
        "infeas_p",
        "infeas_d",
        "rho"
    );
}

pub(crate) fn log_row<S: fmt::LowerExp>(info: &IterationInfo<S>) {
    log::info!(
        "{:>6}  {:>13.5e}  {:>13.5e}  {:>10.2e}  {:>10.2e}  {:>10.2e}  {:>10.2e}",
        info.iter,
        info.obj_p,
        info.obj_d,
        info.pdgap,
        info.infeas_p,
        info.infeas_d,
        info.rho
    );
}
