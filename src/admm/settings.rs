use crate::error::AdmmError;
use crate::float::{cast, AdmmScalar};
use derive_builder::Builder;
use num_traits::Float;

/// Options for one ADMM run
///
/// Build with [`AdmmSettingsBuilder`](struct.AdmmSettingsBuilder.html);
/// unset fields keep their defaults and setting a field twice keeps the
/// last value.
///
/// ```ignore
/// let settings = AdmmSettingsBuilder::default()
///     .max_iter(500)
///     .rho(2.0)
///     .build()?;
/// ```
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct AdmmSettings<S: AdmmScalar> {
    ///maximum number of iterations
    #[builder(default = "10000")]
    pub max_iter: u32,

    ///primal and dual infeasibility tolerance
    #[builder(default = "cast(1e-5)")]
    pub tol_infeas: S,

    ///relative primal-dual gap tolerance
    #[builder(default = "cast(1e-5)")]
    pub tol_rel_gap: S,

    ///fixed ADMM step parameter, a spectral estimate from the problem data if unset
    #[builder(default, setter(strip_option))]
    pub rho: Option<S>,

    ///log the iteration table at info level
    #[builder(default = "false")]
    pub verbose: bool,

    ///maximum run time (seconds)
    #[builder(default = "f64::INFINITY")]
    pub time_limit: f64,
}

impl<S: AdmmScalar> Default for AdmmSettings<S> {
    fn default() -> AdmmSettings<S> {
        AdmmSettingsBuilder::<S>::default().build().unwrap()
    }
}

impl<S: AdmmScalar> AdmmSettingsBuilder<S> {
    fn validate(&self) -> Result<(), String> {
        if let Some(0) = self.max_iter {
            return Err("max_iter must be positive".to_string());
        }
        let tols = [("tol_infeas", self.tol_infeas), ("tol_rel_gap", self.tol_rel_gap)];
        for &(name, tol) in tols.iter() {
            if let Some(tol) = tol {
                if !(tol > S::zero()) {
                    return Err(format!("{} must be positive, got {}", name, tol));
                }
            }
        }
        if let Some(Some(rho)) = self.rho {
            if !(rho > S::zero()) || !Float::is_finite(rho) {
                return Err(format!("rho must be positive and finite, got {}", rho));
            }
        }
        if let Some(time_limit) = self.time_limit {
            if !(time_limit >= 0.) {
                return Err(format!("time_limit must be non-negative, got {}", time_limit));
            }
        }
        Ok(())
    }
}

impl<S: AdmmScalar> AdmmSettings<S> {
    /// Settings from a builder, with builder failures as [`AdmmError`](../enum.AdmmError.html)
    pub fn from_builder(builder: &AdmmSettingsBuilder<S>) -> Result<Self, AdmmError> {
        builder
            .build()
            .map_err(|err| AdmmError::Settings(err.to_string()))
    }
}
