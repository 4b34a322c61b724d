//! The L1 norm, its proximal map and dual ball

use ndarray::prelude::*;
use ndarray::NdFloat;

/// Soft-Thresholding, the proximal operator of $`\tau \| x \|_1`$
///
/// ```math
/// v_i = \mathrm{sign}(y_i) \max(|y_i| - \tau, 0)
/// ```
pub fn soft_threshold<S: NdFloat>(y: ArrayView1<S>, tau: S) -> Array1<S> {
    y.mapv(|yi| {
        let mag = (yi.abs() - tau).max(S::zero());
        if yi < S::zero() {
            -mag
        } else {
            mag
        }
    })
}

/// $`\lambda \| w \|_1`$
pub fn l1_norm<S: NdFloat>(w: ArrayView1<S>, lambda: S) -> S {
    lambda * w.fold(S::zero(), |acc, &wi| acc + wi.abs())
}

/// Distance by which $`\|\alpha\|_\infty`$ exceeds $`\lambda`$, zero when
/// $`\alpha`$ lies in the dual ball of $`\lambda \| \cdot \|_1`$
pub fn l1_dual_infeasibility<S: NdFloat>(alpha: ArrayView1<S>, lambda: S) -> S {
    let max_abs = alpha.fold(S::zero(), |acc, &ai| acc.max(ai.abs()));
    (max_abs - lambda).max(S::zero())
}
