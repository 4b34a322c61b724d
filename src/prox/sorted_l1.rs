//! The Sorted-L1 (OWL / SLOPE) norm
//!
//! For a non-increasing, non-negative weight sequence $`\lambda`$,
//! ```math
//! J_\lambda(w) = \sum_{i=1}^K \lambda_i |w|_{(i)}, \quad |w|_{(1)} \geq \dots \geq |w|_{(K)}
//! ```
//! which reduces to the L1 norm when all weights are equal.
//!
//! References
//! ----------
//! \[BvdBSSC15\]: Bogdan, M., van den Berg, E., Sabatti, C., Su, W., Candès, E. J.,
//!      "SLOPE - Adaptive Variable Selection via Convex Optimization",
//!      Annals of Applied Statistics, Vol 9, #3, 2015, 1103-1140

use ndarray::prelude::*;
use ndarray::NdFloat;
use std::cmp::Ordering;

use crate::float::cast_usize;

/// Indices that sort $`|x|`$ in descending order.
///
/// The sort is stable, so ties keep their original index order.
pub(crate) fn abs_descending_order<S: NdFloat>(x: ArrayView1<S>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..x.len()).collect();
    order.sort_by(|&i, &j| {
        x[j].abs()
            .partial_cmp(&x[i].abs())
            .unwrap_or(Ordering::Equal)
    });
    order
}

fn sorted_abs<S: NdFloat>(x: ArrayView1<S>) -> Array1<S> {
    abs_descending_order(x).iter().map(|&i| x[i].abs()).collect()
}

/// Projection onto the monotone cone $`\{z : z_1 \geq \dots \geq z_K \geq 0\}`$
///
/// Pool-adjacent-violators with a stack of blocks. Each new entry opens a
/// block, which is merged into its predecessor as long as the predecessor's
/// average does not exceed its own. The block averages are then clamped
/// at zero.
pub fn isotonic_nonincreasing<S: NdFloat>(x: ArrayView1<S>) -> Array1<S> {
    // (first index, length, sum)
    let mut blocks: Vec<(usize, usize, S)> = Vec::with_capacity(x.len());
    for (i, &xi) in x.iter().enumerate() {
        let (mut start, mut len, mut sum) = (i, 1, xi);
        while let Some(&(prev_start, prev_len, prev_sum)) = blocks.last() {
            if prev_sum / cast_usize(prev_len) > sum / cast_usize(len) {
                break;
            }
            blocks.pop();
            start = prev_start;
            len += prev_len;
            sum = sum + prev_sum;
        }
        blocks.push((start, len, sum));
    }

    let mut z = Array1::zeros(x.len());
    for (start, len, sum) in blocks {
        let avg = (sum / cast_usize(len)).max(S::zero());
        z.slice_mut(s![start..start + len]).fill(avg);
    }
    z
}

/// Proximal operator of $`\tau J_\lambda`$
///
/// Algorithm
/// ---------
/// 1. sort $`|y|`$ descending with permutation $`\pi`$, $`u = |y|_\pi`$
/// 2. $`s_i = u_i - \tau \lambda_i`$
/// 3. $`z`$ = [isotonic projection](fn.isotonic_nonincreasing.html) of $`s`$
/// 4. $`v_{\pi(i)} = \mathrm{sign}(y_{\pi(i)}) z_i`$
///
/// `lambda` must already be sorted descending.
///
/// **Panics** if `lambda` and `y` differ in length.
pub fn prox_sorted_l1<S: NdFloat>(y: ArrayView1<S>, lambda: ArrayView1<S>, tau: S) -> Array1<S> {
    check_len(y.len(), lambda.len());
    let order = abs_descending_order(y);
    let diffs: Array1<S> = order
        .iter()
        .zip(lambda.iter())
        .map(|(&i, &li)| y[i].abs() - tau * li)
        .collect();
    let z = isotonic_nonincreasing(diffs.view());

    let mut v = Array1::zeros(y.len());
    for (&i, &zi) in order.iter().zip(z.iter()) {
        v[i] = if y[i] < S::zero() { -zi } else { zi };
    }
    v
}

/// $`J_\lambda(w)`$
///
/// **Panics** if `lambda` and `w` differ in length.
pub fn sorted_l1_norm<S: NdFloat>(w: ArrayView1<S>, lambda: ArrayView1<S>) -> S {
    check_len(w.len(), lambda.len());
    sorted_abs(w).dot(&lambda)
}

/// Violation of the dual ball of $`J_\lambda`$
///
/// $`\alpha`$ is dual feasible iff every partial sum of
/// $`|\alpha|_{(i)} - \lambda_i`$ is non-positive; returns the largest
/// partial sum, clamped at zero.
///
/// **Panics** if `lambda` and `alpha` differ in length.
pub fn sorted_l1_dual_infeasibility<S: NdFloat>(alpha: ArrayView1<S>, lambda: ArrayView1<S>) -> S {
    check_len(alpha.len(), lambda.len());
    let mut cumsum = S::zero();
    let mut worst = S::neg_infinity();
    for (&ai, &li) in sorted_abs(alpha).iter().zip(lambda.iter()) {
        cumsum = cumsum + ai - li;
        worst = worst.max(cumsum);
    }
    worst.max(S::zero())
}

fn check_len(n: usize, n_lambda: usize) {
    assert_eq!(
        n, n_lambda,
        "SL1 lambda has length {} but the input has length {}",
        n_lambda, n
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prox::soft_threshold;
    use approx::assert_abs_diff_eq;
    use ndarray_rand::rand_distr::{Normal, Uniform};
    use ndarray_rand::RandomExt;

    #[test]
    fn isotonic_pools_violators() {
        let z = isotonic_nonincreasing(array![3., 1., 2., -1.].view());
        assert_abs_diff_eq!(z, array![3., 1.5, 1.5, 0.]);

        let z = isotonic_nonincreasing(array![-2., 1., 4.].view());
        assert_abs_diff_eq!(z, array![1., 1., 1.]);

        let z = isotonic_nonincreasing(array![-1., -3.].view());
        assert_abs_diff_eq!(z, array![0., 0.]);
    }

    #[test]
    fn prox_already_ordered() {
        let y = array![0.5, -3.0, 1.0];
        let lambda = array![2., 1., 0.5];
        let v = prox_sorted_l1(y.view(), lambda.view(), 1.);
        assert_abs_diff_eq!(v, array![0., -1., 0.]);
    }

    #[test]
    fn prox_ties_are_averaged() {
        let y = array![1., -1., 1.];
        let lambda = array![0.3, 0.2, 0.1];
        let v = prox_sorted_l1(y.view(), lambda.view(), 1.);
        assert_abs_diff_eq!(v, array![0.8, -0.8, 0.8], epsilon = 1e-12);
    }

    #[test]
    fn equal_weights_match_soft_threshold() {
        let y = Array::random(12, Normal::new(0f64, 2.).unwrap());
        let lambda = Array::from_elem(12, 0.7);
        let v = prox_sorted_l1(y.view(), lambda.view(), 1.5);
        let v_l1 = soft_threshold(y.view(), 1.05);
        assert_abs_diff_eq!(v, v_l1, epsilon = 1e-12);
    }

    #[test]
    fn prox_respects_order_and_sign() {
        for _ in 0..20 {
            let y = Array::random(15, Normal::new(0f64, 1.).unwrap());
            let mut weights = Array::random(15, Uniform::new(0f64, 1.)).to_vec();
            weights.sort_by(|a, b| b.partial_cmp(a).unwrap());
            let lambda = Array1::from(weights);
            let v = prox_sorted_l1(y.view(), lambda.view(), 0.8);

            for i in 0..15 {
                assert!(v[i] == 0. || v[i].signum() == y[i].signum());
                assert!(v[i].abs() <= y[i].abs() + 1e-12);
                for j in 0..15 {
                    if y[i].abs() > y[j].abs() {
                        assert!(v[i].abs() >= v[j].abs() - 1e-12);
                    }
                }
            }
        }
    }

    #[test]
    fn prox_fixed_points() {
        let lambda = array![0.3, 0.2, 0.1];
        let zero = Array1::<f64>::zeros(3);
        assert_eq!(prox_sorted_l1(zero.view(), lambda.view(), 2.), zero);

        // with no shrinkage every point is fixed
        let y = array![0.25, -4., 1.];
        let v = prox_sorted_l1(y.view(), lambda.view(), 0.);
        assert_abs_diff_eq!(v, y);
        assert_abs_diff_eq!(prox_sorted_l1(v.view(), lambda.view(), 0.), v);
    }

    #[test]
    fn norm_sorts_magnitudes() {
        let w = array![1., -3., 2.];
        let lambda = array![3., 2., 1.];
        assert_abs_diff_eq!(sorted_l1_norm(w.view(), lambda.view()), 14.);
    }

    #[test]
    fn dual_ball_partial_sums() {
        let lambda = array![0.3, 0.2, 0.1];
        let on_boundary = array![0.2, -0.2, 0.2];
        assert_abs_diff_eq!(
            sorted_l1_dual_infeasibility(on_boundary.view(), lambda.view()),
            0.,
            epsilon = 1e-12
        );
        let outside = array![0., -0.5, 0.];
        assert_abs_diff_eq!(
            sorted_l1_dual_infeasibility(outside.view(), lambda.view()),
            0.2,
            epsilon = 1e-12
        );
        let inside = array![0.1, 0., 0.05];
        assert_eq!(sorted_l1_dual_infeasibility(inside.view(), lambda.view()), 0.);
    }

    #[test]
    #[should_panic(expected = "SL1 lambda has length 2")]
    fn prox_rejects_short_lambda() {
        let y = array![1., 2., 3.];
        prox_sorted_l1(y.view(), array![0.2, 0.1].view(), 1.);
    }

    #[test]
    #[should_panic(expected = "SL1 lambda has length 4")]
    fn dual_rejects_long_lambda() {
        let alpha = array![1., 2., 3.];
        sorted_l1_dual_infeasibility(alpha.view(), array![0.4, 0.3, 0.2, 0.1].view());
    }

    #[cfg(rustc_nightly)]
    mod benches {
        use super::*;
        use test::Bencher;

        #[bench]
        fn bench_prox_sorted_l1(b: &mut Bencher) {
            let y = Array::random(1000, Normal::new(0f64, 1.).unwrap());
            let lambda = Array::linspace(2., 0.1, 1000);
            b.iter(|| prox_sorted_l1(y.view(), lambda.view(), 0.5));
        }
    }
}
