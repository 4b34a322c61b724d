use ndarray::NdFloat;
use ndarray_linalg::{Lapack, Scalar};

/// Real floating point type with LAPACK support, i.e. `f32` or `f64`.
///
/// Both `num_traits::Float` and `ndarray_linalg::Scalar` provide methods
/// like `abs` and `sqrt`, so code bound by this trait calls them through
/// `Float::abs(x)` to stay unambiguous.
pub trait AdmmScalar: NdFloat + Scalar<Real = Self> + Lapack + Default {}

impl<T> AdmmScalar for T where T: NdFloat + Scalar<Real = T> + Lapack + Default {}

// saves writing S::from(1e-5).unwrap() on every constant
#[inline]
pub(crate) fn cast<S: NdFloat>(x: f64) -> S {
    S::from(x).unwrap()
}

#[inline]
pub(crate) fn cast_usize<S: NdFloat>(n: usize) -> S {
    S::from(n).unwrap()
}
