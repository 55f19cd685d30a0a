/// Vector operations on slices of [`FloatT`](crate::algebra::FloatT)
pub trait VectorMath {
    type T;

    /// Apply an elementwise operation on a vector.
    fn scalarop(&mut self, op: impl Fn(Self::T) -> Self::T) -> &mut Self;

    /// Elementwise scaling.
    fn scale(&mut self, c: Self::T) -> &mut Self;

    /// Elementwise negation of entries.
    fn negate(&mut self) -> &mut Self;

    /// Dot product
    fn dot(&self, y: &Self) -> Self::T;

    /// Sum of squares of the elements.
    fn sumsq(&self) -> Self::T;

    /// 2-norm
    fn norm(&self) -> Self::T;

    /// Infinity norm
    fn norm_inf(&self) -> Self::T;

    /// 2-norm of the difference with `y`
    fn dist(&self, y: &Self) -> Self::T;

    /// Infinity norm of the difference with `y`
    fn norm_inf_diff(&self, y: &Self) -> Self::T;

    /// BLAS-like shift and scale in place.  Produces `self = a*x+b*self`
    fn axpby(&mut self, a: Self::T, x: &Self, b: Self::T) -> &mut Self;
}
