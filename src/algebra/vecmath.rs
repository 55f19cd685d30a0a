use super::{FloatT, VectorMath};
use std::iter::zip;

impl<T: FloatT> VectorMath for [T] {
    type T = T;

    fn scalarop(&mut self, op: impl Fn(T) -> T) -> &mut Self {
        for x in &mut *self {
            *x = op(*x);
        }
        self
    }

    fn scale(&mut self, c: T) -> &mut Self {
        self.scalarop(|x| x * c)
    }

    fn negate(&mut self) -> &mut Self {
        self.scalarop(|x| -x)
    }

    fn dot(&self, y: &[T]) -> T {
        assert_eq!(self.len(), y.len());
        zip(self, y).fold(T::zero(), |acc, (&x, &y)| acc + x * y)
    }

    fn sumsq(&self) -> T {
        self.dot(self)
    }

    fn norm(&self) -> T {
        T::sqrt(self.sumsq())
    }

    // ignores NaNs
    fn norm_inf(&self) -> T {
        let mut out = T::zero();
        for v in self.iter().map(|v| v.abs()) {
            out = if v > out { v } else { out };
        }
        out
    }

    fn dist(&self, y: &Self) -> T {
        assert_eq!(self.len(), y.len());
        zip(self, y)
            .fold(T::zero(), |acc, (&x, &y)| acc + (x - y) * (x - y))
            .sqrt()
    }

    fn norm_inf_diff(&self, y: &[T]) -> T {
        assert_eq!(self.len(), y.len());
        zip(self, y).fold(T::zero(), |acc, (&x, &y)| T::max(acc, T::abs(x - y)))
    }

    fn axpby(&mut self, a: T, x: &[T], b: T) -> &mut Self {
        assert_eq!(self.len(), x.len());
        zip(&mut *self, x).for_each(|(y, x)| *y = a * (*x) + b * (*y));
        self
    }
}

#[test]
fn test_norms() {
    let x = vec![3., -4.];
    assert_eq!(x.dot(&[1., 1.]), -1.);
    assert_eq!(x.norm(), 5.);
    assert_eq!(x.norm_inf(), 4.);
    assert_eq!(x.dist(&[0., 0.]), 5.);
    assert_eq!(x.norm_inf_diff(&[3., 0.]), 4.);
}

#[test]
fn test_axpby() {
    let mut y = vec![1., 1., 1.];
    let x = vec![1., 2., 3.];
    y.axpby(2., &x, -1.);
    assert_eq!(y, vec![1., 3., 5.]);
    y.negate().scale(0.5);
    assert_eq!(y, vec![-0.5, -1.5, -2.5]);
}
