#![allow(non_snake_case)]
use num_traits::{Float, FloatConst, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display, LowerExp};

use crate::algebra::dense::BlasFloatT;

/// Core traits for internal floating point values.
///
/// This trait defines a subset of bounds for `FloatT`, which is preferred
/// throughout for use in the crate.  When the dense factorizations are
/// involved, `FloatT` adds the additional trait bound `BlasFloatT`.
pub trait CoreFloatT:
    'static
    + Send
    + Float
    + FloatConst
    + NumAssign
    + Default
    + FromPrimitive
    + Display
    + LowerExp
    + Debug
    + Sized
{
}

impl<T> CoreFloatT for T where
    T: 'static
        + Send
        + Float
        + FloatConst
        + NumAssign
        + Default
        + FromPrimitive
        + Display
        + LowerExp
        + Debug
        + Sized
{
}

/// Main trait for floating point types used throughout the crate.
///
/// All problem data, elimination transforms and engine iterates are
/// represented internally on values implementing `FloatT`.  Dense
/// factorizations and products go through BLAS and LAPACK, so `FloatT` is
/// implemented for `f32` and `f64` only.  The CSDP engine bindings are only
/// available for `f64`.
///
/// `FloatT` relies on [`num_traits`](num_traits) for most of its constituent trait bounds.
pub trait FloatT: CoreFloatT + BlasFloatT {}
impl<T> FloatT for T where T: CoreFloatT + BlasFloatT {}

/// Trait for converting Rust primitives to [`FloatT`](crate::algebra::FloatT)
///
/// This convenience trait is implemented on f32/64 and u32/64/usize so that
/// constants can be written as `(0.5).as_T()` instead of the
/// awful `T::from_f64(0.5).unwrap()`.
pub trait AsFloatT<T>: 'static {
    fn as_T(&self) -> T;
}

macro_rules! impl_as_FloatT {
    ($ty:ty, $ident:ident) => {
        impl<T> AsFloatT<T> for $ty
        where
            T: std::ops::Mul<T, Output = T> + FromPrimitive + 'static,
        {
            #[inline]
            fn as_T(&self) -> T {
                T::$ident(*self).unwrap()
            }
        }
    };
}
impl_as_FloatT!(u32, from_u32);
impl_as_FloatT!(u64, from_u64);
impl_as_FloatT!(usize, from_usize);
impl_as_FloatT!(i32, from_i32);
impl_as_FloatT!(f32, from_f32);
impl_as_FloatT!(f64, from_f64);
