//! Sparse and dense linear algebra used by the elimination transforms
//! and the native engine.
//!
//! The sparse [`CscMatrix`] type holds all problem data.  Symmetric
//! matrices are stored with both triangles populated.  The dense
//! [`Matrix`] type is column major and is used for the small
//! factorizations ([`CholeskyEngine`], [`QrFactors`]) the solver needs.
//! Dense products and factorizations call BLAS and LAPACK through the
//! [`BlasFloatT`] wrappers.

mod csc;
mod dense;
mod error_types;
mod floats;
mod math_traits;
mod vecmath;

pub use csc::*;
pub use dense::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
