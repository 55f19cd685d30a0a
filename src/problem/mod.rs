//! The canonical problem consumed by the solver.
//!
//! Problems arrive here already canonicalized into SDPA free format: a
//! block diagonal PSD matrix variable `X`, a vector `s` of free variables,
//! linear equality constraints over both and a table saying where every
//! original decision variable ended up.  See [`SdpaFreeFormat`].

mod blocks;
mod mapping;
mod sdpa_free_format;

#[cfg(feature = "serde")]
mod json;

pub use blocks::*;
pub use mapping::*;
pub use sdpa_free_format::*;
