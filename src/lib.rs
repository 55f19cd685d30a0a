//! __sdpfree__ solves semidefinite programs that contain free
//! (sign-unconstrained) variables, using interior point engines that only
//! accept positive semidefinite variables.  Problems are given in SDPA
//! free format:
//!
//! $$
//! \begin{array}{rl}
//! \text{maximize} & \operatorname{tr}(C X) + d^T s\\\\\[2ex\]
//!  \text{subject to} & \operatorname{tr}(A_i X) + b_i^T s = g_i, \quad i = 1,\dots,m \\\\\[1ex\]
//!         & X \succeq 0
//!  \end{array}
//! $$
//!
//! with a block diagonal matrix variable $X$ and free variables
//! $s \in \mathbb{R}^k$.
//!
//! Before the engine is called, $s$ is removed by one of three strategies:
//!
//! * __Nullspace__ (default): project the constraints onto the null space
//!   of $B^T$ and recover $s$ by least squares afterwards.
//!
//! * __Two slack variables__: write $s = p - q$ with $p, q \geq 0$ held in
//!   two appended diagonal blocks.
//!
//! * __Lorentz cone slack__: bound $s$ by a second order cone written as an
//!   appended dense PSD block.
//!
//! The engine's solution is mapped back onto the decision variables of
//! the originating problem through the variable mapping carried by
//! [`SdpaFreeFormat`](crate::problem::SdpaFreeFormat).
//!
//! # Engines
//!
//! A pure Rust dense interior point engine is always available.  With
//! the `csdp` feature the crate links against the CSDP C library instead.

//Rust hates greek characters
#![allow(confusable_idents)]

pub mod algebra;
pub mod io;
pub mod problem;
pub mod solver;
