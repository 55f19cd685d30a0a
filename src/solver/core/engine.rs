#![allow(non_snake_case)]

use super::BlockMatrix;
use crate::algebra::{CscMatrix, FloatT};
use crate::problem::{num_rows_of, BlockInX};
use std::path::Path;
use thiserror::Error;

/// A standard form SDP with no free variables, as handed to an engine
///
/// ```text
/// max  tr(C X) + constant_offset
/// s.t. tr(Aᵢ X) = rhsᵢ,  i = 0..m
///      X ⪰ 0
/// ```
#[derive(Debug, Clone)]
pub struct SdpProblem<T> {
    pub X_blocks: Vec<BlockInX>,
    pub C: CscMatrix<T>,
    pub A: Vec<CscMatrix<T>>,
    pub rhs: Vec<T>,
    pub constant_offset: T,
}

impl<T> SdpProblem<T>
where
    T: FloatT,
{
    pub fn num_X_rows(&self) -> usize {
        num_rows_of(&self.X_blocks)
    }

    pub fn num_constraints(&self) -> usize {
        self.rhs.len()
    }
}

/// Raw engine output
#[derive(Debug, Clone)]
pub struct EngineSolution<T> {
    pub return_code: i32,
    pub primal_objective: T,
    pub dual_objective: T,
    /// dual vector in the engine's 1-based layout.  `y[0]` is unused
    /// and `y[i]` belongs to constraint `i - 1`.
    pub y: Vec<T>,
    pub X: BlockMatrix<T>,
    pub Z: BlockMatrix<T>,
}

#[derive(Error, Debug)]
/// Error type returned when an engine can not be run at all.  Numerical
/// outcomes such as infeasibility are reported by return code instead.
pub enum EngineError {
    /// the problem handed to the engine is malformed
    #[error("Bad engine input: {0}")]
    BadInput(String),
    /// the engine returned data that does not match the problem
    #[error("Bad engine output: {0}")]
    BadOutput(String),
    /// the parameter file could not be passed or read
    #[error("Bad engine parameter file: {0}")]
    BadParams(String),
}

/// An interior point engine for [`SdpProblem`]s.
///
/// `params` is the path of a `key=value` parameter file.  `None` means
/// the engine runs with its defaults.
pub trait SdpEngine<T: FloatT> {
    fn name(&self) -> &'static str;

    fn solve(
        &mut self,
        problem: &SdpProblem<T>,
        params: Option<&Path>,
    ) -> Result<EngineSolution<T>, EngineError>;
}
