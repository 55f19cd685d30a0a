#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, FloatT};
use crate::problem::{SdpaFreeFormat, VariableInSdpa};
use crate::solver::core::{BlockMatrix, SolutionResult};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Engine specific details of a solve
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct CsdpSolverDetails<T> {
    /// raw engine return code
    pub return_code: i32,
    /// engine primal objective, including the constant offset
    pub primal_objective: T,
    /// engine dual objective, including the constant offset
    pub dual_objective: T,
    /// dual vector, one entry per constraint handed to the engine
    pub y_val: Vec<T>,
    /// dual slack matrix over the engine's (possibly augmented) `X`
    pub Z_val: CscMatrix<T>,
}

/// Result of [`SdpSolver::solve`](crate::solver::SdpSolver::solve)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct SolveResult<T> {
    pub solution_result: SolutionResult,
    /// minimization cost of the originating problem, `+∞` if the
    /// constraints are infeasible
    pub optimal_cost: T,
    /// decision variable values in their original order
    pub x_val: Vec<T>,
    pub solver_details: CsdpSolverDetails<T>,
    /// wall clock time in seconds
    pub solve_time: f64,
}

/// Values of the original decision variables given the engine's `X`
/// and the recovered free variables `s`
pub(crate) fn program_solution<T>(data: &SdpaFreeFormat<T>, X: &BlockMatrix<T>, s: &[T]) -> Vec<T>
where
    T: FloatT,
{
    data.prog_var_in_sdpa
        .iter()
        .map(|var| match var {
            VariableInSdpa::InX(v) => v.value_from(X.entry(&v.entry_in_X)),
            VariableInSdpa::Constant(c) => *c,
            VariableInSdpa::Free(i) => s[*i],
        })
        .collect()
}
