//! Solver main module.
//!
//! [`SdpSolver`] removes the free variables of an
//! [`SdpaFreeFormat`](crate::problem::SdpaFreeFormat) problem, hands the
//! resulting standard form SDP to an [`SdpEngine`] and maps the engine's
//! solution back onto the original decision variables.
//!
//! Two engines are provided: the pure Rust [`NativeSdpEngine`], and with
//! the `csdp` feature, [`CsdpEngine`](engines::CsdpEngine) which calls the
//! CSDP C library.

// internal module structure
pub(crate) mod core;
pub(crate) mod elimination;
pub mod engines;
mod sdp_solver;
mod solution;

//Here we expose only part of the solver internals
//and rearrange public modules a bit to give a more
//user friendly API

pub use crate::solver::core::{
    global_infeasible_cost, params_directory, Block, BlockMatrix, CsdpSettings,
    CsdpSettingsBuilder, CsdpSettingsBuilderError, EngineError, EngineSolution, OptionValue,
    RemoveFreeVariableMethod, SdpEngine, SdpProblem, SettingsError, SolutionResult,
    SolverOptions, PRINTLEVEL, REMOVE_FREE_VARIABLE_METHOD,
};
pub use crate::solver::engines::{DefaultEngine, NativeSdpEngine};
pub use crate::solver::sdp_solver::*;
pub use crate::solver::solution::{CsdpSolverDetails, SolveResult};
