use crate::algebra::FloatT;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of a solve, as mapped from the engine return code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolutionResult {
    /// Solver has not yet run
    #[default]
    Unsolved,
    /// Optimal or partially accurate solution
    SolutionFound,
    /// Primal constraints are infeasible
    InfeasibleConstraints,
    /// Dual problem is infeasible (primal unbounded or infeasible)
    DualInfeasible,
    /// Iteration limit reached
    IterationLimit,
    /// Any other engine failure
    SolverSpecificError,
}

impl SolutionResult {
    /// Map an engine return code.  Code 3 (partial success) still
    /// counts as a solution.
    pub fn from_return_code(code: i32) -> Self {
        match code {
            0 | 3 => SolutionResult::SolutionFound,
            1 => SolutionResult::InfeasibleConstraints,
            2 => SolutionResult::DualInfeasible,
            4 => SolutionResult::IterationLimit,
            _ => SolutionResult::SolverSpecificError,
        }
    }
}

impl fmt::Display for SolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Cost reported for problems whose constraints are infeasible
pub fn global_infeasible_cost<T: FloatT>() -> T {
    T::infinity()
}

/// Optimal cost of the originating minimization problem.  The engine
/// maximizes, so its primal objective is negated.
pub(crate) fn optimal_cost_from<T: FloatT>(return_code: i32, primal_objective: T) -> T {
    if return_code == 1 {
        global_infeasible_cost()
    } else {
        -primal_objective
    }
}

#[test]
fn test_return_code_mapping() {
    use SolutionResult::*;
    let expected = [
        (0, SolutionFound),
        (1, InfeasibleConstraints),
        (2, DualInfeasible),
        (3, SolutionFound),
        (4, IterationLimit),
        (5, SolverSpecificError),
        (7, SolverSpecificError),
        (-1, SolverSpecificError),
    ];
    for (code, result) in expected {
        assert_eq!(SolutionResult::from_return_code(code), result);
    }
    assert_eq!(SolutionFound.to_string(), "SolutionFound");
}

#[test]
fn test_optimal_cost() {
    assert_eq!(optimal_cost_from(0, 2.5), -2.5);
    assert_eq!(optimal_cost_from(2, 2.5), -2.5);
    assert_eq!(optimal_cost_from(1, 2.5), f64::INFINITY);
    assert_eq!(global_infeasible_cost::<f64>(), f64::INFINITY);
}
