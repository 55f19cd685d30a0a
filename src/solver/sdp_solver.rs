#![allow(non_snake_case)]

use crate::algebra::FloatT;
use crate::problem::{ProblemDataError, SdpaFreeFormat};
use crate::solver::core::*;
use crate::solver::elimination::{eliminate, without_free_variables, RecoverFreeVariables};
use crate::solver::engines::DefaultEngine;
use crate::solver::solution::*;
use std::io;
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
/// Error type returned by [`SdpSolver::solve`].  Infeasible or
/// unbounded problems are not errors; see [`SolutionResult`].
pub enum SolverError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    ProblemData(#[from] ProblemDataError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// the engine parameter file could not be written
    #[error("Engine parameter file error: {0}")]
    ParamsFile(#[from] io::Error),
}

/// Solver for [`SdpaFreeFormat`] problems.
///
/// Free variables are removed by the strategy selected in the
/// [`SolverOptions`], the resulting standard form SDP is passed to the
/// engine `E` and the solution is mapped back onto the original
/// decision variables.
///
/// ```no_run
/// use sdpfree::problem::*;
/// use sdpfree::solver::*;
/// # fn data() -> SdpaFreeFormat<f64> { unimplemented!() }
///
/// let mut solver = SdpSolver::new(NativeSdpEngine::new());
/// let mut options = SolverOptions::new();
/// options.set_remove_free_variable_method(RemoveFreeVariableMethod::TwoSlackVariables);
///
/// let result = solver.solve(&data(), &options).unwrap();
/// println!("{}: {}", result.solution_result, result.optimal_cost);
/// ```
#[derive(Debug, Clone)]
pub struct SdpSolver<E = DefaultEngine> {
    engine: E,
}

impl Default for SdpSolver<DefaultEngine> {
    fn default() -> Self {
        Self::new(DefaultEngine::default())
    }
}

impl<E> SdpSolver<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn solve<T>(
        &mut self,
        data: &SdpaFreeFormat<T>,
        options: &SolverOptions,
    ) -> Result<SolveResult<T>, SolverError>
    where
        T: FloatT,
        E: SdpEngine<T>,
    {
        let timer = Instant::now();

        // option errors are reported before any file is written
        let resolved = options.resolve()?;
        let params = ParamsFile::create(&resolved.params)?;

        let (problem, recovery) = if data.num_free_variables() == 0 {
            (without_free_variables(data), None)
        } else {
            let e = eliminate(data, resolved.method);
            (e.problem, Some(e.recovery))
        };

        log::debug!(
            "calling {} engine: {} rows in X, {} constraints",
            self.engine.name(),
            problem.num_X_rows(),
            problem.num_constraints()
        );
        let raw = self.engine.solve(&problem, params.path())?;
        drop(params);
        log::debug!("engine return code {}", raw.return_code);

        check_engine_output(&problem, &raw)?;

        let s = match &recovery {
            Some(recovery) => recovery.recover(data, &raw.X.to_csc()),
            None => Vec::new(),
        };
        let x_val = program_solution(data, &raw.X, &s);

        let solver_details = CsdpSolverDetails {
            return_code: raw.return_code,
            primal_objective: raw.primal_objective,
            dual_objective: raw.dual_objective,
            y_val: raw.y[1..].to_vec(),
            Z_val: raw.Z.to_csc(),
        };

        Ok(SolveResult {
            solution_result: SolutionResult::from_return_code(raw.return_code),
            optimal_cost: optimal_cost_from(raw.return_code, raw.primal_objective),
            x_val,
            solver_details,
            solve_time: timer.elapsed().as_secs_f64(),
        })
    }
}

fn check_engine_output<T>(problem: &SdpProblem<T>, raw: &EngineSolution<T>) -> Result<(), EngineError>
where
    T: FloatT,
{
    if raw.y.len() != problem.num_constraints() + 1 {
        return Err(EngineError::BadOutput(format!(
            "dual vector has length {}, expected {}",
            raw.y.len(),
            problem.num_constraints() + 1
        )));
    }
    if raw.X.structure() != problem.X_blocks || raw.Z.structure() != problem.X_blocks {
        return Err(EngineError::BadOutput("block structure mismatch".to_string()));
    }
    Ok(())
}
