#![allow(non_snake_case)]
use sdpfree::{algebra::*, problem::*, solver::*};
use std::fs;
use std::path::{Path, PathBuf};

// An engine that returns canned results and records what it was given.
#[derive(Default)]
struct ScriptedEngine {
    return_code: i32,
    primal_objective: f64,
    fail: bool,
    calls: usize,
    params: Option<(PathBuf, String)>,
    problem_sizes: Option<(usize, usize)>,
}

impl SdpEngine<f64> for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn solve(
        &mut self,
        problem: &SdpProblem<f64>,
        params: Option<&Path>,
    ) -> Result<EngineSolution<f64>, EngineError> {
        self.calls += 1;
        self.params = params.map(|p| (p.to_path_buf(), fs::read_to_string(p).unwrap()));
        self.problem_sizes = Some((problem.num_X_rows(), problem.num_constraints()));
        if self.fail {
            return Err(EngineError::BadInput("scripted failure".to_string()));
        }

        // y[i] = 10 i, with y[0] unused
        let y = (0..=problem.num_constraints()).map(|i| 10. * i as f64).collect();
        Ok(EngineSolution {
            return_code: self.return_code,
            primal_objective: self.primal_objective,
            dual_objective: self.primal_objective,
            y,
            X: BlockMatrix::scaled_identity(&problem.X_blocks, 1.),
            Z: BlockMatrix::scaled_identity(&problem.X_blocks, 0.5),
        })
    }
}

fn toy_data() -> SdpaFreeFormat<f64> {
    let blocks = vec![BlockInX::new(BlockType::Matrix, 2)];
    let A0 = CscMatrix::new_from_triplets(2, 2, vec![0], vec![0], vec![1.]);
    let A1 = CscMatrix::new_from_triplets(2, 2, vec![0, 1], vec![1, 0], vec![0.5, 0.5]);
    let B = CscMatrix::new_from_triplets(2, 1, vec![1], vec![0], vec![-1.]);
    let C = CscMatrix::new_from_triplets(2, 2, vec![1], vec![1], vec![-1.]);
    let vars = vec![
        VariableInSdpa::InX(DecisionVariableInSdpaX::new(
            Sign::Negative,
            0.5,
            EntryInX::new(0, 1, 1),
        )),
        VariableInSdpa::Free(0),
    ];
    SdpaFreeFormat::new(blocks, vec![A0, A1], B, vec![1., 0.], C, vec![2.], 0., vars).unwrap()
}

fn solver_with(return_code: i32, primal_objective: f64) -> SdpSolver<ScriptedEngine> {
    SdpSolver::new(ScriptedEngine {
        return_code,
        primal_objective,
        ..ScriptedEngine::default()
    })
}

#[test]
fn test_return_codes() {
    let expected = [
        (0, SolutionResult::SolutionFound),
        (1, SolutionResult::InfeasibleConstraints),
        (2, SolutionResult::DualInfeasible),
        (3, SolutionResult::SolutionFound),
        (4, SolutionResult::IterationLimit),
        (5, SolutionResult::SolverSpecificError),
        (8, SolutionResult::SolverSpecificError),
    ];
    for (code, status) in expected {
        let mut solver = solver_with(code, 2.5);
        let result = solver.solve(&toy_data(), &SolverOptions::new()).unwrap();
        assert_eq!(result.solution_result, status);
        assert_eq!(result.solver_details.return_code, code);
        assert_eq!(result.solver_details.primal_objective, 2.5);
        if code == 1 {
            assert_eq!(result.optimal_cost, f64::INFINITY);
        } else {
            assert_eq!(result.optimal_cost, -2.5);
        }
    }
}

#[test]
fn test_dual_vector_reindexed() {
    let cases = [
        (RemoveFreeVariableMethod::Nullspace, (2, 1)),
        (RemoveFreeVariableMethod::TwoSlackVariables, (4, 2)),
        (RemoveFreeVariableMethod::LorentzConeSlack, (4, 3)),
    ];
    for (method, sizes) in cases {
        let mut options = SolverOptions::new();
        options.set_remove_free_variable_method(method);
        let mut solver = solver_with(0, 1.);
        let result = solver.solve(&toy_data(), &options).unwrap();

        assert_eq!(solver.engine().problem_sizes, Some(sizes));
        let expected: Vec<f64> = (1..=sizes.1).map(|i| 10. * i as f64).collect();
        assert_eq!(result.solver_details.y_val, expected);
        assert_eq!(result.solver_details.Z_val.size(), (sizes.0, sizes.0));
        assert_eq!(result.solver_details.Z_val.nnz(), sizes.0);
    }
}

#[test]
fn test_values_from_engine_matrix() {
    let mut options = SolverOptions::new();
    options.set_remove_free_variable_method(RemoveFreeVariableMethod::TwoSlackVariables);
    let mut solver = solver_with(0, 1.);
    let result = solver.solve(&toy_data(), &options).unwrap();

    // X̂ = I: 0.5 - X₁₁ = -0.5, and s = p - q = 1 - 1
    assert_eq!(result.x_val, vec![-0.5, 0.]);

    // with X̂ = I the first nonzero of column 3 is the diagonal
    options.set_remove_free_variable_method(RemoveFreeVariableMethod::LorentzConeSlack);
    let result = solver.solve(&toy_data(), &options).unwrap();
    assert_eq!(result.x_val, vec![-0.5, 1.]);
}

#[test]
fn test_params_file_lifecycle() {
    let mut options = SolverOptions::new();
    options.set_double("axtol", 1e-6).set_int("maxiter", 7);
    options.print_to_console = true;

    let mut solver = solver_with(0, 1.);
    solver.solve(&toy_data(), &options).unwrap();

    let (path, contents) = solver.engine().params.clone().unwrap();
    assert_eq!(contents, "axtol=1e-6\nmaxiter=7\nprintlevel=1\n");
    assert!(path.starts_with(params_directory()));
    assert!(!path.exists());
}

#[test]
fn test_params_file_removed_on_error() {
    let mut options = SolverOptions::new();
    options.set_int("maxiter", 7);

    let mut solver = SdpSolver::new(ScriptedEngine {
        fail: true,
        ..ScriptedEngine::default()
    });
    let err = solver.solve(&toy_data(), &options).unwrap_err();
    assert!(matches!(err, SolverError::Engine(EngineError::BadInput(_))));

    let (path, _) = solver.engine().params.clone().unwrap();
    assert!(!path.exists());
}

#[test]
fn test_no_options_no_params_file() {
    let mut solver = solver_with(0, 1.);
    solver.solve(&toy_data(), &SolverOptions::new()).unwrap();
    assert_eq!(solver.engine().calls, 1);
    assert!(solver.engine().params.is_none());

    // the selector alone is not passed to the engine
    let mut options = SolverOptions::new();
    options.set_remove_free_variable_method(RemoveFreeVariableMethod::Nullspace);
    solver.solve(&toy_data(), &options).unwrap();
    assert!(solver.engine().params.is_none());
}

#[test]
fn test_bad_options_skip_engine() {
    let mut options = SolverOptions::new();
    options.set_int(REMOVE_FREE_VARIABLE_METHOD, 7);
    let mut solver = solver_with(0, 1.);
    assert!(solver.solve(&toy_data(), &options).is_err());

    options = SolverOptions::new();
    options.set_string("axtol", "small");
    assert!(solver.solve(&toy_data(), &options).is_err());

    assert_eq!(solver.engine().calls, 0);
}

#[test]
fn test_bad_engine_output() {
    struct ShortDualEngine;
    impl SdpEngine<f64> for ShortDualEngine {
        fn name(&self) -> &'static str {
            "short"
        }
        fn solve(
            &mut self,
            problem: &SdpProblem<f64>,
            _params: Option<&Path>,
        ) -> Result<EngineSolution<f64>, EngineError> {
            Ok(EngineSolution {
                return_code: 0,
                primal_objective: 0.,
                dual_objective: 0.,
                y: vec![0.],
                X: BlockMatrix::zeros(&problem.X_blocks),
                Z: BlockMatrix::zeros(&problem.X_blocks),
            })
        }
    }

    let mut solver = SdpSolver::new(ShortDualEngine);
    assert!(matches!(
        solver.solve(&toy_data(), &SolverOptions::new()),
        Err(SolverError::Engine(EngineError::BadOutput(_)))
    ));
}
