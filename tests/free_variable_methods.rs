#![allow(non_snake_case)]
use sdpfree::{algebra::*, problem::*, solver::*};

// max  tr(C X) + 2 s
// s.t. X₀₀ = 1
//      X₀₁ - s = 0
//      X ⪰ 0
//
// with C = diag(0, -1).  The optimum is X = [1 1; 1 1], s = 1 with
// objective 1, so the minimization cost is -1.
fn toy_data() -> SdpaFreeFormat<f64> {
    let blocks = vec![BlockInX::new(BlockType::Matrix, 2)];
    let A0 = CscMatrix::new_from_triplets(2, 2, vec![0], vec![0], vec![1.]);
    let A1 = CscMatrix::new_from_triplets(2, 2, vec![0, 1], vec![1, 0], vec![0.5, 0.5]);
    let B = CscMatrix::new_from_triplets(2, 1, vec![1], vec![0], vec![-1.]);
    let C = CscMatrix::new_from_triplets(2, 2, vec![1], vec![1], vec![-1.]);

    let vars = vec![
        VariableInSdpa::InX(DecisionVariableInSdpaX::new(
            Sign::Positive,
            0.,
            EntryInX::new(0, 0, 1),
        )),
        VariableInSdpa::Free(0),
        VariableInSdpa::Constant(3.),
        VariableInSdpa::InX(DecisionVariableInSdpaX::new(
            Sign::Negative,
            2.,
            EntryInX::new(0, 1, 1),
        )),
    ];

    SdpaFreeFormat::new(blocks, vec![A0, A1], B, vec![1., 0.], C, vec![2.], 0., vars).unwrap()
}

fn toy_solution() -> (Vec<f64>, f64) {
    (vec![1., 1., 3., 1.], -1.)
}

fn solve_with(method: RemoveFreeVariableMethod) -> SolveResult<f64> {
    let mut options = SolverOptions::new();
    options.set_remove_free_variable_method(method);
    let mut solver = SdpSolver::new(NativeSdpEngine::new());
    solver.solve(&toy_data(), &options).unwrap()
}

#[test]
fn test_nullspace() {
    let (refsol, refcost) = toy_solution();
    let result = solve_with(RemoveFreeVariableMethod::Nullspace);

    assert_eq!(result.solution_result, SolutionResult::SolutionFound);
    assert!(result.x_val.dist(&refsol) <= 1e-6);
    assert!(f64::abs(result.optimal_cost - refcost) <= 1e-6);
    // one constraint survives the projection
    assert_eq!(result.solver_details.y_val.len(), 1);
    assert_eq!(result.solver_details.Z_val.size(), (2, 2));
}

#[test]
fn test_two_slack_variables() {
    let (refsol, refcost) = toy_solution();
    let result = solve_with(RemoveFreeVariableMethod::TwoSlackVariables);

    assert_eq!(result.solution_result, SolutionResult::SolutionFound);
    assert!(result.x_val.dist(&refsol) <= 1e-4);
    assert!(f64::abs(result.optimal_cost - refcost) <= 1e-4);
    assert_eq!(result.solver_details.y_val.len(), 2);
    assert_eq!(result.solver_details.Z_val.size(), (4, 4));
}

#[test]
fn test_lorentz_cone_slack() {
    let (refsol, refcost) = toy_solution();
    let result = solve_with(RemoveFreeVariableMethod::LorentzConeSlack);

    assert_eq!(result.solution_result, SolutionResult::SolutionFound);
    assert!(result.x_val.dist(&refsol) <= 1e-4);
    assert!(f64::abs(result.optimal_cost - refcost) <= 1e-4);
    // m + k + k(k-1)/2 constraints
    assert_eq!(result.solver_details.y_val.len(), 3);
    assert_eq!(result.solver_details.Z_val.size(), (4, 4));
}

#[test]
fn test_default_method_is_nullspace() {
    let mut solver = SdpSolver::new(NativeSdpEngine::new());
    let default = solver.solve(&toy_data(), &SolverOptions::new()).unwrap();
    let nullspace = solve_with(RemoveFreeVariableMethod::Nullspace);
    assert_eq!(default.x_val, nullspace.x_val);
    assert_eq!(default.solver_details.y_val.len(), 1);
}

// the toy problem with s eliminated by hand:
//   max 2 X₀₁ - X₁₁  s.t. X₀₀ = 1
fn no_free_data(padded: bool) -> SdpaFreeFormat<f64> {
    let blocks = vec![BlockInX::new(BlockType::Matrix, 2)];
    let A0 = CscMatrix::new_from_triplets(2, 2, vec![0], vec![0], vec![1.]);
    let C = CscMatrix::new_from_triplets(2, 2, vec![0, 1, 1], vec![1, 0, 1], vec![1., 1., -1.]);
    let mut vars = vec![VariableInSdpa::InX(DecisionVariableInSdpaX::new(
        Sign::Positive,
        0.,
        EntryInX::new(0, 0, 1),
    ))];

    // a free variable that appears nowhere
    let k = if padded { 1 } else { 0 };
    if padded {
        vars.push(VariableInSdpa::Free(0));
    }
    let B = CscMatrix::zeros((1, k));

    SdpaFreeFormat::new(blocks, vec![A0], B, vec![1.], C, vec![0.; k], 0., vars).unwrap()
}

#[test]
fn test_no_free_variables() {
    let mut solver = SdpSolver::new(NativeSdpEngine::new());
    let direct = solver.solve(&no_free_data(false), &SolverOptions::new()).unwrap();

    assert_eq!(direct.solution_result, SolutionResult::SolutionFound);
    assert!(f64::abs(direct.optimal_cost + 1.) <= 1e-6);
    assert!(f64::abs(direct.x_val[0] - 1.) <= 1e-6);
    assert_eq!(direct.solver_details.y_val.len(), 1);

    // a zero column in B has rank zero, so the nullspace transform is
    // the identity and the padded variable comes back as zero
    let padded = solver.solve(&no_free_data(true), &SolverOptions::new()).unwrap();
    assert_eq!(padded.solution_result, SolutionResult::SolutionFound);
    assert!(f64::abs(padded.optimal_cost - direct.optimal_cost) <= 1e-6);
    assert!(f64::abs(padded.x_val[0] - direct.x_val[0]) <= 1e-6);
    assert_eq!(padded.x_val[1], 0.);
}

#[test]
fn test_no_free_variables_ignores_method() {
    let mut options = SolverOptions::new();
    options.set_remove_free_variable_method(RemoveFreeVariableMethod::LorentzConeSlack);
    let mut solver = SdpSolver::new(NativeSdpEngine::new());
    let result = solver.solve(&no_free_data(false), &options).unwrap();

    // no block is appended
    assert_eq!(result.solver_details.Z_val.size(), (2, 2));
    assert_eq!(result.solver_details.y_val.len(), 1);
}

#[test]
fn test_bad_method_value() {
    let mut options = SolverOptions::new();
    options.set_int(REMOVE_FREE_VARIABLE_METHOD, 0);
    let mut solver = SdpSolver::new(NativeSdpEngine::new());

    // rejected even without free variables
    let err = solver.solve(&no_free_data(false), &options).unwrap_err();
    assert!(matches!(
        err,
        SolverError::Settings(SettingsError::BadRemoveFreeVariableMethod(0))
    ));
}

#[test]
fn test_string_option_rejected() {
    let mut options = SolverOptions::new();
    options.set_string("printlevel", "loud");
    let mut solver = SdpSolver::new(NativeSdpEngine::new());
    assert!(matches!(
        solver.solve(&toy_data(), &options),
        Err(SolverError::Settings(SettingsError::UnsupportedStringOption(_)))
    ));
}

#[test]
fn test_engine_options_forwarded() {
    let settings = CsdpSettingsBuilder::default()
        .remove_free_variable_method(RemoveFreeVariableMethod::Nullspace)
        .maxiter(1)
        .build()
        .unwrap();
    let mut solver = SdpSolver::new(NativeSdpEngine::new());
    let result = solver.solve(&toy_data(), &SolverOptions::from(&settings)).unwrap();

    assert_eq!(result.solution_result, SolutionResult::IterationLimit);
    assert_eq!(result.solver_details.return_code, 4);
    assert_eq!(solver.engine().iterations(), 1);
    // values are reported even without a solution
    assert_eq!(result.x_val.len(), 4);
}

#[test]
fn test_print_to_console() {
    let settings = CsdpSettingsBuilder::default()
        .print_to_console(true)
        .build()
        .unwrap();
    let mut solver = SdpSolver::new(NativeSdpEngine::new());
    let result = solver.solve(&toy_data(), &SolverOptions::from(&settings)).unwrap();
    assert_eq!(result.solution_result, SolutionResult::SolutionFound);
}

#[test]
fn test_infeasible_constraints() {
    // X₀₀ = -1 has no PSD solution
    let blocks = vec![BlockInX::new(BlockType::Diagonal, 2)];
    let A0 = CscMatrix::new_from_triplets(2, 2, vec![0], vec![0], vec![1.]);
    let C = CscMatrix::from_diagonal(&[-1., -1.]);
    let vars = vec![VariableInSdpa::InX(DecisionVariableInSdpaX::new(
        Sign::Positive,
        0.,
        EntryInX::new(0, 0, 0),
    ))];
    let data = SdpaFreeFormat::new(
        blocks,
        vec![A0],
        CscMatrix::zeros((1, 0)),
        vec![-1.],
        C,
        vec![],
        0.,
        vars,
    )
    .unwrap();

    let mut solver = SdpSolver::new(NativeSdpEngine::new());
    let result = solver.solve(&data, &SolverOptions::new()).unwrap();
    assert_eq!(result.solution_result, SolutionResult::InfeasibleConstraints);
    assert_eq!(result.optimal_cost, global_infeasible_cost::<f64>());
}

// max  2 s₀ - s₁
// s.t. X₀₀ = 1
//      X₀₁ - s₀ = 0
//      X₁₁ - s₀ - s₁ = 0
//      w + s₁ = 1
//      X ⪰ 0 (2 × 2 block),  w ≥ 0 (diagonal block)
//
// PSD forces s₀ + s₁ ≥ s₀², so the optimum is s = (1.5, 0.75) with
// objective 2.25.  `sign = -1` mirrors s₀, moving the optimum to s₀ = -1.5.
fn two_free_data(sign: f64) -> SdpaFreeFormat<f64> {
    let blocks = vec![
        BlockInX::new(BlockType::Matrix, 2),
        BlockInX::new(BlockType::Diagonal, 1),
    ];
    let A = vec![
        CscMatrix::new_from_triplets(3, 3, vec![0], vec![0], vec![1.]),
        CscMatrix::new_from_triplets(3, 3, vec![0, 1], vec![1, 0], vec![0.5, 0.5]),
        CscMatrix::new_from_triplets(3, 3, vec![1], vec![1], vec![1.]),
        CscMatrix::new_from_triplets(3, 3, vec![2], vec![2], vec![1.]),
    ];
    #[rustfmt::skip]
    let B = CscMatrix::new_from_triplets(
        4, 2,
        vec![1, 2, 2, 3],
        vec![0, 0, 1, 1],
        vec![-sign, -sign, -1., 1.],
    );
    let C = CscMatrix::zeros((3, 3));

    let entry = |block, row, col| {
        VariableInSdpa::InX(DecisionVariableInSdpaX::new(
            Sign::Positive,
            0.,
            EntryInX::new(block, row, col),
        ))
    };
    let vars = vec![
        entry(0, 0, 0),
        entry(0, 0, 1),
        entry(0, 1, 1),
        entry(1, 0, 0),
        VariableInSdpa::Free(0),
        VariableInSdpa::Free(1),
    ];

    let d = vec![2. * sign, -1.];
    SdpaFreeFormat::new(blocks, A, B, vec![1., 0., 0., 1.], C, d, 0., vars).unwrap()
}

// tr(Aᵢ X) + bᵢᵀ s - gᵢ for X and s read back from `x_val`
fn constraint_residuals(data: &SdpaFreeFormat<f64>, x_val: &[f64]) -> Vec<f64> {
    let mut X = Matrix::<f64>::zeros((3, 3));
    X[(0, 0)] = x_val[0];
    X[(0, 1)] = x_val[1];
    X[(1, 0)] = x_val[1];
    X[(1, 1)] = x_val[2];
    X[(2, 2)] = x_val[3];
    let s = &x_val[4..6];

    let mut r: Vec<f64> = data
        .A()
        .iter()
        .zip(data.g())
        .map(|(Ai, &gi)| Matrix::from_csc(Ai).dot(&X) - gi)
        .collect();
    Matrix::from_csc(data.B()).gemv(&mut r, s, 1., 1.);
    r
}

#[test]
fn test_two_free_variables_all_methods() {
    let methods = [
        RemoveFreeVariableMethod::Nullspace,
        RemoveFreeVariableMethod::TwoSlackVariables,
        RemoveFreeVariableMethod::LorentzConeSlack,
    ];

    for sign in [1., -1.] {
        let data = two_free_data(sign);
        let mut costs = vec![];

        for method in methods {
            let mut options = SolverOptions::new();
            options.set_remove_free_variable_method(method);
            let mut solver = SdpSolver::new(NativeSdpEngine::new());
            let result = solver.solve(&data, &options).unwrap();

            assert_eq!(result.solution_result, SolutionResult::SolutionFound);
            assert!(f64::abs(result.optimal_cost + 2.25) <= 1e-4);
            // X is rank one at the optimum, so s is only accurate to
            // about the square root of the gap tolerance
            assert!(f64::abs(result.x_val[4] - 1.5 * sign) <= 5e-4);
            assert!(f64::abs(result.x_val[5] - 0.75) <= 5e-4);
            assert!(constraint_residuals(&data, &result.x_val).norm_inf() <= 1e-5);
            costs.push(result.optimal_cost);
        }

        // B has rank 2: two of the four constraints reach the engine
        // after the projection
        let mut solver = SdpSolver::new(NativeSdpEngine::new());
        let result = solver.solve(&data, &SolverOptions::new()).unwrap();
        assert_eq!(result.solver_details.y_val.len(), 2);

        assert!(f64::abs(costs[0] - costs[1]) <= 1e-4);
        assert!(f64::abs(costs[0] - costs[2]) <= 1e-4);
    }
}

#[test]
fn test_full_rank_B_all_methods() {
    // max s - X₀₀ - X₁₁  s.t.  X₀₀ + s = 1.  B is square and full rank,
    // so the projection leaves the engine no constraints at all.
    let blocks = vec![BlockInX::new(BlockType::Matrix, 2)];
    let A0 = CscMatrix::new_from_triplets(2, 2, vec![0], vec![0], vec![1.]);
    let B = CscMatrix::new_from_triplets(1, 1, vec![0], vec![0], vec![1.]);
    let C = CscMatrix::from_diagonal(&[-1., -1.]);
    let vars = vec![VariableInSdpa::Free(0)];
    let data =
        SdpaFreeFormat::new(blocks, vec![A0], B, vec![1.], C, vec![1.], 0., vars).unwrap();

    let methods = [
        (RemoveFreeVariableMethod::Nullspace, 0),
        (RemoveFreeVariableMethod::TwoSlackVariables, 1),
        (RemoveFreeVariableMethod::LorentzConeSlack, 2),
    ];
    for (method, num_constraints) in methods {
        let mut options = SolverOptions::new();
        options.set_remove_free_variable_method(method);
        let mut solver = SdpSolver::new(NativeSdpEngine::new());
        let result = solver.solve(&data, &options).unwrap();

        assert_eq!(result.solution_result, SolutionResult::SolutionFound);
        assert!(f64::abs(result.optimal_cost + 1.) <= 1e-4);
        assert!(f64::abs(result.x_val[0] - 1.) <= 1e-4);
        assert_eq!(result.solver_details.y_val.len(), num_constraints);
    }
}
