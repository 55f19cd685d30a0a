#![allow(non_snake_case)]

use sdpfree::{algebra::*, io::ConfigurablePrintTarget, problem::*, solver::*};

fn test_print_data() -> SdpaFreeFormat<f64> {
    // max 2 s - X₀₀  s.t.  X₀₀ - s = 0,  X₀₀ + X₁₁ = 1  (X diagonal)
    let blocks = vec![BlockInX::new(BlockType::Diagonal, 2)];
    let A0 = CscMatrix::new_from_triplets(2, 2, vec![0], vec![0], vec![1.]);
    let A1 = CscMatrix::identity(2);
    let B = CscMatrix::new_from_triplets(2, 1, vec![0], vec![0], vec![-1.]);
    let C = CscMatrix::new_from_triplets(2, 2, vec![0], vec![0], vec![-1.]);
    let vars = vec![VariableInSdpa::Free(0)];
    SdpaFreeFormat::new(blocks, vec![A0, A1], B, vec![0., 1.], C, vec![2.], 0., vars).unwrap()
}

fn test_print_solver() -> SdpSolver<NativeSdpEngine> {
    SdpSolver::new(NativeSdpEngine::new())
}

fn verbose() -> SolverOptions {
    let mut options = SolverOptions::new();
    options.print_to_console = true;
    options
}

#[test]
fn test_print_to_stdout() {
    let mut solver = test_print_solver();
    solver.engine_mut().print_to_stdout();
    solver.solve(&test_print_data(), &verbose()).unwrap();
}

#[test]
fn test_print_to_buffer() {
    let mut solver = test_print_solver();
    solver.engine_mut().print_to_buffer();
    let result = solver.solve(&test_print_data(), &verbose()).unwrap();
    assert_eq!(result.solution_result, SolutionResult::SolutionFound);

    let log = solver.engine_mut().get_print_buffer().unwrap();
    assert!(log.starts_with("iter"));
    assert!(log.contains("Success: SDP solved"));
}

#[test]
fn test_print_to_file() {
    use std::io::{Read, Seek};

    let mut solver = test_print_solver();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    solver.engine_mut().print_to_file(file.into_file());
    solver.solve(&test_print_data(), &verbose()).unwrap();

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("Primal objective value"));
}

#[test]
fn test_print_to_stream() {
    use std::io::{Read, Seek};

    let mut solver = test_print_solver();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    let stream = Box::new(file.into_file());

    solver.engine_mut().print_to_stream(stream);
    solver.solve(&test_print_data(), &verbose()).unwrap();

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("Primal objective value"));
}

#[test]
fn test_print_to_sink() {
    let mut solver = test_print_solver();
    solver.engine_mut().print_to_sink();
    solver.solve(&test_print_data(), &verbose()).unwrap();
    assert!(solver.engine_mut().get_print_buffer().is_err());
}

#[test]
fn test_quiet_buffer_stays_empty() {
    let mut solver = test_print_solver();
    solver.engine_mut().print_to_buffer();
    solver.solve(&test_print_data(), &SolverOptions::new()).unwrap();
    assert_eq!(solver.engine_mut().get_print_buffer().unwrap(), "");
}
