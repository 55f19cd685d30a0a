#![allow(non_snake_case)]

#[cfg(feature = "serde")]
#[test]
fn test_json_io() {
    use sdpfree::{algebra::*, problem::*, solver::*};
    use std::io::{Seek, SeekFrom};

    let blocks = vec![BlockInX::new(BlockType::Matrix, 2)];
    let A0 = CscMatrix::new_from_triplets(2, 2, vec![0], vec![0], vec![1.]);
    let A1 = CscMatrix::new_from_triplets(2, 2, vec![0, 1], vec![1, 0], vec![0.5, 0.5]);
    let B = CscMatrix::new_from_triplets(2, 1, vec![1], vec![0], vec![-1.]);
    let C = CscMatrix::new_from_triplets(2, 2, vec![1], vec![1], vec![-1.]);
    let vars = vec![
        VariableInSdpa::Free(0),
        VariableInSdpa::Constant(3.),
    ];
    let data =
        SdpaFreeFormat::new(blocks, vec![A0, A1], B, vec![1., 0.], C, vec![2.], 0., vars).unwrap();

    let mut solver = SdpSolver::new(NativeSdpEngine::new());
    let result = solver.solve(&data, &SolverOptions::new()).unwrap();

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    data.write_to_file(&mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let data2 = SdpaFreeFormat::<f64>::read_from_file(&mut file).unwrap();
    let result2 = solver.solve(&data2, &SolverOptions::new()).unwrap();

    assert_eq!(result.x_val, result2.x_val);
    assert_eq!(result.optimal_cost, result2.optimal_cost);

    // a truncated file is rejected
    let mut file = tempfile::tempfile().unwrap();
    data.write_to_file(&mut file).unwrap();
    file.set_len(10).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    assert!(SdpaFreeFormat::<f64>::read_from_file(&mut file).is_err());
}
