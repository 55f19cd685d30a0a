#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, FloatT, MatrixConcatenationError};

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// Block diagonal concatenation
    ///
    /// ```text
    /// M = [A 0 0]
    ///     [0 B 0]
    ///     [0 0 C]
    /// ```
    /// Errors if given an empty list of blocks.
    pub fn blockdiag(mats: &[&Self]) -> Result<Self, MatrixConcatenationError> {
        if mats.is_empty() {
            return Err(MatrixConcatenationError::IncompatibleDimension);
        }

        let nrows: usize = mats.iter().map(|mat| mat.m).sum();
        let ncols: usize = mats.iter().map(|mat| mat.n).sum();
        let nnzM: usize = mats.iter().map(|mat| mat.nnz()).sum();

        let mut colptr = Vec::with_capacity(ncols + 1);
        let mut rowval = Vec::with_capacity(nnzM);
        let mut nzval = Vec::with_capacity(nnzM);
        colptr.push(0);

        // columns of each block appear in order, shifted
        // down by the rows of all preceding blocks
        let mut nextrow = 0;
        for mat in mats {
            for col in 0..mat.n {
                for (r, v) in mat.col_entries(col) {
                    rowval.push(r + nextrow);
                    nzval.push(v);
                }
                colptr.push(rowval.len());
            }
            nextrow += mat.m;
        }

        Ok(CscMatrix::new(nrows, ncols, colptr, rowval, nzval))
    }
}

#[test]
fn test_blockdiag() {
    let A = CscMatrix::new_from_triplets(2, 2, vec![0, 1, 1], vec![0, 0, 1], vec![1., 2., 3.]);
    let B = CscMatrix::from_diagonal(&[4.]);
    let M = CscMatrix::blockdiag(&[&A, &B, &A]).unwrap();

    assert!(M.check_format().is_ok());
    assert_eq!(M.size(), (5, 5));
    assert_eq!(M.nnz(), 7);
    assert_eq!(M.get_entry((1, 0)), Some(2.));
    assert_eq!(M.get_entry((2, 2)), Some(4.));
    assert_eq!(M.get_entry((4, 3)), Some(2.));
    assert_eq!(M.get_entry((4, 4)), Some(3.));
    assert_eq!(M.get_entry((0, 4)), None);

    assert!(CscMatrix::<f64>::blockdiag(&[]).is_err());
}
