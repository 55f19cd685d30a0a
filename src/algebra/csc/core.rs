#![allow(non_snake_case)]

use crate::algebra::{FloatT, SparseFormatError};
use itertools::Itertools;
use std::iter::zip;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```no_run
/// use sdpfree::algebra::CscMatrix;
///
/// let A : CscMatrix<f64> = CscMatrix::new(
///    3,                                // m
///    3,                                // n
///    vec![0, 2, 4, 7],                 //colptr
///    vec![0, 1, 0, 2, 0, 1, 2],        //rowval
///    vec![1., 2., 3., 4., 5., 6., 7.], //nzval
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
///
/// ```
///
/// Symmetric matrices (the cost and constraint matrices of an SDP) are
/// always stored with __both__ triangles populated.

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct CscMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSC format column pointer.
    ///
    /// Ths field should have length `n+1`. The last entry corresponds
    /// to the the number of nonzeros and should agree with the lengths
    /// of the `rowval` and `nzval` fields.
    pub colptr: Vec<usize>,
    /// vector of row indices
    pub rowval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__
    /// ensure that rows indices are all in bounds or that data is arranged
    /// such that entries within each column appear in order of increasing
    /// row index.   Responsibility for ensuring these conditions hold
    /// is left to the caller.
    ///

    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// allocate space for a sparse matrix with `nnz` elements
    ///
    /// To make an m x n matrix of zeros, use
    /// ```no_run
    /// use sdpfree::algebra::CscMatrix;
    /// let m = 3;
    /// let n = 4;
    /// let A : CscMatrix<f64> = CscMatrix::spalloc((m,n),0);
    /// ```

    pub fn spalloc(size: (usize, usize), nnz: usize) -> Self {
        let (m, n) = size;
        let mut colptr = vec![0; n + 1];
        let rowval = vec![0; nnz];
        let nzval = vec![T::zero(); nnz];
        colptr[n] = nnz;

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// Sparse matrix of zeros (no structural entries)
    pub fn zeros(size: (usize, usize)) -> Self {
        Self::spalloc(size, 0)
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        let colptr = (0usize..=n).collect();
        let rowval = (0usize..n).collect();
        let nzval = vec![T::one(); n];

        CscMatrix::new(n, n, colptr, rowval, nzval)
    }

    /// Square diagonal matrix with the entries of `d` on its diagonal.
    /// Zero entries of `d` are not stored.
    pub fn from_diagonal(d: &[T]) -> Self {
        let n = d.len();
        let I = (0..n).filter(|&i| d[i] != T::zero()).collect_vec();
        let V = I.iter().map(|&i| d[i]).collect_vec();
        Self::new_from_triplets(n, n, I.clone(), I, V)
    }

    /// Assemble a matrix from (row, column, value) triplets.
    ///
    /// Duplicate entries are summed.  Entries that sum to zero are
    /// kept as structural entries; see [`dropzeros`](Self::dropzeros).
    ///
    /// # Panics
    /// Panics if the triplet vectors have different lengths or if any
    /// index is out of bounds.
    pub fn new_from_triplets(m: usize, n: usize, I: Vec<usize>, J: Vec<usize>, V: Vec<T>) -> Self {
        assert_eq!(I.len(), J.len());
        assert_eq!(I.len(), V.len());
        assert!(I.iter().all(|&r| r < m));
        assert!(J.iter().all(|&c| c < n));

        // sort by column, then by row
        let mut order = (0..V.len()).collect_vec();
        order.sort_by_key(|&k| (J[k], I[k]));

        let mut colptr = vec![0usize; n + 1];
        let mut rowval = Vec::with_capacity(V.len());
        let mut nzval: Vec<T> = Vec::with_capacity(V.len());

        let mut last: Option<(usize, usize)> = None;
        for k in order {
            let (r, c) = (I[k], J[k]);
            if last == Some((r, c)) {
                // unwrap is fine since `last` is set only after a push
                *nzval.last_mut().unwrap() += V[k];
            } else {
                rowval.push(r);
                nzval.push(V[k]);
                colptr[c + 1] += 1;
                last = Some((r, c));
            }
        }

        for c in 0..n {
            colptr[c + 1] += colptr[c];
        }

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// matrix dimensions as (rows, columns)
    pub fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// true if the matrix is square
    pub fn is_square(&self) -> bool {
        self.m == self.n
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.colptr.is_empty()
            || (self.colptr.len() - 1) != self.n
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for colptr monotonicity
        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        //check for rowval monotonicity within each column
        for col in 0..self.n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            if self.rowval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowval);
            }
        }
        //check for row values out of bounds
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        Ok(())
    }

    /// Value stored at `(row, col)`, or `None` if there is no
    /// structural entry there.
    pub fn get_entry(&self, idx: (usize, usize)) -> Option<T> {
        let (row, col) = idx;
        assert!(row < self.m && col < self.n);
        let rng = self.colptr[col]..self.colptr[col + 1];
        self.rowval[rng.clone()]
            .binary_search(&row)
            .ok()
            .map(|k| self.nzval[rng.start + k])
    }

    /// Iterator over the structural entries of column `col` as
    /// `(row, value)` pairs in order of increasing row.
    pub fn col_entries(&self, col: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let rng = self.colptr[col]..self.colptr[col + 1];
        zip(&self.rowval[rng.clone()], &self.nzval[rng]).map(|(&r, &v)| (r, v))
    }

    /// Iterator over all structural entries as `(row, col, value)`,
    /// in column major order.
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        (0..self.n).flat_map(move |col| self.col_entries(col).map(move |(r, v)| (r, col, v)))
    }

    /// Remove structural entries that hold an exact zero.
    pub fn dropzeros(&mut self) {
        let mut writeidx = 0;
        let mut readidx = 0;
        for col in 0..self.n {
            let stop = self.colptr[col + 1];
            while readidx < stop {
                if self.nzval[readidx] != T::zero() {
                    self.rowval[writeidx] = self.rowval[readidx];
                    self.nzval[writeidx] = self.nzval[readidx];
                    writeidx += 1;
                }
                readidx += 1;
            }
            self.colptr[col + 1] = writeidx;
        }
        self.rowval.truncate(writeidx);
        self.nzval.truncate(writeidx);
    }

    /// True if the matrix is square and every structural entry is matched
    /// by an equal entry at the transposed position.
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        self.triplets().all(|(r, c, v)| match self.get_entry((c, r)) {
            Some(w) => w == v,
            None => v == T::zero(),
        })
    }
}

#[test]
fn test_triplets_sum_duplicates() {
    let A = CscMatrix::new_from_triplets(
        3,
        2,
        vec![2, 0, 0, 1],
        vec![1, 0, 0, 1],
        vec![4., 1., 2., 3.],
    );
    assert!(A.check_format().is_ok());
    assert_eq!(A.colptr, vec![0, 1, 3]);
    assert_eq!(A.rowval, vec![0, 1, 2]);
    assert_eq!(A.nzval, vec![3., 3., 4.]);
    assert_eq!(A.get_entry((2, 1)), Some(4.));
    assert_eq!(A.get_entry((2, 0)), None);
}

#[test]
fn test_dropzeros() {
    let mut A = CscMatrix::new_from_triplets(
        2,
        2,
        vec![0, 1, 0, 1],
        vec![0, 0, 1, 1],
        vec![1., 0., 0., 2.],
    );
    assert_eq!(A.nnz(), 4);
    A.dropzeros();
    assert!(A.check_format().is_ok());
    assert_eq!(A, CscMatrix::from_diagonal(&[1., 2.]));
}

#[test]
fn test_is_symmetric() {
    let A = CscMatrix::new_from_triplets(2, 2, vec![0, 1], vec![1, 0], vec![0.5, 0.5]);
    assert!(A.is_symmetric());
    let B = CscMatrix::new_from_triplets(2, 2, vec![0], vec![1], vec![0.5]);
    assert!(!B.is_symmetric());
}
