#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, FloatT};
use std::cmp::Ordering;

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// Frobenius inner product `Σᵢⱼ Aᵢⱼ Bᵢⱼ`.  For a symmetric `A`
    /// this is `tr(A B)`.
    ///
    /// # Panics
    /// Panics if the dimensions of the two matrices differ.
    pub fn dot(&self, B: &CscMatrix<T>) -> T {
        assert_eq!(self.size(), B.size());

        let mut out = T::zero();
        for col in 0..self.n {
            let (mut p, pend) = (self.colptr[col], self.colptr[col + 1]);
            let (mut q, qend) = (B.colptr[col], B.colptr[col + 1]);

            // merge over sorted row indices
            while p < pend && q < qend {
                match self.rowval[p].cmp(&B.rowval[q]) {
                    Ordering::Less => p += 1,
                    Ordering::Greater => q += 1,
                    Ordering::Equal => {
                        out += self.nzval[p] * B.nzval[q];
                        p += 1;
                        q += 1;
                    }
                }
            }
        }
        out
    }

    /// Linear combination `Σₖ cₖ Mₖ` of equally sized matrices.  Terms with
    /// a zero coefficient are skipped and exact zeros are dropped from
    /// the result.
    ///
    /// # Panics
    /// Panics if `coeffs` and `mats` differ in length or the matrices
    /// differ in size.
    pub fn linear_combination(size: (usize, usize), coeffs: &[T], mats: &[&CscMatrix<T>]) -> Self {
        assert_eq!(coeffs.len(), mats.len());

        let (mut I, mut J, mut V) = (Vec::new(), Vec::new(), Vec::new());
        for (&c, M) in coeffs.iter().zip(mats) {
            assert_eq!(M.size(), size);
            if c == T::zero() {
                continue;
            }
            for (r, col, v) in M.triplets() {
                I.push(r);
                J.push(col);
                V.push(c * v);
            }
        }
        let mut out = CscMatrix::new_from_triplets(size.0, size.1, I, J, V);
        out.dropzeros();
        out
    }
}

#[test]
fn test_frobenius_dot() {
    let A = CscMatrix::new_from_triplets(2, 2, vec![0, 1, 0], vec![0, 0, 1], vec![1., 2., 3.]);
    let B = CscMatrix::new_from_triplets(2, 2, vec![1, 0, 1], vec![0, 1, 1], vec![5., 7., 11.]);
    assert_eq!(A.dot(&B), 2. * 5. + 3. * 7.);
    assert_eq!(A.dot(&A), 1. + 4. + 9.);
}

#[test]
fn test_linear_combination() {
    let A = CscMatrix::from_diagonal(&[1., 2.]);
    let B = CscMatrix::from_diagonal(&[1., 1.]);
    let C = CscMatrix::linear_combination((2, 2), &[2., -2.], &[&A, &B]);
    assert_eq!(C.nnz(), 1);
    assert_eq!(C.get_entry((1, 1)), Some(2.));
}
