#![allow(non_snake_case)]

use crate::algebra::{AsFloatT, FloatT, Matrix, MatrixShape, MatrixTriangle, VectorMath};
use std::cmp::min;

/// Rank revealing Householder QR factorization with column pivoting,
///
/// ```text
/// B P = Q R
/// ```
///
/// for a dense `m × k` matrix `B`, computed by LAPACK `?geqp3`.  `Q` is held
/// implicitly as a product of Householder reflectors stored below the
/// diagonal of `qr`, while `R` occupies the upper triangle.
pub struct QrFactors<T> {
    qr: Matrix<T>,
    tau: Vec<T>,
    /// column permutation: column `j` of `B P` is column `perm[j]` of `B`
    pub perm: Vec<usize>,
    /// numerical rank
    pub rank: usize,
}

impl<T> QrFactors<T>
where
    T: FloatT,
{
    pub fn new(B: &Matrix<T>) -> Self {
        let (m, k) = B.size();
        let mut qr = B.clone();
        let mut tau = vec![T::zero(); min(m, k)];

        // zeros mark every column as free to pivot
        let mut jpvt = vec![0_i32; k];

        if m > 0 && k > 0 {
            // standard LAPACK ?geqp3 arguments for computing
            // a column pivoted QR decomposition
            let mi = m.try_into().unwrap();
            let ki = k.try_into().unwrap();
            let lda = mi;
            let info = &mut 0_i32; // output info

            // workspace size query
            let mut work = vec![T::zero()];
            T::xgeqp3(mi, ki, &mut qr.data, lda, &mut jpvt, &mut tau, &mut work, -1, info);
            let lwork = work_size(work[0], 3 * k + 1);
            work.resize(lwork, T::zero());

            #[rustfmt::skip]
            T::xgeqp3(mi, ki, &mut qr.data, lda, &mut jpvt, &mut tau, &mut work, lwork.try_into().unwrap(), info);
            assert_eq!(*info, 0);
        }

        let perm: Vec<usize> = if k > 0 && m > 0 {
            jpvt.iter().map(|&j| (j - 1) as usize).collect()
        } else {
            (0..k).collect()
        };

        // same threshold convention as sparse QR codes: 20 (m + k) ε max‖bⱼ‖
        let maxnorm = (0..k)
            .map(|j| B.col_slice(j).norm())
            .fold(T::zero(), T::max);
        let factor: T = (20 * (m + k)).as_T();
        let threshold = factor * T::epsilon() * maxnorm;
        let rank = (0..tau.len())
            .take_while(|&j| qr[(j, j)].abs() > threshold)
            .count();

        Self {
            qr,
            tau,
            perm,
            rank,
        }
    }

    /// number of rows of the factored matrix
    pub fn nrows(&self) -> usize {
        self.qr.nrows()
    }

    /// number of columns of the factored matrix
    pub fn ncols(&self) -> usize {
        self.qr.ncols()
    }

    /// `x ← Qᵀ x`
    pub fn apply_qt(&self, x: &mut [T]) {
        assert_eq!(x.len(), self.nrows());
        self.ormqr(MatrixShape::T, x, 1);
    }

    /// `x ← Q x`
    pub fn apply_q(&self, x: &mut [T]) {
        assert_eq!(x.len(), self.nrows());
        self.ormqr(MatrixShape::N, x, 1);
    }

    // C ← op(Q) C for an m × ncols column major C
    fn ormqr(&self, trans: MatrixShape, C: &mut [T], ncols: usize) {
        let m = self.nrows();
        if self.tau.is_empty() || ncols == 0 {
            return;
        }

        // standard LAPACK ?ormqr arguments for applying
        // the reflectors of Q from the left
        let side = b'L';
        let trans = trans.as_blas_char();
        let mi = m.try_into().unwrap();
        let n = ncols.try_into().unwrap();
        let k = self.tau.len().try_into().unwrap();
        let lda = mi;
        let ldc = mi;
        let info = &mut 0_i32; // output info

        // workspace size query
        let mut work = vec![T::zero()];
        #[rustfmt::skip]
        T::xormqr(side, trans, mi, n, k, &self.qr.data, lda, &self.tau, C, ldc, &mut work, -1, info);
        let lwork = work_size(work[0], ncols);
        work.resize(lwork, T::zero());

        #[rustfmt::skip]
        T::xormqr(side, trans, mi, n, k, &self.qr.data, lda, &self.tau, C, ldc, &mut work, lwork.try_into().unwrap(), info);
        assert_eq!(*info, 0);
    }

    // y[..rank] ← op(R₁₁)⁻¹ y[..rank]
    fn trtrs(&self, trans: MatrixShape, y: &mut [T]) {
        if self.rank == 0 {
            return;
        }

        // standard LAPACK ?trtrs arguments for solving
        // against the leading upper triangular block of R
        let uplo = MatrixTriangle::Triu.as_blas_char();
        let trans = trans.as_blas_char();
        let diag = b'N';
        let n = self.rank.try_into().unwrap();
        let lda = self.nrows().try_into().unwrap();
        let ldb = y.len().try_into().unwrap();
        let info = &mut 0_i32; // output info

        T::xtrtrs(uplo, trans, diag, n, 1, &self.qr.data, lda, y, ldb, info);
        assert_eq!(*info, 0);
    }

    /// Basic least squares solution of `B x = b`.  Components of `x`
    /// outside the leading `rank` pivot columns are set to zero.
    pub fn solve_least_squares(&self, b: &[T]) -> Vec<T> {
        let mut y = b.to_vec();
        self.apply_qt(&mut y);
        self.trtrs(MatrixShape::N, &mut y);

        let mut x = vec![T::zero(); self.ncols()];
        for j in 0..self.rank {
            x[self.perm[j]] = y[j];
        }
        x
    }

    /// A solution `y` of `Bᵀ y = d` lying in the range of `B`.  Exact
    /// when `d` is in the range of `Bᵀ`.
    pub fn solve_transposed(&self, d: &[T]) -> Vec<T> {
        assert_eq!(d.len(), self.ncols());

        // R₁₁ᵀ w = (Pᵀd)[..rank], then y = Q [w; 0]
        let mut w = vec![T::zero(); self.nrows()];
        for (i, wi) in w.iter_mut().enumerate().take(self.rank) {
            *wi = d[self.perm[i]];
        }
        self.trtrs(MatrixShape::T, &mut w);
        self.apply_q(&mut w);
        w
    }

    /// Orthonormal basis for the null space of `Bᵀ`, i.e. the trailing
    /// `m - rank` columns of `Q`.
    pub fn nullspace_of_transpose(&self) -> Matrix<T> {
        let (m, r) = (self.nrows(), self.rank);
        let mut N = Matrix::zeros((m, m - r));
        for col in 0..(m - r) {
            N[(r + col, col)] = T::one();
        }
        self.ormqr(MatrixShape::N, &mut N.data, m - r);
        N
    }
}

// optimal LAPACK workspace length from a size query
fn work_size<T: FloatT>(query: T, minimum: usize) -> usize {
    query.to_usize().unwrap_or(minimum).max(minimum).max(1)
}
