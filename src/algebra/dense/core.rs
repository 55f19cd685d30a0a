#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, FloatT, VectorMath};
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Matrix orientation marker
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum MatrixShape {
    /// Normal matrix orientation
    N,
    /// Transposed matrix orientation
    T,
}

/// Matrix shape marker for triangular matrices
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum MatrixTriangle {
    /// Upper triangular matrix
    Triu,
    /// Lower triangular matrix
    Tril,
}

impl MatrixShape {
    pub(crate) fn as_blas_char(&self) -> u8 {
        match self {
            MatrixShape::N => b'N',
            MatrixShape::T => b'T',
        }
    }
}

impl MatrixTriangle {
    pub(crate) fn as_blas_char(&self) -> u8 {
        match self {
            MatrixTriangle::Triu => b'U',
            MatrixTriangle::Tril => b'L',
        }
    }
}

/// Dense matrix in column major format
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct Matrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// vector of data in column major format
    pub data: Vec<T>,
}

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { m, n, data }
    }

    pub fn identity(n: usize) -> Self {
        let mut mat = Matrix::zeros((n, n));
        for i in 0..n {
            mat[(i, i)] = T::one();
        }
        mat
    }

    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert_eq!(m * n, src.len());
        Self {
            m,
            n,
            data: src.to_vec(),
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    pub fn nrows(&self) -> usize {
        self.m
    }

    pub fn ncols(&self) -> usize {
        self.n
    }

    pub fn is_square(&self) -> bool {
        self.m == self.n
    }

    #[inline]
    pub fn index_linear(&self, idx: (usize, usize)) -> usize {
        idx.0 + self.m * idx.1
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        assert!(col < self.n);
        &self.data[(col * self.m)..(col + 1) * self.m]
    }

    /// dense copy of a sparse matrix
    pub fn from_csc(A: &CscMatrix<T>) -> Self {
        let mut M = Matrix::zeros(A.size());
        for (r, c, v) in A.triplets() {
            M[(r, c)] = v;
        }
        M
    }

    /// sparse copy of this matrix, keeping only nonzero entries
    pub fn to_csc(&self) -> CscMatrix<T> {
        let mut colptr = Vec::with_capacity(self.n + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        colptr.push(0);
        for col in 0..self.n {
            for (r, &v) in self.col_slice(col).iter().enumerate() {
                if v != T::zero() {
                    rowval.push(r);
                    nzval.push(v);
                }
            }
            colptr.push(rowval.len());
        }
        CscMatrix::new(self.m, self.n, colptr, rowval, nzval)
    }

    /// transposed copy
    pub fn transpose(&self) -> Self {
        let mut Mt = Matrix::zeros((self.n, self.m));
        for j in 0..self.n {
            for i in 0..self.m {
                Mt[(j, i)] = self[(i, j)];
            }
        }
        Mt
    }

    /// Replace with the symmetric part `(M + Mᵀ)/2`
    pub fn symmetrize(&mut self) {
        assert!(self.is_square());
        let half = T::one() / (T::one() + T::one());
        for j in 0..self.n {
            for i in (j + 1)..self.n {
                let v = (self[(i, j)] + self[(j, i)]) * half;
                self[(i, j)] = v;
                self[(j, i)] = v;
            }
        }
    }

    /// Frobenius inner product `Σᵢⱼ Mᵢⱼ Bᵢⱼ`
    pub fn dot(&self, B: &Matrix<T>) -> T {
        assert_eq!(self.size(), B.size());
        self.data.dot(&B.data)
    }

    /// Frobenius norm
    pub fn norm_fro(&self) -> T {
        self.data.norm()
    }

    /// `self = a*X + b*self`
    pub fn axpby(&mut self, a: T, X: &Matrix<T>, b: T) {
        assert_eq!(self.size(), X.size());
        self.data.axpby(a, &X.data, b);
    }

    /// `y = a*M*x + b*y`
    pub fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.m);
        self._gemv(MatrixShape::N, y, x, a, b);
    }

    /// `y = a*Mᵀ*x + b*y`
    pub fn gemv_t(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.m);
        assert_eq!(y.len(), self.n);
        self._gemv(MatrixShape::T, y, x, a, b);
    }

    fn _gemv(&self, trans: MatrixShape, y: &mut [T], x: &[T], a: T, b: T) {
        if y.is_empty() {
            return;
        }
        // BLAS returns early here without scaling y
        if x.is_empty() {
            y.scale(b);
            return;
        }

        // standard BLAS ?gemv arguments for computing matrix-vector product
        let trans = trans.as_blas_char();
        let m = self.m.try_into().unwrap();
        let n = self.n.try_into().unwrap();
        let lda = m;
        let incx = 1;
        let incy = 1;

        T::xgemv(trans, m, n, a, &self.data, lda, x, incx, b, y, incy);
    }

    /// matrix product `A*B`
    pub fn mul(A: &Matrix<T>, B: &Matrix<T>) -> Matrix<T> {
        assert_eq!(A.n, B.m);
        let mut C = Matrix::zeros((A.m, B.n));
        if A.m == 0 || B.n == 0 || A.n == 0 {
            return C;
        }

        // standard BLAS ?gemm arguments for computing
        // general matrix-matrix multiply
        let transA = MatrixShape::N.as_blas_char();
        let transB = MatrixShape::N.as_blas_char();
        let m = A.m.try_into().unwrap();
        let n = B.n.try_into().unwrap();
        let k = A.n.try_into().unwrap();
        let (lda, ldb, ldc) = (m, k, m);

        #[rustfmt::skip]
        T::xgemm(transA, transB, m, n, k, T::one(), &A.data, lda, &B.data, ldb, T::zero(), &mut C.data, ldc);

        C
    }
}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    type Output = T;
    #[inline]
    fn index(&self, idx: (usize, usize)) -> &T {
        &self.data[self.index_linear(idx)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    #[inline]
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut T {
        let lidx = self.index_linear(idx);
        &mut self.data[lidx]
    }
}

impl<T, const R: usize, const C: usize> From<&[[T; C]; R]> for Matrix<T>
where
    T: FloatT,
{
    // from a row-major 2D array literal
    fn from(rows: &[[T; C]; R]) -> Matrix<T> {
        let mut M = Matrix::zeros((R, C));
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                M[(i, j)] = v;
            }
        }
        M
    }
}

#[test]
fn test_matrix_mul_and_transpose() {
    #[rustfmt::skip]
    let A = Matrix::from(
        &[[1., 2.],
          [3., 4.],
          [5., 6.]]);
    let At = A.transpose();
    let M = Matrix::mul(&At, &A);
    assert_eq!(M, Matrix::from(&[[35., 44.], [44., 56.]]));

    let mut y = vec![1., 1., 1.];
    A.gemv(&mut y, &[1., -1.], 1., 2.);
    assert_eq!(y, vec![1., 1., 1.]);

    let mut z = vec![0., 0.];
    A.gemv_t(&mut z, &[1., 0., 1.], 1., 0.);
    assert_eq!(z, vec![6., 8.]);
}

#[test]
fn test_blas_empty_dimensions() {
    // BLAS skips the beta scaling when the inner dimension is zero
    let A = Matrix::<f64>::zeros((2, 0));
    let mut y = vec![1., 2.];
    A.gemv(&mut y, &[], 1., 3.);
    assert_eq!(y, vec![3., 6.]);

    let mut z: Vec<f64> = vec![];
    A.gemv_t(&mut z, &[1., 1.], 1., 0.);
    assert!(z.is_empty());

    let B = Matrix::<f64>::zeros((0, 3));
    assert_eq!(Matrix::mul(&A, &B), Matrix::zeros((2, 3)));
}

#[test]
fn test_csc_conversions() {
    let A = Matrix::from(&[[1., 0.], [0., 2.]]);
    let S = A.to_csc();
    assert_eq!(S.nnz(), 2);
    assert_eq!(Matrix::from_csc(&S), A);
}
