#![allow(non_snake_case)]

use crate::algebra::{DenseFactorizationError, FloatT, Matrix, MatrixTriangle};

/// Dense Cholesky factorization `A = L Lᵀ` of a symmetric positive
/// definite matrix.  Only the lower triangle of the input is read.
pub struct CholeskyEngine<T> {
    /// lower triangular factor (stored as square dense)
    pub L: Matrix<T>,
}

impl<T> CholeskyEngine<T>
where
    T: FloatT,
{
    pub fn new(n: usize) -> Self {
        let L = Matrix::<T>::zeros((n, n));
        Self { L }
    }

    /// Factor `A`.  Fails with the index of the first nonpositive
    /// pivot if `A` is not numerically positive definite.
    pub fn factor(&mut self, A: &Matrix<T>) -> Result<(), DenseFactorizationError> {
        if A.size() != self.L.size() {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }
        let n = A.nrows();
        if n == 0 {
            return Ok(());
        }

        // ?potrf factors in place, so copy the tril part
        // of A onto L and factor that
        let L = &mut self.L;
        L.data.fill(T::zero());
        for j in 0..n {
            for i in j..n {
                L[(i, j)] = A[(i, j)];
            }
        }

        // standard BLAS ?potrf arguments for computing
        // cholesky decomposition
        let uplo = MatrixTriangle::Tril.as_blas_char();
        let An = n.try_into().unwrap();
        let a = &mut L.data;
        let lda = An;
        let info = &mut 0_i32; // output info

        T::xpotrf(uplo, An, a, lda, info);

        // info > 0 is the 1-based index of the failed pivot
        if *info != 0 {
            let pivot = usize::try_from(*info).map_or(0, |i| i - 1);
            return Err(DenseFactorizationError::Cholesky(pivot));
        }
        Ok(())
    }

    /// Solve `A x = b` in place using the computed factors.
    pub fn solve(&self, b: &mut [T]) {
        assert_eq!(b.len(), self.L.nrows());
        self.solve_columns(b, 1);
    }

    /// Inverse of the factored matrix.
    pub fn inverse(&self) -> Matrix<T> {
        let n = self.L.nrows();
        let mut Ainv = Matrix::identity(n);
        self.solve_columns(&mut Ainv.data, n);
        Ainv.symmetrize();
        Ainv
    }

    // B ← A⁻¹ B for an n × nrhs column major B
    fn solve_columns(&self, B: &mut [T], nrhs: usize) {
        let n = self.L.nrows();
        if n == 0 || nrhs == 0 {
            return;
        }

        // standard BLAS ?potrs arguments for computing
        // post factorization triangular solve
        let uplo = MatrixTriangle::Tril.as_blas_char();
        let nrhs = nrhs.try_into().unwrap();
        let An = n.try_into().unwrap();
        let a = &self.L.data;
        let lda = An;
        let ldb = An;
        let info = &mut 0_i32; // output info

        T::xpotrs(uplo, An, nrhs, a, lda, B, ldb, info);

        assert_eq!(*info, 0);
    }
}

#[test]
fn test_cholesky() {
    use crate::algebra::VectorMath;

    #[rustfmt::skip]
    let S = Matrix::from(
        &[[ 8., -2., 4.],
          [-2., 12., 2.],
          [ 4.,  2., 6.]]);

    let mut eng = CholeskyEngine::<f64>::new(3);
    assert!(eng.factor(&S).is_ok());

    let M = Matrix::mul(&eng.L, &eng.L.transpose());
    assert!(M.data.norm_inf_diff(&S.data) < 1e-12);

    let I = Matrix::mul(&S, &eng.inverse());
    assert!(I.data.norm_inf_diff(&Matrix::<f64>::identity(3).data) < 1e-12);
}

#[test]
fn test_cholesky_indefinite() {
    let S = Matrix::from(&[[1., 2.], [2., 1.]]);
    let mut eng = CholeskyEngine::<f64>::new(2);
    assert_eq!(eng.factor(&S), Err(DenseFactorizationError::Cholesky(1)));
}

#[test]
fn test_cholesky_solve_reads_lower_triangle() {
    use crate::algebra::VectorMath;

    // garbage in the strict upper triangle is never referenced
    #[rustfmt::skip]
    let S = Matrix::from(
        &[[ 4., 99.],
          [ 2.,  3.]]);
    let mut eng = CholeskyEngine::<f64>::new(2);
    assert!(eng.factor(&S).is_ok());
    assert_eq!(eng.L[(0, 1)], 0.);

    // [4 2; 2 3] x = [8, 7]  =>  x = [1.25, 1.5]
    let mut b = vec![8., 7.];
    eng.solve(&mut b);
    assert!(b.dist(&[1.25, 1.5]) < 1e-12);

    let mut empty = CholeskyEngine::<f64>::new(0);
    assert!(empty.factor(&Matrix::zeros((0, 0))).is_ok());
    assert_eq!(empty.inverse().size(), (0, 0));
}
