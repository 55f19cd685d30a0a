#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(clippy::too_many_arguments)]

// standard imports via blas-lapack-rs crates
extern crate blas_src;
extern crate lapack_src;
use lapack::*;
use blas::*;

/// Floating point types with BLAS / LAPACK support.  Sealed and
/// implemented for `f32` and `f64` only.
pub trait BlasFloatT:
    private::BlasFloatSealed
    + XpotrfScalar
    + XpotrsScalar
    + Xgeqp3Scalar
    + XormqrScalar
    + XtrtrsScalar
    + XgemmScalar
    + XgemvScalar
{}

impl BlasFloatT for f32 {}
impl BlasFloatT for f64 {}

mod private {
    pub trait BlasFloatSealed {}
    impl BlasFloatSealed for f32 {}
    impl BlasFloatSealed for f64 {}
}


// --------------------------------------
// ?potrf : Cholesky decomposition
// --------------------------------------

pub trait XpotrfScalar: Sized {
    fn xpotrf(
        uplo: u8, n: i32, a: &mut [Self], lda: i32, info: &mut i32
    );
}

macro_rules! impl_blas_xpotrf {
    ($T:ty, $XPOTRF:path) => {
        impl XpotrfScalar for $T {
            fn xpotrf(
                uplo: u8, n: i32, a: &mut [Self], lda: i32, info: &mut i32
            ) {
                unsafe{
                    $XPOTRF(
                        uplo, n, a, lda, info
                    );
                }
            }
        }
    };
}
impl_blas_xpotrf!(f32, spotrf);
impl_blas_xpotrf!(f64, dpotrf);


// --------------------------------------
// ?potrs : solve after Cholesky decomposition
// --------------------------------------

pub trait XpotrsScalar: Sized {
    fn xpotrs(
        uplo: u8, n: i32, nrhs: i32, a: &[Self], lda: i32, b: &mut [Self], ldb: i32, info: &mut i32
    );
}

macro_rules! impl_blas_xpotrs {
    ($T:ty, $XPOTRS:path) => {
        impl XpotrsScalar for $T {
            fn xpotrs(
                uplo: u8, n: i32, nrhs: i32, a: &[Self], lda: i32, b: &mut [Self], ldb: i32, info: &mut i32
            ) {
                unsafe{
                    $XPOTRS(
                        uplo, n, nrhs, a, lda, b, ldb, info
                    );
                }
            }
        }
    };
}
impl_blas_xpotrs!(f32, spotrs);
impl_blas_xpotrs!(f64, dpotrs);


// --------------------------------------
// ?geqp3 : QR decomposition with column pivoting
// --------------------------------------

pub trait Xgeqp3Scalar: Sized {
    fn xgeqp3(
        m: i32, n: i32, a: &mut [Self], lda: i32, jpvt: &mut [i32], tau: &mut [Self],
        work: &mut [Self], lwork: i32, info: &mut i32
    );
}

macro_rules! impl_blas_xgeqp3 {
    ($T:ty, $XGEQP3:path) => {
        impl Xgeqp3Scalar for $T {
            fn xgeqp3(
                m: i32, n: i32, a: &mut [Self], lda: i32, jpvt: &mut [i32], tau: &mut [Self],
                work: &mut [Self], lwork: i32, info: &mut i32
            ) {
                unsafe{
                    $XGEQP3(
                        m, n, a, lda, jpvt, tau, work, lwork, info
                    );
                }
            }
        }
    };
}
impl_blas_xgeqp3!(f32, sgeqp3);
impl_blas_xgeqp3!(f64, dgeqp3);


// --------------------------------------
// ?ormqr : multiply by Q from ?geqp3 / ?geqrf
// --------------------------------------

pub trait XormqrScalar: Sized {
    fn xormqr(
        side: u8, trans: u8, m: i32, n: i32, k: i32, a: &[Self], lda: i32, tau: &[Self],
        c: &mut [Self], ldc: i32, work: &mut [Self], lwork: i32, info: &mut i32
    );
}

macro_rules! impl_blas_xormqr {
    ($T:ty, $XORMQR:path) => {
        impl XormqrScalar for $T {
            fn xormqr(
                side: u8, trans: u8, m: i32, n: i32, k: i32, a: &[Self], lda: i32, tau: &[Self],
                c: &mut [Self], ldc: i32, work: &mut [Self], lwork: i32, info: &mut i32
            ) {
                unsafe{
                    $XORMQR(
                        side, trans, m, n, k, a, lda, tau, c, ldc, work, lwork, info
                    );
                }
            }
        }
    };
}
impl_blas_xormqr!(f32, sormqr);
impl_blas_xormqr!(f64, dormqr);


// --------------------------------------
// ?trtrs : triangular solve
// --------------------------------------

pub trait XtrtrsScalar: Sized {
    fn xtrtrs(
        uplo: u8, trans: u8, diag: u8, n: i32, nrhs: i32, a: &[Self], lda: i32,
        b: &mut [Self], ldb: i32, info: &mut i32
    );
}

macro_rules! impl_blas_xtrtrs {
    ($T:ty, $XTRTRS:path) => {
        impl XtrtrsScalar for $T {
            fn xtrtrs(
                uplo: u8, trans: u8, diag: u8, n: i32, nrhs: i32, a: &[Self], lda: i32,
                b: &mut [Self], ldb: i32, info: &mut i32
            ) {
                unsafe{
                    $XTRTRS(
                        uplo, trans, diag, n, nrhs, a, lda, b, ldb, info
                    );
                }
            }
        }
    };
}
impl_blas_xtrtrs!(f32, strtrs);
impl_blas_xtrtrs!(f64, dtrtrs);


// --------------------------------------
// ?gemm : matrix matrix multiply
// --------------------------------------

pub trait XgemmScalar: Sized {
    fn xgemm(
        transa: u8, transb: u8, m: i32, n: i32, k: i32, alpha: Self, a: &[Self],
        lda: i32, b: &[Self], ldb: i32, beta: Self, c: &mut [Self], ldc: i32
    );
}

macro_rules! impl_blas_gemm {
    ($T:ty, $XGEMM:path) => {
        impl XgemmScalar for $T {
            fn xgemm(
                transa: u8, transb: u8, m: i32, n: i32, k: i32, alpha: Self, a: &[Self],
                lda: i32, b: &[Self], ldb: i32, beta: Self, c: &mut [Self], ldc: i32
            ) {
                unsafe{
                    $XGEMM(
                        transa, transb, m, n, k, alpha, a,
                        lda, b, ldb, beta, c, ldc
                    );
                }
            }
        }
    };
}
impl_blas_gemm!(f32, sgemm);
impl_blas_gemm!(f64, dgemm);


// --------------------------------------
// ?gemv : matrix vector multiply (general shape)
// --------------------------------------

pub trait XgemvScalar: Sized {
    fn xgemv(
        trans: u8, m: i32, n: i32, alpha: Self, a: &[Self], lda: i32,
        x: &[Self], incx: i32, beta: Self, y: &mut [Self], incy: i32
    );
}

macro_rules! impl_blas_gemv {
    ($T:ty, $XGEMV:path) => {
        impl XgemvScalar for $T {
            fn xgemv(
                trans: u8, m: i32, n: i32, alpha: Self, a: &[Self], lda: i32,
                x: &[Self], incx: i32, beta: Self, y: &mut [Self], incy: i32
            ) {
                unsafe{
                    $XGEMV(
                        trans, m, n, alpha, a, lda, x, incx, beta, y, incy
                    );
                }
            }
        }
    };
}
impl_blas_gemv!(f32, sgemv);
impl_blas_gemv!(f64, dgemv);
