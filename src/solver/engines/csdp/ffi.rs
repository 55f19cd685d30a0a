//! Raw bindings to the CSDP C library.
//!
//! All arrays are 1-indexed: element 0 is allocated but unused.  Memory
//! passed to `easy_sdp` is released by `free_prob` with `free`, so it
//! must come from `malloc`/`calloc`.

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use libc::{c_char, c_double, c_int};

/// `enum blockcat`, held as a plain integer since values read back from
/// C are not trusted.  `PACKEDMATRIX` (2) is never produced for our input.
pub type blockcat = c_int;
pub const MATRIX: blockcat = 0;
pub const DIAG: blockcat = 1;

#[repr(C)]
#[derive(Clone, Copy)]
pub union blockdatarec {
    pub vec: *mut c_double,
    pub mat: *mut c_double,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct blockrec {
    pub data: blockdatarec,
    pub blockcategory: blockcat,
    pub blocksize: c_int,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct blockmatrix {
    pub nblocks: c_int,
    pub blocks: *mut blockrec,
}

#[repr(C)]
pub struct sparseblock {
    pub next: *mut sparseblock,
    pub nextbyblock: *mut sparseblock,
    pub entries: *mut c_double,
    pub iindices: *mut c_int,
    pub jindices: *mut c_int,
    pub numentries: c_int,
    pub blocknum: c_int,
    pub blocksize: c_int,
    pub constraintnum: c_int,
    pub issparse: c_int,
}

#[repr(C)]
pub struct constraintmatrix {
    pub blocks: *mut sparseblock,
}

/// Column major offset of 1-indexed entry `(i, j)` in a dense block
#[inline]
pub fn ijtok(i: usize, j: usize, blocksize: usize) -> usize {
    (j - 1) * blocksize + i - 1
}

extern "C" {
    pub fn initsoln(
        n: c_int,
        k: c_int,
        C: blockmatrix,
        a: *mut c_double,
        constraints: *mut constraintmatrix,
        pX0: *mut blockmatrix,
        py0: *mut *mut c_double,
        pZ0: *mut blockmatrix,
    );

    /// `easy_sdp` taking the parameter file path as its first argument.
    /// An empty path means default parameters.
    pub fn easy_sdp_params(
        params_pathname: *const c_char,
        n: c_int,
        k: c_int,
        C: blockmatrix,
        a: *mut c_double,
        constraints: *mut constraintmatrix,
        constant_offset: c_double,
        pX: *mut blockmatrix,
        py: *mut *mut c_double,
        pZ: *mut blockmatrix,
        ppobj: *mut c_double,
        pdobj: *mut c_double,
    ) -> c_int;

    pub fn free_prob(
        n: c_int,
        k: c_int,
        C: blockmatrix,
        a: *mut c_double,
        constraints: *mut constraintmatrix,
        X: blockmatrix,
        y: *mut c_double,
        Z: blockmatrix,
    );
}
