#![allow(non_snake_case)]

use super::ffi::*;
use crate::algebra::{CscMatrix, Matrix};
use crate::problem::{block_offsets, BlockInX, BlockType};
use crate::solver::core::{Block, BlockMatrix, EngineError, SdpProblem};
use libc::c_int;
use std::ffi::CStr;
use std::{mem, ptr, slice};

/// Zeroed C array of `len` elements that `free_prob` may release
unsafe fn calloc_array<T>(len: usize) -> *mut T {
    let p = libc::calloc(len.max(1), mem::size_of::<T>()) as *mut T;
    if p.is_null() {
        panic!("CSDP allocation of {} elements failed", len);
    }
    p
}

fn to_c_int(v: usize, what: &str) -> Result<c_int, EngineError> {
    c_int::try_from(v).map_err(|_| EngineError::BadInput(format!("{} too large", what)))
}

/// block index of every row of `X`
fn row_blocks(structure: &[BlockInX]) -> Vec<usize> {
    structure
        .iter()
        .enumerate()
        .flat_map(|(b, blk)| std::iter::repeat(b).take(blk.num_rows))
        .collect()
}

unsafe fn marshal_blockmatrix(structure: &[BlockInX], M: &CscMatrix<f64>) -> blockmatrix {
    let nblocks = structure.len();
    let blocks: *mut blockrec = calloc_array(nblocks + 1);

    for (b, blk) in structure.iter().enumerate() {
        let rec = &mut *blocks.add(b + 1);
        let size = blk.num_rows;
        rec.blocksize = size as c_int;
        match blk.blocktype {
            BlockType::Matrix => {
                rec.blockcategory = MATRIX;
                rec.data.mat = calloc_array(size * size);
            }
            BlockType::Diagonal => {
                rec.blockcategory = DIAG;
                rec.data.vec = calloc_array(size + 1);
            }
        }
    }

    let rowblock = row_blocks(structure);
    let offsets = block_offsets(structure);
    for (r, c, v) in M.triplets() {
        let b = rowblock[r];
        let (i, j) = (r - offsets[b] + 1, c - offsets[b] + 1);
        let rec = &mut *blocks.add(b + 1);
        let size = rec.blocksize as usize;
        if rec.blockcategory == MATRIX {
            *rec.data.mat.add(ijtok(i, j, size)) = v;
        } else if i == j {
            *rec.data.vec.add(i) = v;
        }
    }

    blockmatrix {
        nblocks: nblocks as c_int,
        blocks,
    }
}

unsafe fn marshal_constraints(structure: &[BlockInX], A: &[CscMatrix<f64>]) -> *mut constraintmatrix {
    let constraints: *mut constraintmatrix = calloc_array(A.len() + 1);
    let rowblock = row_blocks(structure);
    let offsets = block_offsets(structure);

    for (con, Ai) in A.iter().enumerate() {
        // upper triangle entries, 1-indexed within each block
        let mut by_block: Vec<Vec<(usize, usize, f64)>> = vec![Vec::new(); structure.len()];
        for (r, c, v) in Ai.triplets() {
            if r <= c && v != 0.0 {
                let b = rowblock[r];
                by_block[b].push((r - offsets[b] + 1, c - offsets[b] + 1, v));
            }
        }

        // prepend in reverse so the list runs in increasing block order
        let head = &mut (*constraints.add(con + 1)).blocks;
        for (b, entries) in by_block.iter().enumerate().rev() {
            if entries.is_empty() {
                continue;
            }
            let ne = entries.len();
            let blk: *mut sparseblock = calloc_array(1);
            let sb = &mut *blk;
            sb.entries = calloc_array(ne + 1);
            sb.iindices = calloc_array(ne + 1);
            sb.jindices = calloc_array(ne + 1);
            for (e, &(i, j, v)) in entries.iter().enumerate() {
                *sb.entries.add(e + 1) = v;
                *sb.iindices.add(e + 1) = i as c_int;
                *sb.jindices.add(e + 1) = j as c_int;
            }
            sb.numentries = ne as c_int;
            sb.blocknum = (b + 1) as c_int;
            sb.blocksize = structure[b].num_rows as c_int;
            sb.constraintnum = (con + 1) as c_int;
            sb.issparse = 1;
            sb.next = *head;
            *head = blk;
        }
    }
    constraints
}

/// Panics on block categories other than dense and diagonal
unsafe fn decode_blockmatrix(M: &blockmatrix) -> BlockMatrix<f64> {
    let blocks = (1..=M.nblocks as usize)
        .map(|b| {
            let rec = &*M.blocks.add(b);
            let size = rec.blocksize as usize;
            match rec.blockcategory {
                MATRIX => {
                    let data = slice::from_raw_parts(rec.data.mat, size * size);
                    Block::Dense(Matrix::new_from_slice((size, size), data))
                }
                DIAG => Block::Diagonal(slice::from_raw_parts(rec.data.vec.add(1), size).to_vec()),
                _ => panic!("unknown X block type"),
            }
        })
        .collect();
    BlockMatrix { blocks }
}

/// A CSDP problem and its solution arrays.  Everything is released with
/// `free_prob` when dropped.
pub(super) struct CsdpProblem {
    n: c_int,
    k: c_int,
    C: blockmatrix,
    a: *mut f64,
    constraints: *mut constraintmatrix,
    X: blockmatrix,
    y: *mut f64,
    Z: blockmatrix,
}

impl CsdpProblem {
    pub fn new(problem: &SdpProblem<f64>) -> Result<Self, EngineError> {
        let n = problem.num_X_rows();
        let k = problem.num_constraints();
        if problem.C.size() != (n, n) || problem.A.iter().any(|Ai| Ai.size() != (n, n)) {
            return Err(EngineError::BadInput("matrix sizes".to_string()));
        }
        if problem.A.len() != k || k == 0 {
            return Err(EngineError::BadInput("CSDP needs at least one constraint".to_string()));
        }
        let (nc, kc) = (to_c_int(n, "X")?, to_c_int(k, "constraint count")?);

        unsafe {
            let C = marshal_blockmatrix(&problem.X_blocks, &problem.C);
            let a: *mut f64 = calloc_array(k + 1);
            for (i, &v) in problem.rhs.iter().enumerate() {
                *a.add(i + 1) = v;
            }
            let constraints = marshal_constraints(&problem.X_blocks, &problem.A);

            let empty = blockmatrix {
                nblocks: 0,
                blocks: ptr::null_mut(),
            };
            let mut out = Self {
                n: nc,
                k: kc,
                C,
                a,
                constraints,
                X: empty,
                y: ptr::null_mut(),
                Z: empty,
            };
            initsoln(
                nc,
                kc,
                out.C,
                out.a,
                out.constraints,
                &mut out.X,
                &mut out.y,
                &mut out.Z,
            );
            Ok(out)
        }
    }

    /// Returns `(return code, primal objective, dual objective)`
    pub fn solve(&mut self, params: &CStr, constant_offset: f64) -> (i32, f64, f64) {
        let (mut pobj, mut dobj) = (0.0, 0.0);
        let code = unsafe {
            easy_sdp_params(
                params.as_ptr(),
                self.n,
                self.k,
                self.C,
                self.a,
                self.constraints,
                constant_offset,
                &mut self.X,
                &mut self.y,
                &mut self.Z,
                &mut pobj,
                &mut dobj,
            )
        };
        (code, pobj, dobj)
    }

    pub fn X(&self) -> BlockMatrix<f64> {
        unsafe { decode_blockmatrix(&self.X) }
    }

    pub fn Z(&self) -> BlockMatrix<f64> {
        unsafe { decode_blockmatrix(&self.Z) }
    }

    /// dual vector including the unused slot 0
    pub fn y(&self) -> Vec<f64> {
        unsafe { slice::from_raw_parts(self.y, self.k as usize + 1).to_vec() }
    }
}

impl Drop for CsdpProblem {
    fn drop(&mut self) {
        unsafe {
            free_prob(
                self.n,
                self.k,
                self.C,
                self.a,
                self.constraints,
                self.X,
                self.y,
                self.Z,
            );
        }
    }
}
