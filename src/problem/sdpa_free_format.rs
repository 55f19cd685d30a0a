#![allow(non_snake_case)]

use super::*;
use crate::algebra::*;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
/// Error type returned when canonical problem data is inconsistent
pub enum ProblemDataError {
    /// a field has dimensions that disagree with the block structure
    /// or with the number of constraints / free variables
    #[error("Incompatible dimension for field {0}")]
    IncompatibleDimension(&'static str),
    /// the cost or a constraint matrix is not symmetric
    #[error("Matrix {0} is not symmetric")]
    NotSymmetric(String),
    /// the cost or a constraint matrix has an entry outside the block
    /// diagonal structure of X (or off the diagonal of a diagonal block)
    #[error("Matrix {0} has entries outside the block structure of X")]
    OutsideBlockStructure(String),
    /// a decision variable addresses an entry that is not in X
    #[error("Decision variable {0} references an entry outside X")]
    BadEntryInX(usize),
    /// free variable indices must cover 0..k exactly once
    #[error("Decision variable {variable} has bad free variable index {index}")]
    BadFreeVariableIndex { variable: usize, index: usize },
    /// a free variable slot is not used by any decision variable
    #[error("Free variable {0} is not referenced by any decision variable")]
    UnusedFreeVariable(usize),
    /// malformed sparse matrix data
    #[error("Sparse format error: {0}")]
    SparseFormat(#[from] SparseFormatError),
}

/// Canonical problem in SDPA free format
///
/// ```text
/// max  tr(C X) + dᵀs
/// s.t. tr(Aᵢ X) + bᵢᵀs = gᵢ,  i = 0..m
///      X ⪰ 0
///      s free
/// ```
///
/// where `X` is block diagonal with the structure `X_blocks`, `bᵢᵀ` is the
/// `i`-th row of `B` and every original decision variable is mapped to an
/// entry of `X`, a constant or a slot of `s` by `prog_var_in_sdpa`.
///
/// The canonical problem maximizes; the cost of the originating
/// minimization problem is `constant_min_cost_term - (tr(C X) + dᵀs)`.
///
/// The data is immutable once constructed.  Use [`SdpaFreeFormat::new`],
/// which checks the invariants listed on [`ProblemDataError`].
#[derive(Debug, Clone)]
pub struct SdpaFreeFormat<T> {
    pub(crate) X_blocks: Vec<BlockInX>,
    pub(crate) A: Vec<CscMatrix<T>>,
    pub(crate) B: CscMatrix<T>,
    pub(crate) g: Vec<T>,
    pub(crate) C: CscMatrix<T>,
    pub(crate) d: Vec<T>,
    pub(crate) constant_min_cost_term: T,
    pub(crate) prog_var_in_sdpa: Vec<VariableInSdpa<T>>,
    pub(crate) num_X_rows: usize,
}

impl<T> SdpaFreeFormat<T>
where
    T: FloatT,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        X_blocks: Vec<BlockInX>,
        A: Vec<CscMatrix<T>>,
        B: CscMatrix<T>,
        g: Vec<T>,
        C: CscMatrix<T>,
        d: Vec<T>,
        constant_min_cost_term: T,
        prog_var_in_sdpa: Vec<VariableInSdpa<T>>,
    ) -> Result<Self, ProblemDataError> {
        let num_X_rows = num_rows_of(&X_blocks);
        let data = Self {
            X_blocks,
            A,
            B,
            g,
            C,
            d,
            constant_min_cost_term,
            prog_var_in_sdpa,
            num_X_rows,
        };
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> Result<(), ProblemDataError> {
        let n = self.num_X_rows;
        let m = self.g.len();
        let k = self.B.n;

        if self.C.size() != (n, n) {
            return Err(ProblemDataError::IncompatibleDimension("C"));
        }
        if self.A.len() != m || self.A.iter().any(|Ai| Ai.size() != (n, n)) {
            return Err(ProblemDataError::IncompatibleDimension("A"));
        }
        if self.B.m != m {
            return Err(ProblemDataError::IncompatibleDimension("B"));
        }
        if self.d.len() != k {
            return Err(ProblemDataError::IncompatibleDimension("d"));
        }

        self.B.check_format()?;
        self.check_block_matrix(&self.C, "C".to_string())?;
        for (i, Ai) in self.A.iter().enumerate() {
            self.check_block_matrix(Ai, format!("A[{}]", i))?;
        }

        self.check_variable_mapping()
    }

    fn check_block_matrix(&self, M: &CscMatrix<T>, name: String) -> Result<(), ProblemDataError> {
        M.check_format()?;
        if !M.is_symmetric() {
            return Err(ProblemDataError::NotSymmetric(name));
        }

        // block index of every row of X
        let rowblock: Vec<usize> = self
            .X_blocks
            .iter()
            .enumerate()
            .flat_map(|(b, blk)| std::iter::repeat(b).take(blk.num_rows))
            .collect();

        for (r, c, _) in M.triplets() {
            let b = rowblock[r];
            let outside = rowblock[c] != b
                || (self.X_blocks[b].blocktype == BlockType::Diagonal && r != c);
            if outside {
                return Err(ProblemDataError::OutsideBlockStructure(name));
            }
        }
        Ok(())
    }

    fn check_variable_mapping(&self) -> Result<(), ProblemDataError> {
        let k = self.num_free_variables();
        let mut used = vec![false; k];

        for (variable, var) in self.prog_var_in_sdpa.iter().enumerate() {
            match var {
                VariableInSdpa::InX(v) => {
                    let e = &v.entry_in_X;
                    let Some(block) = self.X_blocks.get(e.block_index) else {
                        return Err(ProblemDataError::BadEntryInX(variable));
                    };
                    let in_block = e.row_index_in_block < block.num_rows
                        && e.column_index_in_block < block.num_rows;
                    let on_diag = e.row_index_in_block == e.column_index_in_block;
                    if !in_block || (block.blocktype == BlockType::Diagonal && !on_diag) {
                        return Err(ProblemDataError::BadEntryInX(variable));
                    }
                }
                VariableInSdpa::Constant(_) => {}
                VariableInSdpa::Free(index) => {
                    let index = *index;
                    if index >= k || used[index] {
                        return Err(ProblemDataError::BadFreeVariableIndex { variable, index });
                    }
                    used[index] = true;
                }
            }
        }

        match used.iter().position(|&u| !u) {
            Some(unused) => Err(ProblemDataError::UnusedFreeVariable(unused)),
            None => Ok(()),
        }
    }

    /// Number of rows of the matrix variable `X`
    pub fn num_X_rows(&self) -> usize {
        self.num_X_rows
    }

    /// Number of free variables `k`
    pub fn num_free_variables(&self) -> usize {
        self.B.n
    }

    /// Number of equality constraints `m`
    pub fn num_constraints(&self) -> usize {
        self.g.len()
    }

    /// Number of decision variables in the originating problem
    pub fn num_prog_vars(&self) -> usize {
        self.prog_var_in_sdpa.len()
    }

    pub fn X_blocks(&self) -> &[BlockInX] {
        &self.X_blocks
    }

    pub fn A(&self) -> &[CscMatrix<T>] {
        &self.A
    }

    /// coefficients of the free variables, one row per constraint
    pub fn B(&self) -> &CscMatrix<T> {
        &self.B
    }

    /// constraint right hand side
    pub fn g(&self) -> &[T] {
        &self.g
    }

    pub fn C(&self) -> &CscMatrix<T> {
        &self.C
    }

    /// cost on the free variables
    pub fn d(&self) -> &[T] {
        &self.d
    }

    pub fn constant_min_cost_term(&self) -> T {
        self.constant_min_cost_term
    }

    pub fn prog_var_in_sdpa(&self) -> &[VariableInSdpa<T>] {
        &self.prog_var_in_sdpa
    }
}
