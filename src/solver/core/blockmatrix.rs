#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, FloatT, Matrix};
use crate::problem::{BlockInX, BlockType, EntryInX};

/// One diagonal block of an engine iterate.
#[derive(Debug, Clone, PartialEq)]
pub enum Block<T> {
    /// square block stored densely
    Dense(Matrix<T>),
    /// block stored as its diagonal only
    Diagonal(Vec<T>),
}

impl<T> Block<T>
where
    T: FloatT,
{
    pub fn num_rows(&self) -> usize {
        match self {
            Block::Dense(M) => M.nrows(),
            Block::Diagonal(v) => v.len(),
        }
    }

    pub fn blocktype(&self) -> BlockType {
        match self {
            Block::Dense(_) => BlockType::Matrix,
            Block::Diagonal(_) => BlockType::Diagonal,
        }
    }

    /// entry `(row, col)` relative to the block.  Off-diagonal entries
    /// of a diagonal block are zero.
    pub fn entry(&self, row: usize, col: usize) -> T {
        match self {
            Block::Dense(M) => M[(row, col)],
            Block::Diagonal(v) => {
                if row == col {
                    v[row]
                } else {
                    T::zero()
                }
            }
        }
    }
}

/// Block diagonal symmetric matrix in the layout an SDP engine returns
/// for its primal matrix `X` and dual slack `Z`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMatrix<T> {
    pub blocks: Vec<Block<T>>,
}

impl<T> BlockMatrix<T>
where
    T: FloatT,
{
    /// `α I` with the given block structure
    pub fn scaled_identity(structure: &[BlockInX], alpha: T) -> Self {
        let blocks = structure
            .iter()
            .map(|b| match b.blocktype {
                BlockType::Matrix => {
                    let mut M = Matrix::identity(b.num_rows);
                    M.data.iter_mut().for_each(|v| *v *= alpha);
                    Block::Dense(M)
                }
                BlockType::Diagonal => Block::Diagonal(vec![alpha; b.num_rows]),
            })
            .collect();
        Self { blocks }
    }

    pub fn zeros(structure: &[BlockInX]) -> Self {
        Self::scaled_identity(structure, T::zero())
    }

    /// block structure of this matrix
    pub fn structure(&self) -> Vec<BlockInX> {
        self.blocks
            .iter()
            .map(|b| BlockInX::new(b.blocktype(), b.num_rows()))
            .collect()
    }

    /// total number of rows
    pub fn num_rows(&self) -> usize {
        self.blocks.iter().map(|b| b.num_rows()).sum()
    }

    /// value of a single addressed entry
    pub fn entry(&self, e: &EntryInX) -> T {
        self.blocks[e.block_index].entry(e.row_index_in_block, e.column_index_in_block)
    }

    /// Full `n × n` sparse copy.  Exact zeros are not stored, so the
    /// first stored entry of a column is its first nonzero.
    pub fn to_csc(&self) -> CscMatrix<T> {
        let n = self.num_rows();
        let mut colptr = Vec::with_capacity(n + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        colptr.push(0);

        let mut offset = 0;
        for block in &self.blocks {
            match block {
                Block::Dense(M) => {
                    for col in 0..M.ncols() {
                        for (r, &v) in M.col_slice(col).iter().enumerate() {
                            if v != T::zero() {
                                rowval.push(offset + r);
                                nzval.push(v);
                            }
                        }
                        colptr.push(rowval.len());
                    }
                }
                Block::Diagonal(diag) => {
                    for (r, &v) in diag.iter().enumerate() {
                        if v != T::zero() {
                            rowval.push(offset + r);
                            nzval.push(v);
                        }
                        colptr.push(rowval.len());
                    }
                }
            }
            offset += block.num_rows();
        }
        CscMatrix::new(n, n, colptr, rowval, nzval)
    }

    /// Full `n × n` dense copy
    pub fn to_dense(&self) -> Matrix<T> {
        let n = self.num_rows();
        let mut M = Matrix::zeros((n, n));
        let mut offset = 0;
        for block in &self.blocks {
            let nb = block.num_rows();
            match block {
                Block::Dense(B) => {
                    for j in 0..nb {
                        for i in 0..nb {
                            M[(offset + i, offset + j)] = B[(i, j)];
                        }
                    }
                }
                Block::Diagonal(diag) => {
                    for (i, &v) in diag.iter().enumerate() {
                        M[(offset + i, offset + i)] = v;
                    }
                }
            }
            offset += nb;
        }
        M
    }

    /// Extract the blocks of a full dense matrix.  Entries outside the
    /// block structure (and off the diagonal of diagonal blocks) are
    /// ignored.
    pub fn from_dense(structure: &[BlockInX], M: &Matrix<T>) -> Self {
        let mut offset = 0;
        let mut blocks = Vec::with_capacity(structure.len());
        for b in structure {
            let nb = b.num_rows;
            let block = match b.blocktype {
                BlockType::Matrix => {
                    let mut B = Matrix::zeros((nb, nb));
                    for j in 0..nb {
                        for i in 0..nb {
                            B[(i, j)] = M[(offset + i, offset + j)];
                        }
                    }
                    Block::Dense(B)
                }
                BlockType::Diagonal => {
                    Block::Diagonal((0..nb).map(|i| M[(offset + i, offset + i)]).collect())
                }
            };
            blocks.push(block);
            offset += nb;
        }
        Self { blocks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> BlockMatrix<f64> {
        BlockMatrix {
            blocks: vec![
                Block::Dense(Matrix::from(&[[1., 0.], [0., 2.]])),
                Block::Diagonal(vec![0., 3.]),
            ],
        }
    }

    #[test]
    fn test_entry_access() {
        let X = example();
        assert_eq!(X.num_rows(), 4);
        assert_eq!(X.entry(&EntryInX::new(0, 1, 1)), 2.);
        assert_eq!(X.entry(&EntryInX::new(1, 1, 1)), 3.);
        assert_eq!(X.blocks[1].entry(0, 1), 0.);
    }

    #[test]
    fn test_to_csc_drops_zeros() {
        let S = example().to_csc();
        assert!(S.check_format().is_ok());
        assert_eq!(S.size(), (4, 4));
        assert_eq!(S.nnz(), 3);
        assert_eq!(S.get_entry((3, 3)), Some(3.));
        assert_eq!(S.get_entry((2, 2)), None);
    }

    #[test]
    fn test_dense_round_trip() {
        let X = example();
        let M = X.to_dense();
        assert_eq!(M[(1, 1)], 2.);
        assert_eq!(M[(3, 3)], 3.);
        assert_eq!(BlockMatrix::from_dense(&X.structure(), &M), X);
    }
}
