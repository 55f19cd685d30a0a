#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Storage category of one diagonal block of the PSD matrix variable `X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BlockType {
    /// densely stored square block
    Matrix,
    /// block restricted to its diagonal
    Diagonal,
}

/// One block of the block-diagonal matrix `X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockInX {
    pub blocktype: BlockType,
    pub num_rows: usize,
}

impl BlockInX {
    pub fn new(blocktype: BlockType, num_rows: usize) -> Self {
        Self {
            blocktype,
            num_rows,
        }
    }
}

/// Address of a single entry of `X`.  For a diagonal block the row and
/// column index coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntryInX {
    pub block_index: usize,
    pub row_index_in_block: usize,
    pub column_index_in_block: usize,
}

impl EntryInX {
    pub fn new(block_index: usize, row_index_in_block: usize, column_index_in_block: usize) -> Self {
        Self {
            block_index,
            row_index_in_block,
            column_index_in_block,
        }
    }
}

/// Total number of rows of a block diagonal matrix
pub fn num_rows_of(blocks: &[BlockInX]) -> usize {
    blocks.iter().map(|b| b.num_rows).sum()
}

/// First row (and column) of each block within the full matrix
pub fn block_offsets(blocks: &[BlockInX]) -> Vec<usize> {
    blocks
        .iter()
        .scan(0, |next, b| {
            let start = *next;
            *next += b.num_rows;
            Some(start)
        })
        .collect()
}

#[test]
fn test_block_offsets() {
    let blocks = [
        BlockInX::new(BlockType::Matrix, 3),
        BlockInX::new(BlockType::Diagonal, 2),
        BlockInX::new(BlockType::Matrix, 1),
    ];
    assert_eq!(block_offsets(&blocks), vec![0, 3, 5]);
    assert_eq!(num_rows_of(&blocks), 6);
    assert!(block_offsets(&[]).is_empty());
}
