#![allow(non_snake_case)]

use super::{first_nonzero_in_column, rows_of, RecoverFreeVariables};
use crate::algebra::*;
use crate::problem::{BlockInX, BlockType, SdpaFreeFormat};
use crate::solver::core::SdpProblem;
use std::marker::PhantomData;

// s = p - q with p, q ≥ 0, each held in an appended diagonal block:
//
//   X̂ = diag(X, diag(p), diag(q))
//   Ĉ  = diag(C, diag(d), -diag(d))
//   Âᵢ = diag(Aᵢ, diag(bᵢ), -diag(bᵢ))

/// Recovery of `s = p - q` from the two appended diagonal blocks
pub(crate) struct TwoSlackRecovery<T> {
    num_X_rows: usize,
    num_free: usize,
    phantom: PhantomData<T>,
}

/// `diag(v)` and `-diag(v)` for a sparse vector `v` of length `k`
fn slack_pair<T>(k: usize, v: &[(usize, T)]) -> (CscMatrix<T>, CscMatrix<T>)
where
    T: FloatT,
{
    let idx: Vec<usize> = v.iter().map(|&(i, _)| i).collect();
    let vals: Vec<T> = v.iter().map(|&(_, x)| x).collect();
    let negvals: Vec<T> = vals.iter().map(|&x| -x).collect();
    (
        CscMatrix::new_from_triplets(k, k, idx.clone(), idx.clone(), vals),
        CscMatrix::new_from_triplets(k, k, idx.clone(), idx, negvals),
    )
}

pub(crate) fn remove_by_two_slack<T>(data: &SdpaFreeFormat<T>) -> (SdpProblem<T>, TwoSlackRecovery<T>)
where
    T: FloatT,
{
    let k = data.num_free_variables();

    let mut X_blocks = data.X_blocks.clone();
    X_blocks.push(BlockInX::new(BlockType::Diagonal, k));
    X_blocks.push(BlockInX::new(BlockType::Diagonal, k));

    let d: Vec<(usize, T)> = data
        .d
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, v)| v != T::zero())
        .collect();
    let (Cp, Cq) = slack_pair(k, &d);
    let C = CscMatrix::blockdiag(&[&data.C, &Cp, &Cq]).unwrap();

    let A = data
        .A
        .iter()
        .zip(rows_of(&data.B))
        .map(|(Ai, bi)| {
            let (Ap, Aq) = slack_pair(k, &bi);
            CscMatrix::blockdiag(&[Ai, &Ap, &Aq]).unwrap()
        })
        .collect();

    let problem = SdpProblem {
        X_blocks,
        C,
        A,
        rhs: data.g.clone(),
        constant_offset: -data.constant_min_cost_term,
    };

    let recovery = TwoSlackRecovery {
        num_X_rows: data.num_X_rows,
        num_free: k,
        phantom: PhantomData,
    };
    (problem, recovery)
}

impl<T> RecoverFreeVariables<T> for TwoSlackRecovery<T>
where
    T: FloatT,
{
    fn recover(&self, _data: &SdpaFreeFormat<T>, X_hat: &CscMatrix<T>) -> Vec<T> {
        let (n, k) = (self.num_X_rows, self.num_free);
        (0..k)
            .map(|i| {
                first_nonzero_in_column(X_hat, n + i) - first_nonzero_in_column(X_hat, n + k + i)
            })
            .collect()
    }
}
