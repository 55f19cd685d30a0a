#![allow(non_snake_case)]

use super::{first_nonzero_in_column, rows_of, RecoverFreeVariables};
use crate::algebra::*;
use crate::problem::{BlockInX, BlockType, SdpaFreeFormat};
use crate::solver::core::SdpProblem;
use std::marker::PhantomData;

// ‖s‖ ≤ t is equivalent to
//
//   Y = [t  sᵀ]
//       [s  tI] ⪰ 0
//
// so s is held in the first row of an appended dense block Y of size
// k+1.  Y is only forced into this arrow shape by extra constraints
//
//   Y₀₀ - Yᵢᵢ = 0   for 1 ≤ i ≤ k
//   Yᵢⱼ = 0         for 1 ≤ i < j ≤ k

/// Recovery of `s` from the first row of the appended block
pub(crate) struct LorentzConeRecovery<T> {
    num_X_rows: usize,
    num_free: usize,
    phantom: PhantomData<T>,
}

/// `(k+1) × (k+1)` block with `v[i]/2` at `(0, i+1)` and `(i+1, 0)`
fn arrow_entries<T>(k: usize, v: &[(usize, T)]) -> CscMatrix<T>
where
    T: FloatT,
{
    let half: T = (0.5).as_T();
    let mut I = Vec::with_capacity(2 * v.len());
    let mut J = Vec::with_capacity(2 * v.len());
    let mut V = Vec::with_capacity(2 * v.len());
    for &(i, x) in v {
        I.extend([0, i + 1]);
        J.extend([i + 1, 0]);
        V.extend([x * half, x * half]);
    }
    CscMatrix::new_from_triplets(k + 1, k + 1, I, J, V)
}

pub(crate) fn remove_by_lorentz_cone<T>(
    data: &SdpaFreeFormat<T>,
) -> (SdpProblem<T>, LorentzConeRecovery<T>)
where
    T: FloatT,
{
    let n = data.num_X_rows;
    let k = data.num_free_variables();
    let half: T = (0.5).as_T();

    let mut X_blocks = data.X_blocks.clone();
    X_blocks.push(BlockInX::new(BlockType::Matrix, k + 1));

    let d: Vec<(usize, T)> = data
        .d
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, v)| v != T::zero())
        .collect();
    let Cy = arrow_entries(k, &d);
    let C = CscMatrix::blockdiag(&[&data.C, &Cy]).unwrap();

    let mut A: Vec<CscMatrix<T>> = data
        .A
        .iter()
        .zip(rows_of(&data.B))
        .map(|(Ai, bi)| {
            let Ay = arrow_entries(k, &bi);
            CscMatrix::blockdiag(&[Ai, &Ay]).unwrap()
        })
        .collect();
    let mut rhs = data.g.clone();

    let num_extra = k + k * k.saturating_sub(1) / 2;
    A.reserve(num_extra);
    rhs.reserve(num_extra);

    // Y₀₀ - Yᵢᵢ = 0
    for i in 1..=k {
        let E = CscMatrix::new_from_triplets(
            n + k + 1,
            n + k + 1,
            vec![n, n + i],
            vec![n, n + i],
            vec![T::one(), -T::one()],
        );
        A.push(E);
        rhs.push(T::zero());
    }

    // Yᵢⱼ = 0
    for i in 1..=k {
        for j in (i + 1)..=k {
            let E = CscMatrix::new_from_triplets(
                n + k + 1,
                n + k + 1,
                vec![n + i, n + j],
                vec![n + j, n + i],
                vec![half, half],
            );
            A.push(E);
            rhs.push(T::zero());
        }
    }

    let problem = SdpProblem {
        X_blocks,
        C,
        A,
        rhs,
        constant_offset: -data.constant_min_cost_term,
    };

    let recovery = LorentzConeRecovery {
        num_X_rows: n,
        num_free: k,
        phantom: PhantomData,
    };
    (problem, recovery)
}

impl<T> RecoverFreeVariables<T> for LorentzConeRecovery<T>
where
    T: FloatT,
{
    fn recover(&self, _data: &SdpaFreeFormat<T>, X_hat: &CscMatrix<T>) -> Vec<T> {
        let n = self.num_X_rows;
        (0..self.num_free)
            .map(|i| first_nonzero_in_column(X_hat, n + i + 1))
            .collect()
    }
}
