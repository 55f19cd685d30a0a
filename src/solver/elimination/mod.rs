//! Rewrite an [`SdpaFreeFormat`] problem with free variables into an
//! [`SdpProblem`] without them, and recover the free variables from the
//! engine's primal matrix afterwards.

#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, FloatT};
use crate::problem::SdpaFreeFormat;
use crate::solver::core::warnings::{warn_once, Advisory};
use crate::solver::core::{RemoveFreeVariableMethod, SdpProblem};
use enum_dispatch::enum_dispatch;

mod lorentz_cone;
mod nullspace;
mod two_slack;

pub(crate) use lorentz_cone::*;
pub(crate) use nullspace::*;
pub(crate) use two_slack::*;

/// Recovery of the free variables `s` of the canonical problem
#[enum_dispatch]
pub(crate) trait RecoverFreeVariables<T: FloatT> {
    /// `X_hat` is the engine's primal matrix with exact zeros dropped
    fn recover(&self, data: &SdpaFreeFormat<T>, X_hat: &CscMatrix<T>) -> Vec<T>;
}

#[enum_dispatch(RecoverFreeVariables<T>)]
pub(crate) enum FreeVariableRecovery<T>
where
    T: FloatT,
{
    Nullspace(NullspaceRecovery<T>),
    TwoSlackVariables(TwoSlackRecovery<T>),
    LorentzConeSlack(LorentzConeRecovery<T>),
}

/// The engine problem together with the matching recovery
pub(crate) struct EliminatedProblem<T>
where
    T: FloatT,
{
    pub problem: SdpProblem<T>,
    pub recovery: FreeVariableRecovery<T>,
}

/// Remove the free variables of `data` using `method`
pub(crate) fn eliminate<T>(
    data: &SdpaFreeFormat<T>,
    method: RemoveFreeVariableMethod,
) -> EliminatedProblem<T>
where
    T: FloatT,
{
    log::debug!(
        "removing {} free variables with method {:?}",
        data.num_free_variables(),
        method
    );

    let (problem, recovery) = match method {
        RemoveFreeVariableMethod::Nullspace => {
            warn_once(Advisory::Nullspace);
            let (problem, recovery) = remove_by_nullspace(data);
            (problem, recovery.into())
        }
        RemoveFreeVariableMethod::TwoSlackVariables => {
            warn_once(Advisory::TwoSlackVariables);
            let (problem, recovery) = remove_by_two_slack(data);
            (problem, recovery.into())
        }
        RemoveFreeVariableMethod::LorentzConeSlack => {
            warn_once(Advisory::LorentzConeSlack);
            let (problem, recovery) = remove_by_lorentz_cone(data);
            (problem, recovery.into())
        }
    };

    log::debug!(
        "engine problem has {} rows in X and {} constraints",
        problem.num_X_rows(),
        problem.num_constraints()
    );

    EliminatedProblem { problem, recovery }
}

/// The engine problem for data without free variables
pub(crate) fn without_free_variables<T>(data: &SdpaFreeFormat<T>) -> SdpProblem<T>
where
    T: FloatT,
{
    assert_eq!(data.num_free_variables(), 0);
    SdpProblem {
        X_blocks: data.X_blocks.clone(),
        C: data.C.clone(),
        A: data.A.clone(),
        rhs: data.g.clone(),
        constant_offset: -data.constant_min_cost_term,
    }
}

/// Value of the first stored entry of column `col`.  Slack values are
/// read from the first nonzero of their column, so a slack that is
/// exactly zero reads whatever nonzero follows it.
pub(crate) fn first_nonzero_in_column<T>(X_hat: &CscMatrix<T>, col: usize) -> T
where
    T: FloatT,
{
    X_hat
        .col_entries(col)
        .next()
        .map_or(T::zero(), |(_, v)| v)
}

/// Rows of `B` as sparse `(column, value)` lists
pub(crate) fn rows_of<T>(B: &CscMatrix<T>) -> Vec<Vec<(usize, T)>>
where
    T: FloatT,
{
    let mut rows = vec![Vec::new(); B.m];
    for (r, c, v) in B.triplets() {
        if v != T::zero() {
            rows[r].push((c, v));
        }
    }
    rows
}

#[cfg(test)]
pub(crate) mod test_data {
    use crate::algebra::CscMatrix;
    use crate::problem::*;

    // max  tr(C X) + 2 s
    // s.t. X₀₀ = 1,  X₀₁ - s = 0,  X ⪰ 0
    // with C = diag(0, -1).  Optimal at X = [1 1; 1 1], s = 1.
    pub(crate) fn toy_problem() -> SdpaFreeFormat<f64> {
        let blocks = vec![BlockInX::new(BlockType::Matrix, 2)];
        let A0 = CscMatrix::new_from_triplets(2, 2, vec![0], vec![0], vec![1.]);
        let A1 = CscMatrix::new_from_triplets(2, 2, vec![0, 1], vec![1, 0], vec![0.5, 0.5]);
        let B = CscMatrix::new_from_triplets(2, 1, vec![1], vec![0], vec![-1.]);
        let C = CscMatrix::new_from_triplets(2, 2, vec![1], vec![1], vec![-1.]);
        let vars = vec![
            VariableInSdpa::InX(DecisionVariableInSdpaX::new(
                Sign::Positive,
                0.,
                EntryInX::new(0, 0, 1),
            )),
            VariableInSdpa::Free(0),
        ];
        SdpaFreeFormat::new(
            blocks,
            vec![A0, A1],
            B,
            vec![1., 0.],
            C,
            vec![2.],
            0.,
            vars,
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_nonzero() {
        let X = CscMatrix::new_from_triplets(3, 2, vec![1, 2], vec![1, 1], vec![4., 5.]);
        assert_eq!(first_nonzero_in_column(&X, 0), 0.);
        assert_eq!(first_nonzero_in_column(&X, 1), 4.);
    }

    #[test]
    fn test_rows_of() {
        let data = test_data::toy_problem();
        let rows = rows_of(&data.B);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1], vec![(0, -1.)]);
    }

    #[test]
    fn test_eliminate_sizes() {
        let data = test_data::toy_problem();

        let e = eliminate(&data, RemoveFreeVariableMethod::Nullspace);
        assert_eq!(e.problem.num_X_rows(), 2);
        assert_eq!(e.problem.num_constraints(), 1);

        let e = eliminate(&data, RemoveFreeVariableMethod::TwoSlackVariables);
        assert_eq!(e.problem.num_X_rows(), 4);
        assert_eq!(e.problem.num_constraints(), 2);

        let e = eliminate(&data, RemoveFreeVariableMethod::LorentzConeSlack);
        assert_eq!(e.problem.num_X_rows(), 4);
        assert_eq!(e.problem.num_constraints(), 3);
    }
}
