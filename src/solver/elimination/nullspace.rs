#![allow(non_snake_case)]

use super::RecoverFreeVariables;
use crate::algebra::*;
use crate::problem::SdpaFreeFormat;
use crate::solver::core::SdpProblem;

// Every feasible point satisfies
//
//   tr(Aᵢ X) + bᵢᵀs = gᵢ
//
// so projecting the constraints onto N, an orthonormal basis for the
// null space of Bᵀ, removes s entirely:
//
//   Σᵢ Nᵢⱼ tr(Aᵢ X) = (Nᵀg)ⱼ
//
// For the cost, take any ŷ with Bᵀŷ = d.  Then
//
//   tr(C X) + dᵀs = tr((C - Σᵢ ŷᵢAᵢ) X) + gᵀŷ
//
// on the feasible set.  When d is not in the range of Bᵀ the problem is
// unbounded or infeasible and ŷ is only a least squares fit.

/// Recovery by solving `B s = g - A(X)` in the least squares sense
pub(crate) struct NullspaceRecovery<T> {
    qr: QrFactors<T>,
}

pub(crate) fn remove_by_nullspace<T>(data: &SdpaFreeFormat<T>) -> (SdpProblem<T>, NullspaceRecovery<T>)
where
    T: FloatT,
{
    let n = data.num_X_rows;
    let m = data.num_constraints();

    let qr = QrFactors::new(&Matrix::from_csc(&data.B));
    log::debug!(
        "free variable coefficients have rank {} of {}",
        qr.rank,
        data.num_free_variables()
    );

    let yhat = qr.solve_transposed(&data.d);
    let N = qr.nullspace_of_transpose();

    let Arefs: Vec<&CscMatrix<T>> = data.A.iter().collect();

    // Ĉ = C - Σᵢ ŷᵢAᵢ
    let mut coeffs = Vec::with_capacity(m + 1);
    let mut mats = Vec::with_capacity(m + 1);
    coeffs.push(T::one());
    mats.push(&data.C);
    for (&yi, &Ai) in yhat.iter().zip(&Arefs) {
        coeffs.push(-yi);
        mats.push(Ai);
    }
    let C = CscMatrix::linear_combination((n, n), &coeffs, &mats);

    // Âⱼ = Σᵢ NᵢⱼAᵢ
    let A: Vec<CscMatrix<T>> = (0..N.ncols())
        .map(|j| CscMatrix::linear_combination((n, n), N.col_slice(j), &Arefs))
        .collect();

    // â = Nᵀg
    let mut rhs = vec![T::zero(); N.ncols()];
    N.gemv_t(&mut rhs, &data.g, T::one(), T::zero());

    let problem = SdpProblem {
        X_blocks: data.X_blocks.clone(),
        C,
        A,
        rhs,
        constant_offset: -data.constant_min_cost_term + data.g.dot(&yhat),
    };

    (problem, NullspaceRecovery { qr })
}

impl<T> RecoverFreeVariables<T> for NullspaceRecovery<T>
where
    T: FloatT,
{
    fn recover(&self, data: &SdpaFreeFormat<T>, X_hat: &CscMatrix<T>) -> Vec<T> {
        // g - A(X)
        let residual: Vec<T> = data
            .A
            .iter()
            .zip(&data.g)
            .map(|(Ai, &gi)| gi - Ai.dot(X_hat))
            .collect();
        self.qr.solve_least_squares(&residual)
    }
}
