#![allow(non_snake_case)]

use super::NativeParams;
use crate::algebra::*;
use crate::solver::core::{EngineError, SdpProblem};
use std::io::Write;

// Infeasible start primal-dual path following for
//
//   max tr(C X)  s.t. A(X) = a, X ⪰ 0
//   min aᵀy      s.t. Aᵀ(y) - Z = C, Z ⪰ 0
//
// with the HKM search direction and a predictor step to choose the
// centering parameter.  All iterates are held as full dense matrices;
// block diagonal data keeps them block diagonal since no operation
// mixes entries across blocks.

/// Dense copy of an engine problem
pub(crate) struct DenseSdp<T> {
    pub n: usize,
    pub C: Matrix<T>,
    pub A: Vec<Matrix<T>>,
    pub a: Vec<T>,
    pub offset: T,
}

impl<T> DenseSdp<T>
where
    T: FloatT,
{
    pub fn new(problem: &SdpProblem<T>) -> Result<Self, EngineError> {
        let n = problem.num_X_rows();
        if problem.C.size() != (n, n) {
            return Err(EngineError::BadInput("cost matrix size".to_string()));
        }
        if problem.A.len() != problem.rhs.len() {
            return Err(EngineError::BadInput("number of constraints".to_string()));
        }
        if let Some(i) = problem.A.iter().position(|Ai| Ai.size() != (n, n)) {
            return Err(EngineError::BadInput(format!("constraint {} size", i)));
        }

        Ok(Self {
            n,
            C: Matrix::from_csc(&problem.C),
            A: problem.A.iter().map(Matrix::from_csc).collect(),
            a: problem.rhs.clone(),
            offset: problem.constant_offset,
        })
    }

    fn m(&self) -> usize {
        self.A.len()
    }

    /// `A(X)`
    fn op(&self, X: &Matrix<T>) -> Vec<T> {
        self.A.iter().map(|Ai| Ai.dot(X)).collect()
    }

    /// `Aᵀ(y) = Σᵢ yᵢAᵢ`
    fn adjoint(&self, y: &[T]) -> Matrix<T> {
        let mut M = Matrix::zeros((self.n, self.n));
        for (Ai, &yi) in self.A.iter().zip(y) {
            if yi != T::zero() {
                M.axpby(yi, Ai, T::one());
            }
        }
        M
    }
}

pub(crate) struct Iterate<T> {
    pub X: Matrix<T>,
    pub y: Vec<T>,
    pub Z: Matrix<T>,
}

pub(crate) struct IpmResult<T> {
    pub code: i32,
    pub pobj: T,
    pub dobj: T,
    pub iterate: Iterate<T>,
    pub iterations: u32,
}

struct Residuals<T> {
    pobj: T,
    dobj: T,
    relpinf: T,
    reldinf: T,
    relgap: T,
    /// Aᵀ(y) - Z - C
    Rd: Matrix<T>,
    /// A(X)
    Ax: Vec<T>,
}

/// X = 10αI, Z = 10βI, y = 0, scaled to the problem data
fn initial_point<T>(p: &DenseSdp<T>) -> Iterate<T>
where
    T: FloatT,
{
    let n = p.n;
    let ten: T = (10.).as_T();

    let mut alpha = T::zero();
    let mut normA_max = T::zero();
    for (Ai, &ai) in p.A.iter().zip(&p.a) {
        let normA = Ai.norm_fro();
        alpha = T::max(alpha, (T::one() + ai.abs()) / (T::one() + normA));
        normA_max = T::max(normA_max, normA);
    }
    alpha = if alpha > T::zero() {
        alpha * n.as_T()
    } else {
        T::one()
    };
    let beta = (T::one() + T::max(normA_max, p.C.norm_fro())) / T::sqrt(n.as_T());

    let mut X = Matrix::identity(n);
    X.data.scale(ten * alpha);
    let mut Z = Matrix::identity(n);
    Z.data.scale(ten * beta);

    Iterate {
        X,
        y: vec![T::zero(); p.m()],
        Z,
    }
}

fn residuals<T>(p: &DenseSdp<T>, it: &Iterate<T>, norma: T, normC: T) -> Residuals<T>
where
    T: FloatT,
{
    let Ax = p.op(&it.X);
    let rp_norm = Ax
        .iter()
        .zip(&p.a)
        .fold(T::zero(), |acc, (&axi, &ai)| acc + (ai - axi) * (ai - axi))
        .sqrt();

    let mut Rd = p.adjoint(&it.y);
    Rd.axpby(-T::one(), &it.Z, T::one());
    Rd.axpby(-T::one(), &p.C, T::one());

    let pobj = p.C.dot(&it.X) + p.offset;
    let dobj = p.a.dot(&it.y) + p.offset;
    let gap = T::max((dobj - pobj).abs(), it.X.dot(&it.Z));

    Residuals {
        pobj,
        dobj,
        relpinf: rp_norm / (T::one() + norma),
        reldinf: Rd.norm_fro() / (T::one() + normC),
        relgap: gap / (T::one() + pobj.abs() + dobj.abs()),
        Rd,
        Ax,
    }
}

/// Largest step `frac·α` with `X + α dX ≻ 0`, capped at one
fn max_step<T>(chol: &mut CholeskyEngine<T>, X: &Matrix<T>, dX: &Matrix<T>, frac: T) -> T
where
    T: FloatT,
{
    let mut trial = |alpha: T| {
        let mut Y = X.clone();
        Y.axpby(alpha, dX, T::one());
        chol.factor(&Y).is_ok()
    };

    let cap = T::recip(frac);
    if trial(cap) {
        return T::one();
    }
    let (mut lo, mut hi) = (T::zero(), cap);
    let half: T = (0.5).as_T();
    for _ in 0..30 {
        let mid = (lo + hi) * half;
        if trial(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    frac * lo
}

/// HKM direction targeting `X Z = μₜ I`
fn direction<T>(
    p: &DenseSdp<T>,
    it: &Iterate<T>,
    Zinv: &Matrix<T>,
    schur: &CholeskyEngine<T>,
    Rd: &Matrix<T>,
    mu_t: T,
) -> (Matrix<T>, Vec<T>, Matrix<T>)
where
    T: FloatT,
{
    // G = Z⁻¹ Rd X
    let G = Matrix::mul(&Matrix::mul(Zinv, Rd), &it.X);

    // M dy = μₜ A(Z⁻¹) - a - A(G)
    let mut dy: Vec<T> = p
        .A
        .iter()
        .zip(&p.a)
        .map(|(Ai, &ai)| mu_t * Ai.dot(Zinv) - ai - Ai.dot(&G))
        .collect();
    schur.solve(&mut dy);

    // dZ = Aᵀ(dy) + Rd
    let mut dZ = p.adjoint(&dy);
    dZ.axpby(T::one(), Rd, T::one());

    // dX = μₜ Z⁻¹ - X - Z⁻¹ dZ X
    let mut dX = Matrix::mul(&Matrix::mul(Zinv, &dZ), &it.X);
    dX.axpby(-T::one(), &it.X, -T::one());
    dX.axpby(mu_t, Zinv, T::one());
    dX.symmetrize();

    (dX, dy, dZ)
}

fn print_header(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>4}  {:>14}  {:>14}  {:>9}  {:>9}  {:>9}  {:>8}  {:>8}",
        "iter", "pobj", "dobj", "pinf", "dinf", "gap", "step_p", "step_d"
    )?;
    out.flush()
}

fn print_status<T>(
    out: &mut dyn Write,
    iterations: u32,
    r: &Residuals<T>,
    step_p: T,
    step_d: T,
) -> std::io::Result<()>
where
    T: FloatT,
{
    writeln!(
        out,
        "{:>4}  {:>14.7e}  {:>14.7e}  {:>9.2e}  {:>9.2e}  {:>9.2e}  {:>8.2e}  {:>8.2e}",
        iterations, r.pobj, r.dobj, r.relpinf, r.reldinf, r.relgap, step_p, step_d
    )?;
    out.flush()
}

fn print_footer<T>(out: &mut dyn Write, code: i32, pobj: T, dobj: T) -> std::io::Result<()>
where
    T: FloatT,
{
    let status = match code {
        0 => "Success: SDP solved",
        1 => "Declared primal infeasible",
        2 => "Declared dual infeasible",
        3 => "Partial Success: SDP solved with reduced accuracy",
        4 => "Stuck at iteration limit",
        7 => "Lack of progress",
        _ => "Singular iterate",
    };
    writeln!(out, "{}", status)?;
    writeln!(out, "Primal objective value: {:.7e}", pobj)?;
    writeln!(out, "Dual objective value: {:.7e}", dobj)?;
    out.flush()
}

/// Run the engine, writing the iteration log to `out` when
/// `params.printlevel > 0`.  Print failures do not stop the solve.
pub(crate) fn solve<T>(p: &DenseSdp<T>, params: &NativeParams<T>, out: &mut dyn Write) -> IpmResult<T>
where
    T: FloatT,
{
    let n = p.n;
    let m = p.m();
    let nT: T = n.as_T();
    let norma = p.a.norm();
    let normC = p.C.norm_fro();
    let near: T = (100.).as_T();

    let mut it = initial_point(p);
    let mut chol = CholeskyEngine::<T>::new(n);
    let mut schur = CholeskyEngine::<T>::new(m);
    let (mut step_p, mut step_d) = (T::zero(), T::zero());
    let mut iterations = 0;

    let verbose = params.printlevel > 0;
    if verbose {
        let _ = print_header(out);
    }

    let (code, pobj, dobj) = loop {
        let r = residuals(p, &it, norma, normC);

        if verbose {
            let _ = print_status(out, iterations, &r, step_p, step_d);
        }

        if r.relpinf < params.axtol && r.reldinf < params.atytol && r.relgap < params.objtol {
            break (0, r.pobj, r.dobj);
        }
        let partial = r.relpinf < near * params.axtol
            && r.reldinf < near * params.atytol
            && r.relgap < near * params.objtol;

        // Aᵀ(y) ⪰ 0 with aᵀy < 0 certifies A(X) = a, X ⪰ 0 is empty
        let ay = p.a.dot(&it.y);
        if ay < T::zero() {
            let mut AtyZ = r.Rd.clone();
            AtyZ.axpby(T::one(), &p.C, T::one());
            if -ay / AtyZ.norm_fro() > params.pinftol {
                break (1, r.pobj, r.dobj);
            }
        }
        // X ⪰ 0 with A(X) = 0 and tr(C X) > 0 is an unbounded ray
        let cx = p.C.dot(&it.X);
        if cx > T::zero() && cx / r.Ax.norm() > params.dinftol {
            break (2, r.pobj, r.dobj);
        }

        if iterations >= params.maxiter {
            break (if partial { 3 } else { 4 }, r.pobj, r.dobj);
        }
        iterations += 1;

        if chol.factor(&it.Z).is_err() {
            break (8, r.pobj, r.dobj);
        }
        let Zinv = chol.inverse();

        // Schur complement Mᵢⱼ = tr(Aᵢ Z⁻¹ Aⱼ X)
        let W: Vec<Matrix<T>> = p
            .A
            .iter()
            .map(|Aj| Matrix::mul(&Matrix::mul(&Zinv, Aj), &it.X))
            .collect();
        let mut M = Matrix::zeros((m, m));
        for (j, Wj) in W.iter().enumerate() {
            for (i, Ai) in p.A.iter().enumerate() {
                M[(i, j)] = Ai.dot(Wj);
            }
        }
        M.symmetrize();
        if schur.factor(&M).is_err() {
            break (8, r.pobj, r.dobj);
        }

        let frac = if r.relgap > (1e-2).as_T() {
            params.minstepfrac
        } else {
            params.maxstepfrac
        };
        let mu = it.X.dot(&it.Z) / nT;

        // predictor
        let (dX, _, dZ) = direction(p, &it, &Zinv, &schur, &r.Rd, T::zero());
        let ap = max_step(&mut chol, &it.X, &dX, frac);
        let ad = max_step(&mut chol, &it.Z, &dZ, frac);
        let mut Xa = it.X.clone();
        Xa.axpby(ap, &dX, T::one());
        let mut Za = it.Z.clone();
        Za.axpby(ad, &dZ, T::one());
        let mu_aff = Xa.dot(&Za) / nT;
        let sigma = if mu > T::zero() {
            T::min(T::one(), T::max(T::zero(), mu_aff / mu)).powi(3)
        } else {
            T::zero()
        };

        // centered corrector
        let (dX, dy, dZ) = direction(p, &it, &Zinv, &schur, &r.Rd, sigma * mu);
        step_p = max_step(&mut chol, &it.X, &dX, frac);
        step_d = max_step(&mut chol, &it.Z, &dZ, frac);

        if step_p < params.minstepp || step_d < params.minstepd {
            break (if partial { 3 } else { 7 }, r.pobj, r.dobj);
        }

        it.X.axpby(step_p, &dX, T::one());
        it.X.symmetrize();
        it.y.axpby(step_d, &dy, T::one());
        it.Z.axpby(step_d, &dZ, T::one());
        it.Z.symmetrize();
    };

    if verbose {
        let _ = print_footer(out, code, pobj, dobj);
    }

    IpmResult {
        code,
        pobj,
        dobj,
        iterate: it,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{BlockInX, BlockType};

    fn lp(c: [f64; 2], a: f64) -> SdpProblem<f64> {
        // max c₀x₀ + c₁x₁  s.t. x₀ + x₁ = a, x ≥ 0
        SdpProblem {
            X_blocks: vec![BlockInX::new(BlockType::Diagonal, 2)],
            C: CscMatrix::from_diagonal(&c),
            A: vec![CscMatrix::identity(2)],
            rhs: vec![a],
            constant_offset: 0.,
        }
    }

    #[test]
    fn test_small_lp() {
        let p = DenseSdp::new(&lp([1., 2.], 1.)).unwrap();
        let result = solve(&p, &NativeParams::default(), &mut std::io::sink());
        assert_eq!(result.code, 0);
        assert!((result.pobj - 2.).abs() < 1e-6);
        assert!((result.dobj - 2.).abs() < 1e-6);
        assert!((result.iterate.X[(1, 1)] - 1.).abs() < 1e-6);
        assert!((result.iterate.y[0] - 2.).abs() < 1e-6);
        // block diagonal structure is kept exactly
        assert_eq!(result.iterate.X[(0, 1)], 0.);
    }

    #[test]
    fn test_primal_infeasible() {
        // x₀ + x₁ = -1 has no nonnegative solution
        let p = DenseSdp::new(&lp([1., 2.], -1.)).unwrap();
        let result = solve(&p, &NativeParams::default(), &mut std::io::sink());
        assert_eq!(result.code, 1);
    }

    #[test]
    fn test_dual_infeasible() {
        // max x₀ + x₁  s.t. x₀ - x₁ = 0 is unbounded
        let mut problem = lp([1., 1.], 0.);
        problem.A = vec![CscMatrix::from_diagonal(&[1., -1.])];
        let p = DenseSdp::new(&problem).unwrap();
        let result = solve(&p, &NativeParams::default(), &mut std::io::sink());
        assert_eq!(result.code, 2);
    }

    #[test]
    fn test_iteration_limit() {
        let p = DenseSdp::new(&lp([1., 2.], 1.)).unwrap();
        let params = NativeParams {
            maxiter: 1,
            ..NativeParams::default()
        };
        let result = solve(&p, &params, &mut std::io::sink());
        assert_eq!(result.code, 4);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_iteration_log() {
        let p = DenseSdp::new(&lp([1., 2.], 1.)).unwrap();
        let mut log = Vec::<u8>::new();

        // silent by default
        solve(&p, &NativeParams::default(), &mut log);
        assert!(log.is_empty());

        let params = NativeParams {
            printlevel: 1,
            ..NativeParams::default()
        };
        let result = solve(&p, &params, &mut log);
        let log = String::from_utf8(log).unwrap();
        assert!(log.starts_with("iter"));
        assert!(log.contains("Success: SDP solved"));
        // header, one row per iterate and three footer lines
        assert_eq!(log.lines().count(), result.iterations as usize + 5);
    }

    #[test]
    fn test_bad_input() {
        let mut problem = lp([1., 2.], 1.);
        problem.rhs.push(0.);
        assert!(DenseSdp::new(&problem).is_err());
    }
}
