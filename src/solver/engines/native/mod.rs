//! Pure Rust dense interior point engine.

#![allow(non_snake_case)]

use crate::algebra::FloatT;
use crate::io::{ConfigurablePrintTarget, PrintTarget};
use crate::solver::core::*;
use std::io::Write;
use std::path::Path;

mod ipm;
mod params;
pub use params::NativeParams;

/// Dense primal-dual interior point engine.
///
/// Reads the same parameter file keys and reports the same return codes
/// as CSDP: 0 success, 1 primal infeasible, 2 dual infeasible, 3 partial
/// success, 4 iteration limit, 7 lack of progress, 8 singular iterate.
/// Every iterate is held as a full dense matrix, so this engine suits
/// small and medium problems.
///
/// With `printlevel > 0` the iteration log goes to stdout unless
/// redirected through [`ConfigurablePrintTarget`].
#[derive(Debug, Default)]
pub struct NativeSdpEngine {
    iterations: u32,
    stream: PrintTarget,
}

impl NativeSdpEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// number of iterations of the most recent solve
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl ConfigurablePrintTarget for NativeSdpEngine {
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

impl<T> SdpEngine<T> for NativeSdpEngine
where
    T: FloatT,
{
    fn name(&self) -> &'static str {
        "native"
    }

    fn solve(
        &mut self,
        problem: &SdpProblem<T>,
        params: Option<&Path>,
    ) -> Result<EngineSolution<T>, EngineError> {
        let params = NativeParams::load(params)?;
        let dense = ipm::DenseSdp::new(problem)?;
        let result = ipm::solve(&dense, &params, &mut self.stream);
        self.iterations = result.iterations;

        let it = result.iterate;
        let mut y = Vec::with_capacity(it.y.len() + 1);
        y.push(T::zero());
        y.extend_from_slice(&it.y);

        Ok(EngineSolution {
            return_code: result.code,
            primal_objective: result.pobj,
            dual_objective: result.dobj,
            y,
            X: BlockMatrix::from_dense(&problem.X_blocks, &it.X),
            Z: BlockMatrix::from_dense(&problem.X_blocks, &it.Z),
        })
    }
}
