//! Engine backed by the CSDP C library.
//!
//! Requires a CSDP build whose `easy_sdp` variant accepts a parameter
//! file path (`easy_sdp_params`).  Set `SDPFREE_CSDP_LIB_DIR` if
//! `libsdp` is not on the default library path.

use crate::solver::core::*;
use std::ffi::CString;
use std::path::Path;

pub mod ffi;
mod marshal;

use marshal::CsdpProblem;

/// [`SdpEngine`] calling CSDP's `easy_sdp`.  Only `f64` data is supported.
#[derive(Debug, Default, Clone)]
pub struct CsdpEngine;

impl CsdpEngine {
    pub fn new() -> Self {
        Self
    }
}

impl SdpEngine<f64> for CsdpEngine {
    fn name(&self) -> &'static str {
        "csdp"
    }

    fn solve(
        &mut self,
        problem: &SdpProblem<f64>,
        params: Option<&Path>,
    ) -> Result<EngineSolution<f64>, EngineError> {
        let path = match params {
            Some(p) => p
                .to_str()
                .ok_or_else(|| EngineError::BadParams(p.display().to_string()))?,
            None => "",
        };
        let path = CString::new(path).map_err(|e| EngineError::BadParams(e.to_string()))?;

        // released by free_prob when dropped, on every exit path
        let mut csdp = CsdpProblem::new(problem)?;
        let (return_code, primal_objective, dual_objective) =
            csdp.solve(&path, problem.constant_offset);

        Ok(EngineSolution {
            return_code,
            primal_objective,
            dual_objective,
            y: csdp.y(),
            X: csdp.X(),
            Z: csdp.Z(),
        })
    }
}
