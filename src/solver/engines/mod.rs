//! [`SdpEngine`](crate::solver::SdpEngine) implementations.

pub mod native;
pub use native::NativeSdpEngine;

#[cfg(feature = "csdp")]
pub mod csdp;
#[cfg(feature = "csdp")]
pub use csdp::CsdpEngine;

cfg_if::cfg_if! {
    if #[cfg(feature = "csdp")] {
        /// Engine used by [`SdpSolver::default`](crate::solver::SdpSolver)
        pub type DefaultEngine = CsdpEngine;
    } else {
        /// Engine used by [`SdpSolver::default`](crate::solver::SdpSolver)
        pub type DefaultEngine = NativeSdpEngine;
    }
}
