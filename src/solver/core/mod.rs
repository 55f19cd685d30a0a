// package together all of the following and re-export
// in a partially flattened structure :
// : engine seam and engine iterates
// : solution status
// : user settings and the engine parameter file
// : one-time advisory warnings

mod blockmatrix;
mod engine;
mod params;
mod settings;
mod status;
pub(crate) mod warnings;

pub use blockmatrix::*;
pub use engine::*;
pub(crate) use params::ParamsFile;
pub use params::params_directory;
pub use settings::*;
pub use status::*;
