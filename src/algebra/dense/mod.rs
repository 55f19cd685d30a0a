mod blas;
pub use self::blas::*;
mod cholesky;
mod core;
mod qr;

pub use self::cholesky::*;
pub use self::core::*;
pub use self::qr::*;
