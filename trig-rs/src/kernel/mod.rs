//! Shared kernel substrate.
//!
//! Validated constructors and 1D buffer adapters used by the wave and
//! sampling kernels.

mod errors;
mod io;
mod lifecycle;

pub use errors::*;
pub use io::*;
pub use lifecycle::*;
