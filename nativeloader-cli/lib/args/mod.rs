//! Command line arguments.

mod nativeloader;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use nativeloader::*;
