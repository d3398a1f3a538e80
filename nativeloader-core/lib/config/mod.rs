//! Configuration types and helpers.

mod loader_config;
mod properties;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use loader_config::*;
pub use properties::*;
