//! Locating, extracting and loading bundled native libraries, and resolving the JNI methods
//! they export.

mod global;
mod method;
mod native_loader;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use global::*;
pub use method::*;
pub use native_loader::*;
