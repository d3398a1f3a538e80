//! `nativeloader-utils` is a library containing platform and environment utilities for the
//! nativeloader project.
//!
//! Native libraries are bundled per platform under a folder such as `Linux/x86_64`. The
//! [`platform`] module works out that folder for the running process and the file name a
//! library gets on it, while [`env`] names the environment variables the loader reads.

#![warn(missing_docs)]

pub mod defaults;
pub mod env;
pub mod platform;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use defaults::*;
pub use platform::*;
