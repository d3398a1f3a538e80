//! `nativeloader` loads native (JNI) libraries that are bundled as resources next to the code
//! that uses them.
//!
//! # Overview
//!
//! A library such as `libhello.so` is bundled once per platform, under a resource name built
//! from a dotted prefix (usually the Java package of the class declaring the native methods),
//! the platform folder and the platform's file name for the library:
//!
//! ```text
//! greetings/native/Linux/x86_64/libhello.so
//! greetings/native/Mac/x86_64/libhello.dylib
//! greetings/native/Windows/x86_64/hello.dll
//! ```
//!
//! Loading finds the right file for the running platform, copies it to a uniquely named file
//! in a temporary directory and hands that to the dynamic loader. The JNI methods it exports
//! can then be resolved by class and method name.
//!
//! # Modules
//!
//! - [`binding`] - JNI native method symbol names
//! - [`config`] - Properties files and per-library configuration
//! - [`loader`] - Extraction, loading and method resolution
//! - [`resource`] - Resource roots and staging libraries into them

#![warn(missing_docs)]

mod error;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub mod binding;
pub mod config;
pub mod loader;
pub mod resource;

pub use error::*;
