//! `hello` is the native side of the `greetings.Hello` Java class.
//!
//! The Java class declares a single method:
//!
//! ```java
//! package greetings;
//!
//! public class Hello {
//!     static public native void world();
//! }
//! ```
//!
//! and the JVM binds it to [`Java_greetings_Hello_world`] once the library has been loaded,
//! usually through `nativeloader_core::NativeLoader` with prefix [`PREFIX`] and library
//! name [`LIBRARY_NAME`].

#![warn(missing_docs)]

use std::io::{self, Write};

use jni_sys::{jclass, JNIEnv};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The line printed by `greetings.Hello.world()`, without its trailing newline.
pub const GREETING: &str = "Hello world";

/// Fully-qualified name of the Java class owning the native method.
pub const CLASS_NAME: &str = "greetings.Hello";

/// Name of the native method.
pub const METHOD_NAME: &str = "world";

/// The resource prefix the library is bundled under (the Java package).
pub const PREFIX: &str = "greetings";

/// The library name, as passed to `System.mapLibraryName`.
pub const LIBRARY_NAME: &str = "hello";

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Writes the greeting line to `out`.
pub fn world_to<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", GREETING)?;
    out.flush()
}

/// Class:     greetings_Hello
/// Method:    world
/// Signature: ()V
///
/// Neither handle is dereferenced, so null handles are fine. A failed write to stdout is ignored.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn Java_greetings_Hello_world(_env: *mut JNIEnv, _class: jclass) {
    let _ = world_to(&mut io::stdout().lock());
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
