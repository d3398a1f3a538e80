//! Default values shared across the nativeloader crates.

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Folder, below a prefix, that holds per-platform native libraries.
pub const NATIVE_SUBDIR: &str = "native";

/// Extension of the per-library configuration file.
pub const PROPERTIES_EXTENSION: &str = "properties";

/// Configuration key that turns loading of a library into a no-op.
pub const DISABLED_KEY: &str = "disabled";

/// Configuration key that loads a library from the system search path instead of the bundle.
pub const USE_EXTERNAL_KEY: &str = "useExternal";

/// Configuration key naming the directory libraries are extracted into.
pub const PATH_KEY: &str = "path";
