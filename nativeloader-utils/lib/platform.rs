//! Platform detection for locating bundled native libraries.
//!
//! Native libraries are bundled with resource names such as
//!
//! ```text
//! com/foo/bar/native/Linux/x86_64/libfoo.so
//! ```
//!
//! This module provides the `Linux/x86_64` part of that name ([`native_lib_folder_path`]) and
//! the `libfoo.so` part ([`map_library_name`]). The remaining `com/foo/bar` part comes from a
//! dotted prefix such as a Java package name.

use std::{fmt, path::Path};

use crate::NATIVE_SUBDIR;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Canonical name for 32-bit x86.
pub const X86: &str = "x86";

/// Canonical name for 64-bit x86.
pub const X86_64: &str = "x86_64";

/// Canonical name for 32-bit Itanium, usually an HP-UX construct.
pub const IA64_32: &str = "ia64_32";

/// Canonical name for 64-bit Itanium.
pub const IA64: &str = "ia64";

/// Canonical name for 32-bit PowerPC.
pub const PPC: &str = "ppc";

/// Canonical name for 64-bit PowerPC.
pub const PPC64: &str = "ppc64";

/// Folder name for ARM with the hard-float ABI.
pub const ARMHF: &str = "armhf";

/// Folder name for ARM with the soft-float ABI.
pub const ARM: &str = "arm";

/// Dynamic loaders whose presence marks a hard-float ARM Linux system.
const ARMHF_LOADERS: [&str; 2] = ["/lib/ld-linux-armhf.so.3", "/lib/arm-linux-gnueabihf"];

/// Every architecture name we know about, with the folder name it maps to.
const ARCH_MAPPING: &[(&str, &str)] = &[
    // x86
    (X86, X86),
    ("i386", X86),
    ("i486", X86),
    ("i586", X86),
    ("i686", X86),
    ("pentium", X86),
    // x86_64
    (X86_64, X86_64),
    ("amd64", X86_64),
    ("em64t", X86_64),
    ("universal", X86_64),
    // Itanium 64-bit
    (IA64, IA64),
    ("ia64w", IA64),
    // Itanium 32-bit
    (IA64_32, IA64_32),
    ("ia64n", IA64_32),
    // PowerPC
    (PPC, PPC),
    ("power", PPC),
    ("powerpc", PPC),
    ("power_pc", PPC),
    ("power_rs", PPC),
    // PowerPC 64-bit
    (PPC64, PPC64),
    ("power64", PPC64),
    ("powerpc64", PPC64),
    ("power_pc64", PPC64),
    ("power_rs64", PPC64),
];

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The `Os/Arch` folder pair native libraries are bundled under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    /// Folder name of the operating system, e.g. `Linux`.
    pub os: String,

    /// Folder name of the architecture, e.g. `x86_64`.
    pub arch: String,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Platform {
    /// Creates a platform from folder names.
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform of the running process.
    pub fn current() -> Self {
        Self::new(os_name(), arch_name())
    }

    /// Whether this is a macOS platform, where `.jnilib` libraries are also accepted.
    pub fn is_mac(&self) -> bool {
        self.os == "Mac"
    }

    /// The resource directory for `prefix` on this platform, e.g.
    /// `greetings/native/Linux/x86_64`.
    pub fn native_resource_dir(&self, prefix: &str) -> String {
        format!("{}/{}/{}", prefix_to_path(prefix), NATIVE_SUBDIR, self)
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Returns a sub-path such as `Linux/x86_64` naming the folder that holds native libraries
/// for the running process.
pub fn native_lib_folder_path() -> String {
    Platform::current().to_string()
}

/// Returns the operating system folder name for the running process.
pub fn os_name() -> String {
    translate_os_name(std::env::consts::OS)
}

/// Returns the architecture folder name for the running process.
pub fn arch_name() -> String {
    let os_arch = std::env::consts::ARCH;

    // If running Linux on ARM we need the ABI as well
    if os_arch.starts_with(ARM) && std::env::consts::OS == "linux" {
        let hard_float = ARMHF_LOADERS.iter().any(|p| Path::new(p).exists());
        tracing::debug!("arm linux detected, hard-float abi: {}", hard_float);
        return if hard_float {
            ARMHF.to_string()
        } else {
            ARM.to_string()
        };
    }

    translate_arch_name(os_arch)
}

/// Maps an operating system name to its folder name.
///
/// Accepts both JVM style names (`Mac OS X`, `Windows 10`) and Rust target names (`macos`,
/// `windows`).
pub fn translate_os_name(os_name: &str) -> String {
    let lc = os_name.to_ascii_lowercase();
    if lc.contains("windows") {
        return "Windows".to_string();
    }
    if lc.contains("mac") {
        return "Mac".to_string();
    }
    if lc.contains("linux") {
        return "Linux".to_string();
    }
    if lc.contains("aix") {
        return "AIX".to_string();
    }

    strip_non_word(os_name)
}

/// Maps an architecture name to its canonical folder name.
pub fn translate_arch_name(arch_name: &str) -> String {
    let lc = arch_name.to_ascii_lowercase();
    ARCH_MAPPING
        .iter()
        .find(|(name, _)| *name == lc)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| strip_non_word(arch_name))
}

/// Returns the platform specific file name of a library, like Java's `System.mapLibraryName`.
pub fn map_library_name(lib_name: &str) -> String {
    format!(
        "{}{}{}",
        std::env::consts::DLL_PREFIX,
        lib_name,
        std::env::consts::DLL_SUFFIX
    )
}

/// Returns the alternative file name accepted on macOS, `lib<name>.jnilib`.
pub fn alt_library_name(lib_name: &str) -> String {
    format!("lib{}.jnilib", lib_name)
}

/// Converts a dotted prefix such as `com.foo.bar` to the resource path `com/foo/bar`.
pub fn prefix_to_path(prefix: &str) -> String {
    prefix.replace('.', "/")
}

fn strip_non_word(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_os_name() {
        assert_eq!(translate_os_name("Windows 10"), "Windows");
        assert_eq!(translate_os_name("windows"), "Windows");
        assert_eq!(translate_os_name("Mac OS X"), "Mac");
        assert_eq!(translate_os_name("macos"), "Mac");
        assert_eq!(translate_os_name("Linux"), "Linux");
        assert_eq!(translate_os_name("linux"), "Linux");
        assert_eq!(translate_os_name("AIX"), "AIX");
        assert_eq!(translate_os_name("SunOS 5.11"), "SunOS511");
        assert_eq!(translate_os_name("freebsd"), "freebsd");
    }

    #[test]
    fn test_translate_arch_name() {
        for name in ["i386", "i486", "i586", "i686", "pentium", "x86"] {
            assert_eq!(translate_arch_name(name), X86, "{}", name);
        }
        for name in ["amd64", "AMD64", "em64t", "universal", "x86_64"] {
            assert_eq!(translate_arch_name(name), X86_64, "{}", name);
        }
        assert_eq!(translate_arch_name("ia64w"), IA64);
        assert_eq!(translate_arch_name("ia64n"), IA64_32);
        assert_eq!(translate_arch_name("power_rs"), PPC);
        assert_eq!(translate_arch_name("powerpc"), PPC);
        assert_eq!(translate_arch_name("powerpc64"), PPC64);
        assert_eq!(translate_arch_name("aarch64"), "aarch64");
        assert_eq!(translate_arch_name("sparc-v9"), "sparcv9");
    }

    #[test]
    fn test_native_resource_dir() {
        let platform = Platform::new("Linux", X86_64);
        assert_eq!(platform.to_string(), "Linux/x86_64");
        assert_eq!(
            platform.native_resource_dir("com.foo.bar"),
            "com/foo/bar/native/Linux/x86_64"
        );
        assert!(!platform.is_mac());
        assert!(Platform::new("Mac", X86_64).is_mac());
    }

    #[test]
    fn test_current_platform_is_consistent() {
        let platform = Platform::current();
        assert_eq!(native_lib_folder_path(), platform.to_string());
        assert!(!platform.os.is_empty());
        assert!(!platform.arch.is_empty());
        assert!(!platform.os.contains('/'));
    }

    #[test]
    fn test_library_names() {
        let mapped = map_library_name("hello");
        if cfg!(target_os = "windows") {
            assert_eq!(mapped, "hello.dll");
        } else if cfg!(target_os = "macos") {
            assert_eq!(mapped, "libhello.dylib");
        } else {
            assert_eq!(mapped, "libhello.so");
        }
        assert_eq!(alt_library_name("hello"), "libhello.jnilib");
    }
}
