//! Utility functions for working with environment variables.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Environment variable listing the resource roots, separated like `PATH`
pub const RESOURCE_PATH_ENV_VAR: &str = "NATIVELOADER_RESOURCE_PATH";

/// Environment variable for the directory native libraries are extracted into
pub const TMPDIR_ENV_VAR: &str = "NATIVELOADER_TMPDIR";

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Returns the resource roots named by the NATIVELOADER_RESOURCE_PATH environment variable.
/// Empty entries are skipped. Returns an empty list if the variable is not set.
pub fn get_resource_path() -> Vec<PathBuf> {
    std::env::var_os(RESOURCE_PATH_ENV_VAR)
        .map(|value| split_search_path(&value))
        .unwrap_or_default()
}

/// Returns the directory native libraries are extracted into.
/// If the NATIVELOADER_TMPDIR environment variable is set, returns that path.
/// Otherwise, returns the system temporary directory.
pub fn get_tmpdir() -> PathBuf {
    if let Some(tmpdir) = std::env::var_os(TMPDIR_ENV_VAR) {
        PathBuf::from(tmpdir)
    } else {
        std::env::temp_dir()
    }
}

/// Maps a dotted configuration key to the environment variable that can override it.
///
/// `greetings.Hello.disabled` becomes `GREETINGS_HELLO_DISABLED`.
pub fn key_to_env_var(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Looks up the environment override for a dotted configuration key.
pub fn get_key_override(key: &str) -> Option<String> {
    std::env::var(key_to_env_var(key)).ok()
}

fn split_search_path(value: &OsString) -> Vec<PathBuf> {
    std::env::split_paths(value)
        .filter(|path| path != Path::new(""))
        .collect()
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_key_to_env_var() {
        assert_eq!(
            key_to_env_var("greetings.Hello.disabled"),
            "GREETINGS_HELLO_DISABLED"
        );
        assert_eq!(key_to_env_var("com.foo-bar.path"), "COM_FOO_BAR_PATH");
        assert_eq!(key_to_env_var("x.useExternal"), "X_USEEXTERNAL");
    }

    #[test]
    #[serial]
    fn test_get_resource_path() {
        let joined = std::env::join_paths(["/opt/a", "", "/opt/b"]).unwrap();
        std::env::set_var(RESOURCE_PATH_ENV_VAR, &joined);
        assert_eq!(
            get_resource_path(),
            vec![PathBuf::from("/opt/a"), PathBuf::from("/opt/b")]
        );

        std::env::remove_var(RESOURCE_PATH_ENV_VAR);
        assert!(get_resource_path().is_empty());
    }

    #[test]
    #[serial]
    fn test_get_tmpdir() {
        std::env::set_var(TMPDIR_ENV_VAR, "/var/tmp/native");
        assert_eq!(get_tmpdir(), PathBuf::from("/var/tmp/native"));

        std::env::remove_var(TMPDIR_ENV_VAR);
        assert_eq!(get_tmpdir(), std::env::temp_dir());
    }

    #[test]
    #[serial]
    fn test_get_key_override() {
        std::env::set_var("ACME_WIDGETS_PATH", "/tmp/widgets");
        assert_eq!(
            get_key_override("acme.widgets.path").as_deref(),
            Some("/tmp/widgets")
        );

        std::env::remove_var("ACME_WIDGETS_PATH");
        assert_eq!(get_key_override("acme.widgets.path"), None);
    }
}
