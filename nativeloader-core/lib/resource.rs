//! Resource roots, the directories native libraries and their configuration are bundled in.
//!
//! A resource name is a `/` separated path relative to a root, such as
//! `greetings/native/Linux/x86_64/libhello.so`. Roots are searched in order and the first one
//! containing the resource wins.

use std::{
    fs,
    path::{Path, PathBuf},
};

use nativeloader_utils::{env, platform, Platform};

use crate::NativeLoaderResult;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// An ordered list of directories searched for resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceRoots {
    roots: Vec<PathBuf>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ResourceRoots {
    /// Creates resource roots from a list of directories.
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates resource roots from the NATIVELOADER_RESOURCE_PATH environment variable.
    pub fn from_env() -> Self {
        Self::new(env::get_resource_path())
    }

    /// Appends a root, searched after the existing ones.
    pub fn push(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    /// The roots, in search order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Returns the file backing resource `name`, if any root has it.
    ///
    /// A leading `/` is ignored, so `/greetings/hello.properties` and
    /// `greetings/hello.properties` name the same resource.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        let relative = name.trim_start_matches('/');
        if relative.is_empty() {
            return None;
        }

        self.roots
            .iter()
            .map(|root| root.join(relative))
            .find(|candidate| candidate.is_file())
    }

    /// Whether any root has resource `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Copies a built native library into `root`, at the resource name the loader looks for on
/// `platform`. Returns the path of the copy.
///
/// The file keeps its own name, so it should already carry the platform's library naming,
/// e.g. `libhello.so`.
pub fn stage(
    root: &Path,
    prefix: &str,
    library_file: &Path,
    platform: &Platform,
) -> NativeLoaderResult<PathBuf> {
    let file_name = library_file.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("not a file: {}", library_file.display()),
        )
    })?;

    let dir = root.join(platform.native_resource_dir(prefix));
    fs::create_dir_all(&dir)?;

    let target = dir.join(file_name);
    fs::copy(library_file, &target)?;
    tracing::info!("staged {} as {}", library_file.display(), target.display());

    Ok(target)
}

/// The resource name of `lib_name` under `prefix` on `platform`, with a leading `/`.
pub fn native_resource_name(prefix: &str, lib_name: &str, platform: &Platform) -> String {
    format!(
        "/{}/{}",
        platform.native_resource_dir(prefix),
        platform::map_library_name(lib_name)
    )
}

/// The macOS `.jnilib` alternative to [`native_resource_name`].
pub fn alt_native_resource_name(prefix: &str, lib_name: &str, platform: &Platform) -> String {
    format!(
        "/{}/{}",
        platform.native_resource_dir(prefix),
        platform::alt_library_name(lib_name)
    )
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
