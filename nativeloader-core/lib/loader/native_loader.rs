use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use libloading::Library;
use nativeloader_utils::{platform, Platform};
use tempfile::TempPath;
use uuid::Uuid;

use crate::{
    binding,
    config::{LoaderConfig, Properties},
    resource::{self, ResourceRoots},
    NativeLoaderError, NativeLoaderResult,
};

use super::{StaticNativeMethod, StaticVoidMethod};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// What a call to [`NativeLoader::load`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The bundled library was extracted to `path` and loaded from there.
    Loaded {
        /// The extracted file.
        path: PathBuf,
    },

    /// The library was loaded from the system search path under file name `name`.
    External {
        /// The platform file name that was loaded.
        name: String,
    },

    /// Loading is disabled by configuration, nothing was loaded.
    Disabled,

    /// An earlier call already handled this library.
    AlreadyLoaded,
}

/// Loads native libraries bundled in resource roots.
///
/// A library is identified by a dotted `prefix` (e.g. a Java package) and a library name. For
/// prefix `com.foo.bar` and library `stuff`, the loader looks for the resource
///
/// ```text
/// com/foo/bar/native/Linux/x86_64/libstuff.so
/// ```
///
/// copies it to a uniquely named file in the extraction directory and loads that file. How a
/// library is loaded can be influenced through [`LoaderConfig`].
///
/// Extracted files are removed when the loader is dropped.
pub struct NativeLoader {
    /// Where bundled libraries and their properties are searched
    roots: ResourceRoots,

    /// Configuration values that win over the environment and bundled properties
    overrides: Properties,

    /// The platform whose libraries are loaded
    platform: Platform,

    /// Keys of `prefix-lib_name` pairs already handled
    loaded: HashSet<String>,

    /// Libraries in load order
    libraries: Vec<LoadedLibrary>,
}

struct LoadedLibrary {
    key: String,
    library: Library,
    // Dropped after `library`, so the file outlives the mapping.
    _extracted: Option<TempPath>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl NativeLoader {
    /// Creates a loader searching `roots` for libraries of the current platform.
    pub fn new(roots: ResourceRoots) -> Self {
        Self::with_platform(roots, Platform::current())
    }

    /// Creates a loader searching `roots` for libraries of `platform`.
    pub fn with_platform(roots: ResourceRoots, platform: Platform) -> Self {
        Self {
            roots,
            overrides: Properties::new(),
            platform,
            loaded: HashSet::new(),
            libraries: Vec::new(),
        }
    }

    /// Creates a loader whose roots come from the NATIVELOADER_RESOURCE_PATH environment
    /// variable.
    pub fn from_env() -> Self {
        Self::new(ResourceRoots::from_env())
    }

    /// Sets a configuration value that wins over the environment and bundled properties,
    /// e.g. `greetings.hello.disabled`.
    pub fn set_override(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.overrides.set(key, value);
    }

    /// Removes a configuration override.
    pub fn clear_override(&mut self, key: &str) {
        self.overrides.remove(key);
    }

    /// The resource roots searched for libraries and properties.
    pub fn get_roots(&self) -> &ResourceRoots {
        &self.roots
    }

    /// The configuration overrides.
    pub fn get_overrides(&self) -> &Properties {
        &self.overrides
    }

    /// The platform whose libraries are loaded.
    pub fn get_platform(&self) -> &Platform {
        &self.platform
    }

    /// Loads the native library `lib_name` bundled under `prefix`.
    ///
    /// Each `prefix`, `lib_name` pair is handled once; later calls return
    /// [`LoadOutcome::AlreadyLoaded`]. A failed load is not remembered and may be retried.
    ///
    /// ## Example
    /// ```no_run
    /// use nativeloader_core::{loader::NativeLoader, resource::ResourceRoots};
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let mut loader = NativeLoader::new(ResourceRoots::new(["/opt/app/resources"]));
    /// loader.load("greetings", "hello")?;
    ///
    /// let world = loader.resolve("greetings.Hello", "world")?;
    /// unsafe { world.invoke() };
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(&mut self, prefix: &str, lib_name: &str) -> NativeLoaderResult<LoadOutcome> {
        let key = format!("{}-{}", prefix, lib_name);
        if self.loaded.contains(&key) {
            tracing::debug!("already loaded: {}", key);
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        match self.load_native_library(prefix, lib_name, &key) {
            Ok(outcome) => {
                self.loaded.insert(key);
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!("{}", e);
                Err(e)
            }
        }
    }

    /// Loads `lib_name` under the prefix derived from the module path of `T`.
    ///
    /// The path is the full one reported by [`std::any::type_name`], crate name included, so
    /// `greetings::Hello` declared in crate `app` yields the prefix `app.greetings`.
    pub fn load_for<T: ?Sized>(&mut self, lib_name: &str) -> NativeLoaderResult<LoadOutcome> {
        let prefix = type_prefix::<T>();
        self.load(&prefix, lib_name)
    }

    /// Whether `lib_name` under `prefix` has been handled, including when it was disabled.
    pub fn is_loaded(&self, prefix: &str, lib_name: &str) -> bool {
        self.loaded.contains(&format!("{}-{}", prefix, lib_name))
    }

    /// Resolves the native implementation of `static native void method()` in `class`.
    ///
    /// Libraries are searched most recently loaded first.
    pub fn resolve(
        &self,
        class: &str,
        method: &str,
    ) -> NativeLoaderResult<StaticNativeMethod<'_>> {
        let symbol = binding::short_name(class, method);
        tracing::debug!("resolving {}", symbol);

        for loaded in self.libraries.iter().rev() {
            // SAFETY: the symbol is only ever called through `StaticNativeMethod::invoke`,
            // whose contract covers the signature.
            let function = unsafe { loaded.library.get::<StaticVoidMethod>(symbol.as_bytes()) };
            if let Ok(function) = function {
                tracing::debug!("resolved {} in {}", symbol, loaded.key);
                return Ok(StaticNativeMethod::new(symbol, function));
            }
        }

        Err(NativeLoaderError::UnsatisfiedLink { symbol })
    }

    /// The configuration that applies to `lib_name` under `prefix`.
    pub fn config(&self, prefix: &str, lib_name: &str) -> LoaderConfig {
        LoaderConfig::load(&self.roots, prefix, lib_name, &self.overrides)
    }

    /// Finds the bundled library for this loader's platform, returning its resource name and
    /// the file backing it.
    ///
    /// On macOS the `.jnilib` name is tried when the regular one is not bundled.
    pub fn find_native_library(
        &self,
        prefix: &str,
        lib_name: &str,
    ) -> NativeLoaderResult<(String, PathBuf)> {
        let resource_name = resource::native_resource_name(prefix, lib_name, &self.platform);
        tracing::debug!("resource name: {}", resource_name);
        if let Some(path) = self.roots.find(&resource_name) {
            return Ok((resource_name, path));
        }

        if self.platform.is_mac() {
            let alt_name = resource::alt_native_resource_name(prefix, lib_name, &self.platform);
            tracing::debug!("alt resource name: {}", alt_name);
            if let Some(path) = self.roots.find(&alt_name) {
                return Ok((alt_name, path));
            }
        }

        Err(NativeLoaderError::LibraryMissing(resource_name))
    }
}

impl NativeLoader {
    fn load_native_library(
        &mut self,
        prefix: &str,
        lib_name: &str,
        key: &str,
    ) -> NativeLoaderResult<LoadOutcome> {
        tracing::debug!("loading: {} {}", prefix, lib_name);

        let config = self.config(prefix, lib_name);

        if config.is_disabled() {
            tracing::debug!("loading disabled: {},{}", prefix, lib_name);
            return Ok(LoadOutcome::Disabled);
        }

        if config.use_external() {
            // Found through the system search path, never from the bundle
            let name = platform::map_library_name(lib_name);
            let library = open_library(Path::new(&name))?;
            self.libraries.push(LoadedLibrary {
                key: key.to_string(),
                library,
                _extracted: None,
            });
            tracing::info!("loaded external library {}", name);
            return Ok(LoadOutcome::External { name });
        }

        let (resource_name, source) = self.find_native_library(prefix, lib_name)?;

        let out_dir = config.extraction_dir();
        fs::create_dir_all(&out_dir)?;
        let out_dir = fs::canonicalize(&out_dir)?;
        tracing::debug!("extraction dir for native lib: {}", out_dir.display());

        let extracted = extract_library_file(&resource_name, &source, &out_dir)?;
        let library = open_library(&extracted)?;
        let path = extracted.to_path_buf();
        self.libraries.push(LoadedLibrary {
            key: key.to_string(),
            library,
            _extracted: Some(extracted),
        });

        tracing::info!("loaded {} from {}", resource_name, path.display());
        Ok(LoadOutcome::Loaded { path })
    }
}

//--------------------------------------------------------------------------------------------------
// Functions: Helpers
//--------------------------------------------------------------------------------------------------

/// Copies the resource at `source` into `out_dir` under a unique name derived from
/// `resource_name`, e.g. `greetings.native.Linux.x86_64.libhello.so-<uuid>`.
///
/// The unique suffix lets several loaders in one process, or several processes, extract the
/// same library without clobbering each other.
fn extract_library_file(
    resource_name: &str,
    source: &Path,
    out_dir: &Path,
) -> NativeLoaderResult<TempPath> {
    let file_name = format!(
        "{}-{}",
        resource_name.trim_start_matches('/').replace('/', "."),
        Uuid::new_v4()
    );
    let target = out_dir.join(file_name);
    tracing::debug!("extracting {} to {}", resource_name, target.display());

    // Owned before the copy so a partial file is removed on failure
    let extracted = TempPath::from_path(target);
    fs::copy(source, &extracted)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&extracted, fs::Permissions::from_mode(0o755))?;
    }

    Ok(extracted)
}

fn open_library(path: &Path) -> NativeLoaderResult<Library> {
    // SAFETY: loading runs the library's initialisers; bundled JNI libraries are trusted.
    unsafe { Library::new(path) }.map_err(|source| NativeLoaderError::LoadFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// The dotted module path of `T`, e.g. `app.greetings` for `app::greetings::Hello<u8>`.
pub(crate) fn type_prefix<T: ?Sized>() -> String {
    let name = std::any::type_name::<T>();
    let name = name.split('<').next().unwrap_or(name);
    match name.rsplit_once("::") {
        Some((module, _)) => module.replace("::", "."),
        None => String::new(),
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
