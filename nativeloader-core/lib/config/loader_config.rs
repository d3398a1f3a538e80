use std::path::PathBuf;

use getset::Getters;
use nativeloader_utils::{
    env, platform, DISABLED_KEY, PATH_KEY, PROPERTIES_EXTENSION, USE_EXTERNAL_KEY,
};

use crate::{config::Properties, resource::ResourceRoots};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Configuration for loading one native library, identified by a prefix and a library name.
///
/// A value for `key` is looked up under two names, first `<prefix>.<key>` and then
/// `<prefix>.<lib_name>.<key>`, so a setting can apply to every library under a prefix or to a
/// single one. For each name the sources are tried in order:
///
/// 1. overrides set on the loader
/// 2. the environment, see [`env::key_to_env_var`]
/// 3. the `<prefix path>/<lib_name>.properties` file bundled with the library
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub with_prefix")]
pub struct LoaderConfig {
    /// The dotted prefix, e.g. a Java package name
    prefix: String,

    /// The library name
    lib_name: String,

    /// Values that take precedence over everything else
    overrides: Properties,

    /// Values from the bundled properties file
    properties: Properties,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl LoaderConfig {
    /// Creates a configuration from already loaded sources.
    pub fn new(
        prefix: impl Into<String>,
        lib_name: impl Into<String>,
        overrides: Properties,
        properties: Properties,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            lib_name: lib_name.into(),
            overrides,
            properties,
        }
    }

    /// Creates a configuration, reading the bundled properties file from `roots`.
    ///
    /// A missing properties file yields empty properties. A properties file that cannot be read
    /// or parsed is logged and otherwise ignored.
    pub fn load(
        roots: &ResourceRoots,
        prefix: &str,
        lib_name: &str,
        overrides: &Properties,
    ) -> Self {
        tracing::debug!("loading configuration for {},{}", prefix, lib_name);

        let resource = properties_resource_name(prefix, lib_name);
        let properties = match roots.find(&resource) {
            Some(path) => Properties::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!("ignoring properties file {}: {}", path.display(), e);
                Properties::new()
            }),
            None => Properties::new(),
        };

        Self::new(prefix, lib_name, overrides.clone(), properties)
    }

    /// Looks up the value for `key`.
    pub fn get_value(&self, key: &str) -> Option<String> {
        tracing::debug!("get_value: {},{},{}", key, self.prefix, self.lib_name);

        let key_p = format!("{}.{}", self.prefix, key);
        let key_pl = format!("{}.{}.{}", self.prefix, self.lib_name, key);

        [key_p, key_pl].iter().find_map(|name| {
            tracing::trace!("trying {}", name);
            self.overrides
                .get(name)
                .map(str::to_string)
                .or_else(|| env::get_key_override(name))
                .or_else(|| self.properties.get(name).map(str::to_string))
        })
    }

    /// Whether any value is defined for `key`. The value itself is not inspected, so
    /// `disabled=false` still counts as defined.
    pub fn is_defined(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    /// Whether loading of this library is disabled.
    pub fn is_disabled(&self) -> bool {
        self.is_defined(DISABLED_KEY)
    }

    /// Whether the library should come from the system search path instead of the bundle.
    pub fn use_external(&self) -> bool {
        self.is_defined(USE_EXTERNAL_KEY)
    }

    /// The directory the library is extracted into, falling back to [`env::get_tmpdir`].
    pub fn extraction_dir(&self) -> PathBuf {
        self.get_value(PATH_KEY)
            .map(PathBuf::from)
            .unwrap_or_else(env::get_tmpdir)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// The resource name of the properties file for a library, e.g. `greetings/hello.properties`.
pub fn properties_resource_name(prefix: &str, lib_name: &str) -> String {
    format!(
        "{}/{}.{}",
        platform::prefix_to_path(prefix),
        lib_name,
        PROPERTIES_EXTENSION
    )
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
