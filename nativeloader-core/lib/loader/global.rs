use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use crate::NativeLoaderResult;

use super::{LoadOutcome, NativeLoader};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

static GLOBAL_LOADER: LazyLock<Mutex<NativeLoader>> =
    LazyLock::new(|| Mutex::new(NativeLoader::from_env()));

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Locks the process-wide loader, created from the environment on first use.
///
/// Libraries loaded through it stay loaded for the life of the process.
pub fn global() -> MutexGuard<'static, NativeLoader> {
    GLOBAL_LOADER
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Loads `lib_name` under `prefix` with the process-wide loader.
///
/// ## Example
/// ```no_run
/// # fn example() -> anyhow::Result<()> {
/// nativeloader_core::loader::load("greetings", "hello")?;
/// # Ok(())
/// # }
/// ```
pub fn load(prefix: &str, lib_name: &str) -> NativeLoaderResult<LoadOutcome> {
    global().load(prefix, lib_name)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_loader_remembers_libraries() {
        global().set_override("global.loader.test.disabled", "true");

        assert_eq!(
            load("global.loader.test", "widget").unwrap(),
            LoadOutcome::Disabled
        );
        assert_eq!(
            load("global.loader.test", "widget").unwrap(),
            LoadOutcome::AlreadyLoaded
        );
        assert!(global().is_loaded("global.loader.test", "widget"));
    }
}
