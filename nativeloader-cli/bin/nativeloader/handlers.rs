use std::path::{Path, PathBuf};

use nativeloader_cli::{AnsiStyles, NativeLoaderArgs, NativeLoaderCliResult, CHECKMARK};
use nativeloader_core::{
    binding,
    loader::{LoadOutcome, NativeLoader},
    resource::{self, ResourceRoots},
};
use nativeloader_utils::{platform, Platform};

//--------------------------------------------------------------------------------------------------
// Functions: Handlers
//--------------------------------------------------------------------------------------------------

pub fn log_level(args: &NativeLoaderArgs) {
    let level = if args.trace {
        Some("trace")
    } else if args.debug {
        Some("debug")
    } else if args.info {
        Some("info")
    } else if args.warn {
        Some("warn")
    } else if args.error {
        Some("error")
    } else {
        None
    };

    // Set RUST_LOG environment variable only if a level is specified
    if let Some(level) = level {
        std::env::set_var(
            "RUST_LOG",
            format!(
                "nativeloader={},nativeloader_core={},nativeloader_utils={}",
                level, level, level
            ),
        );
    }
}

pub fn platform_subcommand(os: bool, arch: bool) {
    if os {
        println!("{}", platform::os_name());
    } else if arch {
        println!("{}", platform::arch_name());
    } else {
        println!("{}", platform::native_lib_folder_path());
    }
}

pub fn symbol_subcommand(class: &str, method: &str, signature: Option<&str>) {
    let symbol = match signature {
        Some(signature) => binding::long_name(class, method, signature),
        None => binding::short_name(class, method),
    };
    println!("{}", symbol);
}

pub fn stage_subcommand(prefix: &str, library: &Path, root: &Path) -> NativeLoaderCliResult<()> {
    let staged = resource::stage(root, prefix, library, &Platform::current())?;
    println!(
        "{} Staged {}",
        &*CHECKMARK,
        staged.display().to_string().literal()
    );
    Ok(())
}

/// Loads the library and calls the method. Status goes to stderr so stdout carries only what
/// the native code prints.
pub fn invoke_subcommand(
    prefix: &str,
    lib_name: &str,
    class: &str,
    method: &str,
    roots: Vec<PathBuf>,
    defines: Vec<(String, String)>,
) -> NativeLoaderCliResult<()> {
    let roots = if roots.is_empty() {
        ResourceRoots::from_env()
    } else {
        ResourceRoots::new(roots)
    };

    let mut loader = NativeLoader::new(roots);
    for (key, value) in defines {
        loader.set_override(key, value);
    }

    match loader.load(prefix, lib_name)? {
        LoadOutcome::Loaded { path } => eprintln!(
            "{} Loaded {}",
            &*CHECKMARK,
            path.display().to_string().literal()
        ),
        LoadOutcome::External { name } => {
            eprintln!("{} Loaded external {}", &*CHECKMARK, name.literal())
        }
        LoadOutcome::Disabled => eprintln!(
            "{} loading of {} is disabled",
            "warning:".header(),
            format!("{}-{}", prefix, lib_name).literal()
        ),
        LoadOutcome::AlreadyLoaded => {}
    }

    tracing::info!("invoking {}.{}", class, method);
    let native_method = loader.resolve(class, method)?;
    // SAFETY: the subcommand's documented contract is that the method ignores both handles.
    unsafe { native_method.invoke() };

    Ok(())
}
