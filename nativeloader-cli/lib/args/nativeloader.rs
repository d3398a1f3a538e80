use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{styles, NativeLoaderCliError};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Locate, stage and load bundled native (JNI) libraries
#[derive(Debug, Parser)]
#[command(name = "nativeloader", author, styles=styles::styles())]
pub struct NativeLoaderArgs {
    /// The subcommand to run
    #[command(subcommand)]
    pub subcommand: Option<NativeLoaderSubcommand>,

    /// Show version
    #[arg(short = 'V', long, global = true)]
    pub version: bool,

    /// Show logs with error level
    #[arg(long, global = true)]
    pub error: bool,

    /// Show logs with warn level
    #[arg(long, global = true)]
    pub warn: bool,

    /// Show logs with info level
    #[arg(long, global = true)]
    pub info: bool,

    /// Show logs with debug level
    #[arg(long, global = true)]
    pub debug: bool,

    /// Show logs with trace level
    #[arg(long, global = true)]
    pub trace: bool,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum NativeLoaderSubcommand {
    /// Print the platform folder native libraries are bundled under, e.g. `Linux/x86_64`
    #[command(name = "platform")]
    Platform {
        /// Print only the operating system part
        #[arg(long, conflicts_with = "arch")]
        os: bool,

        /// Print only the architecture part
        #[arg(long)]
        arch: bool,
    },

    /// Print the JNI symbol name of a native method
    #[command(name = "symbol")]
    Symbol {
        /// Fully-qualified class name, e.g. `greetings.Hello`
        class: String,

        /// Method name
        method: String,

        /// Method descriptor, e.g. `(I)V`, to print the overload-safe long name
        #[arg(short, long)]
        signature: Option<String>,
    },

    /// Copy a built library into a resource root, where the loader looks for it
    #[command(name = "stage")]
    Stage {
        /// Dotted prefix to bundle the library under, e.g. `greetings`
        prefix: String,

        /// The built library file, e.g. `target/release/libhello.so`
        library: PathBuf,

        /// Resource root to stage into
        #[arg(short, long)]
        root: PathBuf,
    },

    /// Load a library and call one of its `static native void` methods
    ///
    /// The method is called without a JVM, with null env and class handles, so it must not use
    /// either of them.
    #[command(name = "invoke")]
    Invoke {
        /// Dotted prefix the library is bundled under
        prefix: String,

        /// Library name, e.g. `hello` for `libhello.so`
        lib_name: String,

        /// Fully-qualified class name declaring the method
        class: String,

        /// Method name
        method: String,

        /// Resource roots to search, in order; defaults to NATIVELOADER_RESOURCE_PATH
        #[arg(short, long = "root")]
        roots: Vec<PathBuf>,

        /// Configuration override, e.g. `-D greetings.hello.path=/var/tmp`
        #[arg(short = 'D', long = "define", value_parser = parse_key_val)]
        defines: Vec<(String, String)>,
    },
}

//--------------------------------------------------------------------------------------------------
// Functions: Helpers
//--------------------------------------------------------------------------------------------------

/// Parses `key=value`. A bare `key` gets an empty value, which still counts as defined.
fn parse_key_val(s: &str) -> Result<(String, String), NativeLoaderCliError> {
    let (key, value) = s.split_once('=').unwrap_or((s, ""));
    if key.is_empty() {
        return Err(NativeLoaderCliError::InvalidArgument(format!(
            "missing key in '{}'",
            s
        )));
    }
    Ok((key.to_string(), value.to_string()))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        NativeLoaderArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_invoke() {
        let args = NativeLoaderArgs::try_parse_from([
            "nativeloader",
            "invoke",
            "greetings",
            "hello",
            "greetings.Hello",
            "world",
            "-r",
            "/a",
            "--root",
            "/b",
            "-D",
            "greetings.path=/tmp/x",
            "-D",
            "greetings.hello.useExternal",
        ])
        .unwrap();

        match args.subcommand {
            Some(NativeLoaderSubcommand::Invoke {
                prefix,
                lib_name,
                roots,
                defines,
                ..
            }) => {
                assert_eq!(prefix, "greetings");
                assert_eq!(lib_name, "hello");
                assert_eq!(roots, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
                assert_eq!(
                    defines,
                    vec![
                        ("greetings.path".to_string(), "/tmp/x".to_string()),
                        ("greetings.hello.useExternal".to_string(), String::new()),
                    ]
                );
            }
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }

    #[test]
    fn test_platform_flags_conflict() {
        assert!(
            NativeLoaderArgs::try_parse_from(["nativeloader", "platform", "--os", "--arch"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_key_val_rejects_empty_key() {
        assert!(parse_key_val("=value").is_err());
    }
}
