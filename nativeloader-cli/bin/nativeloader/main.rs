mod handlers;

use clap::{CommandFactory, Parser};
use nativeloader_cli::{AnsiStyles, NativeLoaderArgs, NativeLoaderCliResult, NativeLoaderSubcommand};

//--------------------------------------------------------------------------------------------------
// Functions: main
//--------------------------------------------------------------------------------------------------

fn main() -> NativeLoaderCliResult<()> {
    // Parse command line arguments
    let args = NativeLoaderArgs::parse();

    handlers::log_level(&args);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Print version if requested
    if args.version {
        println!("{}", format!("v{}", env!("CARGO_PKG_VERSION")).literal());
        return Ok(());
    }

    match args.subcommand {
        Some(NativeLoaderSubcommand::Platform { os, arch }) => {
            handlers::platform_subcommand(os, arch);
        }
        Some(NativeLoaderSubcommand::Symbol {
            class,
            method,
            signature,
        }) => {
            handlers::symbol_subcommand(&class, &method, signature.as_deref());
        }
        Some(NativeLoaderSubcommand::Stage {
            prefix,
            library,
            root,
        }) => {
            handlers::stage_subcommand(&prefix, &library, &root)?;
        }
        Some(NativeLoaderSubcommand::Invoke {
            prefix,
            lib_name,
            class,
            method,
            roots,
            defines,
        }) => {
            handlers::invoke_subcommand(&prefix, &lib_name, &class, &method, roots, defines)?;
        }
        None => {
            NativeLoaderArgs::command().print_help()?;
        }
    }

    Ok(())
}
