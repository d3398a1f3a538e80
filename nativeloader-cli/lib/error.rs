use nativeloader_core::NativeLoaderError;
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result of a nativeloader CLI related operation.
pub type NativeLoaderCliResult<T> = Result<T, NativeLoaderCliError>;

/// An error that occurred in the nativeloader CLI.
#[derive(pretty_error_debug::Debug, Error)]
pub enum NativeLoaderCliError {
    /// An I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the loader.
    #[error(transparent)]
    Loader(#[from] NativeLoaderError),

    /// An invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
