use std::{
    error::Error,
    fmt::{self, Display},
    path::PathBuf,
};

use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result of a native loader related operation.
pub type NativeLoaderResult<T> = Result<T, NativeLoaderError>;

/// An error that occurred while locating, extracting or loading a native library.
#[derive(pretty_error_debug::Debug, Error)]
pub enum NativeLoaderError {
    /// An I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// No native library resource exists for the current platform.
    #[error("Native library missing: {0}")]
    LibraryMissing(String),

    /// The library file was found but the dynamic loader rejected it.
    #[error("failed to load native library {path}: {source}")]
    LoadFailed {
        /// The file that was handed to the dynamic loader.
        path: PathBuf,

        /// The dynamic loader's error.
        #[source]
        source: libloading::Error,
    },

    /// No loaded library exports the requested native method.
    #[error("unsatisfied link: no loaded library exports {symbol}")]
    UnsatisfiedLink {
        /// The symbol that was looked up.
        symbol: String,
    },

    /// A properties file could not be parsed.
    #[error("invalid properties at line {line}: {message}")]
    InvalidProperties {
        /// The 1-based line the problem was found on.
        line: usize,

        /// What was wrong with it.
        message: String,
    },

    /// Custom error.
    #[error("custom error: {0}")]
    Custom(#[from] AnyError),
}

/// An error that can represent any error.
#[derive(Debug)]
pub struct AnyError {
    error: anyhow::Error,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl NativeLoaderError {
    /// Creates a new `Err` result.
    pub fn custom(error: impl Into<anyhow::Error>) -> NativeLoaderError {
        NativeLoaderError::Custom(AnyError {
            error: error.into(),
        })
    }
}

impl AnyError {
    /// Downcasts the error to a `T`.
    pub fn downcast<T>(&self) -> Option<&T>
    where
        T: Display + fmt::Debug + Send + Sync + 'static,
    {
        self.error.downcast_ref::<T>()
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl PartialEq for AnyError {
    fn eq(&self, other: &Self) -> bool {
        self.error.to_string() == other.error.to_string()
    }
}

impl Display for AnyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl Error for AnyError {}
