use jni_sys::{jclass, JNIEnv};
use libloading::Symbol;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The native signature of a `static native void m()` method.
pub type StaticVoidMethod = unsafe extern "system" fn(*mut JNIEnv, jclass);

/// A resolved `static native void m()` method, borrowed from the library that exports it.
pub struct StaticNativeMethod<'lib> {
    symbol: String,
    function: Symbol<'lib, StaticVoidMethod>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<'lib> StaticNativeMethod<'lib> {
    pub(crate) fn new(symbol: String, function: Symbol<'lib, StaticVoidMethod>) -> Self {
        Self { symbol, function }
    }

    /// The JNI symbol the method was resolved under.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Calls the method with null env and class handles.
    ///
    /// # Safety
    ///
    /// The native code must not use its `JNIEnv` or `jclass` arguments, since there is no JVM
    /// behind them.
    pub unsafe fn invoke(&self) {
        tracing::debug!("invoking {}", self.symbol);
        (self.function)(std::ptr::null_mut(), std::ptr::null_mut());
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl std::fmt::Debug for StaticNativeMethod<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticNativeMethod")
            .field("symbol", &self.symbol)
            .finish_non_exhaustive()
    }
}
