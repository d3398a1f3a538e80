//! JNI native method naming.
//!
//! The JVM looks up the implementation of a native method under a symbol derived from the
//! class and method names:
//!
//! - the short name, `Java_` + mangled class name + `_` + mangled method name
//! - the long name, the short name + `__` + mangled argument signature, used for overloads
//!
//! Mangling maps `/` and `.` to `_` and escapes `_`, `;`, `[` and every non-ASCII-alphanumeric
//! UTF-16 code unit.

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const SYMBOL_PREFIX: &str = "Java_";

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Returns the JNI short name for `method` of the fully-qualified `class`.
///
/// ## Example
/// ```
/// use nativeloader_core::binding;
///
/// assert_eq!(
///     binding::short_name("greetings.Hello", "world"),
///     "Java_greetings_Hello_world"
/// );
/// ```
pub fn short_name(class: &str, method: &str) -> String {
    format!("{}{}_{}", SYMBOL_PREFIX, mangle(class), mangle(method))
}

/// Returns the JNI long name for an overloaded native method.
///
/// `signature` is a method descriptor such as `(ILjava/lang/String;)V`; only the argument
/// part between the parentheses takes part in the name. A bare argument list is accepted too.
pub fn long_name(class: &str, method: &str, signature: &str) -> String {
    let args = match (signature.find('('), signature.find(')')) {
        (Some(open), Some(close)) if open < close => &signature[open + 1..close],
        _ => signature,
    };

    format!("{}__{}", short_name(class, method), mangle(args))
}

/// Mangles a class name, method name or argument signature.
pub fn mangle(name: &str) -> String {
    let mut mangled = String::with_capacity(name.len());
    for unit in name.encode_utf16() {
        match char::from_u32(unit as u32) {
            Some('.') | Some('/') => mangled.push('_'),
            Some('_') => mangled.push_str("_1"),
            Some(';') => mangled.push_str("_2"),
            Some('[') => mangled.push_str("_3"),
            Some(c) if c.is_ascii_alphanumeric() => mangled.push(c),
            _ => mangled.push_str(&format!("_0{:04x}", unit)),
        }
    }
    mangled
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
