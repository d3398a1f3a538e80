use std::{collections::BTreeMap, fs, path::Path, str::FromStr};

use crate::{NativeLoaderError, NativeLoaderResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Key/value pairs read from a Java style `.properties` file.
///
/// Supported syntax:
/// - `#` and `!` comment lines, blank lines
/// - `key=value`, `key: value` and `key value`
/// - a trailing `\` continues the value on the next line
/// - the escapes `\t`, `\n`, `\r`, `\f` and `\uXXXX`; any other escaped character stands for itself
///
/// A later definition of a key replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Properties {
    /// Creates an empty set of properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses properties from text.
    pub fn parse(text: &str) -> NativeLoaderResult<Self> {
        let mut properties = Self::new();
        let mut lines = text.lines().enumerate();

        while let Some((index, line)) = lines.next() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            // Join continuation lines, dropping the leading whitespace of each
            let mut logical = trimmed.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical);
            let key = unescape(key, index + 1)?;
            let value = unescape(value, index + 1)?;
            properties.entries.insert(key, value);
        }

        Ok(properties)
    }

    /// Reads and parses a properties file.
    pub fn from_file(path: impl AsRef<Path>) -> NativeLoaderResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Returns the value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl FromStr for Properties {
    type Err = NativeLoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions: Helpers
//--------------------------------------------------------------------------------------------------

/// An odd number of trailing backslashes continues the line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Splits a logical line at the first unescaped `=`, `:` or whitespace.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..i], line[i + 1..].trim_start()),
            c if c.is_whitespace() => {
                let rest = line[i..].trim_start();
                let rest = rest
                    .strip_prefix('=')
                    .or_else(|| rest.strip_prefix(':'))
                    .unwrap_or(rest);
                return (&line[..i], rest.trim_start());
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(text: &str, line: usize) -> NativeLoaderResult<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let unit = Some(&hex)
                    .filter(|hex| {
                        hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit())
                    })
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .and_then(char::from_u32)
                    .ok_or_else(|| NativeLoaderError::InvalidProperties {
                        line,
                        message: format!("malformed \\u escape: \\u{}", hex),
                    })?;
                out.push(unit);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separators_and_comments() {
        let text = "\
# a comment
! another comment

greetings.disabled=true
greetings.hello.path : /var/tmp
greetings.useExternal   yes
   indented = value with spaces
empty=
";
        let properties = Properties::parse(text).unwrap();
        assert_eq!(properties.len(), 5);
        assert_eq!(properties.get("greetings.disabled"), Some("true"));
        assert_eq!(properties.get("greetings.hello.path"), Some("/var/tmp"));
        assert_eq!(properties.get("greetings.useExternal"), Some("yes"));
        assert_eq!(properties.get("indented"), Some("value with spaces"));
        assert_eq!(properties.get("empty"), Some(""));
        assert_eq!(properties.get("missing"), None);
    }

    #[test]
    fn test_parse_continuation_and_escapes() {
        let text = "path = /opt/\\\n    native/\\\n    libs\nkey\\=with\\:seps = a\\tb\\\\\nsnow=\\u2603\n";
        let properties = Properties::parse(text).unwrap();
        assert_eq!(properties.get("path"), Some("/opt/native/libs"));
        assert_eq!(properties.get("key=with:seps"), Some("a\tb\\"));
        assert_eq!(properties.get("snow"), Some("\u{2603}"));
    }

    #[test]
    fn test_parse_key_without_value() {
        let properties = Properties::parse("greetings.hello.disabled\n").unwrap();
        assert_eq!(properties.get("greetings.hello.disabled"), Some(""));
    }

    #[test]
    fn test_later_definition_wins() {
        let properties = Properties::parse("a=1\na=2\n").unwrap();
        assert_eq!(properties.get("a"), Some("2"));
    }

    #[test]
    fn test_parse_rejects_bad_unicode_escape() {
        let err = Properties::parse("ok=1\nbad=\\u12G4\n").unwrap_err();
        match err {
            NativeLoaderError::InvalidProperties { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_rejects_signed_unicode_escape() {
        for text in ["sign=\\u+12a\n", "sign=\\u-12a\n", "short=\\u12\n"] {
            match Properties::parse(text) {
                Err(NativeLoaderError::InvalidProperties { line, .. }) => assert_eq!(line, 1),
                other => panic!("unexpected result for {:?}: {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_set_and_remove() {
        let mut properties: Properties = [("a", "1")].into_iter().collect();
        assert_eq!(properties.set("a", "2").as_deref(), Some("1"));
        assert_eq!(properties.remove("a").as_deref(), Some("2"));
        assert!(properties.is_empty());
    }
}
