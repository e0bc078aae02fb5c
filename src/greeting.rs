//! The greeting handed to the managed caller

use std::ffi::CString;
use std::fmt;

use crate::error::{Error, Result};

/// Text returned by `MainActivity.stringFromJNI`
pub const GREETING: &str = "Hello from C++";

/// Immutable greeting text
///
/// Content-only value with no identity. Each bridge call builds its own, and
/// the null-terminated buffer made from it lives only until the call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GreetingValue {
    text: &'static str,
}

impl GreetingValue {
    pub const fn new() -> Self {
        Self { text: GREETING }
    }

    pub fn as_str(&self) -> &str {
        self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Null-terminated native copy of the greeting.
    ///
    /// Dropped at the end of the caller's scope on every path.
    pub fn to_c_string(&self) -> Result<CString> {
        CString::new(self.text).map_err(|e| Error::InteriorNul(e.nul_position()))
    }
}

impl Default for GreetingValue {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<str> for GreetingValue {
    fn as_ref(&self) -> &str {
        self.text
    }
}

impl fmt::Display for GreetingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_greeting_bytes() {
        let greeting = GreetingValue::new();
        assert_eq!(greeting.as_bytes(), b"Hello from C++");
        assert_eq!(greeting.as_str().chars().count(), 14);
        assert!(greeting.as_bytes().iter().all(|b| b.is_ascii_graphic() || *b == b' '));
        assert_eq!(greeting.as_str().trim(), greeting.as_str());
    }

    #[test]
    fn test_c_string_is_null_terminated_without_interior_nul() {
        let native = GreetingValue::new().to_c_string().unwrap();
        let with_nul = native.as_bytes_with_nul();

        assert_eq!(with_nul.len(), 15);
        assert_eq!(with_nul.last(), Some(&0));
        assert!(!native.as_bytes().contains(&0));
        assert_eq!(native.to_str().unwrap(), GREETING);
    }

    #[test]
    fn test_repeated_construction_is_identical() {
        let first = GreetingValue::new();
        for _ in 0..1000 {
            let next = GreetingValue::default();
            assert_eq!(next, first);
            assert_eq!(next.to_string(), GREETING);
        }
    }

    #[test]
    fn test_concurrent_construction() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                thread::spawn(|| {
                    (0..500)
                        .map(|_| GreetingValue::new().to_c_string().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            for native in handle.join().unwrap() {
                assert_eq!(native.to_bytes(), GREETING.as_bytes());
            }
        }
    }
}
