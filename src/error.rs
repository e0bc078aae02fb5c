//! Error types for the native greeting bridge

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bridge error types
///
/// None of these cross the JNI boundary. Exported functions log the error and
/// hand `null` back to the JVM, which raises whatever exception is pending.
#[derive(Debug, Error)]
pub enum Error {
    #[error("JNI error: {0}")]
    Jni(#[from] jni::errors::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid Java identifier {identifier:?}: {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("Invalid method signature {signature:?}: {reason}")]
    InvalidSignature { signature: String, reason: String },

    #[error("Symbol mismatch: managed side expects {expected}, library exports {exported}")]
    SymbolMismatch { expected: String, exported: String },

    #[error("Text contains a NUL byte at offset {0}")]
    InteriorNul(usize),
}

impl Error {
    pub(crate) fn invalid_identifier(identifier: &str, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_signature(signature: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSignature {
            signature: signature.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_mismatch_message_names_both_sides() {
        let err = Error::SymbolMismatch {
            expected: "Java_a_B_c".to_string(),
            exported: "Java_a_B_d".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Java_a_B_c"));
        assert!(message.contains("Java_a_B_d"));
    }

    #[test]
    fn test_io_error_converts() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here/bridge.toml")?)
        }

        assert!(matches!(read_missing(), Err(Error::Io(_))));
    }
}
