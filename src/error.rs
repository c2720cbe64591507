// error.rs - Idiomatic Rust error type for ferrident.
//
// Groups the C-style i32 result codes into semantic variants while keeping
// the original code for interop.

use std::fmt;

use crate::identifier::*;
use crate::messages::error_code_to_message;

/// Error type for identifier checks and engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentError {
    /// A codepoint is not in the selected identifier class.
    Xid,
    /// A codepoint's script is excluded, undeclared or otherwise not allowed.
    Script,
    /// The scripts used together violate the restriction profile.
    Scripts,
    /// Malformed UTF-8.
    Encoding,
    /// Invalid combining-mark sequence.
    Combine,
    /// Confusable codepoint or identifier.
    Confusable,
    /// Allocation failure while growing a buffer.
    Memory,
    /// Identifier exceeds the configured maximum length.
    TooLong,
    /// Invalid argument passed to a configuration or context call.
    InvalidArgument,
    /// Any other code.
    Other(i32),
}

impl fmt::Display for IdentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentError::Other(code) => write!(f, "error code {}", code),
            other => f.write_str(error_code_to_message(other.code())),
        }
    }
}

impl std::error::Error for IdentError {}

impl From<i32> for IdentError {
    fn from(code: i32) -> Self {
        match code {
            ERR_XID => IdentError::Xid,
            ERR_SCRIPT => IdentError::Script,
            ERR_SCRIPTS => IdentError::Scripts,
            ERR_ENCODING => IdentError::Encoding,
            ERR_COMBINE => IdentError::Combine,
            ERR_CONFUS => IdentError::Confusable,
            ERR_MEMORY => IdentError::Memory,
            ERR_TOO_LONG => IdentError::TooLong,
            ERR_INVALID_ARGUMENT => IdentError::InvalidArgument,
            _ => IdentError::Other(code),
        }
    }
}

impl IdentError {
    /// Returns the C-style result code.
    pub fn code(&self) -> i32 {
        match self {
            IdentError::Xid => ERR_XID,
            IdentError::Script => ERR_SCRIPT,
            IdentError::Scripts => ERR_SCRIPTS,
            IdentError::Encoding => ERR_ENCODING,
            IdentError::Combine => ERR_COMBINE,
            IdentError::Confusable => ERR_CONFUS,
            IdentError::Memory => ERR_MEMORY,
            IdentError::TooLong => ERR_TOO_LONG,
            IdentError::InvalidArgument => ERR_INVALID_ARGUMENT,
            IdentError::Other(code) => *code,
        }
    }

    /// Convert a check result into `Ok(status)` or the matching error.
    pub fn check_code(code: i32) -> Result<i32, IdentError> {
        if code >= 0 {
            Ok(code)
        } else {
            Err(IdentError::from(code))
        }
    }
}
