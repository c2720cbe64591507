// messages.rs - Result code to message conversion and diagnostic formatting.

use std::fmt::Write;

use crate::identifier::*;

/// Get the message text for a result code.
pub fn error_code_to_message(code: i32) -> &'static str {
    match code {
        EOK => "ok",
        EOK_NORM => "ok, needs normalization",
        EOK_WARN_CONFUS => "ok, contains confusable characters",
        EOK_NORM_WARN_CONFUS => "ok, needs normalization and contains confusable characters",
        ERR_XID => "invalid identifier character",
        ERR_SCRIPT => "script not allowed",
        ERR_SCRIPTS => "mixed scripts not allowed",
        ERR_ENCODING => "invalid UTF-8 encoding",
        ERR_COMBINE => "invalid combining mark sequence",
        ERR_CONFUS => "confusable identifier",
        ERR_MEMORY => "memory allocation failed",
        ERR_TOO_LONG => "identifier too long",
        ERR_INVALID_ARGUMENT => "invalid argument",
        _ => "undefined error code",
    }
}

/// Everything known about one failed (or warned) check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic<'a> {
    pub code: i32,
    pub codepoint: Option<CodePoint>,
    pub script: Option<&'static str>,
    /// Scripts already recorded in the active context, joined.
    pub existing_scripts: &'a str,
}

/// Strategy for turning a [`Diagnostic`] into user-facing text.
///
/// Installed with `EngineBuilder::formatter`; compilers typically wrap the
/// message with their own source location.
pub trait ErrorFormatter {
    fn format(&self, diag: &Diagnostic<'_>) -> String;
}

/// Built-in formatter: `<message> (U+XXXX <script>; existing: <scripts>)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl ErrorFormatter for DefaultFormatter {
    fn format(&self, diag: &Diagnostic<'_>) -> String {
        let mut out = String::from(error_code_to_message(diag.code));
        if diag.code >= 0 && diag.code & EOK_WARN_CONFUS == 0 {
            return out;
        }
        let mut detail = String::new();
        if let Some(cp) = diag.codepoint {
            let _ = write!(detail, "U+{:04X}", cp);
            if let Some(script) = diag.script {
                let _ = write!(detail, " {}", script);
            }
        }
        if diag.code == ERR_SCRIPTS && !diag.existing_scripts.is_empty() {
            if !detail.is_empty() {
                detail.push_str("; ");
            }
            let _ = write!(detail, "existing: {}", diag.existing_scripts);
        }
        if !detail.is_empty() {
            let _ = write!(out, " ({})", detail);
        }
        out
    }
}
