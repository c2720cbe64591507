// prelude.rs - Convenient re-exports for the idiomatic API.
//
//! # Prelude
//!
//! ```
//! use ferrident::prelude::*;
//!
//! let mut engine = Engine::builder().profile(Profile::SingleScript).build();
//! assert_eq!(engine.check_buf(b"x1"), EOK);
//! ```

pub use crate::engine::{Engine, EngineBuilder, Verdict};
pub use crate::error::IdentError;
pub use crate::identifier::{
    has_confusable_warning, is_ok_code, needs_normalization, CodePoint, IdClass, NormForm,
    Options, Profile, ScriptIdx, EOK, EOK_NORM, EOK_NORM_WARN_CONFUS, EOK_WARN_CONFUS,
    ERR_COMBINE, ERR_CONFUS, ERR_ENCODING, ERR_INVALID_ARGUMENT, ERR_MEMORY, ERR_SCRIPT,
    ERR_SCRIPTS, ERR_TOO_LONG, ERR_XID,
};
pub use crate::messages::{DefaultFormatter, Diagnostic, ErrorFormatter};
