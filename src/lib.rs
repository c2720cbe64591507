//! # Ferrident
//!
//! Pure-Rust Unicode identifier security checks for compilers, linkers and
//! other tools that accept identifiers from source text. Identifiers are
//! judged against a UTS #39 restriction profile, an identifier class and a
//! normalization form, inside a context that remembers the scripts already
//! seen in the same scope.
//!
//! No bindings, no global state: every [`Engine`](engine::Engine) owns its
//! configuration and contexts.
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrident::prelude::*;
//!
//! let mut engine = Engine::builder()
//!     .profile(Profile::ModeratelyRestrictive)
//!     .normalization(NormForm::Nfc)
//!     .build();
//!
//! assert_eq!(engine.check_buf("café".as_bytes()), EOK);
//! // Cyrillic a after Latin in the same scope
//! assert_eq!(engine.check_buf("\u{430}lpha".as_bytes()), ERR_SCRIPTS);
//! assert_eq!(engine.error_message(ERR_SCRIPTS),
//!            "mixed scripts not allowed (U+0430 Cyrillic; existing: Latin)");
//! ```
//!
//! The `Result`-based entry point:
//!
//! ```rust
//! use ferrident::prelude::*;
//!
//! let mut engine = Engine::default();
//! let verdict = engine.validate("cafe\u{301}").unwrap();
//! assert!(verdict.needs_normalization());
//! assert_eq!(verdict.normalized.as_deref(), Some("café"));
//! assert_eq!(engine.validate("1st"), Err(IdentError::Xid));
//! ```
//!
//! ## Raw Codes
//!
//! `Engine::init` takes the profile, normalization form and option bits as
//! plain integers, for callers that read them from a command line or a
//! foreign interface:
//!
//! ```rust
//! use ferrident::engine::Engine;
//! use ferrident::identifier::*;
//!
//! let mut engine = Engine::init(4, 1, Options::WARN_CONFUSABLE.bits()).unwrap();
//! assert_eq!(engine.check(b"paypal\0"), EOK);
//! assert_eq!(engine.check_confusable(b"paypal"), EOK);
//! assert_eq!(engine.check_confusable("p\u{430}ypal".as_bytes()), ERR_CONFUS);
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`encodings`] | UTF-8 decoding and encoding |
//! | [`unicode`] | Scripts, categories, identifier types, class predicates |
//! | [`normalize`] | NFC/NFD/NFKC/NFKD/FCD/FCC |
//! | [`context`] | Per-scope script sets and the context manager |
//! | [`mixed_script`] | Per-identifier restriction-profile walk |
//! | [`confusable`] | Skeletons and the per-scope confusable index |
//! | [`hash`] | FNV-1a and the open-addressing table behind the index |
//! | [`identifier`] | Result codes, profiles, forms, classes, options |
//! | [`error`] | [`IdentError`](error::IdentError) |
//! | [`messages`] | Result-code text and diagnostic formatters |
//! | [`engine`] | [`Engine`](engine::Engine) and its builder |

pub mod confusable;
pub mod context;
pub mod encodings;
pub mod engine;
pub mod error;
pub mod hash;
pub mod identifier;
pub mod messages;
pub mod mixed_script;
pub mod normalize;
pub mod prelude;
pub mod unicode;
