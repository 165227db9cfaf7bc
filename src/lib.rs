//! Gettext-style runtime translation lookup
//!
//! This crate resolves localized strings given a source string, an optional
//! disambiguation context, an optional translation domain, and (for plural
//! forms) a count. Plural selection is driven by the catalog's own
//! `plural=` selector expression, compiled at registration time by a
//! recursive-descent parser and evaluated as an expression tree, so
//! untrusted catalog headers are never executed as code.
//!
//! # Quick Start
//!
//! ```
//! use gettext_translator::{Translate, TranslationSet, Translator};
//!
//! let set = TranslationSet::new("messages")
//!     .with_plural_forms(2, "n != 1")
//!     .entry("", "One comment", vec![
//!         Some("Un commentaire".to_string()),
//!         Some("%s commentaires".to_string()),
//!     ])
//!     .entry("menu", "File", vec![Some("Fichier".to_string())]);
//!
//! let translator = Translator::from_sets([set]).unwrap();
//!
//! assert_eq!(translator.gettext("One comment"), "Un commentaire");
//! assert_eq!(translator.ngettext("One comment", "%s comments", 3), "%s commentaires");
//! assert_eq!(translator.pgettext("menu", "File"), "Fichier");
//! // Untranslated strings pass through unchanged
//! assert_eq!(translator.gettext("Goodbye"), "Goodbye");
//! ```
//!
//! # Resolution policy
//!
//! - Keys are matched verbatim per `(domain, context, original)`; the
//!   domain defaults to the first registered one, the context to `""`.
//! - A stored singular that is missing or empty falls back to the original
//!   string; a missing or empty plural variant falls back to the original
//!   for category 0 and to the literal plural argument otherwise.
//! - Domains without a plural declaration, and keys without an entry, use
//!   the universal two-category rule (1 is singular, everything else is
//!   plural).
//!
//! # Concurrency
//!
//! Registration takes `&mut self` and resolution takes `&self`. Populate a
//! [`Translator`] fully during initialization, then share it behind `&` or
//! `Arc` for concurrent readers. Registering more sets after publication
//! requires external synchronization: a single-writer lock, or building a
//! fresh snapshot and swapping it in.
//!
//! Loading catalog files and interpolating placeholder arguments into
//! resolved strings are left to collaborating crates; the exchange format
//! is [`TranslationSet`].

pub mod catalog;
pub mod error;
pub mod expression;
pub mod rule;
pub mod set;
pub mod translator;

pub use catalog::{TranslationDictionary, VariantList};
pub use error::{Result, TranslationError};
pub use expression::PluralExpression;
pub use rule::PluralRule;
pub use set::{PluralForms, TranslationEntry, TranslationSet};
pub use translator::{Translate, Translator};
