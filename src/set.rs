//! Loader-facing translation set types
//!
//! A loader (for `.po`/`.mo` files, PHP-style arrays, JSON, or anything
//! else) produces one [`TranslationSet`] per domain and hands it to the
//! [`Translator`](crate::Translator). The `nplurals=<int>; plural=<expr>;`
//! header envelope is the loader's job to split; this crate receives the
//! already-separated count and expression text.

use serde::{Deserialize, Serialize};

use crate::catalog::VariantList;

/// A domain's plural declaration: declared category count and the raw
/// selector expression text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluralForms {
	/// Number of plural categories the domain declares (`nplurals`)
	pub count: usize,
	/// Raw selector expression (`plural=`), compiled at registration time
	pub expression: String,
}

/// One translation entry within a set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
	/// Disambiguation context, `""` for none
	#[serde(default)]
	pub context: String,
	/// The untranslated source string, used verbatim as the lookup key
	pub original: String,
	/// Singular form at index 0, plural forms in category order after it;
	/// `None` marks a slot with no stored translation
	pub variants: VariantList,
}

/// A complete translation set for one domain, as produced by a loader
///
/// # Example
/// ```
/// use gettext_translator::TranslationSet;
///
/// let set = TranslationSet::new("messages")
///     .with_plural_forms(2, "n != 1")
///     .entry("", "One comment", vec![
///         Some("Un commentaire".to_string()),
///         Some("%s commentaires".to_string()),
///     ]);
///
/// assert_eq!(set.domain, "messages");
/// assert_eq!(set.messages.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationSet {
	/// Domain the set belongs to, `""` for no explicit domain
	#[serde(default)]
	pub domain: String,
	/// Optional plural declaration; a set without one keeps whatever rule
	/// the domain already has
	#[serde(rename = "plural-forms", default, skip_serializing_if = "Option::is_none")]
	pub plural_forms: Option<PluralForms>,
	/// The entries to register
	#[serde(default)]
	pub messages: Vec<TranslationEntry>,
}

impl TranslationSet {
	/// Create an empty set for a domain
	pub fn new(domain: impl Into<String>) -> Self {
		Self {
			domain: domain.into(),
			plural_forms: None,
			messages: Vec::new(),
		}
	}

	/// Declare the domain's plural forms
	#[must_use]
	pub fn with_plural_forms(mut self, count: usize, expression: impl Into<String>) -> Self {
		self.plural_forms = Some(PluralForms {
			count,
			expression: expression.into(),
		});
		self
	}

	/// Append one entry
	#[must_use]
	pub fn entry(
		mut self,
		context: impl Into<String>,
		original: impl Into<String>,
		variants: VariantList,
	) -> Self {
		self.messages.push(TranslationEntry {
			context: context.into(),
			original: original.into(),
			variants,
		});
		self
	}
}
