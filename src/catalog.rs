//! Translation dictionary keyed by domain, context, and original string

use std::collections::HashMap;

/// Ordered variant list for one translation key
///
/// Index 0 is the singular/general form, indices 1.. are plural forms in
/// ascending category order. `None` means "no stored translation for this
/// slot" and is distinct from `Some("")`, a deliberately blank translation.
pub type VariantList = Vec<Option<String>>;

/// A dictionary of stored translations
///
/// Keys are `(domain, context, original)` triples matched verbatim: no
/// normalization, no trimming, case- and whitespace-sensitive. The empty
/// string is a valid domain ("no explicit domain") and a valid context
/// ("no context", the common case).
///
/// # Example
/// ```
/// use gettext_translator::TranslationDictionary;
///
/// let mut dictionary = TranslationDictionary::new();
/// dictionary.upsert("", "", "Hello", vec![Some("Bonjour".to_string())]);
///
/// assert!(dictionary.lookup("", "", "Hello").is_some());
/// assert!(dictionary.lookup("", "menu", "Hello").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranslationDictionary {
	domains: HashMap<String, HashMap<String, HashMap<String, VariantList>>>,
}

impl TranslationDictionary {
	/// Create an empty dictionary
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace the variant list for one exact key
	///
	/// Repeated registration of the same `(context, original)` key within a
	/// domain overwrites the whole variant list; variant lists are never
	/// merged element by element.
	pub fn upsert(
		&mut self,
		domain: impl Into<String>,
		context: impl Into<String>,
		original: impl Into<String>,
		variants: VariantList,
	) {
		self.domains
			.entry(domain.into())
			.or_default()
			.entry(context.into())
			.or_default()
			.insert(original.into(), variants);
	}

	/// Look up the variant list for one exact key
	pub fn lookup(&self, domain: &str, context: &str, original: &str) -> Option<&[Option<String>]> {
		self.domains
			.get(domain)?
			.get(context)?
			.get(original)
			.map(Vec::as_slice)
	}

	/// Whether any key is stored for the given domain
	pub fn contains_domain(&self, domain: &str) -> bool {
		self.domains.contains_key(domain)
	}

	/// Number of stored keys across all contexts of a domain
	pub fn domain_len(&self, domain: &str) -> usize {
		self.domains
			.get(domain)
			.map_or(0, |contexts| contexts.values().map(HashMap::len).sum())
	}
}
