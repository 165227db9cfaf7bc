//! Translation resolution with domain, context, and plural fallback

use std::collections::HashMap;

use tracing::debug;

use crate::catalog::TranslationDictionary;
use crate::error::Result;
use crate::rule::PluralRule;
use crate::set::TranslationSet;

/// The gettext operation family
///
/// The two required methods carry the full resolution policy; the rest of
/// the family is provided in terms of them, mirroring the classic gettext
/// call shapes (`d` = explicit domain, `p` = explicit context, `n` =
/// plural). Resolution is total: every method returns a string and never
/// fails, so call sites can use these as drop-in replacements for plain
/// string literals.
pub trait Translate {
	/// Resolve the singular/general form of `original`
	///
	/// `None` for `domain` means the default domain; `None` for `context`
	/// means the empty context. Returns the stored singular variant when it
	/// is present and non-empty, otherwise `original` unchanged. A stored
	/// empty string counts as "no translation" here: an explicit blank
	/// override is indistinguishable from absence at this level.
	fn translate<'a>(
		&'a self,
		domain: Option<&str>,
		context: Option<&str>,
		original: &'a str,
	) -> &'a str;

	/// Resolve the plural form of `original`/`plural` for a count
	///
	/// The plural category comes from the domain's registered rule, or from
	/// the universal two-category rule when the domain has no rule or the
	/// key has no entry at all. When the selected variant is missing or
	/// empty the result falls back to `original` for category 0 and to
	/// `plural` for every other category.
	fn translate_plural<'a>(
		&'a self,
		domain: Option<&str>,
		context: Option<&str>,
		original: &'a str,
		plural: &'a str,
		count: i64,
	) -> &'a str;

	/// Translate in the default domain with no context
	fn gettext<'a>(&'a self, original: &'a str) -> &'a str {
		self.translate(None, None, original)
	}

	/// Translate a singular/plural pair in the default domain
	fn ngettext<'a>(&'a self, original: &'a str, plural: &'a str, count: i64) -> &'a str {
		self.translate_plural(None, None, original, plural, count)
	}

	/// Translate in a specific context
	fn pgettext<'a>(&'a self, context: &str, original: &'a str) -> &'a str {
		self.translate(None, Some(context), original)
	}

	/// Translate in a specific domain
	fn dgettext<'a>(&'a self, domain: &str, original: &'a str) -> &'a str {
		self.translate(Some(domain), None, original)
	}

	/// Translate in a specific domain and context
	fn dpgettext<'a>(&'a self, domain: &str, context: &str, original: &'a str) -> &'a str {
		self.translate(Some(domain), Some(context), original)
	}

	/// Translate a singular/plural pair in a specific domain
	fn dngettext<'a>(
		&'a self,
		domain: &str,
		original: &'a str,
		plural: &'a str,
		count: i64,
	) -> &'a str {
		self.translate_plural(Some(domain), None, original, plural, count)
	}

	/// Translate a singular/plural pair in a specific context
	fn npgettext<'a>(
		&'a self,
		context: &str,
		original: &'a str,
		plural: &'a str,
		count: i64,
	) -> &'a str {
		self.translate_plural(None, Some(context), original, plural, count)
	}

	/// Translate a singular/plural pair in a specific domain and context
	fn dnpgettext<'a>(
		&'a self,
		domain: &str,
		context: &str,
		original: &'a str,
		plural: &'a str,
		count: i64,
	) -> &'a str {
		self.translate_plural(Some(domain), Some(context), original, plural, count)
	}

	/// Mark a string for extraction and return it unchanged
	fn noop<'a>(&self, original: &'a str) -> &'a str {
		original
	}
}

/// Runtime translation lookup over registered domains
///
/// A `Translator` is populated once with [`TranslationSet`]s during an
/// initialization phase and then queried read-only: registration takes
/// `&mut self`, resolution takes `&self`. To serve concurrent readers,
/// finish registration first and share the built value (`&Translator` or
/// `Arc<Translator>`). Registering further sets after publication needs
/// external synchronization, either a single writer or a whole-snapshot
/// replacement.
///
/// # Example
/// ```
/// use gettext_translator::{Translate, TranslationSet, Translator};
///
/// let set = TranslationSet::new("messages")
///     .with_plural_forms(2, "n != 1")
///     .entry("", "One comment", vec![
///         Some("Un commentaire".to_string()),
///         Some("%s commentaires".to_string()),
///     ]);
///
/// let translator = Translator::from_sets([set]).unwrap();
/// assert_eq!(translator.gettext("One comment"), "Un commentaire");
/// assert_eq!(translator.ngettext("One comment", "%s comments", 3), "%s commentaires");
/// assert_eq!(translator.gettext("Untranslated"), "Untranslated");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Translator {
	default_domain: Option<String>,
	dictionary: TranslationDictionary,
	rules: HashMap<String, PluralRule>,
}

impl Translator {
	/// Create a translator with no registered domains
	///
	/// Every resolution falls back to the untranslated input until sets are
	/// registered.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a translator from a sequence of loaded sets
	///
	/// Sets are registered in order, so the first set's domain becomes the
	/// default domain.
	pub fn from_sets<I>(sets: I) -> Result<Self>
	where
		I: IntoIterator<Item = TranslationSet>,
	{
		let mut translator = Self::new();
		for set in sets {
			translator.register_domain(set)?;
		}
		Ok(translator)
	}

	/// Register (or merge into) a domain
	///
	/// The set's plural declaration is compiled before any state changes,
	/// so a malformed declaration rejects the whole call and leaves the
	/// domain's previous entries and rule in place. On success, entries
	/// overwrite key-wise at the `(context, original)` granularity, a new
	/// declaration replaces the domain's rule, and a set without one keeps
	/// the existing rule. The first domain ever registered becomes the
	/// default domain unless one was set explicitly.
	pub fn register_domain(&mut self, set: TranslationSet) -> Result<()> {
		let rule = set
			.plural_forms
			.as_ref()
			.map(|forms| PluralRule::compile(forms.count, &forms.expression))
			.transpose()?;

		let TranslationSet {
			domain, messages, ..
		} = set;

		let entries = messages.len();
		for entry in messages {
			self.dictionary
				.upsert(domain.as_str(), entry.context, entry.original, entry.variants);
		}

		if let Some(rule) = rule {
			self.rules.insert(domain.clone(), rule);
		}

		if self.default_domain.is_none() {
			self.default_domain = Some(domain.clone());
		}

		debug!(
			domain = %domain,
			entries,
			total = self.dictionary.domain_len(&domain),
			categories = self.rules.get(&domain).map(PluralRule::category_count),
			"registered translation domain"
		);
		Ok(())
	}

	/// Set the domain used when an operation names none
	pub fn set_default_domain(&mut self, domain: impl Into<String>) {
		self.default_domain = Some(domain.into());
	}

	/// The domain used when an operation names none
	///
	/// `""` until a domain is registered or set explicitly.
	pub fn default_domain(&self) -> &str {
		self.default_domain.as_deref().unwrap_or("")
	}

	/// Select the plural category for a count in a domain
	///
	/// Lookup misses and domains without a rule both use the universal
	/// two-category rule, so untranslated strings always follow
	/// English-like singular/plural selection no matter how the target
	/// domain inflects.
	fn plural_index(&self, domain: &str, count: i64, lookup_missed: bool) -> usize {
		if lookup_missed {
			return PluralRule::fallback().category_index(count);
		}
		self.rules
			.get(domain)
			.unwrap_or_else(|| PluralRule::fallback())
			.category_index(count)
	}
}

impl Translate for Translator {
	fn translate<'a>(
		&'a self,
		domain: Option<&str>,
		context: Option<&str>,
		original: &'a str,
	) -> &'a str {
		let domain = match domain {
			Some(domain) => domain,
			None => self.default_domain(),
		};
		let context = context.unwrap_or("");

		match self
			.dictionary
			.lookup(domain, context, original)
			.and_then(|variants| variants.first())
			.and_then(Option::as_deref)
		{
			Some(translated) if !translated.is_empty() => translated,
			_ => original,
		}
	}

	fn translate_plural<'a>(
		&'a self,
		domain: Option<&str>,
		context: Option<&str>,
		original: &'a str,
		plural: &'a str,
		count: i64,
	) -> &'a str {
		let domain = match domain {
			Some(domain) => domain,
			None => self.default_domain(),
		};
		let context = context.unwrap_or("");

		let variants = self.dictionary.lookup(domain, context, original);
		let index = self.plural_index(domain, count, variants.is_none());

		if let Some(translated) = variants
			.and_then(|variants| variants.get(index))
			.and_then(Option::as_deref)
		{
			if !translated.is_empty() {
				return translated;
			}
		}

		if index == 0 { original } else { plural }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::TranslationError;
	use rstest::rstest;

	fn french_comments() -> TranslationSet {
		TranslationSet::new("messages")
			.with_plural_forms(2, "n != 1")
			.entry(
				"",
				"One comment",
				vec![
					Some("Un commentaire".to_string()),
					Some("%s commentaires".to_string()),
				],
			)
	}

	#[rstest]
	fn test_unregistered_key_resolves_to_itself() {
		let translator = Translator::new();
		assert_eq!(translator.gettext("hello"), "hello");
		assert_eq!(translator.dgettext("errors", "hello"), "hello");
		assert_eq!(translator.pgettext("menu", "hello"), "hello");
	}

	#[rstest]
	fn test_missing_key_plural_uses_two_category_fallback() {
		let translator = Translator::new();
		assert_eq!(translator.ngettext("world", "worlds", 0), "worlds");
		assert_eq!(translator.ngettext("world", "worlds", 1), "world");
		assert_eq!(translator.ngettext("world", "worlds", 2), "worlds");
		assert_eq!(translator.ngettext("world", "worlds", -3), "worlds");
	}

	#[rstest]
	fn test_first_registered_domain_becomes_default() {
		let mut translator = Translator::new();
		assert_eq!(translator.default_domain(), "");

		translator.register_domain(french_comments()).unwrap();
		translator
			.register_domain(
				TranslationSet::new("errors").entry("", "Oops", vec![Some("Oups".to_string())]),
			)
			.unwrap();

		assert_eq!(translator.default_domain(), "messages");
		assert_eq!(translator.gettext("One comment"), "Un commentaire");
		assert_eq!(translator.gettext("Oops"), "Oops");

		translator.set_default_domain("errors");
		assert_eq!(translator.gettext("Oops"), "Oups");
	}

	#[rstest]
	fn test_explicit_domain_overrides_default() {
		let translator = Translator::from_sets([
			french_comments(),
			TranslationSet::new("errors").entry("", "Oops", vec![Some("Oups".to_string())]),
		])
		.unwrap();

		assert_eq!(translator.dgettext("errors", "Oops"), "Oups");
		assert_eq!(translator.dgettext("missing", "Oops"), "Oops");
	}

	#[rstest]
	fn test_context_disambiguates() {
		let translator = Translator::from_sets([TranslationSet::new("")
			.entry("daytime", "Hello", vec![Some("Bonjour".to_string())])
			.entry("nightime", "Hello", vec![Some("Bonsoir".to_string())])])
		.unwrap();

		assert_eq!(translator.pgettext("daytime", "Hello"), "Bonjour");
		assert_eq!(translator.pgettext("nightime", "Hello"), "Bonsoir");
		assert_eq!(translator.pgettext("other", "Hello"), "Hello");
		assert_eq!(translator.gettext("Hello"), "Hello");
	}

	#[rstest]
	fn test_plural_resolution_with_registered_rule() {
		let translator = Translator::from_sets([french_comments()]).unwrap();

		assert_eq!(
			translator.ngettext("One comment", "%s comments", 1),
			"Un commentaire"
		);
		assert_eq!(
			translator.ngettext("One comment", "%s comments", 3),
			"%s commentaires"
		);
	}

	#[rstest]
	fn test_registered_domain_missing_key_still_uses_fallback_rule() {
		// Russian-style rule: 21 selects category 0 for translated keys,
		// but an untranslated key follows English-like selection
		let translator = Translator::from_sets([TranslationSet::new("ru")
			.with_plural_forms(
				3,
				"n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2",
			)
			.entry(
				"",
				"file",
				vec![
					Some("файл".to_string()),
					Some("файла".to_string()),
					Some("файлов".to_string()),
				],
			)])
		.unwrap();

		assert_eq!(translator.dngettext("ru", "file", "files", 21), "файл");
		assert_eq!(translator.dngettext("ru", "disk", "disks", 21), "disks");
		assert_eq!(translator.dngettext("ru", "disk", "disks", 1), "disk");
	}

	#[rstest]
	fn test_empty_singular_variant_falls_back_to_original() {
		let translator = Translator::from_sets([TranslationSet::new("")
			.entry("", "blanked", vec![Some(String::new())])])
		.unwrap();

		assert_eq!(translator.gettext("blanked"), "blanked");
	}

	#[rstest]
	fn test_missing_variant_slot_falls_back_by_category() {
		// Category 2 has no stored form; category 0 is stored
		let translator = Translator::from_sets([TranslationSet::new("cs")
			.with_plural_forms(3, "n==1 ? 0 : n>=2 && n<=4 ? 1 : 2")
			.entry(
				"",
				"item",
				vec![Some("polozka".to_string()), Some("polozky".to_string()), None],
			)])
		.unwrap();

		assert_eq!(translator.dngettext("cs", "item", "items", 1), "polozka");
		assert_eq!(translator.dngettext("cs", "item", "items", 3), "polozky");
		assert_eq!(translator.dngettext("cs", "item", "items", 5), "items");
	}

	#[rstest]
	fn test_reregistration_overwrites_per_key() {
		let mut translator = Translator::new();
		translator
			.register_domain(
				TranslationSet::new("d")
					.entry("ctx", "x", vec![Some("a".to_string())])
					.entry("ctx", "y", vec![Some("keep".to_string())]),
			)
			.unwrap();
		translator
			.register_domain(
				TranslationSet::new("d")
					.entry("ctx", "x", vec![Some("b".to_string()), Some("c".to_string())]),
			)
			.unwrap();

		assert_eq!(translator.dpgettext("d", "ctx", "x"), "b");
		assert_eq!(translator.dpgettext("d", "ctx", "y"), "keep");
	}

	#[rstest]
	fn test_malformed_declaration_rejects_registration_atomically() {
		let mut translator = Translator::from_sets([french_comments()]).unwrap();

		let error = translator
			.register_domain(
				TranslationSet::new("messages")
					.with_plural_forms(2, "n ===")
					.entry("", "One comment", vec![Some("clobbered".to_string())]),
			)
			.unwrap_err();

		assert!(matches!(error, TranslationError::MalformedExpression { .. }));
		// Previous entries and rule still answer
		assert_eq!(translator.gettext("One comment"), "Un commentaire");
		assert_eq!(
			translator.ngettext("One comment", "%s comments", 3),
			"%s commentaires"
		);
	}

	#[rstest]
	fn test_zero_plural_count_is_rejected() {
		let mut translator = Translator::new();
		let error = translator
			.register_domain(TranslationSet::new("d").with_plural_forms(0, "n != 1"))
			.unwrap_err();
		assert_eq!(error, TranslationError::InvalidPluralCount(0));
	}

	#[rstest]
	fn test_reregistration_without_declaration_keeps_rule() {
		let mut translator = Translator::from_sets([french_comments()]).unwrap();
		translator
			.register_domain(
				TranslationSet::new("messages")
					.entry("", "Other", vec![Some("Autre".to_string())]),
			)
			.unwrap();

		// The two-form rule declared first still applies
		assert_eq!(
			translator.ngettext("One comment", "%s comments", 3),
			"%s commentaires"
		);
		assert_eq!(translator.gettext("Other"), "Autre");
	}

	#[rstest]
	fn test_noop_returns_input() {
		let translator = Translator::from_sets([french_comments()]).unwrap();
		assert_eq!(translator.noop("One comment"), "One comment");
	}
}
