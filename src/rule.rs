//! Per-domain plural category selection

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{Result, TranslationError};
use crate::expression::PluralExpression;

/// The universal two-category rule, compiled once and shared
///
/// Used for domains that declare no plural forms and for lookup misses:
/// category 0 for a count of exactly 1, category 1 for everything else,
/// including zero and negative counts.
static FALLBACK_RULE: Lazy<PluralRule> = Lazy::new(|| {
	PluralRule::compile(2, "n != 1").expect("two-category fallback rule compiles")
});

/// A domain's declared plural category count and its compiled selector
///
/// # Example
/// ```
/// use gettext_translator::PluralRule;
///
/// let rule = PluralRule::compile(3, "n==1 ? 0 : n==2 ? 1 : 2").unwrap();
/// assert_eq!(rule.category_count(), 3);
/// assert_eq!(rule.category_index(2), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PluralRule {
	count: usize,
	expression: PluralExpression,
}

impl PluralRule {
	/// Compile a plural rule from a declared category count and expression
	///
	/// Fails with [`TranslationError::InvalidPluralCount`] when `count` is
	/// zero and with [`TranslationError::MalformedExpression`] when the
	/// expression does not parse.
	pub fn compile(count: usize, expression: &str) -> Result<Self> {
		if count == 0 {
			return Err(TranslationError::InvalidPluralCount(count));
		}
		let expression = PluralExpression::parse(expression)?;
		Ok(Self { count, expression })
	}

	/// The universal two-category rule shared by all fallback paths
	pub fn fallback() -> &'static Self {
		&FALLBACK_RULE
	}

	/// Number of plural categories this rule selects between, at least 1
	pub fn category_count(&self) -> usize {
		self.count
	}

	/// The 0-based plural category for a count, always in `[0, count-1]`
	///
	/// Headers seen in the wild occasionally declare fewer categories than
	/// their expression can produce; the raw result is clamped into range
	/// instead of being treated as an error.
	pub fn category_index(&self, n: i64) -> usize {
		let raw = self.expression.evaluate(n);
		if raw < 0 {
			debug!(raw, n, "plural expression yielded a negative category, clamping to 0");
			return 0;
		}
		let index = raw as usize;
		if index >= self.count {
			debug!(
				raw,
				n,
				count = self.count,
				"plural expression exceeded the declared category count, clamping"
			);
			return self.count - 1;
		}
		index
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_compile_rejects_zero_count() {
		assert_eq!(
			PluralRule::compile(0, "n != 1"),
			Err(TranslationError::InvalidPluralCount(0))
		);
	}

	#[rstest]
	fn test_compile_rejects_malformed_expression() {
		assert!(matches!(
			PluralRule::compile(2, "n !!= 1"),
			Err(TranslationError::MalformedExpression { .. })
		));
	}

	#[rstest]
	#[case(1, 0)]
	#[case(2, 1)]
	#[case(0, 1)]
	#[case(-1, 1)]
	#[case(-7, 1)]
	#[case(100, 1)]
	fn test_fallback_rule_is_two_category(#[case] n: i64, #[case] expected: usize) {
		assert_eq!(PluralRule::fallback().category_index(n), expected);
		assert_eq!(PluralRule::fallback().category_count(), 2);
	}

	#[rstest]
	fn test_category_index_clamps_above_declared_count() {
		// The expression can yield 5, but only two categories are declared
		let rule = PluralRule::compile(2, "n == 1 ? 0 : 5").unwrap();
		assert_eq!(rule.category_index(1), 0);
		assert_eq!(rule.category_index(3), 1);
	}

	#[rstest]
	fn test_category_index_clamps_negative_results() {
		let rule = PluralRule::compile(3, "n % 10").unwrap();
		assert_eq!(rule.category_index(-21), 0);
		assert_eq!(rule.category_index(12), 2);
		assert_eq!(rule.category_index(11), 1);
	}

	#[rstest]
	#[case(1, 0)]
	#[case(2, 1)]
	#[case(5, 2)]
	#[case(12, 2)]
	#[case(22, 1)]
	#[case(0, 2)]
	fn test_polish_rule(#[case] n: i64, #[case] expected: usize) {
		let rule = PluralRule::compile(
			3,
			"n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2",
		)
		.unwrap();
		assert_eq!(rule.category_index(n), expected);
	}
}
