use thiserror::Error;

/// Errors that can occur while registering translation sets
///
/// Resolution itself is infallible: missing translations fall back to the
/// untranslated input and never produce an error. Everything that can go
/// wrong is surfaced at registration time, before bad data becomes
/// queryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
	/// Plural-forms expression failed to parse
	#[error("malformed plural expression at position {position}: {message}")]
	MalformedExpression {
		/// Byte offset into the expression source where parsing stopped
		position: usize,
		/// What the parser expected or found
		message: String,
	},

	/// Declared plural category count is zero
	#[error("invalid plural count: {0} (a domain must declare at least one category)")]
	InvalidPluralCount(usize),
}

/// Result type for registration operations
pub type Result<T> = std::result::Result<T, TranslationError>;
