//! Plural-forms expression compiler and evaluator
//!
//! Gettext catalogs declare which plural category a count belongs to with a
//! small C-like expression over a single integer variable `n`, for example
//! `n % 10 == 1 && n % 100 != 11 ? 0 : 1`. This module compiles that header
//! text into an expression tree and evaluates it by tree walk, so untrusted
//! catalog data is never executed as code.

use crate::error::{Result, TranslationError};

/// Binary operators accepted by the plural-rule grammar
///
/// Gettext rules use no `*` or `/`, so `%` is the only arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
	Modulo,
	Equal,
	NotEqual,
	Less,
	Greater,
	LessOrEqual,
	GreaterOrEqual,
	And,
	Or,
}

/// A parsed plural-rule expression node
#[derive(Debug, Clone, PartialEq)]
enum Expr {
	Literal(i64),
	Variable,
	UnaryNot(Box<Expr>),
	Binary {
		op: BinaryOp,
		lhs: Box<Expr>,
		rhs: Box<Expr>,
	},
	Ternary {
		condition: Box<Expr>,
		if_true: Box<Expr>,
		if_false: Box<Expr>,
	},
}

impl Expr {
	fn evaluate(&self, n: i64) -> i64 {
		match self {
			Self::Literal(value) => *value,
			Self::Variable => n,
			Self::UnaryNot(inner) => i64::from(inner.evaluate(n) == 0),
			Self::Binary { op, lhs, rhs } => {
				let lhs = lhs.evaluate(n);
				let rhs = rhs.evaluate(n);
				match op {
					// `x % 0` evaluates to 0 so a malformed header cannot
					// panic the evaluator; sign follows the dividend
					BinaryOp::Modulo => lhs.checked_rem(rhs).unwrap_or(0),
					BinaryOp::Equal => i64::from(lhs == rhs),
					BinaryOp::NotEqual => i64::from(lhs != rhs),
					BinaryOp::Less => i64::from(lhs < rhs),
					BinaryOp::Greater => i64::from(lhs > rhs),
					BinaryOp::LessOrEqual => i64::from(lhs <= rhs),
					BinaryOp::GreaterOrEqual => i64::from(lhs >= rhs),
					BinaryOp::And => i64::from(lhs != 0 && rhs != 0),
					BinaryOp::Or => i64::from(lhs != 0 || rhs != 0),
				}
			}
			Self::Ternary {
				condition,
				if_true,
				if_false,
			} => {
				if condition.evaluate(n) != 0 {
					if_true.evaluate(n)
				} else {
					if_false.evaluate(n)
				}
			}
		}
	}
}

/// Tokens of the plural-rule grammar, tagged with their byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
	Number(i64),
	Variable,
	Percent,
	Equal,
	NotEqual,
	Less,
	Greater,
	LessOrEqual,
	GreaterOrEqual,
	And,
	Or,
	Not,
	Question,
	Colon,
	OpenParen,
	CloseParen,
}

impl Token {
	fn describe(self) -> &'static str {
		match self {
			Self::Number(_) => "number",
			Self::Variable => "`n`",
			Self::Percent => "`%`",
			Self::Equal => "`==`",
			Self::NotEqual => "`!=`",
			Self::Less => "`<`",
			Self::Greater => "`>`",
			Self::LessOrEqual => "`<=`",
			Self::GreaterOrEqual => "`>=`",
			Self::And => "`&&`",
			Self::Or => "`||`",
			Self::Not => "`!`",
			Self::Question => "`?`",
			Self::Colon => "`:`",
			Self::OpenParen => "`(`",
			Self::CloseParen => "`)`",
		}
	}
}

fn tokenize(source: &str) -> Result<Vec<(usize, Token)>> {
	let bytes = source.as_bytes();
	let mut tokens = Vec::new();
	let mut i = 0;

	while i < bytes.len() {
		let start = i;
		let token = match bytes[i] {
			b' ' | b'\t' | b'\r' | b'\n' => {
				i += 1;
				continue;
			}
			b'0'..=b'9' => {
				while i < bytes.len() && bytes[i].is_ascii_digit() {
					i += 1;
				}
				let literal = &source[start..i];
				let value = literal.parse().map_err(|_| TranslationError::MalformedExpression {
					position: start,
					message: format!("integer literal `{literal}` out of range"),
				})?;
				tokens.push((start, Token::Number(value)));
				continue;
			}
			b'n' => Token::Variable,
			b'%' => Token::Percent,
			b'(' => Token::OpenParen,
			b')' => Token::CloseParen,
			b'?' => Token::Question,
			b':' => Token::Colon,
			b'=' if bytes.get(i + 1) == Some(&b'=') => Token::Equal,
			b'!' if bytes.get(i + 1) == Some(&b'=') => Token::NotEqual,
			b'!' => Token::Not,
			b'<' if bytes.get(i + 1) == Some(&b'=') => Token::LessOrEqual,
			b'<' => Token::Less,
			b'>' if bytes.get(i + 1) == Some(&b'=') => Token::GreaterOrEqual,
			b'>' => Token::Greater,
			b'&' if bytes.get(i + 1) == Some(&b'&') => Token::And,
			b'|' if bytes.get(i + 1) == Some(&b'|') => Token::Or,
			_ => {
				let found = source[start..].chars().next().unwrap_or('?');
				return Err(TranslationError::MalformedExpression {
					position: start,
					message: format!("unexpected character `{found}`"),
				});
			}
		};
		i += match token {
			Token::Equal
			| Token::NotEqual
			| Token::LessOrEqual
			| Token::GreaterOrEqual
			| Token::And
			| Token::Or => 2,
			_ => 1,
		};
		tokens.push((start, token));
	}

	Ok(tokens)
}

/// Recursive-descent parser over the token stream
///
/// Precedence, tightest first: `!`, `%`, comparisons, `&&`, `||`, `?:`.
/// Everything is left-associative except the conditional, which nests to
/// the right so `a ? b : c ? d : e` reads as `a ? b : (c ? d : e)`.
struct Parser<'a> {
	tokens: &'a [(usize, Token)],
	pos: usize,
	end: usize,
}

impl<'a> Parser<'a> {
	fn new(tokens: &'a [(usize, Token)], end: usize) -> Self {
		Self { tokens, pos: 0, end }
	}

	fn peek(&self) -> Option<Token> {
		self.tokens.get(self.pos).map(|&(_, token)| token)
	}

	fn eat(&mut self, token: Token) -> bool {
		if self.peek() == Some(token) {
			self.pos += 1;
			true
		} else {
			false
		}
	}

	fn position(&self) -> usize {
		self.tokens.get(self.pos).map_or(self.end, |&(position, _)| position)
	}

	fn error(&self, message: impl Into<String>) -> TranslationError {
		TranslationError::MalformedExpression {
			position: self.position(),
			message: message.into(),
		}
	}

	fn ternary(&mut self) -> Result<Expr> {
		let condition = self.or()?;
		if !self.eat(Token::Question) {
			return Ok(condition);
		}
		let if_true = self.ternary()?;
		if !self.eat(Token::Colon) {
			return Err(self.error("expected `:` after the true branch of `?:`"));
		}
		let if_false = self.ternary()?;
		Ok(Expr::Ternary {
			condition: Box::new(condition),
			if_true: Box::new(if_true),
			if_false: Box::new(if_false),
		})
	}

	fn or(&mut self) -> Result<Expr> {
		let mut expr = self.and()?;
		while self.eat(Token::Or) {
			let rhs = self.and()?;
			expr = Expr::Binary {
				op: BinaryOp::Or,
				lhs: Box::new(expr),
				rhs: Box::new(rhs),
			};
		}
		Ok(expr)
	}

	fn and(&mut self) -> Result<Expr> {
		let mut expr = self.relational()?;
		while self.eat(Token::And) {
			let rhs = self.relational()?;
			expr = Expr::Binary {
				op: BinaryOp::And,
				lhs: Box::new(expr),
				rhs: Box::new(rhs),
			};
		}
		Ok(expr)
	}

	fn relational(&mut self) -> Result<Expr> {
		let mut expr = self.modulo()?;
		while let Some(op) = self.peek().and_then(comparison_op) {
			self.pos += 1;
			let rhs = self.modulo()?;
			expr = Expr::Binary {
				op,
				lhs: Box::new(expr),
				rhs: Box::new(rhs),
			};
		}
		Ok(expr)
	}

	fn modulo(&mut self) -> Result<Expr> {
		let mut expr = self.unary()?;
		while self.eat(Token::Percent) {
			let rhs = self.unary()?;
			expr = Expr::Binary {
				op: BinaryOp::Modulo,
				lhs: Box::new(expr),
				rhs: Box::new(rhs),
			};
		}
		Ok(expr)
	}

	fn unary(&mut self) -> Result<Expr> {
		if self.eat(Token::Not) {
			Ok(Expr::UnaryNot(Box::new(self.unary()?)))
		} else {
			self.primary()
		}
	}

	fn primary(&mut self) -> Result<Expr> {
		match self.tokens.get(self.pos) {
			Some(&(_, Token::Number(value))) => {
				self.pos += 1;
				Ok(Expr::Literal(value))
			}
			Some(&(_, Token::Variable)) => {
				self.pos += 1;
				Ok(Expr::Variable)
			}
			Some(&(_, Token::OpenParen)) => {
				self.pos += 1;
				let inner = self.ternary()?;
				if !self.eat(Token::CloseParen) {
					return Err(self.error("expected `)`"));
				}
				Ok(inner)
			}
			Some(&(position, token)) => Err(TranslationError::MalformedExpression {
				position,
				message: format!("unexpected {}", token.describe()),
			}),
			None => Err(TranslationError::MalformedExpression {
				position: self.end,
				message: "unexpected end of expression".to_string(),
			}),
		}
	}
}

fn comparison_op(token: Token) -> Option<BinaryOp> {
	match token {
		Token::Equal => Some(BinaryOp::Equal),
		Token::NotEqual => Some(BinaryOp::NotEqual),
		Token::Less => Some(BinaryOp::Less),
		Token::Greater => Some(BinaryOp::Greater),
		Token::LessOrEqual => Some(BinaryOp::LessOrEqual),
		Token::GreaterOrEqual => Some(BinaryOp::GreaterOrEqual),
		_ => None,
	}
}

/// Drop the `plural=` prefix and trailing `;` that catalog headers carry
fn strip_envelope(source: &str) -> &str {
	let source = source.trim();
	let source = source.strip_suffix(';').unwrap_or(source).trim_end();
	if let Some(rest) = source.strip_prefix("plural") {
		let rest = rest.trim_start();
		if let Some(expression) = rest.strip_prefix('=') {
			return expression.trim_start();
		}
	}
	source
}

/// A compiled plural-rule selector expression
///
/// # Example
/// ```
/// use gettext_translator::PluralExpression;
///
/// let expression = PluralExpression::parse("plural=(n != 1);").unwrap();
/// assert_eq!(expression.evaluate(1), 0);
/// assert_eq!(expression.evaluate(4), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PluralExpression {
	root: Expr,
}

impl PluralExpression {
	/// Compile a plural-rule expression
	///
	/// Accepts either the bare expression or the `plural=<expr>;` form that
	/// catalog headers use. Fails with
	/// [`TranslationError::MalformedExpression`] on empty input, an
	/// unexpected token, unbalanced parentheses, or trailing text.
	pub fn parse(source: &str) -> Result<Self> {
		let expression = strip_envelope(source);
		let tokens = tokenize(expression)?;
		if tokens.is_empty() {
			return Err(TranslationError::MalformedExpression {
				position: 0,
				message: "empty expression".to_string(),
			});
		}

		let mut parser = Parser::new(&tokens, expression.len());
		let root = parser.ternary()?;
		if let Some(token) = parser.peek() {
			return Err(parser.error(format!("unexpected {} after expression", token.describe())));
		}
		Ok(Self { root })
	}

	/// Evaluate the expression for a count
	///
	/// Boolean subexpressions coerce to 0/1 as in C. The result is the raw
	/// category value and may be negative or exceed the declared category
	/// count; clamping is up to the caller.
	pub fn evaluate(&self, n: i64) -> i64 {
		self.root.evaluate(n)
	}
}
