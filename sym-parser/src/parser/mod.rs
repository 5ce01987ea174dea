pub mod ast;
pub mod error;
pub mod fmt;
pub mod token;

use error::{Error, kind};
use sym_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for expressions. This is the type to use to parse an arbitrary piece of
/// source into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Set the cursor of this parser to the cursor of another parser. Used after speculatively
    /// parsing with a clone of this parser.
    pub fn set_cursor(&mut self, other: &Parser) {
        self.cursor = other.cursor;
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Advances the cursor past any whitespace tokens.
    pub fn advance_past_whitespace(&mut self) {
        while let Some(token) = self.current_token() {
            if token.is_whitespace() {
                self.cursor += 1;
            } else {
                break;
            }
        }
    }

    /// Returns the kind of the next non-whitespace token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens[self.cursor..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map(|token| token.kind)
    }

    /// Returns the kind of the token directly after the current token, without skipping
    /// whitespace. The cursor is not moved.
    pub fn peek_adjacent(&self) -> Option<TokenKind> {
        self.tokens.get(self.cursor + 1).map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.advance_past_whitespace();

        match self.current_token() {
            None => Ok(value),
            Some(token) if token.kind == TokenKind::CloseParen => {
                Err(self.error(kind::UnclosedParenthesis { opening: false }))
            },
            Some(token) if token.kind == TokenKind::Symbol => {
                Err(self.error(kind::InvalidCharacter { character: token.lexeme.to_owned() }))
            },
            Some(_) => {
                let start = self.span().start;
                Err(Error::new(vec![start..self.eof_span().end], kind::ExpectedEof))
            },
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary operation is left-associative: `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary operation is right-associative: `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors. Implicit
    /// multiplication also has this precedence.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        call::Call,
        expr::Expr,
        literal::{LitFloat, LitInt, LitSym, Literal},
        paren::Paren,
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn parse(source: &str) -> Expr {
        let mut parser = Parser::new(source);
        parser.try_parse_full::<Expr>().unwrap()
    }

    fn parse_err(source: &str) -> Error {
        let mut parser = Parser::new(source);
        parser.try_parse_full::<Expr>().unwrap_err()
    }

    fn int(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Int(LitInt { value: value.to_string(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn op(kind: BinOpKind, span: Range<usize>) -> BinOp {
        BinOp { kind, implicit: false, span }
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16"), int("16", 0..2));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse("3.14"), Expr::Literal(Literal::Float(LitFloat {
            value: "3.14".to_string(),
            span: 0..4,
        })));
    }

    #[test]
    fn binary_left_associativity() {
        assert_eq!(parse("1 - 2 - 3"), Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("1", 0..1)),
                op: op(BinOpKind::Sub, 2..3),
                rhs: Box::new(int("2", 4..5)),
                span: 0..5,
            })),
            op: op(BinOpKind::Sub, 6..7),
            rhs: Box::new(int("3", 8..9)),
            span: 0..9,
        }));
    }

    #[test]
    fn binary_precedence() {
        assert_eq!(parse("1 + 2 * 3"), Expr::Binary(Binary {
            lhs: Box::new(int("1", 0..1)),
            op: op(BinOpKind::Add, 2..3),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("2", 4..5)),
                op: op(BinOpKind::Mul, 6..7),
                rhs: Box::new(int("3", 8..9)),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn exp_right_associativity() {
        assert_eq!(parse("2^3^4"), Expr::Binary(Binary {
            lhs: Box::new(int("2", 0..1)),
            op: op(BinOpKind::Exp, 1..2),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("3", 2..3)),
                op: op(BinOpKind::Exp, 3..4),
                rhs: Box::new(int("4", 4..5)),
                span: 2..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn neg_binds_looser_than_exp() {
        assert_eq!(parse("-x^2"), Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", 1..2)),
                op: op(BinOpKind::Exp, 2..3),
                rhs: Box::new(int("2", 3..4)),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn negative_exponent() {
        assert_eq!(parse("x^-1"), Expr::Binary(Binary {
            lhs: Box::new(sym("x", 0..1)),
            op: op(BinOpKind::Exp, 1..2),
            rhs: Box::new(Expr::Unary(Unary {
                operand: Box::new(int("1", 3..4)),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 2..3 },
                span: 2..4,
            })),
            span: 0..4,
        }));
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(parse("2x"), Expr::Binary(Binary {
            lhs: Box::new(int("2", 0..1)),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: Box::new(sym("x", 1..2)),
            span: 0..2,
        }));
    }

    #[test]
    fn implicit_multiplication_precedence() {
        // 1 + (2 * (x^2))
        assert_eq!(parse("1 + 2x^2"), Expr::Binary(Binary {
            lhs: Box::new(int("1", 0..1)),
            op: op(BinOpKind::Add, 2..3),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("2", 4..5)),
                op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 5..5 },
                rhs: Box::new(Expr::Binary(Binary {
                    lhs: Box::new(sym("x", 5..6)),
                    op: op(BinOpKind::Exp, 6..7),
                    rhs: Box::new(int("2", 7..8)),
                    span: 5..8,
                })),
                span: 4..8,
            })),
            span: 0..8,
        }));
    }

    #[test]
    fn implicit_multiplication_paren() {
        assert_eq!(parse("3 (x)"), Expr::Binary(Binary {
            lhs: Box::new(int("3", 0..1)),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..2 },
            rhs: Box::new(Expr::Paren(Paren {
                expr: Box::new(sym("x", 3..4)),
                span: 2..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn subtraction_is_not_implicit() {
        let expr = parse("x -1");
        let Expr::Binary(binary) = expr else { panic!("expected binary expression") };
        assert_eq!(binary.op, op(BinOpKind::Sub, 2..3));
    }

    #[test]
    fn call_with_arguments() {
        assert_eq!(parse("log(2, x)"), Expr::Call(Call {
            name: LitSym { name: "log".to_string(), span: 0..3 },
            args: vec![int("2", 4..5), sym("x", 7..8)],
            span: 0..9,
            paren_span: 3..9,
        }));
    }

    #[test]
    fn call_without_arguments() {
        assert_eq!(parse("f()"), Expr::Call(Call {
            name: LitSym { name: "f".to_string(), span: 0..1 },
            args: vec![],
            span: 0..3,
            paren_span: 1..3,
        }));
    }

    #[test]
    fn surrounding_whitespace() {
        assert_eq!(parse("  x \n"), sym("x", 2..3));
    }

    #[test]
    fn error_unexpected_eof() {
        let err = parse_err("x +");
        assert_eq!(err.spans, vec![3..3]);
    }

    #[test]
    fn error_unclosed_paren() {
        let err = parse_err("(x + 1");
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn error_unopened_paren() {
        let err = parse_err("x + 1)");
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn error_empty_paren() {
        let err = parse_err("2 * ()");
        assert_eq!(err.spans, vec![4..6]);
    }

    #[test]
    fn error_invalid_character() {
        let err = parse_err("x $ 2");
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn error_empty_input() {
        let err = parse_err("   ");
        assert_eq!(err.spans, vec![3..3]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let expr = parse("-3x^2 + log(2, y) / (1 - 0.5)");
        let json = serde_json::to_string(&expr).unwrap();
        let deserialized: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, expr);
    }
}
