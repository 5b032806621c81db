//! Parser coordination
//!
//! This module provides the [`Parser`] struct, its error type, and the
//! match/advance primitives shared by the production modules.
//!
//! # Parser Architecture
//!
//! The recognizer is LL(1) predictive recursive descent: it holds a
//! single lookahead token, pulled on demand from the scanner, and picks
//! every production from that token alone, with no backtracking.
//! Productions are implemented as methods on [`Parser`] split across
//! modules:
//! - This module: Parser struct, error type, and shared primitives
//! - `statements`: program, declaration, and statement productions
//! - `expressions`: expression, operand, call, and comparison productions
//!
//! Each production records one rule-trace label on entry; the trace is
//! the program's observable output on success. The first error anywhere
//! unwinds through every enclosing production and aborts the parse.

use std::fmt;
use std::io::Write;

use crate::parser::decl_table::DeclTable;
use crate::scanner::scanner::{LexicalError, Scanner};
use crate::scanner::token::{Token, TokenKind};

/// Errors raised while recognizing a program.
///
/// Syntax and semantic failures share one type because they share one
/// fate: the first of either aborts the compilation. Every variant
/// carries the 1-based line it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `match` found something other than the expected token kind.
    UnexpectedToken {
        expected: TokenKind,
        found: String,
        line: usize,
    },

    /// The source does not open with the `program` keyword.
    MissingProgram { line: usize },

    ExpectedIdentifier { found: String, line: usize },

    ExpectedType { found: String, line: usize },

    ExpectedStatement { found: String, line: usize },

    ExpectedComparison { found: String, line: usize },

    ExpectedOperand { found: String, line: usize },

    /// An output statement argument that is neither a name nor a number.
    ExpectedIdOrNum { found: String, line: usize },

    /// A name declared twice in the flat namespace.
    Redeclared { name: String, line: usize },

    /// A name used without a prior declaration.
    Undeclared { name: String, line: usize },

    /// A scanner failure surfaced through the parser.
    Lexical(LexicalError),
}

impl ParseError {
    /// 1-based source line the error points at.
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::MissingProgram { line }
            | ParseError::ExpectedIdentifier { line, .. }
            | ParseError::ExpectedType { line, .. }
            | ParseError::ExpectedStatement { line, .. }
            | ParseError::ExpectedComparison { line, .. }
            | ParseError::ExpectedOperand { line, .. }
            | ParseError::ExpectedIdOrNum { line, .. }
            | ParseError::Redeclared { line, .. }
            | ParseError::Undeclared { line, .. } => *line,
            ParseError::Lexical(e) => e.line(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                expected,
                found,
                line,
            } => write!(
                f,
                "Error at line {} : Expected {} but found '{}'",
                line, expected, found
            ),
            ParseError::MissingProgram { line } => write!(
                f,
                "Error at line {} : Program must start with 'program' keyword",
                line
            ),
            ParseError::ExpectedIdentifier { found, line } => write!(
                f,
                "Error at line {} : Expected identifier but found '{}'",
                line, found
            ),
            ParseError::ExpectedType { found, line } => write!(
                f,
                "Error at line {} : Expected type (int, float, double) but found '{}'",
                line, found
            ),
            ParseError::ExpectedStatement { found, line } => write!(
                f,
                "Error at line {} : Expected statement but found '{}'",
                line, found
            ),
            ParseError::ExpectedComparison { found, line } => write!(
                f,
                "Error at line {} : Expected comparison operator but found '{}'",
                line, found
            ),
            ParseError::ExpectedOperand { found, line } => write!(
                f,
                "Error at line {} : Expected number, identifier, '(', or function call but found '{}'",
                line, found
            ),
            ParseError::ExpectedIdOrNum { found, line } => write!(
                f,
                "Error at line {} : Expected identifier or number but found '{}'",
                line, found
            ),
            ParseError::Redeclared { name, line } => write!(
                f,
                "Error at line {} : Redeclaration of variable '{}'",
                line, name
            ),
            ParseError::Undeclared { name, line } => write!(
                f,
                "Error at line {} : Undeclared variable '{}'",
                line, name
            ),
            ParseError::Lexical(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lexical(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexicalError> for ParseError {
    fn from(err: LexicalError) -> Self {
        ParseError::Lexical(err)
    }
}

/// LL(1) predictive recursive-descent recognizer.
///
/// The parser owns the scanner it pulls tokens from, the declaration
/// table for the compilation, and the rule-trace sink `W`. The binary
/// hands it a locked stdout; tests hand it an in-memory buffer and read
/// the recorded labels back. One parser instance recognizes one program
/// and is not reused.
#[derive(Debug)]
pub struct Parser<W: Write> {
    pub(crate) scanner: Scanner,
    pub(crate) current: Token,
    pub(crate) decl_table: DeclTable,
    trace: W,
}

impl<W: Write> Parser<W> {
    /// Build a parser over `scanner`, pulling the first lookahead token.
    pub fn new(mut scanner: Scanner, trace: W) -> Result<Self, ParseError> {
        let current = scanner.next_token()?;
        Ok(Self {
            scanner,
            current,
            decl_table: DeclTable::new(),
            trace,
        })
    }

    /// Declarations gathered during the parse.
    pub fn decl_table(&self) -> &DeclTable {
        &self.decl_table
    }

    /// Consume the parser and return the trace sink.
    pub fn into_trace(self) -> W {
        self.trace
    }

    // ===== Primitives shared by the production modules =====

    /// Record one rule-trace label.
    pub(crate) fn enter_rule(&mut self, label: &str) {
        let _ = writeln!(self.trace, "{}", label);
    }

    /// Whether the lookahead token has the given kind.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Advance past the lookahead if it has the expected kind, otherwise
    /// fail naming the expected kind and the offending lexeme.
    pub(crate) fn match_kind(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        if self.current.kind == expected {
            self.current = self.scanner.next_token()?;
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected,
                found: self.current.lexeme.clone(),
                line: self.current.line,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser_over(source: &str) -> Parser<Vec<u8>> {
        Parser::new(Scanner::new(source), Vec::new()).expect("first token")
    }

    #[test]
    fn new_pulls_the_first_token() {
        let parser = parser_over("program");
        assert!(parser.check(TokenKind::Program));
    }

    #[test]
    fn match_kind_advances_on_success() {
        let mut parser = parser_over("begin end");
        parser.match_kind(TokenKind::Begin).unwrap();
        assert!(parser.check(TokenKind::End));
        parser.match_kind(TokenKind::End).unwrap();
        assert!(parser.check(TokenKind::Eof));
    }

    #[test]
    fn match_kind_names_expected_and_found() {
        let mut parser = parser_over("begni");
        let err = parser.match_kind(TokenKind::Begin).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: TokenKind::Begin,
                found: "begni".to_string(),
                line: 1,
            }
        );
        assert_eq!(
            err.to_string(),
            "Error at line 1 : Expected BEGIN but found 'begni'"
        );
    }

    #[test]
    fn new_surfaces_a_lexical_error_on_the_first_token() {
        let err = Parser::new(Scanner::new("@"), Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, ParseError::Lexical(_)));
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn error_display_formats() {
        let err = ParseError::Undeclared {
            name: "z".to_string(),
            line: 6,
        };
        assert_eq!(err.to_string(), "Error at line 6 : Undeclared variable 'z'");

        let err = ParseError::Redeclared {
            name: "x".to_string(),
            line: 3,
        };
        assert_eq!(
            err.to_string(),
            "Error at line 3 : Redeclaration of variable 'x'"
        );

        let err = ParseError::MissingProgram { line: 1 };
        assert_eq!(
            err.to_string(),
            "Error at line 1 : Program must start with 'program' keyword"
        );
    }
}
