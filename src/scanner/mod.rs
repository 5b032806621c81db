//! Lexical analysis
//!
//! This module turns Hawk source text into a stream of tokens:
//! - [`token`]: the token model (kind, lexeme, line, column)
//! - [`scanner`]: the pull-based character-to-token scanner
//!
//! The scanner produces tokens strictly on demand; the parser is the only
//! driver and holds at most one token of lookahead.

pub mod scanner;
pub mod token;
