//! # Introduction
//!
//! Front end for the Hawk teaching language: lexical analysis, LL(1)
//! predictive recognition, and declaration checking over a single flat
//! namespace.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → token stream → Parser → rule trace + declaration checks
//! ```
//!
//! 1. [`scanner`] — pull-based lexical analysis; the parser requests one
//!    token at a time and nothing is scanned ahead of demand.
//! 2. [`parser`] — recursive descent over the token stream, registering
//!    declarations in a flat table and validating every identifier use.
//!
//! There is no AST and no evaluation. A successful run proves the input
//! is well-formed and prints one line per grammar rule entered; the
//! rule trace is the program's only output. The first lexical, syntax,
//! or semantic error aborts the whole compilation; nothing is recovered
//! or accumulated.

pub mod parser;
pub mod scanner;
