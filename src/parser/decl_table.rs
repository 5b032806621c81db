//! Flat declaration table for one compilation unit.
//!
//! The table maps each declared identifier to its type and the line of
//! its declaration. There is exactly one unscoped namespace per program:
//! no nesting, no shadowing, no redeclaration. A table is created fresh
//! for each parse, owned by the parser, and discarded with it; it is
//! never shared across compilations.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::parser::parser::ParseError;

/// Reserved words of the language.
///
/// The scanner consults this list after its keyword table as a guard
/// against the two drifting apart: a word that is reserved here but not
/// classified there is a lexical error, not an identifier.
const RESERVED_WORDS: [&str; 14] = [
    "program", "begin", "end", "if", "then", "else", "input", "output", "while", "loop", "int",
    "float", "double", "call",
];

/// Whether `word` is reserved and may never be used as an identifier.
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// Primitive types a variable can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Int,
    Float,
    Double,
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VarType::Int => "int",
            VarType::Float => "float",
            VarType::Double => "double",
        };
        f.write_str(name)
    }
}

/// What the table records about one declared identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DeclEntry {
    ty: VarType,
    line: usize,
}

/// Flat mapping from identifier name to its declaration.
#[derive(Debug, Default)]
pub struct DeclTable {
    entries: FxHashMap<String, DeclEntry>,
}

impl DeclTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration. Refuses to overwrite: a name already present
    /// fails with a redeclaration error at `line`.
    pub fn register(&mut self, name: &str, ty: VarType, line: usize) -> Result<(), ParseError> {
        if self.entries.contains_key(name) {
            return Err(ParseError::Redeclared {
                name: name.to_string(),
                line,
            });
        }
        self.entries.insert(name.to_string(), DeclEntry { ty, line });
        Ok(())
    }

    /// Pure membership query.
    pub fn is_declared(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Membership check that fails with the line of use.
    pub fn check_declared(&self, name: &str, line: usize) -> Result<(), ParseError> {
        if self.is_declared(name) {
            Ok(())
        } else {
            Err(ParseError::Undeclared {
                name: name.to_string(),
                line,
            })
        }
    }

    /// Declared type of `name`, if it has been declared.
    pub fn lookup_type(&self, name: &str) -> Option<VarType> {
        self.entries.get(name).map(|entry| entry.ty)
    }

    /// Line on which `name` was declared, if it has been declared.
    pub fn declaration_line(&self, name: &str) -> Option<usize> {
        self.entries.get(name).map(|entry| entry.line)
    }

    /// Number of declared identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
