//! Program, declaration, and statement productions.
//!
//! # Grammar
//!
//! ```text
//! Program  ::= "program" DeclSec? "begin" StmtSec "end" ";"
//! DeclSec  ::= Decl+                        (while lookahead is Id)
//! Decl     ::= IdList ":" Type ";"
//! IdList   ::= Id ("," Id)*
//! Type     ::= "int" | "float" | "double"
//! StmtSec  ::= Stmt+                        (until lookahead is "end" or "else")
//! Stmt     ::= Assign | IfStmt | WhileStmt | Input | Output
//! Assign   ::= Id ":=" Expr ";"
//! IfStmt   ::= "if" Comp "then" StmtSec ("else" StmtSec)? "end" "if" ";"
//! WhileStmt::= "while" Comp "loop" StmtSec "end" "loop" ";"
//! Input    ::= "input" IdList ";"
//! Output   ::= "output" (IdList | Num) ";"
//! ```
//!
//! The list-shaped productions (`DeclSec`, `StmtSec`, `IdList`) are
//! parsed with explicit loops so list length never adds recursion depth.
//! Each iteration still records its own rule-trace entry, one per list
//! element.

use std::io::Write;

use crate::parser::decl_table::VarType;
use crate::parser::parser::{ParseError, Parser};
use crate::scanner::token::TokenKind;

impl<W: Write> Parser<W> {
    /// Recognize a whole program. This is the parser's sole entry point.
    pub fn parse_program(&mut self) -> Result<(), ParseError> {
        self.enter_rule("PROGRAM");

        if !self.check(TokenKind::Program) {
            return Err(ParseError::MissingProgram {
                line: self.current.line,
            });
        }
        self.match_kind(TokenKind::Program)?;

        // The declaration section is optional; its presence is signalled
        // by anything other than `begin` in the lookahead.
        if !self.check(TokenKind::Begin) {
            self.parse_decl_sec()?;
        }

        self.match_kind(TokenKind::Begin)?;
        self.parse_stmt_sec()?;
        self.match_kind(TokenKind::End)?;
        self.match_kind(TokenKind::Semicolon)?;
        Ok(())
    }

    /// One or more declarations; continues while the lookahead is an
    /// identifier.
    fn parse_decl_sec(&mut self) -> Result<(), ParseError> {
        loop {
            self.enter_rule("DECL_SEC");
            self.parse_decl()?;
            if !self.check(TokenKind::Id) {
                return Ok(());
            }
        }
    }

    /// `IdList ":" Type ";"`. Registers every identifier the list
    /// collected, each under the line it appeared on.
    fn parse_decl(&mut self) -> Result<(), ParseError> {
        self.enter_rule("DECL");

        let identifiers = self.parse_id_list()?;
        self.match_kind(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        self.match_kind(TokenKind::Semicolon)?;

        for (name, line) in identifiers {
            self.decl_table.register(&name, ty, line)?;
        }
        Ok(())
    }

    /// Comma-separated identifiers. Returns each name with the line it
    /// appeared on, in source order.
    pub(crate) fn parse_id_list(&mut self) -> Result<Vec<(String, usize)>, ParseError> {
        let mut identifiers = Vec::new();
        loop {
            self.enter_rule("ID_LIST");
            if !self.check(TokenKind::Id) {
                return Err(ParseError::ExpectedIdentifier {
                    found: self.current.lexeme.clone(),
                    line: self.current.line,
                });
            }
            identifiers.push((self.current.lexeme.clone(), self.current.line));
            self.match_kind(TokenKind::Id)?;

            if self.check(TokenKind::Comma) {
                self.match_kind(TokenKind::Comma)?;
            } else {
                return Ok(identifiers);
            }
        }
    }

    /// `"int" | "float" | "double"`.
    fn parse_type(&mut self) -> Result<VarType, ParseError> {
        self.enter_rule("TYPE");
        let ty = match self.current.kind {
            TokenKind::Int => {
                self.match_kind(TokenKind::Int)?;
                VarType::Int
            }
            TokenKind::Float => {
                self.match_kind(TokenKind::Float)?;
                VarType::Float
            }
            TokenKind::Double => {
                self.match_kind(TokenKind::Double)?;
                VarType::Double
            }
            _ => {
                return Err(ParseError::ExpectedType {
                    found: self.current.lexeme.clone(),
                    line: self.current.line,
                });
            }
        };
        Ok(ty)
    }

    /// One or more statements; stops once the lookahead is `end` or
    /// `else` (both close an enclosing construct).
    pub(crate) fn parse_stmt_sec(&mut self) -> Result<(), ParseError> {
        loop {
            self.enter_rule("STMT_SEC");
            self.parse_stmt()?;
            if self.check(TokenKind::End) || self.check(TokenKind::Else) {
                return Ok(());
            }
        }
    }

    /// Dispatch on the lookahead kind to one of the statement forms.
    fn parse_stmt(&mut self) -> Result<(), ParseError> {
        self.enter_rule("STMT");
        match self.current.kind {
            TokenKind::Id => self.parse_assign(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Input => self.parse_input(),
            TokenKind::Output => self.parse_output(),
            _ => Err(ParseError::ExpectedStatement {
                found: self.current.lexeme.clone(),
                line: self.current.line,
            }),
        }
    }

    /// `Id ":=" Expr ";"`. The target must already be declared.
    fn parse_assign(&mut self) -> Result<(), ParseError> {
        self.enter_rule("ASSIGN");

        if !self.check(TokenKind::Id) {
            return Err(ParseError::ExpectedIdentifier {
                found: self.current.lexeme.clone(),
                line: self.current.line,
            });
        }
        self.decl_table
            .check_declared(&self.current.lexeme, self.current.line)?;

        self.match_kind(TokenKind::Id)?;
        self.match_kind(TokenKind::Assign)?;
        self.parse_expr()?;
        self.match_kind(TokenKind::Semicolon)?;
        Ok(())
    }

    /// `"if" Comp "then" StmtSec ("else" StmtSec)? "end" "if" ";"`.
    fn parse_if_stmt(&mut self) -> Result<(), ParseError> {
        self.enter_rule("IFSTMT");

        self.match_kind(TokenKind::If)?;
        self.parse_comp()?;
        self.match_kind(TokenKind::Then)?;
        self.parse_stmt_sec()?;

        if self.check(TokenKind::Else) {
            self.match_kind(TokenKind::Else)?;
            self.parse_stmt_sec()?;
        }

        self.match_kind(TokenKind::End)?;
        self.match_kind(TokenKind::If)?;
        self.match_kind(TokenKind::Semicolon)?;
        Ok(())
    }

    /// `"while" Comp "loop" StmtSec "end" "loop" ";"`.
    fn parse_while_stmt(&mut self) -> Result<(), ParseError> {
        self.enter_rule("WHILESTMT");

        self.match_kind(TokenKind::While)?;
        self.parse_comp()?;
        self.match_kind(TokenKind::Loop)?;
        self.parse_stmt_sec()?;
        self.match_kind(TokenKind::End)?;
        self.match_kind(TokenKind::Loop)?;
        self.match_kind(TokenKind::Semicolon)?;
        Ok(())
    }

    /// `"input" IdList ";"`. Every named variable must be declared.
    fn parse_input(&mut self) -> Result<(), ParseError> {
        self.enter_rule("INPUT");

        self.match_kind(TokenKind::Input)?;
        let identifiers = self.parse_id_list()?;
        for (name, line) in &identifiers {
            self.decl_table.check_declared(name, *line)?;
        }
        self.match_kind(TokenKind::Semicolon)?;
        Ok(())
    }

    /// `"output" (IdList | Num) ";"`. Named variables must be declared,
    /// a bare number is written as-is.
    fn parse_output(&mut self) -> Result<(), ParseError> {
        self.enter_rule("OUTPUT");

        self.match_kind(TokenKind::Output)?;
        if self.check(TokenKind::Id) {
            let identifiers = self.parse_id_list()?;
            for (name, line) in &identifiers {
                self.decl_table.check_declared(name, *line)?;
            }
        } else if self.check(TokenKind::Num) {
            self.match_kind(TokenKind::Num)?;
        } else {
            return Err(ParseError::ExpectedIdOrNum {
                found: self.current.lexeme.clone(),
                line: self.current.line,
            });
        }
        self.match_kind(TokenKind::Semicolon)?;
        Ok(())
    }
}
