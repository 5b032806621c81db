//! Expression, operand, call, and comparison productions.
//!
//! # Grammar
//!
//! ```text
//! Expr        ::= Factor (("+" | "-") Expr)?
//! Factor      ::= Operand (("*" | "/") Factor)?
//! Operand     ::= (Id | Num) FunCallTail? | "(" Expr ")" | FunCall
//! FunCallTail ::= "(" IdList ")" ";"
//! FunCall     ::= "call" Id "(" IdList ")" ";"
//! Comp        ::= "(" Operand CompOp Operand ")"
//! CompOp      ::= "=" | "<>" | ">" | "<"
//! ```
//!
//! `Expr` and `Factor` recurse into their own remainder instead of
//! looping, which makes both operators right-associative: `a - b - c`
//! groups as `a - (b - c)`. That shape is part of the language and must
//! not be flattened into iteration.

use std::io::Write;

use crate::parser::parser::{ParseError, Parser};
use crate::scanner::token::TokenKind;

impl<W: Write> Parser<W> {
    /// `Factor (("+" | "-") Expr)?`, right-recursive.
    pub(crate) fn parse_expr(&mut self) -> Result<(), ParseError> {
        self.enter_rule("EXPR");

        self.parse_factor()?;

        if self.check(TokenKind::Plus) {
            self.match_kind(TokenKind::Plus)?;
            self.parse_expr()?;
        } else if self.check(TokenKind::Minus) {
            self.match_kind(TokenKind::Minus)?;
            self.parse_expr()?;
        }
        Ok(())
    }

    /// `Operand (("*" | "/") Factor)?`, right-recursive.
    fn parse_factor(&mut self) -> Result<(), ParseError> {
        self.enter_rule("FACTOR");

        self.parse_operand()?;

        if self.check(TokenKind::Mult) {
            self.match_kind(TokenKind::Mult)?;
            self.parse_factor()?;
        } else if self.check(TokenKind::Div) {
            self.match_kind(TokenKind::Div)?;
            self.parse_factor()?;
        }
        Ok(())
    }

    /// A declared identifier, a number, a parenthesized expression, or a
    /// function call. An identifier or number directly followed by `(`
    /// is taken as the start of a call argument list.
    pub(crate) fn parse_operand(&mut self) -> Result<(), ParseError> {
        self.enter_rule("OPERAND");

        match self.current.kind {
            TokenKind::Id | TokenKind::Num => {
                if self.check(TokenKind::Id) {
                    self.decl_table
                        .check_declared(&self.current.lexeme, self.current.line)?;
                }
                let kind = self.current.kind;
                self.match_kind(kind)?;

                if self.check(TokenKind::LParen) {
                    self.parse_fun_call_tail()?;
                }
                Ok(())
            }
            TokenKind::LParen => {
                self.match_kind(TokenKind::LParen)?;
                self.parse_expr()?;
                self.match_kind(TokenKind::RParen)?;
                Ok(())
            }
            TokenKind::Call => self.parse_fun_call(),
            _ => Err(ParseError::ExpectedOperand {
                found: self.current.lexeme.clone(),
                line: self.current.line,
            }),
        }
    }

    /// `"call" Id "(" IdList ")" ";"`. The callee name is taken on
    /// trust; only the argument list is checked against the declaration
    /// table.
    fn parse_fun_call(&mut self) -> Result<(), ParseError> {
        self.enter_rule("FUNCALL");

        self.match_kind(TokenKind::Call)?;
        if !self.check(TokenKind::Id) {
            return Err(ParseError::ExpectedIdentifier {
                found: self.current.lexeme.clone(),
                line: self.current.line,
            });
        }
        self.match_kind(TokenKind::Id)?;
        self.parse_fun_call_arguments()
    }

    /// Argument-list tail of a call, entered directly when an operand is
    /// followed by `(` (implicit call form, no `call` keyword, no name).
    fn parse_fun_call_tail(&mut self) -> Result<(), ParseError> {
        self.enter_rule("FUNCALL");
        self.parse_fun_call_arguments()
    }

    /// `"(" IdList ")" ";"`. The call form consumes its own terminating
    /// semicolon.
    fn parse_fun_call_arguments(&mut self) -> Result<(), ParseError> {
        self.match_kind(TokenKind::LParen)?;
        let identifiers = self.parse_id_list()?;
        for (name, line) in &identifiers {
            self.decl_table.check_declared(name, *line)?;
        }
        self.match_kind(TokenKind::RParen)?;
        self.match_kind(TokenKind::Semicolon)?;
        Ok(())
    }

    /// `"(" Operand CompOp Operand ")"`.
    pub(crate) fn parse_comp(&mut self) -> Result<(), ParseError> {
        self.enter_rule("COMP");

        self.match_kind(TokenKind::LParen)?;
        self.parse_operand()?;

        match self.current.kind {
            TokenKind::Equals => self.match_kind(TokenKind::Equals)?,
            TokenKind::NotEquals => self.match_kind(TokenKind::NotEquals)?,
            TokenKind::GreaterThan => self.match_kind(TokenKind::GreaterThan)?,
            TokenKind::LessThan => self.match_kind(TokenKind::LessThan)?,
            _ => {
                return Err(ParseError::ExpectedComparison {
                    found: self.current.lexeme.clone(),
                    line: self.current.line,
                });
            }
        }

        self.parse_operand()?;
        self.match_kind(TokenKind::RParen)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parser::{ParseError, Parser};
    use crate::scanner::scanner::Scanner;
    use crate::scanner::token::TokenKind;

    fn parse(source: &str) -> Result<(), ParseError> {
        let mut parser = Parser::new(Scanner::new(source), Vec::<u8>::new()).expect("first token");
        parser.parse_program()
    }

    #[test]
    fn chained_subtraction_parses_right_associatively() {
        let source = "program\nx, y, z: int;\nbegin\nx := x - y - z;\nend;";
        assert_eq!(parse(source), Ok(()));
    }

    #[test]
    fn mixed_precedence_expression_parses() {
        let source = "program\nx, y: int;\nbegin\nx := x + y * 2 - 1;\nend;";
        assert_eq!(parse(source), Ok(()));
    }

    #[test]
    fn parenthesized_expression_parses() {
        let source = "program\nx, y: int;\nbegin\nx := (x + y) * 2;\nend;";
        assert_eq!(parse(source), Ok(()));
    }

    #[test]
    fn numeric_operands_need_no_declaration() {
        let source = "program\nx: int;\nbegin\nx := 1 + 2;\nend;";
        assert_eq!(parse(source), Ok(()));
    }

    #[test]
    fn identifier_operand_must_be_declared() {
        let source = "program\nx: int;\nbegin\nx := x + q;\nend;";
        assert_eq!(
            parse(source),
            Err(ParseError::Undeclared {
                name: "q".to_string(),
                line: 4
            })
        );
    }

    #[test]
    fn operand_position_rejects_stray_tokens() {
        let source = "program\nx: int;\nbegin\nx := ;\nend;";
        assert_eq!(
            parse(source),
            Err(ParseError::ExpectedOperand {
                found: ";".to_string(),
                line: 4
            })
        );
    }

    #[test]
    fn explicit_call_form_parses() {
        // The call form consumes its own terminating semicolon, then the
        // assignment still requires its own.
        let source = "program\nx: int;\nbegin\nx := call f(x);;\nend;";
        assert_eq!(parse(source), Ok(()));
    }

    #[test]
    fn implicit_call_form_parses_after_an_operand() {
        let source = "program\nx, f: int;\nbegin\nx := f(x);;\nend;";
        assert_eq!(parse(source), Ok(()));
    }

    #[test]
    fn call_arguments_must_be_declared() {
        let source = "program\nx: int;\nbegin\nx := call f(q);;\nend;";
        assert_eq!(
            parse(source),
            Err(ParseError::Undeclared {
                name: "q".to_string(),
                line: 4
            })
        );
    }

    #[test]
    fn call_requires_a_callee_name() {
        let source = "program\nx: int;\nbegin\nx := call (x);;\nend;";
        assert_eq!(
            parse(source),
            Err(ParseError::ExpectedIdentifier {
                found: "(".to_string(),
                line: 4
            })
        );
    }

    #[test]
    fn comparison_accepts_each_operator() {
        for op in ["=", ">", "<"] {
            let source = format!("program\nx: int;\nbegin\nif (x {} 0) then\nx := 0;\nend if;\nend;", op);
            assert_eq!(parse(&source), Ok(()), "operator {:?}", op);
        }
    }

    #[test]
    fn comparison_rejects_a_missing_operator() {
        let source = "program\nx: int;\nbegin\nif (x 0) then\nx := 0;\nend if;\nend;";
        assert_eq!(
            parse(source),
            Err(ParseError::ExpectedComparison {
                found: "0".to_string(),
                line: 4
            })
        );
    }

    #[test]
    fn comparison_must_close_its_parenthesis() {
        let source = "program\nx: int;\nbegin\nif (x > 0 then\nx := 0;\nend if;\nend;";
        assert_eq!(
            parse(source),
            Err(ParseError::UnexpectedToken {
                expected: TokenKind::RParen,
                found: "then".to_string(),
                line: 4
            })
        );
    }
}
