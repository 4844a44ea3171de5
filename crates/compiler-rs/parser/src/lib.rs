//! Pascal-- Parser
//!
//! This crate implements a recursive descent parser for Pascal--.
//! It pulls tokens from any [`TokenStream`] one at a time, holding exactly
//! one token of lookahead, and builds an AST without backtracking. The first
//! error aborts the parse; no partial tree is returned.

mod core;
mod declarations;
mod expressions;
mod statements;
mod types;

use std::str::Chars;

use ast::Node;
use errors::{Diagnostic, LexerError, ParserError, ParserResult};
use lexer::{Scanner, TokenStream};
use tokens::{Keyword, Separator, Token};

/// Parser for Pascal-- programs
pub struct Parser<T: TokenStream> {
    tokens: T,
    /// Lookahead slot: the next unconsumed token
    current: Token,
    filename: Option<String>,
}

impl<'a> Parser<Scanner<Chars<'a>>> {
    /// Create a new parser from source code
    pub fn new(source: &'a str) -> ParserResult<Self> {
        Self::new_with_file(source, None)
    }

    /// Create a new parser from source code with filename
    pub fn new_with_file(source: &'a str, filename: Option<String>) -> ParserResult<Self> {
        Self::from_tokens(Scanner::new(source), filename)
    }
}

impl<T: TokenStream> Parser<T> {
    /// Create a parser over an existing token stream, priming the lookahead slot
    pub fn from_tokens(mut tokens: T, filename: Option<String>) -> ParserResult<Self> {
        let current = tokens.next_token()?;
        Ok(Self {
            tokens,
            current,
            filename,
        })
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Convert a ParserError to a Diagnostic with a suggestion for common mistakes
    pub fn error_to_diagnostic(&self, error: &ParserError) -> Diagnostic {
        let diag = error.to_diagnostic(self.filename.clone());

        match error {
            ParserError::ExpectedToken {
                expected, found, ..
            } => {
                if expected == "';'" && found.eq_ignore_ascii_case("'end'") {
                    diag.with_suggestion(
                        "Missing semicolon before 'end'. Add ';' after the previous statement.",
                    )
                } else if found == "end of file" {
                    diag.with_suggestion(format!(
                        "The file ended unexpectedly. Add {} before the end of file.",
                        expected
                    ))
                } else {
                    diag
                }
            }
            ParserError::ExpectedExpression { found, .. } | ParserError::ExpectedType { found, .. }
                if found == "end of file" =>
            {
                diag.with_suggestion("The file ended unexpectedly.")
            }
            ParserError::ExpectedAssignment { .. } => diag.with_suggestion(
                "Array elements and record fields can only be used as the target of ':=', '+=', '-=', '*=' or '/='.",
            ),
            ParserError::IllegalStatement { .. } => diag.with_suggestion(
                "Only assignments and procedure calls can be used as statements.",
            ),
            ParserError::Lexical(LexerError::UnterminatedComment { .. }) => {
                diag.with_suggestion("Close the comment with '}' or '*)'.")
            }
            _ => diag,
        }
    }

    /// Parse a complete program
    pub fn parse(&mut self) -> ParserResult<Node> {
        self.parse_program()
    }

    /// Parse program: [PROGRAM identifier ;] declarations begin-block . <eof>
    pub fn parse_program(&mut self) -> ParserResult<Node> {
        let position = self.current().position;

        let name = if self.check_keyword(Keyword::Program) {
            self.advance()?;
            let (name, _) = self.expect_identifier()?;
            self.expect_separator(Separator::Semicolon)?;
            Some(name)
        } else {
            None
        };

        let declarations = self.parse_declarations(true)?;
        let body = self.parse_begin_block()?;
        self.expect_separator(Separator::Dot)?;
        self.expect_eof()?;

        Ok(Node::Program(ast::Program {
            name,
            declarations,
            body: Box::new(body),
            position,
        }))
    }
}

/// Parse a whole program from source text
pub fn parse_source(source: &str) -> ParserResult<Node> {
    Parser::new(source)?.parse()
}
