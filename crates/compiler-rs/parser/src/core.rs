//! Core parser functionality
//!
//! This module contains the fundamental token management and parsing utilities
//! used throughout the parser.

use errors::{ParserError, ParserResult};
use lexer::TokenStream;
use tokens::{Keyword, Operator, Position, Separator, Token, TokenKind};

/// Core parser functionality for token management
impl<T: TokenStream> super::Parser<T> {
    /// Pull the next token into the lookahead slot and return the one it replaces
    pub(super) fn advance(&mut self) -> ParserResult<Token> {
        let next = self.tokens.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Get the current (lookahead) token
    pub(super) fn current(&self) -> &Token {
        &self.current
    }

    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current.is_keyword(keyword)
    }

    pub(super) fn check_separator(&self, separator: Separator) -> bool {
        self.current.is_separator(separator)
    }

    pub(super) fn check_operator(&self, op: Operator) -> bool {
        self.current.is_operator(op)
    }

    /// Error describing what was expected at the current token
    pub(super) fn expected(&self, expected: &str) -> ParserError {
        ParserError::ExpectedToken {
            expected: expected.to_string(),
            found: self.current.describe(),
            position: self.current.position,
        }
    }

    /// Consume the given keyword, otherwise error
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> ParserResult<Token> {
        if self.check_keyword(keyword) {
            self.advance()
        } else {
            Err(self.expected(&format!("'{}'", keyword.as_str())))
        }
    }

    /// Consume the given separator, otherwise error
    pub(super) fn expect_separator(&mut self, separator: Separator) -> ParserResult<Token> {
        if self.check_separator(separator) {
            self.advance()
        } else {
            Err(self.expected(&format!("'{}'", separator.as_str())))
        }
    }

    /// Consume the given operator, otherwise error
    pub(super) fn expect_operator(&mut self, op: Operator) -> ParserResult<Token> {
        if self.check_operator(op) {
            self.advance()
        } else {
            Err(self.expected(&format!("'{}'", op.as_str())))
        }
    }

    /// Consume an identifier, returning its name and position
    pub(super) fn expect_identifier(&mut self) -> ParserResult<(String, Position)> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let position = self.advance()?.position;
                Ok((name, position))
            }
            _ => Err(self.expected("identifier")),
        }
    }

    /// `id (, id)*`
    pub(super) fn parse_identifier_list(&mut self) -> ParserResult<Vec<(String, Position)>> {
        let mut names = vec![self.expect_identifier()?];
        while self.check_separator(Separator::Comma) {
            self.advance()?;
            names.push(self.expect_identifier()?);
        }
        Ok(names)
    }

    /// Require that the whole input has been consumed
    pub(super) fn expect_eof(&self) -> ParserResult<()> {
        if self.current.is_eof() {
            Ok(())
        } else {
            Err(self.expected("end of file"))
        }
    }
}
