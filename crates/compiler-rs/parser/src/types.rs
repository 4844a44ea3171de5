//! Type parsing
//!
//! This module handles parsing of type expressions: named types, arrays,
//! and records.

use ast::Node;
use errors::{ParserError, ParserResult};
use lexer::TokenStream;
use tokens::{Keyword, Separator, TokenKind};

/// Type parsing functionality
impl<T: TokenStream> super::Parser<T> {
    /// Parse type: identifier | STRING | array type | record type
    pub fn parse_type(&mut self) -> ParserResult<Node> {
        let position = self.current().position;
        match &self.current().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance()?;
                Ok(Node::PrimitiveType(ast::PrimitiveType { name, position }))
            }
            TokenKind::Keyword(Keyword::String) => {
                self.advance()?;
                Ok(Node::PrimitiveType(ast::PrimitiveType {
                    name: Keyword::String.as_str().to_string(),
                    position,
                }))
            }
            TokenKind::Keyword(Keyword::Array) => self.parse_array_type(),
            TokenKind::Keyword(Keyword::Record) => self.parse_record_type(),
            _ => Err(ParserError::ExpectedType {
                found: self.current().describe(),
                position,
            }),
        }
    }

    /// ARRAY [ range (, range)* ] OF type
    fn parse_array_type(&mut self) -> ParserResult<Node> {
        let position = self.expect_keyword(Keyword::Array)?.position;
        self.expect_separator(Separator::LBracket)?;
        let mut ranges = vec![self.parse_range()?];
        while self.check_separator(Separator::Comma) {
            self.advance()?;
            ranges.push(self.parse_range()?);
        }
        self.expect_separator(Separator::RBracket)?;
        self.expect_keyword(Keyword::Of)?;
        let element_type = self.parse_type()?;
        Ok(Node::ArrayType(ast::ArrayType {
            ranges,
            element_type: Box::new(element_type),
            position,
        }))
    }

    /// expression .. expression
    fn parse_range(&mut self) -> ParserResult<Node> {
        let low = self.parse_expression()?;
        let position = self.expect_separator(Separator::Range)?.position;
        let high = self.parse_expression()?;
        Ok(Node::Range(ast::Range {
            low: Box::new(low),
            high: Box::new(high),
            position,
        }))
    }

    /// RECORD [identifier-list : type (; identifier-list : type)* [;]] END
    fn parse_record_type(&mut self) -> ParserResult<Node> {
        let position = self.expect_keyword(Keyword::Record)?.position;
        let mut fields = Vec::new();
        while !self.check_keyword(Keyword::End) {
            let names = self.parse_identifier_list()?;
            self.expect_separator(Separator::Colon)?;
            let type_expr = self.parse_type()?;
            for (name, position) in names {
                fields.push(Node::RecordField(ast::RecordField {
                    name,
                    type_expr: Box::new(type_expr.clone()),
                    position,
                }));
            }
            if self.check_separator(Separator::Semicolon) {
                self.advance()?;
            } else if !self.check_keyword(Keyword::End) {
                return Err(self.expected("';'"));
            }
        }
        self.advance()?;
        Ok(Node::RecordType(ast::RecordType { fields, position }))
    }
}
