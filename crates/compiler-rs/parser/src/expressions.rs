//! Expression parsing
//!
//! Precedence climbs through four levels, loosest first: relational,
//! additive, multiplicative, unary. Every binary level folds to the left.
//! Identifiers continue into a reference chain of indexing, calls and
//! field selections.

use ast::{BinaryOperator, Node, NumberValue, RelOperator, UnaryOperator};
use errors::{ParserError, ParserResult};
use lexer::TokenStream;
use tokens::{Keyword, Operator, Separator, TokenKind};

/// Expression parsing functionality
impl<T: TokenStream> super::Parser<T> {
    /// Expression: SimpleExpression (relop SimpleExpression)*
    pub fn parse_expression(&mut self) -> ParserResult<Node> {
        let mut left = self.parse_simple_expression()?;
        while let Some(op) = self.relational_operator() {
            let position = self.advance()?.position;
            let right = self.parse_simple_expression()?;
            left = Node::RelOp(ast::RelOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position,
            });
        }
        Ok(left)
    }

    /// SimpleExpression: Term ((+ | - | or | xor) Term)*
    fn parse_simple_expression(&mut self) -> ParserResult<Node> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.adding_operator() {
            let position = self.advance()?.position;
            let right = self.parse_term()?;
            left = binary(op, left, right, position);
        }
        Ok(left)
    }

    /// Term: SimpleTerm ((* | / | div | mod | and | shl | shr | << | >>) SimpleTerm)*
    fn parse_term(&mut self) -> ParserResult<Node> {
        let mut left = self.parse_simple_term()?;
        while let Some(op) = self.multiplying_operator() {
            let position = self.advance()?.position;
            let right = self.parse_simple_term()?;
            left = binary(op, left, right, position);
        }
        Ok(left)
    }

    /// SimpleTerm: (+ | - | not) SimpleTerm | Factor
    fn parse_simple_term(&mut self) -> ParserResult<Node> {
        let op = match self.current().kind {
            TokenKind::Operator(Operator::Add) => UnaryOperator::Plus,
            TokenKind::Operator(Operator::Sub) => UnaryOperator::Minus,
            TokenKind::Keyword(Keyword::Not) => UnaryOperator::Not,
            _ => return self.parse_factor(),
        };
        let position = self.advance()?.position;
        let operand = self.parse_simple_term()?;
        Ok(Node::UnaryOp(ast::UnaryOp {
            op,
            operand: Box::new(operand),
            position,
        }))
    }

    /// Factor: number | string | reference | ( Expression )
    fn parse_factor(&mut self) -> ParserResult<Node> {
        let position = self.current().position;
        match &self.current().kind {
            TokenKind::IntLiteral(value) => {
                let value = NumberValue::Int(*value);
                self.advance()?;
                Ok(Node::NumberLiteral(ast::NumberLiteral { value, position }))
            }
            TokenKind::FloatLiteral(value) => {
                let value = NumberValue::Float(*value);
                self.advance()?;
                Ok(Node::NumberLiteral(ast::NumberLiteral { value, position }))
            }
            TokenKind::StringLiteral(text) => {
                let value = text.clone();
                self.advance()?;
                Ok(Node::StringLiteral(ast::StringLiteral { value, position }))
            }
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance()?;
                self.parse_reference_chain(Node::VariableRef(ast::VariableRef { name, position }))
            }
            TokenKind::Separator(Separator::LParen) => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect_separator(Separator::RParen)?;
                Ok(expr)
            }
            TokenKind::Unrecognized => Err(self.expected("expression")),
            _ => Err(self.expected_expression()),
        }
    }

    /// Fold postfix `[...]`, `(...)` and `.field` onto `base`
    fn parse_reference_chain(&mut self, mut base: Node) -> ParserResult<Node> {
        loop {
            if self.check_separator(Separator::LBracket) {
                let position = self.advance()?.position;
                let indices = self.parse_expression_list()?;
                self.expect_separator(Separator::RBracket)?;
                base = Node::ArrayAccess(ast::ArrayAccess {
                    target: Box::new(base),
                    indices,
                    position,
                });
            } else if self.check_separator(Separator::LParen) {
                let position = self.advance()?.position;
                let args = if self.check_separator(Separator::RParen) {
                    Vec::new()
                } else {
                    self.parse_expression_list()?
                };
                self.expect_separator(Separator::RParen)?;
                base = Node::Call(ast::Call {
                    callee: Box::new(base),
                    args,
                    position,
                });
            } else if self.check_separator(Separator::Dot) {
                let position = self.advance()?.position;
                let (field, _) = self.expect_identifier()?;
                base = Node::RecordFieldAccess(ast::RecordFieldAccess {
                    record: Box::new(base),
                    field,
                    position,
                });
            } else {
                return Ok(base);
            }
        }
    }

    /// Expression (, Expression)*
    pub(super) fn parse_expression_list(&mut self) -> ParserResult<Vec<Node>> {
        let mut list = vec![self.parse_expression()?];
        while self.check_separator(Separator::Comma) {
            self.advance()?;
            list.push(self.parse_expression()?);
        }
        Ok(list)
    }

    fn expected_expression(&self) -> ParserError {
        ParserError::ExpectedExpression {
            found: self.current().describe(),
            position: self.current().position,
        }
    }

    fn relational_operator(&self) -> Option<RelOperator> {
        match self.current().kind {
            TokenKind::Operator(Operator::Eq) => Some(RelOperator::Eq),
            TokenKind::Operator(Operator::Neq) => Some(RelOperator::Neq),
            TokenKind::Operator(Operator::Lt) => Some(RelOperator::Lt),
            TokenKind::Operator(Operator::Gt) => Some(RelOperator::Gt),
            TokenKind::Operator(Operator::Lte) => Some(RelOperator::Lte),
            TokenKind::Operator(Operator::Gte) => Some(RelOperator::Gte),
            _ => None,
        }
    }

    fn adding_operator(&self) -> Option<BinaryOperator> {
        match self.current().kind {
            TokenKind::Operator(Operator::Add) => Some(BinaryOperator::Add),
            TokenKind::Operator(Operator::Sub) => Some(BinaryOperator::Sub),
            TokenKind::Keyword(Keyword::Or) => Some(BinaryOperator::Or),
            TokenKind::Keyword(Keyword::Xor) => Some(BinaryOperator::Xor),
            _ => None,
        }
    }

    fn multiplying_operator(&self) -> Option<BinaryOperator> {
        match self.current().kind {
            TokenKind::Operator(Operator::Mul) => Some(BinaryOperator::Mul),
            TokenKind::Operator(Operator::Div) => Some(BinaryOperator::Div),
            TokenKind::Operator(Operator::ShiftLeft) | TokenKind::Keyword(Keyword::Shl) => {
                Some(BinaryOperator::Shl)
            }
            TokenKind::Operator(Operator::ShiftRight) | TokenKind::Keyword(Keyword::Shr) => {
                Some(BinaryOperator::Shr)
            }
            TokenKind::Keyword(Keyword::Div) => Some(BinaryOperator::IntDiv),
            TokenKind::Keyword(Keyword::Mod) => Some(BinaryOperator::Mod),
            TokenKind::Keyword(Keyword::And) => Some(BinaryOperator::And),
            _ => None,
        }
    }
}

fn binary(op: BinaryOperator, left: Node, right: Node, position: tokens::Position) -> Node {
    Node::BinaryOp(ast::BinaryOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
        position,
    })
}
