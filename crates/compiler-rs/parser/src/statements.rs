//! Statement parsing
//!
//! This module handles parsing of all statement types: begin blocks, if,
//! while, for, assignments, and procedure calls.

use ast::{AssignOperator, ForDirection, Node};
use errors::{ParserError, ParserResult};
use lexer::TokenStream;
use tokens::{Keyword, Operator, Separator, TokenKind};

/// Statement parsing functionality
impl<T: TokenStream> super::Parser<T> {
    /// Parse statement - main dispatcher
    pub fn parse_statement(&mut self) -> ParserResult<Node> {
        match self.current().kind {
            TokenKind::Keyword(Keyword::Begin) => self.parse_begin_block(),
            TokenKind::Keyword(Keyword::If) => self.parse_if_statement(),
            TokenKind::Keyword(Keyword::While) => self.parse_while_statement(),
            TokenKind::Keyword(Keyword::For) => self.parse_for_statement(),
            _ => self.parse_simple_statement(),
        }
    }

    /// BEGIN (statement ;)* END
    pub(super) fn parse_begin_block(&mut self) -> ParserResult<Node> {
        let position = self.expect_keyword(Keyword::Begin)?.position;
        let mut statements = Vec::new();
        while !self.check_keyword(Keyword::End) {
            statements.push(self.parse_statement()?);
            self.expect_separator(Separator::Semicolon)?;
        }
        self.advance()?;
        Ok(Node::BeginBlock(ast::BeginBlock { statements, position }))
    }

    /// IF expression THEN statement [ELSE statement]
    fn parse_if_statement(&mut self) -> ParserResult<Node> {
        let position = self.expect_keyword(Keyword::If)?.position;
        let condition = self.parse_expression()?;
        self.expect_keyword(Keyword::Then)?;
        let then_block = self.parse_statement()?;
        // A dangling else belongs to the innermost if
        let else_block = if self.check_keyword(Keyword::Else) {
            self.advance()?;
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Node::IfStatement(ast::IfStatement {
            condition: Box::new(condition),
            then_block: Box::new(then_block),
            else_block,
            position,
        }))
    }

    /// WHILE expression DO statement
    fn parse_while_statement(&mut self) -> ParserResult<Node> {
        let position = self.expect_keyword(Keyword::While)?.position;
        let condition = self.parse_expression()?;
        self.expect_keyword(Keyword::Do)?;
        let body = self.parse_statement()?;
        Ok(Node::WhileStatement(ast::WhileStatement {
            condition: Box::new(condition),
            body: Box::new(body),
            position,
        }))
    }

    /// FOR identifier := expression (TO | DOWNTO) expression DO statement
    fn parse_for_statement(&mut self) -> ParserResult<Node> {
        let position = self.expect_keyword(Keyword::For)?.position;
        let (var_name, _) = self.expect_identifier()?;
        self.expect_operator(Operator::Assign)?;
        let start_expr = self.parse_expression()?;

        let direction = if self.check_keyword(Keyword::To) {
            ForDirection::To
        } else if self.check_keyword(Keyword::Downto) {
            ForDirection::Downto
        } else {
            return Err(self.expected("'to' or 'downto'"));
        };
        self.advance()?;

        let end_expr = self.parse_expression()?;
        self.expect_keyword(Keyword::Do)?;
        let body = self.parse_statement()?;

        Ok(Node::ForStatement(ast::ForStatement {
            var_name,
            start_expr: Box::new(start_expr),
            direction,
            end_expr: Box::new(end_expr),
            body: Box::new(body),
            position,
        }))
    }

    /// Assignment or procedure call, decided by the shape of the parsed expression
    fn parse_simple_statement(&mut self) -> ParserResult<Node> {
        let start = self.current().position;
        let expr = self.parse_expression()?;
        match expr {
            Node::Call(_) => Ok(expr),
            Node::VariableRef(ref variable) => match self.assignment_operator() {
                Some(op) => self.parse_assignment(expr, op),
                None => {
                    // Bare identifier: parameterless procedure call
                    let position = variable.position;
                    Ok(Node::Call(ast::Call {
                        callee: Box::new(expr),
                        args: Vec::new(),
                        position,
                    }))
                }
            },
            Node::ArrayAccess(_) | Node::RecordFieldAccess(_) => match self.assignment_operator() {
                Some(op) => self.parse_assignment(expr, op),
                None => Err(ParserError::ExpectedAssignment {
                    found: self.current().describe(),
                    position: self.current().position,
                }),
            },
            _ => Err(ParserError::IllegalStatement { position: start }),
        }
    }

    /// target op expression; the operator is the current token
    fn parse_assignment(&mut self, target: Node, op: AssignOperator) -> ParserResult<Node> {
        let position = self.advance()?.position;
        let value = self.parse_expression()?;
        Ok(Node::AssignmentStatement(ast::AssignmentStatement {
            target: Box::new(target),
            op,
            value: Box::new(value),
            position,
        }))
    }

    fn assignment_operator(&self) -> Option<AssignOperator> {
        match self.current().kind {
            TokenKind::Operator(Operator::Assign) => Some(AssignOperator::Assign),
            TokenKind::Operator(Operator::AddAssign) => Some(AssignOperator::AddAssign),
            TokenKind::Operator(Operator::SubAssign) => Some(AssignOperator::SubAssign),
            TokenKind::Operator(Operator::MulAssign) => Some(AssignOperator::MulAssign),
            TokenKind::Operator(Operator::DivAssign) => Some(AssignOperator::DivAssign),
            _ => None,
        }
    }
}
