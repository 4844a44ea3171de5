//! Declaration parsing
//!
//! This module handles parsing of the declaration part of a program or
//! routine: type, const and var sections, and procedure/function
//! declarations. Identifier lists expand to one declaration per identifier.

use ast::{Node, ParameterModifier};
use errors::ParserResult;
use lexer::TokenStream;
use tokens::{Keyword, Operator, Separator, TokenKind};

/// Declaration parsing functionality
impl<T: TokenStream> super::Parser<T> {
    /// Any interleaving of declaration sections; routines only when `allow_routines`
    pub(super) fn parse_declarations(&mut self, allow_routines: bool) -> ParserResult<Vec<Node>> {
        let mut declarations = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::Keyword(Keyword::Type) => {
                    self.advance()?;
                    self.parse_type_section(&mut declarations)?;
                }
                TokenKind::Keyword(Keyword::Const) => {
                    self.advance()?;
                    self.parse_const_section(&mut declarations)?;
                }
                TokenKind::Keyword(Keyword::Var) => {
                    self.advance()?;
                    self.parse_var_section(&mut declarations)?;
                }
                TokenKind::Keyword(Keyword::Procedure) if allow_routines => {
                    declarations.push(self.parse_procedure_declaration()?);
                }
                TokenKind::Keyword(Keyword::Function) if allow_routines => {
                    declarations.push(self.parse_function_declaration()?);
                }
                _ => return Ok(declarations),
            }
        }
    }

    /// (identifier = type ;)+
    fn parse_type_section(&mut self, out: &mut Vec<Node>) -> ParserResult<()> {
        loop {
            let (name, position) = self.expect_identifier()?;
            self.expect_operator(Operator::Eq)?;
            let type_expr = self.parse_type()?;
            self.expect_separator(Separator::Semicolon)?;
            out.push(Node::TypeDeclaration(ast::TypeDeclaration {
                name,
                type_expr: Box::new(type_expr),
                position,
            }));
            if !self.at_identifier() {
                return Ok(());
            }
        }
    }

    /// (identifier [: type] = expression ;)+
    fn parse_const_section(&mut self, out: &mut Vec<Node>) -> ParserResult<()> {
        loop {
            let (name, position) = self.expect_identifier()?;
            let type_expr = if self.check_separator(Separator::Colon) {
                self.advance()?;
                Some(Box::new(self.parse_type()?))
            } else {
                None
            };
            self.expect_operator(Operator::Eq)?;
            let value = self.parse_expression()?;
            self.expect_separator(Separator::Semicolon)?;
            out.push(Node::ConstDeclaration(ast::ConstDeclaration {
                name,
                type_expr,
                value: Box::new(value),
                position,
            }));
            if !self.at_identifier() {
                return Ok(());
            }
        }
    }

    /// (identifier-list : type [= expression] ;)+
    fn parse_var_section(&mut self, out: &mut Vec<Node>) -> ParserResult<()> {
        loop {
            let names = self.parse_identifier_list()?;
            self.expect_separator(Separator::Colon)?;
            let type_expr = self.parse_type()?;
            let init_value = if self.check_operator(Operator::Eq) {
                self.advance()?;
                Some(self.parse_expression()?)
            } else {
                None
            };
            self.expect_separator(Separator::Semicolon)?;
            for (name, position) in names {
                out.push(Node::VariableDeclaration(ast::VariableDeclaration {
                    name,
                    type_expr: Box::new(type_expr.clone()),
                    init_value: init_value.clone().map(Box::new),
                    position,
                }));
            }
            if !self.at_identifier() {
                return Ok(());
            }
        }
    }

    /// PROCEDURE identifier [params] ; declarations begin-block ;
    fn parse_procedure_declaration(&mut self) -> ParserResult<Node> {
        self.expect_keyword(Keyword::Procedure)?;
        let (name, position) = self.expect_identifier()?;
        let params = self.parse_params()?;
        self.expect_separator(Separator::Semicolon)?;
        let declarations = self.parse_declarations(false)?;
        let body = self.parse_begin_block()?;
        self.expect_separator(Separator::Semicolon)?;
        Ok(Node::ProcedureDeclaration(ast::ProcedureDeclaration {
            name,
            params,
            declarations,
            body: Box::new(body),
            position,
        }))
    }

    /// FUNCTION identifier [params] : type ; declarations begin-block ;
    fn parse_function_declaration(&mut self) -> ParserResult<Node> {
        self.expect_keyword(Keyword::Function)?;
        let (name, position) = self.expect_identifier()?;
        let params = self.parse_params()?;
        self.expect_separator(Separator::Colon)?;
        let return_type = self.parse_type()?;
        self.expect_separator(Separator::Semicolon)?;
        let declarations = self.parse_declarations(false)?;
        let body = self.parse_begin_block()?;
        self.expect_separator(Separator::Semicolon)?;
        Ok(Node::FunctionDeclaration(ast::FunctionDeclaration {
            name,
            params,
            return_type: Box::new(return_type),
            declarations,
            body: Box::new(body),
            position,
        }))
    }

    /// Optional `( group (; group)* )`; empty parentheses are allowed
    fn parse_params(&mut self) -> ParserResult<Vec<Node>> {
        let mut params = Vec::new();
        if !self.check_separator(Separator::LParen) {
            return Ok(params);
        }
        self.advance()?;
        if !self.check_separator(Separator::RParen) {
            self.parse_param_group(&mut params)?;
            while self.check_separator(Separator::Semicolon) {
                self.advance()?;
                self.parse_param_group(&mut params)?;
            }
        }
        self.expect_separator(Separator::RParen)?;
        Ok(params)
    }

    /// [VAR | CONST] identifier-list : type
    fn parse_param_group(&mut self, out: &mut Vec<Node>) -> ParserResult<()> {
        let modifier = if self.check_keyword(Keyword::Var) {
            self.advance()?;
            Some(ParameterModifier::Var)
        } else if self.check_keyword(Keyword::Const) {
            self.advance()?;
            Some(ParameterModifier::Const)
        } else {
            None
        };
        let names = self.parse_identifier_list()?;
        self.expect_separator(Separator::Colon)?;
        let type_expr = self.parse_type()?;
        for (name, position) in names {
            out.push(Node::ParameterDeclaration(ast::ParameterDeclaration {
                modifier,
                name,
                type_expr: Box::new(type_expr.clone()),
                position,
            }));
        }
        Ok(())
    }

    fn at_identifier(&self) -> bool {
        matches!(self.current().kind, TokenKind::Identifier(_))
    }
}

#[cfg(test)]
mod tests {
    use super::super::Parser;
    use ast::Node;
    use errors::ParserError;
    use tokens::Position;

    fn declarations(source: &str) -> Vec<Node> {
        let mut parser = Parser::new(source).unwrap();
        let decls = parser.parse_declarations(true).unwrap();
        assert!(parser.current().is_eof(), "trailing input in {:?}", source);
        decls
    }

    fn dump(source: &str) -> String {
        declarations(source).iter().map(Node::dump).collect()
    }

    fn parse_error(source: &str) -> ParserError {
        Parser::new(source)
            .unwrap()
            .parse_declarations(true)
            .unwrap_err()
    }

    // ===== Sections =====

    #[test]
    fn test_var_list_expands_per_identifier() {
        let decls = declarations("var a, b: integer;");
        assert_eq!(decls.len(), 2);
        assert_eq!(dump("var a, b: integer;"), "var\n   a\n   integer\nvar\n   b\n   integer\n");
        assert_eq!(decls[0].position(), Position::new(1, 5));
        assert_eq!(decls[1].position(), Position::new(1, 8));
    }

    #[test]
    fn test_var_with_initial_value() {
        assert_eq!(dump("var n: integer = 2 * 3;"), "var\n   n\n   integer\n   *\n      2\n      3\n");
    }

    #[test]
    fn test_const_section() {
        assert_eq!(
            dump("const max = 10; pi: real = 3.14;"),
            "const\n   max\n   10\nconst\n   pi\n   real\n   3.14\n"
        );
    }

    #[test]
    fn test_type_section() {
        assert_eq!(
            dump("type row = array[1..3] of integer; name = string;"),
            "type\n   row\n   array\n      ..\n         1\n         3\n      integer\ntype\n   name\n   string\n"
        );
    }

    #[test]
    fn test_sections_interleave() {
        let decls = declarations("var x: integer; const c = 1; var y: real; type t = integer;");
        let kinds: Vec<&str> = decls
            .iter()
            .map(|d| match d {
                Node::VariableDeclaration(_) => "var",
                Node::ConstDeclaration(_) => "const",
                Node::TypeDeclaration(_) => "type",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["var", "const", "var", "type"]);
    }

    #[test]
    fn test_no_declarations() {
        let mut parser = Parser::new("begin end.").unwrap();
        assert!(parser.parse_declarations(true).unwrap().is_empty());
    }

    // ===== Routines =====

    #[test]
    fn test_procedure_declaration() {
        let expected = "\
procedure
   swap
   param
      var
      a
      integer
   param
      var
      b
      integer
   var
      t
      integer
   begin
      :=
         t
         a
";
        assert_eq!(
            dump("procedure swap(var a, b: integer); var t: integer; begin t := a; end;"),
            expected
        );
    }

    #[test]
    fn test_function_declaration() {
        let expected = "\
function
   add
   param
      x
      integer
   param
      const
      y
      real
   real
   begin
      :=
         add
         +
            x
            y
";
        assert_eq!(
            dump("function add(x: integer; const y: real): real; begin add := x + y; end;"),
            expected
        );
    }

    #[test]
    fn test_routine_without_parameters() {
        assert_eq!(dump("procedure tick; begin end;"), "procedure\n   tick\n   begin\n");
        assert_eq!(
            dump("function zero(): integer; begin zero := 0; end;"),
            "function\n   zero\n   integer\n   begin\n      :=\n         zero\n         0\n"
        );
    }

    #[test]
    fn test_nested_routines_are_not_allowed() {
        // Inner procedure ends the local declarations, so a begin is expected
        let error = parse_error("procedure outer; procedure inner; begin end; begin end;");
        assert!(matches!(
            error,
            ParserError::ExpectedToken { ref expected, ref found, .. }
                if expected == "'begin'" && found == "'procedure'"
        ));
    }

    #[test]
    fn test_declaration_errors() {
        assert!(matches!(parse_error("var x integer;"), ParserError::ExpectedToken { .. }));
        assert!(matches!(parse_error("var x: integer"), ParserError::ExpectedToken { .. }));
        assert!(matches!(parse_error("const c: = 1;"), ParserError::ExpectedType { .. }));
        assert!(matches!(parse_error("type t integer;"), ParserError::ExpectedToken { .. }));
        assert!(matches!(parse_error("var;"), ParserError::ExpectedToken { .. }));
        assert!(matches!(
            parse_error("function f; begin end;"),
            ParserError::ExpectedToken { ref expected, .. } if expected == "':'"
        ));
    }
}
