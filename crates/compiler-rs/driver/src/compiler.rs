//! Front-end pipeline orchestration

use std::fs;

use ast::Node;
use errors::{Diagnostic, LexerError};
use lexer::Scanner;
use parser::Parser;
use tokens::Token;

/// Runs the scanner and parser over one source file
pub struct Compiler {
    filename: Option<String>,
}

impl Compiler {
    /// Create a compiler; `filename` is used when rendering diagnostics
    pub fn new(filename: Option<String>) -> Self {
        Self { filename }
    }

    /// Tokens up to, not including, Eof. Scanning stops at the first
    /// lexical error, which is returned alongside the tokens before it.
    pub fn scan_source(&self, source: &str) -> (Vec<Token>, Option<LexerError>) {
        let mut tokens = Vec::new();
        for result in Scanner::new(source) {
            match result {
                Ok(token) => tokens.push(token),
                Err(e) => return (tokens, Some(e)),
            }
        }
        (tokens, None)
    }

    /// Parse a whole program, rendering any failure as a diagnostic
    pub fn parse_source(&self, source: &str) -> Result<Node, Diagnostic> {
        let mut parser = Parser::new_with_file(source, self.filename.clone())
            .map_err(|e| e.to_diagnostic(self.filename.clone()))?;
        parser.parse().map_err(|e| parser.error_to_diagnostic(&e))
    }

    /// Print every token of a file, one per line
    pub fn scan_file(&self, input_file: &str) -> Result<(), String> {
        let source = read_source(input_file)?;
        let (tokens, error) = self.scan_source(&source);
        for token in &tokens {
            println!("{}", token);
        }
        match error {
            Some(e) => {
                let diag = Diagnostic::from(e).with_filename(self.filename.clone());
                self.print_diagnostics(&[diag]);
                Err("Scanning failed".to_string())
            }
            None => Ok(()),
        }
    }

    /// Print the AST dump of a file
    pub fn parse_file(&self, input_file: &str) -> Result<(), String> {
        let source = read_source(input_file)?;
        match self.parse_source(&source) {
            Ok(ast) => {
                print!("{}", ast.dump());
                Ok(())
            }
            Err(diag) => {
                self.print_diagnostics(&[diag]);
                Err("Parsing failed".to_string())
            }
        }
    }

    /// Print diagnostics to stderr
    fn print_diagnostics(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            eprintln!("{}", diagnostic);
        }
    }
}

fn read_source(input_file: &str) -> Result<String, String> {
    fs::read_to_string(input_file).map_err(|e| format!("Failed to read file '{}': {}", input_file, e))
}
