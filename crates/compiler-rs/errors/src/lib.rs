//! Pascal-- Error Types
//!
//! Both the scanner and the parser fail fast: the first error aborts the
//! whole scan or parse. Every error carries the [`Position`] it was detected
//! at, and can be rendered for the user as a [`Diagnostic`].

use std::fmt;

use thiserror::Error;
use tokens::Position;

/// Failures raised while turning characters into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerError {
    /// Empty digit run after `.`, an exponent marker, or a radix prefix
    #[error("{position} malformed number '{lexeme}'")]
    MalformedNumber { lexeme: String, position: Position },

    /// Integer literal does not fit in 32 bits
    #[error("{position} integer literal '{lexeme}' is out of range")]
    IntegerOverflow { lexeme: String, position: Position },

    /// `{` or `(*` comment still open at end of input
    #[error("{position} unterminated comment")]
    UnterminatedComment { position: Position },

    /// String literal reached a newline or end of input before its closing quote
    #[error("{position} unterminated string")]
    UnterminatedString { position: Position },

    /// A character was requested from an exhausted source
    #[error("{position} unexpected end of input")]
    UnexpectedEndOfInput { position: Position },
}

impl LexerError {
    pub fn position(&self) -> Position {
        match self {
            LexerError::MalformedNumber { position, .. }
            | LexerError::IntegerOverflow { position, .. }
            | LexerError::UnterminatedComment { position }
            | LexerError::UnterminatedString { position }
            | LexerError::UnexpectedEndOfInput { position } => *position,
        }
    }
}

pub type LexerResult<T> = Result<T, LexerError>;

/// Failures raised while assembling the AST.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// A specific token was required
    #[error("{position} expected {expected}, found {found}")]
    ExpectedToken {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("{position} expected expression, found {found}")]
    ExpectedExpression { found: String, position: Position },

    /// Array element or record field used as a statement without assigning to it
    #[error("{position} expected assignment operator, found {found}")]
    ExpectedAssignment { found: String, position: Position },

    /// Expression that is neither a call nor an assignable reference
    #[error("{position} illegal statement")]
    IllegalStatement { position: Position },

    #[error("{position} expected type, found {found}")]
    ExpectedType { found: String, position: Position },

    #[error(transparent)]
    Lexical(#[from] LexerError),
}

impl ParserError {
    pub fn position(&self) -> Position {
        match self {
            ParserError::ExpectedToken { position, .. }
            | ParserError::ExpectedExpression { position, .. }
            | ParserError::ExpectedAssignment { position, .. }
            | ParserError::IllegalStatement { position }
            | ParserError::ExpectedType { position, .. } => *position,
            ParserError::Lexical(e) => e.position(),
        }
    }

    /// Message without the leading position
    pub fn message(&self) -> String {
        match self {
            ParserError::ExpectedToken { expected, found, .. } => {
                format!("expected {}, found {}", expected, found)
            }
            ParserError::ExpectedExpression { found, .. } => {
                format!("expected expression, found {}", found)
            }
            ParserError::ExpectedAssignment { found, .. } => {
                format!("expected assignment operator, found {}", found)
            }
            ParserError::IllegalStatement { .. } => "illegal statement".to_string(),
            ParserError::ExpectedType { found, .. } => format!("expected type, found {}", found),
            ParserError::Lexical(e) => lexer_message(e),
        }
    }

    /// Convert into a user-facing diagnostic
    pub fn to_diagnostic(&self, filename: Option<String>) -> Diagnostic {
        Diagnostic::error(self.message(), self.position()).with_filename(filename)
    }
}

fn lexer_message(error: &LexerError) -> String {
    match error {
        LexerError::MalformedNumber { lexeme, .. } => format!("malformed number '{}'", lexeme),
        LexerError::IntegerOverflow { lexeme, .. } => {
            format!("integer literal '{}' is out of range", lexeme)
        }
        LexerError::UnterminatedComment { .. } => "unterminated comment".to_string(),
        LexerError::UnterminatedString { .. } => "unterminated string".to_string(),
        LexerError::UnexpectedEndOfInput { .. } => "unexpected end of input".to_string(),
    }
}

pub type ParserResult<T> = Result<T, ParserError>;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Error,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Error => write!(f, "Error"),
        }
    }
}

/// A rendered report for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: ErrorSeverity,
    pub message: String,
    pub position: Position,
    pub filename: Option<String>,
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, position: Position) -> Self {
        Self {
            severity: ErrorSeverity::Error,
            message: message.into(),
            position,
            filename: None,
            suggestion: None,
        }
    }

    pub fn with_filename(mut self, filename: Option<String>) -> Self {
        self.filename = filename;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// `file:line:column: Error: message`, plus a `Suggestion:` line when present
    pub fn format(&self) -> String {
        let file = self.filename.as_deref().unwrap_or("<input>");
        let mut out = format!(
            "{}:{}:{}: {}: {}",
            file, self.position.line, self.position.column, self.severity, self.message
        );
        if let Some(suggestion) = &self.suggestion {
            out.push_str("\n  Suggestion: ");
            out.push_str(suggestion);
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl From<LexerError> for Diagnostic {
    fn from(error: LexerError) -> Self {
        Diagnostic::error(lexer_message(&error), error.position())
    }
}
