//! Pascal-- Token Definitions
//!
//! This crate defines the token types produced by the scanner and consumed by
//! the parser, together with the [`Position`] every token carries.

use std::fmt;

/// Line/column location in the source text.
///
/// Lines start at 1. The column counts characters consumed on the current
/// line, so the first character of a line sits at column 1 once consumed and
/// a fresh line reports column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Create a position at an explicit line and column
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Move to the start of the next line
    pub fn add_line(&mut self) {
        self.line += 1;
        self.column = 0;
    }

    /// Move one column to the right
    pub fn add_column(&mut self) {
        self.column += 1;
    }

    /// Move one column to the left, stopping at column 0
    pub fn retreat_column(&mut self) {
        self.column = self.column.saturating_sub(1);
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

/// Operators: arithmetic, comparison, shifts and the assignment family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,         // =
    Neq,        // <>
    Lt,         // <
    Gt,         // >
    Lte,        // <=
    Gte,        // >=
    Add,        // +
    Sub,        // -
    Mul,        // *
    Div,        // /
    ShiftLeft,  // <<
    ShiftRight, // >>
    Assign,     // :=
    AddAssign,  // +=
    SubAssign,  // -=
    MulAssign,  // *=
    DivAssign,  // /=
}

impl Operator {
    /// Source text of the operator
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Neq => "<>",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Lte => "<=",
            Operator::Gte => ">=",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::ShiftLeft => "<<",
            Operator::ShiftRight => ">>",
            Operator::Assign => ":=",
            Operator::AddAssign => "+=",
            Operator::SubAssign => "-=",
            Operator::MulAssign => "*=",
            Operator::DivAssign => "/=",
        }
    }

    /// Check if this is `:=` or one of the compound assignments
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            Operator::Assign
                | Operator::AddAssign
                | Operator::SubAssign
                | Operator::MulAssign
                | Operator::DivAssign
        )
    }

    /// Check if this is a relational operator
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            Operator::Eq | Operator::Neq | Operator::Lt | Operator::Gt | Operator::Lte | Operator::Gte
        )
    }
}

/// Punctuation that structures the program without computing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    Comma,     // ,
    Dot,       // .
    Range,     // ..
    Semicolon, // ;
    Colon,     // :
}

impl Separator {
    /// Source text of the separator
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::LParen => "(",
            Separator::RParen => ")",
            Separator::LBracket => "[",
            Separator::RBracket => "]",
            Separator::Comma => ",",
            Separator::Dot => ".",
            Separator::Range => "..",
            Separator::Semicolon => ";",
            Separator::Colon => ":",
        }
    }
}

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// Reserved words (Free Pascal dialect), matched case-insensitively
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            /// Every keyword paired with its lowercase spelling
            pub const ALL: &'static [(&'static str, Keyword)] = &[
                $(($text, Keyword::$variant),)*
            ];

            /// Lowercase source spelling
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text,)*
                }
            }

            /// Exact match against the lowercase spellings
            pub fn from_lowercase(text: &str) -> Option<Keyword> {
                match text {
                    $($text => Some(Keyword::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

keywords! {
    And => "and",
    Array => "array",
    Asm => "asm",
    Begin => "begin",
    Break => "break",
    Case => "case",
    Const => "const",
    Constructor => "constructor",
    Continue => "continue",
    Destructor => "destructor",
    Div => "div",
    Do => "do",
    Downto => "downto",
    Else => "else",
    End => "end",
    False => "false",
    File => "file",
    For => "for",
    Function => "function",
    Goto => "goto",
    If => "if",
    Implementation => "implementation",
    In => "in",
    Inline => "inline",
    Interface => "interface",
    Label => "label",
    Mod => "mod",
    Nil => "nil",
    Not => "not",
    Object => "object",
    Of => "of",
    Operator => "operator",
    Or => "or",
    Packed => "packed",
    Procedure => "procedure",
    Program => "program",
    Record => "record",
    Repeat => "repeat",
    Set => "set",
    Shl => "shl",
    Shr => "shr",
    String => "string",
    Then => "then",
    To => "to",
    True => "true",
    Type => "type",
    Unit => "unit",
    Until => "until",
    Uses => "uses",
    Var => "var",
    While => "while",
    With => "with",
    Xor => "xor",
    As => "as",
    Class => "class",
    Constref => "constref",
    Dispose => "dispose",
    Except => "except",
    Exit => "exit",
    Exports => "exports",
    Finalization => "finalization",
    Finally => "finally",
    Inherited => "inherited",
    Initialization => "initialization",
    Is => "is",
    Library => "library",
    New => "new",
    On => "on",
    Out => "out",
    Property => "property",
    Raise => "raise",
    SelfKw => "self",
    Threadvar => "threadvar",
    Try => "try",
    Absolute => "absolute",
    Abstract => "abstract",
    Alias => "alias",
    Assembler => "assembler",
    Cdecl => "cdecl",
    Cppdecl => "cppdecl",
    Default => "default",
    Export => "export",
    External => "external",
    Forward => "forward",
    Generic => "generic",
    Index => "index",
    Local => "local",
    Name => "name",
    Nostackframe => "nostackframe",
    Oldfpccall => "oldfpccall",
    Override => "override",
    Pascal => "pascal",
    Private => "private",
    Protected => "protected",
    Public => "public",
    Published => "published",
    Read => "read",
    Register => "register",
    Reintroduce => "reintroduce",
    Safecall => "safecall",
    Softfloat => "softfloat",
    Specialize => "specialize",
    Stdcall => "stdcall",
    Virtual => "virtual",
    Write => "write",
}

/// Payload-free token classification, used for kind checks and dumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    Identifier,
    Keyword,
    Operator,
    Separator,
    Eof,
    Unrecognized,
}

/// Token kinds; the payload is the token's value
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Decimal or radix-prefixed integer
    IntLiteral(i32),
    /// Decimal literal with a fraction or exponent
    FloatLiteral(f64),
    /// Quoted string; holds the full delimited text, quotes included
    StringLiteral(String),
    Identifier(String),
    Keyword(Keyword),
    Operator(Operator),
    Separator(Separator),
    /// End of file
    Eof,
    /// Character sequence outside the punctuation table; left for the parser to reject
    Unrecognized,
}

impl TokenKind {
    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::IntLiteral(_) => TokenCategory::IntLiteral,
            TokenKind::FloatLiteral(_) => TokenCategory::FloatLiteral,
            TokenKind::StringLiteral(_) => TokenCategory::StringLiteral,
            TokenKind::Identifier(_) => TokenCategory::Identifier,
            TokenKind::Keyword(_) => TokenCategory::Keyword,
            TokenKind::Operator(_) => TokenCategory::Operator,
            TokenKind::Separator(_) => TokenCategory::Separator,
            TokenKind::Eof => TokenCategory::Eof,
            TokenKind::Unrecognized => TokenCategory::Unrecognized,
        }
    }
}

/// A token with the position of its first character
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub position: Position,
    pub kind: TokenKind,
    /// Exact source text of the lexeme
    pub raw: String,
}

impl Token {
    /// Create a new token
    pub fn new(position: Position, kind: TokenKind, raw: impl Into<String>) -> Self {
        Self {
            position,
            kind,
            raw: raw.into(),
        }
    }

    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }

    /// Check if token is the given operator
    pub fn is_operator(&self, op: Operator) -> bool {
        self.kind == TokenKind::Operator(op)
    }

    /// Check if token is the given separator
    pub fn is_separator(&self, separator: Separator) -> bool {
        self.kind == TokenKind::Separator(separator)
    }

    /// Check if token is the given keyword
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Human-readable description for error messages
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of file".to_string(),
            _ => format!("'{}'", self.raw),
        }
    }
}

/// Tab-separated dump line: line, column, category, value, raw text
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{:?}\t",
            self.position.line,
            self.position.column,
            self.category()
        )?;
        match &self.kind {
            TokenKind::IntLiteral(value) => write!(f, "{}", value)?,
            TokenKind::FloatLiteral(value) => write!(f, "{}", value)?,
            TokenKind::StringLiteral(text) | TokenKind::Identifier(text) => write!(f, "{}", text)?,
            TokenKind::Keyword(keyword) => write!(f, "{:?}", keyword)?,
            TokenKind::Operator(op) => write!(f, "{:?}", op)?,
            TokenKind::Separator(separator) => write!(f, "{:?}", separator)?,
            TokenKind::Eof | TokenKind::Unrecognized => {}
        }
        write!(f, "\t{}", self.raw)
    }
}

/// Longer than any keyword spelling
const KEYWORD_BUFFER: usize = 16;

/// Map identifier text to a keyword, ignoring case
pub fn lookup_keyword(s: &str) -> Option<Keyword> {
    if s.len() > KEYWORD_BUFFER {
        return None;
    }
    let mut buffer = [0u8; KEYWORD_BUFFER];
    let lowered = &mut buffer[..s.len()];
    lowered.copy_from_slice(s.as_bytes());
    lowered.make_ascii_lowercase();
    std::str::from_utf8(lowered).ok().and_then(Keyword::from_lowercase)
}

/// Operator or separator recognized from the punctuation table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuation {
    Operator(Operator),
    Separator(Separator),
}

impl Punctuation {
    pub fn into_kind(self) -> TokenKind {
        match self {
            Punctuation::Operator(op) => TokenKind::Operator(op),
            Punctuation::Separator(separator) => TokenKind::Separator(separator),
        }
    }
}

/// Every operator and separator lexeme, one and two characters long
pub static PUNCTUATION: &[(&str, Punctuation)] = &[
    ("(", Punctuation::Separator(Separator::LParen)),
    (")", Punctuation::Separator(Separator::RParen)),
    ("[", Punctuation::Separator(Separator::LBracket)),
    ("]", Punctuation::Separator(Separator::RBracket)),
    (",", Punctuation::Separator(Separator::Comma)),
    (".", Punctuation::Separator(Separator::Dot)),
    ("..", Punctuation::Separator(Separator::Range)),
    (";", Punctuation::Separator(Separator::Semicolon)),
    (":", Punctuation::Separator(Separator::Colon)),
    ("=", Punctuation::Operator(Operator::Eq)),
    ("<>", Punctuation::Operator(Operator::Neq)),
    ("<", Punctuation::Operator(Operator::Lt)),
    (">", Punctuation::Operator(Operator::Gt)),
    ("<=", Punctuation::Operator(Operator::Lte)),
    (">=", Punctuation::Operator(Operator::Gte)),
    ("+", Punctuation::Operator(Operator::Add)),
    ("-", Punctuation::Operator(Operator::Sub)),
    ("*", Punctuation::Operator(Operator::Mul)),
    ("/", Punctuation::Operator(Operator::Div)),
    ("<<", Punctuation::Operator(Operator::ShiftLeft)),
    (">>", Punctuation::Operator(Operator::ShiftRight)),
    (":=", Punctuation::Operator(Operator::Assign)),
    ("+=", Punctuation::Operator(Operator::AddAssign)),
    ("-=", Punctuation::Operator(Operator::SubAssign)),
    ("*=", Punctuation::Operator(Operator::MulAssign)),
    ("/=", Punctuation::Operator(Operator::DivAssign)),
];

/// Exact-match lookup in [`PUNCTUATION`]
pub fn lookup_punctuation(lexeme: &str) -> Option<Punctuation> {
    PUNCTUATION
        .iter()
        .find(|(text, _)| *text == lexeme)
        .map(|&(_, punctuation)| punctuation)
}
