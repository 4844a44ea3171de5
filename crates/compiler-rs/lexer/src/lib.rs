//! Pascal-- Lexer
//!
//! This crate implements the lexical analysis (tokenization) phase. It pulls
//! characters from a [`BufferedReader`] and produces tokens lazily, one per
//! call to [`Scanner::next_token`].

pub mod reader;

use std::str::Chars;

pub use errors::{LexerError, LexerResult};
pub use reader::BufferedReader;
use tokens::{lookup_keyword, lookup_punctuation, Position, Punctuation, Token, TokenKind};

/// Anything that hands out tokens one at a time
pub trait TokenStream {
    fn next_token(&mut self) -> LexerResult<Token>;
}

/// Lexer (scanner) for Pascal--
pub struct Scanner<I: Iterator<Item = char>> {
    reader: BufferedReader<I>,
    /// Set once Eof or an error has been yielded through `Iterator`
    finished: bool,
}

impl<'a> Scanner<Chars<'a>> {
    /// Create a new scanner over source text
    pub fn new(source: &'a str) -> Self {
        Self::from_chars(source.chars())
    }
}

impl<I: Iterator<Item = char>> Scanner<I> {
    /// Create a new scanner over any character stream
    pub fn from_chars(chars: I) -> Self {
        Self {
            reader: BufferedReader::new(chars),
            finished: false,
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> LexerResult<Token> {
        let Some(first) = self.skip_trivia()? else {
            self.reader.reset_lexeme("");
            // Eof sits where the next token's first character would
            let mut position = self.reader.position();
            position.add_column();
            return Ok(Token::new(position, TokenKind::Eof, ""));
        };

        let start = self.reader.position();
        self.reader.reset_lexeme(first.encode_utf8(&mut [0; 4]));

        let kind = if first.is_ascii_digit() {
            self.scan_number(start)?
        } else if let Some(radix) = radix_of_prefix(first) {
            self.scan_radix_number(radix, start)?
        } else if first.is_ascii_alphabetic() || first == '_' {
            self.scan_identifier_or_keyword()?
        } else if first == '\'' {
            self.scan_string(start)?
        } else {
            self.scan_operator_or_separator()?
        };

        Ok(Token::new(start, kind, self.reader.lexeme()))
    }

    /// Skip whitespace and comments, returning the first significant
    /// character (already consumed) or `None` at end of input
    fn skip_trivia(&mut self) -> LexerResult<Option<char>> {
        loop {
            if self.reader.at_end() {
                return Ok(None);
            }
            let c = self.reader.consume()?;
            match c {
                ' ' | '\t' | '\r' | '\n' => {}
                '/' if self.reader.peek() == Some('/') => self.skip_line_comment()?,
                '{' => self.skip_brace_comment()?,
                '(' if self.reader.peek() == Some('*') => {
                    let start = self.reader.position();
                    self.reader.consume()?;
                    self.skip_paren_comment(start)?;
                }
                _ => return Ok(Some(c)),
            }
        }
    }

    /// Skip `// ...` up to, not including, the newline
    fn skip_line_comment(&mut self) -> LexerResult<()> {
        while matches!(self.reader.peek(), Some(c) if c != '\n') {
            self.reader.consume()?;
        }
        Ok(())
    }

    /// Skip `{ ... }`; the opening brace is already consumed
    fn skip_brace_comment(&mut self) -> LexerResult<()> {
        let start = self.reader.position();
        loop {
            if self.reader.at_end() {
                return Err(LexerError::UnterminatedComment { position: start });
            }
            if self.reader.consume()? == '}' {
                return Ok(());
            }
        }
    }

    /// Skip `(* ... *)`; the opening pair is already consumed
    fn skip_paren_comment(&mut self, start: Position) -> LexerResult<()> {
        loop {
            if self.reader.at_end() {
                return Err(LexerError::UnterminatedComment { position: start });
            }
            if self.reader.consume()? == '*' && self.reader.consume_if(')')? {
                return Ok(());
            }
        }
    }

    /// Consume a run of digits in `radix`, returning how many were taken
    fn consume_digits(&mut self, radix: u32) -> LexerResult<usize> {
        let mut count = 0;
        while matches!(self.reader.peek(), Some(c) if c.is_digit(radix)) {
            self.reader.consume()?;
            count += 1;
        }
        Ok(count)
    }

    fn malformed(&self, start: Position) -> LexerError {
        LexerError::MalformedNumber {
            lexeme: self.reader.lexeme().to_string(),
            position: start,
        }
    }

    fn overflow(&self, start: Position) -> LexerError {
        LexerError::IntegerOverflow {
            lexeme: self.reader.lexeme().to_string(),
            position: start,
        }
    }

    /// Scan decimal integer or float; the first digit is already consumed
    fn scan_number(&mut self, start: Position) -> LexerResult<TokenKind> {
        self.consume_digits(10)?;
        let mut is_float = false;

        if self.reader.peek() == Some('.') {
            self.reader.consume()?;
            if self.reader.peek() == Some('.') {
                // `1..10`: the dot belongs to a range separator
                self.reader.push_back();
            } else {
                if self.consume_digits(10)? == 0 {
                    return Err(self.malformed(start));
                }
                is_float = true;
            }
        }

        if matches!(self.reader.peek(), Some('e' | 'E')) {
            self.reader.consume()?;
            if matches!(self.reader.peek(), Some('+' | '-')) {
                self.reader.consume()?;
            }
            if self.consume_digits(10)? == 0 {
                return Err(self.malformed(start));
            }
            is_float = true;
        }

        if is_float {
            // Out-of-range exponents parse to infinity rather than failing
            self.reader
                .lexeme()
                .parse::<f64>()
                .map(TokenKind::FloatLiteral)
                .map_err(|_| self.malformed(start))
        } else {
            self.reader
                .lexeme()
                .parse::<i32>()
                .map(TokenKind::IntLiteral)
                .map_err(|_| self.overflow(start))
        }
    }

    /// Scan `$hex`, `&octal` or `%binary`; the prefix is already consumed
    fn scan_radix_number(&mut self, radix: u32, start: Position) -> LexerResult<TokenKind> {
        if self.consume_digits(radix)? == 0 {
            return Err(self.malformed(start));
        }
        let digits = &self.reader.lexeme()[1..];
        u32::from_str_radix(digits, radix)
            // Full 32-bit patterns wrap to negative values
            .map(|value| TokenKind::IntLiteral(value as i32))
            .map_err(|_| self.overflow(start))
    }

    /// Scan identifier or keyword
    fn scan_identifier_or_keyword(&mut self) -> LexerResult<TokenKind> {
        while matches!(self.reader.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.reader.consume()?;
        }
        let text = self.reader.lexeme();
        Ok(lookup_keyword(text)
            .map(TokenKind::Keyword)
            .unwrap_or_else(|| TokenKind::Identifier(text.to_string())))
    }

    /// Scan a single-quoted string; the opening quote is already consumed
    fn scan_string(&mut self, start: Position) -> LexerResult<TokenKind> {
        loop {
            match self.reader.peek() {
                None | Some('\n') => {
                    return Err(LexerError::UnterminatedString { position: start });
                }
                Some('\'') => {
                    self.reader.consume()?;
                    break;
                }
                Some(_) => {
                    self.reader.consume()?;
                }
            }
        }
        Ok(TokenKind::StringLiteral(self.reader.lexeme().to_string()))
    }

    /// Longest match against the punctuation table, trying one character
    /// and then one more from lookahead
    fn scan_operator_or_separator(&mut self) -> LexerResult<TokenKind> {
        let mut kind = lookup_punctuation(self.reader.lexeme())
            .map(Punctuation::into_kind)
            .unwrap_or(TokenKind::Unrecognized);

        if let Some(next) = self.reader.peek() {
            let mut candidate = self.reader.lexeme().to_string();
            candidate.push(next);
            if let Some(punctuation) = lookup_punctuation(&candidate) {
                self.reader.consume()?;
                kind = punctuation.into_kind();
            }
        }

        Ok(kind)
    }
}

fn radix_of_prefix(c: char) -> Option<u32> {
    match c {
        '$' => Some(16),
        '&' => Some(8),
        '%' => Some(2),
        _ => None,
    }
}

impl<I: Iterator<Item = char>> TokenStream for Scanner<I> {
    fn next_token(&mut self) -> LexerResult<Token> {
        Scanner::next_token(self)
    }
}

/// Yields every token before Eof; stops after the first error
impl<I: Iterator<Item = char>> Iterator for Scanner<I> {
    type Item = LexerResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match Scanner::next_token(self) {
            Ok(token) if token.is_eof() => {
                self.finished = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Scan a whole source text, Eof token included
pub fn tokenize(source: &str) -> LexerResult<Vec<Token>> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token()?;
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
