//! Buffered character source
//!
//! Wraps a forward-only character stream with one character of peek, a
//! pushback stack, position tracking and the text of the lexeme being built.

use std::iter::Peekable;
use std::str::Chars;

use errors::{LexerError, LexerResult};
use tokens::Position;

pub struct BufferedReader<I: Iterator<Item = char>> {
    chars: Peekable<I>,
    /// Characters handed back by `push_back`, most recent last
    pushed_back: Vec<char>,
    position: Position,
    lexeme: String,
}

impl<'a> BufferedReader<Chars<'a>> {
    /// Read from an in-memory source
    pub fn from_source(source: &'a str) -> Self {
        Self::new(source.chars())
    }
}

impl<I: Iterator<Item = char>> BufferedReader<I> {
    pub fn new(chars: I) -> Self {
        Self {
            chars: chars.peekable(),
            pushed_back: Vec::new(),
            position: Position::default(),
            lexeme: String::new(),
        }
    }

    /// Current cursor position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Text accumulated since the last `reset_lexeme`
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn at_end(&mut self) -> bool {
        self.pushed_back.is_empty() && self.chars.peek().is_none()
    }

    /// Next character, without consuming it
    pub fn peek(&mut self) -> Option<char> {
        match self.pushed_back.last() {
            Some(&c) => Some(c),
            None => self.chars.peek().copied(),
        }
    }

    /// Take the next character, advancing the position and the lexeme
    pub fn consume(&mut self) -> LexerResult<char> {
        let c = match self.pushed_back.pop() {
            Some(c) => c,
            None => self.chars.next().ok_or(LexerError::UnexpectedEndOfInput {
                position: self.position,
            })?,
        };
        match c {
            '\n' => self.position.add_line(),
            '\r' => {}
            _ => self.position.add_column(),
        }
        self.lexeme.push(c);
        Ok(c)
    }

    /// Consume the next character only if it equals `expected`
    pub fn consume_if(&mut self, expected: char) -> LexerResult<bool> {
        if self.peek() == Some(expected) {
            self.consume()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Un-consume the last character of the current lexeme.
    ///
    /// The column moves back by one; a pushed-back newline does not restore
    /// the previous line. Returns `None` when the lexeme is empty.
    pub fn push_back(&mut self) -> Option<char> {
        let c = self.lexeme.pop()?;
        if c != '\r' {
            self.position.retreat_column();
        }
        self.pushed_back.push(c);
        Some(c)
    }

    /// Start a new lexeme holding `seed`
    pub fn reset_lexeme(&mut self, seed: &str) {
        self.lexeme.clear();
        self.lexeme.push_str(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_tracks_position() {
        let mut reader = BufferedReader::from_source("ab\ncd");
        assert_eq!(reader.position(), Position::new(1, 0));
        assert_eq!(reader.consume().unwrap(), 'a');
        assert_eq!(reader.position(), Position::new(1, 1));
        reader.consume().unwrap();
        reader.consume().unwrap();
        assert_eq!(reader.position(), Position::new(2, 0));
        reader.consume().unwrap();
        assert_eq!(reader.position(), Position::new(2, 1));
        assert_eq!(reader.lexeme(), "ab\nc");
    }

    #[test]
    fn test_carriage_return_keeps_column() {
        let mut reader = BufferedReader::from_source("a\r\nb");
        reader.consume().unwrap();
        reader.consume().unwrap();
        assert_eq!(reader.position(), Position::new(1, 1));
        reader.consume().unwrap();
        reader.consume().unwrap();
        assert_eq!(reader.position(), Position::new(2, 1));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut reader = BufferedReader::from_source("xy");
        assert_eq!(reader.peek(), Some('x'));
        assert_eq!(reader.peek(), Some('x'));
        assert_eq!(reader.position(), Position::new(1, 0));
        assert_eq!(reader.lexeme(), "");
    }

    #[test]
    fn test_consume_at_end_fails() {
        let mut reader = BufferedReader::from_source("z");
        reader.consume().unwrap();
        assert!(reader.at_end());
        assert_eq!(reader.peek(), None);
        assert_eq!(
            reader.consume(),
            Err(LexerError::UnexpectedEndOfInput {
                position: Position::new(1, 1)
            })
        );
    }

    #[test]
    fn test_push_back_restores_character_and_column() {
        let mut reader = BufferedReader::from_source("1.");
        reader.consume().unwrap();
        reader.consume().unwrap();
        assert_eq!(reader.push_back(), Some('.'));
        assert_eq!(reader.lexeme(), "1");
        assert_eq!(reader.position(), Position::new(1, 1));
        assert!(!reader.at_end());
        assert_eq!(reader.peek(), Some('.'));
        assert_eq!(reader.consume().unwrap(), '.');
        assert_eq!(reader.position(), Position::new(1, 2));
        assert!(reader.at_end());
    }

    #[test]
    fn test_push_back_of_newline_keeps_line() {
        let mut reader = BufferedReader::from_source("a\nb");
        reader.consume().unwrap();
        reader.consume().unwrap();
        assert_eq!(reader.push_back(), Some('\n'));
        // Line counter is not rewound.
        assert_eq!(reader.position(), Position::new(2, 0));
    }

    #[test]
    fn test_push_back_with_empty_lexeme() {
        let mut reader = BufferedReader::from_source("ab");
        reader.consume().unwrap();
        reader.reset_lexeme("");
        assert_eq!(reader.push_back(), None);
        assert_eq!(reader.peek(), Some('b'));
    }

    #[test]
    fn test_consume_if() {
        let mut reader = BufferedReader::from_source(":=");
        reader.consume().unwrap();
        assert!(!reader.consume_if('>').unwrap());
        assert!(reader.consume_if('=').unwrap());
        assert_eq!(reader.lexeme(), ":=");
    }

    #[test]
    fn test_reset_lexeme_seeds_buffer() {
        let mut reader = BufferedReader::from_source("  x");
        reader.consume().unwrap();
        reader.consume().unwrap();
        let c = reader.consume().unwrap();
        reader.reset_lexeme(c.encode_utf8(&mut [0; 4]));
        assert_eq!(reader.lexeme(), "x");
    }
}
