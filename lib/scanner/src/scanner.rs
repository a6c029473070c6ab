use cursor::{Cursor, Line};
use errors::Diagnostic;

pub mod token;
pub use token::{Literal, Token, TokenType};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ScanErrorType {
    #[error("Unexpected character.")]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error: {error}")]
pub struct ScanError {
    pub error: ScanErrorType,
    pub line: Line,
}

impl From<ScanError> for Diagnostic {
    fn from(e: ScanError) -> Self {
        Diagnostic::new(e.line, e.error)
    }
}

/// Turns source text into tokens. Scanning never stops at the first error, so one pass
/// reports every lexical problem in the source.
#[derive(Debug)]
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token<'a>>,
    errors: Vec<ScanError>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), tokens: Vec::new(), errors: Vec::new() }
    }

    /// Returns every token, always terminated by exactly one [`TokenType::Eof`], and the
    /// errors hit along the way.
    pub fn scan_tokens(mut self) -> (Vec<Token<'a>>, Vec<ScanError>) {
        while !self.cursor.is_at_end() {
            self.scan_token();
        }

        let eof = self.cursor.clone();
        self.tokens.push(Token::new(TokenType::Eof, eof.slice_until(&eof), eof.line()));

        log::debug!("Scanned {} tokens, {} errors", self.tokens.len(), self.errors.len());
        (self.tokens, self.errors)
    }

    fn scan_token(&mut self) {
        use TokenType::*;

        let start = self.cursor.clone();
        let Some(c) = self.cursor.next() else {
            return;
        };

        let ty = match c {
            '(' => LeftParen,
            ')' => RightParen,
            '{' => LeftBrace,
            '}' => RightBrace,
            ',' => Comma,
            '.' => Dot,
            '-' => Minus,
            '+' => Plus,
            ';' => Semicolon,
            '*' => Star,

            '!' => self.either('=', BangEqual, Bang),
            '=' => self.either('=', EqualEqual, Equal),
            '<' => self.either('=', LessEqual, Less),
            '>' => self.either('=', GreaterEqual, Greater),

            '/' if self.cursor.next_if_eq('/') => {
                self.cursor.advance_while(|c| c != '\n');
                return;
            }
            '/' => Slash,

            ' ' | '\r' | '\t' | '\n' => return,

            '"' => return self.string(start),
            d if d.is_ascii_digit() => return self.number(start),
            a if is_alpha(a) => return self.identifier(start),

            c => {
                log::trace!("Unexpected character {c:?} on line {}", start.line());
                self.errors.push(ScanError {
                    error: ScanErrorType::UnexpectedCharacter(c),
                    line: start.line(),
                });
                return;
            }
        };

        self.add_token(ty, &start);
    }

    fn either(&mut self, second: char, matched: TokenType, single: TokenType) -> TokenType {
        if self.cursor.next_if_eq(second) {
            matched
        } else {
            single
        }
    }

    fn add_token(&mut self, ty: TokenType, start: &Cursor<'a>) {
        let lexeme = start.slice_until(&self.cursor);
        self.tokens.push(Token::new(ty, lexeme, start.line()));
    }

    fn string(&mut self, start: Cursor<'a>) {
        self.cursor.advance_while(|c| c != '"');

        if !self.cursor.next_if_eq('"') {
            self.errors
                .push(ScanError { error: ScanErrorType::UnterminatedString, line: start.line() });
            return;
        }

        let lexeme = start.slice_until(&self.cursor);
        let contents = &lexeme[1..lexeme.len() - 1];
        self.tokens.push(Token::with_literal(
            TokenType::Str,
            lexeme,
            Literal::Str(contents),
            start.line(),
        ));
    }

    fn number(&mut self, start: Cursor<'a>) {
        self.cursor.advance_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.next();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        let lexeme = start.slice_until(&self.cursor);
        let value = lexeme.parse::<f64>().unwrap();
        self.tokens.push(Token::with_literal(
            TokenType::Number,
            lexeme,
            Literal::Number(value),
            start.line(),
        ));
    }

    fn identifier(&mut self, start: Cursor<'a>) {
        self.cursor.advance_while(is_alphanumeric);

        let lexeme = start.slice_until(&self.cursor);
        let ty = TokenType::keyword(lexeme).unwrap_or(TokenType::Identifier);
        self.add_token(ty, &start);
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}
