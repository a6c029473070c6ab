use std::fmt::Display;

use cursor::Line;

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub ty: TokenType,
    pub lexeme: &'a str,
    pub literal: Option<Literal<'a>>,
    pub line: Line,
}

impl<'a> Token<'a> {
    pub fn new(ty: TokenType, lexeme: &'a str, line: Line) -> Self {
        Self { ty, lexeme, literal: None, line }
    }

    pub fn with_literal(ty: TokenType, lexeme: &'a str, literal: Literal<'a>, line: Line) -> Self {
        Self { ty, lexeme, literal: Some(literal), line }
    }

    pub fn ty(&self) -> TokenType {
        self.ty
    }

    pub fn lexeme(&self) -> &'a str {
        self.lexeme
    }

    pub fn line(&self) -> Line {
        self.line
    }
}

// Token dump format: `<KIND> <lexeme> <literal-or-empty>`
impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ", self.ty, self.lexeme)?;
        match &self.literal {
            Some(literal) => write!(f, "{literal}"),
            None => Ok(()),
        }
    }
}

/// Semantic value of a string or number token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Str(&'a str),
    Number(f64),
}

impl Display for Literal<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "{s}"),
            Literal::Number(n) => write!(f, "{n:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    #[strum(serialize = "STRING")]
    Str,
    Number,

    // Keywords.
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

impl TokenType {
    pub fn keyword(ident: &str) -> Option<Self> {
        use TokenType::*;
        Some(match ident {
            "and" => And,
            "class" => Class,
            "else" => Else,
            "false" => False,
            "for" => For,
            "fun" => Fun,
            "if" => If,
            "nil" => Nil,
            "or" => Or,
            "print" => Print,
            "return" => Return,
            "super" => Super,
            "this" => This,
            "true" => True,
            "var" => Var,
            "while" => While,
            _ => return None,
        })
    }

    /// Whether a token of this type begins a new statement, used for error recovery.
    pub fn starts_statement(self) -> bool {
        use TokenType::*;
        matches!(self, Class | Fun | Var | For | If | While | Print | Return)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dump_format() {
        assert_eq!(Token::new(TokenType::LeftParen, "(", Line(1)).to_string(), "LEFT_PAREN ( ");
        assert_eq!(Token::new(TokenType::BangEqual, "!=", Line(1)).to_string(), "BANG_EQUAL != ");
        assert_eq!(Token::new(TokenType::Eof, "", Line(2)).to_string(), "EOF  ");
        assert_eq!(
            Token::with_literal(TokenType::Number, "12", Literal::Number(12.0), Line(1))
                .to_string(),
            "NUMBER 12 12.0"
        );
        assert_eq!(
            Token::with_literal(TokenType::Str, "\"hi\"", Literal::Str("hi"), Line(1))
                .to_string(),
            "STRING \"hi\" hi"
        );
    }

    #[test]
    fn keywords() {
        assert_eq!(TokenType::keyword("print"), Some(TokenType::Print));
        assert_eq!(TokenType::keyword("nil"), Some(TokenType::Nil));
        assert_eq!(TokenType::keyword("printer"), None);
        assert_eq!(TokenType::keyword("Print"), None);
    }
}
