mod expr;
mod stmt;

use cursor::Line;
use errors::{Diagnostic, Diagnostics};
pub use expr::{Expr, LiteralValue};
use scanner::{Literal, Token, TokenType};
pub use stmt::Stmt;

use TokenType::*;

pub type Result<T> = std::result::Result<T, ParserError>;

/// Upper bound on parenthesis and unary operator nesting inside one expression.
pub const MAX_NESTING: usize = 128;
/// Upper bound on operator and grouping nodes in the tree of one statement.
pub const MAX_NODES: usize = 1024;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error at {at}: {error}")]
pub struct ParserError {
    pub error: ParserErrorType,
    pub line: Line,
    pub at: String,
}

impl From<ParserError> for Diagnostic {
    fn from(e: ParserError) -> Self {
        Diagnostic::with_at(e.line, e.at, e.error)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ParserErrorType {
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Expect ')' after expression.")]
    ExpectedRightParen,
    #[error("Expect ';' after value.")]
    ExpectedSemicolonAfterValue,
    #[error("Expect ';' after expression.")]
    ExpectedSemicolonAfterExpression,
    #[error("Expression nested too deeply.")]
    TooMuchNesting,
    #[error("Expression too long.")]
    ExpressionTooLong,
}

impl ParserErrorType {
    fn at(self, token: &Token) -> ParserError {
        ParserError {
            error: self,
            line: token.line(),
            at: match token.ty() {
                Eof => "end".to_string(),
                _ => format!("'{}'", token.lexeme()),
            },
        }
    }
}

/// Recursive descent parser over a scanned token sequence.
#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    current: usize,
    nesting: usize,
    nodes: usize,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokens: Vec<Token<'a>>) -> Self {
        if tokens.last().map(Token::ty) != Some(Eof) {
            let line = tokens.last().map_or(Line(1), Token::line);
            tokens.push(Token::new(Eof, "", line));
        }
        Self { tokens, current: 0, nesting: 0, nodes: 0 }
    }

    /// Parses the whole program. Statements containing a syntax error are left out of the
    /// result; the parser resynchronizes at the next statement boundary and keeps going.
    pub fn parse(mut self) -> (Vec<Stmt<'a>>, Diagnostics) {
        let mut errors = Diagnostics::default();
        let mut stmts = Vec::new();

        while !self.is_at_end() {
            match self.statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(e) => {
                    log::trace!("Hit error: {:?}, syncing...", e);
                    errors.push(e.into());
                    self.synchronize();
                }
            }
        }

        (stmts, errors)
    }

    fn statement(&mut self) -> Result<Stmt<'a>> {
        self.nesting = 0;
        self.nodes = 0;

        if self.consume(Print).is_some() {
            return self.print_statement();
        }

        self.expression_statement()
    }

    fn print_statement(&mut self) -> Result<Stmt<'a>> {
        let value = self.expression()?;
        self.consume_or_error(Semicolon, ParserErrorType::ExpectedSemicolonAfterValue)?;
        Ok(Stmt::Print(value))
    }

    fn expression_statement(&mut self) -> Result<Stmt<'a>> {
        let value = self.expression()?;
        self.consume_or_error(Semicolon, ParserErrorType::ExpectedSemicolonAfterExpression)?;
        Ok(Stmt::Expression(value))
    }

    fn expression(&mut self) -> Result<Expr<'a>> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.comparison()?;

        while let BangEqual | EqualEqual = self.peek() {
            let operator = self.advance();
            self.count_node(&operator)?;
            let right = Box::new(self.comparison()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.term()?;

        while let Greater | GreaterEqual | Less | LessEqual = self.peek() {
            let operator = self.advance();
            self.count_node(&operator)?;
            let right = Box::new(self.term()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.factor()?;

        while let Plus | Minus = self.peek() {
            let operator = self.advance();
            self.count_node(&operator)?;
            let right = Box::new(self.factor()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.unary()?;

        while let Star | Slash = self.peek() {
            let operator = self.advance();
            self.count_node(&operator)?;
            let right = Box::new(self.unary()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr<'a>> {
        if let Bang | Minus = self.peek() {
            let operator = self.advance();
            self.count_node(&operator)?;
            let right = Box::new(self.nested(&operator, Self::unary)?);
            return Ok(Expr::Unary { operator, right });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr<'a>> {
        let value = match (self.peek(), self.peek_token().literal) {
            (False, _) => LiteralValue::Boolean(false),
            (True, _) => LiteralValue::Boolean(true),
            (Nil, _) => LiteralValue::Nil,
            (Number, Some(Literal::Number(n))) => LiteralValue::Number(n),
            (Str, Some(Literal::Str(s))) => LiteralValue::Str(s),
            (LeftParen, _) => {
                let paren = self.advance();
                self.count_node(&paren)?;
                let expr = self.nested(&paren, Self::expression)?;
                self.consume_or_error(RightParen, ParserErrorType::ExpectedRightParen)?;
                return Ok(Expr::Grouping(Box::new(expr)));
            }
            // The offending token is left for synchronize() to skip
            _ => return Err(ParserErrorType::ExpectedExpression.at(self.peek_token())),
        };

        self.advance();
        Ok(Expr::Literal(value))
    }

    /// Discards tokens until the start of the next statement.
    fn synchronize(&mut self) {
        let mut skipped = self.advance();

        while !self.is_at_end() {
            log::trace!("Syncing... {:?}", self.peek_token());
            if skipped.ty() == Semicolon || self.peek().starts_statement() {
                return;
            }
            skipped = self.advance();
        }
    }
}

// Helpers
impl<'a> Parser<'a> {
    fn count_node(&mut self, token: &Token) -> Result<()> {
        self.nodes += 1;
        if self.nodes > MAX_NODES {
            return Err(ParserErrorType::ExpressionTooLong.at(token));
        }
        Ok(())
    }

    fn nested<T>(&mut self, token: &Token, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.nesting == MAX_NESTING {
            return Err(ParserErrorType::TooMuchNesting.at(token));
        }
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    fn consume(&mut self, ty: TokenType) -> Option<Token<'a>> {
        (self.peek() == ty).then(|| self.advance())
    }

    fn consume_or_error(&mut self, ty: TokenType, error: ParserErrorType) -> Result<Token<'a>> {
        match self.consume(ty) {
            Some(token) => Ok(token),
            None => Err(error.at(self.peek_token())),
        }
    }

    fn peek_token(&self) -> &Token<'a> {
        // new() guarantees a trailing Eof, and advance() never moves past it
        &self.tokens[self.current]
    }

    fn peek(&self) -> TokenType {
        self.peek_token().ty()
    }

    fn advance(&mut self) -> Token<'a> {
        let token = self.peek_token().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.peek() == Eof
    }
}
