use std::io::{self, Write};

use cursor::Line;
use errors::{Diagnostic, Diagnostics};
use parser::{Expr, LiteralValue, Parser, Stmt};
use scanner::{Scanner, TokenType};

mod value;
pub use value::Value;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum RuntimeErrorType {
    #[error("Operand must be a number.")]
    OperandMustBeNumber,
    #[error("Operands must be numbers.")]
    OperandsMustBeNumbers,
    #[error("Operands must be two numbers or two strings.")]
    OperandsMustBeNumbersOrStrings,
    #[error("Division by zero.")]
    DivisionByZero,
}

/// An operator whose operands violated its preconditions, attributed to the operator's line.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error: {error}")]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub line: Line,
}

#[derive(thiserror::Error, Debug)]
pub enum InterpretError {
    #[error("{0}")]
    CompileError(Diagnostics),
    #[error(transparent)]
    RuntimeError(#[from] RuntimeError),
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl From<Diagnostics> for InterpretError {
    fn from(errors: Diagnostics) -> Self {
        Self::CompileError(errors)
    }
}

/// Scans and parses `source`. Returns every lexical and syntax error if there were any.
pub fn parse_source(source: &str) -> Result<Vec<Stmt<'_>>, Diagnostics> {
    let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
    let (stmts, parse_errors) = Parser::new(tokens).parse();

    let errors: Diagnostics =
        scan_errors.into_iter().map(Diagnostic::from).chain(parse_errors).collect();

    if errors.has_errors() {
        Err(errors)
    } else {
        Ok(stmts)
    }
}

/// Runs the whole pipeline on `source`, writing `print` output to `out`. Nothing is
/// evaluated if scanning or parsing failed.
pub fn run_source(source: &str, out: &mut impl Write) -> Result<(), InterpretError> {
    let stmts = parse_source(source)?;
    Interpreter::new(out).interpret(&stmts)
}

/// Tree-walking evaluator. `print` statements write one line each to `out`.
#[derive(Debug)]
pub struct Interpreter<W> {
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Executes `stmts` in order. The first error aborts the remaining statements; output of
    /// statements executed before it is kept.
    pub fn interpret(&mut self, stmts: &[Stmt]) -> Result<(), InterpretError> {
        for stmt in stmts {
            self.execute(stmt)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), InterpretError> {
        log::trace!("Executing {stmt}");
        match stmt {
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.out, "{value}")?;
            }
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
            }
        }
        Ok(())
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(LiteralValue::Number(n)) => Ok((*n).into()),
            Expr::Literal(LiteralValue::Str(s)) => Ok((*s).into()),
            Expr::Literal(LiteralValue::Boolean(b)) => Ok((*b).into()),
            Expr::Literal(LiteralValue::Nil) => Ok(Value::Nil),

            Expr::Grouping(expr) => self.evaluate(expr),

            Expr::Unary { operator, right } => {
                let right = self.evaluate(right)?;
                let result = match operator.ty {
                    TokenType::Minus => -right,
                    TokenType::Bang => Ok(!right),
                    ty => unreachable!("Parser produced unary operator {ty}"),
                };
                result.map_err(|error| RuntimeError { error, line: operator.line })
            }

            Expr::Binary { left, operator, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                let result = match operator.ty {
                    TokenType::Plus => left + right,
                    TokenType::Minus => left - right,
                    TokenType::Star => left * right,
                    TokenType::Slash => left / right,

                    TokenType::Greater => left.greater(right),
                    TokenType::GreaterEqual => left.greater_equal(right),
                    TokenType::Less => left.less(right),
                    TokenType::LessEqual => left.less_equal(right),

                    TokenType::EqualEqual => Ok((left == right).into()),
                    TokenType::BangEqual => Ok((left != right).into()),

                    ty => unreachable!("Parser produced binary operator {ty}"),
                };
                result.map_err(|error| RuntimeError { error, line: operator.line })
            }
        }
    }
}
