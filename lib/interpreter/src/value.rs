use std::ops::{Add, Div, Mul, Neg, Not, Sub};

use crate::RuntimeErrorType;

/// A runtime value. Integral numbers display without a fractional part (`4`, not `4.0`).
#[derive(Debug, Clone, PartialEq, derive_more::From, derive_more::Display)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    #[display(fmt = "nil")]
    Nil,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RuntimeErrorType>;

impl Value {
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    fn numbers(self, rhs: Value) -> Result<(f64, f64)> {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok((a, b)),
            _ => Err(RuntimeErrorType::OperandsMustBeNumbers),
        }
    }

    pub fn less(self, rhs: Value) -> Result<Value> {
        self.numbers(rhs).map(|(a, b)| (a < b).into())
    }

    pub fn less_equal(self, rhs: Value) -> Result<Value> {
        self.numbers(rhs).map(|(a, b)| (a <= b).into())
    }

    pub fn greater(self, rhs: Value) -> Result<Value> {
        self.numbers(rhs).map(|(a, b)| (a > b).into())
    }

    pub fn greater_equal(self, rhs: Value) -> Result<Value> {
        self.numbers(rhs).map(|(a, b)| (a >= b).into())
    }
}

impl Neg for Value {
    type Output = Result<Value>;

    fn neg(self) -> Self::Output {
        match self {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(RuntimeErrorType::OperandMustBeNumber),
        }
    }
}

impl Not for Value {
    type Output = Value;

    fn not(self) -> Self::Output {
        Value::Bool(!self.is_truthy())
    }
}

impl Add for Value {
    type Output = Result<Value>;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
            (Value::Str(a), b @ Value::Number(_)) => Ok(Value::Str(format!("{a}{b}"))),
            (a @ Value::Number(_), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
            _ => Err(RuntimeErrorType::OperandsMustBeNumbersOrStrings),
        }
    }
}

impl Sub for Value {
    type Output = Result<Value>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.numbers(rhs).map(|(a, b)| Value::Number(a - b))
    }
}

impl Mul for Value {
    type Output = Result<Value>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.numbers(rhs).map(|(a, b)| Value::Number(a * b))
    }
}

impl Div for Value {
    type Output = Result<Value>;

    fn div(self, rhs: Self) -> Self::Output {
        match self.numbers(rhs)? {
            // Also catches -0.0
            (_, b) if b == 0.0 => Err(RuntimeErrorType::DivisionByZero),
            (a, b) => Ok(Value::Number(a / b)),
        }
    }
}
