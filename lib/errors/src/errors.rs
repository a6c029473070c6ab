use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

use cursor::Line;
use itertools::Itertools;

/// A static (lexical or syntax) error, reported as `[line N] Error<at>: <message>`.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("[line {line}] Error{at}: {message}")]
pub struct Diagnostic {
    pub line: Line,
    /// Location text such as ` at ';'` or ` at end`, empty if there is none.
    pub at: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: Line, message: impl ToString) -> Self {
        Self { line, at: String::new(), message: message.to_string() }
    }

    pub fn with_at(line: Line, at: impl Display, message: impl ToString) -> Self {
        Self { line, at: format!(" at {at}"), message: message.to_string() }
    }
}

#[derive(thiserror::Error, Debug, Default, Clone, PartialEq)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl Diagnostics {
    pub fn has_errors(&self) -> bool {
        !self.0.is_empty()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(d: Diagnostic) -> Self {
        Self(vec![d])
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Deref for Diagnostics {
    type Target = Vec<Diagnostic>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Diagnostics {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}
