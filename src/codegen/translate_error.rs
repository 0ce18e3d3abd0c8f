use crate::lang::{ErrorKind, Located};

/// A command the translator refused, with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateError {
    pub kind: ErrorKind,
    /// Name of the unit being translated.
    pub unit: String,
    pub line: usize,
    pub text: String,
}

impl TranslateError {
    pub fn at(located: &Located, unit: &str, kind: ErrorKind) -> Self {
        TranslateError {
            kind,
            unit: unit.to_string(),
            line: located.line,
            text: if located.text.is_empty() {
                located.command.to_string()
            } else {
                located.text.clone()
            },
        }
    }
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "translate error: {}:{}: {}\n  | {}",
            self.unit, self.line, self.kind, self.text
        )
    }
}

impl std::error::Error for TranslateError {}
