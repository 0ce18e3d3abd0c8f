use crate::lang::ErrorKind;

/// A command that could not be parsed, with its source location.
///
/// `line` and `col` are 1-based positions coming from the lexer spans. `col`
/// points at the offending token, or at the command keyword when an operand
/// is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    pub kind: ErrorKind,
    pub line: usize,
    pub col: usize,
    /// The offending source line, comment stripped.
    pub text: String,
}

impl std::fmt::Display for ParserError {
    /// Formats as `line:col: message` for CLI-friendly diagnostics.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}\n  | {}", self.line, self.col, self.kind, self.text)
    }
}

impl std::error::Error for ParserError {}
