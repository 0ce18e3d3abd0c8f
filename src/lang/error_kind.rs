use super::command::Segment;

/// What went wrong with a single VM command.
///
/// Shared by the parser and the translator; the located wrappers
/// (`ParserError`, `TranslateError`) add the line and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// `push`/`pop` names a segment that does not exist.
    UnknownSegment(String),

    /// The first token is neither a command keyword nor an arithmetic operator.
    UnknownOperator(String),

    /// An index or count is not a non-negative integer in range.
    MalformedNumber(String),

    /// The command has the wrong number of operands.
    ArityMismatch {
        command: String,
        expected: usize,
        found: usize,
    },

    /// The index is outside the segment's addressable range.
    IndexOutOfRange {
        segment: Segment,
        index: u16,
        max: u16,
    },

    /// `pop constant`: there is no location to store into.
    InvalidPop(Segment),

    /// A label or function name that is not a valid assembler symbol.
    InvalidName(String),

    /// The symbol is already defined earlier in the output.
    DuplicateLabel(String),

    /// The name collides with the labels the translator generates itself.
    ReservedLabel(String),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::UnknownSegment(name) => write!(f, "unknown segment '{}'", name),
            ErrorKind::UnknownOperator(word) => {
                write!(f, "unknown command or operator '{}'", word)
            }
            ErrorKind::MalformedNumber(token) => {
                write!(f, "malformed numeric operand '{}'", token)
            }
            ErrorKind::ArityMismatch {
                command,
                expected,
                found,
            } => write!(
                f,
                "'{}' takes {} operand{}, found {}",
                command,
                expected,
                if *expected == 1 { "" } else { "s" },
                found
            ),
            ErrorKind::IndexOutOfRange {
                segment,
                index,
                max,
            } => write!(
                f,
                "index {} out of range for segment '{}' (max {})",
                index, segment, max
            ),
            ErrorKind::InvalidPop(segment) => write!(f, "cannot pop into segment '{}'", segment),
            ErrorKind::InvalidName(name) => write!(f, "invalid label or function name '{}'", name),
            ErrorKind::DuplicateLabel(symbol) => write!(f, "label '{}' is already defined", symbol),
            ErrorKind::ReservedLabel(symbol) => {
                write!(f, "label '{}' is reserved for generated code", symbol)
            }
        }
    }
}
