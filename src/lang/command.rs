use serde::{Deserialize, Serialize};

/// A memory segment addressable by `push` and `pop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    Constant,
    Local,
    Argument,
    This,
    That,
    Temp,
    Pointer,
    Static,
}

impl Segment {
    pub const ALL: [Segment; 8] = [
        Segment::Constant,
        Segment::Local,
        Segment::Argument,
        Segment::This,
        Segment::That,
        Segment::Temp,
        Segment::Pointer,
        Segment::Static,
    ];

    /// Looks up a segment by its VM keyword.
    pub fn from_keyword(word: &str) -> Option<Segment> {
        Segment::ALL.into_iter().find(|s| s.keyword() == word)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Local => "local",
            Segment::Argument => "argument",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Temp => "temp",
            Segment::Pointer => "pointer",
            Segment::Static => "static",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Arithmetic, logical and relational operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithOp {
    // ───────────────────────────── Binary ───────────────────────────────
    /// Stack effect: `( x y -- x+y )`
    Add,
    /// Stack effect: `( x y -- x-y )`
    Sub,
    /// Stack effect: `( x y -- x&y )`
    And,
    /// Stack effect: `( x y -- x|y )`
    Or,

    // ───────────────────────────── Unary ────────────────────────────────
    /// Stack effect: `( x -- -x )`
    Neg,
    /// Stack effect: `( x -- !x )`
    Not,

    // ─────────────────────────── Relational ─────────────────────────────
    /// Stack effect: `( x y -- x==y )`, true is -1, false is 0.
    Eq,
    /// Stack effect: `( x y -- x>y )`
    Gt,
    /// Stack effect: `( x y -- x<y )`
    Lt,
}

impl ArithOp {
    pub const ALL: [ArithOp; 9] = [
        ArithOp::Add,
        ArithOp::Sub,
        ArithOp::Neg,
        ArithOp::Eq,
        ArithOp::Gt,
        ArithOp::Lt,
        ArithOp::And,
        ArithOp::Or,
        ArithOp::Not,
    ];

    pub fn from_keyword(word: &str) -> Option<ArithOp> {
        ArithOp::ALL.into_iter().find(|op| op.keyword() == word)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::And => "and",
            ArithOp::Or => "or",
            ArithOp::Neg => "neg",
            ArithOp::Not => "not",
            ArithOp::Eq => "eq",
            ArithOp::Gt => "gt",
            ArithOp::Lt => "lt",
        }
    }
}

impl std::fmt::Display for ArithOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Returns true if `name` can be used as an assembler symbol: a non-empty
/// run of letters, digits, `_`, `.`, `$` and `:` not starting with a digit.
pub fn is_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if !first.is_ascii_digit() && is_symbol_char(first) => {
            chars.all(is_symbol_char)
        }
        _ => false,
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':')
}

/// One VM command.
///
/// Commands are produced by the parser (or decoded from a `.vmb` file) and
/// consumed exactly once by the translator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    // ─────────────────────────── Memory access ──────────────────────────
    /// Stack effect: `( -- x )`
    Push(Segment, u16),

    /// Stack effect: `( x -- )`
    Pop(Segment, u16),

    /// See `ArithOp` for the individual stack effects.
    Arithmetic(ArithOp),

    // ──────────────────────────── Control flow ──────────────────────────
    /// Defines a jump target at this position.
    Label(String),

    /// Unconditional jump.
    Goto(String),

    /// Stack effect: `( cond -- )`, jumps when `cond` is non-zero.
    IfGoto(String),

    // ───────────────────────────── Functions ────────────────────────────
    /// Function entry with the given number of zero-initialized locals.
    Function(String, u16),

    /// Stack effect: `( arg1 .. argN -- result )`
    Call(String, u16),

    /// Returns the top of stack to the caller.
    Return,
}

impl std::fmt::Display for Command {
    /// Formats the command in VM source syntax.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Push(segment, index) => write!(f, "push {} {}", segment, index),
            Command::Pop(segment, index) => write!(f, "pop {} {}", segment, index),
            Command::Arithmetic(op) => write!(f, "{}", op),
            Command::Label(name) => write!(f, "label {}", name),
            Command::Goto(name) => write!(f, "goto {}", name),
            Command::IfGoto(name) => write!(f, "if-goto {}", name),
            Command::Function(name, n_locals) => write!(f, "function {} {}", name, n_locals),
            Command::Call(name, n_args) => write!(f, "call {} {}", name, n_args),
            Command::Return => write!(f, "return"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_keywords() {
        for segment in Segment::ALL {
            assert_eq!(Segment::from_keyword(segment.keyword()), Some(segment));
        }
        assert_eq!(Segment::from_keyword("heap"), None);
        assert_eq!(Segment::from_keyword("LOCAL"), None);
    }

    #[test]
    fn test_arith_keywords() {
        for op in ArithOp::ALL {
            assert_eq!(ArithOp::from_keyword(op.keyword()), Some(op));
        }
        assert_eq!(ArithOp::from_keyword("mul"), None);
    }

    #[test]
    fn test_symbol_names() {
        assert!(is_symbol("LOOP"));
        assert!(is_symbol("Main.fib"));
        assert!(is_symbol("IF_TRUE0"));
        assert!(is_symbol("Sys.init$WHILE_EXP0"));
        assert!(is_symbol("a:b"));
        assert!(!is_symbol(""));
        assert!(!is_symbol("3"));
        assert!(!is_symbol("1abc"));
        assert!(!is_symbol("A-B"));
        assert!(!is_symbol("x+1"));
    }

    #[test]
    fn test_display_is_vm_syntax() {
        assert_eq!(
            Command::Push(Segment::Constant, 7).to_string(),
            "push constant 7"
        );
        assert_eq!(Command::IfGoto("LOOP".into()).to_string(), "if-goto LOOP");
        assert_eq!(
            Command::Function("Main.main".into(), 2).to_string(),
            "function Main.main 2"
        );
        assert_eq!(Command::Arithmetic(ArithOp::Not).to_string(), "not");
        assert_eq!(Command::Return.to_string(), "return");
    }
}
