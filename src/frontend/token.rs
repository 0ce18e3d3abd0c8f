use crate::lang::{ArithOp, Segment};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Command keywords
    Push,
    Pop,
    Label,
    Goto,
    IfGoto,
    Function,
    Call,
    Return,

    // Operators and segment names
    Op(ArithOp),
    Segment(Segment),

    // Operands
    Integer(u64),
    Ident(String),
}

impl Token {
    /// Classifies a whitespace-delimited word.
    pub fn classify(word: &str) -> Token {
        match word {
            "push" => Token::Push,
            "pop" => Token::Pop,
            "label" => Token::Label,
            "goto" => Token::Goto,
            "if-goto" => Token::IfGoto,
            "function" => Token::Function,
            "call" => Token::Call,
            "return" => Token::Return,
            _ => {
                if let Some(op) = ArithOp::from_keyword(word) {
                    Token::Op(op)
                } else if let Some(segment) = Segment::from_keyword(word) {
                    Token::Segment(segment)
                } else if !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit()) {
                    // Too many digits for u64 stays an identifier; the parser
                    // reports it as a malformed number where one is expected.
                    word.parse()
                        .map(Token::Integer)
                        .unwrap_or_else(|_| Token::Ident(word.to_string()))
                } else {
                    Token::Ident(word.to_string())
                }
            }
        }
    }

    /// Number of operands the command keyword takes, or `None` for operands.
    pub fn operand_count(&self) -> Option<usize> {
        match self {
            Token::Push | Token::Pop | Token::Function | Token::Call => Some(2),
            Token::Label | Token::Goto | Token::IfGoto => Some(1),
            Token::Return | Token::Op(_) => Some(0),
            Token::Segment(_) | Token::Integer(_) | Token::Ident(_) => None,
        }
    }
}
