use crate::frontend::lexer::{Lexer, SourceLine, Spanned};
use crate::frontend::parser_error::ParserError;
use crate::frontend::token::Token;
use crate::lang::{Command, ErrorKind, Located, Segment, is_symbol};

/// Line-oriented parser for VM commands.
///
/// Each `SourceLine` from the lexer holds exactly one command: a keyword (or
/// arithmetic operator) followed by its operands. Parsing stops at the first
/// malformed line.
pub struct Parser {
    lines: Vec<SourceLine>,
}

impl Parser {
    pub fn new(lines: Vec<SourceLine>) -> Self {
        Parser { lines }
    }

    /// Parses every line into a located command.
    pub fn parse(&self) -> Result<Vec<Located>, ParserError> {
        self.lines.iter().map(parse_line).collect()
    }
}

/// Lexes and parses VM source text.
pub fn parse_source(source: &str) -> Result<Vec<Located>, ParserError> {
    let lines = Lexer::new(source).tokenize();
    Parser::new(lines).parse()
}

fn parse_line(line: &SourceLine) -> Result<Located, ParserError> {
    let command = LineParser { line }.parse()?;
    Ok(Located::new(line.line, line.text.clone(), command))
}

struct LineParser<'a> {
    line: &'a SourceLine,
}

impl LineParser<'_> {
    fn error_at(&self, spanned: &Spanned, kind: ErrorKind) -> ParserError {
        ParserError {
            kind,
            line: self.line.line,
            col: spanned.span.col,
            text: self.line.text.clone(),
        }
    }

    fn head(&self) -> &Spanned {
        // The lexer never yields a line without tokens.
        &self.line.tokens[0]
    }

    fn parse(&self) -> Result<Command, ParserError> {
        let head = self.head();
        let expected = match head.token.operand_count() {
            Some(n) => n,
            None => {
                return Err(self.error_at(head, ErrorKind::UnknownOperator(head.text.clone())));
            }
        };

        let found = self.line.tokens.len() - 1;
        if found != expected {
            return Err(self.error_at(
                head,
                ErrorKind::ArityMismatch {
                    command: head.text.clone(),
                    expected,
                    found,
                },
            ));
        }

        let operands = &self.line.tokens[1..];
        let command = match &head.token {
            Token::Push => Command::Push(self.segment(&operands[0])?, self.number(&operands[1])?),
            Token::Pop => Command::Pop(self.segment(&operands[0])?, self.number(&operands[1])?),
            Token::Label => Command::Label(self.name(&operands[0])?),
            Token::Goto => Command::Goto(self.name(&operands[0])?),
            Token::IfGoto => Command::IfGoto(self.name(&operands[0])?),
            Token::Function => {
                Command::Function(self.name(&operands[0])?, self.number(&operands[1])?)
            }
            Token::Call => Command::Call(self.name(&operands[0])?, self.number(&operands[1])?),
            Token::Return => Command::Return,
            Token::Op(op) => Command::Arithmetic(*op),
            Token::Segment(_) | Token::Integer(_) | Token::Ident(_) => {
                return Err(self.error_at(head, ErrorKind::UnknownOperator(head.text.clone())));
            }
        };

        Ok(command)
    }

    fn segment(&self, spanned: &Spanned) -> Result<Segment, ParserError> {
        match spanned.token {
            Token::Segment(segment) => Ok(segment),
            _ => Err(self.error_at(spanned, ErrorKind::UnknownSegment(spanned.text.clone()))),
        }
    }

    /// Label and function names; keyword text is fine, numbers are not.
    fn name(&self, spanned: &Spanned) -> Result<String, ParserError> {
        if is_symbol(&spanned.text) {
            Ok(spanned.text.clone())
        } else {
            Err(self.error_at(spanned, ErrorKind::InvalidName(spanned.text.clone())))
        }
    }

    fn number(&self, spanned: &Spanned) -> Result<u16, ParserError> {
        match spanned.token {
            Token::Integer(n) => u16::try_from(n).map_err(|_| {
                self.error_at(spanned, ErrorKind::MalformedNumber(spanned.text.clone()))
            }),
            _ => Err(self.error_at(spanned, ErrorKind::MalformedNumber(spanned.text.clone()))),
        }
    }
}
