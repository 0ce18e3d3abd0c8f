use crate::frontend::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    /// The word as written in the source.
    pub text: String,
    pub span: Span,
}

/// The tokens of one non-blank source line.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    pub line: usize,
    /// Line content with the comment and surrounding whitespace removed.
    pub text: String,
    pub tokens: Vec<Spanned>,
}

/// Splits VM source into lines of whitespace-delimited tokens.
///
/// `//` starts a comment that runs to the end of the line. Lines that are
/// blank once the comment is removed are dropped.
pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn current(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current();
        if ch == Some('\n') {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.pos += 1;
        ch
    }

    fn span(&self) -> Span {
        Span {
            line: self.line,
            col: self.col,
        }
    }

    fn at_comment(&self) -> bool {
        self.current() == Some('/') && self.peek() == Some('/')
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.current() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn read_word(&mut self, text: &mut String) -> Spanned {
        let span = self.span();
        let mut word = String::new();
        while let Some(ch) = self.current() {
            if ch.is_whitespace() || self.at_comment() {
                break;
            }
            word.push(ch);
            text.push(ch);
            self.advance();
        }
        Spanned {
            token: Token::classify(&word),
            text: word,
            span,
        }
    }

    pub fn tokenize(&mut self) -> Vec<SourceLine> {
        let mut lines = Vec::new();
        let mut tokens = Vec::new();
        let mut text = String::new();
        let mut line_no = self.line;

        loop {
            match self.current() {
                None | Some('\n') => {
                    if !tokens.is_empty() {
                        lines.push(SourceLine {
                            line: line_no,
                            text: text.trim().to_string(),
                            tokens: std::mem::take(&mut tokens),
                        });
                    }
                    text.clear();
                    if self.advance().is_none() {
                        break;
                    }
                    line_no = self.line;
                }
                Some(_) if self.at_comment() => self.skip_comment(),
                Some(ch) if ch.is_whitespace() => {
                    text.push(ch);
                    self.advance();
                }
                Some(_) => {
                    let word = self.read_word(&mut text);
                    tokens.push(word);
                }
            }
        }

        lines
    }
}
