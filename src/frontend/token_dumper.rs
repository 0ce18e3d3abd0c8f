use crate::frontend::lexer::{SourceLine, Spanned};
use crate::frontend::token::Token;

pub struct TokenDumper {
    pub color: bool,
    pub show_debug_repr: bool, // if false, prints the source word instead of the token
}

impl Default for TokenDumper {
    fn default() -> Self {
        Self {
            color: true,
            show_debug_repr: true,
        }
    }
}

impl TokenDumper {
    // ANSI colors
    const RESET: &'static str = "\x1b[0m";
    const GRN: &'static str = "\x1b[32m";
    const YEL: &'static str = "\x1b[33m";
    const CYN: &'static str = "\x1b[36m";
    const MAG: &'static str = "\x1b[35m";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn pretty(mut self) -> Self {
        self.show_debug_repr = false;
        self
    }

    pub fn dump(&self, lines: &[SourceLine]) {
        for line in lines {
            for s in &line.tokens {
                println!("{}", self.format_one(s));
            }
        }
    }

    pub fn format_one(&self, s: &Spanned) -> String {
        let kind = self.kind(&s.token);
        let colr = if self.color { self.color(&s.token) } else { "" };
        let reset = if self.color { Self::RESET } else { "" };

        if self.show_debug_repr {
            format!(
                "[{:02}:{:02}] {}{:<8} {:?}{}",
                s.span.line, s.span.col, colr, kind, s.token, reset
            )
        } else {
            format!(
                "[{:02}:{:02}] {}{:<8} {}{}",
                s.span.line, s.span.col, colr, kind, s.text, reset
            )
        }
    }

    fn kind(&self, t: &Token) -> &'static str {
        use Token::*;
        match t {
            Push | Pop | Label | Goto | IfGoto | Function | Call | Return => "KEYWORD",
            Op(_) => "OP",
            Segment(_) => "SEGMENT",
            Integer(_) => "INT",
            Ident(_) => "IDENT",
        }
    }

    fn color(&self, t: &Token) -> &'static str {
        use Token::*;
        match t {
            Push | Pop | Label | Goto | IfGoto | Function | Call | Return => Self::GRN,
            Op(_) => Self::MAG,
            Segment(_) | Integer(_) => Self::CYN,
            Ident(_) => Self::YEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Lexer;

    #[test]
    fn test_plain_format() {
        let lines = Lexer::new("\n  push local 4").tokenize();
        let dumper = TokenDumper::new().no_color();
        let out: Vec<String> = lines[0].tokens.iter().map(|s| dumper.format_one(s)).collect();
        assert_eq!(out[0], "[02:03] KEYWORD  Push");
        assert_eq!(out[1], "[02:08] SEGMENT  Segment(Local)");
        assert_eq!(out[2], "[02:14] INT      Integer(4)");
    }

    #[test]
    fn test_pretty_prints_source_word() {
        let lines = Lexer::new("if-goto END").tokenize();
        let dumper = TokenDumper::new().no_color().pretty();
        assert_eq!(dumper.format_one(&lines[0].tokens[0]), "[01:01] KEYWORD  if-goto");
        assert_eq!(dumper.format_one(&lines[0].tokens[1]), "[01:09] IDENT    END");
    }

    #[test]
    fn test_color_wraps_output() {
        let lines = Lexer::new("add").tokenize();
        let out = TokenDumper::new().format_one(&lines[0].tokens[0]);
        assert!(out.contains("\x1b[35m"));
        assert!(out.ends_with("\x1b[0m"));
    }
}
