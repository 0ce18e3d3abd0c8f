/// The generated assembly, one instruction (or label) per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsmSink {
    lines: Vec<String>,
}

impl AsmSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn emit_all(&mut self, lines: &[&str]) {
        self.lines.extend(lines.iter().map(|l| l.to_string()));
    }

    pub fn comment(&mut self, text: &str) {
        self.lines.push(format!("// {}", text));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drops everything emitted after the first `len` lines.
    pub fn truncate(&mut self, len: usize) {
        self.lines.truncate(len);
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Output file contents: every line terminated by `\n`.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
