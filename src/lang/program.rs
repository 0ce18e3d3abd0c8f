use super::command::Command;
use serde::{Deserialize, Serialize};

/// A command together with the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Located {
    /// 1-based line number in the unit's source.
    pub line: usize,
    /// Source text of the line with the comment stripped.
    pub text: String,
    pub command: Command,
}

impl Located {
    pub fn new(line: usize, text: impl Into<String>, command: Command) -> Self {
        Self {
            line,
            text: text.into(),
            command,
        }
    }
}

/// The commands of one input file.
///
/// `name` is the file stem and qualifies the unit's `static` symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub commands: Vec<Located>,
}

impl Unit {
    pub fn new(name: impl Into<String>, commands: Vec<Located>) -> Self {
        Self {
            name: name.into(),
            commands,
        }
    }

    /// Returns true if the unit defines a function with the given name.
    pub fn defines(&self, function: &str) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(&c.command, Command::Function(name, _) if name == function))
    }
}

/// A parsed VM program: one or more units translated into one output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub units: Vec<Unit>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command_count(&self) -> usize {
        self.units.iter().map(|u| u.commands.len()).sum()
    }

    pub fn defines(&self, function: &str) -> bool {
        self.units.iter().any(|u| u.defines(function))
    }

    /// Encodes the program in the compact `postcard` form used for `.vmb` files.
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Program, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}
