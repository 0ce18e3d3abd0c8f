use std::collections::HashMap;

use crate::lang::{ArithOp, Command, Located};

#[derive(Debug)]
pub struct StackCheckError {
    pub message: String,
    pub line: usize,
}

impl std::fmt::Display for StackCheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stack-check error: line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for StackCheckError {}

impl StackCheckError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

/// Returns (pops, pushes) for a command. `function` is handled by the caller.
fn effect(command: &Command) -> (i32, i32) {
    use Command::*;
    match command {
        Push(..) => (0, 1),
        Pop(..) => (1, 0),

        Arithmetic(ArithOp::Neg | ArithOp::Not) => (1, 1),
        Arithmetic(_) => (2, 1),

        Label(_) | Goto(_) => (0, 0),
        IfGoto(_) => (1, 0),

        Function(..) => (0, 0),
        Call(_, n_args) => (i32::from(*n_args), 1),
        Return => (1, 0),
    }
}

/// Check the operand-stack height of every function body.
///
/// Heights are relative to the function's locals, so `function` resets the
/// height to zero. A `goto`/`if-goto` records the height at its target label;
/// after `goto` or `return` the next label resumes from the recorded height,
/// or checking is suspended until the next `function` when no jump to it
/// has been seen yet.
///
/// NOTE: Backward jumps are not followed. A label reached only from below
/// (a loop head entered by fall-through) is checked with the fall-through
/// height.
pub fn check_commands(commands: &[Located]) -> Result<(), StackCheckError> {
    let mut height: Option<i32> = Some(0);
    let mut at_label: HashMap<&str, i32> = HashMap::new();

    for located in commands {
        let command = &located.command;

        match command {
            Command::Function(..) => {
                height = Some(0);
                at_label.clear();
                continue;
            }
            Command::Label(name) => {
                if height.is_none() {
                    height = at_label.get(name.as_str()).copied();
                }
                continue;
            }
            _ => {}
        }

        let Some(h) = height else {
            continue;
        };

        let (pops, pushes) = effect(command);
        if h < pops {
            return Err(StackCheckError::new(
                located.line,
                format!(
                    "stack underflow at '{}', needed {} items, have {}",
                    command, pops, h
                ),
            ));
        }
        let after = h - pops + pushes;

        height = match command {
            Command::Goto(name) => {
                at_label.entry(name.as_str()).or_insert(after);
                None
            }
            Command::IfGoto(name) => {
                at_label.entry(name.as_str()).or_insert(after);
                Some(after)
            }
            Command::Return => None,
            _ => Some(after),
        };
    }

    Ok(())
}
