//! `push` and `pop`.

use crate::codegen::segment::{self, Addressing};
use crate::codegen::sink::AsmSink;
use crate::lang::{ErrorKind, Segment};

/// Writes D to the stack top and bumps SP.
pub(crate) const PUSH_D: [&str; 5] = ["@SP", "A=M", "M=D", "@SP", "M=M+1"];

/// Loads `segment[index]` into D and pushes it.
///
/// `unit` qualifies `static` symbols.
pub fn push(sink: &mut AsmSink, unit: &str, segment: Segment, index: u16) -> Result<(), ErrorKind> {
    segment::check_index(segment, index)?;

    match segment::addressing(segment) {
        Addressing::Immediate => {
            sink.emit(format!("@{}", index));
            sink.emit("D=A");
        }
        Addressing::Indirect(base) => {
            sink.emit(format!("@{}", index));
            sink.emit("D=A");
            sink.emit(format!("@{}", base));
            sink.emit_all(&["A=M+D", "D=M"]);
        }
        Addressing::Fixed(base) => {
            sink.emit(format!("@{}", index));
            sink.emit("D=A");
            sink.emit(format!("@{}", base));
            sink.emit_all(&["A=A+D", "D=M"]);
        }
        Addressing::Static => {
            sink.emit(format!("@{}.{}", unit, index));
            sink.emit("D=M");
        }
    }

    sink.emit_all(&PUSH_D);
    Ok(())
}

/// Pops the stack top into `segment[index]`.
///
/// The effective address is computed first and parked in R13, since D is
/// needed for the popped value.
pub fn pop(sink: &mut AsmSink, unit: &str, segment: Segment, index: u16) -> Result<(), ErrorKind> {
    segment::check_index(segment, index)?;

    match segment::addressing(segment) {
        Addressing::Immediate => return Err(ErrorKind::InvalidPop(segment)),
        Addressing::Indirect(base) => {
            sink.emit(format!("@{}", index));
            sink.emit("D=A");
            sink.emit(format!("@{}", base));
            sink.emit("D=M+D");
        }
        Addressing::Fixed(base) => {
            sink.emit(format!("@{}", index));
            sink.emit("D=A");
            sink.emit(format!("@{}", base));
            sink.emit("D=A+D");
        }
        Addressing::Static => {
            sink.emit(format!("@{}.{}", unit, index));
            sink.emit("D=A");
        }
    }

    sink.emit_all(&["@R13", "M=D", "@SP", "AM=M-1", "D=M", "@R13", "A=M", "M=D"]);
    Ok(())
}
