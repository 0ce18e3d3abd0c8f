//! `label`, `goto` and `if-goto`.

use crate::codegen::sink::AsmSink;

pub fn label(sink: &mut AsmSink, name: &str) {
    sink.emit(format!("({})", name));
}

pub fn goto(sink: &mut AsmSink, name: &str) {
    sink.emit(format!("@{}", name));
    sink.emit("0;JMP");
}

/// Pops the condition; jumps when it is non-zero.
pub fn if_goto(sink: &mut AsmSink, name: &str) {
    sink.emit_all(&["@SP", "AM=M-1", "D=M"]);
    sink.emit(format!("@{}", name));
    sink.emit("D;JNE");
}
