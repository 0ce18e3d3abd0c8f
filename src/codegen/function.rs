//! The calling convention: `function`, `call` and `return`.
//!
//! A call leaves this frame on the stack, growing upward:
//!
//! ```text
//!   ARG  -> arg 0 .. arg n-1
//!           return address
//!           saved LCL
//!           saved ARG
//!           saved THIS
//!           saved THAT
//!   LCL  -> local 0 .. local k-1
//!   SP   -> working stack
//! ```

use crate::codegen::label::{LabelAllocator, RETURN_PREFIX};
use crate::codegen::memory::PUSH_D;
use crate::codegen::sink::AsmSink;

/// Saved frame size: return address plus the four segment pointers.
pub const FRAME_SIZE: u16 = 5;

const SAVED_POINTERS: [&str; 4] = ["LCL", "ARG", "THIS", "THAT"];

/// Entry label followed by `n_locals` pushes of zero.
pub fn function(sink: &mut AsmSink, name: &str, n_locals: u16) {
    sink.emit(format!("({})", name));
    for _ in 0..n_locals {
        sink.emit_all(&["@SP", "A=M", "M=0", "@SP", "M=M+1"]);
    }
}

/// The caller must already have pushed `n_args` arguments.
pub fn call(sink: &mut AsmSink, labels: &mut LabelAllocator, name: &str, n_args: u16) {
    let return_label = format!("{}{}", RETURN_PREFIX, labels.next());

    sink.emit(format!("@{}", return_label));
    sink.emit("D=A");
    sink.emit_all(&PUSH_D);
    for pointer in SAVED_POINTERS {
        sink.emit(format!("@{}", pointer));
        sink.emit("D=M");
        sink.emit_all(&PUSH_D);
    }

    // ARG = SP - 5 - n_args
    sink.emit_all(&["@SP", "D=M"]);
    sink.emit(format!("@{}", FRAME_SIZE));
    sink.emit("D=D-A");
    sink.emit(format!("@{}", n_args));
    sink.emit_all(&["D=D-A", "@ARG", "M=D"]);

    // LCL = SP
    sink.emit_all(&["@SP", "D=M", "@LCL", "M=D"]);

    sink.emit(format!("@{}", name));
    sink.emit("0;JMP");
    sink.emit(format!("({})", return_label));
}

/// R13 holds the frame end (the callee's LCL), R14 the return address.
pub fn ret(sink: &mut AsmSink) {
    sink.emit_all(&["@LCL", "D=M", "@R13", "M=D"]);

    // The return address must be read before *ARG is overwritten: with zero
    // arguments ARG points at the saved return address.
    sink.emit(format!("@{}", FRAME_SIZE));
    sink.emit_all(&["A=D-A", "D=M", "@R14", "M=D"]);

    // *ARG = pop(); SP = ARG + 1
    sink.emit_all(&["@SP", "AM=M-1", "D=M", "@ARG", "A=M", "M=D"]);
    sink.emit_all(&["@ARG", "D=M+1", "@SP", "M=D"]);

    for pointer in SAVED_POINTERS.iter().rev() {
        sink.emit_all(&["@R13", "AM=M-1", "D=M"]);
        sink.emit(format!("@{}", pointer));
        sink.emit("M=D");
    }

    sink.emit_all(&["@R14", "A=M", "0;JMP"]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_pushes_zero_locals() {
        let mut sink = AsmSink::new();
        function(&mut sink, "Main.f", 2);
        assert_eq!(sink.len(), 1 + 2 * 5);
        assert_eq!(sink.lines()[0], "(Main.f)");
        assert_eq!(sink.lines()[1..6], ["@SP", "A=M", "M=0", "@SP", "M=M+1"]);
    }

    #[test]
    fn test_function_without_locals() {
        let mut sink = AsmSink::new();
        function(&mut sink, "Sys.init", 0);
        assert_eq!(sink.lines(), ["(Sys.init)"]);
    }

    #[test]
    fn test_call_sequence() {
        let mut sink = AsmSink::new();
        let mut labels = LabelAllocator::new();
        labels.next();
        call(&mut sink, &mut labels, "Math.max", 2);
        let lines = sink.into_lines();

        assert_eq!(lines[..3], ["@RETURN_LABEL_1", "D=A", "@SP"]);
        let saved: Vec<&String> = lines
            .iter()
            .filter(|l| SAVED_POINTERS.iter().any(|p| l.as_str() == format!("@{}", p)))
            .take(4)
            .collect();
        assert_eq!(saved, ["@LCL", "@ARG", "@THIS", "@THAT"]);
        assert_eq!(
            lines[lines.len() - 15..],
            [
                "@SP", "D=M", "@5", "D=D-A", "@2", "D=D-A", "@ARG", "M=D", "@SP", "D=M", "@LCL",
                "M=D", "@Math.max", "0;JMP", "(RETURN_LABEL_1)"
            ]
        );
        assert_eq!(labels.issued(), 2);
    }

    #[test]
    fn test_return_sequence() {
        let mut sink = AsmSink::new();
        ret(&mut sink);
        assert_eq!(
            sink.lines(),
            [
                "@LCL", "D=M", "@R13", "M=D", "@5", "A=D-A", "D=M", "@R14", "M=D", "@SP",
                "AM=M-1", "D=M", "@ARG", "A=M", "M=D", "@ARG", "D=M+1", "@SP", "M=D", "@R13",
                "AM=M-1", "D=M", "@THAT", "M=D", "@R13", "AM=M-1", "D=M", "@THIS", "M=D", "@R13",
                "AM=M-1", "D=M", "@ARG", "M=D", "@R13", "AM=M-1", "D=M", "@LCL", "M=D", "@R14",
                "A=M", "0;JMP"
            ]
        );
    }
}
