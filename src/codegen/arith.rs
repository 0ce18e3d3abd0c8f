//! Arithmetic, logical and relational operators.

use crate::codegen::label::{END_PREFIX, LabelAllocator, TRUE_PREFIX};
use crate::codegen::sink::AsmSink;
use crate::lang::ArithOp;

pub fn arithmetic(sink: &mut AsmSink, labels: &mut LabelAllocator, op: ArithOp) {
    match op {
        ArithOp::Add => binary(sink, "+"),
        ArithOp::Sub => binary(sink, "-"),
        ArithOp::And => binary(sink, "&"),
        ArithOp::Or => binary(sink, "|"),
        ArithOp::Neg => unary(sink, "-"),
        ArithOp::Not => unary(sink, "!"),
        ArithOp::Eq => compare(sink, labels, "JEQ"),
        ArithOp::Gt => compare(sink, labels, "JGT"),
        ArithOp::Lt => compare(sink, labels, "JLT"),
    }
}

/// `( x y -- x<op>y )`: y goes to D, the result overwrites x.
fn binary(sink: &mut AsmSink, operator: &str) {
    sink.emit_all(&["@SP", "AM=M-1", "D=M", "A=A-1"]);
    sink.emit(format!("M=M{}D", operator));
}

fn unary(sink: &mut AsmSink, operator: &str) {
    sink.emit_all(&["@SP", "A=M-1"]);
    sink.emit(format!("M={}M", operator));
}

/// `( x y -- flag )`: jumps on the sign of `x - y`.
fn compare(sink: &mut AsmSink, labels: &mut LabelAllocator, jump: &str) {
    let n = labels.next();
    let label_true = format!("{}{}", TRUE_PREFIX, n);
    let label_end = format!("{}{}", END_PREFIX, n);

    sink.emit_all(&["@SP", "AM=M-1", "D=M", "A=A-1", "D=M-D"]);
    sink.emit(format!("@{}", label_true));
    sink.emit(format!("D;{}", jump));
    sink.emit_all(&["@SP", "A=M-1", "M=0"]);
    sink.emit(format!("@{}", label_end));
    sink.emit("0;JMP");
    sink.emit(format!("({})", label_true));
    sink.emit_all(&["@SP", "A=M-1", "M=-1"]);
    sink.emit(format!("({})", label_end));
}
