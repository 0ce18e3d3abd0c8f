//! Translator from the stack-based VM language to Hack assembly.
//!
//! The pipeline is `frontend` (lex and parse `.vm` text into located
//! commands) → `codegen` (emit assembly while keeping the run-time stack and
//! calling convention intact). `loader` handles files, directories and the
//! binary `.vmb` form.

pub mod codegen;
pub mod frontend;
pub mod lang;
pub mod loader;

pub use codegen::{AsmSink, TranslateError, TranslateOptions, Translator, translate_program};
pub use lang::{ArithOp, Command, ErrorKind, Located, Program, Segment, Unit};
