//! # VM language model
//!
//! Commands of the stack-based VM language and the program container the
//! front end produces and the translator consumes.
//!
//! ## Documentation conventions
//!
//! - Stack effects are written as `( before -- after )`.
//! - Booleans on the VM stack are `-1` (true) and `0` (false).

pub mod command;
pub mod error_kind;
pub mod program;

pub use command::{ArithOp, Command, Segment, is_symbol};
pub use error_kind::ErrorKind;
pub use program::{Located, Program, Unit};
