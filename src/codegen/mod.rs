pub mod arith;
pub mod flow;
pub mod function;
pub mod label;
pub mod listing;
pub mod memory;
pub mod segment;
pub mod sink;
pub mod stack_check;
pub mod translate;
pub mod translate_error;

pub use sink::AsmSink;
pub use translate::{TranslateOptions, Translator, translate_program};
pub use translate_error::TranslateError;
