use std::collections::HashSet;

use log::{debug, info, warn};

use crate::codegen::label::{self, LabelAllocator};
use crate::codegen::sink::AsmSink;
use crate::codegen::translate_error::TranslateError;
use crate::codegen::{arith, flow, function, memory};
use crate::lang::{Command, ErrorKind, Located, Program, Unit, is_symbol};

/// Unit name used for `static` symbols until `begin_unit` is called.
pub const DEFAULT_UNIT: &str = "Main";

/// Address the bootstrap code gives the stack pointer.
pub const STACK_BASE: u16 = 256;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Emit the `SP = 256; call Sys.init 0` preamble.
    pub bootstrap: bool,
    /// Precede each command's code with a `// <source>` comment.
    pub annotate: bool,
}

/// Translation context: the output sink and the label counter.
///
/// One `Translator` covers a whole run, however many units it is fed, so
/// labels stay unique across the combined output. Labels written inside a
/// function are emitted as `<function>$<label>`; labels outside any function
/// keep their bare name.
pub struct Translator {
    sink: AsmSink,
    labels: LabelAllocator,
    unit: String,
    /// Function whose body is being translated.
    function: Option<String>,
    /// Every label and function entry defined so far.
    defined: HashSet<String>,
    annotate: bool,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    pub fn new() -> Self {
        Self {
            sink: AsmSink::new(),
            labels: LabelAllocator::new(),
            unit: DEFAULT_UNIT.to_string(),
            function: None,
            defined: HashSet::new(),
            annotate: false,
        }
    }

    pub fn with_annotations(mut self) -> Self {
        self.annotate = true;
        self
    }

    /// Sets the unit that qualifies subsequent `static` references.
    pub fn begin_unit(&mut self, name: &str) {
        self.unit = name.to_string();
        self.function = None;
    }

    pub fn bootstrap(&mut self) {
        if self.annotate {
            self.sink.comment("bootstrap");
        }
        self.sink.emit(format!("@{}", STACK_BASE));
        self.sink.emit_all(&["D=A", "@SP", "M=D"]);
        function::call(&mut self.sink, &mut self.labels, "Sys.init", 0);
    }

    /// The assembler symbol a `label`/`goto`/`if-goto` name refers to.
    fn resolve(&self, name: &str) -> Result<String, ErrorKind> {
        if !is_symbol(name) {
            return Err(ErrorKind::InvalidName(name.to_string()));
        }
        let symbol = match &self.function {
            Some(function) => format!("{}${}", function, name),
            None => name.to_string(),
        };
        if label::is_generated(&symbol) {
            return Err(ErrorKind::ReservedLabel(symbol));
        }
        Ok(symbol)
    }

    /// Records a symbol definition; each symbol may be defined once.
    fn define(&mut self, symbol: &str) -> Result<(), ErrorKind> {
        if !self.defined.insert(symbol.to_string()) {
            return Err(ErrorKind::DuplicateLabel(symbol.to_string()));
        }
        Ok(())
    }

    fn function_name(name: &str) -> Result<&str, ErrorKind> {
        if !is_symbol(name) {
            return Err(ErrorKind::InvalidName(name.to_string()));
        }
        if label::is_generated(name) {
            return Err(ErrorKind::ReservedLabel(name.to_string()));
        }
        Ok(name)
    }

    /// Dispatches one command to its generator.
    pub fn translate_command(&mut self, command: &Command) -> Result<(), ErrorKind> {
        match command {
            Command::Push(segment, index) => {
                memory::push(&mut self.sink, &self.unit, *segment, *index)?
            }
            Command::Pop(segment, index) => {
                memory::pop(&mut self.sink, &self.unit, *segment, *index)?
            }
            Command::Arithmetic(op) => arith::arithmetic(&mut self.sink, &mut self.labels, *op),
            Command::Label(name) => {
                let symbol = self.resolve(name)?;
                self.define(&symbol)?;
                flow::label(&mut self.sink, &symbol);
            }
            Command::Goto(name) => {
                let symbol = self.resolve(name)?;
                flow::goto(&mut self.sink, &symbol);
            }
            Command::IfGoto(name) => {
                let symbol = self.resolve(name)?;
                flow::if_goto(&mut self.sink, &symbol);
            }
            Command::Function(name, n_locals) => {
                let name = Self::function_name(name)?;
                self.define(name)?;
                function::function(&mut self.sink, name, *n_locals);
                self.function = Some(name.to_string());
            }
            Command::Call(name, n_args) => {
                let name = Self::function_name(name)?;
                function::call(&mut self.sink, &mut self.labels, name, *n_args);
            }
            Command::Return => function::ret(&mut self.sink),
        }
        Ok(())
    }

    /// Translates one command; on failure the sink is left as it was.
    pub fn translate(&mut self, located: &Located) -> Result<(), TranslateError> {
        let before = self.sink.len();
        if self.annotate {
            self.sink.comment(&located.text);
        }

        if let Err(kind) = self.translate_command(&located.command) {
            self.sink.truncate(before);
            return Err(TranslateError::at(located, &self.unit, kind));
        }

        debug!(
            "{}:{}: {} -> {} lines",
            self.unit,
            located.line,
            located.command,
            self.sink.len() - before
        );
        Ok(())
    }

    pub fn translate_unit(&mut self, unit: &Unit) -> Result<(), TranslateError> {
        self.begin_unit(&unit.name);
        let before = self.sink.len();
        for located in &unit.commands {
            self.translate(located)?;
        }
        info!(
            "translated unit '{}': {} commands, {} lines",
            unit.name,
            unit.commands.len(),
            self.sink.len() - before
        );
        Ok(())
    }

    pub fn sink(&self) -> &AsmSink {
        &self.sink
    }

    pub fn labels_issued(&self) -> usize {
        self.labels.issued()
    }

    pub fn finish(self) -> AsmSink {
        self.sink
    }
}

/// Translates a whole program into one assembly listing.
///
/// Either every command translates or nothing is returned.
pub fn translate_program(
    program: &Program,
    options: TranslateOptions,
) -> Result<AsmSink, TranslateError> {
    let mut translator = Translator::new();
    if options.annotate {
        translator = translator.with_annotations();
    }

    if options.bootstrap {
        if !program.defines("Sys.init") {
            warn!("bootstrap requested but no unit defines Sys.init");
        }
        translator.bootstrap();
    }

    for unit in &program.units {
        translator.translate_unit(unit)?;
    }

    info!(
        "translated {} units, {} commands into {} lines ({} labels)",
        program.units.len(),
        program.command_count(),
        translator.sink().len(),
        translator.labels_issued()
    );
    Ok(translator.finish())
}
