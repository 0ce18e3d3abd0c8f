//! A minimal Hack CPU used to execute translated programs in tests.

#![allow(dead_code)]

use std::collections::HashMap;

use hackvm::frontend::parse_source;
use hackvm::{Program, TranslateOptions, Unit, translate_program};

pub const SP: usize = 0;
pub const LCL: usize = 1;
pub const ARG: usize = 2;
pub const THIS: usize = 3;
pub const THAT: usize = 4;

pub const STACK_BASE: i16 = 256;
pub const LCL_BASE: i16 = 300;
pub const ARG_BASE: i16 = 400;
pub const THIS_BASE: i16 = 3000;
pub const THAT_BASE: i16 = 3010;

#[derive(Debug, Clone)]
enum Instr {
    A(i16),
    C {
        dest: String,
        comp: String,
        jump: String,
    },
}

pub struct Cpu {
    rom: Vec<Instr>,
    labels: HashMap<String, usize>,
    variables: HashMap<String, u16>,
    pub ram: Vec<i16>,
    pub a: i16,
    pub d: i16,
    pub pc: usize,
    pub steps: usize,
}

fn predefined() -> HashMap<String, u16> {
    let mut symbols: HashMap<String, u16> = [
        ("SP", 0),
        ("LCL", 1),
        ("ARG", 2),
        ("THIS", 3),
        ("THAT", 4),
        ("SCREEN", 16384),
        ("KBD", 24576),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    for r in 0..16 {
        symbols.insert(format!("R{}", r), r);
    }
    symbols
}

impl Cpu {
    /// Assembles `lines` (labels, comments and instructions) into ROM.
    pub fn new(lines: &[String]) -> Cpu {
        let mut labels = HashMap::new();
        let mut address = 0;
        for line in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            if let Some(name) = line.strip_prefix('(').and_then(|l| l.strip_suffix(')')) {
                assert!(
                    labels.insert(name.to_string(), address).is_none(),
                    "duplicate label {}",
                    name
                );
            } else {
                address += 1;
            }
        }

        let mut symbols = predefined();
        let mut next_variable = 16u16;
        let mut rom = Vec::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") || line.starts_with('(') {
                continue;
            }
            if let Some(symbol) = line.strip_prefix('@') {
                let value = if let Ok(n) = symbol.parse::<u16>() {
                    assert!(n <= 0x7fff, "literal out of range: {}", line);
                    n
                } else if let Some(&rom_address) = labels.get(symbol) {
                    rom_address as u16
                } else {
                    *symbols.entry(symbol.to_string()).or_insert_with(|| {
                        let v = next_variable;
                        next_variable += 1;
                        v
                    })
                };
                rom.push(Instr::A(value as i16));
            } else {
                let (rest, jump) = match line.split_once(';') {
                    Some((rest, jump)) => (rest, jump.to_string()),
                    None => (line, String::new()),
                };
                let (dest, comp) = match rest.split_once('=') {
                    Some((dest, comp)) => (dest.to_string(), comp.to_string()),
                    None => (String::new(), rest.to_string()),
                };
                rom.push(Instr::C { dest, comp, jump });
            }
        }

        Cpu {
            rom,
            labels,
            variables: symbols,
            ram: vec![0; 1 << 16],
            a: 0,
            d: 0,
            pc: 0,
            steps: 0,
        }
    }

    /// Sets up a caller frame with recognizable pointer values.
    pub fn with_frame(mut self) -> Cpu {
        self.ram[SP] = STACK_BASE;
        self.ram[LCL] = LCL_BASE;
        self.ram[ARG] = ARG_BASE;
        self.ram[THIS] = THIS_BASE;
        self.ram[THAT] = THAT_BASE;
        self
    }

    pub fn label(&self, name: &str) -> usize {
        *self
            .labels
            .get(name)
            .unwrap_or_else(|| panic!("no label {}", name))
    }

    fn eval(&self, comp: &str) -> i16 {
        let a = self.a;
        let d = self.d;
        let m = self.ram[a as u16 as usize];
        match comp {
            "0" => 0,
            "1" => 1,
            "-1" => -1,
            "D" => d,
            "A" => a,
            "M" => m,
            "!D" => !d,
            "!A" => !a,
            "!M" => !m,
            "-D" => d.wrapping_neg(),
            "-A" => a.wrapping_neg(),
            "-M" => m.wrapping_neg(),
            "D+1" => d.wrapping_add(1),
            "A+1" => a.wrapping_add(1),
            "M+1" => m.wrapping_add(1),
            "D-1" => d.wrapping_sub(1),
            "A-1" => a.wrapping_sub(1),
            "M-1" => m.wrapping_sub(1),
            "D+A" | "A+D" => d.wrapping_add(a),
            "D+M" | "M+D" => d.wrapping_add(m),
            "D-A" => d.wrapping_sub(a),
            "D-M" => d.wrapping_sub(m),
            "A-D" => a.wrapping_sub(d),
            "M-D" => m.wrapping_sub(d),
            "D&A" | "A&D" => d & a,
            "D&M" | "M&D" => d & m,
            "D|A" | "A|D" => d | a,
            "D|M" | "M|D" => d | m,
            other => panic!("unsupported comp '{}'", other),
        }
    }

    pub fn step(&mut self) {
        let instr = self.rom[self.pc].clone();
        self.steps += 1;
        match instr {
            Instr::A(value) => {
                self.a = value;
                self.pc += 1;
            }
            Instr::C { dest, comp, jump } => {
                let value = self.eval(&comp);
                let address = self.a as u16 as usize;
                let target = address;

                if dest.contains('M') {
                    self.ram[address] = value;
                }
                if dest.contains('A') {
                    self.a = value;
                }
                if dest.contains('D') {
                    self.d = value;
                }

                let taken = match jump.as_str() {
                    "" => false,
                    "JGT" => value > 0,
                    "JEQ" => value == 0,
                    "JGE" => value >= 0,
                    "JLT" => value < 0,
                    "JNE" => value != 0,
                    "JLE" => value <= 0,
                    "JMP" => true,
                    other => panic!("unsupported jump '{}'", other),
                };
                self.pc = if taken { target } else { self.pc + 1 };
            }
        }
    }

    /// Runs until execution falls off the end of ROM.
    pub fn run(&mut self, max_steps: usize) {
        while self.pc < self.rom.len() {
            assert!(self.steps < max_steps, "step limit reached at pc={}", self.pc);
            self.step();
        }
    }

    /// Runs until the program counter reaches `label`.
    pub fn run_until(&mut self, label: &str, max_steps: usize) {
        let target = self.label(label);
        loop {
            self.step();
            if self.pc == target {
                return;
            }
            assert!(self.pc < self.rom.len(), "ran off the end looking for {}", label);
            assert!(self.steps < max_steps, "step limit reached looking for {}", label);
        }
    }

    pub fn sp(&self) -> i16 {
        self.ram[SP]
    }

    /// Values from the stack base up to SP.
    pub fn stack(&self) -> Vec<i16> {
        self.ram[STACK_BASE as usize..self.sp() as usize].to_vec()
    }

    pub fn top(&self) -> i16 {
        self.ram[self.sp() as usize - 1]
    }

    pub fn depth(&self) -> i16 {
        self.sp() - STACK_BASE
    }

    /// RAM address the assembler gave a variable symbol such as `Foo.0`.
    pub fn variable(&self, name: &str) -> Option<usize> {
        self.variables.get(name).map(|&v| v as usize)
    }
}

/// Translates one unit named `Test` without bootstrap.
pub fn translate(source: &str) -> Vec<String> {
    let program = Program {
        units: vec![Unit::new("Test", parse_source(source).unwrap())],
    };
    translate_program(&program, TranslateOptions::default())
        .unwrap()
        .into_lines()
}

/// Translates and runs a snippet against the standard test frame.
pub fn run(source: &str) -> Cpu {
    let mut cpu = Cpu::new(&translate(source)).with_frame();
    cpu.run(100_000);
    cpu
}
