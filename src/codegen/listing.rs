use std::collections::HashSet;

use crate::codegen::sink::AsmSink;

/// Print the generated program with ROM addresses.
pub fn print_listing(sink: &AsmSink) {
    println!("════════════════════════════════════════");
    println!(" {} lines, {} instructions", sink.len(), instruction_count(sink.lines()));
    println!("════════════════════════════════════════");
    for line in format_listing(sink.lines()) {
        println!("{}", line);
    }
}

/// Number of lines that occupy a ROM word (everything but labels and comments).
pub fn instruction_count(lines: &[String]) -> usize {
    lines.iter().filter(|l| is_instruction(l)).count()
}

fn is_instruction(line: &str) -> bool {
    !(line.starts_with('(') || line.starts_with("//"))
}

/// Labels loaded into A right before a jump.
fn collect_jump_targets(lines: &[String]) -> HashSet<&str> {
    let mut targets = HashSet::new();

    for pair in lines.windows(2) {
        if let Some(symbol) = pair[0].strip_prefix('@') {
            if pair[1].contains(";J") {
                targets.insert(symbol);
            }
        }
    }

    targets
}

/// One output line per input line. Instructions carry their ROM address;
/// a label shows the address it resolves to, marked `►` when something jumps
/// to it.
pub fn format_listing(lines: &[String]) -> Vec<String> {
    let jump_targets = collect_jump_targets(lines);
    let mut out = Vec::with_capacity(lines.len());
    let mut address = 0usize;

    for line in lines {
        if let Some(name) = line.strip_prefix('(').and_then(|l| l.strip_suffix(')')) {
            if jump_targets.contains(name) {
                out.push("      ┌──────────────────────────────────".to_string());
                out.push(format!("{:04} ► {}", address, line));
            } else {
                out.push(format!("{:04}   {}", address, line));
            }
        } else if line.starts_with("//") {
            out.push(format!("       {}", line));
        } else {
            out.push(format!("{:04}     {}", address, line));
            address += 1;
        }
    }

    out
}
