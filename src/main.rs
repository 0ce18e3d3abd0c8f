use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use log::info;

use hackvm::codegen::listing::print_listing;
use hackvm::codegen::stack_check::check_commands;
use hackvm::frontend::lexer::Lexer;
use hackvm::frontend::token_dumper::TokenDumper;
use hackvm::loader::{self, LoadError};
use hackvm::{TranslateOptions, translate_program};

#[derive(Debug, Default)]
struct Options {
    input: PathBuf,
    output: Option<PathBuf>,
    /// `None` means: bootstrap when translating a directory that has `Sys.vm`.
    bootstrap: Option<bool>,
    annotate: bool,
    check: bool,
    listing: bool,
    tokens: bool,
    no_color: bool,
    emit_bin: bool,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let options = match parse_args(&args[1..]) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            process::exit(1);
        }
    };

    if options.tokens {
        dump_tokens(&options.input, options.no_color);
        return;
    }

    if let Err(e) = run(&options) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut input = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{} requires a filename", args[i]))?;
                options.output = Some(PathBuf::from(path));
                i += 2;
                continue;
            }
            "--bootstrap" => options.bootstrap = Some(true),
            "--no-bootstrap" => options.bootstrap = Some(false),
            "--annotate" => options.annotate = true,
            "--check" => options.check = true,
            "--listing" => options.listing = true,
            "--tokens" => options.tokens = true,
            "--no-color" => options.no_color = true,
            "--emit-bin" => options.emit_bin = true,
            arg if arg.starts_with('-') => return Err(format!("unknown option '{}'", arg)),
            arg => {
                if input.is_some() {
                    return Err(format!("unexpected extra input '{}'", arg));
                }
                input = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    options.input = input.ok_or("no input file or directory given")?;

    if options.tokens
        && options.input.extension().and_then(|e| e.to_str()) != Some(loader::SOURCE_EXTENSION)
    {
        return Err(format!(
            "--tokens needs a .{} source file, got '{}'",
            loader::SOURCE_EXTENSION,
            options.input.display()
        ));
    }

    Ok(options)
}

fn print_usage() {
    println!("hackvm - VM to Hack assembly translator");
    println!();
    println!("Usage:");
    println!("  hackvm <file.vm>              Translate one file to <file>.asm");
    println!("  hackvm <dir>                  Translate every .vm file to <dir>/<dir>.asm");
    println!("  hackvm <file.vmb>             Translate a binary command stream");
    println!();
    println!("Options:");
    println!("  -o, --output <path>           Output file");
    println!("  --bootstrap / --no-bootstrap  Force the SP=256, call Sys.init preamble on or off");
    println!("  --annotate                    Emit each VM command as a comment");
    println!("  --check                       Fail on operand stack underflow");
    println!("  --listing                     Print the result with ROM addresses");
    println!("  --emit-bin                    Also write the parsed program as .vmb");
    println!("  --tokens [--no-color]         Show the tokens of a .vm file only");
    println!("  -h, --help                    Show this help");
    println!();
    println!("Set RUST_LOG=info or RUST_LOG=debug for progress output.");
}

fn dump_tokens(path: &Path, no_color: bool) {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to read '{}': {}", path.display(), e);
            process::exit(1);
        }
    };

    let mut dumper = TokenDumper::new().pretty();
    if no_color {
        dumper = dumper.no_color();
    }
    dumper.dump(&Lexer::new(&source).tokenize());
}

fn run(options: &Options) -> Result<(), Box<dyn Error>> {
    let program = loader::load_program(&options.input)?;

    if options.check {
        for unit in &program.units {
            check_commands(&unit.commands).map_err(|e| format!("{}: {}", unit.name, e))?;
        }
    }

    let bootstrap = options
        .bootstrap
        .unwrap_or_else(|| options.input.is_dir() && program.units.iter().any(|u| u.name == "Sys"));

    let translate_options = TranslateOptions {
        bootstrap,
        annotate: options.annotate,
    };
    let asm = translate_program(&program, translate_options)?;

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| loader::default_output(&options.input));

    if options.emit_bin {
        let bin_path = output.with_extension(loader::BINARY_EXTENSION);
        if bin_path == options.input {
            info!("{} is the input, not rewriting it", bin_path.display());
        } else {
            loader::write_atomic(&bin_path, &program.to_bytes()?).map_err(|source| {
                LoadError::Io {
                    path: bin_path.clone(),
                    source,
                }
            })?;
            info!("wrote {}", bin_path.display());
        }
    }

    loader::write_atomic(&output, asm.to_text().as_bytes()).map_err(|source| LoadError::Io {
        path: output.clone(),
        source,
    })?;
    info!("wrote {} ({} lines)", output.display(), asm.len());

    if options.listing {
        print_listing(&asm);
    }

    Ok(())
}
