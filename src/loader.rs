//! Reading inputs and writing the output file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::frontend::{ParserError, parse_source};
use crate::lang::{Program, Unit};

pub const SOURCE_EXTENSION: &str = "vm";
pub const BINARY_EXTENSION: &str = "vmb";
pub const OUTPUT_EXTENSION: &str = "asm";

#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, error: ParserError },
    Decode { path: PathBuf, source: postcard::Error },
    /// A directory without any `.vm` file.
    NoSources(PathBuf),
    /// A file that is neither `.vm` nor `.vmb`.
    BadExtension(PathBuf),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            LoadError::Parse { path, error } => {
                write!(f, "parse error: {}:{}", path.display(), error)
            }
            LoadError::Decode { path, source } => {
                write!(f, "{}: invalid .{} file: {}", path.display(), BINARY_EXTENSION, source)
            }
            LoadError::NoSources(path) => {
                write!(f, "{}: no .{} files found", path.display(), SOURCE_EXTENSION)
            }
            LoadError::BadExtension(path) => write!(
                f,
                "expected a .{} or .{} file or a directory, got {}",
                SOURCE_EXTENSION,
                BINARY_EXTENSION,
                path.display()
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse { error, .. } => Some(error),
            LoadError::Decode { source, .. } => Some(source),
            LoadError::NoSources(_) | LoadError::BadExtension(_) => None,
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> LoadError + '_ {
    move |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(ext)
}

/// File stem of the input, used as the unit name for `static` symbols.
pub fn unit_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Loads a `.vm` file, a `.vmb` file, or every `.vm` file of a directory
/// (in file-name order).
pub fn load_program(path: &Path) -> Result<Program, LoadError> {
    if path.is_dir() {
        load_directory(path)
    } else if has_extension(path, SOURCE_EXTENSION) {
        Ok(Program {
            units: vec![load_unit(path)?],
        })
    } else if has_extension(path, BINARY_EXTENSION) {
        let bytes = fs::read(path).map_err(io_error(path))?;
        let program = Program::from_bytes(&bytes).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "decoded {}: {} units, {} commands",
            path.display(),
            program.units.len(),
            program.command_count()
        );
        Ok(program)
    } else {
        Err(LoadError::BadExtension(path.to_path_buf()))
    }
}

fn load_directory(dir: &Path) -> Result<Program, LoadError> {
    let mut sources = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        if path.is_file() && has_extension(&path, SOURCE_EXTENSION) {
            sources.push(path);
        }
    }
    sources.sort();

    if sources.is_empty() {
        return Err(LoadError::NoSources(dir.to_path_buf()));
    }

    let units = sources
        .iter()
        .map(|path| load_unit(path))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Program { units })
}

pub fn load_unit(path: &Path) -> Result<Unit, LoadError> {
    let source = fs::read_to_string(path).map_err(io_error(path))?;
    let commands = parse_source(&source).map_err(|error| LoadError::Parse {
        path: path.to_path_buf(),
        error,
    })?;
    debug!("parsed {}: {} commands", path.display(), commands.len());
    Ok(Unit::new(unit_name(path), commands))
}

/// `Prog.vm` -> `Prog.asm`; directory `Prog/` -> `Prog/Prog.asm`.
pub fn default_output(input: &Path) -> PathBuf {
    if input.is_dir() {
        let name = input
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "out".to_string());
        input.join(format!("{}.{}", name, OUTPUT_EXTENSION))
    } else {
        input.with_extension(OUTPUT_EXTENSION)
    }
}

/// Writes `contents` to a sibling temp file and renames it over `path`, so a
/// failed run never leaves a partial output behind.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}
