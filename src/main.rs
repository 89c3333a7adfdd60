use log::{Level, LevelFilter, Log, Metadata, Record};
use notegrid::{load_piece, render_with, EditorError, PieceFile, PieceRegistry};
use std::env;
use std::fs;
use std::process;

const USAGE: &str = "\
Usage: notegrid [--verbose] <piece.yaml>
       notegrid [--verbose] --notes <piece.yaml>
       notegrid [--verbose] --at <beat> <piece.yaml>
       notegrid [--verbose] --overlay <piece.yaml> <other.yaml>
       notegrid [--verbose] --append <piece.yaml> <other.yaml>";

/// Writes debug and louder log records to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn usage() -> ! {
    fail(USAGE)
}

fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail(&format!("Error reading file '{}': {}", path, e)),
    }
}

fn read_piece(path: &str) -> PieceFile {
    match PieceFile::from_yaml(&read_source(path)) {
        Ok(file) => file,
        Err(e) => fail(&format!("{}: {}", path, e)),
    }
}

fn to_yaml<T: serde::Serialize>(value: &T) -> String {
    match serde_yaml::to_string(value) {
        Ok(text) => text,
        Err(e) => fail(&format!("Error writing YAML: {}", e)),
    }
}

enum Merge {
    Overlay,
    Append,
}

/// Load `base` and `other`, merge `other` into `base`, and render the result.
///
/// The two files are loaded as separate pieces, so they may share a title or
/// be the same file.
fn merge(base_path: &str, other_path: &str, how: Merge) -> Result<String, EditorError> {
    let (mut base, grid) = load_piece(&read_source(base_path))?;
    let (other, _) = load_piece(&read_source(other_path))?;
    let summary = match how {
        Merge::Overlay => base.overlay(&other),
        Merge::Append => base.add_to_end(&other)?,
    };
    if summary.collisions > 0 {
        eprintln!(
            "{} note(s) from '{}' overlapped existing notes and were dropped",
            summary.collisions, other_path
        );
    }
    Ok(render_with(&base, &grid))
}

fn main() {
    let mut args: Vec<String> = env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--verbose") {
        args.remove(0);
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Debug);
        }
    }

    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let result = match args.as_slice() {
        ["--notes", path] => {
            let file = read_piece(path);
            let mut registry = PieceRegistry::new();
            file.load_into(&mut registry)
                .and_then(|_| registry.notes())
                .map(|notes| to_yaml(&notes))
        }
        ["--at", beat, path] => {
            let beat: u64 = match beat.parse() {
                Ok(beat) => beat,
                Err(_) => fail(&format!("Invalid beat '{}'", beat)),
            };
            let file = read_piece(path);
            let mut registry = PieceRegistry::new();
            file.load_into(&mut registry)
                .and_then(|_| registry.notes_at(beat))
                .map(|notes| to_yaml(&notes))
        }
        ["--overlay", base, other] => merge(base, other, Merge::Overlay),
        ["--append", base, other] => merge(base, other, Merge::Append),
        [path] if !path.starts_with("--") => {
            let file = read_piece(path);
            let mut registry = PieceRegistry::new();
            file.load_into(&mut registry)
                .and_then(|_| registry.open_piece().map(|piece| render_with(piece, &file.grid)))
        }
        _ => usage(),
    };

    match result {
        Ok(text) => print!("{}", text),
        Err(e) => fail(&format!("Error: {}", e)),
    }
}
