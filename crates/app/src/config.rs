//! Configuration for the huffpack command-line tool.
//!
//! Parses the command word and flags into a fully resolved `Config`. Every
//! default (output paths, sample size, seed) is filled in here so the rest of
//! the program never guesses.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use huffpack_core::{Error, Result};

use crate::input_gen::SampleKind;

/// Extension given to containers.
pub const CONTAINER_EXT: &str = "huff";

/// What the tool should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Compress,
    Decompress,
    Sample,
    Help,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,

    // === Files ===
    /// Source file (compress) or container (decompress)
    pub input_file: Option<PathBuf>,

    /// Destination file
    pub output_file: PathBuf,

    // === Decompress ===
    /// Write recovered bytes as UTF-8 text (Latin-1 fallback)
    pub text: bool,

    // === Sample generation ===
    pub sample_bytes: usize,
    pub sample_kind: SampleKind,
    pub seed: u64,

    // === Behavior ===
    /// Print key=value metrics after the operation
    pub print_metrics: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    pub fn from_args(args: &[String]) -> Result<Self> {
        let Some((command, flags)) = args.split_first() else {
            return Err(config_err("missing command (compress, decompress or sample)"));
        };

        let command = match command.as_str() {
            "compress" | "c" => Command::Compress,
            "decompress" | "d" => Command::Decompress,
            "sample" => Command::Sample,
            "help" | "--help" | "-h" => Command::Help,
            other => return Err(config_err(format!("unknown command: {other}"))),
        };

        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut text = false;
        let mut sample_bytes: Option<usize> = None;
        let mut sample_kind = SampleKind::Mixed;
        let mut seed: Option<u64> = None;
        let mut print_metrics = false;
        let mut verbose = false;

        let mut i = 0;
        while i < flags.len() {
            match flags[i].as_str() {
                "--in" => {
                    input_file = Some(PathBuf::from(flag_value(flags, &mut i, "a path")?));
                }
                "--out" => {
                    output_file = Some(PathBuf::from(flag_value(flags, &mut i, "a path")?));
                }
                "--text" => text = true,
                "--size" => {
                    let value = flag_value(flags, &mut i, "a number")?;
                    sample_bytes =
                        Some(value.parse().map_err(|_| config_err(format!("invalid size: {value}")))?);
                }
                "--kind" => {
                    sample_kind = match flag_value(flags, &mut i, "mixed or text")? {
                        "mixed" => SampleKind::Mixed,
                        "text" => SampleKind::Text,
                        other => return Err(config_err(format!("invalid sample kind: {other}"))),
                    };
                }
                "--seed" => {
                    let value = flag_value(flags, &mut i, "a number")?;
                    seed = Some(value.parse().map_err(|_| config_err(format!("invalid seed: {value}")))?);
                }
                "--metrics" => print_metrics = true,
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => {
                    return Ok(Self::help());
                }
                other => {
                    // a bare path is accepted as the input
                    if !other.starts_with('-') && input_file.is_none() {
                        input_file = Some(PathBuf::from(other));
                    } else {
                        return Err(config_err(format!("unknown argument: {other}")));
                    }
                }
            }
            i += 1;
        }

        let output_file = match command {
            Command::Help => PathBuf::new(),
            Command::Compress => {
                let input = input_file.as_deref().ok_or_else(|| config_err("compress requires --in <PATH>"))?;
                match output_file {
                    Some(out) => with_container_ext(out),
                    None => append_ext(input, CONTAINER_EXT),
                }
            }
            Command::Decompress => {
                let input = input_file.as_deref().ok_or_else(|| config_err("decompress requires --in <PATH>"))?;
                output_file.unwrap_or_else(|| recovered_path(input, text))
            }
            Command::Sample => output_file.unwrap_or_else(|| PathBuf::from("./sample.bin")),
        };

        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            command,
            input_file,
            output_file,
            text,
            sample_bytes: sample_bytes.unwrap_or(65536),
            sample_kind,
            seed,
            print_metrics,
            verbose,
        })
    }

    fn help() -> Self {
        Config {
            command: Command::Help,
            input_file: None,
            output_file: PathBuf::new(),
            text: false,
            sample_bytes: 0,
            sample_kind: SampleKind::Mixed,
            seed: 0,
            print_metrics: false,
            verbose: false,
        }
    }
}

fn config_err(message: impl Into<String>) -> Error {
    Error::Config(message.into())
}

/// Advance past a flag and return its value.
fn flag_value<'a>(flags: &'a [String], i: &mut usize, what: &str) -> Result<&'a str> {
    let flag = &flags[*i];
    *i += 1;
    flags
        .get(*i)
        .map(String::as_str)
        .ok_or_else(|| config_err(format!("{flag} requires {what}")))
}

/// `name.txt` -> `name.txt.huff`
fn append_ext(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Ensure a container output path ends in `.huff`.
fn with_container_ext(path: PathBuf) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == CONTAINER_EXT) {
        path
    } else {
        append_ext(&path, CONTAINER_EXT)
    }
}

/// `dir/name.huff` -> `dir/name_recuperado.txt` (or `.bin` for raw output)
fn recovered_path(container: &Path, text: bool) -> PathBuf {
    let stem = container
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let ext = if text { "txt" } else { "bin" };
    container.with_file_name(format!("{stem}_recuperado.{ext}"))
}

pub fn print_help() {
    println!("huffpack: Huffman compression with the HUF1 container");
    println!();
    println!("USAGE:");
    println!("    huffpack <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    compress, c             Compress --in into a .huff container");
    println!("    decompress, d           Restore the original bytes from a container");
    println!("    sample                  Generate a sample input file");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>             Input file (a bare path also works)");
    println!("    --out <PATH>            Output file");
    println!("                              compress:   <in>.huff");
    println!("                              decompress: <stem>_recuperado.bin (.txt with --text)");
    println!("                              sample:     ./sample.bin");
    println!("    --text                  Decompress as UTF-8 text, falling back to Latin-1");
    println!();
    println!("    --size <N>              Sample size in bytes (default: 65536)");
    println!("    --kind <mixed|text>     Sample content (default: mixed)");
    println!("    --seed <N>              Sample seed (default: time-based)");
    println!();
    println!("    --metrics               Print key=value metrics");
    println!("    --verbose, -v           Debug logging (RUST_LOG overrides)");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffpack compress --in notes.txt               # writes notes.txt.huff");
    println!("    huffpack decompress --in notes.txt.huff --text # writes notes.txt_recuperado.txt");
    println!("    huffpack sample --out data.bin --seed 42 --size 100000");
    println!();
}
