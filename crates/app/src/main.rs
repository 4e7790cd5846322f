//! huffpack: command-line front end for the HUF1 Huffman codec.
//!
//! ```bash
//! huffpack compress --in notes.txt
//! huffpack decompress --in notes.txt.huff --text
//! huffpack sample --out data.bin --seed 42
//! ```
//!
//! Logging goes to stderr through `tracing`; set `RUST_LOG=debug` (or pass
//! `--verbose`) to see each codec stage.

mod config;
mod input_gen;

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use huffpack_core::text::TextEncoding;
use huffpack_core::{Compressor, ErrorKind, Metrics, Result};

use config::{Command, Config};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("run `huffpack --help` for usage");
            return ExitCode::from(2);
        }
    };

    init_tracing(config.verbose);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(kind = ?e.kind(), "{e}");
            ExitCode::from(exit_code(e.kind()))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Usage => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::EmptyInput => 4,
        ErrorKind::InvalidFormat | ErrorKind::Truncated | ErrorKind::Corrupt => 5,
        _ => 1,
    }
}

fn run(config: &Config) -> Result<()> {
    match config.command {
        Command::Help => {
            config::print_help();
            Ok(())
        }
        Command::Compress => {
            let input = config.input_file.as_deref().ok_or(huffpack_core::Error::NoSource)?;
            let mut compressor = Compressor::new();
            compressor.load_file(input)?;
            let metrics = compressor.compress(&config.output_file)?;

            println!(
                "compressed {} -> {} ({} -> {} bytes, {:.1}%)",
                input.display(),
                config.output_file.display(),
                metrics.raw_bytes,
                metrics.container_bytes,
                metrics.compression_ratio() * 100.0
            );
            report(config, &metrics);
            Ok(())
        }
        Command::Decompress => {
            let input = config.input_file.as_deref().ok_or(huffpack_core::Error::NoSource)?;
            let metrics = if config.text {
                let (metrics, encoding) = huffpack_core::decompress_to_text(input, &config.output_file)?;
                if encoding == TextEncoding::Latin1 {
                    info!("recovered data was not UTF-8; wrote it as Latin-1 text");
                }
                metrics
            } else {
                huffpack_core::decompress(input, &config.output_file)?
            };

            println!(
                "decompressed {} -> {} ({} bytes, crc32 {:08x})",
                input.display(),
                config.output_file.display(),
                metrics.raw_bytes,
                metrics.raw_crc32
            );
            report(config, &metrics);
            Ok(())
        }
        Command::Sample => {
            let written = input_gen::write_sample_file(
                &config.output_file,
                config.sample_kind,
                config.seed,
                config.sample_bytes,
            )?;
            println!(
                "wrote {} bytes of {:?} sample data to {} (seed {})",
                written,
                config.sample_kind,
                config.output_file.display(),
                config.seed
            );
            Ok(())
        }
    }
}

fn report(config: &Config, metrics: &Metrics) {
    if config.print_metrics {
        print!("{}", metrics.export_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_for(args: &[&str]) -> Config {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Config::from_args(&args).unwrap()
    }

    #[test]
    fn test_sample_compress_decompress() {
        let dir = tempdir().unwrap();
        let sample = dir.path().join("sample.bin");
        let sample_str = sample.to_str().unwrap();

        run(&config_for(&["sample", "--out", sample_str, "--size", "20000", "--seed", "7"])).unwrap();
        run(&config_for(&["compress", "--in", sample_str])).unwrap();

        let packed = dir.path().join("sample.bin.huff");
        assert!(packed.exists());
        run(&config_for(&["decompress", "--in", packed.to_str().unwrap()])).unwrap();

        let restored = dir.path().join("sample.bin_recuperado.bin");
        assert_eq!(std::fs::read(restored).unwrap(), std::fs::read(&sample).unwrap());
    }

    #[test]
    fn test_text_round_trip() {
        let dir = tempdir().unwrap();
        let sample = dir.path().join("words.txt");
        let sample_str = sample.to_str().unwrap();

        run(&config_for(&["sample", "--out", sample_str, "--kind", "text", "--size", "3000", "--seed", "1"]))
            .unwrap();
        run(&config_for(&["compress", sample_str, "--out", dir.path().join("words").to_str().unwrap()]))
            .unwrap();
        run(&config_for(&["decompress", dir.path().join("words.huff").to_str().unwrap(), "--text"])).unwrap();

        let restored = dir.path().join("words_recuperado.txt");
        assert_eq!(
            std::fs::read_to_string(restored).unwrap(),
            std::fs::read_to_string(&sample).unwrap()
        );
    }

    #[test]
    fn test_errors_map_to_exit_codes() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let err = run(&config_for(&["compress", missing.to_str().unwrap()])).unwrap_err();
        assert_eq!(exit_code(err.kind()), 3);

        let empty = dir.path().join("empty.txt");
        std::fs::write(&empty, b"").unwrap();
        let err = run(&config_for(&["compress", empty.to_str().unwrap()])).unwrap_err();
        assert_eq!(exit_code(err.kind()), 4);
        assert!(!dir.path().join("empty.txt.huff").exists());

        let bogus = dir.path().join("bogus.huff");
        std::fs::write(&bogus, b"not a container").unwrap();
        let err = run(&config_for(&["decompress", bogus.to_str().unwrap()])).unwrap_err();
        assert_eq!(exit_code(err.kind()), 5);
    }
}
