//! rc4hash - message digests from the ARCFOUR keystream
//!
//! Hashes each named file, or standard input when none is given, and prints
//! one digest per input.

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, ArgGroup, Parser};
use rc4hash_core::digest::DEFAULT_DIGEST_BITS;
use rc4hash_core::{Alphabet, Arcfour, DigestConfig, absorb_reader, write_symbols};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const WRITE_ERROR: &str = "Write error!";

/// Compute RC4-based message digests of files or standard input.
#[derive(Parser, Debug)]
#[command(name = "rc4hash")]
#[command(version, about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(group(ArgGroup::new("alphabet").args(["hex", "raw"])))]
#[command(group(ArgGroup::new("length").args(["bits", "bytes"])))]
struct Args {
    /// Files to hash (standard input if none)
    files: Vec<PathBuf>,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Output the digest as hexadecimal digits
    #[arg(short = 'x', long, action = ArgAction::SetTrue)]
    hex: bool,

    /// Output the digest as raw bytes
    #[arg(short = 'r', long, action = ArgAction::SetTrue)]
    raw: bool,

    /// Digest length in bits [default: 256]
    #[arg(short = 'b', long = "bits", value_name = "N")]
    bits: Option<u64>,

    /// Digest length in bytes
    #[arg(short = 'B', long = "bytes", value_name = "N")]
    bytes: Option<u64>,
}

impl Args {
    fn alphabet(&self) -> Alphabet {
        if self.hex {
            Alphabet::Hex
        } else if self.raw {
            Alphabet::Raw
        } else {
            Alphabet::Base32
        }
    }

    fn digest_config(&self) -> rc4hash_core::Result<DigestConfig> {
        let alphabet = self.alphabet();
        match (self.bits, self.bytes) {
            (_, Some(bytes)) => DigestConfig::from_bytes(bytes, alphabet),
            (Some(bits), None) => DigestConfig::new(bits, alphabet),
            (None, None) => DigestConfig::new(DEFAULT_DIGEST_BITS, alphabet),
        }
    }
}

fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Stream one digest line out of a keyed `engine`, labelled with `label`
/// when files were named.
///
/// Encoded digests end in a newline with the label after a space; raw
/// digests are followed directly by the label and a NUL.
fn write_digest<W: Write>(
    out: &mut W,
    engine: Arcfour,
    config: &DigestConfig,
    label: Option<&Path>,
) -> io::Result<()> {
    write_symbols(engine, config, out)?;
    let encoded = config.alphabet().is_encoded();
    if let Some(path) = label {
        if encoded {
            out.write_all(b" ")?;
        }
        out.write_all(path.as_os_str().as_encoded_bytes())?;
        if !encoded {
            out.write_all(b"\0")?;
        }
    }
    if encoded {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Absorb one named file.
fn absorb_file(path: &Path) -> Result<Arcfour> {
    let file =
        File::open(path).with_context(|| format!("Could not open \"{}\"!", path.display()))?;
    absorb_reader(file).with_context(|| format!("Error reading \"{}\"!", path.display()))
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let config = args.digest_config().map_err(|e| {
        debug!(error = %e, "rejected digest configuration");
        anyhow!("Invalid digest size requested!")
    })?;
    debug!(?config, files = args.files.len(), "starting");

    if args.files.is_empty() {
        let engine = absorb_reader(io::stdin().lock()).context("Read error!")?;
        write_digest(out, engine, &config, None).context(WRITE_ERROR)?;
        return Ok(());
    }

    for path in &args.files {
        let engine = absorb_file(path)?;
        debug!(path = %path.display(), "absorbed");
        write_digest(out, engine, &config, Some(path)).context(WRITE_ERROR)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    let mut out = BufWriter::new(io::stdout().lock());
    let result = run(&args, &mut out).and_then(|()| out.flush().context(WRITE_ERROR));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Keep digests of earlier inputs even when a later one failed.
            let _ = out.flush();
            debug!("{e:#}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
