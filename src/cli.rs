// Command-line interface for okomi.
//
// Subcommands: `hash` digests files or stdin, `rand` emits KOMIRAND
// samples, `config` prints build details. Digest lines go to stdout;
// stats and errors go to stderr.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::io::{HashStats, IoError, hash_reader};
use crate::rand::Komirand;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const BUF_SIZE: usize = 64 * 1024;

/// Stream buffer size used by the library surface this binary exposes.
const STREAM_BUF_SIZE: usize = 768;

// ---------------------------------------------------------------------------
// Seed parsing (hexadecimal, 0x prefix optional)
// ---------------------------------------------------------------------------

fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty seed string".into());
    }
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u64::from_str_radix(digits, 16).map_err(|e| format!("invalid seed '{s}': {e}"))
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// KOMIHASH 64-bit hash and KOMIRAND generator.
#[derive(Parser, Debug)]
#[command(
    name = "okomi",
    version,
    about = "KOMIHASH 64-bit hasher",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Hash files (or stdin) and print their digests.
    Hash(HashArgs),
    /// Emit pseudo-random 64-bit samples.
    Rand(RandArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct HashArgs {
    /// Files to hash; `-` or no file means stdin.
    #[arg(value_hint = ValueHint::FilePath)]
    files: Vec<PathBuf>,

    /// Seed as hexadecimal (0x prefix optional).
    #[arg(long, short = 's', value_parser = parse_seed, default_value = "0")]
    seed: u64,

    /// Print digests as JSON records instead of `<digest>  <path>` lines.
    #[arg(long = "json")]
    json_output: bool,
}

#[derive(Args, Debug)]
struct RandArgs {
    /// Number of samples to emit.
    #[arg(long, short = 'n', default_value_t = 8)]
    count: u64,

    /// Seed as hexadecimal (0x prefix optional); warmed up before output.
    #[arg(long, short = 's', value_parser = parse_seed, conflicts_with = "state")]
    seed: Option<u64>,

    /// Raw state words S1 S2 (hexadecimal), emitted without warm-up.
    #[arg(long, num_args = 2, value_parser = parse_seed, value_names = ["S1", "S2"])]
    state: Option<Vec<u64>>,
}

// ---------------------------------------------------------------------------
// Hash command
// ---------------------------------------------------------------------------

fn hash_input(path: &PathBuf, seed: u64) -> Result<HashStats, IoError> {
    if path.as_os_str() == "-" {
        return hash_reader(io::stdin().lock(), seed);
    }
    let file = File::open(path).map_err(|source| IoError::Open {
        path: path.clone(),
        source,
    })?;
    hash_reader(BufReader::with_capacity(BUF_SIZE, file), seed)
}

fn display_name(path: &PathBuf) -> String {
    if path.as_os_str() == "-" {
        "-".into()
    } else {
        path.display().to_string()
    }
}

fn cmd_hash(args: &HashArgs, quiet: bool, verbose: u8) -> i32 {
    let files = if args.files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        args.files.clone()
    };

    let start = Instant::now();

    #[cfg(feature = "parallel")]
    let results: Vec<(PathBuf, Result<HashStats, IoError>)> = {
        use rayon::prelude::*;
        files
            .par_iter()
            .map(|p| (p.clone(), hash_input(p, args.seed)))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results: Vec<(PathBuf, Result<HashStats, IoError>)> = files
        .iter()
        .map(|p| (p.clone(), hash_input(p, args.seed)))
        .collect();

    let mut failures = 0u32;
    let mut total_bytes = 0u64;
    let mut records = Vec::new();

    for (path, result) in &results {
        match result {
            Ok(stats) => {
                total_bytes += stats.bytes;
                if args.json_output {
                    records.push(serde_json::json!({
                        "file": display_name(path),
                        "bytes": stats.bytes,
                        "hash": format!("{:016x}", stats.hash),
                    }));
                } else {
                    println!("{:016x}  {}", stats.hash, display_name(path));
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("okomi: {e}");
            }
        }
    }

    if args.json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!(records)).unwrap()
        );
    }

    if verbose > 0 && !quiet {
        let dt = start.elapsed();
        eprintln!(
            "okomi: {} file(s), {} bytes in {:.3}s",
            results.len() - failures as usize,
            total_bytes,
            dt.as_secs_f64()
        );
    }

    if failures > 0 { 1 } else { 0 }
}

// ---------------------------------------------------------------------------
// Rand command
// ---------------------------------------------------------------------------

fn cmd_rand(args: &RandArgs) -> i32 {
    let mut rng = match (&args.state, args.seed) {
        (Some(state), _) => Komirand::from_state(state[0], state[1]),
        (None, Some(seed)) => Komirand::from_seed(seed),
        (None, None) => Komirand::from_state(0, 0),
    };
    for _ in 0..args.count {
        println!("{:016x}", rng.next_u64());
    }
    0
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    println!("okomi version:          {}", env!("CARGO_PKG_VERSION"));
    println!("digest width:           64 bits");
    println!("stream buffer size:     {STREAM_BUF_SIZE}");
    let multiply = if cfg!(target_pointer_width = "32") {
        "32x32 decomposed"
    } else {
        "native u128"
    };
    println!("multiply backend:       {multiply}");
    let mut features: Vec<&str> = Vec::new();
    if cfg!(feature = "file-io") {
        features.push("file-io");
    }
    if cfg!(feature = "parallel") {
        features.push("parallel");
    }
    println!("features:               {}", features.join(" "));
    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    let exit_code = match &cli.command {
        Cmd::Hash(args) => cmd_hash(args, cli.quiet, cli.verbose),
        Cmd::Rand(args) => cmd_rand(args),
        Cmd::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
