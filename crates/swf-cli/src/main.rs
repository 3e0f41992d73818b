/// SWF command-line tool — inspect and validate the header of `.swf` files.
///
/// # Command overview
///
/// ```text
/// swf <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print the header, frame size, frame rate and frame count
///   validate   Check that the header and body decode cleanly
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log each scan stage to stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// Logs and error details go to stderr so stdout can be piped cleanly.
/// `RUST_LOG` overrides the log filter chosen by `--verbose`.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use swf_scanner::{BodyMode, ScanConfig, SignaturePolicy};
use tracing_subscriber::EnvFilter;

mod cmd_inspect;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Read the header of Shockwave Flash files.
#[derive(Parser)]
#[command(name = "swf", version, about = "SWF header scanner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log each scan stage (header, dispatch, body, frame size) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the header, frame size, frame rate and frame count of a file.
    Inspect(InspectArgs),
    /// Check that a file's header and body decode cleanly.
    Validate(ValidateArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Options shared by every command that scans a file.
///
/// ```text
/// ┌─────────────────┬──────────────────────────────────────────────────────┐
/// │ Flag            │ Effect                                               │
/// ├─────────────────┼──────────────────────────────────────────────────────┤
/// │ --strict        │ Reject signatures whose bytes 1–2 are not "WS"       │
/// │ --max-body-size │ Largest uncompressed body accepted (default 256 MiB) │
/// └─────────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct ScanArgs {
    /// Path to the `.swf` file.
    pub file: PathBuf,

    /// Reject signatures whose bytes 1–2 are not "WS".
    #[arg(long)]
    pub strict: bool,

    /// Largest uncompressed body, in bytes, the scanner will accept.
    #[arg(long)]
    pub max_body_size: Option<usize>,
}

impl ScanArgs {
    /// Build a scanner configuration from the flags.
    pub fn config(&self, body_mode: BodyMode) -> ScanConfig {
        let defaults = ScanConfig::default();
        ScanConfig {
            signature_policy: if self.strict {
                SignaturePolicy::Strict
            } else {
                SignaturePolicy::Permissive
            },
            body_mode,
            max_body_size: self.max_body_size.unwrap_or(defaults.max_body_size),
        }
    }
}

/// Arguments for `swf inspect`.
///
/// By default the whole body is read and decompressed. `--streaming` stops
/// as soon as the frame count is known, which is much faster on large
/// files but does not notice damage further into a compressed body.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Print the result as a JSON object.
    #[arg(long)]
    pub json: bool,

    /// Only decompress as much of the body as the header fields need.
    #[arg(long)]
    pub streaming: bool,
}

/// Arguments for `swf validate`.
///
/// Always reads and decompresses the entire body. The process exits with
/// code 0 on success and code 1 on any problem.
#[derive(clap::Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub scan: ScanArgs,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn inspect_flags_map_onto_config() {
        let cli = Cli::parse_from([
            "swf",
            "inspect",
            "movie.swf",
            "--strict",
            "--streaming",
            "--max-body-size",
            "4096",
        ]);
        let Commands::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert!(args.streaming);
        let config = args.scan.config(BodyMode::Streaming);
        assert_eq!(config.signature_policy, SignaturePolicy::Strict);
        assert_eq!(config.body_mode, BodyMode::Streaming);
        assert_eq!(config.max_body_size, 4096);
    }

    #[test]
    fn validate_defaults() {
        let cli = Cli::parse_from(["swf", "-v", "validate", "movie.swf"]);
        assert!(cli.verbose);
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.scan.config(BodyMode::Buffered), ScanConfig::default());
    }
}
