/// BlazorPack command-line tool: decode, inspect, validate, and encode
/// captured Blazor Server request bodies.
///
/// # Command overview
///
/// ```text
/// bpk <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Render a request body as JSON or one line per message
///   inspect    Print the frame layout of a request body
///   validate   Check that every frame of a request body decodes cleanly
///   encode     Build a request body from rendered JSON
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Raise log verbosity (-v debug, -vv trace)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// Bodies are read from a file or from stdin when the path is `-`.
/// `--hex` accepts a hex dump instead of raw bytes (whitespace is
/// ignored), which is how bodies usually come out of a proxy's history.
///
/// # Exit codes
///
/// | Code | Meaning                                        |
/// |------|------------------------------------------------|
/// | 0    | Success                                        |
/// | 1    | Error (I/O failure, invalid input, validation) |
///
/// Logs and error details go to stderr so stdout can be piped cleanly.
/// `RUST_LOG` overrides the `-v` level.
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_encode;
mod cmd_inspect;
mod cmd_validate;
mod input;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The BlazorPack command-line tool.
#[derive(Parser)]
#[command(name = "bpk", version, about = "BlazorPack (SignalR MessagePack) decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise log verbosity; repeat for more.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Render a request body as JSON or one line per message.
    Decode(DecodeArgs),
    /// Print the frame layout of a request body.
    Inspect(InspectArgs),
    /// Check that every frame of a request body decodes cleanly.
    Validate(ValidateArgs),
    /// Build a request body from rendered JSON.
    Encode(EncodeArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Where a request body comes from.
#[derive(clap::Args)]
pub struct InputArgs {
    /// Body file, or `-` for stdin.
    pub file: PathBuf,

    /// Treat the input as a hex dump.
    #[arg(long)]
    pub hex: bool,
}

/// Arguments for `bpk decode`.
///
/// ```text
/// ┌──────────────────┬───────────────────────────────────────────────────┐
/// │ Flag             │ Values / default                                  │
/// ├──────────────────┼───────────────────────────────────────────────────┤
/// │ --mode           │ json (default) | pretty | minimal                 │
/// │ --binary         │ hex (default) | base64                            │
/// │ --names          │ add SignalR kind names                            │
/// │ --max-depth      │ container nesting limit (default 64)              │
/// │ --max-message    │ largest accepted frame in bytes                   │
/// │ -o / --output    │ write to file instead of stdout                   │
/// └──────────────────┴───────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format: `json`, `pretty`, or `minimal`.
    #[arg(long, default_value = "json")]
    pub mode: String,

    /// Encoding for binary values: `hex` or `base64`.
    #[arg(long, default_value = "hex")]
    pub binary: String,

    /// Add a `name` field with the SignalR message kind.
    #[arg(long)]
    pub names: bool,

    /// Maximum container nesting depth.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Maximum declared frame length in bytes.
    #[arg(long)]
    pub max_message: Option<usize>,

    /// Write rendered output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `bpk inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for `bpk validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for `bpk encode`.
///
/// Reads rendered JSON (as produced by `bpk decode`), possibly edited,
/// and packs it back into a request body. `$error` markers are ignored.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// JSON file, or `-` for stdin.
    pub input: PathBuf,

    /// Output body file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Write a hex dump instead of raw bytes.
    #[arg(long)]
    pub hex: bool,

    /// Encoding of `$binary` values in the input: `hex` or `base64`.
    #[arg(long, default_value = "hex")]
    pub binary: String,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Encode(args) => cmd_encode::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
