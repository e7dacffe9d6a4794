mod cmd;
mod exit;
mod logging;
mod output;

use cborprims_codec::{CodecConfig, DEFAULT_MAX_DEPTH};
use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "cborprims",
    version,
    about = "Decode, validate and encode CBOR data items"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        env = "CBORPRIMS_LOG_LEVEL",
        default_value = "warn",
        global = true
    )]
    log_level: LogLevel,

    /// Maximum nesting depth accepted while decoding.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH, global = true)]
    max_depth: usize,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let config = CodecConfig {
        max_depth: cli.max_depth,
        ..CodecConfig::default()
    };
    let result = cmd::run(cli.command, format, &config);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
