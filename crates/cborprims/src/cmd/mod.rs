use std::io::Read;
use std::path::PathBuf;

use cborprims_codec::CodecConfig;
use clap::{Args, Subcommand};
use data_encoding::HEXLOWER_PERMISSIVE;
use tracing::debug;

use crate::exit::{io_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod diag;
pub mod encode;
pub mod envinfo;
pub mod validate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode every item in the input and print diagnostic notation.
    Diag(DiagArgs),
    /// Check that the input holds exactly one well-formed item.
    Validate(ValidateArgs),
    /// Encode a JSON document and print the bytes as hex.
    Encode(EncodeArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat, config: &CodecConfig) -> CliResult<i32> {
    match command {
        Command::Diag(args) => diag::run(args, format, config),
        Command::Validate(args) => validate::run(args, format, config),
        Command::Encode(args) => encode::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Envinfo(args) => envinfo::run(args, format, config),
    }
}

/// Where the encoded bytes come from. Stdin is read when neither is given.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Input as hex digits (whitespace ignored).
    pub hex: Option<String>,
    /// Read raw input bytes from file.
    #[arg(long, value_name = "PATH", conflicts_with = "hex")]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    pub fn read(&self) -> CliResult<Vec<u8>> {
        if let Some(hex) = &self.hex {
            return parse_hex(hex);
        }
        if let Some(path) = &self.file {
            debug!(path = %path.display(), "reading input file");
            return std::fs::read(path)
                .map_err(|err| io_error(&format!("failed to read {}", path.display()), err));
        }

        let mut buf = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .map_err(|err| io_error("failed to read stdin", err))?;
        Ok(buf)
    }
}

pub fn parse_hex(text: &str) -> CliResult<Vec<u8>> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    HEXLOWER_PERMISSIVE
        .decode(digits.as_bytes())
        .map_err(|err| CliError::new(USAGE, format!("invalid hex input: {err}")))
}

#[derive(Args, Debug)]
pub struct DiagArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// JSON document to encode.
    #[arg(long, value_name = "TEXT")]
    pub json: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}
