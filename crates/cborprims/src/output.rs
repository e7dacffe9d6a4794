use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One decoded item as reported by `diag`.
#[derive(Debug, Serialize)]
pub struct ItemRow {
    pub offset: usize,
    /// Bytes the item occupied in the input.
    pub size: usize,
    pub kind: &'static str,
    /// Length of the canonical re-encoding.
    pub encoded_len: usize,
    pub diagnostic: String,
}

#[derive(Serialize)]
struct DiagOutput<'a> {
    schema_id: &'a str,
    size: usize,
    items: &'a [ItemRow],
}

#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub schema_id: &'static str,
    pub valid: bool,
    pub size: usize,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EncodeOutput {
    pub schema_id: &'static str,
    pub size: usize,
    pub hex: String,
    pub diagnostic: String,
}

pub fn print_items(items: &[ItemRow], size: usize, canonical: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = DiagOutput {
                schema_id: "https://schemas.3leaps.dev/cborprims/cli/v1/diag.schema.json",
                size,
                items,
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "OFFSET", "KIND", "SIZE", "DIAGNOSTIC"]);
            for (index, item) in items.iter().enumerate() {
                table.add_row(vec![
                    index.to_string(),
                    item.offset.to_string(),
                    item.kind.to_string(),
                    item.size.to_string(),
                    item.diagnostic.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for item in items {
                println!("{}", item.diagnostic);
            }
        }
        OutputFormat::Raw => print_raw(canonical),
    }
}

pub fn print_validation(out: &ValidateOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["VALID", "SIZE", "ERROR"])
                .add_row(vec![
                    out.valid.to_string(),
                    out.size.to_string(),
                    out.error.clone().unwrap_or_default(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => match &out.error {
            None => println!("valid ({} bytes)", out.size),
            Some(err) => println!("invalid: {err}"),
        },
    }
}

pub fn print_encoded(out: &EncodeOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SIZE", "HEX", "DIAGNOSTIC"])
                .add_row(vec![
                    out.size.to_string(),
                    out.hex.clone(),
                    out.diagnostic.clone(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => println!("{}", out.hex),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize>(out: &T) {
    println!(
        "{}",
        serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
    );
}
