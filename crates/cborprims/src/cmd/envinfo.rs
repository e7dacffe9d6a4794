use std::collections::BTreeMap;

use cborprims_codec::CodecConfig;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::cmd::EnvinfoArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

const ENV_VARS: &[&str] = &["CBORPRIMS_LOG_LEVEL", "RUST_LOG"];

#[derive(Serialize)]
struct Limits {
    max_depth: usize,
    max_item_size: usize,
}

#[derive(Serialize)]
struct EnvInfoOutput {
    schema_id: &'static str,
    version: &'static str,
    target: &'static str,
    features: Vec<&'static str>,
    limits: Limits,
    environment: BTreeMap<&'static str, Option<String>>,
}

pub fn run(_args: EnvinfoArgs, format: OutputFormat, config: &CodecConfig) -> CliResult<i32> {
    let output = EnvInfoOutput {
        schema_id: "https://schemas.3leaps.dev/cborprims/cli/v1/envinfo.schema.json",
        version: env!("CARGO_PKG_VERSION"),
        target: option_env!("CBORPRIMS_BUILD_TARGET").unwrap_or("unknown"),
        features: active_features(),
        limits: Limits {
            max_depth: config.max_depth,
            max_item_size: config.max_item_size,
        },
        environment: ENV_VARS
            .iter()
            .map(|&name| (name, std::env::var(name).ok()))
            .collect(),
    };

    print_envinfo(&output, format);
    Ok(SUCCESS)
}

fn print_envinfo(output: &EnvInfoOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Table | OutputFormat::Pretty => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["KEY", "VALUE"]);
            for (key, value) in rows(output) {
                table.add_row(vec![key, value]);
            }
            println!("{table}");
        }
        OutputFormat::Raw => println!("{}", output.version),
    }
}

fn rows(output: &EnvInfoOutput) -> Vec<(String, String)> {
    let mut rows = vec![
        ("version".to_string(), output.version.to_string()),
        ("target".to_string(), output.target.to_string()),
        ("features".to_string(), output.features.join(", ")),
        ("max_depth".to_string(), output.limits.max_depth.to_string()),
        (
            "max_item_size".to_string(),
            output.limits.max_item_size.to_string(),
        ),
    ];
    for (name, value) in &output.environment {
        rows.push((
            (*name).to_string(),
            value.clone().unwrap_or_else(|| "(not set)".to_string()),
        ));
    }
    rows
}

fn active_features() -> Vec<&'static str> {
    let mut features = Vec::new();
    if cfg!(feature = "cli") {
        features.push("cli");
    }
    features
}
