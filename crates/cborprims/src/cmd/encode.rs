use cborprims_codec::{encode, Value, ValueWriter};
use data_encoding::HEXLOWER;
use serde_json::Value as Json;
use tracing::debug;

use crate::cmd::EncodeArgs;
use crate::exit::{codec_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_encoded, EncodeOutput, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let json: Json = serde_json::from_str(&args.json)
        .map_err(|err| CliError::new(USAGE, format!("invalid JSON: {err}")))?;
    let value = from_json(&json);

    if let OutputFormat::Raw = format {
        let mut writer = ValueWriter::new(std::io::stdout().lock());
        writer
            .write_value(&value)
            .map_err(|err| codec_error("failed to write item", err))?;
        return Ok(SUCCESS);
    }

    let bytes = encode(&value);
    debug!(size = bytes.len(), "encoded JSON input");

    let out = EncodeOutput {
        schema_id: "https://schemas.3leaps.dev/cborprims/cli/v1/encode.schema.json",
        size: bytes.len(),
        hex: HEXLOWER.encode(&bytes),
        diagnostic: value.to_string(),
    };
    print_encoded(&out, format);
    Ok(SUCCESS)
}

/// Map a JSON document onto the value model. Integers that fit `u64`/`i64`
/// stay integers; every other number becomes a float.
pub fn from_json(json: &Json) -> Value {
    match json {
        Json::Null => Value::null(),
        Json::Bool(b) => Value::bool(*b),
        Json::Number(n) => {
            if let Some(u) = n.as_u64() {
                Value::from(u)
            } else if let Some(i) = n.as_i64() {
                Value::from(i)
            } else {
                Value::float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Json::String(s) => Value::text(s.as_str()),
        Json::Array(items) => items.iter().map(from_json).collect(),
        Json::Object(fields) => Value::Map(
            fields
                .iter()
                .map(|(k, v)| (Value::text(k.as_str()), from_json(v)))
                .collect(),
        ),
    }
}
