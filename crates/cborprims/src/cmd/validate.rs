use cborprims_codec::{decode_with_config, CodecConfig};
use tracing::debug;

use crate::cmd::ValidateArgs;
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_validation, OutputFormat, ValidateOutput};

pub fn run(args: ValidateArgs, format: OutputFormat, config: &CodecConfig) -> CliResult<i32> {
    let input = args.input.read()?;
    let out = check(&input, config);
    print_validation(&out, format);

    if out.valid {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}

fn check(input: &[u8], config: &CodecConfig) -> ValidateOutput {
    let error = match decode_with_config(input, config) {
        Ok(_) => None,
        Err(err) => {
            debug!(error = %err, "input rejected");
            Some(err.to_string())
        }
    };

    ValidateOutput {
        schema_id: "https://schemas.3leaps.dev/cborprims/cli/v1/validate.schema.json",
        valid: error.is_none(),
        size: input.len(),
        error,
    }
}
