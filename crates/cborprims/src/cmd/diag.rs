use cborprims_codec::{encode_value, encoded_len, CodecConfig, Decoder};
use tracing::debug;

use crate::cmd::DiagArgs;
use crate::exit::{codec_error, CliResult, SUCCESS};
use crate::output::{print_items, ItemRow, OutputFormat};

pub fn run(args: DiagArgs, format: OutputFormat, config: &CodecConfig) -> CliResult<i32> {
    let input = args.input.read()?;
    let (items, canonical) = decode_all(&input, config)?;
    debug!(items = items.len(), size = input.len(), "decoded input");

    print_items(&items, input.len(), &canonical, format);
    Ok(SUCCESS)
}

/// Decode every concatenated item, returning one row per item and the
/// canonical re-encoding of the whole sequence.
pub fn decode_all(input: &[u8], config: &CodecConfig) -> CliResult<(Vec<ItemRow>, Vec<u8>)> {
    let mut decoder = Decoder::with_config(input, config);
    let mut items = Vec::new();
    let mut canonical = Vec::new();

    while !decoder.is_empty() {
        let offset = decoder.position();
        let value = decoder
            .read_value()
            .map_err(|err| codec_error(&format!("item at offset {offset}"), err))?;

        encode_value(&value, &mut canonical);
        items.push(ItemRow {
            offset,
            size: decoder.position() - offset,
            kind: value.kind().name(),
            encoded_len: encoded_len(&value),
            diagnostic: value.to_string(),
        });
    }

    Ok((items, canonical))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::DATA_INVALID;

    #[test]
    fn decodes_concatenated_items() {
        let input = [0x9F, 0x01, 0x02, 0xFF, 0xF6];
        let (items, canonical) = decode_all(&input, &CodecConfig::default()).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].diagnostic, "[1, 2]");
        assert_eq!(items[0].size, 4);
        assert_eq!(items[0].encoded_len, 3);
        assert_eq!(items[1].offset, 4);
        assert_eq!(items[1].kind, "simple");
        assert_eq!(canonical, [0x82, 0x01, 0x02, 0xF6]);
    }

    #[test]
    fn empty_input_has_no_items() {
        let (items, canonical) = decode_all(&[], &CodecConfig::default()).unwrap();
        assert!(items.is_empty());
        assert!(canonical.is_empty());
    }

    #[test]
    fn malformed_item_reports_offset() {
        let err = decode_all(&[0x00, 0x1C], &CodecConfig::default()).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("item at offset 1"));
    }

    #[test]
    fn depth_limit_comes_from_config() {
        let config = CodecConfig {
            max_depth: 1,
            ..CodecConfig::default()
        };
        let err = decode_all(&[0x81, 0x81, 0x00], &config).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }
}
