/// Default limit on nesting of arrays, maps and tags.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default maximum size of one streamed item: 16 MiB.
pub const DEFAULT_MAX_ITEM_SIZE: usize = 16 * 1024 * 1024;

/// Configuration for the decoder and the streaming reader/writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Maximum nesting of arrays, maps and tags. Default: 256.
    pub max_depth: usize,
    /// Maximum bytes buffered for a single item by `ValueReader`. Default: 16 MiB.
    pub max_item_size: usize,
}

impl CodecConfig {
    /// No practical limits. Only for trusted input.
    pub const fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
            max_item_size: usize::MAX,
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_item_size: DEFAULT_MAX_ITEM_SIZE,
        }
    }
}
