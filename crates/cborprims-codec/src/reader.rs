use std::io::{ErrorKind, Read};
use std::iter::FusedIterator;

use bytes::BytesMut;
use cborprims_value::Value;
use tracing::debug;

use crate::config::CodecConfig;
use crate::decode::decode_value;
use crate::error::{CodecError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete items from any `Read` stream.
///
/// Handles partial reads internally, so callers always get complete items.
pub struct ValueReader<T> {
    inner: T,
    buf: BytesMut,
    config: CodecConfig,
    finished: bool,
}

impl<T: Read> ValueReader<T> {
    /// Create a new value reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Create a new value reader with explicit configuration.
    pub fn with_config(inner: T, config: CodecConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
            finished: false,
        }
    }

    /// Read the next complete item (blocking).
    ///
    /// Returns `Ok(None)` at a clean end of stream, and
    /// `Err(CodecError::UnexpectedEof)` when the stream ends mid-item.
    pub fn read_value(&mut self) -> Result<Option<Value>> {
        loop {
            if let Some(value) = decode_value(&mut self.buf, &self.config)? {
                return Ok(Some(value));
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CodecError::Io(err)),
            };

            if read == 0 {
                if self.buf.is_empty() {
                    debug!("end of stream");
                    return Ok(None);
                }
                debug!(buffered = self.buf.len(), "stream ended mid-item");
                return Err(CodecError::UnexpectedEof);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Bytes read from the stream but not yet decoded.
    pub fn buffered(&self) -> &[u8] {
        &self.buf
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update the nesting limit for subsequent reads.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.config.max_depth = max_depth;
    }

    /// Current value reader configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

/// Yields items until the end of the stream or the first error, then stops.
impl<T: Read> Iterator for ValueReader<T> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = self.read_value().transpose();
        if !matches!(item, Some(Ok(_))) {
            self.finished = true;
        }
        item
    }
}

impl<T: Read> FusedIterator for ValueReader<T> {}
