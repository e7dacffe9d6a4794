use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use cborprims_value::Value;
use tracing::trace;

use crate::config::CodecConfig;
use crate::encode::encode_value;
use crate::error::{CodecError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes complete items to any `Write` stream.
pub struct ValueWriter<T> {
    inner: T,
    buf: BytesMut,
    config: CodecConfig,
}

impl<T: Write> ValueWriter<T> {
    /// Create a new value writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Create a new value writer with explicit configuration.
    pub fn with_config(inner: T, config: CodecConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Encode and write one item, then flush (blocking).
    ///
    /// Items whose encoding exceeds `max_item_size` are rejected before
    /// anything is written.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        self.buf.clear();
        encode_value(value, &mut self.buf);

        if self.buf.len() > self.config.max_item_size {
            return Err(CodecError::ItemTooLarge {
                size: self.buf.len(),
                max: self.config.max_item_size,
            });
        }

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(CodecError::Io(ErrorKind::WriteZero.into())),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }
        trace!(len = self.buf.len(), "wrote item");

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum item size for subsequent writes.
    pub fn set_max_item_size(&mut self, max_item_size: usize) {
        self.config.max_item_size = max_item_size;
    }

    /// Current value writer configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}
