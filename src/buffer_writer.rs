use crate::traits::CoreWrite;

/// An implementation of [CoreWrite] that writes to a backing `&mut [u8]`.
///
/// The append engine uses it to lay out elements in a document's buffer, and it can be handed to
/// [DocumentView::write_to](crate::DocumentView::write_to) to copy a document image into another
/// buffer.
pub struct BufferWriter<'a> {
    buffer: &'a mut [u8],
    index: usize,
}

impl<'a> BufferWriter<'a> {
    /// Create a new writer with a backing buffer.
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, index: 0 }
    }

    /// The bytes count written to the backing buffer.
    pub fn written_len(&self) -> usize {
        self.index
    }

    /// The bytes count that can still be written before [BufferWriterError::BufferTooSmall] is
    /// returned.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.index
    }

    /// A slice of the buffer that is in this writer. This is equivalent to getting a slice of the
    /// original buffer with the range `..writer.written_len()`.
    /// ```
    /// # use bson_core::{BufferWriter, Document};
    /// let mut doc_buffer = [0u8; 16];
    /// let doc = Document::new(&mut doc_buffer).unwrap();
    ///
    /// let mut buffer = [0u8; 16];
    /// let mut writer = BufferWriter::new(&mut buffer);
    /// doc.view().unwrap().write_to(&mut writer).unwrap();
    ///
    /// assert_eq!(writer.written_buffer(), &[5, 0, 0, 0, 0]);
    /// ```
    pub fn written_buffer(&self) -> &[u8] {
        &self.buffer[..self.index]
    }
}

/// Errors that can be returned from writing to a [BufferWriter].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferWriterError {
    /// The backing buffer of the [BufferWriter] is too small.
    BufferTooSmall,
}

impl CoreWrite for BufferWriter<'_> {
    type Error = BufferWriterError;

    fn write(&mut self, val: u8) -> Result<(), Self::Error> {
        let slot = self
            .buffer
            .get_mut(self.index)
            .ok_or(BufferWriterError::BufferTooSmall)?;
        *slot = val;
        self.index += 1;
        Ok(())
    }

    fn write_all(&mut self, val: &[u8]) -> Result<(), Self::Error> {
        if val.len() > self.remaining() {
            return Err(BufferWriterError::BufferTooSmall);
        }
        self.buffer[self.index..self.index + val.len()].copy_from_slice(val);
        self.index += val.len();
        Ok(())
    }
}

impl CoreWrite for &'_ mut BufferWriter<'_> {
    type Error = BufferWriterError;

    fn write(&mut self, val: u8) -> Result<(), Self::Error> {
        (**self).write(val)
    }

    fn write_all(&mut self, val: &[u8]) -> Result<(), Self::Error> {
        (**self).write_all(val)
    }
}
