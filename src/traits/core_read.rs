/// A source that a document image can be read from. This is similar to `std::io::Read`, but the
/// std trait is not available in `#![no_std]` projects.
///
/// Documents are always read into a caller supplied buffer, see
/// [Document::read_from](crate::Document::read_from).
///
/// This trait does not support async reading yet. Reads are expected to be blocking.
pub trait CoreRead {
    /// The error that this reader can encounter
    type Error: core::fmt::Debug;

    /// Fills the given buffer from the reader.
    /// The input buffer MUST be completely filled. If the reader reaches end-of-file before filling the
    /// buffer an error MUST be returned.
    fn fill(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error>;
}

/// Helper struct that implements [CoreRead] for byte slices.
///
/// Implementing of CoreRead for all slices won't work, because CoreRead can
// also be auto-implemented for certain traits, e.g. `embedded-hal::serial::Read`
pub struct CoreReadBytes<'a>(&'a [u8]);

impl<'a> CoreReadBytes<'a> {
    /// Read from the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        CoreReadBytes(bytes)
    }

    /// The bytes that have not been read yet.
    pub fn remaining(&self) -> &'a [u8] {
        self.0
    }
}

impl CoreRead for CoreReadBytes<'_> {
    type Error = SliceReadError;

    fn fill(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error> {
        if buffer.len() > self.0.len() {
            return Err(SliceReadError::EndOfSlice);
        }
        buffer.copy_from_slice(&self.0[..buffer.len()]);
        self.0 = &self.0[buffer.len()..];
        Ok(())
    }
}

/// An error that is thrown when reading from a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceReadError {
    /// Tried reading more bytes than the slice contains.
    EndOfSlice,
}

impl core::fmt::Display for SliceReadError {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(fmt, "{:?}", self)
    }
}
