/// A sink for document images, used by [DocumentView::write_to](crate::DocumentView::write_to).
///
/// Documents are streamed out byte by byte from their buffer, so a sink only has to accept
/// single bytes. [BufferWriter](crate::BufferWriter) copies the image into another buffer; with
/// the `embedded-hal-traits` feature every `embedded_hal::serial::Write` port is a sink as well.
pub trait CoreWrite {
    /// The error reported by the sink, returned unchanged from `write_to`.
    type Error: core::fmt::Debug;

    /// Send one byte of the image. Blocks until the byte is accepted.
    fn write(&mut self, val: u8) -> Result<(), Self::Error>;

    /// Called once after the last byte of a document. Sinks that buffer should push out
    /// everything they hold before returning.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Send a run of bytes. Defaults to one [write](CoreWrite::write) per byte, stopping at the
    /// first error.
    fn write_all(&mut self, val: &[u8]) -> Result<(), Self::Error> {
        val.iter().try_for_each(|&byte| self.write(byte))
    }
}
