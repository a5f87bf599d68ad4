//! Serial ports as document sources and sinks.
//!
//! Any `embedded_hal::serial` port can feed [Document::read_from](crate::Document::read_from) or
//! receive [DocumentView::write_to](crate::DocumentView::write_to). Non-blocking ports are
//! polled until each byte goes through.

use embedded_hal::serial;

impl<T> super::CoreRead for T
where
    T: serial::Read<u8>,
    <T as serial::Read<u8>>::Error: core::fmt::Debug,
{
    type Error = <T as serial::Read<u8>>::Error;

    fn fill(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error> {
        buffer
            .iter_mut()
            .try_for_each(|byte| nb::block!(self.read()).map(|b| *byte = b))
    }
}

impl<T> super::CoreWrite for T
where
    T: serial::Write<u8>,
    <T as serial::Write<u8>>::Error: core::fmt::Debug,
{
    type Error = <T as serial::Write<u8>>::Error;

    fn write(&mut self, val: u8) -> Result<(), Self::Error> {
        nb::block!(serial::Write::write(self, val))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        nb::block!(serial::Write::flush(self))
    }
}
