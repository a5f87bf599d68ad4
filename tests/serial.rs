#![cfg(feature = "embedded-hal-traits")]

use bson_core::{Document, ReadError};
use embedded_hal::serial;

#[derive(Debug, PartialEq)]
enum PortError {
    Closed,
    Full,
}

/// Receiving end of a serial line. Every other read reports `WouldBlock`.
struct Rx<'a> {
    bytes: &'a [u8],
    stalled: bool,
}

impl<'a> Rx<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Rx {
            bytes,
            stalled: false,
        }
    }
}

impl serial::Read<u8> for Rx<'_> {
    type Error = PortError;

    fn read(&mut self) -> nb::Result<u8, PortError> {
        self.stalled = !self.stalled;
        if self.stalled {
            return Err(nb::Error::WouldBlock);
        }
        let (&first, rest) = self
            .bytes
            .split_first()
            .ok_or(nb::Error::Other(PortError::Closed))?;
        self.bytes = rest;
        Ok(first)
    }
}

#[derive(Default)]
struct Line {
    bytes: Vec<u8>,
    capacity: Option<usize>,
    flushed: bool,
}

/// Sending end of a serial line. Every other write and flush reports `WouldBlock`.
struct Tx<'a> {
    line: &'a mut Line,
    stalled: bool,
}

impl<'a> Tx<'a> {
    fn new(line: &'a mut Line) -> Self {
        Tx {
            line,
            stalled: false,
        }
    }

    fn stall(&mut self) -> bool {
        self.stalled = !self.stalled;
        self.stalled
    }
}

impl serial::Write<u8> for Tx<'_> {
    type Error = PortError;

    fn write(&mut self, word: u8) -> nb::Result<(), PortError> {
        if self.stall() {
            return Err(nb::Error::WouldBlock);
        }
        if Some(self.line.bytes.len()) == self.line.capacity {
            return Err(nb::Error::Other(PortError::Full));
        }
        self.line.bytes.push(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), PortError> {
        if self.stall() {
            return Err(nb::Error::WouldBlock);
        }
        self.line.flushed = true;
        Ok(())
    }
}

fn sample(buffer: &mut [u8]) -> Document<'_> {
    let mut doc = Document::new(buffer).unwrap();
    doc.append_str("device", "uart0").unwrap();
    doc.append_i32("baud", 115_200).unwrap();
    doc.append_bool("parity", false).unwrap();
    doc
}

#[test]
fn document_round_trips_over_serial() {
    let mut doc_buffer = [0u8; 64];
    let doc = sample(&mut doc_buffer);

    let mut line = Line::default();
    doc.view().unwrap().write_to(Tx::new(&mut line)).unwrap();
    assert_eq!(line.bytes, doc.as_bytes());
    assert!(line.flushed);

    let mut buffer = [0u8; 64];
    let mut received = Document::read_from(Rx::new(&line.bytes), &mut buffer).unwrap();
    assert_eq!(received.as_bytes(), doc.as_bytes());
    assert_eq!(received.get_str("device"), Ok("uart0"));
    assert_eq!(received.get_i32("baud"), Ok(115_200));

    received.append_i64("received_at", 42).unwrap();
    assert_eq!(received.key_count(), Ok(4));
}

#[test]
fn line_closing_mid_document() {
    let mut doc_buffer = [0u8; 64];
    let doc = sample(&mut doc_buffer);
    let truncated = &doc.as_bytes()[..doc.size() - 1];

    let mut buffer = [0u8; 64];
    let result = Document::read_from(Rx::new(truncated), &mut buffer);
    assert!(matches!(result, Err(ReadError::Read(PortError::Closed))));
}

#[test]
fn write_error_is_returned() {
    let mut doc_buffer = [0u8; 64];
    let doc = sample(&mut doc_buffer);

    let mut line = Line {
        capacity: Some(6),
        ..Line::default()
    };
    assert_eq!(
        doc.view().unwrap().write_to(Tx::new(&mut line)),
        Err(PortError::Full)
    );
    assert_eq!(line.bytes, &doc.as_bytes()[..6]);
    assert!(!line.flushed);
}
