use bson_core::traits::{CoreReadBytes, SliceReadError};
use bson_core::{BufferWriter, BufferWriterError, Document, Error, ReadError};

fn sample(buffer: &mut [u8]) -> Document<'_> {
    let mut doc = Document::new(buffer).unwrap();
    doc.append_str("name", "sensor").unwrap();
    doc.append_i64("runtime", 123_456).unwrap();
    doc
}

#[test]
fn write_to_buffer_writer() {
    let mut doc_buffer = [0u8; 64];
    let doc = sample(&mut doc_buffer);

    let mut out = [0u8; 64];
    let mut writer = BufferWriter::new(&mut out);
    doc.view().unwrap().write_to(&mut writer).unwrap();

    assert_eq!(writer.written_len(), doc.size());
    assert_eq!(writer.written_buffer(), doc.as_bytes());
}

#[test]
fn write_to_too_small_writer() {
    let mut doc_buffer = [0u8; 64];
    let doc = sample(&mut doc_buffer);

    let mut out = [0u8; 8];
    let writer = BufferWriter::new(&mut out);
    assert_eq!(
        doc.view().unwrap().write_to(writer),
        Err(BufferWriterError::BufferTooSmall)
    );
}

#[test]
fn read_from_bytes() {
    let mut doc_buffer = [0u8; 64];
    let doc = sample(&mut doc_buffer);
    let mut image = doc.as_bytes().to_vec();
    // Trailing bytes after the document are left unread.
    image.extend_from_slice(&[0xDE, 0xAD]);

    let mut buffer = [0u8; 64];
    let mut loaded = Document::read_from(CoreReadBytes::new(&image), &mut buffer).unwrap();
    assert_eq!(loaded.as_bytes(), doc.as_bytes());
    assert_eq!(loaded.get_str("name"), Ok("sensor"));
    assert_eq!(loaded.get_i64("runtime"), Ok(123_456));

    loaded.append_bool("loaded", true).unwrap();
    assert_eq!(loaded.key_count(), Ok(3));
}

#[test]
fn read_from_rejects_document_larger_than_buffer() {
    let mut doc_buffer = [0u8; 64];
    let doc = sample(&mut doc_buffer);

    let mut buffer = [0u8; 16];
    let result = Document::read_from(CoreReadBytes::new(doc.as_bytes()), &mut buffer);
    assert!(matches!(result, Err(ReadError::Document(Error::OutOfSpace))));
}

#[test]
fn read_from_truncated_source() {
    let mut doc_buffer = [0u8; 64];
    let doc = sample(&mut doc_buffer);
    let truncated = &doc.as_bytes()[..doc.size() - 3];

    let mut buffer = [0u8; 64];
    let result = Document::read_from(CoreReadBytes::new(truncated), &mut buffer);
    assert!(matches!(
        result,
        Err(ReadError::Read(SliceReadError::EndOfSlice))
    ));
}

#[test]
fn read_from_invalid_header() {
    let mut buffer = [0u8; 64];
    let result = Document::read_from(CoreReadBytes::new(&[0x02, 0x00, 0x00, 0x00]), &mut buffer);
    assert!(matches!(result, Err(ReadError::Document(Error::IncorrectType))));

    let image = [0x06, 0x00, 0x00, 0x00, 0x00, 0x01];
    let result = Document::read_from(CoreReadBytes::new(&image), &mut buffer);
    assert!(matches!(result, Err(ReadError::Document(Error::IncorrectType))));
}
