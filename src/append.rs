//! Write side of the engine: appending elements to a [Document].

use crate::codec::{self, DoubleEncoding, NativeDouble, LEN_SIZE};
use crate::element::{ElementType, BINARY_SUBTYPE_GENERIC};
use crate::traits::CoreWrite;
use crate::{BufferWriter, Document, DocumentView, Error, Result};

const BOOLEAN_FALSE: u8 = 0x00;
const BOOLEAN_TRUE: u8 = 0x01;

/// Bytes an element of `element_type` takes on top of its tag, key and value bytes.
fn payload_overhead(element_type: ElementType) -> usize {
    // Strings add a NUL after the text, binaries a subtype byte before the data.
    if element_type.has_length_prefix() {
        LEN_SIZE + 1
    } else {
        0
    }
}

impl<'a> Document<'a> {
    /// Append an `Int32` element.
    pub fn append_i32(&mut self, key: &str, val: i32) -> Result<()> {
        self.append_element(key, ElementType::Int32, &codec::i32_bytes(val))
    }

    /// Append an `Int64` element.
    pub fn append_i64(&mut self, key: &str, val: i64) -> Result<()> {
        self.append_element(key, ElementType::Int64, &codec::i64_bytes(val))
    }

    /// Append a `DateTime` element, in milliseconds since the unix epoch.
    pub fn append_datetime(&mut self, key: &str, millis: i64) -> Result<()> {
        self.append_element(key, ElementType::DateTime, &codec::i64_bytes(millis))
    }

    /// Append a `Double` element, stored as a native binary64.
    pub fn append_double(&mut self, key: &str, val: f64) -> Result<()> {
        self.append_double_with::<NativeDouble>(key, val)
    }

    /// Append a `Double` element, encoded with the given [DoubleEncoding].
    ///
    /// ```
    /// # use bson_core::{Document, codec::PackedFloat};
    /// let mut buffer = [0u8; 32];
    /// let mut doc = Document::new(&mut buffer).unwrap();
    /// doc.append_double_with::<PackedFloat>("x", 1.5).unwrap();
    /// assert_eq!(doc.get_double("x"), Ok(1.5));
    /// ```
    pub fn append_double_with<E: DoubleEncoding>(&mut self, key: &str, val: E::Float) -> Result<()> {
        self.append_element(key, ElementType::Double, &E::encode(val))
    }

    /// Append a `Boolean` element.
    pub fn append_bool(&mut self, key: &str, val: bool) -> Result<()> {
        let byte = if val { BOOLEAN_TRUE } else { BOOLEAN_FALSE };
        self.append_element(key, ElementType::Boolean, &[byte])
    }

    /// Append a `String` element.
    pub fn append_str(&mut self, key: &str, val: &str) -> Result<()> {
        self.append_element(key, ElementType::String, val.as_bytes())
    }

    /// Append a `Binary` element with the generic subtype.
    pub fn append_binary(&mut self, key: &str, data: &[u8]) -> Result<()> {
        self.append_element(key, ElementType::Binary, data)
    }

    /// Append a `Null` element.
    pub fn append_null(&mut self, key: &str) -> Result<()> {
        self.append_element(key, ElementType::Null, &[])
    }

    /// Append `doc` as an embedded `Document`. Its image is copied as-is.
    pub fn append_document(&mut self, key: &str, doc: DocumentView<'_>) -> Result<()> {
        self.append_element(key, ElementType::Document, doc.as_bytes())
    }

    /// Append `doc` as an embedded `Array`. Its keys should be `"0"`, `"1"`, ... but this is
    /// not checked.
    pub fn append_array(&mut self, key: &str, doc: DocumentView<'_>) -> Result<()> {
        self.append_element(key, ElementType::Array, doc.as_bytes())
    }

    /// Append one element. `data` is the value without any length prefix, subtype or string
    /// terminator; those are added here depending on `element_type`.
    ///
    /// Every check happens before the first write, so on error the buffer is unchanged.
    fn append_element(&mut self, key: &str, element_type: ElementType, data: &[u8]) -> Result<()> {
        if self.buffer.is_none() {
            return Err(Error::NoBuffer);
        }
        if key.as_bytes().contains(&0) {
            return Err(Error::InvalidKey);
        }

        let size = self.size();
        // tag + key + key terminator + value
        let size_after = [1, key.len(), 1, data.len(), payload_overhead(element_type)]
            .iter()
            .try_fold(size, |total, &n| total.checked_add(n))
            .ok_or(Error::OutOfSpace)?;
        if size_after > self.capacity() {
            return Err(Error::OutOfSpace);
        }

        if self.view()?.position(key)?.is_some() {
            return Err(Error::DuplicateKey);
        }

        let buffer = self.buffer.as_deref_mut().ok_or(Error::NoBuffer)?;
        // The element starts on top of the current terminator.
        let mut writer = BufferWriter::new(&mut buffer[size - 1..size_after]);
        writer.write(element_type.tag())?;
        writer.write_all(key.as_bytes())?;
        writer.write(0)?;
        match element_type {
            ElementType::String => {
                writer.write_all(&codec::i32_bytes(data.len() as i32 + 1))?;
            }
            ElementType::Binary => {
                writer.write_all(&codec::i32_bytes(data.len() as i32))?;
                writer.write(BINARY_SUBTYPE_GENERIC)?;
            }
            _ => {}
        }
        writer.write_all(data)?;
        if element_type == ElementType::String {
            writer.write(0)?;
        }
        writer.write(0)?;
        debug_assert_eq!(writer.written_len(), size_after - size + 1);

        self.set_size(size_after);
        Ok(())
    }
}
