//! Read side of the engine: keyed and positional lookups over a document image.

use crate::codec::{self, DoubleEncoding, NativeDouble, LEN_SIZE};
use crate::element::{type_size, Element, ElementType, Value};
use crate::traits::CoreWrite;
use crate::{Error, Result, MIN_SIZE};
use core::str;

/// A read-only view over a complete document image.
///
/// A view never owns its bytes. It is either borrowed from a [Document](crate::Document), or
/// aliases the payload of an embedded document inside a parent, in which case the borrow
/// checker keeps the parent from being modified while the view is alive.
///
/// All strings, byte slices and sub-documents returned by a view borrow from the same buffer
/// with the lifetime `'a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentView<'a> {
    bytes: &'a [u8],
}

/// One element as it sits in the buffer, before its payload is interpreted.
#[derive(Clone, Copy)]
pub(crate) struct RawElement<'a> {
    pub tag: u8,
    pub key: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> RawElement<'a> {
    fn key_str(&self) -> Result<&'a str> {
        str::from_utf8(self.key).map_err(|_| Error::InvalidUtf8)
    }

    fn decode(&self) -> Result<Value<'a>> {
        let element_type = ElementType::from_tag(self.tag).ok_or(Error::IncorrectType)?;
        let payload = self.payload;
        Ok(match element_type {
            ElementType::Double => Value::Double(
                codec::read_double::<NativeDouble>(payload).ok_or(Error::IncorrectType)?,
            ),
            ElementType::String => Value::String(decode_str(payload)?),
            ElementType::Document => Value::Document(DocumentView::from_bytes(payload)?),
            ElementType::Array => Value::Array(DocumentView::from_bytes(payload)?),
            ElementType::Binary => {
                let (subtype, bytes) = decode_binary(payload)?;
                Value::Binary { subtype, bytes }
            }
            ElementType::Boolean => Value::Boolean(decode_bool(payload)?),
            ElementType::DateTime => {
                Value::DateTime(codec::read_i64(payload).ok_or(Error::IncorrectType)?)
            }
            ElementType::Null => Value::Null,
            ElementType::Int32 => Value::Int32(codec::read_i32(payload).ok_or(Error::IncorrectType)?),
            ElementType::Int64 => Value::Int64(codec::read_i64(payload).ok_or(Error::IncorrectType)?),
        })
    }
}

fn decode_str(payload: &[u8]) -> Result<&str> {
    // The length counts the terminating NUL.
    let len = codec::read_len(payload).ok_or(Error::IncorrectType)?;
    if len == 0 {
        return Err(Error::IncorrectType);
    }
    let (text, terminator) = payload
        .get(LEN_SIZE..LEN_SIZE + len)
        .ok_or(Error::IncorrectType)?
        .split_at(len - 1);
    if terminator != [0] {
        return Err(Error::IncorrectType);
    }
    str::from_utf8(text).map_err(|_| Error::InvalidUtf8)
}

fn decode_binary(payload: &[u8]) -> Result<(u8, &[u8])> {
    let len = codec::read_len(payload).ok_or(Error::IncorrectType)?;
    let subtype = *payload.get(LEN_SIZE).ok_or(Error::IncorrectType)?;
    let bytes = payload
        .get(LEN_SIZE + 1..LEN_SIZE + 1 + len)
        .ok_or(Error::IncorrectType)?;
    Ok((subtype, bytes))
}

fn decode_bool(payload: &[u8]) -> Result<bool> {
    payload
        .first()
        .map(|&b| b == 0x01)
        .ok_or(Error::IncorrectType)
}

/// Splits the element starting at `offset` off `body`, the document bytes without the
/// terminator. Returns the element and the offset of the next one.
fn parse_element(body: &[u8], offset: usize) -> Result<(RawElement<'_>, usize)> {
    let tag = *body.get(offset).ok_or(Error::IncorrectType)?;
    let key_start = offset + 1;
    let key_len = body
        .get(key_start..)
        .and_then(|rest| rest.iter().position(|&b| b == 0))
        .ok_or(Error::IncorrectType)?;
    let payload_start = key_start + key_len + 1;
    let rest = body.get(payload_start..).ok_or(Error::IncorrectType)?;
    let payload_len = type_size(tag, rest).ok_or(Error::IncorrectType)?;
    let payload = rest.get(..payload_len).ok_or(Error::IncorrectType)?;

    let element = RawElement {
        tag,
        key: &body[key_start..key_start + key_len],
        payload,
    };
    Ok((element, payload_start + payload_len))
}

/// Walks the elements of a document in insertion order. After the first error the walk stops.
pub(crate) struct RawElements<'a> {
    body: &'a [u8],
    offset: usize,
}

impl<'a> Iterator for RawElements<'a> {
    type Item = Result<RawElement<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.body.len() {
            return None;
        }
        match parse_element(self.body, self.offset) {
            Ok((element, next)) => {
                self.offset = next;
                Some(Ok(element))
            }
            Err(e) => {
                self.offset = self.body.len();
                Some(Err(e))
            }
        }
    }
}

/// Iterator over the elements of a document, see [DocumentView::iter].
pub struct Elements<'a> {
    raw: RawElements<'a>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = Result<Element<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = match self.raw.next()? {
            Ok(raw) => raw,
            Err(e) => return Some(Err(e)),
        };
        let element = raw.key_str().and_then(|key| {
            Ok(Element {
                key,
                value: raw.decode()?,
            })
        });
        if element.is_err() {
            self.raw.offset = self.raw.body.len();
        }
        Some(element)
    }
}

impl<'a> DocumentView<'a> {
    /// Create a view over the document image at the start of `bytes`.
    ///
    /// The size is taken from the document's own header; any bytes after it are ignored. Fails
    /// with [Error::IncorrectType] if the header is shorter than an empty document, points past
    /// the end of `bytes`, or the document is not terminated by `0x00`.
    ///
    /// ```
    /// # use bson_core::DocumentView;
    /// let bytes = [0x05, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF];
    /// let view = DocumentView::from_bytes(&bytes).unwrap();
    /// assert_eq!(view.size(), 5);
    /// assert_eq!(view.key_count(), Ok(0));
    /// ```
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        let size = codec::read_len(bytes).ok_or(Error::IncorrectType)?;
        if size < MIN_SIZE || size > bytes.len() || bytes[size - 1] != 0x00 {
            return Err(Error::IncorrectType);
        }
        Ok(Self {
            bytes: &bytes[..size],
        })
    }

    /// The size of the document in bytes, as stored in its header.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// The complete document image, header and terminator included.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Write the document image to `writer` and flush it.
    pub fn write_to<W: CoreWrite>(&self, mut writer: W) -> core::result::Result<(), W::Error> {
        writer.write_all(self.bytes)?;
        writer.flush()
    }

    fn raw_elements(&self) -> RawElements<'a> {
        RawElements {
            body: &self.bytes[LEN_SIZE..self.bytes.len() - 1],
            offset: 0,
        }
    }

    /// Iterate over the elements in insertion order.
    ///
    /// Unlike keyed lookups, `null` elements are yielded as [Value::Null]. A corrupted element
    /// yields a single `Err` and ends the iteration.
    pub fn iter(&self) -> Elements<'a> {
        Elements {
            raw: self.raw_elements(),
        }
    }

    /// Find the element stored under exactly `key`, including `null` elements.
    ///
    /// Keys are compared for exact equality, so `"fish"` never matches `"fishy"`.
    pub(crate) fn position(&self, key: &str) -> Result<Option<RawElement<'a>>> {
        for element in self.raw_elements() {
            let element = element?;
            if element.key == key.as_bytes() {
                return Ok(Some(element));
            }
        }
        Ok(None)
    }

    /// Keyed lookup. A `null` element short-circuits to [Error::NullValue] before the type check.
    fn find(&self, key: &str, expected: Option<ElementType>) -> Result<RawElement<'a>> {
        let element = self.position(key)?.ok_or(Error::KeyNotFound)?;
        if element.tag == ElementType::Null.tag() {
            return Err(Error::NullValue);
        }
        match expected {
            Some(expected) if expected.tag() != element.tag => Err(Error::IncorrectType),
            _ => Ok(element),
        }
    }

    fn element_at(&self, index: usize) -> Result<RawElement<'a>> {
        self.raw_elements()
            .nth(index)
            .unwrap_or(Err(Error::KeyNotFound))
    }

    /// Whether a keyed lookup of `key` succeeds. Keys holding `null` do not count as existing.
    pub fn exists(&self, key: &str) -> bool {
        self.find(key, None).is_ok()
    }

    /// The number of elements in the document.
    ///
    /// Fails with [Error::IncorrectType] if any element has an unrecognized tag or a length that
    /// does not fit the document.
    pub fn key_count(&self) -> Result<usize> {
        self.raw_elements()
            .try_fold(0, |count, element| element.map(|_| count + 1))
    }

    /// The key of the element at `index`, in insertion order.
    pub fn key_at(&self, index: usize) -> Result<&'a str> {
        self.element_at(index)?.key_str()
    }

    /// The type of the element at `index`, in insertion order.
    pub fn type_at(&self, index: usize) -> Result<ElementType> {
        let element = self.element_at(index)?;
        ElementType::from_tag(element.tag).ok_or(Error::IncorrectType)
    }

    /// Get an `Int32` value.
    pub fn get_i32(&self, key: &str) -> Result<i32> {
        let element = self.find(key, Some(ElementType::Int32))?;
        codec::read_i32(element.payload).ok_or(Error::IncorrectType)
    }

    /// Get an integer value. `Int64` and `DateTime` are read as-is, `Int32` is widened.
    pub fn get_i64(&self, key: &str) -> Result<i64> {
        let element = self.find(key, None)?;
        let val = match ElementType::from_tag(element.tag) {
            Some(ElementType::Int32) => codec::read_i32(element.payload).map(i64::from),
            Some(ElementType::Int64) | Some(ElementType::DateTime) => {
                codec::read_i64(element.payload)
            }
            _ => None,
        };
        val.ok_or(Error::IncorrectType)
    }

    /// Get a `DateTime` value in milliseconds since the unix epoch.
    pub fn get_datetime(&self, key: &str) -> Result<i64> {
        let element = self.find(key, Some(ElementType::DateTime))?;
        codec::read_i64(element.payload).ok_or(Error::IncorrectType)
    }

    /// Get a `Double` value stored as a native binary64.
    pub fn get_double(&self, key: &str) -> Result<f64> {
        self.get_double_with::<NativeDouble>(key)
    }

    /// Get a `Double` value, decoded with the given [DoubleEncoding].
    pub fn get_double_with<E: DoubleEncoding>(&self, key: &str) -> Result<E::Float> {
        let element = self.find(key, Some(ElementType::Double))?;
        codec::read_double::<E>(element.payload).ok_or(Error::IncorrectType)
    }

    /// Get a `Boolean` value.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        let element = self.find(key, Some(ElementType::Boolean))?;
        decode_bool(element.payload)
    }

    /// Get a `String` value. The returned text points into the document, without its NUL.
    pub fn get_str(&self, key: &str) -> Result<&'a str> {
        let element = self.find(key, Some(ElementType::String))?;
        decode_str(element.payload)
    }

    /// Get a `Binary` value. The returned bytes point into the document.
    pub fn get_binary(&self, key: &str) -> Result<&'a [u8]> {
        let element = self.find(key, Some(ElementType::Binary))?;
        decode_binary(element.payload).map(|(_, bytes)| bytes)
    }

    /// Get an embedded `Document` or `Array` as a view aliasing this document's buffer.
    pub fn get_document(&self, key: &str) -> Result<DocumentView<'a>> {
        let element = self.find(key, None)?;
        if element.tag != ElementType::Document.tag() && element.tag != ElementType::Array.tag() {
            return Err(Error::IncorrectType);
        }
        DocumentView::from_bytes(element.payload)
    }

    /// Get any value. Like the typed getters, a `null` element yields [Error::NullValue].
    pub fn get_value(&self, key: &str) -> Result<Value<'a>> {
        self.find(key, None)?.decode()
    }
}

impl<'a> IntoIterator for DocumentView<'a> {
    type Item = Result<Element<'a>>;
    type IntoIter = Elements<'a>;

    fn into_iter(self) -> Elements<'a> {
        self.iter()
    }
}
