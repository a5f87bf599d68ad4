use crate::codec::{self, LEN_SIZE};
use crate::{DocumentView, MIN_SIZE};

/// Subtype byte written in front of every binary payload.
pub const BINARY_SUBTYPE_GENERIC: u8 = 0x00;

/// The type tag of an element. Only this subset of the BSON catalog is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementType {
    /// 8 byte IEEE754 binary64.
    Double = 0x01,
    /// Length-prefixed, NUL-terminated UTF8 text.
    String = 0x02,
    /// An embedded document.
    Document = 0x03,
    /// An embedded document whose keys are array indices.
    Array = 0x04,
    /// Length-prefixed raw bytes with a subtype byte.
    Binary = 0x05,
    /// A single `0x00` or `0x01` byte.
    Boolean = 0x08,
    /// Milliseconds since the unix epoch, stored like an `Int64`.
    DateTime = 0x09,
    /// No payload.
    Null = 0x0A,
    /// 4 byte signed integer.
    Int32 = 0x10,
    /// 8 byte signed integer.
    Int64 = 0x12,
}

impl ElementType {
    /// Map a tag byte to its type. Returns `None` for tags this crate does not handle.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0x01 => ElementType::Double,
            0x02 => ElementType::String,
            0x03 => ElementType::Document,
            0x04 => ElementType::Array,
            0x05 => ElementType::Binary,
            0x08 => ElementType::Boolean,
            0x09 => ElementType::DateTime,
            0x0A => ElementType::Null,
            0x10 => ElementType::Int32,
            0x12 => ElementType::Int64,
            _ => return None,
        })
    }

    /// The tag byte of this type.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Whether the encoded payload starts with a 4-byte length that is not part of the value.
    pub(crate) fn has_length_prefix(self) -> bool {
        matches!(self, ElementType::String | ElementType::Binary)
    }
}

/// Encoded payload length for an element with tag `tag` whose payload starts at `data`,
/// including length prefixes and the binary subtype byte.
///
/// Returns `None` for unrecognized tags, when a length prefix is missing or negative, or when an
/// embedded document is shorter than an empty one.
pub(crate) fn type_size(tag: u8, data: &[u8]) -> Option<usize> {
    match ElementType::from_tag(tag)? {
        ElementType::Double | ElementType::Int64 | ElementType::DateTime => Some(8),
        ElementType::Int32 => Some(4),
        ElementType::Boolean => Some(1),
        ElementType::Null => Some(0),
        // The embedded document length is its own size header, so it already covers itself.
        ElementType::Document | ElementType::Array => {
            codec::read_len(data).filter(|&len| len >= MIN_SIZE)
        }
        ElementType::String => codec::read_len(data)?.checked_add(LEN_SIZE),
        ElementType::Binary => codec::read_len(data)?.checked_add(LEN_SIZE + 1),
    }
}

/// A decoded element value. Strings, binaries and embedded documents borrow from the document
/// they were read from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// A double, decoded as a native binary64.
    Double(f64),
    /// A string.
    String(&'a str),
    /// An embedded document.
    Document(DocumentView<'a>),
    /// An embedded array.
    Array(DocumentView<'a>),
    /// Raw bytes.
    Binary {
        /// The BSON binary subtype.
        subtype: u8,
        /// The raw bytes.
        bytes: &'a [u8],
    },
    /// A boolean.
    Boolean(bool),
    /// A datetime in milliseconds since the unix epoch.
    DateTime(i64),
    /// A null.
    Null,
    /// A 32-bit integer.
    Int32(i32),
    /// A 64-bit integer.
    Int64(i64),
}

impl<'a> Value<'a> {
    /// The type tag this value is stored under.
    pub fn element_type(&self) -> ElementType {
        match self {
            Value::Double(_) => ElementType::Double,
            Value::String(_) => ElementType::String,
            Value::Document(_) => ElementType::Document,
            Value::Array(_) => ElementType::Array,
            Value::Binary { .. } => ElementType::Binary,
            Value::Boolean(_) => ElementType::Boolean,
            Value::DateTime(_) => ElementType::DateTime,
            Value::Null => ElementType::Null,
            Value::Int32(_) => ElementType::Int32,
            Value::Int64(_) => ElementType::Int64,
        }
    }
}

/// One key/value pair of a document, as yielded by [DocumentView::iter].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element<'a> {
    /// The key of the element.
    pub key: &'a str,
    /// The decoded value of the element.
    pub value: Value<'a>,
}
