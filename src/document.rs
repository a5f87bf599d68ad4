use crate::codec::{self, DoubleEncoding, LEN_SIZE};
use crate::element::{ElementType, Value};
use crate::error::ReadError;
use crate::traits::CoreRead;
use crate::{DocumentView, Error, Result};

/// Size of an empty document: the 4 byte size header and the terminator.
pub const MIN_SIZE: usize = LEN_SIZE + 1;

/// The size header is a signed 32-bit integer, so no document can grow beyond this.
const MAX_CAPACITY: usize = i32::MAX as usize;

/// A document that is encoded in-place in a caller supplied buffer.
///
/// The document never allocates and never grows beyond the buffer it was given. Elements can
/// only be appended; there is no way to remove or update an element.
///
/// ```
/// # use bson_core::{Document, Error};
/// let mut buffer = [0u8; 64];
/// let mut doc = Document::new(&mut buffer).unwrap();
///
/// doc.append_i32("fish", 10).unwrap();
/// assert_eq!(doc.append_i32("fish", 11), Err(Error::DuplicateKey));
///
/// assert_eq!(doc.size(), 15);
/// assert_eq!(doc.get_i32("fish"), Ok(10));
/// ```
#[derive(Debug, Default)]
pub struct Document<'a> {
    pub(crate) buffer: Option<&'a mut [u8]>,
}

macro_rules! forward_to_view {
    ($($(#[$attr:meta])* $name:ident($($arg:ident : $ty:ty),*) -> $ret:ty;)*) => {
        $(
            $(#[$attr])*
            pub fn $name(&self, $($arg: $ty),*) -> Result<$ret> {
                self.view()?.$name($($arg),*)
            }
        )*
    };
}

impl<'a> Document<'a> {
    /// Create a new, empty document over `buffer`. The whole buffer is zeroed.
    ///
    /// Fails with [Error::OutOfSpace] if the buffer cannot even hold an empty document.
    pub fn new(buffer: &'a mut [u8]) -> Result<Self> {
        if buffer.len() < MIN_SIZE {
            return Err(Error::OutOfSpace);
        }
        let mut doc = Self {
            buffer: Some(buffer),
        };
        doc.clear()?;
        Ok(doc)
    }

    /// Open the document that is already encoded at the start of `buffer`, keeping its
    /// contents. Further appends may use the rest of the buffer.
    pub fn open(buffer: &'a mut [u8]) -> Result<Self> {
        let capacity = buffer.len().min(MAX_CAPACITY);
        DocumentView::from_bytes(&buffer[..capacity])?;
        Ok(Self {
            buffer: Some(buffer),
        })
    }

    /// A document without a backing buffer. Appending to it fails with [Error::NoBuffer].
    pub fn empty() -> Self {
        Self { buffer: None }
    }

    /// Read a document image from `reader` into `buffer` and open it.
    ///
    /// The size header is read first, so that a document that would not fit is rejected with
    /// [Error::OutOfSpace] before the rest of it is read.
    pub fn read_from<R: CoreRead>(
        mut reader: R,
        buffer: &'a mut [u8],
    ) -> core::result::Result<Self, ReadError<R::Error>> {
        let capacity = buffer.len().min(MAX_CAPACITY);
        if capacity < MIN_SIZE {
            return Err(Error::OutOfSpace.into());
        }
        reader
            .fill(&mut buffer[..LEN_SIZE])
            .map_err(ReadError::Read)?;
        let size = codec::read_len(buffer).ok_or(Error::IncorrectType)?;
        if size < MIN_SIZE {
            return Err(Error::IncorrectType.into());
        }
        if size > capacity {
            return Err(Error::OutOfSpace.into());
        }
        reader
            .fill(&mut buffer[LEN_SIZE..size])
            .map_err(ReadError::Read)?;
        Ok(Self::open(buffer)?)
    }

    /// Zero the backing buffer and reset the document to an empty document.
    pub fn clear(&mut self) -> Result<()> {
        let buffer = self.buffer.as_deref_mut().ok_or(Error::NoBuffer)?;
        for b in buffer.iter_mut() {
            *b = 0;
        }
        self.set_size(MIN_SIZE);
        Ok(())
    }

    /// The number of bytes currently used by the document. `0` if there is no backing buffer.
    pub fn size(&self) -> usize {
        self.buffer
            .as_deref()
            .and_then(codec::read_len)
            .unwrap_or(0)
    }

    pub(crate) fn set_size(&mut self, size: usize) {
        if let Some(buffer) = self.buffer.as_deref_mut() {
            buffer[..LEN_SIZE].copy_from_slice(&codec::i32_bytes(size as i32));
        }
    }

    /// The whole backing buffer, including the unused space after the document.
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_deref().unwrap_or(&[])
    }

    /// The document image: the first [size](Document::size) bytes of the buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer()[..self.size()]
    }

    /// The number of bytes the document may grow to.
    pub fn capacity(&self) -> usize {
        self.buffer().len().min(MAX_CAPACITY)
    }

    /// A read-only view of the document.
    pub fn view(&self) -> Result<DocumentView<'_>> {
        let buffer = self.buffer.as_deref().ok_or(Error::NoBuffer)?;
        DocumentView::from_bytes(buffer)
    }

    /// Whether a keyed lookup of `key` succeeds. Keys holding `null` do not count as existing.
    pub fn exists(&self, key: &str) -> bool {
        matches!(self.view(), Ok(view) if view.exists(key))
    }

    forward_to_view! {
        /// The number of elements in the document.
        key_count() -> usize;
        /// The key of the element at `index`, in insertion order.
        key_at(index: usize) -> &str;
        /// The type of the element at `index`, in insertion order.
        type_at(index: usize) -> ElementType;
        /// Get an `Int32` value.
        get_i32(key: &str) -> i32;
        /// Get an integer value. `Int64` and `DateTime` are read as-is, `Int32` is widened.
        get_i64(key: &str) -> i64;
        /// Get a `DateTime` value in milliseconds since the unix epoch.
        get_datetime(key: &str) -> i64;
        /// Get a `Double` value stored as a native binary64.
        get_double(key: &str) -> f64;
        /// Get a `Boolean` value.
        get_bool(key: &str) -> bool;
        /// Get a `String` value. The returned text points into the document.
        get_str(key: &str) -> &str;
        /// Get a `Binary` value. The returned bytes point into the document.
        get_binary(key: &str) -> &[u8];
        /// Get an embedded `Document` or `Array` as a view aliasing this document's buffer.
        get_document(key: &str) -> DocumentView<'_>;
        /// Get any value. A `null` element yields [Error::NullValue].
        get_value(key: &str) -> Value<'_>;
    }

    /// Get a `Double` value, decoded with the given [DoubleEncoding].
    pub fn get_double_with<E: DoubleEncoding>(&self, key: &str) -> Result<E::Float> {
        self.view()?.get_double_with::<E>(key)
    }
}
