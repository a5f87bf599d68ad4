/// Errors that can be returned by any document operation.
///
/// Every operation either succeeds or returns one of these, and a failed append never leaves a
/// partially written element in the buffer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// No element with the requested key (or index) exists in the document.
    KeyNotFound,

    /// The element has a different type than requested, or the scan ran into a tag or length
    /// that does not describe a valid element.
    IncorrectType,

    /// The element would not fit in the backing buffer.
    OutOfSpace,

    /// The document was constructed without a backing buffer.
    NoBuffer,

    /// An element with this key already exists.
    DuplicateKey,

    /// The key exists but is tagged `null`, so there is no value to decode.
    NullValue,

    /// The key contains a NUL byte and cannot be stored as a C string.
    InvalidKey,

    /// A stored key or string is not valid UTF8.
    InvalidUtf8,
}

impl Error {
    /// The numeric status code of this error, as used by the C-style API of the format.
    /// Success is `0`, errors are negative.
    pub fn code(self) -> i32 {
        match self {
            Error::KeyNotFound => -1,
            Error::IncorrectType => -2,
            Error::OutOfSpace => -3,
            Error::NoBuffer => -4,
            Error::DuplicateKey => -5,
            Error::NullValue => -6,
            Error::InvalidKey => -7,
            Error::InvalidUtf8 => -8,
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Error::KeyNotFound => write!(fmt, "Key not found"),
            Error::IncorrectType => write!(fmt, "Incorrect or unrecognized element type"),
            Error::OutOfSpace => write!(fmt, "Out of space in the backing buffer"),
            Error::NoBuffer => write!(fmt, "Document has no backing buffer"),
            Error::DuplicateKey => write!(fmt, "Duplicate key"),
            Error::NullValue => write!(fmt, "Value is null"),
            Error::InvalidKey => write!(fmt, "Key contains a NUL byte"),
            Error::InvalidUtf8 => write!(fmt, "Invalid UTF8 encoding"),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, fmt)
    }
}

impl From<crate::BufferWriterError> for Error {
    fn from(_: crate::BufferWriterError) -> Self {
        Error::OutOfSpace
    }
}

/// Errors that can occur while loading a document from a [CoreRead](crate::traits::CoreRead)
/// source.
pub enum ReadError<E> {
    /// Failed to read from the source. The inner error is given.
    Read(E),

    /// The bytes that were read do not form a document that fits the buffer.
    Document(Error),
}

impl<E> From<Error> for ReadError<E> {
    fn from(err: Error) -> Self {
        ReadError::Document(err)
    }
}

impl<E: core::fmt::Debug> core::fmt::Debug for ReadError<E> {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            ReadError::Read(e) => write!(fmt, "Read error {:?}", e),
            ReadError::Document(e) => write!(fmt, "Document error {:?}", e),
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for ReadError<E> {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, fmt)
    }
}

/// Shorthand for results carrying an [Error].
pub type Result<T> = core::result::Result<T, Error>;
