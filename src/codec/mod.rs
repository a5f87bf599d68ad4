//! Byte-order and numeric codec.
//!
//! Every multi-byte integer in a document is little-endian on the wire, regardless of the host.
//! All reads and writes in the crate go through the helpers in this module.

use byteorder::{ByteOrder, LittleEndian};

pub use self::packed::PackedFloat;

mod packed;

/// Size of the document size header and of every length prefix.
pub(crate) const LEN_SIZE: usize = 4;

/// Reads a little-endian `i32` from the start of `data`. Returns `None` if `data` is too short.
#[inline]
pub(crate) fn read_i32(data: &[u8]) -> Option<i32> {
    data.get(..4).map(LittleEndian::read_i32)
}

/// Reads a little-endian `i64` from the start of `data`. Returns `None` if `data` is too short.
#[inline]
pub(crate) fn read_i64(data: &[u8]) -> Option<i64> {
    data.get(..8).map(LittleEndian::read_i64)
}

#[inline]
pub(crate) fn i32_bytes(val: i32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    LittleEndian::write_i32(&mut buf, val);
    buf
}

#[inline]
pub(crate) fn i64_bytes(val: i64) -> [u8; 8] {
    let mut buf = [0u8; 8];
    LittleEndian::write_i64(&mut buf, val);
    buf
}

/// Reads a length prefix. Negative lengths do not describe anything and yield `None`.
#[inline]
pub(crate) fn read_len(data: &[u8]) -> Option<usize> {
    let len = read_i32(data)?;
    if len < 0 {
        None
    } else {
        Some(len as usize)
    }
}

/// The way a `double` element is stored in its 8-byte slot.
///
/// Documents always carry 8 bytes for a double. Hosts with a native 64-bit float use
/// [NativeDouble]; hosts that only have a 32-bit float use [PackedFloat], which synthesizes the
/// 64-bit representation from an `f32`. Callers pick the encoding as a type parameter, e.g.
/// `doc.append_double_with::<PackedFloat>("x", 1.5)`.
pub trait DoubleEncoding {
    /// The host float type this encoding converts from and to.
    type Float: Copy;

    /// Encode `val` into the 8 little-endian bytes of a binary64.
    fn encode(val: Self::Float) -> [u8; 8];

    /// Decode the 8 little-endian bytes of a binary64.
    fn decode(bytes: [u8; 8]) -> Self::Float;
}

/// Copies the IEEE754 binary64 bytes through verbatim.
#[derive(Copy, Clone, Debug)]
pub struct NativeDouble;

impl DoubleEncoding for NativeDouble {
    type Float = f64;

    #[inline(always)]
    fn encode(val: f64) -> [u8; 8] {
        let mut buf = [0u8; 8];
        LittleEndian::write_f64(&mut buf, val);
        buf
    }

    #[inline(always)]
    fn decode(bytes: [u8; 8]) -> f64 {
        LittleEndian::read_f64(&bytes)
    }
}

#[inline]
pub(crate) fn read_double<E: DoubleEncoding>(data: &[u8]) -> Option<E::Float> {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(data.get(..8)?);
    Some(E::decode(bytes))
}
