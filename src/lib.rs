#![warn(missing_docs)]
#![no_std]

//! Embedded BSON
//!
//! This crate encodes and decodes a subset of [BSON](http://bsonspec.org) directly inside a
//! fixed-size byte buffer, for microcontrollers and other targets where no allocator is
//! available.
//!
//! A [Document] wraps a `&mut [u8]` supplied by the caller. Elements are appended to the end of
//! the document and can be looked up by key or by position. Nothing is ever copied out of the
//! buffer: strings, binary data and embedded documents are returned as references into it.
//!
//! Supported types are double, string, embedded document, array, binary, boolean, datetime,
//! null, int32 and int64.
//!
//! ```
//! use bson_core::Document;
//!
//! let mut inner_buffer = [0u8; 32];
//! let mut inner = Document::new(&mut inner_buffer).unwrap();
//! inner.append_i32("num", 10).unwrap();
//!
//! let mut buffer = [0u8; 128];
//! let mut doc = Document::new(&mut buffer).unwrap();
//! doc.append_str("name", "sensor").unwrap();
//! doc.append_bool("active", true).unwrap();
//! doc.append_document("reading", inner.view().unwrap()).unwrap();
//!
//! assert_eq!(doc.get_str("name"), Ok("sensor"));
//! let reading = doc.get_document("reading").unwrap();
//! assert_eq!(reading.get_i64("num"), Ok(10));
//! ```

pub mod codec;
pub mod traits;

mod append;
mod buffer_writer;
mod document;
mod element;
mod error;
mod lookup;
mod serialize;

pub use self::buffer_writer::{BufferWriter, BufferWriterError};
pub use self::codec::{DoubleEncoding, NativeDouble, PackedFloat};
pub use self::document::{Document, MIN_SIZE};
pub use self::element::{Element, ElementType, Value, BINARY_SUBTYPE_GENERIC};
pub use self::error::{Error, ReadError, Result};
pub use self::lookup::{DocumentView, Elements};
