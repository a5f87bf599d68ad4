//! `serde::Serialize` for documents, so a document can be rendered by any serde serializer
//! without first being decoded into owned types.
//!
//! Documents become maps in insertion order, arrays become sequences of their values, binary
//! data becomes bytes, datetimes become `i64` and null becomes unit.

use crate::element::Value;
use crate::{Document, DocumentView};
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

impl Serialize for DocumentView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for element in self.iter() {
            let element = element.map_err(S::Error::custom)?;
            map.serialize_entry(element.key, &element.value)?;
        }
        map.end()
    }
}

/// Serializes an embedded array as a sequence, dropping the index keys.
struct ArrayValues<'a>(DocumentView<'a>);

impl Serialize for ArrayValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;
        for element in self.0.iter() {
            let element = element.map_err(S::Error::custom)?;
            seq.serialize_element(&element.value)?;
        }
        seq.end()
    }
}

impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Value::Double(v) => serializer.serialize_f64(v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Document(ref doc) => doc.serialize(serializer),
            Value::Array(doc) => ArrayValues(doc).serialize(serializer),
            Value::Binary { bytes, .. } => serializer.serialize_bytes(bytes),
            Value::Boolean(v) => serializer.serialize_bool(v),
            Value::DateTime(v) | Value::Int64(v) => serializer.serialize_i64(v),
            Value::Null => serializer.serialize_unit(),
            Value::Int32(v) => serializer.serialize_i32(v),
        }
    }
}

impl Serialize for Document<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.view()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
