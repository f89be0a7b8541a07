//! Schema-driven CDR encode/decode over [`crate::dynamic::Value`] trees.
//!
//! [`crate::cdr::CdrSerde`] dispatches on a Rust type's `serde::Serialize`
//! impl, which only exists for types known at compile time. Here there is
//! no Rust type per ROS2 message — only a [`MessageSchema`] fetched at
//! runtime — so the codec walks the schema's field list alongside a
//! [`Value`] tree instead of a derived impl.
//!
//! Wire format is plain CDR v1 (the same one [`crate::cdr`] emits): a
//! 4-byte encapsulation header, then fields in declaration order, aligned
//! to their natural size counted from the start of the header (so an
//! 8-byte-aligned field immediately after the header is padded by 4 bytes,
//! not 0).

use crate::dynamic::{DynamicMessage, FieldShape, MessageSchema, TypeStore, Value};
use crate::error::{Error, Result};
use crate::types::{
    FIELD_TYPE_BOOLEAN, FIELD_TYPE_BOUNDED_STRING, FIELD_TYPE_BOUNDED_WSTRING, FIELD_TYPE_BYTE,
    FIELD_TYPE_CHAR, FIELD_TYPE_DOUBLE, FIELD_TYPE_FIXED_STRING, FIELD_TYPE_FIXED_WSTRING,
    FIELD_TYPE_FLOAT, FIELD_TYPE_INT8, FIELD_TYPE_INT16, FIELD_TYPE_INT32, FIELD_TYPE_INT64,
    FIELD_TYPE_NESTED_TYPE, FIELD_TYPE_STRING, FIELD_TYPE_UINT8, FIELD_TYPE_UINT16,
    FIELD_TYPE_UINT32, FIELD_TYPE_UINT64, FIELD_TYPE_WCHAR, FIELD_TYPE_WSTRING, FieldType,
};

const HEADER_LE: [u8; 4] = [0x00, 0x01, 0x00, 0x00];
const HEADER_BE: [u8; 4] = [0x00, 0x00, 0x00, 0x00];

/// Encode `msg` to CDR bytes (little-endian, with encapsulation header).
///
/// `msg`'s own schema and every schema it transitively references through
/// nested fields must already be in `store`.
pub fn encode(msg: &DynamicMessage, store: &TypeStore) -> Result<Vec<u8>> {
    let schema = store.resolve(msg.type_name)?;
    let mut writer = Writer::new();
    encode_fields(&mut writer, &schema, msg, store)?;
    Ok(writer.finish())
}

/// Decode CDR bytes into a [`DynamicMessage`] of the named type.
///
/// `type_name` and everything it references must already be in `store`.
pub fn decode(type_name: &str, store: &TypeStore, bytes: &[u8]) -> Result<DynamicMessage> {
    let schema = store.resolve(type_name)?;
    let mut reader = Reader::new(bytes)?;
    decode_fields(&mut reader, type_name, &schema, store)
}

fn encode_fields(
    writer: &mut Writer,
    schema: &MessageSchema,
    msg: &DynamicMessage,
    store: &TypeStore,
) -> Result<()> {
    for field in &schema.fields {
        let value = msg.get(&field.name).ok_or_else(|| {
            Error::CdrError(format!(
                "message of type {} is missing field '{}'",
                schema.type_name, field.name
            ))
        })?;
        encode_value(writer, &field.field_type, value, store)
            .map_err(|e| Error::CdrError(format!("field '{}': {e}", field.name)))?;
    }
    Ok(())
}

fn decode_fields(
    reader: &mut Reader,
    type_name: &str,
    schema: &MessageSchema,
    store: &TypeStore,
) -> Result<DynamicMessage> {
    let mut fields = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        let value = decode_value(reader, &field.field_type, store)
            .map_err(|e| Error::CdrError(format!("field '{}': {e}", field.name)))?;
        fields.push((field.name.clone(), value));
    }
    Ok(DynamicMessage {
        type_name: crate::intern::intern(type_name),
        fields,
    })
}

fn encode_value(writer: &mut Writer, ft: &FieldType, value: &Value, store: &TypeStore) -> Result<()> {
    match FieldShape::classify(ft)? {
        FieldShape::Scalar(base) => encode_scalar(writer, base, ft, value, store),
        FieldShape::FixedArray(base, n) => {
            let Value::Array(items) = value else {
                return Err(Error::CdrError("expected an array value".to_string()));
            };
            if items.len() as u64 != n {
                return Err(Error::CdrError(format!(
                    "fixed array expects {n} elements, got {}",
                    items.len()
                )));
            }
            let elem_ft = element_field_type(base, ft);
            for item in items {
                encode_scalar(writer, base, &elem_ft, item, store)?;
            }
            Ok(())
        }
        FieldShape::Sequence(base, bound) => {
            let Value::Array(items) = value else {
                return Err(Error::CdrError("expected an array value".to_string()));
            };
            if let Some(bound) = bound
                && items.len() as u64 > bound
            {
                return Err(Error::CdrError(format!(
                    "bounded sequence exceeds capacity {bound}: got {} elements",
                    items.len()
                )));
            }
            writer.write_u32(items.len() as u32);
            let elem_ft = element_field_type(base, ft);
            for item in items {
                encode_scalar(writer, base, &elem_ft, item, store)?;
            }
            Ok(())
        }
    }
}

fn decode_value(reader: &mut Reader, ft: &FieldType, store: &TypeStore) -> Result<Value> {
    match FieldShape::classify(ft)? {
        FieldShape::Scalar(base) => decode_scalar(reader, base, ft, store),
        FieldShape::FixedArray(base, n) => {
            let elem_ft = element_field_type(base, ft);
            let mut items = Vec::with_capacity(n as usize);
            for _ in 0..n {
                items.push(decode_scalar(reader, base, &elem_ft, store)?);
            }
            Ok(Value::Array(items))
        }
        FieldShape::Sequence(base, bound) => {
            let count = reader.read_u32()? as u64;
            if let Some(bound) = bound
                && count > bound
            {
                return Err(Error::CdrError(format!(
                    "bounded sequence exceeds capacity {bound}: wire count {count}"
                )));
            }
            let elem_ft = element_field_type(base, ft);
            let mut items = Vec::with_capacity(count as usize);
            for _ in 0..count {
                items.push(decode_scalar(reader, base, &elem_ft, store)?);
            }
            Ok(Value::Array(items))
        }
    }
}

fn element_field_type(base: u8, original: &FieldType) -> FieldType {
    if base == FIELD_TYPE_NESTED_TYPE {
        FieldType::nested(original.nested_type_name.clone())
    } else if matches!(
        base,
        FIELD_TYPE_STRING | FIELD_TYPE_FIXED_STRING | FIELD_TYPE_BOUNDED_STRING
    ) {
        FieldType::string_with_capacity(base, original.string_capacity)
    } else if matches!(
        base,
        FIELD_TYPE_WSTRING | FIELD_TYPE_FIXED_WSTRING | FIELD_TYPE_BOUNDED_WSTRING
    ) {
        FieldType::string_with_capacity(base, original.string_capacity)
    } else {
        FieldType::primitive(base)
    }
}

fn encode_scalar(
    writer: &mut Writer,
    base: u8,
    ft: &FieldType,
    value: &Value,
    store: &TypeStore,
) -> Result<()> {
    match base {
        FIELD_TYPE_BOOLEAN => writer.write_u8(expect_bool(value)? as u8),
        FIELD_TYPE_INT8 => writer.write_u8(expect_i8(value)? as u8),
        FIELD_TYPE_UINT8 | FIELD_TYPE_CHAR | FIELD_TYPE_BYTE => writer.write_u8(expect_u8(value)?),
        FIELD_TYPE_INT16 => writer.write_i16(expect_i16(value)?),
        FIELD_TYPE_UINT16 | FIELD_TYPE_WCHAR => writer.write_u16(expect_u16(value)?),
        FIELD_TYPE_INT32 => writer.write_i32(expect_i32(value)?),
        FIELD_TYPE_UINT32 => writer.write_u32(expect_u32(value)?),
        FIELD_TYPE_INT64 => writer.write_i64(expect_i64(value)?),
        FIELD_TYPE_UINT64 => writer.write_u64(expect_u64(value)?),
        FIELD_TYPE_FLOAT => writer.write_f32(expect_f32(value)?),
        FIELD_TYPE_DOUBLE => writer.write_f64(expect_f64(value)?),
        FIELD_TYPE_STRING | FIELD_TYPE_FIXED_STRING | FIELD_TYPE_BOUNDED_STRING => {
            let s = expect_str(value)?;
            if ft.string_capacity > 0 && s.len() as u64 > ft.string_capacity {
                return Err(Error::CdrError(format!(
                    "string exceeds bound {}: got {} bytes",
                    ft.string_capacity,
                    s.len()
                )));
            }
            writer.write_string(s);
            Ok(())
        }
        FIELD_TYPE_WSTRING | FIELD_TYPE_FIXED_WSTRING | FIELD_TYPE_BOUNDED_WSTRING => {
            let units = expect_wstr(value)?;
            if ft.string_capacity > 0 && units.len() as u64 > ft.string_capacity {
                return Err(Error::CdrError(format!(
                    "wstring exceeds bound {}: got {} units",
                    ft.string_capacity,
                    units.len()
                )));
            }
            writer.write_wstring(units);
            Ok(())
        }
        FIELD_TYPE_NESTED_TYPE => {
            let Value::Message(nested) = value else {
                return Err(Error::CdrError("expected a nested message value".to_string()));
            };
            let nested_schema = store.resolve(&ft.nested_type_name)?;
            encode_fields(writer, &nested_schema, nested, store)
        }
        other => Err(Error::CdrError(format!("unsupported scalar type id {other}"))),
    }
}

fn decode_scalar(reader: &mut Reader, base: u8, ft: &FieldType, store: &TypeStore) -> Result<Value> {
    Ok(match base {
        FIELD_TYPE_BOOLEAN => Value::Bool(reader.read_u8()? != 0),
        FIELD_TYPE_INT8 => Value::I8(reader.read_u8()? as i8),
        FIELD_TYPE_UINT8 | FIELD_TYPE_CHAR | FIELD_TYPE_BYTE => Value::U8(reader.read_u8()?),
        FIELD_TYPE_INT16 => Value::I16(reader.read_i16()?),
        FIELD_TYPE_UINT16 | FIELD_TYPE_WCHAR => Value::U16(reader.read_u16()?),
        FIELD_TYPE_INT32 => Value::I32(reader.read_i32()?),
        FIELD_TYPE_UINT32 => Value::U32(reader.read_u32()?),
        FIELD_TYPE_INT64 => Value::I64(reader.read_i64()?),
        FIELD_TYPE_UINT64 => Value::U64(reader.read_u64()?),
        FIELD_TYPE_FLOAT => Value::F32(reader.read_f32()?),
        FIELD_TYPE_DOUBLE => Value::F64(reader.read_f64()?),
        FIELD_TYPE_STRING | FIELD_TYPE_FIXED_STRING | FIELD_TYPE_BOUNDED_STRING => {
            Value::Str(reader.read_string()?)
        }
        FIELD_TYPE_WSTRING | FIELD_TYPE_FIXED_WSTRING | FIELD_TYPE_BOUNDED_WSTRING => {
            Value::WStr(reader.read_wstring()?)
        }
        FIELD_TYPE_NESTED_TYPE => {
            let nested_schema = store.resolve(&ft.nested_type_name)?;
            Value::Message(decode_fields(
                reader,
                &ft.nested_type_name,
                &nested_schema,
                store,
            )?)
        }
        other => return Err(Error::CdrError(format!("unsupported scalar type id {other}"))),
    })
}

macro_rules! expect_fn {
    ($name:ident, $variant:ident, $t:ty) => {
        fn $name(value: &Value) -> Result<$t> {
            match value {
                Value::$variant(v) => Ok(*v),
                other => Err(Error::CdrError(format!(
                    "type mismatch: expected {}, got {other:?}",
                    stringify!($variant)
                ))),
            }
        }
    };
}

expect_fn!(expect_bool, Bool, bool);
expect_fn!(expect_i8, I8, i8);
expect_fn!(expect_u8, U8, u8);
expect_fn!(expect_i16, I16, i16);
expect_fn!(expect_u16, U16, u16);
expect_fn!(expect_i32, I32, i32);
expect_fn!(expect_u32, U32, u32);
expect_fn!(expect_i64, I64, i64);
expect_fn!(expect_u64, U64, u64);
expect_fn!(expect_f32, F32, f32);
expect_fn!(expect_f64, F64, f64);

fn expect_str(value: &Value) -> Result<&str> {
    match value {
        Value::Str(s) => Ok(s.as_str()),
        other => Err(Error::CdrError(format!("type mismatch: expected Str, got {other:?}"))),
    }
}

fn expect_wstr(value: &Value) -> Result<&[u16]> {
    match value {
        Value::WStr(s) => Ok(s.as_slice()),
        other => Err(Error::CdrError(format!("type mismatch: expected WStr, got {other:?}"))),
    }
}

/// Growable little-endian CDR writer, header included in alignment.
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn new() -> Self {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(&HEADER_LE);
        Self { buf }
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }

    fn align(&mut self, n: usize) {
        let rem = self.buf.len() % n;
        if rem != 0 {
            self.buf.resize(self.buf.len() + (n - rem), 0);
        }
    }

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u16(&mut self, v: u16) {
        self.align(2);
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i16(&mut self, v: i16) {
        self.write_u16(v as u16);
    }

    fn write_u32(&mut self, v: u32) {
        self.align(4);
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.write_u32(v as u32);
    }

    fn write_u64(&mut self, v: u64) {
        self.align(8);
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i64(&mut self, v: i64) {
        self.write_u64(v as u64);
    }

    fn write_f32(&mut self, v: f32) {
        self.write_u32(v.to_bits());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_string(&mut self, s: &str) {
        self.write_u32(s.len() as u32 + 1);
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(0);
    }

    /// UTF-16 code units, no trailing NUL (DDS-XTypes wstring convention).
    fn write_wstring(&mut self, units: &[u16]) {
        self.write_u32(units.len() as u32);
        for unit in units {
            self.write_u16(*unit);
        }
    }
}

/// Reads a CDR buffer, tracking position from the start of the header so
/// alignment matches what [`Writer`] produced.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(Error::CdrError("buffer shorter than CDR header".to_string()));
        }
        if bytes[0..4] != HEADER_LE && bytes[0..4] != HEADER_BE {
            return Err(Error::CdrError(format!(
                "unsupported CDR encapsulation header: {:02x?}",
                &bytes[0..4]
            )));
        }
        if bytes[0..4] == HEADER_BE {
            return Err(Error::CdrError(
                "big-endian CDR is not supported by the dynamic codec".to_string(),
            ));
        }
        Ok(Self { bytes, pos: 4 })
    }

    fn align(&mut self, n: usize) {
        let rem = self.pos % n;
        if rem != 0 {
            self.pos += n - rem;
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.bytes.len() {
            return Err(Error::CdrError(format!(
                "buffer underrun: need {n} bytes at offset {}, have {}",
                self.pos,
                self.bytes.len()
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16> {
        self.align(2);
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    fn read_u32(&mut self) -> Result<u32> {
        self.align(4);
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    fn read_u64(&mut self) -> Result<u64> {
        self.align(8);
        let bytes = self.take(8)?;
        Ok(u64::from_le_bytes(bytes.try_into().unwrap()))
    }

    fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        if len == 0 {
            return Ok(String::new());
        }
        let bytes = self.take(len)?;
        let without_nul = &bytes[..len - 1];
        String::from_utf8(without_nul.to_vec())
            .map_err(|e| Error::CdrError(format!("invalid UTF-8 in string field: {e}")))
    }

    fn read_wstring(&mut self) -> Result<Vec<u16>> {
        let len = self.read_u32()? as usize;
        let mut units = Vec::with_capacity(len);
        for _ in 0..len {
            units.push(self.read_u16()?);
        }
        Ok(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::MessageBuilder;
    use crate::types::{Field, IndividualTypeDescription};

    fn string_store() -> TypeStore {
        let store = TypeStore::new();
        store
            .register(IndividualTypeDescription::new(
                "std_msgs/msg/String",
                vec![Field::new("data", FieldType::primitive(FIELD_TYPE_STRING))],
            ))
            .unwrap();
        store
    }

    #[test]
    fn string_roundtrips() {
        let store = string_store();
        let schema = store.get("std_msgs/msg/String").unwrap();
        let msg = MessageBuilder::new("std_msgs/msg/String", &schema, &store)
            .set("data", Value::Str("hello".to_string()))
            .unwrap()
            .build()
            .unwrap();

        let bytes = encode(&msg, &store).unwrap();
        assert_eq!(&bytes[0..4], &HEADER_LE);

        let decoded = decode("std_msgs/msg/String", &store, &bytes).unwrap();
        assert_eq!(decoded.get("data"), Some(&Value::Str("hello".to_string())));
    }

    #[test]
    fn eight_byte_field_is_aligned_past_the_header() {
        let store = TypeStore::new();
        store
            .register(IndividualTypeDescription::new(
                "test_msgs/msg/Int64Only",
                vec![Field::new("value", FieldType::primitive(FIELD_TYPE_INT64))],
            ))
            .unwrap();
        let schema = store.get("test_msgs/msg/Int64Only").unwrap();
        let msg = MessageBuilder::new("test_msgs/msg/Int64Only", &schema, &store)
            .set("value", Value::I64(42))
            .unwrap()
            .build()
            .unwrap();

        let bytes = encode(&msg, &store).unwrap();
        // 4-byte header, 4-byte pad, then the 8-byte value.
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[8..16], &42i64.to_le_bytes());
    }

    #[test]
    fn sequence_bound_is_enforced() {
        let store = TypeStore::new();
        store
            .register(IndividualTypeDescription::new(
                "test_msgs/msg/BoundedInts",
                vec![Field::new(
                    "values",
                    FieldType::bounded_sequence(FIELD_TYPE_INT32, 2),
                )],
            ))
            .unwrap();
        let msg = DynamicMessage {
            type_name: crate::intern::intern("test_msgs/msg/BoundedInts"),
            fields: vec![(
                "values".to_string(),
                Value::Array(vec![Value::I32(1), Value::I32(2), Value::I32(3)]),
            )],
        };
        assert!(encode(&msg, &store).is_err());
    }

    #[test]
    fn nested_message_roundtrips() {
        let store = TypeStore::with_builtins();
        store
            .register(IndividualTypeDescription::new(
                "test_msgs/msg/Stamped",
                vec![Field::new(
                    "stamp",
                    FieldType::nested("builtin_interfaces/msg/Time"),
                )],
            ))
            .unwrap();
        let schema = store.get("test_msgs/msg/Stamped").unwrap();
        let msg = MessageBuilder::new("test_msgs/msg/Stamped", &schema, &store)
            .build()
            .unwrap();

        let bytes = encode(&msg, &store).unwrap();
        let decoded = decode("test_msgs/msg/Stamped", &store, &bytes).unwrap();
        let Some(Value::Message(stamp)) = decoded.get("stamp") else {
            panic!("expected nested message");
        };
        assert_eq!(stamp.get("sec"), Some(&Value::I32(0)));
    }
}
