//! Dynamic, schema-driven record types.
//!
//! Code-generating a Rust struct per `.msg`/`.srv` definition works when the
//! set of types is known at compile time. This SDK resolves types named at
//! runtime (from a topic a peer just advertised, from a CLI argument, from a
//! `.msg` file fetched a moment ago), so there is no `struct` to generate
//! against. Instead a [`MessageSchema`] describes the shape of a type and a
//! [`Value`] tree holds an instance of it; [`crate::cdr_dynamic`] walks the
//! two together to produce or consume CDR bytes.
//!
//! [`TypeStore`] is the process's registry of resolved schemas, keyed by
//! fully-qualified type name (`<pkg>/<kind>/<Name>`). It is append-only:
//! re-registering an identical definition is a no-op, a conflicting one is
//! an error.

use crate::error::{Error, Result, TypeDescriptionError};
use crate::intern;
use crate::types::{
    FIELD_TYPE_BOOLEAN, FIELD_TYPE_DOUBLE, FIELD_TYPE_FLOAT, FIELD_TYPE_INT8, FIELD_TYPE_INT16,
    FIELD_TYPE_INT32, FIELD_TYPE_INT64, FIELD_TYPE_NESTED_TYPE, FIELD_TYPE_STRING,
    FIELD_TYPE_UINT8, FIELD_TYPE_UINT16, FIELD_TYPE_UINT32, FIELD_TYPE_UINT64, FIELD_TYPE_WSTRING,
    Field, FieldType, IndividualTypeDescription, TypeDescriptionMsg,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A record type: an ordered field list plus its fully-qualified name.
///
/// Structurally this *is* a [`IndividualTypeDescription`] — the same shape
/// `rosidl_generator_type_description` emits and the RIHS01 hash is computed
/// over. Reusing it means a schema learned from a `.msg` file and a schema
/// hashed for discovery are never allowed to drift apart.
pub type MessageSchema = IndividualTypeDescription;

/// A value of one field.
///
/// Variants mirror the primitive family in [`crate::types`] (the
/// `FIELD_TYPE_*` constants): every primitive, bounded/unbounded sequence,
/// fixed array, and nested message that a `.msg` field can declare has a
/// home here. There is deliberately no `Option<T>` — ROS2 fields are never
/// optional, only possibly-absent-from-the-wire in the padding sense.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `bool`
    Bool(bool),
    /// `int8`
    I8(i8),
    /// `uint8` / `byte` / `char`
    U8(u8),
    /// `int16`
    I16(i16),
    /// `uint16` / `wchar`
    U16(u16),
    /// `int32`
    I32(i32),
    /// `uint32`
    U32(u32),
    /// `int64`
    I64(i64),
    /// `uint64`
    U64(u64),
    /// `float32`
    F32(f32),
    /// `float64`
    F64(f64),
    /// `string` / bounded string
    Str(String),
    /// `wstring` / bounded wstring, as UTF-16 code units
    WStr(Vec<u16>),
    /// Fixed-size array or bounded/unbounded sequence of any of the above
    Array(Vec<Value>),
    /// A nested message instance
    Message(DynamicMessage),
}

impl Value {
    /// Zero/empty value for a field of the given type.
    ///
    /// Used to fill in fields a caller didn't set and that have no `.msg`
    /// default — matching how every generated ROS2 message type
    /// zero-initializes fields that weren't passed as keyword arguments.
    pub fn zero_for(field_type: &FieldType, store: &TypeStore) -> Result<Value> {
        let shape = FieldShape::classify(field_type)?;
        match shape {
            FieldShape::Scalar(base) => Self::zero_scalar(base, field_type, store),
            FieldShape::FixedArray(base, n) => {
                let elem = field_type_of_base(base, field_type);
                let zero = Self::zero_scalar(base, &elem, store)?;
                Ok(Value::Array(vec![zero; n as usize]))
            }
            FieldShape::Sequence(_, _) => Ok(Value::Array(vec![])),
        }
    }

    fn zero_scalar(base: u8, field_type: &FieldType, store: &TypeStore) -> Result<Value> {
        Ok(match base {
            FIELD_TYPE_BOOLEAN => Value::Bool(false),
            FIELD_TYPE_INT8 => Value::I8(0),
            FIELD_TYPE_UINT8 | 13 /* CHAR */ | 16 /* BYTE */ => Value::U8(0),
            FIELD_TYPE_INT16 => Value::I16(0),
            FIELD_TYPE_UINT16 | 14 /* WCHAR */ => Value::U16(0),
            FIELD_TYPE_INT32 => Value::I32(0),
            FIELD_TYPE_UINT32 => Value::U32(0),
            FIELD_TYPE_INT64 => Value::I64(0),
            FIELD_TYPE_UINT64 => Value::U64(0),
            FIELD_TYPE_FLOAT => Value::F32(0.0),
            FIELD_TYPE_DOUBLE => Value::F64(0.0),
            FIELD_TYPE_STRING | 19 /* FIXED_STRING */ | 21 /* BOUNDED_STRING */ => {
                Value::Str(String::new())
            }
            FIELD_TYPE_WSTRING | 20 /* FIXED_WSTRING */ | 22 /* BOUNDED_WSTRING */ => {
                Value::WStr(vec![])
            }
            FIELD_TYPE_NESTED_TYPE => {
                let nested = store.resolve(&field_type.nested_type_name)?;
                Value::Message(DynamicMessage::zero(&field_type.nested_type_name, &nested, store)?)
            }
            other => {
                return Err(Error::CdrError(format!(
                    "unsupported scalar field type id {other}"
                )));
            }
        })
    }
}

fn field_type_of_base(base: u8, original: &FieldType) -> FieldType {
    if base == FIELD_TYPE_NESTED_TYPE {
        FieldType::nested(original.nested_type_name.clone())
    } else {
        FieldType::primitive(base)
    }
}

/// How a [`FieldType`] is shaped, independent of its element kind.
pub(crate) enum FieldShape {
    Scalar(u8),
    /// `(base_type_id, length)`
    FixedArray(u8, u64),
    /// `(base_type_id, Some(bound) for bounded, None for unbounded)`
    Sequence(u8, Option<u64>),
}

impl FieldShape {
    pub(crate) fn classify(ft: &FieldType) -> Result<FieldShape> {
        let id = ft.type_id;
        Ok(match id {
            2..=22 => FieldShape::Scalar(id),
            0 => {
                return Err(Error::CdrError("field type is not set".to_string()));
            }
            1 => FieldShape::Scalar(FIELD_TYPE_NESTED_TYPE),
            49..=66 => FieldShape::FixedArray(id - 48, ft.capacity),
            97..=114 => FieldShape::Sequence(id - 96, Some(ft.capacity)),
            145..=162 => FieldShape::Sequence(id - 144, None),
            other => {
                return Err(Error::CdrError(format!("unknown field type id {other}")));
            }
        })
    }
}

/// A record instance: a runtime type name plus an ordered field list.
///
/// The field order always matches the order in the [`MessageSchema`] it was
/// built from — [`crate::cdr_dynamic`] relies on this to avoid a name
/// lookup per field during encode.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMessage {
    /// Fully-qualified type name, interned so it can be handed out as
    /// `&'static str` where `TypeSupport::type_name` expects one.
    pub type_name: &'static str,
    /// Field values, in schema order.
    pub fields: Vec<(String, Value)>,
}

impl DynamicMessage {
    /// Build an all-zero instance of `schema`.
    pub fn zero(type_name: &str, schema: &MessageSchema, store: &TypeStore) -> Result<Self> {
        let mut fields = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            fields.push((field.name.clone(), Value::zero_for(&field.field_type, store)?));
        }
        Ok(DynamicMessage {
            type_name: intern::intern(type_name),
            fields,
        })
    }

    /// Get a field's value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// Builds a [`DynamicMessage`] from keyword-style field assignments,
/// validating against a [`MessageSchema`] as it goes.
///
/// ```ignore
/// let msg = MessageBuilder::new("std_msgs/msg/String", &schema, &store)
///     .set("data", Value::Str("Hello".into()))?
///     .build()?;
/// ```
pub struct MessageBuilder<'a> {
    type_name: String,
    schema: &'a MessageSchema,
    store: &'a TypeStore,
    values: HashMap<String, Value>,
}

impl<'a> MessageBuilder<'a> {
    /// Start building an instance of `schema`.
    pub fn new(type_name: impl Into<String>, schema: &'a MessageSchema, store: &'a TypeStore) -> Self {
        Self {
            type_name: type_name.into(),
            schema,
            store,
            values: HashMap::new(),
        }
    }

    /// Set one field. Errors if `name` is not declared on the schema.
    pub fn set(mut self, name: &str, value: Value) -> Result<Self> {
        if !self.schema.fields.iter().any(|f| f.name == name) {
            return Err(TypeDescriptionError::InvalidFieldValue {
                field_name: name.to_string(),
                reason: format!("'{name}' is not a field of {}", self.type_name),
            }
            .into());
        }
        self.values.insert(name.to_string(), value);
        Ok(self)
    }

    /// Finish, filling any unset field from its `.msg` default or the
    /// type's zero value.
    pub fn build(self) -> Result<DynamicMessage> {
        let mut fields = Vec::with_capacity(self.schema.fields.len());
        let mut values = self.values;
        for field in &self.schema.fields {
            let value = match values.remove(&field.name) {
                Some(v) => v,
                None => Value::zero_for(&field.field_type, self.store)?,
            };
            fields.push((field.name.clone(), value));
        }
        Ok(DynamicMessage {
            type_name: intern::intern(&self.type_name),
            fields,
        })
    }
}

/// The process-wide (or test-local) registry of resolved [`MessageSchema`]s.
///
/// Append-only and safe to share across endpoints: once a schema is
/// registered its shape never changes, so reads never need to coordinate
/// with other reads. Registration coordinates through a single `RwLock`,
/// matching the session-level mutex the spec describes for the Python
/// implementation's registry.
pub struct TypeStore {
    schemas: RwLock<HashMap<String, Arc<MessageSchema>>>,
}

impl TypeStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            schemas: RwLock::new(HashMap::new()),
        }
    }

    /// A store pre-seeded with the `builtin_interfaces` types every `.msg`
    /// parser implicitly depends on through `time`/`duration` fields.
    pub fn with_builtins() -> Self {
        let store = Self::new();
        store
            .register(MessageSchema::new(
                "builtin_interfaces/msg/Time",
                vec![
                    Field::new("sec", FieldType::primitive(FIELD_TYPE_INT32)),
                    Field::new("nanosec", FieldType::primitive(FIELD_TYPE_UINT32)),
                ],
            ))
            .expect("builtin schema registration cannot conflict");
        store
            .register(MessageSchema::new(
                "builtin_interfaces/msg/Duration",
                vec![
                    Field::new("sec", FieldType::primitive(FIELD_TYPE_INT32)),
                    Field::new("nanosec", FieldType::primitive(FIELD_TYPE_UINT32)),
                ],
            ))
            .expect("builtin schema registration cannot conflict");
        store
    }

    /// Look up an already-registered schema.
    pub fn get(&self, fq_type_name: &str) -> Option<Arc<MessageSchema>> {
        self.schemas.read().unwrap().get(fq_type_name).cloned()
    }

    /// Look up a schema, failing if it isn't registered yet.
    ///
    /// The reference `rmw_zenoh` implementation has divergent copies of
    /// this lookup, one of which silently returns a zeroed placeholder hash
    /// on a miss. That is wrong: a placeholder hash breaks peer matching
    /// without telling anyone. This always raises on a miss.
    pub fn resolve(&self, fq_type_name: &str) -> Result<Arc<MessageSchema>> {
        self.get(fq_type_name).ok_or_else(|| {
            Error::CdrError(format!("type not registered: {fq_type_name}"))
        })
    }

    /// Register a schema. A no-op if an identical definition is already
    /// registered; an error if a conflicting one is.
    pub fn register(&self, schema: MessageSchema) -> Result<Arc<MessageSchema>> {
        let mut schemas = self.schemas.write().unwrap();
        if let Some(existing) = schemas.get(&schema.type_name) {
            if schemas_equivalent(existing, &schema) {
                return Ok(existing.clone());
            }
            return Err(Error::CdrError(format!(
                "conflicting redefinition of type {}",
                schema.type_name
            )));
        }
        let arc = Arc::new(schema);
        schemas.insert(arc.type_name.clone(), arc.clone());
        Ok(arc)
    }

    /// Build the recursive [`TypeDescriptionMsg`] for RIHS01 hashing:
    /// the subject's own field list plus every transitively-referenced
    /// type's field list, deduplicated.
    pub fn type_description(&self, fq_type_name: &str) -> Result<TypeDescriptionMsg> {
        let subject = self.resolve(fq_type_name)?;
        let mut seen = HashMap::new();
        self.collect_references(&subject, &mut seen)?;
        let mut referenced: Vec<_> = seen.into_values().collect();
        referenced.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        Ok(TypeDescriptionMsg::new((*subject).clone(), referenced))
    }

    fn collect_references(
        &self,
        schema: &MessageSchema,
        seen: &mut HashMap<String, IndividualTypeDescription>,
    ) -> Result<()> {
        for field in &schema.fields {
            if field.field_type.nested_type_name.is_empty() {
                continue;
            }
            let name = &field.field_type.nested_type_name;
            if seen.contains_key(name) {
                continue;
            }
            let nested = self.resolve(name)?;
            seen.insert(name.clone(), (*nested).clone());
            self.collect_references(&nested, seen)?;
        }
        Ok(())
    }
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}

fn schemas_equivalent(a: &MessageSchema, b: &MessageSchema) -> bool {
    if a.type_name != b.type_name || a.fields.len() != b.fields.len() {
        return false;
    }
    a.fields.iter().zip(b.fields.iter()).all(|(x, y)| {
        x.name == y.name
            && x.field_type.type_id == y.field_type.type_id
            && x.field_type.capacity == y.field_type.capacity
            && x.field_type.string_capacity == y.field_type.string_capacity
            && x.field_type.nested_type_name == y.field_type.nested_type_name
    })
}
