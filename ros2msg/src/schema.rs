//! Converts parsed [`crate::msg`] definitions into [`ros2_types`]' runtime
//! type-description shape.
//!
//! The `.msg` grammar (`int32[<=5] values`) and the RIHS01/CDR shape
//! (`FieldType { type_id, capacity, string_capacity, nested_type_name }`)
//! describe the same thing two different ways. This module is the one
//! place that translation happens, so the hash engine and the CDR codec
//! never have to know anything about `.msg` syntax.

use ros2_types::types::{
    FIELD_TYPE_BOOLEAN, FIELD_TYPE_BOUNDED_STRING, FIELD_TYPE_BOUNDED_WSTRING, FIELD_TYPE_BYTE,
    FIELD_TYPE_CHAR, FIELD_TYPE_DOUBLE, FIELD_TYPE_FLOAT, FIELD_TYPE_INT8, FIELD_TYPE_INT16,
    FIELD_TYPE_INT32, FIELD_TYPE_INT64, FIELD_TYPE_NESTED_TYPE, FIELD_TYPE_STRING,
    FIELD_TYPE_UINT8, FIELD_TYPE_UINT16, FIELD_TYPE_UINT32, FIELD_TYPE_UINT64, FIELD_TYPE_WSTRING,
    Field as TypeField, FieldType, IndividualTypeDescription,
};

use crate::msg::{Field, MessageSpecification, Type};

const FIXED_ARRAY_OFFSET: u8 = 48;
const BOUNDED_SEQUENCE_OFFSET: u8 = 96;
const UNBOUNDED_SEQUENCE_OFFSET: u8 = 144;

/// Fully-qualified message type name: `<pkg>/msg/<Name>`.
#[must_use]
pub fn message_type_name(pkg_name: &str, msg_name: &str) -> String {
    format!("{pkg_name}/msg/{msg_name}")
}

/// Convert a parsed message into the shape RIHS01 hashing and the dynamic
/// CDR codec both operate on.
///
/// Constants are intentionally dropped: RIHS01 hashes only fields, and
/// runtime instances never carry constant values.
#[must_use]
pub fn to_type_description(spec: &MessageSpecification) -> IndividualTypeDescription {
    let fields = spec
        .fields
        .iter()
        .map(|field| to_field(field, &spec.pkg_name))
        .collect();
    IndividualTypeDescription::new(message_type_name(&spec.pkg_name, &spec.msg_name), fields)
}

fn to_field(field: &Field, context_package: &str) -> TypeField {
    TypeField::new(field.name.clone(), to_field_type(&field.field_type, context_package))
}

/// Convert one `.msg` field's [`Type`] to a [`FieldType`].
///
/// `context_package` is used only as a fallback for local (unqualified)
/// type references — the parser already resolves those against the
/// containing package, so in practice `base_type.pkg_name` is always
/// already set for non-primitive types.
#[must_use]
pub fn to_field_type(ty: &Type, context_package: &str) -> FieldType {
    let base = &ty.base_type;

    let (scalar_id, nested_type_name, string_capacity) = if base.is_primitive_type() {
        match base.type_name.as_str() {
            "time" => return nested_field_type("builtin_interfaces/msg/Time", ty),
            "duration" => return nested_field_type("builtin_interfaces/msg/Duration", ty),
            name => {
                let id = primitive_scalar_id(name, base.string_upper_bound.is_some());
                (id, String::new(), u64::from(base.string_upper_bound.unwrap_or(0)))
            }
        }
    } else {
        let pkg = base.pkg_name.as_deref().unwrap_or(context_package);
        return nested_field_type(&message_type_name(pkg, &base.type_name), ty);
    };

    FieldType {
        type_id: scalar_id + array_offset(ty),
        capacity: array_capacity(ty),
        string_capacity,
        nested_type_name,
    }
}

fn nested_field_type(fq_type_name: &str, ty: &Type) -> FieldType {
    FieldType {
        type_id: FIELD_TYPE_NESTED_TYPE + array_offset(ty),
        capacity: array_capacity(ty),
        string_capacity: 0,
        nested_type_name: fq_type_name.to_string(),
    }
}

fn array_offset(ty: &Type) -> u8 {
    if !ty.is_array {
        0
    } else if ty.is_upper_bound {
        BOUNDED_SEQUENCE_OFFSET
    } else if ty.array_size.is_some() {
        FIXED_ARRAY_OFFSET
    } else {
        UNBOUNDED_SEQUENCE_OFFSET
    }
}

fn array_capacity(ty: &Type) -> u64 {
    if ty.is_array {
        u64::from(ty.array_size.unwrap_or(0))
    } else {
        0
    }
}

fn primitive_scalar_id(primitive: &str, bounded: bool) -> u8 {
    match primitive {
        "bool" => FIELD_TYPE_BOOLEAN,
        "byte" => FIELD_TYPE_BYTE,
        "char" => FIELD_TYPE_CHAR,
        "float32" => FIELD_TYPE_FLOAT,
        "float64" => FIELD_TYPE_DOUBLE,
        "int8" => FIELD_TYPE_INT8,
        "uint8" => FIELD_TYPE_UINT8,
        "int16" => FIELD_TYPE_INT16,
        "uint16" => FIELD_TYPE_UINT16,
        "int32" => FIELD_TYPE_INT32,
        "uint32" => FIELD_TYPE_UINT32,
        "int64" => FIELD_TYPE_INT64,
        "uint64" => FIELD_TYPE_UINT64,
        "string" if bounded => FIELD_TYPE_BOUNDED_STRING,
        "string" => FIELD_TYPE_STRING,
        "wstring" if bounded => FIELD_TYPE_BOUNDED_WSTRING,
        "wstring" => FIELD_TYPE_WSTRING,
        other => unreachable!("'{other}' is not a primitive type name"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::parse_message_string;

    #[test]
    fn scalar_and_string_fields() {
        let spec = parse_message_string("std_msgs", "String", "string data\n").unwrap();
        let desc = to_type_description(&spec);
        assert_eq!(desc.type_name, "std_msgs/msg/String");
        assert_eq!(desc.fields[0].field_type.type_id, FIELD_TYPE_STRING);
    }

    #[test]
    fn fixed_array_and_bounded_sequence() {
        let spec = parse_message_string(
            "test_msgs",
            "Arrays",
            "float64[3] fixed\nint32[<=10] bounded\nstring[] dynamic\n",
        )
        .unwrap();
        let desc = to_type_description(&spec);

        assert_eq!(desc.fields[0].field_type.type_id, FIELD_TYPE_DOUBLE + FIXED_ARRAY_OFFSET);
        assert_eq!(desc.fields[0].field_type.capacity, 3);

        assert_eq!(
            desc.fields[1].field_type.type_id,
            FIELD_TYPE_INT32 + BOUNDED_SEQUENCE_OFFSET
        );
        assert_eq!(desc.fields[1].field_type.capacity, 10);

        assert_eq!(
            desc.fields[2].field_type.type_id,
            FIELD_TYPE_STRING + UNBOUNDED_SEQUENCE_OFFSET
        );
    }

    #[test]
    fn nested_type_reference() {
        let spec = parse_message_string("geometry_msgs", "Twist", "Vector3 linear\nVector3 angular\n")
            .unwrap();
        let desc = to_type_description(&spec);
        assert_eq!(desc.fields[0].field_type.type_id, FIELD_TYPE_NESTED_TYPE);
        assert_eq!(
            desc.fields[0].field_type.nested_type_name,
            "geometry_msgs/msg/Vector3"
        );
    }

    #[test]
    fn time_and_duration_expand_to_builtin_interfaces() {
        let spec = parse_message_string("std_msgs", "Stamped", "time stamp\nduration elapsed\n")
            .unwrap();
        let desc = to_type_description(&spec);
        assert_eq!(desc.fields[0].field_type.type_id, FIELD_TYPE_NESTED_TYPE);
        assert_eq!(
            desc.fields[0].field_type.nested_type_name,
            "builtin_interfaces/msg/Time"
        );
        assert_eq!(
            desc.fields[1].field_type.nested_type_name,
            "builtin_interfaces/msg/Duration"
        );
    }

    #[test]
    fn constants_are_excluded() {
        let spec = parse_message_string(
            "test_msgs",
            "WithConstants",
            "int32 MAX=100\nint32 value\n",
        )
        .unwrap();
        let desc = to_type_description(&spec);
        assert_eq!(desc.fields.len(), 1);
        assert_eq!(desc.fields[0].name, "value");
    }
}
