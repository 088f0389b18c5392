use std::collections::{BTreeMap, HashMap};

use base64::prelude::*;
use bigdecimal::BigDecimal;
use prost::{Message, Name};
use prost_types::value::Kind;
use prost_types::value::Kind::StringValue;
use prost_types::{value, ListValue, Struct, Value};
use time::{Date, OffsetDateTime, UtcOffset};

use spanwire_googleapis::spanner::v1::struct_type::Field;
use spanwire_googleapis::spanner::v1::{StructType, Type, TypeAnnotationCode, TypeCode};

use crate::value::{CommitTimestamp, Interval, Json, Proto, SpannerNumeric};

/// SQL text plus its named parameters.
///
/// Parameters are referenced as `@name` in the SQL. Every bound parameter also records its
/// wire type, so values such as `NULL` or empty arrays keep their declared type.
#[derive(Clone, Debug)]
pub struct Statement {
    pub(crate) sql: String,
    pub(crate) params: BTreeMap<String, Value>,
    pub(crate) param_types: HashMap<String, Type>,
}

impl Statement {
    pub fn new<T: Into<String>>(sql: T) -> Self {
        Statement {
            sql: sql.into(),
            params: Default::default(),
            param_types: Default::default(),
        }
    }

    /// Binds `value` to `@name`. Binding the same name twice keeps the last value.
    pub fn add_param<T>(&mut self, name: &str, value: &T)
    where
        T: ToKind,
    {
        self.param_types.insert(name.to_string(), T::get_type());
        self.params.insert(
            name.to_string(),
            Value {
                kind: Some(value.to_kind()),
            },
        );
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub(crate) fn params(&self) -> Option<Struct> {
        if self.params.is_empty() {
            return None;
        }
        Some(Struct {
            fields: self.params.clone(),
        })
    }
}

pub fn single_type<T>(code: T) -> Type
where
    T: Into<i32>,
{
    Type {
        code: code.into(),
        array_element_type: None,
        struct_type: None,
        type_annotation: TypeAnnotationCode::Unspecified.into(),
        proto_type_fqn: String::new(),
    }
}

pub trait ToKind {
    fn to_kind(&self) -> value::Kind;
    fn get_type() -> Type
    where
        Self: Sized;
}

pub type Kinds = Vec<(&'static str, Kind)>;
pub type Types = Vec<(&'static str, Type)>;

pub trait ToStruct {
    fn to_kinds(&self) -> Kinds;
    fn get_types() -> Types
    where
        Self: Sized;
}

impl<T> ToStruct for &T
where
    T: ToStruct,
{
    fn to_kinds(&self) -> Kinds {
        (*self).to_kinds()
    }

    fn get_types() -> Types
    where
        Self: Sized,
    {
        T::get_types()
    }
}

impl ToKind for String {
    fn to_kind(&self) -> Kind {
        StringValue(self.clone())
    }
    fn get_type() -> Type {
        single_type(TypeCode::String)
    }
}

impl ToKind for &str {
    fn to_kind(&self) -> Kind {
        StringValue(self.to_string())
    }
    fn get_type() -> Type {
        single_type(TypeCode::String)
    }
}

impl ToKind for i64 {
    fn to_kind(&self) -> Kind {
        self.to_string().to_kind()
    }
    fn get_type() -> Type {
        single_type(TypeCode::Int64)
    }
}

/// Non-finite floats travel as the strings `NaN`, `Infinity` and `-Infinity`.
fn float_kind(v: f64) -> Kind {
    if v.is_nan() {
        StringValue("NaN".to_string())
    } else if v.is_infinite() && v > 0.0 {
        StringValue("Infinity".to_string())
    } else if v.is_infinite() {
        StringValue("-Infinity".to_string())
    } else {
        Kind::NumberValue(v)
    }
}

impl ToKind for f64 {
    fn to_kind(&self) -> Kind {
        float_kind(*self)
    }
    fn get_type() -> Type {
        single_type(TypeCode::Float64)
    }
}

impl ToKind for f32 {
    fn to_kind(&self) -> Kind {
        float_kind(*self as f64)
    }
    fn get_type() -> Type {
        single_type(TypeCode::Float32)
    }
}

impl ToKind for bool {
    fn to_kind(&self) -> Kind {
        value::Kind::BoolValue(*self)
    }
    fn get_type() -> Type {
        single_type(TypeCode::Bool)
    }
}

impl ToKind for Date {
    fn to_kind(&self) -> Kind {
        format!("{:04}-{:02}-{:02}", self.year(), u8::from(self.month()), self.day()).to_kind()
    }
    fn get_type() -> Type {
        single_type(TypeCode::Date)
    }
}

impl ToKind for OffsetDateTime {
    /// RFC 3339 in UTC with nanosecond precision.
    fn to_kind(&self) -> Kind {
        let utc = self.to_offset(UtcOffset::UTC);
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}Z",
            utc.year(),
            u8::from(utc.month()),
            utc.day(),
            utc.hour(),
            utc.minute(),
            utc.second(),
            utc.nanosecond()
        )
        .to_kind()
    }
    fn get_type() -> Type {
        single_type(TypeCode::Timestamp)
    }
}

impl ToKind for CommitTimestamp {
    fn to_kind(&self) -> Kind {
        "spanner.commit_timestamp()".to_kind()
    }
    fn get_type() -> Type {
        single_type(TypeCode::Timestamp)
    }
}

impl ToKind for &[u8] {
    fn to_kind(&self) -> Kind {
        BASE64_STANDARD.encode(self).to_kind()
    }
    fn get_type() -> Type {
        single_type(TypeCode::Bytes)
    }
}

impl ToKind for Vec<u8> {
    fn to_kind(&self) -> Kind {
        BASE64_STANDARD.encode(self).to_kind()
    }
    fn get_type() -> Type {
        single_type(TypeCode::Bytes)
    }
}

impl ToKind for SpannerNumeric {
    fn to_kind(&self) -> Kind {
        self.as_str().to_string().to_kind()
    }
    fn get_type() -> Type {
        single_type(TypeCode::Numeric)
    }
}

impl ToKind for BigDecimal {
    fn to_kind(&self) -> Kind {
        self.to_string().to_kind()
    }
    fn get_type() -> Type {
        single_type(TypeCode::Numeric)
    }
}

impl ToKind for Json {
    fn to_kind(&self) -> Kind {
        self.as_str().to_kind()
    }
    fn get_type() -> Type {
        single_type(TypeCode::Json)
    }
}

impl ToKind for Interval {
    fn to_kind(&self) -> Kind {
        self.to_string().to_kind()
    }
    fn get_type() -> Type {
        single_type(TypeCode::Interval)
    }
}

impl<T> ToKind for Proto<T>
where
    T: Message + Name,
{
    fn to_kind(&self) -> Kind {
        BASE64_STANDARD.encode(self.0.encode_to_vec()).to_kind()
    }
    fn get_type() -> Type {
        Type {
            proto_type_fqn: T::full_name(),
            ..single_type(TypeCode::Proto)
        }
    }
}

#[cfg(feature = "uuid")]
impl ToKind for uuid::Uuid {
    fn to_kind(&self) -> Kind {
        self.hyphenated().to_string().to_kind()
    }
    fn get_type() -> Type {
        single_type(TypeCode::Uuid)
    }
}

impl<T> ToKind for T
where
    T: ToStruct,
{
    fn to_kind(&self) -> Kind {
        let mut fields = BTreeMap::<String, Value>::default();
        self.to_kinds().into_iter().for_each(|e| {
            fields.insert(e.0.into(), Value { kind: Some(e.1) });
        });
        Kind::StructValue(Struct { fields })
    }
    fn get_type() -> Type {
        Type {
            code: TypeCode::Struct.into(),
            array_element_type: None,
            type_annotation: TypeAnnotationCode::Unspecified.into(),
            struct_type: Some(StructType {
                fields: T::get_types()
                    .into_iter()
                    .map(|t| Field {
                        name: t.0.into(),
                        r#type: Some(t.1),
                    })
                    .collect(),
            }),
            proto_type_fqn: String::new(),
        }
    }
}

impl<T> ToKind for Option<T>
where
    T: ToKind,
{
    fn to_kind(&self) -> Kind {
        match self {
            Some(vv) => vv.to_kind(),
            None => value::Kind::NullValue(prost_types::NullValue::NullValue.into()),
        }
    }
    fn get_type() -> Type {
        T::get_type()
    }
}

impl<T> ToKind for Vec<T>
where
    T: ToKind,
{
    fn to_kind(&self) -> Kind {
        value::Kind::ListValue(ListValue {
            values: self
                .iter()
                .map(|x| Value {
                    kind: Some(x.to_kind()),
                })
                .collect(),
        })
    }
    fn get_type() -> Type {
        Type {
            code: TypeCode::Array.into(),
            array_element_type: Some(Box::new(T::get_type())),
            struct_type: None,
            type_annotation: TypeAnnotationCode::Unspecified.into(),
            proto_type_fqn: String::new(),
        }
    }
}
