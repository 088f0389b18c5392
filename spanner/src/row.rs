use std::collections::{BTreeMap, HashMap};
use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::Arc;

use base64::prelude::*;
use base64::DecodeError;
use bigdecimal::{BigDecimal, ParseBigDecimalError};
use prost::{Message, Name};
use prost_types::value::Kind;
use prost_types::{value, Value};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use spanwire_googleapis::spanner::v1::struct_type::Field;
use spanwire_googleapis::spanner::v1::StructType;

use crate::value::{CommitTimestamp, Interval, IntervalParseError, Json, Proto, SpannerNumeric};

#[derive(Clone, Debug)]
pub struct Row {
    index: Arc<HashMap<String, usize>>,
    fields: Arc<Vec<Field>>,
    values: Vec<Value>,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Illegal Kind: field={0}, kind={1}")]
    KindMismatch(String, String),
    #[error("No kind found: field={0}")]
    NoKind(String),
    #[error("Parse field: field={0}")]
    IntParseError(String, #[source] ParseIntError),
    #[error("Failed to parse as float: field={0}, value={1}")]
    FloatParseError(String, String),
    #[error("Failed to parse as Date|DateTime {0}")]
    DateParseError(String, #[source] time::error::Parse),
    #[error("Failed to parse as ByteArray {0}")]
    ByteParseError(String, #[source] DecodeError),
    #[error("Failed to parse as Numeric {0}")]
    NumericParseError(String, #[source] ParseBigDecimalError),
    #[error("Failed to parse as Interval {0}")]
    IntervalParseError(String, #[source] IntervalParseError),
    #[error("Failed to decode as Proto {0}")]
    ProtoParseError(String, #[source] prost::DecodeError),
    #[cfg(feature = "uuid")]
    #[error("Failed to parse as Uuid {0}")]
    UuidParseError(String, #[source] uuid::Error),
    #[error("Failed to parse as Struct name={0}, {1}")]
    StructParseError(String, &'static str),
    #[error("Failed to parse as Custom Type {0}")]
    CustomParseError(String),
    #[error("No column found: name={0}")]
    NoColumnFound(String),
    #[error("invalid column index: index={0}, length={1}")]
    InvalidColumnIndex(usize, usize),
    #[error("invalid struct column index: index={0}")]
    InvalidStructColumnIndex(usize),
    #[error("No column found in struct: name={0}")]
    NoColumnFoundInStruct(String),
}

impl Row {
    pub fn new(index: Arc<HashMap<String, usize>>, fields: Arc<Vec<Field>>, values: Vec<Value>) -> Row {
        Row { index, fields, values }
    }

    pub fn column<T>(&self, column_index: usize) -> Result<T, Error>
    where
        T: TryFromValue,
    {
        column(&self.values, &self.fields, column_index)
    }

    pub fn column_by_name<T>(&self, column_name: &str) -> Result<T, Error>
    where
        T: TryFromValue,
    {
        self.column(index(&self.index, column_name)?)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw wire values of the row, in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

//don't use TryFrom trait to avoid the conflict
//https://github.com/rust-lang/rust/issues/50133
pub trait TryFromValue: Sized {
    fn try_from(value: &Value, field: &Field) -> Result<Self, Error>;
}

pub trait TryFromStruct: Sized {
    fn try_from_struct(s: Struct<'_>) -> Result<Self, Error>;
}

pub struct Struct<'a> {
    index: HashMap<String, usize>,
    metadata: &'a StructType,
    list_values: Option<&'a Vec<Value>>,
    struct_values: Option<&'a BTreeMap<String, Value>>,
}

impl<'a> Struct<'a> {
    pub fn new(metadata: &'a StructType, item: &'a Value, field: &'a Field) -> Result<Struct<'a>, Error> {
        let kind = as_ref(item, field)?;
        let mut index = HashMap::new();
        for (i, f) in metadata.fields.iter().enumerate() {
            index.insert(f.name.to_string(), i);
        }
        match kind {
            Kind::ListValue(s) => Ok(Struct {
                metadata,
                index,
                list_values: Some(&s.values),
                struct_values: None,
            }),
            Kind::StructValue(s) => Ok(Struct {
                metadata,
                index,
                list_values: None,
                struct_values: Some(&s.fields),
            }),
            _ => kind_to_error(kind, field),
        }
    }

    pub fn column<T>(&self, column_index: usize) -> Result<T, Error>
    where
        T: TryFromValue,
    {
        match (self.list_values, self.struct_values) {
            (Some(values), _) => column(values, &self.metadata.fields, column_index),
            (None, Some(values)) => {
                let field = self
                    .metadata
                    .fields
                    .get(column_index)
                    .ok_or(Error::InvalidStructColumnIndex(column_index))?;
                match values.get(&field.name) {
                    Some(value) => T::try_from(value, field),
                    None => Err(Error::NoColumnFoundInStruct(field.name.to_string())),
                }
            }
            (None, None) => Err(Error::InvalidStructColumnIndex(column_index)),
        }
    }

    pub fn column_by_name<T>(&self, column_name: &str) -> Result<T, Error>
    where
        T: TryFromValue,
    {
        self.column(index(&self.index, column_name)?)
    }
}

/// Decodes a string-encoded value with `parse`. Any other kind is a mismatch.
fn parse_string<T>(item: &Value, field: &Field, parse: impl FnOnce(&str) -> Result<T, Error>) -> Result<T, Error> {
    match as_ref(item, field)? {
        Kind::StringValue(s) => parse(s),
        v => kind_to_error(v, field),
    }
}

/// INT64 and ENUM columns, both encoded as decimal strings.
impl TryFromValue for i64 {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        parse_string(item, field, |s| {
            s.parse().map_err(|e| Error::IntParseError(field.name.clone(), e))
        })
    }
}

fn float_from(item: &Value, field: &Field) -> Result<f64, Error> {
    match as_ref(item, field)? {
        Kind::NumberValue(n) => Ok(*n),
        // non-finite values travel as strings
        Kind::StringValue(s) => match s.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            _ => Err(Error::FloatParseError(field.name.clone(), s.clone())),
        },
        v => kind_to_error(v, field),
    }
}

impl TryFromValue for f64 {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        float_from(item, field)
    }
}

impl TryFromValue for f32 {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        float_from(item, field).map(|v| v as f32)
    }
}

impl TryFromValue for bool {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        match as_ref(item, field)? {
            Kind::BoolValue(b) => Ok(*b),
            v => kind_to_error(v, field),
        }
    }
}

impl TryFromValue for OffsetDateTime {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        parse_string(item, field, |s| {
            OffsetDateTime::parse(s, &Rfc3339).map_err(|e| Error::DateParseError(field.name.clone(), e))
        })
    }
}

impl TryFromValue for CommitTimestamp {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        let timestamp = <OffsetDateTime as TryFromValue>::try_from(item, field)?;
        Ok(CommitTimestamp { timestamp })
    }
}

impl TryFromValue for Date {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        parse_string(item, field, |s| {
            Date::parse(s, format_description!("[year]-[month]-[day]"))
                .map_err(|e| Error::DateParseError(field.name.clone(), e))
        })
    }
}

impl TryFromValue for Vec<u8> {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        parse_string(item, field, |s| {
            BASE64_STANDARD
                .decode(s)
                .map_err(|e| Error::ByteParseError(field.name.clone(), e))
        })
    }
}

impl TryFromValue for SpannerNumeric {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        parse_string(item, field, |s| Ok(SpannerNumeric::new(s.to_string())))
    }
}

impl TryFromValue for BigDecimal {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        parse_string(item, field, |s| {
            BigDecimal::from_str(s).map_err(|e| Error::NumericParseError(field.name.clone(), e))
        })
    }
}

impl TryFromValue for Json {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        parse_string(item, field, |s| Ok(Json::new(s)))
    }
}

impl TryFromValue for Interval {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        parse_string(item, field, |s| {
            s.parse().map_err(|e| Error::IntervalParseError(field.name.clone(), e))
        })
    }
}

impl<T> TryFromValue for Proto<T>
where
    T: Message + Name + Default,
{
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        let bytes = <Vec<u8> as TryFromValue>::try_from(item, field)?;
        T::decode(bytes.as_slice())
            .map(Proto)
            .map_err(|e| Error::ProtoParseError(field.name.clone(), e))
    }
}

#[cfg(feature = "uuid")]
impl TryFromValue for uuid::Uuid {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        parse_string(item, field, |s| {
            uuid::Uuid::parse_str(s).map_err(|e| Error::UuidParseError(field.name.clone(), e))
        })
    }
}

impl TryFromValue for String {
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        parse_string(item, field, |s| Ok(s.to_string()))
    }
}

impl<T> TryFromValue for T
where
    T: TryFromStruct,
{
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        let struct_type = match field.r#type.as_ref() {
            None => return Err(Error::StructParseError(field.name.to_string(), "field type must not be none")),
            Some(tp) => tp.struct_type.as_ref(),
        };
        let struct_type = match struct_type {
            None => return Err(Error::StructParseError(field.name.to_string(), "struct type must not be none")),
            Some(struct_type) => struct_type,
        };
        T::try_from_struct(Struct::new(struct_type, item, field)?)
    }
}

impl<T> TryFromValue for Option<T>
where
    T: TryFromValue,
{
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        match as_ref(item, field)? {
            Kind::NullValue(_i) => Ok(None),
            _ => Ok(Some(T::try_from(item, field)?)),
        }
    }
}

impl<T> TryFromValue for Vec<T>
where
    T: TryFromValue,
{
    fn try_from(item: &Value, field: &Field) -> Result<Self, Error> {
        match as_ref(item, field)? {
            Kind::ListValue(s) => {
                // elements are decoded against the element type
                let element = Field {
                    name: field.name.clone(),
                    r#type: field
                        .r#type
                        .as_ref()
                        .and_then(|t| t.array_element_type.as_deref())
                        .cloned(),
                };
                s.values.iter().map(|v| T::try_from(v, &element)).collect()
            }
            v => kind_to_error(v, field),
        }
    }
}

fn index(index: &HashMap<String, usize>, column_name: &str) -> Result<usize, Error> {
    match index.get(column_name) {
        Some(column_index) => Ok(*column_index),
        None => Err(Error::NoColumnFound(column_name.to_string())),
    }
}

fn column<T>(values: &[Value], fields: &[Field], column_index: usize) -> Result<T, Error>
where
    T: TryFromValue,
{
    match (values.get(column_index), fields.get(column_index)) {
        (Some(value), Some(field)) => T::try_from(value, field),
        _ => Err(Error::InvalidColumnIndex(column_index, values.len())),
    }
}

pub fn as_ref<'a>(item: &'a Value, field: &'a Field) -> Result<&'a Kind, Error> {
    match item.kind.as_ref() {
        Some(v) => Ok(v),
        None => Err(Error::NoKind(field.name.to_string())),
    }
}

pub fn kind_to_error<'a, T>(v: &'a value::Kind, field: &'a Field) -> Result<T, Error> {
    let actual = match v {
        Kind::StringValue(_s) => "StringValue".to_string(),
        Kind::BoolValue(_s) => "BoolValue".to_string(),
        Kind::NumberValue(_s) => "NumberValue".to_string(),
        Kind::ListValue(_s) => "ListValue".to_string(),
        Kind::StructValue(_s) => "StructValue".to_string(),
        Kind::NullValue(_s) => "NullValue".to_string(),
    };
    Err(Error::KindMismatch(field.name.to_string(), actual))
}
