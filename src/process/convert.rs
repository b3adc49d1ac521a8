use arrow::array::{
    ArrayRef, Date32Builder, Float64Builder, Int16Builder, Int32Builder, Int64Builder,
    Int8Builder, StringBuilder,
};
use std::{str::FromStr, sync::Arc};

use crate::process::{date_parser, utils};
use crate::schema::FieldType;

/// Stored in integer columns when the source field is empty or unusable.
pub const MISSING_INT: i8 = -1;

/// One coerced cell. Only used at the edges (tests, inspection); bulk parsing
/// goes straight into typed [`ColumnBuilder`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    /// Days since the epoch; `None` is "not a time".
    Date(Option<i32>),
    /// `NaN` marks a missing value.
    Float(f64),
}

/// Turn raw CSV text into a value of the declared type. Total: every input
/// maps to a value, bad input maps to the type's sentinel.
pub fn coerce(raw: &str, ty: FieldType) -> Value {
    match ty {
        FieldType::Str(width) => Value::Str(coerce_str(raw, width).to_string()),
        FieldType::Int8 => Value::Int(coerce_int::<i8>(raw).into()),
        FieldType::Int16 => Value::Int(coerce_int::<i16>(raw).into()),
        FieldType::Int32 => Value::Int(coerce_int::<i32>(raw).into()),
        FieldType::Int64 => Value::Int(coerce_int::<i64>(raw)),
        FieldType::Date => Value::Date(coerce_date(raw)),
        FieldType::Float64 => Value::Float(coerce_float(raw)),
    }
}

/// Strings are kept as-is (empty is a valid value), cut to the declared width.
pub fn coerce_str(raw: &str, width: usize) -> &str {
    utils::truncate_chars(raw, width)
}

/// Out-of-range values count as malformed for the narrow types.
pub fn coerce_int<T>(raw: &str) -> T
where
    T: FromStr + From<i8>,
{
    utils::clean_str(raw)
        .parse()
        .unwrap_or_else(|_| T::from(MISSING_INT))
}

pub fn coerce_float(raw: &str) -> f64 {
    utils::normalize_decimal(raw).parse().unwrap_or(f64::NAN)
}

pub fn coerce_date(raw: &str) -> Option<i32> {
    date_parser::parse_date_days(utils::clean_str(raw))
}

/// Arrow builder for one declared column.
pub enum ColumnBuilder {
    Str(StringBuilder, usize),
    Int8(Int8Builder),
    Int16(Int16Builder),
    Int32(Int32Builder),
    Int64(Int64Builder),
    Date(Date32Builder),
    Float64(Float64Builder),
}

impl ColumnBuilder {
    pub fn new(ty: FieldType) -> Self {
        match ty {
            FieldType::Str(width) => ColumnBuilder::Str(StringBuilder::new(), width),
            FieldType::Int8 => ColumnBuilder::Int8(Int8Builder::new()),
            FieldType::Int16 => ColumnBuilder::Int16(Int16Builder::new()),
            FieldType::Int32 => ColumnBuilder::Int32(Int32Builder::new()),
            FieldType::Int64 => ColumnBuilder::Int64(Int64Builder::new()),
            FieldType::Date => ColumnBuilder::Date(Date32Builder::new()),
            FieldType::Float64 => ColumnBuilder::Float64(Float64Builder::new()),
        }
    }

    pub fn append(&mut self, raw: &str) {
        match self {
            ColumnBuilder::Str(b, width) => b.append_value(coerce_str(raw, *width)),
            ColumnBuilder::Int8(b) => b.append_value(coerce_int(raw)),
            ColumnBuilder::Int16(b) => b.append_value(coerce_int(raw)),
            ColumnBuilder::Int32(b) => b.append_value(coerce_int(raw)),
            ColumnBuilder::Int64(b) => b.append_value(coerce_int(raw)),
            ColumnBuilder::Date(b) => b.append_option(coerce_date(raw)),
            ColumnBuilder::Float64(b) => b.append_value(coerce_float(raw)),
        }
    }

    pub fn finish(self) -> ArrayRef {
        match self {
            ColumnBuilder::Str(mut b, _) => Arc::new(b.finish()),
            ColumnBuilder::Int8(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Int16(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Int32(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Int64(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Date(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Float64(mut b) => Arc::new(b.finish()),
        }
    }
}
