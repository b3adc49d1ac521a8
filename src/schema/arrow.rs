// src/schema/arrow.rs

use arrow::datatypes::{DataType, Field as ArrowField, Schema as ArrowSchema, SchemaRef};
use once_cell::sync::Lazy;
use std::sync::Arc;

use super::fields::{COLUMNS, REGION_FIELD};
use super::types::{Column, FieldType};

/// Map a declared field type onto its Arrow storage type.
///
/// - Str(_)  → Utf8
/// - Int8..  → Int8 / Int16 / Int32 / Int64
/// - Date    → Date32 (null is the "not a time" sentinel)
/// - Float64 → Float64 (NaN is the missing sentinel)
pub fn map_to_arrow_type(ty: FieldType) -> DataType {
    match ty {
        FieldType::Str(_) => DataType::Utf8,
        FieldType::Int8 => DataType::Int8,
        FieldType::Int16 => DataType::Int16,
        FieldType::Int32 => DataType::Int32,
        FieldType::Int64 => DataType::Int64,
        FieldType::Date => DataType::Date32,
        FieldType::Float64 => DataType::Float64,
    }
}

/// Build an ArrowSchema (inside an Arc) from a slice of `Column`s.
pub fn build_arrow_schema(cols: &[Column]) -> SchemaRef {
    let fields: Vec<ArrowField> = cols
        .iter()
        .map(|col| ArrowField::new(col.name, map_to_arrow_type(col.ty), /* nullable = */ true))
        .collect();

    Arc::new(ArrowSchema::new(fields))
}

static CSV_SCHEMA: Lazy<SchemaRef> = Lazy::new(|| build_arrow_schema(&COLUMNS));

static REGION_SCHEMA: Lazy<SchemaRef> = Lazy::new(|| {
    let mut fields: Vec<ArrowField> = CSV_SCHEMA
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    fields.push(ArrowField::new(REGION_FIELD, DataType::Utf8, true));
    Arc::new(ArrowSchema::new(fields))
});

/// Schema of one regional CSV file, without the `region` column.
pub fn csv_schema() -> SchemaRef {
    Arc::clone(&CSV_SCHEMA)
}

/// Schema of a parsed region (and of any concatenation of regions):
/// every CSV column followed by the synthetic `region` column.
pub fn region_schema() -> SchemaRef {
    Arc::clone(&REGION_SCHEMA)
}
