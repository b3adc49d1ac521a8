//! Column access for chart code. Every reader goes through an arrow cast, so
//! the same chart works on a raw region batch and on a dictionary-encoded
//! frame from [`super::analysis::get_dataframe`].

use anyhow::{anyhow, Context, Result};
use arrow::{
    array::{ArrayRef, AsArray, BooleanArray},
    compute::{cast, filter_record_batch},
    datatypes::{DataType, Date32Type, Float64Type, Int64Type},
    record_batch::RecordBatch,
};
use chrono::{Datelike, NaiveDate};

use crate::process::convert::MISSING_INT;
use crate::process::date_parser::date_from_days;

/// Name of the derived date column.
pub const DATE_FIELD: &str = "date";

pub fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| anyhow!("column `{}` not in frame", name))
}

fn cast_column(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    cast(column(batch, name)?, to).with_context(|| format!("reading `{}` as {}", name, to))
}

/// Integer view of a column. Nulls read as the missing-value sentinel.
pub fn ints(batch: &RecordBatch, name: &str) -> Result<Vec<i64>> {
    let arr = cast_column(batch, name, &DataType::Int64)?;
    Ok(arr
        .as_primitive::<Int64Type>()
        .iter()
        .map(|v| v.unwrap_or(MISSING_INT.into()))
        .collect())
}

pub fn floats(batch: &RecordBatch, name: &str) -> Result<Vec<f64>> {
    let arr = cast_column(batch, name, &DataType::Float64)?;
    Ok(arr
        .as_primitive::<Float64Type>()
        .iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

pub fn strings(batch: &RecordBatch, name: &str) -> Result<Vec<String>> {
    let arr = cast_column(batch, name, &DataType::Utf8)?;
    Ok(arr
        .as_string::<i32>()
        .iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

/// Accident dates, from the derived `date` column when present, `p2a`
/// otherwise. `None` is "not a time".
pub fn dates(batch: &RecordBatch) -> Result<Vec<Option<NaiveDate>>> {
    let name = if batch.column_by_name(DATE_FIELD).is_some() {
        DATE_FIELD
    } else {
        "p2a"
    };
    let arr = cast_column(batch, name, &DataType::Date32)?;
    Ok(arr
        .as_primitive::<Date32Type>()
        .iter()
        .map(|v| v.and_then(date_from_days))
        .collect())
}

pub fn filter_rows(batch: &RecordBatch, keep: &[bool]) -> Result<RecordBatch> {
    let mask = BooleanArray::from(keep.to_vec());
    filter_record_batch(batch, &mask).context("filtering frame rows")
}

/// Months counted from year 0, so consecutive months differ by one.
pub fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

pub fn month_label(index: i32) -> String {
    format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
}
