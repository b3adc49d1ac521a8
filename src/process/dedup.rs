use anyhow::{anyhow, Context, Result};
use arrow::{
    array::{Array, AsArray, BooleanArray},
    compute::filter_record_batch,
    record_batch::RecordBatch,
};
use std::collections::HashSet;

/// Keep only the first row for every value of the string column `key`,
/// preserving row order. Later duplicates are dropped from every column.
pub fn dedup_first(batch: &RecordBatch, key: &str) -> Result<RecordBatch> {
    let idx = batch
        .schema()
        .index_of(key)
        .with_context(|| format!("dedup key {key} not in batch"))?;
    let keys = batch
        .column(idx)
        .as_string_opt::<i32>()
        .ok_or_else(|| anyhow!("dedup key {key} is not a Utf8 column"))?;

    let mut seen = HashSet::with_capacity(keys.len());
    let keep: BooleanArray = keys.iter().map(|k| Some(seen.insert(k))).collect();

    if keep.true_count() == batch.num_rows() {
        return Ok(batch.clone());
    }
    filter_record_batch(batch, &keep).context("dropping duplicate rows")
}
