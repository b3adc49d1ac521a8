// src/process/mod.rs
use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, StringArray},
    compute::concat_batches,
    record_batch::RecordBatch,
};
use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1250;
use glob::{glob, Pattern};
use rayon::prelude::*;
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info, warn};
use zip::{result::ZipError, ZipArchive};

use crate::error::DownloadError;
use crate::schema::{csv_schema, region_schema, Region, COLUMNS, ID_FIELD};

pub mod convert;
pub mod date_parser;
pub mod dedup;
pub mod utils;

use convert::ColumnBuilder;
use dedup::dedup_first;

/// Every `*.zip` directly inside `folder`, in lexical file-name order.
/// That order decides which archive contributes rows first.
pub fn list_archives(folder: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.zip", Pattern::escape(&folder.to_string_lossy()));
    let mut archives = Vec::new();
    for entry in glob(&pattern).context("invalid glob pattern for archive listing")? {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "cannot read archive entry");
                continue;
            }
        };
        if path.is_file() {
            archives.push(path);
        }
    }
    archives.sort();
    Ok(archives)
}

/// Parse one region's CSV text (already decoded) into typed columns.
/// No header row: fields are named by position. Short records read the
/// missing trailing fields as empty, surplus fields are ignored.
pub fn parse_csv(text: &str, source: &str) -> Result<RecordBatch> {
    let mut builders: Vec<ColumnBuilder> =
        COLUMNS.iter().map(|c| ColumnBuilder::new(c.ty)).collect();

    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    for (idx, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("CSV parse error in {} at record {}", source, idx))?;
        for (i, builder) in builders.iter_mut().enumerate() {
            builder.append(record.get(i).unwrap_or(""));
        }
    }

    let columns: Vec<ArrayRef> = builders.into_iter().map(ColumnBuilder::finish).collect();
    RecordBatch::try_new(csv_schema(), columns)
        .with_context(|| format!("assembling columns of {}", source))
}

/// Read the region's member out of one archive, decode it from Windows-1250,
/// parse it and drop duplicate accident ids (first occurrence wins).
#[tracing::instrument(level = "debug", skip(zip_path), fields(path = %zip_path.display()))]
pub fn parse_archive(zip_path: &Path, region: Region) -> Result<RecordBatch> {
    let file = File::open(zip_path)
        .with_context(|| format!("Failed to open ZIP file: {:?}", zip_path))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Failed to read ZIP archive: {:?}", zip_path))?;

    let member = region.csv_member();
    let mut entry = match archive.by_name(&member) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(DownloadError::MissingMember {
                archive: zip_path.display().to_string(),
                member,
            }
            .into())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to access {} in {:?}", member, zip_path))
        }
    };

    let mut buf = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut buf)
        .with_context(|| format!("Failed to read {} into memory", member))?;

    let (text, _, had_errors) = WINDOWS_1250.decode(&buf);
    if had_errors {
        warn!(member = %member, "malformed windows-1250 bytes replaced");
    }

    let source = format!("{}:{}", zip_path.display(), member);
    let parsed = parse_csv(&text, &source)?;
    let deduped = dedup_first(&parsed, ID_FIELD)?;
    debug!(
        rows = deduped.num_rows(),
        dropped = parsed.num_rows() - deduped.num_rows(),
        "parsed member"
    );
    Ok(deduped)
}

/// Parse `region` out of every archive and stack the results in archive
/// order, then tag each row with the region code. Duplicates are only
/// removed within one archive, never across archives.
#[tracing::instrument(level = "info", skip_all, fields(region = %region, archives = archives.len()))]
pub fn parse_region(archives: &[PathBuf], region: Region) -> Result<RecordBatch> {
    let parts = archives
        .par_iter()
        .map(|path| parse_archive(path, region))
        .collect::<Result<Vec<_>>>()?;

    let merged = concat_batches(&csv_schema(), &parts).context("stacking archive columns")?;
    let tagged = with_region_column(&merged, region)?;
    info!(rows = tagged.num_rows(), "region parsed");
    Ok(tagged)
}

/// Append the synthetic `region` column, one code per row.
pub fn with_region_column(batch: &RecordBatch, region: Region) -> Result<RecordBatch> {
    let mut columns = batch.columns().to_vec();
    let codes = StringArray::from(vec![region.code(); batch.num_rows()]);
    columns.push(Arc::new(codes) as ArrayRef);
    RecordBatch::try_new(region_schema(), columns).context("adding region column")
}
