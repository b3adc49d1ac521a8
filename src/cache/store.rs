use anyhow::{Context, Result};
use arrow::{compute::concat_batches, record_batch::RecordBatch};
use parquet::{
    arrow::{arrow_reader::ParquetRecordBatchReaderBuilder, ArrowWriter},
    basic::{Compression, GzipLevel},
    file::properties::WriterProperties,
};
use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::config::Config;
use crate::schema::{region_schema, Region};

/// On-disk cache of parsed regions: one GZIP-compressed Parquet file per
/// region, named by substituting the region code into a template. A file's
/// existence means the region has been parsed before.
#[derive(Debug, Clone)]
pub struct RegionStore {
    folder: PathBuf,
    template: String,
}

impl RegionStore {
    pub fn new(folder: impl Into<PathBuf>, template: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            template: template.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.folder, &config.cache_filename)
    }

    pub fn path(&self, region: Region) -> PathBuf {
        self.folder
            .join(self.template.replace("{}", region.code()))
    }

    pub fn contains(&self, region: Region) -> bool {
        self.path(region).is_file()
    }

    /// `Ok(None)` when there is no cache file; a file that cannot be read
    /// back into the region schema is an error.
    pub fn load(&self, region: Region) -> Result<Option<RecordBatch>> {
        let path = self.path(region);
        if !path.is_file() {
            return Ok(None);
        }
        let batch = read_batch(&path)?;
        let batch = RecordBatch::try_new(region_schema(), batch.columns().to_vec())
            .with_context(|| format!("cache file `{}` does not match the region schema", path.display()))?;
        debug!(region = %region, rows = batch.num_rows(), "loaded cached region");
        Ok(Some(batch))
    }

    pub fn save(&self, region: Region, batch: &RecordBatch) -> Result<PathBuf> {
        fs::create_dir_all(&self.folder)
            .with_context(|| format!("creating cache directory {:?}", &self.folder))?;
        let path = self.path(region);
        write_batch(batch, &path)?;
        debug!(region = %region, path = %path.display(), "cached region");
        Ok(path)
    }
}

/// Write `batch` as one Parquet file. The data goes to `<path>.tmp` first and
/// is renamed into place once the writer is closed.
pub fn write_batch(batch: &RecordBatch, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {:?}", parent))?;
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let props = WriterProperties::builder()
        .set_compression(Compression::GZIP(GzipLevel::try_new(1)?))
        .build();

    let tmp_file = File::create(&tmp_path)
        .with_context(|| format!("could not create temporary file `{}`", tmp_path.display()))?;
    let mut writer = ArrowWriter::try_new(BufWriter::new(tmp_file), batch.schema(), Some(props))
        .context("creating ArrowWriter")?;
    writer.write(batch).context("writing batch to Parquet")?;
    writer.close().context("closing ArrowWriter")?;

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "failed to rename `{}` to `{}`",
            tmp_path.display(),
            path.display()
        )
    })?;
    Ok(())
}

/// Read a whole Parquet file back into a single batch.
pub fn read_batch(path: &Path) -> Result<RecordBatch> {
    let file = File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).with_context(|| {
        format!(
            "failed to create RecordBatchReaderBuilder for `{}`",
            path.display()
        )
    })?;
    let schema = builder.schema().clone();
    let reader = builder
        .with_batch_size(64 * 1024)
        .build()
        .with_context(|| format!("failed to build RecordBatchReader for `{}`", path.display()))?;

    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("error reading RecordBatch from `{}`", path.display()))?;
    concat_batches(&schema, &batches).context("joining Parquet row groups")
}
