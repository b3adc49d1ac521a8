// src/downloader.rs
use anyhow::{Context, Result};
use arrow::{compute::concat_batches, record_batch::RecordBatch};
use reqwest::Client;
use std::{collections::HashMap, path::PathBuf};
use tracing::{debug, error, info};

use crate::cache::RegionStore;
use crate::config::Config;
use crate::fetch;
use crate::process;
use crate::schema::{region_schema, Region};

/// One download session: owns the HTTP client, the on-disk region cache and
/// an in-memory memo of every region it has produced so far.
///
/// Regions are resolved memo first, then the cache file, then by parsing
/// the local archives (fetching them when the folder has none). Only the
/// parse path writes the cache.
pub struct DataDownloader {
    config: Config,
    client: Client,
    store: RegionStore,
    memo: HashMap<Region, RecordBatch>,
}

impl DataDownloader {
    pub fn new(config: Config) -> Result<Self> {
        let client = fetch::build_client(&config)?;
        let store = RegionStore::from_config(&config);
        Ok(Self {
            config,
            client,
            store,
            memo: HashMap::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &RegionStore {
        &self.store
    }

    /// Fetch the archive selection into the working folder.
    pub async fn download_data(&self) -> Result<Vec<PathBuf>> {
        fetch::download_archives(&self.client, &self.config).await
    }

    /// Parse one region from the local archives, downloading them first if the
    /// working folder holds none. Does not touch the memo or the cache.
    pub async fn parse_region_data(&self, code: &str) -> Result<RecordBatch> {
        let region: Region = code.parse().map_err(|e| {
            error!(code, "rejected region code");
            e
        })?;
        self.parse_region(region).await
    }

    async fn parse_region(&self, region: Region) -> Result<RecordBatch> {
        let mut archives = process::list_archives(&self.config.folder)?;
        if archives.is_empty() {
            info!(folder = %self.config.folder.display(), "no local archives, fetching");
            self.download_data().await?;
            archives = process::list_archives(&self.config.folder)?;
        }

        tokio::task::spawn_blocking(move || process::parse_region(&archives, region))
            .await
            .context("parse task panicked")?
    }

    /// Combined dataset for `regions` (all regions when `None`), in request
    /// order. Every code is validated before anything is loaded.
    #[tracing::instrument(level = "info", skip(self))]
    pub async fn get_dict(&mut self, regions: Option<&[&str]>) -> Result<RecordBatch> {
        let requested = match regions {
            Some(codes) => Region::parse_list(codes).map_err(|e| {
                error!(error = %e, "rejected region list");
                e
            })?,
            None => Region::ALL.to_vec(),
        };

        let mut parts = Vec::with_capacity(requested.len());
        for region in requested {
            parts.push(self.region_data(region).await?);
        }

        let combined = concat_batches(&region_schema(), &parts).context("combining regions")?;
        info!(rows = combined.num_rows(), "dataset assembled");
        Ok(combined)
    }

    async fn region_data(&mut self, region: Region) -> Result<RecordBatch> {
        if let Some(batch) = self.memo.get(&region) {
            debug!(region = %region, "memo hit");
            return Ok(batch.clone());
        }

        let batch = match self.store.load(region)? {
            Some(batch) => batch,
            None => {
                let batch = self.parse_region(region).await?;
                self.store.save(region, &batch)?;
                batch
            }
        };
        self.memo.insert(region, batch.clone());
        Ok(batch)
    }
}
