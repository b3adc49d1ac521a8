// src/fetch/mod.rs
use anyhow::{Context, Result};
use reqwest::Client;
use std::path::PathBuf;
use tokio::time::Instant;
use tracing::info;
use url::Url;

use crate::config::Config;
use crate::error::DownloadError;

pub mod urls;
pub mod zips;

/// HTTP client carrying the configured User-Agent; the listing page
/// refuses obvious bots.
pub fn build_client(config: &Config) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
        .context("building HTTP client")
}

/// Scrape the listing page, pick the archives worth having and save them
/// into the working folder. Any network or page failure aborts the whole
/// fetch; nothing is retried.
#[tracing::instrument(level = "info", skip_all, fields(url = %config.url))]
pub async fn download_archives(client: &Client, config: &Config) -> Result<Vec<PathBuf>> {
    let base = Url::parse(&config.url).with_context(|| format!("parsing URL {}", config.url))?;
    let links = urls::fetch_archive_links(client, &base).await?;
    if links.is_empty() {
        return Err(DownloadError::NoArchives(config.url.clone()).into());
    }

    let selected = urls::select_archives(&links);
    info!(listed = links.len(), selected = selected.len(), "archives to download");

    let mut saved = Vec::with_capacity(selected.len());
    for url in &selected {
        let start = Instant::now();
        let path = zips::download_zip(client, url, &config.folder).await?;
        info!(path = %path.display(), elapsed = ?start.elapsed(), "downloaded");
        saved.push(path);
    }
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{csv_line, serve, zip_bytes};
    use tempfile::tempdir;

    /// Talks to the local fixture server directly, whatever proxy the
    /// environment configures.
    fn local_client(config: &Config) -> Client {
        Client::builder()
            .user_agent(config.user_agent.as_str())
            .no_proxy()
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn downloads_selected_archives() -> Result<()> {
        let page = r#"<button class="btn btn-sm btn-primary" onclick="download('data/datagis-01-2019.zip')">01</button>
            <button class="btn btn-sm btn-primary" onclick="download('data/datagis2019.zip')">ZIP</button>
            <button class="btn btn-sm btn-primary" onclick="download('data/datagis-02-2020.zip')">02</button>"#;
        let archive = zip_bytes(&[("00.csv", vec![csv_line(&[("p1", "1")])])]);
        let base = serve(vec![
            ("/izv/".to_string(), page.as_bytes().to_vec()),
            ("/izv/data/datagis2019.zip".to_string(), archive.clone()),
            ("/izv/data/datagis-02-2020.zip".to_string(), archive.clone()),
        ])
        .await?;

        let dir = tempdir()?;
        let config = Config {
            url: format!("{base}/izv/"),
            folder: dir.path().join("data"),
            ..Config::default()
        };
        let client = local_client(&config);
        let saved = download_archives(&client, &config).await?;

        assert_eq!(saved.len(), 2);
        assert!(saved[0].ends_with("data/datagis2019.zip"));
        assert_eq!(std::fs::read(&saved[1])?, archive);
        assert!(!dir.path().join("data/datagis-01-2019.zip").exists());
        Ok(())
    }

    #[tokio::test]
    async fn empty_page_is_an_error() -> Result<()> {
        let base = serve(vec![("/".to_string(), b"<html></html>".to_vec())]).await?;
        let dir = tempdir()?;
        let config = Config {
            url: format!("{base}/"),
            folder: dir.path().to_path_buf(),
            ..Config::default()
        };
        let err = download_archives(&local_client(&config), &config)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DownloadError>(),
            Some(DownloadError::NoArchives(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn http_errors_propagate() -> Result<()> {
        let base = serve(vec![]).await?;
        let dir = tempdir()?;
        let config = Config {
            url: format!("{base}/missing/"),
            folder: dir.path().to_path_buf(),
            ..Config::default()
        };
        assert!(download_archives(&local_client(&config), &config).await.is_err());
        Ok(())
    }
}
