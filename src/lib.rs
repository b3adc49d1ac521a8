pub mod cache;
pub mod config;
pub mod downloader;
pub mod error;
pub mod fetch;
pub mod process;
pub mod report;
pub mod schema;

#[cfg(test)]
mod fixtures;

pub use downloader::DataDownloader;
pub use error::DownloadError;
