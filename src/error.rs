use thiserror::Error;

/// Domain errors raised by the downloader. Everything else travels as
/// `anyhow::Error` with context attached.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DownloadError {
    #[error("{0} is not a valid region code")]
    InvalidRegion(String),

    #[error("region list contains invalid codes: {}", .0.join(", "))]
    InvalidRegions(Vec<String>),

    #[error("no archive links found on {0}")]
    NoArchives(String),

    #[error("archive {archive} has no member {member}")]
    MissingMember { archive: String, member: String },
}
