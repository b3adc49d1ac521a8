use accidents::{
    cache::write_batch,
    config::Config,
    schema::{describe::columns_info, Region},
    DataDownloader,
};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Download, parse and cache Czech traffic-accident records.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// YAML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Working folder for archives and cache files.
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Listing page with the archives.
    #[arg(long)]
    url: Option<String>,

    /// Region codes to load.
    #[arg(long, num_args = 1.., value_delimiter = ',', default_values = ["PAK", "LBK", "KVK"])]
    regions: Vec<String>,

    /// Load every region instead of `--regions`.
    #[arg(long)]
    all: bool,

    /// Write the combined dataset to this Parquet file.
    #[arg(long)]
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) configure ────────────────────────────────────────────────
    let args = Args::parse();
    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(folder) = args.folder {
        config.folder = folder;
    }
    if let Some(url) = args.url {
        config.url = url;
    }
    info!(folder = %config.folder.display(), url = %config.url, "startup");

    // ─── 3) assemble ─────────────────────────────────────────────────
    let start = Instant::now();
    let mut downloader = DataDownloader::new(config)?;
    let codes: Vec<&str> = args.regions.iter().map(String::as_str).collect();
    let requested = if args.all { None } else { Some(codes.as_slice()) };
    let data = downloader.get_dict(requested).await?;
    info!(rows = data.num_rows(), elapsed = ?start.elapsed(), "dataset ready");

    if let Some(path) = &args.export {
        write_batch(&data, path)?;
        info!(path = %path.display(), "dataset exported");
    }

    // ─── 4) report ───────────────────────────────────────────────────
    let regions: Vec<Region> = match requested {
        Some(codes) => Region::parse_list(codes)?,
        None => Region::ALL.to_vec(),
    };
    print!("{}", columns_info());
    println!("Základní informace o vybraných regionech ->");
    println!("Počet záznamů = {}", data.num_rows());
    println!(
        "Regiony = {}",
        regions.iter().map(Region::code).collect::<Vec<_>>().join(", ")
    );
    for region in regions {
        println!("{} -> {}", region.code(), region.name());
    }
    Ok(())
}
