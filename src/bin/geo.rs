use accidents::{
    cache::read_batch,
    report::{
        geo::{make_geo, plot_cluster, plot_geo},
        ChartOutput,
    },
};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(version, about = "Accident maps for the South Moravian region")]
struct Args {
    #[arg(long, default_value = "data/accidents.parquet")]
    dataset: PathBuf,
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    #[arg(long)]
    show_figure: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let gdf = make_geo(&read_batch(&args.dataset)?)?;
    info!(points = gdf.len(), crs = gdf.crs(), "geo frame ready");

    plot_geo(
        &gdf,
        &ChartOutput::new(Some(args.out_dir.join("geo1.png")), args.show_figure),
    )?;
    plot_cluster(
        &gdf,
        &ChartOutput::new(Some(args.out_dir.join("geo2.png")), args.show_figure),
    )?;
    Ok(())
}
