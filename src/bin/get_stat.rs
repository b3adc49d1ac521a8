use accidents::{config::Config, report::stat::plot_stat, report::ChartOutput, DataDownloader};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(version, about = "Heatmap of local priority regulation (p24) per region")]
struct Args {
    /// Save the figure here (`.svg` or bitmap by extension).
    #[arg(long)]
    fig_location: Option<PathBuf>,
    /// Print the aggregated table.
    #[arg(long)]
    show_figure: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let out = ChartOutput::new(args.fig_location, args.show_figure);
    if out.is_noop() {
        info!("neither --fig-location nor --show-figure given; nothing to do");
        return Ok(());
    }

    let config = Config::load_or_default(args.config.as_deref())?;
    let data = DataDownloader::new(config)?.get_dict(None).await?;
    plot_stat(&data, &out)
}
