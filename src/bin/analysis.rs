use accidents::report::{
    analysis::{get_dataframe, plot_animals, plot_conditions, plot_roadtype},
    ChartOutput,
};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(version, about = "Road type, animal and weather charts for four regions")]
struct Args {
    /// Dataset written by `accidents --all --export`.
    #[arg(long, default_value = "data/accidents.parquet")]
    dataset: PathBuf,
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,
    #[arg(long)]
    show_figure: bool,
    /// Print memory use before and after encoding.
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let df = get_dataframe(&args.dataset, args.verbose)?;
    info!(rows = df.num_rows(), columns = df.num_columns(), "frame loaded");

    let out = |name: &str| ChartOutput::new(Some(args.out_dir.join(name)), args.show_figure);
    plot_roadtype(&df, &out("01_road.png"))?;
    plot_animals(&df, &out("02_animals.png"))?;
    plot_conditions(&df, &out("03_conditions.png"))?;
    Ok(())
}
