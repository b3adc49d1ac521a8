//! Local priority regulation (`p24`) per region, drawn as two heatmaps.

use anyhow::Result;
use arrow::record_batch::RecordBatch;
use plotters::{coord::Shift, prelude::*};
use std::collections::BTreeMap;
use std::fmt::Write;

use super::frame;
use super::output::{gradient, render, segment_label, Chart, ChartOutput};
use crate::schema::REGION_FIELD;

/// `p24` codes in row order, with their labels.
pub const PRIORITY_ROWS: [(i64, &str); 6] = [
    (1, "Přerušovaná žlutá"),
    (2, "Semafor mimo provoz"),
    (3, "Dopravní značky"),
    (4, "Přenosné dopravní značky"),
    (5, "Nevyznačená"),
    (0, "Žádná úprava"),
];

/// Upper end of the logarithmic colour scale for absolute counts.
const LOG_MAX: f64 = 1e5;

#[derive(Debug, Clone, PartialEq)]
pub struct PriorityStat {
    /// Region codes present in the data, sorted.
    pub regions: Vec<String>,
    /// `absolute[row][region]`, rows as in [`PRIORITY_ROWS`].
    pub absolute: Vec<Vec<u64>>,
}

impl PriorityStat {
    pub fn from_batch(batch: &RecordBatch) -> Result<Self> {
        let regions = frame::strings(batch, REGION_FIELD)?;
        let p24 = frame::ints(batch, "p24")?;

        let mut per_region: BTreeMap<String, [u64; 6]> = BTreeMap::new();
        for (region, value) in regions.into_iter().zip(p24) {
            let counts = per_region.entry(region).or_default();
            if let Some(row) = PRIORITY_ROWS.iter().position(|(code, _)| *code == value) {
                counts[row] += 1;
            }
        }

        let absolute = (0..PRIORITY_ROWS.len())
            .map(|row| per_region.values().map(|counts| counts[row]).collect())
            .collect();
        Ok(Self {
            regions: per_region.into_keys().collect(),
            absolute,
        })
    }

    /// Share of each region within a row, in percent. Zero cells are `None`.
    pub fn relative(&self) -> Vec<Vec<Option<f64>>> {
        self.absolute
            .iter()
            .map(|row| {
                let total: u64 = row.iter().sum();
                row.iter()
                    .map(|&n| (n > 0).then(|| n as f64 / total as f64 * 100.0))
                    .collect()
            })
            .collect()
    }

    fn absolute_cells(&self) -> Vec<Vec<Option<f64>>> {
        self.absolute
            .iter()
            .map(|row| row.iter().map(|&n| (n > 0).then_some(n as f64)).collect())
            .collect()
    }
}

impl Chart for PriorityStat {
    fn size(&self) -> (u32, u32) {
        (1169, 827)
    }

    fn summary(&self) -> String {
        let mut out = String::new();
        let header: String = self.regions.iter().map(|r| format!("{r:>8}")).collect();
        let _ = writeln!(out, "Absolutně\n{:<26}{header}", "");
        for ((_, label), row) in PRIORITY_ROWS.iter().zip(&self.absolute) {
            let cells: String = row.iter().map(|n| format!("{n:>8}")).collect();
            let _ = writeln!(out, "{label:<26}{cells}");
        }
        let _ = writeln!(out, "\nRelativně vůči příčině [%]\n{:<26}{header}", "");
        for ((_, label), row) in PRIORITY_ROWS.iter().zip(self.relative()) {
            let cells: String = row
                .iter()
                .map(|v| match v {
                    Some(v) => format!("{v:>8.1}"),
                    None => format!("{:>8}", "-"),
                })
                .collect();
            let _ = writeln!(out, "{label:<26}{cells}");
        }
        out
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let panels = root.split_evenly((2, 1));
        let log_max = LOG_MAX.ln();
        draw_heatmap(&panels[0], "Absolutně", &self.regions, &self.absolute_cells(), |v| {
            gradient(v.max(1.0).ln() / log_max)
        })?;
        draw_heatmap(
            &panels[1],
            "Relativně vůči příčině",
            &self.regions,
            &self.relative(),
            |v| gradient(v / 100.0),
        )?;
        Ok(())
    }
}

fn draw_heatmap<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    regions: &[String],
    cells: &[Vec<Option<f64>>],
    color: impl Fn(f64) -> RGBColor,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let cols = regions.len().max(1) as i32;
    let rows = cells.len() as i32;
    let labels: Vec<String> = PRIORITY_ROWS
        .iter()
        .rev()
        .map(|(_, l)| l.to_string())
        .collect();

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(170)
        .build_cartesian_2d((0..cols).into_segmented(), (0..rows).into_segmented())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(cols as usize)
        .y_labels(rows as usize)
        .x_label_formatter(&|v| segment_label(v, regions))
        .y_label_formatter(&|v| segment_label(v, &labels))
        .draw()?;

    let cell = |row: usize, col: usize, value: f64| {
        // first row at the top
        let y = rows - 1 - row as i32;
        let x = col as i32;
        Rectangle::new(
            [
                (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
            ],
            color(value).filled(),
        )
    };
    chart.draw_series(cells.iter().enumerate().flat_map(|(row, values)| {
        values
            .iter()
            .enumerate()
            .filter_map(move |(col, v)| v.map(|v| cell(row, col, v)))
    }))?;
    Ok(())
}

/// Aggregate `p24` per region and hand the heatmaps to `out`.
#[tracing::instrument(level = "info", skip_all)]
pub fn plot_stat(batch: &RecordBatch, out: &ChartOutput) -> Result<()> {
    if out.is_noop() {
        return Ok(());
    }
    let stat = PriorityStat::from_batch(batch)?;
    render(&stat, out)
}
