//! Dataset loading with dictionary-encoded columns, plus the road type,
//! animal and weather charts for four focus regions.

use anyhow::{anyhow, Context, Result};
use arrow::{
    array::ArrayRef,
    compute::{can_cast_types, cast},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use chrono::{Datelike, NaiveDate};
use plotters::{coord::Shift, prelude::*, style::full_palette};
use std::{collections::BTreeMap, fmt::Write, path::Path, sync::Arc};
use tracing::debug;

use super::frame::{self, month_index, month_label, DATE_FIELD};
use super::output::{render, segment_label, series_color, Chart, ChartOutput};
use crate::cache::read_batch;
use crate::schema::REGION_FIELD;

/// Columns left as they are by [`categorize`].
pub const UNENCODED: [&str; 16] = [
    "date", "region", "p2a", "p13a", "p13b", "p13c", "p53", "p14", "a", "b", "d", "f", "g", "j",
    "r", "s",
];

pub const FOCUS_REGIONS: [&str; 4] = ["HKK", "JHC", "JHM", "KVK"];

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Year left out of the monthly charts (incomplete at export time).
const PARTIAL_YEAR: i32 = 2021;

/// Load a dataset file written by the main binary, add the `date` column
/// and dictionary-encode the categorical columns.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn get_dataframe(path: impl AsRef<Path>, verbose: bool) -> Result<RecordBatch> {
    let raw = read_batch(path.as_ref())?;
    let orig_size = size_mb(&raw);
    let frame = categorize(&raw)?;
    if verbose {
        println!("orig_size={:.1} MB\nnew_size={:.1} MB", orig_size, size_mb(&frame));
    }
    Ok(frame)
}

/// In-memory size of every column buffer, in MB.
pub fn size_mb(batch: &RecordBatch) -> f64 {
    batch.get_array_memory_size() as f64 / BYTES_PER_MB
}

/// Integer and string columns outside [`UNENCODED`] become dictionary
/// ("category") columns with the narrowest key type that fits. A `date`
/// column derived from `p2a` is appended unless already present.
pub fn categorize(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields = Vec::with_capacity(schema.fields().len() + 1);
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len() + 1);

    for (field, array) in schema.fields().iter().zip(batch.columns()) {
        if UNENCODED.contains(&field.name().as_str()) || !is_categorical(field.data_type()) {
            fields.push(field.as_ref().clone());
            columns.push(array.clone());
            continue;
        }
        let encoded = dictionary_encode(array)
            .with_context(|| format!("encoding column `{}`", field.name()))?;
        fields.push(Field::new(field.name(), encoded.data_type().clone(), true));
        columns.push(encoded);
    }

    if schema.column_with_name(DATE_FIELD).is_none() {
        let date = cast(frame::column(batch, "p2a")?, &DataType::Date32)
            .context("deriving date column")?;
        fields.push(Field::new(DATE_FIELD, DataType::Date32, true));
        columns.push(date);
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).context("assembling frame")
}

fn is_categorical(ty: &DataType) -> bool {
    (ty.is_integer() || *ty == DataType::Utf8)
        && can_cast_types(ty, &DataType::Dictionary(Box::new(DataType::Int8), Box::new(ty.clone())))
}

fn dictionary_encode(array: &ArrayRef) -> Result<ArrayRef> {
    let value_type = array.data_type().clone();
    let mut last_err = None;
    for key in [DataType::Int8, DataType::Int16, DataType::Int32] {
        let target = DataType::Dictionary(Box::new(key), Box::new(value_type.clone()));
        match cast(array, &target) {
            Ok(encoded) => return Ok(encoded),
            // too many distinct values for this key width
            Err(e) => last_err = Some(e),
        }
    }
    Err(anyhow!(
        "no dictionary key type fits: {}",
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Rows belonging to one of the focus regions, as `(focus index, row)`.
fn focus_rows(batch: &RecordBatch) -> Result<Vec<(usize, usize)>> {
    Ok(frame::strings(batch, REGION_FIELD)?
        .iter()
        .enumerate()
        .filter_map(|(row, code)| {
            FOCUS_REGIONS
                .iter()
                .position(|r| *r == code.as_str())
                .map(|region| (region, row))
        })
        .collect())
}

fn focus_labels() -> Vec<String> {
    FOCUS_REGIONS.iter().map(|r| r.to_string()).collect()
}

fn axis_max(max: u64) -> u64 {
    (max + max / 10).max(1)
}

// ─── road types ────────────────────────────────────────────────────────────

/// `p21` panels: title and the codes counted in it.
pub const ROAD_PANELS: [(&str, &[i64]); 6] = [
    ("Dvoupruhová komunikace", &[1]),
    ("Třípruhová komunikace", &[2]),
    ("Čtyřpruhová komunikace", &[3, 4]),
    ("Vícepruhová komunikace", &[5]),
    ("Rychlostní komunikace", &[6]),
    ("Jiná komunikace", &[0]),
];

const REGION_COLORS: [RGBColor; 4] = [BLUE, full_palette::ORANGE, GREEN, RED];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadTypeCounts {
    /// `counts[panel][focus region]`.
    pub counts: Vec<[u64; 4]>,
}

impl RoadTypeCounts {
    pub fn from_frame(batch: &RecordBatch) -> Result<Self> {
        let p21 = frame::ints(batch, "p21")?;
        let mut counts = vec![[0u64; 4]; ROAD_PANELS.len()];
        for (region, row) in focus_rows(batch)? {
            if let Some(panel) = ROAD_PANELS.iter().position(|(_, codes)| codes.contains(&p21[row])) {
                counts[panel][region] += 1;
            }
        }
        Ok(Self { counts })
    }
}

impl Chart for RoadTypeCounts {
    fn size(&self) -> (u32, u32) {
        (1169, 827)
    }

    fn summary(&self) -> String {
        let mut out = format!("{:<26}", "Druhy silnic");
        for region in FOCUS_REGIONS {
            let _ = write!(out, "{region:>8}");
        }
        out.push('\n');
        for ((title, _), row) in ROAD_PANELS.iter().zip(&self.counts) {
            let _ = write!(out, "{title:<26}");
            for n in row {
                let _ = write!(out, "{n:>8}");
            }
            out.push('\n');
        }
        out
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let root = root.titled("Druhy silnic", ("sans-serif", 24).into_font())?;
        let labels = focus_labels();
        for (idx, (area, ((title, _), row))) in root
            .split_evenly((2, 3))
            .iter()
            .zip(ROAD_PANELS.iter().zip(&self.counts))
            .enumerate()
        {
            let ymax = axis_max(row.iter().copied().max().unwrap_or(0));
            let mut chart = ChartBuilder::on(area)
                .caption(*title, ("sans-serif", 16).into_font())
                .margin(8)
                .x_label_area_size(30)
                .y_label_area_size(50)
                .build_cartesian_2d((0..4i32).into_segmented(), 0u64..ymax)?;

            let region_label = |v: &SegmentValue<i32>| segment_label(v, &labels);
            let mut mesh = chart.configure_mesh();
            mesh.disable_x_mesh()
                .x_desc("Kraj")
                .x_label_formatter(&region_label);
            if idx % 3 == 0 {
                mesh.y_desc("Počet nehod");
            }
            mesh.draw()?;

            chart.draw_series(row.iter().enumerate().map(|(i, &n)| {
                let x = i as i32;
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(x), 0), (SegmentValue::Exact(x + 1), n)],
                    REGION_COLORS[i].filled(),
                );
                bar.set_margin(0, 0, 6, 6);
                bar
            }))?;
        }
        Ok(())
    }
}

#[tracing::instrument(level = "info", skip_all)]
pub fn plot_roadtype(batch: &RecordBatch, out: &ChartOutput) -> Result<()> {
    if out.is_noop() {
        return Ok(());
    }
    render(&RoadTypeCounts::from_frame(batch)?, out)
}

// ─── animals ───────────────────────────────────────────────────────────────

/// Fault buckets in legend order.
pub const FAULT_LABELS: [&str; 3] = ["jiné", "řidičem", "zvěří"];

/// Bucket of a `p10` code: `[0,1)` and `[3,4)` and `[5,9)` other,
/// `[1,3)` driver, `[4,5)` animal. Codes outside `[0,9)` are dropped.
pub fn fault_bucket(p10: i64) -> Option<usize> {
    match p10 {
        0 | 3 | 5..=8 => Some(0),
        1 | 2 => Some(1),
        4 => Some(2),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyFaults {
    /// `counts[focus region][month - 1][fault bucket]`.
    pub counts: Vec<[[u64; 3]; 12]>,
}

impl MonthlyFaults {
    pub fn from_frame(batch: &RecordBatch) -> Result<Self> {
        let p10 = frame::ints(batch, "p10")?;
        let dates = frame::dates(batch)?;
        let mut counts = vec![[[0u64; 3]; 12]; FOCUS_REGIONS.len()];
        for (region, row) in focus_rows(batch)? {
            let Some(date) = dates[row].filter(|d| d.year() != PARTIAL_YEAR) else {
                continue;
            };
            if let Some(bucket) = fault_bucket(p10[row]) {
                counts[region][date.month0() as usize][bucket] += 1;
            }
        }
        Ok(Self { counts })
    }
}

impl Chart for MonthlyFaults {
    fn size(&self) -> (u32, u32) {
        (1169, 827)
    }

    fn summary(&self) -> String {
        let mut out = String::new();
        for (region, months) in FOCUS_REGIONS.iter().zip(&self.counts) {
            let _ = writeln!(out, "Kraj: {region}");
            let _ = write!(out, "{:>6}", "Měsíc");
            for label in FAULT_LABELS {
                let _ = write!(out, "{label:>10}");
            }
            out.push('\n');
            for (m, buckets) in months.iter().enumerate() {
                let _ = write!(out, "{:>6}", m + 1);
                for n in buckets {
                    let _ = write!(out, "{n:>10}");
                }
                out.push('\n');
            }
        }
        out
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let root = root.titled("Nehody v měsících", ("sans-serif", 24).into_font())?;
        let width = 0.8 / FAULT_LABELS.len() as f64;
        for (idx, (area, (region, months))) in root
            .split_evenly((2, 2))
            .iter()
            .zip(FOCUS_REGIONS.iter().zip(&self.counts))
            .enumerate()
        {
            let max = months.iter().flatten().copied().max().unwrap_or(0);
            let mut chart = ChartBuilder::on(area)
                .caption(format!("Kraj: {region}"), ("sans-serif", 16).into_font())
                .margin(8)
                .x_label_area_size(30)
                .y_label_area_size(50)
                .build_cartesian_2d(0.5f64..12.5f64, 0u64..axis_max(max))?;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(12)
                .x_label_formatter(&|x| format!("{}", x.round() as i64))
                .x_desc("Měsíc")
                .y_desc("Počet nehod")
                .draw()?;

            for (bucket, label) in FAULT_LABELS.iter().enumerate() {
                let color = series_color(bucket);
                let series = chart.draw_series(months.iter().enumerate().map(|(m, counts)| {
                    let left = (m + 1) as f64 - 0.4 + bucket as f64 * width;
                    Rectangle::new([(left, 0), (left + width, counts[bucket])], color.filled())
                }))?;
                if idx == 0 {
                    series.label(*label).legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                    });
                }
            }
            if idx == 0 {
                chart
                    .configure_series_labels()
                    .background_style(WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()?;
            }
        }
        Ok(())
    }
}

#[tracing::instrument(level = "info", skip_all)]
pub fn plot_animals(batch: &RecordBatch, out: &ChartOutput) -> Result<()> {
    if out.is_noop() {
        return Ok(());
    }
    render(&MonthlyFaults::from_frame(batch)?, out)
}

// ─── weather ───────────────────────────────────────────────────────────────

/// `p18` codes 1..=7 in order.
pub const CONDITION_LABELS: [&str; 7] = [
    "neztížené",
    "mlha",
    "na počátku deště",
    "déšť",
    "sněžení",
    "náledí",
    "nárazový vítr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyConditions {
    /// Per focus region: consecutive months (see [`month_index`]) with the
    /// count of accidents under each condition.
    pub series: Vec<Vec<(i32, [u64; 7])>>,
}

impl MonthlyConditions {
    pub fn from_frame(batch: &RecordBatch) -> Result<Self> {
        let p18 = frame::ints(batch, "p18")?;
        let dates = frame::dates(batch)?;
        let mut per_region: Vec<BTreeMap<i32, [u64; 7]>> =
            vec![BTreeMap::new(); FOCUS_REGIONS.len()];

        for (region, row) in focus_rows(batch)? {
            let (Some(date), Ok(code @ 1..=7)) = (dates[row], usize::try_from(p18[row])) else {
                continue;
            };
            per_region[region].entry(month_index(date)).or_default()[code - 1] += 1;
        }

        let series = per_region
            .into_iter()
            .map(|months| {
                let (Some(&first), Some(&last)) = (months.keys().next(), months.keys().next_back())
                else {
                    return Vec::new();
                };
                // gaps are months without accidents
                (first..=last)
                    .filter(|m| m.div_euclid(12) != PARTIAL_YEAR)
                    .map(|m| (m, months.get(&m).copied().unwrap_or_default()))
                    .collect()
            })
            .collect();
        Ok(Self { series })
    }
}

impl Chart for MonthlyConditions {
    fn size(&self) -> (u32, u32) {
        (1169, 827)
    }

    fn summary(&self) -> String {
        let mut out = String::new();
        for (region, months) in FOCUS_REGIONS.iter().zip(&self.series) {
            let _ = writeln!(out, "Kraj: {region}");
            let _ = write!(out, "{:<8}", "Datum");
            for label in CONDITION_LABELS {
                let _ = write!(out, "{label:>18}");
            }
            out.push('\n');
            for (month, counts) in months {
                let _ = write!(out, "{:<8}", month_label(*month));
                for n in counts {
                    let _ = write!(out, "{n:>18}");
                }
                out.push('\n');
            }
        }
        out
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let root = root.titled("Povětrnostní podmínky", ("sans-serif", 24).into_font())?;
        for (idx, (area, (region, months))) in root
            .split_evenly((2, 2))
            .iter()
            .zip(FOCUS_REGIONS.iter().zip(&self.series))
            .enumerate()
        {
            let first = months.first().map_or(0, |(m, _)| *m);
            let last = months.last().map_or(first, |(m, _)| *m);
            let max = months.iter().flat_map(|(_, c)| c.iter().copied()).max().unwrap_or(0);

            let mut chart = ChartBuilder::on(area)
                .caption(format!("Kraj: {region}"), ("sans-serif", 16).into_font())
                .margin(8)
                .x_label_area_size(30)
                .y_label_area_size(50)
                .build_cartesian_2d(first..last + 1, 0u64..axis_max(max))?;
            chart
                .configure_mesh()
                .x_labels(6)
                .x_label_formatter(&|m| month_label(*m))
                .x_desc("Datum")
                .y_desc("Počet nehod")
                .draw()?;

            for (code, label) in CONDITION_LABELS.iter().enumerate() {
                let color = series_color(code);
                let series = chart.draw_series(LineSeries::new(
                    months.iter().map(|(m, counts)| (*m, counts[code])),
                    color.stroke_width(2),
                ))?;
                if idx == 0 {
                    series.label(*label).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }
            if idx == 0 {
                chart
                    .configure_series_labels()
                    .background_style(WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()?;
            }
        }
        Ok(())
    }
}

#[tracing::instrument(level = "info", skip_all)]
pub fn plot_conditions(batch: &RecordBatch, out: &ChartOutput) -> Result<()> {
    if out.is_noop() {
        return Ok(());
    }
    let conditions = MonthlyConditions::from_frame(batch)?;
    debug!(
        months = conditions.series.iter().map(Vec::len).sum::<usize>(),
        "weather series"
    );
    render(&conditions, out)
}

/// First day of the month behind a [`month_index`].
pub fn month_start(index: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::write_batch;
    use crate::fixtures::csv_line;
    use crate::process::{parse_csv, with_region_column};
    use crate::schema::{region_schema, Region};
    use arrow::compute::concat_batches;
    use tempfile::tempdir;

    /// Region batch built from `(region, [(column, value)])` rows.
    fn dataset(rows: &[(Region, Vec<(&str, &str)>)]) -> RecordBatch {
        let parts: Vec<RecordBatch> = rows
            .iter()
            .map(|(region, fields)| {
                let parsed = parse_csv(&csv_line(fields), "test").unwrap();
                with_region_column(&parsed, *region).unwrap()
            })
            .collect();
        concat_batches(&region_schema(), &parts).unwrap()
    }

    #[test]
    fn dataframe_encodes_categories_and_adds_date() -> Result<()> {
        let batch = dataset(&[
            (Region::Jhm, vec![("p1", "1"), ("p2a", "2019-05-01"), ("p21", "1"), ("p14", "300")]),
            (Region::Kvk, vec![("p1", "2"), ("p2a", "2020-02-29"), ("p21", "1")]),
            (Region::Kvk, vec![("p1", "3"), ("p21", "6")]),
        ]);
        let dir = tempdir()?;
        let path = dir.path().join("accidents.parquet");
        write_batch(&batch, &path)?;

        let df = get_dataframe(&path, true)?;
        assert_eq!(df.num_rows(), 3);
        assert_eq!(df.num_columns(), batch.num_columns() + 1);

        let ty = |name: &str| df.schema().field_with_name(name).unwrap().data_type().clone();
        assert!(matches!(ty("p21"), DataType::Dictionary(_, _)));
        assert!(matches!(ty("p1"), DataType::Dictionary(_, _)));
        assert_eq!(ty("p14"), DataType::Int64);
        assert_eq!(ty("region"), DataType::Utf8);
        assert_eq!(ty("p2a"), DataType::Date32);
        assert_eq!(ty("e"), DataType::Float64);
        assert_eq!(ty(DATE_FIELD), DataType::Date32);

        // values survive encoding
        assert_eq!(frame::ints(&df, "p21")?, vec![1, 1, 6]);
        let dates = frame::dates(&df)?;
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2020, 2, 29));
        assert_eq!(dates[2], None);

        // re-encoding is stable
        assert_eq!(categorize(&df)?.num_columns(), df.num_columns());
        Ok(())
    }

    #[test]
    fn road_types_merge_four_lane_codes() -> Result<()> {
        let batch = dataset(&[
            (Region::Hkk, vec![("p21", "3")]),
            (Region::Hkk, vec![("p21", "4")]),
            (Region::Kvk, vec![("p21", "0")]),
            (Region::Jhm, vec![("p21", "1")]),
            (Region::Pha, vec![("p21", "1")]),
            (Region::Jhc, vec![("p21", "")]),
        ]);
        let counts = RoadTypeCounts::from_frame(&categorize(&batch)?)?;
        assert_eq!(counts.counts[0], [0, 0, 1, 0]);
        assert_eq!(counts.counts[2], [2, 0, 0, 0]);
        assert_eq!(counts.counts[5], [0, 0, 0, 1]);
        assert_eq!(counts.counts.iter().flatten().sum::<u64>(), 4);
        assert!(counts.summary().contains("Čtyřpruhová komunikace"));
        Ok(())
    }

    #[test]
    fn fault_buckets_follow_bins() {
        let got: Vec<Option<usize>> = (-1..=9).map(fault_bucket).collect();
        assert_eq!(
            got,
            vec![
                None,
                Some(0),
                Some(1),
                Some(1),
                Some(0),
                Some(2),
                Some(0),
                Some(0),
                Some(0),
                Some(0),
                None
            ]
        );
    }

    #[test]
    fn animals_by_month_without_2021() -> Result<()> {
        let batch = dataset(&[
            (Region::Jhm, vec![("p10", "4"), ("p2a", "2019-03-10")]),
            (Region::Jhm, vec![("p10", "4"), ("p2a", "2020-03-01")]),
            (Region::Jhm, vec![("p10", "1"), ("p2a", "2020-12-24")]),
            (Region::Jhm, vec![("p10", "4"), ("p2a", "2021-03-01")]),
            (Region::Jhm, vec![("p10", "4")]),
            (Region::Msk, vec![("p10", "4"), ("p2a", "2019-03-10")]),
        ]);
        let faults = MonthlyFaults::from_frame(&batch)?;
        let jhm = &faults.counts[2];
        assert_eq!(jhm[2], [0, 0, 2]);
        assert_eq!(jhm[11], [0, 1, 0]);
        let total: u64 = faults.counts.iter().flatten().flatten().sum();
        assert_eq!(total, 3);
        Ok(())
    }

    #[test]
    fn conditions_fill_gaps_and_skip_2021() -> Result<()> {
        let batch = dataset(&[
            (Region::Kvk, vec![("p18", "4"), ("p2a", "2020-11-03")]),
            (Region::Kvk, vec![("p18", "4"), ("p2a", "2020-11-20")]),
            (Region::Kvk, vec![("p18", "0"), ("p2a", "2020-12-01")]),
            (Region::Kvk, vec![("p18", "6"), ("p2a", "2021-01-05")]),
            (Region::Kvk, vec![("p18", "6"), ("p2a", "2022-01-05")]),
        ]);
        let conditions = MonthlyConditions::from_frame(&batch)?;
        let kvk = &conditions.series[3];
        let nov = month_index(NaiveDate::from_ymd_opt(2020, 11, 1).unwrap());
        // Nov + Dec 2020, then Jan 2022 after the skipped year
        assert_eq!(kvk.len(), 3);
        assert_eq!(kvk[0], (nov, [0, 0, 0, 2, 0, 0, 0]));
        assert_eq!(kvk[1], (nov + 1, [0; 7]));
        assert_eq!(month_start(kvk[2].0), NaiveDate::from_ymd_opt(2022, 1, 1));
        assert!(conditions.series[0].is_empty());
        Ok(())
    }

    #[test]
    fn charts_render_to_svg() -> Result<()> {
        let batch = dataset(&[
            (Region::Hkk, vec![("p21", "1"), ("p10", "4"), ("p18", "1"), ("p2a", "2019-01-01")]),
            (Region::Jhc, vec![("p21", "2"), ("p10", "1"), ("p18", "2"), ("p2a", "2019-02-01")]),
        ]);
        let df = categorize(&batch)?;
        let dir = tempdir()?;
        for (name, plot) in [
            ("road.svg", plot_roadtype as fn(&RecordBatch, &ChartOutput) -> Result<()>),
            ("animals.svg", plot_animals),
            ("conditions.svg", plot_conditions),
        ] {
            let path = dir.path().join("figs").join(name);
            plot(&df, &ChartOutput::new(Some(path.clone()), false))?;
            assert!(std::fs::read_to_string(&path)?.contains("<svg"), "{name}");
        }
        Ok(())
    }
    #[test]
    fn charts_render_to_png() -> Result<()> {
        let batch = dataset(&[
            (Region::Hkk, vec![("p21", "3"), ("p10", "4"), ("p18", "3"), ("p2a", "2019-03-01")]),
            (Region::Jhm, vec![("p21", "0"), ("p10", "2"), ("p18", "1"), ("p2a", "2020-07-01")]),
        ]);
        let df = categorize(&batch)?;
        let dir = tempdir()?;
        for (name, plot) in [
            ("01_road.png", plot_roadtype as fn(&RecordBatch, &ChartOutput) -> Result<()>),
            ("02_animals.png", plot_animals),
            ("03_conditions.png", plot_conditions),
        ] {
            let path = dir.path().join(name);
            plot(&df, &ChartOutput::new(Some(path.clone()), false))?;
            assert_eq!(&std::fs::read(&path)?[..4], b"\x89PNG", "{name}");
        }
        Ok(())
    }
}
