//! Accident locations in the S-JTSK / Krovak East North plane.

use anyhow::Result;
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use geo::{BoundingRect, MultiPoint, Point};
use plotters::{coord::Shift, prelude::*, style::full_palette};
use std::fmt::Write;
use tracing::debug;

use super::frame;
use super::kmeans::KMeans;
use super::output::{gradient, render, Chart, ChartOutput};
use crate::schema::REGION_FIELD;

/// Coordinate reference system of the `d`/`e` columns.
pub const CRS: &str = "EPSG:5514";

pub const GEO_REGION: &str = "JHM";
pub const GEO_YEARS: [i32; 3] = [2018, 2019, 2020];
pub const CLUSTERS: usize = 25;
const CLUSTER_SEED: u64 = 0x5eed;

/// Rows with a usable location. `points` and `dates` run parallel to the
/// rows of `frame`.
#[derive(Debug, Clone)]
pub struct GeoFrame {
    pub frame: RecordBatch,
    pub points: MultiPoint,
    pub dates: Vec<Option<NaiveDate>>,
}

impl GeoFrame {
    pub fn crs(&self) -> &'static str {
        CRS
    }

    pub fn len(&self) -> usize {
        self.points.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.0.is_empty()
    }

    pub fn point(&self, row: usize) -> Point {
        self.points.0[row]
    }
}

/// Drop rows without coordinates and attach `(d, e)` points and dates.
pub fn make_geo(batch: &RecordBatch) -> Result<GeoFrame> {
    let d = frame::floats(batch, "d")?;
    let e = frame::floats(batch, "e")?;
    let keep: Vec<bool> = d.iter().zip(&e).map(|(x, y)| !(x.is_nan() || y.is_nan())).collect();

    let frame = frame::filter_rows(batch, &keep)?;
    let points = d
        .into_iter()
        .zip(e)
        .zip(&keep)
        .filter(|(_, k)| **k)
        .map(|((x, y), _)| Point::new(x, y))
        .collect();
    let dates = frame::dates(&frame)?;
    debug!(kept = frame.num_rows(), dropped = batch.num_rows() - frame.num_rows(), "geo rows");
    Ok(GeoFrame {
        frame,
        points,
        dates,
    })
}

/// Plot ranges around `points` with a small margin; a unit square when empty.
fn bounds(points: &MultiPoint) -> ((f64, f64), (f64, f64)) {
    let Some(rect) = points.bounding_rect() else {
        return ((0.0, 1.0), (0.0, 1.0));
    };
    let pad = |lo: f64, hi: f64| {
        let m = ((hi - lo) * 0.02).max(1.0);
        (lo - m, hi + m)
    };
    let (min, max) = (rect.min(), rect.max());
    (pad(min.x, max.x), pad(min.y, max.y))
}

fn in_region(geo: &GeoFrame) -> Result<Vec<bool>> {
    Ok(frame::strings(&geo.frame, REGION_FIELD)?
        .iter()
        .map(|r| r == GEO_REGION)
        .collect())
}

// ─── yearly road maps ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MapPanel {
    pub title: String,
    pub points: MultiPoint,
    pub color: RGBColor,
}

/// Motorway and first-class road accidents of one region, per year.
#[derive(Debug, Clone)]
pub struct RoadMaps {
    pub panels: Vec<MapPanel>,
}

impl RoadMaps {
    pub fn from_geo(geo: &GeoFrame) -> Result<Self> {
        let region = in_region(geo)?;
        let p36 = frame::ints(&geo.frame, "p36")?;
        let kinds = [
            (0, "dálnice", full_palette::GREEN),
            (1, "silnice první třídy", full_palette::RED),
        ];

        let mut panels = Vec::with_capacity(GEO_YEARS.len() * kinds.len());
        for year in GEO_YEARS {
            for (code, name, color) in kinds {
                let points = (0..geo.len())
                    .filter(|&i| {
                        region[i]
                            && p36[i] == code
                            && geo.dates[i].is_some_and(|d| d.year() == year)
                    })
                    .map(|i| geo.point(i))
                    .collect();
                panels.push(MapPanel {
                    title: format!("{GEO_REGION} kraj: {name} ({year})"),
                    points,
                    color,
                });
            }
        }
        Ok(Self { panels })
    }
}

impl Chart for RoadMaps {
    fn size(&self) -> (u32, u32) {
        (1500, 2000)
    }

    fn summary(&self) -> String {
        self.panels
            .iter()
            .map(|p| format!("{}: {} nehod\n", p.title, p.points.0.len()))
            .collect()
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        for (area, panel) in root.split_evenly((3, 2)).iter().zip(&self.panels) {
            let ((x0, x1), (y0, y1)) = bounds(&panel.points);
            let mut chart = ChartBuilder::on(area)
                .caption(&panel.title, ("sans-serif", 18).into_font())
                .margin(10)
                .build_cartesian_2d(x0..x1, y0..y1)?;
            let color = panel.color;
            chart.draw_series(
                panel
                    .points
                    .iter()
                    .map(|p| Circle::new((p.x(), p.y()), 2, color.filled())),
            )?;
        }
        Ok(())
    }
}

#[tracing::instrument(level = "info", skip_all)]
pub fn plot_geo(geo: &GeoFrame, out: &ChartOutput) -> Result<()> {
    if out.is_noop() {
        return Ok(());
    }
    render(&RoadMaps::from_geo(geo)?, out)
}

// ─── clusters ──────────────────────────────────────────────────────────────

/// First-class road accidents of one region grouped into road sections.
#[derive(Debug, Clone)]
pub struct ClusterMap {
    pub points: MultiPoint,
    pub clusters: KMeans,
}

impl ClusterMap {
    pub fn from_geo(geo: &GeoFrame, k: usize) -> Result<Self> {
        let region = in_region(geo)?;
        let p36 = frame::ints(&geo.frame, "p36")?;
        let points: MultiPoint = (0..geo.len())
            .filter(|&i| region[i] && p36[i] == 1)
            .map(|i| geo.point(i))
            .collect();
        let coords: Vec<[f64; 2]> = points.iter().map(|p| [p.x(), p.y()]).collect();
        let clusters = KMeans::fit(&coords, k, CLUSTER_SEED);
        debug!(points = points.0.len(), clusters = clusters.centroids.len(), "clustered");
        Ok(Self { points, clusters })
    }

    /// Size of the cluster each point belongs to.
    pub fn point_counts(&self) -> Vec<usize> {
        let sizes = self.clusters.sizes();
        self.clusters.labels.iter().map(|&l| sizes[l]).collect()
    }
}

impl Chart for ClusterMap {
    fn size(&self) -> (u32, u32) {
        (1500, 2000)
    }

    fn summary(&self) -> String {
        let sizes = self.clusters.sizes();
        let mut order: Vec<usize> = (0..sizes.len()).collect();
        order.sort_by(|a, b| sizes[*b].cmp(&sizes[*a]));

        let mut out = format!(
            "Nehody v {GEO_REGION} kraji na silnicích 1. třídy ({CRS})\n{:>8}{:>14}{:>14}{:>8}\n",
            "úsek", "x", "y", "počet"
        );
        for c in order {
            let [x, y] = self.clusters.centroids[c];
            let _ = writeln!(out, "{c:>8}{x:>14.1}{y:>14.1}{:>8}", sizes[c]);
        }
        out
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let counts = self.point_counts();
        let lo = counts.iter().copied().min().unwrap_or(0) as f64;
        let hi = (counts.iter().copied().max().unwrap_or(0) as f64).max(lo + 1.0);
        let scale = |n: f64| (n - lo) / (hi - lo);

        let (map, legend) = root.split_vertically(1840);
        let ((x0, x1), (y0, y1)) = bounds(&self.points);
        let mut chart = ChartBuilder::on(&map)
            .caption(
                format!("Nehody v {GEO_REGION} kraji na silnicích 1. třídy"),
                ("sans-serif", 24).into_font(),
            )
            .margin(10)
            .build_cartesian_2d(x0..x1, y0..y1)?;
        chart.draw_series(
            self.points
                .iter()
                .zip(&counts)
                .map(|(p, &n)| Circle::new((p.x(), p.y()), 3, gradient(scale(n as f64)).filled())),
        )?;

        let mut bar = ChartBuilder::on(&legend)
            .margin_left(40)
            .margin_right(40)
            .x_label_area_size(40)
            .build_cartesian_2d(lo..hi, 0f64..1f64)?;
        bar.configure_mesh()
            .disable_mesh()
            .disable_y_axis()
            .x_desc("Počet nehod v úseku")
            .draw()?;
        let steps = 100;
        let step = (hi - lo) / steps as f64;
        bar.draw_series((0..steps).map(|i| {
            let left = lo + i as f64 * step;
            Rectangle::new(
                [(left, 0.0), (left + step, 1.0)],
                gradient(scale(left + step / 2.0)).filled(),
            )
        }))?;
        Ok(())
    }
}

#[tracing::instrument(level = "info", skip_all)]
pub fn plot_cluster(geo: &GeoFrame, out: &ChartOutput) -> Result<()> {
    if out.is_noop() {
        return Ok(());
    }
    render(&ClusterMap::from_geo(geo, CLUSTERS)?, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::csv_line;
    use crate::process::{parse_csv, with_region_column};
    use crate::schema::{region_schema, Region};
    use arrow::compute::concat_batches;
    use tempfile::tempdir;

    fn row(region: Region, d: &str, e: &str, p36: &str, date: &str) -> RecordBatch {
        let line = csv_line(&[("d", d), ("e", e), ("p36", p36), ("p2a", date)]);
        with_region_column(&parse_csv(&line, "test").unwrap(), region).unwrap()
    }

    fn sample() -> RecordBatch {
        let rows = vec![
            row(Region::Jhm, "-600000,5", "-1160000", "0", "2018-04-01"),
            row(Region::Jhm, "-600100", "-1160100", "1", "2018-04-02"),
            row(Region::Jhm, "-601000", "-1161000", "1", "2019-06-02"),
            row(Region::Jhm, "-620000", "-1180000", "1", "2020-06-02"),
            row(Region::Jhm, "", "-1160000", "1", "2020-06-02"),
            row(Region::Jhm, "-600000", "abc", "0", "2020-06-02"),
            row(Region::Zlk, "-520000", "-1170000", "1", "2019-06-02"),
            row(Region::Jhm, "-600000", "-1160000", "2", "2017-01-01"),
        ];
        concat_batches(&region_schema(), &rows).unwrap()
    }

    #[test]
    fn make_geo_drops_missing_coordinates() -> Result<()> {
        let geo = make_geo(&sample())?;
        assert_eq!(geo.len(), 6);
        assert_eq!(geo.frame.num_rows(), 6);
        assert_eq!(geo.dates.len(), 6);
        assert_eq!(geo.crs(), "EPSG:5514");
        assert_eq!(geo.point(0), Point::new(-600000.5, -1160000.0));
        assert!(geo.points.iter().all(|p| !p.x().is_nan() && !p.y().is_nan()));
        Ok(())
    }

    #[test]
    fn yearly_panels_split_road_kinds() -> Result<()> {
        let maps = RoadMaps::from_geo(&make_geo(&sample())?)?;
        let sizes: Vec<usize> = maps.panels.iter().map(|p| p.points.0.len()).collect();
        // (2018 motorway, 2018 first class, 2019 .., 2020 ..)
        assert_eq!(sizes, vec![1, 1, 0, 1, 0, 1]);
        assert_eq!(maps.panels[1].title, "JHM kraj: silnice první třídy (2018)");
        Ok(())
    }

    #[test]
    fn clusters_cover_first_class_roads_only() -> Result<()> {
        let map = ClusterMap::from_geo(&make_geo(&sample())?, 2)?;
        assert_eq!(map.points.0.len(), 3);
        assert_eq!(map.clusters.centroids.len(), 2);
        // the far point sits alone
        assert_eq!(map.point_counts(), vec![2, 2, 1]);
        assert!(map.summary().contains("EPSG:5514"));
        Ok(())
    }

    #[test]
    fn geo_charts_render() -> Result<()> {
        let geo = make_geo(&sample())?;
        let dir = tempdir()?;
        let maps = dir.path().join("geo1.svg");
        let clusters = dir.path().join("geo2.svg");
        plot_geo(&geo, &ChartOutput::new(Some(maps.clone()), false))?;
        plot_cluster(&geo, &ChartOutput::new(Some(clusters.clone()), false))?;
        assert!(maps.is_file() && clusters.is_file());
        Ok(())
    }

    #[test]
    fn geo_charts_render_as_png() -> Result<()> {
        let geo = make_geo(&sample())?;
        let dir = tempdir()?;
        let maps = dir.path().join("geo1.png");
        let clusters = dir.path().join("geo2.png");
        plot_geo(&geo, &ChartOutput::new(Some(maps.clone()), false))?;
        plot_cluster(&geo, &ChartOutput::new(Some(clusters.clone()), false))?;
        assert_eq!(&std::fs::read(&maps)?[..4], b"\x89PNG");
        assert_eq!(&std::fs::read(&clusters)?[..4], b"\x89PNG");
        Ok(())
    }

    #[test]
    fn bounds_pad_the_point_envelope() {
        let points: MultiPoint = vec![Point::new(0.0, 10.0), Point::new(100.0, 20.0)].into();
        let ((x0, x1), (y0, y1)) = bounds(&points);
        assert_eq!((x0, x1), (-2.0, 102.0));
        assert_eq!((y0, y1), (9.0, 21.0));
        assert_eq!(bounds(&MultiPoint(vec![])), ((0.0, 1.0), (0.0, 1.0)));
    }
}
