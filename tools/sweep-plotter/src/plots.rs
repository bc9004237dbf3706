//! Line charts with confidence interval error bars
//!
//! Charts are built in two steps: [`chart_specs`] decides which charts and series a
//! variant needs (pure, no drawing), then [`draw_chart`] renders a single spec into a
//! 1200x800 PNG using the [`plotters`] bitmap backend.

use plotters::prelude::*;
use std::path::{Path, PathBuf};
use sweep_stats::prelude::*;
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Fraction of the data range added above and below the Y axis.
const Y_PADDING: f64 = 0.05;

/// A single labelled line of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledSeries {
    pub label: String,
    pub points: Vec<SeriesPoint>,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub file_name: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub series: Vec<LabelledSeries>,
}

/// How the outer conditions found in the data relate to a variant's presets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditionCoverage {
    /// Preset conditions with results, in preset order. Only these are drawn.
    ///
    /// Variants without outer conditions have a single [`None`] condition.
    pub drawn: Vec<Option<KeyPart>>,

    /// Preset conditions without any results.
    pub missing: Vec<i64>,

    /// Conditions with results which are not among the presets, ascending.
    pub unlisted: Vec<KeyPart>,
}

/// Compares the outer conditions of `summaries` against the presets of `variant`.
pub fn condition_coverage(variant: ExperimentVariant, summaries: &Summaries) -> ConditionCoverage {
    let presets = variant.conditions();
    if presets.is_empty() {
        return ConditionCoverage {
            drawn: vec![None],
            ..Default::default()
        };
    }

    let mut present: Vec<KeyPart> = summaries
        .partitions()
        .flat_map(|partition| summaries.conditions(partition))
        .flatten()
        .collect();
    present.sort_unstable();
    present.dedup();

    let mut coverage = ConditionCoverage::default();
    for &condition in presets {
        let key = KeyPart::Int(condition);
        if present.contains(&key) {
            coverage.drawn.push(Some(key));
        } else {
            coverage.missing.push(condition);
        }
    }

    coverage.unlisted = present
        .into_iter()
        .filter(|condition| !coverage.drawn.contains(&Some(*condition)))
        .collect();

    coverage
}

/// Lays out the charts for `variant`.
///
/// - [`ExperimentVariant::chart_per_condition`] variants get one chart per condition,
///   with one series per partition.
/// - Other variants get one chart with one series per condition.
///
/// Charts left without any series are omitted, so data which covers none of the
/// preset conditions yields no charts at all.
pub fn chart_specs(variant: ExperimentVariant, summaries: &Summaries) -> Vec<ChartSpec> {
    let conditions = condition_coverage(variant, summaries).drawn;
    let partitions: Vec<Partition> = summaries.partitions().collect();

    let mut specs = Vec::new();
    if variant.chart_per_condition() {
        for condition in conditions {
            let series = partitions
                .iter()
                .map(|&partition| LabelledSeries {
                    label: variant.series_label(partition, condition),
                    points: summaries.series(partition, condition),
                })
                .filter(|series| !series.points.is_empty())
                .collect();

            specs.extend(build_spec(variant, condition, series));
        }
    } else {
        let series = partitions
            .iter()
            .flat_map(|&partition| {
                conditions.iter().map(move |&condition| LabelledSeries {
                    label: variant.series_label(partition, condition),
                    points: summaries.series(partition, condition),
                })
            })
            .filter(|series| !series.points.is_empty())
            .collect();

        specs.extend(build_spec(variant, None, series));
    }

    specs
}

fn build_spec(
    variant: ExperimentVariant,
    condition: Option<KeyPart>,
    series: Vec<LabelledSeries>,
) -> Option<ChartSpec> {
    if series.is_empty() {
        return None;
    }

    let points = || series.iter().flat_map(|series| series.points.iter());
    let x_range = match variant.x_range() {
        Some(range) => range,
        None => padded_range(points().map(|point| point.x), Y_PADDING),
    };
    let y_range = padded_range(
        points().flat_map(|point| {
            [
                point.mean - point.half_width,
                point.mean + point.half_width,
            ]
        }),
        Y_PADDING,
    );

    Some(ChartSpec {
        title: variant.title(condition),
        file_name: variant.chart_file_name(condition),
        x_label: variant.x_label(),
        y_label: variant.y_label(),
        x_range,
        y_range,
        series,
    })
}

/// Min..max of `values`, widened by `padding` of the span on both sides.
///
/// A zero span is widened to a unit range around the value.
fn padded_range(values: impl Iterator<Item = f64>, padding: f64) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
        (min.min(value), max.max(value))
    });

    let span = max - min;
    if span <= 0.0 {
        return (min - 0.5, max + 0.5);
    }

    (min - span * padding, max + span * padding)
}

/// Draws a chart as a 1200x800 PNG at `output_path`.
///
/// Each series is drawn as a line through the means, with a vertical error bar of
/// `mean ± half_width` at every point, and listed in the legend.
pub fn draw_chart(spec: &ChartSpec, output_path: &Path) -> Result<()> {
    if spec.series.iter().all(|series| series.points.is_empty()) {
        return Err(PlotError::InvalidData(format!(
            "No data to plot for {}",
            spec.title
        )));
    }

    let root = BitMapBackend::new(output_path, (1200, 800));
    let drawing_area = root.into_drawing_area();

    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let (x_min, x_max) = spec.x_range;
    let (y_min, y_max) = spec.y_range;
    let mut chart_context = ChartBuilder::on(&drawing_area)
        .caption(&spec.title, ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart_context
        .configure_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .label_style(("sans-serif", 25))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for (index, series) in spec.series.iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();

        chart_context
            .draw_series(LineSeries::new(
                series.points.iter().map(|point| (point.x, point.mean)),
                color.stroke_width(2),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        chart_context
            .draw_series(series.points.iter().map(|point| {
                ErrorBar::new_vertical(
                    point.x,
                    point.mean - point.half_width,
                    point.mean,
                    point.mean + point.half_width,
                    color.filled(),
                    10,
                )
            }))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    chart_context
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Renders summaries as PNG charts into an output directory.
pub struct PlotRenderer {
    output_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PlotRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            written: Vec::new(),
        }
    }

    /// Charts written so far, in drawing order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl RendersSummaries for PlotRenderer {
    fn render(
        &mut self,
        variant: ExperimentVariant,
        summaries: &Summaries,
    ) -> core::result::Result<(), AnalysisError> {
        for spec in chart_specs(variant, summaries) {
            let path = self.output_dir.join(&spec.file_name);
            draw_chart(&spec, &path).map_err(|e| AnalysisError::Render(e.to_string()))?;
            self.written.push(path);
        }

        Ok(())
    }
}
