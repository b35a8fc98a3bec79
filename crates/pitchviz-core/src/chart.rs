use std::ops::Range;

use plotters::backend::{DrawingBackend, SVGBackend};
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::ranged1d::{BoldPoints, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind, IntoDrawingArea};
use plotters::element::PathElement;
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::{Color, IntoFont, RGBColor, TextStyle};

use crate::constants::*;
use crate::error::ChartError;
use crate::types::{Analysis, AnalysisResult};

#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub label: &'static str,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
}

/// A vertical line at an event time, drawn dotted across the full y range.
#[derive(Debug, Clone)]
pub struct EventMarker {
    pub label: &'static str,
    pub color: RGBColor,
    pub time: f64,
}

/// Logical content of the velocity chart. Drawing happens in [`Chart::draw`].
#[derive(Debug, Clone)]
pub struct Chart {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<ChartSeries>,
    pub markers: Vec<EventMarker>,
}

/// Nothing is drawn for the no-input and error cases.
pub fn render(result: &AnalysisResult) -> Option<Chart> {
    match result {
        AnalysisResult::NoInputYet | AnalysisResult::SchemaError(_) => None,
        AnalysisResult::Success(analysis) => Some(Chart::from_analysis(analysis)),
    }
}

impl Chart {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let data = &analysis.series;
        let against_time = |values: &[f64]| -> Vec<(f64, f64)> {
            data.time.iter().copied().zip(values.iter().copied()).collect()
        };

        let series = vec![
            ChartSeries {
                label: LABEL_PELVIS,
                color: COLOR_PELVIS,
                points: against_time(&data.pelvis_velocity),
            },
            ChartSeries {
                label: LABEL_TRUNK,
                color: COLOR_TRUNK,
                points: against_time(&data.trunk_velocity),
            },
            ChartSeries {
                label: LABEL_ARM,
                color: COLOR_ARM,
                points: against_time(&data.arm_velocity),
            },
            ChartSeries {
                label: LABEL_LEAD_LEG,
                color: COLOR_LEAD_LEG,
                points: against_time(&data.lead_leg_extension_velocity),
            },
        ];

        let markers = [
            (analysis.foot_contact_time, LABEL_FOOT_CONTACT, COLOR_FOOT_CONTACT),
            (analysis.ball_release_time, LABEL_BALL_RELEASE, COLOR_BALL_RELEASE),
        ]
        .into_iter()
        .filter_map(|(time, label, color)| time.map(|time| EventMarker { label, color, time }))
        .collect();

        Self {
            title: format!(
                "{CHART_TITLE_PREFIX} - {} - {}",
                analysis.handedness, analysis.athlete_name
            ),
            x_label: X_AXIS_LABEL,
            y_label: Y_AXIS_LABEL,
            series,
            markers,
        }
    }

    /// Legend entries in drawing order: the four series, then any markers.
    pub fn legend_labels(&self) -> Vec<&'static str> {
        self.series
            .iter()
            .map(|s| s.label)
            .chain(self.markers.iter().map(|m| m.label))
            .collect()
    }

    /// Time axis covering every finite sample and every marker.
    pub fn x_range(&self) -> Range<f64> {
        let samples = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(x, _)| x));
        padded_range(samples.chain(self.markers.iter().map(|m| m.time)))
    }

    pub fn y_range(&self) -> Range<f64> {
        padded_range(
            self.series
                .iter()
                .flat_map(|s| s.points.iter().map(|&(_, y)| y)),
        )
    }

    pub fn draw<DB>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&COLOR_BACKGROUND)?;

        let x_range = self.x_range();
        let y_range = self.y_range();

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, text_style(FONT_SIZE_TITLE))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range.clone(), y_range.clone())?;

        // Mesh lines are solid in plotters, so the grid is drawn separately.
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(GRID_LINES)
            .y_labels(GRID_LINES)
            .x_desc(self.x_label)
            .y_desc(self.y_label)
            .axis_style(COLOR_FOREGROUND)
            .label_style(text_style(FONT_SIZE_AXIS_LABEL))
            .axis_desc_style(text_style(FONT_SIZE_AXIS_LABEL))
            .draw()?;

        let grid_style = COLOR_GRID.mix(GRID_OPACITY).stroke_width(GRID_LINE_WIDTH);
        for x in grid_positions(&x_range) {
            chart.draw_series(DashedLineSeries::new(
                vec![(x, y_range.start), (x, y_range.end)],
                GRID_DASH,
                GRID_GAP,
                grid_style,
            ))?;
        }
        for y in grid_positions(&y_range) {
            chart.draw_series(DashedLineSeries::new(
                vec![(x_range.start, y), (x_range.end, y)],
                GRID_DASH,
                GRID_GAP,
                grid_style,
            ))?;
        }

        for series in &self.series {
            let color = series.color;
            chart
                .draw_series(LineSeries::new(
                    series
                        .points
                        .iter()
                        .copied()
                        .filter(|&(x, y)| x.is_finite() && y.is_finite()),
                    color.stroke_width(LINE_WIDTH_PLOT),
                ))?
                .label(series.label)
                .legend(move |(x, y)| {
                    PathElement::new(
                        vec![(x, y), (x + 20, y)],
                        color.stroke_width(LINE_WIDTH_LEGEND),
                    )
                });
        }

        for marker in &self.markers {
            let color = marker.color;
            chart
                .draw_series(DashedLineSeries::new(
                    vec![(marker.time, y_range.start), (marker.time, y_range.end)],
                    MARKER_DASH,
                    MARKER_GAP,
                    color.stroke_width(LINE_WIDTH_MARKER),
                ))?
                .label(marker.label)
                .legend(move |(x, y)| {
                    PathElement::new(
                        vec![(x, y), (x + 20, y)],
                        color.stroke_width(LINE_WIDTH_LEGEND),
                    )
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(COLOR_BACKGROUND.mix(0.9))
            .border_style(COLOR_FOREGROUND)
            .label_font(text_style(FONT_SIZE_LEGEND))
            .draw()?;

        root.present()?;
        Ok(())
    }

    pub fn to_svg(&self, width: u32, height: u32) -> Result<String, ChartError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            self.draw(&root)
                .map_err(|err| ChartError::Drawing(err.to_string()))?;
        }
        Ok(svg)
    }
}

fn text_style(size: i32) -> TextStyle<'static> {
    (FONT_FAMILY, size).into_font().color(&COLOR_FOREGROUND)
}

/// Calculate an axis range with padding; a fixed pad for flat or empty data.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return -DEGENERATE_RANGE_PADDING..DEGENERATE_RANGE_PADDING;
    }

    let span = max - min;
    let padding = if span < 1e-9 {
        DEGENERATE_RANGE_PADDING
    } else {
        span * RANGE_PADDING_RATIO
    };
    (min - padding)..(max + padding)
}

/// Grid positions on one axis, matching the mesh's tick labels.
fn grid_positions(range: &Range<f64>) -> Vec<f64> {
    let coord: RangedCoordf64 = range.clone().into();
    coord.key_points(BoldPoints(GRID_LINES))
}
