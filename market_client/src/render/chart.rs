//! Commodity price line chart.
//!
//! The series arrives newest first with `.` marking missing months. Points are
//! filtered, parsed and reversed into chronological order, then drawn as a
//! single SVG line series with point markers, a grid and year ticks every
//! five years.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use log::info;
use market_common::MarketError;
use market_common::Result;
use market_common::model::commodity::{CommoditySeries, Observation};

/// Notice printed when there is nothing to draw.
pub const NOTHING_TO_PLOT: &str = "No copper price data to plot.";
/// Chart heading.
pub const CHART_TITLE: &str = "Global Copper Price (Monthly)";
/// Years between two x-axis ticks.
pub const YEAR_TICK_STEP: i32 = 5;

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 110.0;
const Y_TICKS: usize = 6;
const LINE_COLOR: &str = "#1f3fbf";
const GRID_COLOR: &str = "#d9d9d9";

/// One plotted observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Price.
    pub value: f64,
}

/// Parses the observations into chronological points, skipping missing values.
pub fn chart_points(observations: &[Observation]) -> Result<Vec<ChartPoint>> {
    let mut points = observations
        .iter()
        .filter_map(|obs| obs.present_value().map(|value| (obs, value)))
        .map(|(obs, value)| parse_point(&obs.date, value))
        .collect::<Result<Vec<_>>>()?;
    points.reverse();
    Ok(points)
}

fn parse_point(date: &str, value: &str) -> Result<ChartPoint> {
    let invalid = |reason: String| MarketError::InvalidObservation {
        date: date.to_string(),
        value: value.to_string(),
        reason,
    };
    let parsed_date =
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| invalid(e.to_string()))?;
    let parsed_value = value.trim().parse::<f64>().map_err(|e| invalid(e.to_string()))?;
    Ok(ChartPoint {
        date: parsed_date,
        value: parsed_value,
    })
}

/// January 1st of every year divisible by `step` within `[first, last]`.
pub fn year_ticks(first: NaiveDate, last: NaiveDate, step: i32) -> Vec<NaiveDate> {
    let mut year = first.year();
    if first.ordinal() > 1 {
        year += 1;
    }
    year += (step - year.rem_euclid(step)) % step;

    let mut ticks = Vec::new();
    while let Some(tick) = NaiveDate::from_ymd_opt(year, 1, 1) {
        if tick > last {
            break;
        }
        ticks.push(tick);
        year += step;
    }
    ticks
}

/// Maps dates and values onto the plot area.
struct Scale {
    first: NaiveDate,
    day_span: f64,
    min: f64,
    max: f64,
}

impl Scale {
    fn new(points: &[ChartPoint]) -> Self {
        let first = points.first().map(|p| p.date).unwrap_or_default();
        let last = points.last().map(|p| p.date).unwrap_or(first);
        let (mut min, mut max) = points.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
            (lo.min(p.value), hi.max(p.value))
        });
        if points.is_empty() {
            (min, max) = (0.0, 1.0);
        }
        if (max - min).abs() < f64::EPSILON {
            min -= 1.0;
            max += 1.0;
        }
        let pad = (max - min) * 0.05;
        Scale {
            first,
            day_span: ((last - first).num_days() as f64).max(1.0),
            min: min - pad,
            max: max + pad,
        }
    }

    fn x(&self, date: NaiveDate) -> f64 {
        let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        MARGIN_LEFT + (date - self.first).num_days() as f64 / self.day_span * plot_width
    }

    fn y(&self, value: f64) -> f64 {
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        MARGIN_TOP + (1.0 - (value - self.min) / (self.max - self.min)) * plot_height
    }
}

/// Renders the points as a standalone SVG document.
pub fn svg_document(points: &[ChartPoint], y_label: &str) -> String {
    let scale = Scale::new(points);
    let plot_left = MARGIN_LEFT;
    let plot_right = WIDTH - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = HEIGHT - MARGIN_BOTTOM;

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\" font-size=\"12\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n\
         <text x=\"{cx}\" y=\"30\" text-anchor=\"middle\" font-size=\"16\">{title}</text>\n",
        w = WIDTH,
        h = HEIGHT,
        cx = WIDTH / 2.0,
        title = xml_escape(CHART_TITLE),
    );

    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        for tick in year_ticks(first.date, last.date, YEAR_TICK_STEP) {
            let x = scale.x(tick);
            let label_y = plot_bottom + 18.0;
            svg.push_str(&format!(
                "<line x1=\"{x:.1}\" y1=\"{plot_top}\" x2=\"{x:.1}\" y2=\"{plot_bottom}\" stroke=\"{GRID_COLOR}\"/>\n\
                 <text x=\"{x:.1}\" y=\"{label_y:.1}\" text-anchor=\"end\" transform=\"rotate(-45 {x:.1} {label_y:.1})\">{year}</text>\n",
                year = tick.year(),
            ));
        }
    }

    for i in 0..Y_TICKS {
        let value = scale.min + (scale.max - scale.min) * i as f64 / (Y_TICKS - 1) as f64;
        let y = scale.y(value);
        svg.push_str(&format!(
            "<line x1=\"{plot_left}\" y1=\"{y:.1}\" x2=\"{plot_right}\" y2=\"{y:.1}\" stroke=\"{GRID_COLOR}\"/>\n\
             <text x=\"{lx}\" y=\"{ty:.1}\" text-anchor=\"end\">{label}</text>\n",
            lx = plot_left - 8.0,
            ty = y + 4.0,
            label = tick_label(value, scale.max - scale.min),
        ));
    }

    svg.push_str(&format!(
        "<rect x=\"{plot_left}\" y=\"{plot_top}\" width=\"{pw}\" height=\"{ph}\" fill=\"none\" stroke=\"black\"/>\n\
         <text x=\"{cx}\" y=\"{xl}\" text-anchor=\"middle\">Date</text>\n\
         <text x=\"20\" y=\"{cy}\" text-anchor=\"middle\" transform=\"rotate(-90 20 {cy})\">{y_label}</text>\n",
        pw = plot_right - plot_left,
        ph = plot_bottom - plot_top,
        cx = (plot_left + plot_right) / 2.0,
        xl = HEIGHT - 12.0,
        cy = (plot_top + plot_bottom) / 2.0,
        y_label = xml_escape(y_label),
    ));

    let coords: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (scale.x(p.date), scale.y(p.value)))
        .collect();
    let polyline: Vec<String> = coords.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect();
    svg.push_str(&format!(
        "<polyline fill=\"none\" stroke=\"{LINE_COLOR}\" stroke-width=\"1.5\" points=\"{}\"/>\n",
        polyline.join(" ")
    ));
    for (x, y) in coords {
        svg.push_str(&format!(
            "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"3\" fill=\"{LINE_COLOR}\"/>\n"
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Draws the series to `path` and reports what was written on `out`.
///
/// Returns the written path, or `None` when the payload has no series.
pub fn render_commodity_chart<W: Write>(
    out: &mut W,
    series: &CommoditySeries,
    path: &Path,
) -> Result<Option<PathBuf>> {
    let Some(observations) = series.data.as_deref() else {
        writeln!(out, "{}", NOTHING_TO_PLOT)?;
        return Ok(None);
    };

    let points = chart_points(observations)?;
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        writeln!(out, "{}", NOTHING_TO_PLOT)?;
        return Ok(None);
    };

    let y_label = match series.unit.as_deref() {
        Some(unit) => format!("Price ({})", unit),
        None => String::from("Price"),
    };
    fs::write(path, svg_document(&points, &y_label))?;
    info!("Chart written to {}", path.display());

    writeln!(
        out,
        "{}: {} points from {} to {}, saved to {}",
        CHART_TITLE,
        points.len(),
        first.date,
        last.date,
        path.display()
    )?;
    Ok(Some(path.to_path_buf()))
}

fn tick_label(value: f64, range: f64) -> String {
    if range >= 100.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
