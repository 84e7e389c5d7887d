//! Inline SVG histogram charts.

use std::io::Write;

use anyhow::Result;
use quick_xml::Writer;

use crate::common::{
    coord, end_element, start_element, tick_label, write_empty_element, write_text_element_with,
};
use crate::figure::Figure;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 64.0;
const Y_TICKS: usize = 5;

const BAR_FILL: &str = "#4c72b0";
const CURVE_STROKE: &str = "#dd8452";
const AXIS_STROKE: &str = "#333333";

/// Maps data coordinates onto the plot area.
struct Plot {
    x_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Plot {
    fn left() -> f64 {
        MARGIN_LEFT
    }

    fn right() -> f64 {
        WIDTH - MARGIN_RIGHT
    }

    fn top() -> f64 {
        MARGIN_TOP
    }

    fn bottom() -> f64 {
        HEIGHT - MARGIN_BOTTOM
    }

    fn x(&self, value: f64) -> f64 {
        let span = self.x_max - self.x_min;
        Self::left() + (value - self.x_min) / span * (Self::right() - Self::left())
    }

    fn y(&self, value: f64) -> f64 {
        Self::bottom() - value / self.y_max * (Self::bottom() - Self::top())
    }
}

/// Smallest 1, 2 or 5 times a power of ten at or above `value`.
fn nice_ceiling(value: f64) -> f64 {
    if !(value.is_finite() && value > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate >= value)
        .unwrap_or(10.0 * magnitude)
}

/// Writes `figure` as an `<svg>` element.
pub fn write_histogram_svg<W: Write>(xml: &mut Writer<W>, figure: &Figure) -> Result<()> {
    let histogram = &figure.histogram;
    let (x_min, x_max) = histogram.range();
    let density_max = figure
        .density
        .as_ref()
        .map_or(0.0, crate::histogram::DensityCurve::max_value);
    // Counts are small enough that the f64 conversion is exact.
    let tallest = (histogram.max_count() as f64).max(density_max);
    let plot = Plot {
        x_min,
        x_max,
        y_max: nice_ceiling(tallest),
    };

    let view_box = format!("0 0 {WIDTH} {HEIGHT}");
    let width = WIDTH.to_string();
    let height = HEIGHT.to_string();
    start_element(
        xml,
        "svg",
        &[
            ("xmlns", SVG_NS),
            ("class", "chart"),
            ("role", "img"),
            ("width", width.as_str()),
            ("height", height.as_str()),
            ("viewBox", view_box.as_str()),
            ("aria-label", figure.spec.title),
        ],
    )?;

    write_bars(xml, figure, &plot)?;
    write_density(xml, figure, &plot)?;
    write_axes(xml, figure, &plot)?;
    write_labels(xml, figure)?;

    end_element(xml, "svg")
}

fn write_bars<W: Write>(xml: &mut Writer<W>, figure: &Figure, plot: &Plot) -> Result<()> {
    start_element(xml, "g", &[("class", "bars"), ("fill", BAR_FILL)])?;
    let edges = &figure.histogram.edges;
    for (idx, count) in figure.histogram.counts.iter().enumerate() {
        let x0 = plot.x(edges[idx]);
        let x1 = plot.x(edges[idx + 1]);
        let top = plot.y(*count as f64);
        let x = coord(x0);
        let y = coord(top);
        let w = coord((x1 - x0).max(0.0));
        let h = coord(Plot::bottom() - top);
        let count_text = count.to_string();
        start_element(
            xml,
            "rect",
            &[
                ("x", x.as_str()),
                ("y", y.as_str()),
                ("width", w.as_str()),
                ("height", h.as_str()),
                ("stroke", "#ffffff"),
                ("data-count", count_text.as_str()),
            ],
        )?;
        let tooltip = format!(
            "{} a {}: {count}",
            tick_label(edges[idx]),
            tick_label(edges[idx + 1])
        );
        write_text_element_with(xml, "title", &[], &tooltip)?;
        end_element(xml, "rect")?;
    }
    end_element(xml, "g")
}

fn write_density<W: Write>(xml: &mut Writer<W>, figure: &Figure, plot: &Plot) -> Result<()> {
    let Some(curve) = &figure.density else {
        return Ok(());
    };
    let points = curve
        .points
        .iter()
        .map(|(x, y)| format!("{},{}", coord(plot.x(*x)), coord(plot.y(*y))))
        .collect::<Vec<_>>()
        .join(" ");
    write_empty_element(
        xml,
        "polyline",
        &[
            ("class", "density"),
            ("fill", "none"),
            ("stroke", CURVE_STROKE),
            ("stroke-width", "2"),
            ("points", points.as_str()),
        ],
    )
}

fn write_axes<W: Write>(xml: &mut Writer<W>, figure: &Figure, plot: &Plot) -> Result<()> {
    let left = coord(Plot::left());
    let right = coord(Plot::right());
    let top = coord(Plot::top());
    let bottom = coord(Plot::bottom());

    start_element(
        xml,
        "g",
        &[("class", "axes"), ("stroke", AXIS_STROKE), ("font-size", "11")],
    )?;
    write_empty_element(
        xml,
        "line",
        &[
            ("x1", left.as_str()),
            ("y1", bottom.as_str()),
            ("x2", right.as_str()),
            ("y2", bottom.as_str()),
        ],
    )?;
    write_empty_element(
        xml,
        "line",
        &[
            ("x1", left.as_str()),
            ("y1", top.as_str()),
            ("x2", left.as_str()),
            ("y2", bottom.as_str()),
        ],
    )?;

    // One x tick per bin edge.
    let tick_end = coord(Plot::bottom() + 5.0);
    let label_y = coord(Plot::bottom() + 18.0);
    for edge in &figure.histogram.edges {
        let x = coord(plot.x(*edge));
        write_empty_element(
            xml,
            "line",
            &[
                ("x1", x.as_str()),
                ("y1", bottom.as_str()),
                ("x2", x.as_str()),
                ("y2", tick_end.as_str()),
            ],
        )?;
        write_text_element_with(
            xml,
            "text",
            &[
                ("x", x.as_str()),
                ("y", label_y.as_str()),
                ("text-anchor", "middle"),
                ("stroke", "none"),
            ],
            &tick_label(*edge),
        )?;
    }

    let tick_start = coord(Plot::left() - 5.0);
    let label_x = coord(Plot::left() - 8.0);
    for step in 0..=Y_TICKS {
        let value = plot.y_max * step as f64 / Y_TICKS as f64;
        let y = coord(plot.y(value));
        let text_y = coord(plot.y(value) + 4.0);
        write_empty_element(
            xml,
            "line",
            &[
                ("x1", tick_start.as_str()),
                ("y1", y.as_str()),
                ("x2", left.as_str()),
                ("y2", y.as_str()),
            ],
        )?;
        write_text_element_with(
            xml,
            "text",
            &[
                ("x", label_x.as_str()),
                ("y", text_y.as_str()),
                ("text-anchor", "end"),
                ("stroke", "none"),
            ],
            &tick_label(value),
        )?;
    }
    end_element(xml, "g")
}

fn write_labels<W: Write>(xml: &mut Writer<W>, figure: &Figure) -> Result<()> {
    let center_x = coord((Plot::left() + Plot::right()) / 2.0);
    let center_y = coord((Plot::top() + Plot::bottom()) / 2.0);
    let title_y = coord(MARGIN_TOP / 2.0 + 6.0);
    let x_label_y = coord(HEIGHT - 16.0);
    let y_label_x = "18";
    let rotate = format!("rotate(-90 {y_label_x} {center_y})");

    write_text_element_with(
        xml,
        "text",
        &[
            ("class", "title"),
            ("x", center_x.as_str()),
            ("y", title_y.as_str()),
            ("text-anchor", "middle"),
            ("font-size", "16"),
            ("font-weight", "bold"),
        ],
        figure.spec.title,
    )?;
    write_text_element_with(
        xml,
        "text",
        &[
            ("class", "x-label"),
            ("x", center_x.as_str()),
            ("y", x_label_y.as_str()),
            ("text-anchor", "middle"),
            ("font-size", "13"),
        ],
        figure.spec.x_label,
    )?;
    write_text_element_with(
        xml,
        "text",
        &[
            ("class", "y-label"),
            ("x", y_label_x),
            ("y", center_y.as_str()),
            ("text-anchor", "middle"),
            ("font-size", "13"),
            ("transform", rotate.as_str()),
        ],
        figure.spec.y_label,
    )
}
