//! The three statistic histograms shown on the dashboard.

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::debug;

use quiz_model::StatColumn;
use quiz_transform::frame::{f64_values, has_column};

use crate::histogram::{DensityCurve, Histogram};
use crate::options::ReportOptions;

/// Y-axis label shared by every figure.
pub const FREQUENCY_LABEL: &str = "Frequência";

/// Column and labels for one dashboard figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureSpec {
    pub column: StatColumn,
    /// Section heading above the chart.
    pub subheading: &'static str,
    /// Title drawn inside the chart.
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

/// Dashboard figures in display order: mean, median, standard deviation.
pub const FIGURES: [FigureSpec; 3] = [
    FigureSpec {
        column: StatColumn::FirstAttemptMean,
        subheading: "Distribuição da Nota Média das Primeiras Tentativas",
        title: "Distribuição da Nota Média das Primeiras Tentativas",
        x_label: "Nota Média (%)",
        y_label: FREQUENCY_LABEL,
    },
    FigureSpec {
        column: StatColumn::FirstAttemptMedian,
        subheading: "Distribuição da Nota Mediana (Primeira Tentativa)",
        title: "Distribuição da Nota Mediana",
        x_label: "Nota Mediana (%)",
        y_label: FREQUENCY_LABEL,
    },
    FigureSpec {
        column: StatColumn::FirstAttemptStdDev,
        subheading: "Distribuição do Desvio Padrão (Primeira Tentativa)",
        title: "Distribuição do Desvio Padrão",
        x_label: "Desvio Padrão (%)",
        y_label: FREQUENCY_LABEL,
    },
];

/// A figure's computed chart data.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub spec: FigureSpec,
    pub histogram: Histogram,
    pub density: Option<DensityCurve>,
    /// Non-missing values that went into the chart.
    pub sample_size: usize,
}

impl Figure {
    /// Builds the chart for `spec` from the combined frame.
    ///
    /// Nulls are dropped. An absent column behaves like an all-null one and
    /// gives a zero-count histogram.
    pub fn build(frame: &DataFrame, spec: FigureSpec, options: &ReportOptions) -> Result<Self> {
        let name = spec.column.column_name();
        let values: Vec<f64> = if has_column(frame, name) {
            f64_values(frame, name)
                .with_context(|| format!("read column {name}"))?
                .into_iter()
                .flatten()
                .filter(|v| v.is_finite())
                .collect()
        } else {
            Vec::new()
        };

        let histogram = Histogram::compute(&values, options.bins);
        let density = DensityCurve::estimate(&values, histogram.bin_width(), options.density_points);
        debug!(
            column = name,
            values = values.len(),
            has_density = density.is_some(),
            "built figure"
        );
        Ok(Self {
            spec,
            histogram,
            density,
            sample_size: values.len(),
        })
    }
}

/// Builds every dashboard figure in display order.
pub fn build_figures(frame: &DataFrame, options: &ReportOptions) -> Result<Vec<Figure>> {
    FIGURES
        .iter()
        .map(|spec| Figure::build(frame, *spec, options))
        .collect()
}
