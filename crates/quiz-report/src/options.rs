//! Configuration options for dashboard rendering.

/// Default page title.
pub const DEFAULT_TITLE: &str = "Análise de Notas do Questionário - Comparação de Vários Arquivos";

/// Default histogram bin count.
pub const DEFAULT_BINS: usize = 10;

/// Default number of points the density curve is evaluated at.
pub const DEFAULT_DENSITY_POINTS: usize = 200;

/// Options for [`render_dashboard`](crate::render_dashboard).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Page heading and `<title>`.
    pub title: String,
    /// Histogram bins per figure.
    pub bins: usize,
    pub density_points: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            bins: DEFAULT_BINS,
            density_points: DEFAULT_DENSITY_POINTS,
        }
    }
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the bin count; zero is clamped to one.
    #[must_use]
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins.max(1);
        self
    }

    #[must_use]
    pub fn with_density_points(mut self, points: usize) -> Self {
        self.density_points = points;
        self
    }
}
