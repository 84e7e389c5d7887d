//! Binning and kernel density estimation for the dashboard charts.

/// Largest half-range a histogram spans; keeps `max - min` finite.
const MAX_HALF_SPAN: f64 = f64::MAX / 2.0;

/// Equal-width histogram over the range of the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bins the finite values into `bins` equal-width bins over `[min, max]`.
    ///
    /// Every bin is half-open except the last, which includes `max`. A
    /// single distinct value is centred in a range one unit wide, and no
    /// values gives the range `[0, 1]` with all counts zero. `bins` of zero
    /// is treated as one. A range too wide to represent is clamped to
    /// `±f64::MAX / 2`, and values outside it fall into the end bins.
    pub fn compute(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

        let (mut lo, mut hi) = finite
            .iter()
            .fold(None, |range: Option<(f64, f64)>, &v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .unwrap_or((0.0, 1.0));
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        if !(hi - lo).is_finite() {
            lo = lo.max(-MAX_HALF_SPAN);
            hi = hi.min(MAX_HALF_SPAN);
        }

        let width = (hi - lo) / bins as f64;
        let mut edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        edges[bins] = hi;

        let mut counts = vec![0u64; bins];
        for v in finite {
            let idx = if v >= hi {
                bins - 1
            } else {
                (((v - lo) / width).floor() as usize).min(bins - 1)
            };
            counts[idx] += 1;
        }

        Self { edges, counts }
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(first), Some(last)) if !self.counts.is_empty() => {
                (last - first) / self.counts.len() as f64
            }
            _ => 0.0,
        }
    }

    pub fn range(&self) -> (f64, f64) {
        (
            self.edges.first().copied().unwrap_or(0.0),
            self.edges.last().copied().unwrap_or(1.0),
        )
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// A Gaussian kernel density estimate scaled to histogram counts.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    pub bandwidth: f64,
    /// `(x, expected count)` pairs, ascending in `x`.
    pub points: Vec<(f64, f64)>,
}

impl DensityCurve {
    /// Estimates the curve over the data range with Scott's rule bandwidth.
    ///
    /// Densities are multiplied by `n * bin_width` so the curve sits on the
    /// same scale as the histogram bars. Returns `None` for fewer than two
    /// finite values or zero variance.
    pub fn estimate(values: &[f64], bin_width: f64, grid_points: usize) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let n = finite.len();
        if n < 2 || grid_points < 2 {
            return None;
        }

        let n_f = n as f64;
        let mean = finite.iter().sum::<f64>() / n_f;
        let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n_f - 1.0);
        if variance <= 0.0 || !variance.is_finite() {
            return None;
        }
        let bandwidth = variance.sqrt() * n_f.powf(-0.2);

        let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let step = (hi - lo) / (grid_points - 1) as f64;
        let norm = 1.0 / (n_f * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
        let scale = n_f * bin_width;

        let points = (0..grid_points)
            .map(|i| {
                let x = lo + step * i as f64;
                let density: f64 = finite
                    .iter()
                    .map(|v| {
                        let z = (x - v) / bandwidth;
                        (-0.5 * z * z).exp()
                    })
                    .sum::<f64>()
                    * norm;
                (x, density * scale)
            })
            .collect();

        Some(Self { bandwidth, points })
    }

    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|(_, y)| *y).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_width_bins_with_closed_last_bin() {
        let hist = Histogram::compute(&[0.0, 1.0, 2.0, 3.0, 4.0, 10.0], 5);
        assert_eq!(hist.edges, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(hist.counts, vec![2, 2, 1, 0, 1]);
        assert_eq!(hist.bin_width(), 2.0);
        assert_eq!(hist.total(), 6);
    }

    #[test]
    fn test_single_value_is_centred() {
        let hist = Histogram::compute(&[50.0, 50.0], 10);
        assert_eq!(hist.range(), (49.5, 50.5));
        assert_eq!(hist.total(), 2);
        assert_eq!(hist.counts[5], 2);
    }

    #[test]
    fn test_no_values_gives_unit_range_and_zero_counts() {
        let hist = Histogram::compute(&[], 10);
        assert_eq!(hist.range(), (0.0, 1.0));
        assert_eq!(hist.bin_count(), 10);
        assert_eq!(hist.max_count(), 0);
    }

    #[test]
    fn test_non_finite_values_ignored() {
        let hist = Histogram::compute(&[f64::NAN, 1.0, f64::INFINITY, 3.0], 2);
        assert_eq!(hist.counts, vec![1, 1]);
    }

    #[test]
    fn test_extreme_range_keeps_finite_edges() {
        let hist = Histogram::compute(&[-1e308, 0.0, 1e308], 10);
        assert!(hist.edges.iter().all(|edge| edge.is_finite()));
        assert!(hist.bin_width().is_finite());
        assert_eq!(hist.total(), 3);
        assert_eq!(hist.counts[0], 1);
        assert_eq!(hist.counts[9], 1);
    }

    #[test]
    fn test_zero_bins_treated_as_one() {
        let hist = Histogram::compute(&[1.0, 2.0], 0);
        assert_eq!(hist.counts, vec![2]);
    }

    #[test]
    fn test_density_needs_two_distinct_values() {
        assert!(DensityCurve::estimate(&[1.0], 1.0, 200).is_none());
        assert!(DensityCurve::estimate(&[2.0, 2.0, 2.0], 1.0, 200).is_none());
    }

    #[test]
    fn test_density_scott_bandwidth_and_scale() {
        let values: Vec<f64> = (0..50i32).map(|i| f64::from(i) * 2.0).collect();
        let hist = Histogram::compute(&values, 10);
        let curve = DensityCurve::estimate(&values, hist.bin_width(), 200).unwrap();

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let sd = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt();
        assert!((curve.bandwidth - sd * n.powf(-0.2)).abs() < 1e-9);

        assert_eq!(curve.points.len(), 200);
        assert_eq!(curve.points[0].0, 0.0);
        assert!((curve.points[199].0 - 98.0).abs() < 1e-9);
        // Uniform data: the curve peaks near the per-bin count.
        let peak = curve.max_value();
        assert!(peak > 3.0 && peak < 7.0, "peak {peak}");
    }
}
