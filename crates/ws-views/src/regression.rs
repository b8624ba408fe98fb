//! Ordinary least-squares trend line over the plotted dimensions

/// Result of an OLS fit, y = slope * x + intercept
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a trend line over (x, y) pairs.
///
/// Skipped (returns `None`) for fewer than 3 points, where a regression is
/// not meaningful, and for a degenerate zero-variance x.
pub fn ols_fit(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 3 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    for (x, y) in points {
        ss_xx += (x - mean_x) * (x - mean_x);
        ss_xy += (x - mean_x) * (y - mean_y);
    }
    if ss_xx == 0.0 {
        return None;
    }

    let slope = ss_xy / ss_xx;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// X-interval over which the fitted line stays inside [y_min, y_max],
/// intersected with [x_min, x_max].
///
/// The fit is affine, so this interval is contiguous; sampling inside it
/// yields a gap-free polyline whose endpoints land exactly on the plotted
/// band. `None` when the line misses the band entirely.
pub fn clip_to_band(
    fit: &LinearFit,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) -> Option<(f64, f64)> {
    if fit.slope == 0.0 {
        let inside = fit.intercept >= y_min && fit.intercept <= y_max;
        return inside.then_some((x_min, x_max));
    }

    let x_at = |y: f64| (y - fit.intercept) / fit.slope;
    let (mut lo, mut hi) = (x_at(y_min), x_at(y_max));
    if lo > hi {
        std::mem::swap(&mut lo, &mut hi);
    }
    let lo = lo.max(x_min);
    let hi = hi.min(x_max);
    (lo < hi).then_some((lo, hi))
}

/// Sample the fitted line across the x domain.
///
/// The line is drawn as a sampled polyline and each sample goes through the
/// same position scales as the marks, so it stays visually correct under
/// non-linear scales.
pub fn sample_line(fit: &LinearFit, x_min: f64, x_max: f64, samples: usize) -> Vec<(f64, f64)> {
    let samples = samples.max(2);
    (0..samples)
        .map(|i| {
            let x = x_min + (x_max - x_min) * i as f64 / (samples - 1) as f64;
            (x, fit.predict(x))
        })
        .collect()
}
