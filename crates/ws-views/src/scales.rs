//! Visual-encoding scales derived from the filtered data's actual extent

use egui::Color32;
use ws_data::IncomeTier;

/// Minimum mark radius in pixels
pub const MIN_RADIUS: f32 = 3.0;
/// Maximum mark radius in pixels
pub const MAX_RADIUS: f32 = 25.0;
/// Radius for records that report no population
pub const DEFAULT_RADIUS: f32 = 4.0;

/// Income scales are floored here to avoid a degenerate log domain
pub const LOG_FLOOR: f64 = 100.0;

/// How an axis maps domain values to a normalized [0, 1] position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    /// For income: log-10 position, domain floored at [`LOG_FLOOR`]
    Log,
    /// For rate-like quantities: area, not radius, tracks magnitude
    Sqrt,
}

/// A position scale over the filtered data's min/max
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionScale {
    kind: ScaleKind,
    min: f64,
    max: f64,
}

impl PositionScale {
    /// Build from the filtered values; `None` when no value is present.
    /// A non-empty input always yields finite bounds.
    pub fn build<I: IntoIterator<Item = f64>>(kind: ScaleKind, values: I) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            if !v.is_finite() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
        if !min.is_finite() || !max.is_finite() {
            return None;
        }

        if kind == ScaleKind::Log {
            min = min.max(LOG_FLOOR);
            max = max.max(LOG_FLOOR);
        }
        if kind == ScaleKind::Sqrt {
            min = min.max(0.0);
            max = max.max(0.0);
        }
        // Pad a degenerate single-value domain so normalize stays defined
        if (max - min).abs() < f64::EPSILON {
            let pad = (min.abs() * 0.1).max(1.0);
            min -= pad;
            max += pad;
            if kind == ScaleKind::Log {
                min = min.max(LOG_FLOOR * 0.5);
            }
            if kind == ScaleKind::Sqrt {
                min = min.max(0.0);
            }
        }

        Some(Self { kind, min, max })
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Map a domain value to [0, 1]
    pub fn normalize(&self, value: f64) -> f64 {
        let t = match self.kind {
            ScaleKind::Linear => (value - self.min) / (self.max - self.min),
            ScaleKind::Log => {
                let v = value.max(LOG_FLOOR);
                (v.ln() - self.min.ln()) / (self.max.ln() - self.min.ln())
            }
            ScaleKind::Sqrt => {
                let v = value.max(0.0);
                (v.sqrt() - self.min.sqrt()) / (self.max.sqrt() - self.min.sqrt())
            }
        };
        t.clamp(0.0, 1.0)
    }

    /// Tick positions as (normalized position, domain value) pairs
    pub fn ticks(&self) -> Vec<(f64, f64)> {
        match self.kind {
            ScaleKind::Log => self.log_ticks(),
            ScaleKind::Linear | ScaleKind::Sqrt => self.nice_ticks(5),
        }
    }

    fn log_ticks(&self) -> Vec<(f64, f64)> {
        let mut ticks = Vec::new();
        let first = self.min.log10().ceil() as i32;
        let last = self.max.log10().floor() as i32;
        for exp in first..=last {
            let value = 10f64.powi(exp);
            ticks.push((self.normalize(value), value));
        }
        // A single decade reads poorly; fill in 2x/5x subdivisions
        if ticks.len() < 3 {
            for exp in (first - 1)..=last {
                for mult in [2.0, 5.0] {
                    let value = mult * 10f64.powi(exp);
                    if value >= self.min && value <= self.max {
                        ticks.push((self.normalize(value), value));
                    }
                }
            }
            ticks.sort_by(|a, b| a.0.total_cmp(&b.0));
        }
        ticks
    }

    fn nice_ticks(&self, target: usize) -> Vec<(f64, f64)> {
        let range = self.max - self.min;
        let raw_step = range / target as f64;
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let residual = raw_step / magnitude;
        let step = if residual < 1.5 {
            magnitude
        } else if residual < 3.0 {
            2.0 * magnitude
        } else if residual < 7.0 {
            5.0 * magnitude
        } else {
            10.0 * magnitude
        };

        let mut ticks = Vec::new();
        let mut value = (self.min / step).ceil() * step;
        while value <= self.max + step * 1e-9 {
            ticks.push((self.normalize(value), value));
            value += step;
        }
        ticks
    }
}

/// Radius scale: circle area proportional to population, clamped to the
/// pixel range [MIN_RADIUS, MAX_RADIUS].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    /// Pixels per sqrt(person), chosen so the largest population hits
    /// MAX_RADIUS exactly
    factor: f64,
}

impl RadiusScale {
    pub fn build<I: IntoIterator<Item = f64>>(populations: I) -> Option<Self> {
        let max_pop = populations
            .into_iter()
            .filter(|p| p.is_finite() && *p > 0.0)
            .fold(f64::NEG_INFINITY, f64::max);
        if !max_pop.is_finite() {
            return None;
        }
        Some(Self {
            factor: MAX_RADIUS as f64 / max_pop.sqrt(),
        })
    }

    pub fn radius(&self, population: Option<f64>) -> f32 {
        match population {
            Some(pop) if pop > 0.0 => {
                ((pop.sqrt() * self.factor) as f32).clamp(MIN_RADIUS, MAX_RADIUS)
            }
            _ => DEFAULT_RADIUS,
        }
    }
}

/// Fixed income-tier palette, identical across scenes and renders so the
/// reader's learned color vocabulary carries through the whole story.
pub fn tier_color(tier: IncomeTier) -> Color32 {
    match tier {
        IncomeTier::Low => Color32::from_rgb(250, 100, 100),
        IncomeTier::LowerMiddle => Color32::from_rgb(250, 180, 80),
        IncomeTier::UpperMiddle => Color32::from_rgb(100, 220, 220),
        IncomeTier::High => Color32::from_rgb(100, 150, 250),
    }
}

/// Compact value labels for ticks and tooltips
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.0}k", value / 1_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else if abs >= 10.0 || (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_skips_scale_construction() {
        assert_eq!(PositionScale::build(ScaleKind::Linear, Vec::<f64>::new()), None);
        assert_eq!(RadiusScale::build(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_nonempty_input_yields_finite_bounds() {
        let scale = PositionScale::build(ScaleKind::Linear, [3.0, 9.0, 1.0]).unwrap();
        let (min, max) = scale.domain();
        assert!(min.is_finite() && max.is_finite());
        assert_eq!((min, max), (1.0, 9.0));
        assert!(scale.normalize(1.0) == 0.0 && scale.normalize(9.0) == 1.0);
    }

    #[test]
    fn test_single_value_domain_is_padded() {
        let scale = PositionScale::build(ScaleKind::Linear, [5.0]).unwrap();
        let (min, max) = scale.domain();
        assert!(max > min);
        assert!(scale.normalize(5.0).is_finite());
    }

    #[test]
    fn test_log_scale_floors_at_100() {
        let scale = PositionScale::build(ScaleKind::Log, [20.0, 50_000.0]).unwrap();
        assert_eq!(scale.domain().0, LOG_FLOOR);
        assert_eq!(scale.normalize(20.0), 0.0);
        assert_eq!(scale.normalize(50_000.0), 1.0);
    }

    #[test]
    fn test_sqrt_scale_normalization() {
        let scale = PositionScale::build(ScaleKind::Sqrt, [0.0, 16.0]).unwrap();
        assert_eq!(scale.normalize(0.0), 0.0);
        assert_eq!(scale.normalize(16.0), 1.0);
        // sqrt(4)/sqrt(16) = 0.5: half-way in area terms
        assert!((scale.normalize(4.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_radius_is_area_proportional() {
        let scale = RadiusScale::build([4_000_000.0, 1_000_000.0]).unwrap();
        let big = scale.radius(Some(4_000_000.0));
        let small = scale.radius(Some(1_000_000.0));
        assert!((big / small - 2.0).abs() < 1e-6);
        assert_eq!(big, MAX_RADIUS);
    }

    #[test]
    fn test_radius_clamped_and_defaulted() {
        let scale = RadiusScale::build([1.0, 1e12]).unwrap();
        assert_eq!(scale.radius(Some(1.0)), MIN_RADIUS);
        assert_eq!(scale.radius(Some(1e12)), MAX_RADIUS);
        assert_eq!(scale.radius(None), DEFAULT_RADIUS);
    }

    #[test]
    fn test_log_ticks_are_decades() {
        let scale = PositionScale::build(ScaleKind::Log, [150.0, 80_000.0]).unwrap();
        let values: Vec<f64> = scale.ticks().into_iter().map(|(_, v)| v).collect();
        assert!(values.contains(&1_000.0));
        assert!(values.contains(&10_000.0));
    }

    #[test]
    fn test_tier_colors_stable() {
        assert_eq!(
            tier_color(ws_data::IncomeTier::High),
            tier_color(ws_data::IncomeTier::High)
        );
        let distinct: std::collections::HashSet<_> = ws_data::IncomeTier::ALL
            .iter()
            .map(|t| tier_color(*t).to_array())
            .collect();
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(59_390_000.0), "59.4M");
        assert_eq!(format_compact(7_055.0), "7.1k");
        assert_eq!(format_compact(7.7), "7.70");
        assert_eq!(format_compact(62.0), "62");
    }
}
