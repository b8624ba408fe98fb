//! Pure "filtered data + encodings -> scene description" step
//!
//! Everything here is free of the rendering surface: the scene view is a
//! thin adapter that applies a [`SceneFrame`] to egui_plot. Positions are
//! normalized to [0, 1] on both axes; ticks carry the domain values.

use egui::Color32;

use ws_data::{IncomeTier, Observation};

use crate::regression::{self, LinearFit};
use crate::scales::{tier_color, PositionScale, RadiusScale, DEFAULT_RADIUS};
use crate::scenes::SceneSpec;

/// Samples per trend polyline
const TREND_SAMPLES: usize = 40;

/// One mark, fully encoded
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    /// Stable key: country code (name fallback); suffixed with the year
    /// only when the same country appears more than once in the view
    pub key: String,
    /// Normalized position
    pub x: f64,
    pub y: f64,
    pub radius: f32,
    pub color: Color32,
    pub info: MarkInfo,
}

/// Tooltip payload for a mark
#[derive(Debug, Clone, PartialEq)]
pub struct MarkInfo {
    pub country: String,
    pub year: u16,
    pub tier: IncomeTier,
    pub x_value: f64,
    pub y_value: f64,
    pub population: Option<f64>,
    pub life_exp: Option<f64>,
}

/// A placed narrative annotation
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: &'static str,
}

/// The declarative description of one rendered scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub marks: Vec<Mark>,
    /// (normalized position, domain value) per axis
    pub x_ticks: Vec<(f64, f64)>,
    pub y_ticks: Vec<(f64, f64)>,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Normalized trend polyline, present when the scene asks for one and
    /// at least 3 records carry both plotted values
    pub trend: Option<Vec<[f64; 2]>>,
    pub annotations: Vec<Annotation>,
    /// Tiers present, for the legend
    pub tiers: Vec<IncomeTier>,
}

/// Build the frame for one scene from already-filtered records.
///
/// Records missing either plotted value are excluded from this scene only.
/// Returns `None` when nothing is plottable, which the adapter renders as
/// the "no data for current filters" placeholder.
pub fn build_frame(filtered: &[&Observation], spec: &SceneSpec) -> Option<SceneFrame> {
    let plottable: Vec<(&Observation, f64, f64)> = filtered
        .iter()
        .filter_map(|obs| {
            let x = spec.x.field.get(obs)?;
            let y = spec.y.field.get(obs)?;
            Some((*obs, x, y))
        })
        .collect();

    if plottable.is_empty() {
        return None;
    }

    let x_scale = PositionScale::build(spec.x.scale, plottable.iter().map(|(_, x, _)| *x))?;
    let y_scale = PositionScale::build(spec.y.scale, plottable.iter().map(|(_, _, y)| *y))?;
    let radius_scale = RadiusScale::build(plottable.iter().filter_map(|(o, _, _)| o.population));

    // A country normally appears once per view; when years are mixed the
    // key gets a year suffix so marks stay distinct.
    let mut key_counts: ahash::AHashMap<&str, usize> = ahash::AHashMap::new();
    for (obs, _, _) in &plottable {
        *key_counts.entry(obs.key()).or_default() += 1;
    }

    let marks: Vec<Mark> = plottable
        .iter()
        .map(|(obs, x, y)| {
            let base = obs.key();
            let key = if key_counts[base] > 1 {
                format!("{}@{}", base, obs.year)
            } else {
                base.to_string()
            };
            Mark {
                key,
                x: x_scale.normalize(*x),
                y: y_scale.normalize(*y),
                radius: radius_scale
                    .map(|rs| rs.radius(obs.population))
                    .unwrap_or(DEFAULT_RADIUS),
                color: tier_color(obs.income),
                info: MarkInfo {
                    country: obs.country.clone(),
                    year: obs.year,
                    tier: obs.income,
                    x_value: *x,
                    y_value: *y,
                    population: obs.population,
                    life_exp: obs.life_exp,
                },
            }
        })
        .collect();

    let trend = if spec.trend_line {
        build_trend(&plottable, &x_scale, &y_scale)
    } else {
        None
    };

    let annotations = spec
        .anchors
        .iter()
        .filter_map(|anchor| {
            let matched = anchor.find(filtered)?;
            let x = spec.x.field.get(matched)?;
            let y = spec.y.field.get(matched)?;
            Some(Annotation {
                x: x_scale.normalize(x),
                y: y_scale.normalize(y),
                text: anchor.text,
            })
        })
        .collect();

    let mut tiers: Vec<IncomeTier> = Vec::new();
    for (obs, _, _) in &plottable {
        if !tiers.contains(&obs.income) {
            tiers.push(obs.income);
        }
    }
    tiers.sort();

    Some(SceneFrame {
        marks,
        x_ticks: x_scale.ticks(),
        y_ticks: y_scale.ticks(),
        x_label: spec.x.field.label(),
        y_label: spec.y.field.label(),
        trend,
        annotations,
        tiers,
    })
}

fn build_trend(
    plottable: &[(&Observation, f64, f64)],
    x_scale: &PositionScale,
    y_scale: &PositionScale,
) -> Option<Vec<[f64; 2]>> {
    let pairs: Vec<(f64, f64)> = plottable.iter().map(|(_, x, y)| (*x, *y)).collect();
    let fit: LinearFit = regression::ols_fit(&pairs)?;

    // Clip the fitted line to the plotted band analytically so the drawn
    // segment is contiguous and its endpoints land exactly on the edges.
    let (x_min, x_max) = x_scale.domain();
    let (y_min, y_max) = y_scale.domain();
    let (lo, hi) = regression::clip_to_band(&fit, x_min, x_max, y_min, y_max)?;

    let line: Vec<[f64; 2]> = regression::sample_line(&fit, lo, hi, TREND_SAMPLES)
        .into_iter()
        .map(|(x, y)| [x_scale.normalize(x), y_scale.normalize(y)])
        .collect();
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ws_core::{EducationMetric, SceneId};
    use ws_data::{apply, DatasetStore, FilterCriteria};

    use crate::scenes::scene_spec;

    fn frame_for(scene: SceneId, criteria: &FilterCriteria) -> Option<SceneFrame> {
        let store = DatasetStore::fallback();
        let filtered = apply(store.observations(), criteria);
        build_frame(&filtered, &scene_spec(scene, EducationMetric::Literacy))
    }

    #[test]
    fn test_empty_filter_result_yields_no_frame() {
        let criteria = FilterCriteria::year(1980);
        assert_eq!(frame_for(SceneId::Wealth, &criteria), None);
    }

    #[test]
    fn test_positions_are_normalized_and_finite() {
        let frame = frame_for(SceneId::Wealth, &FilterCriteria::year(2021)).unwrap();
        assert!(!frame.marks.is_empty());
        for mark in &frame.marks {
            assert!((0.0..=1.0).contains(&mark.x), "x = {}", mark.x);
            assert!((0.0..=1.0).contains(&mark.y), "y = {}", mark.y);
            assert!(mark.radius.is_finite());
        }
    }

    #[test]
    fn test_records_missing_plotted_field_are_excluded() {
        // Prevention plots condom use; Afghanistan never reports it.
        let frame = frame_for(SceneId::Prevention, &FilterCriteria::year(2021)).unwrap();
        assert!(!frame.marks.iter().any(|m| m.info.country == "Afghanistan"));
        // But the record is still viable elsewhere.
        let wealth = frame_for(SceneId::Wealth, &FilterCriteria::year(2021)).unwrap();
        assert!(wealth.marks.iter().any(|m| m.info.country == "Afghanistan"));
    }

    #[test]
    fn test_trend_present_for_prevention_scene() {
        let frame = frame_for(SceneId::Prevention, &FilterCriteria::year(2021)).unwrap();
        let trend = frame.trend.expect("enough points for a regression");
        assert!(trend.len() >= 2);
        for [x, y] in &trend {
            assert!((0.0..=1.0).contains(x));
            assert!((0.0..=1.0).contains(y));
        }
    }

    #[test]
    fn test_trend_polyline_is_contiguous() {
        // Clipping happens before sampling, so no interior sample is ever
        // dropped and the polyline never jumps across a gap.
        let frame = frame_for(SceneId::Prevention, &FilterCriteria::year(2021)).unwrap();
        let trend = frame.trend.expect("enough points for a regression");
        assert_eq!(trend.len(), TREND_SAMPLES);
        for pair in trend.windows(2) {
            assert!(pair[1][0] > pair[0][0]);
        }
    }

    #[test]
    fn test_trend_skipped_for_wealth_scene() {
        let frame = frame_for(SceneId::Wealth, &FilterCriteria::year(2021)).unwrap();
        assert_eq!(frame.trend, None);
    }

    #[test]
    fn test_mixed_years_get_composite_keys() {
        let frame = frame_for(SceneId::Wealth, &FilterCriteria::default()).unwrap();
        let zaf: Vec<&Mark> = frame
            .marks
            .iter()
            .filter(|m| m.info.country == "South Africa")
            .collect();
        assert!(zaf.len() > 1);
        assert!(zaf.iter().all(|m| m.key.starts_with("ZAF@")));
    }

    #[test]
    fn test_single_year_keys_are_plain_codes() {
        let frame = frame_for(SceneId::Wealth, &FilterCriteria::year(2021)).unwrap();
        assert!(frame.marks.iter().any(|m| m.key == "ZAF"));
    }

    #[test]
    fn test_annotation_placed_near_matched_mark() {
        let frame = frame_for(SceneId::Wealth, &FilterCriteria::year(2021)).unwrap();
        assert!(!frame.annotations.is_empty());
        for annotation in &frame.annotations {
            assert!((0.0..=1.0).contains(&annotation.x));
            assert!((0.0..=1.0).contains(&annotation.y));
        }
    }
}
