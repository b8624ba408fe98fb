//! Declarative configuration of the three scenes

use ws_core::{EducationMetric, SceneId};
use ws_data::{IncomeTier, Observation};

use crate::annotations::NarrativeAnchor;
use crate::scales::ScaleKind;

/// A plottable indicator field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    IncomePerCapita,
    HivRate,
    Literacy,
    SecondaryEnrollment,
    CondomUse,
    LifeExp,
}

impl Field {
    pub fn get(&self, obs: &Observation) -> Option<f64> {
        match self {
            Field::IncomePerCapita => obs.income_per_capita,
            Field::HivRate => obs.hiv_rate,
            Field::Literacy => obs.literacy,
            Field::SecondaryEnrollment => obs.enrollment_secondary,
            Field::CondomUse => obs.condom_use,
            Field::LifeExp => obs.life_exp,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::IncomePerCapita => "Income per capita (US$)",
            Field::HivRate => "HIV incidence (per 1,000)",
            Field::Literacy => "Adult literacy (%)",
            Field::SecondaryEnrollment => "Secondary enrollment (%)",
            Field::CondomUse => "Condom use (%)",
            Field::LifeExp => "Life expectancy (years)",
        }
    }
}

/// One plot axis: which field, on which scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpec {
    pub field: Field,
    pub scale: ScaleKind,
}

/// Everything that distinguishes one scene from another
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSpec {
    pub id: SceneId,
    pub subtitle: &'static str,
    pub x: AxisSpec,
    pub y: AxisSpec,
    pub trend_line: bool,
    pub show_income_filter: bool,
    pub show_metric_toggle: bool,
    pub anchors: Vec<NarrativeAnchor>,
}

/// Build the spec for a scene, honoring the scene's education-metric choice
pub fn scene_spec(id: SceneId, metric: EducationMetric) -> SceneSpec {
    match id {
        SceneId::Wealth => SceneSpec {
            id,
            subtitle: "National income does not buy its way out of the epidemic",
            x: AxisSpec {
                field: Field::IncomePerCapita,
                scale: ScaleKind::Log,
            },
            y: AxisSpec {
                field: Field::HivRate,
                scale: ScaleKind::Sqrt,
            },
            trend_line: false,
            show_income_filter: false,
            show_metric_toggle: false,
            anchors: vec![
                NarrativeAnchor {
                    text: "Incidence stays high even in upper-middle-income countries",
                    tier: Some(IncomeTier::UpperMiddle),
                    metric: Field::HivRate,
                    min: Some(5.0),
                    max: None,
                },
                NarrativeAnchor {
                    text: "The lowest incomes are not always the hardest hit",
                    tier: Some(IncomeTier::Low),
                    metric: Field::HivRate,
                    min: None,
                    max: Some(0.1),
                },
            ],
        },
        SceneId::Education => SceneSpec {
            id,
            subtitle: "Schooling tracks with lower incidence",
            x: AxisSpec {
                field: match metric {
                    EducationMetric::Literacy => Field::Literacy,
                    EducationMetric::SecondaryEnrollment => Field::SecondaryEnrollment,
                },
                scale: ScaleKind::Linear,
            },
            y: AxisSpec {
                field: Field::HivRate,
                scale: ScaleKind::Sqrt,
            },
            trend_line: true,
            show_income_filter: false,
            show_metric_toggle: true,
            anchors: vec![NarrativeAnchor {
                text: "High literacy with high incidence: schooling is not the whole story",
                tier: None,
                metric: Field::Literacy,
                min: Some(90.0),
                max: None,
            }],
        },
        SceneId::Prevention => SceneSpec {
            id,
            subtitle: "Where condom use is common, new infections are rare",
            x: AxisSpec {
                field: Field::CondomUse,
                scale: ScaleKind::Linear,
            },
            y: AxisSpec {
                field: Field::HivRate,
                scale: ScaleKind::Sqrt,
            },
            trend_line: true,
            show_income_filter: true,
            show_metric_toggle: false,
            anchors: vec![NarrativeAnchor {
                text: "Prevention coverage above 60% pairs with low incidence",
                tier: None,
                metric: Field::CondomUse,
                min: Some(60.0),
                max: None,
            }],
        },
    }
}
