//! Controller state: the scene pointer plus each scene's sticky filters
//!
//! All mutation goes through [`StoryState::reduce`] with an explicit
//! [`Action`], so interaction handlers stay single-writer and the state
//! transitions are testable without a UI.

use serde::{Deserialize, Serialize};

use ws_data::{FilterCriteria, IncomeTier};

use crate::scene::SceneId;

/// Which education indicator the Education scene plots on x
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationMetric {
    Literacy,
    SecondaryEnrollment,
}

impl EducationMetric {
    pub fn label(self) -> &'static str {
        match self {
            EducationMetric::Literacy => "Adult literacy",
            EducationMetric::SecondaryEnrollment => "Secondary enrollment",
        }
    }
}

/// One scene's filter-control values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFilters {
    pub year: Option<u16>,
    /// `None` means "all regions"
    pub region: Option<String>,
    pub metric: EducationMetric,
    /// `None` means "all income groups"
    pub income: Option<IncomeTier>,
}

impl Default for SceneFilters {
    fn default() -> Self {
        Self {
            year: None,
            region: None,
            metric: EducationMetric::Literacy,
            income: None,
        }
    }
}

impl SceneFilters {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            year: self.year,
            region: self.region.clone(),
            income: self.income,
        }
    }
}

/// Controller actions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(SceneId),
    /// Direct jump via a scene indicator; out-of-range is a no-op
    JumpTo(usize),
    Next,
    Previous,
    SetYear(SceneId, u16),
    SetRegion(SceneId, Option<String>),
    SetMetric(SceneId, EducationMetric),
    SetIncome(SceneId, Option<IncomeTier>),
}

/// The single piece of session state
#[derive(Debug, Clone, PartialEq)]
pub struct StoryState {
    pub scene: SceneId,
    filters: [SceneFilters; 3],
}

impl StoryState {
    /// Fresh state with every scene's year seeded to the dataset's latest
    pub fn new(latest_year: Option<u16>) -> Self {
        let mut filters = SceneFilters::default();
        filters.year = latest_year;
        Self {
            scene: SceneId::Wealth,
            filters: [filters.clone(), filters.clone(), filters],
        }
    }

    pub fn filters(&self, scene: SceneId) -> &SceneFilters {
        &self.filters[scene.index()]
    }

    /// Pure update step: consumes the state, returns the next one
    pub fn reduce(mut self, action: Action) -> StoryState {
        match action {
            Action::Navigate(scene) => self.scene = scene,
            Action::JumpTo(index) => {
                if let Some(scene) = SceneId::from_index(index) {
                    self.scene = scene;
                } else {
                    tracing::warn!(index, "Ignoring jump to out-of-range scene");
                }
            }
            Action::Next => self.scene = self.scene.next(),
            Action::Previous => self.scene = self.scene.previous(),
            Action::SetYear(scene, year) => self.filters[scene.index()].year = Some(year),
            Action::SetRegion(scene, region) => self.filters[scene.index()].region = region,
            Action::SetMetric(scene, metric) => self.filters[scene.index()].metric = metric,
            Action::SetIncome(scene, income) => self.filters[scene.index()].income = income,
        }
        self
    }
}
