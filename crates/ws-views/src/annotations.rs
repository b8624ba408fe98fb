//! Narrative annotations placed by pattern-matching the filtered data
//!
//! Anchors describe qualitative patterns ("an upper-middle-income record
//! with a high incidence rate"), not country names, so the story text
//! survives dataset substitution. No matching record means the annotation
//! is silently skipped.

use ws_data::{IncomeTier, Observation};

use crate::scenes::Field;

/// Criteria selecting a representative record for one annotation
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeAnchor {
    pub text: &'static str,
    pub tier: Option<IncomeTier>,
    pub metric: Field,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NarrativeAnchor {
    fn matches(&self, obs: &Observation) -> bool {
        if let Some(tier) = self.tier {
            if obs.income != tier {
                return false;
            }
        }
        let value = match self.metric.get(obs) {
            Some(value) => value,
            None => return false,
        };
        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return false;
            }
        }
        true
    }

    /// First record satisfying the pattern, in data order
    pub fn find<'a>(&self, data: &[&'a Observation]) -> Option<&'a Observation> {
        data.iter().copied().find(|obs| self.matches(obs))
    }
}
