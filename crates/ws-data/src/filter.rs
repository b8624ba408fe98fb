//! Pure filtering over the loaded dataset

use crate::observation::{IncomeTier, Observation};

/// Filter criteria for one render pass; `None` means "all"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub year: Option<u16>,
    pub region: Option<String>,
    pub income: Option<IncomeTier>,
}

impl FilterCriteria {
    pub fn year(year: u16) -> Self {
        Self {
            year: Some(year),
            ..Default::default()
        }
    }

    fn matches(&self, obs: &Observation) -> bool {
        if let Some(year) = self.year {
            if obs.year != year {
                return false;
            }
        }
        if let Some(region) = &self.region {
            if &obs.region != region {
                return false;
            }
        }
        if let Some(income) = self.income {
            if obs.income != income {
                return false;
            }
        }
        true
    }
}

/// Apply criteria to the dataset, preserving input order.
///
/// After the categorical match, records lacking both anchor indicators
/// (income per capita, life expectancy) are dropped.
pub fn apply<'a>(data: &'a [Observation], criteria: &FilterCriteria) -> Vec<&'a Observation> {
    data.iter()
        .filter(|obs| criteria.matches(obs) && obs.is_viable())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DatasetStore;

    fn obs(country: &str, year: u16, region: &str, income: IncomeTier) -> Observation {
        Observation {
            country: country.to_string(),
            code: Some(country[..3].to_ascii_uppercase()),
            year,
            region: region.to_string(),
            income,
            income_per_capita: Some(1000.0),
            hiv_rate: Some(1.0),
            literacy: None,
            enrollment_secondary: None,
            condom_use: None,
            population: Some(1_000_000.0),
            life_exp: Some(60.0),
        }
    }

    #[test]
    fn test_output_is_subset_satisfying_criteria() {
        let data = vec![
            obs("Kenya", 2016, "Sub-Saharan Africa", IncomeTier::LowerMiddle),
            obs("Kenya", 2021, "Sub-Saharan Africa", IncomeTier::LowerMiddle),
            obs("Norway", 2021, "Europe & Central Asia", IncomeTier::High),
        ];
        let criteria = FilterCriteria {
            year: Some(2021),
            region: Some("Sub-Saharan Africa".to_string()),
            income: None,
        };
        let out = apply(&data, &criteria);
        assert_eq!(out.len(), 1);
        for record in &out {
            assert!(data.iter().any(|d| d == *record));
            assert_eq!(record.year, 2021);
            assert_eq!(record.region, "Sub-Saharan Africa");
        }
    }

    #[test]
    fn test_unset_criteria_pass_everything() {
        let data = vec![
            obs("Kenya", 2016, "Sub-Saharan Africa", IncomeTier::LowerMiddle),
            obs("Norway", 2021, "Europe & Central Asia", IncomeTier::High),
        ];
        assert_eq!(apply(&data, &FilterCriteria::default()).len(), 2);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let data = vec![
            obs("Kenya", 2016, "Sub-Saharan Africa", IncomeTier::LowerMiddle),
            obs("Kenya", 2021, "Sub-Saharan Africa", IncomeTier::LowerMiddle),
            obs("Norway", 2021, "Europe & Central Asia", IncomeTier::High),
        ];
        let criteria = FilterCriteria::year(2021);
        let once: Vec<Observation> = apply(&data, &criteria).into_iter().cloned().collect();
        let twice: Vec<Observation> = apply(&once, &criteria).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_minimum_viability_rule() {
        let mut hollow = obs("Ghostland", 2021, "Nowhere", IncomeTier::Low);
        hollow.income_per_capita = None;
        hollow.life_exp = None;
        let mut half = obs("Halfland", 2021, "Nowhere", IncomeTier::Low);
        half.income_per_capita = None; // life_exp still present

        let data = vec![hollow, half];
        let out = apply(&data, &FilterCriteria::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country, "Halfland");
    }

    #[test]
    fn test_order_preserved() {
        let data = vec![
            obs("Aland", 2021, "Nowhere", IncomeTier::Low),
            obs("Bland", 2021, "Nowhere", IncomeTier::Low),
            obs("Cland", 2021, "Nowhere", IncomeTier::Low),
        ];
        let out = apply(&data, &FilterCriteria::default());
        let names: Vec<&str> = out.iter().map(|o| o.country.as_str()).collect();
        assert_eq!(names, ["Aland", "Bland", "Cland"]);
    }

    #[test]
    fn test_end_to_end_anchor_countries() {
        let store = DatasetStore::fallback();

        let by_year = apply(store.observations(), &FilterCriteria::year(2021));
        assert!(by_year.iter().any(|o| o.country == "South Africa"));
        assert!(by_year.iter().any(|o| o.country == "Rwanda"));

        let by_region = apply(
            store.observations(),
            &FilterCriteria {
                year: Some(2021),
                region: Some("Sub-Saharan Africa".to_string()),
                income: None,
            },
        );
        assert!(by_region.iter().any(|o| o.country == "South Africa"));
        assert!(by_region.iter().any(|o| o.country == "Rwanda"));

        let high_income = apply(
            store.observations(),
            &FilterCriteria {
                year: Some(2021),
                region: None,
                income: Some(IncomeTier::High),
            },
        );
        assert!(!high_income.iter().any(|o| o.country == "South Africa"));
        assert!(!high_income.iter().any(|o| o.country == "Rwanda"));
    }
}
