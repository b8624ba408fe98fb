//! The dataset store: loaded once at startup, read-only afterwards

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use indexmap::IndexSet;
use once_cell::sync::Lazy;

use crate::observation::{IncomeTier, Observation};
use crate::DataError;

/// Embedded sample shipped with the binary, used when the external
/// resource cannot be loaded. Same column layout as the real dataset.
const FALLBACK_CSV: &str = include_str!("../data/fallback.csv");

static FALLBACK_STORE: Lazy<DatasetStore> = Lazy::new(|| {
    parse_reader(FALLBACK_CSV.as_bytes()).expect("embedded fallback sample must parse")
});

/// Immutable store of all observations plus derived categorical sets
///
/// Loading is all-or-nothing: a malformed row fails the whole load and the
/// caller falls back to the embedded sample instead.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    observations: Vec<Observation>,
    regions: Vec<String>,
    tiers: Vec<IncomeTier>,
    /// Distinct years, sorted descending
    years: Vec<u16>,
}

impl DatasetStore {
    /// Load a CSV dataset resource from disk
    pub async fn load(path: PathBuf) -> Result<Self, DataError> {
        tokio::task::spawn_blocking(move || parse_file(&path)).await?
    }

    /// The embedded fallback dataset (degraded coverage, same shape)
    pub fn fallback() -> Self {
        FALLBACK_STORE.clone()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Distinct regions, in first-seen order
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Distinct income tiers present in the data, in tier order
    pub fn tiers(&self) -> &[IncomeTier] {
        &self.tiers
    }

    /// Distinct years, sorted descending
    pub fn years(&self) -> &[u16] {
        &self.years
    }

    pub fn min_year(&self) -> Option<u16> {
        self.years.last().copied()
    }

    pub fn max_year(&self) -> Option<u16> {
        self.years.first().copied()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

fn parse_file(path: &Path) -> Result<DatasetStore, DataError> {
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}

fn parse_reader<R: std::io::Read>(reader: R) -> Result<DatasetStore, DataError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let col = |name: &str| -> Result<usize, DataError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::Schema(name.to_string()))
    };

    let c_country = col("country")?;
    let c_code = col("code")?;
    let c_year = col("year")?;
    let c_region = col("region")?;
    let c_income = col("income_group")?;
    let c_gni = col("income_per_capita")?;
    let c_hiv = col("hiv_rate")?;
    let c_literacy = col("literacy")?;
    let c_enrollment = col("enrollment_secondary")?;
    let c_condom = col("condom_use")?;
    let c_population = col("population")?;
    let c_life = col("life_exp")?;

    let mut observations = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        let row = idx + 2; // 1-based, after the header line

        let country = required_str(&record, c_country, row, "country")?;
        let code = match record.get(c_code).map(str::trim) {
            Some("") | None => None,
            Some(code) => Some(code.to_string()),
        };
        let year_text = required_str(&record, c_year, row, "year")?;
        let year: u16 = year_text.parse().map_err(|_| DataError::Parse {
            row,
            message: format!("invalid year '{}'", year_text),
        })?;
        let region = required_str(&record, c_region, row, "region")?;
        let income_text = required_str(&record, c_income, row, "income_group")?;
        let income = IncomeTier::parse(&income_text).ok_or_else(|| DataError::Parse {
            row,
            message: format!("unknown income group '{}'", income_text),
        })?;

        observations.push(Observation {
            country,
            code,
            year,
            region,
            income,
            income_per_capita: numeric(&record, c_gni, row, "income_per_capita")?,
            hiv_rate: numeric(&record, c_hiv, row, "hiv_rate")?,
            literacy: numeric(&record, c_literacy, row, "literacy")?,
            enrollment_secondary: numeric(&record, c_enrollment, row, "enrollment_secondary")?,
            condom_use: numeric(&record, c_condom, row, "condom_use")?,
            population: numeric(&record, c_population, row, "population")?,
            life_exp: numeric(&record, c_life, row, "life_exp")?,
        });
    }

    let store = derive_sets(observations);
    tracing::info!(
        rows = store.observations.len(),
        regions = store.regions.len(),
        years = store.years.len(),
        "Loaded dataset"
    );
    Ok(store)
}

fn required_str(record: &StringRecord, idx: usize, row: usize, name: &str) -> Result<String, DataError> {
    match record.get(idx).map(str::trim) {
        Some("") | None => Err(DataError::Parse {
            row,
            message: format!("missing required field '{}'", name),
        }),
        Some(value) => Ok(value.to_string()),
    }
}

/// Empty cell means "not reported" (None); a present value must be a
/// finite non-negative number.
fn numeric(record: &StringRecord, idx: usize, row: usize, name: &str) -> Result<Option<f64>, DataError> {
    let text = match record.get(idx).map(str::trim) {
        Some("") | None => return Ok(None),
        Some(text) => text,
    };
    let value: f64 = text.parse().map_err(|_| DataError::Parse {
        row,
        message: format!("invalid number '{}' for '{}'", text, name),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(DataError::Parse {
            row,
            message: format!("'{}' must be finite and non-negative, got {}", name, value),
        });
    }
    Ok(Some(value))
}

fn derive_sets(observations: Vec<Observation>) -> DatasetStore {
    let mut regions: IndexSet<String> = IndexSet::new();
    let mut tiers: IndexSet<IncomeTier> = IndexSet::new();
    let mut years: IndexSet<u16> = IndexSet::new();

    for obs in &observations {
        regions.insert(obs.region.clone());
        tiers.insert(obs.income);
        years.insert(obs.year);
    }

    let mut tiers: Vec<IncomeTier> = tiers.into_iter().collect();
    tiers.sort();
    let mut years: Vec<u16> = years.into_iter().collect();
    years.sort_unstable_by(|a, b| b.cmp(a));

    DatasetStore {
        observations,
        regions: regions.into_iter().collect(),
        tiers,
        years,
    }
}
