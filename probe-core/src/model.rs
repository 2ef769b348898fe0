use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{error::ProbeError, stats::SummaryStats};

/// A named point on the globe with validated coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self, ProbeError> {
        let name = name.into();

        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ProbeError::invalid_location(
                name,
                format!("latitude {latitude} is outside [-90, 90]"),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ProbeError::invalid_location(
                name,
                format!("longitude {longitude} is outside [-180, 180]"),
            ));
        }

        Ok(Self { name, latitude, longitude })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Inclusive range of calendar days, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ProbeError> {
        if start > end {
            return Err(ProbeError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> u64 {
        // start <= end, so the difference is never negative
        (self.end - self.start).num_days().unsigned_abs() + 1
    }

    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// One day's aggregated record. Providers leave gaps, so every value is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub mean_temp_c: Option<f64>,
    pub min_temp_c: Option<f64>,
    pub max_temp_c: Option<f64>,
    pub precipitation_mm: Option<f64>,
}

pub type ObservationSet = Vec<Observation>;

/// Unvalidated probe input as it comes from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeTarget {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ProbeTarget {
    pub fn location(&self) -> Result<Location, ProbeError> {
        Location::new(self.name.clone(), self.latitude, self.longitude)
    }

    pub fn date_range(&self) -> Result<DateRange, ProbeError> {
        DateRange::new(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeasibilityResult {
    Success {
        location: Location,
        date_range: DateRange,
        summary: SummaryStats,
    },
    Failure {
        target: ProbeTarget,
        reason: ProbeError,
    },
}

impl FeasibilityResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FeasibilityResult::Success { .. })
    }

    pub fn name(&self) -> &str {
        match self {
            FeasibilityResult::Success { location, .. } => location.name(),
            FeasibilityResult::Failure { target, .. } => &target.name,
        }
    }
}

/// Outcome of one feasibility run, in the order targets were probed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub results: Vec<FeasibilityResult>,
}

impl RunReport {
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(FeasibilityResult::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FeasibilityResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&FeasibilityResult> {
        self.results.iter().find(|r| r.name() == name)
    }
}
