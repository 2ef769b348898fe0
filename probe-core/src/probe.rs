//! Feasibility probe: can the provider answer for these places and dates?
//!
//! Every target is probed once, in order. A failing target is logged and
//! recorded, and the run carries on with the next one.

use tracing::{error, info};

use crate::{
    error::ProbeError,
    model::{DateRange, FeasibilityResult, Location, ObservationSet, ProbeTarget, RunReport},
    provider::HistoricalWeatherProvider,
    stats::SummaryStats,
};

#[derive(Debug)]
pub struct FeasibilityProbe {
    provider: Box<dyn HistoricalWeatherProvider>,
}

impl FeasibilityProbe {
    pub fn new(provider: Box<dyn HistoricalWeatherProvider>) -> Self {
        Self { provider }
    }

    /// Single best-effort request. Provider errors and empty answers both fail.
    pub async fn fetch(
        &self,
        location: &Location,
        range: &DateRange,
    ) -> Result<ObservationSet, ProbeError> {
        let data = self
            .provider
            .get_daily_observations(location, range)
            .await
            .map_err(|err| ProbeError::provider(&err))?;

        if data.is_empty() {
            return Err(ProbeError::NoData);
        }
        Ok(data)
    }

    /// Validate, fetch and summarise one target.
    pub async fn probe(&self, target: &ProbeTarget) -> FeasibilityResult {
        match self.try_probe(target).await {
            Ok((location, date_range, summary)) => {
                log_summary(&location, &date_range, &summary);
                FeasibilityResult::Success {
                    location,
                    date_range,
                    summary,
                }
            }
            Err(reason) => {
                match &reason {
                    ProbeError::NoData => error!("No data received for {}", target.name),
                    _ => error!("Error while fetching data for {}: {reason}", target.name),
                }
                FeasibilityResult::Failure {
                    target: target.clone(),
                    reason,
                }
            }
        }
    }

    async fn try_probe(
        &self,
        target: &ProbeTarget,
    ) -> Result<(Location, DateRange, SummaryStats), ProbeError> {
        let location = target.location()?;
        let date_range = target.date_range()?;

        log_request(&location, &date_range);

        let data = self.fetch(&location, &date_range).await?;
        let summary = SummaryStats::from_observations(&data);
        Ok((location, date_range, summary))
    }

    /// Probe every target sequentially; the run succeeds only if all of them do.
    pub async fn run(&self, targets: &[ProbeTarget]) -> RunReport {
        let mut report = RunReport::default();

        for target in targets {
            report.results.push(self.probe(target).await);
        }

        if report.all_succeeded() {
            info!("Feasibility test completed successfully for all locations");
        } else {
            let failed: Vec<&str> = report.failures().map(FeasibilityResult::name).collect();
            error!(
                "Feasibility test failed for one or more locations: {}",
                failed.join(", ")
            );
        }

        report
    }
}

fn log_request(location: &Location, range: &DateRange) {
    info!("Request parameters for {}:", location.name());
    info!("  Location: {}", location.name());
    info!("  Coordinates: {}°, {}°", location.latitude(), location.longitude());
    info!("  Start Date: {}", range.start());
    info!("  End Date: {}", range.end());
    // inclusive count: 2022-03-10..2022-03-20 is 11 days
    info!("  Days Requested: {}", range.days());
}

fn log_summary(location: &Location, range: &DateRange, s: &SummaryStats) {
    info!("Results for {} ({range}):", location.name());
    info!(
        "  Temperature range: {} to {}",
        celsius(s.mean_temp_min_c),
        celsius(s.mean_temp_max_c)
    );
    info!("  Average temperature: {}", celsius(s.mean_temp_avg_c));
    info!(
        "  Min/Max recorded: {} to {}",
        celsius(s.min_temp_recorded_c),
        celsius(s.max_temp_recorded_c)
    );
    info!("  Total precipitation: {:.1}mm", s.precipitation_total_mm);
    info!("  Days with precipitation: {}", s.precipitation_days);
    info!("  Days received: {} of {}", s.days, range.days());
}

fn celsius(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}°C"),
        None => "n/a".to_string(),
    }
}
