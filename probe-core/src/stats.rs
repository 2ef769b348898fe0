use crate::model::Observation;

/// Per-location aggregates reported after a successful fetch.
///
/// Missing cells are skipped column by column, so a temperature aggregate is
/// `None` only when the provider sent no value at all for that column.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub days: usize,
    pub mean_temp_min_c: Option<f64>,
    pub mean_temp_max_c: Option<f64>,
    pub mean_temp_avg_c: Option<f64>,
    pub min_temp_recorded_c: Option<f64>,
    pub max_temp_recorded_c: Option<f64>,
    pub precipitation_total_mm: f64,
    pub precipitation_days: usize,
}

impl SummaryStats {
    pub fn from_observations(observations: &[Observation]) -> Self {
        let mean_temps: Vec<f64> = observations.iter().filter_map(|o| o.mean_temp_c).collect();
        let precipitation = observations.iter().filter_map(|o| o.precipitation_mm);

        Self {
            days: observations.len(),
            mean_temp_min_c: min(mean_temps.iter().copied()),
            mean_temp_max_c: max(mean_temps.iter().copied()),
            mean_temp_avg_c: mean(&mean_temps),
            min_temp_recorded_c: min(observations.iter().filter_map(|o| o.min_temp_c)),
            max_temp_recorded_c: max(observations.iter().filter_map(|o| o.max_temp_c)),
            precipitation_total_mm: precipitation.clone().sum(),
            precipitation_days: precipitation.filter(|p| *p > 0.0).count(),
        }
    }
}

fn min(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.reduce(f64::min)
}

fn max(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.reduce(f64::max)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
