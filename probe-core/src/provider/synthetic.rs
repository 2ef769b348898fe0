use anyhow::Result;
use async_trait::async_trait;

use crate::model::{DateRange, Location, Observation, ObservationSet};

use super::HistoricalWeatherProvider;

/// Offline provider producing a fixed warm-weather pattern, one row per day.
///
/// Useful for dry runs of the probe without network access or credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticProvider;

#[async_trait]
impl HistoricalWeatherProvider for SyntheticProvider {
    async fn get_daily_observations(
        &self,
        _location: &Location,
        range: &DateRange,
    ) -> Result<ObservationSet> {
        let rows = range
            .iter_days()
            .enumerate()
            .map(|(i, date)| {
                let step = i as f64 * 0.1;
                Observation {
                    date,
                    mean_temp_c: Some(28.0 + step),
                    min_temp_c: Some(25.0 + step),
                    max_temp_c: Some(30.0 + step),
                    precipitation_mm: None,
                }
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn one_row_per_day_in_range() {
        let location = Location::new("Koh Phangan", 9.7387, 100.0603).unwrap();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2022, 3, 10).unwrap(),
            NaiveDate::from_ymd_opt(2022, 3, 14).unwrap(),
        )
        .unwrap();

        let rows = SyntheticProvider
            .get_daily_observations(&location, &range)
            .await
            .unwrap();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].date, range.start());
        assert_eq!(rows[4].date, range.end());
        assert_eq!(rows[0].mean_temp_c, Some(28.0));
        assert!(rows.iter().all(|r| r.precipitation_mm.is_none()));
        assert!(rows.iter().all(|r| r.min_temp_c < r.mean_temp_c && r.mean_temp_c < r.max_temp_c));
    }
}
