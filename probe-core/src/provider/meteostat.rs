use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::model::{DateRange, Location, Observation, ObservationSet};

use super::{HistoricalWeatherProvider, truncate_body};

const DEFAULT_BASE_URL: &str = "https://meteostat.p.rapidapi.com";
const RAPIDAPI_HOST: &str = "meteostat.p.rapidapi.com";

/// Daily point data from the Meteostat JSON API.
#[derive(Debug, Clone)]
pub struct MeteostatProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl MeteostatProvider {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("weather-probe/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to initialise HTTP client for Meteostat")?;

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_daily(&self, location: &Location, range: &DateRange) -> Result<ObservationSet> {
        let url = format!("{}/point/daily", self.base_url.trim_end_matches('/'));

        let mut req = self.http.get(&url).query(&[
            ("lat", location.latitude().to_string()),
            ("lon", location.longitude().to_string()),
            ("start", range.start().to_string()),
            ("end", range.end().to_string()),
        ]);
        if let Some(key) = &self.api_key {
            req = req
                .header("x-rapidapi-key", key)
                .header("x-rapidapi-host", RAPIDAPI_HOST);
        }

        debug!(%url, location = location.name(), "sending Meteostat daily request");

        let res = req
            .send()
            .await
            .context("Failed to send request to Meteostat (daily point data)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Meteostat daily response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Meteostat daily request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        parse_daily_body(&body)
    }
}

#[derive(Debug, Deserialize)]
struct MsDailyRow {
    date: String,
    tavg: Option<f64>,
    tmin: Option<f64>,
    tmax: Option<f64>,
    prcp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MsDailyResponse {
    #[serde(default)]
    data: Option<Vec<MsDailyRow>>,
}

/// Parse a `/point/daily` body. A null or absent `data` field is an empty set.
pub(crate) fn parse_daily_body(body: &str) -> Result<ObservationSet> {
    let parsed: MsDailyResponse =
        serde_json::from_str(body).context("Failed to parse Meteostat daily JSON")?;

    parsed
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|row| {
            // Daily rows carry a plain date, some mirrors append a midnight time.
            let day = row.date.get(..10).unwrap_or(row.date.as_str());
            let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}' in Meteostat response", row.date))?;

            Ok::<_, anyhow::Error>(Observation {
                date,
                mean_temp_c: row.tavg,
                min_temp_c: row.tmin,
                max_temp_c: row.tmax,
                precipitation_mm: row.prcp,
            })
        })
        .collect()
}

#[async_trait]
impl HistoricalWeatherProvider for MeteostatProvider {
    async fn get_daily_observations(
        &self,
        location: &Location,
        range: &DateRange,
    ) -> Result<ObservationSet> {
        self.fetch_daily(location, range).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_daily_rows_with_gaps() {
        let body = r#"{
            "meta": {"generated": "2024-01-01 00:00:00"},
            "data": [
                {"date": "2020-08-01", "tavg": 36.4, "tmin": 28.0, "tmax": 45.2, "prcp": 0.0, "snow": null, "wspd": 11.2},
                {"date": "2020-08-02", "tavg": null, "tmin": 27.5, "tmax": 46.0, "prcp": null}
            ]
        }"#;

        let rows = parse_daily_body(body).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2020, 8, 1).unwrap());
        assert_eq!(rows[0].mean_temp_c, Some(36.4));
        assert_eq!(rows[0].precipitation_mm, Some(0.0));
        assert_eq!(rows[1].mean_temp_c, None);
        assert_eq!(rows[1].max_temp_c, Some(46.0));
    }

    #[test]
    fn accepts_date_time_stamps() {
        let body = r#"{"data": [{"date": "2022-03-10 00:00:00", "tavg": 28.1, "tmin": 25.0, "tmax": 31.9, "prcp": 2.3}]}"#;
        let rows = parse_daily_body(body).unwrap();
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2022, 3, 10).unwrap());
    }

    #[test]
    fn null_or_missing_data_is_empty() {
        assert!(parse_daily_body(r#"{"meta": {}, "data": null}"#).unwrap().is_empty());
        assert!(parse_daily_body(r#"{"meta": {}}"#).unwrap().is_empty());
        assert!(parse_daily_body(r#"{"data": []}"#).unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_payloads() {
        let err = parse_daily_body("<html>rate limited</html>").unwrap_err();
        assert!(err.to_string().contains("Failed to parse Meteostat daily JSON"));

        let err = parse_daily_body(r#"{"data": [{"date": "yesterday"}]}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid date 'yesterday'"));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_provider_error() {
        let provider = MeteostatProvider::new(None)
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let location = Location::new("Baghdad", 33.31528, 44.36611).unwrap();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2020, 8, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 8, 10).unwrap(),
        )
        .unwrap();

        let err = provider.get_daily_observations(&location, &range).await.unwrap_err();
        assert!(err.to_string().contains("Failed to send request to Meteostat"));
    }
}
