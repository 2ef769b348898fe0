use chrono::NaiveDate;
use thiserror::Error;

/// Reasons a single probe (or the whole run) can fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProbeError {
    #[error("Invalid location '{name}': {message}")]
    InvalidLocation { name: String, message: String },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Provider error: {message}")]
    Provider { message: String },

    #[error("No data received from provider")]
    NoData,

    #[error("Weather provider is unavailable: {message}")]
    ProviderUnavailable { message: String },
}

impl ProbeError {
    pub fn invalid_location<N: Into<String>, M: Into<String>>(name: N, message: M) -> Self {
        Self::InvalidLocation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Wrap a provider-side failure, keeping the whole context chain.
    pub fn provider(err: &anyhow::Error) -> Self {
        Self::Provider {
            message: format!("{err:#}"),
        }
    }

    pub fn provider_unavailable(err: &anyhow::Error) -> Self {
        Self::ProviderUnavailable {
            message: format!("{err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn no_data_message_mentions_no_data() {
        assert!(ProbeError::NoData.to_string().to_lowercase().contains("no data"));
    }

    #[test]
    fn provider_error_keeps_context_chain() {
        let err = Err::<(), _>(anyhow!("connection refused"))
            .context("Failed to send request to Meteostat")
            .unwrap_err();

        let msg = ProbeError::provider(&err).to_string();
        assert!(msg.contains("Failed to send request to Meteostat"));
        assert!(msg.contains("connection refused"));
    }
}
