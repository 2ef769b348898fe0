use crate::{
    Config,
    model::{DateRange, Location, ObservationSet},
    provider::{meteostat::MeteostatProvider, synthetic::SyntheticProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod meteostat;
pub mod synthetic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Meteostat,
    Synthetic,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Meteostat => "meteostat",
            ProviderId::Synthetic => "synthetic",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Meteostat, ProviderId::Synthetic]
    }

    /// Whether the provider talks to a service that expects credentials.
    pub fn needs_api_key(&self) -> bool {
        matches!(self, ProviderId::Meteostat)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "meteostat" => Ok(ProviderId::Meteostat),
            "synthetic" => Ok(ProviderId::Synthetic),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: meteostat, synthetic."
            )),
        }
    }
}

/// Source of daily historical observations.
///
/// Implementations answer with whatever rows they have for the range; an
/// empty set is not an error at this level.
#[async_trait]
pub trait HistoricalWeatherProvider: Send + Sync + Debug {
    async fn get_daily_observations(
        &self,
        location: &Location,
        range: &DateRange,
    ) -> anyhow::Result<ObservationSet>;
}

/// Construct a provider from config and explicit ProviderId.
///
/// A missing API key is not an error here: the service itself rejects
/// unauthenticated requests.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn HistoricalWeatherProvider>> {
    let boxed: Box<dyn HistoricalWeatherProvider> = match id {
        ProviderId::Meteostat => {
            let api_key = config.provider_api_key(id).map(str::to_owned);
            Box::new(MeteostatProvider::new(api_key)?)
        }
        ProviderId::Synthetic => Box::new(SyntheticProvider),
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(
    config: &Config,
) -> anyhow::Result<Box<dyn HistoricalWeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
