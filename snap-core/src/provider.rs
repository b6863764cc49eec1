use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::FetchError,
    model::{Coordinates, CurrentConditions, ForecastReading, LocationQuery},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// The outbound side of a lookup: one weather API, three requests.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions. Must return [`FetchError::NotFound`] when the API
    /// says the place doesn't exist.
    async fn current(&self, query: &LocationQuery) -> Result<CurrentConditions, FetchError>;

    /// The raw 3-hour forecast series, in the order the API returned it.
    async fn forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastReading>, FetchError>;

    /// Name of the place at `coords`, if the API knows one.
    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<String>, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key()?;
    let provider = OpenWeatherProvider::new(api_key.to_owned(), &config.endpoint)?;
    Ok(provider)
}
