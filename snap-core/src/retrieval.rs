use crate::{
    error::ErrorKind,
    forecast::select_daily,
    model::{Coordinates, ForecastDay, LocationQuery, WeatherReport},
    provider::WeatherProvider,
};

/// Runs a complete lookup against a [`WeatherProvider`].
///
/// Holds no state between calls: nothing is cached and nothing is retried.
#[derive(Debug)]
pub struct RetrievalService<P> {
    provider: P,
}

impl<P: WeatherProvider> RetrievalService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Current conditions, then the daily forecast for the place they
    /// resolved to. An unnamed place is forecast by its coordinates.
    ///
    /// A not-found answer ends the lookup before the forecast is requested.
    /// A failed forecast does not fail the lookup; the report just carries
    /// no forecast.
    pub async fn fetch(&self, query: &LocationQuery) -> Result<WeatherReport, ErrorKind> {
        let conditions = self.provider.current(query).await.map_err(|err| {
            tracing::warn!(%query, error = %err, "Current conditions lookup failed");
            ErrorKind::from(err)
        })?;

        // Nameless answers (open sea) fall back to the position, then to the
        // query itself.
        let place = conditions.resolved_query().unwrap_or_else(|| query.clone());
        let forecast = match self.provider.forecast(&place).await {
            Ok(readings) => Some(
                select_daily(&readings)
                    .iter()
                    .map(ForecastDay::from)
                    .collect::<Vec<_>>(),
            ),
            Err(err) => {
                tracing::warn!(%place, error = %err, "Forecast unavailable, showing current conditions only");
                None
            }
        };

        tracing::info!(
            %query,
            place = %conditions.place_label(),
            days = forecast.as_ref().map_or(0, Vec::len),
            "Lookup complete"
        );

        Ok(WeatherReport { conditions, forecast })
    }

    /// Place name for `coords`, or `None` if the reverse lookup fails or
    /// knows nothing there.
    pub async fn resolve_place(&self, coords: Coordinates) -> Option<String> {
        match self.provider.reverse_geocode(coords).await {
            Ok(Some(name)) if !name.trim().is_empty() => Some(name),
            Ok(_) => {
                tracing::warn!(%coords, "Reverse geocoding found no place");
                None
            }
            Err(err) => {
                tracing::warn!(%coords, error = %err, "Reverse geocoding failed");
                None
            }
        }
    }
}
