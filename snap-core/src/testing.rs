//! In-crate fakes for unit tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    error::FetchError,
    model::{
        ConditionCategory, Coordinates, CurrentConditions, ForecastReading, LocationQuery,
    },
    provider::WeatherProvider,
};

#[derive(Debug, Clone)]
pub(crate) enum CurrentReply {
    Found(CurrentConditions),
    NotFound,
    Down,
}

#[derive(Debug, Clone)]
pub(crate) enum ForecastReply {
    Series(Vec<ForecastReading>),
    Down,
}

#[derive(Debug)]
pub(crate) struct MockProvider {
    current: CurrentReply,
    forecast: ForecastReply,
    place: Option<String>,
    pub current_calls: AtomicUsize,
    pub forecast_calls: AtomicUsize,
    pub reverse_calls: AtomicUsize,
    pub current_queries: Mutex<Vec<LocationQuery>>,
    pub forecast_queries: Mutex<Vec<LocationQuery>>,
}

impl MockProvider {
    pub fn new(current: CurrentReply, forecast: ForecastReply) -> Self {
        Self {
            current,
            forecast,
            place: None,
            current_calls: AtomicUsize::new(0),
            forecast_calls: AtomicUsize::new(0),
            reverse_calls: AtomicUsize::new(0),
            current_queries: Mutex::new(Vec::new()),
            forecast_queries: Mutex::new(Vec::new()),
        }
    }

    /// Answers every lookup with London and a five-day series.
    pub fn london() -> Self {
        Self::new(
            CurrentReply::Found(london_conditions()),
            ForecastReply::Series(noon_series(&[14.0, 15.0, 16.0, 14.0, 13.0])),
        )
    }

    pub fn with_place(mut self, place: &str) -> Self {
        self.place = Some(place.to_string());
        self
    }

    pub fn current_calls(&self) -> usize {
        self.current_calls.load(Ordering::SeqCst)
    }

    pub fn forecast_calls(&self) -> usize {
        self.forecast_calls.load(Ordering::SeqCst)
    }

    pub fn reverse_calls(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for MockProvider {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentConditions, FetchError> {
        self.current_calls.fetch_add(1, Ordering::SeqCst);
        self.current_queries.lock().unwrap().push(query.clone());
        match &self.current {
            CurrentReply::Found(c) => Ok(c.clone()),
            CurrentReply::NotFound => Err(FetchError::NotFound(query.to_string())),
            CurrentReply::Down => Err(FetchError::Status { status: 503, body: String::new() }),
        }
    }

    async fn forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastReading>, FetchError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        self.forecast_queries.lock().unwrap().push(query.clone());
        match &self.forecast {
            ForecastReply::Series(s) => Ok(s.clone()),
            ForecastReply::Down => Err(FetchError::Status { status: 500, body: String::new() }),
        }
    }

    async fn reverse_geocode(&self, _coords: Coordinates) -> Result<Option<String>, FetchError> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.place.clone())
    }
}

pub(crate) fn london_conditions() -> CurrentConditions {
    CurrentConditions {
        name: "London".into(),
        country: "GB".into(),
        coordinates: Some(Coordinates::new(51.5085, -0.1257)),
        temperature_c: 15.2,
        humidity_pct: 70,
        wind_speed_mps: 4.1,
        pressure_hpa: 1012,
        visibility_m: Some(10000),
        sunrise: DateTime::<Utc>::from_timestamp(1_700_000_000, 0),
        sunset: DateTime::<Utc>::from_timestamp(1_700_032_400, 0),
        category: ConditionCategory::Clouds,
        description: "broken clouds".into(),
        is_night: false,
    }
}

/// 3-hourly series whose noon readings carry `temps`, one per day from 2024-03-04.
pub(crate) fn noon_series(temps: &[f64]) -> Vec<ForecastReading> {
    let origin = NaiveDate::from_ymd_opt(2024, 3, 4)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    (0..temps.len() as i64 * 8)
        .map(|i| {
            let at = origin + Duration::hours(3 * i);
            let day = (i / 8) as usize;
            let temperature_c = if i % 8 == 4 { temps[day] } else { -40.0 };
            ForecastReading {
                at,
                category: ConditionCategory::Clouds,
                temperature_c,
                is_night: false,
            }
        })
        .collect()
}
