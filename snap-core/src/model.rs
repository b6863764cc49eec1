use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// What the user asked for: a free-text place name or a position.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Name(String),
    Coordinates(Coordinates),
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::Name(name) => f.write_str(name),
            LocationQuery::Coordinates(coords) => coords.fmt(f),
        }
    }
}

/// Coarse condition classification reported in `weather[0].main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionCategory {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    #[serde(alias = "Haze", alias = "Fog")]
    Mist,
    #[serde(other)]
    Other,
}

impl ConditionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionCategory::Clear => "Clear",
            ConditionCategory::Clouds => "Clouds",
            ConditionCategory::Rain => "Rain",
            ConditionCategory::Drizzle => "Drizzle",
            ConditionCategory::Thunderstorm => "Thunderstorm",
            ConditionCategory::Snow => "Snow",
            ConditionCategory::Mist => "Mist",
            ConditionCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OpenWeather icon ids end in `d` or `n`; only `n` means night.
pub fn is_night_icon(icon: &str) -> bool {
    icon.ends_with('n')
}

/// Round a temperature for display, halves rounding up (`-2.5` becomes `-2`).
pub fn round_temperature(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Place name as resolved by the API, not necessarily what was typed.
    pub name: String,
    pub country: String,
    pub coordinates: Option<Coordinates>,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    pub visibility_m: Option<u32>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub category: ConditionCategory,
    pub description: String,
    pub is_night: bool,
}

impl CurrentConditions {
    /// `"London, GB"`, or just the name when the API gave no country.
    /// Unnamed places (open sea) are labelled by their coordinates.
    pub fn place_label(&self) -> String {
        match (self.name.trim().is_empty(), self.coordinates) {
            (true, Some(coords)) => coords.to_string(),
            _ if self.country.is_empty() => self.name.clone(),
            _ => format!("{}, {}", self.name, self.country),
        }
    }

    /// Query that targets the same place the current-conditions lookup
    /// resolved to: its name, or its position when it has no name.
    /// `None` when the response carried neither.
    pub fn resolved_query(&self) -> Option<LocationQuery> {
        if self.name.trim().is_empty() {
            return self.coordinates.map(LocationQuery::Coordinates);
        }
        if self.country.is_empty() {
            Some(LocationQuery::Name(self.name.clone()))
        } else {
            Some(LocationQuery::Name(format!("{},{}", self.name, self.country)))
        }
    }
}

/// One element of the 3-hour forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReading {
    /// Timestamp as the API labels it (`dt_txt`).
    pub at: NaiveDateTime,
    pub category: ConditionCategory,
    pub temperature_c: f64,
    pub is_night: bool,
}

/// A single day's representative forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub category: ConditionCategory,
    pub temperature_c: f64,
}

impl From<&ForecastReading> for ForecastDay {
    fn from(reading: &ForecastReading) -> Self {
        Self {
            date: reading.at.date(),
            category: reading.category,
            temperature_c: reading.temperature_c,
        }
    }
}

/// Result of one successful lookup. Replaces any previous report as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub conditions: CurrentConditions,
    /// `None` when the forecast request failed and the lookup degraded to
    /// current conditions only.
    pub forecast: Option<Vec<ForecastDay>>,
}
