use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::EndpointConfig,
    error::{FetchError, truncate_body},
    model::{
        ConditionCategory, Coordinates, CurrentConditions, ForecastReading, LocationQuery,
        is_night_icon,
    },
};

use super::WeatherProvider;

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";
const REVERSE_GEOCODE_PATH: &str = "/geo/1.0/reverse";
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// Every request made by this provider is bounded by `endpoint.timeout()`.
    pub fn new(api_key: String, endpoint: &EndpointConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(endpoint.timeout())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn location_params(query: &LocationQuery) -> Vec<(&'static str, String)> {
        match query {
            LocationQuery::Name(name) => vec![("q", name.clone())],
            LocationQuery::Coordinates(coords) => vec![
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ],
        }
    }

    /// GET `path` and return the body, after checking for the not-found
    /// signal and for failed statuses.
    async fn get_body(
        &self,
        path: &str,
        mut params: Vec<(&'static str, String)>,
        target: &str,
    ) -> Result<String, FetchError> {
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, %target, "Sending OpenWeather request");

        let res = self.http.get(&url).query(&params).send().await?;

        let status = res.status();
        let body = res.text().await?;
        tracing::debug!(%status, %url, "Received OpenWeather response");

        // The API reports unknown places in the body, not always via HTTP status.
        if reports_not_found(&body) {
            return Err(FetchError::NotFound(target.to_string()));
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

fn reports_not_found(body: &str) -> bool {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return false;
    };

    match value.get("cod") {
        Some(Value::String(code)) => code == "404",
        Some(Value::Number(code)) => code.as_u64() == Some(404),
        _ => false,
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    humidity: u8,
    #[serde(default)]
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: ConditionCategory,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize, Default)]
struct OwWind {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: Option<OwCoord>,
    sys: OwSys,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: Option<String>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwPlace {
    name: String,
}

/// Category, description and night flag of the first `weather` element.
fn describe(weather: &[OwWeather]) -> (ConditionCategory, String, bool) {
    match weather.first() {
        Some(w) => (w.main, w.description.clone(), is_night_icon(&w.icon)),
        None => (ConditionCategory::Other, String::new(), false),
    }
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (category, description, is_night) = describe(&parsed.weather);

        CurrentConditions {
            name: parsed.name,
            country: parsed.sys.country,
            coordinates: parsed.coord.map(|c| Coordinates::new(c.lat, c.lon)),
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
            visibility_m: parsed.visibility,
            sunrise: parsed.sys.sunrise.and_then(sun_time),
            sunset: parsed.sys.sunset.and_then(sun_time),
            category,
            description,
            is_night,
        }
    }
}

impl From<OwForecastEntry> for ForecastReading {
    fn from(entry: OwForecastEntry) -> Self {
        let (category, _, is_night) = describe(&entry.weather);

        let at = entry
            .dt_txt
            .as_deref()
            .and_then(|txt| NaiveDateTime::parse_from_str(txt, DT_TXT_FORMAT).ok())
            .unwrap_or_else(|| unix_to_utc(entry.dt).unwrap_or_default().naive_utc());

        ForecastReading {
            at,
            category,
            temperature_c: entry.main.temp,
            is_night,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentConditions, FetchError> {
        let target = query.to_string();
        let body = self
            .get_body(CURRENT_PATH, Self::location_params(query), &target)
            .await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        let conditions = CurrentConditions::from(parsed);

        tracing::info!(
            place = %conditions.place_label(),
            temp = conditions.temperature_c,
            "Current conditions fetched"
        );

        Ok(conditions)
    }

    async fn forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastReading>, FetchError> {
        let target = query.to_string();
        let body = self
            .get_body(FORECAST_PATH, Self::location_params(query), &target)
            .await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;
        tracing::debug!(readings = parsed.list.len(), "Forecast series fetched");

        Ok(parsed.list.into_iter().map(ForecastReading::from).collect())
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<String>, FetchError> {
        let target = coords.to_string();
        let params = vec![
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
            ("limit", "1".to_string()),
        ];
        let body = self.get_body(REVERSE_GEOCODE_PATH, params, &target).await?;

        let places: Vec<OwPlace> = serde_json::from_str(&body)?;
        Ok(places.into_iter().next().map(|p| p.name))
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// Polar day and night come back as `0` or without the field at all.
fn sun_time(ts: i64) -> Option<DateTime<Utc>> {
    if ts > 0 { unix_to_utc(ts) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn not_found_signal_accepts_string_and_number() {
        assert!(reports_not_found(r#"{"cod":"404","message":"city not found"}"#));
        assert!(reports_not_found(r#"{"cod":404}"#));
        assert!(!reports_not_found(r#"{"cod":200}"#));
        assert!(!reports_not_found(r#"{"cod":"401"}"#));
        assert!(!reports_not_found("[]"));
        assert!(!reports_not_found("<html>bad gateway</html>"));
    }

    #[test]
    fn current_response_maps_to_conditions() {
        let body = r#"{
            "coord": {"lon": -0.13, "lat": 51.51},
            "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04n"}],
            "main": {"temp": 15.2, "feels_like": 14.6, "pressure": 1012, "humidity": 70},
            "visibility": 10000,
            "wind": {"speed": 4.1, "deg": 240},
            "dt": 1700000000,
            "sys": {"country": "GB", "sunrise": 1699990000, "sunset": 1700023000},
            "name": "London",
            "cod": 200
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        let cond = CurrentConditions::from(parsed);

        assert_eq!(cond.name, "London");
        assert_eq!(cond.country, "GB");
        assert_eq!(cond.category, ConditionCategory::Clouds);
        assert_eq!(cond.description, "broken clouds");
        assert!(cond.is_night);
        assert_eq!(cond.humidity_pct, 70);
        assert_eq!(cond.pressure_hpa, 1012);
        assert_eq!(cond.visibility_m, Some(10000));
        assert_eq!(cond.sunrise.map(|t| t.timestamp()), Some(1699990000));
        assert_eq!(cond.sunset.map(|t| t.timestamp()), Some(1700023000));
        assert_eq!(cond.coordinates, Some(Coordinates::new(51.51, -0.13)));
    }

    #[test]
    fn missing_or_zero_sun_times_stay_unknown() {
        let body = r#"{
            "coord": {"lon": 15.6, "lat": 78.2},
            "weather": [{"main": "Snow", "description": "light snow", "icon": "13n"}],
            "main": {"temp": -14.0, "pressure": 1003, "humidity": 80},
            "sys": {"country": "SJ", "sunrise": 0},
            "name": "Longyearbyen",
            "cod": 200
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        let cond = CurrentConditions::from(parsed);

        assert_eq!(cond.sunrise, None);
        assert_eq!(cond.sunset, None);
        assert_eq!(cond.visibility_m, None);
    }

    #[test]
    fn forecast_entry_prefers_dt_txt() {
        let body = r#"{
            "dt": 1700049600,
            "dt_txt": "2023-11-15 12:00:00",
            "main": {"temp": 9.4},
            "weather": [{"main": "Rain", "icon": "10d"}]
        }"#;

        let entry: OwForecastEntry = serde_json::from_str(body).unwrap();
        let reading = ForecastReading::from(entry);

        assert_eq!(reading.at.date(), NaiveDate::from_ymd_opt(2023, 11, 15).unwrap());
        assert_eq!(reading.at.hour(), 12);
        assert_eq!(reading.category, ConditionCategory::Rain);
        assert!(!reading.is_night);
    }

    #[test]
    fn forecast_entry_without_weather_is_other() {
        let body = r#"{"dt": 1700049600, "main": {"temp": 1.0}, "weather": []}"#;

        let entry: OwForecastEntry = serde_json::from_str(body).unwrap();
        let reading = ForecastReading::from(entry);

        assert_eq!(reading.category, ConditionCategory::Other);
        assert_eq!(reading.at, unix_to_utc(1700049600).unwrap().naive_utc());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let endpoint = EndpointConfig {
            base_url: "http://localhost:1234/".into(),
            ..EndpointConfig::default()
        };
        let provider = OpenWeatherProvider::new("KEY".into(), &endpoint).unwrap();
        assert_eq!(provider.base_url, "http://localhost:1234");
    }
}
