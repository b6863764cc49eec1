//! JSON fixtures shaped like OpenWeather responses.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use serde_json::{Value, json};

pub fn current_json(name: &str, country: &str, temp: f64, humidity: u8, main: &str) -> Value {
    json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 803, "main": main, "description": "broken clouds", "icon": "04d"}],
        "base": "stations",
        "main": {"temp": temp, "feels_like": temp - 0.6, "pressure": 1012, "humidity": humidity},
        "visibility": 10000,
        "wind": {"speed": 4.1, "deg": 240},
        "dt": 1_709_553_600,
        "sys": {"country": country, "sunrise": 1_709_534_000, "sunset": 1_709_575_000},
        "timezone": 0,
        "name": name,
        "cod": 200
    })
}

/// Five days of 3-hourly readings from 2024-03-04; noon readings carry `noon_temps`.
pub fn forecast_json(noon_temps: &[f64]) -> Value {
    let origin = NaiveDate::from_ymd_opt(2024, 3, 4)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let list: Vec<Value> = (0..noon_temps.len() as i64 * 8)
        .map(|i| {
            let at = origin + Duration::hours(3 * i);
            let temp = if i % 8 == 4 { noon_temps[(i / 8) as usize] } else { 2.0 };
            json!({
                "dt": at.and_utc().timestamp(),
                "main": {"temp": temp, "humidity": 80, "pressure": 1010},
                "weather": [{"main": "Clouds", "description": "overcast clouds", "icon": "04d"}],
                "dt_txt": at.format("%Y-%m-%d %H:%M:%S").to_string()
            })
        })
        .collect();

    json!({
        "cod": "200",
        "message": 0,
        "cnt": list.len(),
        "list": list,
        "city": {"name": "London", "country": "GB"}
    })
}

pub fn not_found_json() -> Value {
    json!({"cod": "404", "message": "city not found"})
}
