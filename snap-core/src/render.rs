//! Projection of a [`ViewState`] into what the user sees.
//!
//! [`render`] is pure: the same state, suggestions and time zone always give
//! the same [`Screen`]. Front ends only print it.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt;

use crate::{
    error::ErrorKind,
    model::{CurrentConditions, ForecastDay, round_temperature},
    session::ViewState,
};

pub mod palette;

pub use palette::{FALLBACK_GLYPH, Glyph, Theme, glyph, theme_for};

pub const TITLE: &str = "Weather Snap";
pub const TAGLINE: &str = "Enter any city to get live weather info instantly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Humidity,
    Wind,
    Visibility,
    Pressure,
    Sunrise,
    Sunset,
}

impl HighlightKind {
    pub const ALL: [HighlightKind; 6] = [
        HighlightKind::Humidity,
        HighlightKind::Wind,
        HighlightKind::Visibility,
        HighlightKind::Pressure,
        HighlightKind::Sunrise,
        HighlightKind::Sunset,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HighlightKind::Humidity => "Humidity",
            HighlightKind::Wind => "Wind",
            HighlightKind::Visibility => "Visibility",
            HighlightKind::Pressure => "Pressure",
            HighlightKind::Sunrise => "Sunrise",
            HighlightKind::Sunset => "Sunset",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub kind: HighlightKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRow {
    pub weekday: String,
    pub glyph: Glyph,
    pub temperature: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub heading: String,
    pub glyph: Glyph,
    pub temperature: String,
    pub description: String,
    pub highlights: Vec<Highlight>,
    pub forecast: Vec<ForecastRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Empty { suggestions: Vec<String> },
    Loading,
    Error { kind: ErrorKind, message: &'static str },
    Weather(WeatherCard),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub theme: Theme,
    pub panel: Panel,
}

pub fn render<Tz>(state: &ViewState, suggestions: &[String], tz: &Tz) -> Screen
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match state {
        ViewState::Empty => Screen {
            theme: Theme::Default,
            panel: Panel::Empty { suggestions: suggestions.to_vec() },
        },
        ViewState::Loading => Screen { theme: Theme::Default, panel: Panel::Loading },
        ViewState::Error(kind) => Screen {
            theme: Theme::Default,
            panel: Panel::Error { kind: kind.clone(), message: kind.user_message() },
        },
        ViewState::Populated(report) => {
            let cond = &report.conditions;
            let forecast = report.forecast.as_deref().unwrap_or_default();
            Screen {
                theme: theme_for(cond.category, cond.is_night),
                panel: Panel::Weather(weather_card(cond, forecast, tz)),
            }
        }
    }
}

fn weather_card<Tz>(cond: &CurrentConditions, forecast: &[ForecastDay], tz: &Tz) -> WeatherCard
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    WeatherCard {
        heading: cond.place_label(),
        glyph: glyph(cond.category),
        temperature: format_temperature(cond.temperature_c),
        description: capitalize_words(&cond.description),
        highlights: HighlightKind::ALL
            .iter()
            .map(|&kind| Highlight { kind, value: highlight_value(kind, cond, tz) })
            .collect(),
        forecast: forecast.iter().map(forecast_row).collect(),
    }
}

fn highlight_value<Tz>(kind: HighlightKind, cond: &CurrentConditions, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match kind {
        HighlightKind::Humidity => format!("{}%", cond.humidity_pct),
        HighlightKind::Wind => format!("{} m/s", cond.wind_speed_mps),
        HighlightKind::Visibility => cond
            .visibility_m
            .map(|m| format!("{:.1} km", f64::from(m) / 1000.0))
            .unwrap_or_else(unknown),
        HighlightKind::Pressure => format!("{} hPa", cond.pressure_hpa),
        HighlightKind::Sunrise => cond.sunrise.map(|t| format_clock(t, tz)).unwrap_or_else(unknown),
        HighlightKind::Sunset => cond.sunset.map(|t| format_clock(t, tz)).unwrap_or_else(unknown),
    }
}

fn unknown() -> String {
    "n/a".to_string()
}

fn forecast_row(day: &ForecastDay) -> ForecastRow {
    ForecastRow {
        weekday: day.date.format("%A").to_string(),
        glyph: glyph(day.category),
        temperature: format_temperature(day.temperature_c),
    }
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", round_temperature(celsius))
}

/// `HH:MM` in the viewer's zone.
pub fn format_clock<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.with_timezone(tz).format("%H:%M").to_string()
}

fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [from, via, to] = self.theme.gradient();
        writeln!(f, "🌍 {TITLE}  [{} · {from} → {via} → {to}]", self.theme.label())?;

        match &self.panel {
            Panel::Empty { suggestions } => {
                writeln!(f, "{TAGLINE}")?;
                if !suggestions.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "Try one of these:")?;
                    for (i, city) in suggestions.iter().enumerate() {
                        writeln!(f, "  {}. {city}", i + 1)?;
                    }
                }
            }
            Panel::Loading => writeln!(f, "Loading...")?,
            Panel::Error { message, .. } => writeln!(f, "{message}")?,
            Panel::Weather(card) => {
                writeln!(f)?;
                writeln!(f, "{}", card.heading)?;
                writeln!(f, "{}  {}", card.glyph.symbol, card.temperature)?;
                if !card.description.is_empty() {
                    writeln!(f, "{}", card.description)?;
                }
                writeln!(f)?;
                for h in &card.highlights {
                    writeln!(f, "  {:<11}{}", h.kind.label(), h.value)?;
                }
                if !card.forecast.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "{}-day forecast", card.forecast.len())?;
                    for row in &card.forecast {
                        writeln!(f, "  {:<10} {}  {}", row.weekday, row.glyph.symbol, row.temperature)?;
                    }
                }
            }
        }

        Ok(())
    }
}
