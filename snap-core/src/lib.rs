//! Core library for the `weathersnap` weather client.
//!
//! This crate defines:
//! - Configuration handling
//! - The weather provider abstraction and its OpenWeather implementation
//! - The lookup flow: retrieval, forecast reduction, geolocation
//! - The session / view-state machine and its renderer
//!
//! It is used by `weathersnap-cli`, but can be driven by any front end that
//! can print a [`render::Screen`].

pub mod config;
pub mod controller;
pub mod error;
pub mod forecast;
pub mod geolocation;
pub mod model;
pub mod provider;
pub mod render;
pub mod retrieval;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use controller::Controller;
pub use error::{ErrorKind, FetchError};
pub use geolocation::{ConfiguredLocator, GeoLocator};
pub use model::{
    ConditionCategory, Coordinates, CurrentConditions, ForecastDay, ForecastReading,
    LocationQuery, WeatherReport,
};
pub use provider::{OpenWeatherProvider, WeatherProvider, provider_from_config};
pub use render::{Screen, render};
pub use retrieval::RetrievalService;
pub use session::{Located, Locating, Session, Settled, Submission, Ticket, ViewState};
