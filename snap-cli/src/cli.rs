use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Password, Text};

use weathersnap_core::{
    Config, ConfiguredLocator, Controller, Coordinates, OpenWeatherProvider, ViewState,
    provider_from_config, render,
};

use crate::repl;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathersnap", version, about = "Current weather and a 5-day forecast in your terminal")]
pub struct Cli {
    /// OpenWeather API key; overrides the configured one.
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Latitude to use for location lookups instead of the configured one.
    #[arg(long, global = true, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude to use for location lookups instead of the configured one.
    #[arg(long, global = true, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the API key, location sharing and suggested cities.
    Configure,

    /// Show weather for a city and exit.
    Show {
        /// City name, optionally with a country code ("Paris,FR").
        city: String,
    },

    /// Show weather for your location and exit.
    Here,

    /// Interactive session (the default).
    Run,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(key) = self.api_key.clone() {
            config.set_api_key(key);
        }

        let position = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        };
        let locator = ConfiguredLocator::from_config(&config.location).with_override(position);

        match self.command.unwrap_or(Command::Run) {
            Command::Configure => configure(config),
            Command::Show { city } => {
                let mut controller = controller(&config)?;
                controller.submit_name(city).await;
                print_outcome(&controller, &config)
            }
            Command::Here => {
                let mut controller = controller(&config)?;
                controller.request_geolocation(&locator).await;
                print_outcome(&controller, &config)
            }
            Command::Run => {
                let controller = controller(&config)?;
                repl::run(controller, config.suggestions.clone(), locator).await
            }
        }
    }
}

fn controller(config: &Config) -> anyhow::Result<Controller<OpenWeatherProvider>> {
    let provider = provider_from_config(config)?;
    Ok(Controller::new(provider))
}

/// Prints the final screen; an error state becomes a non-zero exit.
fn print_outcome(controller: &Controller<OpenWeatherProvider>, config: &Config) -> anyhow::Result<()> {
    print!("{}", render(controller.state(), &config.suggestions, &Local));

    match controller.state() {
        ViewState::Error(kind) => Err(anyhow!("lookup failed: {kind}")),
        _ => Ok(()),
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim());

    let share = Confirm::new("Allow weathersnap to use a saved location?")
        .with_default(config.location.share)
        .prompt()?;

    if share {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please enter a number, e.g. 51.5074")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please enter a number, e.g. -0.1278")
            .prompt()?;
        config.share_location(Coordinates::new(latitude, longitude));
    } else {
        config.location.share = false;
    }

    let current = config.suggestions.join(", ");
    let suggestions = Text::new("Suggested cities (comma separated):")
        .with_default(&current)
        .prompt()?;
    config.suggestions = parse_suggestions(&suggestions);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn parse_suggestions(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
