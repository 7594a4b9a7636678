use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::InquireError;

use weathernow_core::{Config, IpLocator, OpenWeatherClient, WeatherView};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathernow", version, about = "Current weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather once and exit.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,

        /// Detect the device position instead of searching by name.
        #[arg(long)]
        locate: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city, locate }) => show(city, locate).await,
            None => interactive().await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn build_view(config: &Config) -> Result<WeatherView> {
    let client = OpenWeatherClient::from_config(config)?;
    Ok(WeatherView::new(
        Box::new(client),
        Box::new(IpLocator::new()),
        config.default_city.clone(),
    ))
}

async fn show(city: Option<String>, locate: bool) -> Result<()> {
    let config = Config::load()?;
    let mut view = build_view(&config)?;

    if locate {
        view.detect_location().await;
    } else {
        let city = city.unwrap_or_else(|| config.default_city.clone());
        view.set_query(city);
        view.submit_search().await;
    }

    println!("{}", render::panel(&view));
    Ok(())
}

/// The interactive session: search, detect location, repeat.
async fn interactive() -> Result<()> {
    let config = Config::load()?;
    let mut view = build_view(&config)?;

    // Detect the location once at session start. On denial the default
    // city stays unfetched until the user searches manually.
    println!("{}", render::detect_label(true));
    view.detect_location().await;
    println!("{}", render::panel(&view));

    loop {
        let search = format!("Search city ({})", view.query());
        let detect = render::detect_label(false).to_string();

        let choice = match inquire::Select::new(
            "WeatherNow",
            vec![search.clone(), detect.clone(), "Quit".to_string()],
        )
        .prompt()
        {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        if choice == search {
            let city = inquire::Text::new("City name:")
                .with_initial_value(view.query())
                .prompt()?;
            if city.trim().is_empty() {
                continue;
            }
            view.set_query(city);
            view.submit_search().await;
        } else if choice == detect {
            println!("{}", render::detect_label(true));
            view.detect_location().await;
        } else {
            break;
        }

        println!("{}", render::panel(&view));
    }

    Ok(())
}
