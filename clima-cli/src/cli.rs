use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use clima_core::{Config, Search, WeatherService, WeatherView, frame, service_from_config};
use inquire::{InquireError, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Weather and crop risk for sugarcane growers")]
pub struct Cli {
    /// Backend base URL; overrides CLIMA_API_URL and the config file.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search cities interactively (default).
    Search,

    /// Show weather for a single city and exit.
    Show {
        /// City name, e.g. "Ribeirão Preto".
        city: String,
    },

    /// Check that the backend is up.
    Health,

    /// Set the backend API URL.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        let api_url = self.api_url.as_deref();

        match self.command.unwrap_or(Command::Search) {
            Command::Search => {
                let service = service_from_config(&config, api_url)?;
                interactive(service.as_ref()).await
            }
            Command::Show { city } => {
                let service = service_from_config(&config, api_url)?;
                show(service.as_ref(), &city).await
            }
            Command::Health => {
                let service = service_from_config(&config, api_url)?;
                let health = service.health_check().await?;
                println!("{} ({} v{})", health.status, health.service, health.version);
                Ok(())
            }
            Command::Configure => configure(&mut config),
        }
    }
}

async fn show(service: &dyn WeatherService, city: &str) -> anyhow::Result<()> {
    let mut view = WeatherView::new();
    let search = view.begin(city)?;
    print!("{}", frame(&view));

    let result = service.fetch_weather(search.city()).await;
    view.complete(search, result);
    print!("{}", frame(&view));

    if view.error_message().is_some() {
        bail!("weather lookup for '{}' failed", city.trim());
    }
    Ok(())
}

async fn interactive(service: &dyn WeatherService) -> anyhow::Result<()> {
    let mut view = WeatherView::new();

    loop {
        println!();
        print!("{}", frame(&view));

        let help = if view.error_message().is_some() {
            "Enter a city to search again, leave blank to retry, Esc to quit"
        } else {
            "Esc to quit"
        };
        let input = match Text::new("City:").with_help_message(help).prompt() {
            Ok(input) => input,
            Err(e) if is_cancel(&e) => break,
            Err(e) => return Err(e).context("Failed to read city"),
        };

        let Some(search) = accept_input(&mut view, &input) else { continue };
        print!("{}", frame(&view));

        let result = service.fetch_weather(search.city()).await;
        view.complete(search, result);
    }

    Ok(())
}

/// Turn one answer to the city prompt into a search, if it starts one.
///
/// On the error screen a blank answer dismisses the error instead of
/// recording a validation notice.
fn accept_input(view: &mut WeatherView, input: &str) -> Option<Search> {
    if input.trim().is_empty() && view.retry() {
        return None;
    }
    view.begin(input).ok()
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let current = config.api_url();
    let url = Text::new("Backend API URL:")
        .with_default(&current)
        .prompt()
        .context("Failed to read API URL")?;

    config.set_api_url(&url)?;
    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}
