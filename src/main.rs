use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use weatherdash::config::WeatherDashConfig;
use weatherdash::{OpenWeatherClient, Session, Units, dashboard, logging};

/// Fetch the weather for a city and print the dashboard.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// City to look up. Defaults to the first favorite.
    city: Option<String>,

    /// Unit system: metric or imperial
    #[arg(long)]
    units: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// OpenWeatherMap API key, overrides the configured one
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the dashboard as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = WeatherDashConfig::load_from_path(args.config.clone())
        .with_context(|| "Failed to load configuration")?;
    if args.verbose {
        config.logging.level = "debug".to_string();
    }
    logging::init(&config.logging)?;

    let api_key = args.api_key.or_else(|| config.provider.api_key.clone());
    let mut session = Session::from_defaults(&config.defaults, api_key);
    if let Some(units) = &args.units {
        session.units = Units::from_selector(units);
    }

    let city = match args.city.as_deref() {
        Some(city) => city.to_string(),
        None => session
            .favorites()
            .first()
            .cloned()
            .with_context(|| "No city given and no favorites configured")?,
    };
    session.select(&city)?;

    let api_key = session
        .api_key()
        .with_context(|| "No API key. Pass --api-key or set WEATHERDASH_PROVIDER__API_KEY")?;
    let mut client = OpenWeatherClient::new(&config.provider, &config.cache, api_key, session.units)?;

    let limits = config.defaults.forecast_limits();
    let dashboard = match dashboard::load(&mut client, &city, limits).await {
        Ok(dashboard) => dashboard,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        println!("{}", dashboard.render_text());
    }

    Ok(())
}
