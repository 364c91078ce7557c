//! Climo CLI - where does a day's weather fall in a station's record?

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use climo::{
    render_page, Climo, ClimoConfig, Dashboard, DashboardEvent, DashboardState, RenderedView,
    WeatherVariable,
};
use log::{info, warn};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "climo", version, about = "Daily climatology from the Iowa Environmental Mesonet")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// Daily observation service URL
    #[arg(long, global = true, env = "CLIMO_OBSERVATIONS_URL")]
    observations_url: Option<String>,
    /// Station directory service URL
    #[arg(long, global = true, env = "CLIMO_STATIONS_URL")]
    stations_url: Option<String>,
    /// First year of the record
    #[arg(long, global = true, env = "CLIMO_START_YEAR")]
    start_year: Option<i32>,
    /// Network type appended to region codes
    #[arg(long, global = true, env = "CLIMO_NETWORK_TOKEN")]
    network_token: Option<String>,
    /// Era width in years
    #[arg(long, global = true, env = "CLIMO_ERA_WIDTH")]
    era_width: Option<u16>,
    /// Number of histogram bins
    #[arg(long, global = true, env = "CLIMO_HISTOGRAM_BINS")]
    histogram_bins: Option<usize>,
}

impl ConfigArgs {
    fn into_config(self) -> ClimoConfig {
        ClimoConfig::builder()
            .maybe_observations_url(self.observations_url)
            .maybe_stations_url(self.stations_url)
            .maybe_start_year(self.start_year)
            .maybe_network_token(self.network_token)
            .maybe_era_width(self.era_width)
            .maybe_histogram_bins(self.histogram_bins)
            .build()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render the climatology of one calendar day
    View {
        #[arg(long, env = "CLIMO_NETWORK")]
        network: String,
        #[arg(long, env = "CLIMO_STATION")]
        station: String,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "max_temp_f", value_parser = parse_variable)]
        variable: WeatherVariable,
        /// HTML output path
        #[arg(long, default_value = "climo.html")]
        out: PathBuf,
        /// Print the view as JSON instead of writing HTML
        #[arg(long)]
        json: bool,
        /// Also write an interactive per-era histogram next to the page
        #[cfg(feature = "plotting")]
        #[arg(long)]
        plotly: bool,
    },
    /// List the stations of a network
    Stations { network: String },
    /// List the selectable networks
    Networks,
    /// Interactive session driven by commands on stdin
    Dashboard {
        #[arg(long, env = "CLIMO_NETWORK")]
        network: String,
        #[arg(long, env = "CLIMO_STATION")]
        station: String,
        #[arg(long, default_value = "climo.html")]
        out: PathBuf,
    },
}

fn parse_variable(s: &str) -> Result<WeatherVariable, String> {
    s.parse::<WeatherVariable>().map_err(|e| e.to_string())
}

async fn write_page(view: &RenderedView, out: &Path) -> Result<()> {
    let page = render_page(view)?;
    tokio::fs::write(out, page)
        .await
        .with_context(|| format!("writing {}", out.display()))?;
    println!("{} -> {}", view.title(), out.display());
    Ok(())
}

fn parse_command(line: &str) -> Result<Option<DashboardEvent>> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(None);
    };
    let argument = parts.next().unwrap_or_default();
    let event = match command {
        "date" => DashboardEvent::DateChanged(
            argument
                .parse()
                .with_context(|| format!("invalid date '{argument}', expected YYYY-MM-DD"))?,
        ),
        "network" => DashboardEvent::NetworkChanged(argument.to_uppercase()),
        "station" => DashboardEvent::StationChanged(argument.to_uppercase()),
        "variable" => DashboardEvent::VariableChanged(argument.parse()?),
        other => bail!("unknown command '{other}'"),
    };
    Ok(Some(event))
}

async fn run_dashboard(climo: Climo, state: DashboardState, out: &Path) -> Result<()> {
    let mut dashboard = Dashboard::new(climo, state);
    match dashboard.load().await {
        Ok(view) => write_page(view, out).await?,
        Err(e) => {
            warn!("Initial load failed: {e}");
            eprintln!("Error: {e}");
        }
    }
    println!("commands: date YYYY-MM-DD | network X | station X | variable X | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "quit" || line == "exit" {
            break;
        }
        let event = match parse_command(line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e:#}");
                continue;
            }
        };
        match dashboard.dispatch(event).await {
            Ok(view) => write_page(view, out).await?,
            Err(e) => {
                warn!("Dispatch failed: {e}");
                eprintln!("Error: {e}");
            }
        }
        let state = dashboard.state();
        info!(
            "State: {} {} {} {}",
            state.date, state.network, state.station, state.variable
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let climo = Climo::with_config(cli.config.into_config())?;

    match cli.command {
        Commands::View {
            network,
            station,
            date,
            variable,
            out,
            json,
            #[cfg(feature = "plotting")]
            plotly,
        } => {
            let mut state = DashboardState::today(network, station);
            state.variable = variable;
            if let Some(date) = date {
                state.date = date;
            }
            let view = climo.render(&state).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                write_page(&view, &out).await?;
            }
            #[cfg(feature = "plotting")]
            if plotly {
                if let RenderedView::Climatology(view) = &view {
                    let path = out.with_extension("plotly.html");
                    climo::write_era_histogram(view, &path)?;
                    println!("plotly -> {}", path.display());
                }
            }
        }
        Commands::Stations { network } => {
            for station in climo.stations(&network).await? {
                println!("{}\t{}", station.code, station.name);
            }
        }
        Commands::Networks => {
            for network in climo.networks() {
                println!("{network}");
            }
        }
        Commands::Dashboard {
            network,
            station,
            out,
        } => run_dashboard(climo, DashboardState::today(network, station), &out).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_date() {
        assert_eq!(
            parse_command("date 2024-02-29").unwrap(),
            Some(DashboardEvent::DateChanged(
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
            ))
        );
    }

    #[test]
    fn test_parse_command_rejects_bad_date() {
        let err = parse_command("date 2024-13-01").unwrap_err();
        assert!(err.to_string().contains("expected YYYY-MM-DD"));
        assert!(parse_command("date").is_err());
    }

    #[test]
    fn test_parse_command_uppercases_codes() {
        assert_eq!(
            parse_command("network wy_asos").unwrap(),
            Some(DashboardEvent::NetworkChanged("WY_ASOS".to_string()))
        );
        assert_eq!(
            parse_command("  station cys ").unwrap(),
            Some(DashboardEvent::StationChanged("CYS".to_string()))
        );
    }

    #[test]
    fn test_parse_command_variable() {
        assert_eq!(
            parse_command("variable precip_in").unwrap(),
            Some(DashboardEvent::VariableChanged(WeatherVariable::PrecipIn))
        );
        assert!(parse_command("variable tavg").is_err());
    }

    #[test]
    fn test_parse_command_unknown_and_blank() {
        let err = parse_command("zoom 3").unwrap_err();
        assert!(err.to_string().contains("unknown command 'zoom'"));
        assert_eq!(parse_command("   ").unwrap(), None);
    }
}
