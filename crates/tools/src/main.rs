use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use formats::{EarthquakeFeed, PlateBoundaryFeed};
use layers::legend::Legend;
use runtime::MapConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Inspect saved earthquake and plate boundary feeds offline.
#[derive(Parser, Debug)]
#[command(name = "quakemap", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count markers per depth tier and report the magnitude range.
    Inspect { feed: PathBuf },
    /// Write the styled marker records as JSON.
    Style {
        feed: PathBuf,
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the depth legend HTML.
    Legend,
    /// Summarise plate boundaries by type.
    Plates { feed: PathBuf },
    /// Print the centre tile URL of each base layer.
    Tiles {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Inspect { feed } => {
            let feed = read_quakes(&feed)?;
            println!("{}", tools::summarize_quakes(&feed));
        }
        Command::Style { feed, out } => {
            let feed = read_quakes(&feed)?;
            let styled = tools::styled_quakes(&feed);
            let payload =
                serde_json::to_string_pretty(&styled).map_err(|e| format!("json: {e}"))?;
            match out {
                Some(path) => {
                    fs::write(&path, payload).map_err(|e| format!("write {path:?}: {e}"))?;
                    info!(markers = styled.len(), path = ?path, "wrote styled markers");
                }
                None => println!("{payload}"),
            }
        }
        Command::Legend => println!("{}", Legend::depth().to_html()),
        Command::Plates { feed } => {
            let text = read_text(&feed)?;
            let plates = PlateBoundaryFeed::from_geojson_str(&text)
                .map_err(|e| format!("parse {feed:?}: {e}"))?;
            println!("boundaries: {} (skipped {})", plates.len(), plates.skipped.len());
            for (kind, count) in tools::plate_kinds(&plates) {
                println!("  {kind}: {count}");
            }
        }
        Command::Tiles { config } => {
            let config = match config {
                Some(path) => MapConfig::from_json_str(&read_text(&path)?)
                    .map_err(|e| format!("{path:?}: {e}"))?,
                None => MapConfig::default(),
            };
            for (name, url) in tools::center_tile_urls(&config) {
                println!("{name}: {url}");
            }
        }
    }
    Ok(())
}

fn read_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))
}

fn read_quakes(path: &Path) -> Result<EarthquakeFeed, String> {
    let text = read_text(path)?;
    let feed =
        EarthquakeFeed::from_geojson_str(&text).map_err(|e| format!("parse {path:?}: {e}"))?;
    info!(quakes = feed.len(), skipped = feed.skipped.len(), "read feed");
    Ok(feed)
}
