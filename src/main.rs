mod config;
mod fetch;
mod groundtrack;
mod propagate;
mod session;
mod web;

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::{Config, SourceConfig};
use crate::fetch::{
    fetch_all, retrieve, source_unavailable, CelestrakSource, DirectorySource, RetrievalError,
};
use crate::groundtrack::compute_track;
use crate::propagate::{ElementSet, Sgp4Propagator};
use crate::session::{run_refresh_loop, Scene, Session};
use crate::web::AppState;

#[derive(Parser)]
#[command(name = "groundtrack")]
#[command(about = "Live satellite ground tracks from two-line element sets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a live session and serve the map surface over HTTP
    Serve {
        #[arg(short, long)]
        config: String,
    },
    /// Compute one revolution of ground track and print it as JSON
    Track {
        #[arg(short, long)]
        config: String,
        /// Catalog number of the object
        #[arg(long)]
        id: u32,
        /// Override the configured sample count
        #[arg(long)]
        samples: Option<usize>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config),
        Commands::Track {
            config,
            id,
            samples,
        } => track(&config, id, samples),
        Commands::Validate { config } => validate(&config),
    }
}

fn load_config(path: &str) -> Option<Config> {
    match Config::from_file(path) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Error loading {}: {}", path, e);
            None
        }
    }
}

fn runtime() -> Option<tokio::runtime::Runtime> {
    match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => Some(rt),
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            None
        }
    }
}

fn validate(path: &str) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    println!(
        "Configuration is valid ({} satellites)",
        config.satellites.len()
    );
    for sat in &config.satellites {
        println!("  {}: {} [{}]", sat.id, sat.name, sat.color);
    }
    ExitCode::SUCCESS
}

fn track(path: &str, id: u32, samples: Option<usize>) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };
    let Some(rt) = runtime() else {
        return ExitCode::FAILURE;
    };

    let settings = match config.track_settings_with(samples) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let set = match rt.block_on(retrieve_one(&config.source, id)) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("Failed TLE for {}: {}", id, e);
            return ExitCode::FAILURE;
        }
    };

    let track = match compute_track(&Sgp4Propagator, id, &set, &settings, Utc::now()) {
        Ok(track) => track,
        Err(e) => {
            eprintln!("Track error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&track) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn serve(path: &str) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };
    let Some(rt) = runtime() else {
        return ExitCode::FAILURE;
    };

    match rt.block_on(run_session(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_session(config: Config) -> std::io::Result<()> {
    let mut session = Session::new(
        config.tracked_objects(),
        Sgp4Propagator,
        Scene::new(),
        config.track_settings(),
    );

    let ids = session.catalog_ids();
    let results = match &config.source {
        SourceConfig::Celestrak(url) => match CelestrakSource::new(url.clone()) {
            Ok(source) => fetch_all(Arc::new(source), &ids).await,
            Err(e) => source_unavailable(&ids, e),
        },
        SourceConfig::Directory(dir) => match DirectorySource::load(dir.clone()) {
            Ok(source) => fetch_all(Arc::new(source), &ids).await,
            Err(e) => source_unavailable(&ids, e),
        },
    };
    session.apply_retrievals(results);

    if let Some(id) = config.initial_selection() {
        // failures are logged by the session and leave the map empty
        let _ = session.select(id, Utc::now());
    }

    let session = Arc::new(Mutex::new(session));
    tokio::spawn(run_refresh_loop(session.clone(), config.refresh.interval));

    web::run_server(&config.web.bind, AppState::new(session)).await
}

async fn retrieve_one(source: &SourceConfig, id: u32) -> Result<ElementSet, RetrievalError> {
    match source {
        SourceConfig::Celestrak(url) => retrieve(&CelestrakSource::new(url.clone())?, id).await,
        SourceConfig::Directory(dir) => retrieve(&DirectorySource::load(dir.clone())?, id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_takes_a_config_flag() {
        for args in [
            vec!["groundtrack", "validate", "--config", "config.example.yaml"],
            vec!["groundtrack", "serve", "-c", "config.example.yaml"],
            vec!["groundtrack", "track", "--config", "c.yaml", "--id", "25544"],
        ] {
            assert!(Cli::try_parse_from(&args).is_ok(), "rejected: {:?}", args);
        }

        let cli = Cli::try_parse_from(["groundtrack", "validate", "--config", "a.yaml"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate { config } if config == "a.yaml"));
    }

    #[test]
    fn track_rejects_zero_samples() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.yaml");
        let cli = Cli::try_parse_from([
            "groundtrack",
            "track",
            "-c",
            path,
            "--id",
            "25544",
            "--samples",
            "0",
        ])
        .unwrap();
        let Commands::Track { config, samples, .. } = cli.command else {
            panic!("expected track command");
        };
        assert_eq!(track(&config, 25544, samples), ExitCode::FAILURE);
    }
}
