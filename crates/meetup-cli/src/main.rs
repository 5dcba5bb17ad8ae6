//! `meetup` CLI — suggest a meeting time and place from participant data.
//!
//! ## Usage
//!
//! ```sh
//! # Suggest a time window and meeting point (stdin → stdout)
//! cat event.json | meetup plan
//!
//! # Count each participant once, fall back to the first slot if nothing overlaps
//! meetup plan -i event.json --distinct --fallback
//!
//! # Search the location catalog, starts-with matches first
//! meetup search hsr --city bengaluru
//!
//! # Name the catalog entry nearest to a coordinate
//! meetup nearest --lat 12.95 --lng 77.64
//!
//! # Resolve a free-text place name using a custom catalog
//! meetup locate "koramangala 5th block" --catalog mysuru.json
//! ```
//!
//! Set `RUST_LOG` (or pass `-v`) to see diagnostics on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meetup_engine::location::{search_with_limit, Catalog, SEARCH_LIMIT};
use meetup_engine::planner::{
    plan, FallbackPolicy, Participant, PlanOptions, Suggestion, TimePolicy,
};
use meetup_engine::types::{Coordinate, Interval};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Bengaluru neighborhoods used when no `--catalog` is given.
const DEFAULT_CATALOG: &str = include_str!("../data/bengaluru.json");

#[derive(Parser)]
#[command(
    name = "meetup",
    version,
    about = "Suggest meeting times and places for a group"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log diagnostics to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest a time window and meeting point for an event
    ///
    /// Participants give either `lat`/`lng` or a `location_name` that is
    /// looked up in the catalog.
    Plan {
        /// Input event JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Location catalog JSON (defaults to the built-in Bengaluru set)
        #[arg(long)]
        catalog: Option<String>,
        /// Count each participant at most once
        #[arg(long)]
        distinct: bool,
        /// Suggest the first submitted slot when nothing overlaps
        #[arg(long)]
        fallback: bool,
    },
    /// Search catalog entries by partial name
    Search {
        /// Partial location name
        query: String,
        /// Only entries whose city contains this text
        #[arg(long)]
        city: Option<String>,
        /// Maximum number of results
        #[arg(long, default_value_t = SEARCH_LIMIT)]
        limit: usize,
        /// Location catalog JSON (defaults to the built-in Bengaluru set)
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Print the label of the catalog entry nearest to a coordinate
    Nearest {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Location catalog JSON (defaults to the built-in Bengaluru set)
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Resolve a free-text place name to a catalog entry
    Locate {
        /// Place name
        name: String,
        /// Location catalog JSON (defaults to the built-in Bengaluru set)
        #[arg(long)]
        catalog: Option<String>,
    },
}

/// Event input as submitted by the caller.
#[derive(Deserialize)]
struct EventInput {
    #[serde(default)]
    title: Option<String>,
    participants: Vec<ParticipantInput>,
}

#[derive(Deserialize)]
struct ParticipantInput {
    id: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
    /// Free-text place, geocoded against the catalog when `lat`/`lng` are absent.
    #[serde(default)]
    location_name: Option<String>,
    #[serde(default)]
    availability: Vec<Interval>,
}

impl ParticipantInput {
    /// Convert to an engine participant, geocoding `location_name` if needed.
    ///
    /// A name with no catalog match leaves the participant unresolved; no
    /// default coordinate is substituted.
    fn into_participant(self, catalog: &Catalog) -> Participant {
        // A coordinate only counts when both halves were resolved.
        let coordinate = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => self.location_name.as_deref().and_then(|name| {
                let found = catalog.lookup(name).map(|entry| entry.coordinate);
                if found.is_none() {
                    warn!(participant = %self.id, name, "location not found in catalog");
                }
                found
            }),
        };
        Participant {
            id: self.id,
            coordinate,
            availability: self.availability,
        }
    }
}

#[derive(Serialize)]
struct PlanOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    event_title: Option<String>,
    #[serde(flatten)]
    suggestion: Suggestion,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Plan {
            input,
            output,
            catalog,
            distinct,
            fallback,
        } => {
            let raw = read_input(input.as_deref())?;
            let event: EventInput =
                serde_json::from_str(&raw).context("Failed to parse event JSON")?;
            let catalog = load_catalog(catalog.as_deref())?;

            let options = PlanOptions {
                time_policy: if distinct {
                    TimePolicy::MaxDistinct
                } else {
                    TimePolicy::MaxOverlap
                },
                fallback: if fallback {
                    FallbackPolicy::FirstInterval
                } else {
                    FallbackPolicy::None
                },
            };

            let participants: Vec<Participant> = event
                .participants
                .into_iter()
                .map(|p| p.into_participant(&catalog))
                .collect();
            debug!(participants = participants.len(), "planning event");

            let out = PlanOutput {
                event_title: event.title,
                suggestion: plan(&participants, catalog.entries(), options),
            };
            let pretty = serde_json::to_string_pretty(&out)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Search {
            query,
            city,
            limit,
            catalog,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let results = search_with_limit(&query, catalog.entries(), city.as_deref(), limit);
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Nearest { lat, lng, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            println!("{}", catalog.nearest(Coordinate::new(lat, lng)));
        }
        Commands::Locate { name, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let found = catalog
                .lookup(&name)
                .with_context(|| format!("No known location matches '{}'", name))?;
            println!("{}", serde_json::to_string_pretty(found)?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn load_catalog(path: Option<&str>) -> Result<Catalog> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path))?,
        None => DEFAULT_CATALOG.to_string(),
    };
    Catalog::from_json(&json).context("Failed to load location catalog")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
