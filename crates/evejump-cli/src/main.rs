use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use evejump_lib::{
    default_dataset_dir, load_starmap, max_jump_range, plan_jump_route, DogmaAttributes,
    JumpRouteRequest, PathResult, SearchLimits, Starmap, SystemId, UNIVERSE_DB_FILENAME,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "EVE Online jump-route planning utilities")]
struct Cli {
    /// Override the dataset directory.
    #[arg(long)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a jump route through one or more destinations.
    Route {
        /// Starting system name.
        #[arg(long)]
        from: String,
        /// Destination system names, visited in order.
        #[arg(long = "to", required = true)]
        to: Vec<String>,
        /// Hull type id used for the jump-range lookup.
        #[arg(long, default_value_t = 671)]
        ship_type_id: i64,
        /// Jump calibration skill level (usually 0-5).
        #[arg(long, default_value_t = 0)]
        skill: u8,
        /// System names to keep out of every leg.
        #[arg(long = "avoid")]
        avoid: Vec<String>,
        /// Also avoid systems currently under incursion.
        #[arg(long)]
        avoid_incursions: bool,
        /// JSON file with the list of incursion system ids.
        #[arg(long)]
        incursions: Option<PathBuf>,
        /// Cap on search iterations per leg.
        #[arg(long)]
        max_iterations: Option<usize>,
        /// Emit the computed legs as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective maximum jump range for a hull and skill level.
    Range {
        /// Hull type id used for the jump-range lookup.
        #[arg(long, default_value_t = 671)]
        ship_type_id: i64,
        /// Jump calibration skill level (usually 0-5).
        #[arg(long, default_value_t = 0)]
        skill: u8,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let dataset_dir = resolve_dataset_dir(cli.dataset.as_deref())?;

    match cli.command {
        Command::Route {
            from,
            to,
            ship_type_id,
            skill,
            avoid,
            avoid_incursions,
            incursions,
            max_iterations,
            json,
        } => handle_route(
            &dataset_dir,
            &RouteArgs {
                from,
                to,
                ship_type_id,
                skill,
                avoid,
                avoid_incursions,
                incursions,
                max_iterations,
                json,
            },
        ),
        Command::Range {
            ship_type_id,
            skill,
        } => handle_range(&dataset_dir, ship_type_id, skill),
    }
}

#[derive(Debug)]
struct RouteArgs {
    from: String,
    to: Vec<String>,
    ship_type_id: i64,
    skill: u8,
    avoid: Vec<String>,
    avoid_incursions: bool,
    incursions: Option<PathBuf>,
    max_iterations: Option<usize>,
    json: bool,
}

fn handle_route(dataset_dir: &Path, args: &RouteArgs) -> Result<()> {
    let starmap = load_starmap(dataset_dir).with_context(|| {
        format!("failed to load dataset from {}", dataset_dir.display())
    })?;
    let attributes = DogmaAttributes::from_path(&dataset_dir.join(UNIVERSE_DB_FILENAME))
        .context("failed to load ship attribute data")?;

    let start = starmap.resolve_name(&args.from)?;
    let destinations = args
        .to
        .iter()
        .map(|name| starmap.resolve_name(name).map_err(anyhow::Error::from))
        .collect::<Result<Vec<SystemId>>>()?;
    let avoid_systems = args
        .avoid
        .iter()
        .map(|name| starmap.resolve_name(name).map_err(anyhow::Error::from))
        .collect::<Result<HashSet<SystemId>>>()?;

    let incursion_systems = match &args.incursions {
        Some(path) => load_incursion_systems(path)?,
        None => Vec::new(),
    };

    let request = JumpRouteRequest {
        start,
        destinations,
        ship_type_id: args.ship_type_id,
        skill_level: args.skill,
        avoid_systems,
        avoid_incursions: args.avoid_incursions,
        incursion_systems,
        limits: SearchLimits {
            max_iterations: args.max_iterations,
        },
    };

    let results = plan_jump_route(&starmap, &attributes, &request);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        render_route_text(&starmap, &args.to, &request.destinations, &results);
    }

    Ok(())
}

fn handle_range(dataset_dir: &Path, ship_type_id: i64, skill: u8) -> Result<()> {
    let attributes = DogmaAttributes::from_path(&dataset_dir.join(UNIVERSE_DB_FILENAME))
        .context("failed to load ship attribute data")?;

    let range = max_jump_range(&attributes, ship_type_id, skill);
    println!("Maximum jump range for hull {ship_type_id} at skill {skill}: {range:.2} ly");
    Ok(())
}

/// Print each planned leg, noting destinations no leg could reach.
fn render_route_text(
    starmap: &Starmap,
    destination_names: &[String],
    destinations: &[SystemId],
    results: &[PathResult],
) {
    let mut legs = results.iter();
    let mut current = legs.next();

    for (name, &id) in destination_names.iter().zip(destinations) {
        match current {
            Some(result) if result.path.last() == Some(&id) => {
                let index = results.len() - legs.len();
                println!(
                    "Leg {index}: {} -> {} ({} jumps, {:.2} ly)",
                    display_name(starmap, result.path[0]),
                    display_name(starmap, id),
                    result.jump_count(),
                    result.total_distance
                );
                for (hop, segment) in result.segments.iter().enumerate() {
                    println!(
                        "  {}. {} -> {} ({:.2} ly)",
                        hop + 1,
                        display_name(starmap, segment.from),
                        display_name(starmap, segment.to),
                        segment.light_years
                    );
                }
                current = legs.next();
            }
            _ => println!("No route found to {name}."),
        }
    }
}

fn display_name(starmap: &Starmap, id: SystemId) -> String {
    starmap
        .name(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("<{id}>"))
}

/// Read a JSON array of system ids flagged by the incursion feed.
fn load_incursion_systems(path: &Path) -> Result<Vec<SystemId>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open incursion list {}", path.display()))?;
    let systems: Vec<SystemId> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse incursion list {}", path.display()))?;
    Ok(systems)
}

fn resolve_dataset_dir(flag: Option<&Path>) -> Result<PathBuf> {
    match flag {
        Some(dir) => Ok(dir.to_path_buf()),
        None => default_dataset_dir().context("failed to resolve the default dataset directory"),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
