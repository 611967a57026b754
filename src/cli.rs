use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Exact nearest-neighbor search over a star catalog.
#[derive(Parser)]
#[command(
    name = "stars",
    version,
    about = "Exact nearest-neighbor search over a star catalog"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Read commands from stdin, one per line.
    Repl(ReplArgs),
    /// Run a single nearest-neighbor query and exit.
    Neighbors(NeighborsArgs),
}

/// Arguments for the `repl` subcommand.
#[derive(clap::Args)]
pub struct ReplArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Catalog to load before reading commands.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Override RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `neighbors` subcommand.
#[derive(clap::Args)]
pub struct NeighborsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Catalog file; overrides [catalog].path from config.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Number of neighbors to return.
    #[arg(short)]
    pub k: usize,

    /// Query coordinates.
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        required_unless_present = "name",
        conflicts_with = "name"
    )]
    pub coords: Option<Vec<f64>>,

    /// Query from the named star (excluded from its own neighbors).
    #[arg(long)]
    pub name: Option<String>,

    /// Override RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}
