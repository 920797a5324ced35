use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Curvature-adjusted speed estimation for routed rail corridors
#[derive(Parser, Debug)]
#[command(name = "curvspeed", version, about)]
pub struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Worker threads for segment evaluation (overrides the settings file)
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect the network segments traversed by routed corridors
    Extract {
        /// Network edges as GeoJSON LineStrings
        #[arg(long)]
        network: PathBuf,
        /// Routed corridor paths as GeoJSON LineStrings keyed by `from_to`
        #[arg(long)]
        routes: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Estimate the curvature-adjusted speed of every segment
    Estimate {
        #[arg(long)]
        segments: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Speed cap in mph (overrides the settings file)
        #[arg(long)]
        max_speed: Option<f64>,
        /// Densification spacing in geometry units (overrides the settings file)
        #[arg(long)]
        spacing: Option<f64>,
    },
    /// Aggregate segment speeds into length-weighted corridor figures
    Aggregate {
        /// Segments carrying `curv_speed_mph`
        #[arg(long)]
        segments: PathBuf,
        /// Corridor summary table
        #[arg(long)]
        csv: PathBuf,
        /// Corridor geometries to enrich with the summary
        #[arg(long, requires = "out")]
        corridors: Option<PathBuf>,
        /// Enriched corridor GeoJSON
        #[arg(long, requires = "corridors")]
        out: Option<PathBuf>,
    },
    /// Print statistics about a segment file
    Inspect {
        #[arg(long)]
        segments: PathBuf,
        /// Number of most frequent speeds to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}
