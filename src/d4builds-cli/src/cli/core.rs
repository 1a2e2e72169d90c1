//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "d4builds")]
#[command(about = "Diablo IV build guide sync", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch build guides and write normalized build files
    #[command(visible_alias = "s")]
    Sync {
        /// Only sync these classes (repeatable; defaults to all)
        #[arg(short, long = "class")]
        classes: Vec<String>,

        /// Output directory (overrides configured output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit a single gear map per build instead of per-profile gear
        #[arg(long)]
        flat: bool,

        /// Skip the tier list and use the built-in guide table
        #[arg(long)]
        no_tierlist: bool,
    },

    /// Transform a saved planner payload offline and print the build
    #[command(visible_alias = "t")]
    Transform {
        /// Planner API response (JSON)
        #[arg(short, long)]
        planner: PathBuf,

        /// Mapping table (data.min.json)
        #[arg(short, long)]
        mapping: PathBuf,

        /// Guide URL the planner came from
        #[arg(short, long)]
        url: String,

        /// Tier label
        #[arg(long, default_value = "A")]
        tier: String,

        /// Emit a single gear map
        #[arg(long)]
        flat: bool,

        /// Profile index for --flat
        #[arg(long, requires = "flat")]
        profile: Option<String>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Set delay between builds in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Set tier list page URL
        #[arg(long)]
        tierlist_url: Option<String>,

        /// Set extra item-name overrides TSV
        #[arg(long)]
        item_names: Option<PathBuf>,
    },
}
