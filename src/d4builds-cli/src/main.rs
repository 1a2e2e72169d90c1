mod cli;
mod commands;
mod config;
mod guides;
mod net;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;
use commands::configure::ConfigUpdate;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "d4builds=info,d4builds_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sync {
            classes,
            output,
            flat,
            no_tierlist,
        } => {
            commands::sync::handle(classes, output, flat, no_tierlist)?;
        }

        Commands::Transform {
            planner,
            mapping,
            url,
            tier,
            flat,
            profile,
        } => {
            commands::transform::handle(&planner, &mapping, &url, &tier, flat, profile)?;
        }

        Commands::Configure {
            show,
            output_dir,
            delay_ms,
            tierlist_url,
            item_names,
        } => {
            commands::configure::handle(
                show,
                ConfigUpdate {
                    output_dir,
                    delay_ms,
                    tierlist_url,
                    item_names,
                },
            )?;
        }
    }

    Ok(())
}
