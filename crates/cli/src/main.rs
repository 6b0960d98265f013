use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use iaroute_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "iaroute-cli", version, about = "Schema tools for the IA routing database")]
struct Cli {
    /// Directory holding base.toml and the per-environment overlays
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ensure collections and indexes exist
    Init,
    /// Report declared collections or indexes missing from the database
    Verify,
    /// Print the declared schema without connecting
    Plan {
        #[arg(long)]
        json: bool,
    },
}

fn load_settings(config_dir: Option<PathBuf>) -> anyhow::Result<Settings> {
    match config_dir {
        Some(dir) => Settings::load_from(dir),
        None => Settings::load(),
    }
    .with_context(|| "failed to load iaroute settings")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config_dir)?;
    iaroute_telemetry::init(&settings.telemetry)?;
    tracing::debug!(command = ?cli.command, env = ?settings.environment, "running command");

    match cli.command {
        Command::Init => {
            let report = iaroute_app::bootstrap(&settings).await?;
            for collection in &report.collections {
                let state = if collection.created { "created" } else { "present" };
                println!(
                    "{} ({}): {}",
                    collection.name,
                    state,
                    collection.indexes.join(", ")
                );
            }
        }
        Command::Verify => {
            let drift = iaroute_app::verify(&settings).await?;
            if !drift.is_empty() {
                for item in &drift {
                    println!("{}", item);
                }
                bail!("schema drift: {} item(s) missing", drift.len());
            }
            println!("schema up to date");
        }
        Command::Plan { json } => {
            let plan = iaroute_app::schema_plan();
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                for collection in &plan {
                    println!("{}", collection.name);
                    for index in &collection.indexes {
                        println!("  {} ({:?})", index.field, index.order);
                    }
                }
            }
        }
    }

    Ok(())
}
