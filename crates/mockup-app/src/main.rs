//! Main application entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mockup_app::{App, AppConfig, DirectorySink, Script};
use mockup_core::catalog::Product;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mockup", version, about = "Product mockup editor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded session and write its exports.
    Run {
        /// JSON configuration; defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// JSON script of editor steps.
        #[arg(long)]
        script: PathBuf,
        /// Directory receiving exported PNGs.
        #[arg(long, default_value = "exports")]
        out: PathBuf,
    },
    /// List products and their views.
    Catalog,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, script, out } => {
            let config = match config {
                Some(path) => AppConfig::load(&path)?,
                None => AppConfig::default(),
            };
            let json = std::fs::read_to_string(&script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let parsed = Script::from_json(&json).context("parsing script")?;

            log::info!("Starting mockup editor");
            let base_dir = script
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let mut app = App::new(config)?.with_base_dir(base_dir);
            let mut sink = DirectorySink::new(out);
            let report = app.run_script(&parsed, &mut sink)?;

            log::info!(
                "Replayed {} steps, exported {} files to {:?}",
                report.steps,
                report.exported,
                sink.dir()
            );
            if !report.summaries.is_empty() {
                println!("{}", serde_json::to_string_pretty(&report.summaries)?);
            }
        }
        Commands::Catalog => {
            for product in Product::all() {
                let views: Vec<_> = product.views().iter().map(|view| view.name()).collect();
                println!("{} ({}): {}", product.name(), product.display_name(), views.join(", "));
            }
        }
    }
    Ok(())
}
