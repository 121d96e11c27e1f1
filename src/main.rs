/*
 * Liquid Store
 *
 * A deep-sea storefront: every catalog item is a swarm of glowing particles
 * drifting on a simulated ocean current. Hovering a swarm reveals the item,
 * pressing pulls nearby swarms toward the pointer, and clicking opens the
 * item detail view. The control panel adjusts depth, temperature, current
 * direction and flow speed in real time.
 */

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use liquid_store::app::{self, StartupConfig};
use liquid_store::catalog;
use liquid_store::cli::Args;
use liquid_store::params::SimulationSettings;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let items = match &args.catalog {
        Some(path) => catalog::load_catalog(path).with_context(|| format!("loading catalog {}", path.display()))?,
        None => catalog::demo_catalog(),
    };

    let settings = match &args.settings {
        Some(path) => SimulationSettings::load(path).with_context(|| format!("loading settings {}", path.display()))?,
        None => SimulationSettings::default(),
    };

    tracing::info!(items = items.len(), seed = ?args.seed, "starting liquid store");

    app::configure(StartupConfig {
        items,
        settings,
        seed: args.seed,
        selection_policy: args.selection_policy(),
    });

    nannou::app(app::model).update(app::update).exit(app::exit).run();

    Ok(())
}
