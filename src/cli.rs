/*
 * Command Line Module
 *
 * Startup flags for the Liquid Store window.
 */

use clap::Parser;
use std::path::PathBuf;

use crate::selection::SelectionPolicy;

#[derive(Parser, Debug)]
#[command(name = "liquid-store", author, version, about, long_about = None)]
pub struct Args {
    /// Catalog JSON file (array of items); the built-in demo catalog is used when omitted
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Seed for swarm placement, for reproducible layouts
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Initial simulation settings (JSON)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Resolve overlapping swarms to the one whose center is closest to the click
    #[arg(long)]
    pub nearest: bool,
}

impl Args {
    pub fn selection_policy(&self) -> SelectionPolicy {
        if self.nearest {
            SelectionPolicy::Nearest
        } else {
            SelectionPolicy::FirstFound
        }
    }
}
