/*
 * Liquid Store - Module Definitions
 *
 * This file defines the module structure for the Liquid Store application.
 * The simulation core (swarm, physics, selection, render_loop) has no window
 * dependency; app, input, renderer and ui wire it into nannou.
 */

// Re-export key components for easier access
pub use app::Model;
pub use catalog::Item;
pub use debug::DebugInfo;
pub use input::{PointerState, PointerTracker};
pub use params::SimulationSettings;
pub use physics::FluidEngine;
pub use render_loop::RenderLoop;
pub use selection::SelectionPolicy;
pub use swarm::{Satellite, Swarm};

// Define modules
pub mod app;
pub mod catalog;
pub mod cli;
pub mod debug;
pub mod input;
pub mod params;
pub mod physics;
pub mod render_loop;
pub mod renderer;
pub mod selection;
pub mod surface;
pub mod swarm;
pub mod ui;

// Constants
pub const SWARM_RADIUS: f32 = 60.0;
pub const WRAP_MARGIN: f32 = 50.0;
