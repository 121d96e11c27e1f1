/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and simulation counters to be displayed in the overlay and the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time and the dt fed to the engine
 * - Swarm and satellite counts
 * - Engine ticks and the simulation clock
 */

use std::time::Duration;

use crate::physics::FluidEngine;

// Debug information to display
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub last_dt_ms: f32,
    pub swarm_count: usize,
    pub satellite_count: usize,
    pub ticks: u64,
    pub clock_ms: f64,
}

impl DebugInfo {
    // Refresh the simulation counters from the engine
    pub fn record_engine(&mut self, engine: &FluidEngine) {
        self.swarm_count = engine.swarms().len();
        self.satellite_count = engine.satellite_count();
        self.ticks = engine.ticks();
        self.clock_ms = engine.clock_ms();
    }

    // Lines shown in the overlay, top to bottom
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Tick dt: {:.2} ms", self.last_dt_ms),
            format!("Swarms: {}", self.swarm_count),
            format!("Satellites: {}", self.satellite_count),
            format!("Ticks: {}", self.ticks),
            format!("Clock: {:.1} s", self.clock_ms / 1000.0),
        ]
    }
}
