/*
 * Simulation Settings Module
 *
 * This module defines the SimulationSettings snapshot that the control panel
 * hands to the engine, and the SettingsEditor the panel edits in place.
 * Every adjustment produces a whole new snapshot; the engine never sees a
 * partially edited value. Change detection follows the snapshot approach:
 * remember the values before the UI runs, compare afterwards.
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Viscosity never drops below this, so swarms never freeze completely
pub const MIN_VISCOSITY: f32 = 0.1;

/// Errors that can occur while loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One complete set of user-adjustable simulation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub depth: f32,             // Reserved for visuals, not read by physics
    pub temperature: f32,       // Drives viscosity
    pub current_direction: f32, // Degrees, 0 points along +x
    pub particle_count: usize,  // Hint only, never resizes existing swarms
    pub flow_speed: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            depth: 50.0,
            temperature: 15.0,
            current_direction: 0.0,
            particle_count: 200,
            flow_speed: 30.0,
        }
    }
}

impl SimulationSettings {
    // Per-tick velocity damping factor; hotter water is less viscous
    pub fn viscosity(&self) -> f32 {
        f32::max(MIN_VISCOSITY, 1.0 - self.temperature * 0.01)
    }

    // Constant per-tick velocity gain from the ambient current
    pub fn flow_force(&self) -> (f32, f32) {
        let angle = self.current_direction.to_radians();
        let strength = self.flow_speed * 0.01;
        (angle.cos() * strength, angle.sin() * strength)
    }

    // Load a settings snapshot from a JSON file; missing fields keep defaults
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    // Get parameter ranges for UI sliders
    pub fn get_depth_range() -> std::ops::RangeInclusive<f32> {
        0.0..=100.0
    }

    pub fn get_temperature_range() -> std::ops::RangeInclusive<f32> {
        0.0..=100.0
    }

    pub fn get_direction_range() -> std::ops::RangeInclusive<f32> {
        0.0..=360.0
    }

    pub fn get_flow_speed_range() -> std::ops::RangeInclusive<f32> {
        0.0..=100.0
    }

    pub fn get_particle_count_range() -> std::ops::RangeInclusive<usize> {
        10..=1000
    }
}

/// Settings being edited by the control panel, with snapshot-based change
/// detection.
#[derive(Debug, Default)]
pub struct SettingsEditor {
    pub current: SimulationSettings,

    // Values as they were before the last UI pass
    previous_values: Option<SimulationSettings>,
}

impl SettingsEditor {
    pub fn new(settings: SimulationSettings) -> Self {
        Self {
            current: settings,
            previous_values: None,
        }
    }

    // Take a snapshot of current values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.current.clone());
    }

    // Returns the full new snapshot when anything changed since the last
    // call to take_snapshot
    pub fn detect_changes(&self) -> Option<SimulationSettings> {
        match &self.previous_values {
            Some(prev) if *prev != self.current => Some(self.current.clone()),
            _ => None,
        }
    }
}
