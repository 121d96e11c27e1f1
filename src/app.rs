/*
 * Application Module
 *
 * This module defines the main application model and logic for the Liquid
 * Store. It handles initialization, the per-frame update, and teardown.
 *
 * Each nannou update:
 * - Runs the egui control panel and applies what the user asked for
 * - Feeds the frame timestamp through the render loop, which ticks the engine
 * - Refreshes the debug counters
 */

use std::sync::OnceLock;

use nannou::prelude::*;
use nannou_egui::Egui;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::{self, Item};
use crate::debug::DebugInfo;
use crate::input::{mouse_exited, mouse_moved, mouse_pressed, mouse_released, raw_window_event, resized};
use crate::params::SimulationSettings;
use crate::physics::FluidEngine;
use crate::render_loop::RenderLoop;
use crate::renderer::view;
use crate::selection::SelectionPolicy;
use crate::surface::Surface;
use crate::ui::{self, ControlPanel, UiAction};

const WINDOW_WIDTH: u32 = 1024;
const WINDOW_HEIGHT: u32 = 768;

/// Everything the app needs before the window exists.
#[derive(Clone, Debug, Default)]
pub struct StartupConfig {
    pub items: Vec<Item>,
    pub settings: SimulationSettings,
    pub seed: Option<u64>,
    pub selection_policy: SelectionPolicy,
}

static STARTUP: OnceLock<StartupConfig> = OnceLock::new();

// Hand the startup configuration to the model builder. Only the first call wins.
pub fn configure(config: StartupConfig) {
    if STARTUP.set(config).is_err() {
        tracing::warn!("startup configuration already set, ignoring");
    }
}

// Main model for the application
pub struct Model {
    pub engine: FluidEngine,
    pub render_loop: RenderLoop,
    pub surface: Surface,
    pub egui: Egui,
    pub panel: ControlPanel,
    pub debug_info: DebugInfo,
    pub items: Vec<Item>,
    pub selected: Option<Item>,
    pub selection_policy: SelectionPolicy,
    // Last cursor position in surface space
    pub cursor: Point2,
    // Whether the current left press started on the surface rather than the UI
    pub pressed_on_surface: bool,
}

impl Model {
    // Input only reaches the engine while the loop is running
    pub fn is_listening(&self) -> bool {
        self.render_loop.is_running()
    }

    pub fn select_item(&mut self, item: Item) {
        tracing::info!(id = item.id, name = %item.name, "item selected");
        self.engine.set_selected(Some(item.id));
        self.selected = Some(item);
    }

    pub fn clear_selection(&mut self) {
        self.engine.set_selected(None);
        self.selected = None;
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::SettingsChanged(settings) => self.engine.set_settings(settings),
            UiAction::Search(query) => {
                let results: Vec<Item> = catalog::search(&self.items, &query).into_iter().cloned().collect();
                tracing::info!(query = %query, matches = results.len(), "sonar search");
                self.panel.search_results = results;
            }
            UiAction::Select(item) => self.select_item(item),
            UiAction::CloseDetail => self.clear_selection(),
        }
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = STARTUP.get().cloned().unwrap_or_else(|| StartupConfig {
        items: catalog::demo_catalog(),
        ..StartupConfig::default()
    });

    // Create the main window
    let window_id = app
        .new_window()
        .title("Liquid Store")
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .view(view)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_exited(mouse_exited)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    // Get the window
    let window = app.window(window_id).unwrap();
    let (width, height) = window.inner_size_points();

    // Create the UI
    let egui = Egui::from_window(&window);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut engine = FluidEngine::new(config.settings.clone(), width, height);
    engine.seed(&config.items, &mut rng);

    let mut render_loop = RenderLoop::new();
    render_loop.start();

    Model {
        engine,
        render_loop,
        surface: Surface::new(width, height),
        egui,
        panel: ControlPanel::new(config.settings),
        debug_info: DebugInfo::default(),
        items: config.items,
        selected: None,
        selection_policy: config.selection_policy,
        cursor: Point2::ZERO,
        pressed_on_surface: false,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    // Update UI and apply whatever the user asked for
    let actions = ui::update_ui(&mut model.egui, &mut model.panel, model.selected.as_ref(), &model.debug_info);
    for action in actions {
        model.apply(action);
    }

    // One engine tick per display frame
    let timestamp_ms = update.since_start.as_secs_f64() * 1000.0;
    if let Some(dt) = model.render_loop.tick(timestamp_ms, &mut model.engine) {
        model.debug_info.last_dt_ms = dt;
    }

    model.debug_info.record_engine(&model.engine);
}

// Tear down when the app exits
pub fn exit(_app: &App, mut model: Model) {
    model.render_loop.stop();
}
