/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui: the control panel (depth, temperature, compass, flow
 * speed, sonar search), the item detail view, and the debug overlay.
 * Parameter change detection is handled by the SettingsEditor.
 */

use nannou_egui::{egui, Egui};

use crate::catalog::Item;
use crate::debug::DebugInfo;
use crate::params::{SettingsEditor, SimulationSettings};

/// Control panel state that lives across frames.
#[derive(Debug)]
pub struct ControlPanel {
    pub settings: SettingsEditor,
    pub visible: bool,
    pub show_debug: bool,
    pub search_query: String,
    pub search_results: Vec<Item>,
}

impl ControlPanel {
    pub fn new(settings: SimulationSettings) -> Self {
        Self {
            settings: SettingsEditor::new(settings),
            visible: true,
            show_debug: false,
            search_query: String::new(),
            search_results: Vec::new(),
        }
    }
}

/// Something the user asked for during this UI pass.
#[derive(Clone, Debug, PartialEq)]
pub enum UiAction {
    SettingsChanged(SimulationSettings),
    Search(String),
    Select(Item),
    CloseDetail,
}

// Update the UI and return what the user asked for this frame
pub fn update_ui(
    egui: &mut Egui,
    panel: &mut ControlPanel,
    selected: Option<&Item>,
    debug_info: &DebugInfo,
) -> Vec<UiAction> {
    let mut actions = Vec::new();

    // Take a snapshot of current parameter values for change detection
    panel.settings.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Submarine Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            let label = if panel.visible { "Hide controls" } else { "Show controls" };
            if ui.button(label).clicked() {
                panel.visible = !panel.visible;
            }

            if panel.visible {
                let settings = &mut panel.settings.current;

                ui.collapsing("Environment", |ui| {
                    ui.add(egui::Slider::new(&mut settings.depth, SimulationSettings::get_depth_range()).text("Depth (m)"));
                    ui.add(egui::Slider::new(&mut settings.temperature, SimulationSettings::get_temperature_range()).text("Temperature (°C)"));
                });

                ui.collapsing("Current", |ui| {
                    ui.add(egui::Slider::new(&mut settings.current_direction, SimulationSettings::get_direction_range()).text("Compass (°)"));
                    ui.add(egui::Slider::new(&mut settings.flow_speed, SimulationSettings::get_flow_speed_range()).text("Flow speed"));
                    ui.add(egui::Slider::new(&mut settings.particle_count, SimulationSettings::get_particle_count_range()).text("Particle count"));
                });
            }

            ui.separator();

            // Sonar search
            ui.horizontal(|ui| {
                let response = ui.text_edit_singleline(&mut panel.search_query);
                let submitted = response.lost_focus() && ui.input().key_pressed(egui::Key::Enter);

                if (ui.button("Scan").clicked() || submitted) && !panel.search_query.trim().is_empty() {
                    actions.push(UiAction::Search(std::mem::take(&mut panel.search_query)));
                }
            });

            for item in &panel.search_results {
                if ui.button(format!("{} - {}", item.name, item.formatted_price())).clicked() {
                    actions.push(UiAction::Select(item.clone()));
                }
            }

            ui.separator();

            ui.checkbox(&mut panel.show_debug, "Show Debug Info");
            if panel.show_debug {
                for line in debug_info.lines() {
                    ui.label(line);
                }
            }
        });

    // Item detail view
    if let Some(item) = selected {
        egui::Window::new("Item Detail")
            .default_pos([400.0, 200.0])
            .collapsible(false)
            .show(&ctx, |ui| {
                ui.heading(item.name.as_str());
                ui.label(item.formatted_price());
                ui.label(format!("Image: {}", item.image_url));
                ui.label(format!("Item #{}", item.id));

                if ui.button("Close").clicked() {
                    actions.push(UiAction::CloseDetail);
                }
            });
    }

    // Detect parameter changes
    if let Some(settings) = panel.settings.detect_changes() {
        actions.push(UiAction::SettingsChanged(settings));
    }

    actions
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let lines = debug_info.lines();

    // Create a background panel in the top-right corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    // Draw the background panel
    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_y = window_rect.top() - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(panel_x, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
