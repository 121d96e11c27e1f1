/*
 * Input Module
 *
 * This module holds the pointer state the physics engine reads every tick,
 * and the window event handlers that write it.
 *
 * Features:
 * - Single last-write-wins pointer sample, no queueing
 * - Explicit absent state before the first event and after a release
 * - Click resolution against swarm bodies for item selection
 * - Events over the control panel are left to the UI
 */

use nannou::prelude::*;
use nannou::winit::event::MouseButton;

use crate::app::Model;
use crate::selection;

/// The most recent pointer sample, in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
    #[default]
    Absent,
    At { position: Point2, pressed: bool },
}

impl PointerState {
    pub fn position(&self) -> Option<Point2> {
        match *self {
            PointerState::Absent => None,
            PointerState::At { position, .. } => Some(position),
        }
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self, PointerState::At { pressed: true, .. })
    }
}

/// Holds the single pointer sample owned by one engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    state: PointerState,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // Overwrite the sample; the next tick reads whatever is here
    pub fn set(&mut self, x: f32, y: f32, pressed: bool) {
        self.state = PointerState::At {
            position: pt2(x, y),
            pressed,
        };
    }

    // Pointer moved without a button change. The pressed flag is kept so a
    // drag keeps attracting; a move does not end the press.
    pub fn move_to(&mut self, x: f32, y: f32) {
        let pressed = self.state.is_pressed();
        self.set(x, y, pressed);
    }

    // Button released or pointer left the surface
    pub fn release(&mut self) {
        self.state = PointerState::Absent;
    }

    pub fn state(&self) -> PointerState {
        self.state
    }
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    // Always remember where the cursor is, even when nothing is listening
    model.cursor = model.surface.window_to_surface(pos);

    if !model.is_listening() {
        return;
    }

    model.engine.pointer_mut().move_to(model.cursor.x, model.cursor.y);
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || !model.is_listening() {
        return;
    }

    // Check if the press is on the UI before handling it
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    model.pressed_on_surface = true;
    model.engine.pointer_mut().set(model.cursor.x, model.cursor.y, true);
}

// Mouse released event handler; a release on the surface completes a click
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || !model.is_listening() {
        return;
    }

    model.engine.pointer_mut().release();

    if std::mem::take(&mut model.pressed_on_surface) {
        let cursor = model.cursor;
        click(model, cursor);
    }
}

// Pointer left the window
pub fn mouse_exited(_app: &App, model: &mut Model) {
    if model.is_listening() {
        model.engine.pointer_mut().release();
    }
}

// Discrete click at a surface point
pub fn click(model: &mut Model, point: Point2) {
    let hit = selection::resolve(model.engine.swarms(), point, model.selection_policy);

    if let Some(index) = hit {
        let item = model.engine.swarms()[index].item.clone();
        model.select_item(item);
    }
}

// Window resized
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.surface.resize(size.x, size.y);
    model.engine.set_viewport(size.x, size.y);
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    // Pass events to egui
    model.egui.handle_raw_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_absent() {
        let tracker = PointerTracker::new();
        assert_eq!(tracker.state(), PointerState::Absent);
        assert_eq!(tracker.state().position(), None);
        assert!(!tracker.state().is_pressed());
    }

    #[test]
    fn last_write_wins() {
        let mut tracker = PointerTracker::new();
        tracker.set(10.0, 20.0, true);
        tracker.set(30.0, 40.0, false);

        assert_eq!(tracker.state().position(), Some(pt2(30.0, 40.0)));
        assert!(!tracker.state().is_pressed());
    }

    #[test]
    fn moving_keeps_button_state() {
        let mut tracker = PointerTracker::new();
        tracker.set(10.0, 20.0, true);
        tracker.move_to(15.0, 25.0);

        assert_eq!(tracker.state().position(), Some(pt2(15.0, 25.0)));
        assert!(tracker.state().is_pressed());
    }

    #[test]
    fn release_clears_to_absent() {
        let mut tracker = PointerTracker::new();
        tracker.set(0.0, 0.0, true);
        tracker.release();

        assert_eq!(tracker.state(), PointerState::Absent);

        // A move after release brings the pointer back unpressed
        tracker.move_to(5.0, 5.0);
        assert_eq!(
            tracker.state(),
            PointerState::At {
                position: pt2(5.0, 5.0),
                pressed: false
            }
        );
    }
}
