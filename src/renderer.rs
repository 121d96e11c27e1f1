/*
 * Renderer Module
 *
 * This module paints the current swarm states onto a 2D surface.
 * It draws the deep-sea background, every swarm's satellites, and the item
 * label and glow of hovered swarms.
 *
 * Painting goes through the Canvas trait, in surface coordinates, so the
 * frame composition is independent of the window backend. NannouCanvas is
 * the backend used by the app.
 */

use nannou::color::{rgb, Rgb};
use nannou::prelude::*;

use crate::app::Model;
use crate::surface::Surface;
use crate::swarm::Swarm;
use crate::ui;

// Concentric rings used to approximate a radial gradient
const GLOW_RINGS: usize = 6;

pub fn background_top() -> Rgb<u8> {
    rgb(0x0a, 0x19, 0x2f)
}

pub fn background_bottom() -> Rgb<u8> {
    rgb(0x17, 0x2a, 0x45)
}

pub fn name_color() -> Rgb<u8> {
    rgb(0xcc, 0xd6, 0xf6)
}

pub fn accent_color() -> Rgb<u8> {
    rgb(0x00, 0xff, 0xf0)
}

fn highlight_color() -> Rgb<u8> {
    rgb(0xff, 0xff, 0xff)
}

/// A 2D drawing target in surface coordinates.
pub trait Canvas {
    // Fill the whole surface with a top-to-bottom gradient
    fn vertical_gradient(&mut self, top: Rgb<u8>, bottom: Rgb<u8>);

    // Radial glow: `alpha` at the center fading out at `radius`
    fn glow(&mut self, center: Point2, radius: f32, color: Rgb<u8>, alpha: f32);

    // Text centered horizontally on `position`
    fn label(&mut self, text: &str, position: Point2, color: Rgb<u8>, font_size: u32);
}

/// Paint one frame: background, then every swarm in order.
pub fn paint_frame<C: Canvas + ?Sized>(canvas: &mut C, swarms: &[Swarm]) {
    canvas.vertical_gradient(background_top(), background_bottom());

    for swarm in swarms {
        paint_swarm(canvas, swarm);
    }
}

pub fn paint_swarm<C: Canvas + ?Sized>(canvas: &mut C, swarm: &Swarm) {
    // Satellites carry the category color
    let color = swarm.item.category().color();
    for satellite in swarm.satellites() {
        canvas.glow(satellite.position, satellite.radius, color, satellite.opacity);
    }

    // Item representation only while hovered
    if swarm.is_hovered {
        canvas.glow(swarm.position, swarm.radius, highlight_color(), 0.8 * 0.2);

        let name_pos = pt2(swarm.position.x, swarm.position.y - swarm.radius - 10.0);
        canvas.label(&swarm.item.name, name_pos, name_color(), 14);

        let price_pos = pt2(swarm.position.x, swarm.position.y + swarm.radius + 20.0);
        canvas.label(&swarm.item.formatted_price(), price_pos, accent_color(), 12);
    }

    // Pulsing glow
    if swarm.is_pulse_visible() {
        let alpha = 0.3 + swarm.pulse_phase.sin() * 0.2;
        canvas.glow(swarm.position, swarm.radius * 1.5, accent_color(), alpha);
    }
}

/// Canvas backed by a nannou Draw for one window.
pub struct NannouCanvas<'a> {
    draw: &'a Draw,
    surface: Surface,
}

impl<'a> NannouCanvas<'a> {
    pub fn new(draw: &'a Draw, surface: Surface) -> Self {
        Self { draw, surface }
    }
}

fn to_rgba(color: Rgb<u8>, alpha: f32) -> Rgba {
    rgba(
        color.red as f32 / 255.0,
        color.green as f32 / 255.0,
        color.blue as f32 / 255.0,
        alpha.clamp(0.0, 1.0),
    )
}

impl Canvas for NannouCanvas<'_> {
    fn vertical_gradient(&mut self, top: Rgb<u8>, bottom: Rgb<u8>) {
        let half_w = self.surface.width / 2.0;
        let half_h = self.surface.height / 2.0;

        // Per-vertex colors are interpolated across the quad
        self.draw.polygon().points_colored(vec![
            (pt2(-half_w, half_h), to_rgba(top, 1.0)),
            (pt2(half_w, half_h), to_rgba(top, 1.0)),
            (pt2(half_w, -half_h), to_rgba(bottom, 1.0)),
            (pt2(-half_w, -half_h), to_rgba(bottom, 1.0)),
        ]);
    }

    fn glow(&mut self, center: Point2, radius: f32, color: Rgb<u8>, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }

        let center = self.surface.surface_to_window(center);

        // Stacked translucent rings are densest in the middle
        let ring_alpha = alpha / GLOW_RINGS as f32;
        for ring in 0..GLOW_RINGS {
            let ring_radius = radius * (1.0 - ring as f32 / GLOW_RINGS as f32);
            self.draw
                .ellipse()
                .xy(center)
                .radius(ring_radius)
                .color(to_rgba(color, ring_alpha));
        }
    }

    fn label(&mut self, text: &str, position: Point2, color: Rgb<u8>, font_size: u32) {
        let position = self.surface.surface_to_window(position);
        self.draw
            .text(text)
            .xy(position)
            .color(to_rgba(color, 1.0))
            .font_size(font_size);
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // Begin drawing
    let draw = app.draw();

    // After teardown the last frame stays as it was
    if model.render_loop.is_running() {
        let mut canvas = NannouCanvas::new(&draw, model.surface);
        paint_frame(&mut canvas, model.engine.swarms());

        // Draw debug info if enabled
        if model.panel.show_debug {
            ui::draw_debug_info(&draw, &model.debug_info, app.window_rect());
        }
    }

    // Finish drawing
    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}
