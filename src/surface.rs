/*
 * Surface Module
 *
 * This module defines the Surface struct that maps between the simulation's
 * surface space (origin top-left, y down) and nannou's window space (origin
 * at the center, y up).
 */

use nannou::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        let mut surface = Self { width: 1.0, height: 1.0 };
        surface.resize(width, height);
        surface
    }

    // Zero or negative sizes are clamped so conversions stay finite
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    // Convert a point from surface space to window space
    pub fn surface_to_window(&self, point: Point2) -> Point2 {
        pt2(point.x - self.width / 2.0, self.height / 2.0 - point.y)
    }

    // Convert a point from window space to surface space
    pub fn window_to_surface(&self, point: Point2) -> Point2 {
        pt2(point.x + self.width / 2.0, self.height / 2.0 - point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_between_spaces() {
        let surface = Surface::new(800.0, 600.0);

        assert_eq!(surface.surface_to_window(pt2(0.0, 0.0)), pt2(-400.0, 300.0));
        assert_eq!(surface.surface_to_window(pt2(800.0, 600.0)), pt2(400.0, -300.0));
        assert_eq!(surface.window_to_surface(pt2(0.0, 0.0)), pt2(400.0, 300.0));
    }

    #[test]
    fn conversions_are_inverse() {
        let surface = Surface::new(1024.0, 768.0);
        let point = pt2(123.0, 456.0);

        assert_eq!(surface.window_to_surface(surface.surface_to_window(point)), point);
    }

    #[test]
    fn degenerate_size_is_clamped() {
        let surface = Surface::new(0.0, -10.0);
        assert_eq!(surface.size(), vec2(1.0, 1.0));
    }
}
