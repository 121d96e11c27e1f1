/*
 * Swarm Module
 *
 * This module defines the Swarm struct and its satellite bodies.
 * Each catalog item is represented by one swarm:
 * 1. A primary body that carries the item and receives the flow forces
 * 2. A fixed set of satellites that orbit the primary body
 * 3. Derived visual state (pulse phase, hover, selection) read by the renderer
 */

use nannou::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::catalog::Item;
use crate::SWARM_RADIUS;

// Satellite count is drawn from this half-open range at construction
pub const SATELLITE_COUNT_RANGE: std::ops::Range<usize> = 20..35;

// Side of the square the satellites are scattered in around the body
const SATELLITE_SPREAD: f32 = 60.0;

// Opacity of the primary body
const SWARM_OPACITY: f32 = 0.6;

/// A small decorative particle orbiting a swarm's primary body.
#[derive(Clone, Debug, PartialEq)]
pub struct Satellite {
    pub position: Point2,
    pub velocity: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

impl Satellite {
    fn scattered<R: Rng + ?Sized>(center: Point2, rng: &mut R) -> Self {
        // Random offset inside a square centered on the body
        let offset = vec2(
            rng.gen_range(-0.5..0.5) * SATELLITE_SPREAD,
            rng.gen_range(-0.5..0.5) * SATELLITE_SPREAD,
        );

        Self {
            position: center + offset,
            velocity: vec2(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
            radius: rng.gen_range(2.0..5.0),
            opacity: rng.gen_range(0.3..0.8),
        }
    }
}

/// The simulated visual unit for one catalog item.
#[derive(Clone, Debug, PartialEq)]
pub struct Swarm {
    pub id: i64,
    pub item: Item,
    pub position: Point2,
    pub velocity: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub pulse_phase: f32,
    pub is_hovered: bool,
    pub is_selected: bool,
    satellites: Vec<Satellite>,
}

impl Swarm {
    /// Seed a swarm for `item` centered on `(x, y)`.
    ///
    /// All randomness comes from `rng`, so a seeded generator gives a
    /// reproducible swarm.
    pub fn new<R: Rng + ?Sized>(item: Item, x: f32, y: f32, rng: &mut R) -> Self {
        let center = pt2(x, y);

        let count = rng.gen_range(SATELLITE_COUNT_RANGE);
        let satellites = (0..count)
            .map(|_| Satellite::scattered(center, rng))
            .collect();

        // Random initial drift
        let vx = rng.gen_range(-0.5..=0.5);
        let vy = rng.gen_range(-0.5..=0.5);

        Self {
            id: item.id,
            item,
            position: center,
            velocity: vec2(vx, vy),
            radius: SWARM_RADIUS,
            opacity: SWARM_OPACITY,
            pulse_phase: rng.gen_range(0.0..TAU),
            is_hovered: false,
            is_selected: false,
            satellites,
        }
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    // The count is fixed for the swarm's lifetime, so only mutable access to
    // the elements is handed out
    pub fn satellites_mut(&mut self) -> &mut [Satellite] {
        &mut self.satellites
    }

    // Distance from the primary body to a point
    pub fn distance_to(&self, point: Point2) -> f32 {
        self.position.distance(point)
    }

    // Whether a point lies strictly inside the visual radius
    pub fn contains(&self, point: Point2) -> bool {
        self.distance_to(point) < self.radius
    }

    // Whether the pulsing glow should be visible this frame
    pub fn is_pulse_visible(&self) -> bool {
        self.is_hovered || self.pulse_phase.sin() > 0.5
    }
}

/// Seed a swarm for `item` at `(x, y)`.
pub fn create_swarm<R: Rng + ?Sized>(item: Item, x: f32, y: f32, rng: &mut R) -> Swarm {
    Swarm::new(item, x, y, rng)
}
