/*
 * Physics Module
 *
 * This module advances every swarm by one time step. Per swarm and tick:
 * 1. Pointer force: attraction while pressed, mild repulsion on hover
 * 2. Ambient flow force from the current direction and flow speed
 * 3. Viscosity damping derived from temperature
 * 4. Explicit Euler integration, then toroidal wrap around the surface
 * 5. Derived visual state (pulse phase, hover flag)
 * 6. Satellite orbiting and opacity easing
 *
 * The engine owns its pointer sample, settings snapshot and simulation clock,
 * so a tick depends only on its inputs and the elapsed time passed in.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::catalog::Item;
use crate::input::{PointerState, PointerTracker};
use crate::params::SimulationSettings;
use crate::swarm::{Satellite, Swarm};
use crate::WRAP_MARGIN;

// Pointer influence radius while the button is held / while hovering
pub const PRESSED_INFLUENCE_RADIUS: f32 = 200.0;
pub const HOVER_INFLUENCE_RADIUS: f32 = 100.0;

// Velocity gain at full pointer force
const ATTRACTION_STRENGTH: f32 = 2.0;
const REPULSION_STRENGTH: f32 = 0.5;

// A swarm counts as hovered when the pointer is closer than this
pub const HOVER_DISTANCE: f32 = 80.0;

// Pulse phase advance per millisecond
const PULSE_RATE: f32 = 0.002;

// Satellite orbit shape and response
const ORBIT_RADIUS: f32 = 30.0;
const ORBIT_RATE: f64 = 0.001;
const SATELLITE_PULL: f32 = 0.02;
const SATELLITE_DAMPING: f32 = 0.95;
const SATELLITE_OPACITY_EASE: f32 = 0.1;
const HOVERED_SATELLITE_OPACITY: f32 = 0.8;
const IDLE_SATELLITE_OPACITY: f32 = 0.3;

// Viewport dimensions never go below this
const MIN_VIEWPORT: f32 = 1.0;

/// The simulation: all swarms plus the inputs that drive them.
#[derive(Debug)]
pub struct FluidEngine {
    swarms: Vec<Swarm>,
    settings: SimulationSettings,
    pointer: PointerTracker,
    viewport: Vec2,
    clock_ms: f64,
    ticks: u64,
}

impl FluidEngine {
    pub fn new(settings: SimulationSettings, width: f32, height: f32) -> Self {
        Self {
            swarms: Vec::new(),
            settings,
            pointer: PointerTracker::new(),
            viewport: clamp_viewport(width, height),
            clock_ms: 0.0,
            ticks: 0,
        }
    }

    // Create one swarm per item at a random spot on the surface
    pub fn seed<R: Rng + ?Sized>(&mut self, items: &[Item], rng: &mut R) {
        let swarms = items
            .iter()
            .map(|item| {
                let x = rng.gen_range(0.0..self.viewport.x);
                let y = rng.gen_range(0.0..self.viewport.y);
                Swarm::new(item.clone(), x, y, rng)
            })
            .collect();

        self.set_swarms(swarms);
    }

    // Replace the whole swarm set; swarms are never added one at a time
    pub fn set_swarms(&mut self, swarms: Vec<Swarm>) {
        self.swarms = swarms;

        tracing::info!(
            swarms = self.swarms.len(),
            satellites = self.satellite_count(),
            "engine seeded"
        );
    }

    pub fn swarms(&self) -> &[Swarm] {
        &self.swarms
    }

    pub fn swarms_mut(&mut self) -> &mut [Swarm] {
        &mut self.swarms
    }

    pub fn satellite_count(&self) -> usize {
        self.swarms.iter().map(|swarm| swarm.satellites().len()).sum()
    }

    // Replace the settings snapshot; the next tick reads it in full
    pub fn set_settings(&mut self, settings: SimulationSettings) {
        tracing::debug!(?settings, "settings replaced");
        self.settings = settings;
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer.state()
    }

    pub fn pointer_mut(&mut self) -> &mut PointerTracker {
        &mut self.pointer
    }

    pub fn set_pointer(&mut self, x: f32, y: f32, pressed: bool) {
        self.pointer.set(x, y, pressed);
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = clamp_viewport(width, height);
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    // Accumulated simulation time in milliseconds
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // Mark one swarm as selected (or none); physics never touches this flag
    pub fn set_selected(&mut self, id: Option<i64>) {
        for swarm in &mut self.swarms {
            swarm.is_selected = Some(swarm.id) == id;
        }
    }

    /// Advance every swarm by `dt` milliseconds.
    pub fn update(&mut self, dt: f32) {
        // Degenerate frame times become an empty step
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.clock_ms += dt as f64;
        self.ticks += 1;

        let pointer = self.pointer.state();
        let orbit_phase = (self.clock_ms * ORBIT_RATE) as f32;

        for swarm in &mut self.swarms {
            update_swarm(swarm, pointer, &self.settings, self.viewport, dt);
            update_satellites(swarm, orbit_phase, dt);
        }
    }
}

fn clamp_viewport(width: f32, height: f32) -> Vec2 {
    // NaN falls through max() to the minimum
    vec2(width.max(MIN_VIEWPORT), height.max(MIN_VIEWPORT))
}

/// Velocity change the pointer applies to a body at `position` this tick.
pub fn pointer_force(pointer: PointerState, position: Point2) -> Vec2 {
    let (target, pressed) = match pointer {
        PointerState::Absent => return Vec2::ZERO,
        PointerState::At { position, pressed } => (position, pressed),
    };

    let delta = target - position;
    let distance = delta.length();

    let influence_radius = if pressed {
        PRESSED_INFLUENCE_RADIUS
    } else {
        HOVER_INFLUENCE_RADIUS
    };

    if distance >= influence_radius {
        return Vec2::ZERO;
    }

    // 0 at the rim, 1 at the pointer
    let force = (influence_radius - distance) / influence_radius;
    let angle = delta.y.atan2(delta.x);
    let direction = vec2(angle.cos(), angle.sin());

    if pressed {
        direction * force * ATTRACTION_STRENGTH
    } else {
        -direction * force * REPULSION_STRENGTH
    }
}

/// Toroidal wrap: leaving one edge by more than the margin re-enters from the
/// opposite edge, just outside it.
pub fn wrap_position(position: Point2, viewport: Vec2) -> Point2 {
    let mut wrapped = position;

    if wrapped.x < -WRAP_MARGIN {
        wrapped.x = viewport.x + WRAP_MARGIN;
    } else if wrapped.x > viewport.x + WRAP_MARGIN {
        wrapped.x = -WRAP_MARGIN;
    }

    if wrapped.y < -WRAP_MARGIN {
        wrapped.y = viewport.y + WRAP_MARGIN;
    } else if wrapped.y > viewport.y + WRAP_MARGIN {
        wrapped.y = -WRAP_MARGIN;
    }

    wrapped
}

fn update_swarm(
    swarm: &mut Swarm,
    pointer: PointerState,
    settings: &SimulationSettings,
    viewport: Vec2,
    dt: f32,
) {
    // Hover is judged from where the swarm was at the start of the tick
    let pointer_distance = pointer.position().map(|p| swarm.distance_to(p));

    swarm.velocity += pointer_force(pointer, swarm.position);

    let (flow_x, flow_y) = settings.flow_force();
    swarm.velocity += vec2(flow_x, flow_y);

    swarm.velocity *= settings.viscosity();

    swarm.position += swarm.velocity * dt;
    swarm.position = wrap_position(swarm.position, viewport);

    swarm.pulse_phase += dt * PULSE_RATE;
    swarm.is_hovered = pointer_distance.map_or(false, |d| d < HOVER_DISTANCE);
}

fn update_satellites(swarm: &mut Swarm, orbit_phase: f32, dt: f32) {
    let center = swarm.position;
    let target_opacity = if swarm.is_hovered {
        HOVERED_SATELLITE_OPACITY
    } else {
        IDLE_SATELLITE_OPACITY
    };

    for satellite in swarm.satellites_mut() {
        orbit_satellite(satellite, center, orbit_phase, target_opacity, dt);
    }
}

fn orbit_satellite(
    satellite: &mut Satellite,
    center: Point2,
    orbit_phase: f32,
    target_opacity: f32,
    dt: f32,
) {
    // Each satellite's own coordinates shift its phase, so the orbits differ
    let target = center
        + vec2(
            (orbit_phase + satellite.position.x).sin() * ORBIT_RADIUS,
            (orbit_phase + satellite.position.y).cos() * ORBIT_RADIUS,
        );

    satellite.velocity += (target - satellite.position) * SATELLITE_PULL;
    satellite.velocity *= SATELLITE_DAMPING;
    satellite.position += satellite.velocity * dt;

    satellite.opacity += (target_opacity - satellite.opacity) * SATELLITE_OPACITY_EASE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still_settings() -> SimulationSettings {
        SimulationSettings {
            flow_speed: 0.0,
            temperature: 100.0,
            ..Default::default()
        }
    }

    fn engine_with_swarm_at(x: f32, y: f32, settings: SimulationSettings) -> FluidEngine {
        let mut engine = FluidEngine::new(settings, 800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(11);
        let swarm = Swarm::new(Item::new(1, "Kelp Mug", 1450, "/mug.jpg"), x, y, &mut rng);
        engine.set_swarms(vec![swarm]);
        engine
    }

    #[test]
    fn pressed_pointer_attracts_with_expected_force() {
        let position = pt2(100.0, 100.0);
        let pointer = PointerState::At {
            position: pt2(130.0, 140.0),
            pressed: true,
        };

        let delta = pointer_force(pointer, position);

        // Distance 50 inside a 200 radius gives force 0.75
        let angle = 40.0f32.atan2(30.0);
        assert!((delta.x - angle.cos() * 0.75 * 2.0).abs() < 1e-5);
        assert!((delta.y - angle.sin() * 0.75 * 2.0).abs() < 1e-5);
        assert!((delta.length() - 1.5).abs() < 1e-5);
    }

    #[test]
    fn hovering_pointer_repels() {
        let position = pt2(100.0, 100.0);
        let pointer = PointerState::At {
            position: pt2(150.0, 100.0),
            pressed: false,
        };

        let delta = pointer_force(pointer, position);

        // Distance 50 inside a 100 radius gives force 0.5, pushed away along -x
        assert!((delta.x + 0.25).abs() < 1e-6);
        assert!(delta.y.abs() < 1e-6);
    }

    #[test]
    fn no_force_outside_influence_or_when_absent() {
        let position = pt2(0.0, 0.0);

        let far_pressed = PointerState::At {
            position: pt2(200.0, 0.0),
            pressed: true,
        };
        let far_hover = PointerState::At {
            position: pt2(100.0, 0.0),
            pressed: false,
        };

        assert_eq!(pointer_force(far_pressed, position), Vec2::ZERO);
        assert_eq!(pointer_force(far_hover, position), Vec2::ZERO);
        assert_eq!(pointer_force(PointerState::Absent, position), Vec2::ZERO);
    }

    #[test]
    fn pure_damping_never_speeds_up() {
        let mut engine = engine_with_swarm_at(400.0, 300.0, still_settings());
        engine.set_pointer(50.0, 580.0, false);
        engine.swarms_mut()[0].velocity = vec2(0.4, -0.3);

        for _ in 0..20 {
            let before = engine.swarms()[0].velocity.length();
            engine.update(16.0);
            let after = engine.swarms()[0].velocity.length();
            assert!(after <= before);
        }
    }

    #[test]
    fn wraps_right_edge_to_left_margin() {
        let mut engine = engine_with_swarm_at(851.0, 300.0, still_settings());
        engine.swarms_mut()[0].velocity = Vec2::ZERO;

        engine.update(16.0);

        let swarm = &engine.swarms()[0];
        assert_eq!(swarm.position.x, -50.0);
        assert_eq!(swarm.velocity.x, 0.0);
    }

    #[test]
    fn wrap_covers_every_edge() {
        let viewport = vec2(800.0, 600.0);

        assert_eq!(wrap_position(pt2(-51.0, 10.0), viewport), pt2(850.0, 10.0));
        assert_eq!(wrap_position(pt2(10.0, -51.0), viewport), pt2(10.0, 650.0));
        assert_eq!(wrap_position(pt2(10.0, 651.0), viewport), pt2(10.0, -50.0));

        // Inside the margin nothing moves
        assert_eq!(wrap_position(pt2(-50.0, 650.0), viewport), pt2(-50.0, 650.0));
    }

    #[test]
    fn zero_viewport_is_clamped() {
        let mut engine = FluidEngine::new(SimulationSettings::default(), 0.0, -5.0);
        assert_eq!(engine.viewport(), vec2(1.0, 1.0));

        engine.set_viewport(f32::NAN, 0.0);
        assert_eq!(engine.viewport(), vec2(1.0, 1.0));

        // Seeding and ticking on a degenerate surface must not panic
        let mut rng = StdRng::seed_from_u64(5);
        engine.seed(&[Item::new(1, "Lamp", 100, "")], &mut rng);
        engine.update(16.0);
        assert_eq!(engine.swarms().len(), 1);
    }

    #[test]
    fn empty_item_list_yields_no_swarms() {
        let mut engine = FluidEngine::new(SimulationSettings::default(), 800.0, 600.0);
        engine.seed(&[], &mut StdRng::seed_from_u64(1));
        engine.update(16.0);

        assert!(engine.swarms().is_empty());
        assert_eq!(engine.satellite_count(), 0);
    }

    #[test]
    fn seeding_places_swarms_on_the_surface() {
        let mut engine = FluidEngine::new(SimulationSettings::default(), 800.0, 600.0);
        let items = crate::catalog::demo_catalog();
        engine.seed(&items, &mut StdRng::seed_from_u64(9));

        assert_eq!(engine.swarms().len(), items.len());
        for (swarm, item) in engine.swarms().iter().zip(&items) {
            assert_eq!(swarm.id, item.id);
            assert!(swarm.position.x >= 0.0 && swarm.position.x < 800.0);
            assert!(swarm.position.y >= 0.0 && swarm.position.y < 600.0);
        }
    }

    #[test]
    fn hover_follows_pointer_distance() {
        let mut engine = engine_with_swarm_at(400.0, 300.0, still_settings());
        engine.swarms_mut()[0].velocity = Vec2::ZERO;

        engine.update(16.0);
        assert!(!engine.swarms()[0].is_hovered);

        engine.set_pointer(460.0, 300.0, false);
        engine.update(16.0);
        assert!(engine.swarms()[0].is_hovered);

        engine.pointer_mut().release();
        engine.update(16.0);
        assert!(!engine.swarms()[0].is_hovered);
    }

    #[test]
    fn pulse_phase_advances_with_time() {
        let mut engine = engine_with_swarm_at(400.0, 300.0, still_settings());
        let start = engine.swarms()[0].pulse_phase;

        engine.update(500.0);

        assert!((engine.swarms()[0].pulse_phase - start - 1.0).abs() < 1e-4);
        assert_eq!(engine.clock_ms(), 500.0);
        assert_eq!(engine.ticks(), 1);
    }

    #[test]
    fn satellite_opacity_eases_toward_hover_target() {
        let mut engine = engine_with_swarm_at(400.0, 300.0, still_settings());
        engine.set_pointer(400.0, 300.0, false);

        for _ in 0..60 {
            engine.update(0.0);
        }
        for satellite in engine.swarms()[0].satellites() {
            assert!((satellite.opacity - 0.8).abs() < 0.01);
        }

        engine.pointer_mut().release();
        engine.update(0.0);
        for satellite in engine.swarms()[0].satellites() {
            // One step covers a tenth of the gap, no jump
            assert!((satellite.opacity - 0.75).abs() < 0.01);
        }
    }

    #[test]
    fn satellites_stay_near_their_swarm() {
        let mut engine = engine_with_swarm_at(400.0, 300.0, still_settings());
        engine.swarms_mut()[0].velocity = Vec2::ZERO;

        for _ in 0..200 {
            engine.update(16.0);
        }

        let swarm = &engine.swarms()[0];
        for satellite in swarm.satellites() {
            assert!(satellite.position.distance(swarm.position) < 300.0);
        }
    }

    #[test]
    fn satellite_count_never_changes() {
        let mut engine = engine_with_swarm_at(400.0, 300.0, SimulationSettings::default());
        let count = engine.swarms()[0].satellites().len();

        for _ in 0..50 {
            engine.update(16.0);
        }

        assert_eq!(engine.swarms()[0].satellites().len(), count);
    }

    #[test]
    fn negative_and_nan_dt_do_not_move_anything() {
        let mut engine = engine_with_swarm_at(400.0, 300.0, still_settings());
        let before = engine.swarms()[0].position;

        engine.update(-16.0);
        engine.update(f32::NAN);

        assert_eq!(engine.swarms()[0].position, before);
        assert_eq!(engine.clock_ms(), 0.0);
    }

    #[test]
    fn selection_flag_is_exclusive() {
        let mut engine = FluidEngine::new(SimulationSettings::default(), 800.0, 600.0);
        engine.seed(&crate::catalog::demo_catalog(), &mut StdRng::seed_from_u64(2));

        engine.set_selected(Some(3));
        let selected: Vec<i64> = engine.swarms().iter().filter(|s| s.is_selected).map(|s| s.id).collect();
        assert_eq!(selected, vec![3]);

        engine.update(16.0);
        assert!(engine.swarms().iter().any(|s| s.is_selected));

        engine.set_selected(None);
        assert!(engine.swarms().iter().all(|s| !s.is_selected));
    }

    #[test]
    fn settings_snapshot_replaces_the_previous_one() {
        let mut engine = engine_with_swarm_at(400.0, 300.0, SimulationSettings::default());
        engine.swarms_mut()[0].velocity = Vec2::ZERO;
        let satellites = engine.satellite_count();

        let reversed = SimulationSettings {
            flow_speed: 100.0,
            current_direction: 180.0,
            temperature: 0.0,
            particle_count: 5,
            ..SimulationSettings::default()
        };
        engine.set_settings(reversed.clone());
        assert_eq!(engine.settings(), &reversed);

        engine.update(1.0);

        // Full current pointing west, no damping
        let velocity = engine.swarms()[0].velocity;
        assert!((velocity.x + 1.0).abs() < 1e-5);
        assert!(velocity.y.abs() < 1e-5);

        // Particle count is a hint only
        assert_eq!(engine.satellite_count(), satellites);
        assert_eq!(engine.swarms()[0].satellites().len(), satellites);
    }

    #[test]
    fn resize_moves_the_wrap_edge() {
        let mut engine = engine_with_swarm_at(100.0, 100.0, still_settings());
        engine.set_viewport(300.0, 300.0);
        assert_eq!(engine.viewport(), vec2(300.0, 300.0));
        assert_eq!(engine.pointer(), PointerState::Absent);

        engine.swarms_mut()[0].position = pt2(351.0, 100.0);
        engine.swarms_mut()[0].velocity = Vec2::ZERO;

        engine.update(16.0);

        assert_eq!(engine.swarms()[0].position.x, -50.0);
        assert_eq!(engine.swarms()[0].velocity.x, 0.0);
    }
}
