/*
 * Render Loop Module
 *
 * Drives the engine once per display frame. The host hands in monotonically
 * increasing frame timestamps (milliseconds); the loop turns them into
 * frame-to-frame elapsed time and ticks the engine with it.
 *
 * The loop is cooperative and single threaded: every frame checks the running
 * flag before ticking, so once stop() has been called no further tick runs,
 * whether the frame comes from nannou's update callback or from run().
 */

use std::cell::Cell;
use std::rc::Rc;

use crate::physics::FluidEngine;

// Frame gaps longer than this (window hidden, debugger pause) are capped
pub const MAX_FRAME_DT_MS: f32 = 250.0;

/// Something that produces frame timestamps, one per display refresh.
pub trait FrameSource {
    // Timestamp of the next frame in milliseconds, or None when the host has
    // no more frames to give
    fn next_frame(&mut self) -> Option<f64>;
}

/// Cancels a render loop from outside the loop's owner.
#[derive(Clone, Debug)]
pub struct StopHandle {
    running: Rc<Cell<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

#[derive(Debug)]
pub struct RenderLoop {
    running: Rc<Cell<bool>>,
    last_timestamp: Option<f64>,
    frames: u64,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    // A new loop is stopped until start() is called
    pub fn new() -> Self {
        Self {
            running: Rc::new(Cell::new(false)),
            last_timestamp: None,
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        if self.running.get() {
            return;
        }

        // The first frame after a (re)start has nothing to measure against
        self.last_timestamp = None;
        self.running.set(true);
        tracing::info!("render loop started");
    }

    pub fn stop(&mut self) {
        if self.running.replace(false) {
            tracing::info!(frames = self.frames, "render loop stopped");
        }
        self.last_timestamp = None;
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            running: Rc::clone(&self.running),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    // Number of frames that ticked the engine
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Elapsed milliseconds since the previous frame.
    ///
    /// The first frame yields 0. Timestamps that go backwards yield 0, and
    /// long gaps are capped at [`MAX_FRAME_DT_MS`].
    pub fn frame_delta(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_timestamp {
            Some(previous) => (timestamp_ms - previous) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);

        if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT_MS)
        } else {
            0.0
        }
    }

    /// Tick the engine for the frame at `timestamp_ms`.
    ///
    /// Returns the dt used, or None when the loop is stopped and nothing ran.
    pub fn tick(&mut self, timestamp_ms: f64, engine: &mut FluidEngine) -> Option<f32> {
        if !self.running.get() {
            return None;
        }

        let dt = self.frame_delta(timestamp_ms);
        engine.update(dt);
        self.frames += 1;
        Some(dt)
    }

    /// Run frames from `source` until it runs dry or the loop is stopped.
    ///
    /// `paint` is called after every tick with the updated engine and a stop
    /// handle. Returns the number of frames run by this call.
    pub fn run<S, P>(&mut self, source: &mut S, engine: &mut FluidEngine, mut paint: P) -> u64
    where
        S: FrameSource + ?Sized,
        P: FnMut(&FluidEngine, &StopHandle),
    {
        let handle = self.stop_handle();
        let start = self.frames;

        // Checked before asking for every frame
        while self.running.get() {
            let Some(timestamp) = source.next_frame() else {
                break;
            };

            if self.tick(timestamp, engine).is_some() {
                paint(engine, &handle);
            }
        }

        self.frames - start
    }
}

/// Frames at a fixed interval, for headless hosts and tests.
#[derive(Clone, Debug)]
pub struct FixedFrames {
    next: f64,
    interval_ms: f64,
    remaining: usize,
}

impl FixedFrames {
    pub fn new(start_ms: f64, interval_ms: f64, count: usize) -> Self {
        Self {
            next: start_ms,
            interval_ms,
            remaining: count,
        }
    }
}

impl FrameSource for FixedFrames {
    fn next_frame(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        let timestamp = self.next;
        self.next += self.interval_ms;
        Some(timestamp)
    }
}
