//! Falling binary "rain" drawn onto a 2D surface.
//!
//! [`DropField`] owns the per-column fall state and draws one glyph per
//! column per tick. [`VisibilityGate`] decides when the tick loop should run
//! and [`TickLoop`] holds the one timer that follows it; the browser supplies
//! a `setInterval` backed [`TickScheduler`].

use crate::constants::{
    RAIN_GLYPH_SIZE, RAIN_RESET_PROBABILITY, RAIN_START_ROWS_ABOVE, RAIN_TRAIL_ALPHA,
    RAIN_VISIBILITY_THRESHOLD,
};
use rand::Rng;

#[derive(Clone, Copy, Debug)]
pub struct RainConfig {
    pub glyph_size: f32,
    pub trail_alpha: f32,
    pub reset_probability: f64,
    /// Columns restart somewhere within this many rows above the top edge.
    pub start_rows_above: f32,
    pub visibility_threshold: f64,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            glyph_size: RAIN_GLYPH_SIZE,
            trail_alpha: RAIN_TRAIL_ALPHA,
            reset_probability: RAIN_RESET_PROBABILITY,
            start_rows_above: RAIN_START_ROWS_ABOVE,
            visibility_threshold: RAIN_VISIBILITY_THRESHOLD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Zero,
    One,
}

impl Glyph {
    pub fn as_str(self) -> &'static str {
        match self {
            Glyph::Zero => "0",
            Glyph::One => "1",
        }
    }
}

/// The drawing calls the rain needs from a 2D canvas.
pub trait RainSurface {
    /// Composite a translucent dark rectangle over the whole surface.
    fn fill_trail(&mut self, width: f32, height: f32, alpha: f32);
    fn fill_glyph(&mut self, glyph: Glyph, x: f32, y: f32, size: f32);
}

#[derive(Clone, Debug, PartialEq)]
pub struct DropColumn {
    pub index: usize,
    /// In glyph rows; negative while above the top edge.
    pub fall: f32,
}

#[derive(Debug)]
pub struct DropField<R: Rng> {
    config: RainConfig,
    width: u32,
    height: u32,
    columns: Vec<DropColumn>,
    rng: R,
}

impl<R: Rng> DropField<R> {
    pub fn new(config: RainConfig, width: u32, height: u32, rng: R) -> Self {
        let mut field = Self {
            config,
            width: 0,
            height: 0,
            columns: Vec::new(),
            rng,
        };
        field.resize(width, height);
        field
    }

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn columns(&self) -> &[DropColumn] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `floor(width / glyph_size)`; zero for an unlaid-out surface.
    pub fn column_count_for(&self, width: u32) -> usize {
        if self.config.glyph_size <= 0.0 {
            return 0;
        }
        (width as f32 / self.config.glyph_size).floor() as usize
    }

    /// Replace dimensions and every column in one step. Columns restart at a
    /// random offset above the top edge so they do not fall in lockstep.
    pub fn resize(&mut self, width: u32, height: u32) {
        let count = self.column_count_for(width);
        let above = self.config.start_rows_above.max(0.0);
        let columns = (0..count)
            .map(|index| DropColumn {
                index,
                fall: -self.rng.gen::<f32>() * above,
            })
            .collect();
        self.width = width;
        self.height = height;
        self.columns = columns;
        log::debug!("[rain] resize {}x{} -> {} columns", width, height, count);
    }

    /// Draw one frame. An empty field still lays down the trail overlay.
    pub fn tick<S: RainSurface + ?Sized>(&mut self, surface: &mut S) {
        let size = self.config.glyph_size;
        let height = self.height as f32;
        surface.fill_trail(self.width as f32, height, self.config.trail_alpha);
        for column in &mut self.columns {
            let glyph = if self.rng.gen_bool(0.5) {
                Glyph::One
            } else {
                Glyph::Zero
            };
            surface.fill_glyph(glyph, column.index as f32 * size, column.fall * size, size);
            if column.fall * size > height && self.rng.gen_bool(self.config.reset_probability.clamp(0.0, 1.0)) {
                column.fall = 0.0;
            }
            column.fall += 1.0;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    Stopped,
    Running,
    Disposed,
}

/// What the owner of the tick timer must do after a gate transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateCommand {
    StartTicking,
    StopTicking,
    Nothing,
}

/// Runs the tick loop only while the field is on screen.
///
/// Repeated identical signals are no-ops, so a second `true` never asks for a
/// second loop. Hidden time is simply skipped; nothing is replayed.
#[derive(Debug)]
pub struct VisibilityGate {
    state: GateState,
    threshold: f64,
}

impl VisibilityGate {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: GateState::Stopped,
            threshold,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_running(&self) -> bool {
        self.state == GateState::Running
    }

    /// Feed an intersection observation.
    pub fn observe(&mut self, is_intersecting: bool, ratio: f64) -> GateCommand {
        self.set_visible(is_intersecting && ratio >= self.threshold)
    }

    pub fn set_visible(&mut self, visible: bool) -> GateCommand {
        match (self.state, visible) {
            (GateState::Stopped, true) => {
                self.state = GateState::Running;
                log::debug!("[rain] visible, start ticking");
                GateCommand::StartTicking
            }
            (GateState::Running, false) => {
                self.state = GateState::Stopped;
                log::debug!("[rain] hidden, stop ticking");
                GateCommand::StopTicking
            }
            _ => GateCommand::Nothing,
        }
    }

    /// Terminal. Stops a running loop; later calls do nothing.
    pub fn dispose(&mut self) -> GateCommand {
        let was = self.state;
        self.state = GateState::Disposed;
        if was == GateState::Running {
            GateCommand::StopTicking
        } else {
            GateCommand::Nothing
        }
    }
}

/// Source of the periodic tick. Dropping a handle cancels its timer.
pub trait TickScheduler {
    type Handle;
    fn schedule(&mut self, period_ms: i32) -> Option<Self::Handle>;
}

/// Owns the rain's tick timer and keeps it in step with a [`VisibilityGate`]:
/// at most one timer at a time, none while hidden, none after dispose.
pub struct TickLoop<T: TickScheduler> {
    gate: VisibilityGate,
    scheduler: T,
    period_ms: i32,
    timer: Option<T::Handle>,
}

impl<T: TickScheduler> TickLoop<T> {
    pub fn new(threshold: f64, period_ms: i32, scheduler: T) -> Self {
        Self {
            gate: VisibilityGate::new(threshold),
            scheduler,
            period_ms,
            timer: None,
        }
    }

    pub fn gate(&self) -> &VisibilityGate {
        &self.gate
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_some()
    }

    pub fn observe(&mut self, is_intersecting: bool, ratio: f64) -> GateCommand {
        let cmd = self.gate.observe(is_intersecting, ratio);
        self.apply(cmd);
        cmd
    }

    pub fn set_visible(&mut self, visible: bool) -> GateCommand {
        let cmd = self.gate.set_visible(visible);
        self.apply(cmd);
        cmd
    }

    fn apply(&mut self, cmd: GateCommand) {
        match cmd {
            GateCommand::StartTicking => {
                if self.timer.is_some() {
                    return;
                }
                self.timer = self.scheduler.schedule(self.period_ms);
                if self.timer.is_none() {
                    log::warn!("[rain] could not start ticking");
                    // back to Stopped so the next visible signal retries
                    self.gate.set_visible(false);
                }
            }
            GateCommand::StopTicking => {
                self.timer = None;
            }
            GateCommand::Nothing => {}
        }
    }

    /// Advance the field by one frame if the loop is running. Returns whether
    /// a frame was drawn.
    pub fn tick_field<R: Rng, S: RainSurface + ?Sized>(
        &self,
        field: &mut DropField<R>,
        surface: &mut S,
    ) -> bool {
        if !self.gate.is_running() || self.timer.is_none() {
            return false;
        }
        field.tick(surface);
        true
    }

    /// Terminal. Returns `true` if a live timer was cancelled.
    pub fn dispose(&mut self) -> bool {
        self.gate.dispose();
        self.timer.take().is_some()
    }
}
