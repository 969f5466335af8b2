//! Scroll position to normalized progress.
//!
//! The trigger writes progress synchronously on every scroll update into a
//! [`ProgressCell`]; the frame loop reads the cell once per frame. The cell is
//! a plain shared `Cell`, so scroll events never cause anything else to
//! re-run.

use crate::constants::{SCROLL_DISTANCE, SCROLL_PIN};
use std::cell::Cell;
use std::rc::Rc;

/// Single-slot, last-write-wins progress mailbox.
#[derive(Clone, Debug, Default)]
pub struct ProgressCell(Rc<Cell<f32>>);

impl ProgressCell {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.0.get()
    }

    #[inline]
    pub fn set(&self, progress: f32) {
        self.0.set(progress);
    }
}

/// Where the trigger starts relative to the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StartCondition {
    /// Region top meets viewport top.
    #[default]
    TopTop,
    /// Region top meets viewport center.
    TopCenter,
    /// Region top meets viewport bottom.
    TopBottom,
}

impl StartCondition {
    /// Scroll position at which the trigger starts for a region whose top
    /// sits at `region_top` in document coordinates.
    pub fn start_scroll(self, region_top: f64, viewport_height: f64) -> f64 {
        match self {
            StartCondition::TopTop => region_top,
            StartCondition::TopCenter => region_top - viewport_height * 0.5,
            StartCondition::TopBottom => region_top - viewport_height,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ScrollTriggerConfig {
    pub start: StartCondition,
    /// Scroll distance mapped onto progress 0..=1.
    pub distance: f64,
    pub pin: bool,
}

impl Default for ScrollTriggerConfig {
    fn default() -> Self {
        Self {
            start: StartCondition::TopTop,
            distance: SCROLL_DISTANCE,
            pin: SCROLL_PIN,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinPhase {
    Before,
    Pinned,
    After,
}

/// `clamp(position / distance, 0, 1)`. A non-positive distance is a step.
pub fn progress(position: f64, distance: f64) -> f32 {
    if distance <= 0.0 {
        return if position >= 0.0 { 1.0 } else { 0.0 };
    }
    let p = position / distance;
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, 1.0) as f32
}

/// Scroll binding for one pinned region.
#[derive(Debug)]
pub struct ScrollTrigger {
    config: ScrollTriggerConfig,
    start_scroll: f64,
    cell: ProgressCell,
    disposed: bool,
}

impl ScrollTrigger {
    pub fn new(
        config: ScrollTriggerConfig,
        region_top: f64,
        viewport_height: f64,
        cell: ProgressCell,
    ) -> Self {
        let start_scroll = config.start.start_scroll(region_top, viewport_height);
        log::debug!(
            "[scroll] trigger start={:.1} distance={:.1} pin={}",
            start_scroll,
            config.distance,
            config.pin
        );
        Self {
            config,
            start_scroll,
            cell,
            disposed: false,
        }
    }

    pub fn config(&self) -> &ScrollTriggerConfig {
        &self.config
    }

    pub fn start_scroll(&self) -> f64 {
        self.start_scroll
    }

    pub fn end_scroll(&self) -> f64 {
        self.start_scroll + self.config.distance
    }

    pub fn cell(&self) -> &ProgressCell {
        &self.cell
    }

    /// Re-derive the start after layout changed, e.g. on window resize.
    pub fn set_region(&mut self, region_top: f64, viewport_height: f64) {
        self.start_scroll = self.config.start.start_scroll(region_top, viewport_height);
        log::debug!("[scroll] trigger re-measured start={:.1}", self.start_scroll);
    }

    /// Height of the pin spacer holding a container of `container_height`
    /// stuck for the whole trigger distance.
    pub fn pin_length(&self, container_height: f64) -> f64 {
        container_height.max(0.0) + self.config.distance.max(0.0)
    }

    /// Write progress for a document scroll position. Returns the written
    /// value, or `None` once the trigger has been disposed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<f32> {
        if self.disposed {
            return None;
        }
        let p = progress(scroll_y - self.start_scroll, self.config.distance);
        self.cell.set(p);
        Some(p)
    }

    pub fn pin_phase(&self, scroll_y: f64) -> PinPhase {
        if scroll_y < self.start_scroll {
            PinPhase::Before
        } else if scroll_y <= self.end_scroll() {
            PinPhase::Pinned
        } else {
            PinPhase::After
        }
    }

    /// Stop publishing. Returns `true` only the first time.
    pub fn dispose(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        log::debug!("[scroll] trigger disposed");
        true
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
