//! Hover "squish" for interactive spheres.
//!
//! Hovering expands X/Y and flattens Z. Every frame, hovered or not, the
//! current scale moves a fixed fraction of the way toward the target, so the
//! change is snappy but never instantaneous.

use super::cursor::{CursorLease, PointerCursor};
use super::scene::{NodeId, Scene, SceneError};
use crate::constants::{HOVER_SCALE_XY, HOVER_SCALE_Z, SQUISH_SMOOTHING};
use glam::Vec3;

#[derive(Clone, Copy, Debug)]
pub struct SquishConfig {
    /// Multiplier on the base scale while hovered.
    pub hover_factor: Vec3,
    pub smoothing: f32,
}

impl Default for SquishConfig {
    fn default() -> Self {
        Self {
            hover_factor: Vec3::new(HOVER_SCALE_XY, HOVER_SCALE_XY, HOVER_SCALE_Z),
            smoothing: SQUISH_SMOOTHING,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverState {
    Idle,
    Hovered,
}

/// Exponential smoothing step: `current + (target - current) * factor`.
#[inline]
pub fn smooth_toward(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    current + (target - current) * factor
}

#[derive(Debug)]
pub struct SquishAnimator {
    node: NodeId,
    base_scale: Vec3,
    current: Vec3,
    state: HoverState,
    config: SquishConfig,
    cursor: PointerCursor,
    lease: Option<CursorLease>,
}

impl SquishAnimator {
    pub fn new(node: NodeId, base_scale: Vec3, config: SquishConfig, cursor: PointerCursor) -> Self {
        Self {
            node,
            base_scale,
            current: base_scale,
            state: HoverState::Idle,
            config,
            cursor,
            lease: None,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn current_scale(&self) -> Vec3 {
        self.current
    }

    pub fn base_scale(&self) -> Vec3 {
        self.base_scale
    }

    pub fn set_base_scale(&mut self, base: Vec3) {
        self.base_scale = base;
    }

    pub fn target(&self) -> Vec3 {
        match self.state {
            HoverState::Idle => self.base_scale,
            HoverState::Hovered => self.base_scale * self.config.hover_factor,
        }
    }

    pub fn pointer_enter(&mut self) {
        if self.state == HoverState::Hovered {
            return;
        }
        self.state = HoverState::Hovered;
        self.lease = Some(self.cursor.acquire());
        log::debug!("[hover] enter {:?}", self.node);
    }

    pub fn pointer_leave(&mut self) {
        if self.state == HoverState::Idle {
            return;
        }
        self.state = HoverState::Idle;
        self.lease = None;
        log::debug!("[hover] leave {:?}", self.node);
    }

    /// Same as a leave; the pointer stream was interrupted.
    pub fn pointer_cancel(&mut self) {
        self.pointer_leave();
    }

    /// Advance the smoothing by one frame without touching a scene.
    pub fn step(&mut self) -> Vec3 {
        self.current = smooth_toward(self.current, self.target(), self.config.smoothing);
        self.current
    }

    pub fn frame(&mut self, scene: &mut Scene) -> Result<(), SceneError> {
        let scale = self.step();
        scene.get_mut(self.node)?.scale = scale;
        Ok(())
    }

    /// Drop hover (and the cursor lease) and hand back the node.
    pub fn unmount(mut self) -> NodeId {
        self.pointer_leave();
        self.node
    }
}
