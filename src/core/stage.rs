//! The "Expertise In" scene: the text reel plus two floating glass spheres.

use super::cursor::PointerCursor;
use super::float::FloatConfig;
use super::progress::ProgressCell;
use super::reel::{ReelConfig, TextReel};
use super::scene::{NodeId, NodeKind, Scene, SceneError};
use super::squish::{SquishAnimator, SquishConfig};
use super::viewport::{CameraConfig, Viewport};
use crate::constants::FLOAT_PHASE_SPAN;
use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default)]
pub struct StageConfig {
    pub reel: ReelConfig,
    pub squish: SquishConfig,
    pub float: FloatConfig,
    pub camera: CameraConfig,
}

#[derive(Debug)]
struct Orb {
    float_group: NodeId,
    anchor: Vec3,
    phase: f32,
    squish: SquishAnimator,
}

/// Center and radius of a hoverable sphere, for picking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickSphere {
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Debug)]
pub struct TechStackStage {
    scene: Scene,
    reel: Option<TextReel>,
    orbs: SmallVec<[Orb; 2]>,
    config: StageConfig,
    viewport: Viewport,
    hovered: Option<usize>,
}

impl TechStackStage {
    pub fn mount<S: AsRef<str>>(
        names: &[S],
        config: StageConfig,
        viewport: Viewport,
        progress: ProgressCell,
        cursor: PointerCursor,
        rng: &mut impl Rng,
    ) -> Result<Self, SceneError> {
        let mut scene = Scene::new();
        let reel = TextReel::mount(
            &mut scene,
            names,
            config.reel,
            viewport.reel_font_size(),
            progress,
        )?;

        let base = viewport.sphere_scale();
        let mut orbs = SmallVec::new();
        for anchor in viewport.sphere_positions() {
            let float_group = scene.insert(NodeKind::Group, None)?;
            scene.get_mut(float_group)?.position = anchor;
            let sphere = scene.insert(NodeKind::Sphere { radius: 1.0 }, Some(float_group))?;
            scene.get_mut(sphere)?.scale = base;
            orbs.push(Orb {
                float_group,
                anchor,
                phase: rng.gen::<f32>() * FLOAT_PHASE_SPAN,
                squish: SquishAnimator::new(sphere, base, config.squish, cursor.clone()),
            });
        }
        log::info!(
            "[scene] mounted stage viewport={:.2}x{:.2} nodes={}",
            viewport.width,
            viewport.height,
            scene.len()
        );
        Ok(Self {
            scene,
            reel: Some(reel),
            orbs,
            config,
            viewport,
            hovered: None,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn reel(&self) -> Option<&TextReel> {
        self.reel.as_ref()
    }

    pub fn camera(&self) -> &CameraConfig {
        &self.config.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_mounted(&self) -> bool {
        self.reel.is_some()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn orb_count(&self) -> usize {
        self.orbs.len()
    }

    pub fn orb_scale(&self, index: usize) -> Option<Vec3> {
        self.orbs.get(index).map(|o| o.squish.current_scale())
    }

    /// One render frame: reel from progress, squish, float.
    pub fn frame(&mut self, elapsed_sec: f32) -> Result<(), SceneError> {
        let Some(reel) = &self.reel else {
            return Ok(());
        };
        reel.frame(&mut self.scene)?;
        for orb in &mut self.orbs {
            orb.squish.frame(&mut self.scene)?;
            let pose = self.config.float.sample(elapsed_sec, orb.phase);
            let group = self.scene.get_mut(orb.float_group)?;
            group.position = orb.anchor + Vec3::new(0.0, pose.offset_y, 0.0);
            group.rotation = pose.rotation;
        }
        Ok(())
    }

    /// Route a picking result. The previous object leaves before the new one
    /// enters.
    pub fn hover(&mut self, target: Option<usize>) {
        if !self.is_mounted() {
            return;
        }
        let target = target.filter(|i| *i < self.orbs.len());
        if target == self.hovered {
            return;
        }
        if let Some(prev) = self.hovered.take() {
            self.orbs[prev].squish.pointer_leave();
        }
        if let Some(next) = target {
            self.orbs[next].squish.pointer_enter();
        }
        self.hovered = target;
    }

    pub fn cancel_hover(&mut self) {
        if let Some(prev) = self.hovered.take() {
            self.orbs[prev].squish.pointer_cancel();
        }
    }

    /// One slot per orb, in hover index order. An orb whose node cannot be
    /// resolved is `None` rather than dropped.
    pub fn pick_spheres(&self) -> Vec<Option<PickSphere>> {
        self.orbs
            .iter()
            .map(|o| {
                let center = self.scene.world_position(o.squish.node()).ok()?;
                let scale = o.squish.current_scale();
                Some(PickSphere {
                    center,
                    radius: scale.x.max(scale.y),
                })
            })
            .collect()
    }

    /// Re-derive font size and sphere layout without re-creating nodes.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), SceneError> {
        let Some(reel) = &self.reel else {
            return Ok(());
        };
        self.viewport = viewport;
        reel.set_font_size(&mut self.scene, viewport.reel_font_size())?;
        let base = viewport.sphere_scale();
        for (orb, anchor) in self.orbs.iter_mut().zip(viewport.sphere_positions()) {
            orb.anchor = anchor;
            orb.squish.set_base_scale(base);
        }
        log::debug!("[scene] resize {:.2}x{:.2}", viewport.width, viewport.height);
        Ok(())
    }

    /// Tear down every node and release hover state. Returns `false` if the
    /// stage was already unmounted.
    pub fn unmount(&mut self) -> bool {
        let Some(reel) = self.reel.take() else {
            return false;
        };
        self.hovered = None;
        if let Err(e) = reel.unmount(&mut self.scene) {
            log::debug!("[scene] reel unmount: {}", e);
        }
        for orb in self.orbs.drain(..) {
            orb.squish.unmount();
            if let Err(e) = self.scene.remove(orb.float_group) {
                log::debug!("[scene] orb unmount: {}", e);
            }
        }
        log::info!("[scene] unmounted");
        true
    }
}
