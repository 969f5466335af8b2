//! Scroll-driven vertical text reel.
//!
//! Each frame the reel reads the shared progress once, slides its group so
//! that progress 0..=1 sweeps the whole list across the focus line at y = 0,
//! and fades every item by its distance from that line.

use super::fade::{fade, Fade};
use super::progress::ProgressCell;
use super::scene::{NodeId, NodeKind, Scene, SceneError};
use crate::constants::{FADE_RANGE_FACTOR, ITEM_SPACING, REEL_DEPTH_Z};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug)]
pub struct ReelConfig {
    pub spacing: f32,
    pub fade_range_factor: f32,
    pub depth_z: f32,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            spacing: ITEM_SPACING,
            fade_range_factor: FADE_RANGE_FACTOR,
            depth_z: REEL_DEPTH_Z,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ListItem {
    pub index: usize,
    pub text: String,
    pub node: NodeId,
}

/// Pure reel geometry, separated from node bookkeeping.
#[derive(Clone, Copy, Debug)]
pub struct ReelLayout {
    pub count: usize,
    pub spacing: f32,
    pub fade_range_factor: f32,
}

impl ReelLayout {
    pub fn full_height(&self) -> f32 {
        self.count as f32 * self.spacing
    }

    pub fn fade_range(&self) -> f32 {
        self.spacing * self.fade_range_factor
    }

    /// Group offset that centers the list around the midpoint of the sweep.
    pub fn container_offset(&self, progress: f32) -> f32 {
        let full = self.full_height();
        full * progress - full / 2.0
    }

    pub fn item_local_offset(&self, index: usize) -> f32 {
        index as f32 * self.spacing - self.full_height() / 2.0
    }

    /// Fade for `index`; the focus line is y = 0 so the world y is the
    /// signed distance.
    pub fn item_fade(&self, index: usize, progress: f32) -> Fade {
        let world_y = self.container_offset(progress) + self.item_local_offset(index);
        fade(world_y, self.fade_range())
    }
}

#[derive(Debug)]
pub struct TextReel {
    group: NodeId,
    items: SmallVec<[ListItem; 8]>,
    layout: ReelLayout,
    progress: ProgressCell,
}

impl TextReel {
    /// Create the group and one text node per name. Nodes are created once
    /// here and only mutated afterwards.
    pub fn mount<S: AsRef<str>>(
        scene: &mut Scene,
        names: &[S],
        config: ReelConfig,
        font_size: f32,
        progress: ProgressCell,
    ) -> Result<Self, SceneError> {
        let layout = ReelLayout {
            count: names.len(),
            spacing: config.spacing,
            fade_range_factor: config.fade_range_factor,
        };
        let group = scene.insert(NodeKind::Group, None)?;
        scene.get_mut(group)?.position = Vec3::new(0.0, 0.0, config.depth_z);

        let mut items = SmallVec::new();
        for (index, name) in names.iter().enumerate() {
            let text = name.as_ref().to_string();
            let node = scene.insert(
                NodeKind::Text {
                    content: text.clone(),
                    font_size,
                },
                Some(group),
            )?;
            scene.get_mut(node)?.position = Vec3::new(0.0, layout.item_local_offset(index), 0.0);
            items.push(ListItem { index, text, node });
        }
        log::info!("[reel] mounted {} items", layout.count);
        Ok(Self {
            group,
            items,
            layout,
            progress,
        })
    }

    pub fn layout(&self) -> &ReelLayout {
        &self.layout
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn group(&self) -> NodeId {
        self.group
    }

    /// Recompute every item from the current progress. Runs every frame
    /// whether or not progress moved.
    pub fn frame(&self, scene: &mut Scene) -> Result<(), SceneError> {
        let progress = self.progress.get();
        let offset = self.layout.container_offset(progress);
        scene.get_mut(self.group)?.position.y = offset;

        for item in &self.items {
            let f = self.layout.item_fade(item.index, progress);
            let node = scene.get_mut(item.node)?;
            node.opacity = f.opacity;
            node.visible = f.visible();
            node.scale = Vec3::splat(f.scale);
        }
        Ok(())
    }

    pub fn set_font_size(&self, scene: &mut Scene, size: f32) -> Result<(), SceneError> {
        for item in &self.items {
            if let NodeKind::Text { font_size, .. } = &mut scene.get_mut(item.node)?.kind {
                *font_size = size;
            }
        }
        Ok(())
    }

    pub fn unmount(self, scene: &mut Scene) -> Result<(), SceneError> {
        log::info!("[reel] unmount");
        scene.remove(self.group)
    }
}
