//! Retained scene graph.
//!
//! Nodes live in an arena and are addressed by generational handles, so a
//! handle kept past its node's removal is detected instead of silently
//! aliasing a newer node. The renderer reads [`Scene::drawables`] once per
//! frame; animation code mutates node properties in place.

use glam::{EulerRot, Mat4, Quat, Vec3};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("stale node handle {0:?}")]
    StaleNode(NodeId),
    #[error("parent {0:?} does not exist")]
    MissingParent(NodeId),
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    Text { content: String, font_size: f32 },
    Sphere { radius: f32 },
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub position: Vec3,
    /// Euler XYZ, radians.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub opacity: f32,
    pub visible: bool,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            opacity: 1.0,
            visible: true,
        }
    }

    pub fn local_matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rot, self.position)
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A leaf node resolved to world space for drawing.
#[derive(Clone, Debug)]
pub struct Drawable<'a> {
    pub id: NodeId,
    pub kind: &'a NodeKind,
    pub world: Mat4,
    /// Own opacity multiplied by every ancestor's.
    pub opacity: f32,
}

impl Drawable<'_> {
    pub fn world_position(&self) -> Vec3 {
        self.world.transform_point3(Vec3::ZERO)
    }

    pub fn world_scale(&self) -> Vec3 {
        self.world.to_scale_rotation_translation().0
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: NodeKind, parent: Option<NodeId>) -> Result<NodeId, SceneError> {
        if let Some(p) = parent {
            if self.get(p).is_err() {
                return Err(SceneError::MissingParent(p));
            }
        }
        let node = Node::new(kind, parent);
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.slots
            .get(id.index())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
            .ok_or(SceneError::StaleNode(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.slots
            .get_mut(id.index())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
            .ok_or(SceneError::StaleNode(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_ok()
    }

    /// Remove a node and everything parented under it.
    pub fn remove(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.get(id)?;
        let children: Vec<NodeId> = self.ids().filter(|c| self.parent_of(*c) == Some(id)).collect();
        for child in children {
            self.remove(child)?;
        }
        let slot = &mut self.slots[id.index()];
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.node.as_ref().map(|_| NodeId {
                index: i as u32,
                generation: s.generation,
            })
        })
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).ok().and_then(|n| n.parent)
    }

    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4, SceneError> {
        let node = self.get(id)?;
        let local = node.local_matrix();
        match node.parent {
            Some(p) => Ok(self.world_matrix(p)? * local),
            None => Ok(local),
        }
    }

    pub fn world_position(&self, id: NodeId) -> Result<Vec3, SceneError> {
        Ok(self.world_matrix(id)?.transform_point3(Vec3::ZERO))
    }

    /// Effective visibility and opacity after walking the ancestor chain.
    fn effective_opacity(&self, id: NodeId) -> Result<Option<f32>, SceneError> {
        let node = self.get(id)?;
        if !node.visible {
            return Ok(None);
        }
        match node.parent {
            Some(p) => Ok(self.effective_opacity(p)?.map(|o| o * node.opacity)),
            None => Ok(Some(node.opacity)),
        }
    }

    /// Visible, non-group nodes in arena order with world transforms.
    pub fn drawables(&self) -> Vec<Drawable<'_>> {
        let mut out = Vec::new();
        for id in self.ids() {
            let Ok(node) = self.get(id) else { continue };
            if matches!(node.kind, NodeKind::Group) {
                continue;
            }
            let (Ok(Some(opacity)), Ok(world)) = (self.effective_opacity(id), self.world_matrix(id))
            else {
                continue;
            };
            out.push(Drawable {
                id,
                kind: &node.kind,
                world,
                opacity,
            });
        }
        out
    }
}
