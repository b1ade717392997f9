//! Display adapter contract
//!
//! The simulation never draws. It keeps a retained scene in sync by adding,
//! moving and removing nodes keyed by [`EntityId`], and asks for a flush once
//! per frame.

use glam::Vec2;

use super::entity::{EntityId, EntityKind, Movable};

/// Everything a display needs to draw one entity
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Top-left corner in play-field pixels
    pub pos: Vec2,
    pub size: Vec2,
    /// Hex color
    pub color: &'static str,
}

impl SceneNode {
    /// Snapshot an entity at its drawn position
    pub fn from_entity<E: Movable + ?Sized>(entity: &E) -> Self {
        Self {
            id: entity.id(),
            kind: entity.kind(),
            pos: entity.display_pos(),
            size: entity.size(),
            color: entity.color(),
        }
    }
}

/// Retained-mode scene the controller drives
pub trait DisplayAdapter {
    /// Start drawing a node (replaces any node with the same id)
    fn add_entity(&mut self, node: SceneNode);
    /// Stop drawing a node; unknown ids are ignored
    fn remove_entity(&mut self, id: EntityId);
    /// Move a node; unknown ids are ignored
    fn set_position(&mut self, id: EntityId, pos: Vec2);
    /// Drop every node (used when a new session starts)
    fn clear(&mut self);
    /// Flush pending changes to the screen
    fn update(&mut self);
}
