//! Retained scene graph
//!
//! In-memory [`DisplayAdapter`] holding one node per live entity. The GPU
//! renderer draws it; tests and the native build use it on its own.

use std::collections::BTreeMap;

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::parse_hex_color;
use crate::sim::{DisplayAdapter, EntityId, EntityKind, SceneNode};

/// Segments used for asteroid circles
const ASTEROID_SEGMENTS: u32 = 20;

#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<EntityId, SceneNode>,
    /// Changed since the last flush
    dirty: bool,
    flushes: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: EntityId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    /// Number of `update` calls so far
    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    /// True if anything changed since the last flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Build the triangle list for the current scene, in play-field pixels
    ///
    /// Asteroids go first so the astronaut is always drawn on top.
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut vertices = Vec::new();

        for node in self.nodes.values().filter(|n| n.kind == EntityKind::Asteroid) {
            let color = parse_hex_color(node.color).unwrap_or(colors::FALLBACK);
            let radius = node.size.x.min(node.size.y) * 0.5;
            vertices.extend(shapes::circle(center(node), radius, color, ASTEROID_SEGMENTS));
            vertices.extend(shapes::ring(
                center(node),
                radius * 0.8,
                radius,
                colors::ASTEROID_RIM,
                ASTEROID_SEGMENTS,
            ));
        }

        for node in self.nodes.values().filter(|n| n.kind == EntityKind::Astronaut) {
            vertices.extend(astronaut(node));
        }

        vertices
    }
}

fn center(node: &SceneNode) -> Vec2 {
    node.pos + node.size * 0.5
}

/// Suit body with a helmet and visor on top
fn astronaut(node: &SceneNode) -> Vec<Vertex> {
    let suit = parse_hex_color(node.color).unwrap_or(colors::FALLBACK);
    let body_pos = node.pos + Vec2::new(node.size.x * 0.15, node.size.y * 0.45);
    let body_size = Vec2::new(node.size.x * 0.7, node.size.y * 0.55);
    let helmet = node.pos + Vec2::new(node.size.x * 0.5, node.size.y * 0.3);
    let helmet_radius = node.size.x * 0.3;

    let mut vertices = shapes::rect(body_pos, body_size, suit);
    vertices.extend(shapes::circle(helmet, helmet_radius, suit, 16));
    vertices.extend(shapes::circle(helmet, helmet_radius * 0.65, colors::VISOR, 16));
    vertices
}

impl DisplayAdapter for SceneGraph {
    fn add_entity(&mut self, node: SceneNode) {
        self.nodes.insert(node.id, node);
        self.dirty = true;
    }

    fn remove_entity(&mut self, id: EntityId) {
        if self.nodes.remove(&id).is_some() {
            self.dirty = true;
        }
    }

    fn set_position(&mut self, id: EntityId, pos: Vec2) {
        if let Some(node) = self.nodes.get_mut(&id) {
            if node.pos != pos {
                node.pos = pos;
                self.dirty = true;
            }
        }
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.dirty = true;
    }

    fn update(&mut self) {
        self.flushes += 1;
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: EntityId, kind: EntityKind, x: f32) -> SceneNode {
        SceneNode {
            id,
            kind,
            pos: Vec2::new(x, 100.0),
            size: Vec2::splat(40.0),
            color: "#e74c3c",
        }
    }

    #[test]
    fn test_add_remove_and_move() {
        let mut scene = SceneGraph::new();
        scene.add_entity(node(1, EntityKind::Astronaut, 0.0));
        scene.add_entity(node(2, EntityKind::Asteroid, 50.0));
        assert_eq!(scene.len(), 2);

        scene.set_position(2, Vec2::new(60.0, 120.0));
        assert_eq!(scene.node(2).unwrap().pos, Vec2::new(60.0, 120.0));

        scene.remove_entity(2);
        scene.remove_entity(2);
        scene.set_position(2, Vec2::ZERO);
        assert_eq!(scene.len(), 1);
        assert!(!scene.contains(2));
    }

    #[test]
    fn test_flush_clears_dirty() {
        let mut scene = SceneGraph::new();
        scene.add_entity(node(1, EntityKind::Astronaut, 0.0));
        assert!(scene.is_dirty());
        scene.update();
        assert!(!scene.is_dirty());
        assert_eq!(scene.flushes(), 1);

        // Same position is not a change
        scene.set_position(1, Vec2::new(0.0, 100.0));
        assert!(!scene.is_dirty());

        scene.clear();
        assert!(scene.is_empty());
        assert!(scene.is_dirty());
    }

    #[test]
    fn test_astronaut_drawn_last() {
        let mut scene = SceneGraph::new();
        scene.add_entity(node(1, EntityKind::Astronaut, 0.0));
        scene.add_entity(node(2, EntityKind::Asteroid, 50.0));

        let vertices = scene.vertices();
        let astronaut = astronaut(scene.node(1).unwrap());
        let tail = &vertices[vertices.len() - astronaut.len()..];
        assert_eq!(tail.len(), astronaut.len());
        assert_eq!(tail[0].position, astronaut[0].position);
        assert_eq!(vertices.len() % 3, 0);
    }

    #[test]
    fn test_empty_scene_has_no_vertices() {
        assert!(SceneGraph::new().vertices().is_empty());
    }
}
