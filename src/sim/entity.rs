//! Movable entities: the astronaut and the asteroids
//!
//! Both are 40x40 boxes anchored at their top-left corner. They share the
//! [`Movable`] contract used by collision tests and the display adapter.

use glam::Vec2;

/// Stable entity identity, also the key of the entity's display node
pub type EntityId = u32;

/// Which kind of entity a display node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Astronaut,
    Asteroid,
}

/// Position/size/render contract shared by every entity
pub trait Movable {
    fn id(&self) -> EntityId;
    fn kind(&self) -> EntityKind;
    /// Authoritative top-left position
    fn pos(&self) -> Vec2;
    fn size(&self) -> Vec2;
    /// Where the entity should be drawn (may lag the authoritative position)
    fn display_pos(&self) -> Vec2 {
        self.pos()
    }
    fn color(&self) -> &'static str;
}

/// The player character
#[derive(Debug, Clone)]
pub struct Astronaut {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Astronaut {
    pub const COLOR: &'static str = "#f5f5f5";

    pub fn new(id: EntityId, pos: Vec2, size: f32) -> Self {
        Self {
            id,
            pos,
            size: Vec2::splat(size),
        }
    }

    /// First-order pointer tracking: close `1 / divisor` of the gap per tick
    pub fn follow_pointer(&mut self, pointer_x: f32, pointer_offset: f32, divisor: f32) {
        let dx = pointer_x - self.pos.x - pointer_offset;
        self.pos.x += dx / divisor;
    }
}

impl Movable for Astronaut {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Astronaut
    }

    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn color(&self) -> &'static str {
        Self::COLOR
    }
}

/// A falling obstacle
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: &'static str,
    /// Visual lag behind `pos.y` while a shift animation is easing in (<= 0)
    pub shift_offset: f32,
}

impl Asteroid {
    pub fn new(id: EntityId, pos: Vec2, size: f32, color: &'static str) -> Self {
        Self {
            id,
            pos,
            size: Vec2::splat(size),
            color,
            shift_offset: 0.0,
        }
    }

    /// Move down immediately, leaving the drawn position behind
    pub fn shift_down(&mut self, distance: f32) {
        self.pos.y += distance;
        self.shift_offset -= distance;
    }

    /// Ease the drawn position toward the authoritative one
    pub fn ease_shift(&mut self, amount: f32) {
        self.shift_offset = (self.shift_offset + amount).min(0.0);
    }
}

impl Movable for Asteroid {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Asteroid
    }

    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn display_pos(&self) -> Vec2 {
        self.pos + Vec2::new(0.0, self.shift_offset)
    }

    fn color(&self) -> &'static str {
        self.color
    }
}
