//! Simple entities: shots, bonuses and stars, plus the shared body type
//!
//! The ship and the enemies live in their own modules.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::{Bounded, Size};
use crate::error::SimError;
use crate::heading;

/// Palette shared with the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Yellow,
    Green,
    White,
    Red,
    Blue,
    Orange,
    Purple,
}

/// Position, size, velocity and color common to every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Min corner
    pub pos: Vec2,
    pub size: Size,
    /// Per-axis speed; each entity kind decides how it is applied
    pub vel: Vec2,
    pub color: Color,
}

impl Body {
    pub fn new(pos: Vec2, size: Size, vel: Vec2, color: Color) -> Self {
        Self {
            pos,
            size,
            vel,
            color,
        }
    }
}

impl Bounded for Body {
    #[inline]
    fn position(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    fn size(&self) -> Size {
        self.size
    }
}

/// What an entity collided with, as seen by the entity being notified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collider {
    Ship,
    Enemy,
    Shot,
    Bonus(BonusKind),
}

/// Template for the shots one kind of shooter fires
///
/// Resolved once from the shooter's size and the configured scale, so a
/// shot never needs to look at its parent again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotSpec {
    pub size: Size,
    pub speed: f32,
}

impl ShotSpec {
    pub fn new(parent: Size, scale: f32, speed: f32) -> Result<Self, SimError> {
        Ok(Self {
            size: parent.scaled(scale, "shot")?,
            speed,
        })
    }
}

/// A projectile flying in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    pub body: Body,
    /// Flight direction in degrees (0° = +x, 90° = +y)
    pub angle: f32,
    destroyed: bool,
}

impl Shot {
    /// Shot leaving `origin` with the shooter's color
    pub fn fire(origin: Vec2, spec: &ShotSpec, color: Color, angle: f32) -> Self {
        Self {
            body: Body::new(origin, spec.size, Vec2::splat(spec.speed), color),
            angle,
            destroyed: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.body.pos += heading(self.angle) * self.body.vel * dt;
    }

    /// Any contact ends a shot
    pub fn handle_collision(&mut self, _other: Collider) {
        self.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Bounded for Shot {
    fn position(&self) -> Vec2 {
        self.body.pos
    }
    fn size(&self) -> Size {
        self.body.size
    }
}

/// Bonus types dropped by destroyed enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    /// Shortens the ship's shot interval for a while
    FastShot,
    /// One extra life
    LifeUp,
    /// Three shots per volley for a while
    TripleShot,
}

impl BonusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BonusKind::FastShot => "FastShot",
            BonusKind::LifeUp => "LifeUp",
            BonusKind::TripleShot => "TripleShot",
        }
    }
}

impl fmt::Display for BonusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BonusKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FastShot" => Ok(BonusKind::FastShot),
            "LifeUp" => Ok(BonusKind::LifeUp),
            "TripleShot" => Ok(BonusKind::TripleShot),
            other => Err(SimError::UnknownBonusKind(other.to_string())),
        }
    }
}

/// A collectible drifting down the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub body: Body,
    pub kind: BonusKind,
    elapsed: f32,
    /// Seconds before an uncollected bonus disappears
    visible_time: f32,
    destroyed: bool,
}

impl Bonus {
    pub fn new(body: Body, kind: BonusKind, visible_time: f32) -> Self {
        Self {
            body,
            kind,
            elapsed: 0.0,
            visible_time,
            destroyed: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        self.body.pos.y -= self.body.vel.y * dt;
        if self.elapsed > self.visible_time {
            self.destroyed = true;
        }
    }

    /// Only the ship can pick a bonus up
    pub fn handle_collision(&mut self, other: Collider) {
        if other == Collider::Ship {
            self.destroyed = true;
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Bounded for Bonus {
    fn position(&self) -> Vec2 {
        self.body.pos
    }
    fn size(&self) -> Size {
        self.body.size
    }
}

/// Background decoration; never collides and never dies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub body: Body,
}

impl Star {
    pub fn new(body: Body) -> Self {
        Self { body }
    }

    pub fn update(&mut self, dt: f32) {
        self.body.pos.y -= self.body.vel.y * dt;
    }
}

impl Bounded for Star {
    fn position(&self) -> Vec2 {
        self.body.pos
    }
    fn size(&self) -> Size {
        self.body.size
    }
}
