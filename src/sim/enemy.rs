//! Enemy ships
//!
//! Three archetypes share one struct; the motion law and the firing pattern
//! are picked by matching on [`EnemyKind`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::{Bounded, Size};
use super::entities::{Body, Collider, Shot, ShotSpec};
use crate::consts::{
    DIAMOND_PHASE_AMPLITUDE, DIAMOND_PHASE_FREQUENCY, DIAMOND_PHASE_THRESHOLD,
    TRIANGLE_SWAY_FREQUENCY,
};

/// Archetype plus its per-instance motion parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Drifts down while swinging sideways around its spawn column
    Rectangle {
        base_x: f32,
        radius: f32,
        frequency: f32,
    },
    /// Drifts down, zig-zagging left and right
    Triangle,
    /// Alternates between moving down, right and left
    Diamond,
}

impl EnemyKind {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Rectangle { .. } => "Rectangle",
            EnemyKind::Triangle => "Triangle",
            EnemyKind::Diamond => "Diamond",
        }
    }
}

/// Probabilistic firing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub shot: ShotSpec,
    /// Fire chance per second
    pub chance: f32,
    /// Minimum time between volleys (ms)
    pub interval: f32,
    pub ms_per_second: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    /// Awarded when a player destroys it
    pub score: u32,
    weapon: Weapon,
    /// Seconds since spawn
    elapsed: f32,
    /// `elapsed` at the last volley
    last_volley: Option<f32>,
    destroyed: bool,
}

impl Enemy {
    pub fn new(body: Body, kind: EnemyKind, score: u32, weapon: Weapon) -> Self {
        Self {
            body,
            kind,
            score,
            weapon,
            elapsed: 0.0,
            last_volley: None,
            destroyed: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        let vel = self.body.vel;
        let pos = &mut self.body.pos;

        match self.kind {
            EnemyKind::Rectangle {
                base_x,
                radius,
                frequency,
            } => {
                pos.y -= vel.y * dt;
                pos.x = base_x + radius * (frequency * self.elapsed).sin();
            }
            EnemyKind::Triangle => {
                pos.y -= vel.y * dt;
                let direction = if (TRIANGLE_SWAY_FREQUENCY * self.elapsed).sin() > 0.0 {
                    1.0
                } else {
                    -1.0
                };
                pos.x += vel.x * direction * dt;
            }
            EnemyKind::Diamond => {
                let phase =
                    DIAMOND_PHASE_AMPLITUDE * (DIAMOND_PHASE_FREQUENCY * self.elapsed).sin();
                if phase > -DIAMOND_PHASE_THRESHOLD && phase < DIAMOND_PHASE_THRESHOLD {
                    pos.y -= vel.y * dt;
                } else if phase > DIAMOND_PHASE_THRESHOLD {
                    pos.x += vel.x * dt;
                } else {
                    pos.x -= vel.x * dt;
                }
            }
        }
    }

    /// Roll for a volley; returns the new shots (possibly none)
    ///
    /// Fires when the roll beats `chance * dt` and the previous volley is
    /// more than the weapon interval ago. The first volley is never held
    /// back by the interval.
    pub fn shot(&mut self, dt: f32, rng: &mut impl Rng) -> Vec<Shot> {
        let roll: f32 = rng.random();
        if roll >= self.weapon.chance * dt {
            return Vec::new();
        }
        if let Some(last) = self.last_volley {
            let since_ms = (self.elapsed - last) * self.weapon.ms_per_second;
            if since_ms <= self.weapon.interval {
                return Vec::new();
            }
        }
        self.last_volley = Some(self.elapsed);

        let Vec2 { x, y } = self.body.pos;
        let (w, h) = (self.body.size.width(), self.body.size.height());
        let pattern: Vec<(f32, f32, f32)> = match self.kind {
            EnemyKind::Rectangle { .. } => vec![
                (x, y, 225.0),
                (x + w, y, 315.0),
                (x, y + h, 135.0),
                (x + w, y + h, 45.0),
            ],
            EnemyKind::Triangle => vec![
                (x + w / 2.0, y, 270.0),
                (x + w, y + h, 30.0),
                (x, y + h, 150.0),
            ],
            EnemyKind::Diamond => vec![
                (x + w, y + h / 2.0, 0.0),
                (x + w / 2.0, y + h, 90.0),
                (x, y + h / 2.0, 180.0),
                (x + w / 2.0, y, 270.0),
            ],
        };

        log::debug!("{} enemy fired {} shots", self.kind.name(), pattern.len());
        pattern
            .into_iter()
            .map(|(sx, sy, angle)| {
                Shot::fire(Vec2::new(sx, sy), &self.weapon.shot, self.body.color, angle)
            })
            .collect()
    }

    /// Player shots and the ship itself destroy an enemy
    pub fn handle_collision(&mut self, other: Collider) {
        if matches!(other, Collider::Shot | Collider::Ship) {
            self.destroyed = true;
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Still at least partly above the bottom edge
    pub fn is_on_screen(&self) -> bool {
        self.body.pos.y > -self.body.size.height()
    }
}

impl Bounded for Enemy {
    fn position(&self) -> Vec2 {
        self.body.pos
    }
    fn size(&self) -> Size {
        self.body.size
    }
}
