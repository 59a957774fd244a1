//! Read-only view of the world for renderers and menus
//!
//! A snapshot is an owned copy, so it can be handed to another thread or
//! serialized without holding on to the simulation.

use serde::{Deserialize, Serialize};

use super::bounds::Bounded;
use super::difficulty::Difficulty;
use super::enemy::EnemyKind;
use super::entities::{BonusKind, Color, Shot};
use super::grid::SpatialGrid;
use super::ship::Ship;
use super::state::{GameMode, Simulation};
use crate::error::Result;

/// What a renderer should draw for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Ship,
    Rectangle,
    Triangle,
    Diamond,
    Shot,
    Bonus(BonusKind),
    Star,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub sprite: Sprite,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

impl EntityView {
    fn of(entity: &impl Bounded, sprite: Sprite, color: Color) -> Self {
        Self {
            sprite,
            x: entity.x(),
            y: entity.y(),
            width: entity.width(),
            height: entity.height(),
            color,
        }
    }
}

/// Ship plus the numbers the HUD shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub body: EntityView,
    pub life: u32,
    /// Hearts to draw, capped at `max_shown_hearts`
    pub hearts: u32,
    /// Life exceeds the heart cap; draw the number instead
    pub show_life_label: bool,
    pub triple_shot_time: f32,
    pub fast_shot_time: f32,
    pub destroyed: bool,
}

impl ShipView {
    fn new(ship: &Ship, max_shown_hearts: u32) -> Self {
        let life = ship.life();
        Self {
            body: EntityView::of(ship, Sprite::Ship, ship.body.color),
            life,
            hearts: life.min(max_shown_hearts),
            show_life_label: life > max_shown_hearts,
            triple_shot_time: ship.triple_shot_time(),
            fast_shot_time: ship.fast_shot_time(),
            destroyed: ship.is_destroyed(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub width: i32,
    pub height: i32,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub score: u32,
    pub level: u32,
    pub game_over: bool,
    pub ship: Option<ShipView>,
    pub enemies: Vec<EntityView>,
    pub enemy_shots: Vec<EntityView>,
    pub player_shots: Vec<EntityView>,
    pub bonuses: Vec<EntityView>,
    pub stars: Vec<EntityView>,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Everything drawn, back to front
    pub fn drawables(&self) -> impl Iterator<Item = &EntityView> {
        self.stars
            .iter()
            .chain(&self.bonuses)
            .chain(&self.enemy_shots)
            .chain(&self.player_shots)
            .chain(&self.enemies)
            .chain(self.ship.as_ref().map(|s| &s.body))
    }
}

impl Simulation {
    pub fn snapshot(&self) -> WorldSnapshot {
        let shots = |grid: &SpatialGrid<Shot>| -> Vec<EntityView> {
            grid.iter()
                .map(|s| EntityView::of(s, Sprite::Shot, s.body.color))
                .collect()
        };

        WorldSnapshot {
            width: self.width(),
            height: self.height(),
            mode: self.mode(),
            difficulty: self.difficulty(),
            score: self.score(),
            level: self.level(),
            game_over: self.is_game_over(),
            ship: self
                .ship()
                .map(|s| ShipView::new(s, self.tuning().max_shown_hearts)),
            enemies: self
                .enemies()
                .iter()
                .map(|e| {
                    let sprite = match e.kind {
                        EnemyKind::Rectangle { .. } => Sprite::Rectangle,
                        EnemyKind::Triangle => Sprite::Triangle,
                        EnemyKind::Diamond => Sprite::Diamond,
                    };
                    EntityView::of(e, sprite, e.body.color)
                })
                .collect(),
            enemy_shots: shots(self.enemy_shots()),
            player_shots: self.player_shots().map(shots).unwrap_or_default(),
            bonuses: self
                .bonuses()
                .iter()
                .map(|b| EntityView::of(b, Sprite::Bonus(b.kind), b.body.color))
                .collect(),
            stars: self
                .stars()
                .iter()
                .map(|s| EntityView::of(s, Sprite::Star, s.body.color))
                .collect(),
        }
    }
}
