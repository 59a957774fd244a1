//! Entity construction from a tuning set
//!
//! All sizes and shot templates are validated once in [`EntityFactory::new`];
//! the spawn methods called during a tick cannot fail.

use glam::Vec2;

use super::bounds::Size;
use super::enemy::{Enemy, EnemyKind, Weapon};
use super::entities::{Body, Bonus, BonusKind, Color, Shot, ShotSpec, Star};
use super::grid::SpatialGrid;
use super::ship::{Armament, Ship};
use crate::consts::STAR_SIZE;
use crate::error::Result;
use crate::tuning::Tuning;

/// Per-archetype enemy template
#[derive(Debug, Clone, Copy)]
struct EnemyTemplate {
    vel: Vec2,
    color: Color,
    score: u32,
    weapon: Weapon,
}

#[derive(Debug, Clone)]
pub struct EntityFactory {
    ship_size: Size,
    ship_velocity: f32,
    ship_color: Color,
    ship_tolerance: f32,
    initial_lives: u32,
    armament: Armament,

    enemy_size: Size,
    rect: EnemyTemplate,
    rect_radius: f32,
    rect_frequency: f32,
    tri: EnemyTemplate,
    diamond: EnemyTemplate,

    bonus_size: Size,
    bonus_velocity: f32,
    bonus_visible_time: f32,
    bonus_colors: [Color; 3],

    star_size: Size,
    star_velocity: f32,
}

impl EntityFactory {
    pub fn new(tuning: &Tuning) -> Result<Self> {
        tuning.validate()?;

        let ship_size = Size::new(tuning.ship_width, tuning.ship_height, "ship")?;
        let enemy_size = Size::square(tuning.enemy_size, "enemy")?;
        let enemy_shot = ShotSpec::new(
            enemy_size,
            tuning.enemy_shot_scale,
            tuning.enemy_shot_velocity,
        )?;
        let weapon = |chance| Weapon {
            shot: enemy_shot,
            chance,
            interval: tuning.enemy_shot_interval,
            ms_per_second: tuning.ms_per_second,
        };

        Ok(Self {
            ship_size,
            ship_velocity: tuning.ship_velocity,
            ship_color: tuning.ship_color,
            ship_tolerance: tuning.ship_max_delta,
            initial_lives: tuning.initial_lives,
            armament: Armament {
                shot: ShotSpec::new(ship_size, tuning.shot_scale, tuning.shot_velocity)?,
                shot_interval: tuning.ship_shot_interval,
                bonus_shot_duration: tuning.bonus_shot_duration,
                fast_shot_speed_up: tuning.bonus_fast_shot_speed_up,
                triple_shot_angle: tuning.bonus_triple_shot_angle,
                ms_per_second: tuning.ms_per_second,
            },

            enemy_size,
            rect: EnemyTemplate {
                vel: Vec2::new(0.0, tuning.rect_velocity),
                color: tuning.rect_color,
                score: tuning.rect_score,
                weapon: weapon(tuning.rect_shot_chance),
            },
            rect_radius: tuning.rect_radius,
            rect_frequency: tuning.rect_frequency,
            tri: EnemyTemplate {
                vel: Vec2::new(tuning.tri_x_velocity, tuning.tri_velocity),
                color: tuning.tri_color,
                score: tuning.tri_score,
                weapon: weapon(tuning.tri_shot_chance),
            },
            diamond: EnemyTemplate {
                vel: Vec2::splat(tuning.diamond_velocity),
                color: tuning.diamond_color,
                score: tuning.diamond_score,
                weapon: weapon(tuning.diamond_shot_chance),
            },

            bonus_size: Size::square(tuning.bonus_size, "bonus")?,
            bonus_velocity: tuning.bonus_velocity,
            bonus_visible_time: tuning.bonus_visible_time,
            bonus_colors: [
                tuning.bonus_fast_shot_color,
                tuning.bonus_life_color,
                tuning.bonus_triple_shot_color,
            ],

            star_size: Size::square(STAR_SIZE, "star")?,
            star_velocity: tuning.star_velocity,
        })
    }

    pub fn ship_size(&self) -> Size {
        self.ship_size
    }

    /// Fresh ship with full life, firing into `shots`
    pub fn ship(&self, pos: Vec2, shots: SpatialGrid<Shot>) -> Ship {
        let body = Body::new(
            pos,
            self.ship_size,
            Vec2::splat(self.ship_velocity),
            self.ship_color,
        );
        Ship::new(
            body,
            self.ship_tolerance,
            self.armament,
            self.initial_lives,
            shots,
        )
    }

    pub fn rectangle(&self, pos: Vec2) -> Enemy {
        let kind = EnemyKind::Rectangle {
            base_x: pos.x,
            radius: self.rect_radius,
            frequency: self.rect_frequency,
        };
        self.enemy(pos, kind, &self.rect)
    }

    pub fn triangle(&self, pos: Vec2) -> Enemy {
        self.enemy(pos, EnemyKind::Triangle, &self.tri)
    }

    pub fn diamond(&self, pos: Vec2) -> Enemy {
        self.enemy(pos, EnemyKind::Diamond, &self.diamond)
    }

    fn enemy(&self, pos: Vec2, kind: EnemyKind, template: &EnemyTemplate) -> Enemy {
        let body = Body::new(pos, self.enemy_size, template.vel, template.color);
        Enemy::new(body, kind, template.score, template.weapon)
    }

    pub fn bonus(&self, kind: BonusKind, pos: Vec2) -> Bonus {
        let color = match kind {
            BonusKind::FastShot => self.bonus_colors[0],
            BonusKind::LifeUp => self.bonus_colors[1],
            BonusKind::TripleShot => self.bonus_colors[2],
        };
        let body = Body::new(
            pos,
            self.bonus_size,
            Vec2::new(0.0, self.bonus_velocity),
            color,
        );
        Bonus::new(body, kind, self.bonus_visible_time)
    }

    pub fn star(&self, pos: Vec2) -> Star {
        Star::new(Body::new(
            pos,
            self.star_size,
            Vec2::new(0.0, self.star_velocity),
            Color::White,
        ))
    }
}
