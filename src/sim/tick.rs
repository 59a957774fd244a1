//! Per-frame simulation step
//!
//! `Simulation::update` advances the world by a variable time delta. Every
//! collection is rebuilt into a fresh grid: entities that are destroyed or
//! off screen are dropped, the rest are advanced and re-inserted at their new
//! position.

use glam::Vec2;
use rand::Rng;

use super::bounds::Bounded;
use super::collision::detect_collisions;
use super::entities::{Bonus, BonusKind, Shot};
use super::grid::SpatialGrid;
use super::state::{GameMode, Simulation};
use crate::random_coord;

impl Simulation {
    /// Advance the world by `dt` seconds
    ///
    /// Does nothing until the world has been initialized.
    pub fn update(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }
        let (w, h) = self.viewport();

        if self.mode == GameMode::Playing
            && let Some(ship) = self.ship.as_mut()
        {
            detect_collisions(
                ship,
                &mut self.enemies,
                &mut self.enemy_shots,
                &mut self.bonuses,
            );

            let blank = ship.shots().empty_like();
            let shots = ship.replace_shots(blank);
            ship.replace_shots(advance_shots(shots, w, h, dt));
            ship.update(dt);

            let blank = self.bonuses.empty_like();
            let bonuses = std::mem::replace(&mut self.bonuses, blank);
            self.bonuses = advance_bonuses(bonuses, w, h, dt);
        }

        self.generate_enemies(dt);

        let blank = self.enemy_shots.empty_like();
        let shots = std::mem::replace(&mut self.enemy_shots, blank);
        self.enemy_shots = advance_shots(shots, w, h, dt);

        self.update_enemies(dt);
        self.update_stars(dt);

        if self.mode == GameMode::Playing && self.ship.as_ref().is_some_and(|s| s.is_destroyed()) {
            self.mode = GameMode::Background;
            self.game_over = true;
            log::info!("Game over: score {} at {}", self.score, self.difficulty);
        }
    }

    /// Roll once per enemy kind; chance scales with the difficulty factor
    fn generate_enemies(&mut self, dt: f32) {
        let factor = self.difficulty_factor();
        let chances = [
            self.tuning.rect_chance,
            self.tuning.tri_chance,
            self.tuning.diamond_chance,
        ];

        for (kind, chance) in chances.into_iter().enumerate() {
            if self.rng.random::<f32>() >= chance * factor * dt {
                continue;
            }
            let pos = Vec2::new(
                random_coord(&mut self.rng, self.width),
                self.height as f32,
            );
            let enemy = match kind {
                0 => self.factory.rectangle(pos),
                1 => self.factory.triangle(pos),
                _ => self.factory.diamond(pos),
            };
            log::debug!("Spawned {} enemy at x={}", enemy.kind.name(), pos.x);
            self.enemies.insert(enemy);
        }
    }

    /// Drop destroyed and departed enemies, fire, then advance the rest
    ///
    /// Destroyed enemies score and may drop a bonus while playing.
    fn update_enemies(&mut self, dt: f32) {
        let blank = self.enemies.empty_like();
        let old = std::mem::replace(&mut self.enemies, blank);

        for mut enemy in old.into_items() {
            if enemy.is_destroyed() {
                if self.mode == GameMode::Playing {
                    self.score = self.score.saturating_add(enemy.score);
                    self.roll_bonus(enemy.body.pos);
                }
            } else if enemy.is_on_screen() {
                for shot in enemy.shot(dt, &mut self.rng) {
                    self.enemy_shots.insert(shot);
                }
                enemy.update(dt);
                self.enemies.insert(enemy);
            }
        }
    }

    /// Shot bonus first (even split between the two kinds), life bonus only
    /// if that roll failed
    fn roll_bonus(&mut self, pos: Vec2) {
        let kind = if self.rng.random::<f32>() < self.tuning.bonus_shot_chance {
            if self.rng.random_bool(0.5) {
                BonusKind::FastShot
            } else {
                BonusKind::TripleShot
            }
        } else if self.rng.random::<f32>() < self.tuning.bonus_life_chance {
            BonusKind::LifeUp
        } else {
            return;
        };
        log::debug!("Dropped {} bonus at ({}, {})", kind, pos.x, pos.y);
        self.bonuses.insert(self.factory.bonus(kind, pos));
    }

    /// Stars below the bottom edge wrap to the top at a random column
    fn update_stars(&mut self, dt: f32) {
        let top = self.height as f32;
        for star in &mut self.stars {
            if star.body.pos.y < 0.0 {
                star.body.pos.y = top;
                star.body.pos.x =
                    random_coord(&mut self.rng, self.width.saturating_add(1));
            } else {
                star.update(dt);
            }
        }
    }
}

/// Keep live shots that still overlap the viewport, advanced by `dt`
fn advance_shots(shots: SpatialGrid<Shot>, width: f32, height: f32, dt: f32) -> SpatialGrid<Shot> {
    let mut next = shots.empty_like();
    for mut shot in shots.into_items() {
        if !shot.is_destroyed() && shot.bounds().overlaps_viewport(width, height) {
            shot.update(dt);
            next.insert(shot);
        }
    }
    next
}

/// Same rule as shots; bonuses also expire on their own timer
fn advance_bonuses(
    bonuses: SpatialGrid<Bonus>,
    width: f32,
    height: f32,
    dt: f32,
) -> SpatialGrid<Bonus> {
    let mut next = bonuses.empty_like();
    for mut bonus in bonuses.into_items() {
        if !bonus.is_destroyed() && bonus.bounds().overlaps_viewport(width, height) {
            bonus.update(dt);
            next.insert(bonus);
        }
    }
    next
}
