//! Grid-accelerated collision detection
//!
//! Four categories are checked in a fixed order:
//! 1. player shots vs enemies
//! 2. ship vs enemies
//! 3. ship vs enemy shots
//! 4. ship vs bonuses
//!
//! For each overlapping pair both sides are notified, primary first. No pair
//! is skipped because one side is already destroyed; the handlers decide.

use super::bounds::{Bounded, intersects};
use super::enemy::Enemy;
use super::entities::{Bonus, Collider, Shot};
use super::grid::SpatialGrid;
use super::ship::Ship;

/// Pairs found during one detection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Player shot / enemy contacts
    pub shot_hits: usize,
    /// Ship / enemy contacts
    pub rammed: usize,
    /// Enemy shot / ship contacts
    pub ship_hits: usize,
    pub bonuses: usize,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn detect_collisions(
    ship: &mut Ship,
    enemies: &mut SpatialGrid<Enemy>,
    enemy_shots: &mut SpatialGrid<Shot>,
    bonuses: &mut SpatialGrid<Bonus>,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    // Player shots <-> enemies
    let shots = ship.shots_mut();
    for s in 0..shots.len() {
        let Some(region) = shots.get(s).map(|shot| shot.bounds()) else {
            continue;
        };
        for handle in enemies.query(&region) {
            let (Some(enemy), Some(shot)) = (enemies.get_mut(handle), shots.get_mut(s)) else {
                continue;
            };
            if intersects(&*enemy, &*shot) {
                enemy.handle_collision(Collider::Shot);
                shot.handle_collision(Collider::Enemy);
                report.shot_hits += 1;
            }
        }
    }

    let footprint = ship.bounds();

    // Ship <-> enemies
    for handle in enemies.query(&footprint) {
        let Some(enemy) = enemies.get_mut(handle) else {
            continue;
        };
        if intersects(&*ship, &*enemy) {
            ship.handle_collision(Collider::Enemy);
            enemy.handle_collision(Collider::Ship);
            report.rammed += 1;
        }
    }

    // Enemy shots <-> ship
    for handle in enemy_shots.query(&footprint) {
        let Some(shot) = enemy_shots.get_mut(handle) else {
            continue;
        };
        if intersects(&*ship, &*shot) {
            ship.handle_collision(Collider::Shot);
            shot.handle_collision(Collider::Ship);
            report.ship_hits += 1;
        }
    }

    // Bonuses <-> ship
    for handle in bonuses.query(&footprint) {
        let Some(bonus) = bonuses.get_mut(handle) else {
            continue;
        };
        if intersects(&*ship, &*bonus) {
            ship.handle_collision(Collider::Bonus(bonus.kind));
            bonus.handle_collision(Collider::Ship);
            report.bonuses += 1;
        }
    }

    if !report.is_empty() {
        log::debug!("Collisions: {:?}", report);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::BonusKind;
    use crate::sim::factory::EntityFactory;
    use crate::tuning::Tuning;
    use glam::Vec2;

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    struct World {
        factory: EntityFactory,
        ship: Ship,
        enemies: SpatialGrid<Enemy>,
        enemy_shots: SpatialGrid<Shot>,
        bonuses: SpatialGrid<Bonus>,
    }

    fn world() -> World {
        let factory = EntityFactory::new(&Tuning::default()).unwrap();
        let ship = factory.ship(Vec2::new(400.0, 0.0), SpatialGrid::new(W, H, 4, 4).unwrap());
        World {
            factory,
            ship,
            enemies: SpatialGrid::new(W, H, 4, 4).unwrap(),
            enemy_shots: SpatialGrid::new(W, H, 4, 4).unwrap(),
            bonuses: SpatialGrid::new(W, H, 4, 4).unwrap(),
        }
    }

    impl World {
        fn detect(&mut self) -> CollisionReport {
            detect_collisions(
                &mut self.ship,
                &mut self.enemies,
                &mut self.enemy_shots,
                &mut self.bonuses,
            )
        }
    }

    fn enemy_shot(w: &World, pos: Vec2) -> Shot {
        let spec = crate::sim::entities::ShotSpec::new(
            crate::sim::bounds::Size::square(10.0, "enemy").unwrap(),
            1.0,
            100.0,
        )
        .unwrap();
        Shot::fire(pos, &spec, w.ship.body.color, 270.0)
    }

    #[test]
    fn test_player_shot_destroys_enemy() {
        let mut w = world();
        let enemy = w.enemies.insert(w.factory.diamond(Vec2::new(100.0, 300.0)));
        let spec = crate::sim::entities::ShotSpec::new(w.ship.body.size, 0.25, 100.0).unwrap();
        let color = w.ship.body.color;
        w.ship
            .shots_mut()
            .insert(Shot::fire(Vec2::new(110.0, 310.0), &spec, color, 90.0));
        w.ship
            .shots_mut()
            .insert(Shot::fire(Vec2::new(600.0, 310.0), &spec, color, 90.0));

        let report = w.detect();
        assert_eq!(report.shot_hits, 1);
        assert!(w.enemies.get(enemy).unwrap().is_destroyed());
        assert!(w.ship.shots().get(0).unwrap().is_destroyed());
        assert!(!w.ship.shots().get(1).unwrap().is_destroyed());
        assert_eq!(w.ship.life(), Tuning::default().initial_lives);
    }

    #[test]
    fn test_ramming_costs_life_and_destroys_enemy() {
        let mut w = world();
        let enemy = w.enemies.insert(w.factory.triangle(Vec2::new(410.0, 10.0)));
        let report = w.detect();
        assert_eq!(report.rammed, 1);
        assert!(w.enemies.get(enemy).unwrap().is_destroyed());
        assert_eq!(w.ship.life(), Tuning::default().initial_lives - 1);
    }

    #[test]
    fn test_enemy_shot_hits_ship() {
        let mut w = world();
        let shot = enemy_shot(&w, Vec2::new(405.0, 5.0));
        let h = w.enemy_shots.insert(shot);
        let miss = enemy_shot(&w, Vec2::new(10.0, 500.0));
        let m = w.enemy_shots.insert(miss);

        let report = w.detect();
        assert_eq!(report.ship_hits, 1);
        assert!(w.enemy_shots.get(h).unwrap().is_destroyed());
        assert!(!w.enemy_shots.get(m).unwrap().is_destroyed());
        assert_eq!(w.ship.life(), Tuning::default().initial_lives - 1);
    }

    #[test]
    fn test_bonus_collected_without_damage() {
        let mut w = world();
        let b = w
            .bonuses
            .insert(w.factory.bonus(BonusKind::LifeUp, Vec2::new(420.0, 20.0)));
        let report = w.detect();
        assert_eq!(report.bonuses, 1);
        assert!(w.bonuses.get(b).unwrap().is_destroyed());
        assert_eq!(w.ship.life(), Tuning::default().initial_lives + 1);
        assert_eq!(w.ship.take_collected_bonus(), Some(BonusKind::LifeUp));
    }

    #[test]
    fn test_touching_ship_is_not_a_hit() {
        let mut w = world();
        let ship_w = w.ship.body.size.width();
        w.enemies
            .insert(w.factory.triangle(Vec2::new(400.0 + ship_w, 0.0)));
        assert!(w.detect().is_empty());
    }

    #[test]
    fn test_destroyed_entities_still_notified() {
        let mut w = world();
        let shot = enemy_shot(&w, Vec2::new(405.0, 5.0));
        let h = w.enemy_shots.insert(shot);
        w.enemy_shots.get_mut(h).unwrap().handle_collision(Collider::Enemy);

        w.detect();
        assert_eq!(w.ship.life(), Tuning::default().initial_lives - 1);
    }
}
