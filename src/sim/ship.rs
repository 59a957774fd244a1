//! The player ship
//!
//! The ship steers towards a target at constant speed, fires automatically
//! while shooting is enabled, and carries two decaying buff timers. It owns
//! the grid of its live shots.

use glam::Vec2;

use super::bounds::{Bounded, Size};
use super::entities::{Body, BonusKind, Collider, Shot, ShotSpec};
use super::grid::SpatialGrid;
use crate::consts::SHIP_FORWARD_ANGLE;

/// Volley fired on the last update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotPattern {
    Single,
    Triple,
}

/// Firing and buff parameters, resolved from the tuning set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Armament {
    pub shot: ShotSpec,
    /// Minimum time between volleys (ms)
    pub shot_interval: f32,
    /// Seconds added to a buff timer per collected bonus
    pub bonus_shot_duration: f32,
    /// Milliseconds taken off the interval while fast shot is active
    pub fast_shot_speed_up: f32,
    /// Spread of the side shots of a triple volley (degrees)
    pub triple_shot_angle: f32,
    pub ms_per_second: f32,
}

#[derive(Debug, Clone)]
pub struct Ship {
    pub body: Body,
    target: Vec2,
    /// Per-axis distance under which the ship stops moving
    tolerance: f32,
    armament: Armament,
    life: u32,
    destroyed: bool,
    shooting: bool,
    /// Simulated clock (ms) and time of the last volley
    clock_ms: f32,
    last_shot_ms: f32,
    triple_shot_time: f32,
    fast_shot_time: f32,
    fired: Option<ShotPattern>,
    collected: Option<BonusKind>,
    shots: SpatialGrid<Shot>,
}

impl Ship {
    pub fn new(
        body: Body,
        tolerance: f32,
        armament: Armament,
        life: u32,
        shots: SpatialGrid<Shot>,
    ) -> Self {
        Self {
            target: body.pos,
            body,
            tolerance,
            armament,
            life,
            destroyed: false,
            shooting: false,
            clock_ms: 0.0,
            last_shot_ms: 0.0,
            triple_shot_time: 0.0,
            fast_shot_time: 0.0,
            fired: None,
            collected: None,
            shots,
        }
    }

    /// Move, decay buffs, and fire if allowed
    pub fn update(&mut self, dt: f32) {
        self.steer(dt);

        self.triple_shot_time = (self.triple_shot_time - dt).max(0.0);
        self.fast_shot_time = (self.fast_shot_time - dt).max(0.0);

        self.clock_ms += dt * self.armament.ms_per_second;
        self.fired = if self.shooting { self.fire() } else { None };
    }

    fn steer(&mut self, dt: f32) {
        let offset = self.target - self.body.pos;
        let distance = offset.length();

        if offset.x.abs() > self.tolerance {
            self.body.pos.x += offset.x / distance * self.body.vel.x * dt;
        }
        if offset.y.abs() > self.tolerance {
            self.body.pos.y += offset.y / distance * self.body.vel.y * dt;
        }
    }

    fn fire(&mut self) -> Option<ShotPattern> {
        let offset = if self.fast_shot_time > 0.0 {
            self.armament.fast_shot_speed_up
        } else {
            0.0
        };
        if self.clock_ms - self.last_shot_ms <= self.armament.shot_interval - offset {
            return None;
        }
        self.last_shot_ms = self.clock_ms;

        let origin = Vec2::new(
            self.body.pos.x + self.body.size.width() / 2.0,
            self.body.pos.y + self.body.size.height(),
        );
        let spec = self.armament.shot;
        let color = self.body.color;
        self.shots
            .insert(Shot::fire(origin, &spec, color, SHIP_FORWARD_ANGLE));

        if self.triple_shot_time > 0.0 {
            let spread = self.armament.triple_shot_angle;
            for angle in [SHIP_FORWARD_ANGLE + spread, SHIP_FORWARD_ANGLE - spread] {
                self.shots.insert(Shot::fire(origin, &spec, color, angle));
            }
            log::debug!("Ship fired a triple volley");
            Some(ShotPattern::Triple)
        } else {
            Some(ShotPattern::Single)
        }
    }

    /// Bonuses apply their effect; anything else costs one life
    pub fn handle_collision(&mut self, other: Collider) {
        match other {
            Collider::Bonus(kind) => {
                match kind {
                    BonusKind::FastShot => self.fast_shot_time += self.armament.bonus_shot_duration,
                    BonusKind::TripleShot => {
                        self.triple_shot_time += self.armament.bonus_shot_duration
                    }
                    BonusKind::LifeUp => self.life += 1,
                }
                self.collected = Some(kind);
            }
            Collider::Enemy | Collider::Shot | Collider::Ship => {
                self.life = self.life.saturating_sub(1);
                if self.life == 0 {
                    self.destroyed = true;
                }
            }
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn set_shooting(&mut self, shooting: bool) {
        self.shooting = shooting;
    }

    pub fn is_shooting(&self) -> bool {
        self.shooting
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    /// Life ran out; the run is over
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn triple_shot_time(&self) -> f32 {
        self.triple_shot_time
    }

    pub fn fast_shot_time(&self) -> f32 {
        self.fast_shot_time
    }

    /// Volley fired during the last update, if any
    pub fn fired(&self) -> Option<ShotPattern> {
        self.fired
    }

    /// Volley fired during the last update, cleared on read
    pub fn take_fired(&mut self) -> Option<ShotPattern> {
        self.fired.take()
    }

    pub fn collected_bonus(&self) -> bool {
        self.collected.is_some()
    }

    /// Last collected bonus, cleared on read
    pub fn take_collected_bonus(&mut self) -> Option<BonusKind> {
        self.collected.take()
    }

    pub fn shots(&self) -> &SpatialGrid<Shot> {
        &self.shots
    }

    pub fn shots_mut(&mut self) -> &mut SpatialGrid<Shot> {
        &mut self.shots
    }

    /// Swap in a rebuilt shot grid
    pub fn replace_shots(&mut self, shots: SpatialGrid<Shot>) -> SpatialGrid<Shot> {
        std::mem::replace(&mut self.shots, shots)
    }
}

impl Bounded for Ship {
    fn position(&self) -> Vec2 {
        self.body.pos
    }
    fn size(&self) -> Size {
        self.body.size
    }
}
