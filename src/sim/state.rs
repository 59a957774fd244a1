//! World state and lifecycle
//!
//! `Simulation` owns every entity collection, the seeded RNG and the active
//! tuning set. Per-tick stepping lives in `tick.rs`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::enemy::Enemy;
use super::entities::{Bonus, Shot, Star};
use super::factory::EntityFactory;
use super::grid::SpatialGrid;
use super::ship::Ship;
use crate::consts::{GRID_COLUMNS, GRID_ROWS};
use crate::error::{Result, SimError};
use crate::random_coord;
use crate::tuning::Tuning;

/// What the world is running for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Decorative drift behind the menus; no ship, no collisions
    #[default]
    Background,
    /// A run is in progress
    Playing,
}

#[derive(Debug)]
pub struct Simulation {
    pub(super) tuning: Tuning,
    pub(super) factory: EntityFactory,
    pub(super) difficulty: Difficulty,
    seed: u64,
    pub(super) rng: Pcg32,

    /// Viewport in pixels
    pub(super) width: i32,
    pub(super) height: i32,
    /// Set by the first `init_*`; `update` is a no-op before that
    pub(super) initialized: bool,
    resized: bool,

    pub(super) mode: GameMode,
    pub(super) game_over: bool,
    pub(super) ship: Option<Ship>,
    pub(super) enemies: SpatialGrid<Enemy>,
    pub(super) enemy_shots: SpatialGrid<Shot>,
    pub(super) bonuses: SpatialGrid<Bonus>,
    pub(super) stars: Vec<Star>,
    pub(super) score: u32,
}

impl Simulation {
    /// Validate `tuning` and build an empty, uninitialized world
    ///
    /// Nothing moves until the first `resize` (or an explicit `init_*`).
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self> {
        let factory = EntityFactory::new(&tuning)?;
        Ok(Self {
            tuning,
            factory,
            difficulty: Difficulty::default(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            width: 0,
            height: 0,
            initialized: false,
            resized: false,
            mode: GameMode::Background,
            game_over: false,
            ship: None,
            enemies: SpatialGrid::new(0.0, 0.0, GRID_ROWS, GRID_COLUMNS)?,
            enemy_shots: SpatialGrid::new(0.0, 0.0, GRID_ROWS, GRID_COLUMNS)?,
            bonuses: SpatialGrid::new(0.0, 0.0, GRID_ROWS, GRID_COLUMNS)?,
            stars: Vec::new(),
            score: 0,
        })
    }

    /// World using the built-in preset of `difficulty`
    pub fn with_difficulty(difficulty: Difficulty, seed: u64) -> Result<Self> {
        let mut sim = Self::new(Tuning::preset(difficulty), seed)?;
        sim.difficulty = difficulty;
        Ok(sim)
    }

    /// Start a run: fresh ship at the bottom center, empty grids, score 0
    pub fn init_game(&mut self) {
        let ship_width = self.factory.ship_size().width();
        let pos = Vec2::new(self.width as f32 / 2.0 - ship_width / 2.0, 0.0);
        let shots = self.blank_shot_grid();
        self.ship = Some(self.factory.ship(pos, shots));
        self.reset_world(GameMode::Playing);
        log::info!(
            "Game started ({}, {}x{})",
            self.difficulty,
            self.width,
            self.height
        );
    }

    /// Back to the decorative background: no ship, empty grids, score 0
    pub fn init_simulation(&mut self) {
        self.ship = None;
        self.reset_world(GameMode::Background);
        log::info!("Background simulation started ({})", self.difficulty);
    }

    fn reset_world(&mut self, mode: GameMode) {
        let (w, h) = self.viewport();
        self.enemies = self.enemies.resized(w, h);
        self.enemy_shots = self.enemy_shots.resized(w, h);
        self.bonuses = self.bonuses.resized(w, h);
        self.score = 0;
        self.game_over = false;
        self.mode = mode;
        self.populate_stars();
        self.initialized = true;
    }

    fn blank_shot_grid(&self) -> SpatialGrid<Shot> {
        let (w, h) = self.viewport();
        self.enemy_shots.resized(w, h)
    }

    /// Refill the star field at random positions inside the viewport
    pub(super) fn populate_stars(&mut self) {
        let count = usize::try_from(self.tuning.star_count).unwrap_or_default();
        self.stars.clear();
        for _ in 0..count {
            let x = random_coord(&mut self.rng, self.width);
            let y = random_coord(&mut self.rng, self.height);
            self.stars.push(self.factory.star(Vec2::new(x, y)));
        }
    }

    /// New viewport size
    ///
    /// The first call also starts the background simulation. Every call
    /// repopulates the star field.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        if width < 0 || height < 0 {
            return Err(SimError::InvalidViewport { width, height });
        }
        if self.tuning.star_count < 0 {
            return Err(SimError::NegativeStarCount(self.tuning.star_count));
        }
        self.width = width;
        self.height = height;

        if !self.resized {
            self.resized = true;
            log::info!("First viewport {}x{}", width, height);
            self.init_simulation();
        } else {
            self.regrid();
        }
        self.populate_stars();
        Ok(())
    }

    /// Re-partition every live grid over the current viewport
    fn regrid(&mut self) {
        let (w, h) = self.viewport();
        self.enemies.regrid(w, h);
        self.enemy_shots.regrid(w, h);
        self.bonuses.regrid(w, h);
        if let Some(ship) = self.ship.as_mut() {
            ship.shots_mut().regrid(w, h);
        }
    }

    // === Ship control ===

    pub fn set_target(&mut self, x: f32, y: f32) {
        match self.ship.as_mut() {
            Some(ship) => ship.set_target(Vec2::new(x, y)),
            None => log::warn!("set_target({}, {}) ignored: no ship", x, y),
        }
    }

    pub fn enable_shooting(&mut self) {
        self.set_shooting(true);
    }

    pub fn disable_shooting(&mut self) {
        self.set_shooting(false);
    }

    fn set_shooting(&mut self, shooting: bool) {
        match self.ship.as_mut() {
            Some(ship) => ship.set_shooting(shooting),
            None => log::warn!("Shooting toggle ignored: no ship"),
        }
    }

    // === Difficulty ===

    /// Switch to the built-in preset of `difficulty`
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        self.apply_difficulty(difficulty, Tuning::preset(difficulty))
    }

    /// Switch difficulty with a custom tuning set
    ///
    /// The world is reinitialized in its current mode. On error nothing
    /// changes.
    pub fn apply_difficulty(&mut self, difficulty: Difficulty, tuning: Tuning) -> Result<()> {
        let factory = EntityFactory::new(&tuning)?;
        self.tuning = tuning;
        self.factory = factory;
        self.difficulty = difficulty;
        log::info!("Difficulty set to {}", difficulty);

        if self.initialized {
            match self.mode {
                GameMode::Playing => self.init_game(),
                GameMode::Background => self.init_simulation(),
            }
        }
        Ok(())
    }

    pub fn increment_difficulty(&mut self) -> Result<()> {
        self.set_difficulty(self.difficulty.increment())
    }

    pub fn decrement_difficulty(&mut self) -> Result<()> {
        self.set_difficulty(self.difficulty.decrement())
    }

    /// Back to the default difficulty
    pub fn reset_difficulty(&mut self) -> Result<()> {
        self.set_difficulty(Difficulty::default())
    }

    // === Read access ===

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.mode == GameMode::Playing
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The last run ended with the ship destroyed
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub(super) fn viewport(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Completed levels: `score / level_up_factor`
    pub fn level(&self) -> u32 {
        self.score / self.tuning.level_up_factor.max(1)
    }

    /// Spawn-rate multiplier, `1 + level`
    pub fn difficulty_factor(&self) -> f32 {
        1.0 + self.level() as f32
    }

    /// The ship, if a run was started (kept after game over)
    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    /// Mutable ship access for pull-once events
    pub fn ship_mut(&mut self) -> Option<&mut Ship> {
        self.ship.as_mut()
    }

    pub fn enemies(&self) -> &SpatialGrid<Enemy> {
        &self.enemies
    }

    pub fn enemy_shots(&self) -> &SpatialGrid<Shot> {
        &self.enemy_shots
    }

    /// The ship's shots, only while playing
    pub fn player_shots(&self) -> Option<&SpatialGrid<Shot>> {
        self.ship
            .as_ref()
            .filter(|_| self.is_playing())
            .map(Ship::shots)
    }

    pub fn bonuses(&self) -> &SpatialGrid<Bonus> {
        &self.bonuses
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bounds::{Bounded, Bounds};

    fn tuning() -> Tuning {
        Tuning {
            star_count: 10,
            ..Tuning::default()
        }
    }

    fn sim() -> Simulation {
        Simulation::new(tuning(), 42).unwrap()
    }

    #[test]
    fn test_new_rejects_broken_tuning() {
        let bad = Tuning {
            level_up_factor: 0,
            ..Tuning::default()
        };
        assert!(matches!(
            Simulation::new(bad, 1),
            Err(SimError::ZeroLevelUpFactor)
        ));
    }

    #[test]
    fn test_first_resize_starts_background() {
        let mut sim = sim();
        assert!(!sim.is_initialized());
        sim.resize(1024, 824).unwrap();
        assert!(sim.is_initialized());
        assert_eq!(sim.mode(), GameMode::Background);
        assert!(sim.ship().is_none());
        assert!(sim.player_shots().is_none());
        assert_eq!(sim.stars().len(), 10);
        for star in sim.stars() {
            assert!((0.0..1024.0).contains(&star.x()));
            assert!((0.0..824.0).contains(&star.y()));
        }
    }

    #[test]
    fn test_resize_keeps_mode_and_refills_stars() {
        let mut sim = sim();
        sim.resize(800, 600).unwrap();
        sim.init_game();
        sim.resize(400, 300).unwrap();
        assert!(sim.is_playing());
        assert_eq!(sim.stars().len(), 10);
        assert!(sim.stars().iter().all(|s| s.x() < 400.0 && s.y() < 300.0));
    }

    #[test]
    fn test_grids_follow_later_resizes() {
        let mut sim = sim();
        sim.resize(100, 100).unwrap();
        sim.init_game();
        let h = sim.enemies.insert(sim.factory.triangle(Vec2::new(90.0, 90.0)));
        sim.resize(2000, 2000).unwrap();
        sim.update(0.0);

        // With 500-wide cells the middle of the screen shares no cell with
        // either corner
        let middle = Bounds::new(Vec2::splat(1000.0), Vec2::splat(5.0));
        let corner = sim.enemies.insert(sim.factory.triangle(Vec2::new(1900.0, 1900.0)));
        assert!(sim.enemies().query(&middle).is_empty());
        let far = Bounds::new(Vec2::splat(1950.0), Vec2::splat(5.0));
        assert_eq!(sim.enemies().query(&far), vec![corner]);
        assert_eq!(sim.enemies().len(), 2);
        assert!(sim.enemies().get(h).is_some());

        // The next rebuild keeps the new partition
        sim.update(0.0);
        assert!(sim.enemies().query(&middle).is_empty());
        assert!(sim.player_shots().unwrap().query(&middle).is_empty());
    }

    #[test]
    fn test_resize_rejects_negative_viewport() {
        let mut sim = sim();
        assert!(matches!(
            sim.resize(-1, 10),
            Err(SimError::InvalidViewport { width: -1, height: 10 })
        ));
        assert!(!sim.is_initialized());
    }

    #[test]
    fn test_init_game_places_ship_bottom_center() {
        let mut sim = sim();
        sim.resize(800, 600).unwrap();
        sim.init_game();
        let ship = sim.ship().unwrap();
        let ship_w = sim.tuning().ship_width;
        assert_eq!(ship.body.pos, Vec2::new(400.0 - ship_w / 2.0, 0.0));
        assert_eq!(ship.life(), sim.tuning().initial_lives);
        assert_eq!(sim.score(), 0);
        assert!(sim.is_playing());
        assert!(sim.player_shots().unwrap().is_empty());

        sim.init_simulation();
        assert!(sim.ship().is_none());
        assert!(!sim.is_playing());
    }

    #[test]
    fn test_controls_without_ship_are_ignored() {
        let mut sim = sim();
        sim.resize(800, 600).unwrap();
        sim.set_target(10.0, 10.0);
        sim.enable_shooting();
        sim.disable_shooting();
        assert!(sim.ship().is_none());
    }

    #[test]
    fn test_controls_reach_ship() {
        let mut sim = sim();
        sim.resize(800, 600).unwrap();
        sim.init_game();
        sim.set_target(100.0, 50.0);
        sim.enable_shooting();
        let ship = sim.ship().unwrap();
        assert_eq!(ship.target(), Vec2::new(100.0, 50.0));
        assert!(ship.is_shooting());
    }

    #[test]
    fn test_difficulty_cycle_reloads_and_keeps_mode() {
        let mut sim = sim();
        sim.resize(800, 600).unwrap();
        sim.init_game();
        assert_eq!(sim.difficulty(), Difficulty::Hard);

        sim.increment_difficulty().unwrap();
        assert_eq!(sim.difficulty(), Difficulty::Insane);
        assert_eq!(sim.tuning(), &Tuning::preset(Difficulty::Insane));
        assert!(sim.is_playing());
        assert_eq!(
            sim.ship().unwrap().life(),
            Tuning::preset(Difficulty::Insane).initial_lives
        );

        sim.increment_difficulty().unwrap();
        assert_eq!(sim.difficulty(), Difficulty::Easy);
        sim.decrement_difficulty().unwrap();
        assert_eq!(sim.difficulty(), Difficulty::Insane);
        sim.reset_difficulty().unwrap();
        assert_eq!(sim.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_apply_difficulty_failure_leaves_state() {
        let mut sim = sim();
        sim.resize(800, 600).unwrap();
        let bad = Tuning {
            enemy_size: -1.0,
            ..Tuning::default()
        };
        assert!(sim.apply_difficulty(Difficulty::Easy, bad).is_err());
        assert_eq!(sim.difficulty(), Difficulty::Hard);
        assert_eq!(sim.tuning().star_count, 10);
    }

    #[test]
    fn test_with_difficulty() {
        let sim = Simulation::with_difficulty(Difficulty::Easy, 3).unwrap();
        assert_eq!(sim.difficulty(), Difficulty::Easy);
        assert_eq!(sim.tuning(), &Tuning::preset(Difficulty::Easy));
        assert_eq!(sim.seed(), 3);
    }

    #[test]
    fn test_level_and_factor() {
        let mut sim = sim();
        let per_level = sim.tuning().level_up_factor;
        assert_eq!(sim.difficulty_factor(), 1.0);
        sim.score = per_level * 2 + 1;
        assert_eq!(sim.level(), 2);
        assert_eq!(sim.difficulty_factor(), 3.0);
    }
}
