//! Thread-safe handle to one simulation
//!
//! The scheduler thread calls `update`, a render thread calls `snapshot`.
//! Both hold the same lock for the whole call, so a snapshot never sees a
//! grid halfway through a rebuild.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::difficulty::Difficulty;
use super::snapshot::WorldSnapshot;
use super::state::Simulation;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct SharedSimulation(Arc<Mutex<Simulation>>);

impl SharedSimulation {
    pub fn new(sim: Simulation) -> Self {
        Self(Arc::new(Mutex::new(sim)))
    }

    /// Exclusive access for anything not wrapped below
    ///
    /// A panic in another holder does not make the world unreachable.
    pub fn lock(&self) -> MutexGuard<'_, Simulation> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update(&self, dt: f32) {
        self.lock().update(dt);
    }

    pub fn resize(&self, width: i32, height: i32) -> Result<()> {
        self.lock().resize(width, height)
    }

    pub fn init_game(&self) {
        self.lock().init_game();
    }

    pub fn init_simulation(&self) {
        self.lock().init_simulation();
    }

    pub fn set_target(&self, x: f32, y: f32) {
        self.lock().set_target(x, y);
    }

    pub fn enable_shooting(&self) {
        self.lock().enable_shooting();
    }

    pub fn disable_shooting(&self) {
        self.lock().disable_shooting();
    }

    pub fn set_difficulty(&self, difficulty: Difficulty) -> Result<()> {
        self.lock().set_difficulty(difficulty)
    }

    pub fn increment_difficulty(&self) -> Result<()> {
        self.lock().increment_difficulty()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.lock().snapshot()
    }

    pub fn score(&self) -> u32 {
        self.lock().score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use std::thread;

    #[test]
    fn test_reader_and_writer_threads() {
        let shared = SharedSimulation::new(Simulation::new(Tuning::default(), 21).unwrap());
        shared.resize(800, 600).unwrap();
        shared.init_game();

        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    shared.update(1.0 / 60.0);
                }
            })
        };
        let reader = {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let snap = shared.snapshot();
                    assert_eq!(snap.stars.len(), Tuning::default().star_count as usize);
                    for v in &snap.enemies {
                        assert!(v.width > 0.0 && v.height > 0.0);
                    }
                }
            })
        };
        writer.join().unwrap();
        reader.join().unwrap();

        assert!(shared.lock().is_initialized());
    }

    #[test]
    fn test_difficulty_through_handle() {
        let shared = SharedSimulation::new(Simulation::new(Tuning::default(), 1).unwrap());
        shared.resize(100, 100).unwrap();
        shared.increment_difficulty().unwrap();
        assert_eq!(shared.lock().difficulty(), Difficulty::Insane);
        shared.set_difficulty(Difficulty::Easy).unwrap();
        assert_eq!(shared.snapshot().difficulty, Difficulty::Easy);
        assert_eq!(shared.score(), 0);
    }
}
