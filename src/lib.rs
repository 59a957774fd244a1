//! Lonely Triangle - simulation core of a 2D scrolling shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spatial grid, collisions, spawning)
//! - `tuning`: Data-driven game balance, one preset per difficulty
//! - `platform`: Frame pacing for the external game loop
//! - `error`: Configuration and argument errors

pub mod error;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{Result, SimError};
pub use tuning::Tuning;

use glam::Vec2;

/// Simulation constants that are not part of the tunable configuration
pub mod consts {
    /// Rows of every collision grid
    pub const GRID_ROWS: usize = 4;
    /// Columns of every collision grid
    pub const GRID_COLUMNS: usize = 4;

    /// Angular frequency of the triangle enemy's left/right sway
    pub const TRIANGLE_SWAY_FREQUENCY: f32 = 3.0;

    /// Angular frequency of the diamond enemy's phase wave
    pub const DIAMOND_PHASE_FREQUENCY: f32 = 3.0;
    /// Amplitude of the diamond enemy's phase wave
    pub const DIAMOND_PHASE_AMPLITUDE: f32 = 3.0;
    /// Above this phase value the diamond moves sideways instead of down
    pub const DIAMOND_PHASE_THRESHOLD: f32 = 2.0;

    /// Angle of the ship's forward shot (degrees, towards +y)
    pub const SHIP_FORWARD_ANGLE: f32 = 90.0;

    /// Star edge length
    pub const STAR_SIZE: f32 = 1.0;
}

/// Unit direction for an angle in degrees (0° = +x, 90° = +y)
#[inline]
pub fn heading(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Uniform integer coordinate in `[0, extent)`, or 0 for an empty extent
#[inline]
pub fn random_coord(rng: &mut impl rand::Rng, extent: i32) -> f32 {
    if extent <= 0 {
        0.0
    } else {
        rng.random_range(0..extent) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_heading_cardinal_directions() {
        assert!((heading(0.0) - Vec2::X).length() < 1e-5);
        assert!((heading(90.0) - Vec2::Y).length() < 1e-5);
        assert!((heading(180.0) + Vec2::X).length() < 1e-5);
        assert!((heading(270.0) + Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn test_random_coord_empty_extent() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(random_coord(&mut rng, 0), 0.0);
        assert_eq!(random_coord(&mut rng, -5), 0.0);
        for _ in 0..100 {
            let x = random_coord(&mut rng, 10);
            assert!((0.0..10.0).contains(&x));
            assert_eq!(x.fract(), 0.0);
        }
    }
}
