//! Numeric tuning for the simulation
//!
//! One flat set of parameters per difficulty. The built-in presets can be
//! overridden with JSON; missing fields fall back to the Hard preset.
//!
//! Units: times handed to `update` are seconds, shot intervals and the
//! fast-shot speed-up are milliseconds, velocities are viewport units per
//! second.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::sim::{Color, Difficulty};

/// Every tunable value the simulation reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    pub ship_width: f32,
    pub ship_height: f32,
    pub ship_velocity: f32,
    /// Distance to the target under which the ship stops
    pub ship_max_delta: f32,
    /// Minimum time between two volleys (ms)
    pub ship_shot_interval: f32,
    pub ship_color: Color,
    pub initial_lives: u32,
    /// Hearts drawn before the HUD switches to a number
    pub max_shown_hearts: u32,

    // === Shots ===
    /// Player shot size relative to the ship
    pub shot_scale: f32,
    pub shot_velocity: f32,
    /// Enemy shot size relative to the enemy
    pub enemy_shot_scale: f32,
    pub enemy_shot_velocity: f32,
    /// Minimum time between two enemy volleys (ms)
    pub enemy_shot_interval: f32,

    // === Enemies ===
    pub enemy_size: f32,

    /// Spawn chance per second, before the difficulty factor
    pub rect_chance: f32,
    /// Fire chance per second
    pub rect_shot_chance: f32,
    pub rect_velocity: f32,
    /// Amplitude of the sideways swing
    pub rect_radius: f32,
    /// Angular frequency of the sideways swing (rad/s)
    pub rect_frequency: f32,
    pub rect_score: u32,
    pub rect_color: Color,

    pub tri_chance: f32,
    pub tri_shot_chance: f32,
    pub tri_velocity: f32,
    pub tri_x_velocity: f32,
    pub tri_score: u32,
    pub tri_color: Color,

    pub diamond_chance: f32,
    pub diamond_shot_chance: f32,
    pub diamond_velocity: f32,
    pub diamond_score: u32,
    pub diamond_color: Color,

    // === Bonuses ===
    pub bonus_size: f32,
    pub bonus_velocity: f32,
    /// Seconds an uncollected bonus stays alive
    pub bonus_visible_time: f32,
    /// Chance that a destroyed enemy drops a shot bonus
    pub bonus_shot_chance: f32,
    /// Chance of a life bonus when no shot bonus dropped
    pub bonus_life_chance: f32,
    /// Seconds one shot bonus adds to its buff
    pub bonus_shot_duration: f32,
    /// Milliseconds taken off the shot interval while fast shot is active
    pub bonus_fast_shot_speed_up: f32,
    /// Side shot spread of a triple volley (degrees)
    pub bonus_triple_shot_angle: f32,
    pub bonus_fast_shot_color: Color,
    pub bonus_triple_shot_color: Color,
    pub bonus_life_color: Color,

    // === Background ===
    pub star_count: i32,
    pub star_velocity: f32,

    // === Pacing ===
    /// Score per difficulty level
    pub level_up_factor: u32,
    pub max_frame_rate: f32,
    pub ms_per_second: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_width: 40.0,
            ship_height: 40.0,
            ship_velocity: 450.0,
            ship_max_delta: 4.0,
            ship_shot_interval: 250.0,
            ship_color: Color::Yellow,
            initial_lives: 3,
            max_shown_hearts: 5,

            shot_scale: 0.25,
            shot_velocity: 600.0,
            enemy_shot_scale: 0.3,
            enemy_shot_velocity: 250.0,
            enemy_shot_interval: 1500.0,

            enemy_size: 40.0,

            rect_chance: 0.4,
            rect_shot_chance: 0.5,
            rect_velocity: 90.0,
            rect_radius: 60.0,
            rect_frequency: 2.0,
            rect_score: 10,
            rect_color: Color::Red,

            tri_chance: 0.3,
            tri_shot_chance: 0.6,
            tri_velocity: 110.0,
            tri_x_velocity: 80.0,
            tri_score: 15,
            tri_color: Color::Green,

            diamond_chance: 0.2,
            diamond_shot_chance: 0.7,
            diamond_velocity: 120.0,
            diamond_score: 25,
            diamond_color: Color::Blue,

            bonus_size: 24.0,
            bonus_velocity: 80.0,
            bonus_visible_time: 6.0,
            bonus_shot_chance: 0.15,
            bonus_life_chance: 0.05,
            bonus_shot_duration: 8.0,
            bonus_fast_shot_speed_up: 120.0,
            bonus_triple_shot_angle: 15.0,
            bonus_fast_shot_color: Color::Orange,
            bonus_triple_shot_color: Color::Purple,
            bonus_life_color: Color::Green,

            star_count: 60,
            star_velocity: 40.0,

            level_up_factor: 200,
            max_frame_rate: 60.0,
            ms_per_second: 1000.0,
        }
    }
}

impl Tuning {
    /// Built-in parameter set for a difficulty
    pub fn preset(difficulty: Difficulty) -> Self {
        let hard = Self::default();
        match difficulty {
            Difficulty::Hard => hard,
            Difficulty::Easy => Self {
                initial_lives: 5,
                enemy_shot_velocity: 180.0,
                enemy_shot_interval: 2500.0,
                rect_chance: 0.25,
                rect_shot_chance: 0.3,
                tri_chance: 0.2,
                tri_shot_chance: 0.35,
                diamond_chance: 0.1,
                diamond_shot_chance: 0.4,
                bonus_shot_chance: 0.25,
                bonus_life_chance: 0.1,
                level_up_factor: 400,
                ..hard
            },
            Difficulty::Insane => Self {
                initial_lives: 2,
                enemy_shot_velocity: 340.0,
                enemy_shot_interval: 900.0,
                rect_chance: 0.7,
                rect_shot_chance: 0.9,
                rect_velocity: 120.0,
                tri_chance: 0.55,
                tri_shot_chance: 1.0,
                tri_velocity: 150.0,
                diamond_chance: 0.4,
                diamond_shot_chance: 1.2,
                diamond_velocity: 160.0,
                bonus_shot_chance: 0.1,
                bonus_life_chance: 0.02,
                level_up_factor: 120,
                ..hard
            },
        }
    }

    /// Parse a tuning set; absent fields take the Hard defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    ///
    /// Sizes are checked again when the entity templates are built.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("shot_scale", self.shot_scale),
            ("enemy_shot_scale", self.enemy_shot_scale),
            ("enemy_size", self.enemy_size),
            ("bonus_size", self.bonus_size),
            ("max_frame_rate", self.max_frame_rate),
            ("ms_per_second", self.ms_per_second),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidTuning {
                    name,
                    value,
                    expected: "> 0",
                });
            }
        }

        let non_negative = [
            ("ship_velocity", self.ship_velocity),
            ("ship_max_delta", self.ship_max_delta),
            ("ship_shot_interval", self.ship_shot_interval),
            ("shot_velocity", self.shot_velocity),
            ("enemy_shot_velocity", self.enemy_shot_velocity),
            ("enemy_shot_interval", self.enemy_shot_interval),
            ("rect_chance", self.rect_chance),
            ("rect_shot_chance", self.rect_shot_chance),
            ("rect_velocity", self.rect_velocity),
            ("rect_radius", self.rect_radius),
            ("rect_frequency", self.rect_frequency),
            ("tri_chance", self.tri_chance),
            ("tri_shot_chance", self.tri_shot_chance),
            ("tri_velocity", self.tri_velocity),
            ("tri_x_velocity", self.tri_x_velocity),
            ("diamond_chance", self.diamond_chance),
            ("diamond_shot_chance", self.diamond_shot_chance),
            ("diamond_velocity", self.diamond_velocity),
            ("bonus_velocity", self.bonus_velocity),
            ("bonus_visible_time", self.bonus_visible_time),
            ("bonus_shot_duration", self.bonus_shot_duration),
            ("bonus_fast_shot_speed_up", self.bonus_fast_shot_speed_up),
            ("bonus_triple_shot_angle", self.bonus_triple_shot_angle),
            ("star_velocity", self.star_velocity),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidTuning {
                    name,
                    value,
                    expected: ">= 0",
                });
            }
        }

        let probabilities = [
            ("bonus_shot_chance", self.bonus_shot_chance),
            ("bonus_life_chance", self.bonus_life_chance),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::InvalidTuning {
                    name,
                    value,
                    expected: "0..=1",
                });
            }
        }

        if self.star_count < 0 {
            return Err(SimError::NegativeStarCount(self.star_count));
        }
        if self.level_up_factor == 0 {
            return Err(SimError::ZeroLevelUpFactor);
        }
        Ok(())
    }

    /// Target duration of one frame in seconds
    pub fn frame_budget(&self) -> f32 {
        1.0 / self.max_frame_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for d in Difficulty::ALL {
            Tuning::preset(d).validate().unwrap();
        }
        assert_eq!(Tuning::preset(Difficulty::Hard), Tuning::default());
    }

    #[test]
    fn test_presets_scale_spawn_rates() {
        let easy = Tuning::preset(Difficulty::Easy);
        let hard = Tuning::preset(Difficulty::Hard);
        let insane = Tuning::preset(Difficulty::Insane);
        assert!(easy.rect_chance < hard.rect_chance);
        assert!(hard.rect_chance < insane.rect_chance);
        assert!(easy.initial_lives > insane.initial_lives);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "star_count": 10, "ship_color": "Blue" }"#).unwrap();
        assert_eq!(tuning.star_count, 10);
        assert_eq!(tuning.ship_color, Color::Blue);
        assert_eq!(tuning.ship_width, Tuning::default().ship_width);
    }

    #[test]
    fn test_json_round_trip() {
        let insane = Tuning::preset(Difficulty::Insane);
        let parsed = Tuning::from_json(&insane.to_json().unwrap()).unwrap();
        assert_eq!(parsed, insane);
    }

    #[test]
    fn test_rejects_broken_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "star_count": -1 }"#),
            Err(SimError::NegativeStarCount(-1))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "level_up_factor": 0 }"#),
            Err(SimError::ZeroLevelUpFactor)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "enemy_size": 0.0 }"#),
            Err(SimError::InvalidTuning { name: "enemy_size", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "bonus_life_chance": 1.5 }"#),
            Err(SimError::InvalidTuning { name: "bonus_life_chance", .. })
        ));
        assert!(matches!(Tuning::from_json("{"), Err(SimError::Json(_))));
    }

    #[test]
    fn test_frame_budget() {
        let tuning = Tuning {
            max_frame_rate: 50.0,
            ..Tuning::default()
        };
        assert_eq!(tuning.frame_budget(), 0.02);
    }
}
