//! Difficulty levels
//!
//! A three-state cycle. Selecting a level swaps in its tuning preset and
//! reinitializes the simulation (see `Simulation::apply_difficulty`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Hard,
    Insane,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Hard, Difficulty::Insane];

    /// Next level, wrapping Insane back to Easy
    pub fn increment(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Insane,
            Difficulty::Insane => Difficulty::Easy,
        }
    }

    /// Previous level, wrapping Easy back to Insane
    pub fn decrement(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Insane,
            Difficulty::Hard => Difficulty::Easy,
            Difficulty::Insane => Difficulty::Hard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Hard => "Hard",
            Difficulty::Insane => "Insane",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            "insane" => Ok(Difficulty::Insane),
            _ => Err(SimError::UnknownDifficulty(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cycle() {
        assert_eq!(Difficulty::Easy.increment(), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.increment(), Difficulty::Insane);
        assert_eq!(Difficulty::Insane.increment(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.decrement(), Difficulty::Insane);
    }

    #[test]
    fn test_default_is_hard() {
        assert_eq!(Difficulty::default(), Difficulty::Hard);
    }

    #[test]
    fn test_names() {
        for d in Difficulty::ALL {
            assert_eq!(d.as_str().parse::<Difficulty>().unwrap(), d);
        }
        assert_eq!("INSANE".parse::<Difficulty>().unwrap(), Difficulty::Insane);
        assert!(matches!(
            "Nightmare".parse::<Difficulty>(),
            Err(SimError::UnknownDifficulty(name)) if name == "Nightmare"
        ));
    }

    fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
        prop::sample::select(Difficulty::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_increment_decrement_are_inverse(d in difficulty_strategy()) {
            prop_assert_eq!(d.increment().decrement(), d);
            prop_assert_eq!(d.decrement().increment(), d);
        }

        #[test]
        fn prop_three_steps_is_identity(d in difficulty_strategy()) {
            prop_assert_eq!(d.increment().increment().increment(), d);
        }
    }
}
