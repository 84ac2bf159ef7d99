//! Qualitative difficulty labels.

use serde::{Deserialize, Serialize};

/// How hard a plan or a required performance is to achieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    VeryHard,
}

impl Difficulty {
    /// Band a percentage: up to 40 easy, up to 60 moderate, up to 80 hard.
    ///
    /// NaN and infinities land in the hardest band.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage <= 40.0 {
            Difficulty::Easy
        } else if percentage <= 60.0 {
            Difficulty::Moderate
        } else if percentage <= 80.0 {
            Difficulty::Hard
        } else {
            Difficulty::VeryHard
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Moderate => write!(f, "moderate"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::VeryHard => write!(f, "very-hard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_bands() {
        assert_eq!(Difficulty::from_percentage(0.0), Difficulty::Easy);
        assert_eq!(Difficulty::from_percentage(40.0), Difficulty::Easy);
        assert_eq!(Difficulty::from_percentage(40.1), Difficulty::Moderate);
        assert_eq!(Difficulty::from_percentage(60.0), Difficulty::Moderate);
        assert_eq!(Difficulty::from_percentage(75.0), Difficulty::Hard);
        assert_eq!(Difficulty::from_percentage(80.0), Difficulty::Hard);
        assert_eq!(Difficulty::from_percentage(100.0), Difficulty::VeryHard);
    }

    #[test]
    fn test_difficulty_non_finite() {
        assert_eq!(Difficulty::from_percentage(f64::INFINITY), Difficulty::VeryHard);
        assert_eq!(Difficulty::from_percentage(f64::NAN), Difficulty::VeryHard);
    }

    #[test]
    fn test_difficulty_ordering() {
        assert!(Difficulty::Easy < Difficulty::Moderate);
        assert!(Difficulty::Hard < Difficulty::VeryHard);
    }

    #[test]
    fn test_difficulty_serialization() {
        let json = serde_json::to_string(&Difficulty::VeryHard).unwrap();
        assert_eq!(json, "\"very-hard\"");

        let deserialized: Difficulty = serde_json::from_str("\"moderate\"").unwrap();
        assert_eq!(deserialized, Difficulty::Moderate);
    }

    #[test]
    fn test_difficulty_display() {
        assert_eq!(format!("{}", Difficulty::Easy), "easy");
        assert_eq!(format!("{}", Difficulty::VeryHard), "very-hard");
    }
}
