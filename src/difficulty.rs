//! Difficulty profiles
//!
//! Pure lookup from difficulty level to gameplay parameters. All balance
//! values live here.

use crate::consts::COMPACT_VIEWPORT_MAX_WIDTH;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Viewport size class, selects target sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportClass {
    Compact,
    #[default]
    Regular,
}

impl ViewportClass {
    /// Classify a window width in CSS pixels
    pub fn classify(window_width: u32) -> Self {
        if window_width <= COMPACT_VIEWPORT_MAX_WIDTH {
            ViewportClass::Compact
        } else {
            ViewportClass::Regular
        }
    }
}

/// Gameplay parameters for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Maximum per-axis ball speed in px per animation frame
    pub speed: f32,
    /// Target diameter in px on regular viewports
    pub size_regular: f32,
    /// Target diameter in px on compact viewports
    pub size_compact: f32,
    /// Round length in seconds
    pub duration_secs: u32,
}

impl DifficultyProfile {
    /// Target diameter for the given viewport class
    pub fn size(&self, viewport: ViewportClass) -> f32 {
        match viewport {
            ViewportClass::Compact => self.size_compact,
            ViewportClass::Regular => self.size_regular,
        }
    }
}

/// Look up the profile for a difficulty level
pub fn profile_for(difficulty: Difficulty) -> DifficultyProfile {
    match difficulty {
        Difficulty::Easy => DifficultyProfile {
            speed: 4.0,
            size_regular: 80.0,
            size_compact: 50.0,
            duration_secs: 60,
        },
        Difficulty::Medium => DifficultyProfile {
            speed: 8.0,
            size_regular: 60.0,
            size_compact: 35.0,
            duration_secs: 45,
        },
        Difficulty::Hard => DifficultyProfile {
            speed: 12.0,
            size_regular: 40.0,
            size_compact: 25.0,
            duration_secs: 30,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_table() {
        let easy = profile_for(Difficulty::Easy);
        assert_eq!(easy.speed, 4.0);
        assert_eq!(easy.size_regular, 80.0);
        assert_eq!(easy.size_compact, 50.0);
        assert_eq!(easy.duration_secs, 60);

        let medium = profile_for(Difficulty::Medium);
        assert_eq!(medium.speed, 8.0);
        assert_eq!(medium.duration_secs, 45);

        let hard = profile_for(Difficulty::Hard);
        assert_eq!(hard.speed, 12.0);
        assert_eq!(hard.size_regular, 40.0);
        assert_eq!(hard.size_compact, 25.0);
        assert_eq!(hard.duration_secs, 30);
    }

    #[test]
    fn test_from_str_roundtrip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
    }

    #[test]
    fn test_unknown_difficulty_falls_back_to_easy() {
        let d = Difficulty::from_str("nightmare").unwrap_or_default();
        assert_eq!(d, Difficulty::Easy);
        assert_eq!(profile_for(d), profile_for(Difficulty::Easy));
    }

    #[test]
    fn test_viewport_classify_boundary() {
        assert_eq!(ViewportClass::classify(600), ViewportClass::Compact);
        assert_eq!(ViewportClass::classify(601), ViewportClass::Regular);
        assert_eq!(ViewportClass::classify(320), ViewportClass::Compact);
        assert_eq!(ViewportClass::classify(1920), ViewportClass::Regular);
    }

    #[test]
    fn test_size_by_viewport() {
        let hard = profile_for(Difficulty::Hard);
        assert_eq!(hard.size(ViewportClass::Regular), 40.0);
        assert_eq!(hard.size(ViewportClass::Compact), 25.0);
    }
}
