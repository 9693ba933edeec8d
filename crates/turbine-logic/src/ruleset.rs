//! Rule sets — the two editions of the classroom exercise.
//!
//! **Classic** is the open engineering trial: efficiency and budget
//! thresholds, winnable by good tuning. **Sabotage** is the hidden-agenda
//! session: an eco-score is tracked, the default judgment is intentionally
//! unwinnable (one role card is a saboteur), and the hidden god-mode
//! toggle switches judgment to a fair-but-strict gate.

use serde::{Deserialize, Serialize};

/// Which edition of the exercise is being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ruleset {
    /// Open trial: success iff efficiency > 85% and cost < $7,000.
    /// No eco-score, no god mode.
    Classic,
    /// Hidden-agenda session: eco-score tracked; default judgment always
    /// fails, god mode unlocks the strict gate.
    Sabotage,
}

impl Ruleset {
    /// Radius-ratio dial step for this ruleset.
    ///
    /// Sabotage uses the finer ±0.05 step: its god-mode gate demands
    /// |radius_ratio − 0.45| < 0.01, which the coarse 0.1 grid starting
    /// from 0.3 can never land on.
    pub fn radius_ratio_step(self) -> f32 {
        match self {
            Self::Classic => 0.1,
            Self::Sabotage => 0.05,
        }
    }

    /// Whether this ruleset computes and displays an eco-score.
    pub fn tracks_eco_score(self) -> bool {
        matches!(self, Self::Sabotage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sabotage_step_reaches_sweet_spot() {
        // 0.3 + 3 × 0.05 = 0.45 exactly; 0.3 + n × 0.1 never does.
        let step = Ruleset::Sabotage.radius_ratio_step();
        assert!((0.3 + 3.0 * step - 0.45f32).abs() < 1e-6);
        assert_eq!(Ruleset::Classic.radius_ratio_step(), 0.1);
    }

    #[test]
    fn test_eco_score_only_in_sabotage() {
        assert!(!Ruleset::Classic.tracks_eco_score());
        assert!(Ruleset::Sabotage.tracks_eco_score());
    }
}
