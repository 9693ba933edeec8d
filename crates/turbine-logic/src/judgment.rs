//! Pass/fail judgment over a computed score.
//!
//! Three rule paths:
//! - **Classic**: efficiency and budget thresholds, efficiency reason
//!   taking priority.
//! - **Sabotage, god mode off**: always fails — the session is rigged by
//!   design (one role card is a saboteur); only the reason varies.
//! - **Sabotage, god mode on**: a fair-but-strict four-condition gate;
//!   passing it overrides the displayed efficiency and eco-score.
//!
//! God mode is an explicit argument, never ambient state, so `judge`
//! stays pure: identical inputs give an identical verdict.

use serde::{Deserialize, Serialize};

use crate::display::group_thousands;
use crate::params::TurbineParams;
use crate::ruleset::Ruleset;
use crate::scoring::{ScoreResult, ANGLE_SWEET_SPOT, RADIUS_SWEET_SPOT};

// ── Classic thresholds ──────────────────────────────────────────────────

/// Classic success requires efficiency strictly above this.
const CLASSIC_EFFICIENCY_BAR: f32 = 85.0;
/// Classic success requires cost strictly below this.
const CLASSIC_BUDGET: u32 = 7000;

// ── Sabotage (god mode off) reason thresholds ───────────────────────────

/// Pitch below this trips the environmental review first.
const ECO_PITCH_BAR: f32 = 1.3;
/// Cost above this trips the budget reason next.
const RIGGED_BUDGET: u32 = 4000;

// ── Sabotage god-mode gate ──────────────────────────────────────────────

const GATE_ANGLE_MIN: i32 = 32;
const GATE_ANGLE_MAX: i32 = 36;
/// |radius_ratio − 0.45| must be under this.
const GATE_RADIUS_TOLERANCE: f32 = 0.01;
const GATE_BUDGET: u32 = 6000;
const GATE_PITCH_MIN: f32 = 1.4;
/// Displayed efficiency override on a god-mode win.
const GATE_WIN_EFFICIENCY: f32 = 94.0;
/// Displayed eco-score override on a god-mode win.
const GATE_WIN_ECO_SCORE: u8 = 100;

/// Final outcome of a test run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    /// Mission success; carries the score as displayed (god-mode wins
    /// override efficiency and eco-score).
    Success(ScoreResult),
    /// Critical failure with a reason for the verdict panel.
    Failure(FailureReason),
}

impl Verdict {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Why a test run failed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FailureReason {
    /// Efficiency at or below the classic bar.
    LowEfficiency { efficiency: f32 },
    /// Cost at or above the ceiling of the active rule path.
    BudgetExceeded { cost: u32, limit: u32 },
    /// Environmental review failed (sabotage session).
    EcoViolation { eco_score: u8 },
    /// Inclination off the 34° operating point (sabotage session).
    PowerInstability { angle: i32 },
    /// Generic fallback when nothing else is left to blame.
    DebrisBlockage,
    /// Inclination outside the god-mode stability band.
    AngleOutOfBand { angle: i32 },
    /// Hub ratio off the 0.45 alignment point.
    HubRatioMisaligned { radius_ratio: f32 },
    /// Pitch below the god-mode flow minimum.
    PitchTooLow { pitch: f32 },
}

impl FailureReason {
    /// Human-readable reason text for the verdict panel.
    pub fn message(&self) -> String {
        match *self {
            Self::LowEfficiency { efficiency } => {
                format!("Efficiency too low: {:.1}%", efficiency)
            }
            Self::BudgetExceeded { cost, limit } => {
                format!("Budget exceeded by ${}", group_thousands(cost - limit))
            }
            Self::EcoViolation { eco_score } => format!(
                "Environmental review failed: eco-score {}% endangers aquatic life",
                eco_score
            ),
            Self::PowerInstability { angle } => {
                format!("Power output unstable at {}° inclination", angle)
            }
            Self::DebrisBlockage => "Debris blockage detected in the intake assembly".to_string(),
            Self::AngleOutOfBand { angle } => format!(
                "Inclination {}° outside the stable {}-{}° band",
                angle, GATE_ANGLE_MIN, GATE_ANGLE_MAX
            ),
            Self::HubRatioMisaligned { radius_ratio } => format!(
                "Hub ratio {:.2} misaligned: {:.2} required",
                radius_ratio, RADIUS_SWEET_SPOT
            ),
            Self::PitchTooLow { pitch } => {
                format!("Pitch ratio {:.1} too low for stable flow", pitch)
            }
        }
    }
}

/// Judge a computed score under the given ruleset.
///
/// Pure and idempotent: the verdict depends only on the arguments. The
/// `god_mode` flag is read here and nowhere else; it is ignored entirely
/// by [`Ruleset::Classic`].
pub fn judge(
    score: &ScoreResult,
    params: &TurbineParams,
    ruleset: Ruleset,
    god_mode: bool,
) -> Verdict {
    match ruleset {
        Ruleset::Classic => judge_classic(score),
        Ruleset::Sabotage if god_mode => judge_gate(score, params),
        Ruleset::Sabotage => judge_rigged(score, params),
    }
}

fn judge_classic(score: &ScoreResult) -> Verdict {
    if score.efficiency > CLASSIC_EFFICIENCY_BAR && score.cost < CLASSIC_BUDGET {
        return Verdict::Success(*score);
    }

    // Efficiency message takes priority over the budget message.
    if score.efficiency <= CLASSIC_EFFICIENCY_BAR {
        Verdict::Failure(FailureReason::LowEfficiency {
            efficiency: score.efficiency,
        })
    } else {
        Verdict::Failure(FailureReason::BudgetExceeded {
            cost: score.cost,
            limit: CLASSIC_BUDGET,
        })
    }
}

/// The rigged default of the sabotage session: never succeeds, the
/// first matching rule picks which excuse the crew hears.
fn judge_rigged(score: &ScoreResult, params: &TurbineParams) -> Verdict {
    let reason = if params.pitch < ECO_PITCH_BAR {
        FailureReason::EcoViolation {
            // Always present under Sabotage; 0 only if a caller judged a
            // foreign score.
            eco_score: score.eco_score.unwrap_or(0),
        }
    } else if score.cost > RIGGED_BUDGET {
        FailureReason::BudgetExceeded {
            cost: score.cost,
            limit: RIGGED_BUDGET,
        }
    } else if params.angle != ANGLE_SWEET_SPOT {
        FailureReason::PowerInstability {
            angle: params.angle,
        }
    } else {
        FailureReason::DebrisBlockage
    };

    Verdict::Failure(reason)
}

/// The god-mode gate: all four checks must pass, evaluated in order
/// angle → radius → cost → pitch so the first failing check names the
/// reason. A win overrides the displayed efficiency and eco-score.
fn judge_gate(score: &ScoreResult, params: &TurbineParams) -> Verdict {
    if !(GATE_ANGLE_MIN..=GATE_ANGLE_MAX).contains(&params.angle) {
        return Verdict::Failure(FailureReason::AngleOutOfBand {
            angle: params.angle,
        });
    }
    if (params.radius_ratio - RADIUS_SWEET_SPOT as f32).abs() >= GATE_RADIUS_TOLERANCE {
        return Verdict::Failure(FailureReason::HubRatioMisaligned {
            radius_ratio: params.radius_ratio,
        });
    }
    if score.cost >= GATE_BUDGET {
        return Verdict::Failure(FailureReason::BudgetExceeded {
            cost: score.cost,
            limit: GATE_BUDGET,
        });
    }
    if params.pitch < GATE_PITCH_MIN {
        return Verdict::Failure(FailureReason::PitchTooLow {
            pitch: params.pitch,
        });
    }

    Verdict::Success(ScoreResult {
        cost: score.cost,
        efficiency: GATE_WIN_EFFICIENCY,
        eco_score: Some(GATE_WIN_ECO_SCORE),
    })
}
