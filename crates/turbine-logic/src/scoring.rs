//! Cost, efficiency, and eco-score formulas.
//!
//! Pure and total over the dial domains: same params in, same score out,
//! every time. The caller (control panel) keeps params in-domain; no
//! checking happens here.

use serde::{Deserialize, Serialize};

use crate::params::TurbineParams;
use crate::ruleset::Ruleset;

// ── Cost model ──────────────────────────────────────────────────────────

/// Baseline build cost, dollars.
const BASE_COST: f64 = 3000.0;
/// Each degree of inclination above the minimum adds tooling cost.
const COST_PER_DEGREE: f64 = 50.0;
/// Each meter of diameter above the minimum adds material cost.
const COST_PER_METER: f64 = 1000.0;
/// Higher pitch uses less blade material per revolution.
const PITCH_REBATE: f64 = 500.0;
/// A larger hub ratio hollows out the turbine, saving material.
const HOLLOW_REBATE: f64 = 1000.0;
/// No build comes in under this.
const COST_FLOOR: u32 = 1000;

// ── Efficiency model ────────────────────────────────────────────────────

const BASE_EFFICIENCY: f64 = 50.0;
/// Efficiency peaks at this inclination.
pub const ANGLE_SWEET_SPOT: i32 = 34;
/// Penalty per degree of deviation from the sweet spot.
const ANGLE_PENALTY: f64 = 1.5;
/// Efficiency peaks at this hub-to-outer-radius ratio.
pub const RADIUS_SWEET_SPOT: f64 = 0.45;
/// Penalty per unit of deviation from the radius sweet spot.
const RADIUS_PENALTY: f64 = 80.0;
const DIAMETER_BONUS: f64 = 2.0;
const PITCH_BONUS: f64 = 2.0;

/// Outcome of one simulated test run.
///
/// `efficiency` is already rounded to one decimal; `eco_score` is only
/// computed under [`Ruleset::Sabotage`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Build cost, dollars, floored at $1,000.
    pub cost: u32,
    /// Hydraulic efficiency, percent, one decimal, clamped to [0, 100].
    pub efficiency: f32,
    /// Aquatic-life safety metric, percent, clamped to [0, 100].
    pub eco_score: Option<u8>,
}

/// Compute the score for one test run. Pure and deterministic.
pub fn compute_score(params: &TurbineParams, ruleset: Ruleset) -> ScoreResult {
    ScoreResult {
        cost: compute_cost(params),
        efficiency: compute_efficiency(params),
        eco_score: ruleset.tracks_eco_score().then(|| compute_eco_score(params)),
    }
}

/// Build cost in dollars.
///
/// Monotone: non-decreasing in angle and diameter, non-increasing in
/// pitch and radius ratio. Never below [`COST_FLOOR`].
fn compute_cost(params: &TurbineParams) -> u32 {
    let mut cost = BASE_COST;
    cost += f64::from(params.angle - 20) * COST_PER_DEGREE;
    cost += (f64::from(params.diameter) - 1.0) * COST_PER_METER;
    cost -= (f64::from(params.pitch) - 1.0) * PITCH_REBATE;
    cost -= (f64::from(params.radius_ratio) - 0.1) * HOLLOW_REBATE;

    (cost.round() as u32).max(COST_FLOOR)
}

/// Hydraulic efficiency in percent, rounded to one decimal, then clamped.
///
/// Peaks at angle 34° and radius ratio 0.45 for fixed diameter and pitch.
fn compute_efficiency(params: &TurbineParams) -> f32 {
    let mut efficiency = BASE_EFFICIENCY;
    efficiency -= f64::from((params.angle - ANGLE_SWEET_SPOT).abs()) * ANGLE_PENALTY;
    efficiency -= (f64::from(params.radius_ratio) - RADIUS_SWEET_SPOT).abs() * RADIUS_PENALTY;
    efficiency += f64::from(params.diameter) * DIAMETER_BONUS;
    efficiency += f64::from(params.pitch) * PITCH_BONUS;

    let one_decimal = (efficiency * 10.0).round() / 10.0;
    one_decimal.clamp(0.0, 100.0) as f32
}

/// Eco-score tiers: high pitch leaves passage room for fish; steep
/// inclination (> 40°) costs a flat penalty.
fn compute_eco_score(params: &TurbineParams) -> u8 {
    let base: i32 = if params.pitch > 1.6 {
        95
    } else if params.pitch >= 1.3 {
        80
    } else {
        40
    };

    let score = if params.angle > 40 { base - 15 } else { base };
    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(angle: i32, diameter: f32, pitch: f32, radius_ratio: f32) -> TurbineParams {
        TurbineParams {
            angle,
            diameter,
            pitch,
            radius_ratio,
        }
    }

    #[test]
    fn test_reference_build() {
        // Sweet-spot angle and radius, mid diameter, minimum pitch.
        let p = params(34, 2.0, 1.0, 0.45);
        let score = compute_score(&p, Ruleset::Classic);
        // 3000 + 14*50 + 1.0*1000 - 0 - 0.35*1000
        assert_eq!(score.cost, 4350);
        // 50 - 0 - 0 + 4 + 2
        assert_eq!(score.efficiency, 56.0);
        assert_eq!(score.eco_score, None);
    }

    #[test]
    fn test_deterministic() {
        let p = params(30, 3.2, 1.4, 0.35);
        let a = compute_score(&p, Ruleset::Sabotage);
        let b = compute_score(&p, Ruleset::Sabotage);
        assert_eq!(a, b);
    }

    #[test]
    fn test_cost_floor() {
        // Cheapest possible build: min angle/diameter, max pitch/hollow.
        let p = params(20, 1.0, 2.0, 0.8);
        // 3000 - 500 - 700 = 1800, above the floor
        assert_eq!(compute_score(&p, Ruleset::Classic).cost, 1800);
        assert!(compute_score(&p, Ruleset::Classic).cost >= 1000);
    }

    #[test]
    fn test_cost_monotone_in_each_dial() {
        let base = params(30, 3.0, 1.5, 0.4);
        let cost = |p: &TurbineParams| compute_score(p, Ruleset::Classic).cost;

        assert!(cost(&params(31, 3.0, 1.5, 0.4)) >= cost(&base));
        assert!(cost(&params(30, 3.1, 1.5, 0.4)) >= cost(&base));
        assert!(cost(&params(30, 3.0, 1.6, 0.4)) <= cost(&base));
        assert!(cost(&params(30, 3.0, 1.5, 0.5)) <= cost(&base));
    }

    #[test]
    fn test_efficiency_peaks_at_sweet_spots() {
        let eff = |angle, rr| compute_score(&params(angle, 2.0, 1.0, rr), Ruleset::Classic).efficiency;

        let peak = eff(34, 0.45);
        assert!(eff(33, 0.45) < peak);
        assert!(eff(35, 0.45) < peak);
        assert!(eff(34, 0.40) < peak);
        assert!(eff(34, 0.50) < peak);
    }

    #[test]
    fn test_efficiency_clamped_at_zero() {
        // Worst tuning: far from both sweet spots.
        let p = params(45, 1.0, 1.0, 0.8);
        // 50 - 16.5 - 28 + 2 + 2 = 9.5, still positive; push radius harder
        let score = compute_score(&p, Ruleset::Classic);
        assert!(score.efficiency >= 0.0);
        let worst = params(20, 1.0, 1.0, 0.8);
        // 50 - 21 - 28 + 2 + 2 = 5.0
        assert_eq!(compute_score(&worst, Ruleset::Classic).efficiency, 5.0);
    }

    #[test]
    fn test_eco_score_tiers() {
        let eco = |angle, pitch| {
            compute_score(&params(angle, 2.0, pitch, 0.4), Ruleset::Sabotage)
                .eco_score
                .unwrap()
        };

        assert_eq!(eco(30, 1.7), 95);
        assert_eq!(eco(30, 1.6), 80); // > 1.6 strictly for the top tier
        assert_eq!(eco(30, 1.3), 80);
        assert_eq!(eco(30, 1.2), 40);
        // Steep-angle penalty
        assert_eq!(eco(41, 1.7), 80);
        assert_eq!(eco(40, 1.7), 95); // 40 itself is not penalized
        assert_eq!(eco(45, 1.2), 25);
    }

    #[test]
    fn test_classic_never_reports_eco() {
        let p = params(30, 2.0, 1.8, 0.4);
        assert_eq!(compute_score(&p, Ruleset::Classic).eco_score, None);
    }
}
