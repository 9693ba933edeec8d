//! The four tunable turbine parameters and their control-panel contract.
//!
//! The control panel exposes each parameter as a dial with ± buttons,
//! a fixed step size, and a hard clamped domain. This module provides
//! the data model and the clamp/step/validate logic for that panel,
//! independent of any UI framework.

use serde::{Deserialize, Serialize};

use crate::ruleset::Ruleset;

/// Angle domain, integer degrees.
pub const ANGLE_MIN: i32 = 20;
pub const ANGLE_MAX: i32 = 45;
/// Outer diameter domain, meters.
pub const DIAMETER_MIN: f32 = 1.0;
pub const DIAMETER_MAX: f32 = 5.0;
/// Blade pitch-to-diameter ratio domain, unitless.
pub const PITCH_MIN: f32 = 1.0;
pub const PITCH_MAX: f32 = 2.0;
/// Hub-to-outer-radius ratio domain, unitless.
pub const RADIUS_RATIO_MIN: f32 = 0.1;
pub const RADIUS_RATIO_MAX: f32 = 0.8;

// Step sizes for the ± buttons. The radius-ratio step is ruleset
// dependent, see [`Ruleset::radius_ratio_step`].
pub const ANGLE_STEP: i32 = 1;
pub const DIAMETER_STEP: f32 = 0.1;
pub const PITCH_STEP: f32 = 0.1;

/// Current position of the four turbine dials.
///
/// Owned by the UI shell and passed by value into the evaluator on each
/// test run. Always kept in-domain by [`TurbineParams::adjust`]; the
/// evaluator assumes in-domain values and does no checking of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurbineParams {
    /// Inclination angle of the turbine, degrees.
    pub angle: i32,
    /// Outer diameter, meters.
    pub diameter: f32,
    /// Blade pitch-to-diameter ratio.
    pub pitch: f32,
    /// Hub-to-outer-radius ratio.
    pub radius_ratio: f32,
}

impl Default for TurbineParams {
    /// The control panel's initial state at session start.
    fn default() -> Self {
        Self {
            angle: 22,
            diameter: 2.0,
            pitch: 1.0,
            radius_ratio: 0.3,
        }
    }
}

/// One of the four control-panel dials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dial {
    Angle,
    Diameter,
    Pitch,
    RadiusRatio,
}

impl Dial {
    /// Panel label for this dial.
    pub fn label(self) -> &'static str {
        match self {
            Self::Angle => "Inclination Angle",
            Self::Diameter => "Outer Diameter",
            Self::Pitch => "Pitch Ratio",
            Self::RadiusRatio => "Radius Ratio",
        }
    }
}

impl TurbineParams {
    /// Apply `steps` increments (negative = decrements) to one dial,
    /// clamping to the dial's domain.
    ///
    /// Float dials are rounded to two decimals after stepping so that
    /// repeated ±0.1 / ±0.05 presses never accumulate drift.
    pub fn adjust(&mut self, dial: Dial, steps: i32, ruleset: Ruleset) {
        match dial {
            Dial::Angle => {
                self.angle = (self.angle + steps * ANGLE_STEP).clamp(ANGLE_MIN, ANGLE_MAX);
            }
            Dial::Diameter => {
                self.diameter =
                    step_clamped(self.diameter, DIAMETER_STEP, steps, DIAMETER_MIN, DIAMETER_MAX);
            }
            Dial::Pitch => {
                self.pitch = step_clamped(self.pitch, PITCH_STEP, steps, PITCH_MIN, PITCH_MAX);
            }
            Dial::RadiusRatio => {
                self.radius_ratio = step_clamped(
                    self.radius_ratio,
                    ruleset.radius_ratio_step(),
                    steps,
                    RADIUS_RATIO_MIN,
                    RADIUS_RATIO_MAX,
                );
            }
        }
    }

    /// Position of a dial's current value within its domain, in [0, 1].
    ///
    /// This is the fill fraction the shell's gauge bars render from.
    pub fn fraction(&self, dial: Dial) -> f32 {
        match dial {
            Dial::Angle => (self.angle - ANGLE_MIN) as f32 / (ANGLE_MAX - ANGLE_MIN) as f32,
            Dial::Diameter => (self.diameter - DIAMETER_MIN) / (DIAMETER_MAX - DIAMETER_MIN),
            Dial::Pitch => (self.pitch - PITCH_MIN) / (PITCH_MAX - PITCH_MIN),
            Dial::RadiusRatio => {
                (self.radius_ratio - RADIUS_RATIO_MIN) / (RADIUS_RATIO_MAX - RADIUS_RATIO_MIN)
            }
        }
    }

    /// Validate that every dial sits inside its domain, returning all
    /// violations found.
    ///
    /// The evaluator is only defined over the stated domains; this is the
    /// caller-side guard for values that arrive from outside the panel
    /// (e.g. a deserialized session).
    pub fn validate(&self) -> Vec<ParamError> {
        let mut errors = Vec::new();

        if !(ANGLE_MIN..=ANGLE_MAX).contains(&self.angle) {
            errors.push(ParamError::AngleOutOfRange(self.angle));
        }
        if !(DIAMETER_MIN..=DIAMETER_MAX).contains(&self.diameter) {
            errors.push(ParamError::DiameterOutOfRange(self.diameter));
        }
        if !(PITCH_MIN..=PITCH_MAX).contains(&self.pitch) {
            errors.push(ParamError::PitchOutOfRange(self.pitch));
        }
        if !(RADIUS_RATIO_MIN..=RADIUS_RATIO_MAX).contains(&self.radius_ratio) {
            errors.push(ParamError::RadiusRatioOutOfRange(self.radius_ratio));
        }

        errors
    }
}

/// Parameter validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Angle outside [20, 45] degrees.
    AngleOutOfRange(i32),
    /// Diameter outside [1.0, 5.0] meters.
    DiameterOutOfRange(f32),
    /// Pitch ratio outside [1.0, 2.0].
    PitchOutOfRange(f32),
    /// Radius ratio outside [0.1, 0.8].
    RadiusRatioOutOfRange(f32),
}

/// Step a float dial and clamp to its domain, rounding to two decimals.
fn step_clamped(value: f32, step: f32, steps: i32, min: f32, max: f32) -> f32 {
    let stepped = value + step * steps as f32;
    let rounded = (stepped * 100.0).round() / 100.0;
    rounded.clamp(min, max)
}
