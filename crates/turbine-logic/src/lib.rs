//! Pure scoring and judgment logic for Turbine Protocol.
//!
//! This crate contains the outcome evaluator for the classroom turbine
//! role-play: a deterministic mapping from four tunable design parameters
//! to a cost, an efficiency, and (in the sabotage ruleset) an eco-score,
//! plus the pass/fail judgment with human-readable failure reasons.
//! Functions take plain data and return results — no UI framework, no
//! timers, no randomness — making them unit-testable and portable across
//! any shell that renders the control panel.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`params`] | The four dials: domains, step sizes, clamping, validation |
//! | [`ruleset`] | Classic vs sabotage rule sets and their knob differences |
//! | [`scoring`] | Cost / efficiency / eco-score formulas |
//! | [`judgment`] | Pass/fail verdicts and failure reasons |
//! | [`display`] | Rendering contract: currency and percentage formatting |

pub mod display;
pub mod judgment;
pub mod params;
pub mod ruleset;
pub mod scoring;
