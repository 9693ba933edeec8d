//! Turbine Protocol test-bench driver.
//!
//! Owns the per-run state machine (`idle → running → settled`) that the
//! control-panel shell drives: the shell forwards button presses and
//! clock ticks, this crate decides when the decorative display flickers
//! and when the one authoritative evaluation happens.
//!
//! # Example
//!
//! ```rust
//! use turbine_logic::params::Dial;
//! use turbine_logic::ruleset::Ruleset;
//! use turbine_sim::bench::TestBench;
//!
//! let mut bench = TestBench::new(Ruleset::Classic);
//! let mut rng = rand::thread_rng();
//!
//! bench.adjust(Dial::Angle, 12); // 22° → 34°
//! bench.start_test();
//! loop {
//!     bench.update(100, &mut rng); // shell tick, ~10 Hz
//!     if bench.is_settled() {
//!         break;
//!     }
//! }
//! assert!(bench.verdict().is_some());
//! ```

pub mod bench;

pub use bench::TestBench;
