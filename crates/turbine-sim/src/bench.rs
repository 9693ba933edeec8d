//! Test-bench state machine.
//!
//! One bench per control panel. The shell owns the clock and the RNG and
//! calls [`TestBench::update`] on every tick; the bench decides when the
//! slot-machine display refreshes and when the single authoritative
//! evaluation fires. The decorative values are never fed into scoring.

use rand::Rng;
use serde::{Deserialize, Serialize};

use turbine_logic::judgment::{judge, Verdict};
use turbine_logic::params::{Dial, TurbineParams};
use turbine_logic::ruleset::Ruleset;
use turbine_logic::scoring::{compute_score, ScoreResult};

/// A test run settles this long after test-start.
pub const RUN_DURATION_MS: u32 = 3000;
/// Decorative display refresh interval while running.
pub const FLICKER_INTERVAL_MS: u32 = 100;

/// What the score panel currently shows.
///
/// While running these are random slot-machine values; once settled they
/// are the authoritative (possibly god-mode-overridden) score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayStats {
    pub cost: u32,
    pub efficiency: f32,
    pub eco_score: Option<u8>,
}

impl DisplayStats {
    fn from_score(score: &ScoreResult) -> Self {
        Self {
            cost: score.cost,
            efficiency: score.efficiency,
            eco_score: score.eco_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// No run in progress, nothing shown.
    Idle,
    /// Spinning: decorative display refreshes every flicker interval.
    Running {
        elapsed_ms: u32,
        display: Option<DisplayStats>,
    },
    /// Evaluation done; verdict fixed until test-start or dial change.
    Settled {
        /// The score as displayed (god-mode wins carry the override).
        score: ScoreResult,
        verdict: Verdict,
    },
}

/// The simulated test bench behind the "initiate turbine" button.
#[derive(Debug)]
pub struct TestBench {
    params: TurbineParams,
    ruleset: Ruleset,
    god_mode: bool,
    phase: Phase,
}

impl TestBench {
    pub fn new(ruleset: Ruleset) -> Self {
        Self {
            params: TurbineParams::default(),
            ruleset,
            god_mode: false,
            phase: Phase::Idle,
        }
    }

    pub fn params(&self) -> &TurbineParams {
        &self.params
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    /// Current state of the hidden mode flag (the shell renders only a
    /// subtle marker from this).
    pub fn god_mode(&self) -> bool {
        self.god_mode
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.phase, Phase::Settled { .. })
    }

    /// What the score panel shows right now, if anything.
    pub fn display(&self) -> Option<DisplayStats> {
        match self.phase {
            Phase::Idle => None,
            Phase::Running { display, .. } => display,
            Phase::Settled { score, .. } => Some(DisplayStats::from_score(&score)),
        }
    }

    /// The settled verdict, if the last run has settled.
    pub fn verdict(&self) -> Option<Verdict> {
        match self.phase {
            Phase::Settled { verdict, .. } => Some(verdict),
            _ => None,
        }
    }

    /// Start (or restart) a test run. Clears any prior verdict; a run
    /// already in progress restarts from zero.
    pub fn start_test(&mut self) {
        log::info!("test run started: {:?}", self.params);
        self.phase = Phase::Running {
            elapsed_ms: 0,
            display: None,
        };
    }

    /// Advance the bench clock by `delta_ms`.
    ///
    /// While running, crossing a flicker boundary refreshes the
    /// decorative display from `rng`; reaching the run duration computes
    /// the score and judges it exactly once, then settles.
    pub fn update(&mut self, delta_ms: u32, rng: &mut impl Rng) {
        let (old_elapsed, display) = match self.phase {
            Phase::Running {
                elapsed_ms,
                display,
            } => (elapsed_ms, display),
            _ => return,
        };
        let elapsed = old_elapsed.saturating_add(delta_ms);

        if elapsed >= RUN_DURATION_MS {
            let computed = compute_score(&self.params, self.ruleset);
            let verdict = judge(&computed, &self.params, self.ruleset, self.god_mode);
            let shown = match verdict {
                Verdict::Success(displayed) => displayed,
                Verdict::Failure(_) => computed,
            };
            log::info!("test run settled: {:?} → {:?}", shown, verdict);
            self.phase = Phase::Settled {
                score: shown,
                verdict,
            };
            return;
        }

        let display = if elapsed / FLICKER_INTERVAL_MS > old_elapsed / FLICKER_INTERVAL_MS {
            Some(random_display(rng, self.ruleset))
        } else {
            display
        };
        self.phase = Phase::Running {
            elapsed_ms: elapsed,
            display,
        };
    }

    /// Step one dial. Any run in progress is cancelled — the flicker
    /// timer and the pending final evaluation go away together — and any
    /// shown score is cleared.
    pub fn adjust(&mut self, dial: Dial, steps: i32) {
        self.params.adjust(dial, steps, self.ruleset);
        if self.phase != Phase::Idle {
            log::info!("dial change during {:?}, back to idle", self.phase);
        }
        self.phase = Phase::Idle;
    }

    /// Flip the hidden mode flag. Affects the next evaluation only; a
    /// settled verdict is never re-judged.
    pub fn toggle_god_mode(&mut self) -> bool {
        self.god_mode = !self.god_mode;
        log::info!("god mode: {}", self.god_mode);
        self.god_mode
    }

    /// Teardown path: cancel any run and clear the display.
    pub fn abort(&mut self) {
        if self.is_running() {
            log::warn!("test run aborted before settling");
        }
        self.phase = Phase::Idle;
    }
}

/// Decorative slot-machine values. Never authoritative.
fn random_display(rng: &mut impl Rng, ruleset: Ruleset) -> DisplayStats {
    let efficiency = rng.gen_range(0.0_f32..100.0);
    DisplayStats {
        cost: rng.gen_range(0..10_000),
        efficiency: (efficiency * 10.0).round() / 10.0,
        eco_score: ruleset
            .tracks_eco_score()
            .then(|| rng.gen_range(0..=100_u8)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use turbine_logic::judgment::FailureReason;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn run_to_settle(bench: &mut TestBench, rng: &mut StdRng) {
        bench.start_test();
        let mut guard = 0;
        while !bench.is_settled() {
            bench.update(100, rng);
            guard += 1;
            assert!(guard < 100, "bench never settled");
        }
    }

    #[test]
    fn test_idle_until_started() {
        let mut bench = TestBench::new(Ruleset::Classic);
        let mut rng = rng();
        bench.update(10_000, &mut rng);
        assert!(!bench.is_running());
        assert!(bench.display().is_none());
        assert!(bench.verdict().is_none());
    }

    #[test]
    fn test_flicker_while_running() {
        let mut bench = TestBench::new(Ruleset::Classic);
        let mut rng = rng();
        bench.start_test();

        // No flicker boundary crossed yet
        bench.update(50, &mut rng);
        assert!(bench.display().is_none());

        // Crossing 100 ms refreshes the decorative display
        bench.update(60, &mut rng);
        assert!(bench.is_running());
        assert!(bench.display().is_some());
        assert!(bench.verdict().is_none());
    }

    #[test]
    fn test_settles_after_duration() {
        let mut bench = TestBench::new(Ruleset::Classic);
        let mut rng = rng();
        run_to_settle(&mut bench, &mut rng);

        // Default panel state: angle 22, d 2.0, p 1.0, rr 0.3
        // efficiency = 50 - 18 - 12 + 4 + 2 = 26.0 → classic failure
        let shown = bench.display().expect("settled display");
        assert_eq!(shown.efficiency, 26.0);
        assert_eq!(
            bench.verdict(),
            Some(Verdict::Failure(FailureReason::LowEfficiency {
                efficiency: 26.0
            }))
        );
    }

    #[test]
    fn test_one_big_tick_settles_without_flicker() {
        let mut bench = TestBench::new(Ruleset::Classic);
        let mut rng = rng();
        bench.start_test();
        bench.update(RUN_DURATION_MS, &mut rng);
        assert!(bench.is_settled());
    }

    #[test]
    fn test_settled_verdict_is_fixed() {
        let mut bench = TestBench::new(Ruleset::Classic);
        let mut rng = rng();
        run_to_settle(&mut bench, &mut rng);
        let first = bench.verdict();

        bench.update(1000, &mut rng);
        bench.toggle_god_mode(); // must not re-judge
        assert_eq!(bench.verdict(), first);
    }

    #[test]
    fn test_dial_change_cancels_run_and_clears_display() {
        let mut bench = TestBench::new(Ruleset::Classic);
        let mut rng = rng();
        bench.start_test();
        bench.update(500, &mut rng);
        assert!(bench.display().is_some());

        bench.adjust(Dial::Angle, 1);
        assert!(!bench.is_running());
        assert!(bench.display().is_none());

        // The cancelled run's evaluation never fires
        bench.update(10_000, &mut rng);
        assert!(bench.verdict().is_none());
    }

    #[test]
    fn test_abort_cancels_run() {
        let mut bench = TestBench::new(Ruleset::Sabotage);
        let mut rng = rng();
        bench.start_test();
        bench.update(2900, &mut rng);
        bench.abort();
        bench.update(10_000, &mut rng);
        assert!(bench.verdict().is_none());
    }

    #[test]
    fn test_sabotage_default_run_fails() {
        let mut bench = TestBench::new(Ruleset::Sabotage);
        let mut rng = rng();
        // The god-mode winning tune, flag off: still fails.
        bench.adjust(Dial::Angle, 12);
        bench.adjust(Dial::Pitch, 5);
        bench.adjust(Dial::RadiusRatio, 3);
        run_to_settle(&mut bench, &mut rng);
        assert!(!bench.verdict().expect("settled").is_success());
    }

    #[test]
    fn test_god_mode_win_shows_override() {
        let mut bench = TestBench::new(Ruleset::Sabotage);
        let mut rng = rng();
        bench.adjust(Dial::Angle, 12); // 34°
        bench.adjust(Dial::Pitch, 5); // 1.5
        bench.adjust(Dial::RadiusRatio, 3); // 0.45
        bench.toggle_god_mode();
        run_to_settle(&mut bench, &mut rng);

        assert!(bench.verdict().expect("settled").is_success());
        let shown = bench.display().expect("settled display");
        assert_eq!(shown.efficiency, 94.0);
        assert_eq!(shown.eco_score, Some(100));
    }

    #[test]
    fn test_restart_clears_previous_verdict() {
        let mut bench = TestBench::new(Ruleset::Classic);
        let mut rng = rng();
        run_to_settle(&mut bench, &mut rng);
        assert!(bench.verdict().is_some());

        bench.start_test();
        assert!(bench.is_running());
        assert!(bench.verdict().is_none());
        assert!(bench.display().is_none());
    }
}
