// Host-side tests for the matrix rain field and its visibility gate.
// Randomness is injected through a seeded StdRng.

use rand::rngs::StdRng;
use rand::SeedableRng;
use reel_web::core::{
    DropField, GateCommand, GateState, Glyph, RainConfig, RainSurface, TickLoop, TickScheduler,
    VisibilityGate,
};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, PartialEq)]
enum Call {
    Trail { width: f32, height: f32, alpha: f32 },
    Glyph { glyph: Glyph, x: f32, y: f32 },
}

#[derive(Default)]
struct RecordingSurface {
    calls: Vec<Call>,
}

impl RainSurface for RecordingSurface {
    fn fill_trail(&mut self, width: f32, height: f32, alpha: f32) {
        self.calls.push(Call::Trail { width, height, alpha });
    }

    fn fill_glyph(&mut self, glyph: Glyph, x: f32, y: f32, _size: f32) {
        self.calls.push(Call::Glyph { glyph, x, y });
    }
}

fn field(width: u32, height: u32, seed: u64) -> DropField<StdRng> {
    DropField::new(RainConfig::default(), width, height, StdRng::seed_from_u64(seed))
}

#[test]
fn columns_follow_width() {
    let f = field(1000, 600, 1);
    assert_eq!(f.column_count(), 62); // floor(1000 / 16)
    for (i, c) in f.columns().iter().enumerate() {
        assert_eq!(c.index, i);
        assert!(c.fall <= 0.0 && c.fall > -100.0, "column {i} starts at {}", c.fall);
    }
}

#[test]
fn resize_reinitializes_every_column() {
    let mut f = field(1000, 600, 2);
    let mut s = RecordingSurface::default();
    for _ in 0..10 {
        f.tick(&mut s);
    }
    f.resize(330, 200);
    assert_eq!(f.column_count(), 20);
    assert_eq!(f.columns().len(), 20);
    assert_eq!((f.width(), f.height()), (330, 200));
    assert!(f.columns().iter().all(|c| c.fall <= 0.0));

    f.resize(1600, 200);
    assert_eq!(f.column_count(), 100);
}

#[test]
fn starts_are_staggered() {
    let f = field(1600, 600, 3);
    let first = f.columns()[0].fall;
    assert!(f.columns().iter().any(|c| c.fall != first));
}

#[test]
fn zero_size_surface_is_a_valid_no_op() {
    let mut f = field(0, 0, 4);
    assert_eq!(f.column_count(), 0);
    let mut s = RecordingSurface::default();
    f.tick(&mut s);
    f.tick(&mut s);
    assert!(s.calls.iter().all(|c| matches!(c, Call::Trail { .. })));

    f.resize(15, 100); // still narrower than one glyph
    assert_eq!(f.column_count(), 0);
}

#[test]
fn tick_draws_trail_then_one_glyph_per_column() {
    let mut f = field(64, 160, 5);
    let before: Vec<f32> = f.columns().iter().map(|c| c.fall).collect();
    let mut s = RecordingSurface::default();
    f.tick(&mut s);

    assert_eq!(s.calls.len(), 1 + 4);
    assert_eq!(
        s.calls[0],
        Call::Trail {
            width: 64.0,
            height: 160.0,
            alpha: 0.05
        }
    );
    for (i, call) in s.calls[1..].iter().enumerate() {
        match call {
            Call::Glyph { x, y, .. } => {
                assert_eq!(*x, i as f32 * 16.0);
                assert_eq!(*y, before[i] * 16.0);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }
    for (c, b) in f.columns().iter().zip(&before) {
        assert_eq!(c.fall, b + 1.0);
    }
}

#[test]
fn glyphs_are_binary_and_vary() {
    let mut f = field(1600, 600, 6);
    let mut s = RecordingSurface::default();
    f.tick(&mut s);
    let glyphs: Vec<Glyph> = s
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Glyph { glyph, .. } => Some(*glyph),
            _ => None,
        })
        .collect();
    assert!(glyphs.contains(&Glyph::Zero));
    assert!(glyphs.contains(&Glyph::One));
    assert_eq!(Glyph::Zero.as_str(), "0");
    assert_eq!(Glyph::One.as_str(), "1");
}

#[test]
fn columns_past_the_bottom_reset_at_different_times() {
    let mut f = field(1600, 160, 7); // 100 columns, 10 rows tall
    let mut s = RecordingSurface::default();
    for _ in 0..400 {
        f.tick(&mut s);
        s.calls.clear();
    }
    // every column has long passed the bottom at least once; with a 2.5%
    // reset chance they no longer share a position
    let falls: Vec<f32> = f.columns().iter().map(|c| c.fall).collect();
    let mut distinct = falls.clone();
    distinct.sort_by(|a, b| a.total_cmp(b));
    distinct.dedup();
    assert!(distinct.len() > 10, "columns stayed synchronized: {distinct:?}");
    assert!(falls.iter().any(|&p| p * 16.0 <= 160.0 + 16.0), "no column ever reset");
}

#[test]
fn columns_never_reset_above_the_bottom() {
    let config = RainConfig {
        reset_probability: 1.0,
        start_rows_above: 0.0,
        ..RainConfig::default()
    };
    let mut f = DropField::new(config, 32, 160, StdRng::seed_from_u64(8));
    let mut s = RecordingSurface::default();
    for step in 1..=10 {
        f.tick(&mut s);
        assert_eq!(f.columns()[0].fall, step as f32);
    }
    // fall 10 * 16 = 160 is not past 160; next tick passes it
    f.tick(&mut s);
    assert_eq!(f.columns()[0].fall, 11.0);
    f.tick(&mut s);
    assert_eq!(f.columns()[0].fall, 1.0, "certain reset once past the bottom");
}

#[test]
fn gate_starts_and_stops_once() {
    let mut gate = VisibilityGate::new(0.1);
    assert_eq!(gate.state(), GateState::Stopped);
    assert_eq!(gate.set_visible(false), GateCommand::Nothing);
    assert_eq!(gate.set_visible(true), GateCommand::StartTicking);
    assert_eq!(gate.set_visible(true), GateCommand::Nothing, "no second loop");
    assert!(gate.is_running());
    assert_eq!(gate.set_visible(false), GateCommand::StopTicking);
    assert_eq!(gate.set_visible(false), GateCommand::Nothing);
    assert_eq!(gate.set_visible(true), GateCommand::StartTicking, "re-entry restarts");
}

#[test]
fn gate_honours_threshold() {
    let mut gate = VisibilityGate::new(0.1);
    assert_eq!(gate.observe(true, 0.05), GateCommand::Nothing);
    assert_eq!(gate.observe(true, 0.1), GateCommand::StartTicking);
    assert_eq!(gate.observe(true, 0.6), GateCommand::Nothing);
    assert_eq!(gate.observe(false, 0.0), GateCommand::StopTicking);
}

#[test]
fn disposed_gate_ignores_everything() {
    let mut gate = VisibilityGate::new(0.1);
    gate.set_visible(true);
    assert_eq!(gate.dispose(), GateCommand::StopTicking);
    assert_eq!(gate.dispose(), GateCommand::Nothing);
    assert_eq!(gate.set_visible(true), GateCommand::Nothing);
    assert_eq!(gate.state(), GateState::Disposed);
}

/// Counts timers started and cancelled.
#[derive(Clone, Default)]
struct CountingScheduler {
    started: Rc<Cell<u32>>,
    cleared: Rc<Cell<u32>>,
    refuse: bool,
}

struct CountingTimer {
    cleared: Rc<Cell<u32>>,
}

impl Drop for CountingTimer {
    fn drop(&mut self) {
        self.cleared.set(self.cleared.get() + 1);
    }
}

impl TickScheduler for CountingScheduler {
    type Handle = CountingTimer;

    fn schedule(&mut self, period_ms: i32) -> Option<CountingTimer> {
        assert_eq!(period_ms, 33);
        if self.refuse {
            return None;
        }
        self.started.set(self.started.get() + 1);
        Some(CountingTimer {
            cleared: self.cleared.clone(),
        })
    }
}

fn tick_loop() -> (TickLoop<CountingScheduler>, CountingScheduler) {
    let scheduler = CountingScheduler::default();
    (TickLoop::new(0.1, 33, scheduler.clone()), scheduler)
}

#[test]
fn repeated_visibility_keeps_a_single_timer() {
    let (mut ticks, timers) = tick_loop();
    assert!(!ticks.is_ticking());
    ticks.observe(true, 0.5);
    ticks.observe(true, 0.9);
    ticks.set_visible(true);
    assert!(ticks.is_ticking());
    assert_eq!(timers.started.get(), 1);
    assert_eq!(timers.cleared.get(), 0);

    ticks.observe(false, 0.0);
    assert_eq!(timers.cleared.get(), 1);
    ticks.observe(true, 0.2);
    assert_eq!(timers.started.get(), 2, "re-entry starts a fresh timer");
}

#[test]
fn stopped_loop_never_advances_the_field() {
    let (mut ticks, _timers) = tick_loop();
    let mut f = field(32, 160, 9);
    let mut s = RecordingSurface::default();

    assert!(!ticks.tick_field(&mut f, &mut s));
    assert!(s.calls.is_empty());

    ticks.set_visible(true);
    assert!(ticks.tick_field(&mut f, &mut s));
    let paused_at = f.columns()[0].fall;

    ticks.set_visible(false);
    for _ in 0..5 {
        assert!(!ticks.tick_field(&mut f, &mut s));
    }
    assert_eq!(f.columns()[0].fall, paused_at);

    ticks.set_visible(true);
    ticks.tick_field(&mut f, &mut s);
    assert_eq!(f.columns()[0].fall, paused_at + 1.0, "hidden time is skipped");
}

#[test]
fn dispose_clears_the_timer_once() {
    let (mut ticks, timers) = tick_loop();
    ticks.set_visible(true);
    assert!(ticks.dispose());
    assert!(!ticks.dispose());
    assert_eq!(timers.cleared.get(), 1);

    ticks.set_visible(true);
    assert_eq!(timers.started.get(), 1, "disposed loop never restarts");
    assert_eq!(ticks.gate().state(), GateState::Disposed);
}

#[test]
fn failed_start_can_be_retried() {
    let scheduler = CountingScheduler {
        refuse: true,
        ..CountingScheduler::default()
    };
    let mut ticks = TickLoop::new(0.1, 33, scheduler);
    ticks.set_visible(true);
    assert!(!ticks.is_ticking());
    assert_eq!(ticks.gate().state(), GateState::Stopped);
    assert_eq!(ticks.set_visible(true), GateCommand::StartTicking);
}

#[test]
fn field_keeps_its_config() {
    let config = RainConfig {
        glyph_size: 20.0,
        ..RainConfig::default()
    };
    let f = DropField::new(config, 200, 100, StdRng::seed_from_u64(3));
    assert_eq!(f.config().glyph_size, 20.0);
    assert_eq!(f.column_count(), 10);
}
