//! Tick loop - advances one run frame by frame
//!
//! Per frame: session clock and offline transition -> video window ->
//! passive income -> eligibility checks -> action selection -> snapshot.
//!
//! A session boundary emits a snapshot and then skips every offline frame
//! in one jump, so a week of simulated time costs only the online frames.

use crate::core::error::Result;
use crate::core::types::Tick;
use crate::game::Game;
use crate::output::{emit, SnapshotSink};
use crate::player::currency::Currency;
use crate::simulation::action_select::choose_action;

/// Counters from a finished tick loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOutcome {
    /// Frames covered, offline jumps included
    pub ticks: Tick,
    pub actions: u64,
    pub sessions_ended: u32,
}

/// Run one frame. Returns the number of frames consumed: 1, or more when
/// a session ended and the offline gap was skipped.
///
/// A frame that ends a session still finishes as the first frame of the
/// next one: income, checks and selection run against the pre-jump frame
/// number, and the offline frames are skipped afterwards.
pub fn run_tick(game: &mut Game, now: Tick, sink: &mut dyn SnapshotSink, outcome: &mut RunOutcome) -> Result<Tick> {
    let frame = now + 1;
    let fps = u64::from(game.settings.ticks_per_second);
    let mut consumed: Tick = 1;

    if let Some(transition) = game.check_offline(frame) {
        emit(game, sink);
        game.start_next_session();
        outcome.sessions_ended += 1;
        consumed += transition.offline.saturating_mul(fps);
    }

    game.reset_video_count_if_due();

    if frame % fps == 0 {
        let income = game.player.inventory.income_per_sec();
        game.player.earn(Currency::Cash, income);
    }

    if game.state.gcd <= 0.0 {
        game.run_checks();
    }

    if choose_action(game)?.is_some() {
        outcome.actions += 1;
    }

    if frame % game.settings.snapshot_every() == 0 {
        emit(game, sink);
    }

    Ok(consumed)
}

/// Run frames until `total_ticks` is reached
pub fn run_ticks(game: &mut Game, total_ticks: Tick, sink: &mut dyn SnapshotSink) -> Result<RunOutcome> {
    let mut outcome = RunOutcome::default();
    let mut now: Tick = 0;

    while now < total_ticks {
        let advanced = run_tick(game, now, sink, &mut outcome)?;
        now = now.saturating_add(advanced);
    }

    outcome.ticks = now.min(total_ticks);
    Ok(outcome)
}
