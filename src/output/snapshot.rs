//! Time-series snapshots of one player's run

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::types::{AnimalTypeId, AnimalUid, EggId, PlayerId, Seconds};
use crate::game::actions::ActionKind;
use crate::game::Game;
use crate::player::animal::AnimalStatus;
use crate::player::currency::{Currency, Ledger};
use crate::player::tracker::Tracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencySnapshot {
    /// Earned since the previous snapshot
    pub earned: u64,
    /// Spent since the previous snapshot
    pub spent: u64,
    pub balance: u64,
    pub max: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimalSnapshot {
    pub uid: AnimalUid,
    pub type_id: AnimalTypeId,
    pub level: u32,
    pub active: bool,
}

/// State of a run at one moment, plus activity since the last snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub day: u32,
    pub session: u32,
    pub time_real: Seconds,
    pub time_inapp: Seconds,
    pub time_session: Seconds,

    pub player_id: PlayerId,
    pub variant: String,
    pub player_level: u32,
    pub player_xp: u64,

    /// Every animal ever earned, donated ones included
    pub animals_total: usize,
    pub animals_socketed: usize,
    pub sets_unlocked: usize,
    pub set_max: Option<u32>,
    pub sets_completed: usize,
    pub set_max_completed: Option<u32>,

    pub egg_id: Option<EggId>,
    pub egg_progress: Option<u64>,
    pub egg_goal: Option<u64>,

    pub cash: CurrencySnapshot,
    pub treats: CurrencySnapshot,
    pub gems: CurrencySnapshot,

    pub candy_count: usize,
    pub queued: Vec<ActionKind>,
    pub set_counts: BTreeMap<u32, usize>,
    pub animals: Vec<AnimalSnapshot>,

    pub activity: Tracker,
}

impl Snapshot {
    /// Capture the current state. Does not clear the tracker.
    pub fn capture(game: &Game) -> Self {
        let player = &game.player;
        let state = &game.state;
        let clock = &state.clock;
        let tracker = &player.tracker;

        let sets = player.inventory.acquired_sets();
        let completed = player.completed_sets(|set_id| game.economy.set_size(set_id));
        let egg = state.egg_progress();
        let egg_goal = egg
            .and_then(|(id, _)| game.economy.egg(id))
            .map(|e| e.goal);

        let currency = |c: Currency, earned: u64, spent: u64| {
            let ledger: &Ledger = player.wallet.ledger(c);
            CurrencySnapshot {
                earned,
                spent,
                balance: ledger.balance,
                max: ledger.max,
            }
        };

        Self {
            frame: clock.frame,
            day: clock.day,
            session: clock.session,
            time_real: clock.time_real,
            time_inapp: clock.time_inapp,
            time_session: clock.time_session,

            player_id: player.id,
            variant: player.variant.clone(),
            player_level: player.level,
            player_xp: player.xp,

            animals_total: player.inventory.len(),
            animals_socketed: state.sockets.len(),
            sets_unlocked: sets.len(),
            set_max: sets.iter().next_back().copied(),
            sets_completed: completed.len(),
            set_max_completed: completed.iter().max().copied(),

            egg_id: egg.map(|(id, _)| id),
            egg_progress: egg.map(|(_, progress)| progress),
            egg_goal,

            cash: currency(Currency::Cash, tracker.cash_earned, tracker.cash_spent),
            treats: currency(Currency::Treats, tracker.treats_earned, tracker.treats_spent),
            gems: currency(Currency::Gems, tracker.gems_earned, tracker.gems_spent),

            candy_count: state.candy_slots.len(),
            queued: state.queue.kinds(),
            set_counts: player.inventory.set_counts(),
            animals: player
                .inventory
                .iter()
                .filter(|a| a.is_owned())
                .map(|a| AnimalSnapshot {
                    uid: a.uid,
                    type_id: a.type_id,
                    level: a.level,
                    active: a.status == AnimalStatus::Active,
                })
                .collect(),

            activity: tracker.clone(),
        }
    }
}

/// Where snapshots go as a run produces them
pub trait SnapshotSink {
    fn record(&mut self, snapshot: Snapshot);
}

impl SnapshotSink for Vec<Snapshot> {
    fn record(&mut self, snapshot: Snapshot) {
        self.push(snapshot);
    }
}

/// Capture a snapshot into `sink` and start a new activity interval
pub fn emit(game: &mut Game, sink: &mut dyn SnapshotSink) {
    sink.record(Snapshot::capture(game));
    game.player.tracker.reset();
}
