//! Pending player actions

use serde::{Deserialize, Serialize};

use crate::core::types::{AnimalUid, EggId, RewardId, Tick};

/// Action kinds in selection priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    FreeCrate,
    Feed,
    Merge,
    Swap,
    Buy,
    CollectReward,
    Spin,
    Donate,
}

impl ActionKind {
    /// Highest priority first
    pub const PRIORITY: [ActionKind; 8] = [
        ActionKind::FreeCrate,
        ActionKind::Feed,
        ActionKind::Merge,
        ActionKind::Swap,
        ActionKind::Buy,
        ActionKind::CollectReward,
        ActionKind::Spin,
        ActionKind::Donate,
    ];

    /// Kinds dropped when a session ends
    pub const SESSION_SCOPED: [ActionKind; 6] = [
        ActionKind::Buy,
        ActionKind::Spin,
        ActionKind::Merge,
        ActionKind::Feed,
        ActionKind::Donate,
        ActionKind::Swap,
    ];
}

/// What an action will do when clicked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActionPayload {
    FreeCrate {
        number: u32,
    },
    Feed {
        animal: AnimalUid,
        animal_level: u32,
        animal_rarity: u8,
        candy_level: u32,
    },
    Merge {
        candy_level: u32,
    },
    Swap {
        out: AnimalUid,
        into: AnimalUid,
    },
    Buy {
        candy_level: u32,
        cost: u64,
        xp: u64,
    },
    CollectReward {
        egg: EggId,
        reward: RewardId,
    },
    Spin {
        wheel: usize,
        cost: u64,
        reward: RewardId,
    },
    Donate {
        animal: AnimalUid,
    },
}

impl ActionPayload {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionPayload::FreeCrate { .. } => ActionKind::FreeCrate,
            ActionPayload::Feed { .. } => ActionKind::Feed,
            ActionPayload::Merge { .. } => ActionKind::Merge,
            ActionPayload::Swap { .. } => ActionKind::Swap,
            ActionPayload::Buy { .. } => ActionKind::Buy,
            ActionPayload::CollectReward { .. } => ActionKind::CollectReward,
            ActionPayload::Spin { .. } => ActionKind::Spin,
            ActionPayload::Donate { .. } => ActionKind::Donate,
        }
    }

    /// Dedupe key within the kind
    pub fn key(&self) -> u64 {
        match *self {
            ActionPayload::FreeCrate { number } => u64::from(number),
            ActionPayload::Feed { animal, .. } => u64::from(animal.0),
            ActionPayload::Merge { candy_level } => u64::from(candy_level),
            ActionPayload::Swap { out, .. } => u64::from(out.0),
            ActionPayload::Buy { candy_level, .. } => u64::from(candy_level),
            ActionPayload::CollectReward { egg, .. } => u64::from(egg.0),
            ActionPayload::Spin { wheel, .. } => wheel as u64,
            ActionPayload::Donate { animal } => u64::from(animal.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: u64,
    pub payload: ActionPayload,
    pub enqueued_at: Tick,
    /// Seconds of cooldown after the action is performed
    pub think_time: f64,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        self.payload.kind()
    }

    pub fn key(&self) -> u64 {
        self.payload.key()
    }
}

/// Pending actions in enqueue order.
///
/// Holds at most one action per `(kind, key)`.
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    actions: Vec<Action>,
    last_id: u64,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, kind: ActionKind, key: u64) -> bool {
        self.actions
            .iter()
            .any(|a| a.kind() == kind && a.key() == key)
    }

    /// Queue an action unless one with the same kind and key is pending.
    ///
    /// `think_time` is only evaluated when the action is actually added, so
    /// a duplicate consumes no randomness.
    pub fn enqueue(
        &mut self,
        payload: ActionPayload,
        enqueued_at: Tick,
        think_time: impl FnOnce() -> f64,
    ) -> bool {
        if self.contains(payload.kind(), payload.key()) {
            return false;
        }

        self.last_id += 1;
        self.actions.push(Action {
            id: self.last_id,
            payload,
            enqueued_at,
            think_time: think_time(),
        });
        true
    }

    pub fn remove(&mut self, id: u64) -> Option<Action> {
        let pos = self.actions.iter().position(|a| a.id == id)?;
        Some(self.actions.remove(pos))
    }

    /// Drop every pending action of the given kinds
    pub fn purge(&mut self, kinds: &[ActionKind]) -> usize {
        let before = self.actions.len();
        self.actions.retain(|a| !kinds.contains(&a.kind()));
        before - self.actions.len()
    }

    pub fn of_kind(&self, kind: ActionKind) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(move |a| a.kind() == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn kinds(&self) -> Vec<ActionKind> {
        self.actions.iter().map(Action::kind).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
