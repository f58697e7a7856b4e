//! Board state owned by the game side of a run

use serde::{Deserialize, Serialize};

use crate::core::types::{AnimalUid, EggId, Seconds, Tick};
use crate::game::actions::ActionQueue;

/// Progress through the sequential egg list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EggTrack {
    /// Eggs not unlocked yet
    #[default]
    Locked,
    Active { egg: EggId, progress: u64 },
    /// Every egg in the table has been completed
    Exhausted,
}

/// Session bookkeeping, all counters in whole in-game seconds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionClock {
    pub frame: Tick,
    pub day: u32,
    pub session: u32,
    /// Wall-clock time including offline gaps
    pub time_real: Seconds,
    /// Time spent online across all sessions
    pub time_inapp: Seconds,
    /// Time online in the current session
    pub time_session: Seconds,
    pub time_video_reset: Seconds,
    pub time_crate_reset: Seconds,
    /// Sampled length of the current online session
    pub session_online: Seconds,
}

impl SessionClock {
    pub fn new() -> Self {
        Self {
            day: 1,
            session: 1,
            ..Self::default()
        }
    }

    pub fn is_online(&self) -> bool {
        self.time_session < self.session_online
    }

    /// One online second passes
    pub fn tick_second(&mut self) {
        self.time_session += 1;
        self.time_inapp += 1;
        self.time_real += 1;
        self.time_video_reset += 1;
        self.time_crate_reset += 1;
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameState {
    /// Socketed animals in socketing order
    pub sockets: Vec<AnimalUid>,
    /// Candy levels on the board
    pub candy_slots: Vec<u32>,
    pub egg: EggTrack,
    pub queue: ActionQueue,
    pub free_crate_number: u32,
    /// Seconds after the last crate before the next one spawns
    pub free_crate_timer: Seconds,
    pub clock: SessionClock,
    /// Global cooldown in seconds
    pub gcd: f64,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            clock: SessionClock::new(),
            ..Self::default()
        }
    }

    pub fn is_socketed(&self, uid: AnimalUid) -> bool {
        self.sockets.contains(&uid)
    }

    pub fn candy_count(&self, candy_level: u32) -> usize {
        self.candy_slots.iter().filter(|&&c| c == candy_level).count()
    }

    /// Distinct candy levels on the board, ascending
    pub fn candy_levels(&self) -> Vec<u32> {
        let mut levels = self.candy_slots.clone();
        levels.sort_unstable();
        levels.dedup();
        levels
    }

    pub fn add_candy(&mut self, candy_level: u32, capacity: usize) -> bool {
        if self.candy_slots.len() >= capacity {
            return false;
        }
        self.candy_slots.push(candy_level);
        true
    }

    /// Remove one candy of the level if present
    pub fn remove_candy(&mut self, candy_level: u32) -> bool {
        match self.candy_slots.iter().position(|&c| c == candy_level) {
            Some(pos) => {
                self.candy_slots.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn egg_progress(&self) -> Option<(EggId, u64)> {
        match self.egg {
            EggTrack::Active { egg, progress } => Some((egg, progress)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candy_board_capacity() {
        let mut state = GameState::new();
        assert!(state.add_candy(1, 2));
        assert!(state.add_candy(1, 2));
        assert!(!state.add_candy(2, 2));
        assert_eq!(state.candy_count(1), 2);
    }

    #[test]
    fn test_remove_candy_takes_one() {
        let mut state = GameState::new();
        state.candy_slots = vec![3, 1, 3];
        assert!(state.remove_candy(3));
        assert_eq!(state.candy_slots, vec![1, 3]);
        assert!(!state.remove_candy(5));
        assert_eq!(state.candy_levels(), vec![1, 3]);
    }

    #[test]
    fn test_clock_starts_on_day_one() {
        let mut clock = SessionClock::new();
        clock.session_online = 2;
        assert_eq!(clock.day, 1);
        assert!(clock.is_online());

        clock.tick_second();
        clock.tick_second();
        assert!(!clock.is_online());
        assert_eq!(clock.time_real, 2);
    }
}
