//! Eligibility checks
//!
//! Each check looks at the current state and queues the actions it finds
//! possible. Re-running a check is harmless: the queue drops duplicates.

use crate::core::types::{AnimalUid, EggId};
use crate::game::actions::{ActionKind, ActionPayload};
use crate::game::state::EggTrack;
use crate::game::Game;
use crate::player::behavior::{FeedCandyChoice, SwapPolicy};
use crate::player::currency::Currency;

impl<'a> Game<'a> {
    /// Run every check in order, then the stuck-session rule
    pub fn run_checks(&mut self) {
        self.check_free_crate();
        self.check_spin_wheel();
        self.check_merge_candy();
        self.check_feed_animal();
        self.check_buy_candy();
        self.check_swap_animals();
        self.check_donate_animal();
        self.check_egg_progress();
        self.check_stuck_session();
    }

    pub fn check_free_crate(&mut self) {
        if self.state.clock.time_crate_reset > self.state.free_crate_timer {
            self.enqueue(ActionPayload::FreeCrate {
                number: self.state.free_crate_number,
            });
        }
    }

    /// Only the highest wheel unlocked by completed sets is considered
    pub fn check_spin_wheel(&mut self) {
        let completed = self.completed_set_count();
        let settings = self.settings;
        let Some((index, wheel)) = settings
            .wheels
            .iter()
            .enumerate()
            .rev()
            .find(|(_, w)| w.unlock_completed_sets <= completed)
        else {
            return;
        };

        if !self.player.wallet.treats.can_afford(wheel.cost) {
            return;
        }

        let owned = self.player.inventory.acquired_types();
        let band = wheel.rarity_min..=wheel.rarity_max;
        let anything_new = self
            .economy
            .unlocked_animals(self.player.level)
            .iter()
            .any(|a| band.contains(&a.rarity) && !owned.contains(&a.animal_id));
        if !anything_new {
            return;
        }

        self.enqueue(ActionPayload::Spin {
            wheel: index,
            cost: wheel.cost,
            reward: wheel.reward_id,
        });
    }

    pub fn check_merge_candy(&mut self) {
        let max = self.settings.candy_level_max;
        for level in self.state.candy_levels() {
            if level < max && self.state.candy_count(level) >= 2 {
                self.enqueue(ActionPayload::Merge { candy_level: level });
            }
        }
    }

    /// Feed the lowest-level socketed animal a candy at or above its level
    pub fn check_feed_animal(&mut self) {
        let Some(target) = self.player.inventory.feed_target() else {
            return;
        };
        let (uid, level, rarity) = (target.uid, target.level, target.rarity);

        let options: Vec<u32> = self
            .state
            .candy_levels()
            .into_iter()
            .filter(|&c| c >= level)
            .collect();

        let choice = match self.settings.behavior.feed_candy {
            FeedCandyChoice::Highest => options.last().copied(),
            FeedCandyChoice::Lowest => options.first().copied(),
            FeedCandyChoice::Random => self
                .rng
                .index(options.len())
                .and_then(|i| options.get(i).copied()),
        };

        if let Some(candy_level) = choice {
            self.enqueue(ActionPayload::Feed {
                animal: uid,
                animal_level: level,
                animal_rarity: rarity,
                candy_level,
            });
        }
    }

    /// Refresh the pending buy.
    ///
    /// Within the level's candy range, a level with exactly one candy on
    /// the board is bought first so it can pair up; when it is unaffordable
    /// nothing is bought. Without a singleton, the highest affordable level
    /// wins.
    pub fn check_buy_candy(&mut self) {
        if !self.slot_available() {
            return;
        }
        self.state.queue.purge(&[ActionKind::Buy]);

        let Some(row) = self.economy.player_level(self.player.level) else {
            tracing::warn!(level = self.player.level, "No candy range for level");
            return;
        };
        let (min, max) = (row.candy_level_min, row.candy_level_max);

        let cash = self.player.balance(Currency::Cash);
        let affordable = |level: u32| {
            self.economy
                .candy(level)
                .filter(|c| c.candy_cost <= cash)
                .map(|c| (level, c.candy_cost, c.xp_earned))
        };

        let Some(cheapest) = self.economy.candy(min) else {
            return;
        };
        if cash < cheapest.candy_cost {
            return;
        }

        let pick = match (min..=max).find(|&l| self.state.candy_count(l) == 1) {
            Some(single) => affordable(single),
            None => (min..=max).rev().find_map(affordable),
        };

        if let Some((candy_level, cost, xp)) = pick {
            self.enqueue(ActionPayload::Buy {
                candy_level,
                cost,
                xp,
            });
        }
    }

    pub fn check_swap_animals(&mut self) {
        let pair = match self.settings.behavior.swap {
            SwapPolicy::Never => None,
            SwapPolicy::Upgrade => self
                .player
                .inventory
                .weakest_active()
                .zip(self.player.inventory.strongest_benched())
                .filter(|(out, into)| into.level > out.level),
            SwapPolicy::Legacy => self
                .player
                .inventory
                .legacy_swap_pair()
                .filter(|(out, into)| into.level < out.level),
        };

        if let Some((out, into)) = pair.map(|(o, i)| (o.uid, i.uid)) {
            self.enqueue(ActionPayload::Swap { out, into });
        }
    }

    /// Over the inventory cap, give away a benched animal
    pub fn check_donate_animal(&mut self) {
        if self.player.inventory.owned_count() <= self.settings.animal_inventory_cap {
            return;
        }
        let candidate: Option<AnimalUid> = self.player.inventory.donation_candidate().map(|a| a.uid);
        if let Some(animal) = candidate {
            self.enqueue(ActionPayload::Donate { animal });
        }
    }

    /// Start the egg track once eggs unlock; queue the reward and move on
    /// once the current egg's goal is met
    pub fn check_egg_progress(&mut self) {
        let economy = self.economy;
        match self.state.egg {
            EggTrack::Locked => {
                if economy.eggs_unlocked(self.player.level) {
                    if let Some(egg) = economy.first_egg_for_level(self.player.level) {
                        tracing::debug!(%egg, "Eggs unlocked");
                        self.state.egg = EggTrack::Active { egg, progress: 0 };
                    }
                }
            }
            EggTrack::Active { egg, progress } => {
                let Some(current) = economy.egg(egg) else {
                    tracing::warn!(%egg, "Active egg missing from table");
                    self.state.egg = EggTrack::Exhausted;
                    return;
                };
                if progress < current.goal {
                    return;
                }

                let (goal, reward) = (current.goal, current.reward_id);
                self.enqueue(ActionPayload::CollectReward { egg, reward });

                let next = EggId(egg.0 + 1);
                self.state.egg = if economy.egg(next).is_some() {
                    EggTrack::Active {
                        egg: next,
                        progress: progress - goal,
                    }
                } else {
                    EggTrack::Exhausted
                };
            }
            EggTrack::Exhausted => {}
        }
    }

    /// A player with nothing to do after the grace period closes the app
    pub fn check_stuck_session(&mut self) {
        let clock = &mut self.state.clock;
        if clock.time_inapp > self.settings.stuck_session_grace_secs
            && self.state.queue.is_empty()
            && clock.is_online()
        {
            tracing::debug!(time_session = clock.time_session, "Nothing to do, ending session");
            clock.session_online = clock.time_session;
        }
    }
}
