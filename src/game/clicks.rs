//! Action executors
//!
//! Every executor re-validates its preconditions against the current state,
//! since the world may have moved between enqueue and click. A failed
//! precondition returns `Ok(false)` and changes nothing; only reward draws
//! can fail the run.

use crate::core::error::{Result, SimError};
use crate::core::types::{AnimalTypeId, AnimalUid, EggId, RewardId};
use crate::game::actions::{Action, ActionPayload};
use crate::game::state::EggTrack;
use crate::game::Game;
use crate::player::animal::AnimalStatus;
use crate::player::currency::Currency;
use crate::player::tracker::{FeedRecord, RewardRecord, SpinRecord, SwapRecord};

impl<'a> Game<'a> {
    /// Execute a dequeued action
    pub fn click(&mut self, action: &Action) -> Result<bool> {
        let done = match action.payload {
            ActionPayload::FreeCrate { .. } => self.click_free_crate()?,
            ActionPayload::Feed {
                animal,
                candy_level,
                ..
            } => self.click_feed_animal(animal, candy_level),
            ActionPayload::Merge { candy_level } => self.click_merge_candy(candy_level),
            ActionPayload::Swap { out, into } => self.click_swap_animals(out, into),
            ActionPayload::Buy {
                candy_level,
                cost,
                xp,
            } => self.click_buy_candy(candy_level, cost, xp)?,
            ActionPayload::CollectReward { egg, reward } => self.click_collect_reward(egg, reward)?,
            ActionPayload::Spin { wheel, cost, reward } => self.click_spin_wheel(wheel, cost, reward)?,
            ActionPayload::Donate { animal } => self.donate_animal(animal),
        };

        tracing::debug!(
            kind = ?action.kind(),
            id = action.id,
            done,
            frame = self.state.clock.frame,
            "Clicked"
        );
        Ok(done)
    }

    // === CANDIES ===

    pub fn click_buy_candy(&mut self, candy_level: u32, cost: u64, xp: u64) -> Result<bool> {
        if !self.slot_available() || !self.player.wallet.cash.can_afford(cost) {
            return Ok(false);
        }

        self.player.spend(Currency::Cash, cost);
        let capacity = self.slot_capacity();
        self.state.add_candy(candy_level, capacity);
        self.player.tracker.candies_bought.push(candy_level);
        self.add_xp(xp)?;
        Ok(true)
    }

    /// Two candies of one level become one of the next level
    pub fn click_merge_candy(&mut self, candy_level: u32) -> bool {
        if self.state.candy_count(candy_level) < 2 {
            return false;
        }
        self.state.remove_candy(candy_level);
        self.state.remove_candy(candy_level);
        self.state.candy_slots.push(candy_level + 1);
        self.player.tracker.candies_merged.push(candy_level + 1);
        true
    }

    /// Feed a candy to a socketed animal: the animal jumps to one level
    /// above the candy
    pub fn click_feed_animal(&mut self, uid: AnimalUid, candy_level: u32) -> bool {
        if !self.state.is_socketed(uid) || self.state.candy_count(candy_level) == 0 {
            return false;
        }
        let Some(animal) = self.player.inventory.get_mut(uid) else {
            return false;
        };

        animal.level = candy_level + 1;
        self.state.remove_candy(candy_level);

        if let EggTrack::Active { progress, .. } = &mut self.state.egg {
            let value = match self.economy.candy(candy_level) {
                Some(row) => row.candy_cost,
                None => {
                    tracing::warn!(candy_level, "Fed candy has no cost row");
                    0
                }
            };
            *progress = progress.saturating_add(value);
        }

        self.player.tracker.feeds.push(FeedRecord {
            animal: uid,
            candy_level,
        });
        true
    }

    // === ANIMALS ===

    pub fn click_swap_animals(&mut self, out: AnimalUid, into: AnimalUid) -> bool {
        if !self.state.is_socketed(out) || !self.player.inventory.is_benched(into) {
            return false;
        }
        self.unsocket_animal(out);
        if !self.socket_animal(into) {
            // Capacity shrank under us; put the original back
            self.socket_animal(out);
            return false;
        }
        self.player.tracker.swaps.push(SwapRecord { out, into });
        true
    }

    /// Give an animal away, then backfill its socket from the bench
    pub fn donate_animal(&mut self, uid: AnimalUid) -> bool {
        if !self.player.inventory.get(uid).is_some_and(|a| a.is_owned()) {
            return false;
        }
        self.unsocket_animal(uid);
        if let Some(animal) = self.player.inventory.get_mut(uid) {
            animal.status = AnimalStatus::Donated;
        }
        self.player.tracker.donations += 1;
        self.fill_open_sockets();
        true
    }

    /// Grant an animal: fresh uid at level 1, its treats, a socket if one
    /// is free. Owning more than the inventory cap donates the
    /// `donation_candidate` from the bench.
    pub fn earn_animal(&mut self, type_id: AnimalTypeId) -> Result<AnimalUid> {
        let economy = self.economy;
        let row = economy
            .animal(type_id)
            .ok_or(SimError::UnknownAnimal(type_id))?;

        let uid = self.player.inventory.add(row);
        self.player.earn(Currency::Treats, row.treats_earned);
        self.socket_animal(uid);

        self.player.tracker.animals_earned += 1;
        self.player.tracker.animal_ids.push(type_id);
        tracing::debug!(%type_id, %uid, "Earned animal");

        if self.player.inventory.owned_count() > self.settings.animal_inventory_cap {
            if let Some(uid) = self.player.inventory.donation_candidate().map(|a| a.uid) {
                self.donate_animal(uid);
            }
        }
        Ok(uid)
    }

    // === PROGRESSION ===

    /// Add experience. A level-up pays the reward of the level being left
    /// once, however many levels the xp crosses.
    pub fn add_xp(&mut self, amount: u64) -> Result<()> {
        self.player.xp = self.player.xp.saturating_add(amount);
        let old = self.player.level;
        let new = self.economy.level_for_xp(self.player.xp);
        if new <= old {
            return Ok(());
        }

        self.player.level = new;
        self.player.tracker.level_ups += new - old;

        let economy = self.economy;
        match economy.player_level(old) {
            Some(row) => {
                self.player.earn(Currency::Cash, row.lur_soft);
                if let Some(reward) = row.lur_reward_id {
                    let type_id = self.draw_reward(reward, false)?;
                    self.earn_animal(type_id)?;
                    self.player
                        .tracker
                        .rewards
                        .push(RewardRecord { egg: None, reward });
                }
            }
            None => tracing::warn!(level = old, "Level-up row missing"),
        }

        self.fill_open_sockets();
        tracing::debug!(from = old, to = new, xp = self.player.xp, "Level up");
        Ok(())
    }

    // === REWARDS ===

    pub fn click_spin_wheel(&mut self, wheel: usize, cost: u64, reward: RewardId) -> Result<bool> {
        if !self.player.spend(Currency::Treats, cost) {
            return Ok(false);
        }
        let type_id = self.draw_reward(reward, false)?;
        self.earn_animal(type_id)?;
        self.player.tracker.spins.push(SpinRecord {
            wheel,
            animal: type_id,
        });
        Ok(true)
    }

    pub fn click_collect_reward(&mut self, egg: EggId, reward: RewardId) -> Result<bool> {
        let type_id = self.draw_reward(reward, false)?;
        self.earn_animal(type_id)?;
        self.player.tracker.rewards.push(RewardRecord {
            egg: Some(egg),
            reward,
        });
        Ok(true)
    }

    /// Open the free crate for the current level and restart its timer
    pub fn click_free_crate(&mut self) -> Result<bool> {
        let economy = self.economy;
        if let Some(row) = economy.rtp(self.player.level) {
            let mut cash = row.rtp_target_revenue;
            if self.player.videos_watched < self.settings.video_limit
                && self.settings.behavior.video.decide(&mut self.rng)
            {
                cash = cash.saturating_mul(2);
                self.player.videos_watched += 1;
                self.player.tracker.videos_watched += 1;
            }
            self.player.earn(Currency::Cash, cash);
            self.player.earn(Currency::Gems, row.rtp_target_stars);

            if let Some(reward) = row.reward_id {
                for _ in 0..row.rtp_target_animals {
                    let type_id = self.draw_reward(reward, true)?;
                    self.earn_animal(type_id)?;
                }
            }
        }

        self.state.clock.time_crate_reset = 0;
        self.state.free_crate_number += 1;
        self.state.free_crate_timer = self.roll_crate_timer();
        self.player.tracker.free_crates += 1;
        Ok(true)
    }
}
