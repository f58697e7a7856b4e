//! Session boundaries
//!
//! A session ends once its online time reaches the sampled length. The
//! player then goes offline for a sampled gap, during which socketed
//! animals keep earning up to the regen cap.

use crate::core::types::{Seconds, SECONDS_PER_DAY};
use crate::game::actions::ActionKind;
use crate::game::Game;
use crate::player::currency::Currency;

/// What happened at a session boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTransition {
    /// The session that just ended
    pub ended: u32,
    pub offline: Seconds,
    /// Cash earned while away
    pub regen: u64,
    pub purged: usize,
}

impl<'a> Game<'a> {
    /// Advance the session clock for frame `frame`, handling the end of the
    /// session if it has come.
    ///
    /// The next session's length is not sampled here; call
    /// [`Game::start_next_session`] once the boundary snapshot is taken.
    pub fn check_offline(&mut self, frame: u64) -> Option<SessionTransition> {
        self.state.clock.frame = frame;
        if frame % u64::from(self.settings.ticks_per_second) == 0 {
            self.state.clock.tick_second();
        }
        if self.state.clock.is_online() {
            return None;
        }

        let ended = self.state.clock.session;
        let session_online = self.state.clock.session_online;
        let purged = self.state.queue.purge(&ActionKind::SESSION_SCOPED);
        let offline = self
            .settings
            .session
            .sample_offline(session_online, &mut self.rng);
        let regen = self.regen_offline(offline);

        self.state.gcd = 0.0;
        let clock = &mut self.state.clock;
        clock.time_inapp += 1;
        clock.time_session = 1;
        clock.time_real += offline;
        clock.time_video_reset += offline;
        clock.time_crate_reset += offline;
        clock.day = clock.time_real.div_ceil(SECONDS_PER_DAY).max(1) as u32;
        clock.session += 1;

        tracing::info!(
            session = ended,
            online = session_online,
            offline,
            regen,
            purged,
            day = clock.day,
            "Session ended"
        );

        Some(SessionTransition {
            ended,
            offline,
            regen,
            purged,
        })
    }

    /// Sample how long the now-current session stays online
    pub fn start_next_session(&mut self) {
        let session = self.state.clock.session;
        self.state.clock.session_online = self
            .settings
            .session
            .sample_session_length(session, &mut self.rng);
    }

    /// Passive income for an offline gap, capped at the regen limit
    pub fn regen_offline(&mut self, offline: Seconds) -> u64 {
        let secs = offline.min(self.settings.offline_regen_cap_secs);
        let cash = self.player.inventory.income_per_sec().saturating_mul(secs);
        self.player.earn(Currency::Cash, cash);
        cash
    }

    /// Reopen the video allowance once its window has passed
    pub fn reset_video_count_if_due(&mut self) {
        if self.state.clock.time_video_reset > self.settings.video_limit_reset_secs {
            self.player.videos_watched = 0;
            self.state.clock.time_video_reset = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::config::SimSettings;
    use crate::core::types::{AnimalUid, EggId, PlayerId, RewardId};
    use crate::economy::tests::sample_economy;
    use crate::game::actions::{ActionKind, ActionPayload};
    use crate::game::tests::sample_settings;
    use crate::game::Game;
    use crate::player::currency::Currency;

    #[test]
    fn test_offline_regen_is_capped() {
        let economy = sample_economy();
        let settings = SimSettings {
            offline_regen_cap_secs: 300,
            ..sample_settings()
        };
        let mut game = Game::new(&economy, &settings, PlayerId(1), 9).unwrap();
        let rate = game.player.inventory.income_per_sec();
        let cash = game.player.balance(Currency::Cash);

        let earned = game.regen_offline(500);
        assert_eq!(earned, 300 * rate);
        assert_eq!(game.player.balance(Currency::Cash), cash + 300 * rate);

        assert_eq!(game.regen_offline(20), 20 * rate);
    }

    #[test]
    fn test_transition_purges_session_scoped_actions() {
        let economy = sample_economy();
        let settings = sample_settings();
        let mut game = Game::new(&economy, &settings, PlayerId(1), 9).unwrap();

        game.enqueue(ActionPayload::FreeCrate { number: 0 });
        game.enqueue(ActionPayload::CollectReward {
            egg: EggId(1),
            reward: RewardId(1),
        });
        game.enqueue(ActionPayload::Merge { candy_level: 1 });
        game.enqueue(ActionPayload::Donate {
            animal: AnimalUid(1),
        });
        game.enqueue(ActionPayload::Buy {
            candy_level: 1,
            cost: 20,
            xp: 1,
        });
        game.state.gcd = 1.5;
        game.state.clock.time_session = game.state.clock.session_online;

        let transition = game.check_offline(1).unwrap();
        assert_eq!(transition.ended, 1);
        assert_eq!(transition.purged, 3);
        assert_eq!(
            game.state.queue.kinds(),
            vec![ActionKind::FreeCrate, ActionKind::CollectReward]
        );
        assert_eq!(game.state.gcd, 0.0);
        assert_eq!(game.state.clock.session, 2);
        assert_eq!(game.state.clock.time_session, 1);
        assert!(game.state.clock.day >= 1);

        game.start_next_session();
        assert!((208..901).contains(&game.state.clock.session_online));
    }

    #[test]
    fn test_online_frames_only_tick_whole_seconds() {
        let economy = sample_economy();
        let settings = sample_settings();
        let mut game = Game::new(&economy, &settings, PlayerId(1), 9).unwrap();
        let fps = u64::from(settings.ticks_per_second);

        for frame in 1..=fps * 3 {
            assert!(game.check_offline(frame).is_none());
        }
        assert_eq!(game.state.clock.time_session, 3);
        assert_eq!(game.state.clock.time_real, 3);
    }

    #[test]
    fn test_day_follows_real_time() {
        let economy = sample_economy();
        let settings = sample_settings();
        let mut game = Game::new(&economy, &settings, PlayerId(1), 9).unwrap();
        game.state.clock.time_session = game.state.clock.session_online;

        game.check_offline(1).unwrap();
        let clock = &game.state.clock;
        assert_eq!(
            u64::from(clock.day),
            clock.time_real.div_ceil(86_400).max(1)
        );
    }

    #[test]
    fn test_video_count_resets_after_window() {
        let economy = sample_economy();
        let settings = sample_settings();
        let mut game = Game::new(&economy, &settings, PlayerId(1), 9).unwrap();
        game.player.videos_watched = 4;

        game.state.clock.time_video_reset = settings.video_limit_reset_secs;
        game.reset_video_count_if_due();
        assert_eq!(game.player.videos_watched, 4);

        game.state.clock.time_video_reset += 1;
        game.reset_video_count_if_due();
        assert_eq!(game.player.videos_watched, 0);
        assert_eq!(game.state.clock.time_video_reset, 0);
    }
}
