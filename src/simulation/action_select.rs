//! Action selection - one action per tick, strict priority between kinds

use std::cmp::Reverse;

use crate::core::error::Result;
use crate::core::rng::SimRng;
use crate::game::actions::{Action, ActionKind, ActionPayload, ActionQueue};
use crate::game::{round2, Game};
use crate::player::behavior::FeedOrder;

/// Pick the next action to perform, without removing it.
///
/// Kinds are tried in `ActionKind::PRIORITY` order. Within a kind the
/// oldest action wins, except for feeds, which are ordered by the
/// player's `FeedOrder` with ties left in enqueue order.
pub fn select_action(queue: &ActionQueue, feed_order: FeedOrder, rng: &mut SimRng) -> Option<u64> {
    for kind in ActionKind::PRIORITY {
        let mut candidates: Vec<&Action> = queue.of_kind(kind).collect();
        if candidates.is_empty() {
            continue;
        }
        if kind == ActionKind::Feed {
            order_feeds(&mut candidates, feed_order, rng);
        }
        return candidates.first().map(|a| a.id);
    }
    None
}

fn feed_stats(action: &Action) -> (u32, u8) {
    match action.payload {
        ActionPayload::Feed {
            animal_level,
            animal_rarity,
            ..
        } => (animal_level, animal_rarity),
        _ => (0, 0),
    }
}

fn order_feeds(candidates: &mut [&Action], order: FeedOrder, rng: &mut SimRng) {
    match order {
        FeedOrder::Shuffle => rng.shuffle(candidates),
        FeedOrder::LevelRarityDesc => candidates.sort_by_key(|a| Reverse(feed_stats(a))),
        FeedOrder::RarityLevelDesc => candidates.sort_by_key(|a| {
            let (level, rarity) = feed_stats(a);
            Reverse((rarity, level))
        }),
        FeedOrder::LevelRarityAsc => candidates.sort_by_key(|a| feed_stats(a)),
        FeedOrder::RarityLevelAsc => candidates.sort_by_key(|a| {
            let (level, rarity) = feed_stats(a);
            (rarity, level)
        }),
    }
}

/// Perform at most one action this tick.
///
/// While the global cooldown runs it only drains by one frame's worth.
/// Otherwise the selected action is removed from the queue whatever the
/// outcome of its click, and its think time becomes the new cooldown.
pub fn choose_action(game: &mut Game) -> Result<Option<ActionKind>> {
    if game.state.gcd > 0.0 {
        let frame_secs = round2(1.0 / f64::from(game.settings.ticks_per_second));
        game.state.gcd = round2(game.state.gcd - frame_secs);
        return Ok(None);
    }

    let order = game.settings.behavior.feed_order;
    let Some(id) = select_action(&game.state.queue, order, &mut game.rng) else {
        return Ok(None);
    };
    let Some(action) = game.state.queue.remove(id) else {
        return Ok(None);
    };

    game.click(&action)?;
    game.state.gcd = action.think_time;
    game.player.tracker.actions += 1;
    Ok(Some(action.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AnimalUid, EggId, PlayerId, RewardId};
    use crate::economy::tests::sample_economy;
    use crate::game::tests::sample_settings;

    fn feed(uid: u32, level: u32, rarity: u8) -> ActionPayload {
        ActionPayload::Feed {
            animal: AnimalUid(uid),
            animal_level: level,
            animal_rarity: rarity,
            candy_level: level,
        }
    }

    fn selected_payload(queue: &ActionQueue, order: FeedOrder, rng: &mut SimRng) -> Option<ActionPayload> {
        let id = select_action(queue, order, rng)?;
        queue.iter().find(|a| a.id == id).map(|a| a.payload)
    }

    #[test]
    fn test_priority_across_kinds() {
        let mut rng = SimRng::seed_from_u64(1);
        let mut queue = ActionQueue::new();
        queue.enqueue(ActionPayload::Donate { animal: AnimalUid(2) }, 0, || 0.0);
        queue.enqueue(
            ActionPayload::CollectReward {
                egg: EggId(1),
                reward: RewardId(1),
            },
            0,
            || 0.0,
        );
        queue.enqueue(ActionPayload::Merge { candy_level: 2 }, 0, || 0.0);

        assert_eq!(
            selected_payload(&queue, FeedOrder::default(), &mut rng),
            Some(ActionPayload::Merge { candy_level: 2 })
        );

        queue.enqueue(ActionPayload::FreeCrate { number: 0 }, 0, || 0.0);
        assert_eq!(
            selected_payload(&queue, FeedOrder::default(), &mut rng),
            Some(ActionPayload::FreeCrate { number: 0 })
        );
    }

    #[test]
    fn test_feed_orders() {
        let mut rng = SimRng::seed_from_u64(1);
        let mut queue = ActionQueue::new();
        queue.enqueue(feed(1, 2, 1), 0, || 0.0);
        queue.enqueue(feed(2, 1, 5), 0, || 0.0);
        queue.enqueue(feed(3, 3, 2), 0, || 0.0);

        let pick = |order, rng: &mut SimRng| match selected_payload(&queue, order, rng) {
            Some(ActionPayload::Feed { animal, .. }) => animal.0,
            other => panic!("expected a feed, got {:?}", other),
        };

        assert_eq!(pick(FeedOrder::LevelRarityDesc, &mut rng), 3);
        assert_eq!(pick(FeedOrder::RarityLevelDesc, &mut rng), 2);
        assert_eq!(pick(FeedOrder::LevelRarityAsc, &mut rng), 2);
        assert_eq!(pick(FeedOrder::RarityLevelAsc, &mut rng), 1);
    }

    #[test]
    fn test_feed_ties_keep_enqueue_order() {
        let mut rng = SimRng::seed_from_u64(1);
        let mut queue = ActionQueue::new();
        queue.enqueue(feed(7, 2, 2), 0, || 0.0);
        queue.enqueue(feed(4, 2, 2), 0, || 0.0);

        for order in [FeedOrder::LevelRarityDesc, FeedOrder::RarityLevelAsc] {
            assert!(matches!(
                selected_payload(&queue, order, &mut rng),
                Some(ActionPayload::Feed { animal: AnimalUid(7), .. })
            ));
        }
    }

    #[test]
    fn test_cooldown_blocks_and_drains() {
        let economy = sample_economy();
        let settings = sample_settings();
        let mut game = Game::new(&economy, &settings, PlayerId(1), 2).unwrap();
        game.state.candy_slots = vec![1, 1];
        game.enqueue(ActionPayload::Merge { candy_level: 1 });
        game.state.gcd = 0.5;

        // 4 frames per second drain 0.25s each
        assert_eq!(choose_action(&mut game).unwrap(), None);
        assert_eq!(game.state.gcd, 0.25);
        assert_eq!(choose_action(&mut game).unwrap(), None);
        assert_eq!(game.state.gcd, 0.0);

        let think = game.state.queue.iter().next().unwrap().think_time;
        assert_eq!(choose_action(&mut game).unwrap(), Some(ActionKind::Merge));
        assert_eq!(game.state.gcd, think);
        assert!(game.state.queue.is_empty());
        assert_eq!(game.state.candy_slots, vec![2]);
        assert_eq!(game.player.tracker.actions, 1);
    }

    #[test]
    fn test_failed_click_still_consumes_action() {
        let economy = sample_economy();
        let settings = sample_settings();
        let mut game = Game::new(&economy, &settings, PlayerId(1), 2).unwrap();
        // Nothing to merge: the click fails but the action is gone
        game.enqueue(ActionPayload::Merge { candy_level: 3 });

        assert_eq!(choose_action(&mut game).unwrap(), Some(ActionKind::Merge));
        assert!(game.state.queue.is_empty());
        assert!(game.state.gcd > 0.0);
    }
}
