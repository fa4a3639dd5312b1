//! "Ignite The TNT": light a TNT block with flint and steel to win.
//!
//! One TNT block is placed on each mini platform. Every player gets a
//! flint and steel; the first ignition wins, later ignitions still count
//! toward the leaderboard.

use std::time::Duration;

use minerware_types::{Block, Difficulty, GameMode, Item, Loadout};

use crate::RoundRule;

#[derive(Debug, Clone, Copy, Default)]
pub struct IgniteTnt;

impl IgniteTnt {
    pub const NAME: &'static str = "Ignite The TNT";
    pub const DURATION: Duration = Duration::from_secs(15);
}

impl RoundRule for IgniteTnt {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Normal
    }

    fn duration(&self) -> Duration {
        Self::DURATION
    }

    fn setup_block(&self) -> Block {
        Block::Tnt
    }

    fn loadout(&self) -> Loadout {
        Loadout::single(GameMode::Survival, Item::FlintAndSteel)
    }

    fn sanctioned_tool(&self) -> Item {
        Item::FlintAndSteel
    }

    fn sanctioned_target(&self) -> Block {
        Block::Tnt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_REWARD_POINTS;

    #[test]
    fn test_metadata() {
        let rule = IgniteTnt;
        assert_eq!(rule.name(), "Ignite The TNT");
        assert_eq!(rule.difficulty(), Difficulty::Normal);
        assert_eq!(rule.duration(), Duration::from_secs(15));
        assert_eq!(rule.reward_points(), DEFAULT_REWARD_POINTS);
    }

    #[test]
    fn test_loadout_is_flint_and_steel_in_survival() {
        let loadout = IgniteTnt.loadout();
        assert_eq!(loadout.game_mode, GameMode::Survival);
        assert_eq!(loadout.items, vec![(0, Item::FlintAndSteel)]);
        assert_eq!(loadout.held_slot, 0);
    }

    #[test]
    fn test_subscribes_to_every_event_kind() {
        assert_eq!(IgniteTnt.event_kinds().len(), 5);
    }
}
