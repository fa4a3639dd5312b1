//! Host events a round can observe, and the verdict it hands back.
//!
//! The host delivers a [`HostEvent`] for every action that might matter to
//! the running round. The round answers with a [`Verdict`] telling the host
//! whether the underlying effect should still happen.

use serde::{Deserialize, Serialize};

use crate::{Block, Item, Location, PlayerId, WorldId};

/// An entity involved in a damage or explosion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum Entity {
    Player(PlayerId),
    /// A lit TNT block that is about to explode.
    PrimedTnt(u64),
    Other(u64),
}

/// Why an entity is taking damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageCause {
    /// The entity fell out of the world's playable bounds.
    Void,
    Fall,
    Explosion,
    Other,
}

/// Event categories a round can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    BlockBreak,
    BlockPlace,
    Interact,
    Damage,
    ExplosionPrime,
}

/// An event delivered by the host while a round is subscribed.
///
/// `#[serde(tag = "type")]` gives the internally tagged JSON form
/// (`{"type": "Interact", "player": 1, ...}`) hosts written in other
/// languages can produce directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostEvent {
    /// A player is about to break the block at `location`.
    BlockBreak { player: PlayerId, location: Location },

    /// A player is about to place `block` at `location`.
    BlockPlace {
        player: PlayerId,
        location: Location,
        block: Block,
    },

    /// A player used `item` (if any) on the block at `location`.
    Interact {
        player: PlayerId,
        item: Option<Item>,
        location: Location,
        block: Block,
    },

    /// `entity` is about to take damage.
    Damage { entity: Entity, cause: DamageCause },

    /// `entity` is about to explode in `world`.
    ExplosionPrime { world: WorldId, entity: Entity },
}

impl HostEvent {
    /// The subscription category this event belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::BlockBreak { .. } => EventKind::BlockBreak,
            Self::BlockPlace { .. } => EventKind::BlockPlace,
            Self::Interact { .. } => EventKind::Interact,
            Self::Damage { .. } => EventKind::Damage,
            Self::ExplosionPrime { .. } => EventKind::ExplosionPrime,
        }
    }

    /// The player who caused or suffers the event, if it involves one.
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Self::BlockBreak { player, .. }
            | Self::BlockPlace { player, .. }
            | Self::Interact { player, .. } => Some(*player),
            Self::Damage {
                entity: Entity::Player(player),
                ..
            } => Some(*player),
            Self::Damage { .. } | Self::ExplosionPrime { .. } => None,
        }
    }
}

/// The round's answer to a host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verdict {
    /// Let the host apply the effect unchanged.
    #[default]
    Proceed,
    /// Cancel the underlying host effect.
    Cancel,
    /// Let the explosion happen but without destroying any blocks.
    ProceedWithoutBlockDamage,
}

impl Verdict {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_matches_variant() {
        let ev = HostEvent::BlockBreak {
            player: PlayerId(1),
            location: Location::new(0, 0, 0),
        };
        assert_eq!(ev.kind(), EventKind::BlockBreak);

        let ev = HostEvent::ExplosionPrime {
            world: WorldId(1),
            entity: Entity::PrimedTnt(9),
        };
        assert_eq!(ev.kind(), EventKind::ExplosionPrime);
    }

    #[test]
    fn test_event_player() {
        let ev = HostEvent::Damage {
            entity: Entity::Player(PlayerId(4)),
            cause: DamageCause::Void,
        };
        assert_eq!(ev.player(), Some(PlayerId(4)));

        let ev = HostEvent::Damage {
            entity: Entity::Other(4),
            cause: DamageCause::Void,
        };
        assert_eq!(ev.player(), None);
    }

    #[test]
    fn test_host_event_json_is_internally_tagged() {
        let ev = HostEvent::Interact {
            player: PlayerId(3),
            item: Some(Item::FlintAndSteel),
            location: Location::new(1, 2, 3),
            block: Block::Tnt,
        };
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "Interact");
        assert_eq!(json["player"], 3);
        assert_eq!(json["item"], "flint_and_steel");
        assert_eq!(json["block"], "tnt");

        let back: HostEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, ev);
    }

    #[test]
    fn test_verdict_default_is_proceed() {
        assert_eq!(Verdict::default(), Verdict::Proceed);
        assert!(Verdict::Cancel.is_cancelled());
        assert!(!Verdict::ProceedWithoutBlockDamage.is_cancelled());
    }
}
