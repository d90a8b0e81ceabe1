//! Standing effects recomputed on every aura refresh

use crate::core::{Card, CardId, CardType};
use serde::{Deserialize, Serialize};

/// Which characters an aura affects, relative to its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuraScope {
    SelfOnly,
    /// Enrage: the source itself, only while it is damaged
    SelfWhileDamaged,
    FriendlyMinions,
    OtherFriendlyMinions,
    EnemyMinions,
    AllMinions,
    FriendlyHero,
}

/// An attack/health modifier that lasts as long as its source is live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aura {
    pub source: CardId,
    pub scope: AuraScope,
    pub atk: i32,
    pub health: i32,
}

impl Aura {
    pub fn new(source: CardId, scope: AuraScope, atk: i32, health: i32) -> Self {
        Aura {
            source,
            scope,
            atk,
            health,
        }
    }

    /// Enrage-style aura: +`atk` attack while the source is damaged
    pub fn enrage(source: CardId, atk: i32) -> Self {
        Aura::new(source, AuraScope::SelfWhileDamaged, atk, 0)
    }

    /// An aura is active while its source is in play and not condemned
    pub fn is_active(&self, source: &Card) -> bool {
        source.in_play() && !source.ignore_events
    }

    pub fn applies_to(&self, source: &Card, target: &Card) -> bool {
        let friendly = source.controller == target.controller;
        let minion = target.card_type == CardType::Minion;
        match self.scope {
            AuraScope::SelfOnly => target.id == source.id,
            AuraScope::SelfWhileDamaged => target.id == source.id && source.is_damaged(),
            AuraScope::FriendlyMinions => minion && friendly,
            AuraScope::OtherFriendlyMinions => minion && friendly && target.id != source.id,
            AuraScope::EnemyMinions => minion && !friendly,
            AuraScope::AllMinions => minion,
            AuraScope::FriendlyHero => target.card_type == CardType::Hero && friendly,
        }
    }
}
