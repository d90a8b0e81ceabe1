//! Aura refresh pass and enchantments
//!
//! Bonuses on characters are derived state. They are recomputed from scratch
//! after every resolved action, from the active auras plus any enchantments
//! attached to the character.

use crate::core::{Aura, CardDefinition, CardId, EntityRef};
use crate::game::{ActionResult, GameState};
use crate::zones::Zone;
use crate::{GameError, Resolution, Result};

impl GameState {
    /// Register a standing aura; it takes effect at the next refresh
    pub fn add_aura(&mut self, aura: Aura) -> Result<()> {
        self.cards.get(aura.source)?;
        self.auras.push(aura);
        Ok(())
    }

    /// Recompute every in-play character's bonuses
    pub(crate) fn refresh_auras(&mut self) {
        self.stats.aura_refreshes += 1;

        let cards = &self.cards;
        self.auras
            .retain(|aura| cards.get(aura.source).map(|s| s.in_play()).unwrap_or(false));

        let enchantments: Vec<CardId> = self
            .players
            .iter()
            .flat_map(|p| p.zones.enchantments.iter())
            .collect();

        let mut updates = Vec::new();
        for id in self.characters() {
            let Ok(target) = self.cards.get(id) else {
                continue;
            };
            let (mut atk, mut health) = (0, 0);
            for aura in &self.auras {
                let Ok(source) = self.cards.get(aura.source) else {
                    continue;
                };
                if aura.is_active(source) && aura.applies_to(source, target) {
                    atk += aura.atk;
                    health += aura.health;
                }
            }
            for &enchantment in &enchantments {
                if let Ok(buff) = self.cards.get(enchantment) {
                    if buff.attached_to == Some(id) {
                        atk += buff.base_atk;
                        health += buff.base_health;
                    }
                }
            }
            updates.push((id, atk, health));
        }

        for (id, atk, health) in updates {
            let Ok(card) = self.cards.get_mut(id) else {
                continue;
            };
            // Losing max health only lowers current health down to the new maximum
            let lost = card.health_bonus - health;
            if lost > 0 {
                card.damage = (card.damage - lost).max(0);
            }
            card.atk_bonus = atk;
            card.health_bonus = health;
            if card.health() <= 0 && !card.ignore_events {
                card.to_be_destroyed = true;
            }
        }
    }

    /// Attach a stat enchantment to a character
    pub fn buff(
        &mut self,
        source: EntityRef,
        target: CardId,
        atk: i32,
        health: i32,
        one_turn: bool,
    ) -> Resolution<CardId> {
        let results = self.queue_actions(
            source,
            [crate::game::Action::Buff {
                target,
                atk,
                health,
                one_turn,
            }],
        )?;
        match results.first() {
            Some(ActionResult::Enchanted(id)) => Ok(*id),
            _ => Err(GameError::InvalidAction("buff produced no enchantment".to_string()).into()),
        }
    }

    pub(crate) fn resolve_buff(
        &mut self,
        source: EntityRef,
        target: CardId,
        atk: i32,
        health: i32,
        one_turn: bool,
    ) -> Resolution<ActionResult> {
        let card = self.cards.get(target)?;
        if !card.is_character() || !card.in_play() {
            return Err(GameError::InvalidAction(format!(
                "cannot enchant {} outside of play",
                card.name
            ))
            .into());
        }
        let side = card.controller;
        // Enchantments expire with the turn of whoever cast them
        let caster = self.controller_of(source).unwrap_or(side);
        let definition = CardDefinition::enchantment(
            "BUFF",
            &format!("+{atk}/+{health}"),
            atk,
            health,
            one_turn,
        );

        let id = self.card(&definition, caster);
        let enchantment = self.cards.get_mut(id)?;
        enchantment.zone = Zone::Play;
        enchantment.attached_to = Some(target);
        self.player_mut(side)?.zones.enchantments.add(id);
        log_if_verbose!(
            self,
            "{} gains {}",
            self.describe(EntityRef::Card(target)),
            definition.name
        );
        Ok(ActionResult::Enchanted(id))
    }

    /// Take an enchantment out of play
    pub(crate) fn detach_enchantment(&mut self, id: CardId) -> Result<()> {
        for player in &mut self.players {
            player.zones.enchantments.remove(id);
        }
        let enchantment = self.cards.get_mut(id)?;
        enchantment.zone = Zone::Removed;
        enchantment.attached_to = None;
        Ok(())
    }

    /// Enchantments in play attached to `target`
    pub fn enchantments_on(&self, target: CardId) -> Vec<CardId> {
        self.players
            .iter()
            .flat_map(|p| p.zones.enchantments.iter())
            .filter(|&id| {
                self.cards
                    .get(id)
                    .map(|e| e.attached_to == Some(target))
                    .unwrap_or(false)
            })
            .collect()
    }
}
