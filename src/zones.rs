//! Game zones (Deck, Hand, Play, Graveyard, etc.)

use crate::core::{CardId, PlayerId};
use serde::{Deserialize, Serialize};

/// Location category of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Play,
    Graveyard,
    /// Removed from the game (expired enchantments, replaced heroes)
    Removed,
    /// Created but not yet placed anywhere
    SetAside,
}

/// An ordered zone containing cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardZone {
    /// Zone type
    pub zone_type: Zone,

    /// Owner of this zone (each player has their own zones)
    pub owner: PlayerId,

    /// Cards in this zone (order matters for Deck and Graveyard)
    pub cards: Vec<CardId>,
}

impl CardZone {
    pub fn new(zone_type: Zone, owner: PlayerId) -> Self {
        CardZone {
            zone_type,
            owner,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    pub fn remove(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|&id| id == card_id) {
            // remove() rather than swap_remove(): iteration order must stay
            // stable for deterministic resolution order
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }

    /// Draw from top (for Deck)
    pub fn draw_top(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    /// Look at top card without removing it
    pub fn peek_top(&self) -> Option<CardId> {
        self.cards.last().copied()
    }

    /// Shuffle the zone (for Deck)
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }
}

/// Collection of all zones for a player
///
/// Heroes and hero powers are in play but live on the player, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerZones {
    pub deck: CardZone,
    pub hand: CardZone,
    /// Minions in play
    pub field: CardZone,
    pub graveyard: CardZone,
    /// Enchantments in play attached to this player's characters
    pub enchantments: CardZone,
}

impl PlayerZones {
    pub fn new(player_id: PlayerId) -> Self {
        PlayerZones {
            deck: CardZone::new(Zone::Deck, player_id),
            hand: CardZone::new(Zone::Hand, player_id),
            field: CardZone::new(Zone::Play, player_id),
            graveyard: CardZone::new(Zone::Graveyard, player_id),
            enchantments: CardZone::new(Zone::Play, player_id),
        }
    }

    /// Remove a card from whichever zone holds it
    pub fn remove_anywhere(&mut self, card_id: CardId) -> Option<Zone> {
        [
            &mut self.deck,
            &mut self.hand,
            &mut self.field,
            &mut self.graveyard,
            &mut self.enchantments,
        ]
        .into_iter()
        .find_map(|zone| zone.remove(card_id).then_some(zone.zone_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_zone() {
        let player_id = PlayerId::new(1);
        let mut zone = CardZone::new(Zone::Hand, player_id);

        assert_eq!(zone.len(), 0);
        assert!(zone.is_empty());

        let card1 = CardId::new(10);
        let card2 = CardId::new(11);

        zone.add(card1);
        zone.add(card2);

        assert_eq!(zone.len(), 2);
        assert!(zone.contains(card1));
        assert!(zone.contains(card2));

        assert!(zone.remove(card1));
        assert!(!zone.remove(card1));
        assert_eq!(zone.len(), 1);
        assert!(!zone.contains(card1));
    }

    #[test]
    fn test_deck_operations() {
        let player_id = PlayerId::new(1);
        let mut deck = CardZone::new(Zone::Deck, player_id);

        let card1 = CardId::new(10);
        let card2 = CardId::new(11);
        let card3 = CardId::new(12);

        deck.add(card1); // Bottom
        deck.add(card2);
        deck.add(card3); // Top

        assert_eq!(deck.peek_top(), Some(card3));
        assert_eq!(deck.draw_top(), Some(card3));
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.draw_top(), Some(card2));
        assert_eq!(deck.draw_top(), Some(card1));
        assert!(deck.is_empty());
        assert_eq!(deck.draw_top(), None);
    }

    #[test]
    fn test_remove_anywhere() {
        let player_id = PlayerId::new(1);
        let mut zones = PlayerZones::new(player_id);
        let card = CardId::new(5);

        zones.hand.add(card);
        assert_eq!(zones.remove_anywhere(card), Some(Zone::Hand));
        assert_eq!(zones.remove_anywhere(card), None);

        zones.field.add(card);
        assert_eq!(zones.remove_anywhere(card), Some(Zone::Play));
    }
}
