//! Card catalog: the immutable set of card definitions the deck builder
//! operates over.
//!
//! The catalog is loaded once at startup and never mutated. Deck stores only
//! hold card ids; every piece of analysis resolves ids against the catalog
//! and skips entries it cannot resolve.

use std::collections::BTreeMap;

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

pub mod endpoints;

/// Card colors. Five chromatic colors plus colorless.
///
/// Reiki (resource) cards exist only for the chromatic colors; colorless
/// cards need no resource support.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, JsonSchema,
)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum CardColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Colorless,
}

impl CardColor {
    /// The chromatic palette in canonical order.
    pub fn chromatic() -> [CardColor; 5] {
        [
            CardColor::Red,
            CardColor::Blue,
            CardColor::Green,
            CardColor::Yellow,
            CardColor::Purple,
        ]
    }

    pub fn is_chromatic(&self) -> bool {
        !matches!(self, CardColor::Colorless)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CardColor::Red => "red",
            CardColor::Blue => "blue",
            CardColor::Green => "green",
            CardColor::Yellow => "yellow",
            CardColor::Purple => "purple",
            CardColor::Colorless => "colorless",
        }
    }

    /// Parse a color from its lowercase name, as used in route segments.
    pub fn from_name(name: &str) -> Option<CardColor> {
        match name.to_ascii_lowercase().as_str() {
            "red" => Some(CardColor::Red),
            "blue" => Some(CardColor::Blue),
            "green" => Some(CardColor::Green),
            "yellow" => Some(CardColor::Yellow),
            "purple" => Some(CardColor::Purple),
            "colorless" => Some(CardColor::Colorless),
            _ => None,
        }
    }
}

/// The three card types.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, JsonSchema,
)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum CardType {
    Unit,
    Supporter,
    Event,
}

impl CardType {
    pub fn from_name(name: &str) -> Option<CardType> {
        match name.to_ascii_lowercase().as_str() {
            "unit" => Some(CardType::Unit),
            "supporter" => Some(CardType::Supporter),
            "event" => Some(CardType::Event),
            _ => None,
        }
    }
}

/// Card rarity, ordered from most to least common.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, JsonSchema,
)]
#[serde(crate = "rocket::serde", rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    SuperRare,
    SecretRare,
}

/// A card definition.
///
/// `battle_value` is present only for units; `support_value` only for some
/// units, drawn from {1000, 2000, 3000, 4000, 5000}.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub cost: u32,
    pub color: CardColor,
    pub card_type: CardType,
    pub rarity: Rarity,
    pub battle_value: Option<i32>,
    pub support_value: Option<u32>,
    pub effect_text: String,
}

/// Immutable card registry keyed by card id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: BTreeMap<String, Card>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            cards: BTreeMap::new(),
        }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        let mut catalog = Self::new();
        for card in cards {
            catalog.cards.insert(card.id.clone(), card);
        }
        catalog
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cards.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn all(&self) -> Vec<&Card> {
        self.cards.values().collect()
    }

    /// Case-insensitive substring search over card names and effect text.
    pub fn search(&self, query: &str) -> Vec<&Card> {
        let query_lower = query.to_lowercase();
        self.cards
            .values()
            .filter(|card| {
                card.name.to_lowercase().contains(&query_lower)
                    || card.effect_text.to_lowercase().contains(&query_lower)
            })
            .collect()
    }

    /// Create the built-in demo catalog.
    pub fn with_canonical() -> Self {
        fn unit(
            id: &str,
            name: &str,
            color: CardColor,
            cost: u32,
            battle_value: i32,
            support_value: Option<u32>,
            rarity: Rarity,
            effect_text: &str,
        ) -> Card {
            Card {
                id: id.to_string(),
                name: name.to_string(),
                cost,
                color,
                card_type: CardType::Unit,
                rarity,
                battle_value: Some(battle_value),
                support_value,
                effect_text: effect_text.to_string(),
            }
        }

        fn spell(
            id: &str,
            name: &str,
            color: CardColor,
            cost: u32,
            card_type: CardType,
            rarity: Rarity,
            effect_text: &str,
        ) -> Card {
            Card {
                id: id.to_string(),
                name: name.to_string(),
                cost,
                color,
                card_type,
                rarity,
                battle_value: None,
                support_value: None,
                effect_text: effect_text.to_string(),
            }
        }

        use CardColor::*;
        use CardType::*;
        use Rarity::*;

        Self::from_cards(vec![
            unit("R-001", "Ember Scout", Red, 1, 1000, Some(1000), Common, "Rush."),
            unit("R-002", "Flame Duelist", Red, 2, 2000, Some(1000), Common, "When this unit attacks, it gains +1000 battle value."),
            unit("R-003", "Cinder Wolf", Red, 3, 3000, Some(2000), Uncommon, "Rush. Cannot block."),
            unit("R-004", "Blaze Captain", Red, 4, 4000, None, Rare, "Other red units you control gain +1000 battle value."),
            unit("R-005", "Magma Colossus", Red, 7, 7000, None, SuperRare, "When played, destroy an enemy unit with cost 3 or less."),
            spell("R-006", "Sudden Ignition", Red, 2, Event, Common, "Destroy an enemy unit with 2000 battle value or less."),
            unit("B-001", "Tide Apprentice", Blue, 1, 1000, Some(1000), Common, "When played, draw a card, then discard a card."),
            unit("B-002", "Mist Archivist", Blue, 3, 2000, Some(3000), Uncommon, "When played, look at the top two cards of your deck."),
            unit("B-003", "Abyss Leviathan", Blue, 8, 8000, None, SecretRare, "When played, return all enemy units with cost 4 or less to hand."),
            spell("B-004", "Counter Current", Blue, 2, Event, Rare, "Negate an event card."),
            spell("B-005", "Deep Research", Blue, 1, Event, Common, "Draw two cards, then discard a card."),
            unit("G-001", "Sprout Keeper", Green, 1, 1000, Some(2000), Common, "When played, you may add a reiki card from your trash to your reiki area."),
            unit("G-002", "Verdant Stag", Green, 3, 3000, Some(2000), Common, "Blocker."),
            unit("G-003", "Elder Treant", Green, 6, 6000, None, SuperRare, "Blocker. This unit cannot be destroyed by events."),
            spell("G-004", "Wild Growth", Green, 2, Supporter, Uncommon, "Your units gain +1000 battle value this turn."),
            unit("Y-001", "Shrine Acolyte", Yellow, 1, 1000, Some(1000), Common, "When this unit is destroyed, draw a card."),
            unit("Y-002", "Radiant Lancer", Yellow, 3, 3000, Some(4000), Rare, "When this unit attacks, your opponent cannot play events until end of turn."),
            unit("Y-003", "Sun Oracle", Yellow, 5, 4000, Some(5000), SuperRare, "When played, reveal the top card of your deck. If it is yellow, add it to hand."),
            spell("Y-004", "Blessed Aid", Yellow, 1, Supporter, Common, "Restore one of your units to active."),
            unit("P-001", "Void Stalker", Purple, 2, 2000, Some(2000), Uncommon, "When this unit destroys an enemy unit, draw a card."),
            unit("P-002", "Night Regent", Purple, 5, 5000, None, SuperRare, "When played, each player discards a card."),
            spell("P-003", "Creeping Dusk", Purple, 3, Event, Rare, "An enemy unit gets -3000 battle value this turn."),
            unit("C-001", "Clockwork Porter", Colorless, 2, 2000, None, Common, "This unit needs no reiki to play."),
            spell("C-002", "Supply Cache", Colorless, 1, Supporter, Common, "Look at the top card of your deck. You may put it on the bottom."),
        ])
    }
}
