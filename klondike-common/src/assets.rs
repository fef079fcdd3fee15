use egui::{Color32, Vec2};

use crate::card::{Card, Color, MAX_CARD};

pub const CARD_SIZE: Vec2 = Vec2::new(100.0, 145.0);

const RED: Color32 = Color32::from_rgb(200, 0, 0);

#[derive(Debug, Clone, PartialEq)]
pub struct CardFace {
    /// Corner label such as `10♥`.
    pub label: String,
    pub symbol: char,
    pub ink: Color32,
}

/// Card visuals built once per process and shared by every session.
#[derive(Debug, Clone)]
pub struct AssetSet {
    card_size: Vec2,
    faces: Vec<CardFace>,
}

impl Default for AssetSet {
    fn default() -> Self {
        Self::new(CARD_SIZE)
    }
}

impl AssetSet {
    pub fn new(card_size: Vec2) -> Self {
        let faces = (0..MAX_CARD)
            .map(Card::new_with_id)
            .map(|card| {
                let symbol = card.suit().symbol();
                CardFace {
                    label: format!("{}{symbol}", card.rank_label()),
                    symbol,
                    ink: match card.color() {
                        Color::Red => RED,
                        Color::Black => Color32::BLACK,
                    },
                }
            })
            .collect();
        Self { card_size, faces }
    }

    pub fn card_size(&self) -> Vec2 {
        self.card_size
    }

    pub fn face(&self, card: &Card) -> &CardFace {
        &self.faces[card.id() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    #[test]
    fn test_faces_are_keyed_by_card() {
        let assets = AssetSet::default();
        assert_eq!(assets.card_size(), CARD_SIZE);

        let face = assets.face(&Card::new(9, Suit::Heart));
        assert_eq!(face.label, "10♥");
        assert_eq!(face.ink, RED);

        let face = assets.face(&Card::new(12, Suit::Club).turned_up());
        assert_eq!(face.label, "K♣");
        assert_eq!(face.symbol, '♣');
        assert_eq!(face.ink, Color32::BLACK);
    }
}
