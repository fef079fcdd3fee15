//! Fixed board geometry. Every rectangle is in board coordinates, origin at the
//! top-left corner of a `BOARD_SIZE` canvas.

use egui::{Pos2, Rect, Vec2, pos2, vec2};

use crate::{
    animation::Destination,
    assets::AssetSet,
    board::Board,
    card::Card,
};

pub const BOARD_SIZE: Vec2 = Vec2::new(1024.0, 768.0);

const STOCK_POS: Pos2 = Pos2::new(50.0, 50.0);
const WASTE_POS: Pos2 = Pos2::new(170.0, 50.0);
const WASTE_CARD_OFFSET: Vec2 = Vec2::new(20.0, 5.0); // Fan offset of visible waste cards
const FOUNDATION_POS: Pos2 = Pos2::new(400.0, 50.0);
const TABLEAU_POS: Pos2 = Pos2::new(50.0, 250.0);
const PILE_SPACING: f32 = 120.0;
pub const TABLEAU_FACE_DOWN_OFFSET: f32 = 10.0;
pub const TABLEAU_FACE_UP_OFFSET: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    card_size: Vec2,
}

impl Layout {
    pub fn new(assets: &AssetSet) -> Self {
        Self {
            card_size: assets.card_size(),
        }
    }

    pub fn card_size(&self) -> Vec2 {
        self.card_size
    }

    pub fn card_rect(&self, pos: Pos2) -> Rect {
        Rect::from_min_size(pos, self.card_size)
    }

    pub fn stock_rect(&self) -> Rect {
        self.card_rect(STOCK_POS)
    }

    /// Top-left corner of the `slot`-th fanned waste card.
    pub fn waste_card_pos(&self, slot: usize) -> Pos2 {
        WASTE_POS + WASTE_CARD_OFFSET * slot as f32
    }

    /// Index of the first shown waste card and how many are shown.
    pub fn waste_visible(&self, waste_len: usize, display_count: usize) -> (usize, usize) {
        let shown = waste_len.min(display_count);
        (waste_len - shown, shown)
    }

    pub fn waste_top_rect(&self, waste_len: usize, display_count: usize) -> Option<Rect> {
        let (_, shown) = self.waste_visible(waste_len, display_count);
        (shown > 0).then(|| self.card_rect(self.waste_card_pos(shown - 1)))
    }

    pub fn foundation_rect(&self, idx: usize) -> Rect {
        self.card_rect(FOUNDATION_POS + vec2(idx as f32 * PILE_SPACING, 0.0))
    }

    /// Drop area of an empty tableau pile.
    pub fn tableau_slot_rect(&self, idx: usize) -> Rect {
        self.card_rect(TABLEAU_POS + vec2(idx as f32 * PILE_SPACING, 0.0))
    }

    /// Position of card `j` of tableau `idx`; `j == pile.len()` is where the next
    /// card would go.
    pub fn tableau_card_pos(&self, idx: usize, pile: &[Card], j: usize) -> Pos2 {
        let y: f32 = pile
            .iter()
            .take(j)
            .map(|card| {
                if card.face_up {
                    TABLEAU_FACE_UP_OFFSET
                } else {
                    TABLEAU_FACE_DOWN_OFFSET
                }
            })
            .sum();
        self.tableau_slot_rect(idx).min + vec2(0.0, y)
    }

    pub fn tableau_card_rect(&self, idx: usize, pile: &[Card], j: usize) -> Rect {
        self.card_rect(self.tableau_card_pos(idx, pile, j))
    }

    /// Top-most face-up card of tableau `idx` under `pos`.
    pub fn hit_tableau_card(&self, idx: usize, pile: &[Card], pos: Pos2) -> Option<usize> {
        (0..pile.len())
            .rev()
            .find(|&j| pile[j].face_up && self.tableau_card_rect(idx, pile, j).contains(pos))
    }

    /// Where the first card of a run of `count` cards settles at `destination`.
    pub fn landing_pos(
        &self,
        board: &Board,
        destination: Destination,
        count: usize,
        display_count: usize,
    ) -> Pos2 {
        match destination {
            Destination::Foundation(i) => self.foundation_rect(i).min,
            Destination::Tableau(i) => {
                let pile = &board.tableaus[i];
                self.tableau_card_pos(i, pile, pile.len())
            }
            Destination::Waste => {
                let len = board.waste.len();
                let (first, _) = self.waste_visible(len + count, display_count);
                self.waste_card_pos(len.saturating_sub(first))
            }
        }
    }

    /// Offset of the `i`-th card of a run in flight towards `destination`.
    pub fn fan_offset(&self, destination: Destination, i: usize) -> Vec2 {
        match destination {
            Destination::Waste => WASTE_CARD_OFFSET * i as f32,
            _ => self.run_offset(i),
        }
    }

    /// Offset of the `i`-th card of a face-up run, as stacked on a tableau.
    pub fn run_offset(&self, i: usize) -> Vec2 {
        vec2(0.0, TABLEAU_FACE_UP_OFFSET * i as f32)
    }

    pub fn undo_button(&self) -> Rect {
        Rect::from_min_size(pos2(BOARD_SIZE.x - 120.0, 50.0), vec2(100.0, 40.0))
    }

    pub fn play_again_button(&self) -> Rect {
        Rect::from_min_size(
            pos2(BOARD_SIZE.x / 2.0 - 100.0, BOARD_SIZE.y / 2.0 + 50.0),
            vec2(200.0, 50.0),
        )
    }

    /// Buttons of the difficulty picker, top to bottom.
    pub fn difficulty_button(&self, i: usize) -> Rect {
        Rect::from_min_size(
            pos2(BOARD_SIZE.x / 2.0 - 100.0, 200.0 + i as f32 * 100.0),
            vec2(200.0, 60.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn layout() -> Layout {
        Layout::new(&AssetSet::default())
    }

    #[test]
    fn test_tableau_offsets_follow_face() {
        let layout = layout();
        let pile = [
            Card::new(1, Suit::Club),
            Card::new(2, Suit::Club),
            Card::new(3, Suit::Heart).turned_up(),
            Card::new(2, Suit::Spade).turned_up(),
        ];
        assert_eq!(layout.tableau_card_pos(3, &pile, 0), pos2(410.0, 250.0));
        assert_eq!(layout.tableau_card_pos(3, &pile, 2), pos2(410.0, 270.0));
        assert_eq!(layout.tableau_card_pos(3, &pile, 4), pos2(410.0, 330.0));
    }

    #[test]
    fn test_hit_tableau_prefers_top_card() {
        let layout = layout();
        let pile = [
            Card::new(4, Suit::Club),
            Card::new(3, Suit::Heart).turned_up(),
            Card::new(2, Suit::Spade).turned_up(),
        ];
        // Overlap of the two face-up cards belongs to the upper one.
        assert_eq!(layout.hit_tableau_card(0, &pile, pos2(60.0, 300.0)), Some(2));
        assert_eq!(layout.hit_tableau_card(0, &pile, pos2(60.0, 265.0)), Some(1));
        // The face-down card cannot be picked.
        assert_eq!(layout.hit_tableau_card(0, &pile, pos2(60.0, 255.0)), None);
        assert_eq!(layout.hit_tableau_card(0, &pile, pos2(10.0, 300.0)), None);
    }

    #[test]
    fn test_waste_top_rect() {
        let layout = layout();
        assert_eq!(layout.waste_top_rect(0, 3), None);
        assert_eq!(layout.waste_top_rect(1, 3).unwrap().min, pos2(170.0, 50.0));
        assert_eq!(layout.waste_top_rect(10, 3).unwrap().min, pos2(210.0, 60.0));
        assert_eq!(layout.waste_top_rect(10, 1).unwrap().min, pos2(170.0, 50.0));
    }

    #[test]
    fn test_landing_on_waste() {
        let layout = layout();
        let mut board = Board::default();
        assert_eq!(
            layout.landing_pos(&board, Destination::Waste, 3, 2),
            pos2(170.0, 50.0)
        );
        board.waste = vec![Card::new(0, Suit::Club).turned_up()];
        assert_eq!(
            layout.landing_pos(&board, Destination::Waste, 1, 2),
            layout.waste_card_pos(1)
        );
        assert_eq!(
            layout.landing_pos(&board, Destination::Foundation(2), 1, 2),
            pos2(640.0, 50.0)
        );
    }
}
