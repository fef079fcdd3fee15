use crate::{
    board::Board,
    card::{Card, Run},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEntry {
    /// Cards turned from the stock, or with `recycled` the waste as it was
    /// before being turned back into the stock.
    Draw { cards: Vec<Card>, recycled: bool },
    /// A run that landed somewhere. Logged, never reverted.
    Move { cards: Run },
}

impl HistoryEntry {
    /// Puts the board back to before this entry, as far as the cards involved are
    /// still where the entry left them. Returns whether anything changed.
    pub fn revert(&self, board: &mut Board) -> bool {
        match self {
            HistoryEntry::Draw {
                cards,
                recycled: false,
            } => {
                let mut changed = false;
                for card in cards.iter().rev() {
                    if let Some(pos) = board.waste.iter().position(|c| c.same_card(card)) {
                        let card = board.waste.remove(pos);
                        board.stock.push(card.turned_down());
                        changed = true;
                    }
                }
                changed
            }
            HistoryEntry::Draw {
                cards,
                recycled: true,
            } => {
                let mut restored = Vec::with_capacity(cards.len() + board.waste.len());
                for card in cards {
                    if let Some(pos) = board.stock.iter().position(|c| c.same_card(card)) {
                        let card = board.stock.remove(pos);
                        restored.push(card.turned_up());
                    }
                }
                let changed = !restored.is_empty();
                restored.append(&mut board.waste);
                board.waste = restored;
                changed
            }
            HistoryEntry::Move { .. } => false,
        }
    }
}

/// Linear log of completed actions, kept for the whole game.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::new_deck;
    use smallvec::smallvec;

    #[test]
    fn test_revert_draw_restores_stock_order() {
        let mut board = Board::deal(new_deck());
        let before = board.clone();
        let drawn = board.take_draw(3);
        board.waste.extend(drawn.iter().copied());

        let entry = HistoryEntry::Draw {
            cards: drawn,
            recycled: false,
        };
        assert!(entry.revert(&mut board));
        assert_eq!(board, before);
    }

    #[test]
    fn test_revert_draw_skips_cards_moved_on() {
        let mut board = Board::deal(new_deck());
        let drawn = board.take_draw(3);
        board.waste.extend(drawn.iter().copied());
        let played = board.waste.pop().unwrap();
        board.foundations[0].push(played);

        let entry = HistoryEntry::Draw {
            cards: drawn,
            recycled: false,
        };
        assert!(entry.revert(&mut board));
        assert!(board.waste.is_empty());
        assert_eq!(board.stock.len(), 23);
        assert_eq!(board.foundations[0], vec![played]);
        assert!(board.is_valid());
    }

    #[test]
    fn test_revert_recycle() {
        let mut board = Board::deal(new_deck());
        let mut waste = std::mem::take(&mut board.stock);
        for card in &mut waste {
            card.face_up = true;
        }
        board.waste = waste.clone();
        let saved = board.recycle();

        let entry = HistoryEntry::Draw {
            cards: saved,
            recycled: true,
        };
        assert!(entry.revert(&mut board));
        assert!(board.stock.is_empty());
        assert_eq!(board.waste, waste);
    }

    #[test]
    fn test_move_is_not_reverted() {
        let mut board = Board::new(3);
        let before = board.clone();
        let entry = HistoryEntry::Move {
            cards: smallvec![board.tableaus[0][0]],
        };
        assert!(!entry.revert(&mut board));
        assert_eq!(board, before);
    }

    #[test]
    fn test_history_is_a_stack() {
        let mut history = History::new();
        assert!(history.pop().is_none());
        history.record(HistoryEntry::Draw {
            cards: vec![],
            recycled: true,
        });
        history.record(HistoryEntry::Move { cards: Run::new() });
        assert_eq!(history.len(), 2);
        assert!(matches!(history.last(), Some(HistoryEntry::Move { .. })));
        assert!(matches!(history.pop(), Some(HistoryEntry::Move { .. })));
        assert!(matches!(history.pop(), Some(HistoryEntry::Draw { .. })));
        assert!(history.is_empty());
    }
}
