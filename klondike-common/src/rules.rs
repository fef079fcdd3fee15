//! Placement rules. Callers decide what to do with the answer.

use crate::card::Card;

/// `candidate` goes on `top` when it is one rank lower and of the other color.
pub fn can_stack_on_tableau(candidate: &Card, top: &Card) -> bool {
    candidate.color() != top.color() && candidate.rank() + 1 == top.rank()
}

pub fn can_place_on_empty_tableau(candidate: &Card) -> bool {
    candidate.is_king()
}

pub fn can_place_on_foundation(candidate: &Card, foundation: &[Card]) -> bool {
    match foundation.last() {
        None => candidate.is_ace(),
        Some(top) => top.suit() == candidate.suit() && candidate.rank() == top.rank() + 1,
    }
}

/// Tableau placement as the board sees it: a face-down top never takes a card.
pub fn can_place_on_tableau(candidate: &Card, pile: &[Card]) -> bool {
    match pile.last() {
        None => can_place_on_empty_tableau(candidate),
        Some(top) => top.face_up && can_stack_on_tableau(candidate, top),
    }
}
