use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use smallvec::SmallVec;

pub const MAX_RANK: u8 = 13;
pub const MAX_SUIT: u8 = 4;
pub const MAX_CARD: u8 = MAX_SUIT * MAX_RANK;

const RANKS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

/// A short run of cards: a drag payload, an animation batch or a logged move.
pub type Run = SmallVec<[Card; 13]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Spade => '♠',
            Suit::Heart => '♥',
            Suit::Diamond => '♦',
            Suit::Club => '♣',
        }
    }

    pub fn color(self) -> Color {
        match self {
            Suit::Heart | Suit::Diamond => Color::Red,
            Suit::Spade | Suit::Club => Color::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    id: u8,
    pub face_up: bool,
}

impl Card {
    pub fn new_with_id(id: u8) -> Self {
        debug_assert!(id < MAX_CARD);
        Self { id, face_up: false }
    }

    /// `rank` is zero based: 0 is the Ace, 12 the King.
    pub fn new(rank: u8, suit: Suit) -> Self {
        Self::new_with_id(suit.index() * MAX_RANK + rank)
    }

    pub fn turned_up(mut self) -> Self {
        self.face_up = true;
        self
    }

    pub fn turned_down(mut self) -> Self {
        self.face_up = false;
        self
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn rank(&self) -> u8 {
        self.id % MAX_RANK
    }

    pub fn suit(&self) -> Suit {
        Suit::ALL[(self.id / MAX_RANK) as usize]
    }

    pub fn color(&self) -> Color {
        self.suit().color()
    }

    pub fn is_ace(&self) -> bool {
        self.rank() == 0
    }

    pub fn is_king(&self) -> bool {
        self.rank() == MAX_RANK - 1
    }

    /// Same (suit, rank), regardless of which side is showing.
    pub fn same_card(&self, other: &Card) -> bool {
        self.id == other.id
    }

    pub fn rank_label(&self) -> &'static str {
        RANKS[self.rank() as usize]
    }

    pub fn pretty_print(&self) -> String {
        format!("{}{}", self.rank_label(), self.suit().symbol())
    }
}

/// All 52 cards, face-down, grouped by suit in ascending rank.
pub fn new_deck() -> Vec<Card> {
    (0..MAX_CARD).map(Card::new_with_id).collect()
}

pub fn shuffled_deck(seed: u64) -> Vec<Card> {
    let mut deck = new_deck();
    let mut rng = StdRng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_deck_is_unique() {
        let deck = new_deck();
        assert_eq!(deck.len(), 52);
        for (i, card) in deck.iter().enumerate() {
            assert_eq!(card.id() as usize, i);
            assert!(!card.face_up);
        }
    }

    #[test]
    fn test_rank_and_suit() {
        let card = Card::new(11, Suit::Diamond);
        assert_eq!(card.rank(), 11);
        assert_eq!(card.suit(), Suit::Diamond);
        assert_eq!(card.color(), Color::Red);
        assert_eq!(card.pretty_print(), "Q♦");
        assert!(Card::new(0, Suit::Club).is_ace());
        assert!(Card::new(12, Suit::Spade).is_king());
        assert_eq!(Card::new(9, Suit::Spade).rank_label(), "10");
    }

    #[test]
    fn test_same_card_ignores_face() {
        let down = Card::new(4, Suit::Heart);
        let up = down.turned_up();
        assert_ne!(down, up);
        assert!(down.same_card(&up));
    }

    #[test]
    fn test_shuffled_deck_is_seeded() {
        let a = shuffled_deck(42);
        let b = shuffled_deck(42);
        assert_eq!(a, b);
        let mut ids: Vec<u8> = a.iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..52).collect::<Vec<u8>>());
    }
}
