use crate::card::{Card, MAX_CARD, MAX_RANK, shuffled_deck};

pub const TOTAL_FOUNDATIONS: usize = 4;
pub const TOTAL_TABLEAUS: usize = 7;
pub const STOCK_SIZE: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PileId {
    Stock,
    Waste,
    Foundation(usize),
    Tableau(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    pub stock: Vec<Card>,
    pub waste: Vec<Card>,
    pub foundations: [Vec<Card>; TOTAL_FOUNDATIONS],
    pub tableaus: [Vec<Card>; TOTAL_TABLEAUS],
}

impl Board {
    pub fn new(seed: u64) -> Self {
        Self::deal(shuffled_deck(seed))
    }

    /// Deals from the end of `deck`: tableau `i` gets `i + 1` cards with only the
    /// last one face-up, the rest becomes the stock.
    pub fn deal(mut deck: Vec<Card>) -> Self {
        let mut board = Self::default();
        for (i, tableau) in board.tableaus.iter_mut().enumerate() {
            for j in 0..=i {
                let Some(mut card) = deck.pop() else {
                    break;
                };
                card.face_up = j == i;
                tableau.push(card);
            }
        }
        for card in &mut deck {
            card.face_up = false;
        }
        board.stock = deck;
        board
    }

    pub fn pile(&self, pile_id: PileId) -> &Vec<Card> {
        match pile_id {
            PileId::Stock => &self.stock,
            PileId::Waste => &self.waste,
            PileId::Foundation(i) => &self.foundations[i],
            PileId::Tableau(i) => &self.tableaus[i],
        }
    }

    pub fn pile_mut(&mut self, pile_id: PileId) -> &mut Vec<Card> {
        match pile_id {
            PileId::Stock => &mut self.stock,
            PileId::Waste => &mut self.waste,
            PileId::Foundation(i) => &mut self.foundations[i],
            PileId::Tableau(i) => &mut self.tableaus[i],
        }
    }

    /// Takes up to `count` cards off the stock top, face-up, in the order they
    /// come off. Extending the waste with them leaves the last one on top.
    pub fn take_draw(&mut self, count: usize) -> Vec<Card> {
        let num = count.min(self.stock.len());
        self.stock
            .drain(self.stock.len() - num..)
            .rev()
            .map(Card::turned_up)
            .collect()
    }

    /// Turns the waste over into a fresh stock. Returns the waste as it was.
    pub fn recycle(&mut self) -> Vec<Card> {
        let saved = std::mem::take(&mut self.waste);
        self.stock = saved
            .iter()
            .rev()
            .map(|card| card.turned_down())
            .collect();
        saved
    }

    /// Flips a face-down tableau top. Returns whether a card was turned.
    pub fn flip_tableau_top(&mut self, idx: usize) -> bool {
        match self.tableaus[idx].last_mut() {
            Some(card) if !card.face_up => {
                card.face_up = true;
                true
            }
            _ => false,
        }
    }

    pub fn score(&self) -> usize {
        self.foundations.iter().map(|f| f.len()).sum()
    }

    pub fn is_won(&self) -> bool {
        self.foundations
            .iter()
            .all(|f| f.len() == MAX_RANK as usize)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.stock
            .iter()
            .chain(self.waste.iter())
            .chain(self.foundations.iter().flatten())
            .chain(self.tableaus.iter().flatten())
    }

    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    /// True when `cards` are exactly the 52 distinct cards.
    pub fn is_complete_deck<'a>(cards: impl IntoIterator<Item = &'a Card>) -> bool {
        let mut seen = [false; MAX_CARD as usize];
        let mut count = 0;
        for card in cards {
            let id = card.id() as usize;
            if seen[id] {
                return false;
            }
            seen[id] = true;
            count += 1;
        }
        count == MAX_CARD as usize
    }

    pub fn is_valid(&self) -> bool {
        Self::is_complete_deck(self.cards())
    }

    pub fn pretty_print(&self) -> String {
        let mut output = String::new();
        let mut line = |label: String, cards: &[Card]| {
            output.push_str(&label);
            output.push(':');
            for card in cards {
                output.push(' ');
                if card.face_up {
                    output.push_str(&card.pretty_print());
                } else {
                    output.push_str(&format!("[{}]", card.pretty_print()));
                }
            }
            output.push('\n');
        };

        line("Stock".into(), &self.stock);
        line("Waste".into(), &self.waste);
        for (i, foundation) in self.foundations.iter().enumerate() {
            line(format!("Foundation{}", i + 1), foundation);
        }
        for (i, tableau) in self.tableaus.iter().enumerate() {
            line(format!("Tableau{}", i + 1), tableau);
        }
        output
    }
}
