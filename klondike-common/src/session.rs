//! One game from deal to win: pointer handling, slides, undo and win detection.
//!
//! The session is driven by the presentation loop: pointer events as they
//! arrive, then one [`Session::update`] per frame at [`FPS`].

use egui::{Pos2, Vec2};
use rand::{SeedableRng, rngs::StdRng};
use smallvec::smallvec;

use crate::{
    animation::{Animation, Destination, Shake},
    assets::AssetSet,
    board::{Board, PileId, TOTAL_FOUNDATIONS, TOTAL_TABLEAUS},
    card::{Card, Run},
    config::{Difficulty, SessionConfig, Theme},
    history::{History, HistoryEntry},
    layout::Layout,
    rules::{can_place_on_foundation, can_place_on_tableau},
    trace,
};

pub const FPS: u32 = 60;
/// Pointer travel that turns a press on the waste into a drag.
pub const DRAG_THRESHOLD: f32 = 5.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOrigin {
    Waste,
    /// `rest` is the pile as it was left behind by the lift.
    Tableau { index: usize, rest: Vec<Card> },
}

impl DragOrigin {
    pub fn pile_id(&self) -> PileId {
        match self {
            DragOrigin::Waste => PileId::Waste,
            DragOrigin::Tableau { index, .. } => PileId::Tableau(*index),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragPayload {
    pub cards: Run,
    pub origin: DragOrigin,
    /// Pointer position relative to the first card's top-left corner.
    pub grab_offset: Vec2,
    pub pointer: Pos2,
}

impl DragPayload {
    pub fn position(&self) -> Pos2 {
        self.pointer - self.grab_offset
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    /// Pressed on the waste top card; a click until the pointer travels.
    PendingWasteClick { down: Pos2 },
    Dragging(DragPayload),
}

/// Something only the owner of the session can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRequest {
    PlayAgain,
}

#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    difficulty: Difficulty,
    seed: u64,
    theme: Theme,
    layout: Layout,
    history: History,
    animations: Vec<Animation>,
    shake: Option<Shake>,
    pointer: PointerState,
    won: bool,
    frame: u64,
    won_at: Option<u64>,
}

/// A new game at `difficulty` with a fresh shuffle and theme.
pub fn reset_session(difficulty: Difficulty, assets: &AssetSet) -> Session {
    Session::new(SessionConfig::new(difficulty, rand::random()), assets)
}

impl Session {
    pub fn new(config: SessionConfig, assets: &AssetSet) -> Self {
        Self::from_board(Board::new(config.seed), config, assets)
    }

    /// Starts from a prepared board instead of a deal.
    pub fn from_board(board: Board, config: SessionConfig, assets: &AssetSet) -> Self {
        let theme = config
            .theme
            .unwrap_or_else(|| Theme::random(&mut StdRng::seed_from_u64(config.seed)));
        trace!(
            "new game: seed {} difficulty {} theme {}",
            config.seed, config.difficulty, theme.name
        );
        if trace::enabled() {
            eprint!("{}", board.pretty_print());
        }
        Self {
            board,
            difficulty: config.difficulty,
            seed: config.seed,
            theme,
            layout: Layout::new(assets),
            history: History::new(),
            animations: Vec::new(),
            shake: None,
            pointer: PointerState::Idle,
            won: false,
            frame: 0,
            won_at: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn drag(&self) -> Option<&DragPayload> {
        match &self.pointer {
            PointerState::Dragging(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Horizontal offset to draw the waste with.
    pub fn shake_offset(&self) -> f32 {
        self.shake.map_or(0.0, |s| s.offset())
    }

    /// Waste cards on show, bottom to top.
    pub fn waste_shown(&self) -> &[Card] {
        let (first, _) = self
            .layout
            .waste_visible(self.board.waste.len(), self.difficulty.waste_display_count());
        &self.board.waste[first..]
    }

    pub fn score(&self) -> usize {
        self.board.score()
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Game clock, stopped at the win.
    pub fn elapsed_secs(&self) -> u64 {
        self.won_at.unwrap_or(self.frame) / FPS as u64
    }

    /// Every card is in exactly one place: a pile, a slide or the drag.
    pub fn is_conserved(&self) -> bool {
        let in_flight = self.animations.iter().flat_map(|a| a.cards.iter());
        let dragged = self.drag().into_iter().flat_map(|p| p.cards.iter());
        Board::is_complete_deck(self.board.cards().chain(in_flight).chain(dragged))
    }

    pub fn pointer_down(&mut self, pos: Pos2) -> Option<SessionRequest> {
        if self.won {
            if self.layout.play_again_button().contains(pos) {
                trace!("play again");
                return Some(SessionRequest::PlayAgain);
            }
            return None;
        }
        // Moves are serialised so that rule checks only ever see settled piles.
        if !self.animations.is_empty() || self.pointer != PointerState::Idle {
            return None;
        }

        if self.layout.undo_button().contains(pos) {
            self.undo();
            return None;
        }
        if self.try_auto_play_tableau(pos) {
            return None;
        }
        if self.layout.stock_rect().contains(pos) {
            self.click_stock();
        } else if self.waste_top_rect().is_some_and(|rect| rect.contains(pos)) {
            self.pointer = PointerState::PendingWasteClick { down: pos };
        } else {
            self.start_tableau_drag(pos);
        }
        None
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        match &mut self.pointer {
            PointerState::Idle => {}
            PointerState::PendingWasteClick { down } => {
                let down = *down;
                if (pos - down).length() > DRAG_THRESHOLD {
                    self.lift_waste_top(down, pos);
                }
            }
            PointerState::Dragging(payload) => payload.pointer = pos,
        }
    }

    pub fn pointer_up(&mut self, pos: Pos2) {
        match std::mem::take(&mut self.pointer) {
            PointerState::Idle => {}
            PointerState::PendingWasteClick { .. } => self.attempt_auto_move_waste(),
            PointerState::Dragging(mut payload) => {
                payload.pointer = pos;
                self.drop_payload(payload);
            }
        }
    }

    /// Pops one history entry and reverts it as far as possible. Only draws and
    /// recycles change the board; ignored while cards are moving.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        if self.won || !self.animations.is_empty() || self.pointer != PointerState::Idle {
            return None;
        }
        let entry = self.history.pop()?;
        let changed = entry.revert(&mut self.board);
        trace!("undo {entry:?} (board changed: {changed})");
        Some(entry)
    }

    /// Advances the game by one frame.
    pub fn update(&mut self) {
        self.frame += 1;

        if let Some(shake) = &mut self.shake {
            shake.tick();
            if shake.is_finished() {
                self.shake = None;
            }
        }

        for anim in &mut self.animations {
            anim.tick();
        }
        let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.animations)
            .into_iter()
            .partition(|anim| anim.is_finished());
        self.animations = running;
        for anim in finished {
            self.land(anim);
        }

        if !self.won && self.board.is_won() {
            self.won = true;
            self.won_at = Some(self.frame);
            trace!("won after {} moves, {}s", self.history.len(), self.elapsed_secs());
        }

        debug_assert!(self.is_conserved());
    }

    fn land(&mut self, anim: Animation) {
        let Animation {
            cards,
            origin,
            destination,
            ..
        } = anim;
        self.board
            .pile_mut(destination.into())
            .extend(cards.iter().copied());
        if let PileId::Tableau(i) = origin
            && self.board.flip_tableau_top(i)
        {
            trace!("revealed tableau {}", i + 1);
        }
        trace!("landed {} card(s) {origin:?} -> {destination:?}", cards.len());
        self.history.record(HistoryEntry::Move { cards });
    }

    fn waste_top_rect(&self) -> Option<egui::Rect> {
        self.layout.waste_top_rect(
            self.board.waste.len(),
            self.difficulty.waste_display_count(),
        )
    }

    fn foundation_for(&self, card: &Card) -> Option<usize> {
        (0..TOTAL_FOUNDATIONS).find(|&i| can_place_on_foundation(card, &self.board.foundations[i]))
    }

    fn tableau_for(&self, card: &Card) -> Option<usize> {
        (0..TOTAL_TABLEAUS).find(|&i| can_place_on_tableau(card, &self.board.tableaus[i]))
    }

    fn start_slide(&mut self, cards: Run, origin: PileId, destination: Destination, start: Pos2) {
        let end = self.layout.landing_pos(
            &self.board,
            destination,
            cards.len(),
            self.difficulty.waste_display_count(),
        );
        self.animations
            .push(Animation::new(cards, origin, destination, start, end));
    }

    /// A press on an exposed tableau card that a foundation takes sends it there.
    fn try_auto_play_tableau(&mut self, pos: Pos2) -> bool {
        for i in 0..TOTAL_TABLEAUS {
            let pile = &self.board.tableaus[i];
            let Some(top) = pile.last() else {
                continue;
            };
            let top_idx = pile.len() - 1;
            if !top.face_up || !self.layout.tableau_card_rect(i, pile, top_idx).contains(pos) {
                continue;
            }
            let Some(foundation) = self.foundation_for(top) else {
                continue;
            };
            let start = self.layout.tableau_card_pos(i, pile, top_idx);
            if let Some(card) = self.board.tableaus[i].pop() {
                self.start_slide(
                    smallvec![card],
                    PileId::Tableau(i),
                    Destination::Foundation(foundation),
                    start,
                );
                return true;
            }
        }
        false
    }

    fn click_stock(&mut self) {
        if !self.board.stock.is_empty() {
            let drawn = self.board.take_draw(self.difficulty.draw_count());
            trace!("draw {} card(s)", drawn.len());
            self.history.record(HistoryEntry::Draw {
                cards: drawn.clone(),
                recycled: false,
            });
            let start = self.layout.stock_rect().min;
            self.start_slide(Run::from_vec(drawn), PileId::Stock, Destination::Waste, start);
        } else if !self.board.waste.is_empty() {
            let saved = self.board.recycle();
            trace!("recycled {} card(s) into the stock", saved.len());
            self.history.record(HistoryEntry::Draw {
                cards: saved,
                recycled: true,
            });
        }
    }

    fn lift_waste_top(&mut self, down: Pos2, pos: Pos2) {
        let Some(rect) = self.waste_top_rect() else {
            self.pointer = PointerState::Idle;
            return;
        };
        self.pointer = match self.board.waste.pop() {
            Some(card) => PointerState::Dragging(DragPayload {
                cards: smallvec![card],
                origin: DragOrigin::Waste,
                grab_offset: down - rect.min,
                pointer: pos,
            }),
            None => PointerState::Idle,
        };
    }

    fn start_tableau_drag(&mut self, pos: Pos2) {
        for i in 0..TOTAL_TABLEAUS {
            let pile = &self.board.tableaus[i];
            let Some(j) = self.layout.hit_tableau_card(i, pile, pos) else {
                continue;
            };
            let card_pos = self.layout.tableau_card_pos(i, pile, j);
            let cards: Run = self.board.tableaus[i].drain(j..).collect();
            let rest = self.board.tableaus[i].clone();
            self.pointer = PointerState::Dragging(DragPayload {
                cards,
                origin: DragOrigin::Tableau { index: i, rest },
                grab_offset: pos - card_pos,
                pointer: pos,
            });
            return;
        }
    }

    /// Waste top released without a drag: foundation first, then the first
    /// tableau that takes it, otherwise back on the waste with a shake.
    fn attempt_auto_move_waste(&mut self) {
        let Some(rect) = self.waste_top_rect() else {
            return;
        };
        let Some(card) = self.board.waste.pop() else {
            return;
        };
        let destination = self
            .foundation_for(&card)
            .map(Destination::Foundation)
            .or_else(|| self.tableau_for(&card).map(Destination::Tableau));
        match destination {
            Some(destination) => {
                self.start_slide(smallvec![card], PileId::Waste, destination, rect.min);
            }
            None => {
                trace!("no place for {} from the waste", card.pretty_print());
                self.board.waste.push(card);
                self.shake = Some(Shake::new());
            }
        }
    }

    /// Only the first card of the payload is checked; foundations take single
    /// cards only.
    fn drop_target(&self, payload: &DragPayload) -> Option<Destination> {
        let first = payload.cards.first()?;
        let pos = payload.pointer;
        if payload.cards.len() == 1 {
            for i in 0..TOTAL_FOUNDATIONS {
                if self.layout.foundation_rect(i).contains(pos)
                    && can_place_on_foundation(first, &self.board.foundations[i])
                {
                    return Some(Destination::Foundation(i));
                }
            }
        }
        for i in 0..TOTAL_TABLEAUS {
            let pile = &self.board.tableaus[i];
            let hit = match pile.len() {
                0 => self.layout.tableau_slot_rect(i).contains(pos),
                n => self.layout.tableau_card_rect(i, pile, n - 1).contains(pos),
            };
            if hit && can_place_on_tableau(first, pile) {
                return Some(Destination::Tableau(i));
            }
        }
        None
    }

    fn drop_payload(&mut self, payload: DragPayload) {
        let target = self.drop_target(&payload);
        let start = payload.position();
        let DragPayload { cards, origin, .. } = payload;
        match target {
            Some(destination) => self.start_slide(cards, origin.pile_id(), destination, start),
            None => {
                trace!("snap back {} card(s) to {:?}", cards.len(), origin.pile_id());
                match origin {
                    DragOrigin::Waste => self.board.waste.extend(cards),
                    DragOrigin::Tableau { index, mut rest } => {
                        rest.extend(cards);
                        self.board.tableaus[index] = rest;
                    }
                }
            }
        }
    }
}
