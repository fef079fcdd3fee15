use std::f32::consts::PI;

use egui::{Pos2, lerp, pos2};

use crate::{board::PileId, card::Run};

pub const DRAW_FRAMES: u32 = 15;
pub const MOVE_FRAMES: u32 = 10;
pub const SHAKE_FRAMES: u32 = 20;
const SHAKE_AMPLITUDE: f32 = 20.0;
const SHAKE_PERIOD: f32 = 10.0; // frames per swing

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Foundation(usize),
    Tableau(usize),
    Waste,
}

impl From<Destination> for PileId {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Foundation(i) => PileId::Foundation(i),
            Destination::Tableau(i) => PileId::Tableau(i),
            Destination::Waste => PileId::Waste,
        }
    }
}

/// Slow start, slow stop.
pub fn ease(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    0.5 - (PI * t).cos() / 2.0
}

/// Cards sliding from `origin` to `destination`. While in flight they belong to
/// no pile.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub cards: Run,
    pub origin: PileId,
    pub destination: Destination,
    pub start: Pos2,
    pub end: Pos2,
    pub elapsed: u32,
    pub duration: u32,
}

impl Animation {
    pub fn new(cards: Run, origin: PileId, destination: Destination, start: Pos2, end: Pos2) -> Self {
        let duration = match origin {
            PileId::Stock => DRAW_FRAMES,
            _ => MOVE_FRAMES,
        };
        Self {
            cards,
            origin,
            destination,
            start,
            end,
            elapsed: 0,
            duration,
        }
    }

    pub fn progress(&self) -> f32 {
        self.elapsed as f32 / self.duration as f32
    }

    /// Top-left corner of the first card at the current frame.
    pub fn position(&self) -> Pos2 {
        let t = ease(self.progress());
        pos2(
            lerp(self.start.x..=self.end.x, t),
            lerp(self.start.y..=self.end.y, t),
        )
    }

    pub fn tick(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Wobble of the waste pile after a card there found no home.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shake {
    elapsed: u32,
}

impl Shake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal draw offset of the waste pile, in pixels.
    pub fn offset(&self) -> f32 {
        SHAKE_AMPLITUDE * (2.0 * PI * self.elapsed as f32 / SHAKE_PERIOD).sin()
    }

    pub fn tick(&mut self) {
        self.elapsed += 1;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= SHAKE_FRAMES
    }
}
