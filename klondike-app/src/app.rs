use eframe::egui;
use egui::{
    Align2, Color32, CornerRadius, Event, FontId, Id, LayerId, Order, Painter, PointerButton,
    Pos2, Rect, Sense, Stroke, StrokeKind, Vec2, vec2,
};
use klondike_common::{
    assets::AssetSet,
    board::{TOTAL_FOUNDATIONS, TOTAL_TABLEAUS},
    card::Card,
    config::{Difficulty, SessionConfig, Theme},
    layout::{BOARD_SIZE, Layout},
    session::{FPS, Session, SessionRequest, reset_session},
    trace,
};

const STEP: f64 = 1.0 / FPS as f64;
const MAX_STEPS_PER_FRAME: u32 = 8; // Drop time instead of fast-forwarding after a stall
const MENU_BACKGROUND: Color32 = Color32::from_rgb(0, 120, 0);
const CARD_FACE: Color32 = Color32::from_gray(248);
const OUTLINE: Color32 = Color32::from_gray(100);
const BUTTON_FILL: Color32 = Color32::from_gray(200);

enum Screen {
    SelectDifficulty,
    Playing(Session),
}

pub struct KlondikeApp {
    assets: AssetSet,
    /// Seed of the first game; later games draw a fresh one.
    seed: Option<u64>,
    theme: Option<Theme>,
    screen: Screen,
    last_time: Option<f64>,
    accumulator: f64,
}

impl eframe::App for KlondikeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        let events = ctx.input(|i| i.events.clone());

        if let Screen::Playing(session) = &self.screen {
            egui::TopBottomPanel::bottom("toolbar").show(ctx, |ui| {
                draw_toolbar(ui, session);
            });
        }

        let background = match &self.screen {
            Screen::SelectDifficulty => MENU_BACKGROUND,
            Screen::Playing(session) => session.theme().background,
        };
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(background))
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(BOARD_SIZE, Sense::hover());
                let origin = response.rect.min.to_vec2();
                if matches!(self.screen, Screen::SelectDifficulty) {
                    self.select_difficulty(&painter, origin, &events);
                } else {
                    self.play(ctx, &painter, origin, &events, now);
                }
            });

        ctx.request_repaint();
    }
}

impl KlondikeApp {
    pub fn new(difficulty: Option<Difficulty>, seed: u64, theme: Option<Theme>) -> Self {
        let mut app = Self {
            assets: AssetSet::default(),
            seed: Some(seed),
            theme,
            screen: Screen::SelectDifficulty,
            last_time: None,
            accumulator: 0.0,
        };
        if let Some(difficulty) = difficulty {
            app.start(difficulty);
        }
        app
    }

    fn start(&mut self, difficulty: Difficulty) {
        let session = match (self.seed.take(), self.theme) {
            (None, None) => reset_session(difficulty, &self.assets),
            (seed, theme) => {
                let mut config =
                    SessionConfig::new(difficulty, seed.unwrap_or_else(rand::random));
                config.theme = theme;
                Session::new(config, &self.assets)
            }
        };
        println!("GameId: {}", session.seed());
        self.screen = Screen::Playing(session);
        self.last_time = None;
        self.accumulator = 0.0;
    }

    fn select_difficulty(&mut self, painter: &Painter, origin: Vec2, events: &[Event]) {
        let layout = Layout::new(&self.assets);
        painter.text(
            Pos2::new(BOARD_SIZE.x / 2.0, 120.0) + origin,
            Align2::CENTER_CENTER,
            "Select Difficulty",
            FontId::proportional(36.0),
            Color32::WHITE,
        );
        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            paint_button(painter, layout.difficulty_button(i).translate(origin), difficulty.name());
        }

        let chosen = events.iter().find_map(|event| match event {
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: true,
                ..
            } => {
                let pos = *pos - origin;
                (0..Difficulty::ALL.len())
                    .find(|&i| layout.difficulty_button(i).contains(pos))
                    .map(|i| Difficulty::ALL[i])
            }
            _ => None,
        });
        if let Some(difficulty) = chosen {
            trace!("difficulty {difficulty} selected");
            self.start(difficulty);
        }
    }

    fn play(
        &mut self,
        ctx: &egui::Context,
        painter: &Painter,
        origin: Vec2,
        events: &[Event],
        now: f64,
    ) {
        let Screen::Playing(session) = &mut self.screen else {
            return;
        };

        let mut request = None;
        for event in events {
            match event {
                Event::PointerMoved(pos) => session.pointer_move(*pos - origin),
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if *pressed {
                        request = request.or(session.pointer_down(*pos - origin));
                    } else {
                        session.pointer_up(*pos - origin);
                    }
                }
                _ => {}
            }
        }

        // Fixed-rate steps whatever the repaint rate.
        let last = self.last_time.replace(now).unwrap_or(now);
        self.accumulator = (self.accumulator + now - last).min(STEP * MAX_STEPS_PER_FRAME as f64);
        while self.accumulator >= STEP {
            session.update();
            self.accumulator -= STEP;
        }

        paint_session(ctx, painter, origin, session, &self.assets);

        if request == Some(SessionRequest::PlayAgain) {
            let difficulty = session.difficulty();
            self.start(difficulty);
        }
    }
}

fn draw_toolbar(ui: &mut egui::Ui, session: &Session) {
    ui.horizontal(|ui| {
        ui.label(format!("Difficulty: {}", session.difficulty()));
        ui.separator();
        ui.label(format!("Theme: {}", session.theme().name));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!("Score: {}", session.score()));
            ui.separator();
            ui.label(format!("Moves: {}", session.move_count()));
            ui.separator();
            let time = session.elapsed_secs();
            let minutes = time / 60;
            let seconds = time % 60;
            ui.label(format!("Time: {:02}:{:02}", minutes.min(99), seconds));
        });
    });
}

fn paint_session(
    ctx: &egui::Context,
    painter: &Painter,
    origin: Vec2,
    session: &Session,
    assets: &AssetSet,
) {
    let layout = session.layout();
    let board = session.board();
    let back = session.theme().card_back;

    let stock = layout.stock_rect().translate(origin);
    if board.stock.is_empty() {
        paint_empty_pile(painter, stock);
    } else {
        paint_card_back(painter, stock, back);
    }

    let shake = origin + vec2(session.shake_offset(), 0.0);
    for (slot, card) in session.waste_shown().iter().enumerate() {
        let rect = layout.card_rect(layout.waste_card_pos(slot)).translate(shake);
        paint_card(painter, rect, card, assets, back);
    }

    for i in 0..TOTAL_FOUNDATIONS {
        let rect = layout.foundation_rect(i).translate(origin);
        match board.foundations[i].last() {
            Some(card) => paint_card(painter, rect, card, assets, back),
            None => paint_empty_pile(painter, rect),
        }
    }

    for i in 0..TOTAL_TABLEAUS {
        let pile = &board.tableaus[i];
        if pile.is_empty() {
            paint_empty_pile(painter, layout.tableau_slot_rect(i).translate(origin));
        }
        for (j, card) in pile.iter().enumerate() {
            let rect = layout.tableau_card_rect(i, pile, j).translate(origin);
            paint_card(painter, rect, card, assets, back);
        }
    }

    paint_button(painter, layout.undo_button().translate(origin), "Undo");

    // Moving cards go above every pile.
    let top = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("moving_cards")));
    for anim in session.animations() {
        let pos = anim.position() + origin;
        for (i, card) in anim.cards.iter().enumerate() {
            let rect = layout.card_rect(pos + layout.fan_offset(anim.destination, i));
            paint_card(&top, rect, card, assets, back);
        }
    }
    if let Some(payload) = session.drag() {
        let pos = payload.position() + origin;
        for (i, card) in payload.cards.iter().enumerate() {
            paint_card(&top, layout.card_rect(pos + layout.run_offset(i)), card, assets, back);
        }
    }

    if session.is_won() {
        let screen = Rect::from_min_size(Pos2::ZERO + origin, BOARD_SIZE);
        top.rect_filled(screen, CornerRadius::ZERO, Color32::from_black_alpha(150));
        top.text(
            screen.center() - vec2(0.0, 30.0),
            Align2::CENTER_CENTER,
            "You Win!",
            FontId::proportional(48.0),
            Color32::WHITE,
        );
        paint_button(&top, layout.play_again_button().translate(origin), "Play Again");
    }
}

fn paint_card(painter: &Painter, rect: Rect, card: &Card, assets: &AssetSet, back: Color32) {
    if !card.face_up {
        paint_card_back(painter, rect, back);
        return;
    }
    painter.rect_filled(rect, CornerRadius::same(5), CARD_FACE);
    painter.rect_stroke(
        rect,
        CornerRadius::same(5),
        Stroke::new(1.0, OUTLINE),
        StrokeKind::Inside,
    );

    let face = assets.face(card);
    let font_id = FontId::proportional(20.0);
    let padding = Vec2::new(4.0, 3.0);
    painter.text(
        rect.min + padding,
        Align2::LEFT_TOP,
        &face.label,
        font_id.clone(),
        face.ink,
    );
    painter.text(
        rect.max - padding,
        Align2::RIGHT_BOTTOM,
        &face.label,
        font_id,
        face.ink,
    );
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        face.symbol,
        FontId::proportional(40.0),
        face.ink,
    );
}

fn paint_card_back(painter: &Painter, rect: Rect, back: Color32) {
    painter.rect_filled(rect, CornerRadius::same(5), back);
    painter.rect_stroke(
        rect.shrink(6.0),
        CornerRadius::same(3),
        Stroke::new(1.0, CARD_FACE),
        StrokeKind::Inside,
    );
    painter.rect_stroke(
        rect,
        CornerRadius::same(5),
        Stroke::new(1.0, OUTLINE),
        StrokeKind::Inside,
    );
}

fn paint_empty_pile(painter: &Painter, rect: Rect) {
    painter.rect_stroke(
        rect,
        CornerRadius::same(5),
        Stroke::new(1.0, OUTLINE),
        StrokeKind::Inside,
    );
}

fn paint_button(painter: &Painter, rect: Rect, label: &str) {
    painter.rect_filled(rect, CornerRadius::same(4), BUTTON_FILL);
    painter.rect_stroke(
        rect,
        CornerRadius::same(4),
        Stroke::new(1.0, OUTLINE),
        StrokeKind::Inside,
    );
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        label,
        FontId::proportional(22.0),
        Color32::BLACK,
    );
}
