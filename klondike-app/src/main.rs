#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

mod app;

use crate::app::KlondikeApp;

use clap::Parser;
use klondike_common::{
    config::{Difficulty, Theme},
    layout::BOARD_SIZE,
};

const TOOLBAR_HEIGHT: f32 = 30.0;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// easy (draw 1), medium (draw 3) or hard (draw 5); asks when omitted
    #[arg(short, long, value_name = "LEVEL")]
    difficulty: Option<Difficulty>,
    /// Seed of the first deal, for replaying a game
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,
    /// Color theme (e.g. Casino, Alien); random when omitted
    #[arg(short, long, value_name = "NAME")]
    theme: Option<Theme>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([BOARD_SIZE.x, BOARD_SIZE.y + TOOLBAR_HEIGHT])
            .with_resizable(false),
        ..Default::default()
    };

    let app = KlondikeApp::new(cli.difficulty, seed, cli.theme);

    eframe::run_native(
        "Klondike Solitaire",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app; {e}"))?;

    Ok(())
}
