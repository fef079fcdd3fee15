use std::{fmt, str::FromStr};

use anyhow::{Context, Result, bail};
use egui::Color32;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Cards taken from the stock per click.
    pub fn draw_count(self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
        }
    }

    /// Waste cards shown fanned out.
    pub fn waste_display_count(self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(value))
            .with_context(|| format!("Unknown difficulty '{value}' (expected easy, medium or hard)"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color32,
    pub card_back: Color32,
}

pub const THEMES: [Theme; 10] = [
    Theme::new("Basic", (0, 120, 0), (50, 50, 200)),
    Theme::new("Casino", (100, 0, 0), (0, 0, 0)),
    Theme::new("Pirate", (139, 69, 19), (255, 215, 0)),
    Theme::new("Blue", (0, 0, 100), (0, 128, 255)),
    Theme::new("Future", (70, 70, 70), (200, 200, 200)),
    Theme::new("Dinosaur", (34, 139, 34), (107, 142, 35)),
    Theme::new("Gold", (218, 165, 32), (255, 215, 0)),
    Theme::new("Tiger", (255, 140, 0), (255, 69, 0)),
    Theme::new("Alien", (75, 0, 130), (148, 0, 211)),
    Theme::new("One Piece", (0, 191, 255), (255, 215, 0)),
];

impl Theme {
    const fn new(name: &'static str, bg: (u8, u8, u8), back: (u8, u8, u8)) -> Self {
        Self {
            name,
            background: Color32::from_rgb(bg.0, bg.1, bg.2),
            card_back: Color32::from_rgb(back.0, back.1, back.2),
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        THEMES[rng.random_range(0..THEMES.len())]
    }

    pub fn by_name(name: &str) -> Result<Self> {
        let name = name.trim();
        if let Some(theme) = THEMES.iter().find(|t| t.name.eq_ignore_ascii_case(name)) {
            return Ok(*theme);
        }
        let known = THEMES.map(|t| t.name).join(", ");
        bail!("Unknown theme '{name}' (expected one of: {known})")
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Theme::by_name(s)
    }
}

/// Everything that fixes a deal: same config, same game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub seed: u64,
    /// `None` picks a palette entry from the seed.
    pub theme: Option<Theme>,
}

impl SessionConfig {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            seed,
            theme: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_difficulty_settings() {
        let counts: Vec<_> = Difficulty::ALL
            .iter()
            .map(|d| (d.draw_count(), d.waste_display_count()))
            .collect();
        assert_eq!(counts, vec![(1, 1), (3, 2), (5, 3)]);
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!(" hard ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        let err = "expert".parse::<Difficulty>().unwrap_err();
        assert!(err.to_string().contains("expert"));
    }

    #[test]
    fn test_theme_by_name() {
        let theme = Theme::by_name("one piece").unwrap();
        assert_eq!(theme.name, "One Piece");
        assert_eq!(theme.background, Color32::from_rgb(0, 191, 255));
        let err = Theme::by_name("Neon").unwrap_err();
        assert!(err.to_string().contains("Casino"));
    }

    #[test]
    fn test_random_theme_is_from_palette() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let theme = Theme::random(&mut rng);
            assert!(THEMES.contains(&theme));
        }
    }
}
