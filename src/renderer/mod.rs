//! Vector rendering module
//!
//! The simulation never draws. `draw_frame` reads a `GameState` and issues
//! stroke/text calls on a `Surface`, which the platform layer implements
//! (a 2D canvas on the web).

pub mod shapes;

use glam::Vec2;

use crate::Settings;
use crate::sim::{GamePhase, GameState};

/// Stroke/fill colors used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Yellow,
    Cyan,
}

impl Color {
    pub fn as_css(&self) -> &'static str {
        match self {
            Color::White => "#fff",
            Color::Yellow => "#ff0",
            Color::Cyan => "#0ff",
        }
    }
}

/// Text styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// Score and lives
    Hud,
    /// Big title on the idle screens
    Title,
    /// Prompt under the title
    Prompt,
}

impl Font {
    pub fn as_css(&self) -> &'static str {
        match self {
            Font::Hud => "20px monospace",
            Font::Title => "40px sans-serif",
            Font::Prompt => "24px monospace",
        }
    }
}

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A drawing collaborator. Coordinates are world/plane coordinates.
pub trait Surface {
    /// Wipe the whole frame
    fn clear(&mut self);
    /// Stroke a polyline; `closed` joins the last point back to the first
    fn stroke_path(&mut self, points: &[Vec2], closed: bool, color: Color, line_width: f32);
    /// Stroke a circle outline
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Fill a line of text
    fn fill_text(&mut self, text: &str, pos: Vec2, font: Font, align: Align, color: Color);
}

/// Ship line width
const SHIP_LINE_WIDTH: f32 = 2.0;
/// Default line width for everything else
const LINE_WIDTH: f32 = 1.0;
/// HUD text anchors
const SCORE_POS: Vec2 = Vec2::new(20.0, 30.0);
const LIVES_POS: Vec2 = Vec2::new(20.0, 60.0);

/// Ship outline color; blinks yellow while invulnerable
pub fn ship_color(invulnerable: u32, flicker: bool) -> Color {
    if flicker && invulnerable % 10 > 5 {
        Color::Yellow
    } else {
        Color::White
    }
}

/// Draw one frame of the current state
pub fn draw_frame(state: &GameState, settings: &Settings, surface: &mut impl Surface) {
    surface.clear();

    match state.phase {
        GamePhase::Start | GamePhase::GameOver => draw_title(state.bounds, surface),
        GamePhase::Playing => {
            draw_ship(state, settings, surface);
            for asteroid in &state.asteroids {
                surface.stroke_path(
                    &shapes::asteroid_outline(asteroid),
                    true,
                    Color::White,
                    LINE_WIDTH,
                );
            }
            draw_hud(state, surface);
        }
    }
}

fn draw_title(bounds: Vec2, surface: &mut impl Surface) {
    let center = bounds / 2.0;
    surface.fill_text(
        "ASTEROIDS",
        center - Vec2::new(0.0, 30.0),
        Font::Title,
        Align::Center,
        Color::White,
    );
    surface.fill_text(
        "Press Start Game",
        center + Vec2::new(0.0, 20.0),
        Font::Prompt,
        Align::Center,
        Color::White,
    );
}

fn draw_ship(state: &GameState, settings: &Settings, surface: &mut impl Surface) {
    let ship = &state.ship;
    let color = ship_color(ship.invulnerable, settings.invulnerable_flicker);
    surface.stroke_path(&shapes::ship_hull(ship), true, color, SHIP_LINE_WIDTH);
    if ship.thrust {
        surface.stroke_path(&shapes::thrust_flame(ship), false, Color::Cyan, SHIP_LINE_WIDTH);
    }
    for bullet in &ship.bullets {
        surface.stroke_circle(bullet.pos, bullet.radius, Color::White);
    }
}

fn draw_hud(state: &GameState, surface: &mut impl Surface) {
    surface.fill_text(
        &format!("Score: {}", state.ship.score),
        SCORE_POS,
        Font::Hud,
        Align::Left,
        Color::White,
    );
    surface.fill_text(
        &format!("Lives: {}", state.ship.lives),
        LIVES_POS,
        Font::Hud,
        Align::Left,
        Color::White,
    );
}
