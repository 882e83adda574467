//! Drawing capability and frame composition
//!
//! The game never touches pixels directly. `draw_frame` walks the world in a
//! fixed layer order and issues primitive calls on a `RenderSurface`:
//! background, bricks, power-ups, paddle, balls, particles, then the HUD and
//! any overlay notice on top.

use glam::Vec2;

use crate::consts::*;
use crate::game::Notice;
use crate::sim::{GameState, PowerUpKind, Rect};

/// RGBA color (alpha 0-1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    /// Opaque color from 0xRRGGBB
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string for canvas fill styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Palette
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::hex(0x0b0f17);
    pub const PADDLE: Color = Color::hex(0x5aaaff);
    pub const BALL: Color = Color::hex(0xff4d4d);
    pub const BRICK_HP3: Color = Color::hex(0xff6b6b);
    pub const BRICK_HP2: Color = Color::hex(0xffd166);
    pub const BRICK_HP1: Color = Color::hex(0x5fffb0);
    pub const PARTICLE: Color = Color::hex(0x9ecbff).with_alpha(0.6);
    pub const TEXT: Color = Color::hex(0xe6edf3);
    pub const OVERLAY: Color = Color::hex(0x000000).with_alpha(0.55);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Pixels
    pub size: f32,
    pub bold: bool,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            bold: false,
            color,
            align: TextAlign::Left,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn align(self, align: TextAlign) -> Self {
        Self { align, ..self }
    }

    /// CSS font shorthand
    pub fn to_css_font(&self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{}{}px sans-serif", weight, self.size)
    }
}

/// Pixel surface capability
pub trait RenderSurface {
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// `position` is the text anchor; text is vertically centered on it
    fn draw_text(&mut self, text: &str, position: Vec2, style: &TextStyle);
}

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect(Rect, Color),
    FillCircle(Vec2, f32, Color),
    Text(String, Vec2, TextStyle),
}

/// Surface that records calls instead of drawing (headless runs, tests)
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(text, _, _) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl RenderSurface for DrawList {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle(center, radius, color));
    }

    fn draw_text(&mut self, text: &str, position: Vec2, style: &TextStyle) {
        self.commands
            .push(DrawCommand::Text(text.to_string(), position, *style));
    }
}

pub fn brick_color(hp: u8) -> Color {
    match hp {
        3.. => palette::BRICK_HP3,
        2 => palette::BRICK_HP2,
        _ => palette::BRICK_HP1,
    }
}

pub fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::ExtraLife => Color::hex(0x5fffb0),
        PowerUpKind::ExpandPaddle => Color::hex(0x5aaaff),
        PowerUpKind::MultiBall => Color::hex(0xffd166),
        PowerUpKind::SpeedUp => Color::hex(0xff6b6b),
    }
}

const PARTICLE_RADIUS: f32 = 2.0;

/// Draw one complete frame
pub fn draw_frame(
    surface: &mut dyn RenderSurface,
    state: &GameState,
    best: u64,
    notice: Option<&Notice>,
) {
    surface.clear();

    // Background
    surface.fill_rect(
        Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT),
        palette::BACKGROUND,
    );

    // Bricks (destroyed ones are skipped)
    for brick in state.bricks.alive() {
        surface.fill_rect(brick.rect, brick_color(brick.hp));
    }

    // Power-ups with their badge letter
    let badge_style = TextStyle::new(12.0, palette::BACKGROUND)
        .bold()
        .align(TextAlign::Center);
    for power_up in state.power_ups.iter().filter(|p| p.active) {
        let rect = power_up.rect();
        surface.fill_rect(rect, power_up_color(power_up.kind));
        surface.draw_text(power_up.kind.badge(), rect.center(), &badge_style);
    }

    surface.fill_rect(state.paddle.rect(), palette::PADDLE);

    for ball in &state.balls {
        surface.fill_circle(ball.pos, ball.radius, palette::BALL);
    }

    for particle in &state.particles {
        surface.fill_circle(particle.pos, PARTICLE_RADIUS, palette::PARTICLE);
    }

    draw_hud(surface, state, best);

    if let Some(notice) = notice {
        draw_notice(surface, notice);
    }
}

fn draw_hud(surface: &mut dyn RenderSurface, state: &GameState, best: u64) {
    let style = TextStyle::new(14.0, palette::TEXT);
    let y = 18.0;
    surface.draw_text(&format!("Score: {}", state.score), Vec2::new(10.0, y), &style);
    surface.draw_text(
        &format!("Lives: {}", state.lives),
        Vec2::new(WORLD_WIDTH * 0.35, y),
        &style,
    );
    surface.draw_text(
        &format!("Level: {}", state.level),
        Vec2::new(WORLD_WIDTH * 0.6, y),
        &style,
    );
    surface.draw_text(
        &format!("Best: {}", best),
        Vec2::new(WORLD_WIDTH - 10.0, y),
        &style.align(TextAlign::Right),
    );
}

fn draw_notice(surface: &mut dyn RenderSurface, notice: &Notice) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT),
        palette::OVERLAY,
    );
    let center = Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0);
    surface.draw_text(
        &notice.title,
        center - Vec2::new(0.0, 16.0),
        &TextStyle::new(28.0, palette::TEXT)
            .bold()
            .align(TextAlign::Center),
    );
    surface.draw_text(
        &notice.message,
        center + Vec2::new(0.0, 18.0),
        &TextStyle::new(14.0, palette::TEXT).align(TextAlign::Center),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Particle, PowerUp};

    #[test]
    fn test_css_colors() {
        assert_eq!(palette::BACKGROUND.to_css(), "#0b0f17");
        assert_eq!(palette::PARTICLE.to_css(), "rgba(158, 203, 255, 0.6)");
        assert_eq!(
            TextStyle::new(12.0, palette::TEXT).bold().to_css_font(),
            "bold 12px sans-serif"
        );
    }

    #[test]
    fn test_brick_colors_by_hp() {
        assert_eq!(brick_color(3), palette::BRICK_HP3);
        assert_eq!(brick_color(2), palette::BRICK_HP2);
        assert_eq!(brick_color(1), palette::BRICK_HP1);
    }

    #[test]
    fn test_layer_order() {
        let mut state = GameState::new(5);
        state
            .power_ups
            .push(PowerUp::centered_at(Vec2::new(100.0, 200.0), PowerUpKind::SpeedUp));
        state.particles.push(Particle {
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::ZERO,
            life: 5,
        });

        let mut list = DrawList::new();
        draw_frame(&mut list, &state, 0, None);

        let cmds = &list.commands;
        assert_eq!(cmds[0], DrawCommand::Clear);
        assert!(matches!(cmds[1], DrawCommand::FillRect(_, c) if c == palette::BACKGROUND));

        let position = |pred: &dyn Fn(&DrawCommand) -> bool| {
            cmds.iter().position(|c| pred(c)).expect("command drawn")
        };
        let fill_rect = |color: Color| {
            position(&|c| matches!(c, DrawCommand::FillRect(_, col) if *col == color))
        };
        let fill_circle = |color: Color| {
            position(&|c| matches!(c, DrawCommand::FillCircle(_, _, col) if *col == color))
        };
        let brick = fill_rect(palette::BRICK_HP1);
        let power_up = fill_rect(power_up_color(PowerUpKind::SpeedUp));
        let paddle = fill_rect(palette::PADDLE);
        let ball = fill_circle(palette::BALL);
        let particle = fill_circle(palette::PARTICLE);

        assert!(brick < power_up);
        assert!(power_up < paddle);
        assert!(paddle < ball);
        assert!(ball < particle);
    }

    #[test]
    fn test_destroyed_bricks_not_drawn() {
        let mut state = GameState::new(5);
        let total = state.bricks.remaining();
        if let Some(brick) = state.bricks.get_mut(0, 0) {
            brick.hp = 0;
        }
        let mut list = DrawList::new();
        draw_frame(&mut list, &state, 0, None);
        let bricks_drawn = list
            .commands
            .iter()
            .filter(|c| {
                matches!(c, DrawCommand::FillRect(_, col)
                    if [palette::BRICK_HP1, palette::BRICK_HP2, palette::BRICK_HP3].contains(col))
            })
            .count();
        assert_eq!(bricks_drawn, total - 1);
    }

    #[test]
    fn test_hud_and_notice() {
        let state = GameState::new(5);
        let notice = Notice::new("Paused", "Press P to resume");
        let mut list = DrawList::new();
        draw_frame(&mut list, &state, 420, Some(&notice));

        let texts: Vec<&str> = list.texts().collect();
        assert!(texts.contains(&"Score: 0"));
        assert!(texts.contains(&"Lives: 3"));
        assert!(texts.contains(&"Level: 1"));
        assert!(texts.contains(&"Best: 420"));
        assert_eq!(texts[texts.len() - 2..], ["Paused", "Press P to resume"]);
    }
}
