//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable
//! [`RenderSnapshot`]. The world is continuous (`width` x `height` units);
//! every position is projected onto the terminal cells inside the border.
//! No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use retro_shooter::entities::{GameStatus, Palette, PowerUpKind};
use retro_shooter::geometry::Vec2;
use retro_shooter::snapshot::{Hud, RenderSnapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BORDER_FLASH: Color = Color::White;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HP: Color = Color::Red;
const C_HUD_SHIELD: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_PLAYER_BLINK: Color = Color::DarkGrey;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;

fn palette_color(palette: Palette) -> Color {
    match palette {
        Palette::White => Color::White,
        Palette::Red => Color::Red,
        Palette::Green => Color::Green,
        Palette::Blue => Color::Blue,
        Palette::Yellow => Color::Yellow,
        Palette::Gray => Color::Grey,
        Palette::Orange => Color::DarkYellow,
        Palette::Purple => Color::Magenta,
        Palette::Cyan => Color::Cyan,
    }
}

// ── Projection ────────────────────────────────────────────────────────────────

/// Terminal area the world is drawn into: row 0 is the HUD, rows 1 and
/// `rows - 2` are the border, the last row holds the controls hint.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    cols: u16,
    rows: u16,
    world_w: f32,
    world_h: f32,
    shake: (i32, i32),
}

impl Viewport {
    fn new(snap: &RenderSnapshot<'_>) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            cols,
            rows,
            world_w: snap.width,
            world_h: snap.height,
            shake: (snap.shake_offset.0.signum(), snap.shake_offset.1.signum()),
        })
    }

    fn inner_cols(&self) -> f32 {
        f32::from(self.cols.saturating_sub(2).max(1))
    }

    fn inner_rows(&self) -> f32 {
        f32::from(self.rows.saturating_sub(4).max(1))
    }

    /// The cell a world position falls in, if it is on screen.
    fn cell(&self, pos: Vec2) -> Option<(u16, u16)> {
        let col = (pos.x / self.world_w * self.inner_cols()).floor() as i32 + 1 + self.shake.0;
        let row = (pos.y / self.world_h * self.inner_rows()).floor() as i32 + 2 + self.shake.1;
        let max_col = i32::from(self.cols) - 2;
        let max_row = i32::from(self.rows) - 3;
        if (1..=max_col).contains(&col) && (2..=max_row).contains(&row) {
            Some((col as u16, row as u16))
        } else {
            None
        }
    }

    fn center_col(&self) -> u16 {
        self.cols / 2
    }

    fn center_row(&self) -> u16 {
        self.rows / 2
    }
}

fn put<W: Write>(
    out: &mut W,
    view: &Viewport,
    pos: Vec2,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(pos) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    color: Color,
    text: &str,
) -> std::io::Result<()> {
    let col = view
        .center_col()
        .saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snap: &RenderSnapshot<'_>) -> std::io::Result<()> {
    let view = Viewport::new(snap)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let screen = match snap.status {
        GameStatus::Help => snap.help_origin,
        status => status,
    };
    match screen {
        GameStatus::Menu => draw_menu(out, &view, &snap.hud)?,
        _ => {
            draw_border(out, &view, snap.bomb_flash)?;
            draw_hud(out, &view, &snap.hud)?;
            draw_world(out, &view, snap)?;
            draw_controls_hint(out, &view)?;
        }
    }

    match snap.status {
        GameStatus::Help => draw_help(out, &view)?,
        GameStatus::Paused => draw_paused(out, &view)?,
        GameStatus::GameOver => draw_game_over(out, &view, &snap.hud)?,
        GameStatus::Playing if snap.stage_banner => {
            let banner = format!("== STAGE {} ==", snap.hud.stage);
            centered(out, &view, view.center_row().saturating_sub(4), Color::Yellow, &banner)?;
        }
        _ => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport, flash: bool) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(if flash { C_BORDER_FLASH } else { C_BORDER }))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, hud: &Hud) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>6}  Hi:{:>6}  Stage:{}",
        hud.score, hud.high_score, hud.stage
    )))?;

    // Boss health, centred
    if let Some((hp, max_hp, phase)) = hud.boss {
        let filled = (hp.max(0) * 10 / max_hp.max(1)) as usize;
        let bar = format!(
            "BOSS P{} [{}{}]",
            phase,
            "█".repeat(filled.min(10)),
            "·".repeat(10 - filled.min(10))
        );
        let col = view.center_col().saturating_sub(bar.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(Color::Magenta))?;
        out.queue(Print(&bar))?;
    }

    let hearts = "♥".repeat(hud.hp.max(0) as usize);
    let shields = "◆".repeat(hud.shield.max(0) as usize);
    let abilities = format!(
        " W{} B{} {}{}",
        hud.weapon_tier,
        hud.bombs,
        if hud.loop_ready { "LOOP " } else { "" },
        if hud.autopilot { "AUTO" } else { "" },
    );
    let width = hearts.chars().count() + shields.chars().count() + abilities.chars().count() + 1;
    out.queue(cursor::MoveTo(view.cols.saturating_sub(width as u16 + 1), 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(&hearts))?;
    out.queue(Print(" "))?;
    out.queue(style::SetForegroundColor(C_HUD_SHIELD))?;
    out.queue(Print(&shields))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(&abilities))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Arrow pointing along a heading in degrees (y grows downward).
fn heading_glyph(angle: f32) -> &'static str {
    const ARROWS: [&str; 8] = ["→", "↘", "↓", "↙", "←", "↖", "↑", "↗"];
    let sector = ((angle.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    ARROWS[sector]
}

fn power_up_glyph(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::Weapon => "W",
        PowerUpKind::Health => "+",
        PowerUpKind::Shield => "S",
        PowerUpKind::Bomb => "B",
    }
}

fn draw_world<W: Write>(out: &mut W, view: &Viewport, snap: &RenderSnapshot<'_>) -> std::io::Result<()> {
    for particle in snap
        .particles
        .iter()
        .chain(snap.explosions.iter().flat_map(|e| e.particles.iter()))
    {
        let glyph = if particle.drawn_size() > 2 { "*" } else { "·" };
        put(out, view, particle.pos, palette_color(particle.color), glyph)?;
    }

    for asteroid in snap.asteroids {
        let glyph = if asteroid.radius > 10 { "@" } else { "o" };
        put(out, view, asteroid.pos, Color::Grey, glyph)?;
    }

    for power_up in snap.power_ups {
        let color = palette_color(power_up.kind.color());
        put(out, view, power_up.pos, color, power_up_glyph(power_up.kind))?;
    }

    for enemy in snap.enemies {
        let glyph = enemy.tier.to_string();
        put(out, view, enemy.pos, palette_color(Palette::for_tier(enemy.tier)), &glyph)?;
    }

    if let Some(boss) = snap.boss {
        let color = match boss.phase {
            1 => Color::Magenta,
            2 => Color::DarkYellow,
            _ => Color::Red,
        };
        // Sprite spans the boss's collision radius horizontally.
        let half = Vec2::new(boss.size, 0.0);
        put(out, view, boss.pos - half, color, "<")?;
        put(out, view, boss.pos, color, "◆")?;
        put(out, view, boss.pos + half, color, ">")?;
    }

    for bullet in snap.enemy_bullets {
        let glyph = if bullet.is_homing() { "◉" } else { "•" };
        put(out, view, bullet.pos, palette_color(Palette::for_tier(bullet.tier)), glyph)?;
    }

    for bullet in snap.bullets {
        put(out, view, bullet.pos, C_BULLET_PLAYER, "·")?;
    }

    let player = snap.player;
    let color = if snap.player_invincible { C_PLAYER_BLINK } else { C_PLAYER };
    let glyph = if player.is_looping() { "⟲" } else { heading_glyph(player.angle) };
    put(out, view, player.pos, color, glyph)?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←→ Turn  ↑↓ Thrust  U Loop  B Bomb  A Auto  ESC Pause  H Help  Q Quit"))?;
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, view: &Viewport, hud: &Hud) -> std::io::Result<()> {
    let cy = view.center_row();
    centered(out, view, cy.saturating_sub(4), C_TITLE, "★  RETRO  SHOOTER  ★")?;
    if hud.high_score > 0 {
        let best = format!("Best Score: {}", hud.high_score);
        centered(out, view, cy.saturating_sub(2), C_HUD_SCORE, &best)?;
    }
    centered(out, view, cy, Color::White, "ENTER - Start")?;
    centered(out, view, cy + 1, Color::White, "H - Help")?;
    centered(out, view, cy + 2, C_HINT, "Q / ESC - Quit")?;
    Ok(())
}

fn draw_help<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════ HELP ════════════╗", Color::Cyan),
        ("  ← →     rotate the ship", Color::White),
        ("  ↑ ↓     thrust up / down", Color::White),
        ("  U       loop (brief invincibility)", Color::White),
        ("  B       bomb (clears the screen)", Color::White),
        ("  A       toggle autopilot", Color::White),
        ("  ESC     pause / back", Color::White),
        ("  Guns fire automatically.", C_HINT),
        ("  W weapon  + health  S shield  B bomb", C_HINT),
        ("╚══════════════════════════════╝", Color::Cyan),
    ];
    let start = view.center_row().saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        centered(out, view, start + i as u16, *color, text)?;
    }
    Ok(())
}

fn draw_paused<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let cy = view.center_row();
    centered(out, view, cy.saturating_sub(1), Color::Yellow, "║  PAUSED  ║")?;
    centered(out, view, cy + 1, C_HINT, "ESC - Resume   H - Help   Q - Quit")?;
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, hud: &Hud) -> std::io::Result<()> {
    let new_best = hud.score >= hud.high_score && hud.score > 0;
    let score_line = format!("Final Score: {:>6}", hud.score);
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", hud.high_score)
    } else {
        format!("Best Score:  {:>6}", hud.high_score)
    };

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let start_row = view.center_row().saturating_sub(3);
    for (i, (msg, color)) in lines.iter().enumerate() {
        centered(out, view, start_row + i as u16, *color, msg)?;
    }

    let score_row = start_row + lines.len() as u16;
    centered(out, view, score_row, Color::Yellow, &score_line)?;
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };
    centered(out, view, score_row + 1, best_color, &best_line)?;
    centered(out, view, score_row + 2, Color::White, "ENTER - Menu  Q - Quit")?;

    Ok(())
}
