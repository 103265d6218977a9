/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  The shooter stage uses logical pixel
/// coordinates, scaled here to whatever terminal size we were given.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use emu_war::entities::{Direction, ObstacleKind, RoundState, RoundStatus};
use emu_war::maze::{Raid, RaidPhase, Tile};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkGreen;
const C_HUD: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_PLAYER_MOVING: Color = Color::Cyan;
const C_EMU: Color = Color::DarkYellow;
const C_EMU_FLASH: Color = Color::Red;
const C_BULLET: Color = Color::Cyan;
const C_ROCK: Color = Color::DarkGrey;
const C_BUSH: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;
const C_WALL: Color = Color::DarkGrey;
const C_PICKUP: Color = Color::Yellow;
const C_EXIT: Color = Color::Magenta;
const C_BANNER: Color = Color::Yellow;

// ── Shooter round ─────────────────────────────────────────────────────────────

/// Map a logical stage position to a terminal cell inside the border.
fn cell(state: &RoundState, tw: u16, th: u16, x: f32, y: f32) -> (u16, u16) {
    let inner_w = tw.saturating_sub(2).max(1) as f32;
    let inner_h = th.saturating_sub(4).max(1) as f32;
    let cx = 1.0 + (x / state.stage.width).clamp(0.0, 1.0) * (inner_w - 1.0);
    let cy = 2.0 + (y / state.stage.height).clamp(0.0, 1.0) * (inner_h - 1.0);
    (cx as u16, cy as u16)
}

/// Render one complete shooter frame.
pub fn render_round<W: Write>(
    out: &mut W,
    state: &RoundState,
    tw: u16,
    th: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, tw, th)?;

    // HUD
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "EMUS {:>2}   DOWNED {:>2}",
        state.emus.len(),
        state.emus_downed
    )))?;
    out.queue(cursor::MoveTo(tw.saturating_sub(38), 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD/arrows move  SPACE shoot  Q quit"))?;

    for obstacle in &state.obstacles {
        let color = match obstacle.kind {
            ObstacleKind::Rock => C_ROCK,
            ObstacleKind::Bush => C_BUSH,
        };
        let glyph = match obstacle.kind {
            ObstacleKind::Rock => '▓',
            ObstacleKind::Bush => '♣',
        };
        let (x0, y0) = cell(
            state,
            tw,
            th,
            obstacle.x - obstacle.w / 2.0,
            obstacle.y - obstacle.h / 2.0,
        );
        let (x1, y1) = cell(
            state,
            tw,
            th,
            obstacle.x + obstacle.w / 2.0,
            obstacle.y + obstacle.h / 2.0,
        );
        out.queue(style::SetForegroundColor(color))?;
        for row in y0..=y1 {
            out.queue(cursor::MoveTo(x0, row))?;
            out.queue(Print(
                glyph.to_string().repeat((x1 - x0 + 1) as usize),
            ))?;
        }
    }

    out.queue(style::SetForegroundColor(C_BULLET))?;
    for bullet in &state.bullets {
        let (col, row) = cell(state, tw, th, bullet.x, bullet.y);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print('•'))?;
    }

    for emu in &state.emus {
        let color = if emu.flash_ticks > 0 { C_EMU_FLASH } else { C_EMU };
        let (col, row) = cell(state, tw, th, emu.x, emu.y);
        out.queue(style::SetForegroundColor(color))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print('Ɛ'))?;
    }

    let glyph = match state.player.facing {
        Direction::Up => '▲',
        Direction::Down => '▼',
        Direction::Left => '◀',
        Direction::Right => '▶',
    };
    let color = if state.player.is_moving {
        C_PLAYER_MOVING
    } else {
        C_PLAYER
    };
    let (col, row) = cell(state, tw, th, state.player.x, state.player.y);
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(glyph))?;

    if state.status == RoundStatus::Cleared {
        draw_banner(out, tw, th, "ROUND CLEAR — R for menu")?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, th.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, tw: u16, th: u16) -> std::io::Result<()> {
    let w = tw as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    for row in 2..th.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print('│'))?;
        out.queue(cursor::MoveTo(tw.saturating_sub(1), row))?;
        out.queue(Print('│'))?;
    }
    out.queue(cursor::MoveTo(0, th.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;
    Ok(())
}

fn draw_banner<W: Write>(out: &mut W, tw: u16, th: u16, text: &str) -> std::io::Result<()> {
    let col = (tw / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, th / 2))?;
    out.queue(style::SetForegroundColor(C_BANNER))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Maze raid ─────────────────────────────────────────────────────────────────

/// Render one maze-raid frame.  Each tile is two terminal columns wide so
/// the maze reads roughly square.
pub fn render_raid<W: Write>(out: &mut W, raid: &Raid, tw: u16, th: u16) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "TIME {:>3}   EGGS {}",
        raid.time_remaining(),
        raid.pickups_collected()
    )))?;
    out.queue(cursor::MoveTo(tw.saturating_sub(30), 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD/arrows move  Q quit"))?;

    let maze = &raid.maze;
    let x0 = (tw / 2).saturating_sub(maze.width as u16);
    let y0 = (th / 2).saturating_sub(maze.height as u16 / 2);

    for row in 0..maze.height {
        out.queue(cursor::MoveTo(x0, y0 + row as u16))?;
        for col in 0..maze.width {
            let (text, color) = match maze.tile(col, row) {
                Tile::Wall => ("██", C_WALL),
                Tile::Path => ("  ", C_WALL),
                Tile::Start => ("··", C_HINT),
                Tile::Exit => ("[]", C_EXIT),
                Tile::Pickup => ("◆ ", C_PICKUP),
            };
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(text))?;
        }
    }

    let (pc, pr) = raid.player();
    out.queue(cursor::MoveTo(x0 + pc as u16 * 2, y0 + pr as u16))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print('@'))?;

    match raid.phase() {
        RaidPhase::Won => draw_banner(out, tw, th, "ESCAPED WITH THE EGGS — R for menu")?,
        RaidPhase::Lost => draw_banner(out, tw, th, "TIME'S UP — R for menu")?,
        RaidPhase::Active => {}
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, th.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}
