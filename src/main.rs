mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use emu_war::compute::{init_round, player_shoot, tick, HUD_OFFSET, STAGE_HEIGHT, STAGE_WIDTH};
use emu_war::entities::{Direction, HeldKeys, RoundStatus, Stage};
use emu_war::maze::{self, Raid, RaidPhase, MAZE_HEIGHT, MAZE_WIDTH, PICKUP_COUNT, RAID_SECONDS};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// Min frames between shots while Space is held.
/// 8 frames @ 30 FPS ≈ 3.75 shots/sec.
const SHOOT_COOLDOWN: u32 = 8;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Shooter,
    Raid,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  GREAT  EMU  WAR  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Pick your battle:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Farm Defense", Color::Green,   "hold the paddock, down the emus"),
        ("2", "Egg Raid    ", Color::Magenta, "grab the eggs, find the exit in time"),
    ];
    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<14}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("WASD / arrows : Move   SPACE : Shoot   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Shooter),
                KeyCode::Char('2') => return Ok(MenuResult::Raid),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

fn show_message<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(
        (width / 2).saturating_sub(text.chars().count() as u16 / 2),
        height / 2,
    ))?;
    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(Print(text))?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    std::thread::sleep(Duration::from_secs(2));
    Ok(())
}

// ── Shooter loop ──────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: instead of acting on each key event individually, we keep a
/// `key_frame` map recording the frame number of the last press/repeat for
/// every key.  Each frame we check which keys are still "fresh" (within
/// `HOLD_WINDOW` frames) and feed the whole held set into the tick at once,
/// so diagonal movement and move-while-shooting just work.
fn shooter_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let stage = Stage {
        width: STAGE_WIDTH,
        height: STAGE_HEIGHT,
        hud_offset: HUD_OFFSET,
    };
    let mut state = match init_round(stage, &mut rng) {
        Ok(state) => state,
        Err(e) => {
            show_message(out, &format!("round setup failed: {}", e))?;
            return Ok(false);
        }
    };

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut shoot_cooldown: u32 = 0;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status == RoundStatus::Cleared =>
                        {
                            return Ok(false);
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so the key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove the key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        if state.status == RoundStatus::Active {
            let held = HeldKeys {
                up: any_held(
                    &key_frame,
                    &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
                    frame,
                ),
                down: any_held(
                    &key_frame,
                    &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
                    frame,
                ),
                left: any_held(
                    &key_frame,
                    &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                    frame,
                ),
                right: any_held(
                    &key_frame,
                    &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                    frame,
                ),
            };

            // Shooting — throttled so holding Space doesn't flood the stage
            if shoot_cooldown == 0 && is_held(&key_frame, &KeyCode::Char(' '), frame) {
                state = player_shoot(&state);
                shoot_cooldown = SHOOT_COOLDOWN;
            }
            shoot_cooldown = shoot_cooldown.saturating_sub(1);

            state = tick(&state, &held, &mut rng);
        }

        let (tw, th) = terminal::size()?;
        display::render_round(out, &state, tw, th)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Maze-raid loop ────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Movement is discrete: one grid step per key press, no held-key logic.
/// The countdown runs off its own 1-second wall clock, independent of the
/// render cadence — if a frame stalls, the catch-up loop fires the tick as
/// many times as needed.
fn raid_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let maze = match maze::generate(MAZE_WIDTH, MAZE_HEIGHT, PICKUP_COUNT, &mut rng) {
        Ok(maze) => maze,
        Err(e) => {
            show_message(out, &format!("maze setup failed: {}", e))?;
            return Ok(false);
        }
    };
    let mut raid = Raid::new(maze, RAID_SECONDS);

    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();

        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if kind != KeyEventKind::Press && kind != KeyEventKind::Repeat {
                continue;
            }
            let dir = match code {
                KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
                KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    Some(Direction::Right)
                }
                _ => None,
            };
            if let Some(dir) = dir {
                // Blocked / picked-up / won all come back through the outcome;
                // the raid ignores input after a terminal phase on its own.
                let _ = raid.move_player(dir);
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true);
                }
                KeyCode::Char('r') | KeyCode::Char('R')
                    if raid.phase() != RaidPhase::Active =>
                {
                    return Ok(false);
                }
                _ => {}
            }
        }

        // Catch up on the countdown, once per elapsed second
        while last_tick.elapsed() >= Duration::from_secs(1) {
            let _ = raid.tick();
            last_tick += Duration::from_secs(1);
        }

        let (tw, th) = terminal::size()?;
        display::render_raid(out, &raid, tw, th)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loops never block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    loop {
        let quit = match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Shooter => shooter_loop(out, rx)?,
            MenuResult::Raid => raid_loop(out, rx)?,
        };
        if quit {
            break;
        }
    }
    Ok(())
}
