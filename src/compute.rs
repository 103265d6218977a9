/// Pure shooter-round logic.
///
/// Every public function takes an immutable reference to the current
/// `RoundState` (and, where needed, an RNG handle) and returns a brand-new
/// value.  Side effects are limited to the injected RNG, so a seeded RNG
/// replays a round exactly.

use rand::Rng;

use crate::entities::{
    Bullet, Direction, Emu, HeldKeys, Obstacle, ObstacleKind, Player, RoundState, RoundStatus,
    Stage,
};
use crate::error::Result;
use crate::geometry::{hits_any, BoundingBox};
use crate::spawn::find_safe_spawn;

// ── Stage & entity constants ─────────────────────────────────────────────────

/// Logical stage size in pixels; the renderer scales to the terminal.
pub const STAGE_WIDTH: f32 = 640.0;
pub const STAGE_HEIGHT: f32 = 360.0;
/// Space reserved at the top of the stage for the HUD.
pub const HUD_OFFSET: f32 = 40.0;

pub const PLAYER_W: f32 = 24.0;
pub const PLAYER_H: f32 = 24.0;
pub const PLAYER_SPEED: f32 = 4.0;

/// Bullet hit box — a fixed small rectangle regardless of sprite rotation.
pub const BULLET_W: f32 = 8.0;
pub const BULLET_H: f32 = 12.0;
pub const BULLET_SPEED: f32 = 10.0;
/// Radius used for the bullet-vs-emu distance check.
pub const BULLET_HIT_RADIUS: f32 = 5.0;

pub const EMU_RADIUS: f32 = 12.0;
pub const EMU_SPEED: f32 = 2.0;
pub const EMU_MAX_HITS: u32 = 3;
/// Cosmetic hit-flash duration in ticks.
pub const EMU_FLASH_TICKS: u32 = 6;
/// Wander direction is held for a random `EMU_HOLD_MIN..=EMU_HOLD_MAX` ticks.
pub const EMU_HOLD_MIN: u32 = 30;
pub const EMU_HOLD_MAX: u32 = 89;

const EMU_COUNT: usize = 6;
const OBSTACLE_COUNT: usize = 8;
const OBSTACLE_MIN_SIZE: f32 = 20.0;
const OBSTACLE_MAX_SIZE: f32 = 56.0;
/// The player spawns somewhere in this band above the bottom edge.
const PLAYER_BAND: f32 = 60.0;

fn direction_step(x: f32, y: f32, dir: Direction, speed: f32) -> (f32, f32) {
    match dir {
        Direction::Up => (x, y - speed),
        Direction::Down => (x, y + speed),
        Direction::Left => (x - speed, y),
        Direction::Right => (x + speed, y),
    }
}

// ── Round setup ──────────────────────────────────────────────────────────────

/// Build a fresh round: random obstacles, safe-spawned emus across the
/// arena, the player safe-spawned in a bottom band.  Fails with a
/// `SetupError` if the arena is too saturated to place everyone.
pub fn init_round(stage: Stage, rng: &mut impl Rng) -> Result<RoundState> {
    // Obstacles may overlap each other; nothing ever tests that.
    let mut obstacles = Vec::with_capacity(OBSTACLE_COUNT);
    for _ in 0..OBSTACLE_COUNT {
        let kind = if rng.gen_bool(0.5) {
            ObstacleKind::Rock
        } else {
            ObstacleKind::Bush
        };
        let w = rng.gen_range(OBSTACLE_MIN_SIZE..=OBSTACLE_MAX_SIZE);
        let h = rng.gen_range(OBSTACLE_MIN_SIZE..=OBSTACLE_MAX_SIZE);
        // Layout data is sampled as a top-left rect; the adapter converts
        // to the crate-wide center convention.
        let x = rng.gen_range(0.0..=stage.width - w);
        let y = rng.gen_range(stage.hud_offset..=stage.height - h);
        obstacles.push(Obstacle::from_top_left(x, y, w, h, kind));
    }

    let mut emus = Vec::with_capacity(EMU_COUNT);
    for _ in 0..EMU_COUNT {
        let (x, y) = find_safe_spawn(
            &obstacles,
            EMU_RADIUS * 2.0,
            EMU_RADIUS * 2.0,
            &stage,
            stage.hud_offset + EMU_RADIUS,
            stage.height - stage.hud_offset - EMU_RADIUS * 2.0,
            EMU_RADIUS,
            rng,
        )?;
        let mut emu = Emu {
            x,
            y,
            dir: Direction::Down,
            speed: EMU_SPEED,
            active: true,
            hit_count: 0,
            max_hits: EMU_MAX_HITS,
            flash_ticks: 0,
            hold_ticks: 0,
        };
        randomize_direction(&mut emu, rng);
        emus.push(emu);
    }

    let (px, py) = find_safe_spawn(
        &obstacles,
        PLAYER_W,
        PLAYER_H,
        &stage,
        stage.height - PLAYER_BAND,
        PLAYER_BAND - PLAYER_H,
        PLAYER_W / 2.0,
        rng,
    )?;

    Ok(RoundState {
        player: Player {
            x: px,
            y: py,
            facing: Direction::Up,
            speed: PLAYER_SPEED,
            is_moving: false,
        },
        emus,
        bullets: Vec::new(),
        obstacles,
        stage,
        emus_downed: 0,
        status: RoundStatus::Active,
        frame: 0,
    })
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fire a bullet from the player's current position and facing.
pub fn player_shoot(state: &RoundState) -> RoundState {
    let new_bullet = Bullet {
        x: state.player.x,
        y: state.player.y,
        dir: state.player.facing,
        speed: BULLET_SPEED,
        active: true,
    };
    let mut bullets = state.bullets.clone();
    bullets.push(new_bullet);
    RoundState {
        bullets,
        ..state.clone()
    }
}

// ── Per-entity kinematics ────────────────────────────────────────────────────

/// One movement tick for the player, driven by the held-key snapshot.
///
/// The vertical axis is resolved before the horizontal one, and within an
/// axis the priority is up over down, left over right.  The tentative
/// position is clamped to the stage and then tested against the obstacles;
/// a blocked move is discarded entirely — no sliding along the edge.
pub fn step_player(
    player: &Player,
    held: &HeldKeys,
    obstacles: &[Obstacle],
    stage: &Stage,
) -> Player {
    let mut p = player.clone();

    let dy = if held.up {
        -p.speed
    } else if held.down {
        p.speed
    } else {
        0.0
    };
    let dx = if held.left {
        -p.speed
    } else if held.right {
        p.speed
    } else {
        0.0
    };

    if dx == 0.0 && dy == 0.0 {
        p.is_moving = false;
        return p;
    }

    p.facing = if held.up {
        Direction::Up
    } else if held.down {
        Direction::Down
    } else if held.left {
        Direction::Left
    } else {
        Direction::Right
    };

    let tx = (p.x + dx).clamp(PLAYER_W / 2.0, stage.width - PLAYER_W / 2.0);
    let ty = (p.y + dy).clamp(
        stage.hud_offset + PLAYER_H / 2.0,
        stage.height - PLAYER_H / 2.0,
    );

    if hits_any(&BoundingBox::new(tx, ty, PLAYER_W, PLAYER_H), obstacles) {
        p.is_moving = false;
        return p;
    }

    p.x = tx;
    p.y = ty;
    p.is_moving = true;
    p
}

/// One movement tick for a bullet: advance along its axis, then die on
/// leaving the stage or striking an obstacle.  Inactive bullets are frozen.
pub fn step_bullet(bullet: &Bullet, obstacles: &[Obstacle], stage: &Stage) -> Bullet {
    if !bullet.active {
        return bullet.clone();
    }
    let mut b = bullet.clone();
    let (nx, ny) = direction_step(b.x, b.y, b.dir, b.speed);
    b.x = nx;
    b.y = ny;

    if b.x < 0.0 || b.x > stage.width || b.y < 0.0 || b.y > stage.height {
        b.active = false;
        return b;
    }
    if hits_any(&BoundingBox::new(b.x, b.y, BULLET_W, BULLET_H), obstacles) {
        b.active = false;
    }
    b
}

fn randomize_direction(emu: &mut Emu, rng: &mut impl Rng) {
    emu.dir = match rng.gen_range(0..4) {
        0 => Direction::Up,
        1 => Direction::Down,
        2 => Direction::Left,
        _ => Direction::Right,
    };
    emu.hold_ticks = rng.gen_range(EMU_HOLD_MIN..=EMU_HOLD_MAX);
}

/// One wander tick for an emu.
///
/// The tentative step is clamped to the stage (radius-based).  Two
/// independent triggers feed the same re-randomization: the clamp changed
/// the position (boundary hit) or the clamped box strikes an obstacle — in
/// either case the emu stays put this tick with a fresh direction and hold
/// countdown.  Otherwise the move commits and the countdown ticks down,
/// re-randomizing at zero so wandering stays varied in open ground.
pub fn step_emu(emu: &Emu, obstacles: &[Obstacle], stage: &Stage, rng: &mut impl Rng) -> Emu {
    if !emu.active {
        return emu.clone();
    }
    let mut e = emu.clone();
    e.flash_ticks = e.flash_ticks.saturating_sub(1);

    let (tx, ty) = direction_step(e.x, e.y, e.dir, e.speed);
    let cx = tx.clamp(EMU_RADIUS, stage.width - EMU_RADIUS);
    let cy = ty.clamp(stage.hud_offset + EMU_RADIUS, stage.height - EMU_RADIUS);

    let boundary_hit = cx != tx || cy != ty;
    let blocked = hits_any(
        &BoundingBox::new(cx, cy, EMU_RADIUS * 2.0, EMU_RADIUS * 2.0),
        obstacles,
    );
    if boundary_hit || blocked {
        randomize_direction(&mut e, rng);
        return e;
    }

    e.x = cx;
    e.y = cy;
    e.hold_ticks = e.hold_ticks.saturating_sub(1);
    if e.hold_ticks == 0 {
        randomize_direction(&mut e, rng);
    }
    e
}

// ── Bullet-vs-emu collision ──────────────────────────────────────────────────

/// Outcome of one emu's bullet check.
pub struct HitOutcome {
    pub emu: Emu,
    /// Index into the bullet slice of the bullet consumed by the hit.
    pub consumed_bullet: Option<usize>,
    /// True exactly on the tick the emu's hit counter reached `max_hits`.
    pub just_died: bool,
}

/// Check an emu against the bullet list.
///
/// Only the first active bullet within range counts — an emu takes at most
/// one hit per tick no matter how many bullets are on top of it (a
/// deliberate throttle).  A dead emu never registers another hit.
pub fn check_bullet_collision(emu: &Emu, bullets: &[Bullet]) -> HitOutcome {
    if !emu.active {
        return HitOutcome {
            emu: emu.clone(),
            consumed_bullet: None,
            just_died: false,
        };
    }
    for (i, b) in bullets.iter().enumerate() {
        if !b.active {
            continue;
        }
        let dx = b.x - emu.x;
        let dy = b.y - emu.y;
        if (dx * dx + dy * dy).sqrt() < EMU_RADIUS + BULLET_HIT_RADIUS {
            let mut hit = emu.clone();
            hit.hit_count += 1;
            hit.flash_ticks = EMU_FLASH_TICKS;
            let died = hit.hit_count >= hit.max_hits;
            if died {
                hit.active = false;
            }
            return HitOutcome {
                emu: hit,
                consumed_bullet: Some(i),
                just_died: died,
            };
        }
    }
    HitOutcome {
        emu: emu.clone(),
        consumed_bullet: None,
        just_died: false,
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the round by one frame: player, bullets, emus, bullet hits, then
/// a single retain pass that drops inactive entities exactly once.
pub fn tick(state: &RoundState, held: &HeldKeys, rng: &mut impl Rng) -> RoundState {
    let frame = state.frame + 1;

    // ── 1. Player movement ───────────────────────────────────────────────────
    let player = step_player(&state.player, held, &state.obstacles, &state.stage);

    // ── 2. Bullet ballistics ─────────────────────────────────────────────────
    let mut bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .map(|b| step_bullet(b, &state.obstacles, &state.stage))
        .collect();

    // ── 3. Emu wandering + bullet hits ───────────────────────────────────────
    let mut emus = Vec::with_capacity(state.emus.len());
    let mut emus_downed = state.emus_downed;
    for emu in &state.emus {
        let stepped = step_emu(emu, &state.obstacles, &state.stage, rng);
        let outcome = check_bullet_collision(&stepped, &bullets);
        if let Some(i) = outcome.consumed_bullet {
            // Consumed immediately so a later emu can't also take this bullet.
            bullets[i].active = false;
        }
        if outcome.just_died {
            emus_downed += 1;
        }
        emus.push(outcome.emu);
    }

    // ── 4. Drop inactive entities — removal happens exactly once, here ──────
    bullets.retain(|b| b.active);
    emus.retain(|e| e.active);

    let status = if emus.is_empty() {
        RoundStatus::Cleared
    } else {
        RoundStatus::Active
    };

    RoundState {
        player,
        emus,
        bullets,
        emus_downed,
        status,
        frame,
        ..state.clone()
    }
}
