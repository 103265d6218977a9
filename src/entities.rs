/// All game entity types — pure data, no logic.

/// Cardinal travel/facing direction shared by every moving entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What an obstacle is drawn as.  Collision math ignores the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Rock,
    Bush,
}

/// Axis-aligned obstacle.  `x`/`y` are the **center** of the rectangle —
/// the same convention as every bounding box in the crate (see `geometry`).
/// Obstacles never collide with each other and never move within a round.
#[derive(Clone, Debug)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub kind: ObstacleKind,
}

/// Playable stage area.  `hud_offset` reserves space at the top for the
/// HUD; entities stay below it.
#[derive(Clone, Copy, Debug)]
pub struct Stage {
    pub width: f32,
    pub height: f32,
    pub hud_offset: f32,
}

// ── Moving entities ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub facing: Direction,
    /// Displacement per tick along one axis.
    pub speed: f32,
    /// Rendering-only flag (gun/sprite state); no gameplay effect.
    pub is_moving: bool,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    /// Fixed at creation; bullets never turn.
    pub dir: Direction,
    pub speed: f32,
    pub active: bool,
}

#[derive(Clone, Debug)]
pub struct Emu {
    pub x: f32,
    pub y: f32,
    pub dir: Direction,
    pub speed: f32,
    pub active: bool,
    /// Bullet hits taken so far; never exceeds `max_hits`.
    pub hit_count: u32,
    pub max_hits: u32,
    /// Remaining ticks of the cosmetic hit flash; no gameplay effect.
    pub flash_ticks: u32,
    /// Ticks left before the wander direction re-randomizes on its own.
    pub hold_ticks: u32,
}

// ── Input snapshot ────────────────────────────────────────────────────────────

/// Which movement keys are held this tick.  Built by the driver from its
/// key-event stream; the core never touches input devices.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

// ── Master round state ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    Active,
    /// Every emu is down.
    Cleared,
}

/// The entire shooter-round state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct RoundState {
    pub player: Player,
    pub emus: Vec<Emu>,
    pub bullets: Vec<Bullet>,
    /// Immutable for the lifetime of the round.
    pub obstacles: Vec<Obstacle>,
    pub stage: Stage,
    pub emus_downed: u32,
    pub status: RoundStatus,
    pub frame: u64,
}
