/// Maze-raid subsystem: randomized carve, grid traversal, countdown.
///
/// The grid is regenerated fresh each raid.  Generation is pure given the
/// injected RNG; the `Raid` itself is driven by discrete key events plus a
/// 1-second countdown tick, both owned by the driver.  The raid touches
/// only its own state, so the countdown may fire zero or several times
/// between animation frames without harm.

use rand::Rng;

use crate::entities::Direction;
use crate::error::{Result, SetupError};

/// Default grid dimensions.  Odd, so the 2-step carve leaves a wall ring
/// between corridors.
pub const MAZE_WIDTH: usize = 15;
pub const MAZE_HEIGHT: usize = 15;
/// Pickups placed per raid.
pub const PICKUP_COUNT: u32 = 5;
/// Retry budget for pickup placement.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;
/// Raid countdown in seconds.
pub const RAID_SECONDS: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Path,
    Wall,
    Start,
    Exit,
    Pickup,
}

/// A carved maze.  `tiles[row][col]`; `(col, row)` indices everywhere else.
#[derive(Clone, Debug)]
pub struct Maze {
    pub tiles: Vec<Vec<Tile>>,
    pub width: usize,
    pub height: usize,
    pub start: (usize, usize),
    pub exit: (usize, usize),
}

impl Maze {
    pub fn tile(&self, col: usize, row: usize) -> Tile {
        self.tiles[row][col]
    }
}

// ── Generation ───────────────────────────────────────────────────────────────

/// Carve a perfect maze and place start, exit and pickups.
///
/// Carving is iterative randomized depth-first backtracking on the 2-step
/// lattice: from the top of the stack, pick a random still-wall neighbor at
/// offset ±2 inside `[1, dim-2]`, open the connecting cell and the target,
/// push; pop when no candidates remain.  The exit is the first path tile
/// found scanning the bottom-right quadrant inward — deterministic given
/// the maze.  Pickups are rejection-sampled onto distinct path tiles; a
/// shortfall after `MAX_PLACEMENT_ATTEMPTS` is an explicit error, never a
/// silently short-placed maze.
pub fn generate(width: usize, height: usize, pickups: u32, rng: &mut impl Rng) -> Result<Maze> {
    let mut tiles = vec![vec![Tile::Wall; width]; height];

    let mut stack: Vec<(usize, usize)> = vec![(1, 1)];
    tiles[1][1] = Tile::Path;
    while let Some(&(cx, cy)) = stack.last() {
        let mut candidates: Vec<(usize, usize)> = Vec::new();
        if cx >= 3 && tiles[cy][cx - 2] == Tile::Wall {
            candidates.push((cx - 2, cy));
        }
        if cx + 2 <= width - 2 && tiles[cy][cx + 2] == Tile::Wall {
            candidates.push((cx + 2, cy));
        }
        if cy >= 3 && tiles[cy - 2][cx] == Tile::Wall {
            candidates.push((cx, cy - 2));
        }
        if cy + 2 <= height - 2 && tiles[cy + 2][cx] == Tile::Wall {
            candidates.push((cx, cy + 2));
        }

        if candidates.is_empty() {
            stack.pop();
            continue;
        }
        let (nx, ny) = candidates[rng.gen_range(0..candidates.len())];
        tiles[(cy + ny) / 2][(cx + nx) / 2] = Tile::Path;
        tiles[ny][nx] = Tile::Path;
        stack.push((nx, ny));
    }

    let start = (1, 1);
    tiles[1][1] = Tile::Start;

    let exit = find_exit(&tiles, width, height);
    tiles[exit.1][exit.0] = Tile::Exit;

    let mut placed = 0u32;
    let mut attempts = 0u32;
    while placed < pickups {
        if attempts >= MAX_PLACEMENT_ATTEMPTS {
            return Err(SetupError::MazePlacementExhausted {
                requested: pickups,
                placed,
                attempts,
            });
        }
        attempts += 1;
        let x = rng.gen_range(1..width - 1);
        let y = rng.gen_range(1..height - 1);
        if tiles[y][x] == Tile::Path {
            tiles[y][x] = Tile::Pickup;
            placed += 1;
        }
    }

    Ok(Maze {
        tiles,
        width,
        height,
        start,
        exit,
    })
}

/// First path tile scanning y from `height-2` down to `height/2`, x from
/// `width-2` down to `width/2`.  For odd dimensions ≥ 5 the quadrant always
/// holds a carved cell; the full-interior rescan only covers degenerate
/// grids.
fn find_exit(tiles: &[Vec<Tile>], width: usize, height: usize) -> (usize, usize) {
    for y in (height / 2..=height - 2).rev() {
        for x in (width / 2..=width - 2).rev() {
            if tiles[y][x] == Tile::Path {
                return (x, y);
            }
        }
    }
    for y in (1..=height - 2).rev() {
        for x in (1..=width - 2).rev() {
            if tiles[y][x] == Tile::Path {
                return (x, y);
            }
        }
    }
    (1, 1)
}

// ── Traversal & timer ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Wall, grid edge, or the raid already ended — a no-op, not an error.
    Blocked,
    Moved,
    PickedUp,
    WonExit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaidPhase {
    Active,
    Won,
    Lost,
}

/// What the driver learns from a countdown tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerOutcome {
    pub time_remaining: u32,
    pub expired: bool,
}

/// One maze raid: grid, player, pickups, countdown.
///
/// Won and lost are terminal — once either fires, `move_player` and `tick`
/// leave the raid untouched.  A new raid requires a fresh `generate`.
#[derive(Clone, Debug)]
pub struct Raid {
    pub maze: Maze,
    player: (usize, usize),
    pickups_collected: u32,
    time_remaining: u32,
    phase: RaidPhase,
}

impl Raid {
    pub fn new(maze: Maze, seconds: u32) -> Self {
        let player = maze.start;
        Raid {
            maze,
            player,
            pickups_collected: 0,
            time_remaining: seconds,
            phase: RaidPhase::Active,
        }
    }

    pub fn player(&self) -> (usize, usize) {
        self.player
    }

    pub fn pickups_collected(&self) -> u32 {
        self.pickups_collected
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn phase(&self) -> RaidPhase {
        self.phase
    }

    /// One grid step in the given direction.
    pub fn move_player(&mut self, dir: Direction) -> MoveOutcome {
        if self.phase != RaidPhase::Active {
            return MoveOutcome::Blocked;
        }
        let (col, row) = self.player;
        let (nc, nr) = match dir {
            Direction::Up => (col as isize, row as isize - 1),
            Direction::Down => (col as isize, row as isize + 1),
            Direction::Left => (col as isize - 1, row as isize),
            Direction::Right => (col as isize + 1, row as isize),
        };
        if nc < 0 || nr < 0 || nc >= self.maze.width as isize || nr >= self.maze.height as isize {
            return MoveOutcome::Blocked;
        }
        let (nc, nr) = (nc as usize, nr as usize);

        match self.maze.tiles[nr][nc] {
            Tile::Wall => MoveOutcome::Blocked,
            Tile::Pickup => {
                // Collected pickups are gone for the rest of the raid.
                self.maze.tiles[nr][nc] = Tile::Path;
                self.player = (nc, nr);
                self.pickups_collected += 1;
                MoveOutcome::PickedUp
            }
            Tile::Exit => {
                self.player = (nc, nr);
                self.phase = RaidPhase::Won;
                MoveOutcome::WonExit
            }
            Tile::Path | Tile::Start => {
                self.player = (nc, nr);
                MoveOutcome::Moved
            }
        }
    }

    /// One second off the countdown.  Fires the lose transition at zero;
    /// harmless to call again after the raid has ended.
    pub fn tick(&mut self) -> TimerOutcome {
        if self.phase == RaidPhase::Active {
            self.time_remaining = self.time_remaining.saturating_sub(1);
            if self.time_remaining == 0 {
                self.phase = RaidPhase::Lost;
            }
        }
        TimerOutcome {
            time_remaining: self.time_remaining,
            expired: self.phase == RaidPhase::Lost,
        }
    }
}
