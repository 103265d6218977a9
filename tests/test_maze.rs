use emu_war::entities::Direction;
use emu_war::error::SetupError;
use emu_war::maze::{
    generate, Maze, MoveOutcome, Raid, RaidPhase, Tile, MAZE_HEIGHT, MAZE_WIDTH, PICKUP_COUNT,
};

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_maze(seed: u64) -> Maze {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(MAZE_WIDTH, MAZE_HEIGHT, PICKUP_COUNT, &mut rng).expect("generation must succeed")
}

/// Every cell reachable from the start via 4-directional non-wall moves.
fn flood_fill(maze: &Maze) -> HashSet<(usize, usize)> {
    let mut seen = HashSet::new();
    let mut stack = vec![maze.start];
    seen.insert(maze.start);
    while let Some((col, row)) = stack.pop() {
        let neighbors = [
            (col.wrapping_sub(1), row),
            (col + 1, row),
            (col, row.wrapping_sub(1)),
            (col, row + 1),
        ];
        for (nc, nr) in neighbors {
            if nc >= maze.width || nr >= maze.height {
                continue;
            }
            if maze.tile(nc, nr) != Tile::Wall && seen.insert((nc, nr)) {
                stack.push((nc, nr));
            }
        }
    }
    seen
}

fn count_tiles(maze: &Maze, tile: Tile) -> usize {
    let mut n = 0;
    for row in 0..maze.height {
        for col in 0..maze.width {
            if maze.tile(col, row) == tile {
                n += 1;
            }
        }
    }
    n
}

// ── Generation ────────────────────────────────────────────────────────────────

#[test]
fn every_open_tile_is_reachable_from_start() {
    // Perfect-maze connectivity: the carve may not strand any corridor
    for seed in 0..10 {
        let maze = seeded_maze(seed);
        let reachable = flood_fill(&maze);
        for row in 0..maze.height {
            for col in 0..maze.width {
                if maze.tile(col, row) != Tile::Wall {
                    assert!(
                        reachable.contains(&(col, row)),
                        "seed {}: ({}, {}) unreachable",
                        seed,
                        col,
                        row
                    );
                }
            }
        }
    }
}

#[test]
fn start_is_top_left_lattice_cell() {
    let maze = seeded_maze(42);
    assert_eq!(maze.start, (1, 1));
    assert_eq!(maze.tile(1, 1), Tile::Start);
}

#[test]
fn exactly_one_exit_in_the_bottom_right_quadrant() {
    for seed in 0..10 {
        let maze = seeded_maze(seed);
        assert_eq!(count_tiles(&maze, Tile::Exit), 1);
        let (ex, ey) = maze.exit;
        assert_eq!(maze.tile(ex, ey), Tile::Exit);
        assert!(ex >= maze.width / 2 && ex <= maze.width - 2);
        assert!(ey >= maze.height / 2 && ey <= maze.height - 2);
    }
}

#[test]
fn exactly_the_requested_pickup_count() {
    for seed in 0..10 {
        let maze = seeded_maze(seed);
        assert_eq!(count_tiles(&maze, Tile::Pickup), PICKUP_COUNT as usize);
    }
}

#[test]
fn border_is_solid_wall() {
    let maze = seeded_maze(7);
    for col in 0..maze.width {
        assert_eq!(maze.tile(col, 0), Tile::Wall);
        assert_eq!(maze.tile(col, maze.height - 1), Tile::Wall);
    }
    for row in 0..maze.height {
        assert_eq!(maze.tile(0, row), Tile::Wall);
        assert_eq!(maze.tile(maze.width - 1, row), Tile::Wall);
    }
}

#[test]
fn generation_is_deterministic_for_a_seed() {
    let a = seeded_maze(99);
    let b = seeded_maze(99);
    assert_eq!(a.tiles, b.tiles);
    assert_eq!(a.exit, b.exit);
}

#[test]
fn impossible_pickup_count_fails_explicitly() {
    // A 5×5 maze has only a handful of path tiles; asking for 50 pickups
    // must surface the shortfall, never ship a short count silently.
    let mut rng = StdRng::seed_from_u64(1);
    let err = generate(5, 5, 50, &mut rng).unwrap_err();
    match err {
        SetupError::MazePlacementExhausted {
            requested, placed, ..
        } => {
            assert_eq!(requested, 50);
            assert!(placed < 50);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// ── Traversal ─────────────────────────────────────────────────────────────────

/// A 5×3 corridor: walls everywhere except Start → Pickup → Exit in a row.
fn corridor() -> Maze {
    let mut tiles = vec![vec![Tile::Wall; 5]; 3];
    tiles[1][1] = Tile::Start;
    tiles[1][2] = Tile::Pickup;
    tiles[1][3] = Tile::Exit;
    Maze {
        tiles,
        width: 5,
        height: 3,
        start: (1, 1),
        exit: (3, 1),
    }
}

#[test]
fn wall_blocks_without_moving() {
    let mut raid = Raid::new(corridor(), 10);
    assert_eq!(raid.move_player(Direction::Up), MoveOutcome::Blocked);
    assert_eq!(raid.player(), (1, 1));
}

#[test]
fn grid_edge_blocks_without_moving() {
    let mut tiles = vec![vec![Tile::Wall; 3]; 3];
    tiles[0][0] = Tile::Start;
    let maze = Maze {
        tiles,
        width: 3,
        height: 3,
        start: (0, 0),
        exit: (1, 1),
    };
    let mut raid = Raid::new(maze, 10);
    assert_eq!(raid.move_player(Direction::Left), MoveOutcome::Blocked);
    assert_eq!(raid.move_player(Direction::Up), MoveOutcome::Blocked);
    assert_eq!(raid.player(), (0, 0));
}

#[test]
fn pickup_is_collected_once() {
    let mut raid = Raid::new(corridor(), 10);
    assert_eq!(raid.move_player(Direction::Right), MoveOutcome::PickedUp);
    assert_eq!(raid.pickups_collected(), 1);
    // Tile reverts to path: stepping off and back is an ordinary move
    assert_eq!(raid.move_player(Direction::Left), MoveOutcome::Moved);
    assert_eq!(raid.move_player(Direction::Right), MoveOutcome::Moved);
    assert_eq!(raid.pickups_collected(), 1);
}

#[test]
fn reaching_the_exit_wins_with_pickups_counted() {
    let mut raid = Raid::new(corridor(), 10);
    assert_eq!(raid.move_player(Direction::Right), MoveOutcome::PickedUp);
    assert_eq!(raid.move_player(Direction::Right), MoveOutcome::WonExit);
    assert_eq!(raid.phase(), RaidPhase::Won);
    assert_eq!(raid.pickups_collected(), 1);
    assert_eq!(raid.player(), (3, 1));
}

#[test]
fn won_raid_ignores_further_input_and_ticks() {
    let mut raid = Raid::new(corridor(), 10);
    raid.move_player(Direction::Right);
    raid.move_player(Direction::Right);
    assert_eq!(raid.phase(), RaidPhase::Won);

    assert_eq!(raid.move_player(Direction::Left), MoveOutcome::Blocked);
    assert_eq!(raid.player(), (3, 1));
    assert_eq!(raid.pickups_collected(), 1);

    let t = raid.tick();
    assert_eq!(t.time_remaining, 10); // countdown frozen after the win
    assert!(!t.expired);
    assert_eq!(raid.phase(), RaidPhase::Won);
}

// ── Countdown ─────────────────────────────────────────────────────────────────

#[test]
fn countdown_expires_into_a_loss() {
    let mut raid = Raid::new(corridor(), 3);
    assert_eq!(raid.tick().time_remaining, 2);
    assert_eq!(raid.tick().time_remaining, 1);
    let t = raid.tick();
    assert_eq!(t.time_remaining, 0);
    assert!(t.expired);
    assert_eq!(raid.phase(), RaidPhase::Lost);
}

#[test]
fn lost_raid_is_terminal() {
    let mut raid = Raid::new(corridor(), 1);
    assert!(raid.tick().expired);
    // Extra timer fires between frames must not corrupt anything
    let t = raid.tick();
    assert_eq!(t.time_remaining, 0);
    assert!(t.expired);
    assert_eq!(raid.move_player(Direction::Right), MoveOutcome::Blocked);
    assert_eq!(raid.player(), (1, 1));
}
