use emu_war::entities::{Obstacle, ObstacleKind, Stage};
use emu_war::error::SetupError;
use emu_war::geometry::{hits_any, BoundingBox};
use emu_war::spawn::{find_safe_spawn, MAX_SPAWN_ATTEMPTS};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn stage() -> Stage {
    Stage {
        width: 640.0,
        height: 360.0,
        hud_offset: 40.0,
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn open_arena_first_sample_wins() {
    let s = stage();
    let (x, y) = find_safe_spawn(&[], 24.0, 24.0, &s, 40.0, 300.0, 12.0, &mut seeded_rng())
        .expect("open arena must always have room");
    assert!(x >= 12.0 && x <= 628.0);
    assert!(y >= 40.0 && y <= 340.0);
}

#[test]
fn respects_the_vertical_band() {
    // Pin the band to the bottom 40 pixels
    let s = stage();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (_, y) = find_safe_spawn(&[], 24.0, 24.0, &s, 320.0, 40.0, 12.0, &mut rng).unwrap();
        assert!(y >= 320.0 && y <= 360.0);
    }
}

#[test]
fn found_point_is_actually_safe() {
    // Block the whole left half; any accepted point must clear it
    let s = stage();
    let obstacles = vec![Obstacle::from_top_left(
        0.0,
        0.0,
        320.0,
        360.0,
        ObstacleKind::Rock,
    )];
    let (x, y) =
        find_safe_spawn(&obstacles, 24.0, 24.0, &s, 40.0, 300.0, 12.0, &mut seeded_rng()).unwrap();
    assert!(!hits_any(&BoundingBox::new(x, y, 24.0, 24.0), &obstacles));
    assert!(x > 320.0);
}

#[test]
fn saturated_arena_reports_exhaustion_not_a_hang() {
    // One obstacle covering the entire stage: every sample is rejected and
    // the bounded retry count must trip.
    let s = stage();
    let obstacles = vec![Obstacle::from_top_left(
        0.0,
        0.0,
        640.0,
        360.0,
        ObstacleKind::Rock,
    )];
    let err = find_safe_spawn(&obstacles, 24.0, 24.0, &s, 40.0, 300.0, 12.0, &mut seeded_rng())
        .unwrap_err();
    assert_eq!(
        err,
        SetupError::SpawnExhausted {
            attempts: MAX_SPAWN_ATTEMPTS
        }
    );
}
