//! Rejection-sampling search for a collision-free spawn position.

use rand::Rng;

use crate::entities::{Obstacle, Stage};
use crate::error::{Result, SetupError};
use crate::geometry::{hits_any, BoundingBox};

/// Retry budget before the search gives up with `SpawnExhausted`.
pub const MAX_SPAWN_ATTEMPTS: u32 = 1000;

/// Find a position whose `entity_w × entity_h` box (centered on the sample)
/// touches no obstacle.
///
/// `x` is sampled uniformly in `[margin, stage.width - margin]`, `y` in
/// `[y_min, y_min + y_range]` — the vertical band lets callers keep spawns
/// below the HUD or pin them near the bottom edge.  The first acceptable
/// sample wins; after `MAX_SPAWN_ATTEMPTS` rejections the arena is treated
/// as saturated and the search fails rather than spinning forever.
pub fn find_safe_spawn(
    obstacles: &[Obstacle],
    entity_w: f32,
    entity_h: f32,
    stage: &Stage,
    y_min: f32,
    y_range: f32,
    margin: f32,
    rng: &mut impl Rng,
) -> Result<(f32, f32)> {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let x = rng.gen_range(margin..=stage.width - margin);
        let y = rng.gen_range(y_min..=y_min + y_range);
        let candidate = BoundingBox::new(x, y, entity_w, entity_h);
        if !hits_any(&candidate, obstacles) {
            return Ok((x, y));
        }
    }
    Err(SetupError::SpawnExhausted {
        attempts: MAX_SPAWN_ATTEMPTS,
    })
}
