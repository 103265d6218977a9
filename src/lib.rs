//! Great Emu War — core simulation for the screen-based minigames.
//!
//! The library is split the same way the game is: `compute` drives the
//! frame-ticked shooter round (player, bullets, wandering emus, obstacle
//! collision), `maze` drives the key-stepped raid (randomized carve, grid
//! traversal, countdown). `geometry` and `spawn` are the shared collision
//! and placement primitives underneath both. All randomness is injected
//! through `rand::Rng` handles so rounds are reproducible in tests.

pub mod compute;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod maze;
pub mod spawn;
