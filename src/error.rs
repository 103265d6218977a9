//! Error types for round setup.
//!
//! Setup exhaustion is the only true error condition in the crate.
//! Blocked moves, bullet expiry, emu death and win/lose outcomes are all
//! ordinary return values, never errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// Safe-spawn search exhausted its retry budget.  The caller should
    /// relax the placement constraints or abort round setup.
    #[error("no collision-free spawn found after {attempts} attempts")]
    SpawnExhausted { attempts: u32 },

    /// Pickup placement exhausted its retry budget — the maze is too small
    /// or dense for the requested count.  Reduce the count or regenerate;
    /// a silently short-placed maze is never returned.
    #[error("placed {placed} of {requested} pickups after {attempts} attempts")]
    MazePlacementExhausted {
        requested: u32,
        placed: u32,
        attempts: u32,
    },
}

/// Result type for round-setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;
