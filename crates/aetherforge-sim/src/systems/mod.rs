//! Systems that advance the game state each frame.
//!
//! Systems are free functions over `&mut GameState` plus whatever static
//! tables and randomness they need. They hold no state of their own.

pub mod damage;
pub mod enemies;
pub mod particles;
pub mod projectiles;
pub mod spawner;
pub mod towers;
pub mod weather;

/// Monotonic id source shared by every entity kind. Reset per run.
#[derive(Debug, Clone, Default)]
pub struct EntityIds {
    last: u32,
}

impl EntityIds {
    pub fn next(&mut self) -> u32 {
        self.last += 1;
        self.last
    }
}
