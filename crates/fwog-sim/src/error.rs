use hecs::Entity;
use thiserror::Error;

/// Violations of the world's entity/body invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("world has no player entity")]
    NoPlayer,
    #[error("world has {0} player entities, expected exactly one")]
    MultiplePlayers(usize),
    #[error("player already spawned as {0:?}")]
    PlayerAlreadySpawned(Entity),
    #[error("entity {0:?} has no live physics body")]
    MissingBody(Entity),
}
