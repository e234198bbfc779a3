use thiserror::Error;

use crate::errors::IllegalMoveReason;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::ValidatedMove;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    #[error("invalid game state: {0}")]
    InvalidState(String),

    #[error("perft depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: u8, max: u8 },

    #[error(transparent)]
    Rules(#[from] IllegalMoveReason),
}

/// Enumerates the moves available to the side to move.
pub trait MoveGenerator: Send + Sync {
    fn generate_moves(&self, game_state: &GameState) -> Vec<ValidatedMove>;
}
