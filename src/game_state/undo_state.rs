use serde::Serialize;

use crate::game_state::xiangqi_types::*;

/// Single history record pushed by `commit_move` and popped by `undo_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UndoState {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,
}
