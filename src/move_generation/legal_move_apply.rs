//! Move execution and history.
//!
//! `commit_move` is the only path that mutates piece bitboards during play.
//! Every commit pushes an `UndoState`; `undo_move` pops the newest one and
//! restores the position and the side to move exactly.

use tracing::{debug, trace};

use crate::errors::IllegalMoveReason;
use crate::game_state::{game_state::GameState, xiangqi_types::*};
use crate::move_generation::legal_move_checks::{validate_move, ValidatedMove};

/// Applies a validated move.
///
/// A move validated against an earlier position is checked again against the
/// current one and refused with the reason that check produces, so a stale
/// `ValidatedMove` can never break the board invariants.
pub fn commit_move(
    game_state: &mut GameState,
    validated: ValidatedMove,
) -> Result<(), IllegalMoveReason> {
    let validated = if validated.matches(game_state) {
        validated
    } else {
        trace!(mv = %validated.mv(), "stale validated move, checking again");
        validate_move(game_state, game_state.side_to_move(), validated.mv())?
    };

    let mv = validated.mv();
    let moved_piece = validated.moved_piece();
    let captured_piece = validated.captured_piece();

    if let Some(captured) = captured_piece {
        game_state.remove_piece(captured, mv.to);
    }
    game_state.relocate(moved_piece, mv.from, mv.to);

    game_state.undo_stack.push(UndoState {
        mv,
        moved_piece,
        captured_piece,
    });
    game_state.side_to_move = game_state.side_to_move.opposite();

    debug!(
        %mv,
        piece = %moved_piece.glyph(),
        captured = ?captured_piece.map(Piece::glyph),
        ply = game_state.undo_stack.len(),
        "move committed"
    );
    Ok(())
}

/// Reverts the most recent commit.
pub fn undo_move(game_state: &mut GameState) -> Result<UndoState, IllegalMoveReason> {
    let undo = game_state
        .undo_stack
        .pop()
        .ok_or(IllegalMoveReason::NoHistory)?;

    game_state.relocate(undo.moved_piece, undo.mv.to, undo.mv.from);
    if let Some(captured) = undo.captured_piece {
        game_state.place_piece(captured, undo.mv.to);
    }
    game_state.side_to_move = game_state.side_to_move.opposite();

    debug!(mv = %undo.mv, ply = game_state.undo_stack.len(), "move undone");
    Ok(undo)
}

/// Validates and commits a move given in file/rank coordinates.
///
/// On failure the state is left untouched.
pub fn make_move(
    game_state: &mut GameState,
    file_from: u8,
    rank_from: u8,
    file_to: u8,
    rank_to: u8,
) -> Result<(), IllegalMoveReason> {
    let result = validate_coordinates(game_state, file_from, rank_from, file_to, rank_to);

    match result {
        Ok(validated) => commit_move(game_state, validated),
        Err(reason) => {
            trace!(
                file_from,
                rank_from,
                file_to,
                rank_to,
                ?reason,
                geometry = reason.is_geometry_violation(),
                "move rejected"
            );
            Err(reason)
        }
    }
}

fn validate_coordinates(
    game_state: &GameState,
    file_from: u8,
    rank_from: u8,
    file_to: u8,
    rank_to: u8,
) -> Result<ValidatedMove, IllegalMoveReason> {
    if (file_from, rank_from) == (file_to, rank_to) {
        return Err(IllegalMoveReason::NullMove);
    }
    let mv = Move::from_coordinates(file_from, rank_from, file_to, rank_to)?;
    validate_move(game_state, game_state.side_to_move(), mv)
}

/// Returns the position after `mv` without touching `game_state`.
pub fn apply_move(game_state: &GameState, mv: Move) -> Result<GameState, IllegalMoveReason> {
    let validated = validate_move(game_state, game_state.side_to_move(), mv)?;
    let mut next = game_state.clone();
    commit_move(&mut next, validated)?;
    Ok(next)
}
