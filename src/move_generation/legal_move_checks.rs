//! Move validation.
//!
//! `validate_move` runs the turn, bounds, ownership and piece-geometry checks
//! in a fixed order and reports the first one that fails. Success produces a
//! `ValidatedMove`, the only input `commit_move` accepts.
//!
//! Inside the geometry check the shape is tested first, then palace/river
//! confinement, then blocking squares and cannon screens.

use crate::errors::IllegalMoveReason;
use crate::game_state::xiangqi_rules::{has_crossed_river, home_side, palace};
use crate::game_state::{game_state::GameState, xiangqi_types::*};
use crate::moves::chariot_moves::{squares_between, CHARIOT_RAYS};
use crate::moves::elephant_moves::elephant_eye;
use crate::moves::horse_moves::{horse_leg, horse_targets};

/// A move that passed validation against a particular position.
///
/// Carries the occupancy it was checked against; `commit_move` refuses to
/// apply it blindly once the board has changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedMove {
    mv: Move,
    moved_piece: Piece,
    captured_piece: Option<Piece>,
    occupancy: Bitboard,
}

impl ValidatedMove {
    pub(crate) const fn new(
        mv: Move,
        moved_piece: Piece,
        captured_piece: Option<Piece>,
        occupancy: Bitboard,
    ) -> Self {
        Self {
            mv,
            moved_piece,
            captured_piece,
            occupancy,
        }
    }

    /// True when `game_state` is still the position this move was validated on,
    /// as far as the move's legality is concerned.
    pub fn matches(&self, game_state: &GameState) -> bool {
        game_state.side_to_move() == self.moved_piece.color
            && game_state.occupied() == self.occupancy
            && game_state.piece_at(self.mv.from) == Some(self.moved_piece)
            && game_state.piece_at(self.mv.to) == self.captured_piece
    }

    #[inline]
    pub fn mv(&self) -> Move {
        self.mv
    }

    #[inline]
    pub fn moved_piece(&self) -> Piece {
        self.moved_piece
    }

    #[inline]
    pub fn captured_piece(&self) -> Option<Piece> {
        self.captured_piece
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }
}

pub fn validate_move(
    game_state: &GameState,
    turn: Color,
    mv: Move,
) -> Result<ValidatedMove, IllegalMoveReason> {
    if mv.from == mv.to {
        return Err(IllegalMoveReason::NullMove);
    }
    if !is_on_board(mv.from) || !is_on_board(mv.to) {
        return Err(IllegalMoveReason::OutOfBounds);
    }

    let moved_piece = game_state
        .piece_at(mv.from)
        .ok_or(IllegalMoveReason::EmptyOrigin)?;
    if moved_piece.color != turn {
        return Err(IllegalMoveReason::WrongTurn);
    }

    let captured_piece = game_state.piece_at(mv.to);
    if captured_piece.is_some_and(|target| target.color == moved_piece.color) {
        return Err(IllegalMoveReason::SelfCapture);
    }

    check_piece_geometry(game_state, moved_piece, mv)?;

    Ok(ValidatedMove::new(
        mv,
        moved_piece,
        captured_piece,
        game_state.occupied(),
    ))
}

/// Piece movement rules only: shape, confinement zone, blocking and screens.
///
/// Assumes `piece` stands on `mv.from`.
pub fn check_piece_geometry(
    game_state: &GameState,
    piece: Piece,
    mv: Move,
) -> Result<(), IllegalMoveReason> {
    if !is_on_board(mv.from) || !is_on_board(mv.to) {
        return Err(IllegalMoveReason::OutOfBounds);
    }

    let occupancy = game_state.occupied();
    let file_delta = file_of(mv.to) - file_of(mv.from);
    let rank_delta = rank_of(mv.to) - rank_of(mv.from);

    match piece.piece_type {
        PieceType::Chariot => check_chariot(occupancy, mv),
        PieceType::Cannon => check_cannon(occupancy, mv),
        PieceType::Horse => check_horse(occupancy, mv, file_delta, rank_delta),
        PieceType::Elephant => check_elephant(occupancy, piece.color, mv, file_delta, rank_delta),
        PieceType::Advisor => check_advisor(piece.color, mv, file_delta, rank_delta),
        PieceType::General => check_general(piece.color, mv, file_delta, rank_delta),
        PieceType::Soldier => check_soldier(piece.color, mv, file_delta, rank_delta),
    }
}

fn check_straight_line(mv: Move) -> Result<(), IllegalMoveReason> {
    if CHARIOT_RAYS[mv.from as usize] & square_mask(mv.to) == 0 {
        return Err(IllegalMoveReason::WrongShape);
    }
    Ok(())
}

fn check_chariot(occupancy: Bitboard, mv: Move) -> Result<(), IllegalMoveReason> {
    check_straight_line(mv)?;
    if squares_between(mv.from, mv.to) & occupancy != 0 {
        return Err(IllegalMoveReason::Blocked);
    }
    Ok(())
}

fn check_cannon(occupancy: Bitboard, mv: Move) -> Result<(), IllegalMoveReason> {
    check_straight_line(mv)?;

    let screens = (squares_between(mv.from, mv.to) & occupancy).count_ones();
    let is_capture = occupancy & square_mask(mv.to) != 0;

    match (is_capture, screens) {
        (false, 0) | (true, 1) => Ok(()),
        (false, _) => Err(IllegalMoveReason::Blocked),
        (true, 0) => Err(IllegalMoveReason::NoScreen),
        (true, _) => Err(IllegalMoveReason::ExtraScreen),
    }
}

fn check_horse(
    occupancy: Bitboard,
    mv: Move,
    file_delta: i32,
    rank_delta: i32,
) -> Result<(), IllegalMoveReason> {
    if horse_targets(mv.from) & square_mask(mv.to) == 0 {
        return Err(IllegalMoveReason::WrongShape);
    }

    let leg = horse_leg(mv.from, file_delta, rank_delta).ok_or(IllegalMoveReason::OutOfBounds)?;
    if occupancy & square_mask(leg) != 0 {
        return Err(IllegalMoveReason::Blocked);
    }
    Ok(())
}

fn check_elephant(
    occupancy: Bitboard,
    color: Color,
    mv: Move,
    file_delta: i32,
    rank_delta: i32,
) -> Result<(), IllegalMoveReason> {
    if file_delta.abs() != 2 || rank_delta.abs() != 2 {
        return Err(IllegalMoveReason::WrongShape);
    }

    let home = home_side(color);
    if home & square_mask(mv.from) == 0 || home & square_mask(mv.to) == 0 {
        return Err(IllegalMoveReason::OutOfZone);
    }

    let eye =
        elephant_eye(mv.from, file_delta, rank_delta).ok_or(IllegalMoveReason::OutOfBounds)?;
    if occupancy & square_mask(eye) != 0 {
        return Err(IllegalMoveReason::Blocked);
    }
    Ok(())
}

fn check_palace(color: Color, mv: Move) -> Result<(), IllegalMoveReason> {
    let palace = palace(color);
    if palace & square_mask(mv.from) == 0 || palace & square_mask(mv.to) == 0 {
        return Err(IllegalMoveReason::OutOfZone);
    }
    Ok(())
}

fn check_advisor(
    color: Color,
    mv: Move,
    file_delta: i32,
    rank_delta: i32,
) -> Result<(), IllegalMoveReason> {
    if file_delta.abs() != 1 || rank_delta.abs() != 1 {
        return Err(IllegalMoveReason::WrongShape);
    }
    check_palace(color, mv)
}

fn check_general(
    color: Color,
    mv: Move,
    file_delta: i32,
    rank_delta: i32,
) -> Result<(), IllegalMoveReason> {
    if file_delta.abs() + rank_delta.abs() != 1 {
        return Err(IllegalMoveReason::WrongShape);
    }
    check_palace(color, mv)
}

fn check_soldier(
    color: Color,
    mv: Move,
    file_delta: i32,
    rank_delta: i32,
) -> Result<(), IllegalMoveReason> {
    if file_delta == 0 && rank_delta == color.forward() {
        return Ok(());
    }
    if rank_delta == 0 && file_delta.abs() == 1 {
        if has_crossed_river(color, mv.from) {
            return Ok(());
        }
        return Err(IllegalMoveReason::OutOfZone);
    }
    Err(IllegalMoveReason::WrongShape)
}
