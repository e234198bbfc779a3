//! Core value types for the Xiangqi rules engine.
//!
//! Squares are linear indices `rank * 9 + file` with file 0 on the a-file and
//! rank 0 on Red's back rank. Bitboards are `u128` values of which only the
//! low 90 bits are ever set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::IllegalMoveReason;

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

pub const FILE_COUNT: u8 = 9;
pub const RANK_COUNT: u8 = 10;
pub const SQUARE_COUNT: usize = 90;

/// Board square index (`0..90`).
pub type Square = u8;

/// One bit per square, bit `n` set when square `n` is a member.
pub type Bitboard = u128;

pub const BOARD_MASK: Bitboard = (1u128 << SQUARE_COUNT) - 1;

/// Side to move. Red moves first and advances towards rank 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Rank delta of one step "forward" for this side.
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Color::Red => 1,
            Color::Black => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Piece type without color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Soldier,
    Cannon,
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
}

pub const ALL_PIECE_TYPES: [PieceType; 7] = [
    PieceType::Soldier,
    PieceType::Cannon,
    PieceType::General,
    PieceType::Advisor,
    PieceType::Elephant,
    PieceType::Horse,
    PieceType::Chariot,
];

impl PieceType {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceType::Soldier => 0,
            PieceType::Cannon => 1,
            PieceType::General => 2,
            PieceType::Advisor => 3,
            PieceType::Elephant => 4,
            PieceType::Horse => 5,
            PieceType::Chariot => 6,
        }
    }

    /// Lowercase text glyph. Chariot uses `r` because `c` belongs to the cannon.
    #[inline]
    pub const fn glyph(self) -> char {
        match self {
            PieceType::Soldier => 's',
            PieceType::Cannon => 'c',
            PieceType::General => 'g',
            PieceType::Advisor => 'a',
            PieceType::Elephant => 'e',
            PieceType::Horse => 'h',
            PieceType::Chariot => 'r',
        }
    }

    pub fn from_glyph(ch: char) -> Option<Self> {
        ALL_PIECE_TYPES
            .into_iter()
            .find(|piece_type| piece_type.glyph() == ch.to_ascii_lowercase())
    }
}

/// A (piece type, color) pair. Each of the 14 kinds owns one bitboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

pub const PIECE_KIND_COUNT: usize = 14;

impl Piece {
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    /// Slot of this kind in the 14-entry bitboard arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.color.index() * ALL_PIECE_TYPES.len() + self.piece_type.index()
    }

    /// Uppercase for Red, lowercase for Black.
    #[inline]
    pub fn glyph(self) -> char {
        match self.color {
            Color::Red => self.piece_type.glyph().to_ascii_uppercase(),
            Color::Black => self.piece_type.glyph(),
        }
    }

    pub fn from_glyph(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Red
        } else if ch.is_ascii_lowercase() {
            Color::Black
        } else {
            return None;
        };
        PieceType::from_glyph(ch).map(|piece_type| Piece::new(piece_type, color))
    }
}

/// Every kind in arena order: all Red kinds, then all Black kinds.
pub const ALL_PIECES: [Piece; PIECE_KIND_COUNT] = {
    let mut out = [Piece::new(PieceType::Soldier, Color::Red); PIECE_KIND_COUNT];
    let mut i = 0usize;
    while i < ALL_PIECE_TYPES.len() {
        out[i] = Piece::new(ALL_PIECE_TYPES[i], Color::Red);
        out[i + ALL_PIECE_TYPES.len()] = Piece::new(ALL_PIECE_TYPES[i], Color::Black);
        i += 1;
    }
    out
};

/// A proposed relocation from one square to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    pub fn from_coordinates(
        file_from: u8,
        rank_from: u8,
        file_to: u8,
        rank_to: u8,
    ) -> Result<Self, IllegalMoveReason> {
        Ok(Self::new(
            to_square(file_from, rank_from)?,
            to_square(file_to, rank_to)?,
        ))
    }

    /// `(file_from, rank_from, file_to, rank_to)`.
    pub fn to_coordinates(self) -> (u8, u8, u8, u8) {
        let (file_from, rank_from) = from_square(self.from);
        let (file_to, rank_to) = from_square(self.to);
        (file_from, rank_from, file_to, rank_to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (ff, fr, tf, tr) = self.to_coordinates();
        write!(f, "{ff} {fr} {tf} {tr}")
    }
}

#[inline]
pub fn to_square(file: u8, rank: u8) -> Result<Square, IllegalMoveReason> {
    if file >= FILE_COUNT || rank >= RANK_COUNT {
        return Err(IllegalMoveReason::OutOfBounds);
    }
    Ok(rank * FILE_COUNT + file)
}

#[inline]
pub const fn from_square(square: Square) -> (u8, u8) {
    (square % FILE_COUNT, square / FILE_COUNT)
}

#[inline]
pub const fn file_of(square: Square) -> i32 {
    (square % FILE_COUNT) as i32
}

#[inline]
pub const fn rank_of(square: Square) -> i32 {
    (square / FILE_COUNT) as i32
}

#[inline]
pub const fn is_on_board(square: Square) -> bool {
    (square as usize) < SQUARE_COUNT
}

/// Single-bit mask of `square`; empty for indices past the board.
#[inline]
pub const fn square_mask(square: Square) -> Bitboard {
    if is_on_board(square) {
        1u128 << square
    } else {
        0
    }
}

/// Square reached by stepping `(file_step, rank_step)` from `square`, if it stays on the board.
#[inline]
pub const fn offset_square(square: Square, file_step: i32, rank_step: i32) -> Option<Square> {
    if !is_on_board(square) {
        return None;
    }
    let file = file_of(square) + file_step;
    let rank = rank_of(square) + rank_step;
    if file < 0 || file >= FILE_COUNT as i32 || rank < 0 || rank >= RANK_COUNT as i32 {
        return None;
    }
    Some((rank * FILE_COUNT as i32 + file) as Square)
}

/// Iterates the set squares of a bitboard in ascending order.
pub fn squares(mut bits: Bitboard) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if bits == 0 {
            return None;
        }
        let square = bits.trailing_zeros() as Square;
        bits &= bits - 1;
        Some(square)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_index_is_rank_major() {
        assert_eq!(to_square(0, 0), Ok(0));
        assert_eq!(to_square(8, 0), Ok(8));
        assert_eq!(to_square(0, 1), Ok(9));
        assert_eq!(to_square(8, 9), Ok(89));
        assert_eq!(from_square(40), (4, 4));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected_even_when_the_index_would_fit() {
        assert_eq!(to_square(9, 0), Err(IllegalMoveReason::OutOfBounds));
        assert_eq!(to_square(10, 0), Err(IllegalMoveReason::OutOfBounds));
        assert_eq!(to_square(0, 10), Err(IllegalMoveReason::OutOfBounds));
    }

    #[test]
    fn every_square_round_trips_through_coordinates() {
        for square in 0..SQUARE_COUNT as Square {
            let (file, rank) = from_square(square);
            assert_eq!(to_square(file, rank), Ok(square));
        }
    }

    #[test]
    fn arena_indices_are_unique_and_dense() {
        for (slot, piece) in ALL_PIECES.iter().enumerate() {
            assert_eq!(piece.index(), slot);
        }
    }

    #[test]
    fn glyphs_round_trip() {
        for piece in ALL_PIECES {
            assert_eq!(Piece::from_glyph(piece.glyph()), Some(piece));
        }
        assert_eq!(Piece::new(PieceType::Chariot, Color::Red).glyph(), 'R');
        assert_eq!(Piece::new(PieceType::Cannon, Color::Black).glyph(), 'c');
        assert_eq!(Piece::from_glyph('x'), None);
    }

    #[test]
    fn offset_square_stops_at_edges() {
        assert_eq!(offset_square(0, -1, 0), None);
        assert_eq!(offset_square(8, 1, 0), None);
        assert_eq!(offset_square(89, 0, 1), None);
        assert_eq!(offset_square(0, 1, 2), Some(19));
    }

    #[test]
    fn off_board_indices_have_no_mask_and_no_neighbours() {
        assert_eq!(square_mask(90), 0);
        assert_eq!(square_mask(200), 0);
        assert_eq!(offset_square(95, 0, -1), None);
        assert_eq!(offset_square(200, -1, -2), None);
    }

    #[test]
    fn squares_iterates_in_ascending_order() {
        let bits = square_mask(3) | square_mask(89) | square_mask(45);
        assert_eq!(squares(bits).collect::<Vec<_>>(), vec![3, 45, 89]);
    }
}
