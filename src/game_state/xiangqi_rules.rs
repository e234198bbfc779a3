//! Canonical Xiangqi rule constants.
//!
//! Starting layout, per-kind piece limits, and the palace and river zones.
//! All of it is immutable data evaluated at compile time.

use crate::game_state::xiangqi_types::*;

/// Bits for a set of files (`bit f` = file `f`) on one rank.
const fn rank_row(rank: u32, files: u16) -> Bitboard {
    (files as Bitboard) << (rank * FILE_COUNT as u32)
}

/// Standard starting layout, indexed by `Piece::index`.
pub const STARTING_POSITION: [Bitboard; PIECE_KIND_COUNT] = [
    // Red
    rank_row(3, 0b101010101),
    rank_row(2, 0b010000010),
    rank_row(0, 0b000010000),
    rank_row(0, 0b000101000),
    rank_row(0, 0b001000100),
    rank_row(0, 0b010000010),
    rank_row(0, 0b100000001),
    // Black
    rank_row(6, 0b101010101),
    rank_row(7, 0b010000010),
    rank_row(9, 0b000010000),
    rank_row(9, 0b000101000),
    rank_row(9, 0b001000100),
    rank_row(9, 0b010000010),
    rank_row(9, 0b100000001),
];

/// Upper bound on the population of each kind's bitboard.
pub const fn max_piece_count(piece_type: PieceType) -> u32 {
    match piece_type {
        PieceType::Soldier => 5,
        PieceType::General => 1,
        _ => 2,
    }
}

const PALACE_FILES: u16 = 0b000111000;

pub const RED_PALACE: Bitboard =
    rank_row(0, PALACE_FILES) | rank_row(1, PALACE_FILES) | rank_row(2, PALACE_FILES);
pub const BLACK_PALACE: Bitboard =
    rank_row(7, PALACE_FILES) | rank_row(8, PALACE_FILES) | rank_row(9, PALACE_FILES);

/// Ranks 0..=4.
pub const RED_SIDE: Bitboard = (1u128 << (5 * FILE_COUNT as u32)) - 1;
/// Ranks 5..=9.
pub const BLACK_SIDE: Bitboard = BOARD_MASK & !RED_SIDE;

#[inline]
pub const fn palace(color: Color) -> Bitboard {
    match color {
        Color::Red => RED_PALACE,
        Color::Black => BLACK_PALACE,
    }
}

/// Squares on `color`'s own side of the river.
#[inline]
pub const fn home_side(color: Color) -> Bitboard {
    match color {
        Color::Red => RED_SIDE,
        Color::Black => BLACK_SIDE,
    }
}

/// True once a piece of `color` standing on `square` is across the river.
#[inline]
pub const fn has_crossed_river(color: Color, square: Square) -> bool {
    home_side(color) & square_mask(square) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_bitboards_are_disjoint_and_hold_thirty_two_pieces() {
        let mut union = 0u128;
        let mut total = 0u32;
        for bits in STARTING_POSITION {
            assert_eq!(union & bits, 0);
            union |= bits;
            total += bits.count_ones();
        }
        assert_eq!(total, 32);
        assert_eq!(union & !BOARD_MASK, 0);
    }

    #[test]
    fn starting_counts_match_kind_limits() {
        for piece in ALL_PIECES {
            assert_eq!(
                STARTING_POSITION[piece.index()].count_ones(),
                max_piece_count(piece.piece_type)
            );
        }
    }

    #[test]
    fn red_general_starts_on_e0() {
        let general = Piece::new(PieceType::General, Color::Red);
        assert_eq!(STARTING_POSITION[general.index()], square_mask(4));
    }

    #[test]
    fn palaces_are_three_by_three() {
        assert_eq!(RED_PALACE.count_ones(), 9);
        assert_eq!(BLACK_PALACE.count_ones(), 9);
        assert_ne!(RED_PALACE & square_mask(3), 0);
        assert_eq!(RED_PALACE & square_mask(6), 0);
        assert_ne!(BLACK_PALACE & square_mask(85), 0);
    }

    #[test]
    fn river_splits_the_board_between_ranks_four_and_five() {
        assert_eq!(RED_SIDE.count_ones(), 45);
        assert_eq!(BLACK_SIDE.count_ones(), 45);
        assert!(!has_crossed_river(Color::Red, 44));
        assert!(has_crossed_river(Color::Red, 45));
        assert!(!has_crossed_river(Color::Black, 45));
        assert!(has_crossed_river(Color::Black, 44));
    }
}
