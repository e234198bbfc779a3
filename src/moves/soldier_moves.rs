//! Soldier move tables.
//!
//! A soldier always steps one square forward. Once it stands across the
//! river it may also step one square sideways. It never moves backward.

use crate::game_state::xiangqi_rules::has_crossed_river;
use crate::game_state::xiangqi_types::*;

pub const RED_SOLDIER_MOVES: [Bitboard; SQUARE_COUNT] = generate_soldier_moves(Color::Red);
pub const BLACK_SOLDIER_MOVES: [Bitboard; SQUARE_COUNT] = generate_soldier_moves(Color::Black);

#[inline]
pub const fn soldier_moves(color: Color, square: Square) -> Bitboard {
    if !is_on_board(square) {
        return 0;
    }
    match color {
        Color::Red => RED_SOLDIER_MOVES[square as usize],
        Color::Black => BLACK_SOLDIER_MOVES[square as usize],
    }
}

const fn generate_soldier_moves(color: Color) -> [Bitboard; SQUARE_COUNT] {
    let mut table = [0u128; SQUARE_COUNT];
    let mut sq = 0usize;

    while sq < SQUARE_COUNT {
        let square = sq as Square;
        let mut moves = set_if_valid(square, 0, color.forward());

        if has_crossed_river(color, square) {
            moves |= set_if_valid(square, 1, 0);
            moves |= set_if_valid(square, -1, 0);
        }

        table[sq] = moves;
        sq += 1;
    }

    table
}

const fn set_if_valid(square: Square, file_step: i32, rank_step: i32) -> Bitboard {
    match offset_square(square, file_step, rank_step) {
        Some(target) => square_mask(target),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_soldier_before_river_only_steps_forward() {
        // e3 -> e4
        assert_eq!(soldier_moves(Color::Red, 31), square_mask(40));
        // e4 is still on Red's side.
        assert_eq!(soldier_moves(Color::Red, 40), square_mask(49));
    }

    #[test]
    fn red_soldier_across_river_gains_sideways_steps() {
        assert_eq!(
            soldier_moves(Color::Red, 49),
            square_mask(58) | square_mask(48) | square_mask(50)
        );
    }

    #[test]
    fn black_soldier_moves_towards_rank_zero() {
        assert_eq!(soldier_moves(Color::Black, 58), square_mask(49));
        assert_eq!(
            soldier_moves(Color::Black, 40),
            square_mask(31) | square_mask(39) | square_mask(41)
        );
    }

    #[test]
    fn soldier_on_last_rank_only_moves_sideways() {
        assert_eq!(
            soldier_moves(Color::Red, 85),
            square_mask(84) | square_mask(86)
        );
        assert_eq!(soldier_moves(Color::Red, 81), square_mask(82));
    }
}
