//! General attack tables: one orthogonal step, confined to the palace.

use crate::game_state::xiangqi_rules::palace;
use crate::game_state::xiangqi_types::*;

pub const GENERAL_ATTACKS: [Bitboard; SQUARE_COUNT] = generate_general_attacks();

#[inline]
pub const fn general_attacks(square: Square) -> Bitboard {
    if is_on_board(square) {
        GENERAL_ATTACKS[square as usize]
    } else {
        0
    }
}

#[inline]
pub const fn general_moves(color: Color, square: Square) -> Bitboard {
    let palace = palace(color);
    if palace & square_mask(square) == 0 {
        return 0;
    }
    general_attacks(square) & palace
}

const fn generate_general_attacks() -> [Bitboard; SQUARE_COUNT] {
    let mut table = [0u128; SQUARE_COUNT];
    let mut sq = 0usize;

    while sq < SQUARE_COUNT {
        let square = sq as Square;
        let mut attacks = 0u128;

        attacks |= set_if_valid(square, 0, 1);
        attacks |= set_if_valid(square, 0, -1);
        attacks |= set_if_valid(square, 1, 0);
        attacks |= set_if_valid(square, -1, 0);

        table[sq] = attacks;
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
    fn general_on_back_rank_has_three_palace_steps() {
        assert_eq!(general_moves(Color::Red, 4).count_ones(), 3);
        assert_eq!(general_moves(Color::Black, 85).count_ones(), 3);
    }

    #[test]
    fn general_on_palace_edge_cannot_step_out() {
        // d0 -> c0 leaves the palace.
        let moves = general_moves(Color::Red, 3);
        assert_eq!(moves & square_mask(2), 0);
        assert_eq!(moves, square_mask(4) | square_mask(12));
    }

    #[test]
    fn corner_general_attack_table_has_two_entries() {
        assert_eq!(general_attacks(0).count_ones(), 2);
    }
}
