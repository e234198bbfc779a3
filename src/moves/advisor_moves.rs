//! Advisor attack tables: one diagonal step, confined to the palace.

use crate::game_state::xiangqi_rules::palace;
use crate::game_state::xiangqi_types::*;

pub const ADVISOR_ATTACKS: [Bitboard; SQUARE_COUNT] = generate_advisor_attacks();

#[inline]
pub const fn advisor_attacks(square: Square) -> Bitboard {
    if is_on_board(square) {
        ADVISOR_ATTACKS[square as usize]
    } else {
        0
    }
}

/// Diagonal steps that start and end inside `color`'s palace.
#[inline]
pub const fn advisor_moves(color: Color, square: Square) -> Bitboard {
    let palace = palace(color);
    if palace & square_mask(square) == 0 {
        return 0;
    }
    advisor_attacks(square) & palace
}

const fn generate_advisor_attacks() -> [Bitboard; SQUARE_COUNT] {
    let mut table = [0u128; SQUARE_COUNT];
    let mut sq = 0usize;

    while sq < SQUARE_COUNT {
        let square = sq as Square;
        let mut attacks = 0u128;

        attacks |= set_if_valid(square, 1, 1);
        attacks |= set_if_valid(square, 1, -1);
        attacks |= set_if_valid(square, -1, 1);
        attacks |= set_if_valid(square, -1, -1);

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
