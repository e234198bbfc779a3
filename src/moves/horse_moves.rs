//! Horse destination sets.
//!
//! The horse moves one step orthogonally and then one step diagonally
//! outward. The orthogonal step's square (the leg) must be empty.

use crate::game_state::xiangqi_types::*;

/// `(file_step, rank_step, leg_file_step, leg_rank_step)`.
pub const HORSE_STEPS: [(i32, i32, i32, i32); 8] = [
    (1, 2, 0, 1),
    (-1, 2, 0, 1),
    (2, 1, 1, 0),
    (2, -1, 1, 0),
    (1, -2, 0, -1),
    (-1, -2, 0, -1),
    (-2, 1, -1, 0),
    (-2, -1, -1, 0),
];

pub const HORSE_TARGETS: [Bitboard; SQUARE_COUNT] = generate_horse_targets();

/// Unblocked horse targets from `square`.
#[inline]
pub const fn horse_targets(square: Square) -> Bitboard {
    if is_on_board(square) {
        HORSE_TARGETS[square as usize]
    } else {
        0
    }
}

/// Leg square for a horse jump of `(file_step, rank_step)`: one step along the two-step axis.
#[inline]
pub const fn horse_leg(square: Square, file_step: i32, rank_step: i32) -> Option<Square> {
    if file_step.abs() == 2 {
        offset_square(square, file_step / 2, 0)
    } else {
        offset_square(square, 0, rank_step / 2)
    }
}

/// Horse targets whose leg is empty.
pub fn horse_moves(square: Square, occupancy: Bitboard) -> Bitboard {
    let mut moves = 0u128;

    for (file_step, rank_step, leg_file, leg_rank) in HORSE_STEPS {
        let Some(target) = offset_square(square, file_step, rank_step) else {
            continue;
        };
        let Some(leg) = offset_square(square, leg_file, leg_rank) else {
            continue;
        };
        if occupancy & square_mask(leg) == 0 {
            moves |= square_mask(target);
        }
    }

    moves
}

const fn generate_horse_targets() -> [Bitboard; SQUARE_COUNT] {
    let mut table = [0u128; SQUARE_COUNT];
    let mut sq = 0usize;

    while sq < SQUARE_COUNT {
        let mut targets = 0u128;
        let mut i = 0usize;

        while i < HORSE_STEPS.len() {
            let (file_step, rank_step, _, _) = HORSE_STEPS[i];
            if let Some(target) = offset_square(sq as Square, file_step, rank_step) {
                targets |= 1u128 << target;
            }
            i += 1;
        }

        table[sq] = targets;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horse_in_the_open_has_eight_targets() {
        assert_eq!(horse_targets(40).count_ones(), 8);
        assert_eq!(horse_moves(40, 0), horse_targets(40));
    }

    #[test]
    fn corner_horse_has_two_targets() {
        assert_eq!(horse_targets(0).count_ones(), 2);
    }

    #[test]
    fn occupied_leg_blocks_both_jumps_on_that_side() {
        // Horse on e4 (40); leg e5 (49) blocks d6 and f6.
        let moves = horse_moves(40, square_mask(49));
        assert_eq!(moves & (square_mask(57) | square_mask(59)), 0);
        assert_eq!(moves.count_ones(), 6);
    }

    #[test]
    fn leg_lies_along_the_two_step_axis() {
        // b0 -> d1 has its leg on c0.
        assert_eq!(horse_leg(1, 2, 1), Some(2));
        // b0 -> c2 has its leg on b1.
        assert_eq!(horse_leg(1, 1, 2), Some(10));
    }
}
