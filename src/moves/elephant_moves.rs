//! Elephant destination sets: two diagonal steps, never across the river,
//! and only when the midpoint (the eye) is empty.

use crate::game_state::xiangqi_rules::home_side;
use crate::game_state::xiangqi_types::*;

pub const ELEPHANT_STEPS: [(i32, i32); 4] = [(2, 2), (2, -2), (-2, 2), (-2, -2)];

/// Eye square of an elephant step.
#[inline]
pub const fn elephant_eye(square: Square, file_step: i32, rank_step: i32) -> Option<Square> {
    offset_square(square, file_step / 2, rank_step / 2)
}

pub fn elephant_moves(color: Color, square: Square, occupancy: Bitboard) -> Bitboard {
    let home = home_side(color);
    if home & square_mask(square) == 0 {
        return 0;
    }

    let mut moves = 0u128;
    for (file_step, rank_step) in ELEPHANT_STEPS {
        let Some(target) = offset_square(square, file_step, rank_step) else {
            continue;
        };
        let Some(eye) = elephant_eye(square, file_step, rank_step) else {
            continue;
        };
        if occupancy & square_mask(eye) == 0 {
            moves |= square_mask(target);
        }
    }

    moves & home
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_elephant_from_c0_reaches_a2_and_e2() {
        let moves = elephant_moves(Color::Red, 2, 0);
        assert_eq!(moves, square_mask(18) | square_mask(22));
    }

    #[test]
    fn elephant_cannot_cross_the_river() {
        // Red elephant on e4 (rank 4) only goes back to c2 / g2.
        let moves = elephant_moves(Color::Red, 40, 0);
        assert_eq!(moves, square_mask(20) | square_mask(24));
        // Black elephant on e5 only goes to c7 / g7.
        let moves = elephant_moves(Color::Black, 49, 0);
        assert_eq!(moves, square_mask(65) | square_mask(69));
    }

    #[test]
    fn blocked_eye_removes_target() {
        // Eye d1 (12) blocks c0 -> e2.
        let moves = elephant_moves(Color::Red, 2, square_mask(12));
        assert_eq!(moves, square_mask(18));
    }
}
