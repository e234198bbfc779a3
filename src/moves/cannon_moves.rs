//! Cannon destination sets.
//!
//! A cannon slides like a chariot when it does not capture. To capture it
//! must jump exactly one occupied square (the screen, of either color) and
//! land on the first occupied square beyond it.

use crate::game_state::xiangqi_types::*;
use crate::moves::chariot_moves::{chariot_attacks, ORTHOGONAL_STEPS};

/// Empty squares reachable without jumping.
#[inline]
pub fn cannon_quiet_moves(square: Square, occupancy: Bitboard) -> Bitboard {
    chariot_attacks(square, occupancy) & !occupancy
}

/// Occupied squares (any color) sitting directly behind exactly one screen.
pub fn cannon_capture_targets(square: Square, occupancy: Bitboard) -> Bitboard {
    let mut targets = 0u128;

    for (file_step, rank_step) in ORTHOGONAL_STEPS {
        let mut current = square;
        let mut screen_found = false;

        while let Some(next) = offset_square(current, file_step, rank_step) {
            if occupancy & square_mask(next) != 0 {
                if screen_found {
                    targets |= square_mask(next);
                    break;
                }
                screen_found = true;
            }
            current = next;
        }
    }

    targets
}

/// Quiet moves plus capture targets; the caller removes own pieces.
#[inline]
pub fn cannon_moves(square: Square, occupancy: Bitboard) -> Bitboard {
    cannon_quiet_moves(square, occupancy) | cannon_capture_targets(square, occupancy)
}
