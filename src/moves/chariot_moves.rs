//! Orthogonal ray tracing shared by the chariot and the cannon.

use crate::game_state::xiangqi_types::*;

pub const ORTHOGONAL_STEPS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub const CHARIOT_RAYS: [Bitboard; SQUARE_COUNT] = generate_chariot_rays();

/// Squares a chariot on `square` reaches, up to and including the first occupied square on each ray.
#[inline]
pub fn chariot_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    ORTHOGONAL_STEPS
        .iter()
        .fold(0u128, |acc, &(file_step, rank_step)| {
            acc | trace_ray(square, file_step, rank_step, occupancy)
        })
}

/// Squares strictly between `a` and `b` when they share a file or a rank, otherwise empty.
pub fn squares_between(a: Square, b: Square) -> Bitboard {
    let file_delta = file_of(b) - file_of(a);
    let rank_delta = rank_of(b) - rank_of(a);
    if (file_delta != 0 && rank_delta != 0) || a == b {
        return 0;
    }

    let step = (file_delta.signum(), rank_delta.signum());
    let mut between = 0u128;
    let mut current = a;
    while let Some(next) = offset_square(current, step.0, step.1) {
        if next == b {
            break;
        }
        between |= square_mask(next);
        current = next;
    }
    between
}

pub(crate) fn trace_ray(
    square: Square,
    file_step: i32,
    rank_step: i32,
    occupancy: Bitboard,
) -> Bitboard {
    let mut attacks = 0u128;
    let mut current = square;

    while let Some(target) = offset_square(current, file_step, rank_step) {
        let bit = square_mask(target);
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        current = target;
    }

    attacks
}

const fn generate_chariot_rays() -> [Bitboard; SQUARE_COUNT] {
    let mut table = [0u128; SQUARE_COUNT];
    let mut sq = 0usize;

    while sq < SQUARE_COUNT {
        let file = sq % FILE_COUNT as usize;
        let rank = sq / FILE_COUNT as usize;
        let mut rays = 0u128;
        let mut other = 0usize;

        while other < SQUARE_COUNT {
            let same_file = other % FILE_COUNT as usize == file;
            let same_rank = other / FILE_COUNT as usize == rank;
            if other != sq && (same_file || same_rank) {
                rays |= 1u128 << other;
            }
            other += 1;
        }

        table[sq] = rays;
        sq += 1;
    }

    table
}
