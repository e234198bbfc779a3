//! Plain-text board rendering.
//!
//! Ten rows, rank 9 at the top, nine space-separated glyphs per row. Empty
//! squares print as `.`, Red pieces in uppercase and Black in lowercase.
//! `utils::board_parser` reads the same layout back.

use crate::game_state::{game_state::GameState, xiangqi_types::*};

pub const EMPTY_GLYPH: char = '.';

pub fn render_game_state(game_state: &GameState) -> String {
    render_rows(|square| {
        game_state
            .piece_at(square)
            .map_or(EMPTY_GLYPH, Piece::glyph)
    })
}

/// One bitboard in the same 10x9 layout: `1` for a set bit, `.` otherwise.
pub fn render_bitboard(bits: Bitboard) -> String {
    render_rows(|square| {
        if bits & square_mask(square) != 0 {
            '1'
        } else {
            EMPTY_GLYPH
        }
    })
}

fn render_rows(glyph_at: impl Fn(Square) -> char) -> String {
    let mut out = String::with_capacity(RANK_COUNT as usize * FILE_COUNT as usize * 2);

    for rank in (0..RANK_COUNT).rev() {
        for file in 0..FILE_COUNT {
            let square = rank * FILE_COUNT + file;
            out.push(glyph_at(square));

            if file < FILE_COUNT - 1 {
                out.push(' ');
            }
        }

        if rank > 0 {
            out.push('\n');
        }
    }

    out
}
