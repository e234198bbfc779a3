//! Text-layout-to-GameState parser.
//!
//! Reads the 10-row layout produced by `render_game_state` back into a
//! position. Blank lines around the layout are ignored; the history of the
//! returned state is empty.

use crate::errors::BoardParseError;
use crate::game_state::xiangqi_rules::max_piece_count;
use crate::game_state::{game_state::GameState, xiangqi_types::*};
use crate::utils::render_game_state::EMPTY_GLYPH;

pub fn parse_board(text: &str, side_to_move: Color) -> Result<GameState, BoardParseError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .collect();

    if rows.len() != RANK_COUNT as usize {
        return Err(BoardParseError::RowCount(rows.len()));
    }

    let mut game_state = GameState::new_empty();
    game_state.side_to_move = side_to_move;

    for (row_idx, row) in rows.iter().enumerate() {
        let rank = RANK_COUNT - 1 - row_idx as u8;
        let glyphs: Vec<char> = row
            .split_whitespace()
            .map(|cell| {
                let mut chars = cell.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Ok(ch),
                    _ => Err(BoardParseError::BadCell(cell.to_owned())),
                }
            })
            .collect::<Result<_, _>>()?;

        if glyphs.len() != FILE_COUNT as usize {
            return Err(BoardParseError::ColumnCount {
                row: row_idx,
                found: glyphs.len(),
            });
        }

        for (file, ch) in glyphs.into_iter().enumerate() {
            if ch == EMPTY_GLYPH {
                continue;
            }
            let piece = Piece::from_glyph(ch).ok_or(BoardParseError::UnknownGlyph(ch))?;
            let square = rank * FILE_COUNT + file as u8;
            game_state.pieces[piece.index()] |= square_mask(square);

            let max = max_piece_count(piece.piece_type);
            if game_state.pieces[piece.index()].count_ones() > max {
                return Err(BoardParseError::TooManyPieces { glyph: ch, max });
            }
        }
    }

    game_state.recalc_occupancy();
    Ok(game_state)
}

/// Parses `red` / `black` (or `r` / `b`, any case).
pub fn parse_side_to_move(side_part: &str) -> Result<Color, BoardParseError> {
    match side_part.trim().to_ascii_lowercase().as_str() {
        "red" | "r" => Ok(Color::Red),
        "black" | "b" => Ok(Color::Black),
        _ => Err(BoardParseError::UnknownSide(side_part.to_owned())),
    }
}
