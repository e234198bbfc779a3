//! Authoritative board state.
//!
//! `GameState` owns one bitboard per piece kind (14 in total), occupancy
//! caches derived from them, the side to move and the LIFO undo stack. The
//! bitboards are only mutated by the move executor in
//! `move_generation::legal_move_apply`, after validation has succeeded.

use crate::errors::{BoardParseError, IllegalMoveReason};
use crate::game_state::xiangqi_rules::STARTING_POSITION;
use crate::game_state::xiangqi_types::*;
use crate::move_generation::legal_move_apply::{make_move, undo_move};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::utils::board_parser::parse_board;
use crate::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Bitboard arena, indexed by `Piece::index` ---
    pub(crate) pieces: [Bitboard; PIECE_KIND_COUNT],

    // Occupancy caches, always rebuilt together with `pieces`.
    pub(crate) occupancy_by_color: [Bitboard; 2],
    pub(crate) occupancy_all: Bitboard,

    pub(crate) side_to_move: Color,

    // --- Make/unmake stack ---
    pub(crate) undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [0; PIECE_KIND_COUNT],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: Color::Red,
            undo_stack: Vec::new(),
        }
    }
}

impl GameState {
    /// Empty board with Red to move.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting layout with Red to move.
    pub fn new_game() -> Self {
        let mut game_state = Self {
            pieces: STARTING_POSITION,
            ..Self::default()
        };
        game_state.recalc_occupancy();
        game_state
    }

    /// Builds a position from the text layout produced by `render`.
    pub fn from_text(text: &str, side_to_move: Color) -> Result<Self, BoardParseError> {
        parse_board(text, side_to_move)
    }

    #[inline]
    pub fn render(&self) -> String {
        render_game_state(self)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Bitboard of one kind.
    #[inline]
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupancy_all
    }

    #[inline]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    /// The unique kind whose bitboard contains `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if !is_on_board(square) || self.occupancy_all & square_mask(square) == 0 {
            return None;
        }
        let mask = square_mask(square);
        ALL_PIECES
            .into_iter()
            .find(|piece| self.pieces[piece.index()] & mask != 0)
    }

    #[inline]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        if !is_on_board(square) {
            return None;
        }
        let mask = square_mask(square);
        if self.occupancy_by_color[Color::Red.index()] & mask != 0 {
            Some(Color::Red)
        } else if self.occupancy_by_color[Color::Black.index()] & mask != 0 {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Coordinate form of `piece_at`; off-board coordinates hold nothing.
    pub fn piece_at_coordinates(&self, file: u8, rank: u8) -> Option<Piece> {
        to_square(file, rank)
            .ok()
            .and_then(|square| self.piece_at(square))
    }

    /// Applied moves, oldest first.
    #[inline]
    pub fn history(&self) -> &[UndoState] {
        &self.undo_stack
    }

    #[inline]
    pub fn ply(&self) -> usize {
        self.undo_stack.len()
    }

    /// Validates and commits a move given in file/rank coordinates.
    pub fn make_move(
        &mut self,
        file_from: u8,
        rank_from: u8,
        file_to: u8,
        rank_to: u8,
    ) -> Result<(), IllegalMoveReason> {
        make_move(self, file_from, rank_from, file_to, rank_to)
    }

    pub fn undo_move(&mut self) -> Result<UndoState, IllegalMoveReason> {
        undo_move(self)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self)
    }

    /// `(file_from, rank_from, file_to, rank_to)` form of `legal_moves`.
    pub fn legal_move_tuples(&self) -> Vec<(u8, u8, u8, u8)> {
        legal_moves(self).into_iter().map(Move::to_coordinates).collect()
    }

    pub(crate) fn relocate(&mut self, piece: Piece, from: Square, to: Square) {
        let bits = &mut self.pieces[piece.index()];
        *bits &= !square_mask(from);
        *bits |= square_mask(to);
        self.recalc_occupancy();
    }

    pub(crate) fn remove_piece(&mut self, piece: Piece, square: Square) {
        self.pieces[piece.index()] &= !square_mask(square);
        self.recalc_occupancy();
    }

    pub(crate) fn place_piece(&mut self, piece: Piece, square: Square) {
        self.pieces[piece.index()] |= square_mask(square);
        self.recalc_occupancy();
    }

    pub(crate) fn recalc_occupancy(&mut self) {
        for color in [Color::Red, Color::Black] {
            self.occupancy_by_color[color.index()] = ALL_PIECES
                .iter()
                .filter(|piece| piece.color == color)
                .fold(0u128, |acc, piece| acc | self.pieces[piece.index()]);
        }
        self.occupancy_all = self.occupancy_by_color[Color::Red.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }
}
