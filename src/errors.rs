//! Error types returned by the rules engine.
//!
//! `IllegalMoveReason` is the single, closed set of reasons a move (or an
//! undo) can be refused. Every variant is a recoverable value; a refused move
//! never alters the game state. `BoardParseError` covers malformed text
//! layouts handed to the board parser.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
pub enum IllegalMoveReason {
    /// A coordinate lies outside files `0..9` or ranks `0..10`.
    #[error("square is outside the 9x10 board")]
    OutOfBounds,

    /// Origin and destination are the same square.
    #[error("origin and destination are the same square")]
    NullMove,

    #[error("no piece on the origin square")]
    EmptyOrigin,

    #[error("the piece on the origin square belongs to the side not on move")]
    WrongTurn,

    #[error("destination holds a piece of the moving side")]
    SelfCapture,

    /// A square the piece has to pass (path, horse leg, elephant eye) is occupied.
    #[error("the path of the move is blocked")]
    Blocked,

    /// Palace or river confinement violated.
    #[error("the move leaves the zone the piece is confined to")]
    OutOfZone,

    /// Distance or direction does not match the piece's movement pattern.
    #[error("the piece cannot move in that shape")]
    WrongShape,

    /// Cannon capture with nothing to jump over.
    #[error("cannon capture requires exactly one screen, found none")]
    NoScreen,

    /// Cannon capture across two or more pieces.
    #[error("cannon capture requires exactly one screen, found several")]
    ExtraScreen,

    #[error("there is no move to undo")]
    NoHistory,
}

impl IllegalMoveReason {
    /// Stable variant name, used on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            IllegalMoveReason::OutOfBounds => "OutOfBounds",
            IllegalMoveReason::NullMove => "NullMove",
            IllegalMoveReason::EmptyOrigin => "EmptyOrigin",
            IllegalMoveReason::WrongTurn => "WrongTurn",
            IllegalMoveReason::SelfCapture => "SelfCapture",
            IllegalMoveReason::Blocked => "Blocked",
            IllegalMoveReason::OutOfZone => "OutOfZone",
            IllegalMoveReason::WrongShape => "WrongShape",
            IllegalMoveReason::NoScreen => "NoScreen",
            IllegalMoveReason::ExtraScreen => "ExtraScreen",
            IllegalMoveReason::NoHistory => "NoHistory",
        }
    }

    /// True for the refined piece-geometry reasons.
    pub const fn is_geometry_violation(self) -> bool {
        matches!(
            self,
            IllegalMoveReason::Blocked
                | IllegalMoveReason::OutOfZone
                | IllegalMoveReason::WrongShape
                | IllegalMoveReason::NoScreen
                | IllegalMoveReason::ExtraScreen
        )
    }
}

/// Failure to read a text board layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("board layout must contain 10 rows, found {0}")]
    RowCount(usize),

    #[error("row {row} must contain 9 squares, found {found}")]
    ColumnCount { row: usize, found: usize },

    #[error("invalid piece glyph '{0}' in board layout")]
    UnknownGlyph(char),

    /// A whitespace-separated cell longer than one character.
    #[error("board cell '{0}' must be a single glyph")]
    BadCell(String),

    #[error("too many '{glyph}' pieces: at most {max} allowed")]
    TooManyPieces { glyph: char, max: u32 },

    #[error("invalid side-to-move field: {0}")]
    UnknownSide(String),
}
