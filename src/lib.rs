//! Crate root module declarations for the xiangqi rules engine.
//!
//! Exposes the board state, per-piece geometry tables, move validation and
//! execution, move generation, the HTTP front end and text utilities so the
//! binaries, benches and tests share stable module paths.

pub mod errors;

pub mod game_state {
    pub mod game_state;
    pub mod undo_state;
    pub mod xiangqi_rules;
    pub mod xiangqi_types;
}

pub mod moves {
    pub mod advisor_moves;
    pub mod cannon_moves;
    pub mod chariot_moves;
    pub mod elephant_moves;
    pub mod general_moves;
    pub mod horse_moves;
    pub mod soldier_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod move_generator;
    pub mod perft;
}

pub mod server {
    pub mod http_api;
}

pub mod utils {
    pub mod board_parser;
    pub mod random_playout;
    pub mod render_game_state;
}
