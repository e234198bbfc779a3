//! Legal move enumeration.
//!
//! For every square held by the side to move, the piece's destination set is
//! built from the bitboard tables in `moves`. `LegalMoveGenerator` passes
//! each candidate through `validate_move`; `FastMoveGenerator` trusts the
//! destination sets and skips the re-check. Both emit moves ordered by
//! ascending origin square, then ascending destination square.

use tracing::warn;

use crate::game_state::{game_state::GameState, xiangqi_types::*};
use crate::move_generation::legal_move_checks::{validate_move, ValidatedMove};
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::advisor_moves::advisor_moves;
use crate::moves::cannon_moves::cannon_moves;
use crate::moves::chariot_moves::chariot_attacks;
use crate::moves::elephant_moves::elephant_moves;
use crate::moves::general_moves::general_moves;
use crate::moves::horse_moves::horse_moves;
use crate::moves::soldier_moves::soldier_moves;

pub struct LegalMoveGenerator;
pub struct FastMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_moves(&self, game_state: &GameState) -> Vec<ValidatedMove> {
        let turn = game_state.side_to_move();
        let mut legal = Vec::with_capacity(64);

        for candidate in candidate_moves(game_state) {
            match validate_move(game_state, turn, candidate) {
                Ok(validated) => legal.push(validated),
                Err(reason) => {
                    warn!(%candidate, ?reason, "generated move failed validation");
                }
            }
        }

        legal
    }
}

impl MoveGenerator for FastMoveGenerator {
    fn generate_moves(&self, game_state: &GameState) -> Vec<ValidatedMove> {
        let occupancy = game_state.occupied();
        candidate_moves(game_state)
            .map(|mv| {
                let moved = game_state.piece_at(mv.from);
                let captured = game_state.piece_at(mv.to);
                (mv, moved, captured)
            })
            .filter_map(|(mv, moved, captured)| {
                moved.map(|piece| ValidatedMove::new(mv, piece, captured, occupancy))
            })
            .collect()
    }
}

/// Moves available to the side to move, in generation order.
pub fn legal_moves(game_state: &GameState) -> Vec<Move> {
    LegalMoveGenerator
        .generate_moves(game_state)
        .into_iter()
        .map(|validated| validated.mv())
        .collect()
}

/// Destination set of `piece` standing on `from`: geometry, blocking and
/// zone rules applied, squares holding own pieces removed.
pub fn pseudo_legal_destinations(game_state: &GameState, piece: Piece, from: Square) -> Bitboard {
    let occupancy = game_state.occupied();
    let own = game_state.occupied_by(piece.color);

    let targets = match piece.piece_type {
        PieceType::Chariot => chariot_attacks(from, occupancy),
        PieceType::Cannon => cannon_moves(from, occupancy),
        PieceType::Horse => horse_moves(from, occupancy),
        PieceType::Elephant => elephant_moves(piece.color, from, occupancy),
        PieceType::Advisor => advisor_moves(piece.color, from),
        PieceType::General => general_moves(piece.color, from),
        PieceType::Soldier => soldier_moves(piece.color, from),
    };

    targets & !own & BOARD_MASK
}

fn candidate_moves(game_state: &GameState) -> impl Iterator<Item = Move> + '_ {
    let own = game_state.occupied_by(game_state.side_to_move());

    squares(own).flat_map(move |from| {
        let destinations = game_state
            .piece_at(from)
            .map(|piece| pseudo_legal_destinations(game_state, piece, from))
            .unwrap_or(0);
        squares(destinations).map(move |to| Move::new(from, to))
    })
}

#[cfg(test)]
mod tests {
    use super::{legal_moves, pseudo_legal_destinations, FastMoveGenerator, LegalMoveGenerator};
    use crate::game_state::game_state::GameState;
    use crate::game_state::xiangqi_types::*;
    use crate::move_generation::legal_move_checks::validate_move;
    use crate::move_generation::move_generator::MoveGenerator;
    use crate::utils::random_playout::seeded_playout;

    #[test]
    fn start_position_has_forty_four_moves() {
        let game = GameState::new_game();
        let moves = legal_moves(&game);
        assert_eq!(moves.len(), 44);

        for mv in &moves {
            let piece = game.piece_at(mv.from).expect("origin should be occupied");
            assert_eq!(piece.color, Color::Red);
        }
    }

    #[test]
    fn start_position_move_counts_per_piece_type() {
        let game = GameState::new_game();
        let count = |piece_type: PieceType| {
            legal_moves(&game)
                .into_iter()
                .filter(|mv| game.piece_at(mv.from).map(|p| p.piece_type) == Some(piece_type))
                .count()
        };

        assert_eq!(count(PieceType::Soldier), 5);
        assert_eq!(count(PieceType::Cannon), 24);
        assert_eq!(count(PieceType::Chariot), 4);
        assert_eq!(count(PieceType::Horse), 4);
        assert_eq!(count(PieceType::Elephant), 4);
        assert_eq!(count(PieceType::Advisor), 2);
        assert_eq!(count(PieceType::General), 1);
    }

    #[test]
    fn moves_are_ordered_by_origin_then_destination() {
        let game = seeded_playout(7, 30);
        let moves = legal_moves(&game);
        let mut sorted = moves.clone();
        sorted.sort_by_key(|mv| (mv.from, mv.to));
        assert_eq!(moves, sorted);
    }

    #[test]
    fn fast_generator_matches_legal_generator() {
        for seed in 0..16u64 {
            let game = seeded_playout(seed, 50);
            let legal = LegalMoveGenerator.generate_moves(&game);
            let fast = FastMoveGenerator.generate_moves(&game);
            assert_eq!(legal, fast, "seed {seed}\n{}", game.render());
        }
    }

    #[test]
    fn every_listed_move_validates() {
        for seed in 0..16u64 {
            let game = seeded_playout(seed, 60);
            for mv in legal_moves(&game) {
                assert!(validate_move(&game, game.side_to_move(), mv).is_ok());
            }
        }
    }

    #[test]
    fn tuples_match_moves() {
        let game = GameState::new_game();
        let tuples = game.legal_move_tuples();
        assert!(tuples.contains(&(4, 3, 4, 4)));
        assert!(tuples.contains(&(1, 2, 1, 9)));
        assert!(!tuples.contains(&(1, 0, 3, 1)));
    }

    #[test]
    fn off_board_origin_has_no_destinations() {
        let game = GameState::new_game();
        for piece in ALL_PIECES {
            for from in [90u8, 127, 200, 255] {
                assert_eq!(pseudo_legal_destinations(&game, piece, from), 0);
            }
        }
    }
}
