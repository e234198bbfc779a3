//! Move-tree node counting.
//!
//! Walks every move sequence to a fixed depth with commit/undo on a single
//! mutable state. The multi-threaded variant hands each root move to its own
//! thread together with a private copy of the position.

use std::sync::Arc;
use std::thread;

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{commit_move, undo_move};
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::legal_move_checks::ValidatedMove;
use crate::move_generation::move_generator::{
    MoveGenResult, MoveGenerationError, MoveGenerator,
};

/// Deepest tree `perft` will walk.
pub const MAX_PERFT_DEPTH: u8 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
    }
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    perft_single_thread(generator, game_state, depth)
}

/// `perft` with the validating generator.
pub fn perft_legal(game_state: &GameState, depth: u8) -> MoveGenResult<PerftCounts> {
    perft(&LegalMoveGenerator, game_state, depth)
}

pub fn perft_single_thread<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    check_depth(depth)?;
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut scratch = game_state.clone();
    let mut total = PerftCounts::default();

    for mv in generator.generate_moves(game_state) {
        perft_recurse(generator, &mut scratch, mv, depth, 1, &mut total)?;
    }

    Ok(total)
}

pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    check_depth(depth)?;
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let root_moves = generator.generate_moves(game_state);
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let generator_ref = Arc::clone(&generator);
        let mut scratch = game_state.clone();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            let result =
                perft_recurse(generator_ref.as_ref(), &mut scratch, mv, depth, 1, &mut local);
            (result, local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let (result, local) = handle.join().map_err(|_| {
            MoveGenerationError::InvalidState("perft worker thread panicked".to_owned())
        })?;
        result?;
        total.merge(local);
    }

    Ok(total)
}

fn check_depth(depth: u8) -> MoveGenResult<()> {
    if depth > MAX_PERFT_DEPTH {
        return Err(MoveGenerationError::DepthTooLarge {
            depth,
            max: MAX_PERFT_DEPTH,
        });
    }
    Ok(())
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &mut GameState,
    mv: ValidatedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if current_depth == search_depth {
        counts.nodes += 1;
        if mv.is_capture() {
            counts.captures += 1;
        }
        return Ok(());
    }

    commit_move(game_state, mv)?;
    for child in generator.generate_moves(game_state) {
        perft_recurse(generator, game_state, child, search_depth, current_depth + 1, counts)?;
    }
    undo_move(game_state)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::FastMoveGenerator;

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let game = GameState::new_game();
        let counts = perft_legal(&game, 0).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn start_position_depth_one() {
        let game = GameState::new_game();
        let counts = perft_legal(&game, 1).expect("perft should run");
        assert_eq!(counts, PerftCounts { nodes: 44, captures: 2 });
    }

    #[test]
    fn start_position_depth_two() {
        let game = GameState::new_game();
        let counts = perft(&FastMoveGenerator, &game, 2).expect("perft should run");
        assert_eq!(counts, PerftCounts { nodes: 1926, captures: 72 });
    }

    #[test]
    fn multi_threaded_matches_single_thread() {
        let game = GameState::new_game();
        let single = perft_legal(&game, 2).expect("perft should run");
        let multi = perft_multi_threaded(Arc::new(LegalMoveGenerator), &game, 2)
            .expect("threaded perft should run");
        assert_eq!(single, multi);
    }

    #[test]
    fn depth_past_the_cap_is_refused() {
        let game = GameState::new_game();
        let too_deep = |depth| MoveGenerationError::DepthTooLarge {
            depth,
            max: MAX_PERFT_DEPTH,
        };

        assert_eq!(
            perft_legal(&game, MAX_PERFT_DEPTH + 1),
            Err(too_deep(MAX_PERFT_DEPTH + 1))
        );
        assert_eq!(
            perft_multi_threaded(Arc::new(LegalMoveGenerator), &game, 20),
            Err(too_deep(20))
        );
        assert_eq!(perft(&FastMoveGenerator, &game, u8::MAX), Err(too_deep(u8::MAX)));
    }

    #[test]
    fn perft_leaves_input_state_untouched() {
        let game = GameState::new_game();
        perft_legal(&game, 2).expect("perft should run");
        assert_eq!(game, GameState::new_game());
    }
}
