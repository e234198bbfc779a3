//! Random game playouts.
//!
//! Used to reach arbitrary mid-game positions for tests, the bench and the
//! console's `--random-plies` option.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::commit_move;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;

/// Plays up to `plies` uniformly random moves on `game_state`.
///
/// Stops early if the side to move has nothing to play. Returns the number
/// of moves actually committed.
pub fn random_playout<R: Rng + ?Sized>(
    game_state: &mut GameState,
    plies: usize,
    rng: &mut R,
) -> usize {
    let mut played = 0;

    while played < plies {
        let moves = LegalMoveGenerator.generate_moves(game_state);
        let Some(&validated) = moves.choose(rng) else {
            break;
        };
        if let Err(reason) = commit_move(game_state, validated) {
            warn!(?reason, "generated move refused at commit");
            break;
        }
        played += 1;
    }

    debug!(requested = plies, played, "random playout finished");
    played
}

/// Deterministic playout from the starting position.
pub fn seeded_playout(seed: u64, plies: usize) -> GameState {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game_state = GameState::new_game();
    random_playout(&mut game_state, plies, &mut rng);
    game_state
}
