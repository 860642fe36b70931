// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, game_state, matrix, placement};
use rand::prelude::*;

// Picks a tally index weighted by what is left, and takes it out.
fn draw<R: Rng + ?Sized>(tally: &mut [u8], rng: &mut R) -> Option<u8> {
    let total = tally.iter().map(|&c| c as u32).sum::<u32>();
    if total == 0 {
        return None;
    }
    let mut pick = rng.random_range(0..total);
    for (idx, count) in (0u8..).zip(tally.iter_mut()) {
        if pick < *count as u32 {
            *count -= 1;
            return Some(idx);
        }
        pick -= *count as u32;
    }
    None
}

// A plausible-looking turn drawn from what is left in the bag. No dictionary,
// and the engine may still reject it; callers just try again.
pub fn random_turn_input<R: Rng + ?Sized>(
    engine: &game_state::GameEngine,
    rng: &mut R,
    max_len: i8,
) -> placement::TurnInput {
    let game_config = engine.game_config();
    let alphabet = game_config.alphabet();
    let board_layout = game_config.board_layout();
    let dim = board_layout.dim();
    let board = engine.board();
    let direction = if rng.random_bool(0.5) {
        matrix::Direction::Across
    } else {
        matrix::Direction::Down
    };
    let len = rng.random_range(2..=max_len.max(2));

    let (anchor_row, anchor_col) = if board.is_empty() {
        (board_layout.star_row(), board_layout.star_col())
    } else {
        let occupied = dim
            .cells()
            .filter(|&(r, c)| board.is_occupied(r, c))
            .collect::<Vec<_>>();
        *occupied
            .choose(rng)
            .unwrap_or(&(board_layout.star_row(), board_layout.star_col()))
    };
    let (lane, anchor_idx) = dim.lane_idx(direction, anchor_row, anchor_col);
    let lane_len = dim.lane(direction, lane).len();
    let start_idx = (anchor_idx - rng.random_range(0..len)).clamp(0, (lane_len - len).max(0));
    let (start_row, start_col) = dim.row_col(direction, lane, start_idx);

    let mut tally = engine.bag().0.to_vec();
    let mut word = String::new();
    let mut blank_indices = Vec::new();
    for i in 0..len.min(lane_len - start_idx) {
        let (r, c) = dim.row_col(direction, lane, start_idx + i);
        if let Some(tile) = board.tile_at(alphabet, r, c) {
            word.push(tile.letter);
            continue;
        }
        match draw(&mut tally, rng) {
            Some(alphabet::BLANK) => {
                let code = rng.random_range(1..alphabet.len());
                blank_indices.push(word.len());
                word.push(alphabet.label(code).unwrap_or('E'));
            }
            Some(idx) => word.push(alphabet.label(idx).unwrap_or('E')),
            None => break,
        }
    }

    placement::TurnInput {
        word,
        start_row,
        start_col,
        direction,
        blank_indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_config;
    use rand::SeedableRng;

    #[test]
    fn opening_turns_cover_the_star() {
        let game_config = game_config::make_common_english_game_config();
        let mut engine = game_state::GameEngine::new(&game_config);
        engine.start(&["a", "b"]).unwrap();
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(7);
        for _ in 0..50 {
            let input = random_turn_input(&engine, &mut rng, 7);
            assert!(input.word.len() >= 2);
            assert!(engine.preview(&input).is_ok(), "{:?}", input);
        }
    }

    #[test]
    fn draws_respect_tally() {
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(1);
        let mut tally = vec![0, 2, 0, 1];
        let mut drawn = (0..3)
            .filter_map(|_| draw(&mut tally, &mut rng))
            .collect::<Vec<_>>();
        drawn.sort_unstable();
        assert_eq!(drawn, vec![1, 1, 3]);
        assert_eq!(draw(&mut tally, &mut rng), None);
    }
}
