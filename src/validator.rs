// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, error::MoveError, game_config, placement};

// Runs the placement rules in order and stops at the first failure.
// On success, returns the placements for the scorer. Nothing is mutated.
pub fn validate(
    game_config: &game_config::GameConfig,
    board: &board::Board,
    input: &placement::TurnInput,
) -> Result<Vec<placement::Placement>, MoveError> {
    let placements = placement::generate(game_config.alphabet(), board, input)?;

    if !placements.iter().any(|p| p.is_new) {
        return Err(MoveError::NoNewTiles);
    }

    if board.is_empty() {
        let board_layout = game_config.board_layout();
        let (star_row, star_col) = (board_layout.star_row(), board_layout.star_col());
        if !placements
            .iter()
            .any(|p| p.row == star_row && p.col == star_col)
        {
            return Err(MoveError::MustCoverCenter);
        }
        return Ok(placements);
    }

    let connected = placements
        .iter()
        .any(|p| !p.is_new || board.has_neighbor(p.row, p.col));
    if !connected {
        return Err(MoveError::Disconnected);
    }

    check_one_sided_extension(&placements)?;
    check_word_terminated(board, input, placements.len())?;

    Ok(placements)
}

// An existing fragment may only be grown on one side. Any run of two or more
// board tiles that starts after the first typed letter must end the word.
// A lone crossed tile is not a fragment in this direction.
fn check_one_sided_extension(placements: &[placement::Placement]) -> Result<(), MoveError> {
    let len = placements.len();
    let mut i = 0;
    while i < len {
        if placements[i].is_new {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < len && !placements[i].is_new {
            i += 1;
        }
        if i - run_start > 1 && run_start > 0 && i < len {
            return Err(MoveError::DoubleSidedExtension);
        }
    }
    Ok(())
}

// The typed word must be the whole word on the board in its direction.
fn check_word_terminated(
    board: &board::Board,
    input: &placement::TurnInput,
    len: usize,
) -> Result<(), MoveError> {
    let (dr, dc) = input.direction.delta();
    let before = (input.start_row - dr, input.start_col - dc);
    let after = (
        input.start_row + dr * len as i8,
        input.start_col + dc * len as i8,
    );
    for (row, col) in [before, after] {
        if board.is_occupied(row, col) {
            return Err(MoveError::WordNotTerminated { row, col });
        }
    }
    Ok(())
}
