// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    bag, board,
    error::{self, ReconstructError},
    game_config,
    game_state::{self, GameEngine, GamePlayer, GameStatus, Turn},
    premium_tracker,
};

// What a persistence layer stores per game. Everything else is rebuilt.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub status: GameStatus,
    pub players: Vec<GamePlayer>,
    pub current_player: u8,
    pub board_state: board::BoardSnapshot,
    pub turns: Vec<Turn>,
}

impl GameRecord {
    pub fn to_json(&self) -> error::Returns<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> error::Returns<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl<'a> GameEngine<'a> {
    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            status: self.status(),
            players: self.players().to_vec(),
            current_player: self.current_player(),
            board_state: self.board_snapshot(),
            turns: self.history().to_vec(),
        }
    }

    // Rebuilds an engine from a stored game, refusing anything inconsistent.
    pub fn from_record(
        game_config: &'a game_config::GameConfig<'a>,
        record: &GameRecord,
    ) -> Result<Self, ReconstructError> {
        let result = rebuild(game_config, record);
        if let Err(err) = &result {
            log::warn!("cannot reload game: {}", err);
        }
        result
    }
}

fn load_board(
    game_config: &game_config::GameConfig,
    snapshot: &board::BoardSnapshot,
    what: &str,
) -> Result<board::Board, ReconstructError> {
    let dim = game_config.board_layout().dim();
    board::Board::from_snapshot(dim, game_config.alphabet(), snapshot)
        .ok_or_else(|| ReconstructError::InvalidBoard(what.to_string()))
}

fn rebuild<'a>(
    game_config: &'a game_config::GameConfig<'a>,
    record: &GameRecord,
) -> Result<GameEngine<'a>, ReconstructError> {
    let alphabet = game_config.alphabet();
    let board_layout = game_config.board_layout();
    let num_players = record.players.len();

    if record.status != GameStatus::Empty
        && (num_players < game_config.min_players() as usize
            || num_players > game_config.max_players() as usize)
    {
        return Err(error::MoveError::PlayerCount {
            min: game_config.min_players(),
            max: game_config.max_players(),
            got: num_players,
        }
        .into());
    }
    if let Some(player) = (0u8..)
        .zip(record.players.iter())
        .find(|&(idx, player)| player.id != idx)
    {
        return Err(ReconstructError::UnknownPlayer(player.1.id));
    }
    if num_players > 0 && record.current_player as usize >= num_players {
        return Err(ReconstructError::UnknownPlayer(record.current_player));
    }

    let board = load_board(game_config, &record.board_state, "boardState")?;

    // every turn must start where the previous one ended and add exactly its new tiles.
    let mut prev = board::Board::new(board_layout.dim());
    let mut scores = vec![0i32; num_players];
    for (turn_idx, turn) in record.turns.iter().enumerate() {
        let before = load_board(game_config, &turn.board_state_before, "boardStateBefore")?;
        let after = load_board(game_config, &turn.board_state_after, "boardStateAfter")?;
        if before != prev {
            return Err(ReconstructError::BoardHistoryMismatch { turn: turn_idx });
        }
        let mut expected = before;
        for p in &turn.new_placements {
            let code = alphabet
                .to_board(&p.tile())
                .ok_or_else(|| ReconstructError::InvalidBoard("newPlacements".into()))?;
            if !p.is_new
                || !expected.dim().contains(p.row, p.col)
                || expected.is_occupied(p.row, p.col)
            {
                return Err(ReconstructError::BoardHistoryMismatch { turn: turn_idx });
            }
            expected.set_code(p.row, p.col, code);
        }
        if expected != after {
            return Err(ReconstructError::BoardHistoryMismatch { turn: turn_idx });
        }
        let score = scores
            .get_mut(turn.player_id as usize)
            .ok_or(ReconstructError::UnknownPlayer(turn.player_id))?;
        *score += turn.score as i32;
        prev = after;
    }
    if prev != board {
        return Err(ReconstructError::BoardHistoryMismatch {
            turn: record.turns.len(),
        });
    }
    // play passes to the next seat after every turn.
    if let Some(last) = record.turns.last() {
        let expected = ((last.player_id as usize + 1) % num_players) as u8;
        if record.current_player != expected {
            return Err(ReconstructError::CurrentPlayerMismatch {
                recorded: record.current_player,
                expected,
            });
        }
    }
    for (player, &computed) in record.players.iter().zip(scores.iter()) {
        if player.score != computed {
            return Err(ReconstructError::ScoreMismatch {
                player: player.id,
                recorded: player.score,
                computed,
            });
        }
    }

    let from_history =
        premium_tracker::PremiumTracker::reconstruct_from_history(board_layout, &record.turns)
            .map_err(|turn| ReconstructError::TurnPremiumMismatch { turn })?;
    let from_board = premium_tracker::PremiumTracker::reconstruct_from_board(board_layout, &board);
    if from_history != from_board {
        return Err(ReconstructError::PremiumUsageMismatch {
            from_history: from_history.used_squares(),
            from_board: from_board.used_squares(),
        });
    }

    let bag = bag::Bag::from_board(alphabet, &board).map_err(ReconstructError::SupplyOverdrawn)?;

    Ok(GameEngine::from_parts(
        game_config,
        record.status,
        record.players.clone(),
        board,
        bag,
        from_history,
        record.turns.clone(),
        record.current_player,
    ))
}

// One row per turn, oldest first.
pub fn write_turns_csv<W: std::io::Write>(writer: W, record: &GameRecord) -> error::Returns<()> {
    let mut csv_out = csv::Writer::from_writer(writer);
    csv_out.serialize((
        "turn",
        "player",
        "word",
        "row",
        "col",
        "direction",
        "blanks",
        "score",
        "bingo",
        "secondary",
        "total",
    ))?;
    let mut totals = vec![0i32; record.players.len()];
    for (turn_idx, turn) in (1..).zip(record.turns.iter()) {
        let name = record
            .players
            .get(turn.player_id as usize)
            .map_or("?", |p| p.name.as_str());
        if let Some(total) = totals.get_mut(turn.player_id as usize) {
            *total += turn.score as i32;
        }
        csv_out.serialize((
            turn_idx,
            name,
            &turn.word,
            turn.start_row,
            turn.start_col,
            turn.direction.as_str(),
            turn.blank_tiles
                .iter()
                .map(|idx| idx.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            turn.score,
            turn.bingo_bonus != 0,
            turn.secondary_words
                .iter()
                .map(|w| format!("{}:{}", w.word, w.score))
                .collect::<Vec<_>>()
                .join(" "),
            totals.get(turn.player_id as usize).copied().unwrap_or(0),
        ))?;
    }
    csv_out.flush()?;
    Ok(())
}

// Used by the shell to print a compact log.
pub fn fmt_turn(turn: &game_state::Turn) -> String {
    let mut s = format!(
        "p{} {} ({}, {}) {} = {}",
        turn.player_id + 1,
        turn.word,
        turn.start_row,
        turn.start_col,
        turn.direction,
        turn.score
    );
    for w in &turn.secondary_words {
        s.push_str(&format!(" +{}:{}", w.word, w.score));
    }
    if turn.bingo_bonus != 0 {
        s.push_str(&format!(" +bingo {}", turn.bingo_bonus));
    }
    s
}
