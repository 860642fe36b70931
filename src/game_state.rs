// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    bag, board, error::MoveError, game_config, matrix, placement, play_scorer, premium_tracker,
    validator,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Empty,
    InProgress,
    Finished,
    Abandoned,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GamePlayer {
    pub id: u8,
    pub name: String,
    pub score: i32,
}

// One applied turn. Only the last one can be taken back.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub player_id: u8,
    pub word: String,
    pub score: i16,
    pub main_word_score: i16,
    pub secondary_words: Vec<play_scorer::WordScore>,
    pub bingo_bonus: i16,
    pub start_row: i8,
    pub start_col: i8,
    pub direction: matrix::Direction,
    pub blank_tiles: Vec<usize>,
    pub new_placements: Vec<placement::Placement>,
    // premium squares this turn consumed.
    pub premium_squares_used: Vec<(i8, i8)>,
    pub board_state_before: board::BoardSnapshot,
    pub board_state_after: board::BoardSnapshot,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Standings {
    // best first, ties in seating order.
    pub players: Vec<GamePlayer>,
    pub winners: Vec<u8>,
}

// Owns everything a turn touches. Callers get read access and the operations
// below, nothing else.
pub struct GameEngine<'a> {
    game_config: &'a game_config::GameConfig<'a>,
    status: GameStatus,
    players: Vec<GamePlayer>,
    board: board::Board,
    bag: bag::Bag,
    premium_tracker: premium_tracker::PremiumTracker,
    history: Vec<Turn>,
    turn: u8,
    play_scorer: play_scorer::PlayScorer,
}

impl Clone for GameEngine<'_> {
    fn clone(&self) -> Self {
        Self {
            game_config: self.game_config,
            status: self.status,
            players: self.players.clone(),
            board: self.board.clone(),
            bag: self.bag.clone(),
            premium_tracker: self.premium_tracker.clone(),
            history: self.history.clone(),
            turn: self.turn,
            play_scorer: play_scorer::PlayScorer::new(),
        }
    }
}

impl<'a> GameEngine<'a> {
    pub fn new(game_config: &'a game_config::GameConfig<'a>) -> Self {
        let board_layout = game_config.board_layout();
        Self {
            game_config,
            status: GameStatus::Empty,
            players: Vec::new(),
            board: board::Board::new(board_layout.dim()),
            bag: bag::Bag::new(game_config.alphabet()),
            premium_tracker: premium_tracker::PremiumTracker::new(board_layout),
            history: Vec::new(),
            turn: 0,
            play_scorer: play_scorer::PlayScorer::new(),
        }
    }

    // For reloads. Callers must have checked the parts agree.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        game_config: &'a game_config::GameConfig<'a>,
        status: GameStatus,
        players: Vec<GamePlayer>,
        board: board::Board,
        bag: bag::Bag,
        premium_tracker: premium_tracker::PremiumTracker,
        history: Vec<Turn>,
        turn: u8,
    ) -> Self {
        Self {
            game_config,
            status,
            players,
            board,
            bag,
            premium_tracker,
            history,
            turn,
            play_scorer: play_scorer::PlayScorer::new(),
        }
    }

    pub fn start<S: AsRef<str>>(&mut self, player_names: &[S]) -> Result<(), MoveError> {
        if self.status != GameStatus::Empty {
            return Err(MoveError::GameNotInProgress(self.status));
        }
        let (min, max) = (
            self.game_config.min_players(),
            self.game_config.max_players(),
        );
        if player_names.len() < min as usize || player_names.len() > max as usize {
            return Err(MoveError::PlayerCount {
                min,
                max,
                got: player_names.len(),
            });
        }
        self.players = (0u8..)
            .zip(player_names.iter())
            .map(|(id, name)| GamePlayer {
                id,
                name: name.as_ref().to_string(),
                score: 0,
            })
            .collect();
        self.turn = 0;
        self.status = GameStatus::InProgress;
        log::debug!("started game with {} players", self.players.len());
        Ok(())
    }

    #[inline(always)]
    pub fn game_config(&self) -> &'a game_config::GameConfig<'a> {
        self.game_config
    }

    #[inline(always)]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline(always)]
    pub fn players(&self) -> &[GamePlayer] {
        &self.players
    }

    #[inline(always)]
    pub fn current_player(&self) -> u8 {
        self.turn
    }

    #[inline(always)]
    pub fn board(&self) -> &board::Board {
        &self.board
    }

    pub fn board_snapshot(&self) -> board::BoardSnapshot {
        self.board.snapshot(self.game_config.alphabet())
    }

    #[inline(always)]
    pub fn bag(&self) -> &bag::Bag {
        &self.bag
    }

    #[inline(always)]
    pub fn premium_tracker(&self) -> &premium_tracker::PremiumTracker {
        &self.premium_tracker
    }

    #[inline(always)]
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    fn require_in_progress(&self) -> Result<(), MoveError> {
        if self.status == GameStatus::InProgress {
            Ok(())
        } else {
            Err(MoveError::GameNotInProgress(self.status))
        }
    }

    fn score_turn(
        &mut self,
        input: &placement::TurnInput,
    ) -> Result<play_scorer::ScoreBreakdown, MoveError> {
        let placements = validator::validate(self.game_config, &self.board, input)?;
        let breakdown = self.play_scorer.compute_score(
            self.game_config,
            &self.board,
            &self.premium_tracker,
            input.direction,
            &placements,
        );
        let alphabet = self.game_config.alphabet();
        self.bag
            .check_availability(alphabet, &breakdown.new_placements)?;
        Ok(breakdown)
    }

    // validate, score, check supply. the one evaluation both preview and apply use.
    fn evaluate(
        &mut self,
        input: &placement::TurnInput,
    ) -> Result<play_scorer::ScoreBreakdown, MoveError> {
        self.require_in_progress()?;
        let result = self.score_turn(input);
        if let Err(err) = &result {
            log::warn!(
                "rejected {} at ({}, {}) {}: {}",
                input.word,
                input.start_row,
                input.start_col,
                input.direction,
                err
            );
        }
        result
    }

    // Scores a turn without applying it.
    pub fn preview(
        &mut self,
        input: &placement::TurnInput,
    ) -> Result<play_scorer::ScoreBreakdown, MoveError> {
        self.evaluate(input)
    }

    // All checks run before the first mutation, so a failed turn changes nothing.
    pub fn apply(&mut self, input: &placement::TurnInput) -> Result<&Turn, MoveError> {
        let breakdown = self.evaluate(input)?;
        let alphabet = self.game_config.alphabet();
        let board_state_before = self.board_snapshot();

        self.bag.commit(alphabet, &breakdown.new_placements)?;
        for p in &breakdown.new_placements {
            if let Some(code) = alphabet.to_board(&p.tile()) {
                self.board.set_code(p.row, p.col, code);
            }
        }
        let premium_squares_used = self
            .premium_tracker
            .mark_used_for_turn(&breakdown.new_placements);
        let player_id = self.turn;
        self.players[player_id as usize].score += breakdown.total_score as i32;

        let mut blank_tiles = input.blank_indices.clone();
        blank_tiles.sort_unstable();
        blank_tiles.dedup();
        self.history.push(Turn {
            player_id,
            word: breakdown.main_word.word,
            score: breakdown.total_score,
            main_word_score: breakdown.main_word.score,
            secondary_words: breakdown.secondary_words,
            bingo_bonus: breakdown.bingo_bonus,
            start_row: input.start_row,
            start_col: input.start_col,
            direction: input.direction,
            blank_tiles,
            new_placements: breakdown.new_placements,
            premium_squares_used,
            board_state_before,
            board_state_after: self.board.snapshot(alphabet),
        });
        self.next_turn();

        let turn = &self.history[self.history.len() - 1];
        log::debug!(
            "player {} played {} for {} (turn {})",
            turn.player_id,
            turn.word,
            turn.score,
            self.history.len()
        );
        Ok(turn)
    }

    // Takes back the last turn: board, bag, premiums, score and whose turn it is.
    pub fn undo(&mut self) -> Result<Turn, MoveError> {
        self.require_in_progress()?;
        let turn = self.history.pop().ok_or(MoveError::NothingToUndo)?;
        let alphabet = self.game_config.alphabet();
        for p in &turn.new_placements {
            self.board.set_code(p.row, p.col, 0);
        }
        debug_assert_eq!(self.board.snapshot(alphabet), turn.board_state_before);
        self.bag.release(alphabet, &turn.new_placements);
        self.premium_tracker.restore(&turn.premium_squares_used);
        self.players[turn.player_id as usize].score -= turn.score as i32;
        self.turn = turn.player_id;
        log::debug!(
            "undid {} by player {} ({} turns left)",
            turn.word,
            turn.player_id,
            self.history.len()
        );
        Ok(turn)
    }

    pub fn next_turn(&mut self) {
        let num_players = self.players.len() as u8;
        self.turn += 1;
        if self.turn >= num_players {
            self.turn = 0;
        }
    }

    pub fn standings(&self) -> Standings {
        let mut players = self.players.clone();
        // stable, so ties keep seating order.
        players.sort_by(|a, b| b.score.cmp(&a.score));
        let top = players.first().map(|p| p.score);
        let winners = players
            .iter()
            .filter(|p| Some(p.score) == top)
            .map(|p| p.id)
            .collect();
        Standings { players, winners }
    }

    pub fn finish(&mut self) -> Result<Standings, MoveError> {
        self.require_in_progress()?;
        self.status = GameStatus::Finished;
        let standings = self.standings();
        log::debug!("finished, winners {:?}", standings.winners);
        Ok(standings)
    }

    pub fn abandon(&mut self) -> Result<(), MoveError> {
        match self.status {
            GameStatus::Empty | GameStatus::InProgress => {
                self.status = GameStatus::Abandoned;
                Ok(())
            }
            status => Err(MoveError::GameNotInProgress(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{matrix::Direction, placement::TurnInput};

    fn started<'a>(game_config: &'a game_config::GameConfig<'static>) -> GameEngine<'a> {
        let mut engine = GameEngine::new(game_config);
        engine.start(&["Ann", "Bo"]).unwrap();
        engine
    }

    #[test]
    fn lifecycle() {
        let game_config = game_config::make_common_english_game_config();
        let mut engine = GameEngine::new(&game_config);
        assert_eq!(engine.status(), GameStatus::Empty);
        assert_eq!(
            engine
                .apply(&TurnInput::new("CAT", 7, 5, Direction::Across))
                .err(),
            Some(MoveError::GameNotInProgress(GameStatus::Empty))
        );
        assert_eq!(
            engine.start(&["solo"]),
            Err(MoveError::PlayerCount {
                min: 2,
                max: 4,
                got: 1
            })
        );
        engine.start(&["a", "b", "c"]).unwrap();
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert!(engine.start(&["a", "b"]).is_err());
        engine.finish().unwrap();
        assert!(engine.undo().is_err());
        assert!(engine.abandon().is_err());
    }

    #[test]
    fn apply_rotates_players_and_undo_restores() {
        let game_config = game_config::make_common_english_game_config();
        let mut engine = started(&game_config);
        let before = engine.clone();
        let turn = engine
            .apply(&TurnInput::new("CAT", 7, 5, Direction::Across))
            .unwrap();
        assert_eq!(turn.score, 10);
        assert_eq!(turn.premium_squares_used, vec![(7, 7)]);
        assert_eq!(engine.current_player(), 1);
        assert_eq!(engine.players()[0].score, 10);
        assert_eq!(engine.bag().total_remaining(), 97);

        let undone = engine.undo().unwrap();
        assert_eq!(undone.word, "CAT");
        assert_eq!(engine.current_player(), 0);
        assert_eq!(engine.board(), before.board());
        assert_eq!(engine.bag(), before.bag());
        assert_eq!(engine.premium_tracker(), before.premium_tracker());
        assert_eq!(engine.players(), before.players());
        assert_eq!(engine.undo().err(), Some(MoveError::NothingToUndo));
    }

    #[test]
    fn failed_turn_changes_nothing() {
        let game_config = game_config::make_common_english_game_config();
        let mut engine = started(&game_config);
        engine
            .apply(&TurnInput::new("CAT", 7, 5, Direction::Across))
            .unwrap();
        let board = engine.board().clone();
        let bag = engine.bag().clone();
        assert_eq!(
            engine
                .apply(&TurnInput::new("DOG", 0, 0, Direction::Across))
                .err(),
            Some(MoveError::Disconnected)
        );
        assert_eq!(engine.board(), &board);
        assert_eq!(engine.bag(), &bag);
        assert_eq!(engine.current_player(), 1);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn preview_matches_apply() {
        let game_config = game_config::make_common_english_game_config();
        let mut engine = started(&game_config);
        let input = TurnInput::new("JINX", 7, 7, Direction::Down);
        let breakdown = engine.preview(&input).unwrap();
        assert!(engine.history().is_empty());
        let turn = engine.apply(&input).unwrap();
        assert_eq!(turn.score, breakdown.total_score);
        assert_eq!(turn.new_placements, breakdown.new_placements);
    }

    #[test]
    fn standings_rank_by_score() {
        let game_config = game_config::make_common_english_game_config();
        let mut engine = started(&game_config);
        engine
            .apply(&TurnInput::new("CAT", 7, 5, Direction::Across))
            .unwrap();
        let standings = engine.finish().unwrap();
        assert_eq!(standings.winners, vec![0]);
        assert_eq!(standings.players[0].name, "Ann");
        assert_eq!(engine.status(), GameStatus::Finished);
    }
}
