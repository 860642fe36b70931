// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, board_layout, game_config, matrix, placement, premium_tracker};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WordScore {
    pub word: String,
    pub score: i16,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub total_score: i16,
    pub main_word: WordScore,
    pub secondary_words: Vec<WordScore>,
    pub bingo_bonus: i16,
    pub new_placements: Vec<placement::Placement>,
}

impl ScoreBreakdown {
    #[inline(always)]
    pub fn is_bingo(&self) -> bool {
        self.bingo_bonus != 0
    }

    // main word first, for the dictionary.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.main_word.word.as_str())
            .chain(self.secondary_words.iter().map(|w| w.word.as_str()))
    }
}

pub struct PlayScorer {
    // this turn's new tile codes laid over the board, 0 elsewhere.
    new_tiles: Vec<u8>,
    word: String,
}

impl PlayScorer {
    pub fn new() -> Self {
        Self {
            new_tiles: Vec::new(),
            word: String::new(),
        }
    }

    #[inline(always)]
    fn code_at(&self, board_snapshot: &board::Board, row: i8, col: i8) -> u8 {
        let dim = board_snapshot.dim();
        if !dim.contains(row, col) {
            return 0;
        }
        let new_tile = self.new_tiles[dim.at_row_col(row, col)];
        if new_tile != 0 {
            new_tile
        } else {
            board_snapshot.code_at(row, col)
        }
    }

    // Premiums only count under this turn's new tiles, and only if the square
    // has not paid out before. Assumes placements came from the validator.
    pub fn compute_score(
        &mut self,
        game_config: &game_config::GameConfig,
        board_snapshot: &board::Board,
        premium_tracker: &premium_tracker::PremiumTracker,
        direction: matrix::Direction,
        placements: &[placement::Placement],
    ) -> ScoreBreakdown {
        let alphabet = game_config.alphabet();
        let board_layout = game_config.board_layout();
        let dim = board_snapshot.dim();

        self.new_tiles.clear();
        self.new_tiles.resize(dim.num_cells(), 0);
        let mut new_placements = Vec::new();
        for p in placements.iter().filter(|p| p.is_new) {
            self.new_tiles[dim.at_row_col(p.row, p.col)] =
                alphabet.to_board(&p.tile()).unwrap_or(0);
            new_placements.push(p.clone());
        }

        let premium_for = |row: i8, col: i8| {
            if premium_tracker.can_use(row, col) {
                board_layout.premium_at(row, col)
            } else {
                board_layout::Premium::NONE
            }
        };

        let main_word = {
            let mut word_multiplier = 1i16;
            let mut word_score = 0i16;
            self.word.clear();
            for p in placements {
                let code = self.code_at(board_snapshot, p.row, p.col);
                let letter_multiplier = if p.is_new {
                    let premium = premium_for(p.row, p.col);
                    word_multiplier *= premium.word_multiplier as i16;
                    premium.letter_multiplier as i16
                } else {
                    1
                };
                word_score += alphabet.score(code) as i16 * letter_multiplier;
                self.word.push(p.letter);
            }
            WordScore {
                word: self.word.clone(),
                score: word_score * word_multiplier,
            }
        };

        let perpendicular = direction.perpendicular();
        let (dr, dc) = perpendicular.delta();
        let mut secondary_words = Vec::new();
        for p in &new_placements {
            let (mut row, mut col) = (p.row, p.col);
            while self.code_at(board_snapshot, row - dr, col - dc) != 0 {
                row -= dr;
                col -= dc;
            }
            let mut word_multiplier = 1i16;
            let mut word_score = 0i16;
            let mut len = 0;
            self.word.clear();
            loop {
                let code = self.code_at(board_snapshot, row, col);
                if code == 0 {
                    break;
                }
                let letter_multiplier = if (row, col) == (p.row, p.col) {
                    let premium = premium_for(row, col);
                    word_multiplier *= premium.word_multiplier as i16;
                    premium.letter_multiplier as i16
                } else {
                    1
                };
                word_score += alphabet.score(code) as i16 * letter_multiplier;
                if let Some(tile) = alphabet.from_board(code) {
                    self.word.push(tile.letter);
                }
                len += 1;
                row += dr;
                col += dc;
            }
            if len > 1 {
                secondary_words.push(WordScore {
                    word: self.word.clone(),
                    score: word_score * word_multiplier,
                });
            }
        }

        let bingo_bonus = game_config.num_played_bonus(new_placements.len());
        let cross_score = secondary_words.iter().map(|w| w.score).sum::<i16>();
        let total_score = main_word.score + cross_score + bingo_bonus;

        log::debug!(
            "scored {} for {} ({} secondary, bingo {})",
            main_word.word,
            total_score,
            secondary_words.len(),
            bingo_bonus
        );

        ScoreBreakdown {
            total_score,
            main_word,
            secondary_words,
            bingo_bonus,
            new_placements,
        }
    }
}

impl Default for PlayScorer {
    fn default() -> Self {
        Self::new()
    }
}
