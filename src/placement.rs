// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, error::MoveError, matrix};

// What a caller asks for. The engine works out everything else.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnInput {
    pub word: String,
    pub start_row: i8,
    pub start_col: i8,
    pub direction: matrix::Direction,
    // indices into word that use a blank tile.
    #[serde(default, alias = "blankTiles")]
    pub blank_indices: Vec<usize>,
}

impl TurnInput {
    pub fn new(word: &str, start_row: i8, start_col: i8, direction: matrix::Direction) -> Self {
        Self {
            word: word.to_string(),
            start_row,
            start_col,
            direction,
            blank_indices: Vec::new(),
        }
    }

    pub fn with_blanks(mut self, blank_indices: &[usize]) -> Self {
        self.blank_indices = blank_indices.to_vec();
        self
    }

    // board codes of the typed letters, without blank bits.
    fn letter_codes(&self, alphabet: &alphabet::Alphabet) -> Result<Vec<u8>, MoveError> {
        if self.word.is_empty() {
            return Err(MoveError::InvalidInput("empty word".into()));
        }
        let codes = self
            .word
            .chars()
            .map(|c| {
                alphabet
                    .code_of(c)
                    .ok_or_else(|| MoveError::InvalidInput(format!("invalid letter {:?}", c)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(&idx) = self.blank_indices.iter().find(|&&idx| idx >= codes.len()) {
            return Err(MoveError::InvalidInput(format!(
                "blank index {} is beyond the word",
                idx
            )));
        }
        Ok(codes)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub row: i8,
    pub col: i8,
    pub letter: char,
    pub is_blank: bool,
    pub word_index: usize,
    // the cell was empty before this turn.
    pub is_new: bool,
}

impl Placement {
    #[inline(always)]
    pub fn tile(&self) -> board::Tile {
        board::Tile {
            letter: self.letter,
            is_blank: self.is_blank,
        }
    }
}

// Lays the word out cell by cell. Pure: the board is only read.
pub fn generate(
    alphabet: &alphabet::Alphabet,
    board: &board::Board,
    input: &TurnInput,
) -> Result<Vec<Placement>, MoveError> {
    let dim = board.dim();
    if !dim.contains(input.start_row, input.start_col) {
        return Err(MoveError::OutOfBounds { index: 0 });
    }
    let codes = input.letter_codes(alphabet)?;
    let (dr, dc) = input.direction.delta();
    let mut placements = Vec::with_capacity(codes.len());
    for (i, &code) in codes.iter().enumerate() {
        let row = input.start_row as isize + dr as isize * i as isize;
        let col = input.start_col as isize + dc as isize * i as isize;
        if row >= dim.rows as isize || col >= dim.cols as isize {
            return Err(MoveError::OutOfBounds { index: i });
        }
        let (row, col) = (row as i8, col as i8);
        let requested = alphabet
            .from_board(code)
            .map_or(alphabet::BLANK_LABEL, |t| t.letter);
        match board.tile_at(alphabet, row, col) {
            Some(existing) => {
                if existing.letter != requested {
                    return Err(MoveError::TileConflict {
                        row,
                        col,
                        existing: existing.letter,
                        requested,
                    });
                }
                placements.push(Placement {
                    row,
                    col,
                    letter: existing.letter,
                    is_blank: existing.is_blank,
                    word_index: i,
                    is_new: false,
                });
            }
            None => {
                placements.push(Placement {
                    row,
                    col,
                    letter: requested,
                    is_blank: input.blank_indices.contains(&i),
                    word_index: i,
                    is_new: true,
                });
            }
        }
    }
    Ok(placements)
}
