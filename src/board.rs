// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, matrix};

// public face of a board tile. a blank keeps the letter it was designated as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub letter: char,
    #[serde(default)]
    pub is_blank: bool,
}

// row-major, None for empty cells. this is what gets persisted.
pub type BoardSnapshot = Vec<Vec<Option<Tile>>>;

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    dim: matrix::Dim,
    tiles: Box<[u8]>,
}

impl Board {
    pub fn new(dim: matrix::Dim) -> Self {
        Self {
            dim,
            tiles: vec![0u8; dim.num_cells()].into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    // 0 when empty or off the board.
    #[inline(always)]
    pub fn code_at(&self, row: i8, col: i8) -> u8 {
        if self.dim.contains(row, col) {
            self.tiles[self.dim.at_row_col(row, col)]
        } else {
            0
        }
    }

    #[inline(always)]
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        self.code_at(row, col) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.iter().all(|&t| t == 0)
    }

    pub fn num_tiles(&self) -> usize {
        self.tiles.iter().filter(|&&t| t != 0).count()
    }

    pub(crate) fn set_code(&mut self, row: i8, col: i8, code: u8) {
        let idx = self.dim.at_row_col(row, col);
        self.tiles[idx] = code;
    }

    pub fn has_neighbor(&self, row: i8, col: i8) -> bool {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .iter()
            .any(|&(dr, dc)| self.is_occupied(row + dr, col + dc))
    }

    pub fn tile_at(&self, alphabet: &alphabet::Alphabet, row: i8, col: i8) -> Option<Tile> {
        alphabet.from_board(self.code_at(row, col))
    }

    pub fn snapshot(&self, alphabet: &alphabet::Alphabet) -> BoardSnapshot {
        (0..self.dim.rows)
            .map(|r| {
                (0..self.dim.cols)
                    .map(|c| self.tile_at(alphabet, r, c))
                    .collect()
            })
            .collect()
    }

    // None if the snapshot has the wrong shape or an unknown letter.
    pub fn from_snapshot(
        dim: matrix::Dim,
        alphabet: &alphabet::Alphabet,
        snapshot: &BoardSnapshot,
    ) -> Option<Self> {
        if snapshot.len() != dim.rows as usize {
            return None;
        }
        let mut board = Self::new(dim);
        for (r, row) in (0i8..).zip(snapshot.iter()) {
            if row.len() != dim.cols as usize {
                return None;
            }
            for (c, cell) in (0i8..).zip(row.iter()) {
                if let Some(tile) = cell {
                    board.set_code(r, c, alphabet.to_board(tile)?);
                }
            }
        }
        Some(board)
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Board {}x{}", self.dim.rows, self.dim.cols)?;
        for r in 0..self.dim.rows {
            for c in 0..self.dim.cols {
                let label = match alphabet::ENGLISH_ALPHABET.from_board(self.code_at(r, c)) {
                    Some(tile) if tile.is_blank => tile.letter.to_ascii_lowercase(),
                    Some(tile) => tile.letter,
                    None => '.',
                };
                write!(f, "{}", label)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIM: matrix::Dim = matrix::Dim { rows: 15, cols: 15 };

    #[test]
    fn snapshot_keeps_blank_flags() {
        let a = &alphabet::ENGLISH_ALPHABET;
        let mut board = Board::new(DIM);
        assert!(board.is_empty());
        board.set_code(7, 7, a.code_of('Q').unwrap());
        board.set_code(7, 8, a.code_of('I').unwrap() | alphabet::BLANK_BIT);
        let snapshot = board.snapshot(a);
        assert_eq!(
            snapshot[7][8],
            Some(Tile {
                letter: 'I',
                is_blank: true
            })
        );
        assert_eq!(Board::from_snapshot(DIM, a, &snapshot), Some(board));
    }

    #[test]
    fn rejects_malformed_snapshots() {
        let a = &alphabet::ENGLISH_ALPHABET;
        let mut snapshot = Board::new(DIM).snapshot(a);
        snapshot[3][3] = Some(Tile {
            letter: '#',
            is_blank: false,
        });
        assert_eq!(Board::from_snapshot(DIM, a, &snapshot), None);
        snapshot.pop();
        assert_eq!(Board::from_snapshot(DIM, a, &snapshot), None);
    }

    #[test]
    fn neighbors_ignore_off_board_cells() {
        let a = &alphabet::ENGLISH_ALPHABET;
        let mut board = Board::new(DIM);
        board.set_code(0, 0, a.code_of('A').unwrap());
        assert!(board.has_neighbor(0, 1));
        assert!(board.has_neighbor(1, 0));
        assert!(!board.has_neighbor(1, 1));
        assert!(!board.is_occupied(-1, 0));
    }
}
