// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, board_layout, game_state, matrix, placement};

// Which premium squares have already paid out. A square is consumed by the
// first new tile that lands on it and stays consumed until that turn is undone.
#[derive(Clone, PartialEq, Eq)]
pub struct PremiumTracker {
    dim: matrix::Dim,
    is_bonus: Box<[bool]>,
    used: Box<[bool]>,
}

impl PremiumTracker {
    pub fn new(board_layout: &board_layout::BoardLayout) -> Self {
        let dim = board_layout.dim();
        Self {
            dim,
            is_bonus: dim
                .cells()
                .map(|(r, c)| board_layout.is_bonus(r, c))
                .collect(),
            used: vec![false; dim.num_cells()].into_boxed_slice(),
        }
    }

    #[inline(always)]
    fn idx(&self, row: i8, col: i8) -> Option<usize> {
        if self.dim.contains(row, col) {
            Some(self.dim.at_row_col(row, col))
        } else {
            None
        }
    }

    pub fn can_use(&self, row: i8, col: i8) -> bool {
        self.idx(row, col)
            .is_some_and(|idx| self.is_bonus[idx] && !self.used[idx])
    }

    pub fn is_used(&self, row: i8, col: i8) -> bool {
        self.idx(row, col).is_some_and(|idx| self.used[idx])
    }

    // Returns the squares this call consumed, for undo.
    pub fn mark_used_for_turn(&mut self, placements: &[placement::Placement]) -> Vec<(i8, i8)> {
        let mut marked = Vec::new();
        for p in placements.iter().filter(|p| p.is_new) {
            if self.can_use(p.row, p.col) {
                let idx = self.dim.at_row_col(p.row, p.col);
                self.used[idx] = true;
                marked.push((p.row, p.col));
            }
        }
        marked
    }

    pub fn restore(&mut self, marked: &[(i8, i8)]) {
        for &(row, col) in marked {
            if let Some(idx) = self.idx(row, col) {
                self.used[idx] = false;
            }
        }
    }

    // Replays each applied turn's new tiles in order. Each turn must have
    // recorded exactly the squares it consumed, since undo relies on that list.
    // Errs with the index of the first turn that did not.
    pub fn reconstruct_from_history(
        board_layout: &board_layout::BoardLayout,
        turns: &[game_state::Turn],
    ) -> Result<Self, usize> {
        let mut tracker = Self::new(board_layout);
        for (turn_idx, turn) in turns.iter().enumerate() {
            if tracker.mark_used_for_turn(&turn.new_placements) != turn.premium_squares_used {
                return Err(turn_idx);
            }
        }
        Ok(tracker)
    }

    // Any tile sitting on a premium square must have consumed it.
    pub fn reconstruct_from_board(
        board_layout: &board_layout::BoardLayout,
        board: &board::Board,
    ) -> Self {
        let mut tracker = Self::new(board_layout);
        for (r, c) in board.dim().cells() {
            if board.is_occupied(r, c) {
                if let Some(idx) = tracker.idx(r, c) {
                    tracker.used[idx] = tracker.is_bonus[idx];
                }
            }
        }
        tracker
    }

    // sorted by row then col.
    pub fn used_squares(&self) -> Vec<(i8, i8)> {
        self.dim
            .cells()
            .filter(|&(r, c)| self.is_used(r, c))
            .collect()
    }
}

impl std::fmt::Debug for PremiumTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PremiumTracker")
            .field("used", &self.used_squares())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_tile(row: i8, col: i8) -> placement::Placement {
        placement::Placement {
            row,
            col,
            letter: 'E',
            is_blank: false,
            word_index: 0,
            is_new: true,
        }
    }

    #[test]
    fn consumes_each_square_once() {
        let layout = board_layout::make_standard_board_layout();
        let mut tracker = PremiumTracker::new(&layout);
        assert!(tracker.can_use(7, 7));
        assert!(!tracker.can_use(7, 6)); // plain square
        let marked = tracker.mark_used_for_turn(&[new_tile(7, 7), new_tile(7, 6), new_tile(7, 3)]);
        assert_eq!(marked, vec![(7, 7), (7, 3)]);
        assert!(!tracker.can_use(7, 7));
        assert!(tracker.mark_used_for_turn(&[new_tile(7, 7)]).is_empty());
        tracker.restore(&marked);
        assert!(tracker.can_use(7, 7));
        assert!(tracker.used_squares().is_empty());
    }

    #[test]
    fn existing_tiles_do_not_consume() {
        let layout = board_layout::make_standard_board_layout();
        let mut tracker = PremiumTracker::new(&layout);
        let mut p = new_tile(7, 7);
        p.is_new = false;
        assert!(tracker.mark_used_for_turn(&[p]).is_empty());
        assert!(tracker.can_use(7, 7));
    }

    #[test]
    fn off_board_is_never_usable() {
        let layout = board_layout::make_standard_board_layout();
        let tracker = PremiumTracker::new(&layout);
        assert!(!tracker.can_use(-1, 0));
        assert!(!tracker.can_use(0, 15));
        assert!(tracker.can_use(0, 0));
    }
}
