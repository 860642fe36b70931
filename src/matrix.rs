// Copyright (C) 2020-2026 Andy Kurnia.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    #[inline(always)]
    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    // (row, col) step for advancing one letter.
    #[inline(always)]
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "across" | "a" | "h" => Ok(Direction::Across),
            "down" | "d" | "v" => Ok(Direction::Down),
            _ => Err(format!("invalid direction {:?}", s)),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct Strider {
    base: i16,
    step: i8,
    len: i8,
}

#[allow(clippy::len_without_is_empty)]
impl Strider {
    #[inline(always)]
    pub fn len(&self) -> i8 {
        self.len
    }

    #[inline(always)]
    pub fn at(&self, idx: i8) -> usize {
        ((self.base as isize) + (idx as isize) * (self.step as isize)) as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

impl Dim {
    #[inline(always)]
    pub fn across(&self, row: i8) -> Strider {
        Strider {
            base: (row as i16) * (self.cols as i16),
            step: 1,
            len: self.cols,
        }
    }

    #[inline(always)]
    pub fn down(&self, col: i8) -> Strider {
        Strider {
            base: col as i16,
            step: self.cols,
            len: self.rows,
        }
    }

    // across lanes are rows, down lanes are columns.
    #[inline(always)]
    pub fn lane(&self, direction: Direction, lane: i8) -> Strider {
        match direction {
            Direction::Across => self.across(lane),
            Direction::Down => self.down(lane),
        }
    }

    // (lane, idx) of a cell when walking in the given direction.
    #[inline(always)]
    pub fn lane_idx(&self, direction: Direction, row: i8, col: i8) -> (i8, i8) {
        match direction {
            Direction::Across => (row, col),
            Direction::Down => (col, row),
        }
    }

    #[inline(always)]
    pub fn row_col(&self, direction: Direction, lane: i8, idx: i8) -> (i8, i8) {
        match direction {
            Direction::Across => (lane, idx),
            Direction::Down => (idx, lane),
        }
    }

    #[inline(always)]
    pub fn contains(&self, row: i8, col: i8) -> bool {
        (0..self.rows).contains(&row) && (0..self.cols).contains(&col)
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: i8, col: i8) -> usize {
        (((row as isize) * (self.cols as isize)) + (col as isize)) as usize
    }

    #[inline(always)]
    pub fn num_cells(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| (r, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanes_walk_rows_and_columns() {
        let dim = Dim { rows: 15, cols: 15 };
        let across = dim.lane(Direction::Across, 7);
        assert_eq!(across.at(0), 105);
        assert_eq!(across.at(14), 119);
        let down = dim.lane(Direction::Down, 7);
        assert_eq!(down.at(0), 7);
        assert_eq!(down.at(1), 22);
        assert_eq!(down.len(), 15);
    }

    #[test]
    fn lane_idx_round_trips() {
        let dim = Dim { rows: 15, cols: 15 };
        for direction in [Direction::Across, Direction::Down] {
            let (lane, idx) = dim.lane_idx(direction, 3, 11);
            assert_eq!(dim.row_col(direction, lane, idx), (3, 11));
            assert_eq!(dim.lane(direction, lane).at(idx), dim.at_row_col(3, 11));
        }
    }

    #[test]
    fn parses_directions() {
        assert_eq!("ACROSS".parse::<Direction>(), Ok(Direction::Across));
        assert_eq!("down".parse::<Direction>(), Ok(Direction::Down));
        assert!("diagonal".parse::<Direction>().is_err());
    }
}
