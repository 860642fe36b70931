// Copyright (C) 2020-2026 Andy Kurnia.

use super::board;

// board codes: 0 is empty (or the blank in tallies), 1..=26 are A..=Z,
// 0x80 | code is a blank designated as that letter.
pub const BLANK: u8 = 0;
pub const BLANK_BIT: u8 = 0x80;
pub const BLANK_LABEL: char = '?';

pub struct Letter {
    label: char,
    freq: u8,
    score: i8,
}

pub struct StaticAlphabet<'a> {
    letters: &'a [Letter],
    num_tiles: u16,
}

pub enum Alphabet<'a> {
    Static(StaticAlphabet<'a>),
}

impl<'a> Alphabet<'a> {
    #[inline(always)]
    pub fn len(&self) -> u8 {
        match self {
            Alphabet::Static(x) => x.letters.len() as u8,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    fn get(&self, idx: u8) -> &'a Letter {
        match self {
            Alphabet::Static(x) => &x.letters[idx as usize],
        }
    }

    // total tiles in a fresh bag.
    #[inline(always)]
    pub fn num_tiles(&self) -> u16 {
        match self {
            Alphabet::Static(x) => x.num_tiles,
        }
    }

    // label of a tally index (0 is the blank).
    #[inline(always)]
    pub fn label(&self, idx: u8) -> Option<char> {
        if idx >= self.len() {
            None
        } else {
            Some(self.get(idx).label)
        }
    }

    // blanks score nothing, whichever letter they stand for.
    #[inline(always)]
    pub fn score(&self, code: u8) -> i8 {
        if code & BLANK_BIT != 0 || code >= self.len() {
            0
        } else {
            self.get(code).score
        }
    }

    #[inline(always)]
    pub fn freq(&self, idx: u8) -> u8 {
        if idx >= self.len() {
            0
        } else {
            self.get(idx).freq
        }
    }

    // the tally index a board tile draws from.
    #[inline(always)]
    pub fn tally_index(&self, code: u8) -> u8 {
        if code & BLANK_BIT != 0 { BLANK } else { code }
    }

    pub fn code_of(&self, c: char) -> Option<u8> {
        let c = c.to_ascii_uppercase();
        (1..self.len()).find(|&idx| self.get(idx).label == c)
    }

    pub fn from_board(&self, code: u8) -> Option<board::Tile> {
        let idx = code & !BLANK_BIT;
        if idx == 0 || idx >= self.len() {
            None
        } else {
            Some(board::Tile {
                letter: self.get(idx).label,
                is_blank: code & BLANK_BIT != 0,
            })
        }
    }

    pub fn to_board(&self, tile: &board::Tile) -> Option<u8> {
        let code = self.code_of(tile.letter)?;
        Some(if tile.is_blank { code | BLANK_BIT } else { code })
    }

    pub fn fmt_tally(&self, tally: &[u8]) -> String {
        let mut s = String::new();
        for (idx, &count) in (0u8..).zip(tally.iter()) {
            if let Some(label) = self.label(idx) {
                for _ in 0..count {
                    s.push(label);
                }
            }
        }
        s
    }
}

macro_rules! letter {
    ($label:expr, $freq:expr, $score:expr) => {
        Letter {
            label: $label,
            freq: $freq,
            score: $score,
        }
    };
}

pub static ENGLISH_ALPHABET: Alphabet = Alphabet::Static(StaticAlphabet {
    letters: &[
        letter!(BLANK_LABEL, 2, 0),
        letter!('A', 9, 1),
        letter!('B', 2, 3),
        letter!('C', 2, 3),
        letter!('D', 4, 2),
        letter!('E', 12, 1),
        letter!('F', 2, 4),
        letter!('G', 3, 2),
        letter!('H', 2, 4),
        letter!('I', 9, 1),
        letter!('J', 1, 8),
        letter!('K', 1, 5),
        letter!('L', 4, 1),
        letter!('M', 2, 3),
        letter!('N', 6, 1),
        letter!('O', 8, 1),
        letter!('P', 2, 3),
        letter!('Q', 1, 10),
        letter!('R', 6, 1),
        letter!('S', 4, 1),
        letter!('T', 6, 1),
        letter!('U', 4, 1),
        letter!('V', 2, 4),
        letter!('W', 2, 4),
        letter!('X', 1, 8),
        letter!('Y', 2, 4),
        letter!('Z', 1, 10),
    ],
    num_tiles: 100,
});
