// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, error, placement};

// Remaining count per tally index (0 is the blank). Tiles are never drawn
// into racks here; they leave the bag when they land on the board.
#[derive(Clone, PartialEq, Eq)]
pub struct Bag(pub Box<[u8]>);

impl Bag {
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        Bag((0..alphabet.len()).map(|idx| alphabet.freq(idx)).collect())
    }

    #[inline(always)]
    pub fn remaining(&self, idx: u8) -> u8 {
        self.0.get(idx as usize).copied().unwrap_or(0)
    }

    pub fn total_remaining(&self) -> u16 {
        self.0.iter().map(|&count| count as u16).sum()
    }

    // blank-designated letters draw from the blank pool.
    fn needed(
        &self,
        alphabet: &alphabet::Alphabet,
        tiles: impl IntoIterator<Item = board::Tile>,
    ) -> Vec<u8> {
        let mut needed = vec![0u8; self.0.len()];
        for tile in tiles {
            if let Some(code) = alphabet.to_board(&tile) {
                let idx = alphabet.tally_index(code) as usize;
                if idx < needed.len() {
                    needed[idx] = needed[idx].saturating_add(1);
                }
            }
        }
        needed
    }

    fn shortages_for(&self, alphabet: &alphabet::Alphabet, needed: &[u8]) -> Vec<error::Shortage> {
        (0u8..)
            .zip(needed.iter())
            .filter(|&(idx, &n)| n > self.remaining(idx))
            .map(|(idx, &n)| error::Shortage {
                letter: alphabet.label(idx).unwrap_or(alphabet::BLANK_LABEL),
                needed: n,
                available: self.remaining(idx),
            })
            .collect()
    }

    // Every letter the bag cannot cover, in alphabet order (blank first).
    pub fn shortages(
        &self,
        alphabet: &alphabet::Alphabet,
        placements: &[placement::Placement],
    ) -> Vec<error::Shortage> {
        let needed = self.needed(
            alphabet,
            placements.iter().filter(|p| p.is_new).map(|p| p.tile()),
        );
        self.shortages_for(alphabet, &needed)
    }

    pub fn check_availability(
        &self,
        alphabet: &alphabet::Alphabet,
        placements: &[placement::Placement],
    ) -> Result<(), error::MoveError> {
        let shortages = self.shortages(alphabet, placements);
        if shortages.is_empty() {
            Ok(())
        } else {
            Err(error::MoveError::InsufficientSupply(shortages))
        }
    }

    // Takes the new tiles out of the bag, all or nothing.
    pub fn commit(
        &mut self,
        alphabet: &alphabet::Alphabet,
        placements: &[placement::Placement],
    ) -> Result<(), error::MoveError> {
        self.check_availability(alphabet, placements)?;
        let needed = self.needed(
            alphabet,
            placements.iter().filter(|p| p.is_new).map(|p| p.tile()),
        );
        for (count, n) in self.0.iter_mut().zip(needed) {
            *count -= n;
        }
        Ok(())
    }

    pub fn release(&mut self, alphabet: &alphabet::Alphabet, placements: &[placement::Placement]) {
        let needed = self.needed(
            alphabet,
            placements.iter().filter(|p| p.is_new).map(|p| p.tile()),
        );
        for (count, n) in self.0.iter_mut().zip(needed) {
            *count = count.saturating_add(n);
        }
    }

    // What is left after every tile on the board was taken from a full bag.
    pub fn from_board(
        alphabet: &alphabet::Alphabet,
        board: &board::Board,
    ) -> Result<Bag, Vec<error::Shortage>> {
        let mut bag = Bag::new(alphabet);
        let tiles = board
            .dim()
            .cells()
            .filter_map(|(r, c)| board.tile_at(alphabet, r, c));
        let needed = bag.needed(alphabet, tiles);
        let shortages = bag.shortages_for(alphabet, &needed);
        if !shortages.is_empty() {
            return Err(shortages);
        }
        for (count, n) in bag.0.iter_mut().zip(needed) {
            *count -= n;
        }
        Ok(bag)
    }

    // label -> remaining, blank as '?'.
    pub fn counts(&self, alphabet: &alphabet::Alphabet) -> std::collections::BTreeMap<char, u8> {
        (0u8..)
            .zip(self.0.iter())
            .filter_map(|(idx, &count)| alphabet.label(idx).map(|label| (label, count)))
            .collect()
    }
}

impl std::fmt::Debug for Bag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bag({})", alphabet::ENGLISH_ALPHABET.fmt_tally(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_tile(letter: char, is_blank: bool) -> placement::Placement {
        placement::Placement {
            row: 0,
            col: 0,
            letter,
            is_blank,
            word_index: 0,
            is_new: true,
        }
    }

    #[test]
    fn reports_every_shortage() {
        let a = &alphabet::ENGLISH_ALPHABET;
        let mut bag = Bag::new(a);
        let q = a.code_of('Q').unwrap();
        bag.0[q as usize] = 0;
        let placements = [
            new_tile('Q', false),
            new_tile('Z', false),
            new_tile('Z', false),
        ];
        assert_eq!(
            bag.shortages(a, &placements),
            vec![
                error::Shortage {
                    letter: 'Q',
                    needed: 1,
                    available: 0
                },
                error::Shortage {
                    letter: 'Z',
                    needed: 2,
                    available: 1
                },
            ]
        );
        let before = bag.clone();
        assert!(bag.commit(a, &placements).is_err());
        assert_eq!(bag, before);
    }

    #[test]
    fn blanks_draw_from_blank_pool() {
        let a = &alphabet::ENGLISH_ALPHABET;
        let mut bag = Bag::new(a);
        let placements = [new_tile('Q', true), new_tile('Q', false)];
        bag.commit(a, &placements).unwrap();
        assert_eq!(bag.remaining(alphabet::BLANK), 1);
        assert_eq!(bag.remaining(a.code_of('Q').unwrap()), 0);
        assert_eq!(bag.total_remaining(), 98);
        let shortages = bag.shortages(a, &[new_tile('E', true), new_tile('S', true)]);
        assert_eq!(
            shortages,
            vec![error::Shortage {
                letter: '?',
                needed: 2,
                available: 1
            }]
        );
        bag.release(a, &placements);
        assert_eq!(bag, Bag::new(a));
    }

    #[test]
    fn existing_tiles_are_free() {
        let a = &alphabet::ENGLISH_ALPHABET;
        let mut bag = Bag::new(a);
        bag.0.iter_mut().for_each(|c| *c = 0);
        let mut p = new_tile('K', false);
        p.is_new = false;
        assert!(bag.check_availability(a, &[p]).is_ok());
    }
}
