// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout};

pub struct StaticGameConfig<'a> {
    alphabet: &'a alphabet::Alphabet<'a>,
    board_layout: board_layout::BoardLayout,
    rack_size: i8,
    bingo_bonus: i16,
    min_players: u8,
    max_players: u8,
}

pub enum GameConfig<'a> {
    Static(StaticGameConfig<'a>),
}

impl<'a> GameConfig<'a> {
    #[inline(always)]
    pub fn alphabet(&self) -> &'a alphabet::Alphabet<'a> {
        match self {
            GameConfig::Static(x) => x.alphabet,
        }
    }

    #[inline(always)]
    pub fn board_layout(&self) -> &board_layout::BoardLayout {
        match self {
            GameConfig::Static(x) => &x.board_layout,
        }
    }

    #[inline(always)]
    pub fn min_players(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.min_players,
        }
    }

    #[inline(always)]
    pub fn max_players(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.max_players,
        }
    }

    // only a full rack earns it, never more or fewer tiles.
    #[inline(always)]
    pub fn num_played_bonus(&self, num_played: usize) -> i16 {
        match self {
            GameConfig::Static(x) => {
                if num_played == x.rack_size as usize {
                    x.bingo_bonus
                } else {
                    0
                }
            }
        }
    }
}

pub fn make_game_config<'a>(
    alphabet: &'a alphabet::Alphabet<'a>,
    board_layout: board_layout::BoardLayout,
) -> GameConfig<'a> {
    GameConfig::Static(StaticGameConfig {
        alphabet,
        board_layout,
        rack_size: 7,
        bingo_bonus: 50,
        min_players: 2,
        max_players: 4,
    })
}

pub fn make_common_english_game_config() -> GameConfig<'static> {
    make_game_config(
        &alphabet::ENGLISH_ALPHABET,
        board_layout::make_standard_board_layout(),
    )
}

static COMMON_ENGLISH_GAME_CONFIG: std::sync::LazyLock<GameConfig<'static>> =
    std::sync::LazyLock::new(make_common_english_game_config);

// shared instance for callers that need a 'static config (service, threads).
pub fn common_english_game_config() -> &'static GameConfig<'static> {
    &COMMON_ENGLISH_GAME_CONFIG
}
