// Copyright (C) 2020-2026 Andy Kurnia.

use super::game_state;

pub struct MyError {
    s: String,
}

impl std::fmt::Display for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.s)
    }
}

impl std::fmt::Debug for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for MyError {}

pub fn new(s: String) -> MyError {
    MyError { s }
}

pub type BoxAnyError = Box<dyn std::error::Error>;
pub type Returns<T> = Result<T, BoxAnyError>;

#[macro_export]
macro_rules! return_error {
    ($error:expr) => {
        return Err($crate::error::new($error).into());
    };
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Shortage {
    pub letter: char,
    pub needed: u8,
    pub available: u8,
}

impl std::fmt::Display for Shortage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (need {}, have {})",
            self.letter, self.needed, self.available
        )
    }
}

fn fmt_shortages(shortages: &[Shortage]) -> String {
    shortages
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// Every way a turn can be refused. None of them leave a mark on the game.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("word runs off the board at index {index}")]
    OutOfBounds { index: usize },
    #[error("({row}, {col}) holds {existing}, not {requested}")]
    TileConflict {
        row: i8,
        col: i8,
        existing: char,
        requested: char,
    },
    #[error("no new tiles placed")]
    NoNewTiles,
    #[error("first word must cover the center square")]
    MustCoverCenter,
    #[error("word does not connect to any tile on the board")]
    Disconnected,
    #[error("letters added on both sides of an existing word")]
    DoubleSidedExtension,
    #[error("tile at ({row}, {col}) would extend the word")]
    WordNotTerminated { row: i8, col: i8 },
    #[error("not enough tiles: {}", fmt_shortages(.0))]
    InsufficientSupply(Vec<Shortage>),
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("game is {0:?}")]
    GameNotInProgress(game_state::GameStatus),
    #[error("need {min} to {max} players, got {got}")]
    PlayerCount { min: u8, max: u8, got: usize },
}

// A persisted game that cannot be trusted. The engine refuses to load it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReconstructError {
    #[error("invalid board: {0}")]
    InvalidBoard(String),
    #[error("board does not match turn history at turn {turn}")]
    BoardHistoryMismatch { turn: usize },
    #[error("premium usage disagrees: history {from_history:?}, board {from_board:?}")]
    PremiumUsageMismatch {
        from_history: Vec<(i8, i8)>,
        from_board: Vec<(i8, i8)>,
    },
    #[error("board uses more tiles than the bag holds: {}", fmt_shortages(.0))]
    SupplyOverdrawn(Vec<Shortage>),
    #[error("player {player} has score {recorded} but turns add up to {computed}")]
    ScoreMismatch {
        player: u8,
        recorded: i32,
        computed: i32,
    },
    #[error("turn {turn} recorded the wrong premium squares")]
    TurnPremiumMismatch { turn: usize },
    #[error("current player is {recorded}, expected {expected}")]
    CurrentPlayerMismatch { recorded: u8, expected: u8 },
    #[error("unknown player {0}")]
    UnknownPlayer(u8),
    #[error(transparent)]
    Players(#[from] MoveError),
}
