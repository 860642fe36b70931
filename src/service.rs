// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    error::{MoveError, ReconstructError},
    game_config,
    game_state::{GameEngine, Standings, Turn},
    placement, record,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// The dictionary collaborator. Returns the words it does not accept.
pub trait WordJudge: Send + Sync {
    fn invalid_words(&self, words: &[&str]) -> Vec<String>;
}

// A fixed word list, mostly for tests and scripted games.
pub struct WordList(std::collections::HashSet<String>);

impl WordList {
    pub fn new<I: IntoIterator<Item = S>, S: AsRef<str>>(words: I) -> Self {
        Self(
            words
                .into_iter()
                .map(|w| w.as_ref().to_ascii_uppercase())
                .collect(),
        )
    }
}

impl WordJudge for WordList {
    fn invalid_words(&self, words: &[&str]) -> Vec<String> {
        words
            .iter()
            .filter(|w| !self.0.contains(&w.to_ascii_uppercase()))
            .map(|w| w.to_string())
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    // when given, must be the player whose turn it is.
    #[serde(default)]
    pub player_id: Option<u8>,
    #[serde(flatten)]
    pub turn: placement::TurnInput,
}

impl From<placement::TurnInput> for TurnRequest {
    fn from(turn: placement::TurnInput) -> Self {
        Self {
            player_id: None,
            turn,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub id: GameId,
    #[serde(flatten)]
    pub record: record::GameRecord,
    pub tiles_remaining: std::collections::BTreeMap<char, u8>,
    pub premium_squares_used: Vec<(i8, i8)>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("no game {0}")]
    UnknownGame(GameId),
    #[error("it is player {expected}'s turn, not player {got}'s")]
    OutOfTurn { expected: u8, got: u8 },
    #[error("invalid words: {}", .0.join(", "))]
    InvalidWords(Vec<String>),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Reconstruct(#[from] ReconstructError),
}

type SharedGame = Arc<tokio::sync::Mutex<GameEngine<'static>>>;

// In-memory games behind one lock each, so turns on a game never interleave
// while different games proceed independently.
pub struct GameService {
    game_config: &'static game_config::GameConfig<'static>,
    games: tokio::sync::RwLock<HashMap<GameId, SharedGame>>,
    next_id: AtomicU64,
    word_judge: Option<Arc<dyn WordJudge>>,
}

impl GameService {
    pub fn new(game_config: &'static game_config::GameConfig<'static>) -> Self {
        Self {
            game_config,
            games: tokio::sync::RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            word_judge: None,
        }
    }

    pub fn with_word_judge(mut self, word_judge: Arc<dyn WordJudge>) -> Self {
        self.word_judge = Some(word_judge);
        self
    }

    async fn game(&self, id: GameId) -> Result<SharedGame, ServiceError> {
        self.games
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ServiceError::UnknownGame(id))
    }

    async fn insert(&self, engine: GameEngine<'static>) -> GameView {
        let id = GameId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let view = self.view(id, &engine);
        self.games
            .write()
            .await
            .insert(id, Arc::new(tokio::sync::Mutex::new(engine)));
        view
    }

    fn view(&self, id: GameId, engine: &GameEngine) -> GameView {
        let alphabet = self.game_config.alphabet();
        GameView {
            id,
            record: engine.to_record(),
            tiles_remaining: engine.bag().counts(alphabet),
            premium_squares_used: engine.premium_tracker().used_squares(),
        }
    }

    pub async fn create_game<S: AsRef<str>>(
        &self,
        player_names: &[S],
    ) -> Result<GameView, ServiceError> {
        let mut engine = GameEngine::new(self.game_config);
        engine.start(player_names)?;
        let view = self.insert(engine).await;
        log::debug!("created game {}", view.id);
        Ok(view)
    }

    pub async fn import_game(&self, record: &record::GameRecord) -> Result<GameView, ServiceError> {
        let engine = GameEngine::from_record(self.game_config, record)?;
        let view = self.insert(engine).await;
        log::debug!("imported game {}", view.id);
        Ok(view)
    }

    pub async fn get_game(&self, id: GameId) -> Result<GameView, ServiceError> {
        let game = self.game(id).await?;
        let engine = game.lock().await;
        Ok(self.view(id, &engine))
    }

    pub async fn submit_turn(
        &self,
        id: GameId,
        request: &TurnRequest,
    ) -> Result<Turn, ServiceError> {
        let game = self.game(id).await?;
        let mut engine = game.lock().await;
        if let Some(got) = request.player_id {
            let expected = engine.current_player();
            if got != expected {
                return Err(ServiceError::OutOfTurn { expected, got });
            }
        }
        if let Some(word_judge) = &self.word_judge {
            let breakdown = engine.preview(&request.turn)?;
            let invalid = word_judge.invalid_words(&breakdown.words().collect::<Vec<_>>());
            if !invalid.is_empty() {
                log::warn!("game {}: invalid words {:?}", id, invalid);
                return Err(ServiceError::InvalidWords(invalid));
            }
        }
        Ok(engine.apply(&request.turn)?.clone())
    }

    pub async fn undo_last_turn(&self, id: GameId) -> Result<Turn, ServiceError> {
        let game = self.game(id).await?;
        let mut engine = game.lock().await;
        Ok(engine.undo()?)
    }

    pub async fn finish_game(&self, id: GameId) -> Result<Standings, ServiceError> {
        let game = self.game(id).await?;
        let mut engine = game.lock().await;
        Ok(engine.finish()?)
    }

    pub async fn abandon_game(&self, id: GameId) -> Result<(), ServiceError> {
        let game = self.game(id).await?;
        let mut engine = game.lock().await;
        Ok(engine.abandon()?)
    }

    pub async fn num_games(&self) -> usize {
        self.games.read().await.len()
    }
}
