// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use scorekeep::{error, game_config, game_state, random_play, return_error};

// consecutive rejected attempts before a game is considered stuck.
const MAX_ATTEMPTS: u32 = 200;

const MAX_WORD_LEN: i8 = 8;

type GameRow = (u64, usize, usize, u16, Vec<i32>, Vec<u8>);

// Plays one game of random turns, checking invariants along the way.
fn play_one<R: Rng>(
    game_config: &game_config::GameConfig,
    rng: &mut R,
    game_id: u64,
) -> error::Returns<GameRow> {
    let num_players = rng.random_range(game_config.min_players()..=game_config.max_players());
    let names = (1..=num_players)
        .map(|x| format!("p{}", x))
        .collect::<Vec<_>>();
    let mut engine = game_state::GameEngine::new(game_config);
    engine.start(&names)?;
    let num_tiles = game_config.alphabet().num_tiles() as usize;
    let mut num_bingos = vec![0u8; num_players as usize];
    let mut num_rejected = 0usize;
    let mut attempts = 0;
    while attempts < MAX_ATTEMPTS && engine.bag().total_remaining() > 0 {
        let input = random_play::random_turn_input(&engine, rng, MAX_WORD_LEN);
        let before = engine.to_record();
        let applied = engine.apply(&input).cloned();
        let turn = match applied {
            Ok(turn) => turn,
            Err(_) => {
                if engine.to_record() != before {
                    return_error!(format!("game {}: rejected {:?} changed state", game_id, input));
                }
                attempts += 1;
                num_rejected += 1;
                continue;
            }
        };
        attempts = 0;
        if engine.bag().total_remaining() as usize + engine.board().num_tiles() != num_tiles {
            return_error!(format!("game {}: tiles not conserved after {}", game_id, turn.word));
        }
        if rng.random_bool(0.1) {
            engine.undo()?;
            if engine.to_record() != before {
                return_error!(format!("game {}: undo of {} did not restore", game_id, turn.word));
            }
            continue;
        }
        if turn.bingo_bonus != 0 {
            num_bingos[turn.player_id as usize] += 1;
        }
    }

    let saved = engine.to_record();
    let reloaded = game_state::GameEngine::from_record(game_config, &saved)?;
    if reloaded.to_record() != saved
        || reloaded.premium_tracker() != engine.premium_tracker()
        || reloaded.bag() != engine.bag()
    {
        return_error!(format!("game {}: reload differs", game_id));
    }
    let standings = engine.finish()?;
    log::debug!("game {} winners {:?}", game_id, standings.winners);

    Ok((
        game_id,
        engine.history().len(),
        num_rejected,
        engine.bag().total_remaining(),
        engine.players().iter().map(|p| p.score).collect(),
        num_bingos,
    ))
}

pub fn main() -> error::Returns<()> {
    env_logger::init();
    let args = std::env::args().collect::<Vec<_>>();
    let num_games = match args.get(1) {
        Some(s) => s.parse::<u64>()?,
        None => 1000,
    };
    let seed = match args.get(2) {
        Some(s) => s.parse::<u64>()?,
        None => 0,
    };
    let game_config = game_config::common_english_game_config();
    let num_threads = num_cpus::get();
    let num_processed_games = std::sync::Arc::new(std::sync::atomic::AtomicU64::new(0));
    let mut threads = vec![];
    let (tx, rx) = std::sync::mpsc::channel();
    for thread_idx in 0..num_threads {
        let tx = tx.clone();
        let num_processed_games = std::sync::Arc::clone(&num_processed_games);
        threads.push(std::thread::spawn(move || {
            let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(seed ^ thread_idx as u64);
            loop {
                let game_id =
                    num_processed_games.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                if game_id >= num_games {
                    break;
                }
                let row = play_one(game_config, &mut rng, game_id).map_err(|e| e.to_string());
                if tx.send(row).is_err() {
                    break;
                }
            }
        }));
    }
    drop(tx);

    let epoch_secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let run_identifier = format!("auto-{:08x}.csv", epoch_secs);
    println!("logging to {}", run_identifier);
    let mut csv_game = csv::Writer::from_path(&run_identifier)?;
    csv_game.serialize((
        "gameID",
        "turns",
        "rejected",
        "tilesremaining",
        "scores",
        "bingos",
    ))?;
    let mut completed_games = 0u64;
    let mut failed_games = 0u64;
    let t0 = std::time::Instant::now();
    for row in rx.iter() {
        match row {
            Ok((game_id, num_turns, num_rejected, tiles_remaining, scores, bingos)) => {
                csv_game.serialize((
                    game_id,
                    num_turns,
                    num_rejected,
                    tiles_remaining,
                    scores
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<_>>()
                        .join(" "),
                    bingos
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<_>>()
                        .join(" "),
                ))?;
                completed_games += 1;
            }
            Err(err) => {
                log::error!("{}", err);
                failed_games += 1;
            }
        }
    }
    csv_game.flush()?;
    println!(
        "After {} seconds, have logged {} games ({} failed) into {}",
        t0.elapsed().as_secs(),
        completed_games,
        failed_games,
        run_identifier
    );

    for thread in threads {
        if let Err(e) = thread.join() {
            println!("{:?}", e);
        }
    }

    if failed_games > 0 {
        return_error!(format!("{} games failed invariant checks", failed_games));
    }
    Ok(())
}
