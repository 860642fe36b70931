// Copyright (C) 2020-2026 Andy Kurnia.

use scorekeep::{error, game_config, game_state, record, service};

// A game script. Either seat new players or continue an imported record,
// then run the steps in order. Failed steps are reported and skipped.
//
// {
//   "players": ["Ann", "Bob"],
//   "steps": [
//     { "action": "play", "playerId": 0, "word": "CAT",
//       "startRow": 7, "startCol": 5, "direction": "across" },
//     { "action": "undo" },
//     { "action": "finish" }
//   ]
// }
#[derive(serde::Deserialize)]
struct Script {
    #[serde(default)]
    players: Vec<String>,
    #[serde(default)]
    record: Option<record::GameRecord>,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(serde::Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum Step {
    Play(service::TurnRequest),
    Undo,
    Finish,
    Abandon,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct StepResult {
    step: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    turn: Option<game_state::Turn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    standings: Option<game_state::Standings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn run_step(
    game_service: &service::GameService,
    id: service::GameId,
    step_idx: usize,
    step: &Step,
) -> StepResult {
    let mut result = StepResult {
        step: step_idx,
        turn: None,
        standings: None,
        error: None,
    };
    let outcome = match step {
        Step::Play(request) => game_service
            .submit_turn(id, request)
            .await
            .map(|turn| result.turn = Some(turn)),
        Step::Undo => game_service
            .undo_last_turn(id)
            .await
            .map(|turn| result.turn = Some(turn)),
        Step::Finish => game_service
            .finish_game(id)
            .await
            .map(|standings| result.standings = Some(standings)),
        Step::Abandon => game_service.abandon_game(id).await,
    };
    if let Err(err) = outcome {
        result.error = Some(err.to_string());
    }
    result
}

#[tokio::main]
async fn main() -> error::Returns<()> {
    env_logger::init();
    let args = std::env::args().collect::<Vec<_>>();
    let data = match args.get(1).map(String::as_str) {
        None | Some("-") => std::io::read_to_string(std::io::stdin())?,
        Some(path) => std::fs::read_to_string(path)?,
    };
    let script = serde_json::from_str::<Script>(&data)?;

    let game_service = service::GameService::new(game_config::common_english_game_config());
    let view = match &script.record {
        Some(record) => game_service.import_game(record).await?,
        None => game_service.create_game(&script.players).await?,
    };

    for (step_idx, step) in (1..).zip(script.steps.iter()) {
        let result = run_step(&game_service, view.id, step_idx, step).await;
        println!("{}", serde_json::to_string(&result)?);
    }

    let view = game_service.get_game(view.id).await?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
