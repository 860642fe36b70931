// Copyright (C) 2020-2026 Andy Kurnia.

use std::sync::Arc;

use scorekeep::{
    error::MoveError,
    game_config,
    game_state::GameStatus,
    matrix::Direction,
    placement::TurnInput,
    service::{GameId, GameService, ServiceError, TurnRequest, WordList},
};

fn new_service() -> GameService {
    GameService::new(game_config::common_english_game_config())
}

fn request(player_id: u8, word: &str, row: i8, col: i8, direction: Direction) -> TurnRequest {
    TurnRequest {
        player_id: Some(player_id),
        turn: TurnInput::new(word, row, col, direction),
    }
}

#[tokio::test]
async fn create_submit_undo_and_get() {
    let game_service = new_service();
    let view = game_service.create_game(&["Ann", "Bo"]).await.unwrap();
    assert_eq!(view.record.status, GameStatus::InProgress);
    assert_eq!(view.tiles_remaining.values().map(|&n| n as u16).sum::<u16>(), 100);

    let turn = game_service
        .submit_turn(view.id, &request(0, "CAT", 7, 5, Direction::Across))
        .await
        .unwrap();
    assert_eq!(turn.score, 10);

    let view = game_service.get_game(view.id).await.unwrap();
    assert_eq!(view.record.current_player, 1);
    assert_eq!(view.record.players[0].score, 10);
    assert_eq!(view.premium_squares_used, vec![(7, 7)]);
    assert_eq!(view.tiles_remaining[&'C'], 1);
    assert_eq!(view.record.board_state[7][5].as_ref().map(|t| t.letter), Some('C'));

    let undone = game_service.undo_last_turn(view.id).await.unwrap();
    assert_eq!(undone.word, "CAT");
    let view = game_service.get_game(view.id).await.unwrap();
    assert!(view.record.turns.is_empty());
    assert!(view.premium_squares_used.is_empty());
    assert_eq!(view.record.players[0].score, 0);
}

#[tokio::test]
async fn out_of_turn_is_rejected() {
    let game_service = new_service();
    let view = game_service.create_game(&["Ann", "Bo"]).await.unwrap();
    assert_eq!(
        game_service
            .submit_turn(view.id, &request(1, "CAT", 7, 5, Direction::Across))
            .await
            .err(),
        Some(ServiceError::OutOfTurn {
            expected: 0,
            got: 1
        })
    );
    // no player named means whoever is up.
    let turn = game_service
        .submit_turn(
            view.id,
            &TurnInput::new("CAT", 7, 5, Direction::Across).into(),
        )
        .await
        .unwrap();
    assert_eq!(turn.player_id, 0);
}

#[tokio::test]
async fn word_judge_sees_every_formed_word() {
    let game_service =
        new_service().with_word_judge(Arc::new(WordList::new(["cat", "on", "ao"])));
    let view = game_service.create_game(&["Ann", "Bo"]).await.unwrap();
    game_service
        .submit_turn(view.id, &request(0, "CAT", 7, 5, Direction::Across))
        .await
        .unwrap();
    // TN is formed under the T.
    assert_eq!(
        game_service
            .submit_turn(view.id, &request(1, "ON", 8, 6, Direction::Across))
            .await
            .err(),
        Some(ServiceError::InvalidWords(vec!["TN".to_string()]))
    );
    let view = game_service.get_game(view.id).await.unwrap();
    assert_eq!(view.record.turns.len(), 1);
    assert_eq!(view.record.current_player, 1);
}

#[tokio::test]
async fn engine_errors_pass_through() {
    let game_service = new_service();
    let view = game_service.create_game(&["Ann", "Bo"]).await.unwrap();
    assert_eq!(
        game_service
            .submit_turn(view.id, &request(0, "CAT", 0, 0, Direction::Across))
            .await
            .err(),
        Some(ServiceError::Move(MoveError::MustCoverCenter))
    );
    assert_eq!(
        game_service.undo_last_turn(view.id).await.err(),
        Some(ServiceError::Move(MoveError::NothingToUndo))
    );
    assert_eq!(
        game_service.create_game(&["solo"]).await.err(),
        Some(ServiceError::Move(MoveError::PlayerCount {
            min: 2,
            max: 4,
            got: 1
        }))
    );
}

#[tokio::test]
async fn unknown_game() {
    let game_service = new_service();
    assert_eq!(
        game_service.get_game(GameId(99)).await.err(),
        Some(ServiceError::UnknownGame(GameId(99)))
    );
    assert_eq!(
        game_service.finish_game(GameId(99)).await.err(),
        Some(ServiceError::UnknownGame(GameId(99)))
    );
}

#[tokio::test]
async fn finished_games_take_no_turns() {
    let game_service = new_service();
    let view = game_service.create_game(&["Ann", "Bo", "Cy"]).await.unwrap();
    game_service
        .submit_turn(view.id, &request(0, "CAT", 7, 5, Direction::Across))
        .await
        .unwrap();
    let standings = game_service.finish_game(view.id).await.unwrap();
    assert_eq!(standings.winners, vec![0]);
    assert_eq!(
        game_service
            .submit_turn(view.id, &request(1, "HTE", 6, 7, Direction::Down))
            .await
            .err(),
        Some(ServiceError::Move(MoveError::GameNotInProgress(
            GameStatus::Finished
        )))
    );
    assert!(game_service.abandon_game(view.id).await.is_err());
}

#[tokio::test]
async fn import_continues_an_exported_game() {
    let game_service = new_service();
    let view = game_service.create_game(&["Ann", "Bo"]).await.unwrap();
    game_service
        .submit_turn(view.id, &request(0, "CAT", 7, 5, Direction::Across))
        .await
        .unwrap();
    let exported = game_service.get_game(view.id).await.unwrap();

    let json = serde_json::to_string(&exported.record).unwrap();
    let record = serde_json::from_str(&json).unwrap();
    let imported = game_service.import_game(&record).await.unwrap();
    assert_ne!(imported.id, exported.id);
    assert_eq!(imported.record, exported.record);
    assert_eq!(imported.premium_squares_used, exported.premium_squares_used);
    assert_eq!(game_service.num_games().await, 2);

    let mut tampered = exported.record.clone();
    tampered.players[0].score = 99;
    assert!(matches!(
        game_service.import_game(&tampered).await,
        Err(ServiceError::Reconstruct(_))
    ));
    assert_eq!(game_service.num_games().await, 2);
}

#[test]
fn turn_requests_parse_from_json() {
    let request = serde_json::from_str::<TurnRequest>(
        r#"{"playerId":0,"word":"JINX","startRow":7,"startCol":7,
            "direction":"down","blankTiles":[2]}"#,
    )
    .unwrap();
    assert_eq!(request.player_id, Some(0));
    assert_eq!(request.turn.direction, Direction::Down);
    assert_eq!(request.turn.blank_indices, vec![2]);
}

#[tokio::test]
async fn concurrent_submissions_apply_once() {
    let game_service = Arc::new(new_service());
    let view = game_service.create_game(&["Ann", "Bo"]).await.unwrap();
    let tasks = (0..8)
        .map(|_| {
            let game_service = Arc::clone(&game_service);
            tokio::spawn(async move {
                game_service
                    .submit_turn(view.id, &request(0, "CAT", 7, 5, Direction::Across))
                    .await
            })
        })
        .collect::<Vec<_>>();
    let mut num_ok = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => num_ok += 1,
            Err(err) => assert!(matches!(
                err,
                ServiceError::OutOfTurn { .. } | ServiceError::Move(MoveError::NoNewTiles)
            )),
        }
    }
    assert_eq!(num_ok, 1);
    let view = game_service.get_game(view.id).await.unwrap();
    assert_eq!(view.record.turns.len(), 1);
    assert_eq!(view.tiles_remaining.values().map(|&n| n as u16).sum::<u16>(), 97);
}
