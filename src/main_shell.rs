// Copyright (C) 2020-2026 Andy Kurnia.

use scorekeep::{display, error, game_config, game_state, placement, record, return_error};

static HELP: &str = "\
new <name> <name> [name] [name]   start a game
play <WORD> <row> <col> <across|down> [blank index..]
preview <WORD> <row> <col> <across|down> [blank index..]
undo | board | bag | scores | history | finish
save <file.json> | load <file.json> | csv <file.csv>
source <file> | exit";

fn parse_turn(args: &[String]) -> error::Returns<placement::TurnInput> {
    if args.len() < 4 {
        return_error!("need <WORD> <row> <col> <across|down>".to_string());
    }
    Ok(placement::TurnInput {
        word: args[0].to_ascii_uppercase(),
        start_row: args[1].parse()?,
        start_col: args[2].parse()?,
        direction: args[3].parse()?,
        blank_indices: args[4..]
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<usize>, _>>()?,
    })
}

fn print_scores(engine: &game_state::GameEngine) {
    for player in engine.players() {
        print!(
            "{}{}: {}, ",
            if player.id == engine.current_player() { "*" } else { "" },
            player.name,
            player.score
        );
    }
    println!("{} tiles in bag", engine.bag().total_remaining());
}

fn run_command<'a>(
    game_config: &'a game_config::GameConfig<'a>,
    engine: &mut game_state::GameEngine<'a>,
    strings: &[String],
) -> error::Returns<()> {
    match strings[0].as_str() {
        "new" => {
            let mut new_engine = game_state::GameEngine::new(game_config);
            new_engine.start(&strings[1..])?;
            *engine = new_engine;
            print_scores(engine);
        }
        "play" => {
            let input = parse_turn(&strings[1..])?;
            let turn = engine.apply(&input)?;
            println!("{}", record::fmt_turn(turn));
            display::print_board(
                game_config.alphabet(),
                game_config.board_layout(),
                engine.board(),
            );
            print_scores(engine);
        }
        "preview" => {
            let input = parse_turn(&strings[1..])?;
            let breakdown = engine.preview(&input)?;
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        }
        "undo" => {
            let turn = engine.undo()?;
            println!("undid {}", record::fmt_turn(&turn));
            print_scores(engine);
        }
        "board" => {
            display::print_board(
                game_config.alphabet(),
                game_config.board_layout(),
                engine.board(),
            );
        }
        "bag" => {
            let alphabet = game_config.alphabet();
            println!(
                "{} ({} tiles)",
                alphabet.fmt_tally(&engine.bag().0),
                engine.bag().total_remaining()
            );
        }
        "scores" => print_scores(engine),
        "history" => {
            for (i, turn) in (1..).zip(engine.history().iter()) {
                println!("{:3}. {}", i, record::fmt_turn(turn));
            }
        }
        "finish" => {
            let standings = engine.finish()?;
            for player in &standings.players {
                println!("{}: {}", player.name, player.score);
            }
            println!("winners: {:?}", standings.winners);
        }
        "save" => {
            if strings.len() < 2 {
                return_error!("need a file name".to_string());
            }
            std::fs::write(&strings[1], engine.to_record().to_json()?)?;
        }
        "load" => {
            if strings.len() < 2 {
                return_error!("need a file name".to_string());
            }
            let record = record::GameRecord::from_json(&std::fs::read_to_string(&strings[1])?)?;
            *engine = game_state::GameEngine::from_record(game_config, &record)?;
            print_scores(engine);
        }
        "csv" => {
            if strings.len() < 2 {
                return_error!("need a file name".to_string());
            }
            record::write_turns_csv(std::fs::File::create(&strings[1])?, &engine.to_record())?;
        }
        _ => {
            return_error!(format!("invalid input {:?}, help for help", strings[0]));
        }
    }
    Ok(())
}

fn main() -> error::Returns<()> {
    env_logger::init();
    let game_config = game_config::common_english_game_config();
    let mut engine = game_state::GameEngine::new(game_config);
    let mut rl = rustyline::DefaultEditor::new()?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    for arg in std::env::args().skip(1).collect::<Vec<_>>().into_iter().rev() {
        cmd_stack.push((format!("source {}", shell_words::quote(&arg)), None));
    }
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{}:{}> {}", filename, line_num, line);
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if !strings.is_empty() {
                        match strings[0].as_str() {
                            "help" => {
                                println!("{}", HELP);
                            }
                            "exit" => {
                                break;
                            }
                            "source" => {
                                if strings.len() > 1 {
                                    match std::fs::read_to_string(&strings[1]) {
                                        Ok(whole_file) => {
                                            let v = cmd_stack.len();
                                            for (line_num, line) in whole_file.lines().enumerate() {
                                                cmd_stack.push((
                                                    line.to_string(),
                                                    Some((strings[1].clone(), line_num + 1)),
                                                ));
                                            }
                                            cmd_stack[v..].reverse();
                                        }
                                        Err(err) => {
                                            println!("cannot open file: {:?}", err);
                                        }
                                    }
                                } else {
                                    println!("need another arg");
                                }
                            }
                            _ => {
                                if let Err(err) = run_command(game_config, &mut engine, &strings) {
                                    println!("error: {}", err);
                                }
                            }
                        }
                    }
                }
                Err(err) => {
                    println!("Bad quoting: {:?}", err);
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
    }

    Ok(())
}
