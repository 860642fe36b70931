// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, board_layout};

#[inline(always)]
pub fn empty_label(board_layout: &board_layout::BoardLayout, row: i8, col: i8) -> char {
    if row == board_layout.star_row() && col == board_layout.star_col() {
        return '*';
    }
    match board_layout.bonus_at(row, col) {
        board_layout::BonusCode::Tws => '=',
        board_layout::BonusCode::Dws => '-',
        board_layout::BonusCode::Tls => '"',
        board_layout::BonusCode::Dls => '\'',
        board_layout::BonusCode::None => ' ',
    }
}

// blanks print in lowercase.
#[inline(always)]
pub fn board_label(
    alphabet: &alphabet::Alphabet,
    board_layout: &board_layout::BoardLayout,
    board: &board::Board,
    row: i8,
    col: i8,
) -> char {
    match board.tile_at(alphabet, row, col) {
        Some(tile) if tile.is_blank => tile.letter.to_ascii_lowercase(),
        Some(tile) => tile.letter,
        None => empty_label(board_layout, row, col),
    }
}

pub fn print_board(
    alphabet: &alphabet::Alphabet,
    board_layout: &board_layout::BoardLayout,
    board: &board::Board,
) {
    let dim = board_layout.dim();
    print!("   ");
    for c in 0..dim.cols {
        print!("{:<2}", c);
    }
    println!();
    print!("  +");
    for _ in 1..dim.cols {
        print!("--");
    }
    println!("-+");
    for r in 0..dim.rows {
        print!("{:2}|", r);
        for c in 0..dim.cols {
            if c > 0 {
                print!(" ")
            }
            print!("{}", board_label(alphabet, board_layout, board, r, c));
        }
        println!("|{}", r);
    }
    print!("  +");
    for _ in 1..dim.cols {
        print!("--");
    }
    println!("-+");
}
