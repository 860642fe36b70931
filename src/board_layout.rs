// Copyright (C) 2020-2026 Andy Kurnia.

use super::matrix;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BonusCode {
    #[serde(rename = "")]
    None,
    #[serde(rename = "DLS")]
    Dls,
    #[serde(rename = "TLS")]
    Tls,
    #[serde(rename = "DWS")]
    Dws,
    #[serde(rename = "TWS")]
    Tws,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Premium {
    pub word_multiplier: i8,
    pub letter_multiplier: i8,
}

impl Premium {
    pub const NONE: Premium = Premium {
        word_multiplier: 1,
        letter_multiplier: 1,
    };
}

impl BonusCode {
    #[inline(always)]
    pub fn premium(self) -> Premium {
        match self {
            BonusCode::None => Premium::NONE,
            BonusCode::Dls => Premium {
                word_multiplier: 1,
                letter_multiplier: 2,
            },
            BonusCode::Tls => Premium {
                word_multiplier: 1,
                letter_multiplier: 3,
            },
            BonusCode::Dws => Premium {
                word_multiplier: 2,
                letter_multiplier: 1,
            },
            BonusCode::Tws => Premium {
                word_multiplier: 3,
                letter_multiplier: 1,
            },
        }
    }
}

pub struct StaticBoardLayout {
    bonuses: Box<[BonusCode]>,
    dim: matrix::Dim,
    star_row: i8,
    star_col: i8,
}

pub enum BoardLayout {
    Static(StaticBoardLayout),
}

impl BoardLayout {
    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        match self {
            BoardLayout::Static(x) => x.dim,
        }
    }

    #[inline(always)]
    pub fn star_row(&self) -> i8 {
        match self {
            BoardLayout::Static(x) => x.star_row,
        }
    }

    #[inline(always)]
    pub fn star_col(&self) -> i8 {
        match self {
            BoardLayout::Static(x) => x.star_col,
        }
    }

    #[inline(always)]
    pub fn bonuses(&self) -> &[BonusCode] {
        match self {
            BoardLayout::Static(x) => &x.bonuses,
        }
    }

    #[inline(always)]
    pub fn bonus_at(&self, row: i8, col: i8) -> BonusCode {
        self.bonuses()[self.dim().at_row_col(row, col)]
    }

    #[inline(always)]
    pub fn premium_at(&self, row: i8, col: i8) -> Premium {
        self.bonus_at(row, col).premium()
    }

    #[inline(always)]
    pub fn is_bonus(&self, row: i8, col: i8) -> bool {
        self.bonus_at(row, col) != BonusCode::None
    }

    // row-major grid of bonus codes for rendering layers.
    pub fn bonus_grid(&self) -> Vec<Vec<BonusCode>> {
        let dim = self.dim();
        (0..dim.rows)
            .map(|r| (0..dim.cols).map(|c| self.bonus_at(r, c)).collect())
            .collect()
    }
}

pub fn make_standard_board_layout() -> BoardLayout {
    const TW: BonusCode = BonusCode::Tws;
    const DW: BonusCode = BonusCode::Dws;
    const TL: BonusCode = BonusCode::Tls;
    const DL: BonusCode = BonusCode::Dls;
    const __: BonusCode = BonusCode::None;
    #[rustfmt::skip]
    let bonuses = [
        TW, __, __, DL, __, __, __, TW, __, __, __, DL, __, __, TW, //
        __, DW, __, __, __, TL, __, __, __, TL, __, __, __, DW, __, //
        __, __, DW, __, __, __, DL, __, DL, __, __, __, DW, __, __, //
        DL, __, __, DW, __, __, __, DL, __, __, __, DW, __, __, DL, //
        __, __, __, __, DW, __, __, __, __, __, DW, __, __, __, __, //
        __, TL, __, __, __, TL, __, __, __, TL, __, __, __, TL, __, //
        __, __, DL, __, __, __, DL, __, DL, __, __, __, DL, __, __, //
        TW, __, __, DL, __, __, __, DW, __, __, __, DL, __, __, TW, //
        __, __, DL, __, __, __, DL, __, DL, __, __, __, DL, __, __, //
        __, TL, __, __, __, TL, __, __, __, TL, __, __, __, TL, __, //
        __, __, __, __, DW, __, __, __, __, __, DW, __, __, __, __, //
        DL, __, __, DW, __, __, __, DL, __, __, __, DW, __, __, DL, //
        __, __, DW, __, __, __, DL, __, DL, __, __, __, DW, __, __, //
        __, DW, __, __, __, TL, __, __, __, TL, __, __, __, DW, __, //
        TW, __, __, DL, __, __, __, TW, __, __, __, DL, __, __, TW, //
    ];
    BoardLayout::Static(StaticBoardLayout {
        bonuses: bonuses.into(),
        dim: matrix::Dim { rows: 15, cols: 15 },
        star_row: 7,
        star_col: 7,
    })
}
