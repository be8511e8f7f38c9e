use core::fmt;

/// 手番（プレイヤー）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Player {
    /// 先手。
    First,
    /// 後手。
    Second,
}

impl Player {
    /// 相手側のプレイヤーを返す。
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// 盤面上のマス（行、列）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Cell {
    /// 列（0 始まり）。
    col: u8,
    /// 行（0 始まり）。
    row: u8,
}

impl Cell {
    /// 列を返す。
    #[inline]
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// `(row, col)` の組に変換する。
    #[inline]
    #[must_use]
    pub const fn into_pair(self) -> (u8, u8) {
        (self.row, self.col)
    }

    /// 行・列から `Cell` を生成する。
    #[inline]
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { col, row }
    }

    /// `(dr, dc)` だけずらしたマスを返す（負の座標になる場合は `None`）。
    #[inline]
    #[must_use]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let Some(row) = self.row.checked_add_signed(dr) else {
            return None;
        };
        match self.col.checked_add_signed(dc) {
            Some(col) => Some(Self { col, row }),
            None => None,
        }
    }

    /// 行を返す。
    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }
}

impl fmt::Display for Cell {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.row, self.col)
    }
}

/// 着手の適用に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ApplyMoveError {
    /// 指定マスが手番側の合法手ではない。
    IllegalMove,
    /// 指定マスが盤外。
    OutOfBounds,
}

impl fmt::Display for ApplyMoveError {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::IllegalMove => formatter.write_str("cell is not a legal move"),
            Self::OutOfBounds => formatter.write_str("cell is outside the board"),
        }
    }
}
