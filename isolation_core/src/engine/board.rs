use crate::engine::state::GameState;
use crate::engine::types::{ApplyMoveError, Cell, Player};

/// ナイトの移動方向（行、列）。
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// 標準の盤の一辺の長さ。
pub const DEFAULT_BOARD_LEN: u8 = 7;

/// Isolation の局面（盤面＋両者の位置＋手番）。
///
/// 一度でも駒が置かれたマスは以後ずっと塞がったままになる。
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    /// 手番。
    active: Player,
    /// 塞がれたマス（`row * width + col`）。
    blocked: Vec<bool>,
    /// 盤の縦の長さ。
    height: u8,
    /// 先手・後手の現在位置。
    locations: [Option<Cell>; 2],
    /// 適用された手数。
    move_count: u32,
    /// 盤の横の長さ。
    width: u8,
}

impl Board {
    /// 空きマスを行優先で返す。
    #[inline]
    #[must_use]
    pub fn blank_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.blocked.len());
        for row in 0_u8..self.height {
            for col in 0_u8..self.width {
                let cell = Cell::new(row, col);
                if self.is_empty(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// 追加でマスを塞いだ局面を返す（局面の組み立て用）。
    ///
    /// # Errors
    ///
    /// - `ApplyMoveError::OutOfBounds`: 盤外のマスを指定した場合
    /// - `ApplyMoveError::IllegalMove`: すでに塞がっているマスを指定した場合
    #[inline]
    pub fn block_cell(&self, cell: Cell) -> Result<Self, ApplyMoveError> {
        let Some(index) = self.index(cell) else {
            return Err(ApplyMoveError::OutOfBounds);
        };
        if self.is_blocked_index(index) {
            return Err(ApplyMoveError::IllegalMove);
        }

        let mut next = self.clone();
        if let Some(slot) = next.blocked.get_mut(index) {
            *slot = true;
        }
        Ok(next)
    }

    /// 手番ではない側のプレイヤーを返す。
    #[inline]
    #[must_use]
    pub const fn inactive_player(&self) -> Player {
        self.active.opponent()
    }

    /// マスからインデックスを求める（盤外なら `None`）。
    fn index(&self, cell: Cell) -> Option<usize> {
        if cell.row() >= self.height || cell.col() >= self.width {
            return None;
        }
        let row = usize::from(cell.row());
        let width = usize::from(self.width);
        Some(row.saturating_mul(width).saturating_add(usize::from(cell.col())))
    }

    /// インデックスのマスが塞がっているか。
    fn is_blocked_index(&self, index: usize) -> bool {
        self.blocked.get(index).copied().unwrap_or(true)
    }

    /// `cell` が盤内かつ空いているかを返す。
    #[inline]
    #[must_use]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.index(cell)
            .is_some_and(|index| !self.is_blocked_index(index))
    }

    /// 盤面サイズを指定して空の局面を生成する（0 の辺は 1 に正規化する）。
    #[inline]
    #[must_use]
    pub fn new(width: u8, height: u8) -> Self {
        let cols = normalize_len(width);
        let rows = normalize_len(height);
        let cells = usize::from(cols).saturating_mul(usize::from(rows));
        Self {
            active: Player::First,
            blocked: vec![false; cells],
            height: rows,
            locations: [None, None],
            move_count: 0_u32,
            width: cols,
        }
    }

    /// プレイヤーに対応する位置スロットを返す。
    const fn slot(player: Player) -> usize {
        match player {
            Player::First => 0_usize,
            Player::Second => 1_usize,
        }
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_LEN, DEFAULT_BOARD_LEN)
    }
}

impl GameState for Board {
    #[inline]
    fn active_player(&self) -> Player {
        self.active
    }

    #[inline]
    fn forecast(&self, cell: Cell) -> Result<Self, ApplyMoveError> {
        let Some(index) = self.index(cell) else {
            return Err(ApplyMoveError::OutOfBounds);
        };
        if !self.legal_moves().contains(&cell) {
            return Err(ApplyMoveError::IllegalMove);
        }

        let mut next = self.clone();
        if let Some(slot) = next.blocked.get_mut(index) {
            *slot = true;
        }
        if let Some(location) = next.locations.get_mut(Self::slot(self.active)) {
            *location = Some(cell);
        }
        next.active = self.active.opponent();
        next.move_count = self.move_count.saturating_add(1_u32);
        Ok(next)
    }

    #[inline]
    fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    fn is_loser(&self, player: Player) -> bool {
        player == self.active && self.legal_moves_for(self.active).is_empty()
    }

    #[inline]
    fn is_winner(&self, player: Player) -> bool {
        player == self.inactive_player() && self.legal_moves_for(self.active).is_empty()
    }

    #[inline]
    fn legal_moves(&self) -> Vec<Cell> {
        self.legal_moves_for(self.active)
    }

    #[inline]
    fn legal_moves_for(&self, player: Player) -> Vec<Cell> {
        // 初手は任意の空きマスに置ける。
        let Some(from) = self.player_location(player) else {
            return self.blank_cells();
        };

        KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| from.offset(dr, dc))
            .filter(|&cell| self.is_empty(cell))
            .collect()
    }

    #[inline]
    fn move_count(&self) -> u32 {
        self.move_count
    }

    #[inline]
    fn opponent(&self, player: Player) -> Player {
        player.opponent()
    }

    #[inline]
    fn player_location(&self, player: Player) -> Option<Cell> {
        self.locations.get(Self::slot(player)).copied().flatten()
    }

    #[inline]
    fn utility(&self, player: Player) -> f64 {
        if !self.legal_moves_for(self.active).is_empty() {
            return 0.0_f64;
        }
        if player == self.active {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    }

    #[inline]
    fn width(&self) -> u8 {
        self.width
    }
}

/// 辺の長さを正規化する（0の場合は1にする）。
#[inline]
const fn normalize_len(len: u8) -> u8 {
    if len == u8::MIN {
        u8::MIN.wrapping_add(1_u8)
    } else {
        len
    }
}
