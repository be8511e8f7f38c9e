use crate::ai::types::Move;
use crate::engine::board::Board;
use crate::engine::state::GameState as _;
use crate::engine::types::Player;

/// ゲームの状態。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Status {
    /// 終局。
    Finished {
        /// 勝者。
        winner: Player,
    },
    /// 進行中。
    InProgress,
}

/// 手の適用に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum PlayError {
    /// すでに終局している。
    GameOver,
    /// 指定マスが合法手ではない。
    IllegalMove,
}

/// 1ゲームの進行を管理する構造体。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    /// 現在の局面。
    board: Board,
    /// 手を返せずに投了したプレイヤー。
    forfeited: Option<Player>,
}

impl Game {
    /// 現在の局面を返す。
    #[inline]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// 指定局面からゲームを開始する。
    #[inline]
    #[must_use]
    pub const fn from_board(board: Board) -> Self {
        Self {
            board,
            forfeited: None,
        }
    }

    /// 終局しているかどうかを返す。
    #[inline]
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self.status(), Status::Finished { .. })
    }

    /// 空の盤面からゲームを開始する。
    #[inline]
    #[must_use]
    pub fn new(width: u8, height: u8) -> Self {
        Self::from_board(Board::new(width, height))
    }

    /// 1手を適用する。
    ///
    /// `Move::NoMove` は手番側の投了として扱う（合法手が残っていても負けになる）。
    ///
    /// # Errors
    ///
    /// 次の場合にエラーを返す：
    /// - `PlayError::GameOver`: すでにゲームが終局している場合
    /// - `PlayError::IllegalMove`: 指定されたマスが合法手でない場合
    #[inline]
    pub fn play(&mut self, mv: Move) -> Result<Status, PlayError> {
        if self.is_game_over() {
            return Err(PlayError::GameOver);
        }

        match mv {
            Move::Place(cell) => {
                self.board = match self.board.forecast(cell) {
                    Ok(next) => next,
                    Err(_err) => return Err(PlayError::IllegalMove),
                };
            }
            Move::NoMove => self.forfeited = Some(self.board.active_player()),
        }

        Ok(self.status())
    }

    /// 現手番を返す。
    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Player {
        self.board.active_player()
    }

    /// 現在のゲーム状態を返す。
    #[inline]
    #[must_use]
    pub fn status(&self) -> Status {
        if let Some(loser) = self.forfeited {
            return Status::Finished {
                winner: loser.opponent(),
            };
        }

        let active = self.board.active_player();
        if self.board.is_loser(active) {
            return Status::Finished {
                winner: active.opponent(),
            };
        }

        Status::InProgress
    }
}

impl Default for Game {
    #[inline]
    fn default() -> Self {
        Self::from_board(Board::default())
    }
}
