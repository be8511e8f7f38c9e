use crate::engine::types::{ApplyMoveError, Cell, Player};

/// 探索と評価関数が前提とする局面の契約。
///
/// 局面は不変として扱う。`forecast` は常に新しい局面を返し、`self` を変更しない。
/// そのため探索木の展開にアンドゥ処理は不要になる。
pub trait GameState: Sized {
    /// 現在の手番を返す。
    fn active_player(&self) -> Player;

    /// 着手を適用した新しい局面を返す。
    ///
    /// # Errors
    ///
    /// `cell` が手番側の合法手でない場合にエラーを返す。
    fn forecast(&self, cell: Cell) -> Result<Self, ApplyMoveError>;

    /// 盤の縦の長さ。
    fn height(&self) -> u8;

    /// `player` が負けているか（自分が手番で、かつ合法手が無い）。
    fn is_loser(&self, player: Player) -> bool;

    /// `player` が勝っているか（相手が手番で、かつ合法手が無い）。
    fn is_winner(&self, player: Player) -> bool;

    /// 手番側の合法手を返す。
    fn legal_moves(&self) -> Vec<Cell>;

    /// 指定プレイヤーの合法手を返す（無ければ空）。
    fn legal_moves_for(&self, player: Player) -> Vec<Cell>;

    /// これまでに適用された手数（ply）。
    fn move_count(&self) -> u32;

    /// `player` の相手を返す。
    fn opponent(&self, player: Player) -> Player;

    /// 指定プレイヤーの現在位置（未配置なら `None`）。
    fn player_location(&self, player: Player) -> Option<Cell>;

    /// 終局時の効用値（`player` 視点）。進行中は 0。
    fn utility(&self, player: Player) -> f64;

    /// 盤の横の長さ。
    fn width(&self) -> u8;
}
