//! 盤面評価関数。
//!
//! どの関数も `player` 視点の値を返す純粋関数で、次の順に判定する：
//! 1. 終局していれば局面の効用値（勝ち `+∞`、負け `-∞`）
//! 2. 相手に合法手が無ければ `+∞`
//! 3. `player` に合法手が無ければ `-∞`
//! 4. それ以外は各関数のヒューリスティック値（有限）

use crate::engine::state::GameState;
use crate::engine::types::{Cell, Player};

/// 共有手の圧力項の基準値（ナイトの移動方向数）。
const SHARED_MOVE_BASE: f64 = 8.0_f64;

/// 終局判定と双方の合法手。
enum Outlook {
    /// ヒューリスティックを使わずに値が決まる。
    Decided(f64),
    /// 双方に合法手がある。
    Open {
        /// 相手の合法手。
        opponent: Vec<Cell>,
        /// `player` の合法手。
        own: Vec<Cell>,
    },
}

/// 終局・詰みを判定し、未決着なら双方の合法手を返す。
fn outlook<S: GameState>(state: &S, player: Player) -> Outlook {
    if state.is_winner(player) || state.is_loser(player) {
        return Outlook::Decided(state.utility(player));
    }

    let opponent = state.legal_moves_for(state.opponent(player));
    if opponent.is_empty() {
        return Outlook::Decided(f64::INFINITY);
    }

    let own = state.legal_moves_for(player);
    if own.is_empty() {
        return Outlook::Decided(f64::NEG_INFINITY);
    }

    Outlook::Open { opponent, own }
}

/// 個数を `f64` に変換する。
fn count(len: usize) -> f64 {
    f64::from(u32::try_from(len).unwrap_or(u32::MAX))
}

/// 中央への近さ。盤の中心からの二乗距離を、角（最遠点）の二乗距離から引いた値。
///
/// 角で 0、中心で最大になる。
#[inline]
#[must_use]
pub fn centrality<S: GameState>(state: &S, cell: Cell) -> f64 {
    let center_row = (f64::from(state.height()) - 1.0_f64) / 2.0_f64;
    let center_col = (f64::from(state.width()) - 1.0_f64) / 2.0_f64;
    let farthest = center_row.powi(2_i32) + center_col.powi(2_i32);

    let dr = f64::from(cell.row()) - center_row;
    let dc = f64::from(cell.col()) - center_col;
    farthest - (dr.powi(2_i32) + dc.powi(2_i32))
}

/// 双方が同時に移動できるマス（`own` の列挙順を保つ集合積）。
#[inline]
#[must_use]
pub fn shared_moves(own: &[Cell], opponent: &[Cell]) -> Vec<Cell> {
    own.iter()
        .filter(|cell| opponent.contains(cell))
        .copied()
        .collect()
}

/// 自分の合法手数。
#[inline]
#[must_use]
pub fn open_move_score<S: GameState>(state: &S, player: Player) -> f64 {
    match outlook(state, player) {
        Outlook::Decided(value) => value,
        Outlook::Open { own, .. } => count(own.len()),
    }
}

/// 合法手数の差（自分 − 相手）。
#[inline]
#[must_use]
pub fn improved_score<S: GameState>(state: &S, player: Player) -> f64 {
    match outlook(state, player) {
        Outlook::Decided(value) => value,
        Outlook::Open { opponent, own } => count(own.len()) - count(opponent.len()),
    }
}

/// 現在位置の中央への近さ（未配置なら 0）。
#[inline]
#[must_use]
pub fn center_score<S: GameState>(state: &S, player: Player) -> f64 {
    match outlook(state, player) {
        Outlook::Decided(value) => value,
        Outlook::Open { .. } => state
            .player_location(player)
            .map_or(0.0_f64, |cell| centrality(state, cell)),
    }
}

/// 合法手数の差に、現在位置の中央への近さを加える。
#[inline]
#[must_use]
pub fn mobility_centrality_score<S: GameState>(state: &S, player: Player) -> f64 {
    match outlook(state, player) {
        Outlook::Decided(value) => value,
        Outlook::Open { opponent, own } => {
            let position = state
                .player_location(player)
                .map_or(0.0_f64, |cell| centrality(state, cell));
            count(own.len()) - count(opponent.len()) + position
        }
    }
}

/// 合法手数の差、移動先の中央度の合計、共有手の圧力、共有手の最大中央度の和。
///
/// 共有手が少ないほど圧力項は大きくなる。
#[inline]
#[must_use]
pub fn contested_mobility_score<S: GameState>(state: &S, player: Player) -> f64 {
    match outlook(state, player) {
        Outlook::Decided(value) => value,
        Outlook::Open { opponent, own } => {
            let shared = shared_moves(&own, &opponent);
            let mobility = count(own.len()) - count(opponent.len());
            let reach: f64 = own.iter().map(|&cell| centrality(state, cell)).sum();
            let pressure = SHARED_MOVE_BASE - count(shared.len());
            let interference = shared
                .iter()
                .map(|&cell| centrality(state, cell))
                .reduce(f64::max)
                .unwrap_or(0.0_f64);
            mobility + reach + pressure + interference
        }
    }
}

/// 手数で重みを変える評価。
///
/// `factor = 1 / (ply + 1)` として `|共有手| * factor + |自分の合法手| / factor`。
/// 序盤は共有手（位置取り）の比重が大きく、終盤ほど自分の合法手数が支配的になる。
#[inline]
#[must_use]
pub fn ply_weighted_score<S: GameState>(state: &S, player: Player) -> f64 {
    match outlook(state, player) {
        Outlook::Decided(value) => value,
        Outlook::Open { opponent, own } => {
            let plies = f64::from(state.move_count()) + 1.0_f64;
            let shared = shared_moves(&own, &opponent);
            count(shared.len()) / plies + plies * count(own.len())
        }
    }
}
