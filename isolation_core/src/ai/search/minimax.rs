use tracing::warn;

use crate::ai::types::Move;
use crate::engine::state::GameState;
use crate::engine::types::Cell;

use super::limits::{SearchContext, SearchTimeout};
use super::{Role, SearchResult};

/// 深さ制限付きミニマックス探索。
///
/// `depth == 0` や合法手が無い局面では展開せず、`Move::NoMove` と評価値を返す。
///
/// # Errors
///
/// 探索中に持ち時間が閾値以下になった場合、`SearchTimeout` を返す。
/// そのときの途中結果はすべて破棄される。
#[inline]
pub fn minimax<S: GameState>(
    state: &S,
    depth: u32,
    ctx: &mut SearchContext<'_, S>,
) -> Result<SearchResult, SearchTimeout> {
    let role = Role::at(state, ctx.root());
    expand(state, depth, role, ctx)
}

/// ミニマックスの再帰本体。
fn expand<S: GameState>(
    state: &S,
    depth: u32,
    role: Role,
    ctx: &mut SearchContext<'_, S>,
) -> Result<SearchResult, SearchTimeout> {
    if let Err(err) = ctx.budget().check() {
        return Err(err);
    }
    ctx.stats_mut().inc_nodes();

    if depth == 0_u32 {
        return Ok(ctx.horizon_leaf(state));
    }

    let moves = state.legal_moves();
    if moves.is_empty() {
        return Ok(ctx.terminal_leaf(state));
    }

    let next_depth = depth.saturating_sub(1_u32);
    let mut best: Option<(Cell, f64)> = None;

    for cell in moves {
        let next = match state.forecast(cell) {
            Ok(value) => value,
            Err(err) => {
                warn!(%cell, %err, "skipping move that failed to apply");
                continue;
            }
        };
        let child_role = Role::at(&next, ctx.root());
        let score = match expand(&next, next_depth, child_role, ctx) {
            Ok(value) => value.score(),
            Err(err) => return Err(err),
        };
        if best.is_none_or(|(_, incumbent)| role.prefers(score, incumbent)) {
            best = Some((cell, score));
        }
    }

    Ok(match best {
        Some((cell, score)) => SearchResult::new(Move::Place(cell), score),
        None => ctx.terminal_leaf(state),
    })
}
