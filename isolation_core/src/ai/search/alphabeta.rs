use tracing::warn;

use crate::ai::types::Move;
use crate::engine::state::GameState;
use crate::engine::types::Cell;

use super::limits::{SearchContext, SearchTimeout};
use super::{Role, SearchResult};

/// アルファベータ枝刈り付きの深さ制限ミニマックス探索。
///
/// 窓は `(-∞, +∞)` から始める。選ぶ手と評価値は `minimax` と常に一致し、
/// 訪問するノードはその部分集合になる。
///
/// # Errors
///
/// 探索中に持ち時間が閾値以下になった場合、`SearchTimeout` を返す。
#[inline]
pub fn alphabeta<S: GameState>(
    state: &S,
    depth: u32,
    ctx: &mut SearchContext<'_, S>,
) -> Result<SearchResult, SearchTimeout> {
    let role = Role::at(state, ctx.root());
    expand(state, depth, f64::NEG_INFINITY, f64::INFINITY, role, ctx)
}

/// アルファベータの再帰本体。
///
/// - `alpha`: 最大化側がこれまでに保証できる値
/// - `beta`: 最小化側がこれまでに保証できる値
fn expand<S: GameState>(
    state: &S,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
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
        let score = match expand(&next, next_depth, alpha, beta, child_role, ctx) {
            Ok(value) => value.score(),
            Err(err) => return Err(err),
        };
        if best.is_none_or(|(_, incumbent)| role.prefers(score, incumbent)) {
            best = Some((cell, score));
        }

        let Some((best_cell, best_score)) = best else {
            continue;
        };
        match role {
            Role::Max => {
                if best_score >= beta {
                    ctx.stats_mut().inc_cutoffs();
                    return Ok(SearchResult::new(Move::Place(best_cell), best_score));
                }
                alpha = alpha.max(best_score);
            }
            Role::Min => {
                if best_score <= alpha {
                    ctx.stats_mut().inc_cutoffs();
                    return Ok(SearchResult::new(Move::Place(best_cell), best_score));
                }
                beta = beta.min(best_score);
            }
        }
    }

    Ok(match best {
        Some((cell, score)) => SearchResult::new(Move::Place(cell), score),
        None => ctx.terminal_leaf(state),
    })
}
