/// 反復深化アルファベータ探索AI。
pub mod alphabeta;
/// 盤面評価関数。
pub mod eval;
/// 固定深さミニマックス探索AI。
pub mod minimax;
/// 合法手からランダムに1手選ぶAI。
pub mod random;
/// 探索コア（ミニマックス、アルファベータ、反復深化）。
pub mod search;
/// 着手・評価関数・AIトレイトの型。
pub mod types;

pub type Move = types::Move;
