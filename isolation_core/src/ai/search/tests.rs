use core::cell::Cell as Counter;

use super::alphabeta::alphabeta;
use super::deepening::iterative_deepening;
use super::limits::SearchTimeout;
use super::minimax::minimax;
use super::{DEFAULT_TIMER_THRESHOLD_MS, DepthSearch, SearchContext, SearchResult, TimeBudget};
use crate::ai::eval::{contested_mobility_score, improved_score};
use crate::ai::types::{Evaluator, Move};
use crate::engine::board::Board;
use crate::engine::state::GameState;
use crate::engine::types::{ApplyMoveError, Cell, Player};

/// 時間切れにならない残り時間。
fn plenty() -> f64 {
    f64::INFINITY
}

/// 常に時間切れの残り時間。
fn exhausted() -> f64 {
    0.0
}

fn context<'ctx, S: GameState>(
    state: &S,
    evaluator: Evaluator<S>,
    time_left: &'ctx dyn Fn() -> f64,
) -> SearchContext<'ctx, S> {
    let budget = TimeBudget::new(time_left, DEFAULT_TIMER_THRESHOLD_MS);
    SearchContext::new(state.active_player(), evaluator, budget)
}

fn place(board: &Board, cells: &[Cell]) -> Board {
    let mut current = board.clone();
    for &cell in cells {
        let next = current.forecast(cell);
        assert!(next.is_ok(), "forecast failed for {cell}: {next:?}");
        current = next.unwrap_or(current);
    }
    current
}

fn block(board: &Board, cells: &[Cell]) -> Board {
    let mut current = board.clone();
    for &cell in cells {
        let next = current.block_cell(cell);
        assert!(next.is_ok(), "block failed for {cell}: {next:?}");
        current = next.unwrap_or(current);
    }
    current
}

fn search_unbounded<S: GameState>(
    search: DepthSearch<S>,
    state: &S,
    depth: u32,
    evaluator: Evaluator<S>,
) -> (SearchResult, u64) {
    let mut ctx = context(state, evaluator, &plenty);
    let result = search(state, depth, &mut ctx);
    assert!(result.is_ok(), "search timed out unexpectedly");
    (
        result.unwrap_or(SearchResult::leaf(f64::NAN)),
        ctx.stats().leaves(),
    )
}

/// 葉に値を持つ明示的なゲーム木（手番の飛びも表現できる）。
#[derive(Clone, Debug)]
struct Tree {
    /// この局面の手番。
    active: Player,
    /// 子局面（手は `Cell::new(0, index)`）。
    children: Vec<Tree>,
    /// 子局面の後ろに列挙する、適用できない手の数。
    unplayable: u8,
    /// 評価値（ルート視点）。
    value: f64,
}

impl Tree {
    fn leaf(value: f64) -> Self {
        Self {
            active: Player::Second,
            children: Vec::new(),
            unplayable: 0,
            value,
        }
    }

    fn node(active: Player, children: Vec<Self>) -> Self {
        Self {
            active,
            children,
            unplayable: 0,
            value: 0.0,
        }
    }

    fn with_unplayable(mut self, count: u8) -> Self {
        self.unplayable = count;
        self
    }
}

impl GameState for Tree {
    fn active_player(&self) -> Player {
        self.active
    }

    fn forecast(&self, cell: Cell) -> Result<Self, ApplyMoveError> {
        self.children
            .get(usize::from(cell.col()))
            .cloned()
            .ok_or(ApplyMoveError::IllegalMove)
    }

    fn height(&self) -> u8 {
        1
    }

    fn is_loser(&self, _player: Player) -> bool {
        false
    }

    fn is_winner(&self, _player: Player) -> bool {
        false
    }

    fn legal_moves(&self) -> Vec<Cell> {
        self.legal_moves_for(self.active)
    }

    fn legal_moves_for(&self, player: Player) -> Vec<Cell> {
        if player != self.active {
            return Vec::new();
        }
        let listed = u8::try_from(self.children.len())
            .unwrap_or(u8::MAX)
            .saturating_add(self.unplayable);
        (0..listed).map(|index| Cell::new(0, index)).collect()
    }

    fn move_count(&self) -> u32 {
        0
    }

    fn opponent(&self, player: Player) -> Player {
        player.opponent()
    }

    fn player_location(&self, _player: Player) -> Option<Cell> {
        None
    }

    fn utility(&self, _player: Player) -> f64 {
        0.0
    }

    fn width(&self) -> u8 {
        1
    }
}

fn tree_value(tree: &Tree, _player: Player) -> f64 {
    tree.value
}

/// 教科書的な 2 段の木（最小化ノード 3 つ × 葉 3 つ）。
fn textbook_tree() -> Tree {
    let min_node = |values: [f64; 3]| {
        Tree::node(Player::Second, values.into_iter().map(Tree::leaf).collect())
    };
    Tree::node(
        Player::First,
        vec![
            min_node([3.0, 12.0, 8.0]),
            min_node([2.0, 4.0, 6.0]),
            min_node([14.0, 5.0, 2.0]),
        ],
    )
}

#[test]
fn depth_zero_returns_no_move_and_root_evaluation() {
    let board = place(&Board::new(5, 5), &[Cell::new(0, 0), Cell::new(4, 4)]);
    let expected = improved_score(&board, Player::First);

    let (mm, _) = search_unbounded(minimax, &board, 0, improved_score);
    let (ab, _) = search_unbounded(alphabeta, &board, 0, improved_score);

    assert_eq!(mm, SearchResult::leaf(expected));
    assert_eq!(ab, SearchResult::leaf(expected));
}

#[test]
fn depth_one_on_3x3_maximizes_mobility_differential() {
    // 先手 (0,0) → {(1,2), (2,1)}。どちらも差は 1 - 2 = -1 で同点なので先に列挙した手を選ぶ。
    let board = place(&Board::new(3, 3), &[Cell::new(0, 0), Cell::new(2, 2)]);

    let (result, _) = search_unbounded(minimax, &board, 1, improved_score);

    assert_eq!(result.best_move(), Move::Place(Cell::new(1, 2)));
    assert!((result.score() + 1.0).abs() < 1e-9, "got {}", result.score());
    for cell in board.legal_moves() {
        let next = board.forecast(cell);
        assert!(next.is_ok());
        let value = next.map_or(f64::INFINITY, |value| improved_score(&value, Player::First));
        assert!(value <= result.score());
    }
}

#[test]
fn stranded_player_gets_no_move_with_evaluation_at_any_depth() {
    let board = block(
        &place(&Board::new(3, 3), &[Cell::new(0, 0), Cell::new(2, 2)]),
        &[Cell::new(1, 2), Cell::new(2, 1)],
    );
    assert!(board.legal_moves().is_empty());

    for depth in 0..4 {
        let (mm, _) = search_unbounded(minimax, &board, depth, improved_score);
        let (ab, _) = search_unbounded(alphabeta, &board, depth, improved_score);
        assert_eq!(mm, SearchResult::leaf(f64::NEG_INFINITY));
        assert_eq!(ab, mm);
    }
}

#[test]
fn alphabeta_matches_minimax_on_real_boards() {
    let boards = [
        place(&Board::new(3, 3), &[Cell::new(0, 0), Cell::new(2, 2)]),
        place(&Board::new(4, 4), &[Cell::new(1, 1), Cell::new(2, 3)]),
        place(
            &Board::new(5, 5),
            &[Cell::new(2, 2), Cell::new(0, 0), Cell::new(0, 1)],
        ),
        place(&Board::new(5, 4), &[Cell::new(0, 3)]),
    ];
    let evaluators: [Evaluator<Board>; 2] = [improved_score, contested_mobility_score];

    for board in &boards {
        for evaluator in evaluators {
            for depth in 1..=4 {
                let (mm, mm_leaves) = search_unbounded(minimax, board, depth, evaluator);
                let (ab, ab_leaves) = search_unbounded(alphabeta, board, depth, evaluator);
                assert_eq!(ab, mm, "depth={depth} board={board:?}");
                assert!(ab_leaves <= mm_leaves, "depth={depth} board={board:?}");
            }
        }
    }
}

#[test]
fn alphabeta_prunes_textbook_tree() {
    let tree = textbook_tree();

    let (mm, mm_leaves) = search_unbounded(minimax, &tree, 2, tree_value);
    let (ab, ab_leaves) = search_unbounded(alphabeta, &tree, 2, tree_value);

    assert_eq!(mm, SearchResult::new(Move::Place(Cell::new(0, 0)), 3.0));
    assert_eq!(ab, mm);
    assert_eq!(mm_leaves, 9);
    assert_eq!(ab_leaves, 7);
}

#[test]
fn role_follows_side_to_move_not_depth_parity() {
    // 左の子は先手が続けて指す（手番の飛び）。最大化されて 9 になる。
    let tree = Tree::node(
        Player::First,
        vec![
            Tree::node(Player::First, vec![Tree::leaf(1.0), Tree::leaf(9.0)]),
            Tree::node(Player::Second, vec![Tree::leaf(5.0), Tree::leaf(6.0)]),
        ],
    );

    let searches: [DepthSearch<Tree>; 2] = [minimax, alphabeta];
    for search in searches {
        let (result, _) = search_unbounded(search, &tree, 2, tree_value);
        assert_eq!(result, SearchResult::new(Move::Place(Cell::new(0, 0)), 9.0));
    }
}

#[test]
fn exhausted_budget_times_out_on_first_check() {
    let board = Board::new(5, 5);

    let mut ctx = context(&board, improved_score, &exhausted);
    assert_eq!(minimax(&board, 3, &mut ctx), Err(SearchTimeout));
    assert_eq!(alphabeta(&board, 3, &mut ctx), Err(SearchTimeout));
    assert_eq!(ctx.stats().nodes(), 0);

    let result = iterative_deepening(&board, alphabeta, &mut ctx, None);
    assert_eq!(result.best_move(), Move::NoMove);
    assert_eq!(result.completed_depth(), 0);
    assert_eq!(result.score(), None);
}

#[test]
fn timeout_mid_search_discards_partial_result() {
    let board = place(&Board::new(5, 5), &[Cell::new(0, 0), Cell::new(4, 4)]);
    let checks = Counter::new(0_u32);
    let time_left = || {
        checks.set(checks.get().saturating_add(1));
        if checks.get() > 5 { 0.0 } else { 1_000.0 }
    };

    let searches: [DepthSearch<Board>; 2] = [minimax, alphabeta];
    for search in searches {
        checks.set(0);
        let mut ctx = context(&board, improved_score, &time_left);

        assert_eq!(search(&board, 3, &mut ctx), Err(SearchTimeout));
        // 5 回の確認を通過してノードを展開した後、6 回目で打ち切られる。
        assert_eq!(ctx.stats().nodes(), 5);
        assert_eq!(checks.get(), 6);
    }
}

#[test]
fn unplayable_moves_are_skipped() {
    let tree =
        Tree::node(Player::First, vec![Tree::leaf(4.0), Tree::leaf(7.0)]).with_unplayable(2);
    assert_eq!(tree.legal_moves().len(), 4);

    let searches: [DepthSearch<Tree>; 2] = [minimax, alphabeta];
    for search in searches {
        let (result, leaves) = search_unbounded(search, &tree, 1, tree_value);
        assert_eq!(result, SearchResult::new(Move::Place(Cell::new(0, 1)), 7.0));
        assert_eq!(leaves, 2);
    }
}

#[test]
fn node_without_playable_moves_is_a_terminal_leaf() {
    let tree = Tree::leaf(-3.0).with_unplayable(3);

    let searches: [DepthSearch<Tree>; 2] = [minimax, alphabeta];
    for search in searches {
        let mut ctx = context(&tree, tree_value, &plenty);
        let result = search(&tree, 2, &mut ctx);
        assert_eq!(result, Ok(SearchResult::leaf(-3.0)));
        assert_eq!(ctx.stats().terminal_leaves(), 1);
        assert_eq!(ctx.stats().horizon_leaves(), 0);
    }
}

#[test]
fn threshold_is_inclusive() {
    let at_threshold = || DEFAULT_TIMER_THRESHOLD_MS;
    let above_threshold = || DEFAULT_TIMER_THRESHOLD_MS + 0.5;

    let budget = TimeBudget::new(&at_threshold, DEFAULT_TIMER_THRESHOLD_MS);
    assert_eq!(budget.check(), Err(SearchTimeout));

    let budget = TimeBudget::new(&above_threshold, DEFAULT_TIMER_THRESHOLD_MS);
    assert_eq!(budget.check(), Ok(()));
}

#[test]
fn deepening_keeps_last_completed_depth_on_timeout() {
    let board = place(&Board::new(5, 5), &[Cell::new(0, 0), Cell::new(4, 4)]);
    let checks = Counter::new(0_u32);
    let time_left = || {
        checks.set(checks.get().saturating_add(1));
        if checks.get() > 60 { 0.0 } else { 1_000.0 }
    };

    let mut ctx = context(&board, improved_score, &time_left);
    let result = iterative_deepening(&board, alphabeta, &mut ctx, None);

    assert!(result.completed_depth() >= 1, "depth 1 must complete");
    assert!(
        board
            .legal_moves()
            .iter()
            .any(|&cell| result.best_move() == Move::Place(cell)),
        "best move must be legal, got={:?}",
        result.best_move()
    );

    let (expected, _) = search_unbounded(
        alphabeta,
        &board,
        result.completed_depth(),
        improved_score,
    );
    assert_eq!(result.best_move(), expected.best_move());
    assert_eq!(result.score(), Some(expected.score()));
}

#[test]
fn deepening_stops_once_tree_is_resolved() {
    let tree = textbook_tree();
    let mut ctx = context(&tree, tree_value, &plenty);

    let result = iterative_deepening(&tree, alphabeta, &mut ctx, None);

    // 深さ 3 で深さ切れの葉が無くなる。
    assert_eq!(result.completed_depth(), 3);
    assert_eq!(result.best_move(), Move::Place(Cell::new(0, 0)));
    assert_eq!(result.score(), Some(3.0));
}

#[test]
fn deepening_respects_max_depth() {
    let board = Board::new(5, 5);
    let mut ctx = context(&board, improved_score, &plenty);

    let result = iterative_deepening(&board, minimax, &mut ctx, Some(2));

    assert_eq!(result.completed_depth(), 2);
    assert!(matches!(result.best_move(), Move::Place(_)));
}
