/// ナイト移動の Isolation 盤面と合法手生成の実装。
pub mod board;
/// 1ゲームの進行（手番、勝敗判定など）の実装。
pub mod game;
/// 探索が前提とする局面の契約（トレイト）。
pub mod state;
/// 手番・マス・着手エラーなどの基本型。
pub mod types;

pub type ApplyMoveError = types::ApplyMoveError;
pub type Board = board::Board;
pub type Cell = types::Cell;
pub type Game = game::Game;
pub type GameStatus = game::Status;
pub type PlayError = game::PlayError;
pub type Player = types::Player;
