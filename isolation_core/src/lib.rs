//! Isolation（ナイト移動版）の探索エンジン。
//!
//! このクレートは盤面ルールを提供する `engine` と、手を選択する `ai` を提供します。
//! 対局ランナー（`isolation_match`）から利用されることを想定しています。

#![forbid(unsafe_code)]

/// 盤面ルール・局面・進行を提供するモジュール。
pub mod engine;

/// AI（評価関数と探索アルゴリズム）を提供するモジュール。
pub mod ai;
