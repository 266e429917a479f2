//! # rmcts-core
//!
//! 段階的な指し手オーダリングと UCT（モンテカルロ木探索）のコアライブラリ。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Color, Square, Piece, Move, Value, etc.）
//! - `movegen`: 指し手生成の種類と指し手バッファ
//! - `position`: 探索から見た局面（trait）
//! - `eval`: 静的評価・葉評価（trait）
//! - `search`: スコアテーブル・MovePicker・葉評価用の小さな探索
//! - `mcts`: UCT 探索（ノードテーブル・探索スタック・報酬変換）
//! - `synthetic`: 疑似乱数で作る決定的なゲーム木
//!
//! 盤面ルールは持たず、`Position` を実装したゲームの上で動く。

// 基本型
pub mod types;

// 局面・評価のインターフェース
pub mod eval;
pub mod movegen;
pub mod position;

// 手の順序付け・葉評価
pub mod search;

// 木探索
pub mod mcts;

// 計測・テスト用のゲーム
pub mod synthetic;

#[cfg(test)]
pub(crate) mod test_utils;

pub use eval::{LeafEvaluator, StaticEval};
pub use mcts::{SearchLimits, StopCondition, UctCounters, UctParams, UctSearch};
pub use position::Position;
pub use search::{HistoryTables, MinimaxEvaluator, MovePicker};
pub use synthetic::{SyntheticConfig, SyntheticEval, SyntheticPosition};
