//! 評価サービス
//!
//! - `StaticEval`: 局面の静的評価（手番側から見た値）
//! - `LeafEvaluator`: 木探索の葉で使う有界深さの評価
//!   （`search::MinimaxEvaluator` が静止探索 / 小さな alpha-beta で実装する）

use crate::position::Position;
use crate::search::HistoryTables;
use crate::types::{Depth, Value};

/// 静的評価関数
pub trait StaticEval<P: Position> {
    /// 手番側から見た評価値
    fn static_eval(&self, pos: &P) -> Value;
}

/// 葉ノード評価
pub trait LeafEvaluator<P: Position> {
    /// 手番側から見た `depth` 手の評価値
    ///
    /// `depth <= 0` は静止探索のみ。呼び出し前後で `pos` は同一局面でなければならない。
    fn evaluate(&mut self, pos: &mut P, history: &HistoryTables, depth: Depth) -> Value;
}
