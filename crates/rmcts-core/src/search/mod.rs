//! 探索の部品
//!
//! - `history`: オーダリング用スコアテーブル
//! - `movepicker`: 段階的な指し手オーダリング
//! - `minimax`: 葉ノード評価用の静止探索 / alpha-beta

pub mod history;
pub mod minimax;
pub mod movepicker;


pub use history::{
    ButterflyHistory, CapturePieceToHistory, ContHistKey, ContinuationHistory,
    CounterMoveHistory, HistoryTables, PieceToHistory, StatsEntry,
};
pub use minimax::MinimaxEvaluator;
pub use movepicker::{MovePicker, Stage};
