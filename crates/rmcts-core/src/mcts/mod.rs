//! UCT（モンテカルロ木探索）
//!
//! - `node`: ノードと枝
//! - `table`: ノードテーブル（キー → ノード）
//! - `stack`: 探索スタック（降下の記録）
//! - `reward`: 評価値 ⇔ 報酬の変換
//! - `params`: 探索パラメータ
//! - `limits`: 統計カウンタと停止条件
//! - `uct`: 探索本体

pub mod limits;
pub mod node;
pub mod params;
pub mod reward;
pub mod stack;
pub mod table;
pub mod uct;


pub use limits::{SearchLimits, StopCondition, UctCounters};
pub use node::{Edge, NodeKey, SearchNode, MAX_EDGES};
pub use params::UctParams;
pub use reward::{reward_to_value, value_to_reward};
pub use stack::{SearchStack, StackFrame};
pub use table::{NodeTable, Probe};
pub use uct::{select_edge, UctSearch};
