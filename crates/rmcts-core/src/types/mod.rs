//! 基本型
//!
//! - `Color`: 手番
//! - `Square`: 升（0..81）
//! - `PieceType` / `Piece`: 駒種と先後付きの駒
//! - `Move`: 指し手（16bit）
//! - `Value`: 評価値
//! - `Depth`: 探索深さ

mod moves;
mod piece;
mod value;

pub use moves::{Move, Square};
pub use piece::{Color, Piece, PieceType};
pub use value::Value;

/// 探索深さ（1 = 1手）
pub type Depth = i32;

/// 深さ0（静止探索の入口）
pub const DEPTH_ZERO: Depth = 0;

/// 静止探索: 静かな王手も生成する深さ
pub const DEPTH_QS_CHECKS: Depth = 0;

/// 静止探索: これ以下の深さでは直前の移動先への取り返しのみ
pub const DEPTH_QS_RECAPTURES: Depth = -5;

/// 最大探索手数（SearchStack・静止探索の上限）
pub const MAX_PLY: usize = 128;
