//! 指し手生成の型定義
//!
//! 指し手生成そのものは `Position` 実装側（盤面表現）の責務。
//! ここではオーダリングで共有する以下の型だけを定義する。
//!
//! - `GenType`: 生成する指し手の種類
//! - `ExtMove`: 指し手とスコアのペア
//! - `ExtMoveBuffer`: 固定長の指し手バッファ

use crate::types::Move;

/// 1局面での最大指し手数
pub const MAX_MOVES: usize = 256;

/// 指し手生成のタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenType {
    /// 駒を取る指し手（取りながらの成りを含む）
    Captures,
    /// 駒を取る指し手 + 駒を取らない成り（静止探索用）
    CapturesProPlus,
    /// 駒を取らない指し手（成りを含む）
    Quiets,
    /// 王手回避手（合法手のみ）
    Evasions,
    /// 駒を取らない王手
    QuietChecks,
}

/// 指し手とスコアのペア（オーダリング用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtMove {
    /// 指し手
    pub mv: Move,
    /// オーダリング用スコア
    pub value: i32,
}

impl ExtMove {
    /// 空のエントリ
    pub const EMPTY: ExtMove = ExtMove::new(Move::NONE, 0);

    #[inline]
    pub const fn new(mv: Move, value: i32) -> Self {
        Self { mv, value }
    }
}

impl From<Move> for ExtMove {
    #[inline]
    fn from(mv: Move) -> Self {
        Self { mv, value: 0 }
    }
}

/// 固定長の指し手バッファ
///
/// `MAX_MOVES` を超える push は契約違反として panic する。
pub struct ExtMoveBuffer {
    moves: [ExtMove; MAX_MOVES],
    len: usize,
}

impl ExtMoveBuffer {
    pub fn new() -> Self {
        Self {
            moves: [ExtMove::EMPTY; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// 末尾を切り詰める（伸ばすことはできない）
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        debug_assert!(len <= self.len);
        self.len = len.min(self.len);
    }

    /// スコア0で指し手を追加
    #[inline]
    pub fn push_move(&mut self, mv: Move) {
        self.push(ExtMove::from(mv));
    }

    #[inline]
    pub fn push(&mut self, ext: ExtMove) {
        assert!(self.len < MAX_MOVES, "ExtMoveBuffer overflow (MAX_MOVES = {MAX_MOVES})");
        self.moves[self.len] = ext;
        self.len += 1;
    }

    #[inline]
    pub fn get(&self, idx: usize) -> ExtMove {
        debug_assert!(idx < self.len);
        self.moves[idx]
    }

    #[inline]
    pub fn set(&mut self, idx: usize, ext: ExtMove) {
        debug_assert!(idx < self.len);
        self.moves[idx] = ext;
    }

    #[inline]
    pub fn set_value(&mut self, idx: usize, value: i32) {
        debug_assert!(idx < self.len);
        self.moves[idx].value = value;
    }

    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.moves.swap(a, b);
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [ExtMove] {
        &mut self.moves[..self.len]
    }
}

impl Default for ExtMoveBuffer {
    fn default() -> Self {
        Self::new()
    }
}
