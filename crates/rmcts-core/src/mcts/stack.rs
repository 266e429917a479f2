//! 探索スタック（ply毎のフレーム）
//!
//! 木の降下で指した手を積み、逆伝播で1手ずつ戻すための記録を兼ねる。
//! - frame 0: 番兵（ルートの1手前）
//! - frame 1: ルート
//!
//! frame `p` には ply `p` のノードと、そこで選んだ枝・指した手を記録する。

use super::node::NodeKey;
use crate::search::ContHistKey;
use crate::types::{Move, MAX_PLY};

/// 1ply分の記録
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFrame {
    /// この ply で指した手
    pub current_move: Move,
    /// `current_move` の ContinuationHistory キー
    pub cont_key: Option<ContHistKey>,
    /// この ply のキラー手
    pub killers: [Move; 2],
    /// この ply のノードのスロット
    pub node_slot: usize,
    /// この ply のノードのキー（スロットが上書きされたかの判定用）
    pub node_key: NodeKey,
    /// この ply で選んだ枝
    pub edge_index: usize,
    /// 展開時に MovePicker が返した合法手の数
    pub move_count: u32,
}

impl StackFrame {
    pub const EMPTY: StackFrame = StackFrame {
        current_move: Move::NONE,
        cont_key: None,
        killers: [Move::NONE; 2],
        node_slot: 0,
        node_key: NodeKey::new(0, 0),
        edge_index: 0,
        move_count: 0,
    };
}

/// 探索スタック
pub struct SearchStack {
    frames: Vec<StackFrame>,
    ply: usize,
}

impl SearchStack {
    /// ルート ply
    pub const ROOT_PLY: usize = 1;

    pub fn new() -> Self {
        Self {
            frames: vec![StackFrame::EMPTY; MAX_PLY + 2],
            ply: Self::ROOT_PLY,
        }
    }

    /// 全フレームを空にしてルートに戻す
    pub fn reset(&mut self) {
        self.frames.fill(StackFrame::EMPTY);
        self.ply = Self::ROOT_PLY;
    }

    /// 現在の ply（ルート = 1）
    #[inline]
    pub fn ply(&self) -> usize {
        self.ply
    }

    #[inline]
    pub fn at_root(&self) -> bool {
        self.ply == Self::ROOT_PLY
    }

    /// これ以上積めない
    #[inline]
    pub fn at_horizon(&self) -> bool {
        self.ply >= MAX_PLY
    }

    #[inline]
    pub fn current(&self) -> &StackFrame {
        &self.frames[self.ply]
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut StackFrame {
        &mut self.frames[self.ply]
    }

    /// `back` 手前に指された手（なければ `Move::NONE`）
    #[inline]
    pub fn prev_move(&self, back: usize) -> Move {
        self.ply
            .checked_sub(back)
            .map_or(Move::NONE, |p| self.frames[p].current_move)
    }

    /// `back` 手前の手の ContinuationHistory キー
    #[inline]
    pub fn cont_key(&self, back: usize) -> Option<ContHistKey> {
        self.ply.checked_sub(back).and_then(|p| self.frames[p].cont_key)
    }

    /// 現在の ply で `mv` を指したことを記録して1つ進む
    pub fn push(&mut self, edge_index: usize, mv: Move, cont_key: ContHistKey) {
        assert!(!self.at_horizon(), "SearchStack overflow (MAX_PLY = {MAX_PLY})");
        let frame = &mut self.frames[self.ply];
        frame.edge_index = edge_index;
        frame.current_move = mv;
        frame.cont_key = Some(cont_key);
        self.ply += 1;
    }

    /// 1つ戻り、戻った先（親）のフレームを返す
    pub fn pop(&mut self) -> StackFrame {
        assert!(self.ply > Self::ROOT_PLY, "SearchStack underflow");
        self.ply -= 1;
        let frame = self.frames[self.ply];
        let parent = &mut self.frames[self.ply];
        parent.current_move = Move::NONE;
        parent.cont_key = None;
        frame
    }
}

impl Default for SearchStack {
    fn default() -> Self {
        Self::new()
    }
}
