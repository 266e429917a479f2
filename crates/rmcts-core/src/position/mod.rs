//! 局面サービス
//!
//! 盤面表現・合法性判定・SEE・指し手生成はゲーム側の実装に任せ、
//! オーダリングと木探索はこの trait 越しにだけ局面へ触れる。
//!
//! - `do_move` / `undo_move` は厳密なスタック規律で呼ばれる
//!   （最後に指した手から順に戻す）。
//! - `key()` と `structure_key()` の組で局面を同定する（NodeTable のキー）。

use crate::movegen::{ExtMoveBuffer, GenType};
use crate::types::{Color, Move, Piece, Square, Value};

/// 探索から見た局面
pub trait Position {
    /// 手番
    fn side_to_move(&self) -> Color;

    /// 手番側に王手がかかっているか
    fn in_check(&self) -> bool;

    /// 局面のハッシュキー（主キー）
    fn key(&self) -> u64;

    /// 構造ハッシュ（歩の形など、主キーと独立な副キー）
    fn structure_key(&self) -> u64;

    /// 升上の駒（空なら `Piece::NONE`）
    fn piece_on(&self, sq: Square) -> Piece;

    /// 指し手で動く駒
    fn moved_piece(&self, m: Move) -> Piece;

    /// 駒の価値（MVV 用、`Piece::NONE` は 0）
    fn piece_value(&self, pc: Piece) -> i32;

    /// 駒を取る指し手か
    fn is_capture(&self, m: Move) -> bool;

    /// 擬似合法手か（王を素通しにする手などは含みうる）
    fn pseudo_legal(&self, m: Move) -> bool;

    /// 擬似合法手が本当に合法か
    fn legal(&self, m: Move) -> bool;

    /// 静的交換評価（SEE）が `threshold` 以上か
    fn see_ge(&self, m: Move, threshold: Value) -> bool;

    /// `gen_type` の指し手を `moves` の末尾に追加する
    fn generate(&self, gen_type: GenType, moves: &mut ExtMoveBuffer);

    /// 指し手を進める
    fn do_move(&mut self, m: Move);

    /// 直前に進めた指し手 `m` を戻す
    fn undo_move(&mut self, m: Move);
}
