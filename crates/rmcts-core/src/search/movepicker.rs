//! MovePicker（段階的な指し手オーダリング）
//!
//! 局面とスコアテーブルから擬似合法手を段階的に生成し、決まった優先順で1手ずつ返す。
//! 全指し手を一度にソートすることはせず、必要になった段階で生成・スコア付けする。
//!
//! ## History参照を保持しない設計
//!
//! 再帰呼び出し時の借用の衝突を避けるため、MovePicker は `HistoryTables` を
//! フィールドとして保持しない。`next_move()` の引数で受け取る。
//! ContinuationHistory のテーブル選択（ply毎に異なる）だけは構築時に受け取って保持する。
//!
//! ## Stage
//!
//! ### 通常探索（王手なし）
//! 1. MainTT - 置換表の指し手
//! 2. CaptureInit - 捕獲手の生成
//! 3. GoodCapture - 良い捕獲手（SEE >= -55 * score / 1024）
//! 4. Killer0 / Killer1 - キラー手
//! 5. CounterMove - カウンター手
//! 6. QuietInit - 静かな手の生成
//! 7. Quiet - 静かな手（部分ソート順）
//! 8. BadCapture - 悪い捕獲手（後回しにした順）
//!
//! ### 王手回避
//! 1. EvasionTT → 2. EvasionInit → 3. Evasion
//!
//! ### ProbCut
//! 1. ProbCutTT → 2. ProbCutInit → 3. ProbCut（SEE >= threshold のみ）
//!
//! ### 静止探索
//! 1. QSearchTT → 2. QCaptureInit → 3. QCapture → 4. QCheckInit → 5. QCheck

use super::history::{HistoryTables, PieceToHistory};
use crate::movegen::{ExtMove, ExtMoveBuffer, GenType};
use crate::position::Position;
use crate::types::{Color, Depth, Move, Square, Value, DEPTH_QS_CHECKS, DEPTH_QS_RECAPTURES};

// =============================================================================
// Stage（指し手生成の段階）
// =============================================================================

/// 指し手生成の段階
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Stage {
    // 通常探索（王手なし）
    /// 置換表の指し手
    MainTT,
    /// 捕獲手の生成
    CaptureInit,
    /// 良い捕獲手
    GoodCapture,
    /// 1番目のキラー手
    Killer0,
    /// 2番目のキラー手
    Killer1,
    /// カウンター手
    CounterMove,
    /// 静かな手の生成
    QuietInit,
    /// 静かな手
    Quiet,
    /// 悪い捕獲手
    BadCapture,

    // 王手回避
    /// 置換表の指し手（回避）
    EvasionTT,
    /// 回避手の生成
    EvasionInit,
    /// 回避手
    Evasion,

    // ProbCut
    /// 置換表の指し手（ProbCut）
    ProbCutTT,
    /// ProbCut: 捕獲手生成
    ProbCutInit,
    /// ProbCut: SEEしきい値付き捕獲
    ProbCut,

    // 静止探索
    /// 置換表の指し手（静止探索）
    QSearchTT,
    /// 静止探索用捕獲手の生成
    QCaptureInit,
    /// 静止探索用捕獲手
    QCapture,
    /// 駒を取らない王手の生成
    QCheckInit,
    /// 駒を取らない王手
    QCheck,
}

impl Stage {
    /// 次のステージを取得
    pub fn next(self) -> Self {
        match self {
            Stage::MainTT => Stage::CaptureInit,
            Stage::CaptureInit => Stage::GoodCapture,
            Stage::GoodCapture => Stage::Killer0,
            Stage::Killer0 => Stage::Killer1,
            Stage::Killer1 => Stage::CounterMove,
            Stage::CounterMove => Stage::QuietInit,
            Stage::QuietInit => Stage::Quiet,
            Stage::Quiet => Stage::BadCapture,
            Stage::BadCapture => Stage::BadCapture, // 終端

            Stage::EvasionTT => Stage::EvasionInit,
            Stage::EvasionInit => Stage::Evasion,
            Stage::Evasion => Stage::Evasion, // 終端

            Stage::ProbCutTT => Stage::ProbCutInit,
            Stage::ProbCutInit => Stage::ProbCut,
            Stage::ProbCut => Stage::ProbCut, // 終端

            Stage::QSearchTT => Stage::QCaptureInit,
            Stage::QCaptureInit => Stage::QCapture,
            Stage::QCapture => Stage::QCheckInit,
            Stage::QCheckInit => Stage::QCheck,
            Stage::QCheck => Stage::QCheck, // 終端
        }
    }
}

/// 生成済みリストからの取り出し方
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum PickType {
    /// 並び順どおり
    Next,
    /// 残りの中で最大スコアのもの（同点なら先に現れたもの）
    Best,
}

// =============================================================================
// MovePicker
// =============================================================================

/// 指し手オーダリング器
///
/// ## 使用パターン
///
/// ```ignore
/// let mut mp = MovePicker::new(pos, tt_move, depth, cont_tables, counter_move, killers);
/// loop {
///     let mv = mp.next_move(pos, history);
///     if mv.is_none() { break; }
///     if !pos.legal(mv) { continue; }
///     pos.do_move(mv);
///     // ...
///     pos.undo_move(mv);
/// }
/// ```
pub struct MovePicker<'a> {
    // ContinuationHistory（1, 2, 3, 4手前）。通常探索のみ
    continuation_history: Option<[&'a PieceToHistory; 4]>,

    // 状態
    stage: Stage,
    tt_move: Move,
    killers: [Move; 2],
    counter_move: Move,
    recapture_square: Option<Square>,
    threshold: Value,
    depth: Depth,
    skip_quiets: bool,

    // 初期化時にキャッシュする情報
    side_to_move: Color,

    // 指し手バッファ
    moves: ExtMoveBuffer,
    cur: usize,
    end_moves: usize,
    end_bad_captures: usize,
}

impl<'a> MovePicker<'a> {
    /// 通常探索用コンストラクタ（`depth > 0`）
    ///
    /// 置換表の手は擬似合法手でなければ捨てる。王手がかかっていれば回避手の段階から始める。
    pub fn new<P: Position>(
        pos: &P,
        tt_move: Move,
        depth: Depth,
        continuation_history: [&'a PieceToHistory; 4],
        counter_move: Move,
        killers: [Move; 2],
    ) -> Self {
        debug_assert!(depth > 0);

        let tt_move = if tt_move.is_some() && pos.pseudo_legal(tt_move) {
            tt_move
        } else {
            Move::NONE
        };
        let stage = match (pos.in_check(), tt_move.is_some()) {
            (true, true) => Stage::EvasionTT,
            (true, false) => Stage::EvasionInit,
            (false, true) => Stage::MainTT,
            (false, false) => Stage::CaptureInit,
        };

        Self {
            continuation_history: Some(continuation_history),
            stage,
            tt_move,
            killers,
            counter_move,
            recapture_square: None,
            threshold: Value::ZERO,
            depth,
            skip_quiets: false,
            side_to_move: pos.side_to_move(),
            moves: ExtMoveBuffer::new(),
            cur: 0,
            end_moves: 0,
            end_bad_captures: 0,
        }
    }

    /// 静止探索用コンストラクタ（`depth <= 0`）
    ///
    /// `depth <= DEPTH_QS_RECAPTURES` では `recapture_square` への取り返ししか返さない。
    pub fn new_qsearch<P: Position>(
        pos: &P,
        tt_move: Move,
        depth: Depth,
        recapture_square: Option<Square>,
    ) -> Self {
        debug_assert!(depth <= 0);

        let tt_move = if tt_move.is_some()
            && pos.pseudo_legal(tt_move)
            && (depth > DEPTH_QS_RECAPTURES || Some(tt_move.to()) == recapture_square)
        {
            tt_move
        } else {
            Move::NONE
        };
        let stage = match (pos.in_check(), tt_move.is_some()) {
            (true, true) => Stage::EvasionTT,
            (true, false) => Stage::EvasionInit,
            (false, true) => Stage::QSearchTT,
            (false, false) => Stage::QCaptureInit,
        };

        Self {
            continuation_history: None,
            stage,
            tt_move,
            killers: [Move::NONE; 2],
            counter_move: Move::NONE,
            recapture_square,
            threshold: Value::ZERO,
            depth,
            skip_quiets: false,
            side_to_move: pos.side_to_move(),
            moves: ExtMoveBuffer::new(),
            cur: 0,
            end_moves: 0,
            end_bad_captures: 0,
        }
    }

    /// ProbCut用コンストラクタ（SEE が `threshold` 以上の捕獲手のみ）
    pub fn new_probcut<P: Position>(pos: &P, tt_move: Move, threshold: Value) -> Self {
        debug_assert!(!pos.in_check());

        let tt_move = if tt_move.is_some()
            && pos.pseudo_legal(tt_move)
            && pos.is_capture(tt_move)
            && pos.see_ge(tt_move, threshold)
        {
            tt_move
        } else {
            Move::NONE
        };
        let stage = if tt_move.is_some() {
            Stage::ProbCutTT
        } else {
            Stage::ProbCutInit
        };

        Self {
            continuation_history: None,
            stage,
            tt_move,
            killers: [Move::NONE; 2],
            counter_move: Move::NONE,
            recapture_square: None,
            threshold,
            depth: 0,
            skip_quiets: false,
            side_to_move: pos.side_to_move(),
            moves: ExtMoveBuffer::new(),
            cur: 0,
            end_moves: 0,
            end_bad_captures: 0,
        }
    }

    /// 以降の静かな手をスキップする
    ///
    /// フラグのみ設定する。Quiet ステージに入った時点でそのまま悪い捕獲手へ進む。
    pub fn skip_quiets(&mut self) {
        self.skip_quiets = true;
    }

    /// 現在のステージを取得（デバッグ用）
    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// 有効な置換表の手（検証で捨てられた場合は `Move::NONE`）
    #[inline]
    pub fn tt_move(&self) -> Move {
        self.tt_move
    }

    /// 次の指し手を返す
    ///
    /// 指し手が尽きたら `Move::NONE` を返す。返す手は擬似合法手で、合法性の確認は呼び出し側の責務。
    pub fn next_move<P: Position>(&mut self, pos: &P, history: &HistoryTables) -> Move {
        loop {
            match self.stage {
                // ==============================
                // TT手を返す
                // ==============================
                Stage::MainTT | Stage::EvasionTT | Stage::QSearchTT | Stage::ProbCutTT => {
                    self.stage = self.stage.next();
                    return self.tt_move;
                }

                // ==============================
                // 捕獲手の生成
                // ==============================
                Stage::CaptureInit | Stage::ProbCutInit | Stage::QCaptureInit => {
                    let gen_type = if self.stage == Stage::QCaptureInit {
                        GenType::CapturesProPlus
                    } else {
                        GenType::Captures
                    };
                    self.moves.clear();
                    pos.generate(gen_type, &mut self.moves);
                    self.cur = 0;
                    self.end_bad_captures = 0;
                    self.end_moves = self.moves.len();

                    self.score_captures(pos, history);
                    self.stage = self.stage.next();
                }

                // ==============================
                // 良い捕獲手を返す
                // ==============================
                Stage::GoodCapture => {
                    if let Some(m) = self.select_good_capture(pos) {
                        return m;
                    }
                    self.stage = Stage::Killer0;
                }

                // ==============================
                // キラー手
                // ==============================
                Stage::Killer0 | Stage::Killer1 => {
                    let idx = if self.stage == Stage::Killer0 { 0 } else { 1 };
                    let m = self.killers[idx];
                    self.stage = self.stage.next();

                    if m.is_some()
                        && m != self.tt_move
                        && (idx == 0 || m != self.killers[0])
                        && pos.pseudo_legal(m)
                        && !pos.is_capture(m)
                    {
                        return m;
                    }
                }

                // ==============================
                // カウンター手
                // ==============================
                Stage::CounterMove => {
                    let m = self.counter_move;
                    self.stage = Stage::QuietInit;

                    if m.is_some()
                        && m != self.tt_move
                        && m != self.killers[0]
                        && m != self.killers[1]
                        && pos.pseudo_legal(m)
                        && !pos.is_capture(m)
                    {
                        return m;
                    }
                }

                // ==============================
                // 静かな手の生成
                // ==============================
                Stage::QuietInit => {
                    // 悪い捕獲手の領域の直後から生成する
                    self.moves.truncate(self.end_bad_captures);
                    pos.generate(GenType::Quiets, &mut self.moves);
                    self.cur = self.end_bad_captures;
                    self.end_moves = self.moves.len();

                    self.score_quiets(pos, history);
                    let limit = -4000 * self.depth;
                    partial_insertion_sort(
                        &mut self.moves.as_mut_slice()[self.cur..self.end_moves],
                        self.end_moves - self.cur,
                        limit,
                    );
                    self.stage = Stage::Quiet;
                }

                // ==============================
                // 静かな手を返す
                // ==============================
                Stage::Quiet => {
                    if !self.skip_quiets {
                        let excluded =
                            [self.tt_move, self.killers[0], self.killers[1], self.counter_move];
                        let m = self.select(PickType::Next, |m| !excluded.contains(&m));
                        if m.is_some() {
                            return m;
                        }
                    }

                    // 悪い捕獲手の先頭と末尾を指す
                    self.cur = 0;
                    self.end_moves = self.end_bad_captures;
                    self.stage = Stage::BadCapture;
                }

                // ==============================
                // 悪い捕獲手を返す
                // ==============================
                Stage::BadCapture => {
                    let tt_move = self.tt_move;
                    return self.select(PickType::Next, |m| m != tt_move);
                }

                // ==============================
                // 回避手の生成
                // ==============================
                Stage::EvasionInit => {
                    self.moves.clear();
                    pos.generate(GenType::Evasions, &mut self.moves);
                    self.cur = 0;
                    self.end_moves = self.moves.len();

                    self.score_evasions(pos, history);
                    self.stage = Stage::Evasion;
                }

                // ==============================
                // 回避手を返す
                // ==============================
                Stage::Evasion => {
                    let tt_move = self.tt_move;
                    return self.select(PickType::Best, |m| m != tt_move);
                }

                // ==============================
                // ProbCut: SEEが閾値以上の捕獲のみ
                // ==============================
                Stage::ProbCut => {
                    let tt_move = self.tt_move;
                    let threshold = self.threshold;
                    return self
                        .select(PickType::Best, |m| m != tt_move && pos.see_ge(m, threshold));
                }

                // ==============================
                // 静止探索用捕獲手を返す
                // ==============================
                Stage::QCapture => {
                    let tt_move = self.tt_move;
                    let depth = self.depth;
                    let recapture_square = self.recapture_square;
                    let m = self.select(PickType::Best, |m| {
                        m != tt_move
                            && (depth > DEPTH_QS_RECAPTURES || Some(m.to()) == recapture_square)
                    });
                    if m.is_some() {
                        return m;
                    }

                    // 王手を試さない深さならここで終わり
                    if self.depth != DEPTH_QS_CHECKS {
                        return Move::NONE;
                    }
                    self.stage = Stage::QCheckInit;
                }

                // ==============================
                // 駒を取らない王手の生成
                // ==============================
                Stage::QCheckInit => {
                    self.moves.clear();
                    pos.generate(GenType::QuietChecks, &mut self.moves);
                    self.cur = 0;
                    self.end_moves = self.moves.len();
                    self.stage = Stage::QCheck;
                }

                // ==============================
                // 駒を取らない王手を返す
                // ==============================
                Stage::QCheck => {
                    let tt_move = self.tt_move;
                    return self.select(PickType::Next, |m| m != tt_move);
                }
            }
        }
    }

    // =========================================================================
    // スコアリング
    // =========================================================================

    /// 捕獲手のスコアを計算
    ///
    /// MVV + CaptureHistory
    fn score_captures<P: Position>(&mut self, pos: &P, history: &HistoryTables) {
        for i in self.cur..self.end_moves {
            let m = self.moves.get(i).mv;
            let to = m.to();
            let captured = pos.piece_on(to);

            let value = pos.piece_value(captured)
                + history.capture_history.get(pos.moved_piece(m), to, captured.piece_type()) as i32;
            self.moves.set_value(i, value);
        }
    }

    /// 静かな手のスコアを計算
    ///
    /// ButterflyHistory + ContinuationHistory（1, 2, 4手前。3手前は使わない）
    fn score_quiets<P: Position>(&mut self, pos: &P, history: &HistoryTables) {
        let us = self.side_to_move;

        for i in self.cur..self.end_moves {
            let m = self.moves.get(i).mv;
            let to = m.to();
            let pc = pos.moved_piece(m);

            let mut value = history.main_history.get(us, m) as i32;
            if let Some(cont) = self.continuation_history {
                for idx in [0, 1, 3] {
                    value += cont[idx].get(pc, to) as i32;
                }
            }
            self.moves.set_value(i, value);
        }
    }

    /// 回避手のスコアを計算
    ///
    /// 捕獲手は MVV - 動かす駒の種類、静かな手は History から大きく引いて捕獲手の後ろに並べる。
    fn score_evasions<P: Position>(&mut self, pos: &P, history: &HistoryTables) {
        let us = self.side_to_move;

        for i in self.cur..self.end_moves {
            let m = self.moves.get(i).mv;

            let value = if pos.is_capture(m) {
                pos.piece_value(pos.piece_on(m.to()))
                    - pos.moved_piece(m).piece_type().raw() as i32
            } else {
                history.main_history.get(us, m) as i32 - (1 << 28)
            };
            self.moves.set_value(i, value);
        }
    }

    // =========================================================================
    // ヘルパー
    // =========================================================================

    /// `[cur, end_moves)` から条件を満たす次の手を取り出す
    fn select<F>(&mut self, pick: PickType, mut filter: F) -> Move
    where
        F: FnMut(Move) -> bool,
    {
        while self.cur < self.end_moves {
            if pick == PickType::Best {
                let best = self.best_index();
                self.moves.swap(self.cur, best);
            }

            let m = self.moves.get(self.cur).mv;
            self.cur += 1;

            if filter(m) {
                return m;
            }
        }
        Move::NONE
    }

    /// `[cur, end_moves)` で最大スコアの位置（同点なら先頭側）
    fn best_index(&self) -> usize {
        let mut best = self.cur;
        for i in self.cur + 1..self.end_moves {
            if self.moves.get(i).value > self.moves.get(best).value {
                best = i;
            }
        }
        best
    }

    /// 良い捕獲手を選択（SEE >= -55 * score / 1024）
    ///
    /// 基準を満たさない捕獲手は悪い捕獲手の領域（バッファ先頭側）へ移して後回しにする。
    fn select_good_capture<P: Position>(&mut self, pos: &P) -> Option<Move> {
        while self.cur < self.end_moves {
            let best = self.best_index();
            self.moves.swap(self.cur, best);

            let ext = self.moves.get(self.cur);
            self.cur += 1;

            // TT手は既に返したのでスキップ
            if ext.mv == self.tt_move {
                continue;
            }

            if pos.see_ge(ext.mv, Value::new(-55 * ext.value / 1024)) {
                return Some(ext.mv);
            }

            // 取り出し済みの位置にだけ書き込むので未処理の手は失われない
            self.moves.set(self.end_bad_captures, ext);
            self.end_bad_captures += 1;
        }
        None
    }
}

// =============================================================================
// ユーティリティ関数
// =============================================================================

/// 部分ソート
///
/// `limit` 以上のスコアの手を先頭に集め、降順でソートする。
/// 先頭要素（index 0）を初期 sorted 領域とみなし、index 1 から走査する。
/// `limit` 未満の手の相対順序は保証しない。
///
/// ## 戻り値
/// sorted 領域の末尾インデックス（sorted_end）を返す。
/// sorted 領域は `[0, sorted_end]`（inclusive）。
/// - `end <= 1` の場合は 0 を返す（ソート不要）
pub(crate) fn partial_insertion_sort(moves: &mut [ExtMove], end: usize, limit: i32) -> usize {
    let mut sorted_end: usize = 0;
    for p in 1..end {
        if moves[p].value >= limit {
            let tmp = moves[p];
            sorted_end += 1;
            moves[p] = moves[sorted_end];
            let mut q = sorted_end;
            while q > 0 && moves[q - 1].value < tmp.value {
                moves[q] = moves[q - 1];
                q -= 1;
            }
            moves[q] = tmp;
        }
    }
    sorted_end
}

// =============================================================================
// テスト
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_next() {
        assert_eq!(Stage::MainTT.next(), Stage::CaptureInit);
        assert_eq!(Stage::CaptureInit.next(), Stage::GoodCapture);
        assert_eq!(Stage::GoodCapture.next(), Stage::Killer0);
        assert_eq!(Stage::Killer0.next(), Stage::Killer1);
        assert_eq!(Stage::Killer1.next(), Stage::CounterMove);
        assert_eq!(Stage::CounterMove.next(), Stage::QuietInit);
        assert_eq!(Stage::QuietInit.next(), Stage::Quiet);
        assert_eq!(Stage::Quiet.next(), Stage::BadCapture);
        assert_eq!(Stage::BadCapture.next(), Stage::BadCapture);

        assert_eq!(Stage::EvasionTT.next(), Stage::EvasionInit);
        assert_eq!(Stage::EvasionInit.next(), Stage::Evasion);
        assert_eq!(Stage::Evasion.next(), Stage::Evasion);

        assert_eq!(Stage::ProbCutTT.next(), Stage::ProbCutInit);
        assert_eq!(Stage::ProbCutInit.next(), Stage::ProbCut);

        assert_eq!(Stage::QSearchTT.next(), Stage::QCaptureInit);
        assert_eq!(Stage::QCaptureInit.next(), Stage::QCapture);
        assert_eq!(Stage::QCapture.next(), Stage::QCheckInit);
        assert_eq!(Stage::QCheckInit.next(), Stage::QCheck);
        assert_eq!(Stage::QCheck.next(), Stage::QCheck);
    }

    #[test]
    fn test_partial_insertion_sort() {
        let mut moves = vec![
            ExtMove::new(Move::NONE, 100),
            ExtMove::new(Move::NONE, 50),
            ExtMove::new(Move::NONE, 200),
            ExtMove::new(Move::NONE, 10),
            ExtMove::new(Move::NONE, 150),
        ];

        let len = moves.len();
        let sorted_end = partial_insertion_sort(&mut moves, len, 100);

        // index 1 以降で >= 100 の手は 200, 150 の2つ → sorted_end=2
        assert_eq!(sorted_end, 2);
        assert_eq!(moves[0].value, 200);
        assert_eq!(moves[1].value, 150);
        assert_eq!(moves[2].value, 100);
    }

    #[test]
    fn test_partial_insertion_sort_boundary_value() {
        // value == limit の手は閾値以上として扱われる
        let mut moves = vec![
            ExtMove::new(Move::NONE, 99),
            ExtMove::new(Move::NONE, 100),
            ExtMove::new(Move::NONE, 101),
        ];

        let len = moves.len();
        let sorted_end = partial_insertion_sort(&mut moves, len, 100);

        assert_eq!(sorted_end, 2);
        assert_eq!(moves[0].value, 101);
        assert_eq!(moves[1].value, 100);
        assert_eq!(moves[2].value, 99);
    }

    #[test]
    fn test_partial_insertion_sort_prefix_is_descending() {
        // 閾値以上の手は全て先頭の降順領域に入る
        let values = [-300, 40, -9000, 120, 0, -4000, 7, 3999, -1];
        let mut moves: Vec<ExtMove> =
            values.iter().map(|&v| ExtMove::new(Move::NONE, v)).collect();

        let len = moves.len();
        let limit = -4000;
        partial_insertion_sort(&mut moves, len, limit);

        let good = values.iter().filter(|&&v| v >= limit).count();
        for w in moves[..good].windows(2) {
            assert!(w[0].value >= w[1].value);
        }
        assert!(moves[..good].iter().all(|e| e.value >= limit));
        assert_eq!(moves[good].value, -9000);
    }

    #[test]
    fn test_partial_insertion_sort_full_sort() {
        // limit = i32::MIN の場合は全要素ソート
        let mut moves = vec![
            ExtMove::new(Move::NONE, 50),
            ExtMove::new(Move::NONE, -100),
            ExtMove::new(Move::NONE, 200),
            ExtMove::new(Move::NONE, 0),
        ];

        let len = moves.len();
        let sorted_end = partial_insertion_sort(&mut moves, len, i32::MIN);

        assert_eq!(sorted_end, 3);
        assert_eq!(moves[0].value, 200);
        assert_eq!(moves[1].value, 50);
        assert_eq!(moves[2].value, 0);
        assert_eq!(moves[3].value, -100);
    }

    #[test]
    fn test_partial_insertion_sort_empty_and_single() {
        let mut moves: Vec<ExtMove> = vec![];
        assert_eq!(partial_insertion_sort(&mut moves, 0, 100), 0);

        let mut moves = vec![ExtMove::new(Move::NONE, 150)];
        assert_eq!(partial_insertion_sort(&mut moves, 1, 100), 0);
        assert_eq!(moves[0].value, 150);
    }
}
