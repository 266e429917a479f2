//! 葉ノード評価用の小さな探索
//!
//! - `depth <= 0`: 静止探索（stand pat + 捕獲・取り返し・王手）
//! - `depth > 0`: 枝刈りなしの alpha-beta（末端は静止探索）
//!
//! UCT の事前確率（prior）計算に使う。置換表は持たず、オーダリングには
//! `HistoryTables` を読み取り専用で参照する。

use super::history::{ContHistKey, HistoryTables, PieceToHistory};
use super::movepicker::MovePicker;
use crate::eval::{LeafEvaluator, StaticEval};
use crate::position::Position;
use crate::types::{Depth, Move, Value, DEPTH_ZERO, MAX_PLY};

/// 静的評価 + 静止探索 / alpha-beta による葉評価
pub struct MinimaxEvaluator<S> {
    static_eval: S,
    /// ply毎のキラー手
    killers: Vec<[Move; 2]>,
    /// 探索中に通った指し手の ContinuationHistory キー
    path: Vec<ContHistKey>,
    nodes: u64,
}

impl<S> MinimaxEvaluator<S> {
    pub fn new(static_eval: S) -> Self {
        Self {
            static_eval,
            killers: vec![[Move::NONE; 2]; MAX_PLY + 1],
            path: Vec::with_capacity(MAX_PLY),
            nodes: 0,
        }
    }

    /// 訪問した局面数（累計）
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// キラー手と局面数をクリア
    pub fn clear(&mut self) {
        self.killers.fill([Move::NONE; 2]);
        self.nodes = 0;
    }

    /// `back` 手前の指し手で選ぶ ContinuationHistory
    fn cont_table<'h>(&self, history: &'h HistoryTables, back: usize) -> &'h PieceToHistory {
        let key = self.path.len().checked_sub(back).map(|i| self.path[i]);
        history.continuation_history.table_or_sentinel(key)
    }

    fn update_killers(&mut self, ply: usize, m: Move) {
        let killers = &mut self.killers[ply];
        if killers[0] != m {
            killers[1] = killers[0];
            killers[0] = m;
        }
    }
}

impl<S> MinimaxEvaluator<S> {
    /// 静止探索
    #[allow(clippy::too_many_arguments)]
    fn qsearch<P: Position>(
        &mut self,
        pos: &mut P,
        history: &HistoryTables,
        mut alpha: Value,
        beta: Value,
        depth: Depth,
        ply: usize,
        prev_move: Move,
    ) -> Value
    where
        S: StaticEval<P>,
    {
        self.nodes += 1;
        let in_check = pos.in_check();

        if ply >= MAX_PLY {
            return if in_check {
                Value::DRAW
            } else {
                self.static_eval.static_eval(pos)
            };
        }

        // stand pat（王手中は回避手を全て読む）
        let mut best = if in_check {
            -Value::INFINITE
        } else {
            let stand_pat = self.static_eval.static_eval(pos);
            if stand_pat >= beta {
                return stand_pat;
            }
            if stand_pat > alpha {
                alpha = stand_pat;
            }
            stand_pat
        };

        let recapture_square = prev_move.is_some().then(|| prev_move.to());
        let mut mp = MovePicker::new_qsearch(pos, Move::NONE, depth, recapture_square);
        let mut move_count = 0;

        loop {
            let m = mp.next_move(pos, history);
            if m.is_none() {
                break;
            }
            if !pos.legal(m) {
                continue;
            }
            // 損な取り合いは読まない
            if !in_check && !pos.see_ge(m, Value::ZERO) {
                continue;
            }
            move_count += 1;

            pos.do_move(m);
            let value = -self.qsearch(pos, history, -beta, -alpha, depth - 1, ply + 1, m);
            pos.undo_move(m);

            if value > best {
                best = value;
                if value > alpha {
                    alpha = value;
                    if value >= beta {
                        break;
                    }
                }
            }
        }

        if in_check && move_count == 0 {
            return Value::mated_in(ply as i32);
        }
        best
    }

    /// 枝刈りなしの alpha-beta
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta<P: Position>(
        &mut self,
        pos: &mut P,
        history: &HistoryTables,
        mut alpha: Value,
        beta: Value,
        depth: Depth,
        ply: usize,
        prev_move: Move,
    ) -> Value
    where
        S: StaticEval<P>,
    {
        if depth <= DEPTH_ZERO {
            return self.qsearch(pos, history, alpha, beta, DEPTH_ZERO, ply, prev_move);
        }

        self.nodes += 1;
        if ply >= MAX_PLY {
            return self.static_eval.static_eval(pos);
        }

        let counter_move = if prev_move.is_some() {
            let to = prev_move.to();
            history.counter_moves.get(pos.piece_on(to), to)
        } else {
            Move::NONE
        };
        let cont = [
            self.cont_table(history, 1),
            self.cont_table(history, 2),
            history.continuation_history.sentinel(),
            self.cont_table(history, 4),
        ];
        let mut mp = MovePicker::new(pos, Move::NONE, depth, cont, counter_move, self.killers[ply]);

        let mut best = -Value::INFINITE;
        let mut move_count = 0;

        loop {
            let m = mp.next_move(pos, history);
            if m.is_none() {
                break;
            }
            if !pos.legal(m) {
                continue;
            }
            move_count += 1;

            let is_capture = pos.is_capture(m);
            self.path.push(ContHistKey::new(pos.moved_piece(m), m.to()));
            pos.do_move(m);
            let value = -self.alpha_beta(pos, history, -beta, -alpha, depth - 1, ply + 1, m);
            pos.undo_move(m);
            self.path.pop();

            if value > best {
                best = value;
                if value > alpha {
                    alpha = value;
                    if value >= beta {
                        if !is_capture {
                            self.update_killers(ply, m);
                        }
                        break;
                    }
                }
            }
        }

        if move_count == 0 {
            return if pos.in_check() {
                Value::mated_in(ply as i32)
            } else {
                Value::DRAW
            };
        }
        best
    }
}

impl<P, S> LeafEvaluator<P> for MinimaxEvaluator<S>
where
    P: Position,
    S: StaticEval<P>,
{
    fn evaluate(&mut self, pos: &mut P, history: &HistoryTables, depth: Depth) -> Value {
        self.path.clear();
        if depth <= DEPTH_ZERO {
            self.qsearch(
                pos,
                history,
                -Value::INFINITE,
                Value::INFINITE,
                DEPTH_ZERO,
                0,
                Move::NONE,
            )
        } else {
            self.alpha_beta(pos, history, -Value::INFINITE, Value::INFINITE, depth, 0, Move::NONE)
        }
    }
}
