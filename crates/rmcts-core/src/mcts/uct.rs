//! UCT（モンテカルロ木探索）
//!
//! 1回の反復は次の4段階:
//!
//! 1. `tree_policy`: ルートから UCB 最大の枝を辿り、未展開ノード（または終端）まで降りる
//! 2. `playout_policy`: 未展開なら展開し、葉の報酬を求める
//!    （展開時に全合法手の事前確率を葉評価で計算し、最良の事前確率を報酬とする）
//! 3. `backup`: 報酬を手番ごとに反転しながらルートまで逆伝播し、局面を元に戻す
//!
//! 局面は降下と同期して `do_move` / `undo_move` され、`SearchStack` がその記録を兼ねる。
//! 反復の終わりには必ずルート局面に戻っている。

use anyhow::{Context, Result};
use log::{debug, info, warn};

use super::limits::{StopCondition, UctCounters};
use super::node::{Edge, NodeKey, SearchNode, MAX_EDGES};
use super::params::UctParams;
use super::reward::{reward_to_value, value_to_reward};
use super::stack::SearchStack;
use super::table::{NodeTable, Probe};
use crate::eval::LeafEvaluator;
use crate::position::Position;
use crate::search::{ContHistKey, HistoryTables, MovePicker, PieceToHistory};
use crate::types::{Move, Value};

/// 局面の同定キー
#[inline]
fn node_key<P: Position>(pos: &P) -> NodeKey {
    NodeKey::new(pos.key(), pos.structure_key())
}

/// UCB 最大の枝（同値なら先頭側）
///
/// `UCB = Q + C * prior * sqrt(N) / (1 + n)`、未訪問の枝の Q は 0。
pub fn select_edge(node: &SearchNode, exploration_constant: f64) -> usize {
    debug_assert!(!node.edges.is_empty());

    let sqrt_n = (node.visits as f64).sqrt();
    let mut best_index = 0;
    let mut best_ucb = f64::NEG_INFINITY;

    for (i, edge) in node.edges.iter().enumerate() {
        let q = if edge.visits > 0 {
            edge.action_value / edge.visits as f64
        } else {
            0.0
        };
        let u = exploration_constant * edge.prior * sqrt_n / (1.0 + edge.visits as f64);
        let ucb = q + u;

        if ucb > best_ucb {
            best_ucb = ucb;
            best_index = i;
        }
    }
    best_index
}

/// UCT 探索器
///
/// 局面・スコアテーブル・葉評価器を借りて、ノードテーブルと探索スタックを所有する。
///
/// ```ignore
/// let mut uct = UctSearch::new(&mut pos, &history, evaluator, UctParams::default())?;
/// let best = uct.search(&mut SearchLimits::iterations(1000));
/// ```
pub struct UctSearch<'a, P, E> {
    pos: &'a mut P,
    history: &'a HistoryTables,
    evaluator: E,
    params: UctParams,
    table: NodeTable,
    stack: SearchStack,
    root_key: NodeKey,
    counters: UctCounters,
}

impl<'a, P, E> UctSearch<'a, P, E>
where
    P: Position,
    E: LeafEvaluator<P>,
{
    /// パラメータを検査してノードテーブルを確保する
    pub fn new(
        pos: &'a mut P,
        history: &'a HistoryTables,
        evaluator: E,
        params: UctParams,
    ) -> Result<Self> {
        params.validate().context("invalid UCT parameters")?;
        let root_key = node_key(&*pos);

        Ok(Self {
            pos,
            history,
            evaluator,
            params,
            table: NodeTable::new(params.node_table_size),
            stack: SearchStack::new(),
            root_key,
            counters: UctCounters::new(),
        })
    }

    // =========================================================================
    // 探索
    // =========================================================================

    /// 停止条件を満たすまで反復し、最善手を返す
    ///
    /// ルートに合法手がなければ `Move::NONE`。
    pub fn search<S: StopCondition>(&mut self, stop: &mut S) -> Move {
        if stop.is_unbounded() {
            warn!("uct search started without any stop condition");
        }

        let root_slot = self.create_root();
        if self.table.node(root_slot).terminal {
            info!("uct: root has no legal moves (in_check={})", self.pos.in_check());
            return Move::NONE;
        }

        while !stop.should_stop(&self.counters) {
            self.tree_policy();
            let reward = self.playout_policy();
            self.backup(reward);
        }

        let best = self.best_root_move();
        info!(
            "uct: best={} value={} descents={} playouts={} priors={} time={}ms",
            best,
            self.best_value(),
            self.counters.descents,
            self.counters.playouts,
            self.counters.priors,
            self.counters.elapsed().as_millis()
        );
        self.log_stats();
        best
    }

    /// ルートノードを用意する（統計・テーブル・スタックをリセット）
    fn create_root(&mut self) -> usize {
        self.counters = UctCounters::new();
        self.stack.reset();
        self.table.clear();
        self.root_key = node_key(&*self.pos);

        let slot = self.table.get_or_insert(self.root_key).slot();
        let frame = self.stack.current_mut();
        frame.node_slot = slot;
        frame.node_key = self.root_key;

        if !self.table.node(slot).is_expanded() {
            self.generate_moves(slot);
        }
        slot
    }

    /// ルートから UCB に従って未展開ノード・終端・最大手数まで降りる
    fn tree_policy(&mut self) {
        self.counters.descents += 1;
        debug_assert!(self.stack.at_root());

        // ルートが上書きされていたら作り直す（展開は playout_policy で行う）
        if !self.table.holds(self.stack.current().node_slot, self.root_key) {
            let slot = self.table.get_or_insert(self.root_key).slot();
            self.stack.current_mut().node_slot = slot;
        }

        loop {
            let node = self.table.node(self.stack.current().node_slot);
            if !node.is_expanded() || node.terminal || self.stack.at_horizon() {
                return;
            }

            let index = select_edge(node, self.params.exploration_constant);
            let mv = node.edges[index].mv;
            let cont_key = ContHistKey::new(self.pos.moved_piece(mv), mv.to());

            self.stack.push(index, mv, cont_key);
            self.pos.do_move(mv);
            self.counters.do_moves += 1;

            let key = node_key(&*self.pos);
            let probe = self.table.get_or_insert(key);
            if let Probe::Inserted(slot) = probe {
                self.table.node_mut(slot).last_move = mv;
            }

            let frame = self.stack.current_mut();
            frame.node_slot = probe.slot();
            frame.node_key = key;
        }
    }

    /// 葉の報酬（葉の手番側から見た勝率）
    fn playout_policy(&mut self) -> f64 {
        self.counters.playouts += 1;
        let slot = self.stack.current().node_slot;

        if self.table.node(slot).is_expanded() {
            // 終端・最大手数の葉への再訪
            self.table.node_mut(slot).visits += 1;
        } else {
            self.generate_moves(slot);
        }

        let node = self.table.node(slot);
        if node.terminal {
            if self.pos.in_check() { 0.0 } else { 0.5 }
        } else {
            node.edges[0].prior
        }
    }

    /// 報酬をルートまで逆伝播し、局面をルートに戻す
    fn backup(&mut self, reward: f64) {
        let mut r = reward;

        while !self.stack.at_root() {
            r = 1.0 - r;
            let frame = self.stack.pop();
            self.pos.undo_move(frame.current_move);

            if !self.table.holds(frame.node_slot, frame.node_key) {
                self.counters.stale_backups += 1;
                continue;
            }

            let node = self.table.node_mut(frame.node_slot);
            match node.edges.get_mut(frame.edge_index) {
                Some(edge) if edge.mv == frame.current_move => {
                    edge.add_reward(r);
                    if edge.visits == 1 {
                        node.expanded_sons += 1;
                    }
                    node.visits += 1;
                }
                _ => self.counters.stale_backups += 1,
            }
        }

        debug_assert_eq!(node_key(&*self.pos), self.root_key);
    }

    // =========================================================================
    // 展開
    // =========================================================================

    /// `back` 手前の手で選ぶ ContinuationHistory（なければ番兵）
    fn cont_table(&self, back: usize) -> &'a PieceToHistory {
        self.history
            .continuation_history
            .table_or_sentinel(self.stack.cont_key(back))
    }

    /// ノードを展開する
    ///
    /// 合法手ごとに事前確率を計算し、事前確率の降順（同値は生成順）に枝を並べる。
    fn generate_moves(&mut self, slot: usize) {
        let history = self.history;

        let prev = self.stack.prev_move(1);
        let counter_move = if prev.is_some() {
            let to = prev.to();
            history.counter_moves.get(self.pos.piece_on(to), to)
        } else {
            Move::NONE
        };
        let cont = [
            self.cont_table(1),
            self.cont_table(2),
            history.continuation_history.sentinel(),
            self.cont_table(4),
        ];
        let killers = self.stack.current().killers;

        // 枝の確保領域を再利用する
        let mut edges = std::mem::take(&mut self.table.node_mut(slot).edges);
        edges.clear();

        let mut mp = MovePicker::new(
            &*self.pos,
            Move::NONE,
            self.params.expansion_depth,
            cont,
            counter_move,
            killers,
        );
        let mut move_count = 0;

        loop {
            let m = mp.next_move(&*self.pos, history);
            if m.is_none() {
                break;
            }
            if !self.pos.legal(m) {
                continue;
            }
            move_count += 1;

            let prior = self.calculate_prior(m);
            assert!(edges.len() < MAX_EDGES, "too many edges (MAX_EDGES = {MAX_EDGES})");
            edges.push(Edge::new(m, prior));
        }

        edges.sort_by(|a, b| b.prior.total_cmp(&a.prior));

        let node = self.table.node_mut(slot);
        node.edges = edges;
        node.visits = 1;
        node.expanded_sons = 0;
        node.terminal = move_count == 0;
        debug_assert_eq!(node.edges.len(), move_count as usize);
        self.stack.current_mut().move_count = move_count;

        #[cfg(feature = "trace-nodes")]
        self.log_node(slot);
    }

    /// 指し手 `m` の事前確率（指した側から見た勝率）
    fn calculate_prior(&mut self, m: Move) -> f64 {
        self.counters.priors += 1;

        self.pos.do_move(m);
        let value = self.evaluator.evaluate(&mut *self.pos, self.history, self.params.prior_depth);
        self.pos.undo_move(m);

        // 評価値は子局面の手番から見た値
        value_to_reward(-value)
    }

    /// ルートの最善手（C = 0 の UCB、すなわち平均報酬最大）
    fn best_root_move(&mut self) -> Move {
        let slot = match self.table.find(self.root_key) {
            Some(slot) if self.table.node(slot).is_expanded() => slot,
            _ => {
                debug!("uct: root node was evicted, expanding again");
                let slot = self.table.get_or_insert(self.root_key).slot();
                let frame = self.stack.current_mut();
                frame.node_slot = slot;
                frame.node_key = self.root_key;
                self.generate_moves(slot);
                slot
            }
        };

        let node = self.table.node(slot);
        if node.edges.is_empty() {
            return Move::NONE;
        }
        node.edges[select_edge(node, 0.0)].mv
    }

    // =========================================================================
    // 参照・設定
    // =========================================================================

    /// 直近の探索の統計
    pub fn counters(&self) -> &UctCounters {
        &self.counters
    }

    /// 探索パラメータ
    pub fn params(&self) -> &UctParams {
        &self.params
    }

    /// UCB の探索定数 C
    pub fn exploration_constant(&self) -> f64 {
        self.params.exploration_constant
    }

    /// UCB の探索定数 C を変更する（次の選択から反映）
    pub fn set_exploration_constant(&mut self, c: f64) {
        self.params.exploration_constant = c;
    }

    /// ノードテーブル
    pub fn table(&self) -> &NodeTable {
        &self.table
    }

    /// 葉評価器
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// 直近の探索でルートを展開したときの合法手の数
    pub fn root_move_count(&self) -> u32 {
        debug_assert!(self.stack.at_root());
        self.stack.current().move_count
    }

    /// 探索対象の局面
    pub fn position(&self) -> &P {
        &*self.pos
    }

    /// ルートノード（テーブルから追い出されていれば `None`）
    pub fn root_node(&self) -> Option<&SearchNode> {
        self.table.find(self.root_key).map(|slot| self.table.node(slot))
    }

    /// ルートの枝（事前確率の降順）
    pub fn root_edges(&self) -> &[Edge] {
        match self.root_node() {
            Some(node) => &node.edges,
            None => &[],
        }
    }

    /// ルートの最善の枝の平均報酬を評価値に直したもの
    pub fn best_value(&self) -> Value {
        self.root_node()
            .filter(|node| !node.edges.is_empty())
            .map_or(Value::ZERO, |node| {
                let edge = &node.edges[select_edge(node, 0.0)];
                let reward = if edge.visits > 0 { edge.mean_action_value } else { edge.prior };
                reward_to_value(reward)
            })
    }

    /// 訪問回数最大の枝を辿った読み筋（最大 `max_len` 手）
    ///
    /// 局面は読み筋を辿ったあと元に戻す。
    pub fn principal_variation(&mut self, max_len: usize) -> Vec<Move> {
        let mut pv = Vec::new();
        let mut key = self.root_key;

        while pv.len() < max_len {
            let Some(slot) = self.table.find(key) else {
                break;
            };
            let node = self.table.node(slot);
            if !node.is_expanded() || node.terminal {
                break;
            }
            let Some(index) = node.most_visited_edge() else {
                break;
            };
            let edge = node.edges[index];
            if edge.visits == 0 {
                break;
            }

            pv.push(edge.mv);
            self.pos.do_move(edge.mv);
            key = node_key(&*self.pos);
        }

        for &mv in pv.iter().rev() {
            self.pos.undo_move(mv);
        }
        pv
    }

    // =========================================================================
    // ログ
    // =========================================================================

    /// 探索統計とルートの枝を debug ログに出す
    pub fn log_stats(&self) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }

        let c = &self.counters;
        debug!(
            "uct stats: root_moves={} descents={} playouts={} do_moves={} priors={} stale_backups={} pps={:.0}",
            self.root_move_count(),
            c.descents,
            c.playouts,
            c.do_moves,
            c.priors,
            c.stale_backups,
            c.playouts_per_second()
        );
        debug!(
            "node table: size={} expanded={} inserts={} hits={} collisions={}",
            self.table.len(),
            self.table.expanded_count(),
            self.table.inserts(),
            self.table.hits(),
            self.table.collisions()
        );
        if let Some(slot) = self.table.find(self.root_key) {
            self.log_node(slot);
        }
    }

    /// ノードと枝の一覧を debug ログに出す
    pub fn log_node(&self, slot: usize) {
        let node = self.table.node(slot);
        debug!(
            "node key={:016x}:{:016x} last_move={} visits={} sons={} expanded_sons={} terminal={}",
            node.key.key1,
            node.key.key2,
            node.last_move,
            node.visits,
            node.sons(),
            node.expanded_sons,
            node.terminal
        );
        for edge in &node.edges {
            debug!(
                "  {:<10} prior={:.4} visits={:>6} mean={:.4} value={}",
                edge.mv.to_string(),
                edge.prior,
                edge.visits,
                edge.mean_action_value,
                reward_to_value(if edge.visits > 0 { edge.mean_action_value } else { edge.prior })
            );
        }
    }
}
