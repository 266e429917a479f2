//! 探索木のノードと枝
//!
//! - `NodeKey`: 局面の同定キー（主キー + 構造キー）
//! - `Edge`: 親ノードから子局面への枝（指し手・事前確率・訪問統計）
//! - `SearchNode`: 局面ごとの訪問統計と枝の一覧

use crate::types::Move;

/// 1ノードが持てる枝の上限
pub const MAX_EDGES: usize = 256;

/// 局面の同定キー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeKey {
    pub key1: u64,
    pub key2: u64,
}

impl NodeKey {
    #[inline]
    pub const fn new(key1: u64, key2: u64) -> Self {
        Self { key1, key2 }
    }
}

/// 枝
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// 指し手
    pub mv: Move,
    /// 事前確率（展開時に固定）
    pub prior: f64,
    /// 訪問回数
    pub visits: u32,
    /// 報酬の累積（この枝を選んだ側から見た値）
    pub action_value: f64,
    /// 報酬の平均
    pub mean_action_value: f64,
}

impl Edge {
    pub fn new(mv: Move, prior: f64) -> Self {
        Self {
            mv,
            prior,
            visits: 0,
            action_value: 0.0,
            mean_action_value: 0.0,
        }
    }

    /// 報酬を1回分加算
    #[inline]
    pub fn add_reward(&mut self, reward: f64) {
        self.visits += 1;
        self.action_value += reward;
        self.mean_action_value = self.action_value / self.visits as f64;
    }
}

/// ノード
///
/// `visits == 0` のノードは未展開で、枝を持たず終端でもない。
/// 展開後の `visits` は展開そのものの1回 + 逆伝播の回数。
#[derive(Debug, Clone, Default)]
pub struct SearchNode {
    pub key: NodeKey,
    pub visits: u32,
    /// 1回以上訪問された枝の数
    pub expanded_sons: u32,
    /// このノードへ至った指し手
    pub last_move: Move,
    pub edges: Vec<Edge>,
    /// 合法手がない局面
    pub terminal: bool,
}

impl SearchNode {
    /// `key` の未展開ノードとして初期化（枝の確保領域は再利用する）
    pub fn reset(&mut self, key: NodeKey) {
        self.key = key;
        self.visits = 0;
        self.expanded_sons = 0;
        self.last_move = Move::NONE;
        self.edges.clear();
        self.terminal = false;
    }

    /// 枝の数
    #[inline]
    pub fn sons(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.visits > 0
    }

    /// 訪問回数最大の枝（同数なら先頭側）
    pub fn most_visited_edge(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, edge) in self.edges.iter().enumerate() {
            if best.is_none_or(|b| edge.visits > self.edges[b].visits) {
                best = Some(i);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    fn mv(from: u8, to: u8) -> Move {
        Move::new(Square::new(from), Square::new(to))
    }

    #[test]
    fn test_edge_add_reward() {
        let mut edge = Edge::new(mv(1, 2), 0.4);
        edge.add_reward(1.0);
        edge.add_reward(0.0);
        edge.add_reward(0.5);
        assert_eq!(edge.visits, 3);
        assert!((edge.action_value - 1.5).abs() < 1e-12);
        assert!((edge.mean_action_value - 0.5).abs() < 1e-12);
        assert_eq!(edge.prior, 0.4);
    }

    #[test]
    fn test_node_reset_clears_state() {
        let mut node = SearchNode::default();
        node.visits = 7;
        node.terminal = true;
        node.last_move = mv(3, 4);
        node.edges.push(Edge::new(mv(3, 4), 0.5));

        node.reset(NodeKey::new(11, 12));
        assert_eq!(node.key, NodeKey::new(11, 12));
        assert!(!node.is_expanded());
        assert!(!node.terminal);
        assert_eq!(node.sons(), 0);
        assert_eq!(node.last_move, Move::NONE);
    }

    #[test]
    fn test_most_visited_edge_prefers_first_on_tie() {
        let mut node = SearchNode::default();
        assert_eq!(node.most_visited_edge(), None);
        for i in 0..3 {
            node.edges.push(Edge::new(mv(i, i + 10), 0.1));
        }
        node.edges[1].visits = 4;
        node.edges[2].visits = 4;
        assert_eq!(node.most_visited_edge(), Some(1));
    }
}
