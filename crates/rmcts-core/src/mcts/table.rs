//! ノードテーブル
//!
//! 局面キーから `SearchNode` を引く固定長のハッシュ表。
//! 1スロット1ノードで、衝突したら上書きする（損失のあるキャッシュ）。
//! 探索の開始ごとにクリアする。

use super::node::{NodeKey, SearchNode};

/// `get_or_insert` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// 同じキーのノードが既にあった
    Found(usize),
    /// 新しく確保した（未展開）
    Inserted(usize),
}

impl Probe {
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Probe::Found(slot) | Probe::Inserted(slot) => slot,
        }
    }
}

/// ノードテーブル
pub struct NodeTable {
    nodes: Vec<SearchNode>,
    hits: u64,
    inserts: u64,
    collisions: u64,
}

impl NodeTable {
    /// `size` スロットのテーブルを確保
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "NodeTable size must be positive");
        let mut nodes = Vec::with_capacity(size);
        nodes.resize_with(size, SearchNode::default);
        Self {
            nodes,
            hits: 0,
            inserts: 0,
            collisions: 0,
        }
    }

    /// スロット数
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    fn slot_of(&self, key: NodeKey) -> usize {
        (key.key1 % self.nodes.len() as u64) as usize
    }

    /// `key` のノードを探す。なければ上書きして未展開ノードを作る
    pub fn get_or_insert(&mut self, key: NodeKey) -> Probe {
        let slot = self.slot_of(key);
        let node = &mut self.nodes[slot];

        if node.key == key {
            self.hits += 1;
            return Probe::Found(slot);
        }

        if node.is_expanded() {
            self.collisions += 1;
            log::trace!(
                "node table collision: slot={slot} old={:016x} new={:016x}",
                node.key.key1,
                key.key1
            );
        }
        node.reset(key);
        self.inserts += 1;
        Probe::Inserted(slot)
    }

    /// `key` のノードがあればそのスロット
    pub fn find(&self, key: NodeKey) -> Option<usize> {
        let slot = self.slot_of(key);
        (self.nodes[slot].key == key).then_some(slot)
    }

    /// スロットのノードがまだ `key` のものか
    #[inline]
    pub fn holds(&self, slot: usize, key: NodeKey) -> bool {
        self.nodes[slot].key == key
    }

    #[inline]
    pub fn node(&self, slot: usize) -> &SearchNode {
        &self.nodes[slot]
    }

    #[inline]
    pub fn node_mut(&mut self, slot: usize) -> &mut SearchNode {
        &mut self.nodes[slot]
    }

    /// 全スロットを空にし、統計をリセット
    pub fn clear(&mut self) {
        for node in &mut self.nodes {
            node.reset(NodeKey::default());
        }
        self.hits = 0;
        self.inserts = 0;
        self.collisions = 0;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn inserts(&self) -> u64 {
        self.inserts
    }

    /// 展開済みノードを上書きした回数
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    /// 展開済みノードの数
    pub fn expanded_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_expanded()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_insert_then_find() {
        let mut table = NodeTable::new(16);
        let key = NodeKey::new(35, 7);

        let probe = table.get_or_insert(key);
        assert_eq!(probe, Probe::Inserted(3));
        assert_eq!(table.find(key), Some(3));
        assert!(!table.node(3).is_expanded());

        table.node_mut(3).visits = 1;
        assert_eq!(table.get_or_insert(key), Probe::Found(3));
        assert_eq!(table.hits(), 1);
        assert_eq!(table.inserts(), 1);
    }

    #[test]
    fn test_collision_overwrites_slot() {
        let mut table = NodeTable::new(16);
        let a = NodeKey::new(5, 1);
        let b = NodeKey::new(21, 2);

        let slot = table.get_or_insert(a).slot();
        table.node_mut(slot).visits = 3;

        assert_eq!(table.get_or_insert(b), Probe::Inserted(slot));
        assert_eq!(table.collisions(), 1);
        assert!(!table.holds(slot, a));
        assert!(table.holds(slot, b));
        assert_eq!(table.find(a), None);
        assert_eq!(table.node(slot).visits, 0);
    }

    #[test]
    fn test_secondary_key_distinguishes_nodes() {
        let mut table = NodeTable::new(8);
        let slot = table.get_or_insert(NodeKey::new(9, 100)).slot();
        table.node_mut(slot).visits = 1;

        assert!(matches!(table.get_or_insert(NodeKey::new(9, 101)), Probe::Inserted(_)));
        assert_eq!(table.collisions(), 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut table = NodeTable::new(4);
        let slot = table.get_or_insert(NodeKey::new(2, 2)).slot();
        table.node_mut(slot).visits = 1;
        assert_eq!(table.expanded_count(), 1);

        table.clear();
        assert_eq!(table.expanded_count(), 0);
        assert_eq!(table.find(NodeKey::new(2, 2)), None);
        assert_eq!(table.inserts(), 0);
        assert_eq!(table.len(), 4);
    }
}
