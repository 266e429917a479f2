//! History統計（オーダリング用スコアテーブル）
//!
//! 探索中の手の成功/失敗を記録し、手の順序付けに利用する。
//! MovePicker と UCT からは読み取り専用で参照される。
//!
//! - `StatsEntry`: 範囲制限付き履歴エントリ
//! - `ButterflyHistory`: [Color][from_to] -> score
//! - `CapturePieceToHistory`: [piece][to][captured_pt] -> score
//! - `PieceToHistory`: [piece][to] -> score
//! - `ContinuationHistory`: [prev_pc][prev_to] -> PieceToHistory
//! - `CounterMoveHistory`: [piece][square] -> Move

use crate::types::{Color, Move, Piece, PieceType, Square};

// =============================================================================
// 定数
// =============================================================================

/// from_toインデックスのサイズ
pub const FROM_TO_SIZE: usize = Square::NUM * Square::NUM;

/// ButterflyHistory / CapturePieceToHistory の値の上限
pub const BUTTERFLY_HISTORY_LIMIT: i32 = 10692;

/// PieceToHistory（ContinuationHistory の各テーブル）の値の上限
pub const PIECE_TO_HISTORY_LIMIT: i32 = 29952;

// =============================================================================
// StatsEntry
// =============================================================================

/// 履歴統計の1エントリ
///
/// 値の範囲を [-D, D] に制限しながら更新できる。
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct StatsEntry<const D: i32> {
    value: i16,
}

impl<const D: i32> StatsEntry<D> {
    #[inline]
    pub fn get(&self) -> i16 {
        self.value
    }

    #[inline]
    pub fn set(&mut self, v: i16) {
        self.value = v;
    }

    /// ボーナス値を加算（範囲制限付き）
    ///
    /// 更新式: entry += clamp(bonus, -D, D) - entry * |clamp(bonus, -D, D)| / D
    #[inline]
    pub fn update(&mut self, bonus: i32) {
        let clamped = bonus.clamp(-D, D);
        let delta = clamped - (self.value as i32) * clamped.abs() / D;
        self.value = (self.value as i32 + delta) as i16;
        debug_assert!(
            self.value.abs() <= D as i16,
            "StatsEntry out of range: {} (D={})",
            self.value,
            D
        );
    }
}

// =============================================================================
// ButterflyHistory
// =============================================================================

/// ButterflyHistory: [Color][from_to] -> score
///
/// 静かな手の成功/失敗を手番・移動元・移動先で記録する。
pub struct ButterflyHistory {
    table: [[StatsEntry<BUTTERFLY_HISTORY_LIMIT>; FROM_TO_SIZE]; Color::NUM],
}

impl ButterflyHistory {
    #[inline]
    pub fn get(&self, color: Color, mv: Move) -> i16 {
        self.table[color.index()][mv.from_to()].get()
    }

    #[inline]
    pub fn set(&mut self, color: Color, mv: Move, v: i16) {
        self.table[color.index()][mv.from_to()].set(v);
    }

    #[inline]
    pub fn update(&mut self, color: Color, mv: Move, bonus: i32) {
        self.table[color.index()][mv.from_to()].update(bonus);
    }

    pub fn clear(&mut self) {
        for color_table in &mut self.table {
            color_table.fill(StatsEntry::default());
        }
    }
}

// =============================================================================
// CapturePieceToHistory
// =============================================================================

/// CapturePieceToHistory: [piece][to][captured_piece_type] -> score
pub struct CapturePieceToHistory {
    table: [[[StatsEntry<BUTTERFLY_HISTORY_LIMIT>; PieceType::NUM]; Square::NUM]; Piece::NUM],
}

impl CapturePieceToHistory {
    #[inline]
    pub fn get(&self, pc: Piece, to: Square, captured_pt: PieceType) -> i16 {
        self.table[pc.index()][to.index()][captured_pt.index()].get()
    }

    #[inline]
    pub fn set(&mut self, pc: Piece, to: Square, captured_pt: PieceType, v: i16) {
        self.table[pc.index()][to.index()][captured_pt.index()].set(v);
    }

    #[inline]
    pub fn update(&mut self, pc: Piece, to: Square, captured_pt: PieceType, bonus: i32) {
        self.table[pc.index()][to.index()][captured_pt.index()].update(bonus);
    }

    pub fn clear(&mut self) {
        for pc_table in &mut self.table {
            for sq_table in pc_table.iter_mut() {
                sq_table.fill(StatsEntry::default());
            }
        }
    }
}

// =============================================================================
// PieceToHistory / ContinuationHistory
// =============================================================================

/// PieceToHistory: [piece][to] -> score
#[derive(Clone)]
pub struct PieceToHistory {
    table: [[StatsEntry<PIECE_TO_HISTORY_LIMIT>; Square::NUM]; Piece::NUM],
}

impl PieceToHistory {
    pub fn new() -> Self {
        Self {
            table: [[StatsEntry::default(); Square::NUM]; Piece::NUM],
        }
    }

    #[inline]
    pub fn get(&self, pc: Piece, to: Square) -> i16 {
        self.table[pc.index()][to.index()].get()
    }

    #[inline]
    pub fn set(&mut self, pc: Piece, to: Square, v: i16) {
        self.table[pc.index()][to.index()].set(v);
    }

    #[inline]
    pub fn update(&mut self, pc: Piece, to: Square, bonus: i32) {
        self.table[pc.index()][to.index()].update(bonus);
    }

    pub fn clear(&mut self) {
        for pc_table in &mut self.table {
            pc_table.fill(StatsEntry::default());
        }
    }
}

impl Default for PieceToHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// ContinuationHistory のテーブル選択キー（直前の手で動いた駒と移動先）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContHistKey {
    pub piece: Piece,
    pub to: Square,
}

impl ContHistKey {
    #[inline]
    pub const fn new(piece: Piece, to: Square) -> Self {
        Self { piece, to }
    }
}

/// ContinuationHistory: [prev_pc][prev_to] -> PieceToHistory
///
/// k手前の指し手ごとに1枚の PieceToHistory を選ぶ。
/// 該当する手がない（ルート付近・指し手なし）場合は常にゼロの sentinel を返す。
pub struct ContinuationHistory {
    tables: Vec<PieceToHistory>,
    sentinel: PieceToHistory,
}

impl ContinuationHistory {
    pub fn new() -> Self {
        Self {
            tables: vec![PieceToHistory::new(); Piece::NUM * Square::NUM],
            sentinel: PieceToHistory::new(),
        }
    }

    #[inline]
    fn slot(key: ContHistKey) -> usize {
        key.piece.index() * Square::NUM + key.to.index()
    }

    /// キーに対応するテーブル
    #[inline]
    pub fn get_table(&self, key: ContHistKey) -> &PieceToHistory {
        &self.tables[Self::slot(key)]
    }

    /// キーに対応するテーブル（更新用）
    #[inline]
    pub fn get_table_mut(&mut self, key: ContHistKey) -> &mut PieceToHistory {
        &mut self.tables[Self::slot(key)]
    }

    /// `None` なら sentinel を返す
    #[inline]
    pub fn table_or_sentinel(&self, key: Option<ContHistKey>) -> &PieceToHistory {
        match key {
            Some(key) => self.get_table(key),
            None => &self.sentinel,
        }
    }

    /// 更新されることのない中立テーブル
    #[inline]
    pub fn sentinel(&self) -> &PieceToHistory {
        &self.sentinel
    }

    pub fn clear(&mut self) {
        for table in &mut self.tables {
            table.clear();
        }
    }
}

impl Default for ContinuationHistory {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// CounterMoveHistory
// =============================================================================

/// CounterMoveHistory: [piece][square] -> Move
///
/// 直前の手（動いた駒・移動先）に対して有効だった応手を1つ記録する。
pub struct CounterMoveHistory {
    table: [[Move; Square::NUM]; Piece::NUM],
}

impl CounterMoveHistory {
    #[inline]
    pub fn get(&self, pc: Piece, sq: Square) -> Move {
        self.table[pc.index()][sq.index()]
    }

    #[inline]
    pub fn set(&mut self, pc: Piece, sq: Square, mv: Move) {
        self.table[pc.index()][sq.index()] = mv;
    }

    pub fn clear(&mut self) {
        for pc_table in &mut self.table {
            pc_table.fill(Move::NONE);
        }
    }
}

// =============================================================================
// HistoryTables
// =============================================================================

/// オーダリングで参照するスコアテーブル一式
///
/// 大きな配列のスタック確保を避けるため、各テーブルはヒープに置く。
pub struct HistoryTables {
    pub main_history: Box<ButterflyHistory>,
    pub capture_history: Box<CapturePieceToHistory>,
    pub continuation_history: ContinuationHistory,
    pub counter_moves: Box<CounterMoveHistory>,
}

impl HistoryTables {
    pub fn new() -> Self {
        // SAFETY: ButterflyHistory / CapturePieceToHistory は i16 のみで構成され、
        // CounterMoveHistory は u16 のみで構成される（0 は Move::NONE）。
        // いずれもゼロ初期化が有効な値になる。
        unsafe {
            Self {
                main_history: Box::<ButterflyHistory>::new_zeroed().assume_init(),
                capture_history: Box::<CapturePieceToHistory>::new_zeroed().assume_init(),
                continuation_history: ContinuationHistory::new(),
                counter_moves: Box::<CounterMoveHistory>::new_zeroed().assume_init(),
            }
        }
    }

    /// 全テーブルをゼロクリア
    pub fn clear(&mut self) {
        self.main_history.clear();
        self.capture_history.clear();
        self.continuation_history.clear();
        self.counter_moves.clear();
    }
}

impl Default for HistoryTables {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// テスト
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(from: u8, to: u8) -> Move {
        Move::new(Square::new(from), Square::new(to))
    }

    #[test]
    fn test_stats_entry_update_converges_to_limit() {
        let mut entry = StatsEntry::<1000>::default();
        for _ in 0..200 {
            entry.update(1000);
        }
        assert_eq!(entry.get(), 1000);

        for _ in 0..200 {
            entry.update(-5000);
        }
        assert_eq!(entry.get(), -1000);
    }

    #[test]
    fn test_stats_entry_small_bonus_is_nearly_additive() {
        let mut entry = StatsEntry::<PIECE_TO_HISTORY_LIMIT>::default();
        entry.update(100);
        assert_eq!(entry.get(), 100);
        entry.update(100);
        // 100 - 100 * 100 / 29952 = 100
        assert_eq!(entry.get(), 200);
    }

    #[test]
    fn test_history_tables_start_zeroed() {
        let h = HistoryTables::new();
        let pc = Piece::new(Color::Black, PieceType::new(3));
        assert_eq!(h.main_history.get(Color::White, mv(10, 70)), 0);
        assert_eq!(h.capture_history.get(pc, Square::new(40), PieceType::new(2)), 0);
        assert_eq!(h.counter_moves.get(pc, Square::new(40)), Move::NONE);
        assert_eq!(h.continuation_history.sentinel().get(pc, Square::new(40)), 0);
    }

    #[test]
    fn test_butterfly_is_keyed_by_color() {
        let mut h = HistoryTables::new();
        h.main_history.set(Color::Black, mv(1, 50), 321);
        assert_eq!(h.main_history.get(Color::Black, mv(1, 50)), 321);
        assert_eq!(h.main_history.get(Color::White, mv(1, 50)), 0);
        assert_eq!(h.main_history.get(Color::Black, mv(50, 1)), 0);
    }

    #[test]
    fn test_continuation_table_selection() {
        let mut h = HistoryTables::new();
        let prev = ContHistKey::new(Piece::new(Color::White, PieceType::new(1)), Square::new(44));
        let pc = Piece::new(Color::Black, PieceType::new(2));
        h.continuation_history.get_table_mut(prev).set(pc, Square::new(45), -77);

        assert_eq!(h.continuation_history.get_table(prev).get(pc, Square::new(45)), -77);
        assert_eq!(
            h.continuation_history.table_or_sentinel(Some(prev)).get(pc, Square::new(45)),
            -77
        );
        assert_eq!(h.continuation_history.table_or_sentinel(None).get(pc, Square::new(45)), 0);
    }

    #[test]
    fn test_clear_resets_all_tables() {
        let mut h = HistoryTables::new();
        let pc = Piece::new(Color::Black, PieceType::new(4));
        h.main_history.update(Color::Black, mv(2, 60), 500);
        h.capture_history.update(pc, Square::new(60), PieceType::new(1), 500);
        h.counter_moves.set(pc, Square::new(60), mv(3, 61));
        h.clear();
        assert_eq!(h.main_history.get(Color::Black, mv(2, 60)), 0);
        assert_eq!(h.capture_history.get(pc, Square::new(60), PieceType::new(1)), 0);
        assert_eq!(h.counter_moves.get(pc, Square::new(60)), Move::NONE);
    }
}
