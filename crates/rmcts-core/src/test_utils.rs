//! テスト用の台本局面
//!
//! キー → ノード（指し手一覧・王手フラグ・静的評価）の表で局面木を記述する。
//! 指し手の種類（捕獲・成り・王手・SEE・合法性）は台本に書いた値をそのまま返す。

use std::collections::HashMap;

use crate::eval::{LeafEvaluator, StaticEval};
use crate::movegen::{ExtMoveBuffer, GenType};
use crate::position::Position;
use crate::search::HistoryTables;
use crate::types::{Color, Depth, Move, Piece, PieceType, Square, Value};

/// 駒種ごとの価値（index = PieceType）
const PIECE_VALUES: [i32; 6] = [0, 100, 300, 350, 500, 900];

/// 台本の1手
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScriptMove {
    pub mv: Move,
    pub piece: PieceType,
    pub captured: PieceType,
    pub see: i32,
    pub gives_check: bool,
    pub legal: bool,
    pub child: Option<u64>,
}

impl ScriptMove {
    pub fn quiet(from: u8, to: u8) -> Self {
        Self {
            mv: Move::new(Square::new(from), Square::new(to)),
            piece: PieceType::new(1),
            captured: PieceType::NONE,
            see: 0,
            gives_check: false,
            legal: true,
            child: None,
        }
    }

    pub fn capture(from: u8, to: u8, captured: u8) -> Self {
        let captured = PieceType::new(captured);
        Self {
            captured,
            see: PIECE_VALUES[captured.index()],
            ..Self::quiet(from, to)
        }
    }

    pub fn promotion(from: u8, to: u8) -> Self {
        Self {
            mv: Move::new_promotion(Square::new(from), Square::new(to)),
            ..Self::quiet(from, to)
        }
    }

    pub fn piece(mut self, pt: u8) -> Self {
        self.piece = PieceType::new(pt);
        self
    }

    pub fn see(mut self, see: i32) -> Self {
        self.see = see;
        self
    }

    pub fn checking(mut self) -> Self {
        self.gives_check = true;
        self
    }

    pub fn illegal(mut self) -> Self {
        self.legal = false;
        self
    }

    pub fn to(mut self, child: u64) -> Self {
        self.child = Some(child);
        self
    }

    fn is_capture(&self) -> bool {
        !self.captured.is_none()
    }
}

/// 台本の1局面
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptNode {
    pub in_check: bool,
    pub eval: i32,
    pub moves: Vec<ScriptMove>,
}

impl ScriptNode {
    pub fn new(eval: i32) -> Self {
        Self {
            eval,
            ..Self::default()
        }
    }

    pub fn in_check(mut self) -> Self {
        self.in_check = true;
        self
    }

    pub fn with(mut self, m: ScriptMove) -> Self {
        self.moves.push(m);
        self
    }
}

/// 台本局面
///
/// 台本にないキーは「指し手なし・王手なし・評価0」の局面として扱う。
pub(crate) struct ScriptedPosition {
    nodes: HashMap<u64, ScriptNode>,
    empty: ScriptNode,
    keys: Vec<u64>,
    played: Vec<Move>,
    pub do_move_count: usize,
}

impl ScriptedPosition {
    pub fn new(root_key: u64) -> Self {
        Self {
            nodes: HashMap::new(),
            empty: ScriptNode::default(),
            keys: vec![root_key],
            played: Vec::new(),
            do_move_count: 0,
        }
    }

    pub fn node(mut self, key: u64, node: ScriptNode) -> Self {
        self.nodes.insert(key, node);
        self
    }

    /// 現在の局面
    pub fn current(&self) -> &ScriptNode {
        self.nodes.get(&self.key()).unwrap_or(&self.empty)
    }

    /// 進めた手数
    pub fn game_ply(&self) -> usize {
        self.played.len()
    }

    fn find(&self, m: Move) -> Option<&ScriptMove> {
        self.current().moves.iter().find(|sm| sm.mv == m)
    }

    fn color_of(&self, pt: PieceType, own: bool) -> Piece {
        let us = self.side_to_move();
        Piece::new(if own { us } else { !us }, pt)
    }

    fn child_key(&self, m: Move) -> u64 {
        match self.find(m).and_then(|sm| sm.child) {
            Some(child) => child,
            None => self
                .key()
                .wrapping_mul(0x9E37_79B9_7F4A_7C15)
                .wrapping_add(m.raw() as u64 + 1),
        }
    }
}

impl Position for ScriptedPosition {
    fn side_to_move(&self) -> Color {
        if self.played.len() % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    fn in_check(&self) -> bool {
        self.current().in_check
    }

    fn key(&self) -> u64 {
        *self.keys.last().unwrap()
    }

    fn structure_key(&self) -> u64 {
        self.key().rotate_left(17) ^ 0x5555
    }

    fn piece_on(&self, sq: Square) -> Piece {
        for sm in &self.current().moves {
            if sm.mv.to() == sq && sm.is_capture() {
                return self.color_of(sm.captured, false);
            }
            if sm.mv.from() == sq {
                return self.color_of(sm.piece, true);
            }
        }
        Piece::NONE
    }

    fn moved_piece(&self, m: Move) -> Piece {
        self.find(m)
            .map(|sm| self.color_of(sm.piece, true))
            .unwrap_or(Piece::NONE)
    }

    fn piece_value(&self, pc: Piece) -> i32 {
        PIECE_VALUES
            .get(pc.piece_type().index())
            .copied()
            .unwrap_or(1000)
    }

    fn is_capture(&self, m: Move) -> bool {
        self.find(m).is_some_and(|sm| sm.is_capture())
    }

    fn pseudo_legal(&self, m: Move) -> bool {
        self.find(m).is_some()
    }

    fn legal(&self, m: Move) -> bool {
        self.find(m).is_some_and(|sm| sm.legal)
    }

    fn see_ge(&self, m: Move, threshold: Value) -> bool {
        self.find(m).is_some_and(|sm| sm.see >= threshold.raw())
    }

    fn generate(&self, gen_type: GenType, moves: &mut ExtMoveBuffer) {
        let in_check = self.current().in_check;
        for sm in &self.current().moves {
            let take = match gen_type {
                GenType::Captures => sm.is_capture(),
                GenType::CapturesProPlus => sm.is_capture() || sm.mv.is_promotion(),
                GenType::Quiets => !sm.is_capture(),
                GenType::Evasions => in_check,
                GenType::QuietChecks => !sm.is_capture() && sm.gives_check,
            };
            if take {
                moves.push_move(sm.mv);
            }
        }
    }

    fn do_move(&mut self, m: Move) {
        let child = self.child_key(m);
        self.keys.push(child);
        self.played.push(m);
        self.do_move_count += 1;
    }

    fn undo_move(&mut self, m: Move) {
        assert_eq!(self.played.pop(), Some(m), "undo_move out of order");
        self.keys.pop();
    }
}

/// 台本の評価値をそのまま返す評価器
pub(crate) struct ScriptEval;

impl StaticEval<ScriptedPosition> for ScriptEval {
    fn static_eval(&self, pos: &ScriptedPosition) -> Value {
        Value::new(pos.current().eval)
    }
}

impl LeafEvaluator<ScriptedPosition> for ScriptEval {
    fn evaluate(
        &mut self,
        pos: &mut ScriptedPosition,
        _history: &HistoryTables,
        _depth: Depth,
    ) -> Value {
        Value::new(pos.current().eval)
    }
}
