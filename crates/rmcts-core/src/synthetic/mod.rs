//! 疑似乱数で作る決定的なゲーム木
//!
//! 盤面ルールを持たない代わりに、局面キーから乱数を種付けして指し手一覧を生成する。
//! 同じ `seed` なら同じ木になるので、CLI の計測やテストで使える。
//!
//! - 指し手: 移動元 0..40 の升（局面内で重複なし）、移動先 40..81 の升
//! - 捕獲・成り・王手・SEE・非合法手の有無は局面ごとに乱数で決める
//! - 王手をかける手の先の局面は王手がかかった局面になる
//! - ルート以外は `terminal_rate` の確率で指し手なし（終局）になる

use anyhow::{ensure, Result};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::eval::StaticEval;
use crate::movegen::{ExtMoveBuffer, GenType};
use crate::position::Position;
use crate::types::{Color, Move, Piece, PieceType, Square, Value};

/// 1局面の最大指し手数（移動元の升の数）
pub const MAX_SYNTHETIC_BRANCHING: usize = 40;

/// 駒種ごとの価値（index = PieceType）
const PIECE_VALUES: [i32; 6] = [0, 100, 320, 330, 500, 900];

/// 駒種の最大値
const MAX_PIECE_TYPE: u8 = 5;

const STRUCTURE_SALT: u64 = 0xA5A5_5A5A_C3C3_3C3C;

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

fn value_of(pt: PieceType) -> i32 {
    PIECE_VALUES.get(pt.index()).copied().unwrap_or(0)
}

// =============================================================================
// 設定
// =============================================================================

/// 合成ゲームの生成パラメータ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    /// 木全体の乱数シード
    pub seed: u64,
    /// 1局面の最小指し手数（ルート以外は終局になりうる）
    pub min_branching: usize,
    /// 1局面の最大指し手数
    pub max_branching: usize,
    /// 駒を取る手の割合
    pub capture_rate: f64,
    /// 駒を取らない手のうち成りの割合
    pub promotion_rate: f64,
    /// 王手をかける手の割合
    pub check_rate: f64,
    /// 指し手のない局面の割合
    pub terminal_rate: f64,
    /// 擬似合法だが非合法な手の割合
    pub illegal_rate: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            min_branching: 2,
            max_branching: 8,
            capture_rate: 0.3,
            promotion_rate: 0.1,
            check_rate: 0.1,
            terminal_rate: 0.05,
            illegal_rate: 0.05,
        }
    }
}

impl SyntheticConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.min_branching >= 1, "min_branching must be at least 1");
        ensure!(
            self.min_branching <= self.max_branching,
            "min_branching ({}) must not exceed max_branching ({})",
            self.min_branching,
            self.max_branching
        );
        ensure!(
            self.max_branching <= MAX_SYNTHETIC_BRANCHING,
            "max_branching must be at most {MAX_SYNTHETIC_BRANCHING}, got {}",
            self.max_branching
        );
        for (name, rate) in [
            ("capture_rate", self.capture_rate),
            ("promotion_rate", self.promotion_rate),
            ("check_rate", self.check_rate),
            ("terminal_rate", self.terminal_rate),
            ("illegal_rate", self.illegal_rate),
        ] {
            ensure!((0.0..=1.0).contains(&rate), "{name} must be in [0, 1], got {rate}");
        }
        Ok(())
    }
}

// =============================================================================
// 局面
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct SyntheticMove {
    mv: Move,
    piece: PieceType,
    captured: PieceType,
    see: i32,
    gives_check: bool,
    legal: bool,
}

impl SyntheticMove {
    fn is_capture(&self) -> bool {
        !self.captured.is_none()
    }
}

#[derive(Debug, Clone)]
struct NodeState {
    key: u64,
    structure_key: u64,
    in_check: bool,
    /// 先手から見た駒得
    material: i32,
    /// 直前の指し手で動いた駒（移動先の升と駒）
    last_moved: Option<(Square, Piece)>,
    moves: Vec<SyntheticMove>,
}

/// 合成ゲームの局面
pub struct SyntheticPosition {
    config: SyntheticConfig,
    states: Vec<NodeState>,
    played: Vec<Move>,
}

impl SyntheticPosition {
    /// `config.seed` から決まるルート局面
    pub fn new(config: SyntheticConfig) -> Result<Self> {
        config.validate()?;
        let mut pos = Self {
            config,
            states: Vec::with_capacity(64),
            played: Vec::with_capacity(64),
        };
        let root = pos.generate_state(splitmix64(config.seed), false, 0, None);
        pos.states.push(root);
        Ok(pos)
    }

    pub fn config(&self) -> &SyntheticConfig {
        &self.config
    }

    /// ルートから進めた手数
    pub fn game_ply(&self) -> usize {
        self.played.len()
    }

    /// 先手から見た駒得
    pub fn material(&self) -> i32 {
        self.state().material
    }

    /// 現局面の合法手（生成順）
    pub fn legal_moves(&self) -> Vec<Move> {
        self.state().moves.iter().filter(|sm| sm.legal).map(|sm| sm.mv).collect()
    }

    fn state(&self) -> &NodeState {
        // ルートは new で必ず積まれ、undo_move でも取り除かれない
        &self.states[self.states.len() - 1]
    }

    fn find(&self, m: Move) -> Option<&SyntheticMove> {
        self.state().moves.iter().find(|sm| sm.mv == m)
    }

    fn generate_state(
        &self,
        key: u64,
        in_check: bool,
        material: i32,
        last_moved: Option<(Square, Piece)>,
    ) -> NodeState {
        let cfg = &self.config;
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(key);
        let is_root = self.states.is_empty();

        let count = if !is_root && rng.random_bool(cfg.terminal_rate) {
            0
        } else {
            rng.random_range(cfg.min_branching..=cfg.max_branching)
        };

        let mut moves = Vec::with_capacity(count);
        for i in 0..count {
            let from = Square::new(i as u8);
            let to = Square::new(rng.random_range(MAX_SYNTHETIC_BRANCHING as u8..Square::NUM as u8));
            let piece = PieceType::new(rng.random_range(1..=MAX_PIECE_TYPE));

            let (mv, captured) = if rng.random_bool(cfg.capture_rate) {
                let captured = PieceType::new(rng.random_range(1..=MAX_PIECE_TYPE));
                (Move::new(from, to), captured)
            } else if rng.random_bool(cfg.promotion_rate) {
                (Move::new_promotion(from, to), PieceType::NONE)
            } else {
                (Move::new(from, to), PieceType::NONE)
            };

            // 取り返されるなら動かした駒を失う
            let recaptured = rng.random_bool(0.5);
            let see = value_of(captured) - if recaptured { value_of(piece) } else { 0 };

            moves.push(SyntheticMove {
                mv,
                piece,
                captured,
                see,
                gives_check: rng.random_bool(cfg.check_rate),
                legal: !rng.random_bool(cfg.illegal_rate),
            });
        }

        NodeState {
            key,
            structure_key: splitmix64(key ^ STRUCTURE_SALT),
            in_check,
            material,
            last_moved,
            moves,
        }
    }
}

impl Position for SyntheticPosition {
    fn side_to_move(&self) -> Color {
        if self.played.len() % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    fn in_check(&self) -> bool {
        self.state().in_check
    }

    fn key(&self) -> u64 {
        self.state().key
    }

    fn structure_key(&self) -> u64 {
        self.state().structure_key
    }

    fn piece_on(&self, sq: Square) -> Piece {
        let us = self.side_to_move();
        let state = self.state();
        if let Some((to, pc)) = state.last_moved {
            if to == sq {
                return pc;
            }
        }
        for sm in &state.moves {
            if sm.mv.from() == sq {
                return Piece::new(us, sm.piece);
            }
            if sm.mv.to() == sq && sm.is_capture() {
                return Piece::new(!us, sm.captured);
            }
        }
        Piece::NONE
    }

    fn moved_piece(&self, m: Move) -> Piece {
        self.find(m)
            .map_or(Piece::NONE, |sm| Piece::new(self.side_to_move(), sm.piece))
    }

    fn piece_value(&self, pc: Piece) -> i32 {
        value_of(pc.piece_type())
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
        let state = self.state();
        for sm in &state.moves {
            let take = match gen_type {
                GenType::Captures => sm.is_capture(),
                GenType::CapturesProPlus => sm.is_capture() || sm.mv.is_promotion(),
                GenType::Quiets => !sm.is_capture(),
                GenType::Evasions => state.in_check && sm.legal,
                GenType::QuietChecks => !sm.is_capture() && sm.gives_check,
            };
            if take {
                moves.push_move(sm.mv);
            }
        }
    }

    fn do_move(&mut self, m: Move) {
        let us = self.side_to_move();
        let state = self.state();
        let sm = self.find(m).copied();
        debug_assert!(sm.is_some(), "do_move: {m} is not pseudo-legal");

        let (piece, captured, gives_check) =
            sm.map_or((PieceType::NONE, PieceType::NONE, false), |sm| {
                (sm.piece, sm.captured, sm.gives_check)
            });
        let gain = value_of(captured);
        let material = state.material + if us == Color::Black { gain } else { -gain };
        let key = splitmix64(state.key ^ u64::from(m.raw()).wrapping_mul(0x9E37_79B9_7F4A_7C15));

        let child = self.generate_state(key, gives_check, material, Some((m.to(), Piece::new(us, piece))));
        self.states.push(child);
        self.played.push(m);
    }

    fn undo_move(&mut self, m: Move) {
        let last = self.played.pop();
        debug_assert_eq!(last, Some(m), "undo_move out of order");
        if last.is_some() {
            self.states.pop();
        }
    }
}

// =============================================================================
// 評価
// =============================================================================

/// 駒得 + 局面キー由来の小さな揺らぎ
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticEval;

impl StaticEval<SyntheticPosition> for SyntheticEval {
    fn static_eval(&self, pos: &SyntheticPosition) -> Value {
        let material = match pos.side_to_move() {
            Color::Black => pos.material(),
            Color::White => -pos.material(),
        };
        let noise = (pos.key() >> 40) as i32 % 33 - 16;
        Value::new(material + noise)
    }
}
