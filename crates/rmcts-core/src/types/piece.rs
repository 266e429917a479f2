//! 手番（Color）と駒（PieceType / Piece）
//!
//! 駒は `color << 4 | piece_type` の 5bit で表現する。盤面表現そのものは
//! `Position` 実装側の責務で、ここでは history テーブルの添字に必要な
//! 最小限の情報だけを持つ。

/// 手番（先手/後手）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    /// 手番の数
    pub const NUM: usize = 2;

    /// 相手番を返す
    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// 配列アクセス用インデックス
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}

/// 駒種（0 = なし, 1..=15）
///
/// 具体的な駒種の意味（歩・金など）はゲーム側で決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct PieceType(u8);

impl PieceType {
    /// 駒種の数（NONE含む）
    pub const NUM: usize = 16;

    /// 駒なし
    pub const NONE: PieceType = PieceType(0);

    /// 値から生成
    #[inline]
    pub const fn new(v: u8) -> PieceType {
        debug_assert!((v as usize) < Self::NUM);
        PieceType(v)
    }

    /// 生の値
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// 先後付きの駒
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    /// 駒の数（NONE含む）
    pub const NUM: usize = Color::NUM * PieceType::NUM;

    /// 駒なし
    pub const NONE: Piece = Piece(0);

    /// 手番と駒種から生成
    #[inline]
    pub const fn new(color: Color, pt: PieceType) -> Piece {
        if pt.is_none() {
            return Piece::NONE;
        }
        Piece(((color as u8) << 4) | pt.raw())
    }

    /// 駒種
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        PieceType(self.0 & 0x0F)
    }

    /// 手番（NONEに対しては意味を持たない）
    #[inline]
    pub const fn color(self) -> Color {
        if self.0 & 0x10 != 0 { Color::White } else { Color::Black }
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }
}
