//! 升（Square）と指し手（Move）
//!
//! 指し手は16bitに詰める:
//!
//! | bit    | 内容             |
//! |--------|------------------|
//! | 0..7   | 移動元 (from)    |
//! | 7..14  | 移動先 (to)      |
//! | 14     | 成りフラグ       |
//! | 15     | 特殊手フラグ     |
//!
//! `from == to == 0` の `Move::NONE` を番兵として予約する。

use std::fmt;

/// 升（0..81）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// 升の数
    pub const NUM: usize = 81;

    /// インデックスから生成
    #[inline]
    pub const fn new(index: u8) -> Square {
        debug_assert!((index as usize) < Self::NUM);
        Square(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// 指し手
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Move(u16);

impl Move {
    /// 指し手なし（番兵）
    pub const NONE: Move = Move(0);

    const TO_SHIFT: u32 = 7;
    const SQ_MASK: u16 = 0x7F;
    const PROMOTE_FLAG: u16 = 1 << 14;
    const SPECIAL_FLAG: u16 = 1 << 15;

    /// 通常の指し手
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move(from.raw() as u16 | ((to.raw() as u16) << Self::TO_SHIFT))
    }

    /// 成る指し手
    #[inline]
    pub const fn new_promotion(from: Square, to: Square) -> Move {
        Move(Self::new(from, to).0 | Self::PROMOTE_FLAG)
    }

    /// 特殊手（キャスリング・アンパッサン・駒打ち等、ゲーム依存）
    #[inline]
    pub const fn new_special(from: Square, to: Square) -> Move {
        Move(Self::new(from, to).0 | Self::SPECIAL_FLAG)
    }

    /// 生の値から生成
    #[inline]
    pub const fn from_raw(raw: u16) -> Move {
        Move(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// 移動元
    #[inline]
    pub const fn from(self) -> Square {
        Square((self.0 & Self::SQ_MASK) as u8)
    }

    /// 移動先
    #[inline]
    pub const fn to(self) -> Square {
        Square(((self.0 >> Self::TO_SHIFT) & Self::SQ_MASK) as u8)
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.0 & Self::PROMOTE_FLAG != 0
    }

    #[inline]
    pub const fn is_special(self) -> bool {
        self.0 & Self::SPECIAL_FLAG != 0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }

    /// ButterflyHistory 用の from_to インデックス
    #[inline]
    pub const fn from_to(self) -> usize {
        self.from().index() * Square::NUM + self.to().index()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Move {
    /// `12-47`, 成りは `12-47+`、特殊手は `12-47*`、番兵は `none`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("none");
        }
        write!(f, "{}-{}", self.from().raw(), self.to().raw())?;
        if self.is_promotion() {
            f.write_str("+")?;
        }
        if self.is_special() {
            f.write_str("*")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_fields() {
        let m = Move::new(Square::new(12), Square::new(80));
        assert_eq!(m.from(), Square::new(12));
        assert_eq!(m.to(), Square::new(80));
        assert!(!m.is_promotion());
        assert!(m.is_some());

        let p = Move::new_promotion(Square::new(3), Square::new(4));
        assert!(p.is_promotion());
        assert!(!p.is_special());
        assert_ne!(p, Move::new(Square::new(3), Square::new(4)));
    }

    #[test]
    fn test_move_none() {
        assert!(Move::NONE.is_none());
        assert_eq!(Move::default(), Move::NONE);
        assert_eq!(Move::NONE.to_string(), "none");
    }

    #[test]
    fn test_from_to_index_in_range() {
        let m = Move::new(Square::new(80), Square::new(80));
        assert_eq!(m.from_to(), Square::NUM * Square::NUM - 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::new(Square::new(1), Square::new(42)).to_string(), "1-42");
        assert_eq!(Move::new_promotion(Square::new(1), Square::new(42)).to_string(), "1-42+");
        assert_eq!(Move::new_special(Square::new(1), Square::new(42)).to_string(), "1-42*");
    }
}
