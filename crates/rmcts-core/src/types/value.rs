//! 評価値（Value）
//!
//! 値のスケールは centipawn 相当で、`Value::MATE` 付近を詰みスコアとして予約している。
//! `Value::KNOWN_WIN` は「ほぼ勝ち」を表す飽和値で、報酬→評価値変換のクランプに使う。

/// 評価値
///
/// 通常の局面評価と、詰み表現（`mate_in` / `mated_in` 系）を同一の整数スケールで扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Value(i32);

impl Value {
    /// ゼロ
    pub const ZERO: Value = Value(0);
    /// 引き分け
    pub const DRAW: Value = Value(0);
    /// 勝勢確定とみなす値
    pub const KNOWN_WIN: Value = Value(10000);
    /// 詰み（勝ち側の最大スコア）
    pub const MATE: Value = Value(32000);
    /// 無限大
    pub const INFINITE: Value = Value(32001);

    /// 最大探索深度内での詰みスコア
    pub const MATE_IN_MAX_PLY: Value = Value(Self::MATE.0 - crate::types::MAX_PLY as i32);
    /// 最大探索深度内での詰まされスコア
    pub const MATED_IN_MAX_PLY: Value = Value(-Self::MATE_IN_MAX_PLY.0);

    /// 値から生成
    #[inline]
    pub const fn new(v: i32) -> Value {
        Value(v)
    }

    /// ply手で詰ますスコア
    #[inline]
    pub const fn mate_in(ply: i32) -> Value {
        Value(Self::MATE.0 - ply)
    }

    /// ply手で詰まされるスコア
    #[inline]
    pub const fn mated_in(ply: i32) -> Value {
        Value(-Self::MATE.0 + ply)
    }

    /// 勝ちスコアかどうか
    #[inline]
    pub const fn is_win(self) -> bool {
        self.0 >= Self::MATE_IN_MAX_PLY.0
    }

    /// 負けスコアかどうか
    #[inline]
    pub const fn is_loss(self) -> bool {
        self.0 <= Self::MATED_IN_MAX_PLY.0
    }

    /// 詰みスコア（勝ちまたは負け）かどうか
    #[inline]
    pub const fn is_mate_score(self) -> bool {
        self.is_win() || self.is_loss()
    }

    /// 生の値を取得
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::ZERO
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    #[inline]
    fn neg(self) -> Value {
        Value(-self.0)
    }
}

impl std::ops::Add for Value {
    type Output = Value;

    #[inline]
    fn add(self, rhs: Value) -> Value {
        Value(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Value {
    type Output = Value;

    #[inline]
    fn sub(self, rhs: Value) -> Value {
        Value(self.0 - rhs.0)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value(v)
    }
}

impl From<Value> for i32 {
    fn from(v: Value) -> i32 {
        v.0
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_win() {
            write!(f, "mate {}", Self::MATE.0 - self.0)
        } else if self.is_loss() {
            write!(f, "mate -{}", self.0 + Self::MATE.0)
        } else {
            write!(f, "cp {}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_constants() {
        assert_eq!(Value::ZERO.raw(), 0);
        assert_eq!(Value::KNOWN_WIN.raw(), 10000);
        assert!(Value::KNOWN_WIN < Value::MATE_IN_MAX_PLY);
        assert!(!Value::KNOWN_WIN.is_mate_score());
    }

    #[test]
    fn test_value_mate_in_mated_in() {
        let v = Value::mate_in(5);
        assert!(v.is_win());
        assert!(!v.is_loss());

        let v = Value::mated_in(3);
        assert!(v.is_loss());
        assert_eq!(-Value::mated_in(3), Value::mate_in(3));
    }

    #[test]
    fn test_value_ordering() {
        assert!(Value::MATE > Value::ZERO);
        assert!(Value::ZERO > Value::mated_in(1));
        assert!(Value::mate_in(1) > Value::mate_in(10));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::new(-35).to_string(), "cp -35");
        assert_eq!(Value::mate_in(3).to_string(), "mate 3");
        assert_eq!(Value::mated_in(2).to_string(), "mate -2");
    }
}
