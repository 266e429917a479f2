//! 評価値 ⇔ 報酬（勝率）の変換
//!
//! 報酬は [0, 1] の勝率で、手番側から見た値。評価値 ±600 が勝率 0.75 / 0.25 に対応する。

use crate::types::Value;

/// ロジスティック関数の係数
const K: f64 = -0.00183102048111;

/// 逆変換の係数（-1 / K）
const INV_K: f64 = 546.14353597715121;

/// 評価値 → 報酬
///
/// `1 / (1 + exp(K * v))`
#[inline]
pub fn value_to_reward(v: Value) -> f64 {
    1.0 / (1.0 + (K * v.raw() as f64).exp())
}

/// 報酬 → 評価値
///
/// [0.01, 0.99] の外は `±Value::KNOWN_WIN` に飽和させる。
pub fn reward_to_value(r: f64) -> Value {
    if r > 0.99 {
        Value::KNOWN_WIN
    } else if r < 0.01 {
        -Value::KNOWN_WIN
    } else {
        Value::new((INV_K * (r / (1.0 - r)).ln()) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-3;

    #[test]
    fn test_value_to_reward_reference_points() {
        assert!((value_to_reward(Value::ZERO) - 0.5).abs() < 1e-12);
        assert!((value_to_reward(Value::new(600)) - 0.75).abs() < EPS);
        assert!((value_to_reward(Value::new(-600)) - 0.25).abs() < EPS);
    }

    #[test]
    fn test_value_to_reward_is_monotonic_and_symmetric() {
        let mut prev = 0.0;
        for v in (-3000..=3000).step_by(100) {
            let r = value_to_reward(Value::new(v));
            assert!(r > prev);
            assert!((r + value_to_reward(Value::new(-v)) - 1.0).abs() < 1e-9);
            prev = r;
        }
    }

    #[test]
    fn test_reward_to_value_inverts() {
        for v in [-2000, -600, -35, 0, 1, 250, 600, 2000] {
            let back = reward_to_value(value_to_reward(Value::new(v))).raw();
            assert!((back - v).abs() <= 1, "v={v} back={back}");
        }
    }

    #[test]
    fn test_reward_to_value_saturates() {
        assert_eq!(reward_to_value(0.995), Value::KNOWN_WIN);
        assert_eq!(reward_to_value(1.0), Value::KNOWN_WIN);
        assert_eq!(reward_to_value(0.005), -Value::KNOWN_WIN);
        assert_eq!(reward_to_value(0.0), -Value::KNOWN_WIN);
        assert_eq!(reward_to_value(0.5), Value::ZERO);
    }
}
