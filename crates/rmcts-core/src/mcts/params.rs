//! UCT の探索パラメータ
//!
//! CLI から JSON で表示・保存できるよう serde に対応する。

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::types::{Depth, MAX_PLY};

/// UCT の探索パラメータ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UctParams {
    /// UCB の探索項の係数 C
    pub exploration_constant: f64,
    /// ノードテーブルのスロット数
    pub node_table_size: usize,
    /// 展開時に MovePicker へ渡す深さ（静かな手の部分ソートの閾値に効く）
    pub expansion_depth: Depth,
    /// 事前確率を求める葉評価の深さ（0 = 静止探索のみ）
    pub prior_depth: Depth,
}

impl UctParams {
    pub const DEFAULT_EXPLORATION_CONSTANT: f64 = 10.0;
    pub const DEFAULT_NODE_TABLE_SIZE: usize = 1 << 16;
    pub const DEFAULT_EXPANSION_DEPTH: Depth = 30;

    /// 値の妥当性を検査
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.exploration_constant.is_finite() && self.exploration_constant >= 0.0,
            "exploration_constant must be a finite non-negative number (got {})",
            self.exploration_constant
        );
        ensure!(self.node_table_size > 0, "node_table_size must be positive");
        ensure!(
            self.expansion_depth > 0,
            "expansion_depth must be positive (got {})",
            self.expansion_depth
        );
        ensure!(
            (0..MAX_PLY as Depth).contains(&self.prior_depth),
            "prior_depth must be in 0..{MAX_PLY} (got {})",
            self.prior_depth
        );
        Ok(())
    }
}

impl Default for UctParams {
    fn default() -> Self {
        Self {
            exploration_constant: Self::DEFAULT_EXPLORATION_CONSTANT,
            node_table_size: Self::DEFAULT_NODE_TABLE_SIZE,
            expansion_depth: Self::DEFAULT_EXPANSION_DEPTH,
            prior_depth: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        let params = UctParams::default();
        assert_eq!(params.exploration_constant, 10.0);
        assert_eq!(params.node_table_size, 65536);
        assert_eq!(params.expansion_depth, 30);
        assert_eq!(params.prior_depth, 0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            UctParams { exploration_constant: -1.0, ..UctParams::default() },
            UctParams { exploration_constant: f64::NAN, ..UctParams::default() },
            UctParams { node_table_size: 0, ..UctParams::default() },
            UctParams { expansion_depth: 0, ..UctParams::default() },
            UctParams { prior_depth: -1, ..UctParams::default() },
        ];
        for params in bad {
            assert!(params.validate().is_err(), "{params:?}");
        }
    }

    #[test]
    fn test_validate_error_message() {
        let params = UctParams { node_table_size: 0, ..UctParams::default() };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("node_table_size"));
    }
}
