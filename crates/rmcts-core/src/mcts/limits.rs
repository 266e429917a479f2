//! 探索の統計カウンタと停止条件
//!
//! - `UctCounters`: 反復ごとに増えるカウンタと経過時間
//! - `StopCondition`: 反復の先頭で1回だけ問い合わせる停止判定
//! - `SearchLimits`: 反復回数・プレイアウト数・思考時間による停止条件

use std::time::{Duration, Instant};

use serde::Serialize;

/// 探索の統計カウンタ
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UctCounters {
    /// 木の選択（降下）の回数
    pub descents: u64,
    /// プレイアウト（葉の評価）の回数
    pub playouts: u64,
    /// 選択中の `do_move` 回数
    pub do_moves: u64,
    /// 事前確率の計算回数
    pub priors: u64,
    /// テーブルから追い出されていて逆伝播できなかった段数
    pub stale_backups: u64,
    #[serde(skip)]
    start: Instant,
}

impl UctCounters {
    pub fn new() -> Self {
        Self {
            descents: 0,
            playouts: 0,
            do_moves: 0,
            priors: 0,
            stale_backups: 0,
            start: Instant::now(),
        }
    }

    /// 探索開始からの経過時間
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// 1秒あたりのプレイアウト数
    pub fn playouts_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.playouts as f64 / secs
        } else {
            0.0
        }
    }
}

impl Default for UctCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// 停止条件
pub trait StopCondition {
    /// 次の反復を始める前に呼ばれる。`true` なら探索を打ち切る
    fn should_stop(&mut self, counters: &UctCounters) -> bool;

    /// 停止条件が1つも設定されていないか
    fn is_unbounded(&self) -> bool {
        false
    }
}

impl<F> StopCondition for F
where
    F: FnMut(&UctCounters) -> bool,
{
    fn should_stop(&mut self, counters: &UctCounters) -> bool {
        self(counters)
    }
}

/// 探索制限条件
///
/// 各項目は 0 / `None` なら無効。複数指定した場合はどれか1つでも満たせば止まる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchLimits {
    /// 反復回数（0以外なら有効）
    pub iterations: u64,
    /// プレイアウト数（0以外なら有効）
    pub nodes: u64,
    /// 思考時間
    pub movetime: Option<Duration>,
}

impl SearchLimits {
    pub fn iterations(n: u64) -> Self {
        Self {
            iterations: n,
            ..Self::default()
        }
    }

    pub fn nodes(n: u64) -> Self {
        Self {
            nodes: n,
            ..Self::default()
        }
    }

    pub fn movetime(t: Duration) -> Self {
        Self {
            movetime: Some(t),
            ..Self::default()
        }
    }
}

impl StopCondition for SearchLimits {
    fn should_stop(&mut self, counters: &UctCounters) -> bool {
        if self.iterations != 0 && counters.descents >= self.iterations {
            return true;
        }
        if self.nodes != 0 && counters.playouts >= self.nodes {
            return true;
        }
        if let Some(movetime) = self.movetime {
            if counters.elapsed() >= movetime {
                return true;
            }
        }
        false
    }

    fn is_unbounded(&self) -> bool {
        self.iterations == 0 && self.nodes == 0 && self.movetime.is_none()
    }
}
