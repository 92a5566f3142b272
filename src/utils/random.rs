use rand::Rng;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

/// 抽奖用随机源：返回 [0, 1) 区间内的均匀随机数
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// 线程本地 RNG（生产环境使用）
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().r#gen::<f64>()
    }
}

/// 按固定序列循环返回的随机源，测试中用于复现特定抽奖结果
#[cfg(test)]
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: AtomicUsize,
}

#[cfg(test)]
impl SequenceRandom {
    /// 超出 [0, 1) 的值会被截断到区间内
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() {
            vec![0.0]
        } else {
            values
                .into_iter()
                .map(|v| if v.is_finite() { v.clamp(0.0, MAX_UNIT) } else { 0.0 })
                .collect()
        };
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }
}

/// 小于 1 的最大 f64
#[cfg(test)]
const MAX_UNIT: f64 = 1.0 - f64::EPSILON / 2.0;

#[cfg(test)]
impl RandomSource for SequenceRandom {
    fn next_unit(&self) -> f64 {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.values[i % self.values.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_in_unit_interval() {
        let source = ThreadRandom;
        for _ in 0..1000 {
            let v = source.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_sequence_random_cycles_and_clamps() {
        let source = SequenceRandom::new(vec![0.1, 2.0, -1.0]);
        assert_eq!(source.next_unit(), 0.1);
        assert!(source.next_unit() < 1.0);
        assert_eq!(source.next_unit(), 0.0);
        assert_eq!(source.next_unit(), 0.1);
    }
}
