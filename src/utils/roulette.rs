//! 加权轮盘选择

use crate::entities::Prize;
use crate::utils::RandomSource;
use std::collections::BTreeMap;

/// 一次抽奖使用的完整权重快照（覆盖全部固定奖品）
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSet {
    weights: BTreeMap<Prize, f64>,
}

impl WeightSet {
    /// 所有奖品取默认平均权重
    pub fn even() -> Self {
        Self::from_pairs(std::iter::empty())
    }

    /// 由部分配置构建，缺失的奖品补默认权重
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Prize, f64)>) -> Self {
        let mut weights: BTreeMap<Prize, f64> = pairs.into_iter().collect();
        for prize in Prize::ALL {
            weights.entry(prize).or_insert_with(Prize::default_weight);
        }
        Self { weights }
    }

    pub fn get(&self, prize: Prize) -> f64 {
        self.weights
            .get(&prize)
            .copied()
            .unwrap_or_else(Prize::default_weight)
    }

    /// 按固定顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (Prize, f64)> + '_ {
        Prize::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    /// 正权重之和（非有限或非正的权重不计入）
    pub fn positive_total(&self) -> f64 {
        self.positive().sum()
    }

    fn positive(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|(_, w)| w).filter(|w| is_positive(*w))
    }

    /// 最大正权重；没有任何正权重时为 None
    fn max_positive(&self) -> Option<f64> {
        self.positive().reduce(f64::max)
    }
}

fn is_positive(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0
}

/// 累积权重轮盘：r = u * T，按固定顺序依次减去各奖品权重，
/// 第一个使余数 <= 0 的奖品中奖。权重为 0 的奖品永远不会被选中。
///
/// 只有全部权重 <= 0 时才退回平均分布。权重之和溢出时先按最大权重缩放，
/// 只有相对比例参与计算。
pub fn select_prize(weights: &WeightSet, random: &dyn RandomSource) -> Prize {
    let fallback;
    let (weights, max) = match weights.max_positive() {
        Some(max) => (weights, max),
        None => {
            log::warn!("No positive prize weight configured, falling back to even split");
            fallback = WeightSet::even();
            (&fallback, Prize::default_weight())
        }
    };

    let scale = if weights.positive_total().is_finite() {
        1.0
    } else {
        max
    };
    let total: f64 = weights.positive().map(|w| w / scale).sum();
    let mut remainder = random.next_unit() * total;
    let mut last_positive = None;

    for (prize, weight) in weights.iter() {
        if !is_positive(weight) {
            continue;
        }
        last_positive = Some(prize);
        remainder -= weight / scale;
        if remainder <= 0.0 {
            return prize;
        }
    }

    // 浮点误差导致余数残留时取最后一个有效奖品
    last_positive.unwrap_or(Prize::SigueParticipando)
}
