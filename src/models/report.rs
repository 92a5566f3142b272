use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

use crate::entities::Prize;

/// 每个奖品的计数，始终包含全部固定奖品
pub type PrizeCounts = BTreeMap<Prize, u64>;

pub fn empty_counts() -> PrizeCounts {
    Prize::ALL.into_iter().map(|p| (p, 0)).collect()
}

/// 日报查询参数 (YYYY-MM-DD)，缺省时使用活动配置或今天
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DailyReportQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// 单日统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DayReport {
    pub day_key: String,
    pub total: u64,
    #[schema(value_type = Object)]
    pub counts: PrizeCounts,
}

impl DayReport {
    pub fn empty(day_key: String) -> Self {
        Self {
            day_key,
            total: 0,
            counts: empty_counts(),
        }
    }

    pub fn record(&mut self, prize: Prize) {
        *self.counts.entry(prize).or_insert(0) += 1;
        self.total += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportTotals {
    pub total: u64,
    #[schema(value_type = Object)]
    pub counts: PrizeCounts,
}

/// 区间日报：没有抽奖的日期不会出现在 days 中
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyReport {
    pub from: String,
    pub to: String,
    pub prizes: Vec<Prize>,
    pub days: Vec<DayReport>,
    pub totals: ReportTotals,
}
