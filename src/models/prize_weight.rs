use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::Prize;

/// 单个奖品的权重输入；prize 为原始字符串，由服务端校验是否属于固定集合
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PrizeWeightInput {
    #[schema(example = "MANTA")]
    pub prize: String,
    #[schema(example = 20.0)]
    pub weight: f64,
}

/// 更新权重请求（可只包含部分奖品）
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdatePrizeWeightsRequest {
    pub items: Vec<PrizeWeightInput>,
}

/// 奖品当前权重
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PrizeWeightResponse {
    pub prize: Prize,
    pub weight: f64,
    /// 最近写入时间；从未配置（使用默认值）时为 null
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrizeWeightListResponse {
    pub items: Vec<PrizeWeightResponse>,
}
