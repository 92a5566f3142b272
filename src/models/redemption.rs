use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::Prize;

/// 兑换请求（现场终端提交参与者兑换码）
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RedeemRequest {
    #[schema(example = "K7QM")]
    pub code: String,
}

/// 兑换结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RedeemResponse {
    /// 分配的奖品
    pub prize: Prize,
    /// 是否为该参与者的首次分配；重复提交时为 false 且奖品与首次一致
    pub first_time: bool,
    /// 抽奖所属的活动当地日期
    pub day_key: String,
}
