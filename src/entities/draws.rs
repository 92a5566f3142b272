use super::Prize;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 抽奖记录实体
/// 说明:
/// - 每个参与者在同一活动内最多一条 (唯一索引 campaign_id + participant_id)
/// - day_key 为活动当地日期 (YYYY-MM-DD)，用于按天报表
/// - 只由兑换流程写入，写入后不再修改
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "draws")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub campaign_id: String,
    pub participant_id: i32,
    pub prize: Prize,
    pub day_key: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
