use crate::database::is_unique_violation;
use crate::entities::{Prize, draw_entity as draws};
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use thiserror::Error;

/// 待写入的抽奖记录
#[derive(Debug, Clone)]
pub struct NewDraw {
    pub campaign_id: String,
    pub participant_id: i32,
    pub prize: Prize,
    pub day_key: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum InsertDrawError {
    /// (campaign_id, participant_id) 唯一约束冲突：已有其他请求先写入
    #[error("Draw already exists for this participant")]
    Conflict,

    #[error("Storage error: {0}")]
    Storage(#[from] DbErr),
}

/// 抽奖记录表（只追加）
///
/// 每个参与者最多一条记录由数据库唯一索引保证，这里不做先读后写的模拟。
#[derive(Clone)]
pub struct DrawLedger {
    pool: DatabaseConnection,
}

impl DrawLedger {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn find_draw(
        &self,
        campaign_id: &str,
        participant_id: i32,
    ) -> AppResult<Option<draws::Model>> {
        let draw = draws::Entity::find()
            .filter(draws::Column::CampaignId.eq(campaign_id))
            .filter(draws::Column::ParticipantId.eq(participant_id))
            .one(&self.pool)
            .await?;
        Ok(draw)
    }

    pub async fn insert_draw(&self, draw: NewDraw) -> Result<draws::Model, InsertDrawError> {
        let result = draws::ActiveModel {
            campaign_id: Set(draw.campaign_id),
            participant_id: Set(draw.participant_id),
            prize: Set(draw.prize),
            day_key: Set(draw.day_key),
            created_at: Set(draw.created_at),
            ..Default::default()
        }
        .insert(&self.pool)
        .await;

        match result {
            Ok(model) => Ok(model),
            Err(err) if is_unique_violation(&err) => Err(InsertDrawError::Conflict),
            Err(err) => Err(InsertDrawError::Storage(err)),
        }
    }

    /// 按日期区间 [from_day, to_day] 列出记录，按日期、写入顺序排序
    pub async fn list_draws(
        &self,
        campaign_id: &str,
        from_day: &str,
        to_day: &str,
    ) -> AppResult<Vec<draws::Model>> {
        let list = draws::Entity::find()
            .filter(draws::Column::CampaignId.eq(campaign_id))
            .filter(draws::Column::DayKey.gte(from_day))
            .filter(draws::Column::DayKey.lte(to_day))
            .order_by_asc(draws::Column::DayKey)
            .order_by_asc(draws::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list)
    }
}
