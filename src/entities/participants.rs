use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 参与者实体
/// 说明:
/// - 由登记接口创建，之后只读
/// - (campaign_id, code) 唯一
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "participants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub campaign_id: String,
    /// 兑换码 (大写)
    pub code: String,
    pub name: String,
    /// 身份号 (仅保留数字和 K)
    pub rut: String,
    pub phone: String,
    pub email: Option<String>,
    pub comuna: String,
    pub preferred_model: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
