use crate::entities::{Prize, prize_weight_entity as weights};
use crate::error::{AppError, AppResult};
use crate::models::{PrizeWeightInput, PrizeWeightResponse};
use crate::utils::WeightSet;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use std::collections::{BTreeMap, HashSet};

/// 权重表：按活动保存每个奖品的抽奖权重
#[derive(Clone)]
pub struct WeightService {
    pool: DatabaseConnection,
}

impl WeightService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 读取当前权重，缺失的奖品按默认平均权重补齐
    pub async fn get_weights(&self, campaign_id: &str) -> AppResult<WeightSet> {
        let rows = self.load_rows(campaign_id).await?;
        Ok(WeightSet::from_pairs(
            rows.into_iter().map(|(prize, row)| (prize, sanitize(row.weight))),
        ))
    }

    /// 权重列表（后台展示用），按固定奖品顺序返回全部奖品
    pub async fn list_weights(&self, campaign_id: &str) -> AppResult<Vec<PrizeWeightResponse>> {
        let rows = self.load_rows(campaign_id).await?;
        Ok(Prize::ALL
            .into_iter()
            .map(|prize| match rows.get(&prize) {
                Some(row) => PrizeWeightResponse {
                    prize,
                    weight: sanitize(row.weight),
                    updated_at: Some(row.updated_at),
                },
                None => PrizeWeightResponse {
                    prize,
                    weight: Prize::default_weight(),
                    updated_at: None,
                },
            })
            .collect())
    }

    /// 更新权重
    ///
    /// 逻辑:
    /// 1. 校验全部输入（奖品必须属于固定集合，权重为有限且 >= 0 的数），任何一项不合法则不写入
    /// 2. 未提交的奖品：已有配置保持不变，从未配置的写入默认权重
    /// 3. 提交的奖品按 (campaign_id, prize) upsert，后写覆盖
    pub async fn set_weights(
        &self,
        campaign_id: &str,
        items: &[PrizeWeightInput],
    ) -> AppResult<Vec<PrizeWeightResponse>> {
        let cleaned = validate_weight_input(items)?;
        let now = Utc::now();

        let supplied: HashSet<Prize> = cleaned.iter().map(|(p, _)| *p).collect();
        let defaults: Vec<weights::ActiveModel> = Prize::ALL
            .into_iter()
            .filter(|p| !supplied.contains(p))
            .map(|prize| weights::ActiveModel {
                campaign_id: Set(campaign_id.to_string()),
                prize: Set(prize),
                weight: Set(Prize::default_weight()),
                updated_at: Set(now),
                ..Default::default()
            })
            .collect();
        let updates: Vec<weights::ActiveModel> = cleaned
            .iter()
            .map(|(prize, weight)| weights::ActiveModel {
                campaign_id: Set(campaign_id.to_string()),
                prize: Set(*prize),
                weight: Set(*weight),
                updated_at: Set(now),
                ..Default::default()
            })
            .collect();

        let txn = self.pool.begin().await?;

        if !defaults.is_empty() {
            weights::Entity::insert_many(defaults)
                .on_conflict(
                    OnConflict::columns([weights::Column::CampaignId, weights::Column::Prize])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
        }

        weights::Entity::insert_many(updates)
            .on_conflict(
                OnConflict::columns([weights::Column::CampaignId, weights::Column::Prize])
                    .update_columns([weights::Column::Weight, weights::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        txn.commit().await?;

        log::info!(
            "Prize weights updated for campaign {}: {}",
            campaign_id,
            cleaned
                .iter()
                .map(|(p, w)| format!("{p}={w}"))
                .collect::<Vec<_>>()
                .join(", ")
        );

        self.list_weights(campaign_id).await
    }

    async fn load_rows(&self, campaign_id: &str) -> AppResult<BTreeMap<Prize, weights::Model>> {
        let rows = weights::Entity::find()
            .filter(weights::Column::CampaignId.eq(campaign_id))
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|r| (r.prize, r)).collect())
    }
}

/// 存储中出现的非法权重按 0 处理
fn sanitize(weight: f64) -> f64 {
    if weight.is_finite() && weight >= 0.0 {
        weight
    } else {
        0.0
    }
}

/// 校验权重输入，返回规范化后的 (奖品, 权重) 列表
pub fn validate_weight_input(items: &[PrizeWeightInput]) -> AppResult<Vec<(Prize, f64)>> {
    if items.is_empty() {
        return Err(AppError::ValidationError("items must not be empty".into()));
    }

    let mut seen = HashSet::new();
    let mut cleaned = Vec::with_capacity(items.len());
    for item in items {
        let prize = Prize::from_key(&item.prize).ok_or_else(|| {
            AppError::ValidationError(format!("Prize not allowed: {}", item.prize.trim()))
        })?;
        if !item.weight.is_finite() || item.weight < 0.0 {
            return Err(AppError::ValidationError(format!(
                "Invalid weight for {prize}: {}",
                item.weight
            )));
        }
        if !seen.insert(prize) {
            return Err(AppError::ValidationError(format!(
                "Duplicate prize in items: {prize}"
            )));
        }
        cleaned.push((prize, item.weight));
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CAMPAIGN, setup_db};

    fn input(prize: &str, weight: f64) -> PrizeWeightInput {
        PrizeWeightInput {
            prize: prize.to_string(),
            weight,
        }
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert!(validate_weight_input(&[]).is_err());
        assert!(validate_weight_input(&[input("MANTA", -1.0)]).is_err());
        assert!(validate_weight_input(&[input("MANTA", f64::NAN)]).is_err());
        assert!(validate_weight_input(&[input("GORRO", 10.0)]).is_err());
        assert!(validate_weight_input(&[input("MANTA", 1.0), input("manta", 2.0)]).is_err());

        let ok = validate_weight_input(&[input(" agua ", 0.0)]).unwrap();
        assert_eq!(ok, vec![(Prize::Agua, 0.0)]);
    }

    #[tokio::test]
    async fn test_get_weights_defaults_when_unconfigured() {
        let db = setup_db().await;
        let service = WeightService::new(db);

        let set = service.get_weights(CAMPAIGN).await.unwrap();
        assert_eq!(set, WeightSet::even());

        let listed = service.list_weights(CAMPAIGN).await.unwrap();
        assert_eq!(listed.len(), Prize::ALL.len());
        assert!(listed.iter().all(|w| w.weight == 20.0 && w.updated_at.is_none()));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_prior_values() {
        let db = setup_db().await;
        let service = WeightService::new(db);

        service
            .set_weights(CAMPAIGN, &[input("MANTA", 5.0), input("AGUA", 0.0)])
            .await
            .unwrap();
        // 未提交的奖品已落库为默认值
        let listed = service.list_weights(CAMPAIGN).await.unwrap();
        assert!(listed.iter().all(|w| w.updated_at.is_some()));

        service
            .set_weights(CAMPAIGN, &[input("BUFF", 70.0)])
            .await
            .unwrap();

        let set = service.get_weights(CAMPAIGN).await.unwrap();
        assert_eq!(set.get(Prize::Manta), 5.0);
        assert_eq!(set.get(Prize::Agua), 0.0);
        assert_eq!(set.get(Prize::Strap), 20.0);
        assert_eq!(set.get(Prize::Buff), 70.0);
        assert_eq!(set.get(Prize::SigueParticipando), 20.0);
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_table_unchanged() {
        let db = setup_db().await;
        let service = WeightService::new(db);

        service
            .set_weights(CAMPAIGN, &[input("STRAP", 40.0)])
            .await
            .unwrap();
        let before = service.list_weights(CAMPAIGN).await.unwrap();

        let err = service
            .set_weights(CAMPAIGN, &[input("MANTA", 10.0), input("STRAP", -5.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = service
            .set_weights(CAMPAIGN, &[input("GORRO", 10.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let after = service.list_weights(CAMPAIGN).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_campaigns_are_isolated() {
        let db = setup_db().await;
        let service = WeightService::new(db);

        service
            .set_weights("other-campaign", &[input("MANTA", 99.0)])
            .await
            .unwrap();

        let set = service.get_weights(CAMPAIGN).await.unwrap();
        assert_eq!(set.get(Prize::Manta), 20.0);
    }
}
