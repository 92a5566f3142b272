use crate::error::{AppError, AppResult};
use crate::models::RedeemResponse;
use crate::services::{DrawLedger, InsertDrawError, NewDraw, ParticipantService, WeightService};
use crate::utils::{EventCalendar, RandomSource, normalize_code, select_prize};
use chrono::Utc;
use std::sync::Arc;

/// 兑换服务（奖品分配）
///
/// 每个参与者最多分配一次奖品。不使用进程内锁：
/// 依赖抽奖记录表上的唯一索引裁决并发写入，冲突的一方重新读取已有记录返回。
#[derive(Clone)]
pub struct RedemptionService {
    participants: ParticipantService,
    ledger: DrawLedger,
    weights: WeightService,
    calendar: EventCalendar,
    random: Arc<dyn RandomSource>,
}

impl RedemptionService {
    pub fn new(
        participants: ParticipantService,
        ledger: DrawLedger,
        weights: WeightService,
        calendar: EventCalendar,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            participants,
            ledger,
            weights,
            calendar,
            random,
        }
    }

    /// 兑换 (Redeem)
    ///
    /// 逻辑:
    /// 1. 兑换码 -> 参与者，不存在返回 UnknownCode
    /// 2. 已有抽奖记录则直接返回 (first_time = false)，重复提交无副作用
    /// 3. 读取实时权重做加权轮盘选择（权重不可用时平均分布）
    /// 4. 写入抽奖记录；唯一约束冲突说明并发请求已先写入，重新读取并返回那条记录
    /// 5. 其他存储错误原样返回，不会留下部分状态，调用方可整体重试
    pub async fn redeem(&self, campaign_id: &str, code: &str) -> AppResult<RedeemResponse> {
        let code = normalize_code(code)?;

        let participant = self
            .participants
            .find_by_code(campaign_id, &code)
            .await?
            .ok_or_else(|| AppError::UnknownCode(code.clone()))?;

        if let Some(existing) = self.ledger.find_draw(campaign_id, participant.id).await? {
            return Ok(RedeemResponse {
                prize: existing.prize,
                first_time: false,
                day_key: existing.day_key,
            });
        }

        let weights = self.weights.get_weights(campaign_id).await?;
        let prize = select_prize(&weights, self.random.as_ref());

        let now = Utc::now();
        let draw = NewDraw {
            campaign_id: campaign_id.to_string(),
            participant_id: participant.id,
            prize,
            day_key: self.calendar.day_key(now),
            created_at: now,
        };

        match self.ledger.insert_draw(draw).await {
            Ok(created) => {
                log::info!(
                    "Draw recorded: campaign={} participant={} prize={} day={}",
                    campaign_id,
                    participant.id,
                    created.prize,
                    created.day_key
                );
                Ok(RedeemResponse {
                    prize: created.prize,
                    first_time: true,
                    day_key: created.day_key,
                })
            }
            Err(InsertDrawError::Conflict) => {
                log::warn!(
                    "Concurrent redeem for participant {} lost the insert race, returning existing draw",
                    participant.id
                );
                let existing = self
                    .ledger
                    .find_draw(campaign_id, participant.id)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalError(format!(
                            "Draw conflict for participant {} but no draw found",
                            participant.id
                        ))
                    })?;
                Ok(RedeemResponse {
                    prize: existing.prize,
                    first_time: false,
                    day_key: existing.day_key,
                })
            }
            Err(InsertDrawError::Storage(err)) => Err(AppError::StorageError(err)),
        }
    }
}
