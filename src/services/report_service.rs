use crate::entities::{Prize, draw_entity as draws};
use crate::error::{AppError, AppResult};
use crate::models::{DailyReport, DayReport, ReportTotals, empty_counts};
use crate::services::DrawLedger;
use crate::utils::{EventCalendar, parse_day_key};

/// 报表服务（只读）：按活动当地日期和奖品汇总抽奖记录
#[derive(Clone)]
pub struct ReportService {
    ledger: DrawLedger,
    calendar: EventCalendar,
}

impl ReportService {
    pub fn new(ledger: DrawLedger, calendar: EventCalendar) -> Self {
        Self { ledger, calendar }
    }

    pub fn today(&self) -> String {
        self.calendar.today()
    }

    /// 区间日报 [from_day, to_day]，没有记录的日期不出现
    pub async fn daily_report(
        &self,
        campaign_id: &str,
        from_day: &str,
        to_day: &str,
    ) -> AppResult<DailyReport> {
        let from = parse_day_key(from_day)?;
        let to = parse_day_key(to_day)?;
        if from > to {
            return Err(AppError::ValidationError(format!(
                "from ({from}) must not be after to ({to})"
            )));
        }

        let list = self.ledger.list_draws(campaign_id, &from, &to).await?;
        let days = group_by_day(&list);

        let mut totals = ReportTotals {
            total: 0,
            counts: empty_counts(),
        };
        for day in &days {
            totals.total += day.total;
            for (prize, count) in &day.counts {
                *totals.counts.entry(*prize).or_insert(0) += count;
            }
        }

        Ok(DailyReport {
            from,
            to,
            prizes: Prize::ALL.to_vec(),
            days,
            totals,
        })
    }

    /// 今日统计，"今天" 与兑换写入 day_key 使用同一日历
    pub async fn today_report(&self, campaign_id: &str) -> AppResult<DayReport> {
        let today = self.today();
        let list = self.ledger.list_draws(campaign_id, &today, &today).await?;
        Ok(group_by_day(&list)
            .into_iter()
            .next()
            .unwrap_or_else(|| DayReport::empty(today)))
    }
}

/// 按 day_key 分组计数（输入已按日期排序）
fn group_by_day(list: &[draws::Model]) -> Vec<DayReport> {
    let mut days: Vec<DayReport> = Vec::new();
    for draw in list {
        match days.last_mut() {
            Some(day) if day.day_key == draw.day_key => day.record(draw.prize),
            _ => {
                let mut day = DayReport::empty(draw.day_key.clone());
                day.record(draw.prize);
                days.push(day);
            }
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrizeWeightInput;
    use crate::services::{
        InsertDrawError, NewDraw, ParticipantService, RedemptionService, WeightService,
    };
    use crate::test_support::{CAMPAIGN, seed_participant, setup_db};
    use crate::utils::ThreadRandom;
    use chrono::Utc;
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;

    fn calendar() -> EventCalendar {
        EventCalendar::new(-180).unwrap()
    }

    async fn record(
        db: &DatabaseConnection,
        code: &str,
        prize: Prize,
        day_key: &str,
    ) -> Result<draws::Model, InsertDrawError> {
        let p = seed_participant(db, CAMPAIGN, code).await;
        DrawLedger::new(db.clone())
            .insert_draw(NewDraw {
                campaign_id: CAMPAIGN.to_string(),
                participant_id: p.id,
                prize,
                day_key: day_key.to_string(),
                created_at: Utc::now(),
            })
            .await
    }

    #[tokio::test]
    async fn test_daily_report_groups_by_day_and_prize() {
        let db = setup_db().await;
        record(&db, "D001", Prize::Manta, "2026-02-11").await.unwrap();
        record(&db, "D002", Prize::Manta, "2026-02-11").await.unwrap();
        record(&db, "D003", Prize::Buff, "2026-02-11").await.unwrap();
        record(&db, "D004", Prize::SigueParticipando, "2026-02-13")
            .await
            .unwrap();
        record(&db, "D005", Prize::Agua, "2026-03-01").await.unwrap();

        let service = ReportService::new(DrawLedger::new(db.clone()), calendar());
        let report = service
            .daily_report(CAMPAIGN, "2026-02-11", "2026-02-25")
            .await
            .unwrap();

        assert_eq!(report.prizes, Prize::ALL.to_vec());
        // 2026-02-12 没有记录，不补空日期
        let keys: Vec<&str> = report.days.iter().map(|d| d.day_key.as_str()).collect();
        assert_eq!(keys, vec!["2026-02-11", "2026-02-13"]);

        let first = &report.days[0];
        assert_eq!(first.total, 3);
        assert_eq!(first.counts[&Prize::Manta], 2);
        assert_eq!(first.counts[&Prize::Buff], 1);
        assert_eq!(first.counts[&Prize::Agua], 0);
        assert_eq!(first.counts.len(), Prize::ALL.len());

        assert_eq!(report.totals.total, 4);
        assert_eq!(report.totals.counts[&Prize::SigueParticipando], 1);
        assert_eq!(report.totals.counts[&Prize::Agua], 0);
    }

    #[tokio::test]
    async fn test_daily_report_rejects_bad_range() {
        let db = setup_db().await;
        let service = ReportService::new(DrawLedger::new(db), calendar());

        assert!(matches!(
            service.daily_report(CAMPAIGN, "2026-02-20", "2026-02-11").await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            service.daily_report(CAMPAIGN, "feb", "2026-02-11").await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_today_report_empty_day_lists_all_prizes() {
        let db = setup_db().await;
        let service = ReportService::new(DrawLedger::new(db), calendar());

        let report = service.today_report(CAMPAIGN).await.unwrap();
        assert_eq!(report.day_key, service.today());
        assert_eq!(report.total, 0);
        assert!(report.counts.values().all(|c| *c == 0));
        assert_eq!(report.counts.len(), Prize::ALL.len());
    }

    #[tokio::test]
    async fn test_today_report_matches_ledger_after_redeems() {
        let db = setup_db().await;
        let ledger = DrawLedger::new(db.clone());
        let weights = WeightService::new(db.clone());
        weights
            .set_weights(
                CAMPAIGN,
                &[
                    PrizeWeightInput {
                        prize: "MANTA".into(),
                        weight: 3.0,
                    },
                    PrizeWeightInput {
                        prize: "AGUA".into(),
                        weight: 1.0,
                    },
                ],
            )
            .await
            .unwrap();
        let redemption = RedemptionService::new(
            ParticipantService::new(db.clone()),
            ledger.clone(),
            weights,
            calendar(),
            Arc::new(ThreadRandom),
        );
        let reports = ReportService::new(ledger.clone(), calendar());

        for i in 0..12 {
            let code = format!("T{i:03}");
            seed_participant(&db, CAMPAIGN, &code).await;
            redemption.redeem(CAMPAIGN, &code).await.unwrap();
            // 重复提交不应影响计数
            redemption.redeem(CAMPAIGN, &code).await.unwrap();
        }
        // 历史日期的记录不计入今天
        record(&db, "H001", Prize::Strap, "2020-01-01").await.unwrap();

        let today = reports.today();
        let report = reports.today_report(CAMPAIGN).await.unwrap();
        let listed = ledger.list_draws(CAMPAIGN, &today, &today).await.unwrap();

        assert_eq!(report.day_key, today);
        assert_eq!(report.total, 12);
        assert_eq!(report.total as usize, listed.len());
        for prize in Prize::ALL {
            let expected = listed.iter().filter(|d| d.prize == prize).count() as u64;
            assert_eq!(report.counts[&prize], expected, "prize {prize}");
        }
    }
}
