//! 活动当地日历
//!
//! 抽奖写入的 day_key 与报表中的 "今天" 都通过 `EventCalendar` 计算，
//! 使用固定的 UTC 偏移，与服务器所在时区无关。

use crate::error::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCalendar {
    offset: FixedOffset,
}

impl EventCalendar {
    pub fn new(utc_offset_minutes: i32) -> AppResult<Self> {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                AppError::ConfigError(format!("Invalid UTC offset: {utc_offset_minutes} minutes"))
            })?;
        Ok(Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// 某一时刻在活动当地的日期键 (YYYY-MM-DD)
    pub fn day_key(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.offset)
            .format(DAY_KEY_FORMAT)
            .to_string()
    }

    pub fn today(&self) -> String {
        self.day_key(Utc::now())
    }
}

/// 校验并规范化外部传入的日期键
pub fn parse_day_key(raw: &str) -> AppResult<String> {
    let date = NaiveDate::parse_from_str(raw.trim(), DAY_KEY_FORMAT)
        .map_err(|_| AppError::ValidationError(format!("Invalid day key: {raw}")))?;
    Ok(date.format(DAY_KEY_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_key_uses_event_offset() {
        let calendar = EventCalendar::new(-180).unwrap();
        // 02:30 UTC 在 UTC-03:00 仍是前一天
        let at = Utc.with_ymd_and_hms(2026, 2, 12, 2, 30, 0).unwrap();
        assert_eq!(calendar.day_key(at), "2026-02-11");

        let later = Utc.with_ymd_and_hms(2026, 2, 12, 3, 0, 0).unwrap();
        assert_eq!(calendar.day_key(later), "2026-02-12");
    }

    #[test]
    fn test_invalid_offset_rejected() {
        assert!(EventCalendar::new(24 * 60).is_err());
        assert!(matches!(
            EventCalendar::new(i32::MAX),
            Err(AppError::ConfigError(_))
        ));
        assert!(EventCalendar::new(i32::MIN).is_err());
    }

    #[test]
    fn test_parse_day_key() {
        assert_eq!(parse_day_key("2026-02-11").unwrap(), "2026-02-11");
        assert_eq!(parse_day_key(" 2026-02-01 ").unwrap(), "2026-02-01");
        assert!(parse_day_key("2026-13-01").is_err());
        assert!(parse_day_key("yesterday").is_err());
    }
}
