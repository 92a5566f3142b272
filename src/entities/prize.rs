use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 活动奖品（固定集合）
///
/// 声明顺序即轮盘遍历顺序，`Prize::ALL` 与之保持一致；新增奖品需要走迁移。
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Prize {
    #[sea_orm(string_value = "MANTA")]
    Manta,
    #[sea_orm(string_value = "AGUA")]
    Agua,
    #[sea_orm(string_value = "STRAP")]
    Strap,
    #[sea_orm(string_value = "BUFF")]
    Buff,
    /// "keep playing", no physical prize
    #[sea_orm(string_value = "SIGUE_PARTICIPANDO")]
    SigueParticipando,
}

impl Prize {
    pub const ALL: [Prize; 5] = [
        Prize::Manta,
        Prize::Agua,
        Prize::Strap,
        Prize::Buff,
        Prize::SigueParticipando,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Prize::Manta => "MANTA",
            Prize::Agua => "AGUA",
            Prize::Strap => "STRAP",
            Prize::Buff => "BUFF",
            Prize::SigueParticipando => "SIGUE_PARTICIPANDO",
        }
    }

    /// 解析奖品键（忽略首尾空白与大小写），不在固定集合内返回 None
    pub fn from_key(raw: &str) -> Option<Prize> {
        let key = raw.trim().to_ascii_uppercase();
        Prize::ALL.into_iter().find(|p| p.as_str() == key)
    }

    /// 未配置时的平均权重 (100 / 奖品数)
    pub fn default_weight() -> f64 {
        100.0 / Prize::ALL.len() as f64
    }
}

impl std::fmt::Display for Prize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_normalizes_input() {
        assert_eq!(Prize::from_key(" manta "), Some(Prize::Manta));
        assert_eq!(
            Prize::from_key("sigue_participando"),
            Some(Prize::SigueParticipando)
        );
        assert_eq!(Prize::from_key("GORRO"), None);
        assert_eq!(Prize::from_key(""), None);
    }

    #[test]
    fn test_default_weight_is_even_split() {
        assert_eq!(Prize::default_weight(), 20.0);
    }

    #[test]
    fn test_serializes_as_symbolic_key() {
        let json = serde_json::to_string(&Prize::SigueParticipando).unwrap();
        assert_eq!(json, "\"SIGUE_PARTICIPANDO\"");
    }
}
