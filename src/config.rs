use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub campaign: CampaignConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// 活动范围配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// 活动标识，隔离参与者 / 权重 / 抽奖记录
    pub id: String,
    /// 活动当地时区相对 UTC 的偏移（分钟），例如 -180 = UTC-03:00
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
    /// 日报默认起始日 (YYYY-MM-DD)
    #[serde(default)]
    pub report_from: Option<String>,
    /// 日报默认结束日 (YYYY-MM-DD)
    #[serde(default)]
    pub report_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    /// 工作人员共享口令 (x-admin-pin)，为空时拒绝所有管理请求
    #[serde(default)]
    pub pin: String,
}

fn default_utc_offset_minutes() -> i32 {
    -180
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("解析配置文件失败: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 数据库 URL 在无配置文件时必须提供
                let database_url = get_env("DATABASE_URL")
                    .ok_or("缺少 DATABASE_URL 环境变量，且未找到配置文件 config.toml")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    campaign: CampaignConfig {
                        id: get_env("CAMPAIGN_ID").unwrap_or_else(|| "default".to_string()),
                        utc_offset_minutes: get_env_parse(
                            "CAMPAIGN_UTC_OFFSET_MINUTES",
                            default_utc_offset_minutes(),
                        ),
                        report_from: get_env("CAMPAIGN_REPORT_FROM"),
                        report_to: get_env("CAMPAIGN_REPORT_TO"),
                    },
                    admin: AdminConfig {
                        pin: get_env("ADMIN_PIN").unwrap_or_default(),
                    },
                }
            }
            Err(e) => {
                return Err(format!("无法读取配置文件 {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("CAMPAIGN_ID") {
            config.campaign.id = v;
        }
        if let Ok(v) = env::var("CAMPAIGN_UTC_OFFSET_MINUTES")
            && let Ok(n) = v.parse()
        {
            config.campaign.utc_offset_minutes = n;
        }
        if let Ok(v) = env::var("CAMPAIGN_REPORT_FROM") {
            config.campaign.report_from = Some(v);
        }
        if let Ok(v) = env::var("CAMPAIGN_REPORT_TO") {
            config.campaign.report_to = Some(v);
        }
        if let Ok(v) = env::var("ADMIN_PIN") {
            config.admin.pin = v;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_with_defaults() {
        let raw = r#"
[server]
host = "127.0.0.1"
port = 9000

[database]
url = "sqlite::memory:"
max_connections = 1

[campaign]
id = "expo-2026"
"#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.campaign.id, "expo-2026");
        assert_eq!(config.campaign.utc_offset_minutes, -180);
        assert!(config.campaign.report_from.is_none());
        assert!(config.admin.pin.is_empty());
    }
}
